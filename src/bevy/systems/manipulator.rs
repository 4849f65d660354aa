//! Manipulator pose systems
//!
//! Reads the shared angle session every frame and moves the handles and the
//! subject group to match. Input never flows through Bevy: the session has
//! already applied it by the time these systems run.

use bevy::{
    asset::Assets,
    pbr::{MeshMaterial3d, StandardMaterial},
    prelude::*,
};

use crate::angle::AngleParameters;
use crate::bevy::components::{AngleHandle, SubjectGroup};
use crate::bevy::resources::AngleSessionRes;
use crate::config::scene::{HANDLE_EMISSIVE_ACTIVE, HANDLE_EMISSIVE_IDLE};
use crate::manipulator::{HandleLayout, ManipulatorInteractionState, SubjectPose};

/// Copy of the session fields the pose systems need
fn read_session(
    session: &AngleSessionRes,
) -> Option<(AngleParameters, ManipulatorInteractionState)> {
    match session.0.lock() {
        Ok(guard) => Some((guard.parameters(), guard.interaction().clone())),
        Err(err) => {
            log::warn!("[Bevy] Skipping pose update: {}", err);
            None
        }
    }
}

/// Place the handles and orient the subject from the current parameters
pub fn pose_scene_from_angles(
    session: Option<Res<AngleSessionRes>>,
    mut handles: Query<(&AngleHandle, &mut Transform), Without<SubjectGroup>>,
    mut subject: Query<&mut Transform, With<SubjectGroup>>,
) {
    let Some(session) = session else { return };
    let Some((params, _)) = read_session(&session) else {
        return;
    };

    let layout = HandleLayout::from_parameters(&params);
    for (handle, mut transform) in handles.iter_mut() {
        transform.translation = layout.center(handle.kind);
    }

    let pose = SubjectPose::from_parameters(&params);
    for mut transform in subject.iter_mut() {
        transform.rotation = pose.rotation;
        transform.scale = Vec3::splat(pose.scale);
    }
}

/// Brighten the hovered or dragged handle
pub fn highlight_handles(
    session: Option<Res<AngleSessionRes>>,
    handles: Query<(&AngleHandle, &MeshMaterial3d<StandardMaterial>)>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let Some(session) = session else { return };
    let Some((_, interaction)) = read_session(&session) else {
        return;
    };

    for (handle, material) in handles.iter() {
        let strength = if interaction.is_highlighted(handle.kind) {
            HANDLE_EMISSIVE_ACTIVE
        } else {
            HANDLE_EMISSIVE_IDLE
        };
        let target = handle.emissive * strength;

        // Only touch the asset on change so it is not re-uploaded every frame
        let unchanged = materials
            .get(&material.0)
            .is_some_and(|m| m.emissive == target);
        if unchanged {
            continue;
        }
        if let Some(m) = materials.get_mut(&material.0) {
            m.emissive = target;
        }
    }
}
