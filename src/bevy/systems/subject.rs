//! Subject texture system
//!
//! Uploads the session's subject image into a texture when it changes and
//! resizes the plane to the image's aspect ratio.

use bevy::{
    asset::{Assets, RenderAssetUsages},
    image::Image,
    pbr::{MeshMaterial3d, StandardMaterial},
    prelude::*,
    render::render_resource::{Extent3d, TextureDimension, TextureFormat},
};

use crate::bevy::components::SubjectPlane;
use crate::bevy::resources::{AngleSessionRes, PlaceholderMaterial, SubjectTexture};
use crate::config::scene::SUBJECT_PLANE_SIZE;
use crate::manipulator::layout::fit_subject_plane;
use crate::session::SubjectImage;

/// Rebuild the subject plane's material when the subject revision changes
pub fn sync_subject_texture(
    session: Option<Res<AngleSessionRes>>,
    placeholder: Option<Res<PlaceholderMaterial>>,
    mut texture: ResMut<SubjectTexture>,
    mut images: ResMut<Assets<Image>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut planes: Query<(&mut MeshMaterial3d<StandardMaterial>, &mut Transform), With<SubjectPlane>>,
) {
    let (Some(session), Some(placeholder)) = (session, placeholder) else {
        return;
    };

    // Clone the pixels out so the lock is not held while uploading
    let (revision, subject) = {
        let Ok(guard) = session.0.lock() else { return };
        if guard.subject_revision() == texture.revision {
            return;
        }
        (guard.subject_revision(), guard.subject().cloned())
    };
    texture.revision = revision;

    if let Some(old) = texture.image.take() {
        images.remove(&old);
    }

    let (material, plane_size) = match subject {
        Some(subject) => {
            let plane_size = fit_subject_plane(subject.width, subject.height);
            let handle = images.add(subject_to_image(subject));
            texture.image = Some(handle.clone());
            let material = materials.add(StandardMaterial {
                base_color_texture: Some(handle),
                unlit: true,
                double_sided: true,
                cull_mode: None,
                ..default()
            });
            (material, plane_size)
        }
        None => (placeholder.0.clone(), Vec2::splat(SUBJECT_PLANE_SIZE)),
    };

    for (mut plane_material, mut transform) in planes.iter_mut() {
        if plane_material.0 != placeholder.0 {
            materials.remove(&plane_material.0);
        }
        plane_material.0 = material.clone();
        transform.scale = plane_size.extend(1.0);
    }

    log::info!(
        "[Bevy] Subject texture updated (revision {}, plane {:.2}x{:.2})",
        revision,
        plane_size.x,
        plane_size.y
    );
}

fn subject_to_image(subject: SubjectImage) -> Image {
    Image::new(
        Extent3d {
            width: subject.width,
            height: subject.height,
            depth_or_array_layers: 1,
        },
        TextureDimension::D2,
        subject.rgba,
        TextureFormat::Rgba8UnormSrgb,
        RenderAssetUsages::default(),
    )
}
