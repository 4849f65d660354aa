//! Scene setup system
//!
//! This module handles the initial setup of the manipulator scene: the fixed
//! viewing camera, the orbit guides, the subject group and the three handles.

use bevy::{
    asset::Assets,
    camera::RenderTarget,
    core_pipeline::tonemapping::Tonemapping,
    image::Image,
    math::{
        primitives::{Cuboid, Rectangle, Sphere, Torus},
        Vec3,
    },
    pbr::{MeshMaterial3d, StandardMaterial},
    prelude::*,
    render::{
        render_resource::{Extent3d, TextureFormat, TextureUsages},
        renderer::RenderDevice,
    },
};

use crate::bevy::components::{AngleHandle, OffscreenCamera, SubjectGroup, SubjectPlane};
use crate::bevy::plugins::image_copy::ImageCopier;
use crate::bevy::resources::{PlaceholderMaterial, RenderTargetHandle};
use crate::config::angles::{MAX_VERTICAL, MIN_VERTICAL};
use crate::config::scene::*;
use crate::config::{RENDER_HEIGHT, RENDER_WIDTH};
use crate::manipulator::HandleKind;

/// Number of dots drawn along the vertical arc guide
const ARC_DOTS: usize = 24;

/// Setup the scene with camera, guides, subject and handles
pub fn setup_scene(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut images: ResMut<Assets<Image>>,
    render_device: Res<RenderDevice>,
) {
    log::info!("[Bevy] Setting up scene...");

    let size = Extent3d {
        width: RENDER_WIDTH,
        height: RENDER_HEIGHT,
        depth_or_array_layers: 1,
    };

    // Create render target texture
    let mut render_target_image =
        Image::new_target_texture(size.width, size.height, TextureFormat::bevy_default());
    render_target_image.texture_descriptor.usage |= TextureUsages::COPY_SRC;
    let render_target_image_handle = images.add(render_target_image);

    commands.insert_resource(RenderTargetHandle(render_target_image_handle.clone()));

    // Spawn image copier for GPU-to-CPU transfer
    commands.spawn(ImageCopier::new(
        render_target_image_handle.clone(),
        size,
        &render_device,
    ));

    // Fixed viewing camera; picking assumes the same eye and field of view
    commands.spawn((
        Camera3d::default(),
        Camera {
            target: RenderTarget::Image(render_target_image_handle.into()),
            clear_color: ClearColorConfig::Custom(Color::srgb_u8(0x08, 0x08, 0x10)),
            ..default()
        },
        Projection::Perspective(PerspectiveProjection {
            fov: CAMERA_FOV_DEGREES.to_radians(),
            near: CAMERA_NEAR,
            far: CAMERA_FAR,
            ..default()
        }),
        Tonemapping::None,
        Transform::from_translation(Vec3::from_array(CAMERA_EYE))
            .looking_at(Vec3::ZERO, Vec3::Y),
        OffscreenCamera,
    ));

    spawn_guides(&mut commands, &mut meshes, &mut materials);
    spawn_subject(&mut commands, &mut meshes, &mut materials);
    spawn_handles(&mut commands, &mut meshes, &mut materials);

    // Key light
    commands.spawn((
        DirectionalLight {
            illuminance: 4000.0,
            ..default()
        },
        Transform::from_xyz(5.0, 5.0, 5.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));

    // Fill light
    commands.spawn((
        PointLight {
            intensity: 600_000.0,
            color: Color::srgb(0.85, 0.9, 1.0),
            ..default()
        },
        Transform::from_xyz(-3.0, 3.0, 4.0),
    ));

    log::info!("[Bevy] Scene setup complete!");
}

/// Horizontal ring, vertical arc and floor grid
fn spawn_guides(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
) {
    let ring_material = materials.add(StandardMaterial {
        base_color: Color::srgba_u8(0x3b, 0x82, 0xf6, 102),
        alpha_mode: AlphaMode::Blend,
        unlit: true,
        ..default()
    });
    commands.spawn((
        Mesh3d(meshes.add(Torus {
            minor_radius: 0.02,
            major_radius: RING_RADIUS,
        })),
        MeshMaterial3d(ring_material),
        Transform::from_xyz(0.0, RING_HEIGHT, 0.0),
    ));

    let arc_material = materials.add(StandardMaterial {
        base_color: Color::srgba_u8(0x22, 0xd3, 0xee, 128),
        alpha_mode: AlphaMode::Blend,
        unlit: true,
        ..default()
    });
    let arc_dot = meshes.add(Sphere::new(0.015));
    for i in 0..=ARC_DOTS {
        let t = i as f64 / ARC_DOTS as f64;
        let angle = (MIN_VERTICAL + t * (MAX_VERTICAL - MIN_VERTICAL)).to_radians() as f32;
        commands.spawn((
            Mesh3d(arc_dot.clone()),
            MeshMaterial3d(arc_material.clone()),
            Transform::from_xyz(angle.cos() * ARC_RADIUS, angle.sin() * ARC_RADIUS, 0.0),
        ));
    }

    // Floor grid as thin crossing bars
    let grid_material = materials.add(StandardMaterial {
        base_color: Color::srgb_u8(0x0f, 0x1a, 0x2a),
        unlit: true,
        ..default()
    });
    let bar_x = meshes.add(Cuboid::new(6.0, 0.005, 0.01));
    let bar_z = meshes.add(Cuboid::new(0.01, 0.005, 6.0));
    for i in 0..=20 {
        let offset = -3.0 + i as f32 * 0.3;
        commands.spawn((
            Mesh3d(bar_x.clone()),
            MeshMaterial3d(grid_material.clone()),
            Transform::from_xyz(0.0, GRID_HEIGHT, offset),
        ));
        commands.spawn((
            Mesh3d(bar_z.clone()),
            MeshMaterial3d(grid_material.clone()),
            Transform::from_xyz(offset, GRID_HEIGHT, 0.0),
        ));
    }
}

/// Subject plane with a border, grouped so it can be posed as one
fn spawn_subject(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
) {
    let placeholder = materials.add(StandardMaterial {
        base_color: Color::srgb_u8(0x1a, 0x1a, 0x2e),
        unlit: true,
        double_sided: true,
        cull_mode: None,
        ..default()
    });
    commands.insert_resource(PlaceholderMaterial(placeholder.clone()));

    let border_material = materials.add(StandardMaterial {
        base_color: Color::srgba_u8(0x3b, 0x82, 0xf6, 153),
        alpha_mode: AlphaMode::Blend,
        unlit: true,
        double_sided: true,
        cull_mode: None,
        ..default()
    });

    let border = SUBJECT_PLANE_SIZE + 0.1;
    commands
        .spawn((SubjectGroup, Transform::default(), Visibility::default()))
        .with_children(|group| {
            // Border sits just behind the plane
            group.spawn((
                Mesh3d(meshes.add(Rectangle::new(border, border))),
                MeshMaterial3d(border_material),
                Transform::from_xyz(0.0, 0.0, -0.005),
            ));
            group.spawn((
                Mesh3d(meshes.add(Rectangle::new(1.0, 1.0))),
                MeshMaterial3d(placeholder),
                Transform::from_scale(Vec3::new(SUBJECT_PLANE_SIZE, SUBJECT_PLANE_SIZE, 1.0)),
                SubjectPlane,
            ));
        });
}

fn spawn_handles(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
) {
    for kind in HandleKind::ALL {
        let (base, glow) = match kind {
            HandleKind::Horizontal => (
                Color::srgb_u8(0x3b, 0x82, 0xf6),
                Color::srgb_u8(0x1e, 0x40, 0xaf),
            ),
            HandleKind::Vertical => (
                Color::srgb_u8(0x22, 0xd3, 0xee),
                Color::srgb_u8(0x08, 0x91, 0xb2),
            ),
            HandleKind::Zoom => (
                Color::srgb_u8(0xfb, 0xbf, 0x24),
                Color::srgb_u8(0xb4, 0x53, 0x09),
            ),
        };
        let emissive = LinearRgba::from(glow);

        commands.spawn((
            Mesh3d(meshes.add(Sphere::new(kind.radius()))),
            MeshMaterial3d(materials.add(StandardMaterial {
                base_color: base,
                emissive: emissive * HANDLE_EMISSIVE_IDLE,
                ..default()
            })),
            Transform::default(),
            AngleHandle { kind, emissive },
        ));
    }

    // Handles start at the default pose; the pose system moves them each frame
    log::debug!("[Bevy] Spawned {} handles", HandleKind::ALL.len());
}
