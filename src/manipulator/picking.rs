//! Pointer picking against the handles
//!
//! The widget's camera never moves: it sits at `CAMERA_EYE` looking at the
//! origin. A pointer position in viewport pixels becomes a world-space ray,
//! which is tested against one sphere per handle.

use bevy::math::{Vec2, Vec3};

use super::layout::HandleLayout;
use super::state::HandleKind;
use crate::config::scene::{CAMERA_EYE, CAMERA_FOV_DEGREES};
use crate::config::{RENDER_HEIGHT, RENDER_WIDTH};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
}

/// Fixed perspective camera of the widget, sized to the viewport
#[derive(Debug, Clone, Copy)]
pub struct ViewportCamera {
    eye: Vec3,
    target: Vec3,
    fov_y: f32,
    viewport: Vec2,
}

impl Default for ViewportCamera {
    fn default() -> Self {
        Self::new(Vec2::new(RENDER_WIDTH as f32, RENDER_HEIGHT as f32))
    }
}

impl ViewportCamera {
    pub fn new(viewport: Vec2) -> Self {
        Self {
            eye: Vec3::from_array(CAMERA_EYE),
            target: Vec3::ZERO,
            fov_y: CAMERA_FOV_DEGREES.to_radians(),
            viewport: viewport.max(Vec2::ONE),
        }
    }

    pub fn viewport(&self) -> Vec2 {
        self.viewport
    }

    pub fn set_viewport(&mut self, viewport: Vec2) {
        self.viewport = viewport.max(Vec2::ONE);
    }

    fn basis(&self) -> (Vec3, Vec3, Vec3) {
        let forward = (self.target - self.eye).normalize();
        let right = forward.cross(Vec3::Y).normalize();
        let up = right.cross(forward);
        (forward, right, up)
    }

    fn aspect(&self) -> f32 {
        self.viewport.x / self.viewport.y
    }

    /// Pointer pixels (origin top-left) to normalized device coordinates
    fn to_ndc(&self, pointer: Vec2) -> Vec2 {
        Vec2::new(
            pointer.x / self.viewport.x * 2.0 - 1.0,
            -(pointer.y / self.viewport.y * 2.0 - 1.0),
        )
    }

    pub fn pick_ray(&self, pointer: Vec2) -> Ray {
        let (f, r, u) = self.basis();
        let ndc = self.to_ndc(pointer);
        let t = (self.fov_y * 0.5).tan();
        Ray {
            origin: self.eye,
            direction: (f + r * (ndc.x * t * self.aspect()) + u * (ndc.y * t)).normalize(),
        }
    }

    /// Project a world point to viewport pixels; `None` behind the camera
    pub fn project(&self, point: Vec3) -> Option<Vec2> {
        let (f, r, u) = self.basis();
        let offset = point - self.eye;
        let depth = offset.dot(f);
        if depth <= 0.0 {
            return None;
        }
        let t = (self.fov_y * 0.5).tan();
        let ndc = Vec2::new(
            offset.dot(r) / (depth * t * self.aspect()),
            offset.dot(u) / (depth * t),
        );
        Some(Vec2::new(
            (ndc.x + 1.0) * 0.5 * self.viewport.x,
            (1.0 - ndc.y) * 0.5 * self.viewport.y,
        ))
    }
}

/// Distance along the ray to the first intersection with a sphere
pub fn ray_sphere(ray: &Ray, center: Vec3, radius: f32) -> Option<f32> {
    let oc = ray.origin - center;
    let b = oc.dot(ray.direction);
    let c = oc.length_squared() - radius * radius;
    let discriminant = b * b - c;
    if discriminant < 0.0 {
        return None;
    }
    let root = discriminant.sqrt();
    let near = -b - root;
    if near >= 0.0 {
        return Some(near);
    }
    let far = -b + root;
    (far >= 0.0).then_some(far)
}

/// Hit tests the handles for a given layout
#[derive(Debug, Clone, Copy, Default)]
pub struct HandlePicker {
    pub camera: ViewportCamera,
}

impl HandlePicker {
    pub fn new(camera: ViewportCamera) -> Self {
        Self { camera }
    }

    /// Nearest intersected handle; ties go to the earlier declared handle
    pub fn pick(&self, layout: &HandleLayout, pointer: Vec2) -> Option<HandleKind> {
        let ray = self.camera.pick_ray(pointer);
        let mut best: Option<(HandleKind, f32)> = None;
        for kind in HandleKind::ALL {
            let Some(distance) = ray_sphere(&ray, layout.center(kind), kind.radius()) else {
                continue;
            };
            if best.map_or(true, |(_, nearest)| distance < nearest) {
                best = Some((kind, distance));
            }
        }
        best.map(|(kind, _)| kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::angle::AngleParameters;

    #[test]
    fn test_center_pointer_looks_at_origin() {
        let camera = ViewportCamera::default();
        let ray = camera.pick_ray(camera.viewport() * 0.5);
        let expected = (Vec3::ZERO - Vec3::from_array(CAMERA_EYE)).normalize();
        assert!(ray.direction.abs_diff_eq(expected, 1e-5));
    }

    #[test]
    fn test_project_inverts_pick_ray() {
        let camera = ViewportCamera::default();
        let pointer = Vec2::new(123.0, 321.0);
        let ray = camera.pick_ray(pointer);
        let projected = camera.project(ray.origin + ray.direction * 3.0).unwrap();
        assert!(projected.abs_diff_eq(pointer, 1e-2));
    }

    #[test]
    fn test_ray_sphere_hit_and_miss() {
        let ray = Ray {
            origin: Vec3::new(0.0, 0.0, 5.0),
            direction: Vec3::NEG_Z,
        };
        let hit = ray_sphere(&ray, Vec3::ZERO, 1.0).unwrap();
        assert!((hit - 4.0).abs() < 1e-5);
        assert!(ray_sphere(&ray, Vec3::new(3.0, 0.0, 0.0), 1.0).is_none());
        assert!(ray_sphere(&ray, Vec3::new(0.0, 0.0, 10.0), 1.0).is_none());
    }

    #[test]
    fn test_pick_each_handle_at_its_projection() {
        let picker = HandlePicker::default();
        let layout = HandleLayout::from_parameters(&AngleParameters::new(60.0, 30.0, 5.0, true));
        for kind in HandleKind::ALL {
            let pointer = picker.camera.project(layout.center(kind)).unwrap();
            assert_eq!(picker.pick(&layout, pointer), Some(kind), "{kind:?}");
        }
    }

    #[test]
    fn test_pick_background_is_none() {
        let picker = HandlePicker::default();
        let layout = HandleLayout::from_parameters(&AngleParameters::default());
        assert_eq!(picker.pick(&layout, Vec2::new(5.0, 5.0)), None);
    }

    #[test]
    fn test_overlapping_handles_nearest_wins() {
        let picker = HandlePicker::default();
        let eye = Vec3::from_array(CAMERA_EYE);
        let toward_origin = (Vec3::ZERO - eye).normalize();
        let layout = HandleLayout {
            horizontal: eye + toward_origin * 3.0,
            vertical: eye + toward_origin * 2.0,
            zoom: eye + toward_origin * 2.5,
        };
        let pointer = picker.camera.viewport() * 0.5;
        assert_eq!(picker.pick(&layout, pointer), Some(HandleKind::Vertical));
    }
}
