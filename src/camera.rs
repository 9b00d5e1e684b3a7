use crate::material::clamp_coordinate;
use glam::{Mat4, Vec3};

/// Viewer placed with a look-at transform and a perspective projection
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub fovy_deg: f32,
    pub near: f32,
    pub far: f32,
    aspect: f32,
}

impl Camera {
    pub fn eye(&self) -> Vec3 {
        self.eye
    }

    /// Sets one axis (0 = x, 1 = y, 2 = z) of the eye position, clamped
    pub fn set_eye_axis(&mut self, axis: usize, value: f32) {
        if axis < 3 {
            self.eye[axis] = clamp_coordinate(value);
        }
    }

    pub fn aspect(&self) -> f32 {
        self.aspect
    }

    pub fn set_aspect(&mut self, aspect: f32) {
        if aspect.is_finite() && aspect > 0.0 {
            self.aspect = aspect;
        }
    }

    /// Recomputes the aspect ratio for a surface of `width` × `height` pixels
    pub fn resize(&mut self, width: usize, height: usize) {
        if width > 0 && height > 0 {
            self.set_aspect(width as f32 / height as f32);
        }
    }

    pub fn view(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, self.up)
    }

    pub fn projection(&self) -> Mat4 {
        Mat4::perspective_rh_gl(self.fovy_deg.to_radians(), self.aspect, self.near, self.far)
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection() * self.view()
    }
}

impl Default for Camera {
    fn default() -> Self {
        Camera {
            eye: Vec3::new(65.0, 32.0, -117.0),
            target: Vec3::new(2.0, 0.0, 0.0),
            up: Vec3::Y,
            fovy_deg: 50.0,
            near: 5.0,
            far: 800.0,
            aspect: 1.0,
        }
    }
}
