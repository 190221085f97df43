use glam::{Mat4, Vec3};
use serde::{Deserialize, Serialize};

const PITCH_LIMIT_DEGREES: f32 = 89.0;

/// Fly camera with position, yaw, pitch, and projection parameters.
///
/// Angles are radians. Yaw is measured from +x towards +z, so a yaw of
/// -90 degrees looks down -z.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Camera {
    pub position: Vec3,
    pub yaw: f32,
    pub pitch: f32,
    /// Vertical field of view.
    pub fov: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
    /// Translation speed in units per second.
    pub speed: f32,
    /// Radians of rotation per unit of pointer motion.
    pub sensitivity: f32,
}

impl Default for Camera {
    fn default() -> Self {
        // Sits above and behind the origin, looking at it.
        Self {
            position: Vec3::new(0.0, 4.0, 10.0),
            yaw: -90.0_f32.to_radians(),
            pitch: -(0.4_f32.atan()),
            fov: 60.0_f32.to_radians(),
            aspect: 16.0 / 9.0,
            near: 0.1,
            far: 1000.0,
            speed: 10.0,
            sensitivity: 0.003,
        }
    }
}

impl Camera {
    pub fn forward(&self) -> Vec3 {
        Vec3::new(
            self.yaw.cos() * self.pitch.cos(),
            self.pitch.sin(),
            self.yaw.sin() * self.pitch.cos(),
        )
        .normalize()
    }

    pub fn right(&self) -> Vec3 {
        self.forward().cross(Vec3::Y).normalize()
    }

    /// Move in camera-local axes: x right, y world-up, z forward.
    pub fn translate(&mut self, local: Vec3, dt: f32) {
        let offset = self.right() * local.x + Vec3::Y * local.y + self.forward() * local.z;
        self.position += offset * self.speed * dt;
    }

    pub fn rotate(&mut self, dx: f32, dy: f32) {
        self.yaw += dx * self.sensitivity;
        self.pitch -= dy * self.sensitivity;
        self.clamp_pitch();
    }

    /// Turn to face `target`. A target at the camera position is ignored.
    pub fn look_at(&mut self, target: Vec3) {
        let dir = (target - self.position).normalize_or_zero();
        if dir == Vec3::ZERO {
            return;
        }
        self.yaw = dir.z.atan2(dir.x);
        self.pitch = dir.y.clamp(-1.0, 1.0).asin();
        self.clamp_pitch();
    }

    /// Update the aspect ratio from a viewport size. A zero dimension is ignored.
    pub fn set_viewport(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        self.aspect = width as f32 / height as f32;
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.position + self.forward(), Vec3::Y)
    }

    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov, self.aspect, self.near, self.far)
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    /// World-space ray through a point in normalized device coordinates.
    ///
    /// Returns `(origin, direction)` with a unit direction. The origin is the
    /// camera position.
    pub fn ray_through(&self, ndc_x: f32, ndc_y: f32) -> (Vec3, Vec3) {
        let inv = self.view_projection().inverse();
        let near = inv.project_point3(Vec3::new(ndc_x, ndc_y, 0.0));
        let far = inv.project_point3(Vec3::new(ndc_x, ndc_y, 1.0));
        (self.position, (far - near).normalize())
    }

    fn clamp_pitch(&mut self) {
        let limit = PITCH_LIMIT_DEGREES.to_radians();
        self.pitch = self.pitch.clamp(-limit, limit);
    }
}
