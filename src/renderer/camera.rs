//! First-person camera

use glam::{Mat4, Vec2, Vec3, Vec4Swizzles};

/// Perspective camera driven by mouse-look
#[derive(Debug, Clone)]
pub struct Camera {
    /// Camera position in world space
    pub position: Vec3,
    /// Direction the camera is looking at
    pub direction: Vec3,
    /// Up vector
    pub up: Vec3,
    /// Field of view in radians
    pub fov: f32,
    /// Near clipping plane
    pub near: f32,
    /// Far clipping plane
    pub far: f32,
    /// Aspect ratio (width / height)
    pub aspect: f32,
    /// Yaw angle (rotation around Y axis)
    yaw: f32,
    /// Pitch angle (rotation around X axis)
    pitch: f32,
}

impl Camera {
    /// Create a new camera with default settings
    pub fn new() -> Self {
        Self {
            position: Vec3::new(0.0, 1.7, 5.0),
            direction: Vec3::NEG_Z,
            up: Vec3::Y,
            fov: std::f32::consts::FRAC_PI_4, // 45 degrees
            near: 0.1,
            far: 1000.0,
            aspect: 16.0 / 9.0,
            yaw: -90.0_f32.to_radians(),
            pitch: 0.0,
        }
    }

    /// Create a camera at a specific position looking at a target
    pub fn look_at(position: Vec3, target: Vec3, up: Vec3) -> Self {
        let direction = (target - position).normalize();
        let mut camera = Self::new();
        camera.position = position;
        camera.direction = direction;
        camera.up = up;

        // Calculate yaw and pitch from direction
        camera.yaw = direction.z.atan2(direction.x);
        camera.pitch = direction.y.asin();

        camera
    }

    /// Get the view matrix
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.position + self.direction, self.up)
    }

    /// Get the projection matrix
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov, self.aspect, self.near, self.far)
    }

    /// Get combined view-projection matrix
    pub fn view_projection_matrix(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    /// Update aspect ratio
    pub fn set_aspect(&mut self, width: u32, height: u32) {
        self.aspect = width as f32 / height.max(1) as f32;
    }

    /// Yaw angle in radians (rotation around Y axis)
    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    /// Pitch angle in radians
    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    /// Rotate camera using mouse delta
    pub fn rotate(&mut self, delta_x: f32, delta_y: f32, sensitivity: f32) {
        self.yaw += delta_x * sensitivity;
        self.pitch -= delta_y * sensitivity;

        // Clamp pitch to avoid gimbal lock
        let max_pitch = 89.0_f32.to_radians();
        self.pitch = self.pitch.clamp(-max_pitch, max_pitch);

        // Update direction from yaw and pitch
        self.direction = Vec3::new(
            self.yaw.cos() * self.pitch.cos(),
            self.pitch.sin(),
            self.yaw.sin() * self.pitch.cos(),
        )
        .normalize();
    }

    /// Get the right vector
    pub fn right(&self) -> Vec3 {
        self.direction.cross(self.up).normalize()
    }

    /// Get the forward vector (same as direction)
    pub fn forward(&self) -> Vec3 {
        self.direction
    }

    /// Project a world-space point to window pixels.
    ///
    /// Returns `None` when the point lies behind the near plane.
    pub fn world_to_screen(&self, point: Vec3, viewport: Vec2) -> Option<Vec2> {
        let clip = self.view_projection_matrix() * point.extend(1.0);
        if clip.w <= 0.0 {
            return None;
        }
        let ndc = clip.xyz() / clip.w;
        Some(Vec2::new(
            (ndc.x + 1.0) * 0.5 * viewport.x,
            (1.0 - ndc.y) * 0.5 * viewport.y,
        ))
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pitch_clamped_to_89_degrees() {
        let mut camera = Camera::new();

        // Drag far past vertical
        camera.rotate(0.0, -10_000.0, 0.002);
        assert!(camera.pitch() <= 89.0_f32.to_radians() + 1e-6);

        camera.rotate(0.0, 10_000.0, 0.002);
        assert!(camera.pitch() >= -89.0_f32.to_radians() - 1e-6);
    }

    #[test]
    fn test_look_at_recovers_yaw() {
        let camera = Camera::look_at(Vec3::new(0.0, 1.7, 5.0), Vec3::new(0.0, 1.7, 0.0), Vec3::Y);

        // Facing -Z means yaw of -90 degrees
        assert!((camera.yaw() - (-90.0_f32.to_radians())).abs() < 1e-5);
        assert!(camera.pitch().abs() < 1e-5);
    }

    #[test]
    fn test_world_to_screen_centers_look_target() {
        let camera = Camera::look_at(Vec3::new(0.0, 0.0, 5.0), Vec3::ZERO, Vec3::Y);
        let viewport = Vec2::new(800.0, 600.0);

        let screen = camera
            .world_to_screen(Vec3::ZERO, viewport)
            .expect("target in front of camera");
        assert!((screen.x - 400.0).abs() < 0.5);
        assert!((screen.y - 300.0).abs() < 0.5);
    }

    #[test]
    fn test_world_to_screen_rejects_points_behind() {
        let camera = Camera::look_at(Vec3::new(0.0, 0.0, 5.0), Vec3::ZERO, Vec3::Y);
        let behind = Vec3::new(0.0, 0.0, 10.0);

        assert!(camera.world_to_screen(behind, Vec2::new(800.0, 600.0)).is_none());
    }
}
