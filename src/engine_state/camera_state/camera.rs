//! # Camera Implementation
//!
//! First-person camera positioned at the player's eye. Holds yaw and pitch,
//! turns mouse deltas into rotation, and provides the forward/right vectors
//! movement and ray picking are built on.

use cgmath::*;

/// Represents a first-person camera in 3D space.
///
/// Yaw 0 looks along +X; positive yaw turns toward +Z. Pitch is clamped so
/// the view never flips over the vertical.
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    /// The camera's position in world space (the player's eye point)
    pub position: Point3<f32>,
    /// Horizontal rotation (around Y axis)
    pub yaw: Rad<f32>,
    /// Vertical rotation (around the camera's right axis)
    pub pitch: Rad<f32>,
}

impl Camera {
    /// Creates a new camera with the specified position and orientation.
    ///
    /// # Example
    /// ```rust
    /// use cgmath::{Deg, Point3};
    /// use voxel_sandbox::Camera;
    ///
    /// let camera = Camera::new(Point3::new(0.0, 1.62, 0.0), Deg(0.0), Deg(0.0));
    /// assert!((camera.forward().x - 1.0).abs() < 1e-6);
    /// ```
    pub fn new<V: Into<Point3<f32>>, Y: Into<Rad<f32>>, P: Into<Rad<f32>>>(
        position: V,
        yaw: Y,
        pitch: P,
    ) -> Self {
        Self {
            position: position.into(),
            yaw: yaw.into(),
            pitch: pitch.into(),
        }
    }

    /// Gets the camera's normalized view direction.
    pub fn forward(&self) -> Vector3<f32> {
        let (yaw_sin, yaw_cos) = self.yaw.0.sin_cos();
        let (pitch_sin, pitch_cos) = self.pitch.0.sin_cos();
        Vector3::new(pitch_cos * yaw_cos, pitch_sin, pitch_cos * yaw_sin).normalize()
    }

    /// Gets the camera's normalized right vector. Always horizontal.
    pub fn right(&self) -> Vector3<f32> {
        let (yaw_sin, yaw_cos) = self.yaw.0.sin_cos();
        Vector3::new(-yaw_sin, 0.0, yaw_cos)
    }

    /// Applies a mouse delta to yaw and pitch.
    ///
    /// # Arguments
    /// * `delta` - Mouse movement (x, y) since the last tick; positive y moves the view down
    /// * `sensitivity` - Degrees per unit of delta per second
    /// * `dt` - Elapsed tick time in seconds
    /// * `pitch_limit` - Maximum absolute pitch
    pub fn rotate(&mut self, delta: (f64, f64), sensitivity: f32, dt: f32, pitch_limit: Deg<f32>) {
        let (delta_x, delta_y) = delta;
        self.yaw += Rad::from(Deg(delta_x as f32 * sensitivity * dt));
        self.yaw = self.yaw.normalize();
        self.pitch -= Rad::from(Deg(delta_y as f32 * sensitivity * dt));

        let limit = Rad::from(pitch_limit);
        if self.pitch < -limit {
            self.pitch = -limit;
        } else if self.pitch > limit {
            self.pitch = limit;
        }
    }

    /// Calculates the view matrix for this camera.
    pub fn calc_matrix(&self) -> Matrix4<f32> {
        Matrix4::look_to_rh(self.position, self.forward(), Vector3::unit_y())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: Vector3<f32>, b: Vector3<f32>) -> bool {
        (a - b).magnitude() < 1e-5
    }

    #[test]
    fn basis_vectors_at_zero_yaw() {
        let camera = Camera::new(Point3::new(0.0, 0.0, 0.0), Deg(0.0), Deg(0.0));
        assert!(close(camera.forward(), Vector3::unit_x()));
        assert!(close(camera.right(), Vector3::unit_z()));
    }

    #[test]
    fn right_is_perpendicular_to_forward() {
        let camera = Camera::new(Point3::new(0.0, 0.0, 0.0), Deg(37.0), Deg(-20.0));
        assert!(camera.forward().dot(camera.right()).abs() < 1e-5);
        assert_eq!(camera.right().y, 0.0);
    }

    #[test]
    fn pitch_is_clamped() {
        let mut camera = Camera::new(Point3::new(0.0, 0.0, 0.0), Deg(0.0), Deg(0.0));
        camera.rotate((0.0, -100_000.0), 0.2, 1.0, Deg(85.0));
        assert!((Deg::from(camera.pitch).0 - 85.0).abs() < 1e-3);
        camera.rotate((0.0, 100_000.0), 0.2, 1.0, Deg(85.0));
        assert!((Deg::from(camera.pitch).0 + 85.0).abs() < 1e-3);
    }

    #[test]
    fn horizontal_delta_turns_yaw() {
        let mut camera = Camera::new(Point3::new(0.0, 0.0, 0.0), Deg(0.0), Deg(0.0));
        // 0.2 deg per unit per second * 450 units * 1 s = 90 degrees.
        camera.rotate((450.0, 0.0), 0.2, 1.0, Deg(85.0));
        assert!(close(camera.forward(), Vector3::unit_z()));
    }

    #[test]
    fn view_matrix_looks_down_negative_z() {
        let camera = Camera::new(Point3::new(3.0, 2.0, -1.0), Deg(0.0), Deg(0.0));
        let view = camera.calc_matrix();

        let eye = view.transform_point(camera.position);
        assert!(close(eye.to_vec(), Vector3::zero()));

        let ahead = view.transform_point(camera.position + camera.forward());
        assert!(close(ahead.to_vec(), -Vector3::unit_z()));
    }
}
