use nalgebra::Vector3;

/// Planar helpers. `z` holds height and is ignored by every horizontal operation.
pub trait VectorExtensions {
    fn horizontal(&self) -> Vector3<f32>;
    fn horizontal_norm(&self) -> f32;
    fn horizontal_distance(&self, other: &Vector3<f32>) -> f32;
    fn direction_to(&self, other: &Vector3<f32>) -> Vector3<f32>;
    fn normalize_or_zero(&self) -> Vector3<f32>;
    fn clamp_horizontal(&self, max: f32) -> Vector3<f32>;
    fn angle_to(&self, other: &Vector3<f32>) -> f32;
    fn rotate_horizontal(&self, angle: f32) -> Vector3<f32>;
    fn is_finite_vector(&self) -> bool;
}

impl VectorExtensions for Vector3<f32> {
    fn horizontal(&self) -> Vector3<f32> {
        Vector3::new(self.x, self.y, 0.0)
    }

    fn horizontal_norm(&self) -> f32 {
        (self.x * self.x + self.y * self.y).sqrt()
    }

    fn horizontal_distance(&self, other: &Vector3<f32>) -> f32 {
        (other - self).horizontal_norm()
    }

    fn direction_to(&self, other: &Vector3<f32>) -> Vector3<f32> {
        (other - self).horizontal().normalize_or_zero()
    }

    fn normalize_or_zero(&self) -> Vector3<f32> {
        let norm = self.norm();
        if norm > f32::EPSILON && norm.is_finite() {
            self / norm
        } else {
            Vector3::zeros()
        }
    }

    fn clamp_horizontal(&self, max: f32) -> Vector3<f32> {
        let speed = self.horizontal_norm();
        if speed > max && speed > 0.0 {
            let scale = max / speed;
            Vector3::new(self.x * scale, self.y * scale, self.z)
        } else {
            *self
        }
    }

    /// Unsigned planar angle in radians, zero when either vector is degenerate.
    fn angle_to(&self, other: &Vector3<f32>) -> f32 {
        let a = self.horizontal().normalize_or_zero();
        let b = other.horizontal().normalize_or_zero();
        if a == Vector3::zeros() || b == Vector3::zeros() {
            return 0.0;
        }

        a.dot(&b).clamp(-1.0, 1.0).acos()
    }

    fn rotate_horizontal(&self, angle: f32) -> Vector3<f32> {
        let (sin, cos) = angle.sin_cos();
        Vector3::new(
            self.x * cos - self.y * sin,
            self.x * sin + self.y * cos,
            self.z,
        )
    }

    fn is_finite_vector(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }
}
