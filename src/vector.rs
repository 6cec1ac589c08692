use cgmath::{InnerSpace, Vector2, Zero};

/// Helpers on top of `cgmath::Vector2<f64>` that never produce NaN.
pub trait VectorExt: Sized {
    /// Rescales to `target` length keeping the direction. A zero (or
    /// non-finite) vector has no direction, so the zero vector comes back.
    fn set_magnitude(self, target: f64) -> Self;

    fn all_finite(&self) -> bool;

    fn finite_or_zero(self) -> Self;
}

impl VectorExt for Vector2<f64> {
    fn set_magnitude(self, target: f64) -> Self {
        let magnitude = self.magnitude();
        if magnitude == 0.0 || !magnitude.is_finite() {
            return Vector2::zero();
        }
        self * (target / magnitude)
    }

    fn all_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    fn finite_or_zero(self) -> Self {
        if self.all_finite() { self } else { Vector2::zero() }
    }
}
