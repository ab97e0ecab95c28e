//! 2D vector math used by the simulation core
//!
//! `Vector2` is nalgebra's `Vector2<f64>`. Arithmetic comes in both flavours:
//! operators that return a fresh value (`a + b`, `v * s`) and in-place
//! accumulators (`a += b`, `v *= s`). `VectorExt` adds the few operations
//! whose nalgebra counterparts do not have the semantics the solver needs,
//! most importantly normalization that never produces NaN

use nalgebra::Vector2 as NalgebraVector2;

pub type Vector2 = NalgebraVector2<f64>;

/// Extra vector operations with zero-safe semantics
pub trait VectorExt {
    /// Unit vector in the same direction, or the zero vector if `self` is zero
    fn normalized_or_zero(&self) -> Self;

    /// In-place version of [`VectorExt::normalized_or_zero`]
    fn normalize_or_zero_mut(&mut self);

    fn sqr_magnitude(&self) -> f64;

    fn distance(&self, other: &Self) -> f64;

    fn distance_squared(&self, other: &Self) -> f64;
}

impl VectorExt for Vector2 {
    fn normalized_or_zero(&self) -> Self {
        let len = self.norm();
        if len > 0.0 {
            *self / len
        } else {
            Vector2::zeros()
        }
    }

    fn normalize_or_zero_mut(&mut self) {
        *self = self.normalized_or_zero();
    }

    fn sqr_magnitude(&self) -> f64 {
        self.norm_squared()
    }

    fn distance(&self, other: &Self) -> f64 {
        self.distance_squared(other).sqrt()
    }

    fn distance_squared(&self, other: &Self) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx * dx + dy * dy
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn normalize_zero_vector_stays_zero() {
        let v = Vector2::zeros().normalized_or_zero();
        assert_eq!(v, Vector2::zeros());
        assert!(v.x.is_finite() && v.y.is_finite());

        let mut w = Vector2::zeros();
        w.normalize_or_zero_mut();
        assert_eq!(w, Vector2::zeros());
    }

    #[test]
    fn normalize_has_unit_length() {
        let v = Vector2::new(3.0, -4.0).normalized_or_zero();
        assert_relative_eq!(v.norm(), 1.0, epsilon = 1e-12);
        assert_relative_eq!(v.x, 0.6, epsilon = 1e-12);
        assert_relative_eq!(v.y, -0.8, epsilon = 1e-12);
    }

    #[test]
    fn in_place_and_pure_flavours_agree() {
        let a = Vector2::new(1.0, 2.0);
        let b = Vector2::new(-3.0, 0.5);

        let mut acc = a;
        acc += b;
        assert_eq!(acc, a + b);

        acc -= b;
        assert_eq!(acc, a);

        acc *= 2.5;
        assert_eq!(acc, a * 2.5);
    }

    #[test]
    fn distance_is_symmetric() {
        let a = Vector2::new(0.0, 0.0);
        let b = Vector2::new(6.0, 8.0);
        assert_relative_eq!(a.distance(&b), 10.0);
        assert_relative_eq!(b.distance(&a), 10.0);
        assert_relative_eq!(a.distance_squared(&b), 100.0);
        assert_relative_eq!(b.sqr_magnitude(), 100.0);
    }
}
