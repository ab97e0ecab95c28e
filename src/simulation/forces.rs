//! Gravity sources for the rigid-body sandbox
//!
//! A `GravityField` turns a body position into the acceleration that is fed
//! to the integrator as its `gravity` argument. Directional gravity is the
//! same everywhere; point gravity pulls every body towards one location

use serde::Deserialize;

use super::vector::{Vector2, VectorExt};

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GravityField {
    /// Constant acceleration, e.g. `(0, -9.81)`
    Directional(Vector2),

    /// Acceleration of fixed magnitude `strength` towards `point`
    TowardsPoint { point: Vector2, strength: f64 },
}

impl GravityField {
    pub fn none() -> Self {
        GravityField::Directional(Vector2::zeros())
    }

    /// Acceleration felt by a body centered at `position`
    pub fn acceleration_at(&self, position: &Vector2) -> Vector2 {
        match *self {
            GravityField::Directional(g) => g,
            GravityField::TowardsPoint { point, strength } => {
                // zero at the point itself thanks to normalized_or_zero
                (point - *position).normalized_or_zero() * strength
            }
        }
    }
}

impl Default for GravityField {
    fn default() -> Self {
        GravityField::Directional(Vector2::new(0.0, -9.81))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn directional_is_position_independent() {
        let g = GravityField::default();
        assert_eq!(g.acceleration_at(&Vector2::new(1.0, 2.0)), Vector2::new(0.0, -9.81));
        assert_eq!(g.acceleration_at(&Vector2::new(-50.0, 9.0)), Vector2::new(0.0, -9.81));
    }

    #[test]
    fn point_gravity_pulls_towards_point() {
        let g = GravityField::TowardsPoint { point: Vector2::new(10.0, 0.0), strength: 4.0 };
        let a = g.acceleration_at(&Vector2::new(0.0, 0.0));
        assert_relative_eq!(a.x, 4.0);
        assert_relative_eq!(a.y, 0.0);

        let at_point = g.acceleration_at(&Vector2::new(10.0, 0.0));
        assert_eq!(at_point, Vector2::zeros());
    }

    #[test]
    fn deserializes_from_yaml() {
        let g: GravityField = serde_yaml::from_str("directional: [0.0, -9.81]").unwrap();
        assert_eq!(g, GravityField::default());

        let p: GravityField =
            serde_yaml::from_str("towards_point: { point: [300, 200], strength: 100 }").unwrap();
        assert_eq!(p, GravityField::TowardsPoint { point: Vector2::new(300.0, 200.0), strength: 100.0 });
    }
}
