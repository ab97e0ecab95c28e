//! Core state types for the rigid-body sandbox.
//!
//! Defines the body entity and the system that owns all bodies:
//! - `BodyId` / `IdAllocator` stable identities, handed out explicitly
//! - `Shape` circle or axis-aligned box
//! - `Body` position, velocity, per-tick acceleration accumulator, shape, mass
//! - `System` the owned body collection plus elapsed time and tick count

use std::fmt;

use serde::Deserialize;

use super::error::SimError;
use super::vector::Vector2;

/// Stable body identity, assigned once and never reused
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BodyId(pub u64);

impl fmt::Display for BodyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Monotonic id source owned by whoever builds bodies
#[derive(Debug, Default)]
pub struct IdAllocator {
    next: u64,
}

impl IdAllocator {
    pub fn next_id(&mut self) -> BodyId {
        let id = BodyId(self.next);
        self.next += 1;
        id
    }

    /// Number of ids handed out so far
    pub fn allocated(&self) -> u64 {
        self.next
    }
}

/// Collision shape of a body
/// Only circle-circle contacts are resolved between bodies; boxes still
/// fall and bounce off the world boundary using their half extents
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Shape {
    Circle { radius: f64 },
    Box { width: f64, height: f64 },
}

impl Shape {
    pub fn circle(radius: f64) -> Result<Self, SimError> {
        let shape = Shape::Circle { radius };
        shape.validate()?;
        Ok(shape)
    }

    pub fn rect(width: f64, height: f64) -> Result<Self, SimError> {
        let shape = Shape::Box { width, height };
        shape.validate()?;
        Ok(shape)
    }

    pub fn validate(&self) -> Result<(), SimError> {
        match *self {
            Shape::Circle { radius } => positive_finite(radius, "circle radius must be finite and > 0"),
            Shape::Box { width, height } => {
                positive_finite(width, "box width must be finite and > 0")?;
                positive_finite(height, "box height must be finite and > 0")
            }
        }
    }

    /// Distance from the center to the shape's edge along x and along y
    pub fn half_extents(&self) -> Vector2 {
        match *self {
            Shape::Circle { radius } => Vector2::new(radius, radius),
            Shape::Box { width, height } => Vector2::new(0.5 * width, 0.5 * height),
        }
    }

    /// Radius of the smallest circle around the center that contains the shape
    pub fn bounding_radius(&self) -> f64 {
        match *self {
            Shape::Circle { radius } => radius,
            Shape::Box { width, height } => 0.5 * width.hypot(height),
        }
    }
}

fn positive_finite(value: f64, reason: &'static str) -> Result<(), SimError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(SimError::InvalidShape { reason, value })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Body {
    pub id: BodyId,
    pub position: Vector2,
    pub velocity: Vector2,
    pub acceleration: Vector2, // per-tick accumulator, zero between ticks
    pub shape: Shape,
    pub mass: f64,
}

impl Body {
    /// Build a body with unit mass
    pub fn new(id: BodyId, position: Vector2, velocity: Vector2, shape: Shape) -> Result<Self, SimError> {
        Self::with_mass(id, position, velocity, shape, 1.0)
    }

    pub fn circle(id: BodyId, position: Vector2, velocity: Vector2, radius: f64) -> Result<Self, SimError> {
        Self::new(id, position, velocity, Shape::circle(radius)?)
    }

    pub fn with_mass(
        id: BodyId,
        position: Vector2,
        velocity: Vector2,
        shape: Shape,
        mass: f64,
    ) -> Result<Self, SimError> {
        shape.validate()?;
        if !(mass.is_finite() && mass > 0.0) {
            return Err(SimError::InvalidMass { mass });
        }
        if !(position.x.is_finite() && position.y.is_finite()) {
            return Err(SimError::NonFiniteState { field: "position" });
        }
        if !(velocity.x.is_finite() && velocity.y.is_finite()) {
            return Err(SimError::NonFiniteState { field: "velocity" });
        }

        Ok(Self {
            id,
            position,
            velocity,
            acceleration: Vector2::zeros(),
            shape,
            mass,
        })
    }

    /// Circle radius, `None` for boxes
    pub fn radius(&self) -> Option<f64> {
        match self.shape {
            Shape::Circle { radius } => Some(radius),
            Shape::Box { .. } => None,
        }
    }

    pub fn kinetic_energy(&self) -> f64 {
        0.5 * self.mass * self.velocity.norm_squared()
    }

    pub fn momentum(&self) -> Vector2 {
        self.velocity * self.mass
    }
}

#[derive(Debug, Clone, Default)]
pub struct System {
    pub bodies: Vec<Body>, // exclusively owned, never removed during a run
    pub t: f64,            // elapsed simulated time
    pub ticks: u64,        // completed ticks
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn allocator_is_monotonic() {
        let mut ids = IdAllocator::default();
        assert_eq!(ids.allocated(), 0);
        let a = ids.next_id();
        let b = ids.next_id();
        let c = ids.next_id();
        assert_eq!(a, BodyId(0));
        assert!(a < b && b < c);
        assert_eq!(ids.allocated(), 3);
    }

    #[test]
    fn rejects_degenerate_radius() {
        let mut ids = IdAllocator::default();
        for r in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            let res = Body::circle(ids.next_id(), Vector2::zeros(), Vector2::zeros(), r);
            assert!(matches!(res, Err(SimError::InvalidShape { .. })), "radius {r} accepted");
        }
    }

    #[test]
    fn rejects_degenerate_box_and_mass() {
        assert!(Shape::rect(0.0, 2.0).is_err());
        assert!(Shape::rect(2.0, -2.0).is_err());

        let shape = Shape::circle(1.0).unwrap();
        let res = Body::with_mass(BodyId(0), Vector2::zeros(), Vector2::zeros(), shape, 0.0);
        assert_eq!(res, Err(SimError::InvalidMass { mass: 0.0 }));
    }

    #[test]
    fn rejects_non_finite_state() {
        let res = Body::circle(BodyId(0), Vector2::new(f64::NAN, 0.0), Vector2::zeros(), 1.0);
        assert_eq!(res, Err(SimError::NonFiniteState { field: "position" }));

        let res = Body::circle(BodyId(0), Vector2::zeros(), Vector2::new(0.0, f64::INFINITY), 1.0);
        assert_eq!(res, Err(SimError::NonFiniteState { field: "velocity" }));
    }

    #[test]
    fn new_body_starts_with_zero_acceleration_and_unit_mass() {
        let b = Body::circle(BodyId(7), Vector2::new(1.0, 2.0), Vector2::new(3.0, 4.0), 0.5).unwrap();
        assert_eq!(b.acceleration, Vector2::zeros());
        assert_eq!(b.mass, 1.0);
        assert_eq!(b.radius(), Some(0.5));
        assert_relative_eq!(b.kinetic_energy(), 12.5);
    }

    #[test]
    fn box_extents() {
        let s = Shape::rect(6.0, 8.0).unwrap();
        assert_eq!(s.half_extents(), Vector2::new(3.0, 4.0));
        assert_relative_eq!(s.bounding_radius(), 5.0);
    }
}
