//! Random initial conditions
//!
//! Generates circles with a random radius, a position that keeps the whole
//! circle inside the boundary, and a random velocity. Seeded so that a
//! scenario file reproduces the same run every time

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Deserialize;

use super::boundary::WorldBoundary;
use super::error::SimError;
use super::states::{Body, IdAllocator};
use super::vector::Vector2;

#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct BodyFactory {
    pub count: usize,
    pub radius: [f64; 2], // [min, max]
    pub speed: [f64; 2],  // per-component velocity range [min, max]
    #[serde(default)]
    pub seed: u64,
}

impl BodyFactory {
    pub fn validate(&self, boundary: &WorldBoundary) -> Result<(), SimError> {
        let [r_min, r_max] = self.radius;
        let [s_min, s_max] = self.speed;

        if !(r_min.is_finite() && r_max.is_finite() && r_min > 0.0) {
            return Err(SimError::InvalidFactory { reason: "radius range must be finite and > 0" });
        }
        if r_min > r_max {
            return Err(SimError::InvalidFactory { reason: "radius min must be <= max" });
        }
        if 2.0 * r_max >= boundary.width().min(boundary.height()) {
            return Err(SimError::InvalidFactory { reason: "largest radius does not fit inside the boundary" });
        }
        if !(s_min.is_finite() && s_max.is_finite()) || s_min > s_max {
            return Err(SimError::InvalidFactory { reason: "speed range must be finite with min <= max" });
        }
        Ok(())
    }

    /// Build `count` bodies, drawing ids from `ids`
    pub fn generate(&self, boundary: &WorldBoundary, ids: &mut IdAllocator) -> Result<Vec<Body>, SimError> {
        self.validate(boundary)?;

        let mut rng = StdRng::seed_from_u64(self.seed);
        let mut bodies = Vec::with_capacity(self.count);

        for _ in 0..self.count {
            let radius = sample(&mut rng, self.radius[0], self.radius[1]);
            let position = Vector2::new(
                sample(&mut rng, boundary.left() + radius, boundary.right() - radius),
                sample(&mut rng, boundary.bottom() + radius, boundary.top() - radius),
            );
            let velocity = Vector2::new(
                sample(&mut rng, self.speed[0], self.speed[1]),
                sample(&mut rng, self.speed[0], self.speed[1]),
            );
            bodies.push(Body::circle(ids.next_id(), position, velocity, radius)?);
        }

        Ok(bodies)
    }
}

// gen_range panics on an empty range
fn sample(rng: &mut StdRng, min: f64, max: f64) -> f64 {
    if min < max {
        rng.gen_range(min..max)
    } else {
        min
    }
}
