//! Fixed-step time integration for the rigid-body sandbox
//!
//! Semi-implicit (symplectic) Euler: velocity is updated from the
//! accumulated acceleration first, then position is advanced with the new
//! velocity. Acceleration is a per-tick accumulator and is cleared after use

use super::params::Parameters;
use super::states::{Body, System};
use super::vector::Vector2;

/// Advance one body by `dt` under `gravity`
/// Caller guarantees `dt > 0` (enforced when `Parameters` is built)
pub fn integrate(body: &mut Body, dt: f64, gravity: Vector2) {
    // Forces accumulate into the acceleration for this tick only
    body.acceleration += gravity;

    // Kick: v_n+1 = v_n + dt * a_n
    body.velocity += body.acceleration * dt;

    // Drift with the updated velocity: x_n+1 = x_n + dt * v_n+1
    body.position += body.velocity * dt;

    body.acceleration = Vector2::zeros();
}

/// Integrate every body of the system once, evaluating the gravity field at
/// each body's current position
pub fn integrate_system(sys: &mut System, params: &Parameters) {
    let dt = params.dt();
    for b in sys.bodies.iter_mut() {
        let g = params.gravity.acceleration_at(&b.position);
        integrate(b, dt, g);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulation::states::BodyId;
    use approx::assert_relative_eq;

    fn ball(v: Vector2) -> Body {
        Body::circle(BodyId(0), Vector2::new(10.0, 20.0), v, 1.0).unwrap()
    }

    #[test]
    fn velocity_is_updated_before_position() {
        let mut b = ball(Vector2::zeros());
        integrate(&mut b, 0.5, Vector2::new(0.0, -10.0));

        // semi-implicit: v = -5, x = 20 + 0.5 * -5
        assert_relative_eq!(b.velocity.y, -5.0);
        assert_relative_eq!(b.position.y, 17.5);
        assert_relative_eq!(b.position.x, 10.0);
    }

    #[test]
    fn acceleration_is_reset_after_step() {
        let mut b = ball(Vector2::zeros());
        b.acceleration = Vector2::new(3.0, 0.0);
        integrate(&mut b, 0.1, Vector2::new(0.0, -1.0));

        assert_eq!(b.acceleration, Vector2::zeros());
        assert_relative_eq!(b.velocity.x, 0.3, epsilon = 1e-12);
        assert_relative_eq!(b.velocity.y, -0.1);
    }

    #[test]
    fn rest_without_gravity_is_fixed_point() {
        let mut b = ball(Vector2::zeros());
        let before = b.clone();
        for dt in [1e-4, 0.01, 1.0, 50.0] {
            integrate(&mut b, dt, Vector2::zeros());
        }
        assert_eq!(b, before);
    }
}
