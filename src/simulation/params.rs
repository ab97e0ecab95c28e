//! Numerical and physical parameters for the simulation
//!
//! `Parameters` holds runtime settings:
//! - tick rate and the fixed step size derived from it
//! - the gravity field applied to every body each tick

use std::time::Duration;

use super::error::SimError;
use super::forces::GravityField;

pub const DEFAULT_TICK_RATE: f64 = 240.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Parameters {
    tick_rate: f64,            // ticks per second
    dt: f64,                   // fixed step size, 1 / tick_rate
    period: Duration,          // dt as wall-clock time, for the drivers
    pub gravity: GravityField, // acceleration source
}

impl Parameters {
    /// Fails unless `tick_rate` is finite and > 0 and the derived step is
    /// usable both as a finite `dt > 0` and as a non-zero `Duration`
    pub fn new(tick_rate: f64, gravity: GravityField) -> Result<Self, SimError> {
        let invalid = SimError::InvalidTickRate { rate: tick_rate };
        if !(tick_rate.is_finite() && tick_rate > 0.0) {
            return Err(invalid);
        }

        // subnormal rates overflow to inf, tiny ones exceed Duration::MAX
        let dt = 1.0 / tick_rate;
        if !(dt.is_finite() && dt > 0.0) {
            return Err(invalid);
        }
        let period = match Duration::try_from_secs_f64(dt) {
            Ok(p) if p > Duration::ZERO => p,
            _ => return Err(invalid),
        };

        Ok(Self {
            tick_rate,
            dt,
            period,
            gravity,
        })
    }

    pub fn tick_rate(&self) -> f64 {
        self.tick_rate
    }

    pub fn dt(&self) -> f64 {
        self.dt
    }

    /// Fixed step as wall-clock time, never zero
    pub fn period(&self) -> Duration {
        self.period
    }
}

impl Default for Parameters {
    fn default() -> Self {
        Self {
            tick_rate: DEFAULT_TICK_RATE,
            dt: 1.0 / DEFAULT_TICK_RATE,
            period: Duration::from_secs_f64(1.0 / DEFAULT_TICK_RATE),
            gravity: GravityField::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn dt_is_inverse_tick_rate() {
        let p = Parameters::new(500.0, GravityField::none()).unwrap();
        assert_relative_eq!(p.dt(), 0.002);
        assert_relative_eq!(Parameters::default().dt(), 1.0 / 240.0);
    }

    #[test]
    fn rejects_non_positive_tick_rate() {
        for rate in [0.0, -60.0, f64::NAN, f64::INFINITY] {
            assert!(Parameters::new(rate, GravityField::none()).is_err(), "rate {rate} accepted");
        }
    }

    #[test]
    fn rejects_rates_whose_step_is_unusable() {
        // 5e-324: dt overflows to inf
        // 1e-20: dt is finite but longer than Duration::MAX
        // 1e12: period rounds down to zero nanoseconds
        for rate in [5e-324, f64::MIN_POSITIVE, 1e-20, 1e12] {
            assert!(
                matches!(
                    Parameters::new(rate, GravityField::none()),
                    Err(SimError::InvalidTickRate { .. })
                ),
                "rate {rate} accepted"
            );
        }
    }

    #[test]
    fn period_matches_dt() {
        let p = Parameters::new(100.0, GravityField::none()).unwrap();
        assert_eq!(p.period(), Duration::from_millis(10));
        let default_rate = Parameters::new(DEFAULT_TICK_RATE, GravityField::default()).unwrap();
        assert_eq!(Parameters::default(), default_rate);

        // slow but representable rates are still accepted
        let slow = Parameters::new(1e-3, GravityField::none()).unwrap();
        assert_eq!(slow.period(), Duration::from_secs(1000));
    }
}
