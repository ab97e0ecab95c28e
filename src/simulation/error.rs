//! Validation errors for building a simulation
//!
//! Every failure is local and synchronous: a constructor or a scenario
//! builder rejects bad input before the loop starts. Once a [`Scenario`]
//! exists, ticking it cannot fail.
//!
//! [`Scenario`]: crate::simulation::scenario::Scenario

use std::fmt;

use super::states::BodyId;

#[derive(Debug, Clone, PartialEq)]
pub enum SimError {
    /// Circle radius or box extent is zero, negative or not finite
    InvalidShape {
        reason: &'static str,
        value: f64,
    },
    /// Body mass is zero, negative or not finite
    InvalidMass {
        mass: f64,
    },
    /// Position or velocity component is NaN or infinite
    NonFiniteState {
        field: &'static str,
    },
    /// Tick rate is zero, negative or not finite, which would make `dt <= 0`
    InvalidTickRate {
        rate: f64,
    },
    /// Boundary bounds are not finite or not ordered (`left < right`, `bottom < top`)
    InvalidBoundary {
        reason: &'static str,
    },
    /// Two bodies handed to the same scenario share an id
    DuplicateBodyId {
        id: BodyId,
    },
    /// Random body factory ranges cannot produce a valid body
    InvalidFactory {
        reason: &'static str,
    },
}

impl fmt::Display for SimError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidShape { reason, value } => {
                write!(f, "invalid shape: {reason} (got {value})")
            }
            Self::InvalidMass { mass } => write!(f, "invalid mass {mass}, must be finite and > 0"),
            Self::NonFiniteState { field } => write!(f, "body {field} must be finite"),
            Self::InvalidTickRate { rate } => {
                write!(f, "invalid tick rate {rate}, must be finite and > 0")
            }
            Self::InvalidBoundary { reason } => write!(f, "invalid world boundary: {reason}"),
            Self::DuplicateBodyId { id } => write!(f, "duplicate body id {id}"),
            Self::InvalidFactory { reason } => write!(f, "invalid body factory: {reason}"),
        }
    }
}

impl std::error::Error for SimError {}
