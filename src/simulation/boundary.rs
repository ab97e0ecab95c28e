//! Closed rectangular domain that confines every body

use serde::Deserialize;

use super::error::SimError;
use super::vector::Vector2;

/// Axis-aligned world rectangle, immutable for the lifetime of a run
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(try_from = "BoundaryConfig")]
pub struct WorldBoundary {
    left: f64,
    right: f64,
    bottom: f64,
    top: f64,
}

/// Raw YAML form, validated into [`WorldBoundary`]
#[derive(Deserialize)]
struct BoundaryConfig {
    left: f64,
    right: f64,
    bottom: f64,
    top: f64,
}

impl TryFrom<BoundaryConfig> for WorldBoundary {
    type Error = SimError;

    fn try_from(c: BoundaryConfig) -> Result<Self, Self::Error> {
        WorldBoundary::new(c.left, c.right, c.bottom, c.top)
    }
}

impl WorldBoundary {
    pub fn new(left: f64, right: f64, bottom: f64, top: f64) -> Result<Self, SimError> {
        if ![left, right, bottom, top].iter().all(|v| v.is_finite()) {
            return Err(SimError::InvalidBoundary { reason: "bounds must be finite" });
        }
        if left >= right {
            return Err(SimError::InvalidBoundary { reason: "left must be < right" });
        }
        if bottom >= top {
            return Err(SimError::InvalidBoundary { reason: "bottom must be < top" });
        }
        Ok(Self { left, right, bottom, top })
    }

    pub fn left(&self) -> f64 {
        self.left
    }

    pub fn right(&self) -> f64 {
        self.right
    }

    pub fn bottom(&self) -> f64 {
        self.bottom
    }

    pub fn top(&self) -> f64 {
        self.top
    }

    pub fn width(&self) -> f64 {
        self.right - self.left
    }

    pub fn height(&self) -> f64 {
        self.top - self.bottom
    }

    pub fn center(&self) -> Vector2 {
        Vector2::new(0.5 * (self.left + self.right), 0.5 * (self.bottom + self.top))
    }

    /// True when a shape with `half_extents` centered at `position` touches no edge
    pub fn contains_extent(&self, position: &Vector2, half_extents: &Vector2) -> bool {
        position.x - half_extents.x >= self.left
            && position.x + half_extents.x <= self.right
            && position.y - half_extents.y >= self.bottom
            && position.y + half_extents.y <= self.top
    }
}

impl Default for WorldBoundary {
    fn default() -> Self {
        Self {
            left: 0.0,
            right: 600.0,
            bottom: 0.0,
            top: 400.0,
        }
    }
}
