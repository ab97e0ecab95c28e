//! Configuration types for loading sandbox scenarios from YAML.
//!
//! This module defines a thin, `serde`-deserializable representation of a
//! scenario. A scenario consists of:
//!
//! - [`EngineConfig`]     – structural engine options (pair walk, collision handler, broad phase)
//! - [`ParametersConfig`] – tick rate and gravity field
//! - [`WorldBoundary`]    – the closed rectangle bodies are confined to
//! - [`BodyConfig`]       – explicit initial state for individual bodies
//! - [`BodyFactory`]      – optional random bodies added after the explicit ones
//! - [`ScenarioConfig`]   – top-level wrapper used to load a scenario from YAML
//!
//! # YAML format
//!
//! ```yaml
//! engine:
//!   pair_evaluation: "unordered"   # or "ordered"
//!   collision_handler: "elastic"   # or "minimize_overlap"
//!   broad_phase: "all_pairs"       # or "quad_tree"
//!
//! parameters:
//!   tick_rate: 240                 # ticks per second, dt = 1 / tick_rate
//!   gravity:
//!     directional: [0.0, -9.81]    # or towards_point: { point: [300, 200], strength: 100 }
//!
//! boundary: { left: 0, right: 600, bottom: 0, top: 400 }
//!
//! bodies:
//!   - shape: { circle: { radius: 10 } }
//!     x: [300.0, 200.0]
//!     v: [0.0, 50.0]
//!   - shape: { box: { width: 40, height: 20 } }
//!     x: [100.0, 300.0]
//!     v: [20.0, 0.0]
//!     m: 2.0                       # optional, defaults to 1
//!
//! factory:                         # optional
//!   count: 50
//!   radius: [5.0, 35.0]
//!   speed: [-200.0, 200.0]
//!   seed: 42
//! ```
//!
//! Values are checked when the scenario is built, not while parsing, except
//! for the boundary which is validated on deserialization.

use serde::Deserialize;

use crate::simulation::boundary::WorldBoundary;
use crate::simulation::engine::{BroadPhase, CollisionHandler, PairEvaluation};
use crate::simulation::factory::BodyFactory;
use crate::simulation::forces::GravityField;
use crate::simulation::params::DEFAULT_TICK_RATE;
use crate::simulation::states::Shape;

/// High-level engine configuration
#[derive(Deserialize, Debug, Default)]
pub struct EngineConfig {
    #[serde(default)]
    pub pair_evaluation: PairEvaluation, // once per unordered pair, or legacy twice
    #[serde(default)]
    pub collision_handler: CollisionHandler, // elastic impulse, or positional separation
    #[serde(default)]
    pub broad_phase: BroadPhase, // all pairs, or quadtree candidates
}

/// Global numerical and physical parameters for a scenario
#[derive(Deserialize, Debug, Clone)]
pub struct ParametersConfig {
    #[serde(default = "default_tick_rate")]
    pub tick_rate: f64, // ticks per second
    #[serde(default)]
    pub gravity: GravityField, // defaults to (0, -9.81)
}

impl Default for ParametersConfig {
    fn default() -> Self {
        Self {
            tick_rate: DEFAULT_TICK_RATE,
            gravity: GravityField::default(),
        }
    }
}

fn default_tick_rate() -> f64 {
    DEFAULT_TICK_RATE
}

/// Configuration for a single body's initial state
#[derive(Deserialize, Debug, Clone)]
pub struct BodyConfig {
    pub shape: Shape, // circle radius or box width/height
    pub x: [f64; 2],  // initial position
    #[serde(default)]
    pub v: [f64; 2], // initial velocity
    #[serde(default = "default_mass")]
    pub m: f64, // mass, 1 unless given
}

fn default_mass() -> f64 {
    1.0
}

/// Top-level scenario configuration loaded from YAML.
#[derive(Deserialize, Debug)]
pub struct ScenarioConfig {
    #[serde(default)]
    pub engine: EngineConfig,
    #[serde(default)]
    pub parameters: ParametersConfig,
    #[serde(default)]
    pub boundary: WorldBoundary,
    #[serde(default)]
    pub bodies: Vec<BodyConfig>,
    #[serde(default)]
    pub factory: Option<BodyFactory>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_full_scenario() {
        let yaml = r#"
engine:
  pair_evaluation: ordered
  collision_handler: minimize_overlap
  broad_phase: quad_tree
parameters:
  tick_rate: 500
  gravity:
    towards_point: { point: [300, 200], strength: 100 }
boundary: { left: 0, right: 600, bottom: 0, top: 400 }
bodies:
  - shape: { circle: { radius: 10 } }
    x: [300.0, 399.0]
    v: [0.0, 50.0]
  - shape: { box: { width: 40, height: 20 } }
    x: [100.0, 300.0]
    m: 2.5
factory:
  count: 5
  radius: [5.0, 35.0]
  speed: [-200.0, 200.0]
  seed: 42
"#;
        let cfg: ScenarioConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(cfg.engine.pair_evaluation, PairEvaluation::Ordered);
        assert_eq!(cfg.engine.collision_handler, CollisionHandler::MinimizeOverlap);
        assert_eq!(cfg.engine.broad_phase, BroadPhase::QuadTree);
        assert_eq!(cfg.parameters.tick_rate, 500.0);
        assert_eq!(cfg.bodies.len(), 2);
        assert_eq!(cfg.bodies[0].shape, Shape::Circle { radius: 10.0 });
        assert_eq!(cfg.bodies[0].m, 1.0);
        assert_eq!(cfg.bodies[1].v, [0.0, 0.0]);
        assert_eq!(cfg.bodies[1].m, 2.5);
        assert_eq!(cfg.factory.map(|f| f.count), Some(5));
    }

    #[test]
    fn minimal_scenario_uses_defaults() {
        let cfg: ScenarioConfig = serde_yaml::from_str("bodies: []").unwrap();
        assert_eq!(cfg.engine.pair_evaluation, PairEvaluation::Unordered);
        assert_eq!(cfg.engine.collision_handler, CollisionHandler::Elastic);
        assert_eq!(cfg.engine.broad_phase, BroadPhase::AllPairs);
        assert_eq!(cfg.parameters.tick_rate, DEFAULT_TICK_RATE);
        assert_eq!(cfg.boundary, WorldBoundary::default());
        assert!(cfg.factory.is_none());
    }

    #[test]
    fn invalid_boundary_fails_to_parse() {
        let res: Result<ScenarioConfig, _> =
            serde_yaml::from_str("boundary: { left: 10, right: 0, bottom: 0, top: 400 }");
        assert!(res.is_err());
    }

    #[test]
    fn unknown_handler_fails_to_parse() {
        let res: Result<ScenarioConfig, _> = serde_yaml::from_str("engine: { collision_handler: sticky }");
        assert!(res.is_err());
    }
}
