pub mod simulation;
pub mod configuration;
pub mod visualization;
pub mod benchmark;

pub use simulation::vector::{Vector2, VectorExt};
pub use simulation::error::SimError;
pub use simulation::states::{Body, BodyId, IdAllocator, Shape, System};
pub use simulation::boundary::WorldBoundary;
pub use simulation::params::Parameters;
pub use simulation::engine::{BroadPhase, CollisionHandler, Engine, PairEvaluation};
pub use simulation::forces::GravityField;
pub use simulation::integrator::{integrate, integrate_system};
pub use simulation::collision::{handle_pair, resolve_boundary, resolve_pair, resolve_pairs, separate_pair};
pub use simulation::quadtree::QuadTree;
pub use simulation::snapshot::{BodyRecord, ChannelSink, LatestSnapshot, Snapshot, SnapshotSink};
pub use simulation::factory::BodyFactory;
pub use simulation::scenario::{Scenario, TickTimes};

pub use configuration::config::{BodyConfig, EngineConfig, ParametersConfig, ScenarioConfig};

pub use visualization::{driver::run_headless, rbsim_vis2d::run_2d};

pub use benchmark::benchmark::bench_tick;
