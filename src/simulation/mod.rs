pub mod vector;
pub mod error;
pub mod states;
pub mod boundary;
pub mod params;
pub mod engine;
pub mod forces;
pub mod integrator;
pub mod quadtree;
pub mod collision;
pub mod snapshot;
pub mod factory;
pub mod scenario;
