//! Build and drive fully-initialized sandbox scenarios
//!
//! `Scenario` is the step orchestrator. It exclusively owns the bodies and
//! runs one tick in a fixed phase order:
//! 1. integrate every body under the gravity field
//! 2. resolve every body against the world boundary
//! 3. resolve body pairs (once or twice per pair, see [`PairEvaluation`]),
//!    with the engine's collision handler and broad phase
//! 4. publish an owned snapshot to the renderer
//!
//! A scenario is inserted into Bevy as a `Resource` and ticked by the
//! fixed-rate driver in `visualization`; it can also be ticked directly

use std::collections::{HashSet, VecDeque};
use std::time::{Duration, Instant};

use bevy::log::info;
use bevy::prelude::Resource;

use crate::configuration::config::{BodyConfig, ScenarioConfig};
use crate::simulation::boundary::WorldBoundary;
use crate::simulation::collision::{resolve_boundary, resolve_pairs};
use crate::simulation::engine::{Engine, PairEvaluation};
use crate::simulation::error::SimError;
use crate::simulation::integrator::integrate_system;
use crate::simulation::params::Parameters;
use crate::simulation::snapshot::{BodyRecord, Snapshot, SnapshotSink};
use crate::simulation::states::{Body, IdAllocator, System};
use crate::simulation::vector::Vector2;

/// Number of recent ticks averaged by [`TickTimes`]
pub const TICK_TIME_WINDOW: usize = 50;

/// Rolling window of wall-clock tick durations
#[derive(Debug, Default, Clone)]
pub struct TickTimes {
    samples: VecDeque<Duration>,
}

impl TickTimes {
    pub fn record(&mut self, elapsed: Duration) {
        self.samples.push_back(elapsed);
        if self.samples.len() > TICK_TIME_WINDOW {
            self.samples.pop_front();
        }
    }

    /// Mean of the recorded samples, zero before the first tick
    pub fn average(&self) -> Duration {
        if self.samples.is_empty() {
            return Duration::ZERO;
        }
        let total: Duration = self.samples.iter().sum();
        total / self.samples.len() as u32
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}

/// Bevy resource holding a complete, runnable sandbox
#[derive(Resource, Debug)]
pub struct Scenario {
    pub engine: Engine,
    pub parameters: Parameters,
    pub boundary: WorldBoundary,
    pub system: System,
    pub tick_times: TickTimes,
    last_contacts: usize,
}

impl Scenario {
    /// Assemble a scenario from already-built bodies
    /// Fails if two bodies share an id, since identity is what excludes
    /// self-pairs from collision resolution
    pub fn new(
        engine: Engine,
        parameters: Parameters,
        boundary: WorldBoundary,
        bodies: Vec<Body>,
    ) -> Result<Self, SimError> {
        let mut seen = HashSet::with_capacity(bodies.len());
        for b in &bodies {
            if !seen.insert(b.id) {
                return Err(SimError::DuplicateBodyId { id: b.id });
            }
        }

        info!(
            "scenario ready: {} bodies, dt = {:.6} s, pairs = {:?}, handler = {:?}, broad phase = {:?}",
            bodies.len(),
            parameters.dt(),
            engine.pair_evaluation,
            engine.collision_handler,
            engine.broad_phase
        );

        Ok(Self {
            engine,
            parameters,
            boundary,
            system: System { bodies, t: 0.0, ticks: 0 },
            tick_times: TickTimes::default(),
            last_contacts: 0,
        })
    }

    pub fn build_scenario(cfg: ScenarioConfig) -> Result<Self, SimError> {
        let parameters = Parameters::new(cfg.parameters.tick_rate, cfg.parameters.gravity)?;
        let engine = Engine {
            pair_evaluation: cfg.engine.pair_evaluation,
            collision_handler: cfg.engine.collision_handler,
            broad_phase: cfg.engine.broad_phase,
        };
        let boundary = cfg.boundary;

        // One allocator for explicit and generated bodies keeps ids unique
        let mut ids = IdAllocator::default();
        let mut bodies: Vec<Body> = cfg
            .bodies
            .iter()
            .map(|bc: &BodyConfig| {
                Body::with_mass(
                    ids.next_id(),
                    Vector2::new(bc.x[0], bc.x[1]),
                    Vector2::new(bc.v[0], bc.v[1]),
                    bc.shape,
                    bc.m,
                )
            })
            .collect::<Result<_, _>>()?;

        if let Some(factory) = &cfg.factory {
            bodies.extend(factory.generate(&boundary, &mut ids)?);
        }

        Self::new(engine, parameters, boundary, bodies)
    }

    /// Run one full tick and hand the resulting snapshot to `sink`
    pub fn tick<S: SnapshotSink + ?Sized>(&mut self, sink: &mut S) {
        self.step();
        sink.publish(self.snapshot());
    }

    /// Run the physics phases of one tick without publishing
    pub fn step(&mut self) {
        let started = Instant::now();

        integrate_system(&mut self.system, &self.parameters);

        for b in self.system.bodies.iter_mut() {
            resolve_boundary(b, &self.boundary);
        }

        self.last_contacts = resolve_pairs(&mut self.system.bodies, &self.engine, &self.boundary);

        self.system.t += self.parameters.dt();
        self.system.ticks += 1;

        self.tick_times.record(started.elapsed());
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            tick: self.system.ticks,
            time: self.system.t,
            boundary: self.boundary,
            bodies: self.system.bodies.iter().map(BodyRecord::from).collect(),
        }
    }

    pub fn bodies(&self) -> &[Body] {
        &self.system.bodies
    }

    pub fn pair_evaluation(&self) -> PairEvaluation {
        self.engine.pair_evaluation
    }

    /// Pairs the collision handler acted on during the most recent tick
    pub fn last_contacts(&self) -> usize {
        self.last_contacts
    }

    pub fn total_kinetic_energy(&self) -> f64 {
        self.system.bodies.iter().map(Body::kinetic_energy).sum()
    }

    pub fn total_momentum(&self) -> Vector2 {
        self.system
            .bodies
            .iter()
            .fold(Vector2::zeros(), |acc, b| acc + b.momentum())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulation::forces::GravityField;
    use crate::simulation::snapshot::LatestSnapshot;
    use crate::simulation::states::BodyId;

    #[test]
    fn tick_times_window_is_bounded() {
        let mut t = TickTimes::default();
        assert_eq!(t.average(), Duration::ZERO);
        for ms in 0..(TICK_TIME_WINDOW as u64 + 10) {
            t.record(Duration::from_millis(ms));
        }
        assert_eq!(t.len(), TICK_TIME_WINDOW);
        // window holds 10..60 ms, mean 34.5 ms
        assert_eq!(t.average(), Duration::from_micros(34_500));
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let a = Body::circle(BodyId(1), Vector2::new(10.0, 10.0), Vector2::zeros(), 1.0).unwrap();
        let b = Body::circle(BodyId(1), Vector2::new(50.0, 10.0), Vector2::zeros(), 1.0).unwrap();
        let res = Scenario::new(Engine::default(), Parameters::default(), WorldBoundary::default(), vec![a, b]);
        assert!(matches!(res, Err(SimError::DuplicateBodyId { id: BodyId(1) })));
    }

    #[test]
    fn tick_advances_clock_and_publishes() {
        let params = Parameters::new(100.0, GravityField::none()).unwrap();
        let b = Body::circle(BodyId(0), Vector2::new(10.0, 10.0), Vector2::new(1.0, 0.0), 1.0).unwrap();
        let mut scenario = Scenario::new(Engine::default(), params, WorldBoundary::default(), vec![b]).unwrap();
        let mut sink = LatestSnapshot::default();

        for _ in 0..3 {
            scenario.tick(&mut sink);
        }

        assert_eq!(scenario.system.ticks, 3);
        assert!((scenario.system.t - 0.03).abs() < 1e-12);
        assert_eq!(sink.published, 3);
        let snap = sink.snapshot.unwrap();
        assert_eq!(snap.tick, 3);
        assert_eq!(snap.bodies.len(), 1);
        assert_eq!(snap.bodies[0].position, scenario.bodies()[0].position);
        assert_eq!(scenario.tick_times.len(), 3);
    }
}
