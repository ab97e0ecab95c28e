use std::time::Instant;

use crate::simulation::boundary::WorldBoundary;
use crate::simulation::engine::{BroadPhase, Engine, PairEvaluation};
use crate::simulation::error::SimError;
use crate::simulation::factory::BodyFactory;
use crate::simulation::forces::GravityField;
use crate::simulation::params::Parameters;
use crate::simulation::scenario::Scenario;
use crate::simulation::states::IdAllocator;

/// Helper to build a random scenario with `n` circles
fn make_scenario(n: usize, engine: Engine) -> Result<Scenario, SimError> {
    let boundary = WorldBoundary::new(0.0, 600.0, 0.0, 400.0)?;
    let factory = BodyFactory {
        count: n,
        radius: [1.0, 4.0],
        speed: [-200.0, 200.0],
        seed: 42, // deterministic, same bodies for every mode
    };
    let bodies = factory.generate(&boundary, &mut IdAllocator::default())?;
    let parameters = Parameters::new(240.0, GravityField::default())?;

    Scenario::new(engine, parameters, boundary, bodies)
}

/// Average wall-clock milliseconds per step after one warm-up step
fn time_steps(scenario: &mut Scenario, steps: usize) -> f64 {
    scenario.step();

    let t0 = Instant::now();
    for _ in 0..steps {
        scenario.step();
    }
    t0.elapsed().as_secs_f64() * 1000.0 / steps as f64
}

/// Time ticks for growing body counts: both pair evaluation modes over all
/// pairs, and the quadtree broad phase
/// Paste output directly into a spreadsheet to graph
pub fn bench_tick() -> Result<(), SimError> {
    println!("N,unordered_ms,ordered_ms,quadtree_ms");

    let unordered = Engine::default();
    let ordered = Engine {
        pair_evaluation: PairEvaluation::Ordered,
        ..Engine::default()
    };
    let quadtree = Engine {
        broad_phase: BroadPhase::QuadTree,
        ..Engine::default()
    };

    for n in (100..=1600).step_by(100) {
        // Small n: average over more ticks to smooth noise
        let steps = if n <= 400 { 50 } else { 5 };

        let ms_unordered = time_steps(&mut make_scenario(n, unordered)?, steps);
        let ms_ordered = time_steps(&mut make_scenario(n, ordered)?, steps);
        let ms_quadtree = time_steps(&mut make_scenario(n, quadtree)?, steps);

        println!("{},{:.6},{:.6},{:.6}", n, ms_unordered, ms_ordered, ms_quadtree);
    }

    Ok(())
}
