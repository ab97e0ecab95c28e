//! Fixed-rate tick driver shared by the windowed viewer and the headless runner
//!
//! A repeating bevy `Timer` with period `dt` is advanced by the frame delta.
//! When at least one period has elapsed the scenario ticks exactly once;
//! any further periods that elapsed during a slow frame are dropped rather
//! than replayed, so a slow renderer delays the simulation instead of
//! building a backlog. There is no drift compensation

use std::time::Duration;

use bevy::app::{AppExit, ScheduleRunnerPlugin};
use bevy::log::{info, LogPlugin};
use bevy::prelude::*;

use crate::simulation::scenario::Scenario;
use crate::simulation::snapshot::LatestSnapshot;

#[derive(Resource)]
pub struct TickDriver {
    timer: Timer,
    skipped: u64,
}

impl TickDriver {
    /// `period` comes from `Parameters::period`, which is validated non-zero
    pub fn new(period: Duration) -> Self {
        Self {
            timer: Timer::new(period, TimerMode::Repeating),
            skipped: 0,
        }
    }

    /// Advance by `delta` and report whether a tick is due
    pub fn advance(&mut self, delta: Duration) -> bool {
        self.timer.tick(delta);
        let due = self.timer.times_finished_this_tick();
        if due > 1 {
            self.skipped += u64::from(due - 1);
        }
        due > 0
    }

    /// Periods that elapsed without a tick being run
    pub fn skipped(&self) -> u64 {
        self.skipped
    }
}

/// Stop the headless runner after this many ticks; `None` runs forever
#[derive(Resource, Debug, Clone, Copy)]
pub struct TickLimit(pub Option<u64>);

pub fn fixed_tick_system(
    time: Res<Time>,
    mut driver: ResMut<TickDriver>,
    mut scenario: ResMut<Scenario>,
    mut latest: ResMut<LatestSnapshot>,
) {
    if driver.advance(time.delta()) {
        scenario.tick(&mut *latest);
    }
}

/// Log a one-line summary once per simulated second
pub fn tick_stats_system(scenario: Res<Scenario>, driver: Res<TickDriver>) {
    if !scenario.is_changed() {
        return;
    }
    let per_second = (scenario.parameters.tick_rate().round() as u64).max(1);
    let ticks = scenario.system.ticks;
    if ticks == 0 || ticks % per_second != 0 {
        return;
    }
    info!(
        "tick {ticks} t = {:.2} s, {} bodies, {} contacts, KE = {:.3}, avg tick {:?}, skipped {}",
        scenario.system.t,
        scenario.bodies().len(),
        scenario.last_contacts(),
        scenario.total_kinetic_energy(),
        scenario.tick_times.average(),
        driver.skipped()
    );
}

fn tick_limit_system(scenario: Res<Scenario>, limit: Res<TickLimit>, mut exit: EventWriter<AppExit>) {
    if let TickLimit(Some(max)) = *limit {
        if scenario.system.ticks >= max {
            info!("reached {max} ticks, stopping");
            exit.send(AppExit::Success);
        }
    }
}

/// Run the scenario without a window, paced at its tick rate
pub fn run_headless(scenario: Scenario, limit: Option<u64>) {
    println!("run_headless: {} bodies, limit {:?}", scenario.bodies().len(), limit);

    let period = scenario.parameters.period();
    let driver = TickDriver::new(period);

    App::new()
        .add_plugins(MinimalPlugins.set(ScheduleRunnerPlugin::run_loop(period)))
        .add_plugins(LogPlugin::default())
        .insert_resource(scenario)
        .insert_resource(driver)
        .insert_resource(LatestSnapshot::default())
        .insert_resource(TickLimit(limit))
        .add_systems(Update, (fixed_tick_system, tick_stats_system, tick_limit_system).chain())
        .run();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulation::forces::GravityField;
    use crate::simulation::params::Parameters;

    fn driver_at(rate: f64) -> TickDriver {
        TickDriver::new(Parameters::new(rate, GravityField::none()).unwrap().period())
    }

    #[test]
    fn ticks_once_per_period() {
        let mut d = driver_at(100.0);
        assert!(!d.advance(Duration::from_millis(4)));
        assert!(d.advance(Duration::from_millis(6)));
        assert!(!d.advance(Duration::from_millis(5)));
        assert_eq!(d.skipped(), 0);
    }

    #[test]
    fn slow_frame_drops_extra_periods() {
        let mut d = driver_at(100.0);
        // 3.5 periods in one frame: one tick runs, two are dropped
        assert!(d.advance(Duration::from_millis(35)));
        assert_eq!(d.skipped(), 2);
        // the leftover half period carries over
        assert!(d.advance(Duration::from_millis(5)));
    }

    #[test]
    fn slow_rate_builds_a_driver() {
        // a rate this low used to overflow the timer period
        let mut d = driver_at(1e-3);
        assert!(!d.advance(Duration::from_secs(999)));
        assert!(d.advance(Duration::from_secs(1)));
    }
}
