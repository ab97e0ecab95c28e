use rbsim::{ScenarioConfig, Scenario};
use rbsim::{run_2d, run_headless};
use rbsim::bench_tick;

use clap::Parser;
use anyhow::{Context, Result};

use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

#[derive(Parser, Debug)]
struct Args {
    /// Scenario file name under `scenarios/`
    #[arg(short, default_value = "default.yaml")]
    file_name: String,

    /// Run without a window
    #[arg(long)]
    headless: bool,

    /// Stop the headless run after this many ticks
    #[arg(long)]
    ticks: Option<u64>,

    /// Print tick timings for growing body counts and exit
    #[arg(long)]
    bench: bool,
}

// load here to keep main clean
fn load_scenario_from_yaml(file_name: &str) -> Result<ScenarioConfig> {
    let config_path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("scenarios").join(file_name);
    let file = File::open(&config_path).with_context(|| format!("opening {}", config_path.display()))?;
    let reader = BufReader::new(file);
    let scenario_cfg: ScenarioConfig = serde_yaml::from_reader(reader)
        .with_context(|| format!("parsing {}", config_path.display()))?;

    Ok(scenario_cfg)
}

fn main() -> Result<()> {
    let args = Args::parse();

    if args.bench {
        bench_tick()?;
        return Ok(());
    }

    let scenario_cfg = load_scenario_from_yaml(&args.file_name)?;
    let scenario = Scenario::build_scenario(scenario_cfg).context("invalid scenario")?;

    if args.headless {
        run_headless(scenario, args.ticks);
    } else {
        run_2d(scenario);
    }

    Ok(())
}
