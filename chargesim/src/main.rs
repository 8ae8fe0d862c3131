use chargesim::{ScenarioConfig, Scenario};
use chargesim::{bench_coulomb, bench_tick};

use anyhow::{Context, Result};
use clap::Parser;
use log::info;

use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

#[derive(Parser, Debug)]
struct Args {
    /// Scenario file, looked up in the crate's `scenarios/` directory when not found as given
    #[arg(short, default_value = "dipole.yaml")]
    file_name: String,

    /// Override the number of ticks from the scenario
    #[arg(long)]
    steps: Option<usize>,

    /// Log every tick
    #[arg(long, short = 'v')]
    verbose: bool,

    /// Print force and tick timing tables instead of running a scenario
    #[arg(long)]
    bench: bool,
}

fn install_logging(verbose: bool) -> Result<()> {
    let level = if verbose { log::LevelFilter::Trace } else { log::LevelFilter::Info };
    simplelog::TermLogger::init(
        level,
        simplelog::ConfigBuilder::new()
            .set_target_level(log::LevelFilter::Off)
            .set_location_level(log::LevelFilter::Off)
            .build(),
        simplelog::TerminalMode::Stderr,
        simplelog::ColorChoice::Auto,
    )
    .context("failed to install logger")
}

// load here to keep main clean
fn load_scenario_from_yaml(file_name: &str) -> Result<ScenarioConfig> {
    let given = PathBuf::from(file_name);
    let config_path = if given.exists() {
        given
    } else {
        PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("scenarios").join(file_name)
    };
    let file = File::open(&config_path)
        .with_context(|| format!("failed to open scenario {}", config_path.display()))?;
    let reader = BufReader::new(file);
    let scenario_cfg = ScenarioConfig::from_reader(reader)
        .with_context(|| format!("failed to parse scenario {}", config_path.display()))?;

    Ok(scenario_cfg)
}

fn main() -> Result<()> {
    let args = Args::parse();
    install_logging(args.verbose)?;

    if args.bench {
        bench_coulomb();
        bench_tick();
        return Ok(());
    }

    let scenario_cfg = load_scenario_from_yaml(&args.file_name)?;
    let mut scenario = Scenario::build_scenario(scenario_cfg).context("invalid scenario")?;
    if let Some(steps) = args.steps {
        scenario.run.steps = steps;
    }

    let start = scenario.start().context("scenario cannot start")?;
    let e0 = start.total();

    let end = scenario.run(|step, sys, energy| {
        info!(
            "step {step:6}  t = {:.4}  KE = {:.6e}  PE = {:.6e}  total = {:.6e}",
            sys.t, energy.kinetic, energy.potential, energy.total()
        );
    });

    let drift = if e0 != 0.0 { (end.total() - e0) / e0.abs() } else { end.total() - e0 };
    info!(
        "finished {} ticks at t = {:.4}, relative energy drift {:.3e}",
        scenario.run.steps, scenario.system.t, drift
    );

    Ok(())
}
