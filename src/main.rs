use bottleflip::{ScenarioConfig, SimulationWorld, RunState};
use bottleflip::bench_swarm_step;

use anyhow::{Context, Result};
use clap::Parser;

use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(about = "Flip a bottle full of charged particles")]
struct Args {
    /// Scenario file inside `scenarios/`
    #[arg(short, default_value = "bottle_flip.yaml")]
    file_name: String,

    /// Override the scenario's tick cap
    #[arg(long)]
    ticks: Option<u64>,

    /// Run without a window even when the viewer is compiled in
    #[arg(long)]
    headless: bool,

    /// Time the swarm step for growing N and exit
    #[arg(long)]
    bench: bool,
}

// load here to keep main clean
fn load_scenario_from_yaml(file_name: &str) -> Result<ScenarioConfig> {
    let config_path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("scenarios").join(file_name);
    let file = File::open(&config_path)
        .with_context(|| format!("failed to open scenario {}", config_path.display()))?;
    let reader = BufReader::new(file);
    let scenario_cfg: ScenarioConfig = serde_yaml::from_reader(reader)
        .with_context(|| format!("failed to parse scenario {}", config_path.display()))?;

    log::debug!("{:?}", scenario_cfg);

    Ok(scenario_cfg)
}

/// Flip once and step until the bottle settles or the tick cap is hit
fn run_headless(mut world: SimulationWorld, max_ticks: u64) -> Result<()> {
    world.toggle();

    let log_every = (1.0 / world.parameters.dt).round().max(1.0) as u64;
    let mut ticks = 0;
    while world.is_running() && ticks < max_ticks {
        let report = world.step();
        ticks += 1;
        if ticks % log_every == 0 {
            let p = world.bottle.position;
            log::info!("t={:.2} bottle=({:.3}, {:.3}, {:.3}) {:?}", report.elapsed, p.x, p.y, p.z, report.contact);
        }
    }

    match world.state() {
        RunState::Settled => log::info!("settled after {} ticks", ticks),
        state => log::warn!("stopped after {} ticks in state {:?}", ticks, state),
    }

    println!("{}", serde_yaml::to_string(&world.snapshot())?);
    Ok(())
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    if args.bench {
        bench_swarm_step();
        return Ok(());
    }

    let scenario_cfg = load_scenario_from_yaml(&args.file_name)?;
    let world = SimulationWorld::build_scenario(scenario_cfg)?;
    let max_ticks = args.ticks.unwrap_or(world.parameters.max_ticks);

    #[cfg(feature = "viewer")]
    {
        if !args.headless {
            bottleflip::run_3d(world);
            return Ok(());
        }
    }
    #[cfg(not(feature = "viewer"))]
    {
        if !args.headless {
            log::info!("built without the `viewer` feature, running headless");
        }
    }

    run_headless(world, max_ticks)
}
