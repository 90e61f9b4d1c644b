//! kathmandu: single-ambulance routing demo.
//!
//! Dispatches one ambulance across a 10-junction road network of the
//! Kathmandu valley (or any network given as CSV tables) while a congestion
//! strategy changes segment costs underneath it.  Progress and reroutes are
//! logged; set `RUST_LOG=debug` for per-tick detail.
//!
//! ```text
//! kathmandu --source Pulchowk --destination Kapan --strategy incident --seed 7
//! ```

mod config;
mod network;
mod observer;

use std::path::PathBuf;
use std::time::Instant;

use anyhow::{bail, Context, Result};
use clap::{Parser, ValueEnum};

use amb_core::JunctionId;
use amb_sim::{RunOutcome, SimBuilder};
use amb_spatial::{load_network_csv, AStarPathFinder, DijkstraPathFinder, PathFinder, RoadNetwork};
use amb_traffic::StrategyKind;

use config::DemoConfig;
use network::{build_network, locations};
use observer::LoggingObserver;

// ── CLI ───────────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Finder {
    Dijkstra,
    Astar,
}

#[derive(Parser, Debug)]
#[command(name = "kathmandu")]
#[command(about = "Route an ambulance across a congested road network")]
struct Cli {
    /// Starting junction, by name or numeric id
    #[arg(long, default_value = "Pulchowk")]
    source: String,

    /// Destination junction, by name or numeric id
    #[arg(long, default_value = "Kapan")]
    destination: String,

    /// Ambulance speed in length units per second (overrides the config file)
    #[arg(long)]
    speed: Option<f64>,

    /// Congestion strategy: random-walk, incident, time-of-day, resample, frozen
    #[arg(long)]
    strategy: Option<String>,

    /// RNG seed (overrides the config file)
    #[arg(long)]
    seed: Option<u64>,

    /// JSON run configuration
    #[arg(long)]
    config: Option<PathBuf>,

    /// Junction table CSV (id,x,y,name); needs --segments
    #[arg(long, requires = "segments")]
    junctions: Option<PathBuf>,

    /// Segment table CSV (from,to,length,oneway); needs --junctions
    #[arg(long, requires = "junctions")]
    segments: Option<PathBuf>,

    #[arg(long, value_enum, default_value = "astar")]
    pathfinder: Finder,

    /// Log a progress line every N ticks (0 = never)
    #[arg(long, default_value = "60")]
    progress_every: u64,

    /// Print the built-in locations and exit
    #[arg(long)]
    list: bool,
}

// ── Helpers ───────────────────────────────────────────────────────────────────

/// Resolve a junction given by name (case-insensitive) or numeric id.
fn resolve(network: &RoadNetwork, arg: &str) -> Result<JunctionId> {
    if let Some(id) = network.junction_by_name(arg.trim()) {
        return Ok(id);
    }
    if let Some(id) = locations()
        .find(|name| name.eq_ignore_ascii_case(arg.trim()))
        .and_then(|name| network.junction_by_name(name))
    {
        return Ok(id);
    }
    match arg.trim().parse::<u32>() {
        Ok(raw) if network.contains(JunctionId(raw)) => Ok(JunctionId(raw)),
        _ => bail!("unknown junction {arg:?}"),
    }
}

/// Config file first, then CLI overrides; rejects an out-of-range speed
/// before anything is built.
fn load_config(cli: &Cli) -> Result<DemoConfig> {
    let mut cfg = match &cli.config {
        Some(path) => DemoConfig::load(path)?,
        None => DemoConfig::default(),
    };
    if let Some(seed) = cli.seed {
        cfg.sim.seed = seed;
    }
    if let Some(speed) = cli.speed {
        cfg.ambulance.speed = speed;
    }
    if let Some(name) = &cli.strategy {
        cfg.strategy = StrategyKind::from_name(name)?;
    }
    cfg.ambulance.validate()?;
    Ok(cfg)
}

fn load_network(cli: &Cli) -> Result<RoadNetwork> {
    match (&cli.junctions, &cli.segments) {
        (Some(j), Some(s)) => load_network_csv(j, s)
            .with_context(|| format!("loading {} and {}", j.display(), s.display())),
        _ => Ok(build_network()?),
    }
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    if cli.list {
        for name in locations() {
            println!("{name}");
        }
        return Ok(());
    }

    // 1. Configuration.
    let cfg = load_config(&cli)?;

    // 2. Network and endpoints.
    let network = load_network(&cli)?;
    let source = resolve(&network, &cli.source)?;
    let destination = resolve(&network, &cli.destination)?;
    if source == destination {
        bail!("source and destination are both {}", network.label(source));
    }
    println!(
        "Road network: {} junctions, {} segments",
        network.junction_count(),
        network.segment_count()
    );
    println!(
        "Route: {} -> {}  |  speed {}  |  seed {}",
        network.label(source),
        network.label(destination),
        cfg.ambulance.speed,
        cfg.sim.seed
    );

    // 3. Build the sim.
    let finder: Box<dyn PathFinder> = match cli.pathfinder {
        Finder::Dijkstra => Box::new(DijkstraPathFinder),
        Finder::Astar => Box::new(AStarPathFinder),
    };
    let mut sim = SimBuilder::new(cfg.sim.clone(), network, finder)
        .route(source, destination)
        .ambulance(cfg.ambulance.clone())
        .strategy_kind(cfg.strategy.clone())
        .bounds(cfg.bounds)
        .build()?;
    println!("Congestion: {}  |  finder: {:?}", sim.strategy.name(), cli.pathfinder);
    println!();

    // 4. Run.
    let mut obs = LoggingObserver::new(cli.progress_every);
    let t0 = Instant::now();
    let outcome = sim.run(&mut obs)?;
    let elapsed = t0.elapsed();

    // 5. Summary.
    let (h, m, s) = sim.clock.elapsed_hms();
    println!();
    println!("Simulation complete in {:.3} s", elapsed.as_secs_f64());
    println!("  simulated time    : {h:02}:{m:02}:{s:02} ({} ticks)", obs.last_tick.0);
    println!("  reroutes          : {}", obs.reroutes);
    println!("  junctions reached : {}", obs.junctions_reached);
    println!("  worst congestion  : x{:.2}", obs.peak_congestion);

    match outcome {
        RunOutcome::Arrived { path_taken, .. } => {
            let names: Vec<String> = path_taken.iter().map(|&j| sim.network.label(j)).collect();
            println!("  path taken        : {}", names.join(" -> "));
        }
        RunOutcome::Failed(err) => bail!("ambulance could not reach its destination: {err}"),
        RunOutcome::TickLimitReached { tick } => {
            println!("  stopped at the tick limit ({tick}) before arriving");
        }
        RunOutcome::Stopped { tick } => println!("  stopped at {tick}"),
    }

    Ok(())
}
