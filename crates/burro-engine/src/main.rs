//! Headless runner for the Burro simulation.
//!
//! Stands in for a graphical front end: it loads configuration and a
//! constellation document, applies blocked pairs, builds the donkey, runs
//! the configured planners, prints a report for each, and optionally
//! replays each plan tick by tick.
//!
//! # Startup Sequence
//!
//! 1. Load configuration from `BURRO_CONFIG` (default `burro-config.yaml`)
//! 2. Initialize structured logging (tracing)
//! 3. Load the constellation document (first argument or `BURRO_DATA`)
//! 4. Apply blocked star pairs
//! 5. Build the donkey and pick the start star
//! 6. Plan, report, and optionally replay each configured algorithm

mod error;
mod session;

use std::path::{Path, PathBuf};

use burro_core::{RoutePlanner, RouteReplay, SimulationConfig, render_report};
use burro_world::StarMap;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::error::EngineError;

/// Default configuration file name.
const DEFAULT_CONFIG_PATH: &str = "burro-config.yaml";

/// Application entry point.
///
/// # Errors
///
/// Returns an error if any startup step or planning fails.
fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. Load configuration.
    let (config, config_found) = load_config()?;

    // 2. Initialize structured logging.
    init_tracing(&config);
    info!(config_found, "burro-engine starting");

    // 3. Load the constellation document.
    let data_path = data_path()?;
    let mut map = StarMap::new();
    map.load_path(&data_path).map_err(EngineError::from)?;
    info!(
        path = %data_path.display(),
        stars = map.star_count(),
        connections = map.connection_count(),
        constellations = map.constellations().len(),
        "Constellations loaded"
    );

    // 4. Apply blocked pairs.
    session::apply_blocks(&mut map, &config)?;

    // 5. Build the donkey and pick the start star.
    let donkey = session::build_donkey(&map, &config)?;
    let start = session::start_star(&map, &config)?;
    info!(
        start = %start,
        health = %donkey.health(),
        age = donkey.age(),
        energy = donkey.energy(),
        food = donkey.food(),
        life_budget = donkey.life_budget(),
        "Donkey ready"
    );

    // 6. Plan, report, replay.
    let planner = RoutePlanner::new(&map, &config.mechanics)
        .with_reachability(config.route.endurance_reachability);
    for &algorithm in config.route.algorithm.algorithms() {
        let plan = planner
            .plan(algorithm, start.as_str(), &donkey)
            .map_err(EngineError::from)?;
        println!("{}", render_report(&plan, &map));

        if config.replay.enabled {
            let mut replay = RouteReplay::new(
                &map,
                &config.mechanics,
                donkey.clone(),
                &plan,
                config.replay.speed_px_per_tick,
            );
            let events = replay.run_to_end().map_err(EngineError::from)?;
            if replay.donkey() == &plan.donkey {
                info!(%algorithm, events = events.len(), "Replay matches plan");
            } else {
                warn!(%algorithm, "Replay diverged from plan");
            }
        }
    }

    info!("burro-engine finished");
    Ok(())
}

/// Load configuration from `BURRO_CONFIG` or the default path.
///
/// A missing file is not an error: defaults are used and the second
/// value is `false`.
fn load_config() -> Result<(SimulationConfig, bool), EngineError> {
    let path = std::env::var("BURRO_CONFIG").unwrap_or_else(|_| String::from(DEFAULT_CONFIG_PATH));
    let path = Path::new(&path);
    if path.exists() {
        Ok((SimulationConfig::from_file(path)?, true))
    } else {
        Ok((SimulationConfig::default(), false))
    }
}

/// Initialize the tracing subscriber. `RUST_LOG` wins over the configured
/// level.
fn init_tracing(config: &SimulationConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.logging.level));
    if config.logging.json {
        tracing_subscriber::fmt().json().with_env_filter(filter).init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .init();
    }
}

/// Document path from the first argument or `BURRO_DATA`.
fn data_path() -> Result<PathBuf, EngineError> {
    std::env::args()
        .nth(1)
        .or_else(|| std::env::var("BURRO_DATA").ok())
        .map(PathBuf::from)
        .ok_or(EngineError::MissingData)
}
