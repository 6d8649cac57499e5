//! VyuhaNav - maze escape daemon
//!
//! Loads the maze map and configuration, runs the solver against the
//! simulated platform, and reports the resolved start cell.

use std::env;
use vyuha_map::MazeGrid;
use vyuha_nav::{MazeSolver, NavConfig, Result};
use yantra_io::SimulatedRobot;

/// Parse config path from command line arguments.
///
/// Supports:
/// - `vyuha-nav <path>` (positional)
/// - `vyuha-nav --config <path>` (flag-based)
/// - `vyuha-nav -c <path>` (short flag)
///
/// Defaults to `vyuha.toml` if not specified.
fn parse_config_path() -> String {
    let args: Vec<String> = env::args().collect();

    for i in 1..args.len() {
        if (args[i] == "--config" || args[i] == "-c") && i + 1 < args.len() {
            return args[i + 1].clone();
        }
    }

    if args.len() > 1 && !args[1].starts_with('-') {
        return args[1].clone();
    }

    "vyuha.toml".to_string()
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    log::info!("VyuhaNav v{} starting...", env!("CARGO_PKG_VERSION"));

    let config_path = parse_config_path();
    let config = if std::path::Path::new(&config_path).exists() {
        log::info!("Using config: {}", config_path);
        NavConfig::load(&config_path)?
    } else {
        log::info!("Config {} not found, using defaults", config_path);
        NavConfig::default()
    };

    let grid = MazeGrid::load(&config.map.path)?;
    log::info!(
        "Map: {}x{} cells ({}x{} doubled grid)",
        grid.cell_count_x(),
        grid.cell_count_y(),
        grid.width(),
        grid.height()
    );

    let robot = SimulatedRobot::new(grid.clone(), config.simulation.clone())?;

    let mut solver = MazeSolver::new(robot, grid, &config)?;
    let start = solver.solve()?;

    log::info!("Result: x = {} y = {}", start.x, start.y);
    println!("{} {}", start.x, start.y);

    Ok(())
}
