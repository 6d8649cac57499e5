//! Configuration loading for VyuhaNav

use crate::error::Result;
use serde::Deserialize;
use std::path::Path;
use yantra_io::SimConfig;

/// Main configuration structure
#[derive(Clone, Debug, Default, Deserialize)]
pub struct NavConfig {
    #[serde(default)]
    pub robot: RobotConfig,
    #[serde(default)]
    pub sensors: SensorConfig,
    #[serde(default)]
    pub motion: MotionConfig,
    #[serde(default)]
    pub solver: SolverConfig,
    #[serde(default)]
    pub map: MapConfig,
    #[serde(default)]
    pub simulation: SimConfig,
}

impl NavConfig {
    /// Load configuration from a TOML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: NavConfig = toml::from_str(&contents)?;
        Ok(config)
    }
}

/// Robot physical parameters
#[derive(Clone, Debug, Deserialize)]
pub struct RobotConfig {
    /// Wheel diameter in millimeters (default: 56.0)
    #[serde(default = "default_wheel_diameter")]
    pub wheel_diameter: f32,

    /// Encoder ticks per wheel revolution (default: 630.0)
    #[serde(default = "default_ticks_per_rev")]
    pub ticks_per_rev: f32,

    /// Maze cell side length in millimeters (default: 400.0)
    #[serde(default = "default_cell_side")]
    pub cell_side: f32,

    /// Base control tick period in milliseconds (default: 20)
    #[serde(default = "default_base_tick_ms")]
    pub base_tick_ms: u64,
}

impl Default for RobotConfig {
    fn default() -> Self {
        Self {
            wheel_diameter: default_wheel_diameter(),
            ticks_per_rev: default_ticks_per_rev(),
            cell_side: default_cell_side(),
            base_tick_ms: default_base_tick_ms(),
        }
    }
}

/// Corridor sensing thresholds
#[derive(Clone, Debug, Deserialize)]
pub struct SensorConfig {
    /// Design half corridor width for the side IR sensors, sensor points
    /// (default: 33.0). Calibration takes the minimum of this and the
    /// first readings.
    #[serde(default = "default_side_half_corridor")]
    pub side_half_corridor: f32,

    /// Design half corridor width for the forward sonic sensor, sensor
    /// points (default: 33.0)
    #[serde(default = "default_forward_half_corridor")]
    pub forward_half_corridor: f32,

    /// Gyro calibration duration in milliseconds (default: 2000)
    #[serde(default = "default_gyro_calibration_ms")]
    pub gyro_calibration_ms: u64,
}

impl Default for SensorConfig {
    fn default() -> Self {
        Self {
            side_half_corridor: default_side_half_corridor(),
            forward_half_corridor: default_forward_half_corridor(),
            gyro_calibration_ms: default_gyro_calibration_ms(),
        }
    }
}

/// Closed-loop motion parameters
#[derive(Clone, Debug, Deserialize)]
pub struct MotionConfig {
    /// Nominal forward speed, encoder ticks per control tick (default: 15.0)
    #[serde(default = "default_forward_speed")]
    pub forward_speed: f32,

    /// Gain from virtual/real tick gap to motor power percent (default: 3.0)
    #[serde(default = "default_ticks_to_power")]
    pub ticks_to_power: f32,

    /// Proportional gain on heading deflection (default: 0.1)
    #[serde(default = "default_deflection_gain")]
    pub deflection_gain: f32,

    /// Heading deflection saturation, degrees (default: 10.0)
    #[serde(default = "default_max_deflection")]
    pub max_deflection: f32,

    /// Proportional gain on side-wall alignment (default: 0.1)
    #[serde(default = "default_alignment_gain")]
    pub alignment_gain: f32,

    /// Side-wall alignment saturation, sensor points (default: 20.0)
    #[serde(default = "default_max_alignment")]
    pub max_alignment: f32,

    /// Nominal in-place turn power, percent (default: 10.0)
    #[serde(default = "default_turn_speed")]
    pub turn_speed: f32,

    /// Proportional gain on remaining turn angle (default: 0.3)
    #[serde(default = "default_turn_gain")]
    pub turn_gain: f32,

    /// Yaw jump beyond which the unwrap counter increments, degrees
    /// (default: 40.0)
    #[serde(default = "default_unwrap_threshold")]
    pub unwrap_threshold: f32,

    /// Tick budget for one forward drive before a timeout fault
    /// (default: 2000)
    #[serde(default = "default_drive_tick_budget")]
    pub drive_tick_budget: u32,

    /// Tick budget for one in-place rotation before a timeout fault
    /// (default: 1000)
    #[serde(default = "default_turn_tick_budget")]
    pub turn_tick_budget: u32,
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            forward_speed: default_forward_speed(),
            ticks_to_power: default_ticks_to_power(),
            deflection_gain: default_deflection_gain(),
            max_deflection: default_max_deflection(),
            alignment_gain: default_alignment_gain(),
            max_alignment: default_max_alignment(),
            turn_speed: default_turn_speed(),
            turn_gain: default_turn_gain(),
            unwrap_threshold: default_unwrap_threshold(),
            drive_tick_budget: default_drive_tick_budget(),
            turn_tick_budget: default_turn_tick_budget(),
        }
    }
}

/// Solver loop limits
#[derive(Clone, Debug, Deserialize)]
pub struct SolverConfig {
    /// Maximum move/prune iterations before giving up (default: 500)
    #[serde(default = "default_max_iterations")]
    pub max_iterations: u32,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            max_iterations: default_max_iterations(),
        }
    }
}

/// Map input
#[derive(Clone, Debug, Deserialize)]
pub struct MapConfig {
    /// Path to the maze map text file
    #[serde(default = "default_map_path")]
    pub path: String,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            path: default_map_path(),
        }
    }
}

fn default_wheel_diameter() -> f32 {
    56.0
}

fn default_ticks_per_rev() -> f32 {
    630.0
}

fn default_cell_side() -> f32 {
    400.0
}

fn default_base_tick_ms() -> u64 {
    20
}

fn default_side_half_corridor() -> f32 {
    33.0
}

fn default_forward_half_corridor() -> f32 {
    33.0
}

fn default_gyro_calibration_ms() -> u64 {
    2000
}

fn default_forward_speed() -> f32 {
    15.0
}

fn default_ticks_to_power() -> f32 {
    3.0
}

fn default_deflection_gain() -> f32 {
    0.1
}

fn default_max_deflection() -> f32 {
    10.0
}

fn default_alignment_gain() -> f32 {
    0.1
}

fn default_max_alignment() -> f32 {
    20.0
}

fn default_turn_speed() -> f32 {
    10.0
}

fn default_turn_gain() -> f32 {
    0.3
}

fn default_unwrap_threshold() -> f32 {
    40.0
}

fn default_drive_tick_budget() -> u32 {
    2000
}

fn default_turn_tick_budget() -> u32 {
    1000
}

fn default_max_iterations() -> u32 {
    500
}

fn default_map_path() -> String {
    "maps/field.txt".to_string()
}
