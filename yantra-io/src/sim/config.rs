//! Configuration structures for the maze simulator.

use serde::Deserialize;

/// Simulator configuration.
#[derive(Clone, Debug, Deserialize)]
pub struct SimConfig {
    /// True start cell column, 1-based
    #[serde(default = "default_start_cell")]
    pub start_cell_x: i32,

    /// True start cell row, 1-based
    #[serde(default = "default_start_cell")]
    pub start_cell_y: i32,

    /// True start heading, degrees, one of {0, 90, -90, 180}
    #[serde(default)]
    pub start_heading: i32,

    /// Random seed for noise (0 = entropy, non-deterministic)
    #[serde(default = "default_seed")]
    pub seed: u64,

    /// Physical body parameters
    #[serde(default)]
    pub body: BodyConfig,

    /// Sensor and actuation noise
    #[serde(default)]
    pub noise: SimNoiseConfig,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            start_cell_x: default_start_cell(),
            start_cell_y: default_start_cell(),
            start_heading: 0,
            seed: default_seed(),
            body: BodyConfig::default(),
            noise: SimNoiseConfig::default(),
        }
    }
}

/// Physical parameters of the simulated robot and maze.
#[derive(Clone, Debug, Deserialize)]
pub struct BodyConfig {
    /// Wheel diameter in millimeters
    #[serde(default = "default_wheel_diameter")]
    pub wheel_diameter: f32,

    /// Encoder ticks per wheel revolution
    #[serde(default = "default_ticks_per_rev")]
    pub ticks_per_rev: f32,

    /// Distance between wheel contact points, millimeters
    #[serde(default = "default_track_width")]
    pub track_width: f32,

    /// Wheel linear speed at 100% power, mm/s
    #[serde(default = "default_max_wheel_speed")]
    pub max_wheel_speed: f32,

    /// Maze cell side length, millimeters
    #[serde(default = "default_cell_side")]
    pub cell_side: f32,

    /// Side IR scale: sensor points per millimeter
    #[serde(default = "default_ir_points_per_mm")]
    pub ir_points_per_mm: f32,

    /// Forward sonic scale: sensor points per millimeter
    #[serde(default = "default_sonic_points_per_mm")]
    pub sonic_points_per_mm: f32,

    /// Maximum raycast range, millimeters
    #[serde(default = "default_max_range")]
    pub max_range: f32,
}

impl Default for BodyConfig {
    fn default() -> Self {
        Self {
            wheel_diameter: default_wheel_diameter(),
            ticks_per_rev: default_ticks_per_rev(),
            track_width: default_track_width(),
            max_wheel_speed: default_max_wheel_speed(),
            cell_side: default_cell_side(),
            ir_points_per_mm: default_ir_points_per_mm(),
            sonic_points_per_mm: default_sonic_points_per_mm(),
            max_range: default_max_range(),
        }
    }
}

/// Noise parameters; all default to zero for deterministic runs.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct SimNoiseConfig {
    /// Wheel slip, multiplicative stddev on traveled distance
    #[serde(default)]
    pub slip_stddev: f32,

    /// Add +/-0.5 tick jitter to encoder accumulation
    #[serde(default)]
    pub quantization: bool,

    /// Gyro reading noise, degrees stddev per read
    #[serde(default)]
    pub gyro_stddev: f32,

    /// Gyro bias drift, degrees per second
    #[serde(default)]
    pub gyro_bias: f32,

    /// Range reading noise, sensor points stddev per read
    #[serde(default)]
    pub range_stddev: f32,
}

fn default_start_cell() -> i32 {
    1
}

fn default_seed() -> u64 {
    42
}

fn default_wheel_diameter() -> f32 {
    56.0
}

fn default_ticks_per_rev() -> f32 {
    630.0
}

fn default_track_width() -> f32 {
    180.0
}

fn default_max_wheel_speed() -> f32 {
    400.0
}

fn default_cell_side() -> f32 {
    400.0
}

fn default_ir_points_per_mm() -> f32 {
    0.165
}

fn default_sonic_points_per_mm() -> f32 {
    0.1
}

fn default_max_range() -> f32 {
    2000.0
}
