//! Corridor occupancy sensing with startup calibration.

use crate::config::{RobotConfig, SensorConfig};
use crate::error::Result;
use std::time::Duration;
use yantra_io::Platform;

/// One capture of the three adjacent-cell occupancies.
///
/// Taken once per step and handed to the exploration policy and the
/// localization filter as a value, never re-read mid-decision.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WallObservation {
    /// Left adjacent cell is open
    pub left_open: bool,
    /// Right adjacent cell is open
    pub right_open: bool,
    /// Forward adjacent cell is open
    pub forward_open: bool,
}

/// Occupancy queries over the raw range sensors.
///
/// Thresholds are fixed once at calibration: the half corridor widths are the
/// minimum of the design defaults and the first readings, so a robot that
/// starts closer to a wall than designed still senses its corridor.
#[derive(Clone, Debug)]
pub struct OccupancyProbe {
    side_half: f32,
    forward_half: f32,
    forward_occupied_limit: f32,
}

impl OccupancyProbe {
    /// Build a probe with explicit thresholds.
    pub fn new(side_half: f32, forward_half: f32, forward_occupied_limit: f32) -> Self {
        Self {
            side_half,
            forward_half,
            forward_occupied_limit,
        }
    }

    /// Calibrate the gyro and corridor thresholds against the start cell.
    pub fn calibrate<P: Platform>(
        hw: &mut P,
        sensors: &SensorConfig,
        robot: &RobotConfig,
    ) -> Result<Self> {
        hw.calibrate_gyro(Duration::from_millis(sensors.gyro_calibration_ms))?;

        let left = hw.left_range()?;
        let right = hw.right_range()?;
        let forward = hw.forward_range()?;

        let side_half = left.min(right).min(sensors.side_half_corridor);
        let forward_half = forward.min(sensors.forward_half_corridor);

        log::info!(
            "OccupancyProbe: calibrated side_half={:.1} forward_half={:.1} (initial l={:.1} r={:.1} f={:.1})",
            side_half,
            forward_half,
            left,
            right,
            forward
        );

        Ok(Self::new(side_half, forward_half, robot.cell_side / 10.0))
    }

    /// Calibrated side half corridor width, sensor points.
    #[inline]
    pub fn side_half(&self) -> f32 {
        self.side_half
    }

    /// Distance to the left wall if the left cell is occupied, 0 otherwise.
    pub fn left_occupancy<P: Platform>(&self, hw: &mut P) -> Result<f32> {
        let distance = hw.left_range()?;
        Ok(if distance > 2.0 * self.side_half {
            0.0
        } else {
            distance
        })
    }

    /// Distance to the right wall if the right cell is occupied, 0 otherwise.
    pub fn right_occupancy<P: Platform>(&self, hw: &mut P) -> Result<f32> {
        let distance = hw.right_range()?;
        Ok(if distance > 2.0 * self.side_half {
            0.0
        } else {
            distance
        })
    }

    /// Distance to the forward wall if the forward cell is occupied, 0
    /// otherwise.
    pub fn forward_occupancy<P: Platform>(&self, hw: &mut P) -> Result<f32> {
        let distance = hw.forward_range()?;
        Ok(if distance > self.forward_occupied_limit {
            0.0
        } else {
            distance
        })
    }

    /// Is the forward reading inside the drive stop distance?
    pub fn forward_blocking<P: Platform>(&self, hw: &mut P) -> Result<bool> {
        Ok(hw.forward_range()? <= self.forward_half)
    }

    /// Capture all three occupancies in one shot.
    pub fn observe<P: Platform>(&self, hw: &mut P) -> Result<WallObservation> {
        Ok(WallObservation {
            left_open: self.left_occupancy(hw)? == 0.0,
            right_open: self.right_occupancy(hw)? == 0.0,
            forward_open: self.forward_occupancy(hw)? == 0.0,
        })
    }
}
