//! Platform trait for the robot hardware boundary.

use crate::error::Result;
use std::time::Duration;

/// Wheel selector for the differential drive.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Wheel {
    /// Left wheel (motor + encoder)
    Left,
    /// Right wheel (motor + encoder)
    Right,
}

/// The hardware capabilities the navigation stack consumes.
///
/// All calls are synchronous and non-blocking apart from [`Platform::wait`],
/// the single cooperative suspension point of the control loop. On real
/// hardware `wait` sleeps for the tick period; the simulator advances its
/// physics by the same amount instead, so simulated runs are instant and
/// deterministic.
pub trait Platform {
    /// Set motor power in percent, clamped to [-100, 100].
    fn set_motor_power(&mut self, wheel: Wheel, percent: f32) -> Result<()>;

    /// Zero power on both motors.
    fn stop_motors(&mut self) -> Result<()> {
        self.set_motor_power(Wheel::Left, 0.0)?;
        self.set_motor_power(Wheel::Right, 0.0)
    }

    /// Reset one wheel's encoder to zero.
    fn reset_encoder(&mut self, wheel: Wheel) -> Result<()>;

    /// Accumulated encoder ticks since the last reset (signed).
    fn encoder_ticks(&mut self, wheel: Wheel) -> Result<i32>;

    /// Calibrate the gyroscope; the robot must be stationary for `duration`.
    fn calibrate_gyro(&mut self, duration: Duration) -> Result<()>;

    /// Yaw relative to the calibration heading, degrees wrapped to (-180, 180].
    fn yaw_degrees(&mut self) -> Result<f32>;

    /// Left side range reading, sensor units.
    fn left_range(&mut self) -> Result<f32>;

    /// Right side range reading, sensor units.
    fn right_range(&mut self) -> Result<f32>;

    /// Forward range reading, sensor units.
    fn forward_range(&mut self) -> Result<f32>;

    /// Suspend for one tick period.
    fn wait(&mut self, period: Duration);
}
