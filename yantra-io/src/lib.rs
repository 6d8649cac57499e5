//! YantraIO - hardware boundary for the Chakravyuh maze robot
//!
//! This crate defines the [`Platform`] trait the navigation stack drives -
//! two wheel motors with encoders, a yaw gyroscope, three range sensors, and
//! a cooperative tick clock - plus a deterministic software simulator
//! implementing it against a known maze, for hardware-free development and
//! testing.

pub mod error;
pub mod platform;
pub mod sim;

pub use error::{Error, Result};
pub use platform::{Platform, Wheel};
pub use sim::{SimConfig, SimulatedRobot};
