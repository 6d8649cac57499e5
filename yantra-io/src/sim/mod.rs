//! Deterministic maze robot simulator.
//!
//! Simulates the full [`crate::Platform`] boundary against a known maze:
//!
//! | Component | Simulation method |
//! |-----------|-------------------|
//! | Wheel motors | Linear power-to-velocity model, clamped |
//! | Wheel encoders | Fractional tick accumulation + slip/quantization noise |
//! | Gyroscope | Differential-drive yaw integration + bias drift |
//! | Side IR / forward sonic | Analytic ray casting against the wall lattice |
//!
//! The maze lives in world millimeters: the doubled-index grid maps to world
//! coordinates at half a cell side per index, so cell centers (odd indices)
//! sit at the middle of each `cell_side` square and walls are thin bands on
//! the boundary lines. `wait()` advances simulated time, never the wall
//! clock.

mod config;
mod noise;
mod robot;

pub use config::{BodyConfig, SimConfig, SimNoiseConfig};
pub use noise::NoiseGenerator;
pub use robot::SimulatedRobot;
