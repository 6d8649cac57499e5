//! VyuhaMap - maze grid and cardinal geometry for Chakravyuh
//!
//! This crate holds the static world model shared by the navigation stack:
//!
//! - [`Cell`] / [`MazeGrid`]: an immutable occupancy grid in the doubled-index
//!   convention (traversable cell centers at odd row/column indices, walls and
//!   corridor connectors at even indices)
//! - [`GridPose`]: an integer cell-grid pose whose heading is always an exact
//!   quarter turn
//! - [`geometry`]: frame-composition transforms between the robot's relative
//!   frame and absolute map coordinates

pub mod cell;
pub mod error;
pub mod geometry;
pub mod grid;
pub mod pose;

pub use cell::Cell;
pub use error::{MapError, Result};
pub use grid::MazeGrid;
pub use pose::GridPose;
