//! Maze solver orchestration.
//!
//! Owns the relative pose, the visited path and the hypothesis set, and runs
//! the move/observe/prune loop until exactly one start transform survives.

use crate::config::NavConfig;
use crate::error::{NavError, Result};
use crate::exploration::{choose_direction, Direction};
use crate::localization::HypothesisFilter;
use crate::motion::MotionController;
use crate::sensors::OccupancyProbe;
use vyuha_map::geometry;
use vyuha_map::{GridPose, MazeGrid};
use yantra_io::Platform;

/// The resolved start cell, 1-based whole-cell coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StartCell {
    /// Column, 1-based
    pub x: i32,
    /// Row, 1-based
    pub y: i32,
}

/// Drives the robot through the maze until its start pose is unambiguous.
pub struct MazeSolver<P: Platform> {
    hw: P,
    grid: MazeGrid,
    probe: OccupancyProbe,
    motion: MotionController,
    filter: HypothesisFilter,
    pose: GridPose,
    path: Vec<GridPose>,
    max_iterations: u32,
}

impl<P: Platform> MazeSolver<P> {
    /// Calibrate the sensors and seed the hypothesis set.
    pub fn new(mut hw: P, grid: MazeGrid, config: &NavConfig) -> Result<Self> {
        let probe = OccupancyProbe::calibrate(&mut hw, &config.sensors, &config.robot)?;
        let motion = MotionController::new(config.robot.clone(), config.motion.clone());
        let filter = HypothesisFilter::seed(&grid);
        let pose = GridPose::origin();

        Ok(Self {
            hw,
            grid,
            probe,
            motion,
            filter,
            pose,
            path: vec![pose],
            max_iterations: config.solver.max_iterations,
        })
    }

    /// Explore until the start cell is resolved.
    ///
    /// Any fatal exit zeroes the motors before the error propagates; a
    /// successful run halts the robot too.
    pub fn solve(&mut self) -> Result<StartCell> {
        let result = self.run();
        self.hw.stop_motors()?;
        result
    }

    fn run(&mut self) -> Result<StartCell> {
        let mut iterations = 0u32;
        while self.filter.len() != 1 {
            if self.filter.is_empty() {
                return Err(NavError::LocalizationFailed);
            }
            if iterations >= self.max_iterations {
                return Err(NavError::IterationLimit(self.max_iterations));
            }
            iterations += 1;

            log::info!(
                "MazeSolver: iteration {}, {} hypotheses remain",
                iterations,
                self.filter.len()
            );

            self.step()?;

            let observation = self.probe.observe(&mut self.hw)?;
            self.filter.prune(&self.grid, self.pose, observation);
        }

        let hypothesis = self
            .filter
            .resolved()
            .ok_or(NavError::LocalizationFailed)?;
        let absolute = geometry::compose(hypothesis, GridPose::origin());
        let start = StartCell {
            x: absolute.x / 2 + 1,
            y: absolute.y / 2 + 1,
        };
        log::info!(
            "MazeSolver: converged after {} iterations, start cell ({}, {})",
            iterations,
            start.x,
            start.y
        );
        Ok(start)
    }

    /// Choose and execute one movement.
    fn step(&mut self) -> Result<()> {
        let observation = self.probe.observe(&mut self.hw)?;
        let direction = choose_direction(&self.path, self.pose, observation);
        log::debug!(
            "MazeSolver: at ({}, {}, {}) choosing {:?}",
            self.pose.x,
            self.pose.y,
            self.pose.angle,
            direction
        );
        match direction {
            Direction::Backward => self.turn(180),
            Direction::Left => {
                self.turn(-90)?;
                self.forward()
            }
            Direction::Right => {
                self.turn(90)?;
                self.forward()
            }
            Direction::Forward => self.forward(),
        }
    }

    fn turn(&mut self, delta: i32) -> Result<()> {
        self.motion
            .rotate_in_place(&mut self.hw, delta, self.pose.angle)?;
        self.pose = self
            .pose
            .with_angle(geometry::normalize_angle(self.pose.angle + delta));
        // The path's final entry tracks the live pose, heading included.
        if let Some(last) = self.path.last_mut() {
            if last.same_cell(self.pose) {
                *last = self.pose;
            }
        }
        Ok(())
    }

    fn forward(&mut self) -> Result<()> {
        self.motion
            .drive_forward(&mut self.hw, &self.probe, self.pose.angle)?;
        self.pose = geometry::advance_one_cell(self.pose);
        self.path.push(self.pose);
        debug_assert_eq!(self.path.last(), Some(&self.pose));
        Ok(())
    }
}
