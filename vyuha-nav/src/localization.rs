//! Multi-hypothesis start-pose localization.
//!
//! The filter holds every transform that could map the robot's relative
//! frame onto the map - one candidate per traversable cell and cardinal
//! heading - and prunes it against each step's wall observation. The set
//! only ever shrinks; a rejected hypothesis is never re-admitted.

use crate::sensors::WallObservation;
use vyuha_map::geometry;
use vyuha_map::pose::CARDINAL_ANGLES;
use vyuha_map::{Cell, GridPose, MazeGrid};

/// The surviving set of candidate start transforms.
#[derive(Clone, Debug)]
pub struct HypothesisFilter {
    survivors: Vec<GridPose>,
}

impl HypothesisFilter {
    /// Seed with every traversable cell center crossed with all four
    /// headings.
    pub fn seed(grid: &MazeGrid) -> Self {
        let mut survivors = Vec::new();
        for (x, y) in grid.traversable_cells() {
            for angle in CARDINAL_ANGLES {
                survivors.push(GridPose::new(x, y, angle));
            }
        }
        log::debug!("HypothesisFilter: seeded {} hypotheses", survivors.len());
        Self { survivors }
    }

    /// Number of surviving hypotheses.
    #[inline]
    pub fn len(&self) -> usize {
        self.survivors.len()
    }

    /// True when no hypothesis is consistent with the observations so far.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.survivors.is_empty()
    }

    /// The surviving hypotheses.
    pub fn survivors(&self) -> &[GridPose] {
        &self.survivors
    }

    /// The unique survivor, if the filter has converged.
    pub fn resolved(&self) -> Option<GridPose> {
        match self.survivors.as_slice() {
            [hypothesis] => Some(*hypothesis),
            _ => None,
        }
    }

    /// Drop every hypothesis inconsistent with the observation at `pose`.
    ///
    /// A hypothesis survives iff its absolute current cell is in-bounds and
    /// empty, and the map's emptiness at the left/right/forward neighbors
    /// equals the observed openness. An out-of-bounds current cell rejects
    /// outright; an out-of-bounds neighbor counts as not-empty.
    ///
    /// Returns the surviving count.
    pub fn prune(
        &mut self,
        grid: &MazeGrid,
        pose: GridPose,
        observation: WallObservation,
    ) -> usize {
        self.survivors.retain(|&hypothesis| {
            let current = geometry::compose(hypothesis, pose);
            if grid.get(current.x, current.y) != Some(Cell::Empty) {
                return false;
            }
            let left = geometry::left_cell(hypothesis, pose);
            let right = geometry::right_cell(hypothesis, pose);
            let forward = geometry::forward_cell(hypothesis, pose);
            grid.is_open(left.x, left.y) == observation.left_open
                && grid.is_open(right.x, right.y) == observation.right_open
                && grid.is_open(forward.x, forward.y) == observation.forward_open
        });
        log::debug!(
            "HypothesisFilter: {} hypotheses after pruning at ({}, {}, {})",
            self.survivors.len(),
            pose.x,
            pose.y,
            pose.angle
        );
        self.survivors.len()
    }
}
