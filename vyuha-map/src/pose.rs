//! Integer grid pose with a cardinal-heading invariant.

use serde::{Deserialize, Serialize};

/// The four legal headings, in degrees.
pub const CARDINAL_ANGLES: [i32; 4] = [0, 90, -90, 180];

/// A pose on the doubled-index cell grid.
///
/// `x`/`y` are signed grid offsets; in the robot's relative frame they are
/// anchored at the unknown start cell, in the map frame they are absolute
/// doubled indices. `angle` is the heading in degrees and is always exactly
/// one of {0, 90, -90, 180} - every rotation in this system is a quarter
/// turn, and any transform producing another angle is a defect.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridPose {
    /// Column offset (doubled units)
    pub x: i32,
    /// Row offset (doubled units)
    pub y: i32,
    /// Heading in degrees, one of {0, 90, -90, 180}
    pub angle: i32,
}

impl GridPose {
    /// Create a pose, validating the heading invariant.
    #[inline]
    pub fn new(x: i32, y: i32, angle: i32) -> Self {
        debug_assert!(
            is_cardinal(angle),
            "grid pose heading must be a quarter turn, got {angle}"
        );
        Self { x, y, angle }
    }

    /// The relative-frame origin: the start cell, heading defined as 0.
    #[inline]
    pub const fn origin() -> Self {
        Self {
            x: 0,
            y: 0,
            angle: 0,
        }
    }

    /// Same position with a different heading.
    #[inline]
    pub fn with_angle(self, angle: i32) -> Self {
        Self::new(self.x, self.y, angle)
    }

    /// Position-only equality, ignoring heading.
    ///
    /// The visited-path cycle scan matches cells, not headings.
    #[inline]
    pub fn same_cell(self, other: GridPose) -> bool {
        self.x == other.x && self.y == other.y
    }
}

/// Is `angle` one of the four legal headings?
#[inline]
pub fn is_cardinal(angle: i32) -> bool {
    matches!(angle, 0 | 90 | -90 | 180)
}
