//! Cardinal-frame composition transforms.
//!
//! All rotations are exact quarter turns, so frame composition is a four-way
//! match instead of trig. The left/right derivations are asymmetric on
//! purpose: `left_cell` keeps the relative heading while `right_cell` derives
//! its heading from the origin frame. The exploration policy chains these
//! transforms twice to reach across connector cells, and its behavior depends
//! on exactly this asymmetry.

use crate::pose::GridPose;

/// Map any integer angle into (-180, 180] degrees.
#[inline]
pub fn normalize_angle(angle: i32) -> i32 {
    let mut a = angle % 360;
    if a > 180 {
        a -= 360;
    } else if a <= -180 {
        a += 360;
    }
    a
}

/// Rotate `relative` into `origin`'s frame and translate by `origin`.
///
/// The result keeps the origin's heading.
pub fn compose(origin: GridPose, relative: GridPose) -> GridPose {
    let (x, y) = match normalize_angle(origin.angle) {
        0 => (origin.x + relative.x, origin.y + relative.y),
        90 => (origin.x - relative.y, origin.y + relative.x),
        -90 => (origin.x + relative.y, origin.y - relative.x),
        180 => (origin.x - relative.x, origin.y - relative.y),
        a => unreachable!("non-cardinal heading {a} in frame composition"),
    };
    GridPose::new(x, y, origin.angle)
}

/// The cell one step ahead of `relative` along its heading, in `origin`'s frame.
pub fn forward_cell(origin: GridPose, relative: GridPose) -> GridPose {
    let mut stepped = relative;
    match normalize_angle(relative.angle) {
        0 => stepped.y += 1,
        -90 => stepped.x += 1,
        90 => stepped.x -= 1,
        180 => stepped.y -= 1,
        a => unreachable!("non-cardinal heading {a} in forward step"),
    }
    compose(origin, stepped)
}

/// The cell to the left of `relative`, in `origin`'s frame.
///
/// The result keeps the relative pose's original heading.
pub fn left_cell(origin: GridPose, relative: GridPose) -> GridPose {
    let turned = relative.with_angle(normalize_angle(relative.angle - 90));
    let result = forward_cell(origin, turned);
    GridPose::new(result.x, result.y, relative.angle)
}

/// The cell to the right of `relative`, in `origin`'s frame.
///
/// The result heading is the origin frame's heading rotated by -90.
pub fn right_cell(origin: GridPose, relative: GridPose) -> GridPose {
    let turned = relative.with_angle(normalize_angle(relative.angle + 90));
    let result = forward_cell(origin, turned);
    GridPose::new(result.x, result.y, normalize_angle(result.angle - 90))
}

/// Pose after a completed one-cell forward move.
///
/// Hops the connector cell and the next cell center in the relative frame;
/// the heading is unchanged.
pub fn advance_one_cell(pose: GridPose) -> GridPose {
    let origin = GridPose::origin();
    let connector = forward_cell(origin, pose).with_angle(pose.angle);
    let next = forward_cell(origin, connector);
    GridPose::new(next.x, next.y, pose.angle)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pose::{is_cardinal, CARDINAL_ANGLES};

    #[test]
    fn test_normalize_range_and_idempotence() {
        for a in -1000..=1000 {
            let n = normalize_angle(a);
            assert!(n > -180 && n <= 180, "normalize({a}) = {n} out of range");
            assert_eq!(normalize_angle(n), n, "normalize not idempotent at {a}");
        }
    }

    #[test]
    fn test_normalize_known_values() {
        assert_eq!(normalize_angle(270), -90);
        assert_eq!(normalize_angle(-270), 90);
        assert_eq!(normalize_angle(-180), 180);
        assert_eq!(normalize_angle(180), 180);
        assert_eq!(normalize_angle(360), 0);
        assert_eq!(normalize_angle(-450), -90);
    }

    #[test]
    fn test_compose_translates_in_each_frame() {
        let rel = GridPose::new(2, 1, 0);
        let at = |a| GridPose::new(10, 20, a);
        assert_eq!(compose(at(0), rel), GridPose::new(12, 21, 0));
        assert_eq!(compose(at(90), rel), GridPose::new(9, 22, 90));
        assert_eq!(compose(at(-90), rel), GridPose::new(11, 18, -90));
        assert_eq!(compose(at(180), rel), GridPose::new(8, 19, 180));
    }

    #[test]
    fn test_compose_round_trip() {
        // Rotating the composed offset back recovers the relative offset.
        for angle in CARDINAL_ANGLES {
            for rx in -3..=3 {
                for ry in -3..=3 {
                    let origin = GridPose::new(5, -7, angle);
                    let abs = compose(origin, GridPose::new(rx, ry, 0));
                    let (dx, dy) = (abs.x - origin.x, abs.y - origin.y);
                    let (bx, by) = match angle {
                        0 => (dx, dy),
                        90 => (dy, -dx),
                        -90 => (-dy, dx),
                        180 => (-dx, -dy),
                        _ => unreachable!(),
                    };
                    assert_eq!((bx, by), (rx, ry), "round trip failed at angle {angle}");
                }
            }
        }
    }

    #[test]
    fn test_forward_step_per_heading() {
        let origin = GridPose::origin();
        assert_eq!(
            forward_cell(origin, GridPose::new(4, 4, 0)),
            GridPose::new(4, 5, 0)
        );
        assert_eq!(
            forward_cell(origin, GridPose::new(4, 4, -90)),
            GridPose::new(5, 4, 0)
        );
        assert_eq!(
            forward_cell(origin, GridPose::new(4, 4, 90)),
            GridPose::new(3, 4, 0)
        );
        assert_eq!(
            forward_cell(origin, GridPose::new(4, 4, 180)),
            GridPose::new(4, 3, 0)
        );
    }

    #[test]
    fn test_left_keeps_relative_heading() {
        let origin = GridPose::origin();
        let pose = GridPose::new(4, 4, 0);
        let left = left_cell(origin, pose);
        assert_eq!(left, GridPose::new(5, 4, 0));
        // Chaining reaches two cells to the left.
        assert_eq!(left_cell(origin, left), GridPose::new(6, 4, 0));
    }

    #[test]
    fn test_right_derives_heading_from_origin() {
        let origin = GridPose::origin();
        let pose = GridPose::new(4, 4, 0);
        let right = right_cell(origin, pose);
        assert_eq!(right, GridPose::new(3, 4, -90));
        // The chained step follows the derived heading, not the original one.
        assert_eq!(right_cell(origin, right), GridPose::new(3, 5, -90));
    }

    #[test]
    fn test_right_chain_from_minus_ninety() {
        let origin = GridPose::origin();
        let pose = GridPose::new(4, 4, -90);
        let first = right_cell(origin, pose);
        assert_eq!(first, GridPose::new(4, 5, -90));
        assert_eq!(right_cell(origin, first), GridPose::new(4, 6, -90));
    }

    #[test]
    fn test_advance_one_cell() {
        assert_eq!(
            advance_one_cell(GridPose::new(0, 0, 0)),
            GridPose::new(0, 2, 0)
        );
        assert_eq!(
            advance_one_cell(GridPose::new(2, 4, 90)),
            GridPose::new(0, 4, 90)
        );
        assert_eq!(
            advance_one_cell(GridPose::new(2, 4, -90)),
            GridPose::new(4, 4, -90)
        );
        assert_eq!(
            advance_one_cell(GridPose::new(2, 4, 180)),
            GridPose::new(2, 2, 180)
        );
    }

    #[test]
    fn test_transforms_preserve_cardinal_headings() {
        let origin = GridPose::origin();
        for oa in CARDINAL_ANGLES {
            for ra in CARDINAL_ANGLES {
                let hyp = GridPose::new(3, 3, oa);
                let rel = GridPose::new(-2, 4, ra);
                for pose in [
                    compose(hyp, rel),
                    forward_cell(hyp, rel),
                    left_cell(hyp, rel),
                    right_cell(hyp, rel),
                    advance_one_cell(rel),
                ] {
                    assert!(
                        is_cardinal(pose.angle),
                        "transform produced off-grid angle {} from ({oa}, {ra})",
                        pose.angle
                    );
                }
            }
        }
    }
}
