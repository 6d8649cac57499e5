//! Closed-loop motion primitives.
//!
//! Two independent primitives translate the discrete direction decisions into
//! motor commands: a straight one-cell drive corrected by gyro heading and
//! side-wall alignment, and an in-place rotation tracking an unwrapped yaw
//! target. Both are busy-poll tick loops that suspend on the platform clock;
//! each carries a tick budget so a stuck robot or dead sensor surfaces as a
//! timeout fault instead of spinning forever.

use crate::config::{MotionConfig, RobotConfig};
use crate::error::{NavError, Result};
use crate::sensors::OccupancyProbe;
use std::f32::consts::PI;
use std::time::Duration;
use yantra_io::{Platform, Wheel};

/// Closed-loop drive and turn controller.
pub struct MotionController {
    robot: RobotConfig,
    cfg: MotionConfig,
}

impl MotionController {
    /// Create a controller from the robot and motion parameters.
    pub fn new(robot: RobotConfig, cfg: MotionConfig) -> Self {
        log::debug!(
            "MotionController: cell={:.0}mm wheel={:.0}mm speed={:.0} ticks/tick",
            robot.cell_side,
            robot.wheel_diameter,
            cfg.forward_speed
        );
        Self { robot, cfg }
    }

    /// Encoder ticks for one full cell.
    fn required_ticks(&self) -> f32 {
        self.robot.ticks_per_rev * self.robot.cell_side / (PI * self.robot.wheel_diameter)
    }

    fn base_period(&self) -> Duration {
        Duration::from_millis(self.robot.base_tick_ms)
    }

    /// Drive one cell forward.
    ///
    /// Runs until the forward range drops to the calibrated stop distance or
    /// the mean encoder count reaches the one-cell target. Two virtual wheel
    /// accumulators advance at the nominal speed skewed by the heading and
    /// alignment corrections; motor power closes the gap between virtual and
    /// real ticks. The motors are left running on exit - consecutive drives
    /// chain smoothly, and the orchestrator owns any stop.
    ///
    /// An early stop on a front obstacle still counts as a completed move:
    /// the caller advances the pose one full cell either way.
    pub fn drive_forward<P: Platform>(
        &self,
        hw: &mut P,
        probe: &OccupancyProbe,
        heading_at_start: i32,
    ) -> Result<()> {
        let required = self.required_ticks();
        hw.reset_encoder(Wheel::Left)?;
        hw.reset_encoder(Wheel::Right)?;

        let mut virtual_left = 0.0f32;
        let mut virtual_right = 0.0f32;
        let mut enc_left = 0i32;
        let mut enc_right = 0i32;

        log::debug!(
            "MotionController: forward {:.0} ticks at heading {}",
            required,
            heading_at_start
        );

        let mut ticks = 0u32;
        while !probe.forward_blocking(hw)? && ((enc_left + enc_right) as f32 / 2.0) < required {
            if ticks >= self.cfg.drive_tick_budget {
                hw.stop_motors()?;
                return Err(NavError::MotionTimeout(ticks));
            }
            ticks += 1;

            let deflection = self.deflection_term(hw, heading_at_start)?;
            let alignment = self.alignment_term(hw, probe)?;

            virtual_left += self.cfg.forward_speed - deflection - alignment;
            virtual_right += self.cfg.forward_speed + deflection + alignment;

            enc_left = hw.encoder_ticks(Wheel::Left)?;
            enc_right = hw.encoder_ticks(Wheel::Right)?;
            hw.set_motor_power(
                Wheel::Left,
                (virtual_left - enc_left as f32) * self.cfg.ticks_to_power,
            )?;
            hw.set_motor_power(
                Wheel::Right,
                (virtual_right - enc_right as f32) * self.cfg.ticks_to_power,
            )?;

            hw.wait(self.base_period());
        }

        Ok(())
    }

    /// Rotate in place by `delta` degrees and hard-stop.
    ///
    /// The yaw sensor wraps at +/-180, so the stop condition runs on an
    /// unwrapped angle: whenever consecutive readings jump by more than the
    /// plausibility threshold, a wrap counter adds a full turn of the
    /// rotation's sign. Returns the requested delta.
    pub fn rotate_in_place<P: Platform>(
        &self,
        hw: &mut P,
        delta: i32,
        heading_at_start: i32,
    ) -> Result<i32> {
        let target = hw.yaw_degrees()? + delta as f32;
        let k: f32 = if delta > 0 { 1.0 } else { -1.0 };

        log::debug!(
            "MotionController: turn {} from heading {} (target {:.1})",
            delta,
            heading_at_start,
            target
        );

        let mut current = hw.yaw_degrees()?;
        let mut last = current;
        let mut wraps = 0i32;

        let mut ticks = 0u32;
        while k * current < k * target {
            if ticks >= self.cfg.turn_tick_budget {
                hw.stop_motors()?;
                return Err(NavError::MotionTimeout(ticks));
            }
            ticks += 1;

            let power = k * self.cfg.turn_speed + self.cfg.turn_gain * (target - current);
            hw.set_motor_power(Wheel::Left, power)?;
            hw.set_motor_power(Wheel::Right, -power)?;

            hw.wait(2 * self.base_period());

            let wrapped = hw.yaw_degrees()?;
            let supposed = wrapped + k * wraps as f32 * 360.0;
            if (supposed - last).abs() > self.cfg.unwrap_threshold {
                wraps += 1;
            }
            last = current;
            current = wrapped + k * wraps as f32 * 360.0;
        }

        hw.stop_motors()?;
        Ok(delta)
    }

    /// Proportional heading correction from the gyro, saturated.
    fn deflection_term<P: Platform>(&self, hw: &mut P, heading_at_start: i32) -> Result<f32> {
        let current = hw.yaw_degrees()?;
        let deflect = wrap_degrees(current - heading_at_start as f32)
            .clamp(-self.cfg.max_deflection, self.cfg.max_deflection);
        Ok(deflect * self.cfg.deflection_gain)
    }

    /// Proportional push-off from the nearer side wall, saturated.
    ///
    /// Only acts when the nearer wall is strictly closer than the other
    /// reading; a single wall with the far side open reads as 0 there and
    /// produces no correction.
    fn alignment_term<P: Platform>(&self, hw: &mut P, probe: &OccupancyProbe) -> Result<f32> {
        let left = probe.left_occupancy(hw)?;
        let right = probe.right_occupancy(hw)?;
        let side_half = probe.side_half();

        let mut alignment = 0.0;
        if left != 0.0 && left < right && left < 2.0 * side_half {
            alignment = -side_half + left;
        } else if right != 0.0 && right < left && right < 2.0 * side_half {
            alignment = side_half - right;
        }
        let alignment = alignment.clamp(-self.cfg.max_alignment, self.cfg.max_alignment);

        Ok(alignment * self.cfg.alignment_gain)
    }
}

/// Wrap degrees into (-180, 180]; inputs stay within one extra turn.
fn wrap_degrees(angle: f32) -> f32 {
    if angle > 180.0 {
        angle - 360.0
    } else if angle < -180.0 {
        angle + 360.0
    } else {
        angle
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{RobotConfig, SensorConfig};
    use crate::sensors::OccupancyProbe;
    use approx::assert_relative_eq;
    use vyuha_map::MazeGrid;
    use yantra_io::{SimConfig, SimulatedRobot};

    const SMALL: &str = "\
#####
#...#
#.###
#...#
#####
";

    fn setup(cell_x: i32, cell_y: i32, heading: i32) -> (SimulatedRobot, OccupancyProbe) {
        let grid = MazeGrid::parse(SMALL).unwrap();
        let config = SimConfig {
            start_cell_x: cell_x,
            start_cell_y: cell_y,
            start_heading: heading,
            ..SimConfig::default()
        };
        let mut sim = SimulatedRobot::new(grid, config).unwrap();
        let probe =
            OccupancyProbe::calibrate(&mut sim, &SensorConfig::default(), &RobotConfig::default())
                .unwrap();
        (sim, probe)
    }

    fn controller() -> MotionController {
        MotionController::new(RobotConfig::default(), MotionConfig::default())
    }

    #[test]
    fn test_wrap_degrees() {
        assert_relative_eq!(wrap_degrees(270.0), -90.0);
        assert_relative_eq!(wrap_degrees(-270.0), 90.0);
        assert_relative_eq!(wrap_degrees(45.0), 45.0);
    }

    const CORRIDOR: &str = "\
#######
#.....#
#######
";

    #[test]
    fn test_drive_forward_one_cell() {
        // A three-cell straight corridor: the far wall is 1000mm out, so the
        // drive terminates on the encoder target, not the sonic stop, and
        // lands on the next cell center. World heading -90 is +x; the
        // robot's relative heading is 0.
        let grid = MazeGrid::parse(CORRIDOR).unwrap();
        let config = SimConfig {
            start_cell_x: 1,
            start_cell_y: 1,
            start_heading: -90,
            ..SimConfig::default()
        };
        let mut sim = SimulatedRobot::new(grid, config).unwrap();
        let probe =
            OccupancyProbe::calibrate(&mut sim, &SensorConfig::default(), &RobotConfig::default())
                .unwrap();
        controller().drive_forward(&mut sim, &probe, 0).unwrap();
        assert_eq!(sim.current_cell(), (2, 1));
        let (x, y) = sim.position_mm();
        assert!((x - 600.0).abs() < 40.0, "x = {x}");
        assert!((y - 200.0).abs() < 20.0, "y = {y}");
    }

    #[test]
    fn test_drive_stops_early_at_front_wall() {
        // From cell (1,1) heading 0 the border wall sits 600mm ahead; the
        // sonic stop fires before the full encoder target.
        let (mut sim, probe) = setup(1, 1, 0);
        controller().drive_forward(&mut sim, &probe, 0).unwrap();
        assert_eq!(sim.current_cell(), (1, 2));
        let (_, y) = sim.position_mm();
        // Stopped at the calibrated front distance, short of the cell center
        assert!(y < 600.0, "y = {y}");
        assert!(y > 400.0, "y = {y}");
    }

    #[test]
    fn test_drive_facing_wall_exits_immediately() {
        let (mut sim, probe) = setup(2, 1, 0);
        let before = sim.position_mm();
        controller().drive_forward(&mut sim, &probe, 0).unwrap();
        let after = sim.position_mm();
        assert_eq!(before, after);
    }

    #[test]
    fn test_rotate_quarter_and_half_turns() {
        let (mut sim, _probe) = setup(2, 1, 0);
        let ctrl = controller();

        assert_eq!(ctrl.rotate_in_place(&mut sim, 90, 0).unwrap(), 90);
        assert!(
            (sim.heading_deg() - 90.0).abs() < 6.0,
            "heading = {}",
            sim.heading_deg()
        );

        assert_eq!(ctrl.rotate_in_place(&mut sim, -90, 90).unwrap(), -90);
        assert!(
            sim.heading_deg().abs() < 8.0,
            "heading = {}",
            sim.heading_deg()
        );
    }

    #[test]
    fn test_rotate_half_turn_crosses_wrap() {
        let (mut sim, _) = setup(2, 1, 0);
        controller().rotate_in_place(&mut sim, 180, 0).unwrap();
        // Continuous heading passes +180 and keeps going; the unwrap counter
        // must carry the stop condition across the seam.
        assert!(
            (sim.heading_deg() - 180.0).abs() < 8.0,
            "heading = {}",
            sim.heading_deg()
        );
    }

    /// Platform with dead motors: encoders and yaw never move.
    struct DeadPlatform {
        powers: (f32, f32),
    }

    impl Platform for DeadPlatform {
        fn set_motor_power(&mut self, wheel: Wheel, percent: f32) -> yantra_io::Result<()> {
            match wheel {
                Wheel::Left => self.powers.0 = percent,
                Wheel::Right => self.powers.1 = percent,
            }
            Ok(())
        }
        fn reset_encoder(&mut self, _wheel: Wheel) -> yantra_io::Result<()> {
            Ok(())
        }
        fn encoder_ticks(&mut self, _wheel: Wheel) -> yantra_io::Result<i32> {
            Ok(0)
        }
        fn calibrate_gyro(&mut self, _duration: Duration) -> yantra_io::Result<()> {
            Ok(())
        }
        fn yaw_degrees(&mut self) -> yantra_io::Result<f32> {
            Ok(0.0)
        }
        fn left_range(&mut self) -> yantra_io::Result<f32> {
            Ok(100.0)
        }
        fn right_range(&mut self) -> yantra_io::Result<f32> {
            Ok(100.0)
        }
        fn forward_range(&mut self) -> yantra_io::Result<f32> {
            Ok(100.0)
        }
        fn wait(&mut self, _period: Duration) {}
    }

    #[test]
    fn test_drive_timeout_stops_motors() {
        let mut hw = DeadPlatform { powers: (0.0, 0.0) };
        let probe = OccupancyProbe::new(33.0, 33.0, 40.0);
        let err = controller().drive_forward(&mut hw, &probe, 0).unwrap_err();
        assert!(matches!(err, NavError::MotionTimeout(_)), "{err:?}");
        assert_eq!(hw.powers, (0.0, 0.0));
    }

    #[test]
    fn test_rotate_timeout_stops_motors() {
        let mut hw = DeadPlatform { powers: (0.0, 0.0) };
        let err = controller().rotate_in_place(&mut hw, 90, 0).unwrap_err();
        assert!(matches!(err, NavError::MotionTimeout(_)), "{err:?}");
        assert_eq!(hw.powers, (0.0, 0.0));
    }
}
