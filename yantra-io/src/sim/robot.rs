//! Differential-drive robot simulation inside a maze.

use super::config::{BodyConfig, SimConfig, SimNoiseConfig};
use super::noise::NoiseGenerator;
use crate::error::{Error, Result};
use crate::platform::{Platform, Wheel};
use std::f32::consts::PI;
use std::time::Duration;
use vyuha_map::pose::is_cardinal;
use vyuha_map::MazeGrid;

/// Physics integration substep, milliseconds.
const SUBSTEP_MS: u64 = 5;

/// Half-thickness of the wall collision band, millimeters.
const WALL_MARGIN: f32 = 20.0;

/// Rays within this distance of a boundary intersection also test the
/// corner post cell, millimeters.
const POST_MARGIN: f32 = 30.0;

/// Software robot implementing the full [`Platform`] boundary.
///
/// World frame: doubled grid index `i` maps to world coordinate
/// `i * cell_side / 2` millimeters, headings are continuous degrees with the
/// direction vector `(-sin, cos)`, matching the grid geometry where heading 0
/// advances +y. `wait()` advances simulated time only.
pub struct SimulatedRobot {
    grid: MazeGrid,
    body: BodyConfig,
    noise_cfg: SimNoiseConfig,
    noise: NoiseGenerator,
    ticks_per_mm: f32,

    x: f32,
    y: f32,
    heading: f32,
    yaw_origin: f32,
    gyro_drift: f32,

    power_left: f32,
    power_right: f32,
    enc_left: f32,
    enc_right: f32,
    offset_left: f32,
    offset_right: f32,

    elapsed: Duration,
}

impl SimulatedRobot {
    /// Create a simulator with the robot standing at the configured start
    /// cell center.
    pub fn new(grid: MazeGrid, config: SimConfig) -> Result<Self> {
        if !is_cardinal(config.start_heading) {
            return Err(Error::InvalidParameter(format!(
                "start heading {} is not a quarter turn",
                config.start_heading
            )));
        }
        let ix = 2 * config.start_cell_x - 1;
        let iy = 2 * config.start_cell_y - 1;
        if !grid.is_open(ix, iy) {
            return Err(Error::InvalidParameter(format!(
                "start cell ({}, {}) is not traversable",
                config.start_cell_x, config.start_cell_y
            )));
        }

        let half_cell = config.body.cell_side / 2.0;
        let ticks_per_mm = config.body.ticks_per_rev / (PI * config.body.wheel_diameter);

        log::debug!(
            "SimulatedRobot: start cell ({}, {}) heading {} seed {}",
            config.start_cell_x,
            config.start_cell_y,
            config.start_heading,
            config.seed
        );

        Ok(Self {
            grid,
            x: ix as f32 * half_cell,
            y: iy as f32 * half_cell,
            heading: config.start_heading as f32,
            yaw_origin: config.start_heading as f32,
            gyro_drift: 0.0,
            power_left: 0.0,
            power_right: 0.0,
            enc_left: 0.0,
            enc_right: 0.0,
            offset_left: 0.0,
            offset_right: 0.0,
            elapsed: Duration::ZERO,
            noise: NoiseGenerator::new(config.seed),
            ticks_per_mm,
            body: config.body,
            noise_cfg: config.noise,
        })
    }

    /// World position in millimeters.
    pub fn position_mm(&self) -> (f32, f32) {
        (self.x, self.y)
    }

    /// Continuous world heading in degrees.
    pub fn heading_deg(&self) -> f32 {
        self.heading
    }

    /// The maze cell the robot currently stands in, 1-based.
    pub fn current_cell(&self) -> (i32, i32) {
        (
            (self.x / self.body.cell_side).floor() as i32 + 1,
            (self.y / self.body.cell_side).floor() as i32 + 1,
        )
    }

    /// Total simulated time.
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    fn advance(&mut self, period: Duration) {
        let mut remaining = period.as_millis() as u64;
        while remaining >= SUBSTEP_MS {
            self.step(SUBSTEP_MS as f32 / 1000.0);
            remaining -= SUBSTEP_MS;
        }
        if remaining > 0 {
            self.step(remaining as f32 / 1000.0);
        }
    }

    fn step(&mut self, dt: f32) {
        let vl = self.power_left / 100.0 * self.body.max_wheel_speed;
        let vr = self.power_right / 100.0 * self.body.max_wheel_speed;

        // Wheel surface travel, with multiplicative slip
        let dl = vl * dt * (1.0 + self.noise.gaussian(self.noise_cfg.slip_stddev));
        let dr = vr * dt * (1.0 + self.noise.gaussian(self.noise_cfg.slip_stddev));

        // Encoders count the wheels, not the chassis; they keep counting
        // when the body is jammed against a wall.
        let jitter_l = if self.noise_cfg.quantization {
            self.noise.gaussian(0.5)
        } else {
            0.0
        };
        let jitter_r = if self.noise_cfg.quantization {
            self.noise.gaussian(0.5)
        } else {
            0.0
        };
        self.enc_left += dl * self.ticks_per_mm + jitter_l;
        self.enc_right += dr * self.ticks_per_mm + jitter_r;

        // Differential drive kinematics; midpoint heading for the translation
        let dtheta = (dl - dr) / self.body.track_width * (180.0 / PI);
        let travel = (dl + dr) / 2.0;
        let mid = (self.heading + dtheta / 2.0).to_radians();
        let nx = self.x - travel * mid.sin();
        let ny = self.y + travel * mid.cos();
        self.heading += dtheta;
        if !self.blocked_at(nx, ny) {
            self.x = nx;
            self.y = ny;
        }

        self.gyro_drift += self.noise_cfg.gyro_bias * dt;
        self.elapsed += Duration::from_secs_f32(dt);
    }

    /// Is the point inside a wall band of the lattice?
    fn blocked_at(&self, x: f32, y: f32) -> bool {
        let cell = self.body.cell_side;
        let vc = (x / cell).round();
        let hc = (y / cell).round();
        let near_v = (x - vc * cell).abs() <= WALL_MARGIN;
        let near_h = (y - hc * cell).abs() <= WALL_MARGIN;

        if near_v && near_h && !self.grid.is_open(2 * vc as i32, 2 * hc as i32) {
            return true;
        }
        if near_v {
            let iy = 2 * (y / cell).floor() as i32 + 1;
            if !self.grid.is_open(2 * vc as i32, iy) {
                return true;
            }
        }
        if near_h {
            let ix = 2 * (x / cell).floor() as i32 + 1;
            if !self.grid.is_open(ix, 2 * hc as i32) {
                return true;
            }
        }
        false
    }

    /// Distance to the first wall along an absolute direction, millimeters.
    ///
    /// Walks the boundary-line crossings of the ray in order and stops at the
    /// first crossing whose wall segment (or nearby corner post) is solid.
    /// Out-of-bounds lattice cells count as solid.
    fn cast_ray(&mut self, dir_deg: f32) -> f32 {
        let rad = dir_deg.to_radians();
        let (dx, dy) = (-rad.sin(), rad.cos());
        let cell = self.body.cell_side;
        let max = self.body.max_range;

        let mut t_v = first_crossing(self.x, dx, cell);
        let mut t_h = first_crossing(self.y, dy, cell);
        let step_v = if dx.abs() > 1e-6 {
            cell / dx.abs()
        } else {
            f32::INFINITY
        };
        let step_h = if dy.abs() > 1e-6 {
            cell / dy.abs()
        } else {
            f32::INFINITY
        };

        loop {
            let t = t_v.min(t_h);
            if t > max {
                return max;
            }
            let hx = self.x + t * dx;
            let hy = self.y + t * dy;
            if t_v <= t_h {
                // Crossing a vertical boundary line
                let c = (hx / cell).round() as i32;
                let r = (hy / cell).round();
                if (hy - r * cell).abs() <= POST_MARGIN
                    && !self.grid.is_open(2 * c, 2 * r as i32)
                {
                    return t;
                }
                let iy = 2 * (hy / cell).floor() as i32 + 1;
                if !self.grid.is_open(2 * c, iy) {
                    return t;
                }
                t_v += step_v;
            } else {
                // Crossing a horizontal boundary line
                let r = (hy / cell).round() as i32;
                let c = (hx / cell).round();
                if (hx - c * cell).abs() <= POST_MARGIN
                    && !self.grid.is_open(2 * c as i32, 2 * r)
                {
                    return t;
                }
                let ix = 2 * (hx / cell).floor() as i32 + 1;
                if !self.grid.is_open(ix, 2 * r) {
                    return t;
                }
                t_h += step_h;
            }
        }
    }

    fn range_reading(&mut self, dir_offset: f32, points_per_mm: f32) -> f32 {
        let distance = self.cast_ray(self.heading + dir_offset);
        let noise = self.noise.gaussian(self.noise_cfg.range_stddev);
        (distance * points_per_mm + noise).max(0.0)
    }
}

impl Platform for SimulatedRobot {
    fn set_motor_power(&mut self, wheel: Wheel, percent: f32) -> Result<()> {
        let clamped = percent.clamp(-100.0, 100.0);
        match wheel {
            Wheel::Left => self.power_left = clamped,
            Wheel::Right => self.power_right = clamped,
        }
        Ok(())
    }

    fn reset_encoder(&mut self, wheel: Wheel) -> Result<()> {
        match wheel {
            Wheel::Left => self.offset_left = self.enc_left,
            Wheel::Right => self.offset_right = self.enc_right,
        }
        Ok(())
    }

    fn encoder_ticks(&mut self, wheel: Wheel) -> Result<i32> {
        let ticks = match wheel {
            Wheel::Left => self.enc_left - self.offset_left,
            Wheel::Right => self.enc_right - self.offset_right,
        };
        Ok(ticks.round() as i32)
    }

    fn calibrate_gyro(&mut self, duration: Duration) -> Result<()> {
        self.advance(duration);
        self.yaw_origin = self.heading + self.gyro_drift;
        Ok(())
    }

    fn yaw_degrees(&mut self) -> Result<f32> {
        let raw = self.heading + self.gyro_drift - self.yaw_origin
            + self.noise.gaussian(self.noise_cfg.gyro_stddev);
        Ok(wrap_degrees(raw))
    }

    fn left_range(&mut self) -> Result<f32> {
        let scale = self.body.ir_points_per_mm;
        Ok(self.range_reading(-90.0, scale))
    }

    fn right_range(&mut self) -> Result<f32> {
        let scale = self.body.ir_points_per_mm;
        Ok(self.range_reading(90.0, scale))
    }

    fn forward_range(&mut self) -> Result<f32> {
        let scale = self.body.sonic_points_per_mm;
        Ok(self.range_reading(0.0, scale))
    }

    fn wait(&mut self, period: Duration) {
        self.advance(period);
    }
}

/// Ray parameter of the first boundary-line crossing along one axis.
fn first_crossing(origin: f32, d: f32, cell: f32) -> f32 {
    if d.abs() <= 1e-6 {
        return f32::INFINITY;
    }
    let line = if d > 0.0 {
        (origin / cell).floor() + 1.0
    } else {
        (origin / cell).ceil() - 1.0
    };
    (line * cell - origin) / d
}

/// Wrap degrees into (-180, 180].
fn wrap_degrees(angle: f32) -> f32 {
    let mut a = angle % 360.0;
    if a > 180.0 {
        a -= 360.0;
    } else if a <= -180.0 {
        a += 360.0;
    }
    a
}
