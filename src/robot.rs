use std::collections::VecDeque;
use std::f32::consts::PI;

use plotters::style::RGBColor;
use rand::rngs::StdRng;
use rand_distr::{Distribution, Uniform};

pub const DEFAULT_RADIUS: f32 = 10.0;
pub const DEFAULT_SPEED: f32 = 2.0;
pub const DEFAULT_TRAIL_LENGTH: usize = 100;

// Angular rate while recovering from a wall hit, radians per unit delta_time.
const REFLECTION_SPIN_RATE: f32 = PI / 32.0;

/// A circular robot performing Brownian-like motion inside a rectangular
/// arena. The robot moves in a straight line until its next step would touch
/// a wall, then freezes in place and spins for a random number of ticks
/// before resuming on a roughly reversed heading.
#[derive(Clone)]
pub struct Robot {
    pub x: f32,
    pub y: f32,
    pub radius: f32,
    pub speed: f32,
    pub heading: f32,
    pub color: RGBColor,
    reflecting: bool,
    reflect_elapsed: f32,
    reflect_duration: f32,
    trail: VecDeque<(i32, i32)>,
    max_trail_length: usize,
    rng: StdRng,
}

impl Robot {
    /// Every robot owns its randomness source, so a trajectory is fully
    /// determined by the constructor arguments and the rng seed.
    pub fn new(x: f32, y: f32, radius: f32, speed: f32, color: RGBColor, rng: StdRng) -> Self {
        assert!(radius > 0.0, "robot radius must be positive, got {}", radius);
        assert!(speed > 0.0, "robot speed must be positive, got {}", speed);

        Robot {
            x,
            y,
            radius,
            speed,
            heading: 0.0,
            color,
            reflecting: false,
            reflect_elapsed: 0.0,
            reflect_duration: 0.0,
            trail: VecDeque::new(),
            max_trail_length: DEFAULT_TRAIL_LENGTH,
            rng,
        }
    }

    pub fn is_reflecting(&self) -> bool {
        self.reflecting
    }

    pub fn trail(&self) -> &VecDeque<(i32, i32)> {
        &self.trail
    }

    pub fn max_trail_length(&self) -> usize {
        self.max_trail_length
    }

    /// Advances the robot by one step of `delta_time`.
    ///
    /// While reflecting, the position stays frozen and only the heading
    /// advances. Otherwise the robot takes a straight-line step unless that
    /// step would push it into a wall, in which case the step is discarded
    /// and a reflection maneuver starts. The position is deliberately not
    /// clamped to the boundary on contact.
    pub fn update(&mut self, arena_width: f32, arena_height: f32, delta_time: f32) {
        if self.reflecting {
            self.reflect_elapsed += delta_time;
            if self.reflect_elapsed >= self.reflect_duration {
                self.reflecting = false;
            } else {
                self.heading += REFLECTION_SPIN_RATE * delta_time;
            }
        } else {
            let next_x = self.x + self.speed * self.heading.cos() * delta_time;
            let next_y = self.y + self.speed * self.heading.sin() * delta_time;

            // Each axis is tested independently; either one alone triggers
            // the maneuver.
            let hits_x = next_x - self.radius < 0.0 || next_x + self.radius > arena_width;
            let hits_y = next_y - self.radius < 0.0 || next_y + self.radius > arena_height;

            if hits_x || hits_y {
                self.start_reflection();
            } else {
                self.x = next_x;
                self.y = next_y;

                self.trail.push_back((self.x as i32, self.y as i32));
                if self.trail.len() > self.max_trail_length {
                    self.trail.pop_front();
                }
            }
        }
    }

    /// Freezes the robot and reverses its heading with up to 45 degrees of
    /// jitter. The spin lasts between 10 and 30 ticks.
    pub fn start_reflection(&mut self) {
        self.reflecting = true;
        self.reflect_elapsed = 0.0;
        self.reflect_duration = Uniform::new(10.0, 30.0).sample(&mut self.rng);
        self.heading += PI + Uniform::new(-PI / 4.0, PI / 4.0).sample(&mut self.rng);
    }

    /// Unlike the one-per-tick trim in `update`, this converges to the new
    /// bound immediately.
    pub fn set_trail_length(&mut self, length: usize) {
        self.max_trail_length = length;
        while self.trail.len() > self.max_trail_length {
            self.trail.pop_front();
        }
    }

    pub fn clear_trail(&mut self) {
        self.trail.clear();
    }
}
