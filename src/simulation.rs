use plotters::style::RGBColor;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, Uniform};
use tracing::debug;

use crate::robot::{Robot, DEFAULT_RADIUS, DEFAULT_SPEED};

/// Owns the arena bounds and every robot in it. Robots are appended at
/// startup or at runtime and live for the rest of the run; only their trails
/// are ever cleared.
pub struct Simulation {
    pub width: f32,
    pub height: f32,
    pub robots: Vec<Robot>,
    pub show_trails: bool,
    pub steps: u64,
    rng: StdRng,
}

impl Simulation {
    pub fn new(width: f32, height: f32, seed: u64) -> Self {
        assert!(width > 0.0, "arena width must be positive, got {}", width);
        assert!(height > 0.0, "arena height must be positive, got {}", height);

        Simulation {
            width,
            height,
            robots: Vec::new(),
            show_trails: true,
            steps: 0,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn add_robot(&mut self, robot: Robot) {
        self.robots.push(robot);
    }

    /// Appends a robot at the center of the arena with default radius and
    /// speed and a freshly randomized color.
    pub fn add_default_robot(&mut self) {
        let x = self.width / 2.0;
        let y = self.height / 2.0;
        let color = self.random_color();
        let rng = self.child_rng();
        self.add_robot(Robot::new(x, y, DEFAULT_RADIUS, DEFAULT_SPEED, color, rng));
    }

    /// Appends a robot with jittered position and randomized radius, speed
    /// and color, as used for the startup population.
    pub fn add_random_robot(&mut self) {
        let x = self.width / 2.0 + self.rng.gen_range(-50.0..50.0);
        let y = self.height / 2.0 + self.rng.gen_range(-50.0..50.0);
        let radius = self.rng.gen_range(5.0..15.0);
        let speed = Uniform::new(1.5, 3.0).sample(&mut self.rng);
        let color = self.random_color();
        let rng = self.child_rng();
        self.add_robot(Robot::new(x, y, radius, speed, color, rng));
    }

    /// Advances every robot by `delta_time`, in insertion order. Robots do
    /// not interact, so the order only matters for trace reproducibility.
    pub fn tick(&mut self, delta_time: f32) {
        for robot in &mut self.robots {
            robot.update(self.width, self.height, delta_time);
        }
        self.steps += 1;
    }

    pub fn toggle_trails(&mut self) {
        self.show_trails = !self.show_trails;
        debug!("trails {}", if self.show_trails { "on" } else { "off" });
    }

    /// Applies the new bound to every robot; each robot still owns its own
    /// limit, so later additions keep the default.
    pub fn set_trail_length(&mut self, length: usize) {
        for robot in &mut self.robots {
            robot.set_trail_length(length);
        }
    }

    pub fn clear_trails(&mut self) {
        for robot in &mut self.robots {
            robot.clear_trail();
        }
    }

    fn random_color(&mut self) -> RGBColor {
        RGBColor(
            self.rng.gen_range(100..255),
            self.rng.gen_range(100..255),
            self.rng.gen_range(100..255),
        )
    }

    // Each robot gets its own rng, derived from the simulation seed, so a
    // run is reproducible while robots stay independent of update order.
    fn child_rng(&mut self) -> StdRng {
        StdRng::seed_from_u64(self.rng.gen())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use plotters::prelude::*;

    #[test]
    #[should_panic(expected = "width must be positive")]
    fn test_zero_width_rejected() {
        Simulation::new(0.0, 800.0, 0);
    }

    #[test]
    fn test_add_default_robot_is_centered() {
        let mut sim = Simulation::new(800.0, 600.0, 7);
        sim.add_default_robot();

        let robot = &sim.robots[0];
        assert_eq!(robot.x, 400.0);
        assert_eq!(robot.y, 300.0);
        assert_eq!(robot.radius, DEFAULT_RADIUS);
        assert_eq!(robot.speed, DEFAULT_SPEED);

        let RGBColor(r, g, b) = robot.color;
        for channel in [r, g, b] {
            assert!((100..255).contains(&channel));
        }
    }

    #[test]
    fn test_add_random_robot_within_jitter() {
        let mut sim = Simulation::new(800.0, 800.0, 8);
        for _ in 0..20 {
            sim.add_random_robot();
        }
        for robot in &sim.robots {
            assert!((robot.x - 400.0).abs() <= 50.0);
            assert!((robot.y - 400.0).abs() <= 50.0);
            assert!((5.0..15.0).contains(&robot.radius));
            assert!((1.5..3.0).contains(&robot.speed));
        }
    }

    #[test]
    fn test_tick_advances_all_robots_and_counts_steps() {
        let mut sim = Simulation::new(800.0, 800.0, 9);
        sim.add_default_robot();
        sim.add_default_robot();

        sim.tick(1.0);
        assert_eq!(sim.steps, 1);
        for robot in &sim.robots {
            assert_eq!(robot.trail().len(), 1);
        }
    }

    #[test]
    fn test_robots_keep_insertion_order() {
        let mut sim = Simulation::new(800.0, 800.0, 10);
        for radius in [3.0, 5.0, 7.0] {
            sim.add_robot(Robot::new(
                400.0,
                400.0,
                radius,
                2.0,
                RED,
                StdRng::seed_from_u64(radius as u64),
            ));
        }
        let radii: Vec<f32> = sim.robots.iter().map(|r| r.radius).collect();
        assert_eq!(radii, vec![3.0, 5.0, 7.0]);
    }

    #[test]
    fn test_update_order_does_not_affect_trajectories() {
        let make = |seed: u64, x: f32, y: f32| {
            Robot::new(x, y, 10.0, 2.0, GREEN, StdRng::seed_from_u64(seed))
        };

        let mut forward = Simulation::new(300.0, 300.0, 0);
        forward.add_robot(make(1, 100.0, 100.0));
        forward.add_robot(make(2, 200.0, 200.0));

        let mut reversed = Simulation::new(300.0, 300.0, 0);
        reversed.add_robot(make(2, 200.0, 200.0));
        reversed.add_robot(make(1, 100.0, 100.0));

        // Long enough for several wall reflections in a 300x300 arena.
        for _ in 0..500 {
            forward.tick(1.0);
            reversed.tick(1.0);
        }

        assert_eq!(forward.robots[0].x, reversed.robots[1].x);
        assert_eq!(forward.robots[0].y, reversed.robots[1].y);
        assert_eq!(forward.robots[1].x, reversed.robots[0].x);
        assert_eq!(forward.robots[1].y, reversed.robots[0].y);
    }

    #[test]
    fn test_toggle_trails() {
        let mut sim = Simulation::new(800.0, 800.0, 11);
        assert!(sim.show_trails);
        sim.toggle_trails();
        assert!(!sim.show_trails);
        sim.toggle_trails();
        assert!(sim.show_trails);
    }

    #[test]
    fn test_set_trail_length_applies_to_every_robot() {
        let mut sim = Simulation::new(2000.0, 2000.0, 12);
        sim.add_default_robot();
        sim.add_default_robot();
        for _ in 0..60 {
            sim.tick(1.0);
        }

        sim.set_trail_length(15);
        for robot in &sim.robots {
            assert_eq!(robot.trail().len(), 15);
            assert_eq!(robot.max_trail_length(), 15);
        }
    }

    #[test]
    fn test_clear_trails_empties_every_robot() {
        let mut sim = Simulation::new(2000.0, 2000.0, 13);
        sim.add_default_robot();
        sim.add_default_robot();
        for _ in 0..10 {
            sim.tick(1.0);
        }

        sim.clear_trails();
        for robot in &sim.robots {
            assert!(robot.trail().is_empty());
        }
    }
}
