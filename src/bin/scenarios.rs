//! Generates a set of demonstration GIFs covering different simulator
//! configurations, one file per scenario under `output_gifs/`.

use std::path::PathBuf;

use anyhow::Result;
use rand::Rng;
use tracing::info;

use brownian::prelude::*;

struct Scenario {
    name: &'static str,
    width: u32,
    height: u32,
    robots: u32,
    trails: bool,
    trail_length: usize,
    frames: usize,
}

const SCENARIOS: [Scenario; 5] = [
    Scenario {
        name: "single_robot",
        width: 800,
        height: 800,
        robots: 1,
        trails: true,
        trail_length: 100,
        frames: 300,
    },
    Scenario {
        name: "multiple_robots",
        width: 800,
        height: 800,
        robots: 5,
        trails: true,
        trail_length: 50,
        frames: 300,
    },
    Scenario {
        name: "no_trails",
        width: 800,
        height: 800,
        robots: 3,
        trails: false,
        trail_length: 100,
        frames: 300,
    },
    Scenario {
        name: "long_trails",
        width: 800,
        height: 800,
        robots: 2,
        trails: true,
        trail_length: 500,
        frames: 450,
    },
    Scenario {
        name: "small_arena",
        width: 400,
        height: 400,
        robots: 3,
        trails: true,
        trail_length: 100,
        frames: 300,
    },
];

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let output_dir = PathBuf::from("output_gifs");
    std::fs::create_dir_all(&output_dir)?;

    for scenario in &SCENARIOS {
        info!("generating {} GIF...", scenario.name);

        let seed = rand::thread_rng().gen();
        let mut sim = Simulation::new(scenario.width as f32, scenario.height as f32, seed);
        sim.show_trails = scenario.trails;
        for _ in 0..scenario.robots {
            sim.add_random_robot();
        }
        sim.set_trail_length(scenario.trail_length);

        let frames = record_frames(&mut sim, scenario.frames);
        let path = output_dir.join(format!("{}.gif", scenario.name));
        save_frames_as_gif(&frames, &path, 60)?;
        info!("generated {}", path.display());
    }

    info!("all GIFs generated successfully");
    Ok(())
}
