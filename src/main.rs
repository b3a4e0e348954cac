use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use minifb::{Key, KeyRepeat, Window, WindowOptions};
use rand::Rng;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use brownian::prelude::*;

/// Brownian motion robot simulator.
#[derive(Parser)]
#[command(name = "brownian")]
#[command(about = "Brownian motion robot simulator")]
struct Args {
    /// Width of the arena in pixels
    #[arg(long, default_value_t = 800)]
    width: u32,

    /// Height of the arena in pixels
    #[arg(long, default_value_t = 800)]
    height: u32,

    /// Number of robots to spawn at startup
    #[arg(long, default_value_t = 1)]
    robots: u32,

    /// Show motion trails
    #[arg(long)]
    trails: bool,

    /// Maximum trail length in positions
    #[arg(long, default_value_t = 100)]
    trail_length: usize,

    /// Target frame rate
    #[arg(long, default_value_t = 60)]
    fps: u32,

    /// Record frames and save them as a GIF instead of opening a window
    #[arg(long)]
    record: bool,

    /// Number of frames to record
    #[arg(long, default_value_t = 300)]
    frames: usize,

    /// Output path for the recorded GIF
    #[arg(long, default_value = "brownian_motion.gif")]
    output: PathBuf,

    /// Seed for all randomness; a run with the same seed replays exactly
    #[arg(long)]
    seed: Option<u64>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();
    anyhow::ensure!(args.width > 0 && args.height > 0, "arena dimensions must be positive");
    anyhow::ensure!(args.fps > 0, "frame rate must be positive");
    anyhow::ensure!(args.trail_length > 0, "trail length must be positive");

    let seed = args.seed.unwrap_or_else(|| rand::thread_rng().gen());
    info!("seed: {}", seed);

    let mut sim = Simulation::new(args.width as f32, args.height as f32, seed);
    sim.show_trails = args.trails;
    for _ in 0..args.robots {
        sim.add_random_robot();
    }
    sim.set_trail_length(args.trail_length);

    if args.record {
        run_recording(sim, &args)
    } else {
        run_interactive(sim, args.fps)
    }
}

/// Interactive loop: poll input, tick, render, present, capped to `fps`.
/// `delta_time` is always 1.0 per frame, so the simulation speed rides on
/// the achieved frame rate rather than on wall-clock time.
fn run_interactive(mut sim: Simulation, fps: u32) -> Result<()> {
    let width = sim.width as usize;
    let height = sim.height as usize;

    let mut window = Window::new(
        "Brownian Motion Simulator",
        width,
        height,
        WindowOptions::default(),
    )
    .map_err(|e| anyhow::anyhow!("window creation failed: {}", e))?;
    window.limit_update_rate(Some(Duration::from_secs_f64(1.0 / fps as f64)));

    while window.is_open() && !window.is_key_down(Key::Escape) {
        if window.is_key_pressed(Key::T, KeyRepeat::No) {
            sim.toggle_trails();
        }
        if window.is_key_pressed(Key::R, KeyRepeat::No) {
            sim.add_default_robot();
        }
        if window.is_key_pressed(Key::C, KeyRepeat::No) {
            sim.clear_trails();
        }

        sim.tick(1.0);
        let frame = render_frame(&sim);
        window
            .update_with_buffer(&frame.to_argb(), width, height)
            .map_err(|e| anyhow::anyhow!("failed to present frame: {}", e))?;
    }

    Ok(())
}

fn run_recording(mut sim: Simulation, args: &Args) -> Result<()> {
    info!("recording {} frames...", args.frames);
    let frames = record_frames(&mut sim, args.frames);

    // A failed export is reported but never discards the completed run.
    match save_frames_as_gif(&frames, &args.output, args.fps) {
        Ok(()) => info!("GIF saved as {}", args.output.display()),
        Err(e) => warn!("could not save GIF: {:#}", e),
    }

    Ok(())
}
