use plotters::coord::Shift;
use plotters::prelude::*;
use tracing::debug;

use crate::simulation::Simulation;

/// One rendered frame as a raw RGB888 buffer, row-major.
#[derive(Clone, PartialEq)]
pub struct Frame {
    pub width: u32,
    pub height: u32,
    pub buffer: Vec<u8>,
}

impl Frame {
    /// Packs the RGB bytes into the 0RGB u32 layout expected by minifb.
    pub fn to_argb(&self) -> Vec<u32> {
        self.buffer
            .chunks_exact(3)
            .map(|px| ((px[0] as u32) << 16) | ((px[1] as u32) << 8) | px[2] as u32)
            .collect()
    }
}

/// Draws the whole scene: background, arena border, fading trails, robots
/// and the status overlay.
pub fn draw(sim: &Simulation, area: &DrawingArea<BitMapBackend, Shift>) {
    area.fill(&WHITE).unwrap();

    let w = sim.width as i32;
    let h = sim.height as i32;
    area.draw(&Rectangle::new([(0, 0), (w - 1, h - 1)], BLACK.stroke_width(2)))
        .unwrap();

    for robot in &sim.robots {
        if sim.show_trails && !robot.trail().is_empty() {
            let len = robot.trail().len();
            for (i, &(tx, ty)) in robot.trail().iter().enumerate() {
                // Oldest entries are the most transparent.
                let alpha = i as f64 / len as f64;
                area.draw(&Circle::new((tx, ty), 1, robot.color.mix(alpha).filled()))
                    .unwrap();
            }
        }

        area.draw(&Circle::new(
            (robot.x as i32, robot.y as i32),
            robot.radius as i32,
            robot.color.filled(),
        ))
        .unwrap();
    }

    // Text rendering needs a system font; headless machines may not have
    // one, and the overlay is not part of the simulation contract.
    if let Err(e) = draw_status_text(sim, area) {
        debug!("skipping status overlay: {}", e);
    }
}

fn draw_status_text(
    sim: &Simulation,
    area: &DrawingArea<BitMapBackend, Shift>,
) -> Result<(), Box<dyn std::error::Error>> {
    let trail_status = if sim.show_trails { "ON" } else { "OFF" };
    area.draw(&Text::new(
        format!("Trails: {} (T to toggle)", trail_status),
        (10, 10),
        ("sans-serif", 24),
    ))?;
    area.draw(&Text::new(
        format!("Robots: {} (R to add)", sim.robots.len()),
        (10, 40),
        ("sans-serif", 24),
    ))?;
    area.draw(&Text::new("C to clear trails", (10, 70), ("sans-serif", 24)))?;
    Ok(())
}

/// Renders the current simulation state into an in-memory frame.
pub fn render_frame(sim: &Simulation) -> Frame {
    let width = sim.width as u32;
    let height = sim.height as u32;
    let mut buffer = vec![0u8; (width * height * 3) as usize];

    {
        let area = BitMapBackend::with_buffer(&mut buffer, (width, height)).into_drawing_area();
        draw(sim, &area);
        area.present().unwrap();
    }

    Frame {
        width,
        height,
        buffer,
    }
}

/// The recording loop: the same tick/render progression as the interactive
/// loop, minus input handling and rate capping. Collects exactly `count`
/// frames, one per tick, in order.
pub fn record_frames(sim: &mut Simulation, count: usize) -> Vec<Frame> {
    let mut frames = Vec::with_capacity(count);
    for _ in 0..count {
        sim.tick(1.0);
        frames.push(render_frame(sim));
    }
    frames
}
