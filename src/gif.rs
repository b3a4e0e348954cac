use std::path::Path;

use anyhow::Result;

use crate::render::Frame;

/// Persists recorded frames as a looping animated GIF played back at `fps`.
///
/// Compiled under the `gif-export` feature (on by default). Without it the
/// function reports how to obtain the capability instead of failing the
/// whole run.
#[cfg(feature = "gif-export")]
pub fn save_frames_as_gif(frames: &[Frame], path: &Path, fps: u32) -> Result<()> {
    use anyhow::Context;
    use plotters::prelude::*;
    use plotters_backend::DrawingBackend;

    anyhow::ensure!(!frames.is_empty(), "no frames were captured");
    anyhow::ensure!(fps > 0, "playback rate must be positive, got {}", fps);

    let (width, height) = (frames[0].width, frames[0].height);
    let frame_delay = 1000 / fps;

    let mut backend = BitMapBackend::gif(path, (width, height), frame_delay)
        .with_context(|| format!("failed to create GIF encoder for {}", path.display()))?;

    for frame in frames {
        backend
            .blit_bitmap((0, 0), (frame.width, frame.height), &frame.buffer)
            .map_err(|e| anyhow::anyhow!("failed to encode GIF frame: {}", e))?;
        backend
            .present()
            .map_err(|e| anyhow::anyhow!("failed to write GIF frame: {}", e))?;
    }

    Ok(())
}

#[cfg(not(feature = "gif-export"))]
pub fn save_frames_as_gif(_frames: &[Frame], _path: &Path, _fps: u32) -> Result<()> {
    anyhow::bail!(
        "GIF export support is not compiled in; rebuild with `cargo build --features gif-export`"
    )
}

#[cfg(all(test, feature = "gif-export"))]
mod tests {
    use super::*;
    use crate::render::record_frames;
    use crate::simulation::Simulation;

    #[test]
    fn test_save_frames_as_gif_writes_file() {
        let mut sim = Simulation::new(100.0, 100.0, 30);
        sim.add_default_robot();
        let frames = record_frames(&mut sim, 5);

        let path = std::env::temp_dir().join("brownian_gif_test.gif");
        save_frames_as_gif(&frames, &path, 30).unwrap();

        let len = std::fs::metadata(&path).unwrap().len();
        assert!(len > 0);
        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_save_rejects_empty_capture() {
        let path = std::env::temp_dir().join("brownian_gif_empty.gif");
        assert!(save_frames_as_gif(&[], &path, 30).is_err());
    }

    #[test]
    fn test_save_rejects_zero_fps() {
        let mut sim = Simulation::new(50.0, 50.0, 31);
        sim.add_default_robot();
        let frames = record_frames(&mut sim, 1);

        let path = std::env::temp_dir().join("brownian_gif_zero_fps.gif");
        assert!(save_frames_as_gif(&frames, &path, 0).is_err());
    }
}
