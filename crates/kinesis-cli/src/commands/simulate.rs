use std::f64::consts::TAU;
use std::io::{self, Write};
use std::time::Duration;

use anyhow::Result;
use tracing::info;

use kinesis_core::{MotionConfig, Point, Viewport};
use kinesis_tui::page::Page;

/// Scripted headless run
#[derive(Debug, Clone)]
pub struct SimulateOptions {
    pub frames: u64,
    pub fps: u32,
    pub every: u64,
    pub realtime: bool,
    pub viewport: Viewport,
    pub seed: Option<u64>,
}

pub async fn run(config: &MotionConfig, options: &SimulateOptions) -> Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    simulate(config, options, &mut out).await?;
    out.flush()?;
    Ok(())
}

/// Run the scripted page and write one JSON line per sampled frame.
/// Returns the number of snapshots written.
pub async fn simulate<W: Write>(
    config: &MotionConfig,
    options: &SimulateOptions,
    out: &mut W,
) -> Result<u64> {
    let frame_ms = 1000.0 / options.fps.max(1) as f64;
    let every = options.every.max(1);

    let mut page = match options.seed {
        Some(seed) => Page::with_seed(config, options.viewport, seed)?,
        None => Page::new(config, options.viewport)?,
    };
    let bottom = page.layout().scrollable_height();
    let viewport = page.layout().viewport();

    let mut pacing = options
        .realtime
        .then(|| tokio::time::interval(Duration::from_secs_f64(frame_ms / 1000.0)));

    info!(
        frames = options.frames,
        fps = options.fps,
        width = viewport.width,
        height = viewport.height,
        "Starting simulation"
    );

    let mut written = 0;
    for frame in 0..options.frames {
        if let Some(interval) = pacing.as_mut() {
            interval.tick().await;
        }

        let t = if options.frames > 1 {
            frame as f64 / (options.frames - 1) as f64
        } else {
            0.0
        };
        page.scroll_to(scroll_script(t) * bottom);
        page.pointer_move(pointer_script(t, viewport));
        page.frame(frame as f64 * frame_ms);

        if frame % every == 0 || frame + 1 == options.frames {
            serde_json::to_writer(&mut *out, &page.snapshot())?;
            writeln!(out)?;
            written += 1;
        }
    }

    info!(snapshots = written, "Simulation finished");
    Ok(written)
}

/// Top of the page at 0, bottom at 0.5, back to the top at 1
fn scroll_script(t: f64) -> f64 {
    1.0 - (2.0 * t - 1.0).abs()
}

/// Lissajous sweep over the viewport
fn pointer_script(t: f64, viewport: Viewport) -> Point {
    let angle = t * TAU;
    Point::new(
        viewport.width * (0.5 + 0.4 * (3.0 * angle).sin()),
        viewport.height * (0.5 + 0.4 * (2.0 * angle).sin()),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options(frames: u64, every: u64) -> SimulateOptions {
        SimulateOptions {
            frames,
            fps: 60,
            every,
            realtime: false,
            viewport: Viewport::new(160.0, 96.0),
            seed: Some(7),
        }
    }

    fn lines(buf: &[u8]) -> Vec<serde_json::Value> {
        String::from_utf8_lossy(buf)
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect()
    }

    #[test]
    fn test_scroll_script_is_a_triangle() {
        assert_eq!(scroll_script(0.0), 0.0);
        assert_eq!(scroll_script(0.5), 1.0);
        assert_eq!(scroll_script(1.0), 0.0);
        assert_eq!(scroll_script(0.25), 0.5);
    }

    #[test]
    fn test_pointer_script_stays_inside_viewport() {
        let viewport = Viewport::new(160.0, 96.0);
        for i in 0..=100 {
            let p = pointer_script(i as f64 / 100.0, viewport);
            assert!(p.x >= 0.0 && p.x <= viewport.width);
            assert!(p.y >= 0.0 && p.y <= viewport.height);
        }
    }

    #[tokio::test]
    async fn test_simulate_samples_frames() {
        let mut buf = Vec::new();
        let written = simulate(&MotionConfig::default(), &options(121, 30), &mut buf)
            .await
            .unwrap();
        assert_eq!(written, 5);

        let snapshots = lines(&buf);
        assert_eq!(snapshots.len(), 5);
        assert_eq!(snapshots[0]["frame"], 1);
        assert_eq!(snapshots[2]["scroll"]["global_progress"], 1.0);
        assert_eq!(snapshots[4]["scroll"]["global_progress"], 0.0);
        assert_eq!(snapshots[4]["counters"].as_array().map(Vec::len), Some(4));
        assert!(snapshots[4]["cursor"].is_object());
        // Mid-sweep the smoothed offset trails the scripted target
        assert_eq!(snapshots[1]["gliding"], true);
    }

    #[tokio::test]
    async fn test_simulate_single_frame() {
        let mut buf = Vec::new();
        let written = simulate(&MotionConfig::default(), &options(1, 30), &mut buf)
            .await
            .unwrap();
        assert_eq!(written, 1);
        assert_eq!(lines(&buf)[0]["scramble"].as_str().map(|s| s.chars().count()), Some(11));
    }

    #[tokio::test(start_paused = true)]
    async fn test_simulate_realtime_paces_frames() {
        let mut opts = options(30, 10);
        opts.realtime = true;
        let start = tokio::time::Instant::now();
        let mut buf = Vec::new();
        let written = simulate(&MotionConfig::default(), &opts, &mut buf).await.unwrap();
        assert_eq!(written, 4);
        assert!(start.elapsed() >= Duration::from_millis(400));
    }
}
