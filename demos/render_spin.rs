//! Example: Spin the wheel headlessly and save the settled frame.
//!
//! Simulates a 60 fps host driving the widget until the spin settles, then
//! writes the wheel and the first celebration frame as PNG files.
//!
//! Run with:
//!     cargo run --example render_spin [config.json]
//!
//! Labels use `font_path` from the config, or the bundled Fira Mono subset.

use anyhow::Context;
use prize_wheel::{PixmapCanvas, PrizeWheel, WheelConfig, WheelEvent};
use std::path::{Path, PathBuf};

const FRAME_MS: f64 = 1000.0 / 60.0;

/// OFL font shipped with the test fixtures, used when the config names none.
const BUNDLED_FONT: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fonts/FiraMono-subset.ttf");

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    println!("Prize Wheel - Headless Spin Example");
    println!("===================================\n");

    let config = match std::env::args().nth(1) {
        Some(path) => WheelConfig::from_json_file(&path)
            .with_context(|| format!("failed to load config from {}", path))?,
        None => WheelConfig {
            seed: Some(2024),
            ..WheelConfig::default()
        },
    };

    let mut wheel_canvas = PixmapCanvas::new(config.wheel_size, config.wheel_size)?;
    let mut overlay_canvas = PixmapCanvas::new(config.overlay_width, config.overlay_height)?;
    let font_path = config
        .font_path
        .clone()
        .unwrap_or_else(|| PathBuf::from(BUNDLED_FONT));
    wheel_canvas = wheel_canvas
        .with_font_file(&font_path)
        .with_context(|| format!("failed to load font {}", font_path.display()))?;
    println!("Label font: {}", font_path.display());

    let mut wheel = PrizeWheel::new(config.clone());
    println!("Participants: {}", wheel.roster().len());
    println!("Spin duration: {} ms", config.spin_duration_ms);

    wheel.start_idle()?;
    let mut now = 0.0;
    for _ in 0..30 {
        wheel.frame(now, Some(&mut wheel_canvas), Some(&mut overlay_canvas));
        now += FRAME_MS;
    }

    wheel.spin(now)?;
    let mut frames = 0usize;
    let winner = loop {
        let events = wheel.frame(now, Some(&mut wheel_canvas), Some(&mut overlay_canvas));
        frames += 1;
        let settled = events.into_iter().find_map(|event| match event {
            WheelEvent::SpinSettled {
                index,
                label,
                angle_degrees,
            } => Some((index, label, angle_degrees)),
            _ => None,
        });
        if let Some(winner) = settled {
            break winner;
        }
        now += FRAME_MS;
    };

    // One more frame so the overlay shows its first confetti.
    now += FRAME_MS;
    wheel.frame(now, Some(&mut wheel_canvas), Some(&mut overlay_canvas));

    let (index, label, angle) = winner;
    println!("\nSettled after {} frames ({:.0} ms)", frames, now);
    println!("  Final angle: {:.2} degrees", angle);
    println!("  Winner: #{} {}", index, label);

    let wheel_path = Path::new("wheel_settled.png");
    let overlay_path = Path::new("celebration.png");
    wheel_canvas.save_png(wheel_path)?;
    overlay_canvas.save_png(overlay_path)?;
    println!("\nWrote {} and {}", wheel_path.display(), overlay_path.display());

    wheel.teardown();
    Ok(())
}
