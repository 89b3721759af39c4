//! Widget configuration.

use crate::animation::CelebrationConfig;
use crate::error::Result;
use image::Rgba;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Wheel fill colors, assigned by `index mod 4` (red, blue, green, yellow).
pub const WHEEL_PALETTE: [Rgba<u8>; 4] = [
    Rgba([0xC4, 0x0C, 0x0C, 0xFF]),
    Rgba([0x5B, 0x99, 0xC2, 0xFF]),
    Rgba([0x05, 0x92, 0x12, 0xFF]),
    Rgba([0xF4, 0xCE, 0x14, 0xFF]),
];

/// Confetti colors for the celebration overlay.
pub const CONFETTI_PALETTE: [Rgba<u8>; 5] = [
    Rgba([0xF3, 0x9C, 0x12, 0xFF]),
    Rgba([0xE7, 0x4C, 0x3C, 0xFF]),
    Rgba([0x9B, 0x59, 0xB6, 0xFF]),
    Rgba([0x2E, 0xCC, 0x71, 0xFF]),
    Rgba([0x34, 0x98, 0xDB, 0xFF]),
];

pub const LABEL_COLOR: Rgba<u8> = Rgba([0xFF, 0xFF, 0xFF, 0xFF]);
pub const HUB_COLOR: Rgba<u8> = Rgba([0xFF, 0xFF, 0xFF, 0xFF]);

/// Configuration for a [`PrizeWheel`](crate::PrizeWheel).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WheelConfig {
    /// Wheel surface edge length in pixels (the surface is square).
    pub wheel_size: u32,
    pub overlay_width: u32,
    pub overlay_height: u32,
    /// Wall-clock length of a spin in milliseconds.
    pub spin_duration_ms: f64,
    /// Guaranteed rotation before the random remainder, in degrees.
    pub base_rotation_degrees: f64,
    /// Upper bound (exclusive) of the random remainder, in degrees.
    pub random_rotation_degrees: f64,
    /// Idle rotation step per frame in radians.
    pub idle_step: f32,
    pub celebration_ms: f64,
    pub particle_count: usize,
    /// Seconds the winner has to claim the prize.
    pub claim_seconds: u32,
    /// Fixed RNG seed; entropy is used when absent.
    pub seed: Option<u64>,
    /// TrueType/OpenType font used for labels by the pixel canvas.
    pub font_path: Option<PathBuf>,
    /// Restart the idle rotation when the result dialog is dismissed.
    pub resume_idle_after_dismiss: bool,
}

impl Default for WheelConfig {
    fn default() -> Self {
        Self {
            wheel_size: 550,
            overlay_width: 1320,
            overlay_height: 580,
            spin_duration_ms: 10_000.0,
            base_rotation_degrees: 1800.0,
            random_rotation_degrees: 360.0,
            idle_step: 0.01,
            celebration_ms: 3000.0,
            particle_count: 100,
            claim_seconds: 60,
            seed: None,
            font_path: None,
            resume_idle_after_dismiss: true,
        }
    }
}

impl WheelConfig {
    /// Parse a configuration from JSON; missing fields take their defaults.
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a configuration from a JSON file.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let text = std::fs::read_to_string(path.as_ref())?;
        Self::from_json_str(&text)
    }

    /// Wheel radius in pixels.
    pub fn radius(&self) -> f32 {
        self.wheel_size as f32 / 2.0
    }

    /// Convert to the celebration overlay configuration.
    pub fn to_celebration_config(&self) -> CelebrationConfig {
        CelebrationConfig {
            width: self.overlay_width as f32,
            height: self.overlay_height as f32,
            particle_count: self.particle_count,
        }
    }
}

/// Parse hex color to RGBA (accepts 6-char RGB or 8-char RGBA).
pub fn parse_hex_color(hex: &str) -> Option<Rgba<u8>> {
    let hex = hex.trim_start_matches('#');
    if (hex.len() != 6 && hex.len() != 8) || !hex.is_ascii() {
        return None;
    }
    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    let a = if hex.len() == 8 {
        u8::from_str_radix(&hex[6..8], 16).ok()?
    } else {
        0xFF
    };
    Some(Rgba([r, g, b, a]))
}
