//! Segment layout: angles, colors, font sizes and label placement.

use crate::config::WHEEL_PALETTE;
use crate::error::{Result, WheelError};
use crate::roster::Roster;
use image::Rgba;
use std::f32::consts::TAU;

/// Font size used when the wheel has at most five segments.
pub const LARGE_FONT_SIZE: f32 = 24.0;
/// Font size used for six to ten segments.
pub const MEDIUM_FONT_SIZE: f32 = 18.0;
/// Ceiling for the adaptive font size on crowded wheels.
pub const MAX_ADAPTIVE_FONT_SIZE: f32 = 20.0;
/// Labels longer than this (in characters) wrap onto two lines.
pub const WRAP_THRESHOLD: usize = 12;
/// Second line may exceed the first by at most this many characters.
pub const WRAP_IMBALANCE: usize = 5;

/// Label text, either on one line or wrapped onto two.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LabelLines {
    Single(String),
    Double(String, String),
}

impl LabelLines {
    pub fn is_wrapped(&self) -> bool {
        matches!(self, Self::Double(..))
    }

    pub fn lines(&self) -> Vec<&str> {
        match self {
            Self::Single(line) => vec![line.as_str()],
            Self::Double(first, second) => vec![first.as_str(), second.as_str()],
        }
    }
}

/// One angular slice of the wheel.
#[derive(Debug, Clone, PartialEq)]
pub struct Segment {
    pub index: usize,
    pub label: String,
    /// Start angle in radians, wheel-local (rotation 0).
    pub start_angle: f32,
    pub end_angle: f32,
    pub color: Rgba<u8>,
    pub font_size: f32,
    /// Distance from the center to the label anchor.
    pub text_radius: f32,
    pub lines: LabelLines,
}

impl Segment {
    pub fn span(&self) -> f32 {
        self.end_angle - self.start_angle
    }

    /// Angle of the bisector.
    pub fn mid_angle(&self) -> f32 {
        self.start_angle + self.span() / 2.0
    }

    /// Each label line with its offset perpendicular to the bisector.
    ///
    /// Two-line labels sit at minus/plus half the font size so the pair is
    /// centered on the anchor.
    pub fn line_offsets(&self) -> Vec<(&str, f32)> {
        let lines = self.lines.lines();
        let middle = (lines.len() as f32 - 1.0) / 2.0;
        lines
            .into_iter()
            .enumerate()
            .map(|(i, line)| (line, (i as f32 - middle) * self.font_size))
            .collect()
    }
}

/// Fill color for segment `index`.
pub fn segment_color(index: usize) -> Rgba<u8> {
    WHEEL_PALETTE[index % WHEEL_PALETTE.len()]
}

/// Font size for a wheel of `count` segments whose longest label has
/// `max_label_len` characters.
pub fn font_size_for(count: usize, max_label_len: usize) -> f32 {
    match count {
        0..=5 => LARGE_FONT_SIZE,
        6..=10 => MEDIUM_FONT_SIZE,
        _ => MAX_ADAPTIVE_FONT_SIZE
            .min(300.0 / count as f32)
            .min(300.0 / max_label_len as f32),
    }
}

/// Label anchor distance from the center; thin segments push text outward.
pub fn text_radius_for(count: usize, radius: f32) -> f32 {
    if count >= 50 {
        radius - 50.0
    } else if count >= 20 {
        radius - 70.0
    } else if count >= 10 {
        radius - 60.0
    } else {
        radius - 95.0
    }
}

/// Wrap long labels onto two lines at whitespace.
pub fn wrap_label(label: &str) -> LabelLines {
    if label.chars().count() <= WRAP_THRESHOLD {
        return LabelLines::Single(label.to_string());
    }
    let tokens: Vec<&str> = label.split_whitespace().collect();
    if tokens.len() < 2 {
        return LabelLines::Single(label.to_string());
    }

    let first = tokens[0].to_string();
    let second = tokens[1..].join(" ");
    if second.chars().count() <= first.chars().count() + WRAP_IMBALANCE {
        return LabelLines::Double(first, second);
    }

    let mid = tokens.len() / 2;
    LabelLines::Double(tokens[..mid].join(" "), tokens[mid..].join(" "))
}

/// Lay out one segment per label, covering [0, 2π) in list order.
pub fn layout_segments<S: AsRef<str>>(labels: &[S], radius: f32) -> Result<Vec<Segment>> {
    let count = labels.len();
    if count == 0 {
        return Err(WheelError::NO_PARTICIPANTS);
    }

    let span = TAU / count as f32;
    let max_label_len = labels
        .iter()
        .map(|l| l.as_ref().chars().count())
        .max()
        .unwrap_or(0);
    let font_size = font_size_for(count, max_label_len);
    let text_radius = text_radius_for(count, radius);

    let segments = labels
        .iter()
        .enumerate()
        .map(|(index, label)| {
            let label = label.as_ref();
            let end_angle = if index + 1 == count {
                TAU
            } else {
                (index + 1) as f32 * span
            };
            Segment {
                index,
                label: label.to_string(),
                start_angle: index as f32 * span,
                end_angle,
                color: segment_color(index),
                font_size,
                text_radius,
                lines: wrap_label(label),
            }
        })
        .collect();

    Ok(segments)
}

/// Segment geometry tagged with the roster revision it was built from.
///
/// Any roster mutation bumps its revision, so a stale cache is rebuilt on the
/// next lookup rather than reused.
#[derive(Debug, Default)]
pub struct SegmentCache {
    revision: Option<u64>,
    radius: f32,
    segments: Vec<Segment>,
}

impl SegmentCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop cached geometry.
    pub fn invalidate(&mut self) {
        self.revision = None;
        self.segments.clear();
    }

    pub fn is_valid_for(&self, roster: &Roster, radius: f32) -> bool {
        self.revision == Some(roster.revision()) && self.radius == radius
    }

    /// Segments for the roster, rebuilding when the roster changed.
    pub fn segments(&mut self, roster: &Roster, radius: f32) -> Result<&[Segment]> {
        if !self.is_valid_for(roster, radius) {
            self.segments = layout_segments(roster.labels(), radius)?;
            self.revision = Some(roster.revision());
            self.radius = radius;
            log::debug!(
                "Laid out {} segments (revision {})",
                self.segments.len(),
                roster.revision()
            );
        }
        Ok(&self.segments)
    }
}
