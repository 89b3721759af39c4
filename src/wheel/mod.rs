//! Wheel geometry, rendering and winner resolution.
//!
//! - [`layout_segments`]: one colored, labeled slice per participant
//! - [`WheelRenderer`]: draws a frame at an arbitrary rotation
//! - [`resolve_winner`]: maps a settled rotation to the slice under the pointer

mod layout;
mod renderer;
mod resolve;

pub use layout::{
    font_size_for, layout_segments, segment_color, text_radius_for, wrap_label, LabelLines,
    Segment, SegmentCache, LARGE_FONT_SIZE, MAX_ADAPTIVE_FONT_SIZE, MEDIUM_FONT_SIZE,
    WRAP_IMBALANCE, WRAP_THRESHOLD,
};
pub use renderer::WheelRenderer;
pub use resolve::{normalize_degrees, resolve_winner, POINTER_ANGLE_DEGREES};
