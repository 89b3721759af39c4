//! Prize Wheel Core
//!
//! Rendering, spin animation and winner resolution for a prize wheel widget.
//!
//! # Features
//!
//! - Segment layout with adaptive label sizing and two-line wrapping
//! - Wheel rendering at arbitrary rotation through a [`Canvas`] abstraction
//! - CPU rasterization into `image` buffers with `ab_glyph` labels
//! - Idle rotation, eased fixed-duration spin and confetti overlay, all driven
//!   by an explicit frame scheduler
//! - Winner resolution against a fixed pointer, claim countdown and roster
//!   management with JSON name extraction

pub mod animation;
pub mod canvas;
pub mod config;
pub mod error;
pub mod roster;
pub mod wheel;
pub mod widget;

// Re-export commonly used types
pub use animation::{
    ease_out_quint, Celebration, CelebrationConfig, Countdown, CountdownEvent, FrameHandle,
    FrameOwner, FrameQueue, FrameScheduler, IdleRotation, SpinDriver, SpinPhase,
};
pub use canvas::{Canvas, CommandRecorder, DrawCommand, PixmapCanvas};
pub use config::{parse_hex_color, WheelConfig};
pub use error::{Result, WheelError};
pub use roster::{extract_names, Roster, DEFAULT_NAMES};
pub use wheel::{layout_segments, resolve_winner, Segment, SegmentCache, WheelRenderer};
pub use widget::{PrizeWheel, ResultDialog, WheelEvent};
