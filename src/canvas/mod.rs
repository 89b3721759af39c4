//! Drawing surfaces.
//!
//! The wheel and the celebration overlay draw through the [`Canvas`] trait:
//! - [`PixmapCanvas`]: CPU raster into an RGBA image, labels via `ab_glyph`
//! - [`CommandRecorder`]: records draw calls, used by tests

mod pixmap;

pub use pixmap::PixmapCanvas;

use image::Rgba;

/// A 2D drawing surface of fixed pixel dimensions.
///
/// Angles are in radians, measured clockwise from the +x axis (screen
/// coordinates, y pointing down).
pub trait Canvas {
    /// Surface size in pixels.
    fn size(&self) -> (u32, u32);

    /// Reset every pixel to the surface background.
    fn clear(&mut self);

    /// Fill a pie wedge from `center` between `start_angle` and `end_angle`.
    fn fill_wedge(
        &mut self,
        center: [f32; 2],
        radius: f32,
        start_angle: f32,
        end_angle: f32,
        color: Rgba<u8>,
    );

    fn fill_circle(&mut self, center: [f32; 2], radius: f32, color: Rgba<u8>);

    /// Draw a single line of text centered on `anchor`, rotated about it.
    fn fill_text(
        &mut self,
        text: &str,
        anchor: [f32; 2],
        rotation: f32,
        font_size: f32,
        color: Rgba<u8>,
    );
}

/// Recorded draw command for testing.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Clear,
    Wedge {
        center: [f32; 2],
        radius: f32,
        start_angle: f32,
        end_angle: f32,
        color: Rgba<u8>,
    },
    Circle {
        center: [f32; 2],
        radius: f32,
        color: Rgba<u8>,
    },
    Text {
        text: String,
        anchor: [f32; 2],
        rotation: f32,
        font_size: f32,
        color: Rgba<u8>,
    },
}

/// A mock canvas that records draw commands instead of rasterizing.
#[derive(Debug, Clone)]
pub struct CommandRecorder {
    commands: Vec<DrawCommand>,
    width: u32,
    height: u32,
}

impl CommandRecorder {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            commands: Vec::new(),
            width,
            height,
        }
    }

    /// Get all recorded commands.
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Clear recorded commands.
    pub fn clear_commands(&mut self) {
        self.commands.clear();
    }

    /// Number of frames drawn (each frame starts with a clear).
    pub fn frame_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Clear))
            .count()
    }

    /// Commands issued since the most recent clear.
    pub fn last_frame(&self) -> &[DrawCommand] {
        let start = self
            .commands
            .iter()
            .rposition(|c| matches!(c, DrawCommand::Clear))
            .unwrap_or(0);
        &self.commands[start..]
    }

    /// Wedges issued since the most recent clear.
    pub fn last_frame_wedges(&self) -> Vec<&DrawCommand> {
        self.last_frame()
            .iter()
            .filter(|c| matches!(c, DrawCommand::Wedge { .. }))
            .collect()
    }

    /// Text strings issued since the most recent clear.
    pub fn last_frame_texts(&self) -> Vec<&str> {
        self.last_frame()
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }
}

impl Canvas for CommandRecorder {
    fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn clear(&mut self) {
        self.commands.push(DrawCommand::Clear);
    }

    fn fill_wedge(
        &mut self,
        center: [f32; 2],
        radius: f32,
        start_angle: f32,
        end_angle: f32,
        color: Rgba<u8>,
    ) {
        self.commands.push(DrawCommand::Wedge {
            center,
            radius,
            start_angle,
            end_angle,
            color,
        });
    }

    fn fill_circle(&mut self, center: [f32; 2], radius: f32, color: Rgba<u8>) {
        self.commands.push(DrawCommand::Circle {
            center,
            radius,
            color,
        });
    }

    fn fill_text(
        &mut self,
        text: &str,
        anchor: [f32; 2],
        rotation: f32,
        font_size: f32,
        color: Rgba<u8>,
    ) {
        self.commands.push(DrawCommand::Text {
            text: text.to_string(),
            anchor,
            rotation,
            font_size,
            color,
        });
    }
}
