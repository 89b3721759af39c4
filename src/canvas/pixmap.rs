//! CPU raster canvas backed by a `tiny_skia` pixmap.

use super::Canvas;
use crate::error::{Result, WheelError};
use ab_glyph::{Font, FontArc, ScaleFont};
use image::{Rgba, RgbaImage};
use std::f32::consts::{FRAC_PI_2, TAU};
use std::path::Path;
use tiny_skia::{
    Color, ColorU8, FillRule, FilterQuality, Paint, Path as SkPath, PathBuilder, Pixmap,
    PixmapPaint, Transform,
};

/// Software canvas; wedges and circles are filled as anti-aliased paths.
pub struct PixmapCanvas {
    pixmap: Pixmap,
    background: Rgba<u8>,
    font: Option<FontArc>,
    missing_font_logged: bool,
}

impl PixmapCanvas {
    /// Create a transparent canvas.
    pub fn new(width: u32, height: u32) -> Result<Self> {
        Self::with_background(width, height, Rgba([0, 0, 0, 0]))
    }

    pub fn with_background(width: u32, height: u32, background: Rgba<u8>) -> Result<Self> {
        let mut pixmap =
            Pixmap::new(width, height).ok_or(WheelError::InvalidSize { width, height })?;
        pixmap.fill(skia_color(background));
        Ok(Self {
            pixmap,
            background,
            font: None,
            missing_font_logged: false,
        })
    }

    /// Use the given font data for labels.
    pub fn with_font_bytes(mut self, data: Vec<u8>) -> Result<Self> {
        let font =
            FontArc::try_from_vec(data).map_err(|e| WheelError::Font(e.to_string()))?;
        self.font = Some(font);
        Ok(self)
    }

    /// Load a TrueType/OpenType font file for labels.
    pub fn with_font_file<P: AsRef<Path>>(self, path: P) -> Result<Self> {
        let data = std::fs::read(path.as_ref())?;
        log::debug!("Loaded label font from {}", path.as_ref().display());
        self.with_font_bytes(data)
    }

    pub fn has_font(&self) -> bool {
        self.font.is_some()
    }

    pub fn pixmap(&self) -> &Pixmap {
        &self.pixmap
    }

    /// Straight-alpha color at (x, y); transparent outside the surface.
    pub fn pixel(&self, x: u32, y: u32) -> Rgba<u8> {
        match self.pixmap.pixel(x, y) {
            Some(p) => {
                let c = p.demultiply();
                Rgba([c.red(), c.green(), c.blue(), c.alpha()])
            }
            None => Rgba([0, 0, 0, 0]),
        }
    }

    /// Premultiplied RGBA bytes of the current frame.
    pub fn data(&self) -> &[u8] {
        self.pixmap.data()
    }

    /// Copy of the current frame with straight alpha.
    pub fn to_rgba_image(&self) -> RgbaImage {
        RgbaImage::from_fn(self.pixmap.width(), self.pixmap.height(), |x, y| {
            self.pixel(x, y)
        })
    }

    /// Write the current frame as a PNG file.
    pub fn save_png<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        self.pixmap
            .save_png(path)
            .map_err(|e| WheelError::Encode(e.to_string()))
    }

    /// Render one line of text into a pixmap tinted with `color`.
    fn rasterize_text(
        &self,
        font: &FontArc,
        text: &str,
        size: f32,
        color: Rgba<u8>,
    ) -> Option<Pixmap> {
        let scaled = font.as_scaled(size);

        let mut width = 0.0f32;
        let mut prev = None;
        for ch in text.chars() {
            let id = scaled.glyph_id(ch);
            if let Some(p) = prev {
                width += scaled.kern(p, id);
            }
            width += scaled.h_advance(id);
            prev = Some(id);
        }

        let mask_w = width.ceil() as u32;
        let mask_h = (scaled.ascent() - scaled.descent()).ceil() as u32;
        let mut mask = Pixmap::new(mask_w, mask_h)?;
        let stride = mask_w as usize;
        let mut coverage = vec![0.0f32; stride * mask_h as usize];
        let mut cursor_x = 0.0f32;
        prev = None;

        for ch in text.chars() {
            let id = scaled.glyph_id(ch);
            if let Some(p) = prev {
                cursor_x += scaled.kern(p, id);
            }
            let mut glyph = id.with_scale(size);
            glyph.position = ab_glyph::point(cursor_x, scaled.ascent());
            if let Some(outlined) = font.outline_glyph(glyph) {
                let bounds = outlined.px_bounds();
                outlined.draw(|x, y, c| {
                    let px = bounds.min.x as i32 + x as i32;
                    let py = bounds.min.y as i32 + y as i32;
                    if px >= 0 && py >= 0 && (px as u32) < mask_w && (py as u32) < mask_h {
                        let idx = py as usize * stride + px as usize;
                        coverage[idx] = (coverage[idx] + c).min(1.0);
                    }
                });
            }
            cursor_x += scaled.h_advance(id);
            prev = Some(id);
        }

        let [r, g, b, a] = color.0;
        for (pixel, c) in mask.pixels_mut().iter_mut().zip(&coverage) {
            let alpha = (c * a as f32).round() as u8;
            *pixel = ColorU8::from_rgba(r, g, b, alpha).premultiply();
        }
        Some(mask)
    }
}

fn skia_color(color: Rgba<u8>) -> Color {
    let [r, g, b, a] = color.0;
    Color::from_rgba8(r, g, b, a)
}

fn solid(color: Rgba<u8>) -> Paint<'static> {
    let mut paint = Paint::default();
    paint.set_color(skia_color(color));
    paint.anti_alias = true;
    paint
}

/// Pie slice from `center`, approximating the arc with one cubic per quarter
/// turn or less. Spans within float noise of a full turn become a disc.
fn wedge_path(center: [f32; 2], radius: f32, start: f32, end: f32) -> Option<SkPath> {
    let span = end - start;
    if span <= 0.0 || radius <= 0.0 {
        return None;
    }
    let [cx, cy] = center;
    if span >= TAU - 1e-4 {
        return PathBuilder::from_circle(cx, cy, radius);
    }

    let pieces = (span / FRAC_PI_2).ceil().max(1.0) as usize;
    let step = span / pieces as f32;
    let k = 4.0 / 3.0 * (step / 4.0).tan();

    let mut pb = PathBuilder::new();
    pb.move_to(cx, cy);
    pb.line_to(cx + radius * start.cos(), cy + radius * start.sin());
    let mut a0 = start;
    for _ in 0..pieces {
        let a1 = a0 + step;
        let (s0, c0) = a0.sin_cos();
        let (s1, c1) = a1.sin_cos();
        pb.cubic_to(
            cx + radius * (c0 - k * s0),
            cy + radius * (s0 + k * c0),
            cx + radius * (c1 + k * s1),
            cy + radius * (s1 - k * c1),
            cx + radius * c1,
            cy + radius * s1,
        );
        a0 = a1;
    }
    pb.close();
    pb.finish()
}

impl Canvas for PixmapCanvas {
    fn size(&self) -> (u32, u32) {
        (self.pixmap.width(), self.pixmap.height())
    }

    fn clear(&mut self) {
        self.pixmap.fill(skia_color(self.background));
    }

    fn fill_wedge(
        &mut self,
        center: [f32; 2],
        radius: f32,
        start_angle: f32,
        end_angle: f32,
        color: Rgba<u8>,
    ) {
        if let Some(path) = wedge_path(center, radius, start_angle, end_angle) {
            self.pixmap.fill_path(
                &path,
                &solid(color),
                FillRule::Winding,
                Transform::identity(),
                None,
            );
        }
    }

    fn fill_circle(&mut self, center: [f32; 2], radius: f32, color: Rgba<u8>) {
        if radius <= 0.0 {
            return;
        }
        if let Some(path) = PathBuilder::from_circle(center[0], center[1], radius) {
            self.pixmap.fill_path(
                &path,
                &solid(color),
                FillRule::Winding,
                Transform::identity(),
                None,
            );
        }
    }

    fn fill_text(
        &mut self,
        text: &str,
        anchor: [f32; 2],
        rotation: f32,
        font_size: f32,
        color: Rgba<u8>,
    ) {
        let Some(font) = self.font.clone() else {
            if !self.missing_font_logged {
                log::debug!("No label font loaded; skipping text rendering");
                self.missing_font_logged = true;
            }
            return;
        };
        if text.is_empty() || font_size <= 0.0 {
            return;
        }
        let Some(mask) = self.rasterize_text(&font, text, font_size, color) else {
            return;
        };

        // Center the line on the anchor, then turn it about the anchor.
        let [ax, ay] = anchor;
        let transform = Transform::from_rotate_at(rotation.to_degrees(), ax, ay).pre_translate(
            ax - mask.width() as f32 / 2.0,
            ay - mask.height() as f32 / 2.0,
        );
        let paint = PixmapPaint {
            quality: FilterQuality::Bilinear,
            ..PixmapPaint::default()
        };
        self.pixmap
            .draw_pixmap(0, 0, mask.as_ref(), &paint, transform, None);
    }
}
