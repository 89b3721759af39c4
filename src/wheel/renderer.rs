//! Wheel frame rendering.

use super::Segment;
use crate::canvas::Canvas;
use crate::config::{HUB_COLOR, LABEL_COLOR};
use image::Rgba;

/// Hub radius as a fraction of the wheel radius.
const HUB_RATIO: f32 = 1.0 / 7.0;

/// Draws one wheel frame at a given rotation.
///
/// Rotation is applied only when drawing; segment angles are never modified.
#[derive(Debug, Clone)]
pub struct WheelRenderer {
    pub label_color: Rgba<u8>,
    pub hub_color: Rgba<u8>,
}

impl Default for WheelRenderer {
    fn default() -> Self {
        Self {
            label_color: LABEL_COLOR,
            hub_color: HUB_COLOR,
        }
    }
}

impl WheelRenderer {
    /// Clear the canvas and draw segments, labels and hub at `rotation` radians.
    pub fn render(&self, canvas: &mut dyn Canvas, segments: &[Segment], rotation: f32) {
        let (width, height) = canvas.size();
        let center = [width as f32 / 2.0, height as f32 / 2.0];
        let radius = width.min(height) as f32 / 2.0;

        canvas.clear();

        for segment in segments {
            canvas.fill_wedge(
                center,
                radius,
                segment.start_angle + rotation,
                segment.end_angle + rotation,
                segment.color,
            );

            let bisector = segment.mid_angle() + rotation;
            let (sin, cos) = bisector.sin_cos();
            let base = [
                center[0] + cos * segment.text_radius,
                center[1] + sin * segment.text_radius,
            ];
            for (line, offset) in segment.line_offsets() {
                // Offsets run perpendicular to the bisector.
                let anchor = [base[0] - sin * offset, base[1] + cos * offset];
                canvas.fill_text(line, anchor, bisector, segment.font_size, self.label_color);
            }
        }

        canvas.fill_circle(center, radius * HUB_RATIO, self.hub_color);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::{CommandRecorder, DrawCommand};
    use crate::wheel::layout_segments;
    use std::f32::consts::{FRAC_PI_2, TAU};

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-3
    }

    #[test]
    fn test_frame_structure() {
        let segments = layout_segments(&["Ann", "Bob", "Penelope Mitchell"], 275.0).unwrap();
        let mut canvas = CommandRecorder::new(550, 550);
        WheelRenderer::default().render(&mut canvas, &segments, 0.0);

        let commands = canvas.commands();
        assert_eq!(commands[0], DrawCommand::Clear);
        assert_eq!(canvas.last_frame_wedges().len(), 3);
        assert_eq!(
            canvas.last_frame_texts(),
            vec!["Ann", "Bob", "Penelope", "Mitchell"]
        );
        match commands.last() {
            Some(DrawCommand::Circle { center, radius, .. }) => {
                assert_eq!(*center, [275.0, 275.0]);
                assert!(approx(*radius, 275.0 / 7.0));
            }
            other => panic!("hub should be drawn last, got {other:?}"),
        }
    }

    #[test]
    fn test_rotation_offsets_wedges_without_mutating_segments() {
        let segments = layout_segments(&["A", "B", "C", "D"], 275.0).unwrap();
        let before = segments.clone();
        let mut canvas = CommandRecorder::new(550, 550);
        WheelRenderer::default().render(&mut canvas, &segments, FRAC_PI_2);

        match canvas.last_frame_wedges()[1] {
            DrawCommand::Wedge {
                start_angle,
                end_angle,
                ..
            } => {
                assert!(approx(*start_angle, FRAC_PI_2 + TAU / 4.0));
                assert!(approx(*end_angle, FRAC_PI_2 + TAU / 2.0));
            }
            _ => unreachable!(),
        }
        assert_eq!(segments, before);
    }

    #[test]
    fn test_label_anchor_on_bisector() {
        let segments = layout_segments(&["Solo"], 275.0).unwrap();
        let mut canvas = CommandRecorder::new(550, 550);
        WheelRenderer::default().render(&mut canvas, &segments, 0.0);

        let anchor = canvas
            .last_frame()
            .iter()
            .find_map(|c| match c {
                DrawCommand::Text {
                    anchor, rotation, ..
                } => Some((*anchor, *rotation)),
                _ => None,
            })
            .unwrap();
        // Single segment bisector points at pi (left of center).
        let text_radius = 275.0 - 95.0;
        assert!(approx(anchor.0[0], 275.0 - text_radius));
        assert!(approx(anchor.0[1], 275.0));
        assert!(approx(anchor.1, std::f32::consts::PI));
    }
}
