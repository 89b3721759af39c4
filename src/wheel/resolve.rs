//! Mapping a settled rotation to the winning segment.

use crate::error::{Result, WheelError};

/// Pointer position in degrees, wheel-local frame (east, segment 0's start).
pub const POINTER_ANGLE_DEGREES: f64 = 0.0;

/// Normalise an angle to the half-open range [0°, 360°).
pub fn normalize_degrees(angle: f64) -> f64 {
    ((angle % 360.0) + 360.0) % 360.0
}

/// Index of the segment under the fixed pointer after the wheel rotated
/// forward by `final_angle_degrees`.
///
/// The wheel turning forward is equivalent to the pointer turning backward
/// by the same amount in the wheel's frame.
pub fn resolve_winner(final_angle_degrees: f64, count: usize) -> Result<usize> {
    if count == 0 {
        return Err(WheelError::NO_PARTICIPANTS);
    }
    if !final_angle_degrees.is_finite() {
        return Err(WheelError::InvalidState("final angle is not finite"));
    }

    let segment_angle = 360.0 / count as f64;
    let normalized = normalize_degrees(final_angle_degrees);
    let local = (POINTER_ANGLE_DEGREES - normalized + 360.0) % 360.0;
    let index = (local / segment_angle).floor() as usize;
    // A local angle a hair under 360 can round up to `count`.
    Ok(index % count)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_rotation_selects_first_segment() {
        for n in 1..=60 {
            assert_eq!(resolve_winner(0.0, n).unwrap(), 0);
            assert_eq!(resolve_winner(360.0, n).unwrap(), 0);
            assert_eq!(resolve_winner(1800.0, n).unwrap(), 0);
        }
    }

    #[test]
    fn test_quarter_turns_on_four_segments() {
        assert_eq!(resolve_winner(90.0, 4).unwrap(), 3);
        assert_eq!(resolve_winner(180.0, 4).unwrap(), 2);
        assert_eq!(resolve_winner(270.0, 4).unwrap(), 1);
        // Just past a boundary the previous segment is under the pointer.
        assert_eq!(resolve_winner(1.0, 4).unwrap(), 3);
        assert_eq!(resolve_winner(89.0, 4).unwrap(), 3);
        assert_eq!(resolve_winner(91.0, 4).unwrap(), 2);
    }

    #[test]
    fn test_negative_and_large_angles() {
        assert_eq!(resolve_winner(-90.0, 4).unwrap(), 1);
        assert_eq!(resolve_winner(2160.0 + 90.0, 4).unwrap(), 3);
    }

    #[test]
    fn test_index_always_in_range() {
        for n in [1usize, 3, 7, 50] {
            let mut angle = -720.0;
            while angle < 2520.0 {
                let idx = resolve_winner(angle, n).unwrap();
                assert!(idx < n, "angle={angle} n={n} idx={idx}");
                angle += 0.37;
            }
            assert!(resolve_winner(-1e-12, n).unwrap() < n);
            assert!(resolve_winner(360.0 - 1e-12, n).unwrap() < n);
        }
    }

    #[test]
    fn test_rejects_empty_wheel_and_nan() {
        assert!(resolve_winner(10.0, 0).unwrap_err().is_invalid_state());
        assert!(resolve_winner(f64::NAN, 4).is_err());
    }

    #[test]
    fn test_normalize_degrees() {
        assert_eq!(normalize_degrees(-90.0), 270.0);
        assert_eq!(normalize_degrees(720.0), 0.0);
        assert_eq!(normalize_degrees(45.5), 45.5);
    }
}
