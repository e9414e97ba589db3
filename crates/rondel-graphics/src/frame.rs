//! Rendered transform of one wheel slot.

use crate::angle_to_radian;

/// Visual transform of a slot sitting at `angle` degrees on the wheel arc.
///
/// `y` is the vertical offset of the slot relative to the wheel center and
/// `scale` shrinks slots toward the top and bottom of the arc, giving the
/// flat render surface its cylindrical look.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SlotFrame {
    /// Slot angle in degrees. Fractional mid-drag.
    pub angle: f32,
    /// Vertical offset in the same unit as the wheel radius.
    pub y: f32,
    /// Scale factor in `[0, 1]`.
    pub scale: f32,
}

impl SlotFrame {
    /// Computes the transform for a slot at `angle` on a wheel of `radius`.
    ///
    /// `scale_ratio` in `[0, 1)` controls how aggressively off-center slots
    /// shrink: 0 applies the full `|cos θ|` falloff, values toward 1 flatten
    /// it out.
    pub fn at(angle: f32, radius: f32, scale_ratio: f32) -> Self {
        let rad = angle_to_radian(angle);
        let falloff = 1.0 - scale_ratio * scale_ratio * scale_ratio;
        Self {
            angle,
            y: -radius * rad.sin(),
            scale: (falloff * rad).cos().abs(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn center_slot_is_identity() {
        let frame = SlotFrame::at(0.0, 140.0, 0.5);
        assert_eq!(frame.y, 0.0);
        assert!((frame.scale - 1.0).abs() < 1e-6);
    }

    #[test]
    fn positive_angle_moves_up() {
        let frame = SlotFrame::at(15.0, 140.0, 0.5);
        assert!(frame.y < 0.0, "positive angles sit above center, y = {}", frame.y);
        assert!(frame.scale < 1.0);
    }

    #[test]
    fn transform_is_symmetric_about_center() {
        let up = SlotFrame::at(30.0, 140.0, 0.3);
        let down = SlotFrame::at(-30.0, 140.0, 0.3);
        assert!((up.y + down.y).abs() < 1e-4);
        assert!((up.scale - down.scale).abs() < 1e-6);
    }

    #[test]
    fn scale_ratio_flattens_falloff() {
        let sharp = SlotFrame::at(45.0, 140.0, 0.0);
        let flat = SlotFrame::at(45.0, 140.0, 0.9);
        assert!(flat.scale > sharp.scale);
    }
}
