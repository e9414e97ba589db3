//! Wheel configuration errors.

use thiserror::Error;

/// Geometry that cannot produce a usable wheel. Raised synchronously at
/// construction; a half-built wheel is never handed out.
#[derive(Debug, Error)]
pub enum WheelError {
    #[error("wheel radius must be positive, got {0}")]
    NonPositiveRadius(f32),

    #[error("interval angle must be positive, got {0}")]
    NonPositiveInterval(f32),

    #[error("max angle must be positive, got {0}")]
    NonPositiveMaxAngle(f32),

    #[error("interval angle {interval} leaves no room for neighbors inside max angle {max_angle}")]
    IntervalExceedsArc { interval: f32, max_angle: f32 },
}
