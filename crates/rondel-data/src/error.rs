//! Construction-time configuration errors.

use thiserror::Error;

use crate::DateTime;

/// A factory or source was configured with something unusable. Raised
/// synchronously from constructors; a half-built column set is never handed
/// out.
#[derive(Debug, Error)]
pub enum FactoryError {
    #[error("item list is empty")]
    EmptyItems,

    #[error("initial index {index} out of range for {len} items")]
    InitOutOfRange { index: usize, len: usize },

    #[error("bounds inverted: min {min} is greater than max {max}")]
    InvertedBounds { min: i64, max: i64 },

    #[error("date range inverted: max {max} is earlier than min {min}")]
    InvertedDateRange { min: DateTime, max: DateTime },

    #[error("cascade tree has no roots")]
    EmptyCascade,

    #[error("cascade tree runs out of children at depth {found} of {declared} declared columns")]
    RaggedCascade { declared: usize, found: usize },
}
