//! Picker configuration errors.

use thiserror::Error;

use rondel_wheel::WheelError;

/// Construction failed; no picker is handed out. All variants surface
/// synchronously from [`Picker::new`](crate::Picker::new).
#[derive(Debug, Error)]
pub enum PickerError {
    #[error("source factory produced no columns")]
    NoColumns,

    #[error("mount mismatch: {columns} columns but {sinks} render sinks")]
    SinkCountMismatch { columns: usize, sinks: usize },

    #[error(transparent)]
    Wheel(#[from] WheelError),
}
