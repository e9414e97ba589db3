//! Core runtime pieces for the Rondel picker engine.
//!
//! Two concerns live here: typed event channels (every observable side effect
//! of a wheel or picker is a channel carrying a concrete payload type) and a
//! serial frame scheduler with cancellable callback handles. Both are
//! single-threaded by design; the host delivers input events and frame ticks
//! serially.

mod events;
mod frame;

pub use events::*;
pub use frame::*;
