//! Pure math for the Rondel rotary wheel.
//!
//! This crate contains the angle conversions and per-slot transform math used
//! throughout the Rondel engine. No state, no dependencies.

mod arc;
mod frame;

pub use arc::*;
pub use frame::*;
