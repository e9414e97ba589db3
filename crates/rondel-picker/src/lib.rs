//! Multi-column picker orchestration.
//!
//! A [`Picker`] owns one [`Wheel`](rondel_wheel::Wheel) per factory column,
//! keeps the live (`pending`) and confirmed (`committed`) value tuples in
//! sync, and propagates cascade updates: committing a value in one column
//! rebuilds the data sources of every column after it.

mod error;
mod input;
mod picker;

pub use error::*;
pub use input::*;
pub use picker::*;
