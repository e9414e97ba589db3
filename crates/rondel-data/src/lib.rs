//! Data sources behind Rondel picker columns.
//!
//! A [`DataSource`] walks an ordered, possibly bounded, possibly looping
//! sequence of values one step at a time; a [`SourceFactory`] builds one
//! source per picker column and recomputes downstream sources when a
//! committed value invalidates their ranges (a month change resizing the day
//! column, a province change swapping the city list).
//!
//! Domain edges are values, not errors: `prev`/`next` return `None` past the
//! edge and the wheel turns that into boundary easing. Configuration
//! mistakes, by contrast, fail fast at construction with [`FactoryError`].

mod bounded;
mod cascade;
mod datetime;
mod error;
mod factory;
mod indexed;
mod source;

pub use bounded::*;
pub use cascade::*;
pub use datetime::*;
pub use error::*;
pub use factory::*;
pub use indexed::*;
pub use source::*;
