//! The Rondel rotary wheel engine.
//!
//! A [`Wheel`] keeps a fixed window of value slots positioned on a circular
//! arc, converts drag distance into rotation, recycles slots that leave the
//! window, detects when the selected value changes, and settles onto the
//! nearest notch after release. Slots past the data source's edge exist but
//! carry no value; dragging into them meets progressive resistance and a hard
//! stop instead of a value change.

mod error;
mod ring;
mod sink;
mod wheel;

pub use error::*;
pub use ring::*;
pub use sink::*;
pub use wheel::*;
