//! Rendering boundary of the wheel.

use rondel_graphics::SlotFrame;

/// Stable identity of one visual slot. The wheel mutates slot data and angle
/// in place while scrolling, so a host can keep one render object (one DOM
/// node, one scene node) per id for the wheel's whole lifetime.
pub type SlotId = usize;

/// Where the wheel pushes its visual state. Implemented by the embedding
/// host; the engine never touches a display API directly.
pub trait RenderSink {
    /// Applies the current transform and label of one slot.
    fn apply(&mut self, slot: SlotId, frame: &SlotFrame, text: &str);
}
