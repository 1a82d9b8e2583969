//! Cutline Compositor - Visibility queries
//!
//! Answers "which clips are stacked on screen at time t" for a sequence.

pub mod compositor;

pub use compositor::{Compositor, CompositorFrame};
