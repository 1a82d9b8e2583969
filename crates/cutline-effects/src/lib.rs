//! Cutline Effects - Effect parameter evaluation
//!
//! Turns the effects attached to a clip into a flat list of parameter values
//! at a clip-local time.

pub mod processor;

pub use processor::{EffectEvaluation, EffectsProcessor};
