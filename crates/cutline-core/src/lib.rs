//! Cutline Core - Foundation types for the timeline engine
//!
//! This crate provides the types shared by every Cutline crate:
//! - The error taxonomy for rejected edits
//! - Time spans with tolerant overlap detection

pub mod error;
pub mod time;

pub use error::{CutlineError, ErrorKind, Result};
pub use time::{is_valid_seconds, TimeSpan, OVERLAP_TOLERANCE};
