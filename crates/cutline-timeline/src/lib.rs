//! Cutline Timeline - Timeline data model and editing
//!
//! Implements the editable timeline of a non-linear editor:
//! - Sequences containing tracks containing clips
//! - Placement rules (no overlap on non-overlap tracks)
//! - Edit operations (move, trim, split, ripple delete) with undo/redo
//! - Id indices kept in step with the sorted clip lists
//! - A deterministic JSON snapshot

pub mod clip;
pub mod history;
pub mod index;
pub mod sequence;
pub mod serialization;
pub mod timeline;
pub mod track;

mod validate;

pub use clip::{Clip, ClipKind, Effect, EffectParams, TransitionSpec};
pub use history::{UndoStack, DEFAULT_HISTORY_DEPTH};
pub use index::{ClipLocation, TimelineIndex};
pub use sequence::{Sequence, SequenceSettings, TimelineFrameInfo};
pub use serialization::{
    from_snapshot_json, sequence_from_json, sequence_to_json, to_snapshot_json,
    SnapshotFormatter,
};
pub use timeline::{Timeline, TimelineConfig};
pub use track::{Track, TrackKind};
