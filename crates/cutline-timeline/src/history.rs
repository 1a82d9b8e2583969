//! Undo/redo history of whole-sequence snapshots.
//!
//! Every structural edit records the sequence as it was before the edit.
//! Undo swaps the current sequence with the most recent snapshot; redo swaps
//! it back. Both buffers are bounded and evict their oldest entry first.

use std::collections::VecDeque;

use tracing::trace;

use crate::sequence::Sequence;

/// Default number of snapshots kept in each direction.
pub const DEFAULT_HISTORY_DEPTH: usize = 32;

/// Bounded undo/redo buffers.
#[derive(Debug, Clone)]
pub struct UndoStack {
    /// Snapshots before each edit (most recent last).
    undo: VecDeque<Sequence>,
    /// Snapshots that have been undone (most recent last).
    redo: VecDeque<Sequence>,
    /// Maximum history depth.
    max_depth: usize,
}

impl UndoStack {
    /// Create a new undo stack with the given maximum depth.
    pub fn new(max_depth: usize) -> Self {
        Self {
            undo: VecDeque::with_capacity(max_depth.min(DEFAULT_HISTORY_DEPTH)),
            redo: VecDeque::new(),
            max_depth,
        }
    }

    /// Record the state before an edit. Clears the redo buffer
    /// (a new edit invalidates redo history).
    pub fn record(&mut self, snapshot: Sequence) {
        self.redo.clear();
        push_bounded(&mut self.undo, snapshot, self.max_depth);
    }

    /// Replace `current` with the most recent undo snapshot, keeping the
    /// replaced state for redo. Returns false when there is nothing to undo.
    pub fn undo(&mut self, current: &mut Sequence) -> bool {
        let Some(snapshot) = self.undo.pop_back() else {
            return false;
        };
        let undone = std::mem::replace(current, snapshot);
        push_bounded(&mut self.redo, undone, self.max_depth);
        true
    }

    /// Replace `current` with the most recently undone state. Returns false
    /// when there is nothing to redo.
    pub fn redo(&mut self, current: &mut Sequence) -> bool {
        let Some(snapshot) = self.redo.pop_back() else {
            return false;
        };
        let redone = std::mem::replace(current, snapshot);
        push_bounded(&mut self.undo, redone, self.max_depth);
        true
    }

    /// Check if undo is available.
    pub fn can_undo(&self) -> bool {
        !self.undo.is_empty()
    }

    /// Check if redo is available.
    pub fn can_redo(&self) -> bool {
        !self.redo.is_empty()
    }

    /// Clear all history.
    pub fn clear(&mut self) {
        self.undo.clear();
        self.redo.clear();
    }

    /// Number of undo steps available.
    pub fn undo_count(&self) -> usize {
        self.undo.len()
    }

    /// Number of redo steps available.
    pub fn redo_count(&self) -> usize {
        self.redo.len()
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }
}

impl Default for UndoStack {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_DEPTH)
    }
}

fn push_bounded(buffer: &mut VecDeque<Sequence>, snapshot: Sequence, max_depth: usize) {
    buffer.push_back(snapshot);
    while buffer.len() > max_depth {
        buffer.pop_front();
        trace!(max_depth, "Evicted oldest history snapshot");
    }
}
