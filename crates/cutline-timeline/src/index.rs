//! Lookup tables from ids to positions in the sequence.
//!
//! Both maps are rebuilt from scratch after every structural change: sorting
//! and insertion shuffle clip positions, so patching entries in place would
//! have to track every shifted slot.

use std::collections::HashMap;

use crate::sequence::Sequence;

/// Position of a clip: `(track position, clip position within that track)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ClipLocation {
    pub track: usize,
    pub clip: usize,
}

/// Derived id → position maps for a [`Sequence`].
#[derive(Debug, Clone, Default)]
pub struct TimelineIndex {
    tracks: HashMap<String, usize>,
    clips: HashMap<String, ClipLocation>,
}

impl TimelineIndex {
    /// Build an index for `sequence`.
    pub fn build(sequence: &Sequence) -> Self {
        let mut index = Self::default();
        index.rebuild(sequence);
        index
    }

    /// Discard every entry and re-derive both maps from `sequence`.
    pub fn rebuild(&mut self, sequence: &Sequence) {
        self.tracks.clear();
        self.clips.clear();
        for (t, track) in sequence.tracks.iter().enumerate() {
            self.tracks.insert(track.id.clone(), t);
            for (c, clip) in track.clips.iter().enumerate() {
                self.clips
                    .insert(clip.id.clone(), ClipLocation { track: t, clip: c });
            }
        }
    }

    pub fn track_position(&self, track_id: &str) -> Option<usize> {
        self.tracks.get(track_id).copied()
    }

    pub fn clip_location(&self, clip_id: &str) -> Option<ClipLocation> {
        self.clips.get(clip_id).copied()
    }

    /// Check that every entry points at the matching id in `sequence` and
    /// that every track and clip in `sequence` has an entry.
    pub fn agrees_with(&self, sequence: &Sequence) -> bool {
        if self.tracks.len() != sequence.tracks.len() || self.clips.len() != sequence.clip_count() {
            return false;
        }
        let tracks_ok = self.tracks.iter().all(|(id, &t)| {
            sequence
                .tracks
                .get(t)
                .is_some_and(|track| track.id == *id)
        });
        let clips_ok = self.clips.iter().all(|(id, loc)| {
            sequence
                .tracks
                .get(loc.track)
                .and_then(|track| track.clips.get(loc.clip))
                .is_some_and(|clip| clip.id == *id)
        });
        tracks_ok && clips_ok
    }
}
