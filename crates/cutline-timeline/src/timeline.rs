//! The editable timeline.
//!
//! A [`Timeline`] owns one [`Sequence`], its id indices and its undo history.
//! Every structural edit runs as a transaction: the edit is applied to a draft
//! copy of the sequence, and only if it succeeds does the draft replace the
//! live sequence (the replaced sequence becomes the undo snapshot). A failed
//! edit therefore leaves no trace.
//!
//! After a successful edit, clips are re-sorted by start, both indices are
//! rebuilt and the cached duration is recomputed.

use cutline_core::{is_valid_seconds, CutlineError, Result, OVERLAP_TOLERANCE};
use tracing::debug;

use crate::clip::Clip;
use crate::history::{UndoStack, DEFAULT_HISTORY_DEPTH};
use crate::index::{ClipLocation, TimelineIndex};
use crate::sequence::{Sequence, SequenceSettings, TimelineFrameInfo};
use crate::track::{Track, TrackKind};
use crate::validate;

/// Tunables for a [`Timeline`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimelineConfig {
    /// Snapshots kept in each of the undo and redo buffers
    pub history_depth: usize,
    /// Intersections no longer than this (seconds) are not overlaps
    pub overlap_tolerance: f64,
}

impl Default for TimelineConfig {
    fn default() -> Self {
        Self {
            history_depth: DEFAULT_HISTORY_DEPTH,
            overlap_tolerance: OVERLAP_TOLERANCE,
        }
    }
}

/// A sequence plus the machinery to edit it.
#[derive(Debug, Clone)]
pub struct Timeline {
    sequence: Sequence,
    index: TimelineIndex,
    history: UndoStack,
    config: TimelineConfig,
}

impl Timeline {
    /// Create a timeline with an empty default sequence.
    pub fn new() -> Self {
        Self::with_config(TimelineConfig::default())
    }

    pub fn with_config(config: TimelineConfig) -> Self {
        Self {
            sequence: Sequence::default(),
            index: TimelineIndex::default(),
            history: UndoStack::new(config.history_depth),
            config,
        }
    }

    /// Adopt an existing sequence after checking it.
    ///
    /// Clips are sorted and the duration recomputed; the history starts empty.
    pub fn from_sequence(sequence: Sequence, config: TimelineConfig) -> Result<Self> {
        validate::check_sequence(&sequence, config.overlap_tolerance)?;
        let mut timeline = Self::with_config(config);
        timeline.sequence = sequence;
        timeline.refresh();
        Ok(timeline)
    }

    pub fn config(&self) -> &TimelineConfig {
        &self.config
    }

    /// The live sequence.
    pub fn sequence(&self) -> &Sequence {
        &self.sequence
    }

    /// A deep copy of the live sequence.
    pub fn snapshot(&self) -> Sequence {
        self.sequence.clone()
    }

    /// Cached sequence duration in seconds.
    pub fn duration(&self) -> f64 {
        self.sequence.duration
    }

    pub fn tracks(&self) -> &[Track] {
        &self.sequence.tracks
    }

    pub fn track(&self, track_id: &str) -> Option<&Track> {
        self.index
            .track_position(track_id)
            .map(|t| &self.sequence.tracks[t])
    }

    pub fn clip(&self, clip_id: &str) -> Option<&Clip> {
        self.index
            .clip_location(clip_id)
            .map(|loc| &self.sequence.tracks[loc.track].clips[loc.clip])
    }

    /// Position of a track in the sequence's track list.
    pub fn track_position(&self, track_id: &str) -> Option<usize> {
        self.index.track_position(track_id)
    }

    /// `(track position, clip position)` of a clip.
    pub fn clip_location(&self, clip_id: &str) -> Option<ClipLocation> {
        self.index.clip_location(clip_id)
    }

    pub fn index(&self) -> &TimelineIndex {
        &self.index
    }

    /// Overwrite the render metadata. Not recorded in history.
    pub fn set_sequence_metadata(&mut self, width: u32, height: u32, fps: f64, sample_rate: u32) {
        self.sequence.apply_settings(SequenceSettings {
            width,
            height,
            fps,
            sample_rate,
        });
    }

    // ── Track edits ─────────────────────────────────────────────

    /// Append a track. Fails if the id is taken or its clips are invalid.
    pub fn add_track(&mut self, track: Track) -> Result<()> {
        self.transact("add_track", |seq, index, config| {
            if index.track_position(&track.id).is_some() {
                return Err(CutlineError::DuplicateId(format!("track '{}'", track.id)));
            }
            validate::check_track_contents(&track, config.overlap_tolerance)?;
            validate::check_clip_ids_free(&track, index, None)?;
            debug!(track = %track.id, kind = %track.kind, "Adding track");
            seq.tracks.push(track);
            Ok(())
        })
    }

    /// Replace a track wholesale, keeping its position in the track list.
    pub fn update_track(&mut self, track: Track) -> Result<()> {
        self.transact("update_track", |seq, index, config| {
            let t = index
                .track_position(&track.id)
                .ok_or_else(|| CutlineError::track_not_found(&track.id))?;
            validate::check_track_contents(&track, config.overlap_tolerance)?;
            validate::check_clip_ids_free(&track, index, Some(t))?;
            debug!(track = %track.id, clips = track.clips.len(), "Replacing track");
            seq.tracks[t] = track;
            Ok(())
        })
    }

    /// Remove a track and every clip on it.
    pub fn remove_track(&mut self, track_id: &str) -> Result<()> {
        self.transact("remove_track", |seq, index, _| {
            let t = index
                .track_position(track_id)
                .ok_or_else(|| CutlineError::track_not_found(track_id))?;
            let removed = seq.tracks.remove(t);
            debug!(track = %track_id, clips = removed.clips.len(), "Removed track");
            Ok(())
        })
    }

    // ── Clip edits ──────────────────────────────────────────────

    /// Insert a new clip or replace the clip with the same id.
    ///
    /// The clip lands on the track named by `clip.track_id`. When replacing a
    /// clip that already sits on that track, its own slot is excluded from
    /// the overlap check; a clip coming from another track is moved over.
    pub fn upsert_clip(&mut self, clip: Clip) -> Result<()> {
        self.transact("upsert_clip", |seq, index, config| {
            let target = index
                .track_position(&clip.track_id)
                .ok_or_else(|| CutlineError::track_not_found(&clip.track_id))?;
            validate::check_clip_values(&clip)?;

            match index.clip_location(&clip.id) {
                Some(loc) if loc.track == target => {
                    validate::check_placement(
                        &seq.tracks[target],
                        &clip,
                        Some(loc.clip),
                        config.overlap_tolerance,
                    )?;
                    debug!(clip = %clip.id, track = %clip.track_id, "Updating clip");
                    seq.tracks[target].clips[loc.clip] = clip;
                }
                Some(loc) => {
                    validate::check_placement(
                        &seq.tracks[target],
                        &clip,
                        None,
                        config.overlap_tolerance,
                    )?;
                    debug!(clip = %clip.id, track = %clip.track_id, "Updating clip onto new track");
                    seq.tracks[loc.track].clips.remove(loc.clip);
                    seq.tracks[target].clips.push(clip);
                }
                None => {
                    validate::check_placement(
                        &seq.tracks[target],
                        &clip,
                        None,
                        config.overlap_tolerance,
                    )?;
                    debug!(clip = %clip.id, track = %clip.track_id, "Inserting clip");
                    seq.tracks[target].clips.push(clip);
                }
            }
            Ok(())
        })
    }

    /// Reposition a clip, possibly onto another track. Duration, trims and
    /// effects are preserved.
    pub fn move_clip(&mut self, clip_id: &str, target_track_id: &str, new_start: f64) -> Result<()> {
        self.transact("move_clip", |seq, index, config| {
            let loc = index
                .clip_location(clip_id)
                .ok_or_else(|| CutlineError::clip_not_found(clip_id))?;
            let target = index
                .track_position(target_track_id)
                .ok_or_else(|| CutlineError::track_not_found(target_track_id))?;
            if !is_valid_seconds(new_start) {
                return Err(CutlineError::InvalidArgument(format!(
                    "cannot move clip '{clip_id}' to start {new_start}"
                )));
            }

            let mut candidate = seq.tracks[loc.track].clips[loc.clip].clone();
            candidate.track_id = target_track_id.to_string();
            candidate.start = new_start;

            let same_track = loc.track == target;
            let ignore = same_track.then_some(loc.clip);
            validate::check_placement(
                &seq.tracks[target],
                &candidate,
                ignore,
                config.overlap_tolerance,
            )?;

            debug!(clip = %clip_id, track = %target_track_id, start = new_start, "Moving clip");
            if same_track {
                seq.tracks[target].clips[loc.clip] = candidate;
            } else {
                seq.tracks[loc.track].clips.remove(loc.clip);
                seq.tracks[target].clips.push(candidate);
            }
            Ok(())
        })
    }

    /// Consume `trim_start` seconds off the head and `trim_end` off the tail.
    ///
    /// The clip keeps its timeline start and only ever gets shorter, so it
    /// cannot run into its neighbours.
    pub fn trim_clip(&mut self, clip_id: &str, trim_start: f64, trim_end: f64) -> Result<()> {
        self.transact("trim_clip", |seq, index, _| {
            let loc = index
                .clip_location(clip_id)
                .ok_or_else(|| CutlineError::clip_not_found(clip_id))?;
            if !is_valid_seconds(trim_start) || !is_valid_seconds(trim_end) {
                return Err(CutlineError::InvalidArgument(format!(
                    "trim amounts must be non-negative, got ({trim_start}, {trim_end})"
                )));
            }

            let clip = &mut seq.tracks[loc.track].clips[loc.clip];
            let new_duration = clip.duration - trim_start - trim_end;
            if new_duration <= 0.0 {
                return Err(CutlineError::InvalidArgument(format!(
                    "trimming clip '{clip_id}' by ({trim_start}, {trim_end}) leaves no duration"
                )));
            }
            clip.trim_start += trim_start;
            clip.trim_end += trim_end;
            clip.duration = new_duration;
            debug!(clip = %clip_id, duration = new_duration, "Trimmed clip");
            Ok(())
        })
    }

    /// Cut a clip `offset` seconds after its start. The second half gets the
    /// id `<id>_b`, which is returned.
    pub fn split_clip(&mut self, clip_id: &str, offset: f64) -> Result<String> {
        self.transact("split_clip", |seq, index, _| {
            let loc = index
                .clip_location(clip_id)
                .ok_or_else(|| CutlineError::clip_not_found(clip_id))?;
            let track = &mut seq.tracks[loc.track];
            let first = &mut track.clips[loc.clip];
            if !(offset > 0.0 && offset < first.duration) {
                return Err(CutlineError::InvalidArgument(format!(
                    "split offset {offset} is outside (0, {})",
                    first.duration
                )));
            }
            let second_id = format!("{clip_id}_b");
            if index.clip_location(&second_id).is_some() {
                return Err(CutlineError::InvalidArgument(format!(
                    "splitting '{clip_id}' would duplicate clip '{second_id}'"
                )));
            }

            let mut second = first.clone();
            second.id = second_id.clone();
            second.start += offset;
            second.trim_start += offset;
            second.duration -= offset;

            first.duration = offset;
            first.trim_end += second.duration;

            debug!(clip = %clip_id, second = %second_id, offset, "Split clip");
            track.clips.push(second);
            Ok(second_id)
        })
    }

    /// Remove a clip and pull every later clip on the same track earlier by
    /// its duration (never before zero). Other tracks are untouched.
    pub fn ripple_delete(&mut self, clip_id: &str) -> Result<()> {
        self.transact("ripple_delete", |seq, index, _| {
            let loc = index
                .clip_location(clip_id)
                .ok_or_else(|| CutlineError::clip_not_found(clip_id))?;
            let track = &mut seq.tracks[loc.track];
            let removed = track.clips.remove(loc.clip);
            let mut shifted = 0usize;
            for clip in track.clips.iter_mut().filter(|c| c.start >= removed.start) {
                clip.start = (clip.start - removed.duration).max(0.0);
                shifted += 1;
            }
            debug!(clip = %clip_id, shift = removed.duration, shifted, "Ripple deleted clip");
            Ok(())
        })
    }

    // ── History ─────────────────────────────────────────────────

    /// Restore the state before the most recent edit. Returns false when
    /// there is nothing to undo.
    pub fn undo(&mut self) -> bool {
        let applied = self.history.undo(&mut self.sequence);
        if applied {
            self.refresh();
            debug!(remaining = self.history.undo_count(), "Undo applied");
        }
        applied
    }

    /// Re-apply the most recently undone edit. Returns false when there is
    /// nothing to redo.
    pub fn redo(&mut self) -> bool {
        let applied = self.history.redo(&mut self.sequence);
        if applied {
            self.refresh();
            debug!(remaining = self.history.redo_count(), "Redo applied");
        }
        applied
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Number of snapshots in the undo buffer.
    pub fn undo_depth(&self) -> usize {
        self.history.undo_count()
    }

    /// Number of snapshots in the redo buffer.
    pub fn redo_depth(&self) -> usize {
        self.history.redo_count()
    }

    // ── Queries ─────────────────────────────────────────────────

    /// The video clip on screen at `time`: the first clip, scanning video
    /// tracks in order and clips by start, whose span contains `time`.
    pub fn frame_at(&self, time: f64) -> Option<TimelineFrameInfo> {
        self.sequence
            .tracks
            .iter()
            .filter(|track| track.kind == TrackKind::Video)
            .find_map(|track| track.clip_at_time(time))
            .map(|clip| TimelineFrameInfo {
                clip_id: clip.id.clone(),
                local_time: time - clip.start,
                global_time: time,
            })
    }

    // ── Internals ───────────────────────────────────────────────

    /// Run `edit` against a draft copy of the sequence and commit it on
    /// success, recording the previous sequence in the undo history.
    fn transact<T>(
        &mut self,
        op: &'static str,
        edit: impl FnOnce(&mut Sequence, &TimelineIndex, &TimelineConfig) -> Result<T>,
    ) -> Result<T> {
        let mut draft = self.sequence.clone();
        match edit(&mut draft, &self.index, &self.config) {
            Ok(value) => {
                let previous = std::mem::replace(&mut self.sequence, draft);
                self.history.record(previous);
                self.refresh();
                Ok(value)
            }
            Err(e) => {
                debug!(op, error = %e, "Edit rejected");
                Err(e)
            }
        }
    }

    /// Restore the derived state: sorted clips, indices, duration.
    fn refresh(&mut self) {
        for track in &mut self.sequence.tracks {
            track.sort_clips();
        }
        self.index.rebuild(&self.sequence);
        self.sequence.duration = self.sequence.compute_duration();
    }
}

impl Default for Timeline {
    fn default() -> Self {
        Self::new()
    }
}
