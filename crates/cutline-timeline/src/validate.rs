//! Placement and value checks shared by the edit operations.

use std::collections::HashSet;

use cutline_core::{is_valid_seconds, CutlineError, Result};

use crate::clip::Clip;
use crate::index::TimelineIndex;
use crate::sequence::Sequence;
use crate::track::Track;

/// Reject clips whose numeric fields are out of range.
pub(crate) fn check_clip_values(clip: &Clip) -> Result<()> {
    let invalid = |field: &str, value: f64| {
        Err(CutlineError::InvalidArgument(format!(
            "clip '{}': {field} = {value} is out of range",
            clip.id
        )))
    };
    if !is_valid_seconds(clip.start) {
        return invalid("start", clip.start);
    }
    if !is_valid_seconds(clip.duration) {
        return invalid("duration", clip.duration);
    }
    if !is_valid_seconds(clip.trim_start) {
        return invalid("trimStart", clip.trim_start);
    }
    if !is_valid_seconds(clip.trim_end) {
        return invalid("trimEnd", clip.trim_end);
    }
    if !(0.0..=1.0).contains(&clip.opacity) {
        return invalid("opacity", clip.opacity);
    }
    if !is_valid_seconds(clip.volume) {
        return invalid("volume", clip.volume);
    }
    Ok(())
}

/// Reject `candidate` if it collides with a clip on `track` other than the
/// one at `ignore`.
pub(crate) fn check_placement(
    track: &Track,
    candidate: &Clip,
    ignore: Option<usize>,
    tolerance: f64,
) -> Result<()> {
    match track.conflict_with(candidate.span(), ignore, tolerance) {
        Some(existing) => Err(CutlineError::Conflict(format!(
            "clip '{}' at [{}, {}] overlaps '{}' on track '{}'",
            candidate.id,
            candidate.start,
            candidate.end_time(),
            existing.id,
            track.id
        ))),
        None => Ok(()),
    }
}

/// Check a track's own clip list: every clip belongs to the track, has valid
/// values and a unique id, and (on a non-overlap track) no two clips collide.
pub(crate) fn check_track_contents(track: &Track, tolerance: f64) -> Result<()> {
    let mut seen = HashSet::with_capacity(track.clips.len());
    for clip in &track.clips {
        if clip.track_id != track.id {
            return Err(CutlineError::InvalidArgument(format!(
                "clip '{}' names track '{}' but is listed on track '{}'",
                clip.id, clip.track_id, track.id
            )));
        }
        check_clip_values(clip)?;
        if !seen.insert(clip.id.as_str()) {
            return Err(CutlineError::DuplicateId(format!(
                "clip '{}' appears twice on track '{}'",
                clip.id, track.id
            )));
        }
    }
    if !track.allow_overlap {
        for (i, clip) in track.clips.iter().enumerate() {
            if let Some(other) = track.clips[i + 1..]
                .iter()
                .find(|other| other.span().overlaps(clip.span(), tolerance))
            {
                return Err(CutlineError::Conflict(format!(
                    "clips '{}' and '{}' overlap on track '{}'",
                    clip.id, other.id, track.id
                )));
            }
        }
    }
    Ok(())
}

/// Reject an incoming track whose clip ids are already used by another track.
/// `replacing` is the position of the track being replaced, whose clips are
/// about to disappear.
pub(crate) fn check_clip_ids_free(
    track: &Track,
    index: &TimelineIndex,
    replacing: Option<usize>,
) -> Result<()> {
    for clip in &track.clips {
        if let Some(loc) = index.clip_location(&clip.id) {
            if Some(loc.track) != replacing {
                return Err(CutlineError::DuplicateId(format!(
                    "clip '{}' already exists on another track",
                    clip.id
                )));
            }
        }
    }
    Ok(())
}

/// Validate a whole sequence loaded from outside the edit API.
pub(crate) fn check_sequence(sequence: &Sequence, tolerance: f64) -> Result<()> {
    let mut track_ids = HashSet::with_capacity(sequence.tracks.len());
    let mut clip_ids = HashSet::with_capacity(sequence.clip_count());
    for track in &sequence.tracks {
        if !track_ids.insert(track.id.as_str()) {
            return Err(CutlineError::DuplicateId(format!("track '{}'", track.id)));
        }
        check_track_contents(track, tolerance)?;
        for clip in &track.clips {
            if !clip_ids.insert(clip.id.as_str()) {
                return Err(CutlineError::DuplicateId(format!("clip '{}'", clip.id)));
            }
        }
    }
    Ok(())
}
