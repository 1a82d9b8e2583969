//! Track types for the timeline.

use std::fmt;

use cutline_core::TimeSpan;
use serde::{Deserialize, Serialize};

use crate::clip::Clip;

/// Kind of track.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TrackKind {
    #[default]
    Video,
    Audio,
    Overlay,
    Fx,
}

impl TrackKind {
    /// Canonical lowercase name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Video => "video",
            Self::Audio => "audio",
            Self::Overlay => "overlay",
            Self::Fx => "fx",
        }
    }

    /// Parse a canonical name. Unknown names map to [`TrackKind::Video`].
    pub fn from_name(name: &str) -> Self {
        match name {
            "audio" => Self::Audio,
            "overlay" => Self::Overlay,
            "fx" => Self::Fx,
            _ => Self::Video,
        }
    }
}

impl From<&str> for TrackKind {
    fn from(name: &str) -> Self {
        Self::from_name(name)
    }
}

impl From<String> for TrackKind {
    fn from(name: String) -> Self {
        Self::from_name(&name)
    }
}

impl From<TrackKind> for String {
    fn from(kind: TrackKind) -> Self {
        kind.as_str().to_string()
    }
}

impl fmt::Display for TrackKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A lane of clips, sorted by start time.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Track {
    /// Unique within the sequence
    pub id: String,
    /// Track kind
    pub kind: TrackKind,
    /// Whether clips on this track may overlap
    pub allow_overlap: bool,
    /// Is track locked
    pub locked: bool,
    /// Is track muted
    pub muted: bool,
    /// Clips in ascending start order
    pub clips: Vec<Clip>,
}

impl Track {
    /// Create an empty, non-overlapping track.
    pub fn new(id: impl Into<String>, kind: TrackKind) -> Self {
        Self {
            id: id.into(),
            kind,
            allow_overlap: false,
            locked: false,
            muted: false,
            clips: Vec::new(),
        }
    }

    /// Create a new video track.
    pub fn new_video(id: impl Into<String>) -> Self {
        Self::new(id, TrackKind::Video)
    }

    /// Create a new audio track.
    pub fn new_audio(id: impl Into<String>) -> Self {
        Self::new(id, TrackKind::Audio)
    }

    pub fn with_overlap(mut self, allow_overlap: bool) -> Self {
        self.allow_overlap = allow_overlap;
        self
    }

    pub fn with_clip(mut self, clip: Clip) -> Self {
        self.clips.push(clip);
        self
    }

    /// Stable sort of the clips by start time.
    pub fn sort_clips(&mut self) {
        self.clips.sort_by(|a, b| a.start.total_cmp(&b.start));
    }

    /// Check whether the clips are in ascending start order.
    pub fn is_sorted(&self) -> bool {
        self.clips.windows(2).all(|w| w[0].start <= w[1].start)
    }

    /// First clip (in start order) that contains `time`.
    pub fn clip_at_time(&self, time: f64) -> Option<&Clip> {
        self.clips.iter().find(|clip| clip.contains(time))
    }

    /// First clip that would collide with `span` on this track, skipping the
    /// clip at `ignore`. Overlap tracks never collide.
    pub fn conflict_with(&self, span: TimeSpan, ignore: Option<usize>, tolerance: f64) -> Option<&Clip> {
        if self.allow_overlap {
            return None;
        }
        self.clips
            .iter()
            .enumerate()
            .filter(|(i, _)| Some(*i) != ignore)
            .map(|(_, clip)| clip)
            .find(|clip| clip.span().overlaps(span, tolerance))
    }

    /// End of the last clip on the track.
    pub fn end_time(&self) -> f64 {
        self.clips.iter().map(Clip::end_time).fold(0.0, f64::max)
    }

    /// Number of clips in this track.
    pub fn clip_count(&self) -> usize {
        self.clips.len()
    }
}
