//! Sequence types.

use serde::{Deserialize, Serialize};

use crate::track::Track;

/// Render metadata of a sequence.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SequenceSettings {
    /// Resolution width
    pub width: u32,
    /// Resolution height
    pub height: u32,
    /// Frames per second
    pub fps: f64,
    /// Audio sample rate in Hz
    pub sample_rate: u32,
}

impl Default for SequenceSettings {
    fn default() -> Self {
        Self {
            width: 1920,
            height: 1080,
            fps: 30.0,
            sample_rate: 48_000,
        }
    }
}

/// The root of a timeline edit: render metadata plus tracks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Sequence {
    /// Sequence ID
    pub id: String,
    /// Sequence name
    pub name: String,
    /// Resolution width
    pub width: u32,
    /// Resolution height
    pub height: u32,
    /// Frame rate
    pub fps: f64,
    /// Audio sample rate in Hz
    pub sample_rate: u32,
    /// Cached end of the last clip, in seconds
    pub duration: f64,
    /// Tracks in insertion order
    pub tracks: Vec<Track>,
}

impl Sequence {
    /// Create an empty sequence.
    pub fn new(id: impl Into<String>, name: impl Into<String>, settings: SequenceSettings) -> Self {
        let mut sequence = Self {
            id: id.into(),
            name: name.into(),
            width: 0,
            height: 0,
            fps: 0.0,
            sample_rate: 0,
            duration: 0.0,
            tracks: Vec::new(),
        };
        sequence.apply_settings(settings);
        sequence
    }

    pub fn settings(&self) -> SequenceSettings {
        SequenceSettings {
            width: self.width,
            height: self.height,
            fps: self.fps,
            sample_rate: self.sample_rate,
        }
    }

    pub fn apply_settings(&mut self, settings: SequenceSettings) {
        self.width = settings.width;
        self.height = settings.height;
        self.fps = settings.fps;
        self.sample_rate = settings.sample_rate;
    }

    /// End of the last clip across all tracks, or zero when empty.
    pub fn compute_duration(&self) -> f64 {
        self.tracks.iter().map(Track::end_time).fold(0.0, f64::max)
    }

    /// Total number of clips across all tracks.
    pub fn clip_count(&self) -> usize {
        self.tracks.iter().map(Track::clip_count).sum()
    }
}

impl Default for Sequence {
    fn default() -> Self {
        Self::new("sequence-0", "Main", SequenceSettings::default())
    }
}

/// What is on screen at a given time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelineFrameInfo {
    pub clip_id: String,
    /// Time relative to the clip start
    pub local_time: f64,
    /// Time on the sequence
    pub global_time: f64,
}
