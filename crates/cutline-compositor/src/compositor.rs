//! Clip stack for a single frame.

use cutline_timeline::{Sequence, TrackKind};
use serde::{Deserialize, Serialize};
use tracing::trace;

/// Clip ids on screen at one time, bottom layer first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompositorFrame {
    pub time: f64,
    /// One entry per contributing track, in track order
    pub clip_stack: Vec<String>,
}

impl CompositorFrame {
    pub fn is_empty(&self) -> bool {
        self.clip_stack.is_empty()
    }

    /// The top-most clip, if any.
    pub fn top(&self) -> Option<&str> {
        self.clip_stack.last().map(String::as_str)
    }
}

/// Builds per-frame clip stacks. Holds no state.
#[derive(Debug, Clone, Copy, Default)]
pub struct Compositor;

impl Compositor {
    pub fn new() -> Self {
        Self
    }

    /// Stack the first clip containing `time` from every non-audio track.
    pub fn compose(&self, sequence: &Sequence, time: f64) -> CompositorFrame {
        let clip_stack: Vec<String> = sequence
            .tracks
            .iter()
            .filter(|track| track.kind != TrackKind::Audio)
            .filter_map(|track| track.clip_at_time(time))
            .map(|clip| clip.id.clone())
            .collect();
        trace!(time, layers = clip_stack.len(), "Composed frame");
        CompositorFrame { time, clip_stack }
    }
}
