//! Host-facing timeline.

use cutline_core::Result;
use cutline_timeline::{to_snapshot_json, Clip, Timeline, Track};
use tracing::debug;
use wasm_bindgen::prelude::*;

use crate::{parse, to_json};

/// An editable timeline.
#[wasm_bindgen(js_name = Timeline)]
#[derive(Debug, Clone, Default)]
pub struct WasmTimeline {
    inner: Timeline,
}

#[wasm_bindgen(js_class = Timeline)]
impl WasmTimeline {
    /// Create a timeline with an empty "Main" sequence.
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self {
            inner: Timeline::new(),
        }
    }

    /// Restore a timeline from a `serialize()` document.
    #[wasm_bindgen(js_name = fromJson)]
    pub fn from_json(json: &str) -> Option<WasmTimeline> {
        match Timeline::from_json(json) {
            Ok(inner) => Some(Self { inner }),
            Err(e) => {
                debug!(error = %e, "Rejected snapshot from host");
                None
            }
        }
    }

    #[wasm_bindgen(js_name = setSequenceMetadata)]
    pub fn set_sequence_metadata(&mut self, width: u32, height: u32, fps: f64, sample_rate: u32) {
        self.inner.set_sequence_metadata(width, height, fps, sample_rate);
    }

    /// Append a track given as JSON.
    #[wasm_bindgen(js_name = addTrack)]
    pub fn add_track(&mut self, track_json: &str) -> bool {
        match parse::<Track>("track", track_json) {
            Some(track) => accepted(self.inner.add_track(track)),
            None => false,
        }
    }

    /// Replace a track given as JSON.
    #[wasm_bindgen(js_name = updateTrack)]
    pub fn update_track(&mut self, track_json: &str) -> bool {
        match parse::<Track>("track", track_json) {
            Some(track) => accepted(self.inner.update_track(track)),
            None => false,
        }
    }

    #[wasm_bindgen(js_name = removeTrack)]
    pub fn remove_track(&mut self, track_id: &str) -> bool {
        accepted(self.inner.remove_track(track_id))
    }

    /// Insert or replace a clip given as JSON.
    #[wasm_bindgen(js_name = upsertClip)]
    pub fn upsert_clip(&mut self, clip_json: &str) -> bool {
        match parse::<Clip>("clip", clip_json) {
            Some(clip) => accepted(self.inner.upsert_clip(clip)),
            None => false,
        }
    }

    #[wasm_bindgen(js_name = moveClip)]
    pub fn move_clip(&mut self, clip_id: &str, track_id: &str, new_start: f64) -> bool {
        accepted(self.inner.move_clip(clip_id, track_id, new_start))
    }

    #[wasm_bindgen(js_name = trimClip)]
    pub fn trim_clip(&mut self, clip_id: &str, trim_start: f64, trim_end: f64) -> bool {
        accepted(self.inner.trim_clip(clip_id, trim_start, trim_end))
    }

    /// Split a clip; the second half is named `<clipId>_b`.
    #[wasm_bindgen(js_name = splitClip)]
    pub fn split_clip(&mut self, clip_id: &str, offset: f64) -> bool {
        accepted(self.inner.split_clip(clip_id, offset).map(|_| ()))
    }

    #[wasm_bindgen(js_name = rippleDelete)]
    pub fn ripple_delete(&mut self, clip_id: &str) -> bool {
        accepted(self.inner.ripple_delete(clip_id))
    }

    /// `{clipId, localTime, globalTime}` of the video clip at `time`.
    #[wasm_bindgen(js_name = frameAt)]
    pub fn frame_at(&self, time: f64) -> Option<String> {
        self.inner.frame_at(time).and_then(|info| to_json(&info))
    }

    /// The snapshot document, or an empty string if encoding failed.
    pub fn serialize(&self) -> String {
        match self.inner.serialize() {
            Ok(json) => json,
            Err(e) => {
                debug!(error = %e, "Snapshot failed");
                String::new()
            }
        }
    }

    pub fn duration(&self) -> f64 {
        self.inner.duration()
    }

    /// A copy of the sequence as JSON, written like `serialize()` but
    /// without the `sequence` wrapper.
    pub fn sequence(&self) -> String {
        match to_snapshot_json(self.inner.sequence()) {
            Ok(json) => json,
            Err(e) => {
                debug!(error = %e, "Sequence copy failed");
                String::new()
            }
        }
    }

    pub fn undo(&mut self) -> bool {
        self.inner.undo()
    }

    pub fn redo(&mut self) -> bool {
        self.inner.redo()
    }

    #[wasm_bindgen(js_name = canUndo)]
    pub fn can_undo(&self) -> bool {
        self.inner.can_undo()
    }

    #[wasm_bindgen(js_name = canRedo)]
    pub fn can_redo(&self) -> bool {
        self.inner.can_redo()
    }
}

impl WasmTimeline {
    /// The wrapped timeline.
    pub fn timeline(&self) -> &Timeline {
        &self.inner
    }
}

fn accepted(result: Result<()>) -> bool {
    result.is_ok()
}
