//! WebAssembly bindings for the Cutline timeline engine.
//!
//! Exposes the timeline, the effects processor and the compositor to a host
//! UI. Structured values cross the boundary as JSON text using the snapshot's
//! camelCase field names. Edits report success as `bool`; queries that can
//! come up empty return `undefined`.
//!
//! # Example (JavaScript)
//!
//! ```javascript
//! import init, { Timeline, Compositor } from 'cutline-bindings';
//!
//! await init();
//!
//! const timeline = new Timeline();
//! timeline.addTrack(JSON.stringify({ id: 'v1', kind: 'video' }));
//! timeline.upsertClip(JSON.stringify({ id: 'a', trackId: 'v1', start: 0, duration: 5 }));
//! const info = JSON.parse(timeline.frameAt(4));
//! const frame = JSON.parse(new Compositor().compose(timeline.sequence(), 1));
//! ```

use cutline_timeline::{from_snapshot_json, to_snapshot_json};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;
use wasm_bindgen::prelude::*;

mod query;
mod timeline;

pub use query::{WasmCompositor, WasmEffectsProcessor};
pub use timeline::WasmTimeline;

/// Get the version of the cutline-bindings library.
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

/// Canonical clip kind name for `name` ("video" for unknown names).
#[wasm_bindgen(js_name = clipKindName)]
pub fn clip_kind_name(name: &str) -> String {
    cutline_timeline::ClipKind::from_name(name).as_str().to_string()
}

/// Canonical track kind name for `name` ("video" for unknown names).
#[wasm_bindgen(js_name = trackKindName)]
pub fn track_kind_name(name: &str) -> String {
    cutline_timeline::TrackKind::from_name(name).as_str().to_string()
}

/// Host JSON follows the snapshot's escape rules in both directions.
fn parse<T: DeserializeOwned>(what: &str, json: &str) -> Option<T> {
    match from_snapshot_json(json) {
        Ok(value) => Some(value),
        Err(e) => {
            debug!(what, error = %e, "Rejected malformed JSON from host");
            None
        }
    }
}

fn to_json<T: Serialize>(value: &T) -> Option<String> {
    match to_snapshot_json(value) {
        Ok(json) => Some(json),
        Err(e) => {
            debug!(error = %e, "Failed to encode value for host");
            None
        }
    }
}
