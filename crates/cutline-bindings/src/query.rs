//! Host-facing effects processor and compositor.

use cutline_compositor::Compositor;
use cutline_effects::EffectsProcessor;
use cutline_timeline::{sequence_from_json, Clip, Sequence};
use wasm_bindgen::prelude::*;

use crate::{parse, to_json};

/// Effect parameter evaluator.
#[wasm_bindgen(js_name = EffectsProcessor)]
#[derive(Debug, Clone, Default)]
pub struct WasmEffectsProcessor {
    inner: EffectsProcessor,
}

#[wasm_bindgen(js_class = EffectsProcessor)]
impl WasmEffectsProcessor {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self {
            inner: EffectsProcessor::new(),
        }
    }

    /// Toggle time modulation of parameter values (on by default).
    #[wasm_bindgen(js_name = setSimdEnabled)]
    pub fn set_simd_enabled(&mut self, enabled: bool) {
        self.inner.set_modulation_enabled(enabled);
    }

    /// `{clipId, time, values}` for a clip given as JSON.
    pub fn evaluate(&self, clip_json: &str, time: f64) -> Option<String> {
        let clip: Clip = parse("clip", clip_json)?;
        to_json(&self.inner.evaluate(&clip, time))
    }
}

/// Per-frame clip stack builder.
#[wasm_bindgen(js_name = Compositor)]
#[derive(Debug, Clone, Copy, Default)]
pub struct WasmCompositor {
    inner: Compositor,
}

#[wasm_bindgen(js_class = Compositor)]
impl WasmCompositor {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self {
            inner: Compositor::new(),
        }
    }

    /// `{time, clipStack}` for a sequence given as JSON, either bare (as
    /// returned by `Timeline.sequence()`) or wrapped (as returned by
    /// `Timeline.serialize()`).
    pub fn compose(&self, sequence_json: &str, time: f64) -> Option<String> {
        let sequence = parse_sequence(sequence_json)?;
        to_json(&self.inner.compose(&sequence, time))
    }
}

fn parse_sequence(json: &str) -> Option<Sequence> {
    sequence_from_json(json)
        .ok()
        .or_else(|| parse("sequence", json))
}
