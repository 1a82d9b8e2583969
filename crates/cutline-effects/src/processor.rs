//! Effect parameter modulation.

use cutline_timeline::Clip;
use serde::{Deserialize, Serialize};
use tracing::trace;

/// Parameter values of a clip's enabled effects at one local time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EffectEvaluation {
    pub clip_id: String,
    /// Clip-local time the values were sampled at
    pub time: f64,
    /// Effect by effect, parameter by parameter in insertion order
    pub values: Vec<f64>,
}

/// Evaluates effect parameters, optionally modulated over time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EffectsProcessor {
    modulation_enabled: bool,
}

impl EffectsProcessor {
    /// Create a processor with modulation on.
    pub fn new() -> Self {
        Self {
            modulation_enabled: true,
        }
    }

    /// Switch between the time-modulated response and the identity response.
    pub fn set_modulation_enabled(&mut self, enabled: bool) {
        self.modulation_enabled = enabled;
    }

    pub fn modulation_enabled(&self) -> bool {
        self.modulation_enabled
    }

    /// Gain applied to every parameter at local time `time`.
    #[inline]
    pub fn modulation(&self, time: f64) -> f64 {
        if self.modulation_enabled {
            (time * 0.5).sin()
        } else {
            1.0
        }
    }

    /// Evaluate every enabled effect on `clip` at local time `time`.
    pub fn evaluate(&self, clip: &Clip, time: f64) -> EffectEvaluation {
        let gain = self.modulation(time);
        let values: Vec<f64> = clip
            .effects
            .iter()
            .filter(|effect| effect.enabled)
            .flat_map(|effect| effect.params.values())
            .map(|magnitude| magnitude * gain)
            .collect();
        trace!(clip = %clip.id, time, gain, count = values.len(), "Evaluated effects");
        EffectEvaluation {
            clip_id: clip.id.clone(),
            time,
            values,
        }
    }
}

impl Default for EffectsProcessor {
    fn default() -> Self {
        Self::new()
    }
}
