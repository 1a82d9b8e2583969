//! Clip types for the timeline.

use std::fmt;

use cutline_core::TimeSpan;
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use smallvec::SmallVec;

/// Kind of media a clip plays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ClipKind {
    #[default]
    Video,
    Audio,
    Image,
}

impl ClipKind {
    /// Canonical lowercase name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Video => "video",
            Self::Audio => "audio",
            Self::Image => "image",
        }
    }

    /// Parse a canonical name. Unknown names map to [`ClipKind::Video`].
    pub fn from_name(name: &str) -> Self {
        match name {
            "audio" => Self::Audio,
            "image" => Self::Image,
            _ => Self::Video,
        }
    }
}

impl From<&str> for ClipKind {
    fn from(name: &str) -> Self {
        Self::from_name(name)
    }
}

impl From<String> for ClipKind {
    fn from(name: String) -> Self {
        Self::from_name(&name)
    }
}

impl From<ClipKind> for String {
    fn from(kind: ClipKind) -> Self {
        kind.as_str().to_string()
    }
}

impl fmt::Display for ClipKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Effect parameters, kept in insertion order.
///
/// Serialized as a JSON object whose keys appear in the order they were
/// inserted; inserting an existing name overwrites the value in place.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EffectParams {
    entries: SmallVec<[(String, f64); 4]>,
}

impl EffectParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set `name` to `value`. Returns the previous value, if any.
    pub fn insert(&mut self, name: impl Into<String>, value: f64) -> Option<f64> {
        let name = name.into();
        match self.entries.iter_mut().find(|(key, _)| *key == name) {
            Some((_, slot)) => Some(std::mem::replace(slot, value)),
            None => {
                self.entries.push((name, value));
                None
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<f64> {
        self.entries
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| *value)
    }

    /// Remove `name`, keeping the order of the remaining entries.
    pub fn remove(&mut self, name: &str) -> Option<f64> {
        let pos = self.entries.iter().position(|(key, _)| key == name)?;
        Some(self.entries.remove(pos).1)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.entries.iter().map(|(key, value)| (key.as_str(), *value))
    }

    /// Magnitudes in insertion order.
    pub fn values(&self) -> impl Iterator<Item = f64> + '_ {
        self.entries.iter().map(|(_, value)| *value)
    }
}

impl<K: Into<String>> FromIterator<(K, f64)> for EffectParams {
    fn from_iter<I: IntoIterator<Item = (K, f64)>>(iter: I) -> Self {
        let mut params = Self::new();
        for (name, value) in iter {
            params.insert(name, value);
        }
        params
    }
}

impl Serialize for EffectParams {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, value) in &self.entries {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for EffectParams {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct ParamsVisitor;

        impl<'de> Visitor<'de> for ParamsVisitor {
            type Value = EffectParams;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of parameter names to numbers")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut params = EffectParams::new();
                while let Some((name, value)) = access.next_entry::<String, f64>()? {
                    params.insert(name, value);
                }
                Ok(params)
            }
        }

        deserializer.deserialize_map(ParamsVisitor)
    }
}

/// A parametric effect attached to a clip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Effect {
    pub id: String,
    /// Free-form effect type tag (e.g. "blur")
    #[serde(rename = "type")]
    pub effect_type: String,
    pub enabled: bool,
    pub params: EffectParams,
}

impl Effect {
    /// Create an enabled effect with no parameters.
    pub fn new(id: impl Into<String>, effect_type: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            effect_type: effect_type.into(),
            enabled: true,
            params: EffectParams::new(),
        }
    }

    /// Builder-style parameter setter.
    pub fn with_param(mut self, name: impl Into<String>, value: f64) -> Self {
        self.params.insert(name, value);
        self
    }
}

impl Default for Effect {
    fn default() -> Self {
        Self::new("", "")
    }
}

/// A transition attached to a clip.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TransitionSpec {
    pub id: String,
    #[serde(rename = "type")]
    pub transition_type: String,
    /// Length in seconds
    pub duration: f64,
    pub easing: f64,
}

impl TransitionSpec {
    pub fn new(id: impl Into<String>, transition_type: impl Into<String>, duration: f64) -> Self {
        Self {
            id: id.into(),
            transition_type: transition_type.into(),
            duration,
            easing: 0.0,
        }
    }
}

/// A clip on the timeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Clip {
    /// Unique across the whole sequence
    pub id: String,
    /// Source media this clip plays
    pub media_id: String,
    /// Owning track
    pub track_id: String,
    pub kind: ClipKind,
    /// Timeline start in seconds
    pub start: f64,
    /// Length on the timeline in seconds
    pub duration: f64,
    /// Seconds consumed off the head of the source
    pub trim_start: f64,
    /// Seconds consumed off the tail of the source
    pub trim_end: f64,
    pub opacity: f64,
    pub volume: f64,
    pub effects: Vec<Effect>,
    pub transitions: Vec<TransitionSpec>,
}

impl Clip {
    /// Create a video clip with full opacity and unity volume.
    pub fn new(
        id: impl Into<String>,
        media_id: impl Into<String>,
        track_id: impl Into<String>,
        start: f64,
        duration: f64,
    ) -> Self {
        Self {
            id: id.into(),
            media_id: media_id.into(),
            track_id: track_id.into(),
            kind: ClipKind::Video,
            start,
            duration,
            trim_start: 0.0,
            trim_end: 0.0,
            opacity: 1.0,
            volume: 1.0,
            effects: Vec::new(),
            transitions: Vec::new(),
        }
    }

    pub fn with_kind(mut self, kind: ClipKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn with_effect(mut self, effect: Effect) -> Self {
        self.effects.push(effect);
        self
    }

    pub fn with_transition(mut self, transition: TransitionSpec) -> Self {
        self.transitions.push(transition);
        self
    }

    /// Timeline end in seconds.
    #[inline]
    pub fn end_time(&self) -> f64 {
        self.start + self.duration
    }

    /// The span this clip occupies on the timeline.
    #[inline]
    pub fn span(&self) -> TimeSpan {
        TimeSpan::new(self.start, self.duration)
    }

    /// Check whether the clip is on screen at `time` (both ends inclusive).
    #[inline]
    pub fn contains(&self, time: f64) -> bool {
        self.span().contains(time)
    }
}

impl Default for Clip {
    fn default() -> Self {
        Self::new("", "", "", 0.0, 0.0)
    }
}
