//! JSON snapshot of a sequence.
//!
//! The document is `{"sequence": {...}}` with camelCase field names. Strings
//! escape only `"`, `\` and line feed; every other character is written as
//! is. Reals use Rust's shortest round-trip formatting, so `5.0` is written
//! as `5`. Non-finite reals become `null`.

use std::borrow::Cow;
use std::io;

use cutline_core::{CutlineError, Result};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::ser::{CharEscape, Formatter, Serializer};
use tracing::debug;

use crate::sequence::Sequence;
use crate::timeline::{Timeline, TimelineConfig};

#[derive(Serialize)]
struct SnapshotRef<'a> {
    sequence: &'a Sequence,
}

#[derive(Deserialize)]
struct SnapshotOwned {
    sequence: Sequence,
}

/// `serde_json` formatter implementing the snapshot's number and escape rules.
#[derive(Debug, Clone, Copy, Default)]
pub struct SnapshotFormatter;

impl Formatter for SnapshotFormatter {
    fn write_char_escape<W>(&mut self, writer: &mut W, char_escape: CharEscape) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        let bytes: &[u8] = match char_escape {
            CharEscape::Quote => b"\\\"",
            CharEscape::ReverseSolidus => b"\\\\",
            CharEscape::LineFeed => b"\\n",
            CharEscape::Solidus => b"/",
            CharEscape::Backspace => b"\x08",
            CharEscape::FormFeed => b"\x0c",
            CharEscape::CarriageReturn => b"\r",
            CharEscape::Tab => b"\t",
            CharEscape::AsciiControl(byte) => return writer.write_all(&[byte]),
        };
        writer.write_all(bytes)
    }

    fn write_f64<W>(&mut self, writer: &mut W, value: f64) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        write!(writer, "{value}")
    }

    fn write_f32<W>(&mut self, writer: &mut W, value: f32) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        write!(writer, "{value}")
    }
}

/// Write `sequence` as a snapshot document.
pub fn sequence_to_json(sequence: &Sequence) -> Result<String> {
    to_snapshot_json(&SnapshotRef { sequence })
}

/// Write any value with the snapshot's number and escape rules.
pub fn to_snapshot_json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    let mut buf = Vec::with_capacity(1024);
    let mut ser = Serializer::with_formatter(&mut buf, SnapshotFormatter);
    value
        .serialize(&mut ser)
        .map_err(|e| CutlineError::Serialization(format!("Failed to serialize snapshot: {e}")))?;
    String::from_utf8(buf)
        .map_err(|e| CutlineError::Serialization(format!("Snapshot is not UTF-8: {e}")))
}

/// Parse a snapshot document back into a sequence. No invariants are checked.
pub fn sequence_from_json(json: &str) -> Result<Sequence> {
    let snapshot: SnapshotOwned = from_snapshot_json(json)?;
    Ok(snapshot.sequence)
}

/// Read any value written with the snapshot's escape rules.
pub fn from_snapshot_json<T: DeserializeOwned>(json: &str) -> Result<T> {
    let text = escape_raw_controls(json);
    serde_json::from_str(&text)
        .map_err(|e| CutlineError::Serialization(format!("Invalid snapshot: {e}")))
}

/// Snapshots carry control characters such as tab unescaped inside strings,
/// which strict JSON rejects. Re-escape them before parsing.
fn escape_raw_controls(json: &str) -> Cow<'_, str> {
    if !has_control_in_string(json) {
        return Cow::Borrowed(json);
    }

    let mut out = String::with_capacity(json.len() + 16);
    let mut in_string = false;
    let mut escaped = false;
    for ch in json.chars() {
        if in_string {
            if escaped {
                escaped = false;
            } else if ch == '\\' {
                escaped = true;
            } else if ch == '"' {
                in_string = false;
            } else if (ch as u32) < 0x20 {
                out.push_str(&format!("\\u{:04x}", ch as u32));
                continue;
            }
        } else if ch == '"' {
            in_string = true;
        }
        out.push(ch);
    }
    Cow::Owned(out)
}

fn has_control_in_string(json: &str) -> bool {
    let mut in_string = false;
    let mut escaped = false;
    for b in json.bytes() {
        if in_string {
            if escaped {
                escaped = false;
            } else if b == b'\\' {
                escaped = true;
            } else if b == b'"' {
                in_string = false;
            } else if b < 0x20 {
                return true;
            }
        } else if b == b'"' {
            in_string = true;
        }
    }
    false
}

impl Timeline {
    /// Serialize the live sequence.
    pub fn serialize(&self) -> Result<String> {
        sequence_to_json(self.sequence())
    }

    /// Rebuild a timeline from a snapshot document with the default config.
    pub fn from_json(json: &str) -> Result<Self> {
        Self::from_json_with_config(json, TimelineConfig::default())
    }

    /// Rebuild a timeline from a snapshot document. The sequence is checked
    /// for duplicate ids, misplaced clips and overlaps; clips are re-sorted
    /// and the duration recomputed. History starts empty.
    pub fn from_json_with_config(json: &str, config: TimelineConfig) -> Result<Self> {
        let sequence = sequence_from_json(json)?;
        debug!(
            sequence = %sequence.id,
            tracks = sequence.tracks.len(),
            clips = sequence.clip_count(),
            "Restoring timeline from snapshot"
        );
        Timeline::from_sequence(sequence, config)
    }
}
