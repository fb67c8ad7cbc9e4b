// File: src/sanitize.rs
use crate::core::text::normalize;
use crate::core::types::{NoteCode, Verdict};
use serde::Deserialize;
use serde_json::Value;

/// One pre-classified judgment as the recognizer sent it. `ok` and `note`
/// stay untyped until sanitized; the recognizer is free to send anything.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct JudgmentRecord {
    pub expected: String,
    #[serde(default)]
    pub ok: Value,
    #[serde(default)]
    pub note: Value,
    /// Raw transcription; when present the record is re-graded locally.
    #[serde(default, deserialize_with = "string_or_none")]
    pub observed: Option<String>,
}

impl From<&Verdict> for JudgmentRecord {
    fn from(verdict: &Verdict) -> Self {
        Self {
            expected: verdict.expected().to_string(),
            ok: Value::Bool(verdict.ok()),
            note: Value::String(verdict.note().as_str().to_string()),
            observed: None,
        }
    }
}

fn string_or_none<'de, D: serde::Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => Some(s),
        _ => None,
    })
}

/// Clamps the note to the closed vocabulary, then derives `ok` from it.
/// Whatever `ok` the record claimed is discarded.
pub fn sanitize(record: &JudgmentRecord, expected: &str) -> Verdict {
    let note = clamp_note(&record.note);
    if record.ok.as_bool() == Some(true) && !note.is_pass() {
        tracing::debug!(expected, %note, "judgment claimed ok with a failing note");
    }
    Verdict::new(expected, note)
}

/// A missing or non-string note counts as a missing sentence.
pub fn clamp_note(note: &Value) -> NoteCode {
    match note {
        Value::String(text) => NoteCode::from_text(&normalize(text)).unwrap_or(NoteCode::Missing),
        _ => NoteCode::Missing,
    }
}
