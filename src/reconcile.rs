// File: src/reconcile.rs
//! Lines up whatever the recognizer returned with the expected list.
//! Always yields exactly one verdict per expected sentence, in order.

use crate::core::classifier::VerdictClassifier;
use crate::core::types::Verdict;
use crate::recognizer::RecognizerMode;
use crate::sanitize::{sanitize, JudgmentRecord};
use serde_json::Value;
use std::collections::HashMap;

/// Recognizer output after decoding, tagged by the mode the caller chose.
#[derive(Debug, Clone, PartialEq)]
pub enum RecognizerOutput {
    /// Candidate `i` belongs to expected sentence `i`. `None` is absent.
    Positional(Vec<Option<String>>),
    /// Judgments matched to expected sentences by exact text.
    KeyedJudgment(Vec<JudgmentRecord>),
    /// Nothing usable arrived; every sentence grades as missing.
    Malformed,
}

impl RecognizerOutput {
    /// Decodes raw recognizer text. Never fails: unparseable or misshapen
    /// input becomes `Malformed`. Empty text is read as `{}`.
    pub fn parse(mode: RecognizerMode, raw: &str) -> Self {
        let raw = if raw.trim().is_empty() { "{}" } else { raw };
        match serde_json::from_str::<Value>(raw) {
            Ok(value) => Self::from_value(mode, value),
            Err(e) => {
                tracing::warn!(%mode, error = %e, "recognizer output is not valid JSON");
                RecognizerOutput::Malformed
            }
        }
    }

    pub fn from_value(mode: RecognizerMode, value: Value) -> Self {
        let decoded = match mode {
            RecognizerMode::Positional => decode_lines(value),
            RecognizerMode::Keyed => decode_items(value),
        };
        decoded.unwrap_or_else(|| {
            tracing::warn!(%mode, "recognizer output has an unexpected shape");
            RecognizerOutput::Malformed
        })
    }
}

fn decode_lines(value: Value) -> Option<RecognizerOutput> {
    let lines = match value {
        Value::Object(mut map) => match map.remove("lines") {
            Some(Value::Array(lines)) => lines,
            _ => return None,
        },
        Value::Array(lines) => lines,
        _ => return None,
    };
    let candidates = lines
        .into_iter()
        .map(|line| match line {
            Value::String(text) => Some(text),
            _ => None,
        })
        .collect();
    Some(RecognizerOutput::Positional(candidates))
}

/// Items that are not objects or lack a string `expected` are skipped.
fn decode_items(value: Value) -> Option<RecognizerOutput> {
    let items = match value {
        Value::Object(mut map) => match map.remove("items") {
            Some(Value::Array(items)) => items,
            _ => return None,
        },
        _ => return None,
    };
    let records = items
        .into_iter()
        .enumerate()
        .filter_map(|(i, item)| match serde_json::from_value::<JudgmentRecord>(item) {
            Ok(record) => Some(record),
            Err(e) => {
                tracing::debug!(index = i, error = %e, "skipping unusable judgment record");
                None
            }
        })
        .collect();
    Some(RecognizerOutput::KeyedJudgment(records))
}

pub fn reconcile<S: AsRef<str>>(
    classifier: &VerdictClassifier,
    expected: &[S],
    output: &RecognizerOutput,
) -> Vec<Verdict> {
    match output {
        RecognizerOutput::Positional(candidates) => align_positional(classifier, expected, candidates),
        RecognizerOutput::KeyedJudgment(records) => align_keyed(classifier, expected, records),
        RecognizerOutput::Malformed => expected
            .iter()
            .map(|sentence| Verdict::missing(sentence.as_ref()))
            .collect(),
    }
}

/// Short output leaves the tail absent; excess candidates are ignored.
fn align_positional<S: AsRef<str>>(
    classifier: &VerdictClassifier,
    expected: &[S],
    candidates: &[Option<String>],
) -> Vec<Verdict> {
    if candidates.len() > expected.len() {
        tracing::debug!(
            extra = candidates.len() - expected.len(),
            "ignoring candidates past the expected list"
        );
    }
    expected
        .iter()
        .enumerate()
        .map(|(i, sentence)| {
            let observed = candidates.get(i).and_then(|c| c.as_deref());
            classifier.classify(sentence.as_ref(), observed)
        })
        .collect()
}

/// Lookup is by exact expected text, so identical sentences at different
/// positions share the last judgment sent for that text.
fn align_keyed<S: AsRef<str>>(
    classifier: &VerdictClassifier,
    expected: &[S],
    records: &[JudgmentRecord],
) -> Vec<Verdict> {
    let by_expected: HashMap<&str, &JudgmentRecord> = records
        .iter()
        .map(|record| (record.expected.as_str(), record))
        .collect();

    expected
        .iter()
        .map(|sentence| {
            let sentence = sentence.as_ref();
            match by_expected.get(sentence) {
                None => Verdict::missing(sentence),
                Some(record) => match record.observed.as_deref() {
                    Some(observed) => classifier.classify(sentence, Some(observed)),
                    None => sanitize(record, sentence),
                },
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::NoteCode;
    use serde_json::json;

    fn classifier() -> VerdictClassifier {
        VerdictClassifier::new(false)
    }

    fn notes(verdicts: &[Verdict]) -> Vec<NoteCode> {
        verdicts.iter().map(|v| v.note()).collect()
    }

    #[test]
    fn positional_grades_by_index() {
        let expected = ["كَتَبَ", "دَرَسَ"];
        let output = RecognizerOutput::parse(RecognizerMode::Positional, r#"{"lines":["كتب","دَرَسَ"]}"#);
        let verdicts = reconcile(&classifier(), &expected, &output);
        assert_eq!(notes(&verdicts), vec![NoteCode::VowelsMissing, NoteCode::Pass]);
        assert_eq!(verdicts[0].expected(), "كَتَبَ");
        assert!(verdicts[1].ok());
    }

    #[test]
    fn positional_short_output_leaves_tail_missing() {
        let expected = ["قَرَأَ", "كَتَبَ"];
        let output = RecognizerOutput::parse(RecognizerMode::Positional, r#"{"lines":["قَرَأَ"]}"#);
        let verdicts = reconcile(&classifier(), &expected, &output);
        assert_eq!(notes(&verdicts), vec![NoteCode::Pass, NoteCode::Missing]);
    }

    #[test]
    fn positional_excess_is_ignored() {
        let expected = ["قَرَأَ"];
        let output = RecognizerOutput::Positional(vec![
            Some("قَرَأَ".into()),
            Some("كَتَبَ".into()),
            None,
        ]);
        assert_eq!(reconcile(&classifier(), &expected, &output).len(), 1);
    }

    #[test]
    fn positional_nulls_and_non_strings_are_absent() {
        let output = RecognizerOutput::parse(RecognizerMode::Positional, r#"{"lines":[null, 7, "كَتَبَ"]}"#);
        assert_eq!(
            output,
            RecognizerOutput::Positional(vec![None, None, Some("كَتَبَ".into())])
        );
    }

    #[test]
    fn bare_array_is_accepted_as_lines() {
        let output = RecognizerOutput::parse(RecognizerMode::Positional, r#"["كَتَبَ"]"#);
        assert_eq!(output, RecognizerOutput::Positional(vec![Some("كَتَبَ".into())]));
    }

    #[test]
    fn malformed_payloads_degrade() {
        for (mode, raw) in [
            (RecognizerMode::Positional, "not json"),
            (RecognizerMode::Positional, r#"{"lines": "كَتَبَ"}"#),
            (RecognizerMode::Positional, "null"),
            (RecognizerMode::Positional, ""),
            (RecognizerMode::Keyed, r#"{"items": {"expected": "كَتَبَ"}}"#),
            (RecognizerMode::Keyed, r#"[{"expected": "كَتَبَ"}]"#),
            (RecognizerMode::Keyed, "{"),
        ] {
            assert_eq!(RecognizerOutput::parse(mode, raw), RecognizerOutput::Malformed, "{raw}");
        }
    }

    #[test]
    fn malformed_grades_everything_missing() {
        let expected = ["كَتَبَ", "كَتَبَ", "دَرَسَ"];
        let verdicts = reconcile(&classifier(), &expected, &RecognizerOutput::Malformed);
        assert_eq!(notes(&verdicts), vec![NoteCode::Missing; 3]);
    }

    #[test]
    fn keyed_looks_up_by_exact_text_in_expected_order() {
        let expected = ["دَرَسَ", "كَتَبَ", "قَرَأَ"];
        let payload = json!({ "items": [
            { "expected": "كَتَبَ", "ok": true, "note": "" },
            { "expected": "دَرَسَ", "ok": false, "note": "Voyelles à corriger" },
            { "expected": "قرأ", "ok": true, "note": "" },
        ]});
        let output = RecognizerOutput::from_value(RecognizerMode::Keyed, payload);
        let verdicts = reconcile(&classifier(), &expected, &output);
        assert_eq!(
            notes(&verdicts),
            vec![NoteCode::VowelsToFix, NoteCode::Pass, NoteCode::Missing]
        );
        assert_eq!(verdicts[2].expected(), "قَرَأَ");
    }

    #[test]
    fn keyed_duplicate_text_takes_last_judgment() {
        let expected = ["كَتَبَ", "كَتَبَ"];
        let payload = json!({ "items": [
            { "expected": "كَتَبَ", "ok": true, "note": "" },
            { "expected": "كَتَبَ", "ok": false, "note": "Mot incorrect" },
        ]});
        let output = RecognizerOutput::from_value(RecognizerMode::Keyed, payload);
        let verdicts = reconcile(&classifier(), &expected, &output);
        assert_eq!(notes(&verdicts), vec![NoteCode::WrongWord, NoteCode::WrongWord]);
    }

    #[test]
    fn keyed_skips_records_without_expected() {
        let payload = json!({ "items": [
            "كَتَبَ",
            { "ok": true, "note": "" },
            { "expected": 4, "ok": true },
            { "expected": "كَتَبَ", "ok": true, "note": "" },
        ]});
        match RecognizerOutput::from_value(RecognizerMode::Keyed, payload) {
            RecognizerOutput::KeyedJudgment(records) => assert_eq!(records.len(), 1),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn keyed_record_with_transcription_is_regraded() {
        let payload = json!({ "items": [
            { "expected": "كَتَبَ", "ok": true, "note": "", "observed": "كتب" },
        ]});
        let output = RecognizerOutput::from_value(RecognizerMode::Keyed, payload);
        let verdicts = reconcile(&classifier(), &["كَتَبَ"], &output);
        assert_eq!(verdicts[0].note(), NoteCode::VowelsMissing);
    }

    #[test]
    fn keyed_missing_items_is_malformed() {
        let output = RecognizerOutput::parse(RecognizerMode::Keyed, r#"{"lines": []}"#);
        assert_eq!(output, RecognizerOutput::Malformed);
    }

    #[test]
    fn empty_expected_list_yields_nothing() {
        let expected: [&str; 0] = [];
        let output = RecognizerOutput::Positional(vec![Some("كَتَبَ".into())]);
        assert!(reconcile(&classifier(), &expected, &output).is_empty());
    }
}
