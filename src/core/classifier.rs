// src/core/classifier.rs
use crate::core::diagnoser::DiacriticDiagnoser;
use crate::core::text::{letters, normalize};
use crate::core::types::{NoteCode, Verdict};

/// Grades one expected sentence against one observed candidate.
/// Pure: the same pair always yields the same verdict.
pub struct VerdictClassifier {
    diagnoser: DiacriticDiagnoser,
}

impl VerdictClassifier {
    pub fn new(fine_grained: bool) -> Self {
        Self {
            diagnoser: DiacriticDiagnoser::new(fine_grained),
        }
    }

    pub fn classify(&self, expected: &str, observed: Option<&str>) -> Verdict {
        let note = self.note_for(expected, observed);
        Verdict::new(expected, note)
    }

    fn note_for(&self, expected: &str, observed: Option<&str>) -> NoteCode {
        let observed = match observed.map(normalize) {
            Some(text) if !text.is_empty() => text,
            _ => return NoteCode::Missing,
        };
        let expected = normalize(expected);

        if expected == observed {
            return NoteCode::Pass;
        }
        if letters(&expected) == letters(&observed) {
            return self.diagnoser.diagnose(&expected, &observed);
        }
        NoteCode::WrongWord
    }
}
