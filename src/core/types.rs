// src/core/types.rs
use serde::Serialize;
use std::fmt;

/// Vowel-mark categories the diagnoser knows how to name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiacriticClass {
    Fatha,
    Damma,
    Kasra,
    Tanwin,
    Sukun,
    SuperscriptAlif,
}

impl DiacriticClass {
    /// Every class, in declaration order (not diagnosis order).
    pub const ALL: [DiacriticClass; 6] = [
        DiacriticClass::Fatha,
        DiacriticClass::Damma,
        DiacriticClass::Kasra,
        DiacriticClass::Tanwin,
        DiacriticClass::Sukun,
        DiacriticClass::SuperscriptAlif,
    ];

    /// The class a single code point belongs to, if any.
    /// Shadda is a vowel mark for stripping purposes but has no class.
    pub fn of(c: char) -> Option<Self> {
        match c {
            '\u{064B}' | '\u{064C}' | '\u{064D}' => Some(DiacriticClass::Tanwin),
            '\u{064E}' => Some(DiacriticClass::Fatha),
            '\u{064F}' => Some(DiacriticClass::Damma),
            '\u{0650}' => Some(DiacriticClass::Kasra),
            '\u{0652}' => Some(DiacriticClass::Sukun),
            '\u{0670}' => Some(DiacriticClass::SuperscriptAlif),
            _ => None,
        }
    }

    pub fn index(self) -> usize {
        self as usize
    }

    /// The fine-grained note naming this class as missing.
    pub fn missing_note(self) -> NoteCode {
        match self {
            DiacriticClass::Fatha => NoteCode::MissingFatha,
            DiacriticClass::Damma => NoteCode::MissingDamma,
            DiacriticClass::Kasra => NoteCode::MissingKasra,
            DiacriticClass::Tanwin => NoteCode::MissingTanwin,
            DiacriticClass::Sukun => NoteCode::MissingSukun,
            DiacriticClass::SuperscriptAlif => NoteCode::MissingSuperscriptAlif,
        }
    }
}

/// The closed vocabulary of diagnostic notes. Serializes as its French text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NoteCode {
    Pass,
    Missing,
    WrongWord,
    VowelsMissing,
    VowelsToFix,
    MissingTanwin,
    MissingKasra,
    MissingDamma,
    MissingFatha,
    MissingSukun,
    MissingSuperscriptAlif,
}

impl NoteCode {
    pub const VOCABULARY: [NoteCode; 11] = [
        NoteCode::Pass,
        NoteCode::Missing,
        NoteCode::WrongWord,
        NoteCode::VowelsMissing,
        NoteCode::VowelsToFix,
        NoteCode::MissingTanwin,
        NoteCode::MissingKasra,
        NoteCode::MissingDamma,
        NoteCode::MissingFatha,
        NoteCode::MissingSukun,
        NoteCode::MissingSuperscriptAlif,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            NoteCode::Pass => "",
            NoteCode::Missing => "Manquant",
            NoteCode::WrongWord => "Mot incorrect",
            NoteCode::VowelsMissing => "Voyelles manquantes",
            NoteCode::VowelsToFix => "Voyelles à corriger",
            NoteCode::MissingTanwin => "Il manque le tanwīn",
            NoteCode::MissingKasra => "Il manque la kasra",
            NoteCode::MissingDamma => "Il manque la damma",
            NoteCode::MissingFatha => "Il manque la fatha",
            NoteCode::MissingSukun => "Il manque le sukūn",
            NoteCode::MissingSuperscriptAlif => "Il manque l'alif suscrit",
        }
    }

    /// Exact lookup against the vocabulary. No fuzzy matching.
    pub fn from_text(text: &str) -> Option<Self> {
        Self::VOCABULARY.into_iter().find(|code| code.as_str() == text)
    }

    pub fn is_pass(self) -> bool {
        self == NoteCode::Pass
    }
}

impl fmt::Display for NoteCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for NoteCode {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// The graded outcome for one expected sentence.
/// `ok` is private so the `ok <=> note is empty` invariant cannot be broken.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Verdict {
    ok: bool,
    expected: String,
    note: NoteCode,
}

impl Verdict {
    pub fn new(expected: &str, note: NoteCode) -> Self {
        Self {
            ok: note.is_pass(),
            expected: expected.to_string(),
            note,
        }
    }

    pub fn pass(expected: &str) -> Self {
        Self::new(expected, NoteCode::Pass)
    }

    pub fn missing(expected: &str) -> Self {
        Self::new(expected, NoteCode::Missing)
    }

    pub fn ok(&self) -> bool {
        self.ok
    }

    pub fn expected(&self) -> &str {
        &self.expected
    }

    pub fn note(&self) -> NoteCode {
        self.note
    }
}

/// The response body handed to the outer layer: `{ "items": [...] }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GradeReport {
    pub items: Vec<Verdict>,
}

impl GradeReport {
    pub fn passed(&self) -> usize {
        self.items.iter().filter(|v| v.ok()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vocabulary_round_trips_through_text() {
        for code in NoteCode::VOCABULARY {
            assert_eq!(NoteCode::from_text(code.as_str()), Some(code));
        }
        assert_eq!(NoteCode::from_text("Excellent"), None);
    }

    #[test]
    fn verdict_ok_follows_note() {
        assert!(Verdict::pass("كَتَبَ").ok());
        assert!(!Verdict::missing("كَتَبَ").ok());
        assert!(!Verdict::new("كَتَبَ", NoteCode::WrongWord).ok());
    }

    #[test]
    fn verdict_serializes_note_as_french_text() {
        let json = serde_json::to_value(Verdict::new("قَرَأَ", NoteCode::VowelsToFix)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "ok": false, "expected": "قَرَأَ", "note": "Voyelles à corriger" })
        );
    }

    #[test]
    fn shadda_has_no_class() {
        assert_eq!(DiacriticClass::of('\u{0651}'), None);
        assert_eq!(DiacriticClass::of('\u{064C}'), Some(DiacriticClass::Tanwin));
        assert_eq!(DiacriticClass::of('ب'), None);
    }
}
