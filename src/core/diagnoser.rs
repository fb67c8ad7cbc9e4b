// src/core/diagnoser.rs
use crate::core::text::{normalize, MarkCounts};
use crate::core::types::{DiacriticClass, NoteCode};

/// Checked top to bottom; the first class missing from the observed
/// sentence names the note.
const RULES: [DiacriticClass; 6] = [
    DiacriticClass::Tanwin,
    DiacriticClass::Kasra,
    DiacriticClass::Damma,
    DiacriticClass::Fatha,
    DiacriticClass::Sukun,
    DiacriticClass::SuperscriptAlif,
];

/// Names what is wrong with the vocalization of a pair whose letters agree.
pub struct DiacriticDiagnoser {
    fine_grained: bool,
}

impl DiacriticDiagnoser {
    pub fn new(fine_grained: bool) -> Self {
        Self { fine_grained }
    }

    /// Only meaningful when the base forms match and the vocalized forms do
    /// not. Never returns `Missing` or `WrongWord`.
    pub fn diagnose(&self, expected: &str, observed: &str) -> NoteCode {
        let want = MarkCounts::of(&normalize(expected));
        let got = MarkCounts::of(&normalize(observed));

        // An extra or substituted mark means the learner wrote something
        // wrong, not merely something incomplete.
        if got.exceeds_anywhere(&want) {
            return NoteCode::VowelsToFix;
        }

        RULES
            .iter()
            .find(|&&class| want.get(class) > got.get(class))
            .map(|&class| {
                if self.fine_grained {
                    class.missing_note()
                } else {
                    NoteCode::VowelsMissing
                }
            })
            .unwrap_or(NoteCode::VowelsToFix)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fine() -> DiacriticDiagnoser {
        DiacriticDiagnoser::new(true)
    }

    #[test]
    fn bare_letters_are_missing_vowels() {
        let diagnoser = DiacriticDiagnoser::new(false);
        assert_eq!(diagnoser.diagnose("كَتَبَ", "كتب"), NoteCode::VowelsMissing);
    }

    #[test]
    fn tanwin_outranks_everything() {
        // kasra and tanwin both dropped; tanwin is reported first
        assert_eq!(fine().diagnose("كِتَابٌ", "كتَاب"), NoteCode::MissingTanwin);
    }

    #[test]
    fn priority_follows_rule_table() {
        assert_eq!(fine().diagnose("كِتَابُ", "كتَاب"), NoteCode::MissingKasra);
        assert_eq!(fine().diagnose("كُتُب", "كتُب"), NoteCode::MissingDamma);
        assert_eq!(fine().diagnose("دَرْسَ", "درْس"), NoteCode::MissingFatha);
        assert_eq!(fine().diagnose("دَرْسَ", "دَرسَ"), NoteCode::MissingSukun);
        assert_eq!(fine().diagnose("هٰذَا", "هذَا"), NoteCode::MissingSuperscriptAlif);
    }

    #[test]
    fn substituted_mark_needs_correction() {
        assert_eq!(fine().diagnose("كَتَبَ", "كَتَبِ"), NoteCode::VowelsToFix);
    }

    #[test]
    fn extra_mark_needs_correction() {
        assert_eq!(fine().diagnose("كَتَبَ", "كَتَّبَ"), NoteCode::VowelsToFix);
    }

    #[test]
    fn misplaced_marks_need_correction() {
        assert_eq!(fine().diagnose("بَب", "ببَ"), NoteCode::VowelsToFix);
    }

    #[test]
    fn missing_shadda_alone_needs_correction() {
        assert_eq!(fine().diagnose("رَبَّ", "رَبَ"), NoteCode::VowelsToFix);
    }

    #[test]
    fn same_pair_same_answer() {
        let diagnoser = fine();
        let first = diagnoser.diagnose("مَدْرَسَةٌ", "مدرسة");
        for _ in 0..5 {
            assert_eq!(diagnoser.diagnose("مَدْرَسَةٌ", "مدرسة"), first);
        }
    }
}
