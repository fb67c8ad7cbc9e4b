// src/core/text.rs
use crate::core::types::DiacriticClass;
use unicode_normalization::UnicodeNormalization;

const HARAKAT_FIRST: char = '\u{064B}'; // fathatan
const HARAKAT_LAST: char = '\u{0652}'; // sukun
const SUPERSCRIPT_ALIF: char = '\u{0670}';
const SHADDA: char = '\u{0651}';

/// True for every code point `base_form` removes.
pub fn is_vowel_mark(c: char) -> bool {
    (HARAKAT_FIRST..=HARAKAT_LAST).contains(&c) || c == SUPERSCRIPT_ALIF
}

/// Canonical form used for every equality check: NFC, then each whitespace
/// run collapsed to one space, then trimmed.
pub fn normalize(s: &str) -> String {
    let composed: String = s.nfc().collect();
    composed.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Drops the harakat/tanwin/sukun block and the superscript alif.
/// Letters and spacing are left as they are.
pub fn base_form(s: &str) -> String {
    s.chars().filter(|&c| !is_vowel_mark(c)).collect()
}

/// Base form in canonical spacing. A mark standing alone between spaces
/// leaves a double space behind once stripped, so spacing is collapsed
/// again after stripping.
pub fn letters(s: &str) -> String {
    normalize(&base_form(&normalize(s)))
}

/// Per-sentence tally of vowel marks, indexed by `DiacriticClass::index`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MarkCounts {
    classes: [usize; 6],
    shadda: usize,
}

impl MarkCounts {
    pub fn of(s: &str) -> Self {
        let mut counts = Self::default();
        for c in s.chars() {
            if let Some(class) = DiacriticClass::of(c) {
                counts.classes[class.index()] += 1;
            } else if c == SHADDA {
                counts.shadda += 1;
            }
        }
        counts
    }

    pub fn get(&self, class: DiacriticClass) -> usize {
        self.classes[class.index()]
    }

    /// True when `self` carries more of some mark than `reference` does.
    pub fn exceeds_anywhere(&self, reference: &MarkCounts) -> bool {
        self.shadda > reference.shadda
            || DiacriticClass::ALL
                .iter()
                .any(|&class| self.get(class) > reference.get(class))
    }
}
