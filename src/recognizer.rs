// File: src/recognizer.rs
use crate::error::GradeError;
use std::fmt;
use std::str::FromStr;

/// Which payload shape the recognition service was asked to produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecognizerMode {
    /// `{ "lines": [string | null, ...] }`, aligned by index.
    Positional,
    /// `{ "items": [{ "expected", "ok", "note" }, ...] }`, matched by text.
    Keyed,
}

impl FromStr for RecognizerMode {
    type Err = GradeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "positional" | "lines" => Ok(RecognizerMode::Positional),
            "keyed" | "items" | "judgment" => Ok(RecognizerMode::Keyed),
            other => Err(GradeError::UnknownMode(other.to_string())),
        }
    }
}

impl fmt::Display for RecognizerMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecognizerMode::Positional => f.write_str("positional"),
            RecognizerMode::Keyed => f.write_str("keyed"),
        }
    }
}

/// The external service that reads the photographed page. Implementations
/// own transport, timeouts and retries; the grader only sees the text
/// they return.
pub trait Recognizer {
    fn mode(&self) -> RecognizerMode;

    fn recognize(&self, image: &[u8], expected: &[String]) -> Result<String, GradeError>;
}

/// Replays a payload captured earlier. Used by the CLI and in tests.
pub struct RecordedRecognizer {
    mode: RecognizerMode,
    payload: String,
}

impl RecordedRecognizer {
    pub fn new(mode: RecognizerMode, payload: impl Into<String>) -> Self {
        Self { mode, payload: payload.into() }
    }
}

impl Recognizer for RecordedRecognizer {
    fn mode(&self) -> RecognizerMode {
        self.mode
    }

    fn recognize(&self, _image: &[u8], _expected: &[String]) -> Result<String, GradeError> {
        Ok(self.payload.clone())
    }
}

const KEYED_RULES: &str = "\
Tu es un correcteur STRICT d'écriture arabe vocalisée.
On te donne la photo d'une page manuscrite et la liste des phrases attendues.
Corrige phrase par phrase, en te fondant uniquement sur ce qui est VISIBLE.

- Phrase absente de la photo : ok:false, note:\"Manquant\"
- Lettres (sans voyelles) incorrectes : ok:false, note:\"Mot incorrect\"
- Lettres correctes, voyelles absentes ou incomplètes : ok:false, note:\"Voyelles manquantes\"
- Lettres et voyelles présentes mais inexactes : ok:false, note:\"Voyelles à corriger\"
- Tout est correct : ok:true, note:\"\"

Réponds uniquement avec ce JSON, mêmes \"expected\" et même ordre que la liste :
{ \"items\": [ { \"ok\": true, \"expected\": \"PHRASE_ATTENDUE\", \"note\": \"\" } ] }
";

const POSITIONAL_RULES: &str = "\
Tu transcris une page manuscrite en arabe vocalisé.
Pour chaque phrase attendue, recopie exactement ce qui est écrit sur la photo,
lettres et voyelles (harakāt, tanwīn, sukūn, alif suscrit) comprises.
Ne corrige rien et ne devine pas : si la phrase est introuvable, mets null.

Réponds uniquement avec ce JSON, une entrée par phrase attendue, dans l'ordre :
{ \"lines\": [ \"TRANSCRIPTION\", null ] }
";

/// Instructions plus the expected list, numbered from 1.
pub fn build_prompt(mode: RecognizerMode, expected: &[String]) -> String {
    let rules = match mode {
        RecognizerMode::Positional => POSITIONAL_RULES,
        RecognizerMode::Keyed => KEYED_RULES,
    };
    let listing = expected
        .iter()
        .enumerate()
        .map(|(i, sentence)| format!("{}. {}", i + 1, sentence))
        .collect::<Vec<_>>()
        .join("\n");
    format!("{rules}\nListe attendue:\n{listing}")
}
