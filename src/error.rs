//! Errors raised at the edges of the grader: file loading, configuration,
//! report persistence. Reconciliation itself never fails.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum GradeError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Mirrors the outer service's 400 message for an unusable expected list.
    #[error("Données manquantes: {0}")]
    MissingData(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Recognizer error: {0}")]
    Recognizer(String),

    #[error("Unknown recognizer mode: {0}")]
    UnknownMode(String),
}
