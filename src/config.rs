// File: src/config.rs
use crate::error::GradeError;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

pub const APP_NAME: &str = "harakat-grade";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Environment switch for fine-grained notes; wins over the file value.
pub const FINE_NOTES_ENV: &str = "HARAKAT_FINE_NOTES";

pub fn default_log_filter() -> &'static str {
    "grader_core=info,harakat_grade=info"
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GraderConfig {
    /// Name the missing mark ("Il manque la kasra") instead of the
    /// generic "Voyelles manquantes".
    pub fine_grained_notes: bool,
}

impl GraderConfig {
    pub fn load(path: &Path) -> Result<Self, GradeError> {
        let file = File::open(path)?;
        let config: GraderConfig = serde_json::from_reader(BufReader::new(file))
            .map_err(|e| GradeError::Config(format!("{}: {}", path.display(), e)))?;
        Ok(config)
    }

    /// Applies `HARAKAT_FINE_NOTES` if it is set.
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(value) = std::env::var(FINE_NOTES_ENV) {
            self.fine_grained_notes = parse_flag(&value);
        }
        self
    }
}

fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}
