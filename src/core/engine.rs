// src/core/engine.rs
use crate::config::GraderConfig;
use crate::core::classifier::VerdictClassifier;
use crate::core::types::{GradeReport, Verdict};
use crate::error::GradeError;
use crate::reconcile::{reconcile, RecognizerOutput};
use crate::recognizer::{Recognizer, RecognizerMode};

// Stateless between calls: one engine can serve any number of requests,
// from any number of threads.
pub struct GradingEngine {
    classifier: VerdictClassifier,
    config: GraderConfig,
}

impl GradingEngine {
    pub fn new(config: GraderConfig) -> Self {
        Self {
            classifier: VerdictClassifier::new(config.fine_grained_notes),
            config,
        }
    }

    pub fn config(&self) -> &GraderConfig {
        &self.config
    }

    /// Grades a single expected/observed pair.
    pub fn classify(&self, expected: &str, observed: Option<&str>) -> Verdict {
        self.classifier.classify(expected, observed)
    }

    /// One verdict per expected sentence, in order, whatever `output` holds.
    pub fn reconcile<S: AsRef<str>>(&self, expected: &[S], output: &RecognizerOutput) -> GradeReport {
        let items = reconcile(&self.classifier, expected, output);
        let report = GradeReport { items };
        tracing::info!(
            passed = report.passed(),
            total = report.items.len(),
            malformed = matches!(output, RecognizerOutput::Malformed),
            "reconciled recognizer output"
        );
        report
    }

    /// Same as `reconcile`, starting from the recognizer's raw text.
    pub fn reconcile_raw<S: AsRef<str>>(&self, expected: &[S], mode: RecognizerMode, raw: &str) -> GradeReport {
        let output = RecognizerOutput::parse(mode, raw);
        self.reconcile(expected, &output)
    }

    /// Runs the recognizer on `image`, then reconciles its answer.
    /// A failing recognizer is the caller's problem and is passed back up.
    pub fn grade(
        &self,
        recognizer: &dyn Recognizer,
        image: &[u8],
        expected: &[String],
    ) -> Result<GradeReport, GradeError> {
        let raw = recognizer.recognize(image, expected)?;
        Ok(self.reconcile_raw(expected, recognizer.mode(), &raw))
    }
}

impl Default for GradingEngine {
    fn default() -> Self {
        Self::new(GraderConfig::default())
    }
}
