// src/lib.rs

pub mod c_api;
pub mod config;
pub mod core;
pub mod error;
pub mod persistence;
pub mod reconcile;
pub mod recognizer;
pub mod sanitize;

pub use crate::core::engine::GradingEngine;
pub use crate::core::types::{DiacriticClass, GradeReport, NoteCode, Verdict};
pub use crate::reconcile::RecognizerOutput;
pub use crate::recognizer::RecognizerMode;
