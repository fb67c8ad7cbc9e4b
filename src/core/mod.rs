pub mod classifier;
pub mod diagnoser;
pub mod engine;
pub mod text;
pub mod types;
