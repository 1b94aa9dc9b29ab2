// file: src/pipeline/mod.rs
// description: pipeline module exports and public api
// reference: run tracking shared by generation and uploads

mod progress;

pub use progress::{ProgressTracker, RunStats};
