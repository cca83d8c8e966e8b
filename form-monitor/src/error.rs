//! Error types
//!
//! Nothing here crosses the JS boundary as a panic. Analysis faults are
//! logged and turned into "no update this frame"; config errors are
//! returned from the constructor.

use thiserror::Error;

/// Unexpected fault while analyzing one frame
#[derive(Debug, Error, PartialEq)]
pub enum AnalysisError {
    #[error("malformed landmark frame: expected {expected} landmarks, got {actual}")]
    MalformedFrame { expected: usize, actual: usize },

    #[error("malformed landmark buffer: {len} values is not a multiple of {stride}")]
    MalformedBuffer { len: usize, stride: usize },
}

/// Invalid monitor configuration
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("interval must be a finite, non-negative number of ms (got {0})")]
    InvalidInterval(f64),

    #[error("joint visibility threshold must be within 0.7..=1 (got {0})")]
    InvalidVisibility(f32),

    #[error("deviation tolerance must be finite and non-negative (got {0})")]
    InvalidTolerance(f32),

    #[error("{name} must be within 0..=100 (got {value})")]
    OutOfPercentRange { name: &'static str, value: u8 },

    #[error("{0} must be at least 1")]
    EmptyWindow(&'static str),

    #[error("stats window ({window}) cannot exceed history capacity ({capacity})")]
    WindowExceedsHistory { window: usize, capacity: usize },

    #[error("invalid config object: {0}")]
    Deserialize(String),
}
