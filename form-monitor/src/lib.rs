//! Form Monitor - real-time exercise form analysis
//!
//! Entry point for WASM module. Only contains:
//! - Module declarations
//! - Public re-exports for native callers
//! - The wasm_bindgen start hook

mod bridge;
mod config;
mod error;

pub mod exercise;
pub mod pose;
pub mod session;

use wasm_bindgen::prelude::*;

pub use bridge::{landmarks_from_flat, supported_exercise_names, FormMonitor, FRAME_LEN, LANDMARK_STRIDE};
pub use config::MonitorConfig;
pub use error::{AnalysisError, ConfigError};
pub use exercise::{get_profile, supported_exercises, AngleKind, Exercise, ExerciseProfile};
pub use pose::{angle_between, joint_angle, Landmark};
pub use session::{
    FeedbackSink, FormAnalysis, FormSession, MonitorState, SessionStatistics,
};

// ============================================================================
// WASM ENTRY POINTS
// ============================================================================

/// Called automatically when WASM module loads
#[wasm_bindgen(start)]
pub fn init_hooks() {
    console_error_panic_hook::set_once();
    bridge::console::init(log::LevelFilter::Info);
    log::info!("form monitor ready ({} exercises)", supported_exercises().len());
}
