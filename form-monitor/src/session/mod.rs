//! Session module - per-session analysis, history and feedback
//!
//! Re-exports only. All logic in submodules.

mod analysis;
mod analyzer;
mod feedback;
mod history;

pub use analysis::{
    is_perfect_form, FormAnalysis,
    LOW_VISIBILITY_ISSUE, LOW_VISIBILITY_SUGGESTION,
    UNMEASURABLE_ISSUE, UNMEASURABLE_SUGGESTION,
};
pub use analyzer::{FormSession, MonitorState};
pub use feedback::{FeedbackDispatcher, FeedbackSink, CELEBRATIONS, CORRECTION_THRESHOLD};
pub use history::{SessionHistory, SessionStatistics, HISTORY_CAPACITY, STATS_WINDOW};
