//! Pose Analyzer - per-session form analysis state machine
//!
//! A `FormSession` owns everything one monitoring session needs: the
//! active profile, rolling confidence, history, score smoother and
//! feedback clock. Sessions never share state, so several cameras or
//! exercises can run side by side.
//!
//! Per frame:
//! 1. Self-throttle to one analysis per `analysis_interval_ms`
//! 2. Gate on rolling confidence
//! 3. Measure the profile's angles (skipping low-visibility joints)
//! 4. Symmetry checks, composite score, corrections
//! 5. Record in history, smooth, dispatch feedback

use std::collections::BTreeMap;

use crate::config::MonitorConfig;
use crate::error::{AnalysisError, ConfigError};
use crate::exercise::{composite_score, get_profile, AngleKind, Deviation, ExerciseProfile};
use crate::pose::{joint_angle, ConfidenceFilter, Landmark, OneEuroFilter, LANDMARK_COUNT};

use super::analysis::{is_perfect_form, push_unique, FormAnalysis};
use super::feedback::{FeedbackDispatcher, FeedbackSink};
use super::history::{SessionHistory, SessionStatistics};

/// Lifecycle of a monitoring session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MonitorState {
    /// Stopped, or the exercise has no profile
    Disabled,
    /// Active, waiting for a trustworthy frame
    Idle,
    /// Profile loaded and confidence ok, measuring this frame
    Armed,
    /// Last frame produced a scored analysis
    Scoring,
}

impl MonitorState {
    pub fn as_str(&self) -> &'static str {
        match self {
            MonitorState::Disabled => "disabled",
            MonitorState::Idle => "idle",
            MonitorState::Armed => "armed",
            MonitorState::Scoring => "scoring",
        }
    }
}

/// What happened to the frame handed to `advance`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FrameOutcome {
    Inactive,
    Throttled,
    Analyzed,
    Faulted,
}

/// One form monitoring session
pub struct FormSession {
    config: MonitorConfig,
    exercise_name: String,
    profile: Option<&'static ExerciseProfile>,
    active: bool,
    state: MonitorState,

    confidence: ConfidenceFilter,
    history: SessionHistory,
    smoother: OneEuroFilter,
    feedback: FeedbackDispatcher,
    sink: Option<Box<dyn FeedbackSink>>,
    voice_enabled: bool,

    /// Host clock of the last analysis that actually ran
    last_run_ms: Option<f64>,
    last_result: Option<FormAnalysis>,
    last_feedback: Option<String>,
}

impl FormSession {
    /// Start a session with default thresholds
    pub fn new(exercise_name: &str) -> Self {
        Self::build(exercise_name, MonitorConfig::default())
    }

    /// Start a session with custom thresholds
    pub fn with_config(exercise_name: &str, config: MonitorConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::build(exercise_name, config))
    }

    fn build(exercise_name: &str, config: MonitorConfig) -> Self {
        let mut session = Self {
            confidence: ConfidenceFilter::new(config.confidence_window),
            history: SessionHistory::new(config.history_capacity, config.stats_window),
            smoother: OneEuroFilter::for_form_score(),
            feedback: FeedbackDispatcher::new(config.feedback_cooldown_ms),
            config,
            exercise_name: String::new(),
            profile: None,
            active: true,
            state: MonitorState::Disabled,
            sink: None,
            voice_enabled: true,
            last_run_ms: None,
            last_result: None,
            last_feedback: None,
        };
        session.set_exercise(exercise_name);
        session
    }

    // ========================================================================
    // LIFECYCLE
    // ========================================================================

    /// Switch exercise; session buffers start over
    pub fn set_exercise(&mut self, exercise_name: &str) {
        self.exercise_name = exercise_name.to_string();
        self.profile = get_profile(exercise_name);
        if self.profile.is_none() {
            log::debug!("no form profile for '{}', monitoring disabled", exercise_name);
        }
        self.reset_buffers();
        self.transition(self.resting_state());
    }

    /// (Re)activate monitoring
    pub fn start(&mut self) {
        self.active = true;
        self.transition(self.resting_state());
    }

    /// Deactivate and discard all session data
    pub fn stop(&mut self) {
        self.active = false;
        self.reset_buffers();
        self.transition(MonitorState::Disabled);
    }

    fn resting_state(&self) -> MonitorState {
        if self.active && self.profile.is_some() {
            MonitorState::Idle
        } else {
            MonitorState::Disabled
        }
    }

    fn reset_buffers(&mut self) {
        self.confidence.clear();
        self.history.clear();
        self.smoother.reset();
        self.feedback.reset();
        self.last_run_ms = None;
        self.last_result = None;
        self.last_feedback = None;
    }

    fn transition(&mut self, next: MonitorState) {
        if self.state != next {
            log::debug!("{}: {:?} -> {:?}", self.exercise_name, self.state, next);
            self.state = next;
        }
    }

    // ========================================================================
    // FEEDBACK OUTPUT
    // ========================================================================

    /// Where spoken feedback goes
    pub fn set_feedback_sink<S: FeedbackSink + 'static>(&mut self, sink: S) {
        self.sink = Some(Box::new(sink));
    }

    pub fn clear_feedback_sink(&mut self) {
        self.sink = None;
    }

    /// Muted sessions still choose messages but never call the sink
    pub fn set_voice_enabled(&mut self, enabled: bool) {
        self.voice_enabled = enabled;
    }

    // ========================================================================
    // PER-FRAME ANALYSIS
    // ========================================================================

    /// Analyze one frame, without feedback
    ///
    /// `now_ms` is the host clock. Returns `None` when the session is
    /// inactive, the exercise is unsupported, or the frame was malformed.
    /// Within the throttle window the previous result is returned as is.
    pub fn analyze(&mut self, landmarks: &[Landmark], now_ms: f64) -> Option<&FormAnalysis> {
        match self.advance(landmarks, now_ms) {
            FrameOutcome::Inactive | FrameOutcome::Faulted => None,
            FrameOutcome::Throttled | FrameOutcome::Analyzed => self.last_result.as_ref(),
        }
    }

    /// Analyze one frame and dispatch feedback for fresh results
    pub fn process_frame(&mut self, landmarks: &[Landmark], now_ms: f64) -> Option<&FormAnalysis> {
        match self.advance(landmarks, now_ms) {
            FrameOutcome::Inactive | FrameOutcome::Faulted => None,
            FrameOutcome::Throttled => self.last_result.as_ref(),
            FrameOutcome::Analyzed => {
                self.dispatch_feedback(now_ms);
                self.last_result.as_ref()
            }
        }
    }

    fn advance(&mut self, landmarks: &[Landmark], now_ms: f64) -> FrameOutcome {
        let Some(profile) = self.profile.filter(|_| self.active) else {
            return FrameOutcome::Inactive;
        };

        if self.is_throttled(now_ms) {
            return FrameOutcome::Throttled;
        }
        self.last_run_ms = Some(now_ms);

        match self.run_analysis(profile, landmarks, now_ms) {
            Ok(analysis) => {
                self.last_result = Some(analysis);
                FrameOutcome::Analyzed
            }
            Err(err) => {
                log::warn!("{}: frame skipped: {}", self.exercise_name, err);
                self.last_result = None;
                self.transition(MonitorState::Idle);
                FrameOutcome::Faulted
            }
        }
    }

    fn is_throttled(&self, now_ms: f64) -> bool {
        match self.last_run_ms {
            Some(last) => {
                let elapsed = now_ms - last;
                elapsed >= 0.0 && elapsed < self.config.analysis_interval_ms
            }
            None => false,
        }
    }

    fn run_analysis(
        &mut self,
        profile: &'static ExerciseProfile,
        landmarks: &[Landmark],
        now_ms: f64,
    ) -> Result<FormAnalysis, AnalysisError> {
        if landmarks.len() != LANDMARK_COUNT {
            return Err(AnalysisError::MalformedFrame {
                expected: LANDMARK_COUNT,
                actual: landmarks.len(),
            });
        }

        let confidence = self.confidence.update(landmarks);
        if confidence < self.config.min_confidence {
            self.transition(MonitorState::Idle);
            return Ok(FormAnalysis::low_confidence(confidence, now_ms));
        }
        self.transition(MonitorState::Armed);

        let angles = self.measure_angles(profile, landmarks);
        if angles.is_empty() {
            let analysis = FormAnalysis::unmeasurable(confidence, now_ms);
            self.history.record(analysis.clone());
            self.transition(MonitorState::Idle);
            return Ok(analysis);
        }

        let mut issues = Vec::new();
        let mut suggestions = Vec::new();

        for check in profile.symmetry {
            if let (Some(left), Some(right)) = (angles.get(&check.left), angles.get(&check.right)) {
                if (left - right).abs() > check.tolerance_deg {
                    push_unique(&mut issues, check.issue);
                    push_unique(&mut suggestions, check.suggestion);
                }
            }
        }

        let score = composite_score(&angles, profile.angles);

        for spec in profile.angles {
            let Some(&value) = angles.get(&spec.angle) else {
                continue;
            };
            let Some((direction, degrees)) = spec.deviation(value) else {
                continue;
            };
            if degrees <= self.config.deviation_tolerance_deg {
                continue;
            }
            if profile.is_critical(spec.angle) {
                push_unique(&mut issues, &range_issue(spec.angle, direction));
            }
            if let Some(message) = profile.correction(spec.angle, direction) {
                push_unique(&mut suggestions, message);
            }
        }
        suggestions.truncate(self.config.max_suggestions);

        let improvement = self
            .history
            .mean_recent_score(self.config.improvement_window)
            .map_or(0.0, |mean| score as f32 - mean);

        let analysis = FormAnalysis {
            score,
            issues,
            suggestions,
            angles,
            timestamp: now_ms,
            perfect_form: is_perfect_form(score, confidence, &self.config),
            improvement,
            confidence,
        };

        self.history.record(analysis.clone());
        self.smoother.filter(now_ms / 1000.0, score as f32);
        self.transition(MonitorState::Scoring);

        Ok(analysis)
    }

    /// Angles of the profile whose three landmarks are all clearly visible
    fn measure_angles(&self, profile: &ExerciseProfile, landmarks: &[Landmark]) -> BTreeMap<AngleKind, f32> {
        let visible = |idx: usize| {
            landmarks
                .get(idx)
                .filter(|lm| lm.visibility > self.config.joint_visibility)
        };

        profile
            .angles
            .iter()
            .filter_map(|spec| {
                let [a, b, c] = spec.angle.landmarks();
                let (a, b, c) = (visible(a)?, visible(b)?, visible(c)?);
                joint_angle(Some(a), Some(b), Some(c)).map(|angle| (spec.angle, angle))
            })
            .collect()
    }

    fn dispatch_feedback(&mut self, now_ms: f64) {
        let Some(analysis) = self.last_result.as_ref() else {
            return;
        };

        let message = match self.sink.as_mut() {
            Some(sink) if self.voice_enabled => self.feedback.maybe_emit(analysis, now_ms, sink.as_mut()),
            _ => self.feedback.select(analysis, now_ms),
        };

        if message.is_some() {
            self.last_feedback = message;
        }
    }

    // ========================================================================
    // ACCESSORS
    // ========================================================================

    pub fn exercise_name(&self) -> &str {
        &self.exercise_name
    }

    pub fn profile(&self) -> Option<&'static ExerciseProfile> {
        self.profile
    }

    pub fn is_supported(&self) -> bool {
        self.profile.is_some()
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn state(&self) -> MonitorState {
        self.state
    }

    pub fn config(&self) -> &MonitorConfig {
        &self.config
    }

    /// Most recent result, including degraded ones
    pub fn latest(&self) -> Option<&FormAnalysis> {
        self.last_result.as_ref()
    }

    /// Most recent message chosen by the feedback dispatcher
    pub fn last_feedback(&self) -> Option<&str> {
        self.last_feedback.as_deref()
    }

    pub fn stats(&self) -> Option<SessionStatistics> {
        self.history.stats()
    }

    pub fn history(&self) -> &SessionHistory {
        &self.history
    }

    /// Score after adaptive smoothing, for a steadier display
    pub fn smoothed_score(&self) -> Option<f32> {
        self.smoother.value()
    }
}

fn range_issue(angle: AngleKind, direction: Deviation) -> String {
    let side = match direction {
        Deviation::Below => "below",
        Deviation::Above => "above",
    };
    format!("{} {} ideal range", angle.label(), side)
}
