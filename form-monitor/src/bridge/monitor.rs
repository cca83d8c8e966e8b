//! FormMonitor - the exported JS class
//!
//! Thin shell over a `FormSession`. Each JS instance owns its own session,
//! so there is no module-level state on this side either.

use serde::Serialize;
use serde_wasm_bindgen::Serializer;
use wasm_bindgen::prelude::*;

use crate::config::MonitorConfig;
use crate::error::ConfigError;
use crate::exercise::supported_exercises;
use crate::session::{FeedbackSink, FormSession};

use super::frame::landmarks_from_flat;

/// Maps become plain objects, not `Map`s
const SERIALIZER: Serializer = Serializer::json_compatible();

impl From<ConfigError> for JsValue {
    fn from(err: ConfigError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}

// ============================================================================
// SPEECH
// ============================================================================

/// JS callback `(message: string) => void` used as the feedback sink
struct JsSpeaker(js_sys::Function);

impl FeedbackSink for JsSpeaker {
    fn speak(&mut self, message: &str) {
        if let Err(err) = self.0.call1(&JsValue::NULL, &JsValue::from_str(message)) {
            log::warn!("speaker callback threw: {:?}", err);
        }
    }
}

// ============================================================================
// EXPORTED CLASS
// ============================================================================

#[wasm_bindgen]
pub struct FormMonitor {
    session: FormSession,
}

#[wasm_bindgen]
impl FormMonitor {
    /// `new FormMonitor(exerciseName, config?)`
    #[wasm_bindgen(constructor)]
    pub fn new(exercise_name: &str, config: JsValue) -> Result<FormMonitor, JsValue> {
        let config: MonitorConfig = if config.is_undefined() || config.is_null() {
            MonitorConfig::default()
        } else {
            serde_wasm_bindgen::from_value(config)
                .map_err(|e| ConfigError::Deserialize(e.to_string()))?
        };

        let session = FormSession::with_config(exercise_name, config)?;
        if !session.is_supported() {
            log::info!("'{}' has no form profile, analysis disabled", exercise_name);
        }
        Ok(FormMonitor { session })
    }

    /// Analyze a flat 33 × 4 landmark buffer, returns `FormAnalysis` or `null`
    #[wasm_bindgen(js_name = processLandmarks)]
    pub fn process_landmarks(&mut self, data: &[f32]) -> Result<JsValue, JsValue> {
        let landmarks = match landmarks_from_flat(data) {
            Ok(landmarks) => landmarks,
            Err(err) => {
                log::warn!("{}", err);
                return Ok(JsValue::NULL);
            }
        };

        match self.session.process_frame(&landmarks, js_sys::Date::now()) {
            Some(analysis) => Ok(analysis.serialize(&SERIALIZER)?),
            None => Ok(JsValue::NULL),
        }
    }

    /// `SessionStatistics` or `null` before the first scored frame
    #[wasm_bindgen(js_name = sessionStats)]
    pub fn session_stats(&self) -> Result<JsValue, JsValue> {
        match self.session.stats() {
            Some(stats) => Ok(stats.serialize(&SERIALIZER)?),
            None => Ok(JsValue::NULL),
        }
    }

    #[wasm_bindgen(js_name = smoothedScore)]
    pub fn smoothed_score(&self) -> Option<f32> {
        self.session.smoothed_score()
    }

    #[wasm_bindgen(js_name = lastFeedback)]
    pub fn last_feedback(&self) -> Option<String> {
        self.session.last_feedback().map(str::to_string)
    }

    pub fn start(&mut self) {
        self.session.start();
    }

    pub fn stop(&mut self) {
        self.session.stop();
    }

    #[wasm_bindgen(js_name = setExercise)]
    pub fn set_exercise(&mut self, exercise_name: &str) {
        self.session.set_exercise(exercise_name);
    }

    #[wasm_bindgen(getter)]
    pub fn exercise(&self) -> String {
        self.session.exercise_name().to_string()
    }

    #[wasm_bindgen(getter)]
    pub fn state(&self) -> String {
        self.session.state().as_str().to_string()
    }

    #[wasm_bindgen(js_name = isSupported)]
    pub fn is_supported(&self) -> bool {
        self.session.is_supported()
    }

    /// Register `(message: string) => void` for spoken feedback
    #[wasm_bindgen(js_name = setSpeaker)]
    pub fn set_speaker(&mut self, speaker: js_sys::Function) {
        self.session.set_feedback_sink(JsSpeaker(speaker));
    }

    #[wasm_bindgen(js_name = clearSpeaker)]
    pub fn clear_speaker(&mut self) {
        self.session.clear_feedback_sink();
    }

    #[wasm_bindgen(js_name = setVoiceEnabled)]
    pub fn set_voice_enabled(&mut self, enabled: bool) {
        self.session.set_voice_enabled(enabled);
    }
}

/// Display names accepted by `new FormMonitor(...)`
#[wasm_bindgen(js_name = supportedExercises)]
pub fn supported_exercise_names() -> js_sys::Array {
    supported_exercises().into_iter().map(JsValue::from_str).collect()
}
