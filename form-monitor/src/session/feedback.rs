//! Feedback dispatch - what to say, and when
//!
//! At most one message per cooldown. Celebrate perfect form first, then
//! correct poor form with the top suggestion, otherwise stay quiet.
//! Speaking itself belongs to the host, reached through [`FeedbackSink`].

use super::analysis::FormAnalysis;

/// Scores below this get corrective feedback
pub const CORRECTION_THRESHOLD: u8 = 70;

/// Rotated when form is perfect
pub const CELEBRATIONS: [&str; 4] = [
    "Perfect form! Keep it up!",
    "Excellent technique!",
    "Great job, that's textbook form!",
    "Outstanding! Stay consistent!",
];

/// Host-provided output for spoken feedback
pub trait FeedbackSink {
    fn speak(&mut self, message: &str);
}

impl<F: FnMut(&str)> FeedbackSink for F {
    fn speak(&mut self, message: &str) {
        self(message)
    }
}

/// Throttled message selection for one session
pub struct FeedbackDispatcher {
    /// Minimum time between messages (ms)
    cooldown_ms: f64,
    /// Host clock of the last emitted message
    last_emitted_ms: Option<f64>,
    /// Next celebration to use
    celebration_index: usize,
}

impl FeedbackDispatcher {
    pub fn new(cooldown_ms: f64) -> Self {
        Self {
            cooldown_ms,
            last_emitted_ms: None,
            celebration_index: 0,
        }
    }

    fn cooling_down(&self, now_ms: f64) -> bool {
        match self.last_emitted_ms {
            Some(last) => {
                let elapsed = now_ms - last;
                elapsed >= 0.0 && elapsed < self.cooldown_ms
            }
            None => false,
        }
    }

    /// Choose a message without speaking it
    ///
    /// Updates the cooldown clock when a message is chosen.
    pub fn select(&mut self, analysis: &FormAnalysis, now_ms: f64) -> Option<String> {
        if self.cooling_down(now_ms) {
            return None;
        }

        let message = if analysis.perfect_form {
            let message = CELEBRATIONS[self.celebration_index % CELEBRATIONS.len()];
            self.celebration_index = (self.celebration_index + 1) % CELEBRATIONS.len();
            message.to_string()
        } else if analysis.score < CORRECTION_THRESHOLD {
            analysis.suggestions.first()?.clone()
        } else {
            return None;
        };

        self.last_emitted_ms = Some(now_ms);
        Some(message)
    }

    /// Choose a message and hand it to the sink
    pub fn maybe_emit(
        &mut self,
        analysis: &FormAnalysis,
        now_ms: f64,
        sink: &mut dyn FeedbackSink,
    ) -> Option<String> {
        let message = self.select(analysis, now_ms)?;
        sink.speak(&message);
        Some(message)
    }

    /// Forget the cooldown clock (on session stop)
    pub fn reset(&mut self) {
        self.last_emitted_ms = None;
        self.celebration_index = 0;
    }
}

impl Default for FeedbackDispatcher {
    fn default() -> Self {
        Self::new(4000.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn analysis(score: u8, perfect_form: bool, suggestions: &[&str]) -> FormAnalysis {
        FormAnalysis {
            score,
            issues: Vec::new(),
            suggestions: suggestions.iter().map(|s| s.to_string()).collect(),
            angles: BTreeMap::new(),
            timestamp: 0.0,
            perfect_form,
            improvement: 0.0,
            confidence: 90,
        }
    }

    #[test]
    fn test_celebrates_perfect_form() {
        let mut dispatcher = FeedbackDispatcher::default();
        let message = dispatcher.select(&analysis(97, true, &["ignored"]), 0.0);
        assert_eq!(message.as_deref(), Some(CELEBRATIONS[0]));
    }

    #[test]
    fn test_corrects_poor_form_with_top_suggestion() {
        let mut dispatcher = FeedbackDispatcher::default();
        let message = dispatcher.select(&analysis(55, false, &["Go deeper", "Chest up"]), 0.0);
        assert_eq!(message.as_deref(), Some("Go deeper"));
    }

    #[test]
    fn test_silent_for_decent_form_or_no_suggestion() {
        let mut dispatcher = FeedbackDispatcher::default();
        assert_eq!(dispatcher.select(&analysis(85, false, &["Go deeper"]), 0.0), None);
        assert_eq!(dispatcher.select(&analysis(40, false, &[]), 0.0), None);
        // Silence does not start the cooldown
        assert!(dispatcher.select(&analysis(40, false, &["Go deeper"]), 1.0).is_some());
    }

    #[test]
    fn test_cooldown() {
        let mut dispatcher = FeedbackDispatcher::new(3000.0);
        let poor = analysis(50, false, &["Go deeper"]);
        assert!(dispatcher.select(&poor, 1000.0).is_some());
        assert!(dispatcher.select(&poor, 2000.0).is_none());
        assert!(dispatcher.select(&poor, 3999.0).is_none());
        assert!(dispatcher.select(&poor, 4000.0).is_some());
    }

    #[test]
    fn test_celebrations_rotate() {
        let mut dispatcher = FeedbackDispatcher::new(0.0);
        let perfect = analysis(99, true, &[]);
        let first = dispatcher.select(&perfect, 0.0).unwrap();
        let second = dispatcher.select(&perfect, 1.0).unwrap();
        assert_ne!(first, second);
    }

    #[test]
    fn test_sink_receives_message() {
        let mut dispatcher = FeedbackDispatcher::default();
        let mut spoken: Vec<String> = Vec::new();
        let mut sink = |message: &str| spoken.push(message.to_string());

        dispatcher.maybe_emit(&analysis(40, false, &["Keep your back straight"]), 0.0, &mut sink);
        dispatcher.maybe_emit(&analysis(40, false, &["Keep your back straight"]), 100.0, &mut sink);

        assert_eq!(spoken, vec!["Keep your back straight"]);
    }

    #[test]
    fn test_reset_clears_cooldown() {
        let mut dispatcher = FeedbackDispatcher::default();
        let poor = analysis(50, false, &["Go deeper"]);
        dispatcher.select(&poor, 0.0);
        dispatcher.reset();
        assert!(dispatcher.select(&poor, 10.0).is_some());
    }
}
