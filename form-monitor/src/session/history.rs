//! Session history and statistics
//!
//! Bounded ring buffer of scored analyses. Statistics are recomputed on
//! demand from the most recent window.

use std::collections::VecDeque;

use serde::Serialize;

use super::analysis::FormAnalysis;

/// Default number of analyses kept
pub const HISTORY_CAPACITY: usize = 100;

/// Default number of recent analyses used for statistics
pub const STATS_WINDOW: usize = 50;

/// Aggregate view of the current session
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionStatistics {
    pub average_score: f32,
    pub perfect_form_count: usize,
    /// 100 minus the standard deviation of scores, floored at 0
    pub consistency: f32,
    /// Analyses recorded since the session started
    pub total_analyses: usize,
    pub confidence_average: f32,
    pub best_score: u8,
    /// Mean of the newer half minus mean of the older half
    pub improvement_trend: f32,
}

/// Ring buffer of analyses for one session
pub struct SessionHistory {
    entries: VecDeque<FormAnalysis>,
    capacity: usize,
    stats_window: usize,
    total_recorded: usize,
}

impl SessionHistory {
    pub fn new(capacity: usize, stats_window: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
            stats_window: stats_window.clamp(1, capacity),
            total_recorded: 0,
        }
    }

    /// Append an analysis, dropping the oldest when full
    pub fn record(&mut self, analysis: FormAnalysis) {
        if self.entries.len() == self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(analysis);
        self.total_recorded += 1;
    }

    pub fn latest(&self) -> Option<&FormAnalysis> {
        self.entries.back()
    }

    /// Mean of the last `n` scores, `None` when empty
    pub fn mean_recent_score(&self, n: usize) -> Option<f32> {
        let take = n.min(self.entries.len());
        if take == 0 {
            return None;
        }
        let sum: f32 = self.entries.iter().rev().take(take).map(|a| a.score as f32).sum();
        Some(sum / take as f32)
    }

    /// Statistics over the most recent window, `None` when empty
    pub fn stats(&self) -> Option<SessionStatistics> {
        if self.entries.is_empty() {
            return None;
        }

        let skip = self.entries.len().saturating_sub(self.stats_window);
        let window: Vec<&FormAnalysis> = self.entries.iter().skip(skip).collect();
        let scores: Vec<f32> = window.iter().map(|a| a.score as f32).collect();

        let average_score = mean(&scores);
        let variance = scores.iter().map(|s| (s - average_score).powi(2)).sum::<f32>() / scores.len() as f32;
        let consistency = (100.0 - variance.sqrt()).max(0.0);

        let improvement_trend = if scores.len() < 2 {
            0.0
        } else {
            let (older, newer) = scores.split_at(scores.len() / 2);
            mean(newer) - mean(older)
        };

        let confidences: Vec<f32> = window.iter().map(|a| a.confidence as f32).collect();

        Some(SessionStatistics {
            average_score,
            perfect_form_count: window.iter().filter(|a| a.perfect_form).count(),
            consistency,
            total_analyses: self.total_recorded,
            confidence_average: mean(&confidences),
            best_score: window.iter().map(|a| a.score).max().unwrap_or(0),
            improvement_trend,
        })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drop everything (on session stop)
    pub fn clear(&mut self) {
        self.entries.clear();
        self.total_recorded = 0;
    }
}

impl Default for SessionHistory {
    fn default() -> Self {
        Self::new(HISTORY_CAPACITY, STATS_WINDOW)
    }
}

fn mean(values: &[f32]) -> f32 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f32>() / values.len() as f32
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn analysis(score: u8, confidence: u8, perfect_form: bool) -> FormAnalysis {
        FormAnalysis {
            score,
            issues: Vec::new(),
            suggestions: Vec::new(),
            angles: BTreeMap::new(),
            timestamp: 0.0,
            perfect_form,
            improvement: 0.0,
            confidence,
        }
    }

    #[test]
    fn test_empty_has_no_stats() {
        assert!(SessionHistory::default().stats().is_none());
        assert_eq!(SessionHistory::default().mean_recent_score(5), None);
    }

    #[test]
    fn test_single_entry() {
        let mut history = SessionHistory::default();
        history.record(analysis(72, 88, false));
        let stats = history.stats().unwrap();
        assert_eq!(stats.average_score, 72.0);
        assert_eq!(stats.consistency, 100.0);
        assert!(!stats.consistency.is_nan());
        assert_eq!(stats.improvement_trend, 0.0);
        assert_eq!(stats.best_score, 72);
        assert_eq!(stats.total_analyses, 1);
    }

    #[test]
    fn test_stats_values() {
        let mut history = SessionHistory::default();
        for (score, perfect) in [(60, false), (70, false), (96, true), (98, true)] {
            history.record(analysis(score, 90, perfect));
        }
        let stats = history.stats().unwrap();
        assert!((stats.average_score - 81.0).abs() < 1e-4);
        assert_eq!(stats.perfect_form_count, 2);
        assert_eq!(stats.best_score, 98);
        // (96 + 98) / 2 - (60 + 70) / 2
        assert!((stats.improvement_trend - 32.0).abs() < 1e-4);
        assert!((stats.confidence_average - 90.0).abs() < 1e-4);
        // population variance of [60, 70, 96, 98] is 269
        assert!((stats.consistency - (100.0 - 269f32.sqrt())).abs() < 1e-3);
    }

    #[test]
    fn test_consistency_at_widest_spread() {
        let mut history = SessionHistory::new(10, 10);
        for i in 0..10 {
            history.record(analysis(if i % 2 == 0 { 0 } else { 100 }, 50, false));
        }
        let stats = history.stats().unwrap();
        assert!((stats.consistency - 50.0).abs() < 1e-4);
        assert!(stats.consistency >= 0.0);
    }

    #[test]
    fn test_capacity_and_window() {
        let mut history = SessionHistory::new(100, 50);
        for i in 0..150u32 {
            history.record(analysis((i % 100) as u8, 80, false));
        }
        assert_eq!(history.len(), 100);
        let stats = history.stats().unwrap();
        assert_eq!(stats.total_analyses, 150);
        // window = last 50 entries = scores 0..=49 (i = 100..150)
        assert_eq!(stats.best_score, 49);
        assert!((stats.average_score - 24.5).abs() < 1e-4);
    }

    #[test]
    fn test_mean_recent_score() {
        let mut history = SessionHistory::default();
        for score in [10, 20, 30, 40, 50, 60] {
            history.record(analysis(score, 80, false));
        }
        assert_eq!(history.mean_recent_score(5), Some(40.0));
        assert_eq!(history.mean_recent_score(100), Some(35.0));
    }

    #[test]
    fn test_clear() {
        let mut history = SessionHistory::default();
        history.record(analysis(50, 50, false));
        history.clear();
        assert!(history.is_empty());
        assert!(history.stats().is_none());
    }
}
