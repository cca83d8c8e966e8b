//! Score smoother - One Euro filter over the form score
//!
//! The raw score jumps a few points frame to frame even when form is
//! steady. The filter holds it still at rest and follows quickly once the
//! score really moves (the cutoff rises with the rate of change).

use std::f32::consts::TAU;

/// Exponential smoothing stage
#[derive(Debug, Clone, Copy, Default)]
struct LowPass {
    last: Option<f32>,
}

impl LowPass {
    fn apply(&mut self, x: f32, alpha: f32) -> f32 {
        let y = match self.last {
            Some(prev) => prev + alpha * (x - prev),
            None => x,
        };
        self.last = Some(y);
        y
    }
}

/// Blend factor for a first-order low-pass at `cutoff` Hz sampled every `dt` s
fn alpha(dt: f32, cutoff: f32) -> f32 {
    let r = TAU * cutoff * dt;
    r / (r + 1.0)
}

/// Adaptive low-pass filter keyed by timestamps in seconds
#[derive(Debug, Clone)]
pub struct OneEuroFilter {
    /// Cutoff at rest (Hz), lower is steadier
    min_cutoff: f32,
    /// How much the cutoff grows with the rate of change
    beta: f32,
    /// Cutoff for the rate estimate (Hz)
    slope_cutoff: f32,

    value: LowPass,
    slope: LowPass,
    last_t: Option<f64>,
}

impl OneEuroFilter {
    pub fn new(min_cutoff: f32, beta: f32) -> Self {
        Self {
            min_cutoff,
            beta,
            slope_cutoff: 1.0,
            value: LowPass::default(),
            slope: LowPass::default(),
            last_t: None,
        }
    }

    /// Tuned for a 0-100 form score sampled at up to 30Hz
    pub fn for_form_score() -> Self {
        Self::new(0.5, 0.05)
    }

    /// Feed one sample at time `t` (seconds), returns the smoothed value
    ///
    /// Samples that do not move time forward leave the filter untouched.
    pub fn filter(&mut self, t: f64, x: f32) -> f32 {
        let (Some(last_t), Some(prev)) = (self.last_t, self.value.last) else {
            // Rate starts at rest so the first step is blended, not taken raw
            self.slope = LowPass { last: Some(0.0) };
            self.last_t = Some(t);
            return self.value.apply(x, 1.0);
        };

        let dt = (t - last_t) as f32;
        if !(dt > 0.0) {
            return prev;
        }
        self.last_t = Some(t);

        let rate = self.slope.apply((x - prev) / dt, alpha(dt, self.slope_cutoff));
        let cutoff = self.min_cutoff + self.beta * rate.abs();
        self.value.apply(x, alpha(dt, cutoff))
    }

    /// Last smoothed value, `None` before the first sample
    pub fn value(&self) -> Option<f32> {
        self.value.last
    }

    pub fn reset(&mut self) {
        self.value = LowPass::default();
        self.slope = LowPass::default();
        self.last_t = None;
    }
}

impl Default for OneEuroFilter {
    fn default() -> Self {
        Self::for_form_score()
    }
}
