//! Sliding window over the incoming relaxation samples.
//!
//! The window is stored newest-first and always holds exactly `window_size`
//! entries. Two overlapping averages are kept: `current` over the newest
//! `N - 1` samples and `previous` over the oldest `N - 1`. Between two
//! registrations the smoothed relaxation value walks from `previous` to
//! `current` over one second of simulation time.

use std::collections::VecDeque;

use crate::error::{RelaxError, Result};

#[derive(Clone, Debug)]
pub struct SlidingWindowFilter {
    samples: VecDeque<f32>,
    previous_average: f32,
    current_average: f32,
    interp_time: f32,
    relaxation_value: f32,
}

impl SlidingWindowFilter {
    /// Creates a window of `window_size` zeros.
    pub fn new(window_size: usize) -> Result<Self> {
        if window_size == 0 {
            return Err(RelaxError::config("window_size", "must be at least 1"));
        }
        Ok(Self {
            samples: std::iter::repeat(0.0).take(window_size).collect(),
            previous_average: 0.0,
            current_average: 0.0,
            interp_time: 0.0,
            relaxation_value: 0.0,
        })
    }

    pub fn window_size(&self) -> usize {
        self.samples.len()
    }

    /// Samples, newest first.
    pub fn samples(&self) -> impl Iterator<Item = f32> + '_ {
        self.samples.iter().copied()
    }

    pub fn previous_average(&self) -> f32 {
        self.previous_average
    }

    pub fn current_average(&self) -> f32 {
        self.current_average
    }

    pub fn relaxation_value(&self) -> f32 {
        self.relaxation_value
    }

    /// Pushes `value` as the newest sample and drops the oldest one, then
    /// refreshes both averages and restarts the interpolation.
    pub fn register_sample(&mut self, value: f32) -> Result<()> {
        if !value.is_finite() {
            return Err(RelaxError::NonFiniteSample(value));
        }
        self.samples.push_front(value);
        self.samples.pop_back();
        self.interp_time = 0.0;
        let (previous, current) = self.compute_averages();
        self.previous_average = previous;
        self.current_average = current;
        Ok(())
    }

    /// Returns `(previous, current)` for the samples currently held.
    pub fn compute_averages(&self) -> (f32, f32) {
        let n = self.samples.len();
        if n <= 2 {
            // flat values, nothing to average
            let newest = self.samples[0];
            let oldest = self.samples[n - 1];
            return (oldest, newest);
        }
        let span = (n - 1) as f32;
        let inner: f32 = self.samples.iter().skip(1).take(n - 2).sum();
        let newest = self.samples[0];
        let oldest = self.samples[n - 1];
        ((inner + oldest) / span, (inner + newest) / span)
    }

    /// Advances the interpolation by `dt` seconds and returns the smoothed
    /// relaxation value for this frame.
    pub fn advance(&mut self, dt: f32) -> f32 {
        let t = self.interp_time.min(1.0);
        self.relaxation_value = lerp(self.previous_average, self.current_average, t);
        self.interp_time = (self.interp_time + dt).min(1.0);
        self.relaxation_value
    }

    /// Fraction of the window strictly below `midpoint`.
    pub fn rate_below(&self, midpoint: f32) -> f32 {
        let below = self.samples.iter().filter(|&&v| v < midpoint).count();
        below as f32 / self.samples.len() as f32
    }
}

#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}
