//! Accumulates unrelaxed frame time over a trailing window.

use std::collections::VecDeque;

use crate::config::GroundedParams;
use crate::error::Result;

#[derive(Clone, Copy, Debug, PartialEq)]
struct FrameRecord {
    dt: f64,
    timestamp: f64,
}

#[derive(Clone, Debug)]
pub struct GroundedDurationTracker {
    params: GroundedParams,
    frames: VecDeque<FrameRecord>,
    running_total: f64,
}

impl GroundedDurationTracker {
    pub fn new(params: GroundedParams) -> Result<Self> {
        params.validate()?;
        Ok(Self {
            params,
            frames: VecDeque::new(),
            running_total: 0.0,
        })
    }

    pub fn running_total(&self) -> f64 {
        self.running_total
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn clear(&mut self) {
        self.frames.clear();
        self.running_total = 0.0;
    }

    /// Records one unrelaxed frame and returns whether the accumulated time
    /// within the horizon exceeds the threshold.
    ///
    /// Timestamps must be non-decreasing. Frames whose age reaches the horizon
    /// are evicted from the front. Zero-length frames add no time and are not
    /// stored, so a paused clock cannot grow the queue.
    pub fn record_frame(&mut self, dt: f64, timestamp: f64) -> bool {
        if dt <= 0.0 {
            return self.should_stop_relaxed();
        }
        self.frames.push_back(FrameRecord { dt, timestamp });
        self.running_total += dt;
        while let Some(front) = self.frames.front().copied() {
            if timestamp - front.timestamp < self.params.horizon_secs {
                break;
            }
            self.frames.pop_front();
            self.running_total -= front.dt;
        }
        if self.frames.is_empty() {
            self.running_total = 0.0;
        }
        self.should_stop_relaxed()
    }

    pub fn should_stop_relaxed(&self) -> bool {
        self.running_total > self.params.threshold_secs
    }
}
