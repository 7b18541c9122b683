//! Two-state relaxed / not-relaxed machine with sample-majority hysteresis.

use crate::constants::RELAXATION_MIDPOINT;
use crate::filter::SlidingWindowFilter;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RelaxState {
    Relaxed,
    #[default]
    NotRelaxed,
}

impl RelaxState {
    pub fn is_relaxed(self) -> bool {
        matches!(self, RelaxState::Relaxed)
    }

    pub fn toggled(self) -> Self {
        match self {
            RelaxState::Relaxed => RelaxState::NotRelaxed,
            RelaxState::NotRelaxed => RelaxState::Relaxed,
        }
    }
}

impl From<bool> for RelaxState {
    fn from(relaxed: bool) -> Self {
        if relaxed {
            RelaxState::Relaxed
        } else {
            RelaxState::NotRelaxed
        }
    }
}

#[derive(Clone, Debug)]
pub struct HysteresisStateMachine {
    state: RelaxState,
    opposite_state_threshold: f32,
}

impl HysteresisStateMachine {
    pub fn new(initial: RelaxState, opposite_state_threshold: f32) -> Self {
        Self {
            state: initial,
            opposite_state_threshold,
        }
    }

    pub fn state(&self) -> RelaxState {
        self.state
    }

    pub fn opposite_state_threshold(&self) -> f32 {
        self.opposite_state_threshold
    }

    /// Whether the state should flip this frame.
    ///
    /// The smoothed `relaxation_value` has to sit on the far side of the
    /// midpoint first; only then is the raw window consulted, and the share of
    /// samples backing the opposite state must reach the threshold.
    pub fn should_change_state(
        &self,
        relaxation_value: f32,
        window: &SlidingWindowFilter,
    ) -> bool {
        let crossed = match self.state {
            RelaxState::Relaxed => relaxation_value < RELAXATION_MIDPOINT,
            RelaxState::NotRelaxed => relaxation_value >= RELAXATION_MIDPOINT,
        };
        if !crossed {
            return false;
        }
        let unrelaxed_rate = window.rate_below(RELAXATION_MIDPOINT);
        match self.state {
            RelaxState::Relaxed => unrelaxed_rate >= self.opposite_state_threshold,
            RelaxState::NotRelaxed => 1.0 - unrelaxed_rate >= self.opposite_state_threshold,
        }
    }

    /// Flips the state and returns the new one.
    pub fn toggle(&mut self) -> RelaxState {
        self.state = self.state.toggled();
        self.state
    }
}
