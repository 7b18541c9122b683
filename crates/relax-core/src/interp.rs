//! Vertical velocity easing between the fall and rise velocities.
//!
//! Two strategies share the same target: a constant-rate approach used in
//! steady state, and an eased ramp from rest used once during the intro.

use crate::config::{validate_duration, RelaxationParams};
use crate::constants::{EASE_IN_EXPONENT, EASE_OUT_EXPONENT, VELOCITY_EPSILON};
use crate::error::Result;
use crate::filter::lerp;
use crate::state::RelaxState;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InterpMode {
    ConstantRate,
    EasedIntro,
}

#[derive(Clone, Debug)]
pub struct VelocityInterpolator {
    rise_velocity: f32,
    fall_velocity: f32,
    interp_speed: f32,
    intro_speed: f32,
    target_velocity: f32,
    current_velocity: f32,
    intro_alpha: f32,
}

impl VelocityInterpolator {
    pub fn new(params: &RelaxationParams, initial: RelaxState) -> Result<Self> {
        params.validate()?;
        let mut interp = Self {
            rise_velocity: params.rise_velocity,
            fall_velocity: params.fall_velocity,
            interp_speed: 0.0,
            intro_speed: 0.0,
            target_velocity: 0.0,
            current_velocity: 0.0,
            intro_alpha: 0.0,
        };
        interp.set_interp_duration(params.interp_duration)?;
        interp.set_intro_interp_duration(params.intro_interp_duration)?;
        interp.set_target_for(initial);
        Ok(interp)
    }

    /// Rate of the constant approach becomes `(rise - fall) / seconds`.
    pub fn set_interp_duration(&mut self, seconds: f32) -> Result<()> {
        validate_duration("interp_duration", seconds)?;
        self.interp_speed = (self.rise_velocity - self.fall_velocity) / seconds;
        log::debug!("interp duration {seconds}s -> speed {}", self.interp_speed);
        Ok(())
    }

    /// The eased ramp covers `[0, 1]` in `seconds`.
    pub fn set_intro_interp_duration(&mut self, seconds: f32) -> Result<()> {
        validate_duration("intro_interp_duration", seconds)?;
        self.intro_speed = 1.0 / seconds;
        log::debug!("intro duration {seconds}s -> speed {}", self.intro_speed);
        Ok(())
    }

    pub fn set_target_for(&mut self, state: RelaxState) {
        self.target_velocity = if state.is_relaxed() {
            self.rise_velocity
        } else {
            self.fall_velocity
        };
    }

    pub fn reset_intro(&mut self) {
        self.intro_alpha = 0.0;
    }

    pub fn target_velocity(&self) -> f32 {
        self.target_velocity
    }

    pub fn current_velocity(&self) -> f32 {
        self.current_velocity
    }

    pub fn set_current_velocity(&mut self, velocity: f32) {
        self.current_velocity = velocity;
    }

    pub fn interp_speed(&self) -> f32 {
        self.interp_speed
    }

    pub fn intro_alpha(&self) -> f32 {
        self.intro_alpha
    }

    /// Converged within [`VELOCITY_EPSILON`].
    pub fn reached_target(&self) -> bool {
        (self.current_velocity - self.target_velocity).abs() <= VELOCITY_EPSILON
    }

    /// Moves the current velocity one frame towards the target and returns it.
    pub fn step(&mut self, mode: InterpMode, dt: f32) -> f32 {
        if self.reached_target() {
            return self.current_velocity;
        }
        self.current_velocity = match mode {
            InterpMode::ConstantRate => interp_constant_to(
                self.current_velocity,
                self.target_velocity,
                dt,
                self.interp_speed,
            ),
            InterpMode::EasedIntro => {
                self.intro_alpha = (self.intro_alpha + dt * self.intro_speed).clamp(0.0, 1.0);
                ease_in_out(
                    0.0,
                    self.target_velocity,
                    self.intro_alpha,
                    EASE_IN_EXPONENT,
                    EASE_OUT_EXPONENT,
                )
            }
        };
        self.current_velocity
    }
}

/// Steps `current` towards `target` by at most `speed * dt`, never past it.
/// Snaps onto the target once within [`VELOCITY_EPSILON`].
pub fn interp_constant_to(current: f32, target: f32, dt: f32, speed: f32) -> f32 {
    let dist = target - current;
    if dist.abs() <= VELOCITY_EPSILON || speed <= 0.0 {
        return target;
    }
    let step = speed * dt;
    current + dist.clamp(-step, step)
}

/// Symmetric ease-in/ease-out blend from `a` to `b`.
///
/// The first half follows `1 - (1 - 2t)^exp_in`, the second `(2t - 1)^exp_out`,
/// both scaled into `[0, 0.5]` and `[0.5, 1]` so the curve meets at `t = 0.5`.
pub fn ease_in_out(a: f32, b: f32, alpha: f32, exp_in: f32, exp_out: f32) -> f32 {
    let t = alpha.clamp(0.0, 1.0);
    let eased = if t < 0.5 {
        (1.0 - (1.0 - t * 2.0).powf(exp_in)) * 0.5
    } else {
        (t * 2.0 - 1.0).powf(exp_out) * 0.5 + 0.5
    };
    lerp(a, b, eased)
}
