//! Typed parameter sets for the pawn and its components.
//!
//! Defaults come from [`crate::constants`]. Everything that ends up as a
//! divisor is checked by [`PawnConfig::validate`] so that no NaN or infinity
//! can reach the long-lived filter and velocity state.

use crate::constants::*;
use crate::error::{RelaxError, Result};

#[derive(Clone, Debug, PartialEq)]
pub struct RelaxationParams {
    /// Number of stored samples. Averages span `window_size - 1` of them.
    pub window_size: usize,
    /// Share of the window, in [0, 1], that must back the opposite state.
    pub opposite_state_threshold: f32,
    pub rise_velocity: f32,
    pub fall_velocity: f32,
    /// Seconds to go from fall to rise velocity in the default rise mode.
    pub interp_duration: f32,
    /// Seconds of the eased ramp from rest to target in intro mode.
    pub intro_interp_duration: f32,
    pub start_relaxed: bool,
    /// Map raw samples to `|v| * 100` before use.
    pub scale_raw_samples: bool,
}

impl Default for RelaxationParams {
    fn default() -> Self {
        Self {
            window_size: DEFAULT_WINDOW_SIZE,
            opposite_state_threshold: DEFAULT_OPPOSITE_STATE_THRESHOLD,
            rise_velocity: DEFAULT_RISE_VELOCITY,
            fall_velocity: DEFAULT_FALL_VELOCITY,
            interp_duration: DEFAULT_INTERP_DURATION_SEC,
            intro_interp_duration: DEFAULT_INTRO_INTERP_DURATION_SEC,
            start_relaxed: false,
            scale_raw_samples: false,
        }
    }
}

impl RelaxationParams {
    pub fn validate(&self) -> Result<()> {
        if self.window_size == 0 {
            return Err(RelaxError::config("window_size", "must be at least 1"));
        }
        if !(0.0..=1.0).contains(&self.opposite_state_threshold) {
            return Err(RelaxError::config(
                "opposite_state_threshold",
                format!("{} is outside [0, 1]", self.opposite_state_threshold),
            ));
        }
        if !self.rise_velocity.is_finite() || self.rise_velocity < 0.0 {
            return Err(RelaxError::config(
                "rise_velocity",
                "must be finite and >= 0",
            ));
        }
        if !self.fall_velocity.is_finite() || self.fall_velocity > 0.0 {
            return Err(RelaxError::config(
                "fall_velocity",
                "must be finite and <= 0",
            ));
        }
        validate_duration("interp_duration", self.interp_duration)?;
        validate_duration("intro_interp_duration", self.intro_interp_duration)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct PaddleParams {
    pub fluid_density: f32,
    pub drag_coefficient_min: f32,
    pub drag_coefficient_max: f32,
    pub hand_area_min: f32,
    pub hand_area_max: f32,
    pub max_hand_speed: f32,
    pub mass: f32,
    pub moment_of_inertia: f32,
    /// Exponential damping applied to both linear and angular velocity.
    pub drag: f32,
    /// Vertical fraction of the head position used as the center of mass.
    pub center_of_mass_height_rate: f32,
    pub cheat_quotient: f32,
    pub linear_gain: f32,
    pub angular_gain: f32,
}

impl Default for PaddleParams {
    fn default() -> Self {
        Self {
            fluid_density: DEFAULT_FLUID_DENSITY,
            drag_coefficient_min: DEFAULT_DRAG_COEFFICIENT_MIN,
            drag_coefficient_max: DEFAULT_DRAG_COEFFICIENT_MAX,
            hand_area_min: DEFAULT_HAND_AREA_MIN,
            hand_area_max: DEFAULT_HAND_AREA_MAX,
            max_hand_speed: DEFAULT_MAX_HAND_SPEED,
            mass: DEFAULT_BODY_MASS,
            moment_of_inertia: DEFAULT_MOMENT_OF_INERTIA,
            drag: DEFAULT_BODY_DRAG,
            center_of_mass_height_rate: DEFAULT_CENTER_OF_MASS_HEIGHT_RATE,
            cheat_quotient: PADDLE_CHEAT_QUOTIENT,
            linear_gain: PADDLE_LINEAR_GAIN,
            angular_gain: PADDLE_ANGULAR_GAIN,
        }
    }
}

impl PaddleParams {
    pub fn validate(&self) -> Result<()> {
        for (field, value) in [
            ("max_hand_speed", self.max_hand_speed),
            ("mass", self.mass),
            ("moment_of_inertia", self.moment_of_inertia),
            ("cheat_quotient", self.cheat_quotient),
        ] {
            validate_duration(field, value)?;
        }
        for (field, value) in [
            ("fluid_density", self.fluid_density),
            ("drag_coefficient_min", self.drag_coefficient_min),
            ("drag_coefficient_max", self.drag_coefficient_max),
            ("hand_area_min", self.hand_area_min),
            ("hand_area_max", self.hand_area_max),
            ("drag", self.drag),
            ("center_of_mass_height_rate", self.center_of_mass_height_rate),
            ("linear_gain", self.linear_gain),
            ("angular_gain", self.angular_gain),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(RelaxError::config(field, "must be finite and >= 0"));
            }
        }
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct GroundedParams {
    /// Trailing window the unrelaxed frames are summed over.
    pub horizon_secs: f64,
    /// Accumulated unrelaxed time that raises the sustained signal.
    pub threshold_secs: f64,
}

impl Default for GroundedParams {
    fn default() -> Self {
        Self {
            horizon_secs: GROUNDED_HORIZON_SEC,
            threshold_secs: GROUNDED_THRESHOLD_SEC,
        }
    }
}

impl GroundedParams {
    pub fn validate(&self) -> Result<()> {
        if !self.horizon_secs.is_finite() || self.horizon_secs <= 0.0 {
            return Err(RelaxError::config("horizon_secs", "must be finite and > 0"));
        }
        if !self.threshold_secs.is_finite() || self.threshold_secs < 0.0 {
            return Err(RelaxError::config(
                "threshold_secs",
                "must be finite and >= 0",
            ));
        }
        Ok(())
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct PawnConfig {
    pub relaxation: RelaxationParams,
    pub paddle: PaddleParams,
    pub grounded: GroundedParams,
}

impl PawnConfig {
    pub fn validate(&self) -> Result<()> {
        self.relaxation.validate()?;
        self.paddle.validate()?;
        self.grounded.validate()
    }
}

/// Durations and other divisors must be finite and strictly positive.
pub(crate) fn validate_duration(field: &'static str, value: f32) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(RelaxError::config(
            field,
            format!("{value} must be finite and > 0"),
        ))
    }
}
