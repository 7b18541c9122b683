//! The relaxation pawn: owns every component and drives them once per frame.
//!
//! A host feeds it samples, collision changes and tracking data, calls
//! [`RelaxationPawn::on_tick`] once per frame and applies the returned pose
//! delta to whatever transform it owns. Within a tick the filter advances
//! first, then the state machine may flip, then the active locomotion mode
//! produces the motion.

use glam::Vec3;
use smallvec::SmallVec;

use crate::config::PawnConfig;
use crate::constants::{RAW_SAMPLE_SCALE, RELAXATION_MAX, RELAXATION_MIN};
use crate::error::{RelaxError, Result};
use crate::filter::SlidingWindowFilter;
use crate::grounded::GroundedDurationTracker;
use crate::interp::{InterpMode, VelocityInterpolator};
use crate::paddle::{PaddleLocomotionIntegrator, Pose, PoseDelta, TrackingInput};
use crate::state::{HysteresisStateMachine, RelaxState};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LocomotionMode {
    /// Eased ramp from rest towards the target velocity.
    Intro,
    /// Constant-rate rise and fall.
    #[default]
    DefaultRise,
    /// Hand-paddle swimming.
    Paddle,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum LocomotionEvent {
    StateChanged { relaxed: bool },
    /// Unrelaxed time within the trailing horizon went over the threshold.
    SustainedUnrelaxed { accumulated: f64 },
    /// Landed while relaxed; the host should push off with `velocity`.
    Relaunched { velocity: f32 },
    /// Flipped to relaxed while resting on the ground; the host should let
    /// go of the body so it can rise.
    LiftOff,
    TargetVelocityReached { velocity: f32 },
}

pub type TickEvents = SmallVec<[LocomotionEvent; 4]>;

#[derive(Clone, Debug)]
pub struct TickOutput {
    pub relaxation_value: f32,
    pub is_relaxed: bool,
    pub is_grounded: bool,
    pub velocity: Vec3,
    pub delta: PoseDelta,
    pub events: TickEvents,
}

#[derive(Debug)]
pub struct RelaxationPawn {
    config: PawnConfig,
    filter: SlidingWindowFilter,
    state: HysteresisStateMachine,
    interp: VelocityInterpolator,
    paddle: PaddleLocomotionIntegrator,
    grounded_tracker: GroundedDurationTracker,
    mode: LocomotionMode,
    grounded: bool,
    sustained_unrelaxed: bool,
    tracking: TrackingInput,
    pose: Pose,
    velocity: Vec3,
    clock_sec: f64,
    pending: TickEvents,
}

impl RelaxationPawn {
    pub fn new(config: PawnConfig) -> Result<Self> {
        config.validate()?;
        let initial = RelaxState::from(config.relaxation.start_relaxed);
        Ok(Self {
            filter: SlidingWindowFilter::new(config.relaxation.window_size)?,
            state: HysteresisStateMachine::new(
                initial,
                config.relaxation.opposite_state_threshold,
            ),
            interp: VelocityInterpolator::new(&config.relaxation, initial)?,
            paddle: PaddleLocomotionIntegrator::new(config.paddle.clone())?,
            grounded_tracker: GroundedDurationTracker::new(config.grounded.clone())?,
            config,
            mode: LocomotionMode::default(),
            grounded: false,
            sustained_unrelaxed: false,
            tracking: TrackingInput::default(),
            pose: Pose::default(),
            velocity: Vec3::ZERO,
            clock_sec: 0.0,
            pending: TickEvents::new(),
        })
    }

    pub fn config(&self) -> &PawnConfig {
        &self.config
    }

    pub fn filter(&self) -> &SlidingWindowFilter {
        &self.filter
    }

    pub fn mode(&self) -> LocomotionMode {
        self.mode
    }

    pub fn state(&self) -> RelaxState {
        self.state.state()
    }

    pub fn is_relaxed(&self) -> bool {
        self.state.state().is_relaxed()
    }

    pub fn is_grounded(&self) -> bool {
        self.grounded
    }

    pub fn relaxation_value(&self) -> f32 {
        self.filter.relaxation_value()
    }

    pub fn velocity(&self) -> Vec3 {
        self.velocity
    }

    pub fn target_velocity(&self) -> f32 {
        self.interp.target_velocity()
    }

    pub fn current_velocity(&self) -> f32 {
        self.interp.current_velocity()
    }

    pub fn reached_target_velocity(&self) -> bool {
        self.interp.reached_target()
    }

    pub fn pose(&self) -> Pose {
        self.pose
    }

    /// Overrides the tracked pose, e.g. after the host resolved a collision.
    pub fn set_pose(&mut self, pose: Pose) {
        self.pose = pose;
    }

    /// Seconds of simulation time seen so far.
    pub fn clock_sec(&self) -> f64 {
        self.clock_sec
    }

    pub fn set_tracking(&mut self, tracking: TrackingInput) {
        self.tracking = tracking;
    }

    /// Registers one sensor sample. Non-finite values are rejected; values
    /// outside `[0, 100]` are clamped.
    pub fn register_sample(&mut self, value: f32) -> Result<()> {
        if !value.is_finite() {
            log::warn!("rejecting non-finite sample {value}");
            return Err(RelaxError::NonFiniteSample(value));
        }
        let scaled = if self.config.relaxation.scale_raw_samples {
            value.abs() * RAW_SAMPLE_SCALE
        } else {
            value
        };
        let clamped = scaled.clamp(RELAXATION_MIN, RELAXATION_MAX);
        if clamped != scaled {
            log::debug!("sample {scaled} clamped to {clamped}");
        }
        self.filter.register_sample(clamped)
    }

    pub fn set_interpolation_duration(&mut self, seconds: f32) -> Result<()> {
        self.interp.set_interp_duration(seconds)?;
        self.config.relaxation.interp_duration = seconds;
        Ok(())
    }

    pub fn set_intro_interpolation_duration(&mut self, seconds: f32) -> Result<()> {
        self.interp.set_intro_interp_duration(seconds)?;
        self.config.relaxation.intro_interp_duration = seconds;
        Ok(())
    }

    pub fn select_locomotion_mode(&mut self, mode: LocomotionMode) {
        if mode == self.mode {
            return;
        }
        log::info!("[mode] {:?} -> {:?}", self.mode, mode);
        match mode {
            LocomotionMode::Intro => self.interp.reset_intro(),
            LocomotionMode::Paddle => self.paddle.reset_tracking(),
            LocomotionMode::DefaultRise => {}
        }
        self.mode = mode;
    }

    pub fn on_collision_enter(&mut self) {
        self.grounded = true;
        if self.is_relaxed() {
            let velocity = self.interp.current_velocity();
            log::debug!("[ground] landed while relaxed, relaunch at {velocity}");
            self.pending.push(LocomotionEvent::Relaunched { velocity });
        }
    }

    pub fn on_collision_exit(&mut self) {
        self.grounded = false;
    }

    /// Advances every component by `dt` seconds.
    pub fn on_tick(&mut self, dt: f32) -> Result<TickOutput> {
        if !dt.is_finite() || dt < 0.0 {
            log::warn!("rejecting delta time {dt}");
            return Err(RelaxError::InvalidDeltaTime(dt));
        }
        self.clock_sec += dt as f64;
        let mut events = std::mem::take(&mut self.pending);

        let relaxation_value = self.filter.advance(dt);
        if self.state.should_change_state(relaxation_value, &self.filter) {
            let next = self.state.toggle();
            self.interp.set_target_for(next);
            self.interp.reset_intro();
            log::info!(
                "[relax] relaxed={} at value {:.1}, target velocity {}",
                next.is_relaxed(),
                relaxation_value,
                self.interp.target_velocity()
            );
            events.push(LocomotionEvent::StateChanged {
                relaxed: next.is_relaxed(),
            });
            if next.is_relaxed() && self.grounded {
                // a resting body is not moving down
                let current = self.interp.current_velocity();
                self.interp.set_current_velocity(current.max(0.0));
                log::debug!("[ground] relaxed while grounded, lifting off");
                events.push(LocomotionEvent::LiftOff);
            }
        }

        self.track_unrelaxed_time(dt, &mut events);

        let delta = match self.mode {
            LocomotionMode::Intro => self.vertical_step(InterpMode::EasedIntro, dt, &mut events),
            LocomotionMode::DefaultRise => {
                self.vertical_step(InterpMode::ConstantRate, dt, &mut events)
            }
            LocomotionMode::Paddle => {
                let delta = self.paddle.step(&self.tracking, self.pose.orientation, dt);
                self.velocity = self.paddle.velocity();
                delta
            }
        };
        self.pose = self.pose.apply(delta);

        Ok(TickOutput {
            relaxation_value,
            is_relaxed: self.is_relaxed(),
            is_grounded: self.grounded,
            velocity: self.velocity,
            delta,
            events,
        })
    }

    fn track_unrelaxed_time(&mut self, dt: f32, events: &mut TickEvents) {
        if self.is_relaxed() {
            self.grounded_tracker.clear();
            self.sustained_unrelaxed = false;
            return;
        }
        let sustained = self.grounded_tracker.record_frame(dt as f64, self.clock_sec);
        if sustained && !self.sustained_unrelaxed {
            let accumulated = self.grounded_tracker.running_total();
            log::warn!("[relax] unrelaxed for {accumulated:.2}s within the horizon");
            events.push(LocomotionEvent::SustainedUnrelaxed { accumulated });
        }
        self.sustained_unrelaxed = sustained;
    }

    fn vertical_step(&mut self, mode: InterpMode, dt: f32, events: &mut TickEvents) -> PoseDelta {
        // resting on the ground while not relaxed
        if !self.is_relaxed() && self.grounded {
            self.velocity = Vec3::ZERO;
            return PoseDelta::IDENTITY;
        }
        let was_reached = self.interp.reached_target();
        let z = self.interp.step(mode, dt);
        if !was_reached && self.interp.reached_target() {
            events.push(LocomotionEvent::TargetVelocityReached { velocity: z });
        }
        self.velocity = Vec3::new(0.0, 0.0, z);
        PoseDelta::translation(self.velocity * dt)
    }
}
