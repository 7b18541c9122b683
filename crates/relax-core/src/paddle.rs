//! Hand-paddling locomotion for free swimming.
//!
//! Each tracked hand pushes against the surrounding fluid. The per-frame hand
//! displacement becomes a quadratic drag force; the forces push the body the
//! opposite way and their torque about the center of mass turns it around the
//! vertical axis. Velocities are integrated with exponential damping.

use glam::{EulerRot, Quat, Vec3};

use crate::config::PaddleParams;
use crate::constants::PADDLE_UNIT_SCALE;
use crate::error::Result;
use crate::filter::lerp;

/// Body-relative tracking data for one frame.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TrackingInput {
    pub left_hand: Vec3,
    pub right_hand: Vec3,
    /// Head (HMD) position; its height scales down to the center of mass.
    pub head: Vec3,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Pose {
    pub position: Vec3,
    pub orientation: Quat,
}

impl Default for Pose {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            orientation: Quat::IDENTITY,
        }
    }
}

impl Pose {
    pub fn apply(self, delta: PoseDelta) -> Self {
        Self {
            position: self.position + delta.translation,
            orientation: (self.orientation * delta.rotation).normalize(),
        }
    }
}

/// World-space translation plus a rotation composed on the right of the
/// current orientation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PoseDelta {
    pub translation: Vec3,
    pub rotation: Quat,
}

impl PoseDelta {
    pub const IDENTITY: Self = Self {
        translation: Vec3::ZERO,
        rotation: Quat::IDENTITY,
    };

    pub fn translation(translation: Vec3) -> Self {
        Self {
            translation,
            rotation: Quat::IDENTITY,
        }
    }
}

#[derive(Clone, Debug)]
pub struct PaddleLocomotionIntegrator {
    params: PaddleParams,
    velocity: Vec3,
    angular_velocity: Vec3,
    center_of_mass: Vec3,
    prev_left: Option<Vec3>,
    prev_right: Option<Vec3>,
}

impl PaddleLocomotionIntegrator {
    pub fn new(params: PaddleParams) -> Result<Self> {
        params.validate()?;
        Ok(Self {
            params,
            velocity: Vec3::ZERO,
            angular_velocity: Vec3::ZERO,
            center_of_mass: Vec3::ZERO,
            prev_left: None,
            prev_right: None,
        })
    }

    pub fn params(&self) -> &PaddleParams {
        &self.params
    }

    pub fn velocity(&self) -> Vec3 {
        self.velocity
    }

    pub fn angular_velocity(&self) -> Vec3 {
        self.angular_velocity
    }

    pub fn center_of_mass(&self) -> Vec3 {
        self.center_of_mass
    }

    pub fn set_velocity(&mut self, velocity: Vec3) {
        self.velocity = velocity;
    }

    /// Forget the previous hand positions; the next step only seeds them.
    pub fn reset_tracking(&mut self) {
        self.prev_left = None;
        self.prev_right = None;
    }

    /// Quadratic drag produced by a hand that moved by `hand_delta` this frame.
    ///
    /// The displacement is turned into metres per second, damped by the cheat
    /// quotient and clamped to the maximum hand speed. Drag coefficient and
    /// presented area grow linearly with the clamped speed.
    pub fn drag_force(&self, hand_delta: Vec3, dt: f32) -> Vec3 {
        if dt <= 0.0 {
            return Vec3::ZERO;
        }
        let p = &self.params;
        let hand_velocity = hand_delta / (PADDLE_UNIT_SCALE * dt) / p.cheat_quotient;
        let speed = hand_velocity.length().clamp(0.0, p.max_hand_speed);
        let ratio = speed / p.max_hand_speed;
        let cd = lerp(p.drag_coefficient_min, p.drag_coefficient_max, ratio);
        let area = lerp(p.hand_area_min, p.hand_area_max, ratio);
        hand_velocity.normalize_or_zero() * (0.5 * p.fluid_density * cd * area * speed * speed)
    }

    /// Integrates one frame and returns the pose change to apply.
    pub fn step(&mut self, input: &TrackingInput, orientation: Quat, dt: f32) -> PoseDelta {
        let prev_left = self.prev_left.replace(input.left_hand).unwrap_or(input.left_hand);
        let prev_right = self.prev_right.replace(input.right_hand).unwrap_or(input.right_hand);
        if dt <= 0.0 {
            return PoseDelta::IDENTITY;
        }
        let p = &self.params;

        let left_force = self.drag_force(input.left_hand - prev_left, dt);
        let right_force = self.drag_force(input.right_hand - prev_right, dt);

        self.center_of_mass = Vec3::new(
            input.head.x,
            input.head.y,
            input.head.z * p.center_of_mass_height_rate,
        );
        let left_torque = left_force.cross(input.left_hand - self.center_of_mass);
        let right_torque = right_force.cross(input.right_hand - self.center_of_mass);

        let acceleration = orientation * (-(left_force + right_force) / p.mass);
        // yaw only
        let yaw_acceleration = (left_torque + right_torque).z / p.moment_of_inertia;
        let angular_acceleration = orientation * Vec3::new(0.0, 0.0, yaw_acceleration);

        let damping = (1.0 - p.drag * dt).max(0.0);
        self.velocity = (self.velocity + acceleration * p.linear_gain) * damping;
        self.angular_velocity =
            (self.angular_velocity + angular_acceleration * dt * dt * p.angular_gain) * damping;

        let turn = self.angular_velocity * dt;
        PoseDelta {
            translation: self.velocity * dt,
            rotation: Quat::from_euler(EulerRot::ZYX, turn.z, turn.y, turn.x),
        }
    }
}
