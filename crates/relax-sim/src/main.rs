use std::f32::consts::TAU;
use std::str::FromStr;

use anyhow::Context;
use glam::Vec3;
use instant::Instant;
use rand::prelude::*;

use relax_core::constants::RELAXATION_MIDPOINT;
use relax_core::{
    LocomotionEvent, LocomotionMode, PawnConfig, Pose, RelaxationPawn, TickOutput,
    TrackingInput,
};

// Host timing
const TICK_HZ: f32 = 90.0; // headset frame rate
const SAMPLE_HZ: f32 = 10.0; // sensor feed, independent of the frame rate
const DEFAULT_SECONDS: f32 = 60.0;
const DEFAULT_SEED: u64 = 42;

// Phase split as fractions of the run
const INTRO_END: f32 = 0.2;
const RISE_END: f32 = 0.7;

// Synthetic relaxation signal
const SIGNAL_PERIOD_SEC: f32 = 20.0;
const SIGNAL_SWING: f32 = 35.0; // around the midpoint
const SIGNAL_NOISE: f32 = 15.0;

// World
const FLOOR_Z: f32 = 0.0;

// Paddle strokes, centimetres relative to the body
const STROKE_HZ: f32 = 0.8;
const STROKE_REACH: f32 = 25.0;
const HEAD_POSITION: [f32; 3] = [0.0, 0.0, 170.0];
const SHOULDER_OFFSET: [f32; 3] = [20.0, 25.0, 130.0];

#[derive(Default)]
struct RunStats {
    flips: u32,
    relaunches: u32,
    lift_offs: u32,
    sustained: u32,
    targets_reached: u32,
    max_height: f32,
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let seconds: f32 = env_or("RELAX_SIM_SECONDS", DEFAULT_SECONDS)?;
    let seed: u64 = env_or("RELAX_SIM_SEED", DEFAULT_SEED)?;
    log::info!("relax-sim starting: {seconds}s at {TICK_HZ} Hz, seed {seed}");

    let mut pawn = RelaxationPawn::new(PawnConfig::default()).context("pawn configuration")?;
    pawn.select_locomotion_mode(LocomotionMode::Intro);
    // starts resting on the floor
    pawn.on_collision_enter();

    let mut rng = StdRng::seed_from_u64(seed);
    let dt = 1.0 / TICK_HZ;
    let sample_interval = 1.0 / SAMPLE_HZ;
    let total_ticks = (seconds * TICK_HZ).ceil() as u32;

    let started = Instant::now();
    let mut stats = RunStats::default();
    let mut since_sample = sample_interval;
    let mut next_report = 1.0f32;

    for tick in 0..total_ticks {
        let t = tick as f32 * dt;
        let progress = t / seconds;
        let mode = if progress < INTRO_END {
            LocomotionMode::Intro
        } else if progress < RISE_END {
            LocomotionMode::DefaultRise
        } else {
            LocomotionMode::Paddle
        };
        pawn.select_locomotion_mode(mode);

        since_sample += dt;
        if since_sample >= sample_interval {
            since_sample -= sample_interval;
            pawn.register_sample(synthetic_sample(t, &mut rng))?;
        }
        if mode == LocomotionMode::Paddle {
            pawn.set_tracking(stroke_tracking(t));
        }

        let out = pawn.on_tick(dt)?;
        record_events(&out, &mut stats);
        resolve_floor(&mut pawn, &out);
        stats.max_height = stats.max_height.max(pawn.pose().position.z);

        if t >= next_report {
            next_report += 1.0;
            let pose = pawn.pose();
            log::info!(
                "t={t:5.1}s {:?} relaxed={} value={:5.1} z={:7.2} v=({:.2}, {:.2}, {:.2}) yaw={:.1}°",
                mode,
                out.is_relaxed,
                out.relaxation_value,
                pose.position.z,
                out.velocity.x,
                out.velocity.y,
                out.velocity.z,
                yaw_degrees(pose),
            );
        }
    }

    log::info!(
        "done in {:?}: {} flips, {} relaunches, {} lift-offs, {} sustained-unrelaxed, {} targets reached, max height {:.2}",
        started.elapsed(),
        stats.flips,
        stats.relaunches,
        stats.lift_offs,
        stats.sustained,
        stats.targets_reached,
        stats.max_height,
    );
    Ok(())
}

fn env_or<T>(key: &str, default: T) -> anyhow::Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .parse()
            .with_context(|| format!("{key}={raw} is not a valid value")),
        Err(_) => Ok(default),
    }
}

/// Slow swing around the midpoint with uniform noise on top.
fn synthetic_sample(t: f32, rng: &mut StdRng) -> f32 {
    let swing = (t / SIGNAL_PERIOD_SEC * TAU).sin() * SIGNAL_SWING;
    let noise = rng.gen_range(-SIGNAL_NOISE..=SIGNAL_NOISE);
    RELAXATION_MIDPOINT + swing + noise
}

/// Breaststroke-like hand circles; the right hand reaches a bit further so
/// the body slowly turns.
fn stroke_tracking(t: f32) -> TrackingInput {
    let phase = t * STROKE_HZ * TAU;
    let shoulder = Vec3::from(SHOULDER_OFFSET);
    let circle = Vec3::new(phase.cos(), 0.0, phase.sin()) * STROKE_REACH;
    TrackingInput {
        left_hand: Vec3::new(shoulder.x, -shoulder.y, shoulder.z) + circle,
        right_hand: shoulder + circle * 1.2,
        head: Vec3::from(HEAD_POSITION),
    }
}

fn record_events(out: &TickOutput, stats: &mut RunStats) {
    for ev in &out.events {
        match ev {
            LocomotionEvent::StateChanged { .. } => stats.flips += 1,
            LocomotionEvent::Relaunched { velocity } => {
                stats.relaunches += 1;
                log::info!("[ground] relaunch at {velocity:.2}");
            }
            LocomotionEvent::LiftOff => stats.lift_offs += 1,
            LocomotionEvent::SustainedUnrelaxed { .. } => stats.sustained += 1,
            LocomotionEvent::TargetVelocityReached { .. } => stats.targets_reached += 1,
        }
    }
}

/// Stand-in for the engine's collision: a flat floor at `FLOOR_Z`.
fn resolve_floor(pawn: &mut RelaxationPawn, out: &TickOutput) {
    let pose = pawn.pose();
    let relaunch = out.events.iter().any(|ev| {
        matches!(ev, LocomotionEvent::Relaunched { .. } | LocomotionEvent::LiftOff)
    });
    if pose.position.z <= FLOOR_Z {
        pawn.set_pose(Pose {
            position: Vec3::new(pose.position.x, pose.position.y, FLOOR_Z),
            ..pose
        });
        if !pawn.is_grounded() {
            pawn.on_collision_enter();
        }
    } else if pawn.is_grounded() && (relaunch || out.velocity.z > 0.0) {
        pawn.on_collision_exit();
    }
}

fn yaw_degrees(pose: Pose) -> f32 {
    let (yaw, _, _) = pose.orientation.to_euler(glam::EulerRot::ZYX);
    yaw.to_degrees()
}
