// End-to-end tests driving the relaxation pawn through its per-frame interface.

use glam::Vec3;
use relax_core::{
    LocomotionEvent, LocomotionMode, PawnConfig, RelaxError, RelaxationParams, RelaxationPawn,
    TickOutput, TrackingInput,
};

const EPS: f32 = 1e-3;

fn config() -> PawnConfig {
    PawnConfig {
        relaxation: RelaxationParams {
            window_size: 5,
            opposite_state_threshold: 0.7,
            rise_velocity: 10.0,
            fall_velocity: -10.0,
            interp_duration: 3.0,
            intro_interp_duration: 2.0,
            ..RelaxationParams::default()
        },
        ..PawnConfig::default()
    }
}

fn relaxed_pawn() -> RelaxationPawn {
    let mut pawn = RelaxationPawn::new(PawnConfig {
        relaxation: RelaxationParams {
            start_relaxed: true,
            ..config().relaxation
        },
        ..config()
    })
    .unwrap();
    for _ in 0..5 {
        pawn.register_sample(80.0).unwrap();
    }
    pawn
}

fn has_event(out: &TickOutput, pred: impl Fn(&LocomotionEvent) -> bool) -> bool {
    out.events.iter().any(pred)
}

#[test]
fn rising_scenario_flips_once_the_window_agrees() {
    let mut pawn = RelaxationPawn::new(config()).unwrap();
    assert!(!pawn.is_relaxed());
    assert_eq!(pawn.target_velocity(), -10.0);

    let expected_values = [0.0, 20.0, 40.0, 60.0, 80.0];
    let expected_velocity = [-20.0 / 3.0, -10.0, -10.0, -10.0 / 3.0, 10.0 / 3.0];
    for tick in 0..5 {
        pawn.register_sample(80.0).unwrap();
        let out = pawn.on_tick(1.0).unwrap();
        assert!(
            (out.relaxation_value - expected_values[tick]).abs() < EPS,
            "tick {tick}: value {}",
            out.relaxation_value
        );
        let flipped =
            has_event(&out, |e| matches!(e, LocomotionEvent::StateChanged { relaxed: true }));
        assert_eq!(flipped, tick == 3, "unexpected flip state at tick {tick}");
        assert_eq!(out.is_relaxed, tick >= 3);
        assert!(
            (out.velocity.z - expected_velocity[tick]).abs() < EPS,
            "tick {tick}: velocity {}",
            out.velocity.z
        );
        assert!((out.delta.translation.z - out.velocity.z).abs() < EPS);
    }
    assert_eq!(pawn.target_velocity(), 10.0);

    let out = pawn.on_tick(1.0).unwrap();
    assert!((out.velocity.z - 10.0).abs() < EPS);
    assert!(pawn.reached_target_velocity());
    assert!(has_event(&out, |e| matches!(e, LocomotionEvent::TargetVelocityReached { .. })));
}

#[test]
fn sustained_unrelaxed_fires_once_per_stretch() {
    let mut pawn = RelaxationPawn::new(config()).unwrap();
    let mut fired_at = Vec::new();
    for tick in 0..10 {
        let out = pawn.on_tick(1.0).unwrap();
        if has_event(&out, |e| matches!(e, LocomotionEvent::SustainedUnrelaxed { .. })) {
            fired_at.push(tick);
        }
    }
    // 3s of unrelaxed time is the first total above 2.5s
    assert_eq!(fired_at, vec![2]);
}

#[test]
fn resting_on_the_ground_suppresses_the_fall() {
    let mut pawn = RelaxationPawn::new(config()).unwrap();
    pawn.on_collision_enter();
    assert!(pawn.is_grounded());
    for _ in 0..5 {
        let out = pawn.on_tick(0.1).unwrap();
        assert_eq!(out.velocity, Vec3::ZERO);
        assert_eq!(out.delta.translation, Vec3::ZERO);
        assert!(out.is_grounded);
    }
    assert_eq!(pawn.current_velocity(), 0.0);
    assert_eq!(pawn.pose().position, Vec3::ZERO);

    pawn.on_collision_exit();
    let out = pawn.on_tick(0.1).unwrap();
    assert!(out.velocity.z < 0.0);
}

#[test]
fn relaxed_pawn_rises_even_when_grounded() {
    let mut pawn = relaxed_pawn();
    pawn.on_collision_enter();
    let out = pawn.on_tick(0.5).unwrap();
    assert!(out.is_relaxed);
    assert!(out.velocity.z > 0.0);
    assert!(pawn.pose().position.z > 0.0);
}

#[test]
fn landing_while_relaxed_queues_a_relaunch() {
    let mut pawn = relaxed_pawn();
    pawn.on_tick(1.0).unwrap();
    let velocity = pawn.current_velocity();
    assert!(velocity > 0.0);

    pawn.on_collision_enter();
    let out = pawn.on_tick(0.0).unwrap();
    assert!(has_event(&out, |e| matches!(
        e,
        LocomotionEvent::Relaunched { velocity: v } if (*v - velocity).abs() < EPS
    )));
    // delivered once
    let out = pawn.on_tick(0.0).unwrap();
    assert!(!has_event(&out, |e| matches!(e, LocomotionEvent::Relaunched { .. })));
}

#[test]
fn landing_while_not_relaxed_does_not_relaunch() {
    let mut pawn = RelaxationPawn::new(config()).unwrap();
    pawn.on_collision_enter();
    let out = pawn.on_tick(0.1).unwrap();
    assert!(!has_event(&out, |e| matches!(e, LocomotionEvent::Relaunched { .. })));
}

#[test]
fn relaxing_on_the_ground_lifts_off_upwards() {
    let mut pawn = RelaxationPawn::new(config()).unwrap();
    for _ in 0..3 {
        pawn.on_tick(1.0).unwrap();
    }
    assert!((pawn.current_velocity() + 10.0).abs() < EPS);
    pawn.on_collision_enter();

    for tick in 0..4 {
        pawn.register_sample(80.0).unwrap();
        let out = pawn.on_tick(1.0).unwrap();
        let lifted = has_event(&out, |e| matches!(e, LocomotionEvent::LiftOff));
        assert_eq!(lifted, tick == 3, "unexpected lift-off at tick {tick}");
        if tick < 3 {
            assert_eq!(out.velocity, Vec3::ZERO);
        } else {
            assert!(out.is_relaxed);
            // climbs from rest rather than from the landing speed
            assert!((out.velocity.z - 20.0 / 3.0).abs() < EPS, "velocity {}", out.velocity.z);
        }
    }
}

#[test]
fn relaxing_in_the_air_does_not_lift_off() {
    let mut pawn = RelaxationPawn::new(config()).unwrap();
    for _ in 0..5 {
        pawn.register_sample(80.0).unwrap();
        let out = pawn.on_tick(1.0).unwrap();
        assert!(!has_event(&out, |e| matches!(e, LocomotionEvent::LiftOff)));
    }
    assert!(pawn.is_relaxed());
}

#[test]
fn intro_mode_eases_up_to_the_rise_velocity() {
    let mut pawn = relaxed_pawn();
    pawn.select_locomotion_mode(LocomotionMode::Intro);
    assert_eq!(pawn.mode(), LocomotionMode::Intro);
    let mut prev = 0.0;
    for _ in 0..4 {
        let out = pawn.on_tick(0.5).unwrap();
        assert!(out.velocity.z >= prev);
        prev = out.velocity.z;
    }
    assert_eq!(pawn.current_velocity(), 10.0);
    assert!(pawn.reached_target_velocity());
}

#[test]
fn paddle_mode_swims_with_the_hands() {
    let mut pawn = RelaxationPawn::new(config()).unwrap();
    pawn.select_locomotion_mode(LocomotionMode::Paddle);
    let head = Vec3::new(0.0, 0.0, 170.0);
    for step in 0..10 {
        let x = 30.0 - step as f32 * 3.0;
        pawn.set_tracking(TrackingInput {
            left_hand: Vec3::new(x, -25.0, 130.0),
            right_hand: Vec3::new(x, 25.0, 130.0),
            head,
        });
        let out = pawn.on_tick(1.0 / 90.0).unwrap();
        assert_eq!(out.velocity, pawn.velocity());
    }
    assert!(pawn.velocity().x > 0.0);
    assert!(pawn.pose().position.x > 0.0);
    // vertical interpolation is not applied in paddle mode
    assert_eq!(pawn.current_velocity(), 0.0);
}

#[test]
fn samples_are_clamped_and_optionally_scaled() {
    let mut pawn = RelaxationPawn::new(config()).unwrap();
    pawn.register_sample(150.0).unwrap();
    assert_eq!(pawn.filter().samples().next(), Some(100.0));
    pawn.register_sample(-3.0).unwrap();
    assert_eq!(pawn.filter().samples().next(), Some(0.0));

    let mut raw = RelaxationPawn::new(PawnConfig {
        relaxation: RelaxationParams {
            scale_raw_samples: true,
            ..config().relaxation
        },
        ..config()
    })
    .unwrap();
    raw.register_sample(-0.8).unwrap();
    let newest = raw.filter().samples().next().unwrap();
    assert!((newest - 80.0).abs() < EPS);
}

#[test]
fn bad_input_is_rejected_at_the_boundary() {
    let mut pawn = RelaxationPawn::new(config()).unwrap();
    assert!(matches!(
        pawn.register_sample(f32::NAN),
        Err(RelaxError::NonFiniteSample(_))
    ));
    for dt in [f32::NAN, f32::INFINITY, -0.1] {
        assert!(matches!(pawn.on_tick(dt), Err(RelaxError::InvalidDeltaTime(_))));
    }
    assert_eq!(pawn.clock_sec(), 0.0);
    assert!(pawn.filter().samples().all(|v| v == 0.0));
}

#[test]
fn reconfiguration_is_validated() {
    let mut pawn = RelaxationPawn::new(config()).unwrap();
    assert!(pawn.set_interpolation_duration(0.0).is_err());
    assert!(pawn.set_intro_interpolation_duration(-2.0).is_err());
    assert_eq!(pawn.config().relaxation.interp_duration, 3.0);

    pawn.set_interpolation_duration(1.0).unwrap();
    pawn.set_intro_interpolation_duration(4.0).unwrap();
    assert_eq!(pawn.config().relaxation.interp_duration, 1.0);
    assert_eq!(pawn.config().relaxation.intro_interp_duration, 4.0);

    // 20 units per second now
    let out = pawn.on_tick(0.25).unwrap();
    assert!((out.velocity.z + 5.0).abs() < EPS);
}

#[test]
fn invalid_configuration_is_rejected_up_front() {
    for relaxation in [
        RelaxationParams {
            window_size: 0,
            ..RelaxationParams::default()
        },
        RelaxationParams {
            opposite_state_threshold: 1.5,
            ..RelaxationParams::default()
        },
        RelaxationParams {
            rise_velocity: -1.0,
            ..RelaxationParams::default()
        },
        RelaxationParams {
            fall_velocity: 1.0,
            ..RelaxationParams::default()
        },
        RelaxationParams {
            intro_interp_duration: f32::INFINITY,
            ..RelaxationParams::default()
        },
    ] {
        let result = RelaxationPawn::new(PawnConfig {
            relaxation,
            ..PawnConfig::default()
        });
        assert!(matches!(result, Err(RelaxError::InvalidConfiguration { .. })));
    }
}
