// Tuning constants shared by the relaxation core and its hosts.

// Relaxation signal
pub const RELAXATION_MIN: f32 = 0.0;
pub const RELAXATION_MAX: f32 = 100.0;
pub const RELAXATION_MIDPOINT: f32 = 50.0; // at or above counts as relaxed
pub const RAW_SAMPLE_SCALE: f32 = 100.0; // raw feeds in [-1, 1] map to |v| * 100

// Sample window and state machine
pub const DEFAULT_WINDOW_SIZE: usize = 5;
pub const DEFAULT_OPPOSITE_STATE_THRESHOLD: f32 = 0.7; // share of the window that must agree

// Vertical velocity (world units per second, Z-up)
pub const DEFAULT_RISE_VELOCITY: f32 = 10.0;
pub const DEFAULT_FALL_VELOCITY: f32 = -10.0;
pub const DEFAULT_INTERP_DURATION_SEC: f32 = 3.0; // fall -> rise in this long
pub const DEFAULT_INTRO_INTERP_DURATION_SEC: f32 = 6.0;

// Eased intro curve
pub const EASE_IN_EXPONENT: f32 = 0.3;
pub const EASE_OUT_EXPONENT: f32 = 0.5;

// |current - target| below this counts as converged
pub const VELOCITY_EPSILON: f32 = 1e-4;

// Grounded-duration tracker
pub const GROUNDED_HORIZON_SEC: f64 = 5.0; // trailing window
pub const GROUNDED_THRESHOLD_SEC: f64 = 2.5; // sustained-unrelaxed trigger

// Paddle locomotion. The gains are empirical and compensate for the unit
// simplifications in the drag model; they are not physically derived.
pub const PADDLE_UNIT_SCALE: f32 = 100.0; // centimetres per metre
pub const PADDLE_CHEAT_QUOTIENT: f32 = 2.0; // divides hand speed before the drag equation
pub const PADDLE_LINEAR_GAIN: f32 = 20.0;
pub const PADDLE_ANGULAR_GAIN: f32 = PADDLE_LINEAR_GAIN * 2.0;

pub const DEFAULT_FLUID_DENSITY: f32 = 1000.0; // kg/m^3, water
pub const DEFAULT_DRAG_COEFFICIENT_MIN: f32 = 0.5;
pub const DEFAULT_DRAG_COEFFICIENT_MAX: f32 = 1.2;
pub const DEFAULT_HAND_AREA_MIN: f32 = 0.002; // m^2, edge-on hand
pub const DEFAULT_HAND_AREA_MAX: f32 = 0.006; // m^2, flat palm
pub const DEFAULT_MAX_HAND_SPEED: f32 = 3.0; // m/s, clamp before squaring
pub const DEFAULT_BODY_MASS: f32 = 70.0;
pub const DEFAULT_MOMENT_OF_INERTIA: f32 = 10.0;
pub const DEFAULT_BODY_DRAG: f32 = 0.8; // per second
pub const DEFAULT_CENTER_OF_MASS_HEIGHT_RATE: f32 = 0.75; // shoulder height relative to HMD
