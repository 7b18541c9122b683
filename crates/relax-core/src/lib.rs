pub mod config;
pub mod constants;
pub mod error;
pub mod filter;
pub mod grounded;
pub mod interp;
pub mod paddle;
pub mod pawn;
pub mod state;

pub use config::*;
pub use error::{RelaxError, Result};
pub use filter::SlidingWindowFilter;
pub use grounded::GroundedDurationTracker;
pub use interp::{ease_in_out, interp_constant_to, InterpMode, VelocityInterpolator};
pub use paddle::{PaddleLocomotionIntegrator, Pose, PoseDelta, TrackingInput};
pub use pawn::{LocomotionEvent, LocomotionMode, RelaxationPawn, TickEvents, TickOutput};
pub use state::{HysteresisStateMachine, RelaxState};
