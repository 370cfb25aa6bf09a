//! Drive assist module
//!
//! Converts the operator's two stick axes into left/right drivetrain demands
//! using curvature drive kinematics, and holds the current heading while the
//! operator is driving straight.

// ---------------------------------------------------------------------------
// MODULES
// ---------------------------------------------------------------------------

mod calc_curvature;
mod calc_steer_assist;
mod params;
mod state;

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// Internal
pub use params::*;
pub use state::*;

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// Possible errors that can occur during DriveAssist operation.
#[derive(Debug, thiserror::Error)]
pub enum DriveAssistError {
    #[error("Stick axes contain a non-finite value (forward: {0}, rotation: {1})")]
    NonFiniteAxis(f64, f64),
}
