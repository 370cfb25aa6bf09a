//! Parameters structure for DriveAssist

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use serde::Deserialize;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Parameters for drive assist.
#[derive(Debug, Clone, Deserialize)]
pub struct Params {

    // ---- STICK HANDLING ----

    /// Threshold below which an axis magnitude is treated as zero intent.
    ///
    /// The comparison is strict, a magnitude exactly equal to this value is
    /// inside the deadband.
    pub deadband: f64,

    /// Divisor applied to the rotation axis in manual mode to reduce turn
    /// sensitivity.
    pub turn_rate_divisor: f64,

    // ---- HEADING HOLD ----

    /// Proportional gain applied to the heading error while in straight
    /// drive.
    ///
    /// Units: 1/degrees
    pub heading_kp: f64,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl Default for Params {
    fn default() -> Self {
        Params {
            deadband: 0.04,
            turn_rate_divisor: 1.25,
            heading_kp: 0.01,
        }
    }
}
