//! # Drivetrain Mechanism Demands

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use serde::{Deserialize, Serialize};

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// Demands produced by the drive controller for the drivetrain actuators.
///
/// Efforts are normalised to [-1, +1], where +1 is full forward effort on
/// that side of the drivetrain.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq)]
pub struct MechDems {
    /// Demanded effort for the left side actuators.
    pub left_effort: f64,

    /// Demanded effort for the right side actuators.
    pub right_effort: f64,
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl MechDems {
    /// Demands which bring the drivetrain to a stop.
    pub fn stop() -> Self {
        Self {
            left_effort: 0.0,
            right_effort: 0.0,
        }
    }
}
