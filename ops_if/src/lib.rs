//! # Operator interface crate.
//!
//! Provides the common operator input and mechanism demand definitions shared
//! between the software's crates.

// ------------------------------------------------------------------------------------------------
// MODULES
// ------------------------------------------------------------------------------------------------

/// Operator command definitions
pub mod oc;

/// Demand definitions for the drivetrain mechanisms
pub mod mech;
