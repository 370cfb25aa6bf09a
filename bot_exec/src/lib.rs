//! # Robot library.
//!
//! This library allows other crates in the workspace (and the benchmarks) to
//! access items defined inside the robot crate.

// ------------------------------------------------------------------------------------------------
// MODULES
// ------------------------------------------------------------------------------------------------

/// Global data store for the executable
pub mod data_store;

/// Drive assist module - converts stick inputs and the current heading into drivetrain demands
pub mod drive_assist;

/// Simulated IMU - integrates a heading from the drivetrain demands
pub mod imu_sim;
