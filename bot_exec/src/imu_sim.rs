//! # Simulated IMU
//!
//! The simulated IMU stands in for the robot's heading sensor when no real
//! hardware is attached. It integrates a yaw from the drivetrain demands of
//! the previous cycle, plus a configurable drift rate so the heading hold has
//! something to fight against.
//!
//! Like a real heading sensor the output is a monotonically unbounded angle
//! in degrees, no wrapping is applied.

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

// External
use serde::Deserialize;

// Internal
use ops_if::mech::MechDems;
use util::{maths::lin_map, params};

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// Simulated IMU state.
pub struct ImuSim {
    params: Params,

    /// The current integrated heading.
    ///
    /// Units: degrees, clockwise-positive
    heading_deg: f64,
}

/// Parameters for the simulated IMU.
#[derive(Debug, Clone, Deserialize)]
pub struct Params {
    /// The heading reported before any demands have been integrated.
    ///
    /// Units: degrees
    pub initial_heading_deg: f64,

    /// Yaw rate produced by a full differential demand (+1 on the left, -1 on
    /// the right).
    ///
    /// Units: degrees/second
    pub max_yaw_rate_dps: f64,

    /// Constant drift applied on top of the commanded yaw, modelling
    /// drivetrain asymmetry.
    ///
    /// Units: degrees/second
    pub drift_rate_dps: f64,
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl ImuSim {
    /// Create a new simulated IMU from the given parameter file.
    pub fn new(params_path: &str) -> Result<Self, params::LoadError> {
        let params: Params = params::load(params_path)?;

        Ok(Self {
            heading_deg: params.initial_heading_deg,
            params,
        })
    }

    /// Create a new simulated IMU directly from parameters.
    pub fn from_params(params: Params) -> Self {
        Self {
            heading_deg: params.initial_heading_deg,
            params,
        }
    }

    /// Advance the simulation by one cycle using the demands executed over
    /// that cycle, returning the new heading in degrees.
    pub fn step(&mut self, dems: &MechDems, dt_s: f64) -> f64 {
        // Differential component of the demands, in [-1, +1]
        let differential = (dems.left_effort - dems.right_effort) / 2.0;

        let yaw_rate_dps = lin_map(
            (-1f64, 1f64),
            (-self.params.max_yaw_rate_dps, self.params.max_yaw_rate_dps),
            differential,
        );

        self.heading_deg += (yaw_rate_dps + self.params.drift_rate_dps) * dt_s;

        self.heading_deg
    }

    /// Get the current heading without advancing the simulation.
    pub fn heading_deg(&self) -> f64 {
        self.heading_deg
    }
}

// ------------------------------------------------------------------------------------------------
// TESTS
// ------------------------------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;

    fn imu(drift_rate_dps: f64) -> ImuSim {
        ImuSim::from_params(Params {
            initial_heading_deg: 0.0,
            max_yaw_rate_dps: 180.0,
            drift_rate_dps,
        })
    }

    #[test]
    fn straight_demands_hold_heading_without_drift() {
        let mut imu = imu(0.0);

        let dems = MechDems {
            left_effort: 0.5,
            right_effort: 0.5,
        };

        for _ in 0..50 {
            imu.step(&dems, 0.02);
        }

        assert_eq!(imu.heading_deg(), 0.0);
    }

    #[test]
    fn differential_demands_integrate_yaw() {
        let mut imu = imu(0.0);

        // Full pivot clockwise for one second
        let dems = MechDems {
            left_effort: 1.0,
            right_effort: -1.0,
        };

        for _ in 0..50 {
            imu.step(&dems, 0.02);
        }

        assert!((imu.heading_deg() - 180.0).abs() < 1e-9);
    }

    #[test]
    fn drift_accumulates_over_time() {
        let mut imu = imu(2.0);

        for _ in 0..50 {
            imu.step(&MechDems::stop(), 0.02);
        }

        assert!((imu.heading_deg() - 2.0).abs() < 1e-9);
    }
}
