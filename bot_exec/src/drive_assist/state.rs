//! Implementations for the DriveAssist state structure

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use log::trace;
use serde::Serialize;

// Internal
use super::{DriveAssistError, Params};
use ops_if::mech::MechDems;
use util::{
    params,
    module::State,
    archive::{Archived, Archiver},
    maths,
    session::Session};

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Drive assist module state
#[derive(Default)]
pub struct DriveAssist {

    pub(crate) params: Params,

    pub(crate) report: StatusReport,
    arch_report: Archiver,

    pub(crate) hold: HoldState,
    arch_hold: Archiver,

    pub(crate) output: Option<MechDems>,
    arch_output: Archiver
}

/// Input data to drive assist.
#[derive(Clone, Copy, Default)]
pub struct InputData {
    /// Throttle axis demand, forward-positive, nominally in [-1, +1].
    pub forward_axis: f64,

    /// Rotation axis demand, clockwise-positive, nominally in [-1, +1].
    pub rotation_axis: f64,

    /// True while the operator holds the quick-turn button.
    pub quick_turn: bool,

    /// The current heading from the IMU.
    ///
    /// Passed through exactly as received from the sensor, no wrapping is
    /// applied here.
    ///
    /// Units: degrees
    pub heading_deg: f64,
}

/// Cross-cycle heading hold state.
///
/// Mutated only by `proc`. `locked_heading_deg` is meaningful only while the
/// module is (or was last) in straight drive, and is overwritten on every
/// entry into straight drive.
#[derive(Clone, Copy, Default, Serialize, Debug)]
pub struct HoldState {
    /// True if the previous cycle was in straight drive, used as the edge
    /// detector for the heading lock.
    pub was_straight_drive: bool,

    /// The heading sampled on the cycle straight drive was entered.
    ///
    /// Units: degrees
    pub locked_heading_deg: f64,
}

/// Status report for drive assist processing.
#[derive(Clone, Copy, Serialize, Debug)]
pub struct StatusReport {
    /// The mode selected this cycle.
    pub mode: DriveMode,

    /// True if the throttle axis magnitude exceeded the deadband.
    pub is_throttle: bool,

    /// True if the rotation axis magnitude exceeded the deadband.
    pub is_turning: bool,

    /// Heading error relative to the locked heading, zero in manual mode.
    ///
    /// Units: degrees
    pub heading_error_deg: f64,

    /// The rotation term fed into the kinematics while holding, zero in
    /// manual mode.
    pub steer_assist: f64,

    /// True if the left effort saturated and was clamped.
    pub left_effort_limited: bool,

    /// True if the right effort saturated and was clamped.
    pub right_effort_limited: bool,

    /// True if the heading input was non-finite this cycle, forcing manual
    /// mode.
    pub sensor_invalid: bool,
}

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// The mode the drive assist is in on a given cycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum DriveMode {
    /// The operator has full rotation authority.
    Manual,

    /// Rotation authority is overridden by the heading-correcting
    /// proportional term.
    StraightHold,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl Default for StatusReport {
    fn default() -> Self {
        StatusReport {
            mode: DriveMode::Manual,
            is_throttle: false,
            is_turning: false,
            heading_error_deg: 0.0,
            steer_assist: 0.0,
            left_effort_limited: false,
            right_effort_limited: false,
            sensor_invalid: false,
        }
    }
}

impl State for DriveAssist {
    type InitData = &'static str;
    type InitError = params::LoadError;

    type InputData = InputData;
    type OutputData = MechDems;
    type StatusReport = StatusReport;
    type ProcError = DriveAssistError;

    /// Initialise the DriveAssist module.
    ///
    /// Expected init data is the path to the parameter file
    fn init(&mut self, init_data: Self::InitData, session: &Session)
        -> Result<(), Self::InitError>
    {

        // Load the parameters
        self.params = match params::load(init_data) {
            Ok(p) => p,
            Err(e) => return Err(e)
        };

        // Create the arch folder for drive_assist
        let mut arch_path = session.arch_root.clone();
        arch_path.push("drive_assist");
        std::fs::create_dir_all(arch_path).unwrap();

        // Initialise the archivers
        self.arch_report = Archiver::from_path(
            session, "drive_assist/status_report.csv"
        ).unwrap();
        self.arch_hold = Archiver::from_path(
            session, "drive_assist/hold_state.csv"
        ).unwrap();
        self.arch_output = Archiver::from_path(
            session, "drive_assist/output.csv"
        ).unwrap();

        Ok(())
    }

    /// Perform cyclic processing of drive assist.
    fn proc(&mut self, input_data: &Self::InputData)
        -> Result<(Self::OutputData, Self::StatusReport), Self::ProcError>
    {
        // Clear the status report
        self.report = StatusReport::default();

        // A non-finite axis cannot be meaningfully clamped, so it is a
        // processing error. A non-finite heading is handled separately in the
        // steer assist calculation.
        if !input_data.forward_axis.is_finite() || !input_data.rotation_axis.is_finite() {
            return Err(DriveAssistError::NonFiniteAxis(
                input_data.forward_axis,
                input_data.rotation_axis,
            ));
        }

        // Clamp the axes, upstream stick drivers may exceed the nominal range
        // transiently
        let forward = maths::clamp(&input_data.forward_axis, &-1.0, &1.0);
        let rotation = maths::clamp(&input_data.rotation_axis, &-1.0, &1.0);

        // Decide the mode and the effective rotation term for this cycle
        let (rotation_term, quick_turn) =
            self.calc_steer_assist(forward, rotation, input_data);

        // Map the intents onto the two drivetrain sides
        let output = self.calc_curvature(forward, rotation_term, quick_turn);

        trace!(
            "DriveAssist output ({:?}):\n    left: {:.4}\n    right: {:.4}",
            self.report.mode,
            output.left_effort,
            output.right_effort);

        // Update the output in self
        self.output = Some(output);

        Ok((output, self.report))
    }
}

impl Archived for DriveAssist {
    fn write(&mut self) -> Result<(), Box<dyn std::error::Error>> {
        // Write each one individually
        self.arch_report.serialise(self.report)?;
        self.arch_hold.serialise(self.hold)?;
        self.arch_output.serialise(self.output.unwrap_or_default())?;

        Ok(())
    }
}

impl DriveAssist {

    /// Put the module into a safe state.
    ///
    /// Drops the heading lock and zeroes the last output so a later unsafe
    /// transition starts from a clean slate.
    pub fn make_safe(&mut self) {
        self.hold = HoldState::default();
        self.output = Some(MechDems::stop());
    }
}

// ---------------------------------------------------------------------------
// TESTS
// ---------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;
    use crate::drive_assist::DriveMode;

    fn stick(forward: f64, rotation: f64, heading_deg: f64) -> InputData {
        InputData {
            forward_axis: forward,
            rotation_axis: rotation,
            quick_turn: false,
            heading_deg,
        }
    }

    #[test]
    fn deadband_boundary_is_strict() {
        let mut da = DriveAssist::default();

        // A rotation magnitude exactly on the threshold does not count as
        // turning, so the module enters straight hold
        let (_, report) = da.proc(&stick(0.5, 0.04, 0.0)).unwrap();
        assert!(report.is_throttle);
        assert!(!report.is_turning);
        assert_eq!(report.mode, DriveMode::StraightHold);

        // Just above the threshold counts as turning
        let (_, report) = da.proc(&stick(0.5, 0.0401, 0.0)).unwrap();
        assert!(report.is_turning);
        assert_eq!(report.mode, DriveMode::Manual);
    }

    #[test]
    fn lock_captured_on_entry_only() {
        let mut da = DriveAssist::default();

        // Heading drifts from 0 to 10 degrees over five straight cycles, the
        // lock must stay at the entry value
        let headings = [0.0, 2.5, 5.0, 7.5, 10.0];

        for (i, &heading) in headings.iter().enumerate() {
            let (_, report) = da.proc(&stick(0.5, 0.0, heading)).unwrap();

            assert_eq!(report.mode, DriveMode::StraightHold);
            assert_eq!(da.hold.locked_heading_deg, 0.0);

            if i == 0 {
                assert_eq!(report.heading_error_deg, 0.0);
            }
        }

        // On the final cycle the error is lock minus current, not resampled
        assert_eq!(da.report.heading_error_deg, -10.0);
        assert!((da.report.steer_assist - 0.01 * -10.0).abs() < 1e-12);
    }

    #[test]
    fn reentry_resets_lock() {
        let mut da = DriveAssist::default();

        // Straight at heading 5, locks 5
        da.proc(&stick(0.5, 0.0, 5.0)).unwrap();
        assert_eq!(da.hold.locked_heading_deg, 5.0);

        // Operator turns, dropping out of straight drive
        let (_, report) = da.proc(&stick(0.5, 0.5, 20.0)).unwrap();
        assert_eq!(report.mode, DriveMode::Manual);

        // Straight again at heading 20, the lock must be resampled rather
        // than reusing the value from the previous episode
        let (_, report) = da.proc(&stick(0.5, 0.0, 20.0)).unwrap();
        assert_eq!(da.hold.locked_heading_deg, 20.0);
        assert_eq!(report.heading_error_deg, 0.0);
    }

    #[test]
    fn entry_cycle_error_is_zero() {
        let mut da = DriveAssist::default();

        // Reverse throttle with a rotation inside the deadband enters
        // straight hold, and the error is zero the instant of capture
        let (output, report) = da.proc(&stick(-0.6, 0.02, 33.0)).unwrap();

        assert!(report.is_throttle);
        assert!(!report.is_turning);
        assert_eq!(report.mode, DriveMode::StraightHold);
        assert_eq!(report.steer_assist, 0.0);
        assert_eq!(output.left_effort, -0.6);
        assert_eq!(output.right_effort, -0.6);
    }

    #[test]
    fn non_finite_heading_forces_manual() {
        let mut da = DriveAssist::default();

        let (output, report) = da.proc(&stick(0.5, 0.0, f64::NAN)).unwrap();

        assert_eq!(report.mode, DriveMode::Manual);
        assert!(report.sensor_invalid);
        assert!(!da.hold.was_straight_drive);

        // Manual with a centred rotation axis still drives straight open
        // loop
        assert_eq!(output.left_effort, 0.5);
        assert_eq!(output.right_effort, 0.5);
    }

    #[test]
    fn non_finite_axis_is_a_proc_error() {
        let mut da = DriveAssist::default();

        assert!(matches!(
            da.proc(&stick(f64::NAN, 0.0, 0.0)),
            Err(DriveAssistError::NonFiniteAxis(_, _))
        ));
    }

    #[test]
    fn manual_rotation_is_attenuated() {
        let mut da = DriveAssist::default();

        // Quick turn grants direct rotation authority, attenuated by the
        // manual divisor
        let input = InputData {
            forward_axis: 0.0,
            rotation_axis: 0.5,
            quick_turn: true,
            heading_deg: 0.0,
        };
        let (output, report) = da.proc(&input).unwrap();

        assert_eq!(report.mode, DriveMode::Manual);
        assert!((output.left_effort - 0.5 / 1.25).abs() < 1e-12);
        assert!((output.right_effort + 0.5 / 1.25).abs() < 1e-12);
    }

    #[test]
    fn make_safe_drops_the_lock() {
        let mut da = DriveAssist::default();

        da.proc(&stick(0.5, 0.0, 10.0)).unwrap();
        assert!(da.hold.was_straight_drive);

        da.make_safe();
        assert!(!da.hold.was_straight_drive);
        assert_eq!(da.output, Some(MechDems::stop()));
    }
}
