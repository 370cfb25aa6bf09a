//! Heading hold steer assist calculations

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// Internal imports
use super::*;
use util::maths::exceeds_deadband;

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl DriveAssist {

    /// Decide this cycle's mode and produce the effective rotation term to
    /// feed into the curvature kinematics.
    ///
    /// Straight drive is selected when the operator is on the throttle but
    /// not turning. On the cycle straight drive is entered the current
    /// heading is captured as the lock, exactly once. The error term always
    /// uses the lock held for the current episode, so on the entry cycle the
    /// error is exactly zero.
    ///
    /// Returns the rotation term and the quick turn flag to use.
    pub(crate) fn calc_steer_assist(
        &mut self,
        forward: f64,
        rotation: f64,
        input: &InputData,
    ) -> (f64, bool) {

        let is_throttle = exceeds_deadband(forward, self.params.deadband);
        let is_turning = exceeds_deadband(rotation, self.params.deadband);

        self.report.is_throttle = is_throttle;
        self.report.is_turning = is_turning;

        // A non-finite heading cannot be held against, refuse to enter or
        // continue straight drive for this cycle
        let heading_valid = input.heading_deg.is_finite();
        if !heading_valid {
            self.report.sensor_invalid = true;
        }

        let straight = is_throttle && !is_turning && heading_valid;

        let result = if straight {
            // Capture the lock on the entry edge only, never while already
            // holding
            if !self.hold.was_straight_drive {
                self.hold.locked_heading_deg = input.heading_deg;
            }

            let error_deg = self.hold.locked_heading_deg - input.heading_deg;
            let steer_assist = self.params.heading_kp * error_deg;

            self.report.mode = DriveMode::StraightHold;
            self.report.heading_error_deg = error_deg;
            self.report.steer_assist = steer_assist;

            // Heading hold always uses curvature style authority
            (steer_assist, false)
        } else {
            self.report.mode = DriveMode::Manual;

            (rotation / self.params.turn_rate_divisor, input.quick_turn)
        };

        // Update the edge detector for the next cycle
        self.hold.was_straight_drive = straight;

        result
    }
}
