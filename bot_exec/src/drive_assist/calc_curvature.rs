//! Curvature drive kinematics calculations

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External imports
use ops_if::mech::MechDems;

// Internal imports
use super::DriveAssist;
use util::maths::clamp;

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl DriveAssist {

    /// Map forward and rotation intents onto left/right drivetrain demands.
    ///
    /// With `quick_turn` set the rotation is applied directly, giving full
    /// pivot authority at any speed. Otherwise the rotation is scaled by the
    /// forward magnitude, so the turning radius depends on speed and a
    /// centred throttle produces no rotation at all.
    ///
    /// Each side is clamped to [-1, +1] independently after combination,
    /// saturating one side does not rescale the other. Saturation is flagged
    /// in the status report.
    pub(crate) fn calc_curvature(
        &mut self,
        forward: f64,
        rotation: f64,
        quick_turn: bool,
    ) -> MechDems {

        let forward = clamp(&forward, &-1.0, &1.0);
        let rotation = clamp(&rotation, &-1.0, &1.0);

        let rotation_term = if quick_turn {
            rotation
        } else {
            rotation * forward.abs()
        };

        let left = forward + rotation_term;
        let right = forward - rotation_term;

        let left_effort = clamp(&left, &-1.0, &1.0);
        let right_effort = clamp(&right, &-1.0, &1.0);

        self.report.left_effort_limited = left != left_effort;
        self.report.right_effort_limited = right != right_effort;

        MechDems {
            left_effort,
            right_effort,
        }
    }
}

// ---------------------------------------------------------------------------
// TESTS
// ---------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn zero_rotation_drives_straight() {
        let mut da = DriveAssist::default();

        for &forward in &[-1.0, -0.6, 0.0, 0.3, 1.0] {
            let dems = da.calc_curvature(forward, 0.0, false);
            assert_eq!(dems.left_effort, forward);
            assert_eq!(dems.right_effort, forward);
        }
    }

    #[test]
    fn sides_clamp_independently() {
        let mut da = DriveAssist::default();

        // Full forward with quick turn saturates the left side only, the
        // right side is not rescaled
        let dems = da.calc_curvature(1.0, 0.5, true);
        assert_eq!(dems.left_effort, 1.0);
        assert_eq!(dems.right_effort, 0.5);
        assert!(da.report.left_effort_limited);
        assert!(!da.report.right_effort_limited);
    }

    #[test]
    fn quick_turn_pivots_when_stationary() {
        let mut da = DriveAssist::default();

        let dems = da.calc_curvature(0.0, 0.5, true);
        assert_eq!(dems.left_effort, 0.5);
        assert_eq!(dems.right_effort, -0.5);
    }

    #[test]
    fn curvature_gives_no_spin_when_stationary() {
        let mut da = DriveAssist::default();

        let dems = da.calc_curvature(0.0, 1.0, false);
        assert_eq!(dems.left_effort, 0.0);
        assert_eq!(dems.right_effort, 0.0);
    }

    #[test]
    fn out_of_range_inputs_are_clamped_before_use() {
        let mut da = DriveAssist::default();

        let dems = da.calc_curvature(1.8, 0.0, false);
        assert_eq!(dems.left_effort, 1.0);
        assert_eq!(dems.right_effort, 1.0);
    }

    #[test]
    fn rotation_scales_with_forward_magnitude() {
        let mut da = DriveAssist::default();

        let dems = da.calc_curvature(0.5, 0.4, false);
        assert!((dems.left_effort - 0.7).abs() < 1e-12);
        assert!((dems.right_effort - 0.3).abs() < 1e-12);

        // Reverse travel keeps the same rotation sense scaling
        let dems = da.calc_curvature(-0.5, 0.4, false);
        assert!((dems.left_effort + 0.3).abs() < 1e-12);
        assert!((dems.right_effort + 0.7).abs() < 1e-12);
    }
}
