//! Utility maths functions

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use num_traits::Float;

/// Map a value from one range into another.
pub fn lin_map<T>(source_range: (T, T), target_range: (T, T), value: T) -> T
where
    T: Float
{
    target_range.0
        + ((value - source_range.0)
        * (target_range.1 - target_range.0)
        / (source_range.1 - source_range.0))
}

/// Clamp a value to the given range.
pub fn clamp<T>(value: &T, min: &T, max: &T) -> T
where
    T: Float + std::ops::Mul + std::ops::Add + std::ops::AddAssign
{
    let mut ret = *value;

    if ret > *max {
        ret = *max
    }
    if ret < *min {
        ret = *min
    }

    ret
}

/// Determine whether a value's magnitude exceeds the given deadband
/// threshold.
///
/// The comparison is strict: a magnitude exactly equal to the threshold is
/// inside the deadband.
pub fn exceeds_deadband<T>(value: T, threshold: T) -> bool
where
    T: Float
{
    value.abs() > threshold
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_clamp() {
        assert_eq!(clamp(&0.5f64, &-1f64, &1f64), 0.5f64);
        assert_eq!(clamp(&1.7f64, &-1f64, &1f64), 1f64);
        assert_eq!(clamp(&-3f64, &-1f64, &1f64), -1f64);
        assert_eq!(clamp(&-1f64, &-1f64, &1f64), -1f64);
    }

    #[test]
    fn test_exceeds_deadband() {
        // Boundary is strict, the threshold itself is inside the deadband
        assert!(!exceeds_deadband(0.04f64, 0.04f64));
        assert!(!exceeds_deadband(-0.04f64, 0.04f64));
        assert!(exceeds_deadband(0.0401f64, 0.04f64));
        assert!(exceeds_deadband(-0.0401f64, 0.04f64));
        assert!(!exceeds_deadband(0f64, 0.04f64));
    }

    #[test]
    fn test_lin_map() {
        assert_eq!(lin_map((-1f64, 1f64), (-10f64, 10f64), 0.5f64), 5f64);
        assert_eq!(lin_map((0f64, 1f64), (0f64, 100f64), 0.25f64), 25f64);
    }
}
