//! Utility maths functions

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use num_traits::Float;

/// Clamp a value between `min` and `max`.
///
/// The upper limit is applied before the lower one, so if `min > max` the result is `min`. `NaN`
/// values pass through unchanged.
pub fn clamp<T>(value: T, min: T, max: T) -> T
where
    T: Float,
{
    clamp_flagged(value, min, max).0
}

/// Clamp a value between `min` and `max`, also returning `true` if a limit was applied.
pub fn clamp_flagged<T>(value: T, min: T, max: T) -> (T, bool)
where
    T: Float,
{
    let mut ret = value;
    let mut limited = false;

    if ret > max {
        ret = max;
        limited = true;
    }
    if ret < min {
        ret = min;
        limited = true;
    }

    (ret, limited)
}
