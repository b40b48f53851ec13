//! Steering angle calculations

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// Internal imports
use super::Params;
use util::maths::clamp_flagged;

// ---------------------------------------------------------------------------
// PUBLIC FUNCTIONS
// ---------------------------------------------------------------------------

/// Calculate the PD correction for an error sample.
///
/// The derivative term uses `prev_error - error`, so a growing error reduces the correction.
pub fn calc_correction(error: f64, prev_error: f64, params: &Params) -> f64 {
    params.k_p * error + params.k_d * (prev_error - error)
}

/// Convert a correction (in degrees) into a steering angle demand in radians.
///
/// Returns the limited angle, the unlimited angle, and whether the limits were applied.
pub fn calc_angle(correction: f64, params: &Params) -> (f64, f64, bool) {
    let angle_raw_rad = params.angle_offset_rad() + correction.to_radians();

    let (angle_rad, limited) =
        clamp_flagged(angle_raw_rad, params.min_angle_rad(), params.max_angle_rad());

    (angle_rad, angle_raw_rad, limited)
}

#[cfg(test)]
mod test {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_correction() {
        let params = Params::default();

        assert_eq!(calc_correction(0.0, 0.0, &params), 0.0);
        assert_relative_eq!(calc_correction(50.0, 0.0, &params), 237.5);
        assert_relative_eq!(calc_correction(2.0, 2.0, &params), 10.0);
        assert_relative_eq!(calc_correction(0.0, 4.0, &params), 1.0);
    }

    #[test]
    fn test_correction_is_linear() {
        let params = Params::default();

        for e in [-3.0, -0.1, 0.7, 12.0].iter() {
            assert_relative_eq!(
                calc_correction(2.0 * e, 0.0, &params),
                2.0 * calc_correction(*e, 0.0, &params)
            );
        }
    }

    #[test]
    fn test_angle_offset() {
        let (angle, raw, limited) = calc_angle(0.0, &Params::default());

        assert_relative_eq!(angle, 18f64.to_radians());
        assert_relative_eq!(raw, angle);
        assert!(!limited);
    }

    #[test]
    fn test_angle_limits() {
        let params = Params::default();

        let (angle, raw, limited) = calc_angle(237.5, &params);
        assert_relative_eq!(angle, 30f64.to_radians());
        assert_relative_eq!(raw, (18.0f64 + 237.5).to_radians());
        assert!(limited);

        let (angle, _, limited) = calc_angle(-1000.0, &params);
        assert_relative_eq!(angle, (-30f64).to_radians());
        assert!(limited);
    }
}
