//! Speed demand calculations

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use serde::Serialize;

// Internal imports
use super::{AngleUnit, Params};

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// The speed band selected for a steering angle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum VelocityBand {
    /// Nearly straight, full speed ahead
    FullSpeed,

    /// Turning, go slow
    Slow,

    /// Turning hard, go very slow
    VerySlow,

    /// No band matched
    Default,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl Default for VelocityBand {
    fn default() -> Self {
        VelocityBand::Default
    }
}

// ---------------------------------------------------------------------------
// PUBLIC FUNCTIONS
// ---------------------------------------------------------------------------

/// Select the speed demand for a (limited) steering angle in radians.
///
/// The bands are not exclusive. Each is checked in turn (full speed, slow, very slow) and the
/// last one to match sets the speed. If none match `default_velocity` is used.
pub fn select_velocity(angle_rad: f64, params: &Params) -> (f64, VelocityBand) {
    let magnitude = match params.velocity_threshold_unit {
        AngleUnit::Radians => angle_rad.abs(),
        AngleUnit::Degrees => angle_rad.to_degrees().abs(),
    };

    let mut band = VelocityBand::Default;
    let mut velocity = params.default_velocity;

    if magnitude < params.full_speed_threshold {
        band = VelocityBand::FullSpeed;
        velocity = params.full_speed_velocity;
    }

    if magnitude > params.slow_threshold {
        band = VelocityBand::Slow;
        velocity = params.slow_velocity;
    }

    if magnitude > params.very_slow_threshold {
        band = VelocityBand::VerySlow;
        velocity = params.very_slow_velocity;
    }

    (velocity, band)
}

/// Apply the speed limits, returning the limited speed and whether it was changed.
///
/// A negative speed is replaced by `negative_velocity_reset` rather than zero, then the maximum
/// is applied.
pub fn limit_velocity(velocity: f64, params: &Params) -> (f64, bool) {
    let mut ret = velocity;
    let mut limited = false;

    if ret < 0.0 {
        ret = params.negative_velocity_reset;
        limited = true;
    }

    if ret > params.max_velocity {
        ret = params.max_velocity;
        limited = true;
    }

    (ret, limited)
}

#[cfg(test)]
mod test {
    use super::*;

    fn degree_params() -> Params {
        Params {
            velocity_threshold_unit: AngleUnit::Degrees,
            ..Default::default()
        }
    }

    #[test]
    fn test_radian_thresholds() {
        let params = Params::default();

        // Every angle inside the steering limits is below 1 rad
        assert_eq!(
            select_velocity(18f64.to_radians(), &params),
            (3.5, VelocityBand::FullSpeed)
        );
        assert_eq!(
            select_velocity((-30f64).to_radians(), &params),
            (3.5, VelocityBand::FullSpeed)
        );
        assert_eq!(select_velocity(15.0, &params), (0.75, VelocityBand::Slow));
        assert_eq!(select_velocity(-25.0, &params), (0.3, VelocityBand::VerySlow));
    }

    #[test]
    fn test_degree_thresholds() {
        let params = degree_params();

        assert_eq!(
            select_velocity(0.5f64.to_radians(), &params),
            (3.5, VelocityBand::FullSpeed)
        );
        assert_eq!(
            select_velocity(18f64.to_radians(), &params),
            (0.75, VelocityBand::Slow)
        );
        assert_eq!(
            select_velocity(30f64.to_radians(), &params),
            (0.3, VelocityBand::VerySlow)
        );
        assert_eq!(
            select_velocity((-25f64).to_radians(), &params),
            (0.3, VelocityBand::VerySlow)
        );
    }

    #[test]
    fn test_no_band_uses_default() {
        let params = degree_params();

        assert_eq!(
            select_velocity(5f64.to_radians(), &params),
            (1.0, VelocityBand::Default)
        );

        // Boundaries are exclusive
        assert_eq!(select_velocity(1.0, &Params::default()), (1.0, VelocityBand::Default));
        assert_eq!(select_velocity(10.0, &Params::default()), (1.0, VelocityBand::Default));

        assert_eq!(
            select_velocity(f64::NAN, &Params::default()),
            (1.0, VelocityBand::Default)
        );
    }

    #[test]
    fn test_limit_velocity() {
        let params = Params::default();

        assert_eq!(limit_velocity(0.3, &params), (0.3, false));
        assert_eq!(limit_velocity(0.0, &params), (0.0, false));
        assert_eq!(limit_velocity(-0.5, &params), (1.0, true));
        assert_eq!(limit_velocity(7.0, &params), (3.5, true));
    }

    #[test]
    fn test_negative_reset_is_still_limited() {
        let params = Params {
            negative_velocity_reset: 5.0,
            ..Default::default()
        };

        assert_eq!(limit_velocity(-1.0, &params), (3.5, true));
    }
}
