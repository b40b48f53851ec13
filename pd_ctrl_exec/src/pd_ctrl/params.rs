//! Parameters structure for PdCtrl

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// Unit in which the steering angle is compared against the speed band thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AngleUnit {
    Radians,
    Degrees,
}

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Parameters for PD steering control.
///
/// Missing keys in the parameter file take their default value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Params {
    // ---- GAINS ----
    /// Proportional gain
    pub k_p: f64,

    /// Derivative gain, applied to `prev_error - error`
    pub k_d: f64,

    // ---- STEERING ----
    /// Steering angle demanded when the correction is zero.
    ///
    /// Units: degrees
    pub angle_offset_deg: f64,

    /// Minimum steering angle demand.
    ///
    /// Units: degrees
    pub min_angle_deg: f64,

    /// Maximum steering angle demand.
    ///
    /// Units: degrees
    pub max_angle_deg: f64,

    // ---- SPEED BANDS ----
    /// Unit the absolute steering angle is expressed in when compared to the thresholds below.
    pub velocity_threshold_unit: AngleUnit,

    /// Below this absolute angle the vehicle runs at `full_speed_velocity`.
    pub full_speed_threshold: f64,

    /// Units: meters/second
    pub full_speed_velocity: f64,

    /// Above this absolute angle the vehicle runs at `slow_velocity`.
    pub slow_threshold: f64,

    /// Units: meters/second
    pub slow_velocity: f64,

    /// Above this absolute angle the vehicle runs at `very_slow_velocity`.
    pub very_slow_threshold: f64,

    /// Units: meters/second
    pub very_slow_velocity: f64,

    /// Speed used when no band matches.
    ///
    /// Units: meters/second
    pub default_velocity: f64,

    // ---- SPEED LIMITS ----
    /// Maximum speed demand.
    ///
    /// Units: meters/second
    pub max_velocity: f64,

    /// Speed demanded in place of any negative speed.
    ///
    /// Units: meters/second
    pub negative_velocity_reset: f64,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl Default for Params {
    fn default() -> Self {
        Self {
            k_p: 5.0,
            k_d: 0.25,
            angle_offset_deg: 18.0,
            min_angle_deg: -30.0,
            max_angle_deg: 30.0,
            velocity_threshold_unit: AngleUnit::Radians,
            full_speed_threshold: 1.0,
            full_speed_velocity: 3.5,
            slow_threshold: 10.0,
            slow_velocity: 0.75,
            very_slow_threshold: 20.0,
            very_slow_velocity: 0.3,
            default_velocity: 1.0,
            max_velocity: 3.5,
            negative_velocity_reset: 1.0,
        }
    }
}

impl Params {
    /// Steering angle offset in radians.
    pub fn angle_offset_rad(&self) -> f64 {
        self.angle_offset_deg.to_radians()
    }

    /// Minimum steering angle in radians.
    pub fn min_angle_rad(&self) -> f64 {
        self.min_angle_deg.to_radians()
    }

    /// Maximum steering angle in radians.
    pub fn max_angle_rad(&self) -> f64 {
        self.max_angle_deg.to_radians()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_partial_params_file() {
        let params: Params = toml::from_str(
            r#"
            k_p = 2.0
            velocity_threshold_unit = "degrees"
            "#,
        )
        .unwrap();

        assert_eq!(params.k_p, 2.0);
        assert_eq!(params.velocity_threshold_unit, AngleUnit::Degrees);
        assert_eq!(params.k_d, Params::default().k_d);
        assert_eq!(params.max_velocity, 3.5);
    }

    #[test]
    fn test_shipped_params_match_defaults() {
        let path = concat!(env!("CARGO_MANIFEST_DIR"), "/../params/pd_ctrl.toml");
        let params: Params = util::params::load_from_path(path).unwrap();

        assert_eq!(params, Params::default());
    }
}
