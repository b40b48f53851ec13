//! # PD steering control module
//!
//! PdCtrl keeps the vehicle following a wall. On every wall error sample it computes a
//! proportional-derivative correction, turns it into a steering angle about a fixed offset, and
//! picks a speed from the magnitude of that angle: the harder the turn, the slower the vehicle.
//!
//! The correction is interpreted in degrees and converted to radians before being added to the
//! offset. The steering angle is then saturated between the minimum and maximum angles. Speed
//! bands are evaluated in a fixed order with the last matching band winning, and the result is
//! finally limited, with any negative speed replaced by a fixed reset value.
//!
//! The only state kept between samples is the previous error, used for the derivative term.

// ---------------------------------------------------------------------------
// MODULES
// ---------------------------------------------------------------------------

mod calc_angle;
mod calc_velocity;
mod params;
mod state;

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// Internal
pub use calc_angle::*;
pub use calc_velocity::*;
pub use params::*;
pub use state::*;

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// Possible errors that can occur while initialising PdCtrl.
#[derive(Debug, thiserror::Error)]
pub enum PdCtrlInitError {
    #[error("Could not load the PdCtrl parameters: {0}")]
    ParamsError(#[from] util::params::LoadError),

    #[error("Could not open the PdCtrl archive: {0}")]
    ArchiveError(#[from] util::archive::ArchiveError),
}
