//! # Drive Interface
//!
//! Structures exchanged between the wall error estimator, the PD controller and the vehicle's
//! actuation layer.

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use serde::{Deserialize, Serialize};

use crate::net::topic::TopicMessage;

// ------------------------------------------------------------------------------------------------
// CONSTANTS
// ------------------------------------------------------------------------------------------------

/// Topic on which wall error samples are published.
pub const WALL_ERROR_TOPIC: &str = "wall_error";

/// Topic on which drive parameters are published.
pub const DRIVE_PARAMS_TOPIC: &str = "drive_parameters";

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// A single error sample produced by the wall error estimator.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Default)]
pub struct PidInput {
    /// Lateral/angular deviation from the desired wall following path.
    pub pid_error: f64,
}

/// Drive command sent to the vehicle's low level actuation layer.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Default)]
pub struct DriveParam {
    /// Steering angle demand.
    ///
    /// Units: radians
    pub angle: f64,

    /// Speed demand.
    ///
    /// Units: meters/second
    pub velocity: f64,
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl PidInput {
    pub fn new(pid_error: f64) -> Self {
        Self { pid_error }
    }
}

impl TopicMessage for PidInput {
    const TOPIC: &'static str = WALL_ERROR_TOPIC;
}

impl TopicMessage for DriveParam {
    const TOPIC: &'static str = DRIVE_PARAMS_TOPIC;
}
