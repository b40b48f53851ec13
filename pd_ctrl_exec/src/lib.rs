//! # PD control library.
//!
//! This library allows other crates in the workspace (and the benchmarks) to access items defined
//! inside the PD control executable.

// ------------------------------------------------------------------------------------------------
// MODULES
// ------------------------------------------------------------------------------------------------

/// Control server - receives wall error samples and publishes drive parameters
pub mod ctrl_server;

/// Wall following node - couples the controller to an output channel
pub mod node;

/// Parameters for the PD control executable
pub mod params;

/// PD steering control module - converts wall error into drive parameters
pub mod pd_ctrl;
