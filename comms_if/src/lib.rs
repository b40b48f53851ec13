//! # Communications interface crate.
//!
//! Provides the message definitions and networking shared by the wall following executables.

// ------------------------------------------------------------------------------------------------
// MODULES
// ------------------------------------------------------------------------------------------------

/// Messages carried on the wall error and drive parameter channels
pub mod drive;

/// Network module
pub mod net;
