//! # PD Control Executable Parameters

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use serde::Deserialize;

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

#[derive(Deserialize, Debug, Clone)]
pub struct PdCtrlExecParams {
    /// Endpoint of the wall error publisher, which the subscriber connects to
    pub wall_error_endpoint: String,

    /// Endpoint the drive parameters publisher binds to
    pub drive_params_endpoint: String,

    /// Time to wait for a wall error sample before reporting that none are arriving.
    ///
    /// Units: milliseconds
    pub recv_timeout_ms: i32,
}

impl Default for PdCtrlExecParams {
    fn default() -> Self {
        Self {
            wall_error_endpoint: String::from("tcp://localhost:5010"),
            drive_params_endpoint: String::from("tcp://*:5011"),
            recv_timeout_ms: 200,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_shipped_exec_params() {
        let path = concat!(env!("CARGO_MANIFEST_DIR"), "/../params/pd_ctrl_exec.toml");
        let params: PdCtrlExecParams = util::params::load_from_path(path).unwrap();
        let defaults = PdCtrlExecParams::default();

        assert_eq!(params.wall_error_endpoint, defaults.wall_error_endpoint);
        assert_eq!(params.drive_params_endpoint, defaults.drive_params_endpoint);
        assert_eq!(params.recv_timeout_ms, defaults.recv_timeout_ms);
    }
}
