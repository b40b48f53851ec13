//! # Control Server Module
//!
//! This module abstracts over the networking side of the PD control executable. Wall error
//! samples are received by subscribing to the `wall_error` topic, and drive parameters are
//! published on the `drive_parameters` topic.

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use comms_if::{
    drive::{DriveParam, PidInput, WALL_ERROR_TOPIC},
    net::{zmq, MonitoredSocket, MonitoredSocketError, SocketOptions},
};
use log::warn;

use crate::{node::DriveSink, params::PdCtrlExecParams};

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// An abstraction over the networking part of the PD control executable.
pub struct CtrlServer {
    /// SUB socket which receives wall error samples
    wall_error_socket: MonitoredSocket,

    /// PUB socket which sends drive parameters
    drive_params_socket: MonitoredSocket,
}

// ------------------------------------------------------------------------------------------------
// ENUMS
// ------------------------------------------------------------------------------------------------

/// Errors which can occur in the [`CtrlServer`]
#[derive(thiserror::Error, Debug)]
pub enum CtrlServerError {
    #[error("Socket error: {0}")]
    SocketError(MonitoredSocketError),

    #[error("Could not send drive parameters: {0}")]
    SendError(MonitoredSocketError),
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl CtrlServer {
    /// Create a new instance of the control server.
    ///
    /// This function will not wait for the wall error publisher to come up before returning.
    pub fn new(ctx: &zmq::Context, params: &PdCtrlExecParams) -> Result<Self, CtrlServerError> {
        // Create the socket options
        let wall_error_socket_options = SocketOptions {
            block_on_first_connect: false,
            subscriptions: vec![String::from(WALL_ERROR_TOPIC)],
            recv_timeout: params.recv_timeout_ms,
            linger: 1,
            ..Default::default()
        };
        let drive_params_socket_options = SocketOptions {
            bind: true,
            block_on_first_connect: false,
            send_timeout: 10,
            linger: 1,
            ..Default::default()
        };

        // Create the sockets
        let wall_error_socket = MonitoredSocket::new(
            ctx,
            zmq::SUB,
            wall_error_socket_options,
            &params.wall_error_endpoint,
        )?;
        let drive_params_socket = MonitoredSocket::new(
            ctx,
            zmq::PUB,
            drive_params_socket_options,
            &params.drive_params_endpoint,
        )?;

        Ok(Self {
            wall_error_socket,
            drive_params_socket,
        })
    }

    /// Retrieve the next wall error sample from the publisher.
    ///
    /// `None` is returned if no valid sample arrives before the receive timeout.
    pub fn get_error_sample(&mut self) -> Option<PidInput> {
        match self.wall_error_socket.recv_topic::<PidInput>() {
            Ok(s) => s,
            Err(e) => {
                warn!("Could not read wall error sample: {}", e);
                None
            }
        }
    }

    /// Return if the wall error publisher is connected.
    pub fn is_connected(&self) -> bool {
        self.wall_error_socket.connected()
    }
}

impl DriveSink for CtrlServer {
    type Error = CtrlServerError;

    fn send_drive_param(&mut self, drive_param: &DriveParam) -> Result<(), Self::Error> {
        self.drive_params_socket
            .publish(drive_param)
            .map_err(CtrlServerError::SendError)
    }
}

impl From<MonitoredSocketError> for CtrlServerError {
    fn from(e: MonitoredSocketError) -> Self {
        CtrlServerError::SocketError(e)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_inproc_round_trip() {
        let ctx = zmq::Context::new();

        // Stand in for the wall error estimator and the actuation layer
        let estimator = MonitoredSocket::new(
            &ctx,
            zmq::PUB,
            SocketOptions {
                bind: true,
                block_on_first_connect: false,
                ..Default::default()
            },
            "inproc://wall_error_test",
        )
        .unwrap();

        let params = PdCtrlExecParams {
            wall_error_endpoint: String::from("inproc://wall_error_test"),
            drive_params_endpoint: String::from("inproc://drive_params_test"),
            recv_timeout_ms: 50,
        };
        let mut server = CtrlServer::new(&ctx, &params).unwrap();

        let actuation = MonitoredSocket::new(
            &ctx,
            zmq::SUB,
            SocketOptions {
                block_on_first_connect: false,
                subscriptions: vec![String::from("drive_parameters")],
                recv_timeout: 50,
                ..Default::default()
            },
            "inproc://drive_params_test",
        )
        .unwrap();

        // PUB/SUB drops messages until the subscription has propagated, so keep publishing until
        // one arrives
        let mut received = None;
        for _ in 0..100 {
            estimator.publish(&PidInput::new(0.75)).unwrap();
            if let Some(s) = server.get_error_sample() {
                received = Some(s);
                break;
            }
        }
        assert_eq!(received, Some(PidInput::new(0.75)));

        let mut delivered = None;
        for _ in 0..100 {
            server
                .send_drive_param(&DriveParam {
                    angle: 0.1,
                    velocity: 2.0,
                })
                .unwrap();
            if let Some(p) = actuation.recv_topic::<DriveParam>().unwrap() {
                delivered = Some(p);
                break;
            }
        }
        let delivered = delivered.unwrap();
        assert_relative_eq!(delivered.angle, 0.1);
        assert_relative_eq!(delivered.velocity, 2.0);
    }
}
