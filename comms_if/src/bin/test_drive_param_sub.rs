//! Simple drive parameters subscriber

use comms_if::{
    drive::{DriveParam, DRIVE_PARAMS_TOPIC},
    net::{MonitoredSocket, SocketOptions},
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Endpoint may be given as the only argument
    let endpoint = std::env::args()
        .nth(1)
        .unwrap_or_else(|| String::from("tcp://localhost:5011"));

    // Create context
    let ctx = zmq::Context::new();

    // Subscribe to the drive parameters only
    let socket_options = SocketOptions {
        subscriptions: vec![String::from(DRIVE_PARAMS_TOPIC)],
        ..Default::default()
    };

    // Create socket
    let socket = MonitoredSocket::new(&ctx, zmq::SUB, socket_options, &endpoint)?;

    // Recieve messages from publisher
    loop {
        if let Some(msg) = socket.recv_topic::<DriveParam>()? {
            println!(
                "angle: {:+.4} rad ({:+.2} deg), velocity: {:.2} m/s",
                msg.angle,
                msg.angle.to_degrees(),
                msg.velocity
            );
        }
    }
}
