//! Synthetic wall error publisher
//!
//! Publishes a slow sinusoidal wall error on the `wall_error` topic so the PD controller can be
//! exercised without the rest of the sensing pipeline.

use comms_if::{
    drive::PidInput,
    net::{MonitoredSocket, SocketOptions},
};
use std::time::{Duration, Instant};

/// Amplitude of the published error
const AMPLITUDE: f64 = 2.0;

/// Period of the published error in seconds
const PERIOD_S: f64 = 8.0;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Endpoint may be given as the only argument
    let endpoint = std::env::args()
        .nth(1)
        .unwrap_or_else(|| String::from("tcp://*:5010"));

    // Create zmq context
    let ctx = zmq::Context::new();

    // Create socket options
    let socket_options = SocketOptions {
        bind: true,
        block_on_first_connect: false,
        ..Default::default()
    };

    // Create the socket
    let socket = MonitoredSocket::new(&ctx, zmq::PUB, socket_options, &endpoint)?;

    println!("Wall error publisher open on {}", endpoint);

    let start = Instant::now();

    // Send data to subscribers at 20 Hz
    loop {
        let t = start.elapsed().as_secs_f64();
        let sample = PidInput::new(AMPLITUDE * (std::f64::consts::TAU * t / PERIOD_S).sin());

        match socket.publish(&sample) {
            Ok(_) => (),
            Err(e) => println!("Failed to send error sample: {}", e),
        }

        std::thread::sleep(Duration::from_millis(50));
    }
}
