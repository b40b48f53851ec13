//! # PD Control Executable
//!
//! This executable keeps the vehicle following a wall. It subscribes to the wall error produced
//! by the estimator, runs each sample through the PD steering controller and publishes the
//! resulting drive parameters to the actuation layer.
//!
//! If a script is given, samples are replayed from it instead of being received from the
//! network. Drive parameters are still published.

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

// External
use color_eyre::{eyre::WrapErr, Result};
use comms_if::drive::PidInput;
use log::{debug, info, trace, warn};
use std::path::PathBuf;
use std::time::{Duration, Instant};
use structopt::StructOpt;

// Internal
use pd_ctrl_lib::{
    ctrl_server::CtrlServer,
    node::WallFollowNode,
    params::PdCtrlExecParams,
    pd_ctrl::{InitData, PdCtrl},
};
use util::{
    logger::{logger_init, LevelFilter},
    module::State,
    script_interpreter::{PendingSamples, ScriptInterpreter},
    session::Session,
};

// ------------------------------------------------------------------------------------------------
// CONSTANTS
// ------------------------------------------------------------------------------------------------

/// Period to sleep between script polls when no sample is due.
const SCRIPT_POLL_PERIOD: Duration = Duration::from_millis(1);

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

#[derive(Debug, StructOpt)]
#[structopt(name = "pd_ctrl_exec", about = "PD steering controller for wall following")]
struct Opts {
    /// Replay wall error samples from this script instead of the network
    #[structopt(long, parse(from_os_str))]
    script: Option<PathBuf>,

    /// PdCtrl parameter file, relative to the params directory
    #[structopt(long, default_value = "pd_ctrl.toml")]
    params: String,

    /// Executable parameter file, relative to the params directory
    #[structopt(long, default_value = "pd_ctrl_exec.toml")]
    exec_params: String,

    /// Minimum log level (info, debug or trace)
    #[structopt(long, default_value = "debug")]
    log_level: LevelFilter,
}

/// Where error samples come from.
enum SampleSource {
    Network,
    Script(ScriptInterpreter),
}

// ------------------------------------------------------------------------------------------------
// MAIN
// ------------------------------------------------------------------------------------------------

fn main() -> Result<()> {
    color_eyre::install()?;

    let opts = Opts::from_args();

    // ---- EARLY INITIALISATION ----

    // Initialise session
    let session =
        Session::new("pd_ctrl_exec", "sessions").wrap_err("Failed to create the session")?;

    // Initialise logger
    logger_init(opts.log_level, &session).wrap_err("Failed to initialise logging")?;

    // Log information on this execution.
    info!("PD Control Executable\n");
    info!("Session directory: {:?}\n", session.session_root);
    debug!("Options: {:?}", opts);

    info!("Initialising...");

    // ---- LOAD PARAMETERS ----

    let exec_params: PdCtrlExecParams = util::params::load(&opts.exec_params)
        .wrap_err("Could not load the executable parameters")?;

    info!("Parameters loaded");

    // ---- INITIALISE SAMPLE SOURCE ----

    let mut source = match opts.script {
        Some(ref path) => {
            info!("Loading script from {:?}", path);

            let si = ScriptInterpreter::new(path).wrap_err("Failed to load script")?;

            info!(
                "Loaded script lasts {:.02} s and contains {} samples\n",
                si.get_duration(),
                si.get_num_samples()
            );

            SampleSource::Script(si)
        }
        None => {
            info!("No script provided, wall error will be received from the network\n");
            SampleSource::Network
        }
    };

    // ---- INITIALISE MODULES ----

    let mut pd_ctrl = PdCtrl::default();
    pd_ctrl
        .init(InitData::ParamFile(opts.params.clone()), &session)
        .wrap_err("Failed to initialise PdCtrl")?;
    info!("PdCtrl init complete: {:?}", pd_ctrl.params());

    // ---- SERVER INITIALISATION ----

    let zmq_ctx = comms_if::net::zmq::Context::new();

    let server = CtrlServer::new(&zmq_ctx, &exec_params).wrap_err("Failed to initialise server")?;

    info!("Server initialised");

    let mut node = WallFollowNode::new(pd_ctrl, server);

    // ---- MAIN LOOP ----

    info!("Initialisation complete, waiting for wall error samples");

    let mut waiting = true;
    let start = Instant::now();

    loop {
        let samples: Vec<PidInput> = match source {
            SampleSource::Network => match node.sink_mut().get_error_sample() {
                Some(s) => vec![s],
                None => {
                    if !waiting {
                        warn!(
                            "No wall error received for {} ms, waiting for samples (publisher \
                            connected: {})",
                            exec_params.recv_timeout_ms,
                            node.sink().is_connected()
                        );
                        waiting = true;
                    }
                    continue;
                }
            },
            SampleSource::Script(ref mut si) => {
                match si.get_pending_at(start.elapsed().as_secs_f64()) {
                    PendingSamples::Some(s) => s,
                    PendingSamples::None => {
                        std::thread::sleep(SCRIPT_POLL_PERIOD);
                        continue;
                    }
                    PendingSamples::EndOfScript => {
                        info!("End of error script reached, stopping");
                        break;
                    }
                }
            }
        };

        if waiting {
            info!("Received wall error, controlling");
            waiting = false;
        }

        for sample in samples.iter() {
            let (output, sent) = node.handle_sample(sample);

            trace!("Drive parameters: {:?}", output);

            if let Err(e) = sent {
                warn!("Couldn't publish drive parameters: {}", e);
            }
        }
    }

    info!("Processed {} samples", node.num_samples());

    Ok(())
}
