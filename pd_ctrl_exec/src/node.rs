//! # Wall Following Node
//!
//! Couples [`PdCtrl`] to an output channel. Each error sample is processed to completion,
//! archived and published before the next is accepted.

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use comms_if::drive::{DriveParam, PidInput};
use log::warn;
use std::convert::Infallible;
use util::{archive::Archived, module::State};

use crate::pd_ctrl::{InputData, PdCtrl};

// ------------------------------------------------------------------------------------------------
// TRAITS
// ------------------------------------------------------------------------------------------------

/// An output channel for drive parameters.
pub trait DriveSink {
    /// An error which can occur while sending.
    type Error: std::error::Error;

    /// Send a drive command.
    fn send_drive_param(&mut self, drive_param: &DriveParam) -> Result<(), Self::Error>;
}

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// The wall following node, owning the controller and its output channel.
pub struct WallFollowNode<S: DriveSink> {
    pd_ctrl: PdCtrl,

    sink: S,

    num_samples: u64,
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl<S: DriveSink> WallFollowNode<S> {
    /// Create a new node from an initialised controller and an output channel.
    pub fn new(pd_ctrl: PdCtrl, sink: S) -> Self {
        Self {
            pd_ctrl,
            sink,
            num_samples: 0,
        }
    }

    /// Process an error sample and send the resulting drive command.
    ///
    /// The command is returned even if sending it failed, since the controller state has already
    /// moved on.
    pub fn handle_sample(&mut self, sample: &PidInput) -> (DriveParam, Result<(), S::Error>) {
        let (output, _report) = match self.pd_ctrl.proc(&InputData { sample: *sample }) {
            Ok(o) => o,
            Err(e) => match e {},
        };

        self.num_samples += 1;

        // Archive failures are not fatal to control
        if let Err(e) = self.pd_ctrl.write() {
            warn!("Could not archive PdCtrl sample: {}", e);
        }

        let sent = self.sink.send_drive_param(&output);

        (output, sent)
    }

    /// Number of samples processed so far.
    pub fn num_samples(&self) -> u64 {
        self.num_samples
    }

    pub fn pd_ctrl(&self) -> &PdCtrl {
        &self.pd_ctrl
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }
}

/// Collects drive commands in memory, used when replaying without a network.
impl DriveSink for Vec<DriveParam> {
    type Error = Infallible;

    fn send_drive_param(&mut self, drive_param: &DriveParam) -> Result<(), Self::Error> {
        self.push(*drive_param);
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::pd_ctrl::Params;
    use approx::assert_relative_eq;
    use util::script_interpreter::{PendingSamples, ScriptInterpreter};

    #[derive(Debug, thiserror::Error)]
    #[error("link down")]
    struct LinkDown;

    struct FailingSink;

    impl DriveSink for FailingSink {
        type Error = LinkDown;

        fn send_drive_param(&mut self, _: &DriveParam) -> Result<(), Self::Error> {
            Err(LinkDown)
        }
    }

    #[test]
    fn test_samples_are_published_in_order() {
        let mut node = WallFollowNode::new(PdCtrl::new(Params::default()), Vec::new());

        for e in [0.0, 50.0, 50.0].iter() {
            let (_, sent) = node.handle_sample(&PidInput::new(*e));
            assert!(sent.is_ok());
        }

        let published = node.sink();
        assert_eq!(published.len(), 3);
        assert_eq!(node.num_samples(), 3);
        assert_relative_eq!(published[0].angle, 18f64.to_radians());
        assert_relative_eq!(published[1].angle, 30f64.to_radians());
        assert_relative_eq!(node.pd_ctrl().report().correction, 250.0);
        assert_eq!(node.pd_ctrl().prev_error(), 50.0);
    }

    #[test]
    fn test_send_failure_still_advances_state() {
        let mut node = WallFollowNode::new(PdCtrl::new(Params::default()), FailingSink);

        let (out, sent) = node.handle_sample(&PidInput::new(0.0));

        assert!(sent.is_err());
        assert_eq!(out.velocity, 3.5);
        assert_eq!(node.num_samples(), 1);
    }

    #[test]
    fn test_script_replay() {
        let mut si = ScriptInterpreter::parse(
            "0.0: {\"pid_error\": 0.0};\n0.1: {\"pid_error\": 1.0};\n0.2: {\"pid_error\": -1.0};\n",
        )
        .unwrap();
        let mut node = WallFollowNode::new(PdCtrl::new(Params::default()), Vec::new());

        while let PendingSamples::Some(samples) = si.get_pending_at(1.0) {
            for s in samples.iter() {
                node.handle_sample(s).1.unwrap();
            }
        }

        assert_eq!(node.sink().len(), 3);
        assert_eq!(node.pd_ctrl().prev_error(), -1.0);
        assert_eq!(si.get_pending_at(1.0), PendingSamples::EndOfScript);
    }

    #[test]
    fn test_shipped_script_stays_in_bounds() {
        let path = concat!(env!("CARGO_MANIFEST_DIR"), "/../scripts/wall_error_step.wes");
        let mut si = ScriptInterpreter::new(path).unwrap();
        let mut node = WallFollowNode::new(PdCtrl::new(Params::default()), Vec::new());

        if let PendingSamples::Some(samples) = si.get_pending_at(si.get_duration()) {
            for s in samples.iter() {
                node.handle_sample(s).1.unwrap();
            }
        }

        assert_eq!(node.sink().len(), 17);
        for p in node.sink().iter() {
            assert!(p.angle.abs() <= 30f64.to_radians());
            assert!(p.velocity >= 0.0 && p.velocity <= 3.5);
        }
    }
}
