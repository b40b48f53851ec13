//! # Error script interpreter module
//!
//! This module provides an interpreter for wall error scripts, allowing a recorded or synthetic
//! sequence of error samples to be replayed through the controller without a live estimator.
//!
//! A script is a text file of timestamped samples, one per line:
//!
//! ```text
//! # time_s: sample;
//! 0.0: {"pid_error": 0.0};
//! 0.5: {"pid_error": 1.25};
//! ```
//!
//! Anything that doesn't match this form (comments, blank lines) is ignored.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use regex::RegexBuilder;
use std::collections::VecDeque;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

// Internal
use crate::session::get_elapsed_seconds;
use comms_if::drive::PidInput;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// A sample which is scripted to occur at a specific time.
#[derive(Debug, Clone, Copy)]
struct ScriptedSample {
    /// The time the sample is supposed to be delivered at
    exec_time_s: f64,

    sample: PidInput,
}

/// A script interpreter.
///
/// After initialising with the path to the script to run use `.get_pending` to
/// acquire a list of samples that are due.
pub struct ScriptInterpreter {
    _script_path: Option<PathBuf>,
    samples: VecDeque<ScriptedSample>,
}

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ScriptError {
    #[error("Could not find the script at {0:?}")]
    ScriptNotFound(PathBuf),

    #[error("Could not load the script: {0}")]
    ScriptLoadError(std::io::Error),

    #[error("The script is empty (or is so bad it can't be read)")]
    ScriptEmpty,

    #[error("Could not build the script pattern: {0}")]
    InvalidPattern(regex::Error),

    #[error(
        "Script contains an invalid timestamp: {0}. \
        Should be a float (like 1.0)"
    )]
    InvalidTimestamp(String),

    #[error("Script contains an invalid sample at {0} s: {1}")]
    InvalidSample(f64, serde_json::Error),
}

/// Samples which are due for processing.
#[derive(Debug, PartialEq)]
pub enum PendingSamples {
    None,
    Some(Vec<PidInput>),
    EndOfScript,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl ScriptInterpreter {
    /// Create a new interpreter from the given script path.
    pub fn new<P: AsRef<Path>>(script_path: P) -> Result<Self, ScriptError> {
        let path = PathBuf::from(script_path.as_ref());

        if !path.exists() {
            return Err(ScriptError::ScriptNotFound(path));
        }

        let script = fs::read_to_string(&path).map_err(ScriptError::ScriptLoadError)?;

        let mut si = Self::parse(&script)?;
        si._script_path = Some(path);

        Ok(si)
    }

    /// Create a new interpreter from the contents of a script.
    pub fn parse(script: &str) -> Result<Self, ScriptError> {
        let mut queue: VecDeque<ScriptedSample> = VecDeque::new();

        let re = RegexBuilder::new(r"^\s*(\d+(\.\d+)?)\s*:\s*([^;]*);")
            .multi_line(true)
            .build()
            .map_err(ScriptError::InvalidPattern)?;

        for cap in re.captures_iter(script) {
            let exec_time_s: f64 = cap[1]
                .parse()
                .map_err(|e| ScriptError::InvalidTimestamp(format!("{}", e)))?;

            // The scripts contain JSON only.
            let sample: PidInput = serde_json::from_str(&cap[3])
                .map_err(|e| ScriptError::InvalidSample(exec_time_s, e))?;

            queue.push_back(ScriptedSample {
                exec_time_s,
                sample,
            });
        }

        if queue.is_empty() {
            return Err(ScriptError::ScriptEmpty);
        }

        // Scripts may be written out of order, delivery is always chronological
        queue
            .make_contiguous()
            .sort_by(|a, b| a.exec_time_s.total_cmp(&b.exec_time_s));

        Ok(ScriptInterpreter {
            _script_path: None,
            samples: queue,
        })
    }

    /// Return the samples which are due at the current session time.
    pub fn get_pending(&mut self) -> PendingSamples {
        self.get_pending_at(get_elapsed_seconds())
    }

    /// Return the samples whose execution time is at or before `current_time_s`, in order.
    pub fn get_pending_at(&mut self, current_time_s: f64) -> PendingSamples {
        // If the queue is empty the script is over
        if self.samples.is_empty() {
            return PendingSamples::EndOfScript;
        }

        let mut due = vec![];

        while let Some(s) = self.samples.front() {
            if s.exec_time_s > current_time_s {
                break;
            }
            due.push(s.sample);
            self.samples.pop_front();
        }

        if due.is_empty() {
            PendingSamples::None
        } else {
            PendingSamples::Some(due)
        }
    }

    /// Get the number of samples remaining in the script
    pub fn get_num_samples(&self) -> usize {
        self.samples.len()
    }

    /// Get the length of the script in seconds
    pub fn get_duration(&self) -> f64 {
        match self.samples.back() {
            Some(s) => s.exec_time_s,
            None => 0f64,
        }
    }
}
