//! Implementations for the PdCtrl state structure

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use log::trace;
use serde::Serialize;
use std::convert::Infallible;

// Internal
use super::{
    calc_angle, calc_correction, limit_velocity, select_velocity, Params, PdCtrlInitError,
    VelocityBand,
};
use comms_if::drive::{DriveParam, PidInput};
use util::{
    archive::{ArchiveError, Archived, Archiver},
    module::State,
    params,
    session::{get_elapsed_seconds, Session},
};

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// PD steering control module state
#[derive(Default)]
pub struct PdCtrl {
    pub(crate) params: Params,

    /// Error from the previous sample, zero before the first sample.
    prev_error: f64,

    pub(crate) report: StatusReport,

    arch_record: Option<ArchRecord>,
    arch_samples: Archiver,
}

/// How PdCtrl obtains its parameters on initialisation.
#[derive(Debug, Clone)]
pub enum InitData {
    /// Load from a file relative to the params directory
    ParamFile(String),

    /// Use the given parameters directly
    Params(Params),
}

/// Input data to PD steering control.
#[derive(Debug, Default, Clone, Copy)]
pub struct InputData {
    pub sample: PidInput,
}

/// Status report for PdCtrl processing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct StatusReport {
    /// PD correction before conversion to radians
    ///
    /// Units: degrees
    pub correction: f64,

    /// Steering angle before the limits were applied
    ///
    /// Units: radians
    pub angle_raw_rad: f64,

    /// True if the steering angle limits were applied
    pub angle_limited: bool,

    /// The speed band that set the speed demand
    pub velocity_band: VelocityBand,

    /// True if the speed limits were applied
    pub velocity_limited: bool,
}

/// One row of the samples archive.
#[derive(Debug, Clone, Copy, Serialize)]
struct ArchRecord {
    time_s: f64,
    pid_error: f64,
    prev_error: f64,
    correction: f64,
    angle_raw_rad: f64,
    angle_rad: f64,
    angle_limited: bool,
    velocity_band: VelocityBand,
    velocity: f64,
    velocity_limited: bool,
}

// ---------------------------------------------------------------------------
// PUBLIC FUNCTIONS
// ---------------------------------------------------------------------------

/// Compute the drive command for an error sample given the previous error.
///
/// This is the whole control law, free of any state. The caller is responsible for remembering
/// `error` as the next call's `prev_error`.
pub fn calc_drive_param(error: f64, prev_error: f64, params: &Params) -> (DriveParam, StatusReport) {
    let correction = calc_correction(error, prev_error, params);

    let (angle, angle_raw_rad, angle_limited) = calc_angle(correction, params);

    let (velocity, velocity_band) = select_velocity(angle, params);
    let (velocity, velocity_limited) = limit_velocity(velocity, params);

    (
        DriveParam { angle, velocity },
        StatusReport {
            correction,
            angle_raw_rad,
            angle_limited,
            velocity_band,
            velocity_limited,
        },
    )
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl PdCtrl {
    /// Create a new controller with the given parameters and no archive.
    pub fn new(params: Params) -> Self {
        Self {
            params,
            ..Default::default()
        }
    }

    /// Process a single error sample, returning the drive command.
    pub fn on_error_sample(&mut self, error: f64) -> DriveParam {
        self.step(error).0
    }

    /// The error from the most recent sample.
    pub fn prev_error(&self) -> f64 {
        self.prev_error
    }

    /// The status report of the most recent sample.
    pub fn report(&self) -> &StatusReport {
        &self.report
    }

    pub fn params(&self) -> &Params {
        &self.params
    }

    /// Forget the previous error, as if no samples had been processed.
    pub fn reset(&mut self) {
        self.prev_error = 0.0;
        self.report = StatusReport::default();
        self.arch_record = None;
    }

    fn step(&mut self, error: f64) -> (DriveParam, StatusReport) {
        let (output, report) = calc_drive_param(error, self.prev_error, &self.params);

        trace!(
            "PdCtrl: error {:+.4}, prev {:+.4}, correction {:+.3} -> angle {:+.4} rad, \
            velocity {:.2} ({:?})",
            error,
            self.prev_error,
            report.correction,
            output.angle,
            output.velocity,
            report.velocity_band
        );

        if self.arch_samples.is_enabled() {
            self.arch_record = Some(ArchRecord {
                time_s: get_elapsed_seconds(),
                pid_error: error,
                prev_error: self.prev_error,
                correction: report.correction,
                angle_raw_rad: report.angle_raw_rad,
                angle_rad: output.angle,
                angle_limited: report.angle_limited,
                velocity_band: report.velocity_band,
                velocity: output.velocity,
                velocity_limited: report.velocity_limited,
            });
        }

        self.prev_error = error;
        self.report = report;

        (output, report)
    }
}

impl State for PdCtrl {
    type InitData = InitData;
    type InitError = PdCtrlInitError;

    type InputData = InputData;
    type OutputData = DriveParam;
    type StatusReport = StatusReport;
    type ProcError = Infallible;

    /// Initialise the PdCtrl module.
    ///
    /// Loads the parameters, resets the previous error and opens the samples archive.
    fn init(&mut self, init_data: Self::InitData, session: &Session) -> Result<(), Self::InitError> {
        self.params = match init_data {
            InitData::ParamFile(path) => params::load(&path)?,
            InitData::Params(p) => p,
        };

        self.reset();

        self.arch_samples = Archiver::from_path(session, "pd_ctrl/samples.csv")?;

        Ok(())
    }

    /// Process one error sample.
    fn proc(
        &mut self,
        input_data: &Self::InputData,
    ) -> Result<(Self::OutputData, Self::StatusReport), Self::ProcError> {
        Ok(self.step(input_data.sample.pid_error))
    }
}

impl Archived for PdCtrl {
    fn write(&mut self) -> Result<(), ArchiveError> {
        match self.arch_record.take() {
            Some(r) => self.arch_samples.serialise(r),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::pd_ctrl::AngleUnit;
    use approx::assert_relative_eq;

    #[test]
    fn test_zero_error() {
        let (out, report) = calc_drive_param(0.0, 0.0, &Params::default());

        assert_eq!(report.correction, 0.0);
        assert_relative_eq!(out.angle, 18f64.to_radians());
        assert_eq!(out.velocity, 3.5);
        assert_eq!(report.velocity_band, VelocityBand::FullSpeed);
        assert!(!report.angle_limited);
        assert!(!report.velocity_limited);
    }

    #[test]
    fn test_large_error_saturates() {
        let (out, report) = calc_drive_param(50.0, 0.0, &Params::default());

        assert_relative_eq!(report.correction, 237.5);
        assert_relative_eq!(report.angle_raw_rad, 255.5f64.to_radians());
        assert_relative_eq!(out.angle, 30f64.to_radians());
        assert!(report.angle_limited);

        // 30 degrees is ~0.52 rad, under the 1 rad full speed threshold
        assert_eq!(out.velocity, 3.5);

        let degree_params = Params {
            velocity_threshold_unit: AngleUnit::Degrees,
            ..Default::default()
        };
        let (out, report) = calc_drive_param(50.0, 0.0, &degree_params);
        assert_relative_eq!(out.angle, 30f64.to_radians());
        assert_eq!(out.velocity, 0.3);
        assert_eq!(report.velocity_band, VelocityBand::VerySlow);
    }

    #[test]
    fn test_prev_error_tracks_last_sample() {
        let mut ctrl = PdCtrl::new(Params::default());
        assert_eq!(ctrl.prev_error(), 0.0);

        ctrl.on_error_sample(1.5);
        assert_eq!(ctrl.prev_error(), 1.5);

        ctrl.on_error_sample(-0.25);
        assert_eq!(ctrl.prev_error(), -0.25);

        ctrl.reset();
        assert_eq!(ctrl.prev_error(), 0.0);
    }

    #[test]
    fn test_repeated_error() {
        let mut ctrl = PdCtrl::new(Params::default());

        let first = ctrl.on_error_sample(2.0);
        assert_relative_eq!(ctrl.report().correction, 5.0 * 2.0 + 0.25 * (0.0 - 2.0));

        let second = ctrl.on_error_sample(2.0);
        assert_relative_eq!(ctrl.report().correction, 5.0 * 2.0);

        // The derivative term opposed the first step, so the second correction is larger
        assert!(second.angle > first.angle);
    }

    #[test]
    fn test_outputs_bounded() {
        let params = Params::default();
        let min_angle = params.min_angle_rad();
        let max_angle = params.max_angle_rad();

        for unit in [AngleUnit::Radians, AngleUnit::Degrees].iter() {
            let mut ctrl = PdCtrl::new(Params {
                velocity_threshold_unit: *unit,
                ..Default::default()
            });

            let mut error = -100.0;
            while error <= 100.0 {
                let out = ctrl.on_error_sample(error);
                assert!(out.angle >= min_angle && out.angle <= max_angle);
                assert!(out.velocity >= 0.0 && out.velocity <= 3.5);
                error += 0.37;
            }

            for error in [1e9, -1e9, 1e-300, -1e-300].iter() {
                let out = ctrl.on_error_sample(*error);
                assert!(out.angle >= min_angle && out.angle <= max_angle);
                assert!(out.velocity >= 0.0 && out.velocity <= 3.5);
            }
        }
    }

    #[test]
    fn test_init_and_archive() {
        let dir = tempfile::tempdir().unwrap();
        let session = Session::new_in(dir.path(), "pd_ctrl_test").unwrap();

        let mut ctrl = PdCtrl::default();
        ctrl.init(InitData::Params(Params::default()), &session).unwrap();

        let (out, report) = ctrl
            .proc(&InputData {
                sample: PidInput::new(50.0),
            })
            .unwrap();
        assert!(report.angle_limited);
        assert_relative_eq!(out.angle, 30f64.to_radians());
        ctrl.write().unwrap();

        // Nothing new to write
        ctrl.write().unwrap();

        let contents =
            std::fs::read_to_string(session.arch_root.join("pd_ctrl/samples.csv")).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("time_s,pid_error,prev_error,correction"));
        assert!(lines[1].contains(",true,FullSpeed,3.5,false"));
    }
}
