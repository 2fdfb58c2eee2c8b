pub mod cutter;
pub mod metrics;
pub mod sampler;

use nalgebra::{Point3, Vector3};

use crate::config::TutorConfig;
use crate::session::cutter::{open_angle_deg, CutGate};
use crate::session::metrics::{MetricsReport, MetricsState};
use crate::session::sampler::SampleGate;
use crate::vessel::VesselModel;

/// Tool state read from the host once per transform notification.
#[derive(Debug, Clone, PartialEq)]
pub struct ToolState {
    /// Trigger direction expressed in the cutter frame.
    pub trigger_direction: Vector3<f64>,
    /// Cutter tip position in world coordinates.
    pub tip_position: Point3<f64>,
    /// Vessel axis direction in world coordinates.
    pub vessel_axis: Vector3<f64>,
    /// Cutter shaft direction in world coordinates.
    pub tool_direction: Vector3<f64>,
}

/// One removed (or re-cut) branch.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CutEvent {
    /// 1-based branch number.
    pub branch: usize,
    /// Distance from the cut location to the branch origin.
    pub branch_distance: f64,
    /// Distance from the cut location to the main vessel axis.
    pub axis_distance: f64,
}

/// What one transform notification did, for the host to mirror on screen.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickOutcome {
    pub open_angle_deg: f64,
    pub sampled: bool,
    pub cut: Option<CutEvent>,
}

/// One trainee recording: owns the vessel model, the throttle/debounce
/// gates and the metrics accumulator, and is driven tick-by-tick by the
/// host's transform notifications.
pub struct TutorSession {
    config: TutorConfig,
    model: VesselModel,
    sampler: SampleGate,
    cut_gate: CutGate,
    metrics: MetricsState,
    running: bool,
    start_time: Option<f64>,
    stop_time: Option<f64>,
}

impl TutorSession {
    pub fn new(model: VesselModel, config: TutorConfig) -> Self {
        let sampler = SampleGate::new(config.sample_interval_s);
        let cut_gate = CutGate::new(config.cut_debounce_s, config.closed_angle_threshold_deg);
        TutorSession {
            config,
            model,
            sampler,
            cut_gate,
            metrics: MetricsState::default(),
            running: false,
            start_time: None,
            stop_time: None,
        }
    }

    /// Starts a fresh recording; any previous state is discarded.
    pub fn start_session(&mut self, now: f64) {
        self.reset_session();
        self.running = true;
        self.start_time = Some(now);
    }

    /// Stops the recording and returns the finalized report.
    pub fn stop_session(&mut self, now: f64) -> MetricsReport {
        self.running = false;
        self.stop_time = Some(now);
        self.report()
    }

    /// Clears metrics, gates and branch visibility without starting.
    pub fn reset_session(&mut self) {
        self.running = false;
        self.start_time = None;
        self.stop_time = None;
        self.metrics.reset();
        self.sampler.reset();
        self.cut_gate.reset();
        self.model.reset_visibility();
    }

    /// Finalized snapshot of the current metrics. Idempotent; safe to call
    /// during or after a recording.
    pub fn report(&self) -> MetricsReport {
        self.metrics.report(self.model.branches_cut())
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn model(&self) -> &VesselModel {
        &self.model
    }

    pub fn config(&self) -> &TutorConfig {
        &self.config
    }

    /// Seconds between start and stop, or start and `now` while running.
    pub fn elapsed_seconds(&self, now: f64) -> Option<f64> {
        let start = self.start_time?;
        Some(self.stop_time.unwrap_or(now) - start)
    }

    /// Single entry point for the host's transform-modified notification.
    ///
    /// A sampled tick rebuilds the visible skeleton, appends the path
    /// sample, updates the angle bounds and then runs the debounced cut
    /// check; everything else is a no-op beyond the returned open angle.
    pub fn on_transform_update(&mut self, state: &ToolState, now: f64) -> TickOutcome {
        let open_angle = open_angle_deg(&state.trigger_direction, &self.config);
        let mut outcome = TickOutcome {
            open_angle_deg: open_angle,
            sampled: false,
            cut: None,
        };

        if !self.sampler.should_sample(now, self.running) {
            return outcome;
        }
        outcome.sampled = true;

        self.model.rebuild_visible_geometry();
        self.metrics.record_sample(state.tip_position);
        self.metrics
            .record_angle(&state.vessel_axis, &state.tool_direction);

        if self.cut_gate.should_trigger(open_angle, now, self.running) {
            outcome.cut = self.evaluate_cut(&state.tip_position);
        }
        outcome
    }

    /// Removes the nearest branch if the closed cutter is near enough to
    /// its origin, and records the cut's distance to the main vessel axis.
    /// A branch that is already hidden may be cut and recorded again.
    fn evaluate_cut(&mut self, cut_location: &Point3<f64>) -> Option<CutEvent> {
        let (branch_distance, branch) = self.model.closest_branch(cut_location);
        if branch == 0 {
            // the main vessel can never be cut
            return None;
        }
        let axis_distance = self.model.axis_distance(cut_location);
        if branch_distance >= self.config.max_cut_distance {
            return None;
        }
        if let Err(e) = self.model.set_branch_visible(branch, false) {
            eprintln!("Skipping cut on unknown branch: {}", e);
            return None;
        }
        self.model.rebuild_visible_geometry();
        self.metrics.record_cut(axis_distance);
        println!("Removed branch {}", branch);
        Some(CutEvent {
            branch,
            branch_distance,
            axis_distance,
        })
    }
}

/// Formats an elapsed duration in seconds as HH:MM:SS.
pub fn format_elapsed(elapsed_s: f64) -> String {
    let total = elapsed_s.max(0.0) as u64;
    format!(
        "{:02}:{:02}:{:02}",
        total / 3600,
        (total % 3600) / 60,
        total % 60
    )
}
