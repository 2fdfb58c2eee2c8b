// File: src/python_bind.rs
use nalgebra::{Point3, Vector3};
use pyo3::exceptions::PyRuntimeError;
use pyo3::prelude::*;

use crate::config::TutorConfig;
use crate::io::load_vessel_model;
use crate::session::metrics::MetricsReport;
use crate::session::{format_elapsed, CutEvent, TickOutcome, ToolState, TutorSession};

#[pyclass]
#[derive(Debug, Clone)]
pub struct PyToolState {
    #[pyo3(get, set)]
    pub trigger_direction: (f64, f64, f64),
    #[pyo3(get, set)]
    pub tip_position: (f64, f64, f64),
    #[pyo3(get, set)]
    pub vessel_axis: (f64, f64, f64),
    #[pyo3(get, set)]
    pub tool_direction: (f64, f64, f64),
}

#[pymethods]
impl PyToolState {
    #[new]
    fn new(
        trigger_direction: (f64, f64, f64),
        tip_position: (f64, f64, f64),
        vessel_axis: (f64, f64, f64),
        tool_direction: (f64, f64, f64),
    ) -> Self {
        Self {
            trigger_direction,
            tip_position,
            vessel_axis,
            tool_direction,
        }
    }

    fn __repr__(&self) -> String {
        format!(
            "ToolState(tip=({:.2}, {:.2}, {:.2}))",
            self.tip_position.0, self.tip_position.1, self.tip_position.2
        )
    }
}

// Conversion from Python type to Rust type
impl From<&PyToolState> for ToolState {
    fn from(state: &PyToolState) -> Self {
        let (tx, ty, tz) = state.trigger_direction;
        let (px, py, pz) = state.tip_position;
        let (ax, ay, az) = state.vessel_axis;
        let (dx, dy, dz) = state.tool_direction;
        ToolState {
            trigger_direction: Vector3::new(tx, ty, tz),
            tip_position: Point3::new(px, py, pz),
            vessel_axis: Vector3::new(ax, ay, az),
            tool_direction: Vector3::new(dx, dy, dz),
        }
    }
}

#[pyclass]
#[derive(Debug, Clone)]
pub struct PyCutEvent {
    #[pyo3(get)]
    pub branch: usize,
    #[pyo3(get)]
    pub branch_distance: f64,
    #[pyo3(get)]
    pub axis_distance: f64,
}

#[pymethods]
impl PyCutEvent {
    fn __repr__(&self) -> String {
        format!(
            "CutEvent(branch={}, branch_distance={:.2}, axis_distance={:.2})",
            self.branch, self.branch_distance, self.axis_distance
        )
    }
}

impl From<CutEvent> for PyCutEvent {
    fn from(event: CutEvent) -> Self {
        Self {
            branch: event.branch,
            branch_distance: event.branch_distance,
            axis_distance: event.axis_distance,
        }
    }
}

#[pyclass]
#[derive(Debug, Clone)]
pub struct PyTickOutcome {
    #[pyo3(get)]
    pub open_angle_deg: f64,
    #[pyo3(get)]
    pub sampled: bool,
    #[pyo3(get)]
    pub cut: Option<PyCutEvent>,
}

#[pymethods]
impl PyTickOutcome {
    fn __repr__(&self) -> String {
        format!(
            "TickOutcome(open_angle_deg={:.2}, sampled={}, cut={})",
            self.open_angle_deg,
            self.sampled,
            self.cut.is_some()
        )
    }
}

impl From<TickOutcome> for PyTickOutcome {
    fn from(outcome: TickOutcome) -> Self {
        Self {
            open_angle_deg: outcome.open_angle_deg,
            sampled: outcome.sampled,
            cut: outcome.cut.map(Into::into),
        }
    }
}

#[pyclass]
#[derive(Debug, Clone)]
pub struct PyMetricsReport {
    #[pyo3(get)]
    pub min_distance: f64,
    #[pyo3(get)]
    pub max_distance: f64,
    #[pyo3(get)]
    pub mean_distance: f64,
    #[pyo3(get)]
    pub std_dev_cut_distances: f64,
    #[pyo3(get)]
    pub min_angle: f64,
    #[pyo3(get)]
    pub max_angle: f64,
    #[pyo3(get)]
    pub trajectory_slope: f64,
    #[pyo3(get)]
    pub branches_cut: usize,
    #[pyo3(get)]
    pub cut_distances: Vec<f64>,
    #[pyo3(get)]
    pub path: Vec<(f64, f64, f64)>,
}

#[pymethods]
impl PyMetricsReport {
    fn __repr__(&self) -> String {
        format!(
            "MetricsReport(branches_cut={}, mean_distance={:.2}, trajectory_slope={:.2})",
            self.branches_cut, self.mean_distance, self.trajectory_slope
        )
    }

    fn to_json(&self) -> PyResult<String> {
        let report: MetricsReport = self.into();
        report
            .to_json()
            .map_err(|e| PyRuntimeError::new_err(e.to_string()))
    }
}

impl From<MetricsReport> for PyMetricsReport {
    fn from(report: MetricsReport) -> Self {
        Self {
            min_distance: report.min_distance,
            max_distance: report.max_distance,
            mean_distance: report.mean_distance,
            std_dev_cut_distances: report.std_dev_cut_distances,
            min_angle: report.min_angle,
            max_angle: report.max_angle,
            trajectory_slope: report.trajectory_slope,
            branches_cut: report.branches_cut,
            cut_distances: report.cut_distances,
            path: report.path,
        }
    }
}

impl From<&PyMetricsReport> for MetricsReport {
    fn from(report: &PyMetricsReport) -> Self {
        MetricsReport {
            min_distance: report.min_distance,
            max_distance: report.max_distance,
            mean_distance: report.mean_distance,
            std_dev_cut_distances: report.std_dev_cut_distances,
            min_angle: report.min_angle,
            max_angle: report.max_angle,
            trajectory_slope: report.trajectory_slope,
            branches_cut: report.branches_cut,
            cut_distances: report.cut_distances.clone(),
            path: report.path.clone(),
        }
    }
}

/// Session object held by the host for one trainee recording.
#[pyclass]
pub struct PyTutorSession {
    inner: TutorSession,
}

#[pymethods]
impl PyTutorSession {
    #[new]
    #[pyo3(signature = (model_dir, config_path = None))]
    fn new(model_dir: &str, config_path: Option<&str>) -> PyResult<Self> {
        let config = match config_path {
            Some(path) => TutorConfig::from_toml_file(path)
                .map_err(|e| PyRuntimeError::new_err(e.to_string()))?,
            None => TutorConfig::default(),
        };
        let model = load_vessel_model(model_dir, &config)
            .map_err(|e| PyRuntimeError::new_err(e.to_string()))?;
        Ok(Self {
            inner: TutorSession::new(model, config),
        })
    }

    fn start_session(&mut self, now: f64) {
        self.inner.start_session(now);
    }

    fn stop_session(&mut self, now: f64) -> PyMetricsReport {
        self.inner.stop_session(now).into()
    }

    fn reset_session(&mut self) {
        self.inner.reset_session();
    }

    fn on_transform_update(&mut self, state: PyToolState, now: f64) -> PyTickOutcome {
        let tool_state = ToolState::from(&state);
        self.inner.on_transform_update(&tool_state, now).into()
    }

    fn get_report(&self) -> PyMetricsReport {
        self.inner.report().into()
    }

    fn is_running(&self) -> bool {
        self.inner.is_running()
    }

    fn branch_visibility(&self) -> Vec<bool> {
        self.inner.model().visibility()
    }

    fn visible_points(&self) -> Vec<(f64, f64, f64)> {
        self.inner
            .model()
            .visible_points()
            .iter()
            .map(|p| (p.x, p.y, p.z))
            .collect()
    }

    fn elapsed_time(&self, now: f64) -> Option<String> {
        self.inner.elapsed_seconds(now).map(format_elapsed)
    }

    fn __repr__(&self) -> String {
        format!(
            "TutorSession(running={}, branches_cut={})",
            self.inner.is_running(),
            self.inner.model().branches_cut()
        )
    }
}
