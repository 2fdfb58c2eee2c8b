mod entry;

mod analysis;
mod config;
mod geometry;
mod io;
mod python_bind;
mod session;
mod utils;
mod vessel;

use pyo3::exceptions::PyRuntimeError;
use pyo3::prelude::*;
use pyo3::wrap_pyfunction;

use analysis::grid_spacing_stats;
use config::TutorConfig;
use entry::run_replay;
use nalgebra::Point3;
use python_bind::{PyCutEvent, PyMetricsReport, PyTickOutcome, PyToolState, PyTutorSession};

/// Python wrapper around the offline replay pipeline.
///
/// Uses a Python‐friendly signature to allow defaults.
#[pyfunction]
#[pyo3(
    signature = (
        model_dir,
        recording_path,
        // these two get defaults if not passed
        config_path = None,
        output_dir = None
    )
)]
fn run_replay_py(
    model_dir: &str,
    recording_path: &str,
    config_path: Option<&str>,
    output_dir: Option<&str>,
) -> PyResult<PyMetricsReport> {
    let config = match config_path {
        Some(path) => TutorConfig::from_toml_file(path)
            .map_err(|e| PyRuntimeError::new_err(e.to_string()))?,
        None => TutorConfig::default(),
    };
    let report = run_replay(model_dir, recording_path, config, output_dir)
        .map_err(|e| PyRuntimeError::new_err(e.to_string()))?;
    Ok(report.into())
}

/// Spacing statistics for a serpentine-scanned calibration grid, as
/// (mean, std_dev, error_mean, error_std_dev).
#[pyfunction]
fn grid_spacing_stats_py(
    points: Vec<(f64, f64, f64)>,
    cols: usize,
) -> PyResult<(f64, f64, f64, f64)> {
    let points: Vec<Point3<f64>> = points
        .iter()
        .map(|(x, y, z)| Point3::new(*x, *y, *z))
        .collect();
    let stats =
        grid_spacing_stats(&points, cols).map_err(|e| PyRuntimeError::new_err(e.to_string()))?;
    Ok((stats.mean, stats.std_dev, stats.error_mean, stats.error_std_dev))
}

/// This is the module importable from Python:
///
/// ```python
/// import vesseltutor as vt
/// session = vt.PyTutorSession("CadModels/vessel")
/// session.start_session(time.time())
/// ```
#[pymodule]
fn vesseltutor(_py: Python, m: pyo3::prelude::Bound<'_, PyModule>) -> PyResult<()> {
    m.add("__version__", env!("CARGO_PKG_VERSION"))?;
    m.add_function(wrap_pyfunction!(run_replay_py, m.clone())?)?;
    m.add_function(wrap_pyfunction!(grid_spacing_stats_py, m.clone())?)?;

    m.add_class::<PyToolState>()?;
    m.add_class::<PyCutEvent>()?;
    m.add_class::<PyTickOutcome>()?;
    m.add_class::<PyMetricsReport>()?;
    m.add_class::<PyTutorSession>()?;
    Ok(())
}
