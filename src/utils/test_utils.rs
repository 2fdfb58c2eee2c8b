use nalgebra::{Point3, Vector3};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::TutorConfig;
use crate::session::ToolState;
use crate::vessel::{Branch, VesselModel};

/// Builds a small vessel skeleton for testing: a straight axis along x
/// and two branches with origins above it.
#[allow(dead_code)]
pub fn test_vessel_model() -> VesselModel {
    let axis: Vec<Point3<f64>> = (0..11)
        .map(|i| Point3::new(i as f64 * 10.0, 0.0, 0.0))
        .collect();
    let branches = vec![
        Branch::new(
            Point3::new(20.0, 30.0, 0.0),
            vec![Point3::new(20.0, 30.0, 0.0), Point3::new(20.0, 60.0, 0.0)],
        ),
        Branch::new(
            Point3::new(70.0, 40.0, 0.0),
            vec![Point3::new(70.0, 40.0, 0.0), Point3::new(70.0, 80.0, 0.0)],
        ),
    ];
    VesselModel::new(axis, branches).expect("test model is valid")
}

/// Config matching `test_vessel_model` (two branches, three models).
#[allow(dead_code)]
pub fn test_config() -> TutorConfig {
    TutorConfig {
        num_models: 3,
        ..TutorConfig::default()
    }
}

/// Trigger direction making the given angle with the cutter shaft axis.
#[allow(dead_code)]
pub fn trigger_at_angle(angle_deg: f64) -> Vector3<f64> {
    let rad = angle_deg.to_radians();
    Vector3::new(rad.sin(), rad.cos(), 0.0)
}

/// Tool state with a fully released trigger at the given tip position.
#[allow(dead_code)]
pub fn open_tool_state(tip: Point3<f64>) -> ToolState {
    ToolState {
        trigger_direction: trigger_at_angle(102.0),
        tip_position: tip,
        vessel_axis: Vector3::new(0.0, 0.0, 1.0),
        tool_direction: Vector3::new(0.0, 0.0, 1.0),
    }
}

/// Tool state with a fully squeezed trigger (closed jaw).
#[allow(dead_code)]
pub fn closed_tool_state(tip: Point3<f64>) -> ToolState {
    ToolState {
        trigger_direction: trigger_at_angle(90.0),
        tip_position: tip,
        vessel_axis: Vector3::new(0.0, 0.0, 1.0),
        tool_direction: Vector3::new(0.0, 0.0, 1.0),
    }
}

/// Deterministic noisy samples around the line y = slope * x + intercept.
#[allow(dead_code)]
pub fn noisy_line(slope: f64, intercept: f64, n: usize, seed: u64) -> Vec<(f64, f64)> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..n)
        .map(|i| {
            let x = i as f64;
            let y = slope * x + intercept + rng.random_range(-0.5..0.5);
            (x, y)
        })
        .collect()
}
