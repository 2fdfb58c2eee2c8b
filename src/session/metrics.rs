use nalgebra::{Point3, Vector3};
use serde::Serialize;

use crate::geometry::{angle_between_degrees, round_to};

/// Running accumulator for one recording. The distance aggregates and the
/// trajectory slope are derived on demand by `report`, never stored here.
#[derive(Debug, Clone)]
pub struct MetricsState {
    pub min_angle: f64,
    pub max_angle: f64,
    pub cut_distances: Vec<f64>,
    pub path: Vec<Point3<f64>>,
}

impl Default for MetricsState {
    fn default() -> Self {
        MetricsState {
            min_angle: 180.0,
            max_angle: 0.0,
            cut_distances: Vec::new(),
            path: Vec::new(),
        }
    }
}

impl MetricsState {
    pub fn reset(&mut self) {
        *self = MetricsState::default();
    }

    /// Updates the angle bounds from one sampled pair of directions.
    ///
    /// The two comparisons are exclusive: a tick adjusts at most one of
    /// the two bounds, and a new maximum is never also checked against the
    /// minimum.
    pub fn record_angle(&mut self, vessel_axis: &Vector3<f64>, tool_direction: &Vector3<f64>) {
        let angle = round_to(angle_between_degrees(vessel_axis, tool_direction), 1);
        if self.max_angle < angle {
            self.max_angle = angle;
        } else if self.min_angle > angle {
            self.min_angle = angle;
        }
    }

    pub fn record_sample(&mut self, tip: Point3<f64>) {
        self.path.push(tip);
    }

    pub fn record_cut(&mut self, axis_distance: f64) {
        self.cut_distances.push(axis_distance);
    }

    /// Finalized snapshot. Pure: repeated calls return the same report and
    /// leave the accumulator untouched.
    ///
    /// An empty cut-distance list is reported as a single 0 so the
    /// aggregates stay defined for a run without any cuts.
    pub fn report(&self, branches_cut: usize) -> MetricsReport {
        let fallback = [0.0];
        let distances: &[f64] = if self.cut_distances.is_empty() {
            &fallback
        } else {
            &self.cut_distances
        };
        let min_distance = distances.iter().cloned().fold(f64::INFINITY, f64::min);
        let max_distance = distances.iter().cloned().fold(f64::NEG_INFINITY, f64::max);

        let xy: Vec<(f64, f64)> = self.path.iter().map(|p| (p.x, p.y)).collect();
        let trajectory_slope = if xy.is_empty() {
            0.0
        } else {
            round_to(least_squares_slope(&xy), 2)
        };

        MetricsReport {
            min_distance: round_to(min_distance, 2),
            max_distance: round_to(max_distance, 2),
            mean_distance: round_to(mean(distances), 2),
            std_dev_cut_distances: round_to(population_std_dev(distances), 2),
            min_angle: self.min_angle,
            max_angle: self.max_angle,
            trajectory_slope,
            branches_cut,
            cut_distances: self.cut_distances.clone(),
            path: self.path.iter().map(|p| (p.x, p.y, p.z)).collect(),
        }
    }
}

/// Read-only snapshot of one finished (or in-flight) recording.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricsReport {
    pub min_distance: f64,
    pub max_distance: f64,
    pub mean_distance: f64,
    pub std_dev_cut_distances: f64,
    pub min_angle: f64,
    pub max_angle: f64,
    pub trajectory_slope: f64,
    pub branches_cut: usize,
    pub cut_distances: Vec<f64>,
    pub path: Vec<(f64, f64, f64)>,
}

impl MetricsReport {
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// Arithmetic mean; 0 for an empty slice.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Population standard deviation (divides by N, not N-1).
pub fn population_std_dev(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let m = mean(values);
    let variance = values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / values.len() as f64;
    variance.sqrt()
}

/// Ordinary least-squares slope of y over x, via covariance / variance.
/// 0 when the x values carry no variance (fewer than two distinct x).
pub fn least_squares_slope(points: &[(f64, f64)]) -> f64 {
    if points.is_empty() {
        return 0.0;
    }
    let n = points.len() as f64;
    let mean_x = points.iter().map(|(x, _)| x).sum::<f64>() / n;
    let mean_y = points.iter().map(|(_, y)| y).sum::<f64>() / n;
    let mut covariance = 0.0;
    let mut variance = 0.0;
    for (x, y) in points {
        covariance += (x - mean_x) * (y - mean_y);
        variance += (x - mean_x).powi(2);
    }
    if variance == 0.0 {
        return 0.0;
    }
    covariance / variance
}
