use nalgebra::Point3;
use thiserror::Error;

use crate::geometry::{closest_point_distance, distance};

#[derive(Debug, Error, PartialEq)]
pub enum ModelError {
    #[error("vessel axis must contain at least one point")]
    EmptyAxis,
    #[error("branch {requested} does not exist, model has {count} cuttable branches")]
    UnknownBranch { requested: usize, count: usize },
}

/// One removable vessel segment: its origin marker, its constituent point
/// cloud and whether it is still part of the rendered skeleton.
#[derive(Debug, Clone)]
pub struct Branch {
    pub origin: Point3<f64>,
    pub points: Vec<Point3<f64>>,
    visible: bool,
}

impl Branch {
    pub fn new(origin: Point3<f64>, points: Vec<Point3<f64>>) -> Self {
        Branch {
            origin,
            points,
            visible: true,
        }
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }
}

/// The vessel skeleton: a protected main axis (branch 0) plus the cuttable
/// branches, numbered 1..=branch_count().
#[derive(Debug, Clone)]
pub struct VesselModel {
    axis_points: Vec<Point3<f64>>,
    branches: Vec<Branch>,
    visible_points: Vec<Point3<f64>>,
}

impl VesselModel {
    pub fn new(axis_points: Vec<Point3<f64>>, branches: Vec<Branch>) -> Result<Self, ModelError> {
        if axis_points.is_empty() {
            return Err(ModelError::EmptyAxis);
        }
        let mut model = VesselModel {
            axis_points,
            branches,
            visible_points: Vec::new(),
        };
        model.rebuild_visible_geometry();
        Ok(model)
    }

    /// Number of cuttable branches; the main vessel is not one of them.
    pub fn branch_count(&self) -> usize {
        self.branches.len()
    }

    /// Nearest branch origin to `p` as (distance, 1-based branch number).
    ///
    /// Strict `<` keeps the lowest-numbered branch on ties. Returns
    /// (infinity, 0) when the model has no branches.
    pub fn closest_branch(&self, p: &Point3<f64>) -> (f64, usize) {
        let mut branch_num = 0;
        let mut min_distance = f64::INFINITY;
        for (i, branch) in self.branches.iter().enumerate() {
            let d = distance(p, &branch.origin);
            if d < min_distance {
                min_distance = d;
                branch_num = i + 1;
            }
        }
        (min_distance, branch_num)
    }

    /// Brute-force distance from `p` to the main vessel's point cloud.
    pub fn axis_distance(&self, p: &Point3<f64>) -> f64 {
        closest_point_distance(p, &self.axis_points)
    }

    pub fn is_branch_visible(&self, branch: usize) -> Result<bool, ModelError> {
        self.branch_index(branch).map(|i| self.branches[i].visible)
    }

    pub fn set_branch_visible(&mut self, branch: usize, visible: bool) -> Result<(), ModelError> {
        let i = self.branch_index(branch)?;
        self.branches[i].visible = visible;
        Ok(())
    }

    fn branch_index(&self, branch: usize) -> Result<usize, ModelError> {
        if branch == 0 || branch > self.branches.len() {
            return Err(ModelError::UnknownBranch {
                requested: branch,
                count: self.branches.len(),
            });
        }
        Ok(branch - 1)
    }

    /// Visibility flags of branches 1..=branch_count(), in order.
    pub fn visibility(&self) -> Vec<bool> {
        self.branches.iter().map(|b| b.visible).collect()
    }

    pub fn branches_cut(&self) -> usize {
        self.branches.iter().filter(|b| !b.visible).count()
    }

    /// Re-aggregates the renderable skeleton from the axis and every
    /// still-visible branch.
    pub fn rebuild_visible_geometry(&mut self) {
        let mut points = self.axis_points.clone();
        for branch in self.branches.iter().filter(|b| b.visible) {
            points.extend_from_slice(&branch.points);
        }
        self.visible_points = points;
    }

    pub fn visible_points(&self) -> &[Point3<f64>] {
        &self.visible_points
    }

    pub fn axis_points(&self) -> &[Point3<f64>] {
        &self.axis_points
    }

    /// Restores every branch and the aggregate skeleton.
    pub fn reset_visibility(&mut self) {
        for branch in self.branches.iter_mut() {
            branch.visible = true;
        }
        self.rebuild_visible_geometry();
    }
}
