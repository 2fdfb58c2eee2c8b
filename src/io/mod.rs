pub mod input;
pub mod output;

use anyhow::{bail, Context, Result};
use rayon::prelude::*;
use std::path::Path;

use crate::config::TutorConfig;
use crate::io::input::{read_first_fiducial, read_point_cloud};
use crate::vessel::{Branch, VesselModel};

/// Loads the vessel skeleton from a model directory.
///
/// `Model_0.csv` is the protected main axis; each branch `i` in
/// `1..num_models` contributes `Model_i.csv` (its point cloud) and
/// `Points_i.fcsv` (its origin marker). Branch files load in parallel.
pub fn load_vessel_model(input_dir: &str, config: &TutorConfig) -> Result<VesselModel> {
    let base = Path::new(input_dir);

    let axis_path = base.join("Model_0.csv");
    let axis_points = read_point_cloud(&axis_path)
        .with_context(|| format!("failed to load vessel axis from {}", axis_path.display()))?;
    if axis_points.is_empty() {
        bail!(
            "axis file {} was empty — this data is required",
            axis_path.display()
        );
    }

    let branches = (1..config.num_models)
        .into_par_iter()
        .map(|i| -> Result<Branch> {
            let origin_path = base.join(format!("Points_{}.fcsv", i));
            let cloud_path = base.join(format!("Model_{}.csv", i));
            let origin = read_first_fiducial(&origin_path)
                .with_context(|| format!("failed to load branch {} origin", i))?;
            let points = read_point_cloud(&cloud_path)
                .with_context(|| format!("failed to load branch {} point cloud", i))?;
            Ok(Branch::new(origin, points))
        })
        .collect::<Result<Vec<_>>>()?;
    println!("Loaded vessel skeleton with {} branches", branches.len());

    Ok(VesselModel::new(axis_points, branches)?)
}
