use anyhow::Result;
use csv::Writer;
use std::fs::File;
use std::path::Path;

use crate::session::metrics::MetricsReport;

/// Writes the finalized report as Metric,Value rows. Optional experience
/// level and procedure time get their own rows, like the save dialog of
/// the training host.
pub fn write_metrics_to_csv<P: AsRef<Path>>(
    path: P,
    report: &MetricsReport,
    experience: Option<&str>,
    procedure_time: Option<&str>,
) -> Result<()> {
    let mut wtr = Writer::from_path(path)?;

    wtr.write_record(&["Metric", "Value"])?;
    if let Some(level) = experience {
        wtr.write_record(&["Experience", level])?;
    }
    if let Some(time) = procedure_time {
        wtr.write_record(&["ProcedureTime", time])?;
    }
    let distances = report
        .cut_distances
        .iter()
        .map(|d| d.to_string())
        .collect::<Vec<_>>()
        .join(" ");
    let rows: Vec<(&str, String)> = vec![
        ("minDistance", report.min_distance.to_string()),
        ("maxDistance", report.max_distance.to_string()),
        ("meanDistance", report.mean_distance.to_string()),
        ("stdDevCutDistances", report.std_dev_cut_distances.to_string()),
        ("minAngle", report.min_angle.to_string()),
        ("maxAngle", report.max_angle.to_string()),
        ("trajectorySlope", report.trajectory_slope.to_string()),
        ("branchesCut", report.branches_cut.to_string()),
        ("cutDistances", distances),
    ];
    for (metric, value) in rows {
        wtr.write_record(&[metric, value.as_str()])?;
    }

    wtr.flush()?;
    Ok(())
}

/// Writes the sampled tool path as x,y,z rows for offline trajectory
/// reconstruction.
pub fn write_path_to_csv<P: AsRef<Path>>(path: P, report: &MetricsReport) -> Result<()> {
    let mut wtr = Writer::from_path(path)?;

    wtr.write_record(&["x", "y", "z"])?;
    for (x, y, z) in &report.path {
        wtr.write_record(&[x.to_string(), y.to_string(), z.to_string()])?;
    }

    wtr.flush()?;
    Ok(())
}

/// JSON form of the report, for hosts that prefer it over CSV.
pub fn write_report_json<P: AsRef<Path>>(path: P, report: &MetricsReport) -> Result<()> {
    let file = File::create(path)?;
    serde_json::to_writer_pretty(file, report)?;
    Ok(())
}
