use anyhow::{anyhow, Context, Result};
use csv::ReaderBuilder;
use nalgebra::{Point3, Vector3};
use serde::Deserialize;
use std::fs::File;
use std::path::Path;

use crate::session::ToolState;

/// Reads an x,y,z point cloud from a headerless CSV file. Malformed rows
/// are skipped with a warning.
pub fn read_point_cloud<P: AsRef<Path> + std::fmt::Debug>(path: P) -> Result<Vec<Point3<f64>>> {
    let file =
        File::open(&path).with_context(|| format!("failed to open point cloud {:?}", path))?;
    let mut rdr = ReaderBuilder::new().has_headers(false).from_reader(file);

    let mut points = Vec::new();
    for result in rdr.records() {
        match result {
            Ok(record) => match record.deserialize::<(f64, f64, f64)>(None) {
                Ok((x, y, z)) => points.push(Point3::new(x, y, z)),
                Err(e) => eprintln!("Skipping invalid point record: {:?}", e),
            },
            Err(e) => eprintln!("Skipping invalid row: {:?}", e),
        }
    }
    Ok(points)
}

/// Reads fiducial positions from a Slicer-style .fcsv file: `#` comment
/// lines first, then rows of `id,x,y,z,...`.
pub fn read_fiducial_points<P: AsRef<Path> + std::fmt::Debug>(path: P) -> Result<Vec<Point3<f64>>> {
    let file =
        File::open(&path).with_context(|| format!("failed to open fiducial file {:?}", path))?;
    let mut rdr = ReaderBuilder::new()
        .has_headers(false)
        .comment(Some(b'#'))
        .flexible(true)
        .from_reader(file);

    let mut points = Vec::new();
    for result in rdr.records() {
        let record =
            result.with_context(|| format!("failed to read fiducial row in {:?}", path))?;
        if record.len() < 4 {
            eprintln!("Skipping short fiducial row: {:?}", record);
            continue;
        }
        let coords: Result<Vec<f64>, _> = (1..4).map(|i| record[i].trim().parse::<f64>()).collect();
        match coords {
            Ok(c) => points.push(Point3::new(c[0], c[1], c[2])),
            Err(e) => eprintln!("Skipping unparsable fiducial row: {:?}", e),
        }
    }
    Ok(points)
}

/// First fiducial of a file, used for branch-origin markers.
pub fn read_first_fiducial<P: AsRef<Path> + std::fmt::Debug>(path: P) -> Result<Point3<f64>> {
    let points = read_fiducial_points(&path)?;
    points
        .into_iter()
        .next()
        .ok_or_else(|| anyhow!("fiducial file {:?} was empty — this data is required", path))
}

/// One row of a recorded procedure: a timestamp plus the tool state the
/// host read at that tick.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct RecordedTick {
    pub t: f64,
    pub trigger_x: f64,
    pub trigger_y: f64,
    pub trigger_z: f64,
    pub tip_x: f64,
    pub tip_y: f64,
    pub tip_z: f64,
    pub axis_x: f64,
    pub axis_y: f64,
    pub axis_z: f64,
    pub tool_x: f64,
    pub tool_y: f64,
    pub tool_z: f64,
}

impl RecordedTick {
    pub fn tool_state(&self) -> ToolState {
        ToolState {
            trigger_direction: Vector3::new(self.trigger_x, self.trigger_y, self.trigger_z),
            tip_position: Point3::new(self.tip_x, self.tip_y, self.tip_z),
            vessel_axis: Vector3::new(self.axis_x, self.axis_y, self.axis_z),
            tool_direction: Vector3::new(self.tool_x, self.tool_y, self.tool_z),
        }
    }
}

/// Reads a recording CSV (headered) of tool states ordered by timestamp.
pub fn read_recording<P: AsRef<Path> + std::fmt::Debug>(path: P) -> Result<Vec<RecordedTick>> {
    let file =
        File::open(&path).with_context(|| format!("failed to open recording {:?}", path))?;
    let mut rdr = ReaderBuilder::new().has_headers(true).from_reader(file);

    let mut ticks = Vec::new();
    for result in rdr.deserialize() {
        let tick: RecordedTick =
            result.with_context(|| format!("failed to parse recording row in {:?}", path))?;
        ticks.push(tick);
    }
    Ok(ticks)
}
