use anyhow::{bail, Result};
use nalgebra::Point3;

use crate::geometry::distance;
use crate::session::metrics::{mean, population_std_dev};

/// Spacing statistics of a calibration grid sampled with the cutter tip.
#[derive(Debug, Clone, PartialEq)]
pub struct GridSpacingStats {
    pub mean: f64,
    pub std_dev: f64,
    pub error_mean: f64,
    pub error_std_dev: f64,
    pub spacing_count: usize,
}

/// Orders `points` as a serpentine-scanned grid of `cols` columns (every
/// other row recorded right-to-left, so odd rows are reversed), then
/// measures the distance between horizontal and vertical neighbors.
/// Incomplete trailing rows are dropped.
pub fn grid_spacing_stats(points: &[Point3<f64>], cols: usize) -> Result<GridSpacingStats> {
    if cols < 2 {
        bail!("grid needs at least two columns, got {}", cols);
    }
    if points.len() < cols {
        bail!(
            "grid needs at least one complete row of {} points, got {}",
            cols,
            points.len()
        );
    }

    let mut grid: Vec<Vec<Point3<f64>>> = Vec::new();
    for chunk in points.chunks_exact(cols) {
        let mut row: Vec<Point3<f64>> = chunk.to_vec();
        if grid.len() % 2 == 1 {
            row.reverse();
        }
        grid.push(row);
    }

    let mut distances = Vec::new();
    for row in &grid {
        for j in 1..cols {
            distances.push(distance(&row[j - 1], &row[j]));
        }
    }
    for i in 1..grid.len() {
        for j in 0..cols {
            distances.push(distance(&grid[i - 1][j], &grid[i][j]));
        }
    }

    let spacing_mean = mean(&distances);
    let errors: Vec<f64> = distances.iter().map(|d| (d - spacing_mean).abs()).collect();
    Ok(GridSpacingStats {
        mean: spacing_mean,
        std_dev: population_std_dev(&distances),
        error_mean: mean(&errors),
        error_std_dev: population_std_dev(&errors),
        spacing_count: distances.len(),
    })
}

#[cfg(test)]
mod analysis_tests {
    use super::*;
    use approx::assert_relative_eq;

    /// Points of a regular grid in serpentine scan order.
    fn serpentine_grid(rows: usize, cols: usize, spacing: f64) -> Vec<Point3<f64>> {
        let mut points = Vec::new();
        for r in 0..rows {
            let column_order: Vec<usize> = if r % 2 == 0 {
                (0..cols).collect()
            } else {
                (0..cols).rev().collect()
            };
            for c in column_order {
                points.push(Point3::new(c as f64 * spacing, r as f64 * spacing, 0.0));
            }
        }
        points
    }

    #[test]
    fn test_uniform_grid_has_zero_spread() {
        let points = serpentine_grid(3, 3, 10.0);
        let stats = grid_spacing_stats(&points, 3).expect("grid parses");
        assert_relative_eq!(stats.mean, 10.0, epsilon = 1e-12);
        assert_relative_eq!(stats.std_dev, 0.0, epsilon = 1e-12);
        assert_relative_eq!(stats.error_mean, 0.0, epsilon = 1e-12);
        // 2 horizontal spacings per row, 3 vertical spacings per row gap
        assert_eq!(stats.spacing_count, 3 * 2 + 2 * 3);
    }

    #[test]
    fn test_serpentine_rows_are_unreversed_before_pairing() {
        // without un-reversing odd rows, vertical neighbors of a 2x2 grid
        // would pair opposite corners and inflate the vertical spacing
        let points = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(3.0, 0.0, 0.0),
            Point3::new(3.0, 4.0, 0.0),
            Point3::new(0.0, 4.0, 0.0),
        ];
        let stats = grid_spacing_stats(&points, 2).expect("grid parses");
        // spacings: 3 (row 0), 3 (row 1), 4 and 4 (columns)
        assert_relative_eq!(stats.mean, 3.5, epsilon = 1e-12);
        assert_relative_eq!(stats.std_dev, 0.5, epsilon = 1e-12);
        assert_eq!(stats.spacing_count, 4);
    }

    #[test]
    fn test_incomplete_trailing_row_is_dropped() {
        let mut points = serpentine_grid(2, 3, 10.0);
        points.push(Point3::new(999.0, 999.0, 0.0));
        let stats = grid_spacing_stats(&points, 3).expect("grid parses");
        assert_eq!(stats.spacing_count, 2 * 2 + 3);
        assert_relative_eq!(stats.mean, 10.0, epsilon = 1e-12);
    }

    #[test]
    fn test_degenerate_grids_are_rejected() {
        let points = serpentine_grid(1, 3, 10.0);
        assert!(grid_spacing_stats(&points, 1).is_err());
        assert!(grid_spacing_stats(&points[..2], 3).is_err());
    }
}
