use nalgebra::{Point3, Vector3};
use rayon::prelude::*;

/// Euclidean distance between two 3D points.
pub fn distance(p1: &Point3<f64>, p2: &Point3<f64>) -> f64 {
    nalgebra::distance(p1, p2)
}

/// Angle between two vectors in degrees, in [0, 180].
///
/// Computed as atan2(|v1 x v2|, v1 . v2), which stays stable near 0 and
/// 180 degrees. A zero-magnitude input yields 0 degrees.
pub fn angle_between_degrees(v1: &Vector3<f64>, v2: &Vector3<f64>) -> f64 {
    if v1.norm() == 0.0 || v2.norm() == 0.0 {
        return 0.0;
    }
    let cross = v1.cross(v2).norm();
    let dot = v1.dot(v2);
    cross.atan2(dot).to_degrees()
}

/// Distance from `p` to the nearest point of `cloud`; infinity when the
/// cloud is empty.
pub fn closest_point_distance(p: &Point3<f64>, cloud: &[Point3<f64>]) -> f64 {
    cloud
        .par_iter()
        .map(|q| distance(p, q))
        .reduce(|| f64::INFINITY, f64::min)
}

/// Rounds to the given number of decimal places.
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

#[cfg(test)]
mod geometry_tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_distance() {
        let p1 = Point3::new(0.0, 0.0, 0.0);
        let p2 = Point3::new(3.0, 4.0, 0.0);
        assert_relative_eq!(distance(&p1, &p2), 5.0, epsilon = 1e-12);
        assert_relative_eq!(distance(&p1, &p1), 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_angle_between_orthogonal_vectors() {
        let v1 = Vector3::new(1.0, 0.0, 0.0);
        let v2 = Vector3::new(0.0, 1.0, 0.0);
        assert_relative_eq!(angle_between_degrees(&v1, &v2), 90.0, epsilon = 1e-9);
    }

    #[test]
    fn test_angle_between_parallel_and_opposite_vectors() {
        let v1 = Vector3::new(2.0, 0.0, 0.0);
        let v2 = Vector3::new(5.0, 0.0, 0.0);
        assert_relative_eq!(angle_between_degrees(&v1, &v2), 0.0, epsilon = 1e-9);
        let v3 = Vector3::new(-1.0, 0.0, 0.0);
        assert_relative_eq!(angle_between_degrees(&v1, &v3), 180.0, epsilon = 1e-9);
    }

    #[test]
    fn test_angle_is_stable_for_tiny_separations() {
        let v1 = Vector3::new(1.0, 0.0, 0.0);
        let v2 = Vector3::new(1.0, 1e-9, 0.0);
        let angle = angle_between_degrees(&v1, &v2);
        assert!(angle >= 0.0 && angle < 1e-6);
    }

    #[test]
    fn test_angle_with_zero_vector_is_zero() {
        let v1 = Vector3::new(0.0, 0.0, 0.0);
        let v2 = Vector3::new(1.0, 2.0, 3.0);
        assert_eq!(angle_between_degrees(&v1, &v2), 0.0);
        assert_eq!(angle_between_degrees(&v2, &v1), 0.0);
    }

    #[test]
    fn test_closest_point_distance() {
        let cloud = vec![
            Point3::new(10.0, 0.0, 0.0),
            Point3::new(0.0, 2.0, 0.0),
            Point3::new(-5.0, -5.0, 0.0),
        ];
        let p = Point3::new(0.0, 0.0, 0.0);
        assert_relative_eq!(closest_point_distance(&p, &cloud), 2.0, epsilon = 1e-12);
    }

    #[test]
    fn test_closest_point_distance_empty_cloud() {
        let p = Point3::new(0.0, 0.0, 0.0);
        assert_eq!(closest_point_distance(&p, &[]), f64::INFINITY);
    }

    #[test]
    fn test_round_to() {
        assert_eq!(round_to(8.16496580927726, 2), 8.16);
        assert_eq!(round_to(91.2499, 1), 91.2);
        assert_eq!(round_to(-0.154, 2), -0.15);
        assert_eq!(round_to(2.5, 0), 3.0);
    }
}
