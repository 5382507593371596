use glam::Vec3;

use crate::error::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CubicBezier {
    pub control_points: [Vec3; 4],
}

impl CubicBezier {
    pub fn new(control_points: [Vec3; 4]) -> Self {
        Self { control_points }
    }

    /// Bernstein-basis evaluation at `t` in `0.0..=1.0`.
    pub fn point_at(&self, t: f32) -> Vec3 {
        let [p0, p1, p2, p3] = self.control_points;
        let s = 1.0 - t;
        let b0 = s * s * s;
        let b1 = 3.0 * s * s * t;
        let b2 = 3.0 * s * t * t;
        let b3 = t * t * t;
        p0 * b0 + p1 * b1 + p2 * b2 + p3 * b3
    }

    pub fn tangent_at(&self, t: f32) -> Vec3 {
        let [p0, p1, p2, p3] = self.control_points;
        let s = 1.0 - t;
        (p1 - p0) * (3.0 * s * s) + (p2 - p1) * (6.0 * s * t) + (p3 - p2) * (3.0 * t * t)
    }

    pub fn sample(&self, sample_count: usize) -> Result<Vec<Vec3>> {
        if sample_count == 0 {
            return Err(Error::geometry(
                "bezier",
                "sample count must be at least 1",
            ));
        }
        if self.control_points.iter().any(|point| !point.is_finite()) {
            return Err(Error::geometry("bezier", "control points must be finite"));
        }

        let samples = (0..=sample_count)
            .map(|i| self.point_at(i as f32 / sample_count as f32))
            .collect();
        Ok(samples)
    }
}

/// `sample_count + 1` points from `P0` to `P3` inclusive.
pub fn evaluate_bezier(control_points: [Vec3; 4], sample_count: usize) -> Result<Vec<Vec3>> {
    CubicBezier::new(control_points).sample(sample_count)
}

/// Samples consecutive curves that share their end/start points, emitting
/// each shared joint once.
pub fn sample_path(segments: &[CubicBezier], samples_per_segment: usize) -> Result<Vec<Vec3>> {
    let mut points: Vec<Vec3> = Vec::with_capacity(segments.len() * samples_per_segment + 1);
    for segment in segments {
        let samples = segment.sample(samples_per_segment)?;
        let skip = match points.last() {
            Some(last) if *last == samples[0] => 1,
            _ => 0,
        };
        points.extend(samples.into_iter().skip(skip));
    }
    Ok(points)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn s_curve() -> [Vec3; 4] {
        [
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(2.0, 2.0, 0.0),
            Vec3::new(-2.0, 1.0, 0.0),
            Vec3::new(0.0, 3.0, 0.0),
        ]
    }

    #[test]
    fn endpoints_are_exact() {
        for n in [1, 2, 7, 20, 100] {
            let points = evaluate_bezier(s_curve(), n).unwrap();
            assert_eq!(points.len(), n + 1);
            assert_eq!(points[0], s_curve()[0]);
            assert_eq!(points[n], s_curve()[3]);
        }
    }

    #[test]
    fn midpoint_matches_bernstein_weights() {
        let curve = CubicBezier::new(s_curve());
        // (P0 + 3 P1 + 3 P2 + P3) / 8
        let expected = (s_curve()[0] + 3.0 * s_curve()[1] + 3.0 * s_curve()[2] + s_curve()[3]) / 8.0;
        assert!(curve.point_at(0.5).abs_diff_eq(expected, 1e-6));
    }

    #[test]
    fn sampling_is_deterministic() {
        assert_eq!(
            evaluate_bezier(s_curve(), 20).unwrap(),
            evaluate_bezier(s_curve(), 20).unwrap()
        );
    }

    #[test]
    fn zero_samples_are_rejected() {
        assert!(matches!(
            evaluate_bezier(s_curve(), 0),
            Err(Error::InvalidGeometryParameters { .. })
        ));
    }

    #[test]
    fn tangent_at_start_points_at_second_control_point() {
        let curve = CubicBezier::new(s_curve());
        assert!(curve
            .tangent_at(0.0)
            .abs_diff_eq(3.0 * (s_curve()[1] - s_curve()[0]), 1e-6));
    }

    #[test]
    fn path_shares_joints() {
        let upper = CubicBezier::new([
            Vec3::new(0.25, 5.0, 0.0),
            Vec3::new(0.25, 4.0, 0.0),
            Vec3::new(0.75, 3.0, 0.0),
            Vec3::new(0.75, 2.5, 0.0),
        ]);
        let lower = CubicBezier::new([
            Vec3::new(0.75, 2.5, 0.0),
            Vec3::new(0.75, 2.0, 0.0),
            Vec3::new(0.625, 1.75, 0.0),
            Vec3::new(0.625, 1.25, 0.0),
        ]);

        let points = sample_path(&[upper, lower], 10).unwrap();
        assert_eq!(points.len(), 21);
        assert_eq!(points[10], Vec3::new(0.75, 2.5, 0.0));
        assert_eq!(points[20], Vec3::new(0.625, 1.25, 0.0));
    }
}
