//! Unit-sphere sampling with the Golden Section Spiral.

use super::error::AsaError;
use nalgebra as na;
use std::f64::consts::PI;

/// A fixed set of points on the unit sphere, shared read-only by every atom
/// of one calculation.
#[derive(Clone, Debug, PartialEq)]
pub struct SpherePoints {
    points: Vec<na::Vector3<f64>>,
}

impl SpherePoints {
    /// Place `n` points on the unit sphere along a golden-angle spiral.
    ///
    /// Point `k` sits at height `y = (k + 0.5) * 2/n - 1` and is rotated by
    /// `k` golden angles around the y axis. The output only depends on `n`.
    pub fn golden_section_spiral(n: usize) -> Result<Self, AsaError> {
        if n == 0 {
            return Err(AsaError::InvalidSampleCount(n));
        }

        let inc = PI * (3.0 - 5.0_f64.sqrt());
        let offset = 2.0 / n as f64;

        let points = (0..n)
            .map(|k| {
                let y = (k as f64 + 0.5) * offset - 1.0;
                // Round-off can push 1 - y^2 slightly below zero
                let r = (1.0 - y * y).max(0.0).sqrt();
                let phi = k as f64 * inc;
                na::Vector3::new(phi.cos() * r, y, phi.sin() * r)
            })
            .collect();

        Ok(Self { points })
    }

    /// Number of points.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether there are no points.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Iterate over the unit vectors.
    pub fn iter(&self) -> std::slice::Iter<'_, na::Vector3<f64>> {
        self.points.iter()
    }

    /// The unit vectors in generation order.
    pub fn as_slice(&self) -> &[na::Vector3<f64>] {
        &self.points
    }
}

/// Shorthand for [`SpherePoints::golden_section_spiral`].
pub fn generate_sphere_points(n: usize) -> Result<SpherePoints, AsaError> {
    SpherePoints::golden_section_spiral(n)
}
