//! Atom and coordinate types consumed by the ASA calculation.

use nalgebra as na;

/// Cartesian coordinates of an atom center.
pub type Point3D = na::Point3<f64>;

/// One boolean per atom, `true` if that atom may occlude the reference atom.
pub type NeighborMask = Vec<bool>;

/// A spherical atom: a center and a van der Waals radius.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Atom {
    /// Center of the sphere
    pub position: Point3D,
    /// Van der Waals radius, same length unit as `position`
    pub radius: f64,
}

impl Atom {
    /// Atom centered at `(x, y, z)`.
    pub fn new(x: f64, y: f64, z: f64, radius: f64) -> Self {
        Self {
            position: Point3D::new(x, y, z),
            radius,
        }
    }

    /// Radius of the solvent-expanded sphere.
    pub fn expanded_radius(&self, probe: f64) -> f64 {
        self.radius + probe
    }
}

/// Squared Euclidean distance, summed in x, y, z order.
#[inline]
pub fn distance_squared(a: &Point3D, b: &Point3D) -> f64 {
    let dx = a.x - b.x;
    let dy = a.y - b.y;
    let dz = a.z - b.z;
    dx * dx + dy * dy + dz * dz
}
