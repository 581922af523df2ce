//! Shrake-Rupley dot-density surface calculator.

use super::error::AsaError;
use super::neighbors::{build_neighbor_finder, NeighborFinder};
use super::settings::SasaSettings;
use super::sphere::SpherePoints;
use super::types::{distance_squared, Atom, Point3D};
use rayon::prelude::*;
use std::f64::consts::PI;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{debug, trace};

/// Computes per-atom accessible surface areas for a set of [`SasaSettings`].
pub struct SurfaceAreaCalculator {
    /// Settings applied to every calculation
    pub settings: SasaSettings,
}

/// Read-only inputs shared by every per-atom evaluation of one run.
struct Run<'a> {
    positions: Vec<Point3D>,
    radii: Vec<f64>,
    probe: f64,
    sphere_points: &'a SpherePoints,
}

impl SurfaceAreaCalculator {
    /// Calculator using `settings`.
    pub fn new(settings: SasaSettings) -> Self {
        Self { settings }
    }

    /// Accessible surface area of every atom, in input order.
    pub fn calculate(&self, atoms: &[Atom]) -> Result<Vec<f64>, AsaError> {
        self.calculate_cancellable(atoms, &AtomicBool::new(false))
    }

    /// Same as [`Self::calculate`], but stops with [`AsaError::Cancelled`]
    /// once `cancel` is set. The flag is checked before each atom.
    pub fn calculate_cancellable(
        &self,
        atoms: &[Atom],
        cancel: &AtomicBool,
    ) -> Result<Vec<f64>, AsaError> {
        self.validate(atoms)?;

        let sphere_points = SpherePoints::golden_section_spiral(self.settings.n_points)?;
        let run = Run {
            positions: atoms.iter().map(|a| a.position).collect(),
            radii: atoms.iter().map(|a| a.radius).collect(),
            probe: self.settings.probe_radius,
            sphere_points: &sphere_points,
        };
        let finder = build_neighbor_finder(
            self.settings.neighbor_search,
            &run.positions,
            &run.radii,
            run.probe,
        );
        debug!(
            "Calculating ASA of {} atoms with probe {} and {} sphere points ({} neighbor search)",
            atoms.len(),
            run.probe,
            sphere_points.len(),
            self.settings.neighbor_search
        );

        let area_of = |i: usize| {
            if cancel.load(Ordering::Relaxed) {
                return Err(AsaError::Cancelled);
            }
            Ok(run.atom_area(i, finder.as_ref()))
        };

        if self.settings.parallel {
            (0..atoms.len()).into_par_iter().map(area_of).collect()
        } else {
            (0..atoms.len()).map(area_of).collect()
        }
    }

    fn validate(&self, atoms: &[Atom]) -> Result<(), AsaError> {
        if atoms.is_empty() {
            return Err(AsaError::EmptyInput);
        }
        let probe = self.settings.probe_radius;
        if !probe.is_finite() || probe < 0.0 {
            return Err(AsaError::InvalidProbe(probe));
        }
        if self.settings.n_points == 0 {
            return Err(AsaError::InvalidSampleCount(self.settings.n_points));
        }
        for (index, atom) in atoms.iter().enumerate() {
            if !atom.radius.is_finite() || atom.radius < 0.0 {
                return Err(AsaError::InvalidRadius {
                    index,
                    radius: atom.radius,
                });
            }
            if !atom.position.coords.iter().all(|c| c.is_finite()) {
                return Err(AsaError::InvalidCoordinate { index });
            }
        }
        Ok(())
    }
}

impl Run<'_> {
    fn atom_area(&self, i: usize, finder: &dyn NeighborFinder) -> f64 {
        let n_points = self.sphere_points.len();
        let radius_probe = self.radii[i] + self.probe;
        let radius_probe_sq = radius_probe * radius_probe;
        let center = &self.positions[i];

        let neighbors: Vec<(Point3D, f64)> = finder
            .neighbors_of(i)
            .into_iter()
            .map(|n| {
                let r = self.radii[n] + self.probe;
                (self.positions[n], r * r)
            })
            .collect();

        let buried = self
            .sphere_points
            .iter()
            .filter(|point| {
                let test_point = Point3D::new(
                    point.x * radius_probe + center.x,
                    point.y * radius_probe + center.y,
                    point.z * radius_probe + center.z,
                );
                // A point on a neighbor's boundary stays accessible
                neighbors
                    .iter()
                    .any(|(pos, r_sq)| distance_squared(&test_point, pos) < *r_sq)
            })
            .count();

        let area = (n_points - buried) as f64 * (4.0 * PI / n_points as f64) * radius_probe_sq;
        trace!(
            "Atom {i}: {} neighbors, {buried}/{n_points} points buried, area {area:.3}",
            neighbors.len()
        );
        area
    }
}

/// Sum of per-atom areas.
pub fn total_area(areas: &[f64]) -> f64 {
    areas.iter().sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::asa::settings::NeighborSearch;

    fn sphere_area(radius: f64) -> f64 {
        4.0 * PI * radius * radius
    }

    fn calculator(probe: f64, n_points: usize) -> SurfaceAreaCalculator {
        SurfaceAreaCalculator::new(
            SasaSettings::default()
                .with_probe_radius(probe)
                .with_n_points(n_points),
        )
    }

    /// Five carbons along the x axis, 1.54 Å apart.
    fn carbon_chain() -> Vec<Atom> {
        (0..5)
            .map(|i| Atom::new(1.54 * i as f64, 0.0, 0.0, 1.7))
            .collect()
    }

    /// 3x3x3 lattice of carbons, 1.5 Å apart.
    fn carbon_lattice() -> Vec<Atom> {
        let mut atoms = Vec::new();
        for x in 0..3 {
            for y in 0..3 {
                for z in 0..3 {
                    atoms.push(Atom::new(
                        1.5 * x as f64,
                        1.5 * y as f64,
                        1.5 * z as f64,
                        1.7,
                    ));
                }
            }
        }
        atoms
    }

    #[test]
    fn test_single_atom() {
        let areas = calculator(1.4, 960)
            .calculate(&[Atom::new(0.0, 0.0, 0.0, 1.5)])
            .unwrap();
        let expected = sphere_area(1.5 + 1.4);
        assert_eq!(areas.len(), 1);
        assert!(
            (areas[0] - expected).abs() < 1e-9 * expected,
            "Expected {expected}, got {}",
            areas[0]
        );
    }

    #[test]
    fn test_zero_radius_atom() {
        let areas = calculator(1.4, 100)
            .calculate(&[Atom::new(0.0, 0.0, 0.0, 0.0)])
            .unwrap();
        assert!((areas[0] - sphere_area(1.4)).abs() < 1e-9);

        let areas = calculator(0.0, 100)
            .calculate(&[Atom::new(0.0, 0.0, 0.0, 0.0)])
            .unwrap();
        assert_eq!(areas[0], 0.0);
    }

    #[test]
    fn test_distant_pair() {
        let atoms = [
            Atom::new(0.0, 0.0, 0.0, 1.8),
            Atom::new(20.0, 0.0, 0.0, 1.8),
        ];
        let areas = calculator(1.4, 960).calculate(&atoms).unwrap();
        let expected = sphere_area(1.8 + 1.4);
        for area in areas {
            assert!((area - expected).abs() < 1e-9 * expected);
        }
    }

    #[test]
    fn test_nested_atoms() {
        // The smaller sphere lies strictly inside the larger one
        let atoms = [
            Atom::new(0.0, 0.0, 0.0, 1.0),
            Atom::new(0.0, 0.0, 0.0, 2.0),
        ];
        let areas = calculator(1.4, 960).calculate(&atoms).unwrap();
        assert_eq!(areas[0], 0.0);
        assert!((areas[1] - sphere_area(3.4)).abs() < 1e-9 * sphere_area(3.4));
    }

    #[test]
    fn test_boundary_point_is_accessible() {
        // One sample point at (1, 0, 0) lands on (1.5, 0, 0). The neighbor's
        // expanded sphere (radius 1.0) passes exactly through it.
        let atoms = [
            Atom::new(0.0, 0.0, 0.0, 1.0),
            Atom::new(1.5, 1.0, 0.0, 0.5),
        ];
        let areas = calculator(0.5, 1).calculate(&atoms).unwrap();
        assert!((areas[0] - sphere_area(1.5)).abs() < 1e-9);

        // Moving the neighbor slightly closer buries the point
        let atoms = [
            Atom::new(0.0, 0.0, 0.0, 1.0),
            Atom::new(1.5, 0.999, 0.0, 0.5),
        ];
        let areas = calculator(0.5, 1).calculate(&atoms).unwrap();
        assert_eq!(areas[0], 0.0);
    }

    #[test]
    fn test_areas_within_bounds() {
        let atoms = carbon_lattice();
        let probe = 1.4;
        let areas = calculator(probe, 240).calculate(&atoms).unwrap();
        assert_eq!(areas.len(), atoms.len());
        for (atom, area) in atoms.iter().zip(&areas) {
            let max_area = sphere_area(atom.radius + probe);
            assert!(
                (0.0..=max_area + 1e-9).contains(area),
                "Area {area} outside [0, {max_area}]"
            );
        }
        // The center of the lattice is fully buried
        assert_eq!(areas[13], 0.0);
    }

    #[test]
    fn test_carbon_chain_reference() {
        let areas = calculator(1.4, 960).calculate(&carbon_chain()).unwrap();
        let total = total_area(&areas);
        assert!(
            (total - 242.029).abs() < 0.1,
            "Expected total ASA around 242.029, got {total}"
        );
        // Terminal atoms are more exposed than interior ones
        assert!(areas[0] > areas[2]);
        assert!(areas[4] > areas[2]);
        assert!((areas[1] - areas[3]).abs() < 0.1);
    }

    #[test]
    fn test_convergence() {
        for atoms in [carbon_chain(), carbon_lattice()] {
            let coarse = total_area(&calculator(1.4, 60).calculate(&atoms).unwrap());
            let fine = total_area(&calculator(1.4, 960).calculate(&atoms).unwrap());
            let rel_diff = (coarse - fine).abs() / fine;
            assert!(
                rel_diff < 0.05,
                "60 vs 960 sphere points differ by {:.2}%",
                rel_diff * 100.0
            );
        }
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let atoms = carbon_lattice();
        let parallel = calculator(1.4, 200).calculate(&atoms).unwrap();
        let sequential = SurfaceAreaCalculator::new(
            SasaSettings::default()
                .with_n_points(200)
                .with_parallel(false),
        )
        .calculate(&atoms)
        .unwrap();
        assert_eq!(parallel, sequential);
    }

    #[test]
    fn test_rtree_matches_brute_force() {
        let atoms = carbon_lattice();
        let brute = calculator(1.4, 200).calculate(&atoms).unwrap();
        let rtree = SurfaceAreaCalculator::new(
            SasaSettings::default()
                .with_n_points(200)
                .with_neighbor_search(NeighborSearch::RTree),
        )
        .calculate(&atoms)
        .unwrap();
        assert_eq!(brute, rtree);
    }

    #[test]
    fn test_order_independent() {
        let atoms = carbon_chain();
        let areas = calculator(1.4, 300).calculate(&atoms).unwrap();
        let reversed: Vec<Atom> = atoms.iter().rev().copied().collect();
        let mut reversed_areas = calculator(1.4, 300).calculate(&reversed).unwrap();
        reversed_areas.reverse();
        assert_eq!(areas, reversed_areas);
    }

    #[test]
    fn test_invalid_input() {
        let calc = calculator(1.4, 960);
        assert_eq!(calc.calculate(&[]), Err(AsaError::EmptyInput));
        assert_eq!(
            calc.calculate(&[Atom::new(0.0, 0.0, 0.0, 1.0), Atom::new(1.0, 0.0, 0.0, -0.1)]),
            Err(AsaError::InvalidRadius {
                index: 1,
                radius: -0.1
            })
        );
        assert_eq!(
            calc.calculate(&[Atom::new(f64::NAN, 0.0, 0.0, 1.0)]),
            Err(AsaError::InvalidCoordinate { index: 0 })
        );
        assert_eq!(
            calculator(-1.0, 960).calculate(&[Atom::new(0.0, 0.0, 0.0, 1.0)]),
            Err(AsaError::InvalidProbe(-1.0))
        );
        assert_eq!(
            calculator(1.4, 0).calculate(&[Atom::new(0.0, 0.0, 0.0, 1.0)]),
            Err(AsaError::InvalidSampleCount(0))
        );
    }

    #[test]
    fn test_cancelled() {
        let cancel = AtomicBool::new(true);
        let result = calculator(1.4, 960).calculate_cancellable(&carbon_chain(), &cancel);
        assert_eq!(result, Err(AsaError::Cancelled));
    }
}
