//! Neighbor candidate search for the occlusion test.
//!
//! Atom `i` is a neighbor of the reference atom `k` when
//! `|p_i - p_k|^2 < (r_k + 2 * probe + r_i)^2`. The reference atom is never
//! its own neighbor. Every strategy in this module returns exactly that set.

use super::settings::NeighborSearch;
use super::types::{distance_squared, NeighborMask, Point3D};
use rstar::primitives::GeomWithData;
use rstar::RTree;

/// Relative padding on the R-tree query radius, so candidates sitting right
/// at the cutoff are still handed to the exact test.
const RTREE_QUERY_PADDING: f64 = 1e-9;

/// Reach of the reference atom: its radius plus the probe diameter.
#[inline]
fn reach(radii: &[f64], probe: f64, k: usize) -> f64 {
    radii[k] + probe + probe
}

#[inline]
fn within_threshold(
    positions: &[Point3D],
    radii: &[f64],
    reach: f64,
    k: usize,
    i: usize,
) -> bool {
    let threshold = reach + radii[i];
    distance_squared(&positions[i], &positions[k]) < threshold * threshold
}

/// Brute-force neighbor mask of atom `k` over all atoms.
///
/// # Arguments
///
/// * `positions` - Atom centers
/// * `radii` - Van der Waals radii, same order as `positions`
/// * `probe` - Probe radius
/// * `k` - Index of the reference atom
///
/// # Returns
///
/// One flag per atom; `mask[k]` is always `false`.
pub fn find_neighbors(positions: &[Point3D], radii: &[f64], probe: f64, k: usize) -> NeighborMask {
    let reach = reach(radii, probe, k);
    let mut mask: NeighborMask = (0..positions.len())
        .map(|i| within_threshold(positions, radii, reach, k, i))
        .collect();
    mask[k] = false;
    mask
}

/// Source of neighbor candidates for a reference atom.
pub trait NeighborFinder: Sync {
    /// Indices of the neighbors of atom `k`, in ascending order.
    fn neighbors_of(&self, k: usize) -> Vec<usize>;
}

/// Linear scan over every atom for each query.
pub struct BruteForceNeighbors<'a> {
    positions: &'a [Point3D],
    radii: &'a [f64],
    probe: f64,
}

impl<'a> BruteForceNeighbors<'a> {
    /// Scan over `positions` and `radii`, which must have the same length.
    pub fn new(positions: &'a [Point3D], radii: &'a [f64], probe: f64) -> Self {
        Self {
            positions,
            radii,
            probe,
        }
    }
}

impl NeighborFinder for BruteForceNeighbors<'_> {
    fn neighbors_of(&self, k: usize) -> Vec<usize> {
        find_neighbors(self.positions, self.radii, self.probe, k)
            .into_iter()
            .enumerate()
            .filter_map(|(i, is_neighbor)| is_neighbor.then_some(i))
            .collect()
    }
}

type IndexedPoint = GeomWithData<[f64; 3], usize>;

/// R*-tree backed search. Candidates come from a sphere query sized for the
/// largest radius in the set, then go through the same threshold test as
/// [`find_neighbors`].
pub struct RTreeNeighbors<'a> {
    positions: &'a [Point3D],
    radii: &'a [f64],
    probe: f64,
    max_radius: f64,
    tree: RTree<IndexedPoint>,
}

impl<'a> RTreeNeighbors<'a> {
    /// Bulk-load an R*-tree over `positions`.
    pub fn new(positions: &'a [Point3D], radii: &'a [f64], probe: f64) -> Self {
        let tree = RTree::bulk_load(
            positions
                .iter()
                .enumerate()
                .map(|(i, p)| IndexedPoint::new([p.x, p.y, p.z], i))
                .collect(),
        );
        let max_radius = radii.iter().copied().fold(0.0_f64, f64::max);

        Self {
            positions,
            radii,
            probe,
            max_radius,
            tree,
        }
    }
}

impl NeighborFinder for RTreeNeighbors<'_> {
    fn neighbors_of(&self, k: usize) -> Vec<usize> {
        let reach = reach(self.radii, self.probe, k);
        let search_radius = reach + self.max_radius;
        let search_radius_sq = search_radius * search_radius * (1.0 + RTREE_QUERY_PADDING);

        let center = &self.positions[k];
        let mut neighbors: Vec<usize> = self
            .tree
            .locate_within_distance([center.x, center.y, center.z], search_radius_sq)
            .map(|candidate| candidate.data)
            .filter(|&i| i != k && within_threshold(self.positions, self.radii, reach, k, i))
            .collect();
        neighbors.sort_unstable();
        neighbors
    }
}

/// Build the neighbor finder selected by `search`.
pub fn build_neighbor_finder<'a>(
    search: NeighborSearch,
    positions: &'a [Point3D],
    radii: &'a [f64],
    probe: f64,
) -> Box<dyn NeighborFinder + 'a> {
    match search {
        NeighborSearch::BruteForce => Box::new(BruteForceNeighbors::new(positions, radii, probe)),
        NeighborSearch::RTree => Box::new(RTreeNeighbors::new(positions, radii, probe)),
    }
}
