//! ASA calculation settings.

/// Van der Waals radius of a water oxygen, the usual solvent probe.
pub const WATER_PROBE_RADIUS: f64 = 1.4;
/// Shrake & Rupley (1973) style dot density per atom
pub const DEFAULT_SPHERE_POINTS: usize = 960;

/// Strategy for finding the atoms that may occlude a reference atom.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum NeighborSearch {
    /// Scan every atom for every reference atom
    #[default]
    BruteForce,
    /// Query an R*-tree built once per calculation
    RTree,
}

impl std::fmt::Display for NeighborSearch {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            NeighborSearch::BruteForce => write!(f, "brute-force"),
            NeighborSearch::RTree => write!(f, "r-tree"),
        }
    }
}

/// Parameters of one surface calculation.
#[derive(Clone, Debug, PartialEq)]
pub struct SasaSettings {
    /// Solvent probe radius
    pub probe_radius: f64,
    /// Number of sample points on each atom's sphere
    pub n_points: usize,
    /// How neighbor candidates are found
    pub neighbor_search: NeighborSearch,
    /// Distribute atoms across the rayon thread pool
    pub parallel: bool,
}

impl Default for SasaSettings {
    fn default() -> Self {
        Self {
            probe_radius: WATER_PROBE_RADIUS,
            n_points: DEFAULT_SPHERE_POINTS,
            neighbor_search: NeighborSearch::default(),
            parallel: true,
        }
    }
}

impl SasaSettings {
    /// Set the probe radius.
    pub fn with_probe_radius(mut self, probe_radius: f64) -> Self {
        self.probe_radius = probe_radius;
        self
    }

    /// Set the number of sphere points.
    pub fn with_n_points(mut self, n_points: usize) -> Self {
        self.n_points = n_points;
        self
    }

    /// Set the neighbor search strategy.
    pub fn with_neighbor_search(mut self, neighbor_search: NeighborSearch) -> Self {
        self.neighbor_search = neighbor_search;
        self
    }

    /// Toggle parallel evaluation.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }
}
