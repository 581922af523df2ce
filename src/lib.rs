#![warn(missing_docs)]
#![doc = include_str!("../README.md")]

//! # Dotsasa Library
//!
//! This library computes the solvent Accessible Surface Area (ASA) of atoms
//! with the Shrake-Rupley dot-density method. The core works on a plain list
//! of spheres; helpers read PDB and mmCIF files through `pdbtbx` and return
//! per-atom, per-residue or per-chain results as Polars DataFrames.

pub mod asa;
mod error;
mod sasa;
mod utils;

// Re-export key public types
pub use asa::{
    compute_accessible_surface_area, find_neighbors, generate_sphere_points, total_area, AsaError,
    Atom, NeighborMask, NeighborSearch, Point3D, SasaSettings, SpherePoints,
    SurfaceAreaCalculator, DEFAULT_SPHERE_POINTS, WATER_PROBE_RADIUS,
};
pub use error::Error;
pub use sasa::{
    get_atom_sasa, get_chain_sasa, get_residue_sasa, get_sasa, structure_atoms, AtomAnnotation,
    SasaLevel, StructureFilter,
};
pub use utils::{load_model, log_pdb_warnings, run_with_threads, sum_sasa, write_df, OutputFormat};
