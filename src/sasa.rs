//! Accessible surface area of atoms, residues and chains in a structure.
//!
//! Atoms are taken from a [`pdbtbx::PDB`] with their element's van der Waals
//! radius, passed through [`SurfaceAreaCalculator`], and the areas are joined
//! back onto the atom annotations as a Polars `DataFrame`.

use crate::asa::{Atom, SasaSettings, SurfaceAreaCalculator};
use crate::error::Error;
use pdbtbx::{
    AtomConformerResidueChainModel, ContainsAtomConformer, ContainsAtomConformerResidue,
    ContainsAtomConformerResidueChain, ContainsAtomConformerResidueChainModel, Element, PDB,
};
use polars::prelude::*;
use tracing::{debug, warn};

/// Residue names treated as solvent.
const WATER_RESIDUES: [&str; 4] = ["HOH", "WAT", "H2O", "DOD"];

/// Identifies the structure record an area belongs to.
#[derive(Debug, Hash, PartialEq, Eq, Clone)]
pub struct AtomAnnotation {
    /// Chain identifier
    pub chain: String,
    /// Residue name
    pub resn: String,
    /// Residue serial number
    pub resi: isize,
    /// Insertion code, empty if none
    pub insertion: String,
    /// Alternative location, empty if none
    pub altloc: String,
    /// Atom name
    pub atomn: String,
    /// Atom serial number
    pub atomi: usize,
}

impl AtomAnnotation {
    /// Helper function to convert an [`pdbtbx::AtomConformerResidueChainModel`] to an annotation
    pub fn from_hier(hier: &AtomConformerResidueChainModel) -> Self {
        let (resi, insertion) = hier.residue().id();
        Self {
            chain: hier.chain().id().to_string(),
            resn: hier.residue().name().unwrap_or("").to_string(),
            resi,
            insertion: insertion.unwrap_or("").to_string(),
            altloc: hier
                .conformer()
                .alternative_location()
                .unwrap_or("")
                .to_string(),
            atomn: hier.atom().name().to_string(),
            atomi: hier.atom().serial_number(),
        }
    }
}

/// Which atoms of a structure take part in the calculation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StructureFilter {
    /// Model serial number, 0 for the first model
    pub model_num: usize,
    /// Keep hydrogen atoms
    pub include_hydrogens: bool,
    /// Keep water molecules
    pub include_water: bool,
}

impl Default for StructureFilter {
    fn default() -> Self {
        Self {
            model_num: 0,
            include_hydrogens: false,
            include_water: false,
        }
    }
}

/// Aggregation level of the reported areas.
#[derive(clap::ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SasaLevel {
    /// One row per atom
    #[default]
    Atom,
    /// Atom areas summed per residue
    Residue,
    /// Atom areas summed per chain
    Chain,
}

impl std::fmt::Display for SasaLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            SasaLevel::Atom => write!(f, "atom"),
            SasaLevel::Residue => write!(f, "residue"),
            SasaLevel::Chain => write!(f, "chain"),
        }
    }
}

/// Resolve model number 0 to the serial number of the first model.
fn resolve_model(pdb: &PDB, model_num: usize) -> Result<usize, Error> {
    let first = pdb.models().next().map(|m| m.serial_number());
    match model_num {
        0 => first.ok_or(Error::ModelNotFound(model_num)),
        n if pdb.models().any(|m| m.serial_number() == n) => Ok(n),
        n => Err(Error::ModelNotFound(n)),
    }
}

/// Collect the atoms of one model with their van der Waals radii.
///
/// Atoms whose element has no known radius are skipped with a warning.
///
/// # Returns
///
/// The atoms for [`SurfaceAreaCalculator`] and their annotations, in the same order.
pub fn structure_atoms(
    pdb: &PDB,
    filter: &StructureFilter,
) -> Result<(Vec<Atom>, Vec<AtomAnnotation>), Error> {
    let model_num = resolve_model(pdb, filter.model_num)?;

    let mut atoms = Vec::new();
    let mut annotations = Vec::new();
    for hier in pdb
        .atoms_with_hierarchy()
        .filter(|x| x.model().serial_number() == model_num)
    {
        let atom = hier.atom();
        if !filter.include_hydrogens && atom.element() == Some(&Element::H) {
            continue;
        }
        let resn = hier.residue().name().unwrap_or("");
        if !filter.include_water && WATER_RESIDUES.contains(&resn) {
            continue;
        }

        let Some(radius) = atom
            .element()
            .and_then(|e| e.atomic_radius().van_der_waals)
        else {
            warn!(
                "Skipping atom {} {} in residue {resn}: no van der Waals radius",
                atom.serial_number(),
                atom.name()
            );
            continue;
        };

        let (x, y, z) = atom.pos();
        atoms.push(Atom::new(x, y, z, radius));
        annotations.push(AtomAnnotation::from_hier(&hier));
    }

    if atoms.is_empty() {
        return Err(Error::NoAtoms(model_num));
    }
    debug!("Selected {} atoms from model {model_num}", atoms.len());
    Ok((atoms, annotations))
}

fn annotations_to_df(
    annotations: &[AtomAnnotation],
    areas: Vec<f64>,
) -> Result<DataFrame, Error> {
    let df = df!(
        "chain" => annotations.iter().map(|x| x.chain.to_owned()).collect::<Vec<String>>(),
        "resn" => annotations.iter().map(|x| x.resn.to_owned()).collect::<Vec<String>>(),
        "resi" => annotations.iter().map(|x| x.resi as i64).collect::<Vec<i64>>(),
        "insertion" => annotations.iter().map(|x| x.insertion.to_owned()).collect::<Vec<String>>(),
        "altloc" => annotations.iter().map(|x| x.altloc.to_owned()).collect::<Vec<String>>(),
        "atomn" => annotations.iter().map(|x| x.atomn.to_owned()).collect::<Vec<String>>(),
        "atomi" => annotations.iter().map(|x| x.atomi as i64).collect::<Vec<i64>>(),
        "sasa" => areas,
    )?;
    Ok(df)
}

/// Calculate the accessible surface area of each atom in a structure.
///
/// # Arguments
///
/// * `pdb` - Reference to a PDB structure
/// * `settings` - Probe radius, sphere points and search strategy
/// * `filter` - Model and atom selection
///
/// # Returns
///
/// A Polars DataFrame with columns:
/// - chain, resn, resi, insertion, altloc, atomn, atomi, sasa
///
/// # Example
///
/// ```no_run
/// use dotsasa::{load_model, get_atom_sasa, SasaSettings, StructureFilter};
///
/// let (pdb, _warnings) = load_model("path/to/structure.pdb").unwrap();
/// let sasa_df = get_atom_sasa(&pdb, &SasaSettings::default(), &StructureFilter::default()).unwrap();
/// println!("Calculated SASA for {} atoms", sasa_df.height());
/// ```
pub fn get_atom_sasa(
    pdb: &PDB,
    settings: &SasaSettings,
    filter: &StructureFilter,
) -> Result<DataFrame, Error> {
    let (atoms, annotations) = structure_atoms(pdb, filter)?;
    let areas = SurfaceAreaCalculator::new(settings.clone()).calculate(&atoms)?;
    annotations_to_df(&annotations, areas)
}

/// Calculate the accessible surface area of each residue.
///
/// # Returns
///
/// A Polars DataFrame with columns:
/// - chain, resn, resi, insertion, altloc, sasa
pub fn get_residue_sasa(
    pdb: &PDB,
    settings: &SasaSettings,
    filter: &StructureFilter,
) -> Result<DataFrame, Error> {
    let df = get_atom_sasa(pdb, settings, filter)?
        .lazy()
        .group_by_stable([
            col("chain"),
            col("resn"),
            col("resi"),
            col("insertion"),
            col("altloc"),
        ])
        .agg([col("sasa").sum()])
        .collect()?;
    Ok(df)
}

/// Calculate the accessible surface area of each chain.
///
/// # Returns
///
/// A Polars DataFrame with columns:
/// - chain, sasa
pub fn get_chain_sasa(
    pdb: &PDB,
    settings: &SasaSettings,
    filter: &StructureFilter,
) -> Result<DataFrame, Error> {
    let df = get_atom_sasa(pdb, settings, filter)?
        .lazy()
        .group_by_stable([col("chain")])
        .agg([col("sasa").sum()])
        .collect()?;
    Ok(df)
}

/// Calculate accessible surface areas aggregated at `level`.
pub fn get_sasa(
    pdb: &PDB,
    level: SasaLevel,
    settings: &SasaSettings,
    filter: &StructureFilter,
) -> Result<DataFrame, Error> {
    match level {
        SasaLevel::Atom => get_atom_sasa(pdb, settings, filter),
        SasaLevel::Residue => get_residue_sasa(pdb, settings, filter),
        SasaLevel::Chain => get_chain_sasa(pdb, settings, filter),
    }
}
