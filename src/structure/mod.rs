//! Chemical structures as read from input files.
//!
//! A [`Structure`] holds just enough to draw a molecule or a crystal cell:
//! element symbols with Cartesian coordinates, the explicit bonds and the
//! lattice vectors. Readers produce it, the scene builder consumes it.

pub mod element;
pub mod gjf;

use std::path::Path;

use glam::DVec3;
use serde::{Deserialize, Serialize};

use crate::error::CcpovizError;

/// An atom: element symbol and Cartesian coordinate in angstroms.
#[derive(Debug, Clone, PartialEq)]
pub struct Atom {
    /// Element symbol, normalised capitalisation (`Cl`, not `CL`).
    pub symbol: String,
    /// Cartesian position.
    pub coord: DVec3,
}

impl Atom {
    /// Create an atom from a symbol and a position.
    #[must_use]
    pub fn new(symbol: impl Into<String>, coord: DVec3) -> Self {
        Self {
            symbol: symbol.into(),
            coord,
        }
    }
}

/// A bond between two atoms given by zero-based indices.
///
/// The order may be fractional to express a partial bond; an order of zero
/// in an explicit bond list removes a perceived bond.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bond {
    /// Index of the first atom, always the smaller one.
    pub begin: usize,
    /// Index of the second atom.
    pub end: usize,
    /// Bond order.
    pub order: f64,
}

impl Bond {
    /// Create a bond, ordering the atom indices.
    #[must_use]
    pub fn new(a: usize, b: usize, order: f64) -> Self {
        Self {
            begin: a.min(b),
            end: a.max(b),
            order,
        }
    }

    /// Whether two bonds join the same pair of atoms.
    #[must_use]
    pub fn same_pair(&self, other: &Self) -> bool {
        self.begin == other.begin && self.end == other.end
    }
}

/// A chemical structure, molecular or crystalline.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Structure {
    /// Title lines from the input; may carry per-molecule options.
    pub title: Vec<String>,
    /// Atoms in input order.
    pub atoms: Vec<Atom>,
    /// Explicit bonds from the input.
    pub bonds: Vec<Bond>,
    /// Lattice vectors, empty for molecules.
    pub lattice_vectors: Vec<DVec3>,
}

impl Structure {
    /// Geometric centre of the atoms, the origin for an empty structure.
    #[must_use]
    pub fn centroid(&self) -> DVec3 {
        if self.atoms.is_empty() {
            return DVec3::ZERO;
        }
        let sum: DVec3 = self.atoms.iter().map(|a| a.coord).sum();
        sum / self.atoms.len() as f64
    }
}

/// Input formats understood by [`read_structure`].
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize,
    clap::ValueEnum,
)]
#[serde(rename_all = "snake_case")]
pub enum InputReader {
    /// Gaussian input file (`.gjf`/`.com`).
    #[default]
    Gjf,
}

/// Read a structure from a file with the given reader.
pub fn read_structure(
    path: &Path,
    reader: InputReader,
) -> Result<Structure, CcpovizError> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| CcpovizError::io(path, e))?;
    let structure = match reader {
        InputReader::Gjf => gjf::parse(&content)?,
    };
    log::info!(
        "read {} atoms and {} bonds from {}",
        structure.atoms.len(),
        structure.bonds.len(),
        path.display()
    );
    Ok(structure)
}
