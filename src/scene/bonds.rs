use std::collections::BTreeSet;

use glam::DVec3;
use serde::Serialize;

use super::cylinder::bonds_to_cylinders;
use super::texture::TextureDef;
use crate::options::BondOptions;
use crate::pov::{format_scalar, format_vector};
use crate::structure::{Bond, Structure};

/// Orders below this remove a bond when merging.
const ZERO_ORDER: f64 = 0.1;
/// Atoms closer than this are overlapping copies, not bonded.
const MIN_BOND_LENGTH: f64 = 0.4;

/// One bond cylinder with round caps at both ends.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BondItem {
    /// Start of the cylinder.
    pub begin: String,
    /// End of the cylinder.
    pub end: String,
    /// Cylinder and cap radius.
    pub radius: String,
    /// Texture blocks.
    #[serde(flatten)]
    pub texture: TextureDef,
}

/// Perceive single bonds from interatomic distances.
///
/// Two atoms are bonded when their distance is below the sum of their
/// covalent radii plus the tolerance. Elements without a covalent radius
/// bond to nothing.
#[must_use]
pub fn compute_bonds(structure: &Structure, opts: &BondOptions) -> Vec<Bond> {
    let mut unknown = BTreeSet::new();
    let radii: Vec<Option<f64>> = structure
        .atoms
        .iter()
        .map(|atom| {
            let radius = opts.covalent_radius(&atom.symbol);
            if radius.is_none() {
                let _ = unknown.insert(atom.symbol.as_str());
            }
            radius
        })
        .collect();
    for symbol in unknown {
        log::warn!("no covalent radius for {symbol}, its bonds are not perceived");
    }

    let atoms = &structure.atoms;
    let mut bonds = Vec::new();
    for (i, atom_i) in atoms.iter().enumerate() {
        let Some(r_i) = radii[i] else { continue };
        for (j, atom_j) in atoms.iter().enumerate().skip(i + 1) {
            let Some(r_j) = radii[j] else { continue };
            let dist = atom_i.coord.distance(atom_j.coord);
            if dist < r_i + r_j + opts.tolerance && dist > MIN_BOND_LENGTH {
                bonds.push(Bond::new(i, j, 1.0));
            }
        }
    }
    bonds
}

/// Merge explicit bonds into perceived ones.
///
/// An explicit bond replaces the order of the same atom pair, an order of
/// zero removes the pair and new pairs are added.
#[must_use]
pub fn update_bonds(mut bonds: Vec<Bond>, explicit: &[Bond]) -> Vec<Bond> {
    for new in explicit {
        let removing = new.order.abs() < ZERO_ORDER;
        match bonds.iter().position(|b| b.same_pair(new)) {
            Some(idx) if removing => {
                let _ = bonds.remove(idx);
            }
            Some(idx) => bonds[idx] = *new,
            None if removing => {}
            None => bonds.push(*new),
        }
    }
    bonds
}

/// The bonds to draw: perceived ones if enabled, patched by the input's.
#[must_use]
pub fn form_bonds(structure: &Structure, opts: &BondOptions) -> Vec<Bond> {
    let perceived = if opts.compute {
        compute_bonds(structure, opts)
    } else {
        Vec::new()
    };
    let bonds = update_bonds(perceived, &structure.bonds);
    log::debug!("drawing {} bonds", bonds.len());
    bonds
}

/// Bond cylinders as seen from the camera location.
#[must_use]
pub fn draw_bonds(
    structure: &Structure,
    camera: DVec3,
    opts: &BondOptions,
) -> Vec<BondItem> {
    let bonds = form_bonds(structure, opts);
    let texture = TextureDef::new(&opts.texture, &opts.colour);
    let radius = format_scalar(opts.radius);

    bonds_to_cylinders(
        &bonds,
        &structure.atoms,
        camera,
        opts.separation,
        opts.dash_size,
    )
    .into_iter()
    .map(|cylinder| BondItem {
        begin: format_vector(cylinder.segment.begin),
        end: format_vector(cylinder.segment.end),
        radius: radius.clone(),
        texture: texture.clone(),
    })
    .collect()
}
