use std::collections::BTreeSet;

use serde::Serialize;

use super::texture::TextureDef;
use crate::error::CcpovizError;
use crate::options::ElementOptions;
use crate::pov::{format_scalar, format_vector};
use crate::structure::element::has_scheme_colour;
use crate::structure::Structure;

/// One atom drawn as a POV-Ray sphere.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SphereItem {
    /// Centre.
    pub location: String,
    /// Radius.
    pub radius: String,
    /// Texture blocks.
    #[serde(flatten)]
    pub texture: TextureDef,
}

/// Distinct symbols that fall back to the default colour.
fn uncoloured_symbols<'a>(
    structure: &'a Structure,
    elements: &ElementOptions,
) -> BTreeSet<&'a str> {
    structure
        .atoms
        .iter()
        .map(|atom| atom.symbol.as_str())
        .filter(|symbol| {
            !elements.colour_change.contains_key(*symbol)
                && !has_scheme_colour(&elements.colour_scheme, symbol)
        })
        .collect()
}

/// Spheres for every atom of the structure, in input order.
pub fn draw_atoms(
    structure: &Structure,
    elements: &ElementOptions,
) -> Result<Vec<SphereItem>, CcpovizError> {
    for symbol in uncoloured_symbols(structure, elements) {
        log::warn!(
            "no {} colour for {symbol}, using fallback",
            elements.colour_scheme
        );
    }
    structure
        .atoms
        .iter()
        .map(|atom| {
            let colour = elements.colour_of(&atom.symbol)?;
            Ok(SphereItem {
                location: format_vector(atom.coord),
                radius: format_scalar(elements.radius_of(&atom.symbol)),
                texture: TextureDef::new(
                    elements.texture_of(&atom.symbol),
                    &colour,
                ),
            })
        })
        .collect()
}
