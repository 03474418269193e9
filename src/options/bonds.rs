use std::collections::BTreeMap;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::elements::TextureSpec;
use crate::structure::element;

/// Bond perception and drawing.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Bonds", inline)]
#[serde(default)]
pub struct BondOptions {
    /// Perceive bonds from interatomic distances.
    #[schemars(title = "Compute Bonds")]
    pub compute: bool,
    /// Cylinder radius.
    #[schemars(title = "Radius", range(min = 0.0))]
    pub radius: f64,
    /// Slack added to the sum of covalent radii when perceiving bonds.
    #[schemars(title = "Tolerance", range(min = 0.0, max = 1.0))]
    pub tolerance: f64,
    /// Covalent radii overriding the tabulated ones, per element symbol.
    #[schemars(skip)]
    pub covalent_radii: BTreeMap<String, f64>,
    /// Distance between the cylinders of a multiple bond.
    #[schemars(title = "Separation", range(min = 0.0))]
    pub separation: f64,
    /// Length of a dash in a partial bond.
    #[schemars(title = "Dash Size", range(min = 0.01))]
    pub dash_size: f64,
    /// POV-Ray colour of the bonds.
    #[schemars(title = "Colour")]
    pub colour: String,
    /// Bond texture.
    #[schemars(skip)]
    pub texture: TextureSpec,
}

impl Default for BondOptions {
    fn default() -> Self {
        Self {
            compute: true,
            radius: 0.1,
            tolerance: 0.4,
            covalent_radii: BTreeMap::new(),
            separation: 0.3,
            dash_size: 0.15,
            colour: "rgb <0.75, 0.75, 0.75>".to_owned(),
            texture: TextureSpec::default(),
        }
    }
}

impl BondOptions {
    /// Covalent radius of an element, user overrides first.
    #[must_use]
    pub fn covalent_radius(&self, symbol: &str) -> Option<f64> {
        self.covalent_radii
            .get(symbol)
            .copied()
            .or_else(|| element::covalent_radius(symbol))
    }
}
