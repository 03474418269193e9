use std::collections::BTreeMap;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::CcpovizError;
use crate::structure::element::scheme_colour;

/// POV-Ray texture settings for a class of objects.
///
/// Each list holds literal lines placed in the corresponding block of the
/// texture. With `use_colour` the pigment gains a `colour` line for the
/// object's colour.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Texture", inline)]
#[serde(default)]
pub struct TextureSpec {
    /// Lines directly inside `texture { }`.
    pub texture: Vec<String>,
    /// Lines inside `pigment { }`.
    pub pigment: Vec<String>,
    /// Lines inside `normal { }`.
    pub normal: Vec<String>,
    /// Lines inside `finish { }`.
    pub finish: Vec<String>,
    /// Whether to append the object's colour to the pigment.
    pub use_colour: bool,
}

impl Default for TextureSpec {
    fn default() -> Self {
        Self {
            texture: Vec::new(),
            pigment: Vec::new(),
            normal: Vec::new(),
            finish: vec![
                "ambient 0.2".to_owned(),
                "diffuse 0.7".to_owned(),
                "phong 0.6".to_owned(),
                "phong_size 40".to_owned(),
            ],
            use_colour: true,
        }
    }
}

/// How atoms are sized, coloured and textured.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Elements", inline)]
#[serde(default)]
pub struct ElementOptions {
    /// Sphere radius for elements without an entry in `radii`.
    #[schemars(title = "Default Radius", range(min = 0.0))]
    pub radius: f64,
    /// Sphere radius per element symbol.
    #[schemars(skip)]
    pub radii: BTreeMap<String, f64>,
    /// Bundled colour scheme: `CPK`, `Jmol` or `Rasmol`.
    #[schemars(title = "Colour Scheme")]
    pub colour_scheme: String,
    /// Colours replacing the scheme's, per element symbol.
    #[schemars(skip)]
    pub colour_change: BTreeMap<String, String>,
    /// Texture for elements without an entry in `textures`.
    #[schemars(skip)]
    pub texture: TextureSpec,
    /// Texture per element symbol.
    #[schemars(skip)]
    pub textures: BTreeMap<String, TextureSpec>,
}

impl Default for ElementOptions {
    fn default() -> Self {
        Self {
            radius: 0.4,
            radii: BTreeMap::from([("H".to_owned(), 0.25)]),
            colour_scheme: "Jmol".to_owned(),
            colour_change: BTreeMap::new(),
            texture: TextureSpec::default(),
            textures: BTreeMap::new(),
        }
    }
}

impl ElementOptions {
    /// Sphere radius for an element.
    #[must_use]
    pub fn radius_of(&self, symbol: &str) -> f64 {
        self.radii.get(symbol).copied().unwrap_or(self.radius)
    }

    /// Texture settings for an element.
    #[must_use]
    pub fn texture_of(&self, symbol: &str) -> &TextureSpec {
        self.textures.get(symbol).unwrap_or(&self.texture)
    }

    /// POV-Ray colour for an element: a user change, else the scheme's.
    pub fn colour_of(&self, symbol: &str) -> Result<String, CcpovizError> {
        if let Some(colour) = self.colour_change.get(symbol) {
            return Ok(colour.clone());
        }
        scheme_colour(&self.colour_scheme, symbol).ok_or_else(|| {
            CcpovizError::OptionsParse(format!(
                "the element colour scheme {} does not exist",
                self.colour_scheme
            ))
        })
    }
}
