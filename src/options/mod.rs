//! Visualization options with layered configuration support.
//!
//! All tweakable settings (camera, light, background, elements, bonds, axes,
//! POV-Ray invocation) are consolidated here. A run's options are the
//! built-in defaults patched by a project file and then by a molecule file
//! or the input title, see [`sources::resolve_options`] and [`chain`].

mod axes;
mod bonds;
mod camera;
pub mod chain;
mod elements;
mod lighting;
mod render;
pub mod sources;

pub use axes::AxesOptions;
pub use bonds::BondOptions;
pub use camera::CameraOptions;
pub use elements::{ElementOptions, TextureSpec};
pub use lighting::LightOptions;
pub use render::{BackgroundOptions, RenderOptions};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

use crate::error::CcpovizError;
use crate::structure::element::{is_colour_scheme, COLOUR_SCHEMES};

/// Top-level options container. All sub-structs use `#[serde(default)]` so
/// partial option files (e.g. only overriding `[camera]`) work correctly.
#[derive(
    Debug, Clone, Serialize, Deserialize, PartialEq, Default, JsonSchema,
)]
#[serde(default)]
pub struct Options {
    /// Camera placement.
    pub camera: CameraOptions,
    /// Area light.
    pub light: LightOptions,
    /// Scene background.
    pub background: BackgroundOptions,
    /// Atom sizes, colours and textures.
    pub elements: ElementOptions,
    /// Bond perception and drawing.
    pub bonds: BondOptions,
    /// Coordinate axes.
    pub axes: AxesOptions,
    /// POV-Ray invocation.
    pub render: RenderOptions,
}

/// Mark `key` of `section` as a map accepting new entries built on
/// `prototype`.
fn extendable(section: &mut Map<String, Value>, key: &str, prototype: Value) {
    let sep = chain::DEFAULT_SEPARATOR;
    let proto = chain::DEFAULT_PROTO_TAG;
    let _ = section.insert(format!("{key}{sep}update"), json!("extend"));
    let _ = section.insert(format!("{key}{sep}{proto}"), prototype);
}

fn to_tree<T: Serialize>(value: &T) -> Result<Value, CcpovizError> {
    serde_json::to_value(value)
        .map_err(|e| CcpovizError::DefaultOptions(e.to_string()))
}

fn section_mut<'a>(
    tree: &'a mut Value,
    name: &str,
) -> Result<&'a mut Map<String, Value>, CcpovizError> {
    tree.get_mut(name)
        .and_then(Value::as_object_mut)
        .ok_or_else(|| {
            CcpovizError::DefaultOptions(format!("missing section {name}"))
        })
}

impl Options {
    /// Generate JSON Schema describing the options.
    #[must_use]
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(Options)
    }

    /// The default options as a chaining tree, meta-options included.
    pub fn default_tree() -> Result<Value, CcpovizError> {
        let mut tree = to_tree(&Self::default())?;
        let texture = to_tree(&TextureSpec::default())?;

        let elements = section_mut(&mut tree, "elements")?;
        extendable(elements, "radii", json!(1.0));
        extendable(elements, "colour_change", json!(""));
        extendable(elements, "textures", texture);

        let bonds = section_mut(&mut tree, "bonds")?;
        extendable(bonds, "covalent_radii", json!(1.0));

        Ok(tree)
    }

    /// Type a chained tree into options, meta-options are ignored.
    pub fn from_tree(mut tree: Value) -> Result<Self, CcpovizError> {
        chain::ChainOptions::default().strip_meta(&mut tree);
        let options: Self = serde_json::from_value(tree)
            .map_err(|e| CcpovizError::OptionsParse(e.to_string()))?;
        options.validate()?;
        Ok(options)
    }

    /// Check value ranges the types cannot express.
    pub fn validate(&self) -> Result<(), CcpovizError> {
        let invalid = |msg: String| Err(CcpovizError::OptionsParse(msg));
        if !is_colour_scheme(&self.elements.colour_scheme) {
            return invalid(format!(
                "the element colour scheme {} does not exist, expected one \
                 of {}",
                self.elements.colour_scheme,
                COLOUR_SCHEMES.join(", ")
            ));
        }
        if self.camera.aspect_ratio <= 0.0 {
            return invalid(format!(
                "aspect ratio must be positive, got {}",
                self.camera.aspect_ratio
            ));
        }
        if self.bonds.dash_size <= 0.0 {
            return invalid(format!(
                "bond dash size must be positive, got {}",
                self.bonds.dash_size
            ));
        }
        if self.light.number == 0 {
            return invalid("the light needs at least one point".to_owned());
        }
        if self.render.width == 0 {
            return invalid("the image width must be positive".to_owned());
        }
        Ok(())
    }

    /// Serialize the options as pretty-printed TOML.
    pub fn to_toml(&self) -> Result<String, CcpovizError> {
        toml::to_string_pretty(self)
            .map_err(|e| CcpovizError::OptionsParse(e.to_string()))
    }
}
