//! The render context: everything the scene template needs, as plain text.
//!
//! [`SceneDescription`] is built from a structure and resolved options and
//! serialized with kebab-case keys. Geometry is done with glam; every value
//! that lands in the template is already formatted as POV-Ray text.
//!
//! # Pipeline
//!
//! 1. [`camera::Camera`] places the eye around the centroid of the atoms.
//! 2. [`light::LightSource`] puts an area light relative to the camera.
//! 3. [`atoms::draw_atoms`] makes one sphere per atom.
//! 4. [`bonds::draw_bonds`] perceives and merges bonds and resolves them
//!    into cylinders through [`cylinder`].
//! 5. [`axes::draw_axes`] adds coordinate arrows when asked for.

/// Atom spheres.
pub mod atoms;
/// Coordinate axis arrows.
pub mod axes;
/// Bond perception, explicit bond merging and bond cylinders.
pub mod bonds;
/// Camera placement and its POV-Ray directives.
pub mod camera;
/// Multiple and partial bonds as parallel or dashed segments.
pub mod cylinder;
/// The area light source.
pub mod light;
/// Texture line lists for the `texturedef` partial.
pub mod texture;

use serde::Serialize;

pub use self::atoms::SphereItem;
pub use self::axes::AxisItem;
pub use self::bonds::BondItem;
pub use self::camera::{Camera, CameraDirective};
pub use self::light::LightSource;
pub use self::texture::TextureDef;
use crate::error::CcpovizError;
use crate::options::Options;
use crate::structure::Structure;

/// Context for rendering the scene template.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct SceneDescription {
    /// Camera directives in emission order.
    pub camera: Vec<CameraDirective>,
    /// Area light.
    #[serde(flatten)]
    pub light: LightSource,
    /// Whether a background block is emitted.
    pub use_background: bool,
    /// Lines inside the background block.
    pub background_settings: Vec<String>,
    /// One sphere per atom.
    pub atoms: Vec<SphereItem>,
    /// Bond cylinders.
    pub bonds: Vec<BondItem>,
    /// Coordinate axes, empty unless enabled.
    pub axes: Vec<AxisItem>,
}

impl SceneDescription {
    /// Build the render context of a structure.
    pub fn build(
        structure: &Structure,
        options: &Options,
    ) -> Result<Self, CcpovizError> {
        let camera = Camera::new(&options.camera, structure);
        let light = LightSource::new(&options.light, &camera);
        let atoms = atoms::draw_atoms(structure, &options.elements)?;
        let bonds =
            bonds::draw_bonds(structure, camera.location, &options.bonds);
        let axes = if options.axes.draw {
            axes::draw_axes(camera.focus, &options.axes)
        } else {
            Vec::new()
        };

        let background = &options.background;
        let background_settings = if background.is_set() {
            vec![format!("colour {}", background.colour.trim())]
        } else {
            Vec::new()
        };

        log::info!(
            "scene with {} spheres, {} bond cylinders and {} axes",
            atoms.len(),
            bonds.len(),
            axes.len()
        );

        Ok(Self {
            camera: camera.directives,
            light,
            use_background: background.is_set(),
            background_settings,
            atoms,
            bonds,
            axes,
        })
    }
}

#[cfg(test)]
mod tests {
    use glam::DVec3;

    use super::*;
    use crate::structure::{Atom, Bond};

    fn ethene_fragment() -> Structure {
        Structure {
            atoms: vec![
                Atom::new("C", DVec3::new(-0.67, 0.0, 0.0)),
                Atom::new("C", DVec3::new(0.67, 0.0, 0.0)),
            ],
            bonds: vec![Bond::new(0, 1, 2.0)],
            ..Structure::default()
        }
    }

    #[test]
    fn default_scene() {
        let scene =
            SceneDescription::build(&ethene_fragment(), &Options::default())
                .unwrap();
        assert_eq!(scene.camera.len(), 5);
        assert_eq!(scene.atoms.len(), 2);
        // Double bond, two cylinders.
        assert_eq!(scene.bonds.len(), 2);
        assert!(scene.axes.is_empty());
        assert!(!scene.use_background);
        assert!(scene.background_settings.is_empty());
    }

    #[test]
    fn background_and_axes() {
        let mut options = Options::default();
        options.background.colour = "White".to_owned();
        options.axes.draw = true;
        let scene =
            SceneDescription::build(&ethene_fragment(), &options).unwrap();
        assert!(scene.use_background);
        assert_eq!(scene.background_settings, ["colour White"]);
        assert_eq!(scene.axes.len(), 3);
        assert_eq!(scene.axes[0].begin, scene.camera[4].op_value);
    }

    #[test]
    fn context_keys() {
        let scene =
            SceneDescription::build(&ethene_fragment(), &Options::default())
                .unwrap();
        let value = serde_json::to_value(&scene).unwrap();
        for key in [
            "camera",
            "light-location",
            "light-colour",
            "light-area-vec-1",
            "light-area-vec-2",
            "light-number",
            "light-adaptive",
            "light-jitter",
            "use-background",
            "background-settings",
            "atoms",
            "bonds",
            "axes",
        ] {
            assert!(value.get(key).is_some(), "missing {key}");
        }
        assert_eq!(value["camera"][0]["op-name"], "location");
    }

    #[test]
    fn unknown_colour_scheme_fails() {
        let mut options = Options::default();
        options.elements.colour_scheme = "Pastel".to_owned();
        let err = SceneDescription::build(&ethene_fragment(), &options)
            .unwrap_err();
        assert!(matches!(err, CcpovizError::OptionsParse(_)));
    }
}
