//! POV-Ray scene text: number formatting and writing the `.pov` file.

use std::path::{Path, PathBuf};

use glam::DVec3;

use crate::error::CcpovizError;
use crate::scene::SceneDescription;
use crate::template::TemplateSet;

/// Format a vector as a POV-Ray vector literal, `<x, y, z>`.
#[must_use]
pub fn format_vector(v: DVec3) -> String {
    format!("<{:11.6}, {:11.6}, {:11.6}>", v.x, v.y, v.z)
}

/// Format a length such as a radius.
#[must_use]
pub fn format_scalar(x: f64) -> String {
    format!("{x:7.4}")
}

/// Path of the scene file written next to the image.
#[must_use]
pub fn scene_path(image: &Path) -> PathBuf {
    image.with_extension("pov")
}

/// Render the scene with the templates and write it to `path`.
pub fn write_scene(
    scene: &SceneDescription,
    templates: &TemplateSet,
    path: &Path,
) -> Result<(), CcpovizError> {
    let text = templates.render(scene)?;
    std::fs::write(path, text).map_err(|e| CcpovizError::io(path, e))?;
    log::info!("wrote POV-Ray scene {}", path.display());
    Ok(())
}
