//! The end-to-end pipeline behind the `ccpoviz` binary.

use std::path::{Path, PathBuf};

use crate::error::CcpovizError;
use crate::options::sources::{resolve_options, MoleculeSource};
use crate::options::Options;
use crate::pov::{scene_path, write_scene};
use crate::povray::{run_povray, PovRayJob};
use crate::scene::SceneDescription;
use crate::structure::{read_structure, InputReader, Structure};
use crate::template::TemplateSet;

/// Everything one rendering run needs to know.
#[derive(Debug, Clone, Default)]
pub struct RenderRequest {
    /// Structure file.
    pub input: PathBuf,
    /// Reader for the structure file.
    pub reader: InputReader,
    /// Image path; defaults to the input with a `png` extension.
    pub output: Option<PathBuf>,
    /// Keep the `.pov` file after rendering.
    pub keep: bool,
    /// Project-wide option file.
    pub project: Option<PathBuf>,
    /// Molecule-specific options.
    pub molecule: Option<MoleculeSource>,
    /// Scene template replacing the built-in one.
    pub template: Option<PathBuf>,
    /// Write the `.pov` file without running POV-Ray.
    pub pov_only: bool,
}

impl RenderRequest {
    /// Path of the image to produce.
    #[must_use]
    pub fn image_path(&self) -> PathBuf {
        self.output
            .clone()
            .unwrap_or_else(|| self.input.with_extension("png"))
    }

    /// Read the structure and resolve the options of the run.
    pub fn load(&self) -> Result<(Structure, Options), CcpovizError> {
        let structure = read_structure(&self.input, self.reader)?;
        let options = resolve_options(
            self.molecule.as_ref(),
            self.project.as_deref(),
            &structure,
        )?;
        Ok((structure, options))
    }

    fn templates(&self) -> Result<TemplateSet, CcpovizError> {
        match &self.template {
            Some(path) => TemplateSet::from_file(path),
            None => TemplateSet::builtin(),
        }
    }
}

fn remove_scene(path: &Path) -> Result<(), CcpovizError> {
    std::fs::remove_file(path).map_err(|e| CcpovizError::io(path, e))?;
    log::debug!("removed {}", path.display());
    Ok(())
}

/// Run the whole pipeline.
///
/// Returns the path of the produced file: the image, or the scene file when
/// only the scene is requested. A scene that POV-Ray fails on is kept for
/// inspection.
pub fn render_driver(request: &RenderRequest) -> Result<PathBuf, CcpovizError> {
    let (structure, options) = request.load()?;
    let scene = SceneDescription::build(&structure, &options)?;

    let image = request.image_path();
    let pov = scene_path(&image);
    write_scene(&scene, &request.templates()?, &pov)?;
    if request.pov_only {
        return Ok(pov);
    }

    let job = PovRayJob {
        program: &options.render.povray_program,
        scene: &pov,
        image: &image,
        width: options.render.width,
        aspect_ratio: options.camera.aspect_ratio,
        transparent: !options.background.is_set(),
    };
    if let Err(e) = run_povray(&job) {
        log::warn!("keeping {} for inspection", pov.display());
        return Err(e);
    }

    if !request.keep {
        remove_scene(&pov)?;
    }
    Ok(image)
}
