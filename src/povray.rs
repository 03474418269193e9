//! Running the POV-Ray executable.

use std::ffi::OsString;
use std::path::Path;
use std::process::Command;

use crate::error::CcpovizError;

/// One POV-Ray invocation.
#[derive(Debug, Clone, Copy)]
pub struct PovRayJob<'a> {
    /// Program name or path.
    pub program: &'a str,
    /// Scene file to render.
    pub scene: &'a Path,
    /// Image file to write.
    pub image: &'a Path,
    /// Image width in pixels.
    pub width: u32,
    /// Width over height.
    pub aspect_ratio: f64,
    /// Render an alpha channel instead of a background.
    pub transparent: bool,
}

impl PovRayJob<'_> {
    /// Image height in pixels, never zero.
    #[must_use]
    pub fn height(&self) -> u32 {
        (f64::from(self.width) / self.aspect_ratio).round().max(1.0) as u32
    }

    /// Command-line arguments for POV-Ray.
    #[must_use]
    pub fn args(&self) -> Vec<OsString> {
        let with_path = |flag: &str, path: &Path| {
            let mut arg = OsString::from(flag);
            arg.push(path.as_os_str());
            arg
        };
        let mut args = vec![
            with_path("+I", self.scene),
            OsString::from(format!("+W{}", self.width)),
            OsString::from(format!("+H{}", self.height())),
            with_path("+O", self.image),
        ];
        if self.transparent {
            args.push(OsString::from("+UA"));
        }
        args
    }
}

/// Render the scene, waiting for POV-Ray to finish.
pub fn run_povray(job: &PovRayJob<'_>) -> Result<(), CcpovizError> {
    let args = job.args();
    log::info!(
        "running {} {}",
        job.program,
        args.iter()
            .map(|a| a.to_string_lossy())
            .collect::<Vec<_>>()
            .join(" ")
    );
    let status = Command::new(job.program).args(&args).status().map_err(
        |e| CcpovizError::PovRay(format!("cannot run {}: {e}", job.program)),
    )?;
    if !status.success() {
        return Err(CcpovizError::PovRay(format!(
            "{} returned with error ({status})",
            job.program
        )));
    }
    log::info!("rendered {}", job.image.display());
    Ok(())
}
