//! Crate-level error types.

use std::fmt;

use crate::options::chain::UpdateError;

/// Errors produced by the ccpoviz crate.
#[derive(Debug)]
pub enum CcpovizError {
    /// Generic I/O failure, with the path or action that failed.
    Io(String, std::io::Error),
    /// Malformed molecular structure input.
    StructureParse(String),
    /// Option file or option block could not be parsed or typed.
    OptionsParse(String),
    /// A user option is incompatible with the defaults.
    OptionUpdate(UpdateError),
    /// The built-in defaults or their meta-options are inconsistent.
    DefaultOptions(String),
    /// Template parsing or rendering failure.
    Template(String),
    /// The POV-Ray program could not be run or reported failure.
    PovRay(String),
}

impl fmt::Display for CcpovizError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(what, e) => write!(f, "I/O error ({what}): {e}"),
            Self::StructureParse(msg) => {
                write!(f, "structure parse error: {msg}")
            }
            Self::OptionsParse(msg) => {
                write!(f, "options parse error: {msg}")
            }
            Self::OptionUpdate(e) => write!(f, "invalid option: {e}"),
            Self::DefaultOptions(msg) => {
                write!(f, "inconsistent default options: {msg}")
            }
            Self::Template(msg) => write!(f, "template error: {msg}"),
            Self::PovRay(msg) => write!(f, "POV-Ray error: {msg}"),
        }
    }
}

impl std::error::Error for CcpovizError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(_, e) => Some(e),
            Self::OptionUpdate(e) => Some(e),
            _ => None,
        }
    }
}

impl From<UpdateError> for CcpovizError {
    fn from(e: UpdateError) -> Self {
        Self::OptionUpdate(e)
    }
}

impl CcpovizError {
    /// Wrap an I/O error with the path it concerns.
    pub(crate) fn io(path: &std::path::Path, e: std::io::Error) -> Self {
        Self::Io(path.display().to_string(), e)
    }
}
