//! Where user options come from.
//!
//! A run reads at most two user layers on top of the built-in defaults: a
//! project-wide file and a molecule-specific one. The molecule layer may
//! also be embedded in the title section of the input structure.

use std::convert::Infallible;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use regex::Regex;
use serde_json::{Map, Value};

use super::chain::ChainOptions;
use super::Options;
use crate::error::CcpovizError;
use crate::structure::Structure;

/// Command-line keyword selecting options embedded in the input title.
pub const INPUT_TITLE: &str = "input-title";

const YAML_BEGIN: &str = r"^ *--- *$";
const YAML_END: &str = r"^ *\.\.\. *$";
const JSON_BEGIN: &str = r"^ *\{";
const JSON_END: &str = r"\} *$";

/// Source of the molecule-specific option layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoleculeSource {
    /// An option file.
    File(PathBuf),
    /// A YAML or JSON block in the title section of the input.
    InputTitle,
}

impl FromStr for MoleculeSource {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(if s == INPUT_TITLE {
            Self::InputTitle
        } else {
            Self::File(PathBuf::from(s))
        })
    }
}

fn parse_error(what: &str, e: impl std::fmt::Display) -> CcpovizError {
    CcpovizError::OptionsParse(format!("{what}: {e}"))
}

/// An empty document is an empty layer; anything else must be a map.
fn as_layer(value: Value, what: &str) -> Result<Value, CcpovizError> {
    match value {
        Value::Null => Ok(Value::Object(Map::new())),
        Value::Object(_) => Ok(value),
        _ => Err(parse_error(what, "options must be given as a map")),
    }
}

/// Read an option file, the format is chosen by extension.
///
/// `.toml` is TOML, `.yml`/`.yaml` is YAML and anything else is JSON.
pub fn read_option_file(path: &Path) -> Result<Value, CcpovizError> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| CcpovizError::io(path, e))?;
    let what = path.display().to_string();
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);
    let value = match ext.as_deref() {
        Some("toml") => {
            toml::from_str(&content).map_err(|e| parse_error(&what, e))?
        }
        Some("yml" | "yaml") => serde_yaml::from_str(&content)
            .map_err(|e| parse_error(&what, e))?,
        _ => serde_json::from_str(&content)
            .map_err(|e| parse_error(&what, e))?,
    };
    log::debug!("read option file {what}");
    as_layer(value, &what)
}

/// Lines from the first match of `begin` to the last match of `end`.
fn lines_between<'a>(
    lines: &'a [String],
    begin: &str,
    end: &str,
) -> Result<Option<&'a [String]>, CcpovizError> {
    let compile = |pattern: &str| {
        Regex::new(pattern).map_err(|e| CcpovizError::DefaultOptions(e.to_string()))
    };
    let (begin, end) = (compile(begin)?, compile(end)?);
    let first = lines.iter().position(|l| begin.is_match(l));
    let last = lines.iter().rposition(|l| end.is_match(l));
    Ok(match (first, last) {
        (Some(first), Some(last)) if first <= last => {
            Some(&lines[first..=last])
        }
        _ => None,
    })
}

/// Parse the option block embedded in the title lines of an input.
///
/// A YAML document delimited by `---` and `...` lines takes precedence over
/// a JSON object spanning from the first line opening a brace to the last
/// line closing one.
pub fn title_options(title: &[String]) -> Result<Value, CcpovizError> {
    const WHAT: &str = "input title";
    if let Some(block) = lines_between(title, YAML_BEGIN, YAML_END)? {
        let value = serde_yaml::from_str(&block.join("\n"))
            .map_err(|e| parse_error(WHAT, e))?;
        return as_layer(value, WHAT);
    }
    if let Some(block) = lines_between(title, JSON_BEGIN, JSON_END)? {
        let value = serde_json::from_str(&block.join("\n"))
            .map_err(|e| parse_error(WHAT, e))?;
        return as_layer(value, WHAT);
    }
    Err(CcpovizError::OptionsParse(
        "the title of the input file cannot be parsed as options".to_owned(),
    ))
}

/// Resolve the options of a run.
///
/// The molecule layer overrides the project layer, which overrides the
/// defaults. Either user layer may be absent.
pub fn resolve_options(
    molecule: Option<&MoleculeSource>,
    project: Option<&Path>,
    structure: &Structure,
) -> Result<Options, CcpovizError> {
    let mut layers = Vec::with_capacity(3);
    match molecule {
        Some(MoleculeSource::File(path)) => {
            layers.push(read_option_file(path)?);
        }
        Some(MoleculeSource::InputTitle) => {
            layers.push(title_options(&structure.title)?);
        }
        None => {}
    }
    if let Some(path) = project {
        layers.push(read_option_file(path)?);
    }
    layers.push(Options::default_tree()?);

    log::debug!("chaining {} option layers", layers.len());
    let tree = ChainOptions::default().chain(&layers)?;
    Options::from_tree(tree)
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    fn titled(lines: &[&str]) -> Structure {
        Structure {
            title: lines.iter().map(|l| (*l).to_owned()).collect(),
            ..Structure::default()
        }
    }

    fn option_file(suffix: &str, content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn molecule_source_from_argument() {
        assert_eq!(
            "input-title".parse::<MoleculeSource>().unwrap(),
            MoleculeSource::InputTitle
        );
        assert_eq!(
            "mol.yml".parse::<MoleculeSource>().unwrap(),
            MoleculeSource::File(PathBuf::from("mol.yml"))
        );
    }

    #[test]
    fn yaml_block_in_title() {
        let title = titled(&[
            "benzene",
            "---",
            "camera:",
            "  distance: 20.0",
            "...",
        ]);
        let layer = title_options(&title.title).unwrap();
        assert_eq!(layer["camera"]["distance"], 20.0);
    }

    #[test]
    fn json_block_in_title() {
        let title = titled(&["water", "{\"axes\":", " {\"draw\": true}}"]);
        let layer = title_options(&title.title).unwrap();
        assert_eq!(layer["axes"]["draw"], true);
    }

    #[test]
    fn title_without_block_is_an_error() {
        let err = title_options(&["just a title".to_owned()]).unwrap_err();
        assert!(matches!(err, CcpovizError::OptionsParse(_)));
    }

    #[test]
    fn files_by_extension() {
        let toml_file = option_file(".toml", "[render]\nwidth = 400\n");
        let yaml_file = option_file(".yaml", "render:\n  width: 300\n");
        let json_file = option_file(".json", "{\"render\": {\"width\": 200}}");
        for (file, width) in [(toml_file, 400), (yaml_file, 300), (json_file, 200)] {
            let layer = read_option_file(file.path()).unwrap();
            assert_eq!(layer["render"]["width"], width);
        }
    }

    #[test]
    fn empty_yaml_file_is_an_empty_layer() {
        let file = option_file(".yml", "");
        assert_eq!(read_option_file(file.path()).unwrap(), Value::Object(Map::new()));
    }

    #[test]
    fn molecule_layer_overrides_project_layer() {
        let project = option_file(
            ".toml",
            "[camera]\ndistance = 25.0\ntheta = 30.0\n",
        );
        let structure = titled(&["{\"camera\": {\"distance\": 8.0}}"]);
        let options = resolve_options(
            Some(&MoleculeSource::InputTitle),
            Some(project.path()),
            &structure,
        )
        .unwrap();
        assert_eq!(options.camera.distance, 8.0);
        assert_eq!(options.camera.theta, 30.0);
        assert_eq!(options.camera.phi, 0.0);
    }

    #[test]
    fn extendable_maps_accept_new_elements() {
        let molecule = option_file(
            ".yml",
            "elements:\n  radii:\n    Fe: 0.6\n  colour_change:\n    C: Gray\n",
        );
        let options = resolve_options(
            Some(&MoleculeSource::File(molecule.path().to_owned())),
            None,
            &Structure::default(),
        )
        .unwrap();
        assert_eq!(options.elements.radius_of("Fe"), 0.6);
        assert_eq!(options.elements.radius_of("H"), 0.25);
        assert_eq!(options.elements.colour_of("C").unwrap(), "Gray");
    }

    #[test]
    fn new_element_texture_starts_from_default_texture() {
        let molecule = option_file(
            ".json",
            r#"{"elements": {"textures": {"O": {"finish": ["phong 1.0"]}}}}"#,
        );
        let options = resolve_options(
            Some(&MoleculeSource::File(molecule.path().to_owned())),
            None,
            &Structure::default(),
        )
        .unwrap();
        let texture = options.elements.texture_of("O");
        assert_eq!(texture.finish, vec!["phong 1.0".to_owned()]);
        assert!(texture.use_colour);
    }

    #[test]
    fn unknown_option_reports_its_location() {
        let project = option_file(".toml", "[camera]\nzoom = 2.0\n");
        let err = resolve_options(None, Some(project.path()), &Structure::default())
            .unwrap_err();
        match err {
            CcpovizError::OptionUpdate(e) => {
                assert_eq!(e.location(), "camera / zoom");
            }
            other => panic!("unexpected error {other}"),
        }
    }

    #[test]
    fn user_files_cannot_set_meta_options() {
        let project = option_file(
            ".yml",
            "elements:\n  texture:\n    finish...update: append\n",
        );
        let err = resolve_options(None, Some(project.path()), &Structure::default())
            .unwrap_err();
        match err {
            CcpovizError::OptionUpdate(e) => {
                assert_eq!(e.location(), "elements / texture");
                assert!(e.to_string().contains("meta-options"));
            }
            other => panic!("unexpected error {other}"),
        }
    }

    #[test]
    fn missing_option_file_is_an_io_error() {
        let err = resolve_options(
            None,
            Some(Path::new("/nonexistent/ccpoviz/project.toml")),
            &Structure::default(),
        )
        .unwrap_err();
        assert!(matches!(err, CcpovizError::Io(..)));
    }
}
