//! A small mustache engine for POV-Ray scene templates.
//!
//! Output is POV-Ray text, so nothing is HTML-escaped: `{{name}}` and
//! `{{{name}}}` are the same. The context is any serializable value; keys
//! are looked up in its JSON form.

mod parser;
mod render;

use std::collections::BTreeMap;
use std::path::Path;

use serde::Serialize;

use self::parser::Node;
use self::render::Renderer;
use crate::error::CcpovizError;

/// The built-in scene template.
pub const DEFAULT_TEMPLATE: &str =
    include_str!("../../templates/default.pov.mustache");

/// The built-in texture partial, included as `{{>texturedef}}`.
pub const TEXTUREDEF_PARTIAL: &str =
    include_str!("../../templates/texturedef.pov.mustache");

/// A parsed template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    nodes: Vec<Node>,
}

impl Template {
    /// Parse template source.
    pub fn parse(source: &str) -> Result<Self, CcpovizError> {
        Ok(Self {
            nodes: parser::parse(source)?,
        })
    }

    /// Render against a JSON context with the given partials.
    pub fn render(
        &self,
        context: &serde_json::Value,
        partials: &Partials,
    ) -> Result<String, CcpovizError> {
        Renderer {
            partials: &partials.0,
        }
        .render(&self.nodes, context)
    }
}

/// Named partials available to `{{>name}}` tags.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Partials(BTreeMap<String, Vec<Node>>);

impl Partials {
    /// Parse and register a partial, replacing one of the same name.
    pub fn insert(
        &mut self,
        name: impl Into<String>,
        source: &str,
    ) -> Result<(), CcpovizError> {
        let name = name.into();
        let nodes = parser::parse(source).map_err(|e| {
            CcpovizError::Template(format!("in partial {name}: {e}"))
        })?;
        let _ = self.0.insert(name, nodes);
        Ok(())
    }
}

/// A scene template with its partials.
#[derive(Debug, Clone)]
pub struct TemplateSet {
    main: Template,
    partials: Partials,
}

impl TemplateSet {
    fn builtin_partials() -> Result<Partials, CcpovizError> {
        let mut partials = Partials::default();
        partials.insert("texturedef", TEXTUREDEF_PARTIAL)?;
        Ok(partials)
    }

    /// The built-in template and partials.
    pub fn builtin() -> Result<Self, CcpovizError> {
        Ok(Self {
            main: Template::parse(DEFAULT_TEMPLATE)?,
            partials: Self::builtin_partials()?,
        })
    }

    /// A user template file with the built-in partials.
    pub fn from_file(path: &Path) -> Result<Self, CcpovizError> {
        let source = std::fs::read_to_string(path)
            .map_err(|e| CcpovizError::io(path, e))?;
        let main = Template::parse(&source).map_err(|e| {
            CcpovizError::Template(format!("{}: {e}", path.display()))
        })?;
        log::info!("using scene template {}", path.display());
        Ok(Self {
            main,
            partials: Self::builtin_partials()?,
        })
    }

    /// Render the template for a serializable context.
    pub fn render<C: Serialize + ?Sized>(
        &self,
        context: &C,
    ) -> Result<String, CcpovizError> {
        let context = serde_json::to_value(context)
            .map_err(|e| CcpovizError::Template(e.to_string()))?;
        self.main.render(&context, &self.partials)
    }
}
