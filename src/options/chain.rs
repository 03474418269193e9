//! Chaining layered option trees.
//!
//! Options come from several scopes (built-in defaults, project file,
//! molecule file). Each later scope patches the tree of the earlier ones
//! while being verified against it: the default tree fixes both the default
//! values and the types.
//!
//! A tree is made of atoms (numbers, booleans, strings), uniform lists and
//! maps keyed by strings. How a node is patched is controlled by
//! meta-options, sibling keys named `<option>...<meta>`:
//!
//! - `update`: for lists `overwrite` (default), `prepend`, `append` or
//!   `unique`; for maps `modify` (default, unknown keys are rejected) or
//!   `extend` (new keys are accepted and built from a prototype).
//! - `coercion`: convert a mismatching atom to the type of the existing one.
//! - `prototype` / `prototype-key`: the basis for new list items or map
//!   entries, given literally or as a key into the existing node. The
//!   prototype's own meta-options live under `<option>...prototype...<meta>`.
//!
//! The meta-options of the root map use an empty option name, e.g.
//! `...update`.

use std::fmt;

use serde_json::{Map, Number, Value};

use crate::error::CcpovizError;

/// Separator between an option name and a meta-option tag.
pub const DEFAULT_SEPARATOR: &str = "...";

/// Meta-option tag naming the prototype of new entries.
pub const DEFAULT_PROTO_TAG: &str = "prototype";

/// One step on the path from the root of an option tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TagSegment {
    /// Map key.
    Key(String),
    /// List position.
    Index(usize),
}

impl TagSegment {
    fn key(k: &str) -> Self {
        Self::Key(k.to_owned())
    }
}

impl fmt::Display for TagSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Key(k) => f.write_str(k),
            Self::Index(i) => write!(f, "{i}"),
        }
    }
}

/// A user option that cannot be patched onto the defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateError {
    /// Location of the offending node, prototype layers included.
    pub tag: Vec<TagSegment>,
    /// What went wrong.
    pub message: String,
    proto_tag: String,
}

impl UpdateError {
    /// Location of the error as the user wrote it, prototype layers removed.
    #[must_use]
    pub fn location(&self) -> String {
        self.tag
            .iter()
            .filter(|seg| !matches!(seg, TagSegment::Key(k) if *k == self.proto_tag))
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(" / ")
    }
}

impl fmt::Display for UpdateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "At option setting / {} / error occurred since {}",
            self.location(),
            self.message
        )
    }
}

impl std::error::Error for UpdateError {}

/// How a list option is patched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListUpdate {
    /// Replace the old list.
    Overwrite,
    /// Put the new items before the old ones.
    Prepend,
    /// Put the new items after the old ones.
    Append,
    /// Merge, keeping the first occurrence of each atom.
    Unique,
}

/// How a map option is patched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MapUpdate {
    /// Patch existing keys, reject new ones.
    Modify,
    /// Patch existing keys, add new ones from the prototype.
    Extend,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum NodeType {
    Number,
    Bool,
    String,
    List,
    Map,
}

impl NodeType {
    fn of(value: &Value) -> Option<Self> {
        match value {
            Value::Null => None,
            Value::Bool(_) => Some(Self::Bool),
            Value::Number(_) => Some(Self::Number),
            Value::String(_) => Some(Self::String),
            Value::Array(_) => Some(Self::List),
            Value::Object(_) => Some(Self::Map),
        }
    }

    fn is_atom(self) -> bool {
        matches!(self, Self::Number | Self::Bool | Self::String)
    }

    fn name(self) -> &'static str {
        match self {
            Self::Number => "number",
            Self::Bool => "boolean",
            Self::String => "string",
            Self::List => "list",
            Self::Map => "map",
        }
    }
}

fn default_error(msg: String) -> CcpovizError {
    CcpovizError::DefaultOptions(msg)
}

/// Convert an atom to another atomic type, if it has a sensible reading.
fn coerce(value: &Value, target: NodeType) -> Option<Value> {
    match (target, value) {
        (NodeType::Number, Value::String(s)) => s
            .trim()
            .parse::<f64>()
            .ok()
            .and_then(Number::from_f64)
            .map(Value::Number),
        (NodeType::String, Value::Number(n)) => Some(Value::String(n.to_string())),
        (NodeType::String, Value::Bool(b)) => Some(Value::String(b.to_string())),
        (NodeType::Bool, Value::String(s)) => {
            match s.trim().to_ascii_lowercase().as_str() {
                "true" | "yes" | "on" => Some(Value::Bool(true)),
                "false" | "no" | "off" => Some(Value::Bool(false)),
                _ => None,
            }
        }
        _ => None,
    }
}

fn last_key(tag: &[TagSegment]) -> String {
    tag.last().map_or_else(String::new, ToString::to_string)
}

/// Option tree chainer.
///
/// The fields hold the separator, the prototype tag and the fallbacks used
/// when a node has no meta-options of its own.
#[derive(Debug, Clone)]
pub struct ChainOptions {
    /// Separator between option and meta-option tags.
    pub separator: String,
    /// Tag of the prototype meta-option.
    pub proto_tag: String,
    /// List update when no `update` meta-option is given.
    pub default_list_update: ListUpdate,
    /// Map update when no `update` meta-option is given.
    pub default_map_update: MapUpdate,
    /// Whether atoms are coerced when no `coercion` meta-option is given.
    pub default_coercion: bool,
}

impl Default for ChainOptions {
    fn default() -> Self {
        Self {
            separator: DEFAULT_SEPARATOR.to_owned(),
            proto_tag: DEFAULT_PROTO_TAG.to_owned(),
            default_list_update: ListUpdate::Overwrite,
            default_map_update: MapUpdate::Modify,
            default_coercion: false,
        }
    }
}

type Prototype = Option<(Value, Map<String, Value>)>;

impl ChainOptions {
    /// Chain option trees together.
    ///
    /// `layers` are ordered by precedence: the first wins, the last is the
    /// default tree every other layer is verified against.
    pub fn chain(&self, layers: &[Value]) -> Result<Value, CcpovizError> {
        let Some((defaults, overrides)) = layers.split_last() else {
            return Err(default_error("no option layers given".to_owned()));
        };
        overrides
            .iter()
            .rev()
            .try_fold(defaults.clone(), |acc, layer| {
                let context = acc.as_object().cloned().ok_or_else(|| {
                    default_error("the root of the options must be a map".to_owned())
                })?;
                self.update_node(&acc, layer, &[], &context)
            })
    }

    /// Remove every meta-option from a chained tree.
    pub fn strip_meta(&self, value: &mut Value) {
        match value {
            Value::Object(map) => {
                map.retain(|k, _| !k.contains(&self.separator));
                map.values_mut().for_each(|v| self.strip_meta(v));
            }
            Value::Array(items) => {
                items.iter_mut().for_each(|v| self.strip_meta(v));
            }
            _ => {}
        }
    }

    fn meta<'a>(
        &self,
        context: &'a Map<String, Value>,
        key: &str,
        meta: &str,
    ) -> Option<&'a Value> {
        context.get(&format!("{key}{}{meta}", self.separator))
    }

    fn update_error(&self, tag: &[TagSegment], message: impl Into<String>) -> CcpovizError {
        CcpovizError::OptionUpdate(UpdateError {
            tag: tag.to_vec(),
            message: message.into(),
            proto_tag: self.proto_tag.clone(),
        })
    }

    fn type_error(&self, tag: &[TagSegment], expected: NodeType) -> CcpovizError {
        self.update_error(
            tag,
            format!("a value of type {} is expected", expected.name()),
        )
    }

    fn list_update(
        &self,
        context: &Map<String, Value>,
        key: &str,
    ) -> Result<ListUpdate, CcpovizError> {
        let Some(raw) = self.meta(context, key, "update") else {
            return Ok(self.default_list_update);
        };
        match raw.as_str() {
            Some("overwrite") => Ok(ListUpdate::Overwrite),
            Some("prepend") => Ok(ListUpdate::Prepend),
            Some("append") => Ok(ListUpdate::Append),
            Some("unique") => Ok(ListUpdate::Unique),
            _ => Err(default_error(format!(
                "invalid list update value {raw} for {key}"
            ))),
        }
    }

    fn map_update(
        &self,
        context: &Map<String, Value>,
        key: &str,
    ) -> Result<MapUpdate, CcpovizError> {
        let Some(raw) = self.meta(context, key, "update") else {
            return Ok(self.default_map_update);
        };
        match raw.as_str() {
            Some("modify") => Ok(MapUpdate::Modify),
            Some("extend") => Ok(MapUpdate::Extend),
            _ => Err(default_error(format!(
                "invalid map update value {raw} for {key}"
            ))),
        }
    }

    /// Find the basis for new entries of the node `key` in `context`.
    ///
    /// Returns the prototype together with the virtual context holding the
    /// prototype's meta-options, or `None` when the node is empty and no
    /// prototype is declared.
    fn prototype(
        &self,
        key: &str,
        context: &Map<String, Value>,
        existing: &Value,
    ) -> Result<Prototype, CcpovizError> {
        let sep = &self.separator;
        let proto_meta = format!("{key}{sep}{}", self.proto_tag);
        let key_meta = format!("{proto_meta}-key");

        let proto = match (context.get(&proto_meta), context.get(&key_meta)) {
            (Some(_), Some(_)) => {
                return Err(default_error(format!(
                    "meta-setting {key_meta} duplicates with {proto_meta}"
                )))
            }
            (Some(proto), None) => Some(proto.clone()),
            (None, Some(index)) => {
                let found = match (existing, index) {
                    (Value::Object(map), Value::String(k)) => map.get(k),
                    (Value::Array(items), Value::Number(n)) => n
                        .as_u64()
                        .and_then(|i| usize::try_from(i).ok())
                        .and_then(|i| items.get(i)),
                    _ => None,
                };
                Some(found.cloned().ok_or_else(|| {
                    default_error(format!(
                        "the prototype key {index} cannot be found for {key}"
                    ))
                })?)
            }
            (None, None) => match existing {
                Value::Array(items) => items.first().cloned(),
                Value::Object(map) => map.values().next().cloned(),
                _ => None,
            },
        };

        let Some(proto) = proto else {
            return Ok(None);
        };
        let virtual_prefix = format!("{proto_meta}{sep}");
        let strip = key.len() + sep.len();
        let virtual_context = context
            .iter()
            .filter(|(k, _)| k.starts_with(&virtual_prefix))
            .map(|(k, v)| (k[strip..].to_owned(), v.clone()))
            .collect();
        Ok(Some((proto, virtual_context)))
    }

    fn update_atom(
        &self,
        existing_type: NodeType,
        new: &Value,
        tag: &[TagSegment],
        context: &Map<String, Value>,
    ) -> Result<Value, CcpovizError> {
        if NodeType::of(new) == Some(existing_type) {
            return Ok(new.clone());
        }
        let coercion = self
            .meta(context, &last_key(tag), "coercion")
            .and_then(Value::as_bool)
            .unwrap_or(self.default_coercion);
        if coercion {
            if let Some(coerced) = coerce(new, existing_type) {
                return Ok(coerced);
            }
        }
        Err(self.type_error(tag, existing_type))
    }

    fn update_list(
        &self,
        existing: &[Value],
        new: &Value,
        tag: &[TagSegment],
        context: &Map<String, Value>,
    ) -> Result<Value, CcpovizError> {
        let Value::Array(new_items) = new else {
            return Err(self.type_error(tag, NodeType::List));
        };
        let key = last_key(tag);

        let updated = if new_items.is_empty() {
            Vec::new()
        } else {
            let existing_value = Value::Array(existing.to_vec());
            match self.prototype(&key, context, &existing_value)? {
                Some((proto, proto_context)) => new_items
                    .iter()
                    .enumerate()
                    .map(|(n, item)| {
                        let mut item_tag = tag.to_vec();
                        item_tag.push(TagSegment::Index(n));
                        item_tag.push(TagSegment::key(&self.proto_tag));
                        self.update_node(&proto, item, &item_tag, &proto_context)
                    })
                    .collect::<Result<Vec<_>, _>>()?,
                // Nothing to verify against; the typed layer checks them.
                None => new_items.clone(),
            }
        };

        let merged = match self.list_update(context, &key)? {
            ListUpdate::Overwrite => updated,
            ListUpdate::Prepend => {
                updated.into_iter().chain(existing.iter().cloned()).collect()
            }
            ListUpdate::Append => {
                existing.iter().cloned().chain(updated).collect()
            }
            ListUpdate::Unique => {
                let mut merged: Vec<Value> = Vec::new();
                for item in existing.iter().chain(updated.iter()) {
                    if !NodeType::of(item).is_some_and(NodeType::is_atom) {
                        return Err(default_error(format!(
                            "update method `unique` for {key} is for atom lists only"
                        )));
                    }
                    if !merged.contains(item) {
                        merged.push(item.clone());
                    }
                }
                merged
            }
        };
        Ok(Value::Array(merged))
    }

    fn update_map(
        &self,
        existing: &Map<String, Value>,
        new: &Value,
        tag: &[TagSegment],
        context: &Map<String, Value>,
    ) -> Result<Value, CcpovizError> {
        let Value::Object(new_map) = new else {
            return Err(self.type_error(tag, NodeType::Map));
        };
        let key = last_key(tag);
        let update = self.map_update(context, &key)?;

        let mut proto: Option<Prototype> = None;
        let mut result = existing.clone();
        for (k, v) in new_map {
            if k.contains(&self.separator) {
                return Err(self.update_error(
                    tag,
                    "users are not supposed to taint meta-options",
                ));
            }
            let mut child_tag = tag.to_vec();
            child_tag.push(TagSegment::key(k));

            let value = if let Some(old) = existing.get(k) {
                self.update_node(old, v, &child_tag, existing)?
            } else if update == MapUpdate::Extend {
                if proto.is_none() {
                    let existing_value = Value::Object(existing.clone());
                    proto = Some(self.prototype(&key, context, &existing_value)?);
                }
                match &proto {
                    Some(Some((basis, proto_context))) => {
                        child_tag.push(TagSegment::key(&self.proto_tag));
                        self.update_node(basis, v, &child_tag, proto_context)?
                    }
                    _ => v.clone(),
                }
            } else {
                return Err(self.update_error(&child_tag, "invalid option"));
            };
            let _ = result.insert(k.clone(), value);
        }
        Ok(Value::Object(result))
    }

    /// Patch `existing` with `new`, returning the updated node.
    ///
    /// `tag` locates the node for error reports and its last segment names
    /// the node in `context`, the map holding its meta-options.
    fn update_node(
        &self,
        existing: &Value,
        new: &Value,
        tag: &[TagSegment],
        context: &Map<String, Value>,
    ) -> Result<Value, CcpovizError> {
        match existing {
            Value::Array(items) => self.update_list(items, new, tag, context),
            Value::Object(map) => self.update_map(map, new, tag, context),
            other => {
                let Some(existing_type) = NodeType::of(other) else {
                    let location: Vec<String> =
                        tag.iter().map(ToString::to_string).collect();
                    return Err(default_error(format!(
                        "null default for option {}",
                        location.join(" / ")
                    )));
                };
                self.update_atom(existing_type, new, tag, context)
            }
        }
    }
}
