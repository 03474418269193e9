//! Rendering a node tree against a JSON context.

use std::collections::BTreeMap;

use serde_json::Value;

use super::parser::Node;
use crate::error::CcpovizError;

/// Deepest partial inclusion before giving up on a recursive partial.
const MAX_PARTIAL_DEPTH: usize = 32;

/// Whether a section over `value` is skipped.
///
/// Missing values, `null`, `false`, zero, the empty string and the empty
/// list are falsy.
pub(crate) fn is_falsy(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null | Value::Bool(false)) => true,
        Some(Value::Number(n)) => n.as_f64() == Some(0.0),
        Some(Value::String(s)) => s.is_empty(),
        Some(Value::Array(items)) => items.is_empty(),
        Some(_) => false,
    }
}

/// Look a possibly dotted name up through the context stack.
///
/// The first segment is searched from the innermost context outwards; the
/// remaining segments are resolved from there only.
fn lookup<'a>(stack: &[&'a Value], name: &str) -> Option<&'a Value> {
    if name == "." {
        return stack.last().copied();
    }
    let mut segments = name.split('.');
    let first = segments.next()?;
    let found = stack.iter().rev().find_map(|ctx| ctx.get(first))?;
    segments.try_fold(found, |value, key| value.get(key))
}

fn to_text(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

/// Prefix every line of `text` with `indent`.
fn indent_lines(text: &str, indent: &str) -> String {
    if indent.is_empty() {
        return text.to_owned();
    }
    text.split_inclusive('\n')
        .map(|line| format!("{indent}{line}"))
        .collect()
}

/// Renders nodes, looking partials up by name.
pub(crate) struct Renderer<'p> {
    pub(crate) partials: &'p BTreeMap<String, Vec<Node>>,
}

impl Renderer<'_> {
    pub(crate) fn render(
        &self,
        nodes: &[Node],
        context: &Value,
    ) -> Result<String, CcpovizError> {
        let mut out = String::new();
        self.render_into(nodes, &mut vec![context], 0, &mut out)?;
        Ok(out)
    }

    fn render_into<'a>(
        &self,
        nodes: &[Node],
        stack: &mut Vec<&'a Value>,
        depth: usize,
        out: &mut String,
    ) -> Result<(), CcpovizError> {
        for node in nodes {
            match node {
                Node::Text(text) => out.push_str(text),
                Node::Variable(name) => {
                    out.push_str(&to_text(lookup(stack, name)));
                }
                Node::Section {
                    name,
                    inverted,
                    children,
                } => {
                    let value = lookup(stack, name);
                    match (value, *inverted) {
                        (_, true) => {
                            if is_falsy(value) {
                                self.render_into(children, stack, depth, out)?;
                            }
                        }
                        (Some(Value::Array(items)), false) => {
                            for item in items {
                                stack.push(item);
                                self.render_into(children, stack, depth, out)?;
                                let _ = stack.pop();
                            }
                        }
                        (Some(value), false) if !is_falsy(Some(value)) => {
                            stack.push(value);
                            self.render_into(children, stack, depth, out)?;
                            let _ = stack.pop();
                        }
                        _ => {}
                    }
                }
                Node::Partial { name, indent } => {
                    let Some(partial) = self.partials.get(name) else {
                        return Err(CcpovizError::Template(format!(
                            "unknown partial {name}"
                        )));
                    };
                    if depth >= MAX_PARTIAL_DEPTH {
                        return Err(CcpovizError::Template(format!(
                            "partial {name} nests deeper than {MAX_PARTIAL_DEPTH}"
                        )));
                    }
                    let mut included = String::new();
                    self.render_into(partial, stack, depth + 1, &mut included)?;
                    out.push_str(&indent_lines(&included, indent));
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::super::parser::parse;
    use super::*;

    fn render_with(
        source: &str,
        context: &Value,
        partials: &[(&str, &str)],
    ) -> Result<String, CcpovizError> {
        let partials = partials
            .iter()
            .map(|(name, src)| Ok(((*name).to_owned(), parse(src)?)))
            .collect::<Result<BTreeMap<_, _>, CcpovizError>>()?;
        Renderer {
            partials: &partials,
        }
        .render(&parse(source)?, context)
    }

    fn render(source: &str, context: &Value) -> String {
        render_with(source, context, &[]).unwrap()
    }

    #[test]
    fn interpolation_is_not_escaped() {
        let ctx = json!({"v": "<1, 2, 3>", "n": 5, "b": true});
        assert_eq!(render("{{v}} {{{v}}} {{&v}}", &ctx), "<1, 2, 3> <1, 2, 3> <1, 2, 3>");
        assert_eq!(render("{{n}} {{b}} [{{missing}}]", &ctx), "5 true []");
    }

    #[test]
    fn dotted_names() {
        let ctx = json!({"a": {"b": {"c": "deep"}}, "c": "top"});
        assert_eq!(render("{{a.b.c}}", &ctx), "deep");
        assert_eq!(render("[{{a.x.c}}]", &ctx), "[]");
    }

    #[test]
    fn falsy_values_skip_sections() {
        for falsy in [json!(null), json!(false), json!(0), json!(""), json!([])] {
            let ctx = json!({"x": falsy});
            assert_eq!(render("{{#x}}shown{{/x}}", &ctx), "");
            assert_eq!(render("{{^x}}hidden{{/x}}", &ctx), "hidden");
        }
        assert_eq!(render("{{#nope}}shown{{/nope}}", &json!({})), "");
    }

    #[test]
    fn lists_iterate_and_objects_push_context() {
        let ctx = json!({
            "items": [{"name": "a"}, {"name": "b"}],
            "outer": "o",
            "obj": {"name": "inner"},
        });
        assert_eq!(render("{{#items}}{{name}}{{outer}};{{/items}}", &ctx), "ao;bo;");
        assert_eq!(render("{{#obj}}{{name}}{{/obj}}", &ctx), "inner");
        assert_eq!(render("{{#items}}{{^name}}none{{/name}}{{/items}}", &ctx), "");
    }

    #[test]
    fn scalar_section_keeps_value_as_dot() {
        let ctx = json!({"adaptive": 2});
        assert_eq!(render("{{#adaptive}}adaptive {{.}}{{/adaptive}}", &ctx), "adaptive 2");
    }

    #[test]
    fn standalone_lines_are_removed() {
        let ctx = json!({"lines": ["x", "y"]});
        let src = "block {\n  {{#lines}}\n  {{.}}\n  {{/lines}}\n}\n";
        assert_eq!(render(src, &ctx), "block {\n  x\n  y\n}\n");
    }

    #[test]
    fn partials_are_indented() {
        let ctx = json!({"finish": ["phong 0.6", "ambient 0.2"]});
        let out = render_with(
            "sphere {\n  {{>tex}}\n}\n",
            &ctx,
            &[("tex", "finish {\n{{#finish}}\n  {{.}}\n{{/finish}}\n}\n")],
        )
        .unwrap();
        assert_eq!(
            out,
            "sphere {\n  finish {\n    phong 0.6\n    ambient 0.2\n  }\n}\n"
        );
    }

    #[test]
    fn unknown_partial_is_an_error() {
        let err = render_with("{{>nope}}", &json!({}), &[]).unwrap_err();
        assert!(err.to_string().contains("unknown partial nope"));
    }

    #[test]
    fn recursive_partial_is_bounded() {
        let err = render_with("{{>me}}", &json!({}), &[("me", "{{>me}}")])
            .unwrap_err();
        assert!(err.to_string().contains("nests deeper"));
    }
}
