//! Template source to node tree.
//!
//! Tags are `{{name}}`, `{{{name}}}`, `{{&name}}`, `{{#name}}`,
//! `{{^name}}`, `{{/name}}`, `{{! comment }}` and `{{>partial}}`. A section,
//! comment or partial tag alone on its line is standalone: the whole line,
//! newline included, is removed from the output. A standalone partial keeps
//! the line's leading whitespace as the indentation of its content.

use crate::error::CcpovizError;

const OPEN: &str = "{{";
const CLOSE: &str = "}}";
const TRIPLE_CLOSE: &str = "}}}";

/// A parsed template element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Node {
    /// Literal text.
    Text(String),
    /// Interpolation of a (possibly dotted) name.
    Variable(String),
    /// Section over a name; inverted sections render when it is falsy.
    Section {
        name: String,
        inverted: bool,
        children: Vec<Node>,
    },
    /// Inclusion of a named partial, each line prefixed with `indent`.
    Partial { name: String, indent: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TagKind {
    Variable,
    Section,
    Inverted,
    Close,
    Comment,
    Partial,
}

impl TagKind {
    fn can_stand_alone(self) -> bool {
        !matches!(self, Self::Variable)
    }
}

#[derive(Debug)]
enum Token {
    Text(String),
    Tag {
        kind: TagKind,
        name: String,
        indent: String,
        position: usize,
    },
}

fn error_at(source: &str, position: usize, msg: &str) -> CcpovizError {
    let line = source[..position].matches('\n').count() + 1;
    CcpovizError::Template(format!("line {line}: {msg}"))
}

fn is_blank(s: &str) -> bool {
    s.chars().all(|c| c == ' ' || c == '\t')
}

/// Read the tag opening at `start`; returns its kind, name and end offset.
fn read_tag(
    source: &str,
    start: usize,
) -> Result<(TagKind, String, usize), CcpovizError> {
    let body_start = start + OPEN.len();
    let (kind, sigil_len, close) = match source[body_start..].chars().next() {
        Some('{') => (TagKind::Variable, 1, TRIPLE_CLOSE),
        Some('&') => (TagKind::Variable, 1, CLOSE),
        Some('#') => (TagKind::Section, 1, CLOSE),
        Some('^') => (TagKind::Inverted, 1, CLOSE),
        Some('/') => (TagKind::Close, 1, CLOSE),
        Some('!') => (TagKind::Comment, 1, CLOSE),
        Some('>') => (TagKind::Partial, 1, CLOSE),
        Some('=') => {
            return Err(error_at(
                source,
                start,
                "delimiter changes are not supported",
            ))
        }
        _ => (TagKind::Variable, 0, CLOSE),
    };
    finish_tag(source, start, kind, body_start + sigil_len, close)
}

fn finish_tag(
    source: &str,
    start: usize,
    kind: TagKind,
    content_start: usize,
    close: &str,
) -> Result<(TagKind, String, usize), CcpovizError> {
    let Some(len) = source[content_start..].find(close) else {
        return Err(error_at(source, start, "unterminated tag"));
    };
    let name = source[content_start..content_start + len].trim();
    if name.is_empty() && kind != TagKind::Comment {
        return Err(error_at(source, start, "empty tag"));
    }
    Ok((kind, name.to_owned(), content_start + len + close.len()))
}

fn tokenize(source: &str) -> Result<Vec<Token>, CcpovizError> {
    let mut tokens = Vec::new();
    // Start of text not yet emitted.
    let mut text_start = 0;
    let mut search_from = 0;

    while let Some(found) = source[search_from..].find(OPEN) {
        let start = search_from + found;
        let (kind, name, end) = read_tag(source, start)?;

        let line_start = source[..start].rfind('\n').map_or(0, |i| i + 1);
        let line_end =
            source[end..].find('\n').map_or(source.len(), |i| end + i);
        let before = &source[line_start..start];
        let after = source[end..line_end].trim_end_matches('\r');
        let standalone = kind.can_stand_alone()
            && line_start >= text_start
            && is_blank(before)
            && is_blank(after);

        let (text_end, indent, next) = if standalone {
            let next = (line_end + 1).min(source.len());
            (line_start, before.to_owned(), next)
        } else {
            (start, String::new(), end)
        };
        if text_end > text_start {
            tokens.push(Token::Text(source[text_start..text_end].to_owned()));
        }
        tokens.push(Token::Tag {
            kind,
            name,
            indent,
            position: start,
        });
        text_start = next;
        search_from = next;
    }
    if text_start < source.len() {
        tokens.push(Token::Text(source[text_start..].to_owned()));
    }
    Ok(tokens)
}

/// An open section while building the tree.
struct Frame {
    name: String,
    inverted: bool,
    position: usize,
    children: Vec<Node>,
}

/// Parse template source into nodes.
pub(crate) fn parse(source: &str) -> Result<Vec<Node>, CcpovizError> {
    let mut root = Vec::new();
    let mut stack: Vec<Frame> = Vec::new();

    for token in tokenize(source)? {
        let node = match token {
            Token::Text(text) => Node::Text(text),
            Token::Tag {
                kind,
                name,
                indent,
                position,
            } => match kind {
                TagKind::Variable => Node::Variable(name),
                TagKind::Comment => continue,
                TagKind::Partial => Node::Partial { name, indent },
                TagKind::Section | TagKind::Inverted => {
                    stack.push(Frame {
                        name,
                        inverted: kind == TagKind::Inverted,
                        position,
                        children: Vec::new(),
                    });
                    continue;
                }
                TagKind::Close => {
                    let Some(frame) = stack.pop() else {
                        return Err(error_at(
                            source,
                            position,
                            &format!("closing tag {name} without a section"),
                        ));
                    };
                    if frame.name != name {
                        return Err(error_at(
                            source,
                            position,
                            &format!(
                                "closing tag {name} does not match section {}",
                                frame.name
                            ),
                        ));
                    }
                    Node::Section {
                        name: frame.name,
                        inverted: frame.inverted,
                        children: frame.children,
                    }
                }
            },
        };
        match stack.last_mut() {
            Some(frame) => frame.children.push(node),
            None => root.push(node),
        }
    }

    if let Some(frame) = stack.pop() {
        return Err(error_at(
            source,
            frame.position,
            &format!("section {} is not closed", frame.name),
        ));
    }
    Ok(root)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> Node {
        Node::Text(s.to_owned())
    }

    #[test]
    fn variables_in_text() {
        let nodes = parse("a {{x}} b {{{y}}} {{& z }}").unwrap();
        assert_eq!(
            nodes,
            vec![
                text("a "),
                Node::Variable("x".to_owned()),
                text(" b "),
                Node::Variable("y".to_owned()),
                text(" "),
                Node::Variable("z".to_owned()),
            ]
        );
    }

    #[test]
    fn standalone_section_lines_vanish() {
        let nodes = parse("begin\n  {{#items}}\n- {{.}}\n  {{/items}}\nend\n")
            .unwrap();
        assert_eq!(
            nodes,
            vec![
                text("begin\n"),
                Node::Section {
                    name: "items".to_owned(),
                    inverted: false,
                    children: vec![
                        text("- "),
                        Node::Variable(".".to_owned()),
                        text("\n"),
                    ],
                },
                text("end\n"),
            ]
        );
    }

    #[test]
    fn inline_section_keeps_surroundings() {
        let nodes = parse("[{{#a}}x{{/a}}]\n").unwrap();
        assert_eq!(nodes.len(), 3);
        assert_eq!(nodes[2], text("]\n"));
    }

    #[test]
    fn standalone_partial_records_indent() {
        let nodes = parse("a\n    {{> part }}\nb").unwrap();
        assert_eq!(
            nodes[1],
            Node::Partial {
                name: "part".to_owned(),
                indent: "    ".to_owned(),
            }
        );
        assert_eq!(nodes[2], text("b"));
    }

    #[test]
    fn comments_are_dropped() {
        let nodes = parse("{{! note }}\nx{{!inline}}y").unwrap();
        assert_eq!(nodes, vec![text("x"), text("y")]);
    }

    #[test]
    fn unclosed_section() {
        let err = parse("a\n{{#open}}\nb\n").unwrap_err();
        assert!(err.to_string().contains("line 2"));
        assert!(err.to_string().contains("not closed"));
    }

    #[test]
    fn mismatched_section() {
        let err = parse("{{#a}}{{/b}}").unwrap_err();
        assert!(err.to_string().contains("does not match"));
        assert!(parse("{{/a}}").is_err());
    }

    #[test]
    fn unterminated_tag() {
        let err = parse("a {{name").unwrap_err();
        assert!(err.to_string().contains("unterminated"));
    }

    #[test]
    fn delimiter_change_is_rejected() {
        assert!(parse("{{=<% %>=}}").is_err());
    }
}
