use std::fmt::Display;

/// An expression inside `{{ }}` delimiters: a bare name, or a chain of
/// transform calls like `joined(namesAndTypes(parameters))`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expr {
    Name(String),
    Call(String, Box<Expr>),
}

impl Display for Expr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Expr::Name(name) => f.write_str(name),
            Expr::Call(name, arg) => write!(f, "{name}({arg})"),
        }
    }
}

/// One node of a parsed template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Text(String),
    Variable(Expr),
    Section(Expr, Vec<Node>),
    Inverted(Expr, Vec<Node>),
}

/// A parsed template, ready to render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    pub nodes: Vec<Node>,
}

#[derive(Debug, thiserror::Error)]
pub enum TemplateErrorKind {
    #[error("Unclosed `{{{{` delimiter.")]
    UnclosedDelimiter,
    #[error("Unclosed section `{0}`.")]
    UnclosedSection(String),
    #[error("`{{{{/{0}}}}}` does not close the innermost open section.")]
    UnmatchedClose(String),
    #[error("Invalid expression `{0}`.")]
    InvalidExpr(String),
}

/// A template parse failure with a best-effort position, computed from
/// the template's content lines.
#[derive(Debug, thiserror::Error)]
#[error("{kind}")]
pub struct TemplateError {
    pub kind: TemplateErrorKind,
    /// 1-based.
    pub line: usize,
    /// 1-based.
    pub column: usize,
}

impl Template {
    /// Parse the mustache-style surface: `{{ }}` variables,
    /// `{{# }}{{/ }}` sections and `{{^ }}{{/ }}` inverted sections.
    pub fn parse(source: &str) -> Result<Template, TemplateError> {
        // (expr, open tag offset, nodes) per open section; `None` expr
        // marks the root frame.
        let mut frames: Vec<(Option<(Expr, bool)>, usize, Vec<Node>)> =
            vec![(None, 0, Vec::new())];
        let mut rest = source;
        let mut offset = 0;
        loop {
            let Some(open) = rest.find("{{") else {
                if !rest.is_empty() {
                    frames.last_mut().unwrap().2.push(Node::Text(rest.to_owned()));
                }
                break;
            };
            if open > 0 {
                frames
                    .last_mut()
                    .unwrap()
                    .2
                    .push(Node::Text(rest[..open].to_owned()));
            }
            let tag_offset = offset + open;
            let after_open = &rest[open + 2..];
            let Some(close) = after_open.find("}}") else {
                return Err(error_at(
                    source,
                    tag_offset,
                    TemplateErrorKind::UnclosedDelimiter,
                ));
            };
            let tag = after_open[..close].trim();
            match tag.as_bytes().first() {
                Some(b'#') | Some(b'^') => {
                    let inverted = tag.starts_with('^');
                    let expr = parse_expr(source, tag_offset, &tag[1..])?;
                    frames.push((Some((expr, inverted)), tag_offset, Vec::new()));
                }
                Some(b'/') => {
                    let expr = parse_expr(source, tag_offset, &tag[1..])?;
                    let (header, _, nodes) = frames.pop().unwrap();
                    match header {
                        Some((open_expr, inverted)) if open_expr == expr => {
                            let node = if inverted {
                                Node::Inverted(open_expr, nodes)
                            } else {
                                Node::Section(open_expr, nodes)
                            };
                            frames.last_mut().unwrap().2.push(node);
                        }
                        _ => {
                            return Err(error_at(
                                source,
                                tag_offset,
                                TemplateErrorKind::UnmatchedClose(expr.to_string()),
                            ));
                        }
                    }
                }
                _ => {
                    let expr = parse_expr(source, tag_offset, tag)?;
                    frames.last_mut().unwrap().2.push(Node::Variable(expr));
                }
            }
            offset = tag_offset + 2 + close + 2;
            rest = &after_open[close + 2..];
        }
        match frames.pop().unwrap() {
            (None, _, nodes) => {
                debug_assert!(frames.is_empty());
                Ok(Template { nodes })
            }
            (Some((expr, _)), open_offset, _) => Err(error_at(
                source,
                open_offset,
                TemplateErrorKind::UnclosedSection(expr.to_string()),
            )),
        }
    }
}

fn parse_expr(source: &str, tag_offset: usize, text: &str) -> Result<Expr, TemplateError> {
    parse_expr_inner(text.trim())
        .ok_or_else(|| error_at(source, tag_offset, TemplateErrorKind::InvalidExpr(text.trim().to_owned())))
}

fn parse_expr_inner(text: &str) -> Option<Expr> {
    match text.find('(') {
        Some(open) => {
            if !text.ends_with(')') {
                return None;
            }
            let name = text[..open].trim();
            if !is_ident(name) {
                return None;
            }
            let arg = parse_expr_inner(text[open + 1..text.len() - 1].trim())?;
            Some(Expr::Call(name.to_owned(), Box::new(arg)))
        }
        None => is_ident(text).then(|| Expr::Name(text.to_owned())),
    }
}

fn is_ident(text: &str) -> bool {
    let mut chars = text.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

fn error_at(source: &str, offset: usize, kind: TemplateErrorKind) -> TemplateError {
    let before = &source[..offset.min(source.len())];
    let line = before.matches('\n').count() + 1;
    let column = before
        .rfind('\n')
        .map(|nl| offset - nl)
        .unwrap_or(offset + 1);
    TemplateError { kind, line, column }
}
