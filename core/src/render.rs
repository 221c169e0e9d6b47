use proc_macro2::Span;

use crate::{
    transform,
    value::Section,
    Diagnostics, Expr, Node, Template, Value,
};

/// Render a parsed template against the root case list.
///
/// `span` is the originating template literal, used for any diagnostics
/// recorded during evaluation. Rendering is best-effort: absent values
/// interpolate as the empty string and the caller decides afterwards
/// whether recorded diagnostics disqualify the output.
pub fn render(template: &Template, root: &Value, span: Span, diags: &mut Diagnostics) -> String {
    let mut out = String::new();
    let mut stack = Vec::new();
    render_nodes(&template.nodes, &mut stack, root, span, diags, &mut out);
    out
}

fn render_nodes(
    nodes: &[Node],
    stack: &mut Vec<Value>,
    root: &Value,
    span: Span,
    diags: &mut Diagnostics,
    out: &mut String,
) {
    for node in nodes {
        match node {
            Node::Text(text) => out.push_str(text),
            Node::Variable(expr) => {
                if let Some(value) = eval(expr, stack, root, span, diags) {
                    out.push_str(&value.render_inline());
                }
            }
            Node::Section(expr, body) => match eval(expr, stack, root, span, diags) {
                None => {}
                Some(value) => match value.into_section() {
                    Section::Repeat(items) => {
                        for item in items {
                            stack.push(item);
                            render_nodes(body, stack, root, span, diags, out);
                            stack.pop();
                        }
                    }
                    Section::Gate(true) => {
                        render_nodes(body, stack, root, span, diags, out);
                    }
                    Section::Gate(false) => {}
                    Section::Scope(value) => {
                        stack.push(value);
                        render_nodes(body, stack, root, span, diags, out);
                        stack.pop();
                    }
                },
            },
            Node::Inverted(expr, body) => {
                let absent = match eval(expr, stack, root, span, diags) {
                    None => true,
                    Some(value) => !value.is_truthy(),
                };
                if absent {
                    render_nodes(body, stack, root, span, diags, out);
                }
            }
        }
    }
}

/// Evaluate an expression against the context stack. `None` means the
/// expression is absent; a missing bare name is silent, an unknown
/// transform has already been recorded by the dispatcher.
fn eval(
    expr: &Expr,
    stack: &[Value],
    root: &Value,
    span: Span,
    diags: &mut Diagnostics,
) -> Option<Value> {
    match expr {
        Expr::Name(name) => resolve(name, stack, root),
        Expr::Call(name, arg) => {
            let value = eval(arg, stack, root, span, diags)?;
            transform(value, name, span, diags)
        }
    }
}

/// Bare names resolve on the innermost context first, then walk
/// outward through the enclosing sections. The root context binds
/// `cases` to the case list.
fn resolve(name: &str, stack: &[Value], root: &Value) -> Option<Value> {
    for value in stack.iter().rev() {
        if let Some(found) = value.lookup(name) {
            return Some(found);
        }
    }
    (name == "cases").then(|| root.clone())
}
