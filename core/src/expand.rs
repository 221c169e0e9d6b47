use proc_macro2::Span;

use crate::{
    cleanup::{normalize_trivia, strip_dead_bindings},
    model::{cases_from_input, doc_lines},
    render::render,
    Diagnostic, Diagnostics, ExpandError, ExpandErrorKind, KeyValue, Template, Value,
};

/// One template argument, paired with the span of its originating
/// string literal for diagnostic mapping.
#[derive(Debug, Clone)]
pub struct TemplateLiteral {
    pub text: String,
    pub span: Span,
}

/// The optional allow-list of comment keys, with its declaration site.
#[derive(Debug, Clone)]
pub struct AllowedComments {
    pub keys: Vec<String>,
    pub span: Span,
}

/// Everything one expansion consumes.
pub struct ExpandInput {
    pub input: syn::DeriveInput,
    pub templates: Vec<TemplateLiteral>,
    pub allowed_comments: Option<AllowedComments>,
}

/// Generated top-level items plus the diagnostics to relay.
pub struct ExpandOutput {
    pub items: Vec<syn::Item>,
    pub diagnostics: Vec<Diagnostic>,
}

/// Run one full expansion: build descriptors, render every template,
/// clean the rendered output and collect the surviving declarations.
///
/// Structural failures return `Err` and abort the invocation. Anything
/// else accumulates as diagnostics: a template either contributes
/// declarations or diagnostics, never both, and one template's failure
/// does not stop its siblings.
pub fn expand(input: ExpandInput) -> Result<ExpandOutput, ExpandError> {
    let cases = cases_from_input(&input.input)?;
    if input.templates.is_empty() {
        return Err(ExpandError::new(
            ExpandErrorKind::NoArguments,
            input.input.ident.span(),
        ));
    }

    let mut diags = Diagnostics::new();
    if let Some(allowed) = &input.allowed_comments {
        check_comment_policy(&input.input, allowed, &mut diags);
    }

    let root = Value::Cases(cases);
    let mut items = Vec::new();
    for literal in &input.templates {
        diags.begin_template();
        let template = match Template::parse(&literal.text) {
            Ok(template) => template,
            Err(err) => {
                diags.push(Diagnostic::error(
                    literal.span,
                    format!(
                        "Template failed to parse: {} (line {}, column {})",
                        err, err.line, err.column
                    ),
                ));
                continue;
            }
        };
        let rendered = render(&template, &root, literal.span, &mut diags);
        if diags.has_template_diagnostics() {
            // Best-effort output with recorded problems is withheld.
            continue;
        }
        let cleaned = normalize_trivia(&rendered);
        match syn::parse_file(&cleaned) {
            Ok(file) => {
                for mut item in file.items {
                    strip_dead_bindings(&mut item);
                    items.push(item);
                }
            }
            Err(err) => {
                diags.push(Diagnostic::error(
                    literal.span,
                    rendered_error_message(&err, &cleaned, &literal.text),
                ));
            }
        }
    }
    Ok(ExpandOutput {
        items,
        diagnostics: diags.into_vec(),
    })
}

/// With a non-empty allow-list, an unknown comment key is an error on
/// the offending doc line, with a note at the allow-list declaration.
fn check_comment_policy(
    input: &syn::DeriveInput,
    allowed: &AllowedComments,
    diags: &mut Diagnostics,
) {
    if allowed.keys.is_empty() {
        return;
    }
    let syn::Data::Enum(data) = &input.data else {
        return;
    };
    for variant in &data.variants {
        for attr in variant.attrs.iter().filter(|a| a.path().is_ident("doc")) {
            for line in doc_lines(std::slice::from_ref(attr)) {
                let Some(kv) = KeyValue::parse(&line) else {
                    continue;
                };
                if !allowed.keys.contains(&kv.key) {
                    diags.push(
                        Diagnostic::error(
                            attr_span(attr),
                            format!("Comment key `{}` is not allowed.", kv.key),
                        )
                        .with_note(allowed.span, "The allowed comment keys are declared here."),
                    );
                }
            }
        }
    }
}

fn attr_span(attr: &syn::Attribute) -> Span {
    use syn::spanned::Spanned;
    attr.span()
}

/// Map a parse failure in rendered text back to the template, best
/// effort: if the failing rendered line matches a template content
/// line the message names that line, otherwise it names the rendered
/// line and the diagnostic stays on the whole literal.
fn rendered_error_message(err: &syn::Error, rendered: &str, template: &str) -> String {
    let line = err.span().start().line;
    let rendered_line = rendered
        .lines()
        .nth(line.saturating_sub(1))
        .map(str::trim)
        .unwrap_or("");
    let template_line = if rendered_line.is_empty() {
        None
    } else {
        template
            .lines()
            .position(|l| l.trim() == rendered_line)
            .map(|position| position + 1)
    };
    match template_line {
        Some(template_line) => format!(
            "Rendered output is not a valid declaration ({err}); likely from template line {template_line}."
        ),
        None => format!(
            "Rendered output is not a valid declaration ({err}) at rendered line {line}."
        ),
    }
}
