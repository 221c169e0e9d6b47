use casegen_core::{
    expand, AllowedComments, Diagnostic, ExpandErrorKind, ExpandInput, Severity, TemplateLiteral,
};
use proc_macro2::{Delimiter, TokenStream, TokenTree};
use proc_macro_error::{abort, Diagnostic as HostDiagnostic, Level};
use quote::quote;
use syn::DeriveInput;

pub fn expand_derive(tokens: TokenStream) -> TokenStream {
    let ast: DeriveInput = match syn::parse2(tokens) {
        Ok(ast) => ast,
        Err(err) => abort!(err.span(), "{}", err),
    };

    let mut templates = Vec::new();
    let mut allowed_comments = None;
    for attr in &ast.attrs {
        if let syn::Meta::List(list) = &attr.meta {
            if list.path.is_ident("casegen") {
                parse_args(list.tokens.clone(), &mut templates, &mut allowed_comments);
            }
        }
    }

    let output = match expand(ExpandInput {
        input: ast,
        templates,
        allowed_comments,
    }) {
        Ok(output) => output,
        Err(err) => abort!(err.span, "{}", err),
    };

    for diagnostic in output.diagnostics {
        emit(diagnostic);
    }
    let items = output.items;
    quote!(#(#items)*)
}

/// Arguments of one `#[casegen(..)]` attribute: template string
/// literals and/or `allowed_comments("key", ..)`, comma separated.
fn parse_args(
    tokens: TokenStream,
    templates: &mut Vec<TemplateLiteral>,
    allowed_comments: &mut Option<AllowedComments>,
) {
    let mut iter = tokens.into_iter();
    loop {
        match iter.next() {
            None => return,
            Some(TokenTree::Ident(ident)) if ident == "allowed_comments" => {
                match iter.next() {
                    Some(TokenTree::Group(group))
                        if group.delimiter() == Delimiter::Parenthesis =>
                    {
                        *allowed_comments = Some(AllowedComments {
                            keys: parse_keys(group.stream()),
                            span: ident.span(),
                        });
                    }
                    Some(tt) => abort!(tt.span(), "Expected `(..)` after `allowed_comments`."),
                    None => abort!(ident.span(), "Expected `(..)` after `allowed_comments`."),
                }
            }
            Some(tt) => {
                if let Ok(lit) = litrs::StringLit::try_from(&tt) {
                    templates.push(TemplateLiteral {
                        text: lit.into_value().into_owned(),
                        span: tt.span(),
                    });
                } else {
                    abort!(
                        tt.span(),
                        "Expected a template string literal or `allowed_comments(..)`."
                    )
                }
            }
        }
        match iter.next() {
            Some(TokenTree::Punct(p)) if p.as_char() == ',' => (),
            None => return,
            Some(tt) => abort!(tt.span(), r#"Expected `,`"#),
        }
    }
}

fn parse_keys(tokens: TokenStream) -> Vec<String> {
    let mut keys = Vec::new();
    let mut iter = tokens.into_iter();
    loop {
        match iter.next() {
            None => return keys,
            Some(tt) => {
                if let Ok(lit) = litrs::StringLit::try_from(&tt) {
                    keys.push(lit.into_value().into_owned());
                } else {
                    abort!(tt.span(), "{}", ExpandErrorKind::ExpectedStringLiteral)
                }
            }
        }
        match iter.next() {
            Some(TokenTree::Punct(p)) if p.as_char() == ',' => (),
            None => return keys,
            Some(tt) => abort!(tt.span(), r#"Expected `,`"#),
        }
    }
}

/// Relay one engine diagnostic through `proc_macro_error`.
///
/// Informational severity maps to a warning, attached notes to
/// `span_note`.
fn emit(diagnostic: Diagnostic) {
    let level = match diagnostic.severity {
        Severity::Error => Level::Error,
        Severity::Note => Level::Warning,
    };
    let mut out = HostDiagnostic::spanned(diagnostic.span, level, diagnostic.message);
    for (span, note) in diagnostic.notes {
        out = out.span_note(span, note);
    }
    out.emit();
}
