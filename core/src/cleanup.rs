use std::collections::HashSet;

use proc_macro2::{TokenStream, TokenTree};
use quote::ToTokens;
use syn::visit_mut::{self, VisitMut};

/// Collapse runs of more than one blank line to exactly one and strip
/// horizontal whitespace sitting alone between two line breaks.
///
/// Applied to rendered text before it is re-parsed; idempotent.
pub fn normalize_trivia(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut blanks = 0usize;
    for line in text.lines() {
        if line.trim().is_empty() {
            if blanks == 0 {
                out.push('\n');
            }
            blanks += 1;
        } else {
            out.push_str(line.trim_end());
            out.push('\n');
            blanks = 0;
        }
    }
    out
}

/// Rewrite bindings that a generated `match` arm introduces but never
/// reads.
///
/// An unused tuple-field binding becomes `_`; a tuple pattern whose
/// sub-patterns are all discards collapses to `Variant(..)`; unused
/// struct fields are removed in favor of `..`; an unused whole-value
/// capture `x @ pat` reduces to `pat`. A used binding is never touched
/// and payload arity is preserved while any sibling binding remains.
pub fn strip_dead_bindings(item: &mut syn::Item) {
    DeadBindings.visit_item_mut(item);
}

struct DeadBindings;

impl VisitMut for DeadBindings {
    fn visit_expr_match_mut(&mut self, node: &mut syn::ExprMatch) {
        // Children first, so nested matches settle before their
        // enclosing arm is counted.
        visit_mut::visit_expr_match_mut(self, node);
        for arm in &mut node.arms {
            rewrite_arm(arm);
        }
    }
}

fn rewrite_arm(arm: &mut syn::Arm) {
    let mut bound = Vec::new();
    collect_bindings(&arm.pat, &mut bound);
    if bound.is_empty() {
        return;
    }
    let mut tokens = arm.pat.to_token_stream();
    if let Some((_, guard)) = &arm.guard {
        tokens.extend(guard.to_token_stream());
    }
    tokens.extend(arm.body.to_token_stream());
    let dead: HashSet<String> = bound
        .into_iter()
        .filter(|name| occurrences(tokens.clone(), name) < 2)
        .collect();
    if dead.is_empty() {
        return;
    }
    clean_pat(&mut arm.pat, &dead);
}

fn collect_bindings(pat: &syn::Pat, out: &mut Vec<String>) {
    match pat {
        syn::Pat::Ident(pat) => {
            if is_binding(pat) {
                out.push(pat.ident.to_string());
            }
            if let Some((_, sub)) = &pat.subpat {
                collect_bindings(sub, out);
            }
        }
        syn::Pat::TupleStruct(pat) => pat.elems.iter().for_each(|p| collect_bindings(p, out)),
        syn::Pat::Struct(pat) => pat
            .fields
            .iter()
            .for_each(|field| collect_bindings(&field.pat, out)),
        syn::Pat::Tuple(pat) => pat.elems.iter().for_each(|p| collect_bindings(p, out)),
        syn::Pat::Slice(pat) => pat.elems.iter().for_each(|p| collect_bindings(p, out)),
        syn::Pat::Or(pat) => pat.cases.iter().for_each(|p| collect_bindings(p, out)),
        syn::Pat::Paren(pat) => collect_bindings(&pat.pat, out),
        syn::Pat::Reference(pat) => collect_bindings(&pat.pat, out),
        syn::Pat::Type(pat) => collect_bindings(&pat.pat, out),
        // Unrecognized pattern forms are left alone entirely.
        _ => {}
    }
}

/// A `PatIdent` is a binding unless it reads as a unit path: plain,
/// no sub-pattern, capitalized like `None` or a unit variant.
fn is_binding(pat: &syn::PatIdent) -> bool {
    if pat.by_ref.is_some() || pat.mutability.is_some() || pat.subpat.is_some() {
        return true;
    }
    !pat
        .ident
        .to_string()
        .starts_with(|c: char| c.is_ascii_uppercase())
}

/// Count how often `name` appears in the arm, token-wise. Inline
/// format captures like `"{name}"` inside literals count as a use.
fn occurrences(tokens: TokenStream, name: &str) -> usize {
    let mut count = 0;
    count_in(tokens, name, &mut count);
    count
}

fn count_in(tokens: TokenStream, name: &str, count: &mut usize) {
    let braced = format!("{{{name}}}");
    let braced_spec = format!("{{{name}:");
    for tt in tokens {
        match tt {
            TokenTree::Ident(ident) => {
                if ident == name {
                    *count += 1;
                }
            }
            TokenTree::Group(group) => count_in(group.stream(), name, count),
            TokenTree::Literal(lit) => {
                let text = lit.to_string();
                if text.contains(&braced) || text.contains(&braced_spec) {
                    *count += 1;
                }
            }
            TokenTree::Punct(_) => {}
        }
    }
}

fn clean_pat(pat: &mut syn::Pat, dead: &HashSet<String>) {
    match pat {
        syn::Pat::Ident(ident_pat) => {
            if is_binding(ident_pat) && dead.contains(&ident_pat.ident.to_string()) {
                match ident_pat.subpat.take() {
                    Some((_, sub)) => {
                        let mut sub = *sub;
                        clean_pat(&mut sub, dead);
                        *pat = sub;
                    }
                    None => *pat = wild(),
                }
            } else if let Some((_, sub)) = &mut ident_pat.subpat {
                clean_pat(sub, dead);
            }
        }
        syn::Pat::TupleStruct(tuple) => {
            for elem in tuple.elems.iter_mut() {
                clean_pat(elem, dead);
            }
            if !tuple.elems.is_empty() && tuple.elems.iter().all(is_discard) {
                tuple.elems = std::iter::once(rest()).collect();
            }
        }
        syn::Pat::Struct(strukt) => {
            for field in strukt.fields.iter_mut() {
                clean_pat(&mut field.pat, dead);
            }
            let before = strukt.fields.len();
            let kept: syn::punctuated::Punctuated<syn::FieldPat, syn::Token![,]> = strukt
                .fields
                .iter()
                .filter(|field| !matches!(&*field.pat, syn::Pat::Wild(_)))
                .cloned()
                .collect();
            if kept.len() < before {
                strukt.fields = kept;
                strukt.rest = Some(syn::PatRest {
                    attrs: Vec::new(),
                    dot2_token: Default::default(),
                });
            }
        }
        syn::Pat::Tuple(tuple) => {
            for elem in tuple.elems.iter_mut() {
                clean_pat(elem, dead);
            }
        }
        syn::Pat::Slice(slice) => {
            for elem in slice.elems.iter_mut() {
                clean_pat(elem, dead);
            }
        }
        // Alternatives are rewritten one by one; the separator list is
        // rebuilt with the pattern, so no dangling `|` can survive.
        syn::Pat::Or(or) => {
            for case in or.cases.iter_mut() {
                clean_pat(case, dead);
            }
        }
        syn::Pat::Paren(paren) => clean_pat(&mut paren.pat, dead),
        syn::Pat::Reference(reference) => clean_pat(&mut reference.pat, dead),
        syn::Pat::Type(typed) => clean_pat(&mut typed.pat, dead),
        _ => {}
    }
}

fn is_discard(pat: &syn::Pat) -> bool {
    matches!(pat, syn::Pat::Wild(_) | syn::Pat::Rest(_))
}

fn wild() -> syn::Pat {
    syn::Pat::Wild(syn::PatWild {
        attrs: Vec::new(),
        underscore_token: Default::default(),
    })
}

fn rest() -> syn::Pat {
    syn::Pat::Rest(syn::PatRest {
        attrs: Vec::new(),
        dot2_token: Default::default(),
    })
}
