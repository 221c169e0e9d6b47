//! A template driven code generation engine over enum declarations.
//!
//! Given an enum and one or more mustache-style templates, this crate
//! renders each template against the enum's cases and returns new
//! top-level declarations (methods, nested types) derived from them.
//! The proc-macro surface lives in the `casegen` crate; everything here
//! is an ordinary library so the engine is testable without a macro
//! harness.
//!
//! # Template surface
//!
//! * `{{expr}}` interpolates a value.
//! * `{{#expr}} .. {{/expr}}` iterates a list (rebinding the context to
//!   each element), gates on a boolean, or unwraps an optional.
//! * `{{^expr}} .. {{/expr}}` renders its body iff the expression is
//!   empty, absent or false.
//! * `name(arg)` dispatches the transform `name` on the evaluated
//!   argument; calls nest arbitrarily.
//!
//! There is no other control flow. The root context binds `cases` to
//! the list of case descriptors; bare names resolve on the current
//! context value first and then walk outward through the enclosing
//! sections.
//!
//! ```
//! # use casegen_core::{expand, ExpandInput, TemplateLiteral};
//! # use proc_macro2::Span;
//! let input: syn::DeriveInput = syn::parse_quote! {
//!     enum Fruit {
//!         Apple,
//!         Banana(String),
//!     }
//! };
//! let template = r#"
//! impl Fruit {
//!     pub fn case_name(&self) -> &'static str {
//!         match self {
//!             {{#cases}}
//!             Self::{{name}} { .. } => "{{name}}",
//!             {{/cases}}
//!         }
//!     }
//! }"#;
//! let output = expand(ExpandInput {
//!     input,
//!     templates: vec![TemplateLiteral {
//!         text: template.to_owned(),
//!         span: Span::call_site(),
//!     }],
//!     allowed_comments: None,
//! }).unwrap();
//! assert!(output.diagnostics.is_empty());
//! assert_eq!(output.items.len(), 1);
//! ```
//!
//! # Pipeline
//!
//! [`expand`] runs one invocation end to end:
//!
//! 1. the declaration model turns the enum's variants into immutable
//!    [`CaseDescriptor`]s, classifying every parameter type into a
//!    [`TypeShape`] along the way;
//! 2. the renderer evaluates each template against the case list,
//!    dispatching [`transform`] operations on [`Value`]s;
//! 3. the rendered text is normalized, re-parsed and cleaned up:
//!    bindings a generated `match` arm introduces but never reads are
//!    discarded or dropped.
//!
//! Rendering is best-effort. A structural problem (not an enum, no
//! templates) aborts the invocation; everything else is collected in a
//! per-invocation [`Diagnostics`] accumulator and a template that
//! recorded any diagnostic contributes no declarations, while its
//! siblings still render.
#![forbid(unsafe_code)]

mod cleanup;
mod diag;
mod error;
mod expand;
mod model;
mod render;
mod shape;
mod template;
mod transform;
mod value;

pub use cleanup::{normalize_trivia, strip_dead_bindings};
pub use diag::*;
pub use error::*;
pub use expand::*;
pub use model::{cases_from_input, CaseDescriptor, KeyValue, ParameterDescriptor};
pub use render::render;
pub use shape::{classify, TypeShape};
pub use template::*;
pub use transform::transform;
pub use value::Value;

/// Re-export of [`proc_macro2`]
pub use proc_macro2;
