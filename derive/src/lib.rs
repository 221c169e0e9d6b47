//! See the documentation of [`casegen-core`](https://docs.rs/casegen-core/latest/casegen_core/)

use proc_macro_error::proc_macro_error;
mod args;

/// Renders mustache-style templates against the enum's cases and
/// attaches the generated declarations.
///
/// Templates are string literals carried by the `casegen` helper
/// attribute, rendered in order:
///
/// ```
/// # use casegen::CaseGen;
/// #[derive(CaseGen)]
/// #[casegen(r#"
/// impl Fruit {
///     pub fn case_name(&self) -> &'static str {
///         match self {
///             {{#cases}}
///             Self::{{name}} { .. } => "{{name}}",
///             {{/cases}}
///         }
///     }
/// }"#)]
/// enum Fruit {
///     Apple,
///     Banana(String),
/// }
///
/// assert_eq!(Fruit::Banana("cavendish".to_owned()).case_name(), "Banana");
/// ```
///
/// Attribute arguments:
/// * one or more template string literals, repeatable across
///   `#[casegen(..)]` attributes; at least one is required.
/// * `allowed_comments("key", ..)`:
///
/// Restrict the `key: value` annotations that variant doc comments may
/// carry. A key outside the list is reported on the offending comment,
/// with a note pointing back at the list.
#[proc_macro_error]
#[proc_macro_derive(CaseGen, attributes(casegen))]
pub fn case_gen(tokens: proc_macro::TokenStream) -> proc_macro::TokenStream {
    args::expand_derive(tokens.into()).into()
}
