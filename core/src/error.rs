use std::fmt::{Debug, Display};

use proc_macro2::Span;

/// Fatal failures that abort a whole expansion.
#[derive(Debug, thiserror::Error)]
pub enum ExpandErrorKind {
    #[error("`CaseGen` can only be derived on an enum.")]
    NotAnEnum,
    #[error("Expected at least one template string literal.")]
    NoArguments,
    #[error("Expected a string literal.")]
    ExpectedStringLiteral,
    #[error("Unknown parameter type `{0}`.")]
    UnknownParameterType(String),
    #[error("{0}")]
    CustomError(String),
}

/// A spanned error. Useful in proc macro error handling.
pub struct ExpandError {
    pub kind: ExpandErrorKind,
    pub span: Span,
}

impl Debug for ExpandError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        Display::fmt(&self.kind, f)
    }
}

impl Display for ExpandError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        Display::fmt(&self.kind, f)
    }
}

impl ExpandError {
    pub fn new(kind: ExpandErrorKind, span: Span) -> Self {
        Self { kind, span }
    }

    /// Create a custom error.
    pub fn custom(span: Span, val: impl Display) -> Self {
        Self {
            kind: ExpandErrorKind::CustomError(val.to_string()),
            span,
        }
    }
}

impl std::error::Error for ExpandError {}
