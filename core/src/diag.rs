use proc_macro2::Span;

/// How a diagnostic should surface on the host side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    /// Informational, the expansion still succeeds.
    Note,
}

/// A single spanned message, optionally with attached notes
/// pointing at related source locations.
#[derive(Debug, Clone)]
pub struct Diagnostic {
    pub severity: Severity,
    pub message: String,
    pub span: Span,
    pub notes: Vec<(Span, String)>,
}

impl Diagnostic {
    pub fn error(span: Span, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            message: message.into(),
            span,
            notes: Vec::new(),
        }
    }

    pub fn note(span: Span, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Note,
            message: message.into(),
            span,
            notes: Vec::new(),
        }
    }

    pub fn with_note(mut self, span: Span, message: impl Into<String>) -> Self {
        self.notes.push((span, message.into()));
        self
    }
}

/// Accumulator for one expansion.
///
/// Owned by [`expand`](crate::expand) and threaded by `&mut` reference
/// through rendering, transform dispatch and cleanup. Rendering continues
/// best-effort after a diagnostic is recorded; a template whose render
/// recorded any diagnostic contributes no declarations.
#[derive(Debug, Default)]
pub struct Diagnostics {
    all: Vec<Diagnostic>,
    /// Diagnostics recorded since the last `begin_template`.
    template_count: usize,
    /// Dedup keys for invalid-transform reports within one template.
    transform_keys: Vec<(String, &'static str)>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reset the per-template state before rendering the next literal.
    pub fn begin_template(&mut self) {
        self.template_count = 0;
        self.transform_keys.clear();
    }

    pub fn push(&mut self, diagnostic: Diagnostic) {
        self.template_count += 1;
        self.all.push(diagnostic);
    }

    /// Record an unknown transform operation. Reported once per
    /// (operation, receiver type) pair for each template.
    pub fn invalid_transform(&mut self, span: Span, operation: &str, type_name: &'static str) {
        let key = (operation.to_owned(), type_name);
        if self.transform_keys.contains(&key) {
            return;
        }
        self.transform_keys.push(key);
        self.push(Diagnostic::error(
            span,
            format!("`{operation}` is not a valid transform on `{type_name}`."),
        ));
    }

    /// Usability guard for `keyValues` applied to a list that is
    /// already made of key-value pairs.
    pub fn redundant_key_values(&mut self, span: Span) {
        self.push(Diagnostic::note(
            span,
            "`keyValues` applied to a list that already contains key-value pairs.",
        ));
    }

    /// Whether the template being processed has recorded any diagnostic.
    pub fn has_template_diagnostics(&self) -> bool {
        self.template_count > 0
    }

    pub fn is_empty(&self) -> bool {
        self.all.is_empty()
    }

    pub fn into_vec(self) -> Vec<Diagnostic> {
        self.all
    }
}
