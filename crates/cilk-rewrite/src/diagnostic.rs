//! Conversion diagnostics.
//!
//! A diagnostic records a construct that looked convertible but was left
//! untouched. Diagnostics are advisory: they never abort a run.

use derive_more::Display;

use crate::syntax::Span;

/// Marker line written to the log when nothing was recorded.
pub const NO_WARNINGS: &str = "No warnings";

#[derive(Clone, Debug, PartialEq, Eq, Display)]
pub enum DiagnosticKind {
    /// Slice occurrences in one statement disagree on the trip count.
    #[display("Mixed lengths ({})", symbols.join(", "))]
    MixedLengths { symbols: Vec<String> },

    /// The reduction call is present but not as `[type] x = call(a[slice]);`.
    #[display("Unrecognized reduction shape")]
    ReductionShape,

    /// The statement shares its line with preceding code, so no pragma line
    /// can be placed in front of it.
    #[display("Statement does not start its own line")]
    NotLineStart,

    /// The reduction is the lone body of a loop or branch, and its
    /// replacement would leave all but the first statement outside it.
    #[display("Reduction is the unbraced body of another statement")]
    UnbracedBody,
}

impl DiagnosticKind {
    /// Short stable code, used when rendering reports.
    pub fn code(&self) -> &'static str {
        match self {
            DiagnosticKind::MixedLengths { .. } => "mixed-lengths",
            DiagnosticKind::ReductionShape => "reduction-shape",
            DiagnosticKind::NotLineStart => "not-line-start",
            DiagnosticKind::UnbracedBody => "unbraced-body",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Display)]
#[display("WARNING: {kind}: {snippet}")]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    pub span: Span,
    /// Offending source text, whitespace runs collapsed to single spaces.
    pub snippet: String,
}

impl Diagnostic {
    pub fn new(kind: DiagnosticKind, span: Span, text: &str) -> Self {
        Self {
            kind,
            span,
            snippet: text.split_whitespace().collect::<Vec<_>>().join(" "),
        }
    }
}

/// Append-only collector for one run.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Diagnostics {
    entries: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, diagnostic: Diagnostic) {
        tracing::debug!(
            code = diagnostic.kind.code(),
            start = diagnostic.span.start,
            end = diagnostic.span.end,
            "{}",
            diagnostic
        );
        self.entries.push(diagnostic);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Diagnostic> {
        self.entries.iter()
    }

    /// Log file contents: one diagnostic per line, or the no-warnings marker.
    pub fn render_log(&self) -> String {
        if self.entries.is_empty() {
            return format!("{NO_WARNINGS}\n");
        }
        let mut log = String::new();
        for diagnostic in &self.entries {
            log.push_str(&diagnostic.to_string());
            log.push('\n');
        }
        log
    }
}

impl<'a> IntoIterator for &'a Diagnostics {
    type Item = &'a Diagnostic;
    type IntoIter = std::slice::Iter<'a, Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_log_has_marker() {
        let diagnostics = Diagnostics::new();
        assert!(diagnostics.is_empty());
        assert_eq!(diagnostics.render_log(), "No warnings\n");
    }

    #[test]
    fn test_snippet_collapses_newlines() {
        let diagnostic = Diagnostic::new(
            DiagnosticKind::ReductionShape,
            Span::new(0, 10),
            "s = __sec_reduce_add(\n        x[vALL] * y[vALL]);",
        );
        assert_eq!(
            diagnostic.to_string(),
            "WARNING: Unrecognized reduction shape: s = __sec_reduce_add( x[vALL] * y[vALL]);"
        );
    }

    #[test]
    fn test_one_line_per_diagnostic() {
        let mut diagnostics = Diagnostics::new();
        diagnostics.push(Diagnostic::new(
            DiagnosticKind::MixedLengths {
                symbols: vec!["N".to_owned(), "M".to_owned()],
            },
            Span::new(4, 20),
            "a[0:N] = b[0:M];",
        ));
        diagnostics.push(Diagnostic::new(
            DiagnosticKind::NotLineStart,
            Span::new(30, 40),
            "x[vALL] = 0;",
        ));
        assert_eq!(diagnostics.len(), 2);
        assert_eq!(
            diagnostics.render_log(),
            "WARNING: Mixed lengths (N, M): a[0:N] = b[0:M];\n\
             WARNING: Statement does not start its own line: x[vALL] = 0;\n"
        );
    }

    #[test]
    fn test_codes() {
        assert_eq!(DiagnosticKind::ReductionShape.code(), "reduction-shape");
        assert_eq!(DiagnosticKind::NotLineStart.code(), "not-line-start");
        assert_eq!(DiagnosticKind::UnbracedBody.code(), "unbraced-body");
    }
}
