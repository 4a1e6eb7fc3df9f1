//! Diagnostic rendering for the converter CLI.

use ariadne::{Color, Config, IndexType, Label, Report, ReportKind, Source};
use cilk_rewrite::{Diagnostic, DiagnosticKind};

/// Get the display color for a diagnostic kind.
pub fn kind_color(kind: &DiagnosticKind) -> Color {
    match kind {
        DiagnosticKind::MixedLengths { .. } => Color::Yellow,
        DiagnosticKind::ReductionShape => Color::Magenta,
        DiagnosticKind::NotLineStart => Color::Cyan,
        DiagnosticKind::UnbracedBody => Color::Blue,
    }
}

/// Normalize a span to ensure end > start (required by ariadne).
pub fn normalize_span(start: usize, end: usize) -> (usize, usize) {
    (start, end.max(start + 1))
}

/// Print a diagnostic as an ariadne warning report on stderr.
pub fn print_diagnostic(diag: &Diagnostic, source: &str, file_path: &str) {
    let (start, end) = normalize_span(diag.span.start, diag.span.end);
    let color = kind_color(&diag.kind);

    Report::build(ReportKind::Warning, (file_path, start..end))
        .with_config(Config::default().with_index_type(IndexType::Byte))
        .with_code(diag.kind.code())
        .with_message(diag.kind.to_string())
        .with_label(
            Label::new((file_path, start..end))
                .with_message("left unconverted")
                .with_color(color),
        )
        .finish()
        .eprint((file_path, Source::from(source)))
        .ok();
}
