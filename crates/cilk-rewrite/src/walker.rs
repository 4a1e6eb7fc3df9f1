//! Tree walker.
//!
//! Depth-first, left-to-right descent over the syntax tree. At each node the
//! walker either skips it, converts it and stops, or recurses into its
//! children. A converted node's subtree is never visited, so replacements
//! can never nest or overlap.

use crate::diagnostic::{Diagnostic, DiagnosticKind, Diagnostics};
use crate::patterns::{Conversion, Pattern, PatternConverter};
use crate::splice::Replacement;
use crate::syntax::{NodeKind, Span, SyntaxNode};

/// Mutable state threaded through one walk.
#[derive(Debug, Default)]
pub struct RewriteContext {
    pub replacements: Vec<Replacement>,
    pub diagnostics: Diagnostics,
    pub conversions: usize,
}

impl RewriteContext {
    pub fn new() -> Self {
        Self::default()
    }

    fn record(&mut self, pattern: Pattern, replacement: Replacement) {
        tracing::debug!(
            %pattern,
            start = replacement.span.start,
            end = replacement.span.end,
            "converted"
        );
        self.conversions += 1;
        self.replacements.push(replacement);
    }
}

pub struct TreeWalker<'a> {
    source: &'a [u8],
    converter: &'a PatternConverter,
}

impl<'a> TreeWalker<'a> {
    pub fn new(source: &'a [u8], converter: &'a PatternConverter) -> Self {
        Self { source, converter }
    }

    pub fn walk(&self, node: &SyntaxNode, cx: &mut RewriteContext) {
        self.visit(node, false, cx);
    }

    /// `sole_body` is set when `node` is the only sub-statement of its
    /// parent, e.g. the unbraced body of a `for`.
    fn visit(&self, node: &SyntaxNode, sole_body: bool, cx: &mut RewriteContext) {
        let text = node.text(self.source);
        let recognizer = self.converter.recognizer();
        if !recognizer.has_slice(&text) {
            return;
        }

        let consumed = match node.kind() {
            NodeKind::Declaration if recognizer.has_reduction_call(&text) => {
                self.try_convert(Pattern::Reduction, node, &text, sole_body, cx)
            }
            NodeKind::ExpressionStatement => {
                if recognizer.has_reduction_call(&text) {
                    self.try_convert(Pattern::Reduction, node, &text, sole_body, cx)
                } else if text.contains('=') {
                    self.try_convert(Pattern::Assignment, node, &text, sole_body, cx)
                } else {
                    false
                }
            }
            NodeKind::IfStatement => {
                self.try_convert(Pattern::Conditional, node, &text, sole_body, cx);
                true
            }
            NodeKind::Declaration | NodeKind::Other(_) => false,
        };

        if !consumed {
            let holds_single = node.kind().holds_single_statement();
            for child in node.children() {
                self.visit(child, holds_single, cx);
            }
        }
    }

    /// Run one converter on `node`. Returns whether a replacement was
    /// recorded.
    fn try_convert(
        &self,
        pattern: Pattern,
        node: &SyntaxNode,
        text: &str,
        sole_body: bool,
        cx: &mut RewriteContext,
    ) -> bool {
        let span = node.span();
        let indent = line_indent(self.source, span);
        let conversion = self
            .converter
            .convert(pattern, text, indent.unwrap_or_default());

        match (conversion, indent) {
            (Conversion::Rewrite(_), _) if sole_body && pattern.emits_statement_sequence() => {
                cx.diagnostics
                    .push(Diagnostic::new(DiagnosticKind::UnbracedBody, span, text));
                false
            }
            (Conversion::Rewrite(replacement), Some(_)) => {
                cx.record(pattern, Replacement::new(span, replacement));
                true
            }
            (Conversion::Rewrite(_), None) => {
                cx.diagnostics
                    .push(Diagnostic::new(DiagnosticKind::NotLineStart, span, text));
                false
            }
            (Conversion::Rejected(kind), _) => {
                cx.diagnostics.push(Diagnostic::new(kind, span, text));
                false
            }
            (Conversion::Unchanged, _) => false,
        }
    }
}

/// Whitespace between the start of the line and `span.start`, or `None` if
/// anything else precedes the node on its line.
fn line_indent(source: &[u8], span: Span) -> Option<&str> {
    let before = &source[..span.start];
    let line_start = before
        .iter()
        .rposition(|&b| b == b'\n')
        .map_or(0, |newline| newline + 1);
    let prefix = &before[line_start..];
    if prefix.iter().all(|&b| b == b' ' || b == b'\t') {
        std::str::from_utf8(prefix).ok()
    } else {
        None
    }
}
