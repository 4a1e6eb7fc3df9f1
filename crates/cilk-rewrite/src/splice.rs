//! Replacement assembler.
//!
//! All edits are expressed against the original buffer and applied in a
//! single pass from the highest start offset down, so no splice ever shifts
//! the offsets of an edit still pending.

use crate::syntax::Span;

/// Replace exactly `span` of the original buffer with `text`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Replacement {
    pub span: Span,
    pub text: String,
}

impl Replacement {
    pub fn new(span: Span, text: impl Into<String>) -> Self {
        Self {
            span,
            text: text.into(),
        }
    }

    /// Signed change in buffer length caused by this replacement.
    pub fn delta(&self) -> isize {
        self.text.len() as isize - self.span.len() as isize
    }
}

/// Apply `replacements` to `source`. Spans must be disjoint.
pub fn apply_replacements(source: &[u8], replacements: &[Replacement]) -> Vec<u8> {
    let mut ordered: Vec<&Replacement> = replacements.iter().collect();
    ordered.sort_by(|a, b| b.span.start.cmp(&a.span.start));
    debug_assert!(
        ordered.windows(2).all(|pair| pair[1].span.end <= pair[0].span.start),
        "replacement spans overlap"
    );

    let mut buffer = source.to_vec();
    for replacement in ordered {
        buffer.splice(replacement.span.range(), replacement.text.bytes());
    }
    buffer
}

/// Length the spliced buffer must have, computed from the edit list alone.
pub fn spliced_len(source_len: usize, replacements: &[Replacement]) -> usize {
    let delta: isize = replacements.iter().map(Replacement::delta).sum();
    (source_len as isize + delta) as usize
}
