//! Pattern converters.
//!
//! Each converter takes the text of one syntax node and the indentation of
//! the line it starts on, and either synthesizes the loop form, declines, or
//! rejects the node with a diagnostic. Converters only look at syntactic
//! shape.

use derive_more::Display;

use crate::config::RewriteConfig;
use crate::diagnostic::DiagnosticKind;
use crate::error::Result;
use crate::notation::{SliceLength, SliceRecognizer};

/// The rewrite patterns, in the order the walker considers them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display)]
pub enum Pattern {
    #[display("assignment")]
    Assignment,
    #[display("reduction")]
    Reduction,
    #[display("conditional")]
    Conditional,
}

impl Pattern {
    /// Does the rewrite replace one statement with several?
    pub fn emits_statement_sequence(self) -> bool {
        matches!(self, Pattern::Reduction)
    }
}

/// Outcome of running one converter over one node.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Conversion {
    /// The node does not have the pattern's shape.
    Unchanged,
    /// Replacement text for the node's whole span.
    Rewrite(String),
    /// The node partially matched; it must be left as is.
    Rejected(DiagnosticKind),
}

impl Conversion {
    pub fn is_rewrite(&self) -> bool {
        matches!(self, Conversion::Rewrite(_))
    }
}

pub struct PatternConverter {
    config: RewriteConfig,
    recognizer: SliceRecognizer,
}

impl PatternConverter {
    pub fn new(config: RewriteConfig) -> Result<Self> {
        let recognizer = SliceRecognizer::new(&config)?;
        Ok(Self { config, recognizer })
    }

    pub fn config(&self) -> &RewriteConfig {
        &self.config
    }

    pub fn recognizer(&self) -> &SliceRecognizer {
        &self.recognizer
    }

    pub fn convert(&self, pattern: Pattern, text: &str, indent: &str) -> Conversion {
        match pattern {
            Pattern::Assignment => self.convert_assignment(text, indent),
            Pattern::Reduction => self.convert_reduction(text, indent),
            Pattern::Conditional => self.convert_conditional(text, indent),
        }
    }

    /// `a[0:N] = f(b[0:N]);` becomes a SIMD loop over `a[i] = f(b[i]);`.
    ///
    /// The loop bound is always the configured length symbol, even when the
    /// slices name another one.
    pub fn convert_assignment(&self, text: &str, indent: &str) -> Conversion {
        let r = &self.recognizer;
        if !text.contains('=') || r.has_reduction_call(text) {
            return Conversion::Unchanged;
        }
        match r.slice_length(text) {
            SliceLength::Absent => return Conversion::Unchanged,
            SliceLength::Ambiguous(symbols) => return mixed_lengths(symbols),
            SliceLength::Single(symbol) if symbol != self.config.length_symbol => {
                tracing::debug!(
                    symbol,
                    bound = %self.config.length_symbol,
                    "assignment slice length differs from loop bound"
                );
            }
            SliceLength::Single(_) => {}
        }

        let body = r.index_slices(text.trim(), &self.config.index_symbol);
        let mut block = LoopBlock::new(indent, &self.config.indent_unit);
        block.line(&self.config.pragma);
        block.line(&self.config.loop_header(&self.config.length_symbol));
        block.body(&body);
        Conversion::Rewrite(block.close())
    }

    /// `[type] s = __sec_reduce_add(x[0:N]);` becomes a zero-initialization
    /// followed by a SIMD reduction loop bounded by the slice's own length.
    pub fn convert_reduction(&self, text: &str, indent: &str) -> Conversion {
        let r = &self.recognizer;
        if !r.has_reduction_call(text) {
            return Conversion::Unchanged;
        }
        let Some(reduction) = r.match_reduction(text.trim()) else {
            return Conversion::Rejected(DiagnosticKind::ReductionShape);
        };

        let target = reduction.target;
        let init = match reduction.scalar_type {
            Some(ty) => format!("{ty} {target} = 0;"),
            None => format!("{target} = 0;"),
        };
        let index = &self.config.index_symbol;

        let mut block = LoopBlock::new(indent, &self.config.indent_unit);
        block.line(&init);
        block.line(&format!("{} reduction(+:{target})", self.config.pragma));
        block.line(&self.config.loop_header(reduction.length));
        block.body(&format!("{target} += {}[{index}];", reduction.array));
        Conversion::Rewrite(block.close())
    }

    /// An `if` whose condition or branches use slices is wrapped whole in the
    /// loop, so the condition is evaluated per element. A reduction call
    /// inside the block has no per-element form and rejects the whole `if`.
    pub fn convert_conditional(&self, text: &str, indent: &str) -> Conversion {
        if self.recognizer.has_reduction_call(text) && self.recognizer.has_slice(text) {
            return Conversion::Rejected(DiagnosticKind::ReductionShape);
        }
        match self.recognizer.slice_length(text) {
            SliceLength::Absent => return Conversion::Unchanged,
            SliceLength::Ambiguous(symbols) => return mixed_lengths(symbols),
            SliceLength::Single(_) => {}
        }

        let body = self
            .recognizer
            .index_slices(text.trim(), &self.config.index_symbol);
        let mut block = LoopBlock::new(indent, &self.config.indent_unit);
        block.line(&self.config.pragma);
        block.line(&self.config.loop_header(&self.config.length_symbol));
        block.body(&body);
        Conversion::Rewrite(block.close())
    }
}

fn mixed_lengths(symbols: Vec<&str>) -> Conversion {
    Conversion::Rejected(DiagnosticKind::MixedLengths {
        symbols: symbols.into_iter().map(str::to_owned).collect(),
    })
}

/// Builds replacement text for a node that starts after `indent`.
///
/// The first line is emitted bare because the indentation in front of the
/// node stays in the buffer. Body text keeps its own continuation-line
/// indentation and is shifted by one unit.
struct LoopBlock<'a> {
    indent: &'a str,
    unit: &'a str,
    out: String,
}

impl<'a> LoopBlock<'a> {
    fn new(indent: &'a str, unit: &'a str) -> Self {
        Self {
            indent,
            unit,
            out: String::new(),
        }
    }

    fn line(&mut self, line: &str) {
        if !self.out.is_empty() {
            self.out.push('\n');
            self.out.push_str(self.indent);
        }
        self.out.push_str(line);
    }

    fn body(&mut self, body: &str) {
        let mut lines = body.split('\n');
        if let Some(first) = lines.next() {
            self.line(&format!("{}{first}", self.unit));
        }
        for line in lines {
            self.out.push('\n');
            if !line.trim().is_empty() {
                self.out.push_str(self.unit);
            }
            self.out.push_str(line);
        }
    }

    fn close(mut self) -> String {
        self.line("}");
        self.out
    }
}
