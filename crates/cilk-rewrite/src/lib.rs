//! Rewrites Cilk Plus array notation into OpenMP SIMD loops.
//!
//! The pipeline is: parse the C source with tree-sitter, walk the tree and
//! collect [`Replacement`]s for statements using slice notation, then splice
//! every replacement into the original buffer in one pass. Statements that
//! only partially match a pattern are left untouched and reported as
//! [`Diagnostic`]s.
//!
//! ```no_run
//! use cilk_rewrite::{RewriteConfig, convert_file};
//!
//! let run = convert_file("in.c", "out.c", "convert.log", RewriteConfig::default())?;
//! println!("Converted {} Cilk Plus constructs", run.outcome.conversions);
//! # Ok::<(), cilk_rewrite::Error>(())
//! ```

pub mod config;
pub mod diagnostic;
pub mod error;
pub mod notation;
pub mod patterns;
pub mod splice;
pub mod syntax;
pub mod walker;

use std::fs;
use std::path::Path;

pub use crate::config::RewriteConfig;
pub use crate::diagnostic::{Diagnostic, DiagnosticKind, Diagnostics, NO_WARNINGS};
pub use crate::error::{Error, Result};
pub use crate::patterns::{Conversion, Pattern, PatternConverter};
pub use crate::splice::{Replacement, apply_replacements, spliced_len};
pub use crate::syntax::{CParser, NodeKind, Span, SyntaxNode};
pub use crate::walker::{RewriteContext, TreeWalker};

/// Result of rewriting one buffer.
#[derive(Debug)]
pub struct RewriteOutcome {
    pub output: Vec<u8>,
    pub conversions: usize,
    pub replacements: Vec<Replacement>,
    pub diagnostics: Diagnostics,
}

/// Parser plus converters, reusable across buffers.
pub struct Rewriter {
    parser: CParser,
    converter: PatternConverter,
}

impl Rewriter {
    pub fn new(config: RewriteConfig) -> Result<Self> {
        Ok(Self {
            parser: CParser::new()?,
            converter: PatternConverter::new(config)?,
        })
    }

    pub fn config(&self) -> &RewriteConfig {
        self.converter.config()
    }

    pub fn rewrite(&mut self, source: &[u8]) -> Result<RewriteOutcome> {
        let root = self.parser.parse(source)?;
        let mut cx = RewriteContext::new();
        TreeWalker::new(source, &self.converter).walk(&root, &mut cx);

        let output = apply_replacements(source, &cx.replacements);
        debug_assert_eq!(output.len(), spliced_len(source.len(), &cx.replacements));

        Ok(RewriteOutcome {
            output,
            conversions: cx.conversions,
            replacements: cx.replacements,
            diagnostics: cx.diagnostics,
        })
    }
}

/// Convenience wrapper for a one-off rewrite with the given configuration.
pub fn rewrite_source(source: &[u8], config: RewriteConfig) -> Result<RewriteOutcome> {
    Rewriter::new(config)?.rewrite(source)
}

/// One file conversion: the original bytes and what became of them.
#[derive(Debug)]
pub struct FileConversion {
    pub source: Vec<u8>,
    pub outcome: RewriteOutcome,
}

/// Convert `input` into `output` and write the diagnostics log to `log`.
///
/// Both artifacts are computed in memory first. If either write fails the
/// output file is removed again, so a failed run leaves neither file behind.
pub fn convert_file(
    input: impl AsRef<Path>,
    output: impl AsRef<Path>,
    log: impl AsRef<Path>,
    config: RewriteConfig,
) -> Result<FileConversion> {
    let (input, output, log) = (input.as_ref(), output.as_ref(), log.as_ref());

    let source = fs::read(input).map_err(|e| Error::io(input, e))?;
    tracing::info!(path = %input.display(), bytes = source.len(), "read input");

    let outcome = rewrite_source(&source, config)?;
    let log_text = outcome.diagnostics.render_log();

    if let Err(e) = fs::write(output, &outcome.output) {
        let _ = fs::remove_file(output);
        return Err(Error::io(output, e));
    }
    if let Err(e) = fs::write(log, log_text) {
        let _ = fs::remove_file(output);
        return Err(Error::io(log, e));
    }
    tracing::info!(
        path = %output.display(),
        conversions = outcome.conversions,
        warnings = outcome.diagnostics.len(),
        "wrote output"
    );

    Ok(FileConversion { source, outcome })
}
