//! Rewrite configuration.
//!
//! Every symbol the rewriter recognizes or emits is configurable here; the
//! defaults follow the MCsquare conventions (`vALL` expanding to
//! `0:VLENGTH`).

/// Trip-count symbol for the shorthand slice and for assignment loops.
pub const DEFAULT_LENGTH_SYMBOL: &str = "VLENGTH";

/// Shorthand slice literal, as in `a[vALL]`.
pub const DEFAULT_ALL_LITERAL: &str = "vALL";

/// Reduction built-in recognized by the reduction pattern.
pub const DEFAULT_REDUCE_CALL: &str = "__sec_reduce_add";

/// Loop index introduced by every generated loop.
pub const DEFAULT_INDEX_SYMBOL: &str = "i";

/// Knobs for a single rewrite run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RewriteConfig {
    /// Length symbol the shorthand form resolves to. Also the loop bound of
    /// assignment and conditional rewrites.
    pub length_symbol: String,
    pub all_literal: String,
    pub reduce_call: String,
    pub index_symbol: String,
    /// One level of indentation inside generated loops.
    pub indent_unit: String,
    /// Pragma line preceding every generated loop.
    pub pragma: String,
    /// Scalar type keywords accepted in front of a reduction target.
    pub reduction_types: Vec<String>,
}

impl Default for RewriteConfig {
    fn default() -> Self {
        Self {
            length_symbol: DEFAULT_LENGTH_SYMBOL.to_owned(),
            all_literal: DEFAULT_ALL_LITERAL.to_owned(),
            reduce_call: DEFAULT_REDUCE_CALL.to_owned(),
            index_symbol: DEFAULT_INDEX_SYMBOL.to_owned(),
            indent_unit: "    ".to_owned(),
            pragma: "#pragma omp simd".to_owned(),
            reduction_types: vec!["int".to_owned(), "double".to_owned(), "float".to_owned()],
        }
    }
}

impl RewriteConfig {
    pub fn with_length_symbol(mut self, symbol: impl Into<String>) -> Self {
        self.length_symbol = symbol.into();
        self
    }

    pub fn with_index_symbol(mut self, symbol: impl Into<String>) -> Self {
        self.index_symbol = symbol.into();
        self
    }

    /// Header of a counted loop from zero to `bound`, exclusive.
    pub fn loop_header(&self, bound: &str) -> String {
        let i = &self.index_symbol;
        format!("for (int {i} = 0; {i} < {bound}; {i}++) {{")
    }
}
