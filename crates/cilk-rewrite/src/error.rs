//! Error handling for the rewriter.
//!
//! Only structural failures live here. A pattern that cannot be converted
//! safely is not an error; it becomes a [`crate::Diagnostic`].

use std::path::PathBuf;

use derive_more::{Display, Error, From};

/// Result type for rewriter operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that abort a conversion run.
#[derive(Debug, Display, Error, From)]
pub enum Error {
    /// Reading the input or writing an output artifact failed.
    #[from(ignore)]
    #[display("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The C grammar could not be loaded into the parser.
    #[display("Failed to load C grammar: {_0}")]
    Language(tree_sitter::LanguageError),

    /// A recognizer pattern built from the configuration did not compile.
    #[display("Invalid recognizer pattern: {_0}")]
    Pattern(regex::Error),

    /// The parser did not produce a syntax tree.
    #[from(ignore)]
    #[display("Parser could not build a syntax tree")]
    Unparseable,
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }
}
