//! Error types for parsing and tree edits.

use thiserror::Error;

/// Errors from parsing C# source or applying text edits to it.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SyntaxError {
    /// Failed to load the C# grammar into the Tree-sitter parser.
    #[error("failed to initialise C# parser: {message}")]
    ParserInitError {
        /// Description of the failure.
        message: String,
    },

    /// The parser did not produce a tree.
    #[error("failed to parse C#: {message}")]
    ParseError {
        /// Description of the failure.
        message: String,
    },

    /// A text edit could not be applied to the source.
    #[error("invalid edit at {start}..{end}: {message}")]
    InvalidEdit {
        /// Start byte of the offending edit.
        start: usize,
        /// End byte of the offending edit.
        end: usize,
        /// Description of the problem.
        message: String,
    },
}

impl SyntaxError {
    /// Creates a parser initialisation error.
    #[must_use]
    pub fn parser_init(message: impl Into<String>) -> Self {
        Self::ParserInitError {
            message: message.into(),
        }
    }

    /// Creates a parse error.
    #[must_use]
    pub fn parse(message: impl Into<String>) -> Self {
        Self::ParseError {
            message: message.into(),
        }
    }

    /// Creates an invalid edit error for the given byte range.
    #[must_use]
    pub fn invalid_edit(range: std::ops::Range<usize>, message: impl Into<String>) -> Self {
        Self::InvalidEdit {
            start: range.start,
            end: range.end,
            message: message.into(),
        }
    }
}
