//! Error types for shape matching.
//!
//! A node that simply does not have the requested shape is not an error: the
//! matcher returns its default (unsuccessful) value. These errors cover
//! caller misuse and failed edits.

use contour_syntax::{SyntaxError, SyntaxKind};
use thiserror::Error;

/// Errors from shape matchers and the edits they offer.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ShapeError {
    /// A typed entry point received a node of the wrong kind.
    #[error("expected {expected}, found {found}")]
    UnexpectedKind {
        /// The kind the entry point accepts.
        expected: SyntaxKind,
        /// The kind that was passed.
        found: SyntaxKind,
    },

    /// An operation was invoked on an unsuccessful match.
    #[error("{shape} is not initialized")]
    NotInitialized {
        /// Name of the shape.
        shape: &'static str,
    },

    /// The requested styles can only be recognised with a semantic model.
    #[error("recognising {what} requires a semantic model")]
    SemanticModelRequired {
        /// What could not be recognised.
        what: &'static str,
    },

    /// A string concatenation could not become a single literal.
    #[error("string concatenation contains a non-literal operand: {text}")]
    ContainsNonStringLiteral {
        /// Text of the first offending operand.
        text: String,
    },

    /// A node passed to an edit does not belong to the matched shape.
    #[error("{what} does not belong to this {shape}")]
    ForeignNode {
        /// Name of the shape.
        shape: &'static str,
        /// Description of the node that was passed.
        what: &'static str,
    },

    /// Applying or re-parsing an edit failed.
    #[error(transparent)]
    Syntax(#[from] SyntaxError),
}

impl ShapeError {
    /// Creates an unexpected kind error.
    #[must_use]
    pub const fn unexpected_kind(expected: SyntaxKind, found: SyntaxKind) -> Self {
        Self::UnexpectedKind { expected, found }
    }

    /// Creates a not-initialized error for the named shape.
    #[must_use]
    pub const fn not_initialized(shape: &'static str) -> Self {
        Self::NotInitialized { shape }
    }

    /// Creates a semantic-model-required error.
    #[must_use]
    pub const fn semantic_model_required(what: &'static str) -> Self {
        Self::SemanticModelRequired { what }
    }

    /// Creates a non-literal operand error.
    #[must_use]
    pub fn contains_non_string_literal(text: impl Into<String>) -> Self {
        Self::ContainsNonStringLiteral { text: text.into() }
    }

    /// Creates a foreign node error.
    #[must_use]
    pub const fn foreign_node(shape: &'static str, what: &'static str) -> Self {
        Self::ForeignNode { shape, what }
    }
}
