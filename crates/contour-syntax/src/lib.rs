//! Tree-sitter powered C# syntax trees for the Contour shape matchers.
//!
//! This crate is the leaf layer of the workspace. It provides:
//!
//! - **Parsing** via [`Parser`] and [`ParseResult`], which own the tree and
//!   the source text together
//! - **Borrowed node views** via [`SyntaxNode`], classified by the closed
//!   [`SyntaxKind`] set
//! - **Parenthesis transparency** via [`walk_down_parentheses`],
//!   [`walk_up_parentheses`] and the [`check`] validity predicate
//! - **Edits** via [`TextEdit`] and [`EditedSyntax`], which rebuild a tree
//!   from edited text without touching the original
//!
//! # Example
//!
//! ```
//! use contour_syntax::{SyntaxKind, parse, walk_down_parentheses};
//!
//! let parsed = parse("class C { int M() => ((1 + 2)); }")?;
//! let body = parsed
//!     .root()
//!     .first_descendant_of_kind(SyntaxKind::ParenthesizedExpression)
//!     .expect("parenthesized body");
//!
//! assert_eq!(walk_down_parentheses(body).text(), "1 + 2");
//! # Ok::<(), contour_syntax::SyntaxError>(())
//! ```

mod edit;
mod error;
mod kind;
mod node;
mod parser;
mod position;
mod walk;

pub use edit::{EditAnchor, EditedSyntax, TextEdit, apply_edits};
pub use error::SyntaxError;
pub use kind::{AssignmentOperator, BinaryOperator, PrefixOperator, SyntaxKind};
pub use node::SyntaxNode;
pub use parser::{ParseResult, Parser, SyntaxErrorInfo, parse};
pub use position::Position;
pub use walk::{check, walk, walk_and_check, walk_down_parentheses, walk_up_parentheses};

pub(crate) const PARSE_TARGET: &str = concat!(env!("CARGO_PKG_NAME"), "::parse");
pub(crate) const EDIT_TARGET: &str = concat!(env!("CARGO_PKG_NAME"), "::edit");

#[cfg(test)]
mod tests;
