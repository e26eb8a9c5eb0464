//! Source builders and node lookups shared by the unit tests.

use contour_syntax::{ParseResult, SyntaxKind, SyntaxNode, parse};

/// Wraps an expression as the arrow body of a method.
pub(crate) fn arrow_body(expression: &str) -> String {
    format!("class C {{ object M() => {expression}; }}")
}

/// Wraps statements in a method body.
pub(crate) fn method_body(statements: &str) -> String {
    format!("class C {{ void M() {{ {statements} }} }}")
}

/// Wraps an expression as the condition of an `if` statement.
pub(crate) fn condition(expression: &str) -> String {
    method_body(&format!("if ({expression}) {{ }}"))
}

/// Parses source, panicking on failure.
pub(crate) fn parsed(source: &str) -> ParseResult {
    parse(source).unwrap_or_else(|err| panic!("parse: {err}"))
}

/// Returns the first node of `kind`, panicking when there is none.
pub(crate) fn first(parsed: &ParseResult, kind: SyntaxKind) -> SyntaxNode<'_> {
    parsed
        .root()
        .first_descendant_of_kind(kind)
        .unwrap_or_else(|| panic!("no {kind} in {:?}", parsed.source()))
}

/// Returns the arrow body expression of the first method.
pub(crate) fn arrow_expression(parsed: &ParseResult) -> SyntaxNode<'_> {
    first(parsed, SyntaxKind::ArrowExpressionClause)
        .first_child()
        .unwrap_or_else(|| panic!("empty arrow body in {:?}", parsed.source()))
}

/// Returns the condition of the first `if` statement.
pub(crate) fn if_condition(parsed: &ParseResult) -> SyntaxNode<'_> {
    first(parsed, SyntaxKind::IfStatement)
        .child_by_field("condition")
        .unwrap_or_else(|| panic!("if without condition in {:?}", parsed.source()))
}
