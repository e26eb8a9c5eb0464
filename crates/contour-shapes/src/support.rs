//! Helpers shared by the matcher modules.

use contour_syntax::{SyntaxKind, SyntaxNode, check, walk, walk_and_check};

use crate::error::ShapeError;
use crate::options::MatchOptions;

pub(crate) const SHAPES_TARGET: &str = concat!(env!("CARGO_PKG_NAME"), "::shapes");
pub(crate) const SEMANTIC_TARGET: &str = concat!(env!("CARGO_PKG_NAME"), "::semantic");

/// Applies the parenthesis policy to the candidate node itself.
pub(crate) fn candidate(node: SyntaxNode<'_>, options: MatchOptions) -> SyntaxNode<'_> {
    walk(Some(node), options.walk_down_parentheses()).unwrap_or(node)
}

/// Walks (when enabled) and checks a sub-node.
pub(crate) fn gate(node: Option<SyntaxNode<'_>>, options: MatchOptions) -> Option<SyntaxNode<'_>> {
    walk_and_check(node, options.walk_down_parentheses(), options.allow_missing())
}

/// Checks a sub-node without walking parentheses.
pub(crate) fn accept(node: Option<SyntaxNode<'_>>, options: MatchOptions) -> Option<SyntaxNode<'_>> {
    node.filter(|n| check(Some(*n), options.allow_missing()))
}

/// Returns a field child, falling back to a positional named child for
/// grammar revisions that do not label the field.
pub(crate) fn field_or<'t>(
    node: SyntaxNode<'t>,
    field: &str,
    fallback: impl FnOnce(SyntaxNode<'t>) -> Option<SyntaxNode<'t>>,
) -> Option<SyntaxNode<'t>> {
    node.child_by_field(field).or_else(|| fallback(node))
}

/// Returns the operator token text of a binary-like node.
pub(crate) fn operator_text<'t>(node: SyntaxNode<'t>) -> Option<&'t str> {
    if let Some(op) = node.child_by_field("operator") {
        return Some(op.text());
    }
    node.tokens()
        .into_iter()
        .find(|token| !token.is_named() || token.raw_kind() == "assignment_operator")
        .map(|token| token.text())
}

/// Returns the wrapped expression of an expression statement.
pub(crate) fn statement_expression(statement: SyntaxNode<'_>) -> Option<SyntaxNode<'_>> {
    statement
        .is(SyntaxKind::ExpressionStatement)
        .then(|| statement.first_child())
        .flatten()
}

/// Returns the expression statement wrapping `expression`, if any.
pub(crate) fn enclosing_statement(expression: SyntaxNode<'_>) -> Option<SyntaxNode<'_>> {
    expression
        .parent()
        .filter(|parent| parent.is(SyntaxKind::ExpressionStatement))
}

/// Whether `if_statement` is the `else` branch of an enclosing `if`.
pub(crate) fn is_else_branch(if_statement: SyntaxNode<'_>) -> bool {
    if_statement.parent().is_some_and(|parent| {
        parent.is(SyntaxKind::IfStatement)
            && parent.child_by_field("alternative") == Some(if_statement)
    })
}

/// Returns the name identifier of a declarator, parameter or declaration.
pub(crate) fn name_of(node: SyntaxNode<'_>) -> Option<SyntaxNode<'_>> {
    field_or(node, "name", |n| n.first_child_of_kind(SyntaxKind::Identifier))
}

/// Returns the initializer value of a variable declarator.
///
/// Handles both `equals_value_clause` children and a bare `=` token followed
/// by the value.
pub(crate) fn declarator_value(declarator: SyntaxNode<'_>) -> Option<SyntaxNode<'_>> {
    if let Some(clause) = declarator.first_child_of_kind(SyntaxKind::EqualsValueClause) {
        return clause.first_child();
    }
    declarator
        .tokens()
        .into_iter()
        .skip_while(|token| token.raw_kind() != "=")
        .skip(1)
        .find(SyntaxNode::is_named)
}

/// Returns `Err(UnexpectedKind)` unless `node` has `expected` kind.
pub(crate) fn expect_kind(node: SyntaxNode<'_>, expected: SyntaxKind) -> Result<(), ShapeError> {
    if node.is(expected) {
        Ok(())
    } else {
        Err(ShapeError::unexpected_kind(expected, node.kind()))
    }
}

/// Strips constant- and type-pattern wrappers, yielding the pattern's
/// expression or type.
pub(crate) fn unwrap_pattern(pattern: SyntaxNode<'_>) -> SyntaxNode<'_> {
    match pattern.kind() {
        SyntaxKind::ConstantPattern | SyntaxKind::TypePattern => {
            pattern.first_child().unwrap_or(pattern)
        }
        _ => pattern,
    }
}
