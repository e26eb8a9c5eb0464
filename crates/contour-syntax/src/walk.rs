//! Parenthesis transparency and the sub-node validity predicate.
//!
//! Every matcher runs candidate nodes through [`walk_and_check`] before it
//! accepts them, which keeps the "see through `((x))`" and "reject parser
//! recovery nodes" policies identical across the whole crate family.

use crate::kind::SyntaxKind;
use crate::node::SyntaxNode;

/// Unwraps nested parenthesized expressions, returning the innermost node.
///
/// Nodes that are not parenthesized are returned unchanged. A parenthesized
/// expression with no inner expression (possible in recovered trees) is
/// returned as is.
#[must_use]
pub fn walk_down_parentheses(node: SyntaxNode<'_>) -> SyntaxNode<'_> {
    let mut current = node;
    while current.is(SyntaxKind::ParenthesizedExpression) {
        match current.first_child() {
            Some(inner) => current = inner,
            None => break,
        }
    }
    current
}

/// Climbs out of enclosing parenthesized expressions, returning the outermost
/// one (or `node` itself when its parent is not parenthesized).
#[must_use]
pub fn walk_up_parentheses(node: SyntaxNode<'_>) -> SyntaxNode<'_> {
    let mut current = node;
    while let Some(parent) = current.parent() {
        if !parent.is(SyntaxKind::ParenthesizedExpression) {
            break;
        }
        current = parent;
    }
    current
}

/// Optionally unwraps parentheses around an optional node.
#[must_use]
pub fn walk<'t>(
    node: Option<SyntaxNode<'t>>,
    walk_down_parentheses: bool,
) -> Option<SyntaxNode<'t>> {
    node.map(|n| {
        if walk_down_parentheses {
            self::walk_down_parentheses(n)
        } else {
            n
        }
    })
}

/// Returns whether a sub-node is acceptable to a matcher.
///
/// Absent nodes are never acceptable. Present nodes are acceptable when
/// `allow_missing` is set or the node was not synthesised by error recovery.
#[must_use]
pub fn check(node: Option<SyntaxNode<'_>>, allow_missing: bool) -> bool {
    node.is_some_and(|n| allow_missing || !n.is_missing())
}

/// Walks down parentheses (when enabled) and keeps the result only if it
/// passes [`check`].
#[must_use]
pub fn walk_and_check<'t>(
    node: Option<SyntaxNode<'t>>,
    walk_down_parentheses: bool,
    allow_missing: bool,
) -> Option<SyntaxNode<'t>> {
    walk(node, walk_down_parentheses).filter(|n| check(Some(*n), allow_missing))
}
