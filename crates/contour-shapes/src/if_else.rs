//! `if`/`else if`/`else` chains.

use contour_syntax::{SyntaxKind, SyntaxNode};

use crate::error::ShapeError;
use crate::options::MatchOptions;
use crate::support::{accept, expect_kind, gate, is_else_branch};

/// One link of an if/else chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IfElseElement<'t> {
    /// An `if` statement, the head or an `else if`.
    If(SyntaxNode<'t>),
    /// The statement of the trailing `else`.
    Else(SyntaxNode<'t>),
}

impl<'t> IfElseElement<'t> {
    /// The underlying statement.
    #[must_use]
    pub const fn node(&self) -> SyntaxNode<'t> {
        match self {
            Self::If(node) | Self::Else(node) => *node,
        }
    }

    /// Whether this is an `if` link.
    #[must_use]
    pub const fn is_if(&self) -> bool {
        matches!(self, Self::If(_))
    }
}

/// The whole chain that starts at an `if` statement.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IfStatementCascadeInfo<'t> {
    if_statement: Option<SyntaxNode<'t>>,
    elements: Vec<IfElseElement<'t>>,
}

impl<'t> IfStatementCascadeInfo<'t> {
    /// Follows the `else` links of `node` when it is an `if` statement.
    #[must_use]
    pub fn create(node: SyntaxNode<'t>) -> Self {
        Self::from_if_statement(node).unwrap_or_default()
    }

    /// Typed entry point.
    ///
    /// # Errors
    ///
    /// Returns [`ShapeError::UnexpectedKind`] unless `node` is an `if`
    /// statement.
    pub fn from_if_statement(node: SyntaxNode<'t>) -> Result<Self, ShapeError> {
        expect_kind(node, SyntaxKind::IfStatement)?;
        let mut elements = vec![IfElseElement::If(node)];
        let mut current = node;
        while let Some(alternative) = current.child_by_field("alternative") {
            if alternative.is(SyntaxKind::IfStatement) {
                elements.push(IfElseElement::If(alternative));
                current = alternative;
            } else {
                elements.push(IfElseElement::Else(alternative));
                break;
            }
        }
        Ok(Self {
            if_statement: Some(node),
            elements,
        })
    }

    /// Climbs `else if` links to the `if` that heads the chain containing
    /// `node`. Returns `node` itself when it heads a chain.
    #[must_use]
    pub fn topmost_if(node: SyntaxNode<'t>) -> Option<SyntaxNode<'t>> {
        if !node.is(SyntaxKind::IfStatement) {
            return None;
        }
        let mut current = node;
        while is_else_branch(current) {
            current = current.parent()?;
        }
        Some(current)
    }

    /// The `if` statement the chain was built from.
    #[must_use]
    pub const fn if_statement(&self) -> Option<SyntaxNode<'t>> {
        self.if_statement
    }

    /// The links, in source order.
    #[must_use]
    pub fn elements(&self) -> &[IfElseElement<'t>] {
        &self.elements
    }

    /// The number of links.
    #[must_use]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Whether the chain is empty, which only happens on a failed match.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// The final link.
    #[must_use]
    pub fn last(&self) -> Option<IfElseElement<'t>> {
        self.elements.last().copied()
    }

    /// Whether the chain has no trailing `else`.
    #[must_use]
    pub fn ends_with_if(&self) -> bool {
        self.last().is_some_and(|element| element.is_if())
    }

    /// Whether the chain ends in a plain `else`.
    #[must_use]
    pub fn ends_with_else(&self) -> bool {
        self.last().is_some_and(|element| !element.is_if())
    }

    /// A lone `if`.
    #[must_use]
    pub fn is_simple_if(&self) -> bool {
        self.len() == 1
    }

    /// `if { } else { }` with no `else if`.
    #[must_use]
    pub fn is_simple_if_else(&self) -> bool {
        self.len() == 2 && self.ends_with_else()
    }

    /// Whether the match succeeded.
    #[must_use]
    pub const fn success(&self) -> bool {
        self.if_statement.is_some()
    }
}

impl<'a, 't> IntoIterator for &'a IfStatementCascadeInfo<'t> {
    type Item = &'a IfElseElement<'t>;
    type IntoIter = std::slice::Iter<'a, IfElseElement<'t>>;

    fn into_iter(self) -> Self::IntoIter {
        self.elements.iter()
    }
}

/// `if (condition) statement` with no `else`, not itself an `else if`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SimpleIfStatementInfo<'t> {
    if_statement: Option<SyntaxNode<'t>>,
    condition: Option<SyntaxNode<'t>>,
    statement: Option<SyntaxNode<'t>>,
}

impl<'t> SimpleIfStatementInfo<'t> {
    /// Matches a simple `if`.
    #[must_use]
    pub fn create(node: SyntaxNode<'t>, options: MatchOptions) -> Self {
        Self::try_create(node, options).unwrap_or_default()
    }

    fn try_create(node: SyntaxNode<'t>, options: MatchOptions) -> Option<Self> {
        if !node.is(SyntaxKind::IfStatement)
            || is_else_branch(node)
            || node.child_by_field("alternative").is_some()
        {
            return None;
        }
        let condition = gate(node.child_by_field("condition"), options)?;
        let statement = accept(node.child_by_field("consequence"), options)?;
        Some(Self {
            if_statement: Some(node),
            condition: Some(condition),
            statement: Some(statement),
        })
    }

    /// The matched `if`.
    #[must_use]
    pub const fn if_statement(&self) -> Option<SyntaxNode<'t>> {
        self.if_statement
    }

    /// The condition.
    #[must_use]
    pub const fn condition(&self) -> Option<SyntaxNode<'t>> {
        self.condition
    }

    /// The guarded statement.
    #[must_use]
    pub const fn statement(&self) -> Option<SyntaxNode<'t>> {
        self.statement
    }

    /// Whether the match succeeded.
    #[must_use]
    pub const fn success(&self) -> bool {
        self.if_statement.is_some()
    }
}

/// `if (condition) when_true else when_false`, where `when_false` is not an
/// `if` and the statement is not itself an `else if`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SimpleIfElseInfo<'t> {
    if_statement: Option<SyntaxNode<'t>>,
    condition: Option<SyntaxNode<'t>>,
    when_true: Option<SyntaxNode<'t>>,
    when_false: Option<SyntaxNode<'t>>,
}

impl<'t> SimpleIfElseInfo<'t> {
    /// Matches a simple `if`/`else`.
    #[must_use]
    pub fn create(node: SyntaxNode<'t>, options: MatchOptions) -> Self {
        Self::try_create(node, options).unwrap_or_default()
    }

    fn try_create(node: SyntaxNode<'t>, options: MatchOptions) -> Option<Self> {
        if !node.is(SyntaxKind::IfStatement) || is_else_branch(node) {
            return None;
        }
        let when_false = accept(node.child_by_field("alternative"), options)?;
        if when_false.is(SyntaxKind::IfStatement) {
            return None;
        }
        let condition = gate(node.child_by_field("condition"), options)?;
        let when_true = accept(node.child_by_field("consequence"), options)?;
        Some(Self {
            if_statement: Some(node),
            condition: Some(condition),
            when_true: Some(when_true),
            when_false: Some(when_false),
        })
    }

    /// The matched `if`.
    #[must_use]
    pub const fn if_statement(&self) -> Option<SyntaxNode<'t>> {
        self.if_statement
    }

    /// The condition.
    #[must_use]
    pub const fn condition(&self) -> Option<SyntaxNode<'t>> {
        self.condition
    }

    /// The statement run when the condition holds.
    #[must_use]
    pub const fn when_true(&self) -> Option<SyntaxNode<'t>> {
        self.when_true
    }

    /// The `else` statement.
    #[must_use]
    pub const fn when_false(&self) -> Option<SyntaxNode<'t>> {
        self.when_false
    }

    /// Whether the match succeeded.
    #[must_use]
    pub const fn success(&self) -> bool {
        self.if_statement.is_some()
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;
    use crate::tests::support::{first, method_body, parsed};

    const CHAIN: &str = "if (a) { } else if (b) { } else if (c) { } else { d(); }";

    #[test]
    fn chain_of_four_links() {
        let tree = parsed(&method_body(CHAIN));
        let head = first(&tree, SyntaxKind::IfStatement);

        let info = IfStatementCascadeInfo::from_if_statement(head).expect("if statement");
        let kinds: Vec<_> = info.elements().iter().map(IfElseElement::is_if).collect();

        assert_eq!(kinds, [true, true, true, false]);
        assert!(info.ends_with_else());
        assert!(!info.is_simple_if_else());
        assert_eq!(info.last().map(|e| e.node().text()), Some("{ d(); }"));
    }

    #[test]
    fn topmost_if_climbs_from_any_link() {
        let tree = parsed(&method_body(CHAIN));
        let head = first(&tree, SyntaxKind::IfStatement);
        let innermost = tree
            .root()
            .descendants()
            .into_iter()
            .rev()
            .find(|n| n.is(SyntaxKind::IfStatement))
            .expect("nested if");

        assert_ne!(innermost, head);
        assert_eq!(IfStatementCascadeInfo::topmost_if(innermost), Some(head));
        assert_eq!(IfStatementCascadeInfo::topmost_if(head), Some(head));
    }

    #[test]
    fn wrong_kind_is_misuse() {
        let tree = parsed(&method_body("x();"));
        let statement = first(&tree, SyntaxKind::ExpressionStatement);

        let err = IfStatementCascadeInfo::from_if_statement(statement).expect_err("misuse");
        assert!(matches!(
            err,
            ShapeError::UnexpectedKind { expected: SyntaxKind::IfStatement, .. }
        ));
        assert!(!IfStatementCascadeInfo::create(statement).success());
    }

    #[rstest]
    #[case("if (a) b();", true, false)]
    #[case("if (a) b(); else c();", false, true)]
    #[case("if (a) b(); else if (c) d();", false, false)]
    fn simple_forms(#[case] source: &str, #[case] simple_if: bool, #[case] simple_if_else: bool) {
        let tree = parsed(&method_body(source));
        let head = first(&tree, SyntaxKind::IfStatement);

        assert_eq!(SimpleIfStatementInfo::create(head, MatchOptions::default()).success(), simple_if);
        assert_eq!(SimpleIfElseInfo::create(head, MatchOptions::default()).success(), simple_if_else);
        let cascade = IfStatementCascadeInfo::create(head);
        assert_eq!(cascade.is_simple_if(), simple_if);
        assert_eq!(cascade.is_simple_if_else(), simple_if_else);
    }

    #[test]
    fn else_if_branch_is_not_simple() {
        let tree = parsed(&method_body("if (a) b(); else if (c) d();"));
        let nested = tree
            .root()
            .descendants()
            .into_iter()
            .filter(|n| n.is(SyntaxKind::IfStatement))
            .nth(1)
            .expect("else-if branch");

        assert!(!SimpleIfStatementInfo::create(nested, MatchOptions::default()).success());
    }

    #[test]
    fn simple_if_else_exposes_branches() {
        let tree = parsed(&method_body("if ((ready)) go(); else wait();"));
        let head = first(&tree, SyntaxKind::IfStatement);

        let info = SimpleIfElseInfo::create(head, MatchOptions::default());
        assert_eq!(info.condition().map(|n| n.text()), Some("ready"));
        assert_eq!(info.when_true().map(|n| n.text()), Some("go();"));
        assert_eq!(info.when_false().map(|n| n.text()), Some("wait();"));
    }
}
