//! Matchers for assignments and assignment statements.

use contour_syntax::{AssignmentOperator, SyntaxKind, SyntaxNode};

use crate::options::MatchOptions;
use crate::support::{
    candidate, enclosing_statement, field_or, gate, operator_text, statement_expression,
};

/// `left op= right` for any assignment operator.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AssignmentExpressionInfo<'t> {
    assignment_expression: Option<SyntaxNode<'t>>,
    left: Option<SyntaxNode<'t>>,
    operator: Option<AssignmentOperator>,
    right: Option<SyntaxNode<'t>>,
}

impl<'t> AssignmentExpressionInfo<'t> {
    /// Matches any assignment expression.
    #[must_use]
    pub fn create(node: SyntaxNode<'t>, options: MatchOptions) -> Self {
        Self::try_create(candidate(node, options), options).unwrap_or_default()
    }

    fn try_create(node: SyntaxNode<'t>, options: MatchOptions) -> Option<Self> {
        if !node.is(SyntaxKind::AssignmentExpression) {
            return None;
        }
        let operator = operator_text(node).and_then(AssignmentOperator::from_token)?;
        let left = gate(field_or(node, "left", |n| n.first_child()), options)?;
        let right = gate(field_or(node, "right", |n| n.last_child()), options)?;
        Some(Self {
            assignment_expression: Some(node),
            left: Some(left),
            operator: Some(operator),
            right: Some(right),
        })
    }

    /// The matched assignment.
    #[must_use]
    pub const fn assignment_expression(&self) -> Option<SyntaxNode<'t>> {
        self.assignment_expression
    }

    /// The assignment target.
    #[must_use]
    pub const fn left(&self) -> Option<SyntaxNode<'t>> {
        self.left
    }

    /// The operator.
    #[must_use]
    pub const fn operator(&self) -> Option<AssignmentOperator> {
        self.operator
    }

    /// The assigned value.
    #[must_use]
    pub const fn right(&self) -> Option<SyntaxNode<'t>> {
        self.right
    }

    /// Whether the match succeeded.
    #[must_use]
    pub const fn success(&self) -> bool {
        self.assignment_expression.is_some()
    }
}

/// `left = right`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SimpleAssignmentExpressionInfo<'t> {
    assignment_expression: Option<SyntaxNode<'t>>,
    left: Option<SyntaxNode<'t>>,
    right: Option<SyntaxNode<'t>>,
}

impl<'t> SimpleAssignmentExpressionInfo<'t> {
    /// Matches an assignment that uses plain `=`.
    #[must_use]
    pub fn create(node: SyntaxNode<'t>, options: MatchOptions) -> Self {
        let info = AssignmentExpressionInfo::create(node, options);
        if info.operator() != Some(AssignmentOperator::Simple) {
            return Self::default();
        }
        Self {
            assignment_expression: info.assignment_expression(),
            left: info.left(),
            right: info.right(),
        }
    }

    /// The matched assignment.
    #[must_use]
    pub const fn assignment_expression(&self) -> Option<SyntaxNode<'t>> {
        self.assignment_expression
    }

    /// The assignment target.
    #[must_use]
    pub const fn left(&self) -> Option<SyntaxNode<'t>> {
        self.left
    }

    /// The assigned value.
    #[must_use]
    pub const fn right(&self) -> Option<SyntaxNode<'t>> {
        self.right
    }

    /// Whether the match succeeded.
    #[must_use]
    pub const fn success(&self) -> bool {
        self.assignment_expression.is_some()
    }
}

/// `left = right;`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SimpleAssignmentStatementInfo<'t> {
    statement: Option<SyntaxNode<'t>>,
    assignment: SimpleAssignmentExpressionInfo<'t>,
}

impl<'t> SimpleAssignmentStatementInfo<'t> {
    /// Matches an expression statement that wraps a simple assignment.
    ///
    /// Accepts either the statement or the assignment inside it.
    #[must_use]
    pub fn create(node: SyntaxNode<'t>, options: MatchOptions) -> Self {
        let statement = if node.is(SyntaxKind::AssignmentExpression) {
            enclosing_statement(node)
        } else {
            Some(node)
        };
        let Some(statement) = statement else {
            return Self::default();
        };
        let Some(expression) = statement_expression(statement) else {
            return Self::default();
        };
        let assignment = SimpleAssignmentExpressionInfo::create(
            expression,
            options.with_walk_down_parentheses(false),
        );
        if !assignment.success() {
            return Self::default();
        }
        Self {
            statement: Some(statement),
            assignment,
        }
    }

    /// The matched statement.
    #[must_use]
    pub const fn statement(&self) -> Option<SyntaxNode<'t>> {
        self.statement
    }

    /// The assignment inside the statement.
    #[must_use]
    pub const fn assignment(&self) -> SimpleAssignmentExpressionInfo<'t> {
        self.assignment
    }

    /// The assignment target.
    #[must_use]
    pub const fn left(&self) -> Option<SyntaxNode<'t>> {
        self.assignment.left()
    }

    /// The assigned value.
    #[must_use]
    pub const fn right(&self) -> Option<SyntaxNode<'t>> {
        self.assignment.right()
    }

    /// Whether the match succeeded.
    #[must_use]
    pub const fn success(&self) -> bool {
        self.statement.is_some()
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;
    use crate::tests::support::{first, method_body, parsed};

    #[rstest]
    #[case("x = 1;", AssignmentOperator::Simple)]
    #[case("x += 1;", AssignmentOperator::Add)]
    #[case("x ??= y;", AssignmentOperator::Coalesce)]
    fn assignment_operator_is_decoded(#[case] statement: &str, #[case] expected: AssignmentOperator) {
        let tree = parsed(&method_body(statement));
        let node = first(&tree, SyntaxKind::AssignmentExpression);

        let info = AssignmentExpressionInfo::create(node, MatchOptions::default());
        assert_eq!(info.operator(), Some(expected));
        assert_eq!(info.left().map(|n| n.text()), Some("x"));
    }

    #[rstest]
    #[case("x = (1);", true)]
    #[case("x -= 1;", false)]
    fn simple_assignment_requires_plain_equals(#[case] statement: &str, #[case] expected: bool) {
        let tree = parsed(&method_body(statement));
        let node = first(&tree, SyntaxKind::AssignmentExpression);

        let info = SimpleAssignmentExpressionInfo::create(node, MatchOptions::default());
        assert_eq!(info.success(), expected);
        if expected {
            assert_eq!(info.right().map(|n| n.text()), Some("1"));
        }
    }

    #[test]
    fn statement_matches_from_either_end() {
        let tree = parsed(&method_body("a.b = c;"));
        let statement = first(&tree, SyntaxKind::ExpressionStatement);
        let assignment = first(&tree, SyntaxKind::AssignmentExpression);

        let from_statement = SimpleAssignmentStatementInfo::create(statement, MatchOptions::default());
        let from_assignment =
            SimpleAssignmentStatementInfo::create(assignment, MatchOptions::default());

        assert!(from_statement.success());
        assert_eq!(from_statement, from_assignment);
        assert_eq!(from_statement.left().map(|n| n.text()), Some("a.b"));
    }

    #[test]
    fn missing_right_side_is_rejected_unless_allowed() {
        let tree = parsed(&method_body("x = ;"));
        let node = first(&tree, SyntaxKind::AssignmentExpression);

        let strict = AssignmentExpressionInfo::create(node, MatchOptions::default());
        let lenient =
            AssignmentExpressionInfo::create(node, MatchOptions::default().with_allow_missing(true));

        assert!(!strict.success());
        assert_eq!(strict, AssignmentExpressionInfo::default());
        assert!(lenient.success());
        assert_eq!(lenient.left().map(|n| n.text()), Some("x"));
        assert!(lenient.right().is_some_and(|n| n.is_missing()));
    }

    #[test]
    fn compound_assignment_statement_is_not_simple() {
        let tree = parsed(&method_body("x |= y;"));
        let statement = first(&tree, SyntaxKind::ExpressionStatement);

        let info = SimpleAssignmentStatementInfo::create(statement, MatchOptions::default());
        assert!(!info.success());
        assert_eq!(info, SimpleAssignmentStatementInfo::default());
    }
}
