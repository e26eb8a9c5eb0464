//! Matchers for `receiver.Name(arguments)` invocations.

use contour_syntax::{SyntaxKind, SyntaxNode};

use crate::options::MatchOptions;
use crate::support::{accept, candidate, enclosing_statement, gate, statement_expression};

/// `expression.Name(arguments)`.
///
/// Pointer member access (`p->M()`) and conditional access (`a?.M()`) do not
/// match.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SimpleMemberInvocationExpressionInfo<'t> {
    invocation_expression: Option<SyntaxNode<'t>>,
    member_access: Option<SyntaxNode<'t>>,
    expression: Option<SyntaxNode<'t>>,
    name: Option<SyntaxNode<'t>>,
    argument_list: Option<SyntaxNode<'t>>,
}

impl<'t> SimpleMemberInvocationExpressionInfo<'t> {
    /// Matches a member invocation.
    #[must_use]
    pub fn create(node: SyntaxNode<'t>, options: MatchOptions) -> Self {
        Self::try_create(candidate(node, options), options).unwrap_or_default()
    }

    fn try_create(node: SyntaxNode<'t>, options: MatchOptions) -> Option<Self> {
        if !node.is(SyntaxKind::InvocationExpression) {
            return None;
        }
        let member_access = node
            .child_by_field("function")
            .or_else(|| node.first_child())
            .filter(|n| n.is(SyntaxKind::MemberAccessExpression))?;
        if member_access.token("->").is_some() {
            return None;
        }
        let expression = gate(
            member_access
                .child_by_field("expression")
                .or_else(|| member_access.first_child()),
            options.with_walk_down_parentheses(false),
        )?;
        let name = accept(
            member_access
                .child_by_field("name")
                .or_else(|| member_access.last_child()),
            options,
        )
        .filter(|n| n.is(SyntaxKind::Identifier) || n.is(SyntaxKind::GenericName))?;
        let argument_list = accept(
            node.child_by_field("arguments")
                .or_else(|| node.first_child_of_kind(SyntaxKind::ArgumentList)),
            options,
        )?;
        Some(Self {
            invocation_expression: Some(node),
            member_access: Some(member_access),
            expression: Some(expression),
            name: Some(name),
            argument_list: Some(argument_list),
        })
    }

    /// The matched invocation.
    #[must_use]
    pub const fn invocation_expression(&self) -> Option<SyntaxNode<'t>> {
        self.invocation_expression
    }

    /// The `expression.Name` member access.
    #[must_use]
    pub const fn member_access(&self) -> Option<SyntaxNode<'t>> {
        self.member_access
    }

    /// The receiver.
    #[must_use]
    pub const fn expression(&self) -> Option<SyntaxNode<'t>> {
        self.expression
    }

    /// The invoked member's name, possibly generic.
    #[must_use]
    pub const fn name(&self) -> Option<SyntaxNode<'t>> {
        self.name
    }

    /// The parenthesised argument list.
    #[must_use]
    pub const fn argument_list(&self) -> Option<SyntaxNode<'t>> {
        self.argument_list
    }

    /// The arguments, in source order.
    #[must_use]
    pub fn arguments(&self) -> Vec<SyntaxNode<'t>> {
        self.argument_list
            .map(|list| list.children_of_kind(SyntaxKind::Argument))
            .unwrap_or_default()
    }

    /// The member name without type arguments.
    #[must_use]
    pub fn name_text(&self) -> Option<&'t str> {
        let name = self.name?;
        if name.is(SyntaxKind::GenericName) {
            name.first_child_of_kind(SyntaxKind::Identifier)
                .map(|identifier| identifier.text())
        } else {
            Some(name.text())
        }
    }

    /// Whether the match succeeded.
    #[must_use]
    pub const fn success(&self) -> bool {
        self.invocation_expression.is_some()
    }
}

/// `expression.Name(arguments);`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SimpleMemberInvocationStatementInfo<'t> {
    statement: Option<SyntaxNode<'t>>,
    invocation: SimpleMemberInvocationExpressionInfo<'t>,
}

impl<'t> SimpleMemberInvocationStatementInfo<'t> {
    /// Matches an expression statement whose expression is a member
    /// invocation. Accepts the statement or the invocation.
    #[must_use]
    pub fn create(node: SyntaxNode<'t>, options: MatchOptions) -> Self {
        let statement = if node.is(SyntaxKind::InvocationExpression) {
            enclosing_statement(node)
        } else {
            Some(node)
        };
        let Some(expression) = statement.and_then(statement_expression) else {
            return Self::default();
        };
        let invocation = SimpleMemberInvocationExpressionInfo::create(
            expression,
            options.with_walk_down_parentheses(false),
        );
        if !invocation.success() {
            return Self::default();
        }
        Self {
            statement,
            invocation,
        }
    }

    /// The matched statement.
    #[must_use]
    pub const fn statement(&self) -> Option<SyntaxNode<'t>> {
        self.statement
    }

    /// The invocation inside the statement.
    #[must_use]
    pub const fn invocation(&self) -> SimpleMemberInvocationExpressionInfo<'t> {
        self.invocation
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
    use crate::tests::support::{arrow_body, arrow_expression, first, method_body, parsed};

    #[rstest]
    #[case("obj.Method(x)", Some(("obj", "Method", 1)))]
    #[case("obj.Method()", Some(("obj", "Method", 0)))]
    #[case("a.b.Select<int>(x, y)", Some(("a.b", "Select", 2)))]
    #[case("(obj.Method(x))", Some(("obj", "Method", 1)))]
    #[case("Method(x)", None)]
    #[case("obj?.Method(x)", None)]
    fn member_invocations_are_recognised(
        #[case] expression: &str,
        #[case] expected: Option<(&str, &str, usize)>,
    ) {
        let tree = parsed(&arrow_body(expression));
        let info = SimpleMemberInvocationExpressionInfo::create(
            arrow_expression(&tree),
            MatchOptions::default(),
        );

        let actual = info.success().then(|| {
            (
                info.expression().map_or("", |n| n.text()),
                info.name_text().unwrap_or_default(),
                info.arguments().len(),
            )
        });
        assert_eq!(actual, expected);
    }

    #[test]
    fn statement_wraps_invocation() {
        let tree = parsed(&method_body("list.Add(item);"));
        let statement = first(&tree, SyntaxKind::ExpressionStatement);
        let invocation = first(&tree, SyntaxKind::InvocationExpression);

        let info = SimpleMemberInvocationStatementInfo::create(statement, MatchOptions::default());
        assert!(info.success());
        assert_eq!(info.invocation().invocation_expression(), Some(invocation));
        assert_eq!(
            SimpleMemberInvocationStatementInfo::create(invocation, MatchOptions::default()),
            info
        );
    }

    #[test]
    fn invocation_outside_statement_has_no_statement_form() {
        let tree = parsed(&arrow_body("list.Count()"));
        let info = SimpleMemberInvocationStatementInfo::create(
            arrow_expression(&tree),
            MatchOptions::default(),
        );
        assert!(!info.success());
    }
}
