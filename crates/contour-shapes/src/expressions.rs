//! Matchers for `as`, `is`, binary and conditional expressions.

use contour_syntax::{BinaryOperator, SyntaxKind, SyntaxNode};

use crate::error::ShapeError;
use crate::options::MatchOptions;
use crate::support::{
    accept, candidate, expect_kind, field_or, gate, operator_text, unwrap_pattern,
};

/// `expression as Type`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AsExpressionInfo<'t> {
    as_expression: Option<SyntaxNode<'t>>,
    expression: Option<SyntaxNode<'t>>,
    ty: Option<SyntaxNode<'t>>,
}

impl<'t> AsExpressionInfo<'t> {
    /// Matches an `as` expression.
    #[must_use]
    pub fn create(node: SyntaxNode<'t>, options: MatchOptions) -> Self {
        Self::try_create(candidate(node, options), options).unwrap_or_default()
    }

    fn try_create(node: SyntaxNode<'t>, options: MatchOptions) -> Option<Self> {
        if !node.is(SyntaxKind::AsExpression) {
            return None;
        }
        let expression = gate(field_or(node, "left", |n| n.first_child()), options)?;
        let ty = accept(field_or(node, "right", |n| n.last_child()), options)?;
        Some(Self {
            as_expression: Some(node),
            expression: Some(expression),
            ty: Some(ty),
        })
    }

    /// The matched `as` expression.
    #[must_use]
    pub const fn as_expression(&self) -> Option<SyntaxNode<'t>> {
        self.as_expression
    }

    /// The converted operand.
    #[must_use]
    pub const fn expression(&self) -> Option<SyntaxNode<'t>> {
        self.expression
    }

    /// The target type.
    #[must_use]
    pub const fn ty(&self) -> Option<SyntaxNode<'t>> {
        self.ty
    }

    /// Whether the match succeeded.
    #[must_use]
    pub const fn success(&self) -> bool {
        self.as_expression.is_some()
    }
}

/// `expression is Type`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IsExpressionInfo<'t> {
    is_expression: Option<SyntaxNode<'t>>,
    expression: Option<SyntaxNode<'t>>,
    ty: Option<SyntaxNode<'t>>,
}

impl<'t> IsExpressionInfo<'t> {
    /// Matches a type-test `is` expression. Pattern forms such as `x is null`
    /// or `x is { }` are not type tests and do not match.
    #[must_use]
    pub fn create(node: SyntaxNode<'t>, options: MatchOptions) -> Self {
        Self::try_create(candidate(node, options), options).unwrap_or_default()
    }

    fn try_create(node: SyntaxNode<'t>, options: MatchOptions) -> Option<Self> {
        let (operand, type_node) = match node.kind() {
            SyntaxKind::IsExpression => (
                field_or(node, "left", |n| n.first_child()),
                field_or(node, "right", |n| n.last_child()),
            ),
            // `x is T` may surface as a pattern test whose pattern is a bare type.
            SyntaxKind::IsPatternExpression => {
                let pattern = field_or(node, "pattern", |n| n.last_child()).map(unwrap_pattern)?;
                if !pattern.kind().is_type_name() {
                    return None;
                }
                (field_or(node, "expression", |n| n.first_child()), Some(pattern))
            }
            _ => return None,
        };
        let expression = gate(operand, options)?;
        let ty = accept(type_node, options)?;
        Some(Self {
            is_expression: Some(node),
            expression: Some(expression),
            ty: Some(ty),
        })
    }

    /// The matched `is` expression.
    #[must_use]
    pub const fn is_expression(&self) -> Option<SyntaxNode<'t>> {
        self.is_expression
    }

    /// The tested operand.
    #[must_use]
    pub const fn expression(&self) -> Option<SyntaxNode<'t>> {
        self.expression
    }

    /// The tested type.
    #[must_use]
    pub const fn ty(&self) -> Option<SyntaxNode<'t>> {
        self.ty
    }

    /// Whether the match succeeded.
    #[must_use]
    pub const fn success(&self) -> bool {
        self.is_expression.is_some()
    }
}

/// `left op right` for any binary operator.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BinaryExpressionInfo<'t> {
    binary_expression: Option<SyntaxNode<'t>>,
    left: Option<SyntaxNode<'t>>,
    operator: Option<BinaryOperator>,
    right: Option<SyntaxNode<'t>>,
}

impl<'t> BinaryExpressionInfo<'t> {
    /// Matches any binary expression.
    #[must_use]
    pub fn create(node: SyntaxNode<'t>, options: MatchOptions) -> Self {
        Self::try_create(candidate(node, options), options).unwrap_or_default()
    }

    /// Matches a node the caller already knows to be a binary expression.
    ///
    /// # Errors
    ///
    /// Returns [`ShapeError::UnexpectedKind`] when `binary_expression` is not
    /// a binary expression.
    pub fn from_binary_expression(
        binary_expression: SyntaxNode<'t>,
        options: MatchOptions,
    ) -> Result<Self, ShapeError> {
        expect_kind(binary_expression, SyntaxKind::BinaryExpression)?;
        Ok(Self::try_create(binary_expression, options).unwrap_or_default())
    }

    fn try_create(node: SyntaxNode<'t>, options: MatchOptions) -> Option<Self> {
        if !node.is(SyntaxKind::BinaryExpression) {
            return None;
        }
        let operator = operator_text(node).and_then(BinaryOperator::from_token)?;
        let left = gate(field_or(node, "left", |n| n.first_child()), options)?;
        let right = gate(field_or(node, "right", |n| n.last_child()), options)?;
        Some(Self {
            binary_expression: Some(node),
            left: Some(left),
            operator: Some(operator),
            right: Some(right),
        })
    }

    /// The matched binary expression.
    #[must_use]
    pub const fn binary_expression(&self) -> Option<SyntaxNode<'t>> {
        self.binary_expression
    }

    /// The left operand.
    #[must_use]
    pub const fn left(&self) -> Option<SyntaxNode<'t>> {
        self.left
    }

    /// The operator.
    #[must_use]
    pub const fn operator(&self) -> Option<BinaryOperator> {
        self.operator
    }

    /// The right operand.
    #[must_use]
    pub const fn right(&self) -> Option<SyntaxNode<'t>> {
        self.right
    }

    /// Whether the match succeeded.
    #[must_use]
    pub const fn success(&self) -> bool {
        self.binary_expression.is_some()
    }

    /// Flattens the left-associative chain of this operator into its leaf
    /// operands, left to right.
    ///
    /// `a + b + c` yields `[a, b, c]`; `a + (b + c)` yields `[a, (b + c)]`
    /// because the parenthesized group is a leaf.
    #[must_use]
    pub fn expressions(&self) -> Vec<SyntaxNode<'t>> {
        let (Some(node), Some(operator)) = (self.binary_expression, self.operator) else {
            return Vec::new();
        };
        binary_chain(node, operator)
    }
}

/// Collects the leaves of a left-nested chain of `operator`, left to right.
pub(crate) fn binary_chain(node: SyntaxNode<'_>, operator: BinaryOperator) -> Vec<SyntaxNode<'_>> {
    let mut reversed = Vec::new();
    let mut current = node;
    loop {
        if let Some(right) = field_or(current, "right", |n| n.last_child()) {
            reversed.push(right);
        }
        let Some(left) = field_or(current, "left", |n| n.first_child()) else {
            break;
        };
        let continues = left.is(SyntaxKind::BinaryExpression)
            && operator_text(left).and_then(BinaryOperator::from_token) == Some(operator);
        if continues {
            current = left;
        } else {
            reversed.push(left);
            break;
        }
    }
    reversed.reverse();
    reversed
}

/// `condition ? when_true : when_false`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConditionalExpressionInfo<'t> {
    conditional_expression: Option<SyntaxNode<'t>>,
    condition: Option<SyntaxNode<'t>>,
    when_true: Option<SyntaxNode<'t>>,
    when_false: Option<SyntaxNode<'t>>,
}

impl<'t> ConditionalExpressionInfo<'t> {
    /// Matches a conditional expression.
    #[must_use]
    pub fn create(node: SyntaxNode<'t>, options: MatchOptions) -> Self {
        Self::try_create(candidate(node, options), options).unwrap_or_default()
    }

    fn try_create(node: SyntaxNode<'t>, options: MatchOptions) -> Option<Self> {
        if !node.is(SyntaxKind::ConditionalExpression) {
            return None;
        }
        let condition = gate(node.child_by_field("condition"), options)?;
        let when_true = gate(node.child_by_field("consequence"), options)?;
        let when_false = gate(node.child_by_field("alternative"), options)?;
        Some(Self {
            conditional_expression: Some(node),
            condition: Some(condition),
            when_true: Some(when_true),
            when_false: Some(when_false),
        })
    }

    /// The matched conditional expression.
    #[must_use]
    pub const fn conditional_expression(&self) -> Option<SyntaxNode<'t>> {
        self.conditional_expression
    }

    /// The condition.
    #[must_use]
    pub const fn condition(&self) -> Option<SyntaxNode<'t>> {
        self.condition
    }

    /// The value when the condition holds.
    #[must_use]
    pub const fn when_true(&self) -> Option<SyntaxNode<'t>> {
        self.when_true
    }

    /// The value otherwise.
    #[must_use]
    pub const fn when_false(&self) -> Option<SyntaxNode<'t>> {
        self.when_false
    }

    /// Whether the match succeeded.
    #[must_use]
    pub const fn success(&self) -> bool {
        self.conditional_expression.is_some()
    }
}

#[cfg(test)]
mod tests {
    use contour_syntax::parse;
    use rstest::rstest;

    use super::*;
    use crate::tests::support::{arrow_body, condition, if_condition, parsed};

    #[rstest]
    #[case("a + b + c", &["a", "b", "c"])]
    #[case("a + (b + c)", &["a", "(b + c)"])]
    #[case("a * b + c", &["a * b", "c"])]
    #[case("x && y && z && w", &["x", "y", "z", "w"])]
    fn chains_flatten_left_to_right(#[case] expression: &str, #[case] expected: &[&str]) {
        let parsed = parse(&arrow_body(expression)).expect("parse");
        let body = parsed
            .root()
            .first_descendant_of_kind(SyntaxKind::BinaryExpression)
            .expect("binary");

        let info = BinaryExpressionInfo::create(body, MatchOptions::default());
        let texts: Vec<&str> = info.expressions().iter().map(|e| e.text()).collect();
        assert_eq!(texts, expected);
    }

    #[test]
    fn binary_with_missing_operand_needs_allow_missing() {
        let tree = parsed(&condition("x == "));
        let binary = if_condition(&tree);

        let strict = BinaryExpressionInfo::create(binary, MatchOptions::default());
        let lenient =
            BinaryExpressionInfo::create(binary, MatchOptions::default().with_allow_missing(true));

        assert!(!strict.success());
        assert!(lenient.success());
        assert_eq!(lenient.left().map(|n| n.text()), Some("x"));
        assert!(lenient.right().is_some_and(|n| n.is_missing()));
    }

    #[test]
    fn binary_operands_are_unwrapped() {
        let parsed = parse(&arrow_body("((a)) - (b)")).expect("parse");
        let body = parsed
            .root()
            .first_descendant_of_kind(SyntaxKind::BinaryExpression)
            .expect("binary");

        let info = BinaryExpressionInfo::create(body, MatchOptions::default());
        assert!(info.success());
        assert_eq!(info.operator(), Some(BinaryOperator::Subtract));
        assert_eq!(info.left().map(|n| n.text()), Some("a"));
        assert_eq!(info.right().map(|n| n.text()), Some("b"));

        let raw = BinaryExpressionInfo::create(
            body,
            MatchOptions::default().with_walk_down_parentheses(false),
        );
        assert_eq!(raw.left().map(|n| n.text()), Some("((a))"));
    }

    #[test]
    fn typed_entry_point_rejects_other_kinds() {
        let parsed = parse(&arrow_body("a ? b : c")).expect("parse");
        let conditional = parsed
            .root()
            .first_descendant_of_kind(SyntaxKind::ConditionalExpression)
            .expect("conditional");

        let err = BinaryExpressionInfo::from_binary_expression(conditional, MatchOptions::default())
            .expect_err("wrong kind");
        assert!(matches!(err, ShapeError::UnexpectedKind { .. }));
    }

    #[test]
    fn conditional_exposes_branches() {
        let parsed = parse(&arrow_body("(a) ? b : (c)")).expect("parse");
        let conditional = parsed
            .root()
            .first_descendant_of_kind(SyntaxKind::ConditionalExpression)
            .expect("conditional");

        let info = ConditionalExpressionInfo::create(conditional, MatchOptions::default());
        assert_eq!(info.condition().map(|n| n.text()), Some("a"));
        assert_eq!(info.when_true().map(|n| n.text()), Some("b"));
        assert_eq!(info.when_false().map(|n| n.text()), Some("c"));
    }

    #[rstest]
    #[case("o as string", true)]
    #[case("o is string", false)]
    fn as_and_is_are_distinct(#[case] expression: &str, #[case] is_as: bool) {
        let parsed = parse(&arrow_body(expression)).expect("parse");
        let arrow = parsed
            .root()
            .first_descendant_of_kind(SyntaxKind::ArrowExpressionClause)
            .and_then(|a| a.first_child())
            .expect("arrow body");

        let as_info = AsExpressionInfo::create(arrow, MatchOptions::default());
        let is_info = IsExpressionInfo::create(arrow, MatchOptions::default());
        assert_eq!(as_info.success(), is_as);
        assert_eq!(is_info.success(), !is_as);
        let ty = if is_as { as_info.ty() } else { is_info.ty() };
        assert_eq!(ty.map(|n| n.text()), Some("string"));
        assert!(!BinaryExpressionInfo::create(arrow, MatchOptions::default()).success());
    }

    #[test]
    fn unrelated_node_yields_default() {
        let parsed = parse(&arrow_body("x")).expect("parse");
        let info = BinaryExpressionInfo::create(parsed.root(), MatchOptions::default());

        assert!(!info.success());
        assert_eq!(info, BinaryExpressionInfo::default());
        assert!(info.expressions().is_empty());
        assert_eq!(info.to_string(), "");
    }
}
