//! Recognises the ways C# spells "is this null?".

use std::convert::Infallible;

use bitflags::bitflags;
use contour_syntax::{BinaryOperator, PrefixOperator, SyntaxKind, SyntaxNode};
use tokio_util::sync::CancellationToken;
use tracing::trace;

use crate::error::ShapeError;
use crate::options::MatchOptions;
use crate::semantic::{SemanticModel, SyntacticSemanticModel};
use crate::support::{SEMANTIC_TARGET, accept, field_or, gate, operator_text, unwrap_pattern};

bitflags! {
    /// The null-check forms a matcher may accept or has found.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct NullCheckStyles: u8 {
        /// `x == null`
        const EQUALS_TO_NULL = 1;
        /// `x != null`
        const NOT_EQUALS_TO_NULL = 1 << 1;
        /// `x is null`
        const IS_NULL = 1 << 2;
        /// `!(x is null)` or `x is not null`
        const NOT_IS_NULL = 1 << 3;
        /// `x.HasValue`
        const HAS_VALUE = 1 << 4;
        /// `!x.HasValue`
        const NOT_HAS_VALUE = 1 << 5;

        /// Comparisons with the null literal.
        const COMPARISON_TO_NULL = Self::EQUALS_TO_NULL.bits() | Self::NOT_EQUALS_TO_NULL.bits();
        /// `is null` patterns, plain or negated.
        const IS_PATTERN = Self::IS_NULL.bits() | Self::NOT_IS_NULL.bits();
        /// `Nullable<T>.HasValue` reads.
        const HAS_VALUE_PROPERTY = Self::HAS_VALUE.bits() | Self::NOT_HAS_VALUE.bits();
        /// Every form that is true when the operand is null.
        const CHECKING_NULL =
            Self::EQUALS_TO_NULL.bits() | Self::IS_NULL.bits() | Self::NOT_HAS_VALUE.bits();
        /// Every form that is true when the operand is not null.
        const CHECKING_NOT_NULL =
            Self::NOT_EQUALS_TO_NULL.bits() | Self::NOT_IS_NULL.bits() | Self::HAS_VALUE.bits();
        /// Every form.
        const ALL = Self::COMPARISON_TO_NULL.bits()
            | Self::IS_PATTERN.bits()
            | Self::HAS_VALUE_PROPERTY.bits();
    }
}

impl NullCheckStyles {
    /// The styles [`NullCheckExpressionInfo::create`] accepts when the caller
    /// has no semantic model.
    pub const SYNTACTIC: Self = Self::COMPARISON_TO_NULL.union(Self::IS_PATTERN);
}

impl Default for NullCheckStyles {
    fn default() -> Self {
        Self::empty()
    }
}

/// A null check and the expression it tests.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NullCheckExpressionInfo<'t> {
    null_check_expression: Option<SyntaxNode<'t>>,
    expression: Option<SyntaxNode<'t>>,
    style: NullCheckStyles,
}

/// Optional semantic context threaded through one match.
struct Query<'a, M> {
    model: Option<&'a M>,
    cancellation: &'a CancellationToken,
    allowed: NullCheckStyles,
    options: MatchOptions,
}

impl<M: SemanticModel> Query<'_, M> {
    fn allows(&self, style: NullCheckStyles) -> bool {
        self.allowed.intersects(style)
    }

    /// Whether `member_access` reads `Nullable<T>.HasValue`, returning its
    /// receiver.
    fn has_value_receiver<'t>(
        &self,
        member_access: SyntaxNode<'t>,
    ) -> Result<Option<SyntaxNode<'t>>, M::Error> {
        if !member_access.is(SyntaxKind::MemberAccessExpression)
            || member_access.token("->").is_some()
        {
            return Ok(None);
        }
        let Some(name) = member_access.child_by_field("name") else {
            return Ok(None);
        };
        if !name.is(SyntaxKind::Identifier) || name.text() != "HasValue" {
            return Ok(None);
        }
        let Some(model) = self.model else {
            return Ok(None);
        };
        let is_nullable = model.is_nullable_value_property(name, self.cancellation)?;
        trace!(
            target: SEMANTIC_TARGET,
            position = %name.start_position(),
            is_nullable,
            "resolved HasValue"
        );
        if !is_nullable {
            return Ok(None);
        }
        Ok(accept(
            field_or(member_access, "expression", |n| n.first_child()),
            self.options,
        ))
    }

    fn matched<'t>(
        node: SyntaxNode<'t>,
        expression: SyntaxNode<'t>,
        style: NullCheckStyles,
    ) -> NullCheckExpressionInfo<'t> {
        NullCheckExpressionInfo {
            null_check_expression: Some(node),
            expression: Some(expression),
            style,
        }
    }

    fn run<'t>(&self, node: SyntaxNode<'t>) -> Result<NullCheckExpressionInfo<'t>, M::Error> {
        let Some(expression) = gate(Some(node), self.options) else {
            return Ok(NullCheckExpressionInfo::default());
        };
        match expression.kind() {
            SyntaxKind::BinaryExpression => self.comparison(expression),
            SyntaxKind::MemberAccessExpression if self.allows(NullCheckStyles::HAS_VALUE) => {
                Ok(self
                    .has_value_receiver(expression)?
                    .map(|receiver| Self::matched(expression, receiver, NullCheckStyles::HAS_VALUE))
                    .unwrap_or_default())
            }
            SyntaxKind::IsPatternExpression => Ok(self.is_null_pattern(expression, expression)),
            SyntaxKind::PrefixUnaryExpression => self.negation(expression),
            _ => Ok(NullCheckExpressionInfo::default()),
        }
    }

    fn comparison<'t>(
        &self,
        binary: SyntaxNode<'t>,
    ) -> Result<NullCheckExpressionInfo<'t>, M::Error> {
        let equals = match operator_text(binary).and_then(BinaryOperator::from_token) {
            Some(BinaryOperator::Equals) => true,
            Some(BinaryOperator::NotEquals) => false,
            _ => return Ok(NullCheckExpressionInfo::default()),
        };
        let Some(left) = gate(field_or(binary, "left", |n| n.first_child()), self.options) else {
            return Ok(NullCheckExpressionInfo::default());
        };
        let Some(right) = gate(field_or(binary, "right", |n| n.last_child()), self.options) else {
            return Ok(NullCheckExpressionInfo::default());
        };
        let info = self.compared_with(binary, equals, left, right)?;
        if info.success() {
            return Ok(info);
        }
        self.compared_with(binary, equals, right, left)
    }

    /// Matches `constant op other` for a null or boolean `constant`.
    fn compared_with<'t>(
        &self,
        binary: SyntaxNode<'t>,
        equals: bool,
        constant: SyntaxNode<'t>,
        other: SyntaxNode<'t>,
    ) -> Result<NullCheckExpressionInfo<'t>, M::Error> {
        let style = match (constant.kind(), constant.text()) {
            (SyntaxKind::NullLiteral, _) => {
                let null_style = if equals {
                    NullCheckStyles::EQUALS_TO_NULL
                } else {
                    NullCheckStyles::NOT_EQUALS_TO_NULL
                };
                return Ok(if self.allows(null_style) {
                    Self::matched(binary, other, null_style)
                } else {
                    NullCheckExpressionInfo::default()
                });
            }
            (SyntaxKind::BooleanLiteral, "true") if equals => NullCheckStyles::HAS_VALUE,
            (SyntaxKind::BooleanLiteral, "true") => NullCheckStyles::NOT_HAS_VALUE,
            (SyntaxKind::BooleanLiteral, "false") if equals => NullCheckStyles::NOT_HAS_VALUE,
            (SyntaxKind::BooleanLiteral, "false") => NullCheckStyles::HAS_VALUE,
            _ => return Ok(NullCheckExpressionInfo::default()),
        };
        if !self.allows(style) {
            return Ok(NullCheckExpressionInfo::default());
        }
        Ok(self
            .has_value_receiver(other)?
            .map(|receiver| Self::matched(binary, receiver, style))
            .unwrap_or_default())
    }

    /// Matches `x is null` and `x is not null`. `anchor` is the reported
    /// null-check node, which differs from `pattern_test` under `!`.
    fn is_null_pattern<'t>(
        &self,
        anchor: SyntaxNode<'t>,
        pattern_test: SyntaxNode<'t>,
    ) -> NullCheckExpressionInfo<'t> {
        let Some(pattern) = field_or(pattern_test, "pattern", |n| n.last_child()) else {
            return NullCheckExpressionInfo::default();
        };
        let negated_in_pattern = pattern.is(SyntaxKind::NegatedPattern);
        let inner = if negated_in_pattern {
            pattern.first_child().map(unwrap_pattern)
        } else {
            Some(unwrap_pattern(pattern))
        };
        if !inner.is_some_and(|n| n.is(SyntaxKind::NullLiteral)) {
            return NullCheckExpressionInfo::default();
        }
        let negated_outside = anchor != pattern_test;
        let style = if negated_in_pattern == negated_outside {
            NullCheckStyles::IS_NULL
        } else {
            NullCheckStyles::NOT_IS_NULL
        };
        if !self.allows(style) {
            return NullCheckExpressionInfo::default();
        }
        gate(
            field_or(pattern_test, "expression", |n| n.first_child()),
            self.options,
        )
        .map(|tested| Self::matched(anchor, tested, style))
        .unwrap_or_default()
    }

    fn negation<'t>(&self, prefix: SyntaxNode<'t>) -> Result<NullCheckExpressionInfo<'t>, M::Error> {
        if operator_text(prefix).and_then(PrefixOperator::from_token)
            != Some(PrefixOperator::LogicalNot)
        {
            return Ok(NullCheckExpressionInfo::default());
        }
        // `!(x is not null)` negates twice and yields IS_NULL.
        if !self.allows(NullCheckStyles::NOT_HAS_VALUE | NullCheckStyles::IS_PATTERN) {
            return Ok(NullCheckExpressionInfo::default());
        }
        let Some(operand) = gate(prefix.first_child(), self.options) else {
            return Ok(NullCheckExpressionInfo::default());
        };
        match operand.kind() {
            SyntaxKind::MemberAccessExpression if self.allows(NullCheckStyles::NOT_HAS_VALUE) => {
                Ok(self
                    .has_value_receiver(operand)?
                    .map(|receiver| Self::matched(prefix, receiver, NullCheckStyles::NOT_HAS_VALUE))
                    .unwrap_or_default())
            }
            SyntaxKind::IsPatternExpression => Ok(self.is_null_pattern(prefix, operand)),
            _ => Ok(NullCheckExpressionInfo::default()),
        }
    }
}

impl<'t> NullCheckExpressionInfo<'t> {
    /// Matches a null check using syntax alone.
    ///
    /// Pass [`NullCheckStyles::SYNTACTIC`] to accept every form that needs no
    /// semantic model.
    ///
    /// # Errors
    ///
    /// Returns [`ShapeError::SemanticModelRequired`] when `allowed` includes
    /// a `HasValue` style, which cannot be decided without binding.
    pub fn create(
        node: SyntaxNode<'t>,
        allowed: NullCheckStyles,
        options: MatchOptions,
    ) -> Result<Self, ShapeError> {
        if allowed.intersects(NullCheckStyles::HAS_VALUE_PROPERTY) {
            return Err(ShapeError::semantic_model_required("HasValue null checks"));
        }
        let cancellation = CancellationToken::new();
        let query = Query::<SyntacticSemanticModel> {
            model: None,
            cancellation: &cancellation,
            allowed,
            options,
        };
        let result: Result<Self, Infallible> = query.run(node);
        Ok(result.unwrap_or_else(|never| match never {}))
    }

    /// Matches a null check, consulting `model` for `HasValue` forms.
    ///
    /// # Errors
    ///
    /// Propagates the model's error unchanged.
    pub fn create_with_model<M: SemanticModel>(
        node: SyntaxNode<'t>,
        model: &M,
        allowed: NullCheckStyles,
        options: MatchOptions,
        cancellation: &CancellationToken,
    ) -> Result<Self, M::Error> {
        let query = Query {
            model: Some(model),
            cancellation,
            allowed,
            options,
        };
        query.run(node)
    }

    /// The whole null-check expression.
    #[must_use]
    pub const fn null_check_expression(&self) -> Option<SyntaxNode<'t>> {
        self.null_check_expression
    }

    /// The expression being tested for null.
    #[must_use]
    pub const fn expression(&self) -> Option<SyntaxNode<'t>> {
        self.expression
    }

    /// The form that matched. Empty on failure.
    #[must_use]
    pub const fn style(&self) -> NullCheckStyles {
        self.style
    }

    /// Whether the check is true when the expression is null.
    #[must_use]
    pub const fn is_checking_null(&self) -> bool {
        self.style.intersects(NullCheckStyles::CHECKING_NULL)
    }

    /// Whether the check is true when the expression is not null.
    #[must_use]
    pub const fn is_checking_not_null(&self) -> bool {
        self.style.intersects(NullCheckStyles::CHECKING_NOT_NULL)
    }

    /// Whether the match succeeded.
    #[must_use]
    pub const fn success(&self) -> bool {
        self.null_check_expression.is_some()
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;
    use crate::tests::support::{condition, if_condition, parsed};

    fn with_model(expression: &str, allowed: NullCheckStyles) -> (NullCheckStyles, String) {
        let tree = parsed(&condition(expression));
        let info = NullCheckExpressionInfo::create_with_model(
            if_condition(&tree),
            &SyntacticSemanticModel,
            allowed,
            MatchOptions::default(),
            &CancellationToken::new(),
        )
        .unwrap_or_else(|never| match never {});
        (
            info.style(),
            info.expression().map(|n| n.text().to_owned()).unwrap_or_default(),
        )
    }

    #[rstest]
    #[case("x == null", NullCheckStyles::EQUALS_TO_NULL)]
    #[case("null == x", NullCheckStyles::EQUALS_TO_NULL)]
    #[case("x != null", NullCheckStyles::NOT_EQUALS_TO_NULL)]
    #[case("(x) is null", NullCheckStyles::IS_NULL)]
    #[case("!(x is null)", NullCheckStyles::NOT_IS_NULL)]
    #[case("x is not null", NullCheckStyles::NOT_IS_NULL)]
    #[case("!(x is not null)", NullCheckStyles::IS_NULL)]
    #[case("((/* why */ x == null))", NullCheckStyles::EQUALS_TO_NULL)]
    #[case("x.HasValue", NullCheckStyles::HAS_VALUE)]
    #[case("!x.HasValue", NullCheckStyles::NOT_HAS_VALUE)]
    #[case("x.HasValue == true", NullCheckStyles::HAS_VALUE)]
    #[case("false == x.HasValue", NullCheckStyles::NOT_HAS_VALUE)]
    #[case("x.HasValue != false", NullCheckStyles::HAS_VALUE)]
    #[case("x.HasValue != true", NullCheckStyles::NOT_HAS_VALUE)]
    fn every_form_is_recognised(#[case] expression: &str, #[case] expected: NullCheckStyles) {
        let (style, tested) = with_model(expression, NullCheckStyles::ALL);
        assert_eq!(style, expected, "{expression}");
        assert_eq!(tested, "x", "{expression}");
    }

    #[rstest]
    #[case("x == null", NullCheckStyles::NOT_EQUALS_TO_NULL)]
    #[case("x.HasValue", NullCheckStyles::COMPARISON_TO_NULL)]
    #[case("!(x is null)", NullCheckStyles::IS_NULL)]
    fn disallowed_styles_do_not_match(#[case] expression: &str, #[case] allowed: NullCheckStyles) {
        let (style, _) = with_model(expression, allowed);
        assert!(style.is_empty());
    }

    #[rstest]
    #[case("!(x is not null)", NullCheckStyles::IS_NULL)]
    #[case("!(x is null)", NullCheckStyles::NOT_IS_NULL)]
    #[case("!x.HasValue", NullCheckStyles::NOT_HAS_VALUE)]
    fn negations_need_only_their_resulting_style(
        #[case] expression: &str,
        #[case] allowed: NullCheckStyles,
    ) {
        let (style, tested) = with_model(expression, allowed);
        assert_eq!(style, allowed, "{expression}");
        assert_eq!(tested, "x");
    }

    #[rstest]
    #[case("x == 1")]
    #[case("x.Value")]
    #[case("x is string")]
    #[case("-x")]
    fn other_expressions_are_not_null_checks(#[case] expression: &str) {
        let (style, tested) = with_model(expression, NullCheckStyles::ALL);
        assert!(style.is_empty());
        assert!(tested.is_empty());
    }

    #[test]
    fn create_without_model_rejects_has_value_styles() {
        let tree = parsed(&condition("x != null"));
        let result = NullCheckExpressionInfo::create(
            if_condition(&tree),
            NullCheckStyles::ALL,
            MatchOptions::default(),
        );
        assert!(matches!(result, Err(ShapeError::SemanticModelRequired { .. })));
    }

    #[test]
    fn create_without_model_matches_syntactic_forms() {
        let tree = parsed(&condition("null != (value)"));
        let info = NullCheckExpressionInfo::create(
            if_condition(&tree),
            NullCheckStyles::SYNTACTIC,
            MatchOptions::default(),
        )
        .expect("syntactic styles need no model");

        assert!(info.is_checking_not_null());
        assert!(!info.is_checking_null());
        assert_eq!(info.expression().map(|n| n.text()), Some("value"));
    }

    #[test]
    fn model_errors_propagate() {
        struct Failing;

        impl SemanticModel for Failing {
            type Error = &'static str;

            fn is_nullable_value_property(
                &self,
                _name: SyntaxNode<'_>,
                _cancellation: &CancellationToken,
            ) -> Result<bool, Self::Error> {
                Err("binding failed")
            }

            fn is_string_concatenation(
                &self,
                _add_expression: SyntaxNode<'_>,
                _cancellation: &CancellationToken,
            ) -> Result<bool, Self::Error> {
                Ok(false)
            }
        }

        let tree = parsed(&condition("x.HasValue"));
        let result = NullCheckExpressionInfo::create_with_model(
            if_condition(&tree),
            &Failing,
            NullCheckStyles::ALL,
            MatchOptions::default(),
            &CancellationToken::new(),
        );
        assert_eq!(result, Err("binding failed"));
    }
}
