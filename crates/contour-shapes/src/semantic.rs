//! The boundary to semantic analysis.
//!
//! A handful of shapes cannot be decided from syntax alone: whether
//! `x.HasValue` reads `Nullable<T>.HasValue`, or whether `a + b` is string
//! concatenation rather than a user-defined operator. Those matchers consult
//! a caller-supplied [`SemanticModel`] and propagate its errors unchanged.

use std::convert::Infallible;

use contour_syntax::{BinaryOperator, SyntaxKind, SyntaxNode, walk_down_parentheses};
use tokio_util::sync::CancellationToken;

/// Semantic queries the shape matchers depend on.
///
/// Implementations typically sit on top of a compiler's binding results.
/// The cancellation token is forwarded untouched; matchers never inspect it.
pub trait SemanticModel {
    /// Error raised when a query cannot be answered.
    type Error;

    /// Whether `name`, the name of a member access, binds to a property of
    /// `System.Nullable<T>`.
    ///
    /// # Errors
    ///
    /// Returns the model's error when binding fails or is cancelled.
    fn is_nullable_value_property(
        &self,
        name: SyntaxNode<'_>,
        cancellation: &CancellationToken,
    ) -> Result<bool, Self::Error>;

    /// Whether the binary `+` expression resolves to the built-in string
    /// concatenation operator.
    ///
    /// # Errors
    ///
    /// Returns the model's error when binding fails or is cancelled.
    fn is_string_concatenation(
        &self,
        add_expression: SyntaxNode<'_>,
        cancellation: &CancellationToken,
    ) -> Result<bool, Self::Error>;
}

impl<M: SemanticModel + ?Sized> SemanticModel for &M {
    type Error = M::Error;

    fn is_nullable_value_property(
        &self,
        name: SyntaxNode<'_>,
        cancellation: &CancellationToken,
    ) -> Result<bool, Self::Error> {
        (**self).is_nullable_value_property(name, cancellation)
    }

    fn is_string_concatenation(
        &self,
        add_expression: SyntaxNode<'_>,
        cancellation: &CancellationToken,
    ) -> Result<bool, Self::Error> {
        (**self).is_string_concatenation(add_expression, cancellation)
    }
}

/// A [`SemanticModel`] that answers from syntax alone.
///
/// - A `+` is string concatenation when either operand is syntactically a
///   string: a string literal, an interpolated string, or another such `+`.
/// - Every member named `HasValue` is taken to be `Nullable<T>.HasValue`.
///
/// Useful for tooling that has no compiler at hand and for tests.
#[derive(Debug, Clone, Copy, Default)]
pub struct SyntacticSemanticModel;

impl SyntacticSemanticModel {
    fn is_string_typed(operand: SyntaxNode<'_>) -> bool {
        let expression = walk_down_parentheses(operand);
        match expression.kind() {
            SyntaxKind::InterpolatedStringExpression => true,
            SyntaxKind::BinaryExpression => Self::concatenates(expression),
            kind => kind.is_string_literal(),
        }
    }

    fn concatenates(binary: SyntaxNode<'_>) -> bool {
        let is_add = binary
            .child_by_field("operator")
            .and_then(|op| BinaryOperator::from_token(op.text()))
            == Some(BinaryOperator::Add);
        is_add
            && [binary.child_by_field("left"), binary.child_by_field("right")]
                .into_iter()
                .flatten()
                .any(Self::is_string_typed)
    }
}

impl SemanticModel for SyntacticSemanticModel {
    type Error = Infallible;

    fn is_nullable_value_property(
        &self,
        name: SyntaxNode<'_>,
        _cancellation: &CancellationToken,
    ) -> Result<bool, Self::Error> {
        Ok(name.text() == "HasValue")
    }

    fn is_string_concatenation(
        &self,
        add_expression: SyntaxNode<'_>,
        _cancellation: &CancellationToken,
    ) -> Result<bool, Self::Error> {
        Ok(Self::concatenates(add_expression))
    }
}
