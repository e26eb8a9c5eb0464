//! One factory function per shape.
//!
//! Every function forwards to the matcher's own constructor. Shapes that do
//! not match yield a value whose `success()` is false.

use contour_shapes::{
    AsExpressionInfo, AssignmentExpressionInfo, BinaryExpressionInfo, CancellationToken,
    ConditionalExpressionInfo, GenericInfo, HexNumericLiteralExpressionInfo,
    IfStatementCascadeInfo, IsExpressionInfo, LocalDeclarationStatementInfo, MatchOptions,
    MemberDeclarationListInfo, ModifierListInfo, NullCheckExpressionInfo, NullCheckStyles,
    ParameterInfo, SemanticModel, ShapeError, SimpleAssignmentExpressionInfo,
    SimpleAssignmentStatementInfo, SimpleIfElseInfo, SimpleIfStatementInfo,
    SimpleMemberInvocationExpressionInfo, SimpleMemberInvocationStatementInfo,
    SingleLocalDeclarationStatementInfo, SingleParameterLambdaExpressionInfo, StatementListInfo,
    StringConcatenationExpressionInfo, StringLiteralExpressionInfo, TypeParameterConstraintInfo,
    TypeParameterInfo, UsingDirectiveListInfo,
};
use contour_syntax::SyntaxNode;

/// `expression as Type`
#[must_use]
pub fn as_expression_info(node: SyntaxNode<'_>, options: MatchOptions) -> AsExpressionInfo<'_> {
    AsExpressionInfo::create(node, options)
}

/// Any assignment, compound ones included.
#[must_use]
pub fn assignment_expression_info(
    node: SyntaxNode<'_>,
    options: MatchOptions,
) -> AssignmentExpressionInfo<'_> {
    AssignmentExpressionInfo::create(node, options)
}

/// A plain `left = right` assignment.
#[must_use]
pub fn simple_assignment_expression_info(
    node: SyntaxNode<'_>,
    options: MatchOptions,
) -> SimpleAssignmentExpressionInfo<'_> {
    SimpleAssignmentExpressionInfo::create(node, options)
}

/// `left = right;` as a statement.
#[must_use]
pub fn simple_assignment_statement_info(
    node: SyntaxNode<'_>,
    options: MatchOptions,
) -> SimpleAssignmentStatementInfo<'_> {
    SimpleAssignmentStatementInfo::create(node, options)
}

/// A binary expression.
#[must_use]
pub fn binary_expression_info(
    node: SyntaxNode<'_>,
    options: MatchOptions,
) -> BinaryExpressionInfo<'_> {
    BinaryExpressionInfo::create(node, options)
}

/// `condition ? when_true : when_false`
#[must_use]
pub fn conditional_expression_info(
    node: SyntaxNode<'_>,
    options: MatchOptions,
) -> ConditionalExpressionInfo<'_> {
    ConditionalExpressionInfo::create(node, options)
}

/// `expression is Type`
#[must_use]
pub fn is_expression_info(node: SyntaxNode<'_>, options: MatchOptions) -> IsExpressionInfo<'_> {
    IsExpressionInfo::create(node, options)
}

/// The generic signature of a declaration.
#[must_use]
pub fn generic_info(node: SyntaxNode<'_>) -> GenericInfo<'_> {
    GenericInfo::create(node)
}

/// `0x1F`, `0xFFul`
#[must_use]
pub fn hex_numeric_literal_expression_info(
    node: SyntaxNode<'_>,
    options: MatchOptions,
) -> HexNumericLiteralExpressionInfo<'_> {
    HexNumericLiteralExpressionInfo::create(node, options)
}

/// An `if`/`else if`/`else` chain.
#[must_use]
pub fn if_statement_cascade_info(node: SyntaxNode<'_>) -> IfStatementCascadeInfo<'_> {
    IfStatementCascadeInfo::create(node)
}

/// A local declaration statement.
#[must_use]
pub fn local_declaration_statement_info(
    node: SyntaxNode<'_>,
    options: MatchOptions,
) -> LocalDeclarationStatementInfo<'_> {
    LocalDeclarationStatementInfo::create(node, options)
}

/// A local declaration statement with one declarator.
#[must_use]
pub fn single_local_declaration_statement_info(
    node: SyntaxNode<'_>,
    options: MatchOptions,
) -> SingleLocalDeclarationStatementInfo<'_> {
    SingleLocalDeclarationStatementInfo::create(node, options)
}

/// The members of a compilation unit, namespace or type.
#[must_use]
pub fn member_declaration_list_info(node: SyntaxNode<'_>) -> MemberDeclarationListInfo<'_> {
    MemberDeclarationListInfo::create(node)
}

/// The modifiers of a declaration.
#[must_use]
pub fn modifier_list_info(node: SyntaxNode<'_>) -> ModifierListInfo<'_> {
    ModifierListInfo::create(node)
}

/// A null check recognised from syntax alone.
///
/// # Errors
///
/// Returns [`ShapeError::SemanticModelRequired`] when `allowed` includes a
/// `HasValue` style.
pub fn null_check_expression_info(
    node: SyntaxNode<'_>,
    allowed: NullCheckStyles,
    options: MatchOptions,
) -> Result<NullCheckExpressionInfo<'_>, ShapeError> {
    NullCheckExpressionInfo::create(node, allowed, options)
}

/// A null check, consulting `model` for `HasValue` forms.
///
/// # Errors
///
/// Propagates the model's error unchanged.
pub fn null_check_expression_info_with_model<'t, M: SemanticModel>(
    node: SyntaxNode<'t>,
    model: &M,
    allowed: NullCheckStyles,
    options: MatchOptions,
    cancellation: &CancellationToken,
) -> Result<NullCheckExpressionInfo<'t>, M::Error> {
    NullCheckExpressionInfo::create_with_model(node, model, allowed, options, cancellation)
}

/// The parameters and body of a callable.
#[must_use]
pub fn parameter_info(node: SyntaxNode<'_>, options: MatchOptions) -> ParameterInfo<'_> {
    ParameterInfo::create(node, options)
}

/// A simple `if` without `else`.
#[must_use]
pub fn simple_if_statement_info(
    node: SyntaxNode<'_>,
    options: MatchOptions,
) -> SimpleIfStatementInfo<'_> {
    SimpleIfStatementInfo::create(node, options)
}

/// A simple `if`/`else`.
#[must_use]
pub fn simple_if_else_info(node: SyntaxNode<'_>, options: MatchOptions) -> SimpleIfElseInfo<'_> {
    SimpleIfElseInfo::create(node, options)
}

/// `expression.Name(arguments)`
#[must_use]
pub fn simple_member_invocation_expression_info(
    node: SyntaxNode<'_>,
    options: MatchOptions,
) -> SimpleMemberInvocationExpressionInfo<'_> {
    SimpleMemberInvocationExpressionInfo::create(node, options)
}

/// `expression.Name(arguments);`
#[must_use]
pub fn simple_member_invocation_statement_info(
    node: SyntaxNode<'_>,
    options: MatchOptions,
) -> SimpleMemberInvocationStatementInfo<'_> {
    SimpleMemberInvocationStatementInfo::create(node, options)
}

/// A lambda with exactly one parameter.
#[must_use]
pub fn single_parameter_lambda_expression_info(
    node: SyntaxNode<'_>,
    options: MatchOptions,
) -> SingleParameterLambdaExpressionInfo<'_> {
    SingleParameterLambdaExpressionInfo::create(node, options)
}

/// The statements of a block or switch section.
#[must_use]
pub fn statement_list_info(node: SyntaxNode<'_>) -> StatementListInfo<'_> {
    StatementListInfo::create(node)
}

/// A chain of string concatenations.
///
/// # Errors
///
/// Propagates the model's error unchanged.
pub fn string_concatenation_expression_info<'t, M: SemanticModel>(
    node: SyntaxNode<'t>,
    model: &M,
    options: MatchOptions,
    cancellation: &CancellationToken,
) -> Result<StringConcatenationExpressionInfo<'t>, M::Error> {
    StringConcatenationExpressionInfo::create(node, model, options, cancellation)
}

/// A regular, verbatim or raw string literal.
#[must_use]
pub fn string_literal_expression_info(
    node: SyntaxNode<'_>,
    options: MatchOptions,
) -> StringLiteralExpressionInfo<'_> {
    StringLiteralExpressionInfo::create(node, options)
}

/// A type parameter with its declaration and `where` clause.
#[must_use]
pub fn type_parameter_info(node: SyntaxNode<'_>, options: MatchOptions) -> TypeParameterInfo<'_> {
    TypeParameterInfo::create(node, options)
}

/// A constraint inside a `where` clause.
#[must_use]
pub fn type_parameter_constraint_info(
    node: SyntaxNode<'_>,
    options: MatchOptions,
) -> TypeParameterConstraintInfo<'_> {
    TypeParameterConstraintInfo::create(node, options)
}

/// The using directives of a compilation unit or namespace.
#[must_use]
pub fn using_directive_list_info(node: SyntaxNode<'_>) -> UsingDirectiveListInfo<'_> {
    UsingDirectiveListInfo::create(node)
}
