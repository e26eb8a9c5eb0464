//! Shape matchers over C# syntax trees.
//!
//! Each matcher recognises one recurring syntactic shape, such as "a
//! null check", "a simple `if`/`else`" or "a member invocation used as a
//! statement", and returns a small value that names the shape's
//! constituent nodes:
//!
//! ```text
//! let info = NullCheckExpressionInfo::create(node, NullCheckStyles::SYNTACTIC, options)?;
//! if info.success() {
//!     // info.expression() is the checked operand
//! }
//! ```
//!
//! A node that does not have the shape is not an error: matchers return a
//! default value whose `success()` is false. Errors are reserved for caller
//! misuse (a typed entry point given the wrong kind, an edit on a failed
//! match) and for failures of a caller-supplied [`SemanticModel`].
//!
//! Every result borrows from the tree it was matched against. Matchers never
//! modify that tree; [`GenericInfo`] and [`ModifierListInfo`] offer edits that
//! produce a freshly parsed [`contour_syntax::EditedSyntax`] instead.
//!
//! # Options
//!
//! [`MatchOptions`] controls whether parentheses are seen through and
//! whether parser-synthesised missing nodes count as present.

mod assignment;
mod concatenation;
mod error;
mod expressions;
mod generic;
mod if_else;
mod invocation;
mod lambda;
mod lists;
mod literals;
mod local_declaration;
mod modifiers;
mod null_check;
mod options;
mod semantic;
mod support;
mod type_parameter;

pub use assignment::{
    AssignmentExpressionInfo, SimpleAssignmentExpressionInfo, SimpleAssignmentStatementInfo,
};
pub use concatenation::{StringConcatenationExpressionInfo, StringConcatenationFlags};
pub use error::ShapeError;
pub use expressions::{
    AsExpressionInfo, BinaryExpressionInfo, ConditionalExpressionInfo, IsExpressionInfo,
};
pub use generic::{ClauseLayout, GenericInfo};
pub use if_else::{IfElseElement, IfStatementCascadeInfo, SimpleIfElseInfo, SimpleIfStatementInfo};
pub use invocation::{SimpleMemberInvocationExpressionInfo, SimpleMemberInvocationStatementInfo};
pub use lambda::{ParameterInfo, SingleParameterLambdaExpressionInfo};
pub use lists::{MemberDeclarationListInfo, StatementListInfo, UsingDirectiveListInfo};
pub use literals::{
    HexNumericLiteralExpressionInfo, LiteralSuffix, StringLiteralExpressionInfo,
    StringLiteralStyle,
};
pub use local_declaration::{LocalDeclarationStatementInfo, SingleLocalDeclarationStatementInfo};
pub use modifiers::{Accessibility, ModifierKinds, ModifierListInfo, default_accessibility};
pub use null_check::{NullCheckExpressionInfo, NullCheckStyles};
pub use options::MatchOptions;
pub use semantic::{SemanticModel, SyntacticSemanticModel};
pub use tokio_util::sync::CancellationToken;
pub use type_parameter::{TypeParameterConstraintInfo, TypeParameterInfo};

/// Implements `Display` as the text of the matched node, or nothing for a
/// failed match.
macro_rules! anchor_display {
    ($($info:ident => $anchor:ident,)+) => {
        $(
            impl std::fmt::Display for $info<'_> {
                fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                    f.write_str(self.$anchor().map_or("", |node| node.text()))
                }
            }
        )+
    };
}

anchor_display! {
    AsExpressionInfo => as_expression,
    AssignmentExpressionInfo => assignment_expression,
    BinaryExpressionInfo => binary_expression,
    ConditionalExpressionInfo => conditional_expression,
    GenericInfo => node,
    HexNumericLiteralExpressionInfo => literal_expression,
    IfStatementCascadeInfo => if_statement,
    IsExpressionInfo => is_expression,
    LocalDeclarationStatementInfo => statement,
    MemberDeclarationListInfo => parent,
    ModifierListInfo => parent,
    NullCheckExpressionInfo => null_check_expression,
    ParameterInfo => node,
    SimpleAssignmentExpressionInfo => assignment_expression,
    SimpleAssignmentStatementInfo => statement,
    SimpleIfElseInfo => if_statement,
    SimpleIfStatementInfo => if_statement,
    SimpleMemberInvocationExpressionInfo => invocation_expression,
    SimpleMemberInvocationStatementInfo => statement,
    SingleLocalDeclarationStatementInfo => statement,
    SingleParameterLambdaExpressionInfo => lambda_expression,
    StatementListInfo => parent,
    StringConcatenationExpressionInfo => binary_expression,
    StringLiteralExpressionInfo => literal_expression,
    TypeParameterConstraintInfo => constraint,
    TypeParameterInfo => type_parameter,
    UsingDirectiveListInfo => parent,
}

#[cfg(test)]
mod tests;
