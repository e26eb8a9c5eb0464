//! Contour: syntax-shape matching for C#.
//!
//! This facade crate re-exports the stable types of [`contour_syntax`] and
//! [`contour_shapes`] and gathers every matcher behind the
//! [`syntax_info`] module, so callers need a single import surface.
//!
//! # Layers
//!
//! - [`contour_syntax`]: parsing, borrowed node views, parenthesis walking
//!   and text edits
//! - [`contour_shapes`]: the shape matchers, [`MatchOptions`] and the
//!   [`SemanticModel`] boundary
//!
//! # Example
//!
//! ```
//! use contour::{MatchOptions, NullCheckStyles, SyntaxKind, parse, syntax_info};
//!
//! let parsed = parse("class C { bool M(object x) => x != null; }")?;
//! let body = parsed
//!     .root()
//!     .first_descendant_of_kind(SyntaxKind::BinaryExpression)
//!     .expect("comparison");
//!
//! let info = syntax_info::null_check_expression_info(
//!     body,
//!     NullCheckStyles::SYNTACTIC,
//!     MatchOptions::default(),
//! )?;
//! assert!(info.is_checking_not_null());
//! assert_eq!(info.to_string(), "x != null");
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod syntax_info;

pub use contour_shapes::{
    Accessibility, AsExpressionInfo, AssignmentExpressionInfo, BinaryExpressionInfo,
    CancellationToken, ClauseLayout, ConditionalExpressionInfo, GenericInfo,
    HexNumericLiteralExpressionInfo, IfElseElement, IfStatementCascadeInfo, IsExpressionInfo,
    LiteralSuffix, LocalDeclarationStatementInfo, MatchOptions, MemberDeclarationListInfo,
    ModifierKinds, ModifierListInfo, NullCheckExpressionInfo, NullCheckStyles, ParameterInfo,
    SemanticModel, ShapeError, SimpleAssignmentExpressionInfo, SimpleAssignmentStatementInfo,
    SimpleIfElseInfo, SimpleIfStatementInfo, SimpleMemberInvocationExpressionInfo,
    SimpleMemberInvocationStatementInfo, SingleLocalDeclarationStatementInfo,
    SingleParameterLambdaExpressionInfo, StatementListInfo, StringConcatenationExpressionInfo,
    StringConcatenationFlags, StringLiteralExpressionInfo, StringLiteralStyle,
    SyntacticSemanticModel, TypeParameterConstraintInfo, TypeParameterInfo,
    UsingDirectiveListInfo, default_accessibility,
};
pub use contour_syntax::{
    AssignmentOperator, BinaryOperator, EditedSyntax, ParseResult, Parser, Position,
    PrefixOperator, SyntaxError, SyntaxErrorInfo, SyntaxKind, SyntaxNode, TextEdit, parse,
    walk_down_parentheses, walk_up_parentheses,
};
