//! Matchers for lambdas and for the parameters of callable declarations.

use contour_syntax::{SyntaxKind, SyntaxNode};

use crate::options::MatchOptions;
use crate::support::{accept, candidate};

/// Returns the parameters node of a lambda: a parameter list or an implicit
/// parameter.
fn lambda_parameters(lambda: SyntaxNode<'_>) -> Option<SyntaxNode<'_>> {
    lambda.child_by_field("parameters").or_else(|| {
        lambda.children().into_iter().find(|child| {
            matches!(
                child.kind(),
                SyntaxKind::ParameterList | SyntaxKind::ImplicitParameter | SyntaxKind::Identifier
            )
        })
    })
}

/// Returns the block or arrow body of a declaration or lambda.
fn body_of(node: SyntaxNode<'_>) -> Option<SyntaxNode<'_>> {
    node.child_by_field("body").or_else(|| {
        node.children()
            .into_iter()
            .find(|child| child.is(SyntaxKind::Block) || child.is(SyntaxKind::ArrowExpressionClause))
    })
}

fn parameters_of(list: SyntaxNode<'_>) -> Vec<SyntaxNode<'_>> {
    list.children_of_kind(SyntaxKind::Parameter)
}

/// `x => body` or `(x) => body` with exactly one parameter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SingleParameterLambdaExpressionInfo<'t> {
    lambda_expression: Option<SyntaxNode<'t>>,
    parameter: Option<SyntaxNode<'t>>,
    parameter_list: Option<SyntaxNode<'t>>,
    body: Option<SyntaxNode<'t>>,
}

impl<'t> SingleParameterLambdaExpressionInfo<'t> {
    /// Matches a lambda that declares exactly one parameter.
    #[must_use]
    pub fn create(node: SyntaxNode<'t>, options: MatchOptions) -> Self {
        Self::try_create(candidate(node, options), options).unwrap_or_default()
    }

    fn try_create(node: SyntaxNode<'t>, options: MatchOptions) -> Option<Self> {
        if !node.is(SyntaxKind::LambdaExpression) {
            return None;
        }
        let parameters = lambda_parameters(node)?;
        let (parameter_node, parameter_list) = if parameters.is(SyntaxKind::ParameterList) {
            let declared = parameters_of(parameters);
            let [only] = declared.as_slice() else {
                return None;
            };
            (*only, Some(parameters))
        } else {
            (parameters, None)
        };
        let parameter = accept(Some(parameter_node), options)?;
        let body = accept(body_of(node), options)?;
        Some(Self {
            lambda_expression: Some(node),
            parameter: Some(parameter),
            parameter_list,
            body: Some(body),
        })
    }

    /// The matched lambda.
    #[must_use]
    pub const fn lambda_expression(&self) -> Option<SyntaxNode<'t>> {
        self.lambda_expression
    }

    /// The single parameter.
    #[must_use]
    pub const fn parameter(&self) -> Option<SyntaxNode<'t>> {
        self.parameter
    }

    /// The parenthesised parameter list, absent for `x => body`.
    #[must_use]
    pub const fn parameter_list(&self) -> Option<SyntaxNode<'t>> {
        self.parameter_list
    }

    /// The expression or block body.
    #[must_use]
    pub const fn body(&self) -> Option<SyntaxNode<'t>> {
        self.body
    }

    /// Whether the parameter is written in parentheses.
    #[must_use]
    pub const fn is_parenthesized(&self) -> bool {
        self.parameter_list.is_some()
    }

    /// Whether the match succeeded.
    #[must_use]
    pub const fn success(&self) -> bool {
        self.lambda_expression.is_some()
    }
}

/// The parameters, type parameters and body of a callable declaration.
///
/// Methods, delegates and local functions match when they declare at least
/// one parameter or type parameter; constructors, operators and
/// parenthesised lambdas need at least one parameter. Delegates have no body.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParameterInfo<'t> {
    node: Option<SyntaxNode<'t>>,
    type_parameter_list: Option<SyntaxNode<'t>>,
    parameter: Option<SyntaxNode<'t>>,
    parameter_list: Option<SyntaxNode<'t>>,
    body: Option<SyntaxNode<'t>>,
}

impl<'t> ParameterInfo<'t> {
    /// Matches a method, constructor, operator, conversion operator,
    /// delegate, local function or lambda.
    #[must_use]
    pub fn create(node: SyntaxNode<'t>, options: MatchOptions) -> Self {
        let result = match node.kind() {
            SyntaxKind::MethodDeclaration | SyntaxKind::LocalFunctionStatement => {
                Self::generic_callable(node, options, true)
            }
            SyntaxKind::DelegateDeclaration => Self::generic_callable(node, options, false),
            SyntaxKind::ConstructorDeclaration
            | SyntaxKind::OperatorDeclaration
            | SyntaxKind::ConversionOperatorDeclaration => Self::plain_callable(node, options),
            SyntaxKind::LambdaExpression => Self::lambda(node, options),
            _ => None,
        };
        result.unwrap_or_default()
    }

    fn checked_parameters(list: SyntaxNode<'t>, options: MatchOptions) -> Option<usize> {
        let parameters = parameters_of(list);
        parameters
            .iter()
            .all(|parameter| accept(Some(*parameter), options).is_some())
            .then_some(parameters.len())
    }

    fn generic_callable(node: SyntaxNode<'t>, options: MatchOptions, has_body: bool) -> Option<Self> {
        let parameter_list = accept(
            node.child_by_field("parameters")
                .or_else(|| node.first_child_of_kind(SyntaxKind::ParameterList)),
            options,
        )?;
        let parameter_count = Self::checked_parameters(parameter_list, options)?;
        let type_parameter_list = node
            .child_by_field("type_parameters")
            .or_else(|| node.first_child_of_kind(SyntaxKind::TypeParameterList));
        let type_parameters = type_parameter_list
            .map(|list| list.children_of_kind(SyntaxKind::TypeParameter))
            .unwrap_or_default();
        if !type_parameters
            .iter()
            .all(|tp| accept(Some(*tp), options).is_some())
        {
            return None;
        }
        if parameter_count == 0 && type_parameters.is_empty() {
            return None;
        }
        let body = if has_body {
            Some(accept(body_of(node), options)?)
        } else {
            None
        };
        Some(Self {
            node: Some(node),
            type_parameter_list,
            parameter: None,
            parameter_list: Some(parameter_list),
            body,
        })
    }

    fn plain_callable(node: SyntaxNode<'t>, options: MatchOptions) -> Option<Self> {
        let parameter_list = accept(
            node.child_by_field("parameters")
                .or_else(|| node.first_child_of_kind(SyntaxKind::ParameterList)),
            options,
        )?;
        if Self::checked_parameters(parameter_list, options)? == 0 {
            return None;
        }
        let body = accept(body_of(node), options)?;
        Some(Self {
            node: Some(node),
            type_parameter_list: None,
            parameter: None,
            parameter_list: Some(parameter_list),
            body: Some(body),
        })
    }

    fn lambda(node: SyntaxNode<'t>, options: MatchOptions) -> Option<Self> {
        let parameters = lambda_parameters(node)?;
        let body = accept(body_of(node), options)?;
        if parameters.is(SyntaxKind::ParameterList) {
            let parameter_list = accept(Some(parameters), options)?;
            if Self::checked_parameters(parameter_list, options)? == 0 {
                return None;
            }
            return Some(Self {
                node: Some(node),
                type_parameter_list: None,
                parameter: None,
                parameter_list: Some(parameter_list),
                body: Some(body),
            });
        }
        let parameter = accept(Some(parameters), options)?;
        Some(Self {
            node: Some(node),
            type_parameter_list: None,
            parameter: Some(parameter),
            parameter_list: None,
            body: Some(body),
        })
    }

    /// The declaration or lambda.
    #[must_use]
    pub const fn node(&self) -> Option<SyntaxNode<'t>> {
        self.node
    }

    /// The type parameter list, if the declaration is generic.
    #[must_use]
    pub const fn type_parameter_list(&self) -> Option<SyntaxNode<'t>> {
        self.type_parameter_list
    }

    /// The declared type parameters.
    #[must_use]
    pub fn type_parameters(&self) -> Vec<SyntaxNode<'t>> {
        self.type_parameter_list
            .map(|list| list.children_of_kind(SyntaxKind::TypeParameter))
            .unwrap_or_default()
    }

    /// The lone parameter of an unparenthesised lambda.
    #[must_use]
    pub const fn parameter(&self) -> Option<SyntaxNode<'t>> {
        self.parameter
    }

    /// The parameter list.
    #[must_use]
    pub const fn parameter_list(&self) -> Option<SyntaxNode<'t>> {
        self.parameter_list
    }

    /// The declared parameters. For `x => body` this is the lone parameter.
    #[must_use]
    pub fn parameters(&self) -> Vec<SyntaxNode<'t>> {
        match (self.parameter_list, self.parameter) {
            (Some(list), _) => parameters_of(list),
            (None, Some(parameter)) => vec![parameter],
            (None, None) => Vec::new(),
        }
    }

    /// The block or expression body. Absent for delegates.
    #[must_use]
    pub const fn body(&self) -> Option<SyntaxNode<'t>> {
        self.body
    }

    /// Whether the match succeeded.
    #[must_use]
    pub const fn success(&self) -> bool {
        self.node.is_some()
    }
}
