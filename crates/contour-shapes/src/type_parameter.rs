//! Type parameters and their constraints, seen from inside a generic
//! declaration.

use contour_syntax::{SyntaxKind, SyntaxNode};

use crate::generic::{GenericInfo, clause_target, owning_declaration};
use crate::options::MatchOptions;
use crate::support::{accept, name_of};

/// A type parameter together with its declaration and `where` clause.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TypeParameterInfo<'t> {
    type_parameter: Option<SyntaxNode<'t>>,
    name: Option<SyntaxNode<'t>>,
    declaration: Option<SyntaxNode<'t>>,
    type_parameter_list: Option<SyntaxNode<'t>>,
    constraint_clause: Option<SyntaxNode<'t>>,
}

impl<'t> TypeParameterInfo<'t> {
    /// Matches a type parameter of a generic declaration.
    #[must_use]
    pub fn create(node: SyntaxNode<'t>, options: MatchOptions) -> Self {
        Self::try_create(node, options).unwrap_or_default()
    }

    /// Matches the type parameter called `name` on `declaration`.
    #[must_use]
    pub fn from_name(declaration: SyntaxNode<'t>, name: &str, options: MatchOptions) -> Self {
        GenericInfo::create(declaration)
            .find_type_parameter(name)
            .and_then(|parameter| Self::try_create(parameter, options))
            .unwrap_or_default()
    }

    fn try_create(node: SyntaxNode<'t>, options: MatchOptions) -> Option<Self> {
        if !node.is(SyntaxKind::TypeParameter) {
            return None;
        }
        let generic = GenericInfo::create(node);
        let declaration = generic.node()?;
        let name = accept(name_of(node), options)?;
        Some(Self {
            type_parameter: Some(node),
            name: Some(name),
            declaration: Some(declaration),
            type_parameter_list: generic.type_parameter_list(),
            constraint_clause: generic.find_constraint_clause(name.text()),
        })
    }

    /// The type parameter.
    #[must_use]
    pub const fn type_parameter(&self) -> Option<SyntaxNode<'t>> {
        self.type_parameter
    }

    /// The parameter's name identifier.
    #[must_use]
    pub const fn name(&self) -> Option<SyntaxNode<'t>> {
        self.name
    }

    /// The name as text, or `""` on a failed match.
    #[must_use]
    pub fn name_text(&self) -> &'t str {
        self.name.map_or("", |name| name.text())
    }

    /// The generic declaration.
    #[must_use]
    pub const fn declaration(&self) -> Option<SyntaxNode<'t>> {
        self.declaration
    }

    /// The enclosing `<...>` list.
    #[must_use]
    pub const fn type_parameter_list(&self) -> Option<SyntaxNode<'t>> {
        self.type_parameter_list
    }

    /// The `where` clause that constrains this parameter, if any.
    #[must_use]
    pub const fn constraint_clause(&self) -> Option<SyntaxNode<'t>> {
        self.constraint_clause
    }

    /// Whether the match succeeded.
    #[must_use]
    pub const fn success(&self) -> bool {
        self.type_parameter.is_some()
    }
}

/// One constraint in a `where` clause.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TypeParameterConstraintInfo<'t> {
    constraint: Option<SyntaxNode<'t>>,
    constraint_clause: Option<SyntaxNode<'t>>,
    name: Option<SyntaxNode<'t>>,
    declaration: Option<SyntaxNode<'t>>,
}

impl<'t> TypeParameterConstraintInfo<'t> {
    /// Matches a constraint inside a clause of a generic declaration.
    #[must_use]
    pub fn create(node: SyntaxNode<'t>, options: MatchOptions) -> Self {
        Self::try_create(node, options).unwrap_or_default()
    }

    fn try_create(node: SyntaxNode<'t>, options: MatchOptions) -> Option<Self> {
        if !node.kind().is_type_parameter_constraint() {
            return None;
        }
        // `new()` may sit inside a wrapping constraint node.
        let constraint = node
            .parent()
            .filter(|parent| parent.is(SyntaxKind::TypeParameterConstraint))
            .unwrap_or(node);
        let clause = constraint
            .parent()
            .filter(|parent| parent.is(SyntaxKind::TypeParameterConstraintsClause))?;
        let name = accept(clause_target(clause), options)?;
        Some(Self {
            constraint: Some(constraint),
            constraint_clause: Some(clause),
            name: Some(name),
            declaration: Some(owning_declaration(clause)?),
        })
    }

    /// The constraint.
    #[must_use]
    pub const fn constraint(&self) -> Option<SyntaxNode<'t>> {
        self.constraint
    }

    /// The enclosing `where` clause.
    #[must_use]
    pub const fn constraint_clause(&self) -> Option<SyntaxNode<'t>> {
        self.constraint_clause
    }

    /// The constrained parameter's name in the clause.
    #[must_use]
    pub const fn name(&self) -> Option<SyntaxNode<'t>> {
        self.name
    }

    /// The generic declaration.
    #[must_use]
    pub const fn declaration(&self) -> Option<SyntaxNode<'t>> {
        self.declaration
    }

    /// The constraints of the enclosing clause, this one included.
    #[must_use]
    pub fn constraints(&self) -> Vec<SyntaxNode<'t>> {
        self.constraint_clause
            .map(|clause| {
                clause
                    .children()
                    .into_iter()
                    .filter(|child| child.kind().is_type_parameter_constraint())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Whether an earlier constraint in the same clause spells the same
    /// constraint, as in `where T : class, class`.
    #[must_use]
    pub fn is_duplicate(&self) -> bool {
        let Some(constraint) = self.constraint else {
            return false;
        };
        let spelling = normalized(constraint.text());
        self.constraints()
            .into_iter()
            .take_while(|other| *other != constraint)
            .any(|other| normalized(other.text()) == spelling)
    }

    /// Whether the match succeeded.
    #[must_use]
    pub const fn success(&self) -> bool {
        self.constraint.is_some()
    }
}

/// Text with whitespace removed, so `new ()` and `new()` compare equal.
fn normalized(text: &str) -> String {
    text.chars().filter(|c| !c.is_whitespace()).collect()
}
