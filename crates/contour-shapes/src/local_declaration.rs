//! Local variable declaration statements.

use contour_syntax::{SyntaxKind, SyntaxNode};

use crate::options::MatchOptions;
use crate::support::{accept, declarator_value, field_or, name_of};

/// Finds the local declaration statement whose initializer is `value`.
fn statement_of_value(value: SyntaxNode<'_>) -> Option<SyntaxNode<'_>> {
    let mut declarator = value.parent()?;
    if declarator.is(SyntaxKind::EqualsValueClause) {
        declarator = declarator.parent()?;
    }
    if !declarator.is(SyntaxKind::VariableDeclarator) || declarator_value(declarator) != Some(value) {
        return None;
    }
    declarator
        .parent()
        .filter(|declaration| declaration.is(SyntaxKind::VariableDeclaration))?
        .parent()
        .filter(|statement| statement.is(SyntaxKind::LocalDeclarationStatement))
}

/// `modifiers Type a = 1, b;`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LocalDeclarationStatementInfo<'t> {
    statement: Option<SyntaxNode<'t>>,
    modifiers: Vec<SyntaxNode<'t>>,
    ty: Option<SyntaxNode<'t>>,
    declaration: Option<SyntaxNode<'t>>,
    variables: Vec<SyntaxNode<'t>>,
}

impl<'t> LocalDeclarationStatementInfo<'t> {
    /// Matches a local declaration statement.
    #[must_use]
    pub fn create(node: SyntaxNode<'t>, options: MatchOptions) -> Self {
        Self::try_create(node, options).unwrap_or_default()
    }

    /// Matches the statement that declares a variable initialised with
    /// `value`.
    #[must_use]
    pub fn from_value(value: SyntaxNode<'t>, options: MatchOptions) -> Self {
        statement_of_value(value)
            .and_then(|statement| Self::try_create(statement, options))
            .unwrap_or_default()
    }

    fn try_create(node: SyntaxNode<'t>, options: MatchOptions) -> Option<Self> {
        if !node.is(SyntaxKind::LocalDeclarationStatement) {
            return None;
        }
        let declaration = accept(node.first_child_of_kind(SyntaxKind::VariableDeclaration), options)?;
        let ty = accept(
            field_or(declaration, "type", |n| n.first_child()),
            options,
        )?;
        let variables = declaration.children_of_kind(SyntaxKind::VariableDeclarator);
        if variables.is_empty()
            || !variables
                .iter()
                .all(|variable| accept(Some(*variable), options).is_some())
        {
            return None;
        }
        Some(Self {
            statement: Some(node),
            modifiers: node.children_of_kind(SyntaxKind::Modifier),
            ty: Some(ty),
            declaration: Some(declaration),
            variables,
        })
    }

    /// The matched statement.
    #[must_use]
    pub const fn statement(&self) -> Option<SyntaxNode<'t>> {
        self.statement
    }

    /// Modifiers such as `const`, in source order.
    #[must_use]
    pub fn modifiers(&self) -> &[SyntaxNode<'t>] {
        &self.modifiers
    }

    /// The declared type, `var` included.
    #[must_use]
    pub const fn ty(&self) -> Option<SyntaxNode<'t>> {
        self.ty
    }

    /// The variable declaration.
    #[must_use]
    pub const fn declaration(&self) -> Option<SyntaxNode<'t>> {
        self.declaration
    }

    /// The declarators.
    #[must_use]
    pub fn variables(&self) -> &[SyntaxNode<'t>] {
        &self.variables
    }

    /// Whether the match succeeded.
    #[must_use]
    pub const fn success(&self) -> bool {
        self.statement.is_some()
    }
}

/// A local declaration statement with exactly one declarator.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SingleLocalDeclarationStatementInfo<'t> {
    statement: Option<SyntaxNode<'t>>,
    ty: Option<SyntaxNode<'t>>,
    declaration: Option<SyntaxNode<'t>>,
    declarator: Option<SyntaxNode<'t>>,
    identifier: Option<SyntaxNode<'t>>,
    value: Option<SyntaxNode<'t>>,
}

impl<'t> SingleLocalDeclarationStatementInfo<'t> {
    /// Matches a single-variable local declaration.
    #[must_use]
    pub fn create(node: SyntaxNode<'t>, options: MatchOptions) -> Self {
        Self::try_create(node, options).unwrap_or_default()
    }

    /// Matches the single-variable declaration initialised with `value`.
    #[must_use]
    pub fn from_value(value: SyntaxNode<'t>, options: MatchOptions) -> Self {
        statement_of_value(value)
            .and_then(|statement| Self::try_create(statement, options))
            .unwrap_or_default()
    }

    fn try_create(node: SyntaxNode<'t>, options: MatchOptions) -> Option<Self> {
        let info = LocalDeclarationStatementInfo::try_create(node, options)?;
        let [declarator] = info.variables() else {
            return None;
        };
        let identifier = accept(name_of(*declarator), options)?;
        let value = match declarator_value(*declarator) {
            Some(value) => Some(accept(Some(value), options)?),
            None => None,
        };
        Some(Self {
            statement: info.statement(),
            ty: info.ty(),
            declaration: info.declaration(),
            declarator: Some(*declarator),
            identifier: Some(identifier),
            value,
        })
    }

    /// The matched statement.
    #[must_use]
    pub const fn statement(&self) -> Option<SyntaxNode<'t>> {
        self.statement
    }

    /// The declared type.
    #[must_use]
    pub const fn ty(&self) -> Option<SyntaxNode<'t>> {
        self.ty
    }

    /// The variable declaration.
    #[must_use]
    pub const fn declaration(&self) -> Option<SyntaxNode<'t>> {
        self.declaration
    }

    /// The lone declarator.
    #[must_use]
    pub const fn declarator(&self) -> Option<SyntaxNode<'t>> {
        self.declarator
    }

    /// The declared name.
    #[must_use]
    pub const fn identifier(&self) -> Option<SyntaxNode<'t>> {
        self.identifier
    }

    /// The initializer value, if any.
    #[must_use]
    pub const fn value(&self) -> Option<SyntaxNode<'t>> {
        self.value
    }

    /// Whether the match succeeded.
    #[must_use]
    pub const fn success(&self) -> bool {
        self.statement.is_some()
    }
}
