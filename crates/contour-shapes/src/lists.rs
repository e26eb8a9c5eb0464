//! Statement, member and using-directive lists together with their owner.

use contour_syntax::{SyntaxKind, SyntaxNode};

/// Returns the body `declaration_list` of a namespace or type declaration.
fn declaration_list(node: SyntaxNode<'_>) -> Option<SyntaxNode<'_>> {
    node.child_by_field("body")
        .filter(|body| body.is(SyntaxKind::DeclarationList))
        .or_else(|| node.first_child_of_kind(SyntaxKind::DeclarationList))
}

/// Named siblings following a file-scoped namespace declaration. Its members
/// are laid out as siblings in the compilation unit.
fn file_scoped_members(namespace: SyntaxNode<'_>) -> Vec<SyntaxNode<'_>> {
    let own: Vec<_> = namespace
        .children()
        .into_iter()
        .filter(|child| child.kind().is_member_declaration() || child.is(SyntaxKind::UsingDirective))
        .collect();
    if !own.is_empty() {
        return own;
    }
    std::iter::successors(namespace.next_sibling(), SyntaxNode::next_sibling)
        .filter(SyntaxNode::is_named)
        .collect()
}

/// The statements of a block or switch section.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatementListInfo<'t> {
    parent: Option<SyntaxNode<'t>>,
    statements: Vec<SyntaxNode<'t>>,
}

impl<'t> StatementListInfo<'t> {
    /// Matches a block or switch section.
    #[must_use]
    pub fn create(node: SyntaxNode<'t>) -> Self {
        if !(node.is(SyntaxKind::Block) || node.is(SyntaxKind::SwitchSection)) {
            return Self::default();
        }
        Self {
            parent: Some(node),
            statements: node
                .children()
                .into_iter()
                .filter(|child| child.kind().is_statement())
                .collect(),
        }
    }

    /// Matches the list that contains `statement`.
    #[must_use]
    pub fn from_statement(statement: SyntaxNode<'t>) -> Self {
        if !statement.kind().is_statement() {
            return Self::default();
        }
        statement.parent().map(Self::create).unwrap_or_default()
    }

    /// The block or switch section.
    #[must_use]
    pub const fn parent(&self) -> Option<SyntaxNode<'t>> {
        self.parent
    }

    /// Whether the owner is a block.
    #[must_use]
    pub fn is_parent_block(&self) -> bool {
        self.parent.is_some_and(|parent| parent.is(SyntaxKind::Block))
    }

    /// Whether the owner is a switch section.
    #[must_use]
    pub fn is_parent_switch_section(&self) -> bool {
        self.parent
            .is_some_and(|parent| parent.is(SyntaxKind::SwitchSection))
    }

    /// The statements, in source order.
    #[must_use]
    pub fn statements(&self) -> &[SyntaxNode<'t>] {
        &self.statements
    }

    /// The number of statements.
    #[must_use]
    pub fn count(&self) -> usize {
        self.statements.len()
    }

    /// The statement at `index`.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<SyntaxNode<'t>> {
        self.statements.get(index).copied()
    }

    /// The first statement.
    #[must_use]
    pub fn first(&self) -> Option<SyntaxNode<'t>> {
        self.statements.first().copied()
    }

    /// The last statement.
    #[must_use]
    pub fn last(&self) -> Option<SyntaxNode<'t>> {
        self.statements.last().copied()
    }

    /// The position of `statement` in the list.
    #[must_use]
    pub fn index_of(&self, statement: SyntaxNode<'t>) -> Option<usize> {
        self.statements.iter().position(|s| *s == statement)
    }

    /// Iterates the statements.
    pub fn iter(&self) -> impl Iterator<Item = SyntaxNode<'t>> + '_ {
        self.statements.iter().copied()
    }

    /// Whether the match succeeded.
    #[must_use]
    pub const fn success(&self) -> bool {
        self.parent.is_some()
    }
}

/// The member declarations of a compilation unit, namespace or type.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemberDeclarationListInfo<'t> {
    parent: Option<SyntaxNode<'t>>,
    members: Vec<SyntaxNode<'t>>,
}

impl<'t> MemberDeclarationListInfo<'t> {
    /// Matches a compilation unit, a namespace, or a class, struct,
    /// interface or record declaration.
    #[must_use]
    pub fn create(node: SyntaxNode<'t>) -> Self {
        let candidates = match node.kind() {
            SyntaxKind::CompilationUnit => Some(node.children()),
            SyntaxKind::FileScopedNamespaceDeclaration => Some(file_scoped_members(node)),
            SyntaxKind::NamespaceDeclaration
            | SyntaxKind::ClassDeclaration
            | SyntaxKind::StructDeclaration
            | SyntaxKind::InterfaceDeclaration
            | SyntaxKind::RecordDeclaration => {
                Some(declaration_list(node).map(|list| list.children()).unwrap_or_default())
            }
            _ => None,
        };
        let Some(candidates) = candidates else {
            return Self::default();
        };
        Self {
            parent: Some(node),
            members: candidates
                .into_iter()
                .filter(|child| child.kind().is_member_declaration())
                .collect(),
        }
    }

    /// Matches the list that contains `member`.
    #[must_use]
    pub fn from_member(member: SyntaxNode<'t>) -> Self {
        if !member.kind().is_member_declaration() {
            return Self::default();
        }
        let Some(parent) = member.parent() else {
            return Self::default();
        };
        let owner = if parent.is(SyntaxKind::DeclarationList) {
            parent.parent()
        } else {
            Some(parent)
        };
        owner.map(Self::create).unwrap_or_default()
    }

    /// The compilation unit, namespace or type.
    #[must_use]
    pub const fn parent(&self) -> Option<SyntaxNode<'t>> {
        self.parent
    }

    /// The members, in source order.
    #[must_use]
    pub fn members(&self) -> &[SyntaxNode<'t>] {
        &self.members
    }

    /// The number of members.
    #[must_use]
    pub fn count(&self) -> usize {
        self.members.len()
    }

    /// The member at `index`.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<SyntaxNode<'t>> {
        self.members.get(index).copied()
    }

    /// The position of `member` in the list.
    #[must_use]
    pub fn index_of(&self, member: SyntaxNode<'t>) -> Option<usize> {
        self.members.iter().position(|m| *m == member)
    }

    /// Whether the match succeeded.
    #[must_use]
    pub const fn success(&self) -> bool {
        self.parent.is_some()
    }
}

/// The using directives of a compilation unit or namespace.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UsingDirectiveListInfo<'t> {
    parent: Option<SyntaxNode<'t>>,
    usings: Vec<SyntaxNode<'t>>,
}

impl<'t> UsingDirectiveListInfo<'t> {
    /// Matches a compilation unit or namespace.
    #[must_use]
    pub fn create(node: SyntaxNode<'t>) -> Self {
        let candidates = match node.kind() {
            SyntaxKind::CompilationUnit => node.children(),
            SyntaxKind::FileScopedNamespaceDeclaration => file_scoped_members(node),
            SyntaxKind::NamespaceDeclaration => declaration_list(node)
                .map(|list| list.children())
                .unwrap_or_default(),
            _ => return Self::default(),
        };
        Self {
            parent: Some(node),
            usings: candidates
                .into_iter()
                .filter(|child| child.is(SyntaxKind::UsingDirective))
                .collect(),
        }
    }

    /// Matches the list that contains `using_directive`.
    #[must_use]
    pub fn from_using_directive(using_directive: SyntaxNode<'t>) -> Self {
        if !using_directive.is(SyntaxKind::UsingDirective) {
            return Self::default();
        }
        let Some(parent) = using_directive.parent() else {
            return Self::default();
        };
        if parent.is(SyntaxKind::DeclarationList) {
            return parent.parent().map(Self::create).unwrap_or_default();
        }
        // A using after a file-scoped namespace belongs to that namespace.
        let scoped = std::iter::successors(using_directive.prev_sibling(), SyntaxNode::prev_sibling)
            .find(|sibling| sibling.is(SyntaxKind::FileScopedNamespaceDeclaration));
        Self::create(scoped.unwrap_or(parent))
    }

    /// The compilation unit or namespace.
    #[must_use]
    pub const fn parent(&self) -> Option<SyntaxNode<'t>> {
        self.parent
    }

    /// The using directives, in source order.
    #[must_use]
    pub fn usings(&self) -> &[SyntaxNode<'t>] {
        &self.usings
    }

    /// The number of directives.
    #[must_use]
    pub fn count(&self) -> usize {
        self.usings.len()
    }

    /// Whether the match succeeded.
    #[must_use]
    pub const fn success(&self) -> bool {
        self.parent.is_some()
    }
}
