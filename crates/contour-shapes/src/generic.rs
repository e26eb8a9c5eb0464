//! Type parameter lists and constraint clauses of generic declarations.
//!
//! [`GenericInfo`] is the only shape that offers structural edits. Each edit
//! rewrites the declaration's source text and re-parses it into a fresh
//! [`EditedSyntax`]; the tree the info was matched against is left intact.

use contour_syntax::{EditedSyntax, SyntaxKind, SyntaxNode, TextEdit};
use tracing::debug;

use crate::error::ShapeError;
use crate::support::{SHAPES_TARGET, field_or, name_of};

const SHAPE: &str = "GenericInfo";

/// Whether `kind` can declare type parameters.
const fn is_generic_declaration(kind: SyntaxKind) -> bool {
    matches!(
        kind,
        SyntaxKind::ClassDeclaration
            | SyntaxKind::StructDeclaration
            | SyntaxKind::InterfaceDeclaration
            | SyntaxKind::RecordDeclaration
            | SyntaxKind::DelegateDeclaration
            | SyntaxKind::MethodDeclaration
            | SyntaxKind::LocalFunctionStatement
    )
}

/// Resolves any node of a generic signature to the declaration that owns it.
pub(crate) fn owning_declaration(node: SyntaxNode<'_>) -> Option<SyntaxNode<'_>> {
    match node.kind() {
        kind if is_generic_declaration(kind) => Some(node),
        SyntaxKind::TypeParameterList | SyntaxKind::TypeParameterConstraintsClause => node
            .parent()
            .filter(|parent| is_generic_declaration(parent.kind())),
        SyntaxKind::TypeParameter => node
            .parent()
            .filter(|parent| parent.is(SyntaxKind::TypeParameterList))
            .and_then(owning_declaration),
        kind if kind.is_type_parameter_constraint() => node
            .ancestors()
            .find(|ancestor| ancestor.is(SyntaxKind::TypeParameterConstraintsClause))
            .and_then(owning_declaration),
        _ => None,
    }
}

/// The name a constraint clause constrains, as in `where T : class`.
pub(crate) fn clause_target(clause: SyntaxNode<'_>) -> Option<SyntaxNode<'_>> {
    field_or(clause, "target", |n| {
        n.first_child_of_kind(SyntaxKind::Identifier)
    })
}

/// How new constraint clauses are laid out.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ClauseLayout {
    /// Each clause follows the signature on the same line.
    #[default]
    Inline,
    /// Each clause starts a new line indented by `indent` spaces.
    Wrapped {
        /// Number of spaces before `where`.
        indent: usize,
    },
}

impl ClauseLayout {
    fn render(self, clauses: &[&str]) -> String {
        clauses
            .iter()
            .map(|clause| match self {
                Self::Inline => format!(" {clause}"),
                Self::Wrapped { indent } => format!("\n{}{clause}", " ".repeat(indent)),
            })
            .collect()
    }
}

/// The generic signature of a class, struct, interface, record, delegate,
/// method or local function.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenericInfo<'t> {
    node: Option<SyntaxNode<'t>>,
    type_parameter_list: Option<SyntaxNode<'t>>,
    type_parameters: Vec<SyntaxNode<'t>>,
    constraint_clauses: Vec<SyntaxNode<'t>>,
}

impl<'t> GenericInfo<'t> {
    /// Matches a generic declaration, or any type parameter list, type
    /// parameter, constraint clause or constraint inside one.
    ///
    /// A declaration with no type parameters still matches; its lists are
    /// empty.
    #[must_use]
    pub fn create(node: SyntaxNode<'t>) -> Self {
        let Some(declaration) = owning_declaration(node) else {
            return Self::default();
        };
        let type_parameter_list = field_or(declaration, "type_parameters", |n| {
            n.first_child_of_kind(SyntaxKind::TypeParameterList)
        });
        Self {
            node: Some(declaration),
            type_parameter_list,
            type_parameters: type_parameter_list
                .map(|list| list.children_of_kind(SyntaxKind::TypeParameter))
                .unwrap_or_default(),
            constraint_clauses: declaration
                .children_of_kind(SyntaxKind::TypeParameterConstraintsClause),
        }
    }

    /// Matches the rebuilt declaration of an edit.
    #[must_use]
    pub fn from_edited(edited: &'t EditedSyntax) -> Self {
        edited.node().map(Self::create).unwrap_or_default()
    }

    /// The declaration.
    #[must_use]
    pub const fn node(&self) -> Option<SyntaxNode<'t>> {
        self.node
    }

    /// The declaration's kind, or [`SyntaxKind::Unknown`] on a failed match.
    #[must_use]
    pub fn kind(&self) -> SyntaxKind {
        self.node.map_or(SyntaxKind::Unknown, |node| node.kind())
    }

    /// `<T, U>`, when present.
    #[must_use]
    pub const fn type_parameter_list(&self) -> Option<SyntaxNode<'t>> {
        self.type_parameter_list
    }

    /// The type parameters, in source order.
    #[must_use]
    pub fn type_parameters(&self) -> &[SyntaxNode<'t>] {
        &self.type_parameters
    }

    /// The `where` clauses, in source order.
    #[must_use]
    pub fn constraint_clauses(&self) -> &[SyntaxNode<'t>] {
        &self.constraint_clauses
    }

    /// The type parameter called `name`.
    #[must_use]
    pub fn find_type_parameter(&self, name: &str) -> Option<SyntaxNode<'t>> {
        self.type_parameters
            .iter()
            .copied()
            .find(|parameter| name_of(*parameter).is_some_and(|id| id.text() == name))
    }

    /// The `where` clause that constrains `type_parameter_name`.
    #[must_use]
    pub fn find_constraint_clause(&self, type_parameter_name: &str) -> Option<SyntaxNode<'t>> {
        self.constraint_clauses
            .iter()
            .copied()
            .find(|clause| clause_target(*clause).is_some_and(|id| id.text() == type_parameter_name))
    }

    /// Whether the match succeeded.
    #[must_use]
    pub const fn success(&self) -> bool {
        self.node.is_some()
    }

    /// Replaces the type parameter list with `list` (for example `"<T>"`),
    /// or removes it when `list` is `None`.
    ///
    /// # Errors
    ///
    /// Returns [`ShapeError::NotInitialized`] on a failed match, or a
    /// syntax error if the edited source cannot be re-parsed.
    pub fn with_type_parameter_list(&self, list: Option<&str>) -> Result<EditedSyntax, ShapeError> {
        let node = self.declaration()?;
        let edits = match (self.type_parameter_list, list) {
            (Some(existing), Some(text)) => vec![TextEdit::replace(existing.byte_range(), text)],
            (Some(existing), None) => vec![TextEdit::delete(existing.byte_range())],
            (None, Some(text)) => {
                let name = name_of(node).ok_or_else(|| ShapeError::foreign_node(SHAPE, "declaration name"))?;
                vec![TextEdit::insert(name.byte_range().end, text)]
            }
            (None, None) => Vec::new(),
        };
        Self::rebuild(node, "type parameter list", &edits)
    }

    /// Removes `type_parameter` from the list, dropping the whole list when
    /// it is the only one. Constraint clauses are left untouched.
    ///
    /// # Errors
    ///
    /// Returns [`ShapeError::ForeignNode`] when `type_parameter` is not one
    /// of this declaration's type parameters, otherwise as for
    /// [`Self::with_type_parameter_list`].
    pub fn remove_type_parameter(
        &self,
        type_parameter: SyntaxNode<'_>,
    ) -> Result<EditedSyntax, ShapeError> {
        let node = self.declaration()?;
        let index = self
            .type_parameters
            .iter()
            .position(|parameter| *parameter == type_parameter)
            .ok_or_else(|| ShapeError::foreign_node(SHAPE, "type parameter"))?;
        if self.type_parameters.len() == 1 {
            return self.with_type_parameter_list(None);
        }
        let range = type_parameter.byte_range();
        let deleted = match (
            self.type_parameters.get(index + 1),
            index.checked_sub(1).and_then(|previous| self.type_parameters.get(previous)),
        ) {
            (Some(next), _) => range.start..next.byte_range().start,
            (None, Some(previous)) => previous.byte_range().end..range.end,
            (None, None) => range,
        };
        Self::rebuild(node, "type parameter", &[TextEdit::delete(deleted)])
    }

    /// Replaces every constraint clause with `clauses`, each written out in
    /// full (for example `"where T : class"`).
    ///
    /// # Errors
    ///
    /// As for [`Self::with_type_parameter_list`].
    pub fn with_constraint_clauses(
        &self,
        clauses: &[&str],
        layout: ClauseLayout,
    ) -> Result<EditedSyntax, ShapeError> {
        let node = self.declaration()?;
        let rendered = layout.render(clauses);
        let edit = match (self.constraint_clauses.first(), self.constraint_clauses.last()) {
            (Some(first), Some(last)) => {
                TextEdit::replace(leading_edge(*first)..last.byte_range().end, rendered)
            }
            _ if clauses.is_empty() => return Self::rebuild(node, "constraint clauses", &[]),
            _ => TextEdit::insert(signature_end(node), rendered),
        };
        Self::rebuild(node, "constraint clauses", &[edit])
    }

    /// Removes one constraint clause.
    ///
    /// # Errors
    ///
    /// Returns [`ShapeError::ForeignNode`] when `clause` is not one of this
    /// declaration's clauses, otherwise as for
    /// [`Self::with_type_parameter_list`].
    pub fn remove_constraint_clause(
        &self,
        clause: SyntaxNode<'_>,
    ) -> Result<EditedSyntax, ShapeError> {
        let node = self.declaration()?;
        if !self.constraint_clauses.iter().any(|own| *own == clause) {
            return Err(ShapeError::foreign_node(SHAPE, "constraint clause"));
        }
        let edit = TextEdit::delete(leading_edge(clause)..clause.byte_range().end);
        Self::rebuild(node, "constraint clause", &[edit])
    }

    /// Removes every constraint clause.
    ///
    /// # Errors
    ///
    /// As for [`Self::with_type_parameter_list`].
    pub fn remove_all_constraint_clauses(&self) -> Result<EditedSyntax, ShapeError> {
        self.with_constraint_clauses(&[], ClauseLayout::Inline)
    }

    fn declaration(&self) -> Result<SyntaxNode<'t>, ShapeError> {
        self.node.ok_or_else(|| ShapeError::not_initialized(SHAPE))
    }

    fn rebuild(
        node: SyntaxNode<'_>,
        what: &'static str,
        edits: &[TextEdit],
    ) -> Result<EditedSyntax, ShapeError> {
        debug!(
            target: SHAPES_TARGET,
            kind = %node.kind(),
            position = %node.start_position(),
            what,
            "rewriting generic declaration"
        );
        Ok(EditedSyntax::apply(node, edits)?)
    }
}

/// Where a clause begins once the whitespace before it is included.
fn leading_edge(clause: SyntaxNode<'_>) -> usize {
    clause
        .prev_sibling()
        .map_or(clause.byte_range().start, |previous| previous.byte_range().end)
}

/// The end of the last signature part that constraint clauses follow.
fn signature_end(node: SyntaxNode<'_>) -> usize {
    let name = name_of(node);
    node.tokens()
        .into_iter()
        .rev()
        .find(|token| {
            Some(*token) == name
                || matches!(
                    token.kind(),
                    SyntaxKind::TypeParameterList | SyntaxKind::ParameterList | SyntaxKind::BaseList
                )
        })
        .map_or(node.byte_range().end, |token| token.byte_range().end)
}

#[cfg(test)]
mod tests {
    use rstest::{fixture, rstest};

    use super::*;
    use crate::tests::support::{first, parsed};

    const GENERIC_CLASS: &str = "class C<T, U> where T : class where U : new() { }";

    #[fixture]
    fn generic_class() -> contour_syntax::ParseResult {
        parsed(GENERIC_CLASS)
    }

    #[rstest]
    fn declaration_lists_are_exposed(generic_class: contour_syntax::ParseResult) {
        let info = GenericInfo::create(first(&generic_class, SyntaxKind::ClassDeclaration));

        assert_eq!(info.kind(), SyntaxKind::ClassDeclaration);
        assert_eq!(info.type_parameter_list().map(|n| n.text()), Some("<T, U>"));
        assert_eq!(info.type_parameters().len(), 2);
        assert_eq!(info.constraint_clauses().len(), 2);
        assert_eq!(info.find_type_parameter("U").map(|n| n.text()), Some("U"));
        assert_eq!(
            info.find_constraint_clause("T").map(|n| n.text()),
            Some("where T : class")
        );
        assert_eq!(info.find_type_parameter("V"), None);
    }

    #[rstest]
    #[case(SyntaxKind::TypeParameterList)]
    #[case(SyntaxKind::TypeParameter)]
    #[case(SyntaxKind::TypeParameterConstraintsClause)]
    #[case(SyntaxKind::TypeParameterConstraint)]
    fn inner_nodes_reach_their_declaration(
        generic_class: contour_syntax::ParseResult,
        #[case] kind: SyntaxKind,
    ) {
        let class = first(&generic_class, SyntaxKind::ClassDeclaration);
        let info = GenericInfo::create(first(&generic_class, kind));
        assert_eq!(info.node(), Some(class));
    }

    #[rstest]
    #[case("delegate void D<T>(T value);", SyntaxKind::DelegateDeclaration)]
    #[case("class C { void M<T>(T t) { } }", SyntaxKind::MethodDeclaration)]
    #[case("interface I<out T> { }", SyntaxKind::InterfaceDeclaration)]
    #[case("struct S<T> { }", SyntaxKind::StructDeclaration)]
    fn every_generic_kind_matches(#[case] source: &str, #[case] kind: SyntaxKind) {
        let tree = parsed(source);
        let info = GenericInfo::create(first(&tree, kind));
        assert!(info.success());
        assert_eq!(info.type_parameters().len(), 1);
    }

    #[rstest]
    #[case("T", "class C<U> where T : class where U : new() { }")]
    #[case("U", "class C<T> where T : class where U : new() { }")]
    fn type_parameter_is_removed(
        generic_class: contour_syntax::ParseResult,
        #[case] name: &str,
        #[case] expected: &str,
    ) {
        let info = GenericInfo::create(first(&generic_class, SyntaxKind::ClassDeclaration));
        let parameter = info.find_type_parameter(name).expect("type parameter");

        let edited = info.remove_type_parameter(parameter).expect("edit");
        assert_eq!(edited.source(), expected);
        assert_eq!(generic_class.source(), GENERIC_CLASS);
        assert_eq!(GenericInfo::from_edited(&edited).type_parameters().len(), 1);
    }

    #[test]
    fn last_type_parameter_drops_the_list() {
        let tree = parsed("class C { void M<T>() { } }");
        let info = GenericInfo::create(first(&tree, SyntaxKind::MethodDeclaration));
        let parameter = info.find_type_parameter("T").expect("type parameter");

        let edited = info.remove_type_parameter(parameter).expect("edit");
        assert_eq!(edited.source(), "class C { void M() { } }");
        assert_eq!(GenericInfo::from_edited(&edited).type_parameter_list(), None);
    }

    #[rstest]
    fn constraint_clauses_are_removed(generic_class: contour_syntax::ParseResult) {
        let info = GenericInfo::create(first(&generic_class, SyntaxKind::ClassDeclaration));
        let clause = info.find_constraint_clause("T").expect("clause");

        let one = info.remove_constraint_clause(clause).expect("edit");
        assert_eq!(one.source(), "class C<T, U> where U : new() { }");

        let all = info.remove_all_constraint_clauses().expect("edit");
        assert_eq!(all.source(), "class C<T, U> { }");
        assert!(GenericInfo::from_edited(&all).constraint_clauses().is_empty());
    }

    #[rstest]
    #[case(ClauseLayout::Inline, "class C { void M<T>(T t) where T : struct { } }")]
    #[case(
        ClauseLayout::Wrapped { indent: 4 },
        "class C { void M<T>(T t)\n    where T : struct { } }"
    )]
    fn constraint_clauses_are_added(#[case] layout: ClauseLayout, #[case] expected: &str) {
        let tree = parsed("class C { void M<T>(T t) { } }");
        let info = GenericInfo::create(first(&tree, SyntaxKind::MethodDeclaration));

        let edited = info
            .with_constraint_clauses(&["where T : struct"], layout)
            .expect("edit");
        assert_eq!(edited.source(), expected);
        assert_eq!(GenericInfo::from_edited(&edited).constraint_clauses().len(), 1);
    }

    #[rstest]
    #[case("class C { }", Some("<T>"), "class C<T> { }")]
    #[case("class C<T> { }", None, "class C { }")]
    #[case("class C<T> { }", Some("<TKey, TValue>"), "class C<TKey, TValue> { }")]
    fn type_parameter_list_is_replaced(
        #[case] source: &str,
        #[case] list: Option<&str>,
        #[case] expected: &str,
    ) {
        let tree = parsed(source);
        let info = GenericInfo::create(first(&tree, SyntaxKind::ClassDeclaration));

        let edited = info.with_type_parameter_list(list).expect("edit");
        assert_eq!(edited.source(), expected);
    }

    #[rstest]
    fn foreign_nodes_are_rejected(generic_class: contour_syntax::ParseResult) {
        let other = parsed("class D<T> where T : class { }");
        let info = GenericInfo::create(first(&generic_class, SyntaxKind::ClassDeclaration));

        let parameter = first(&other, SyntaxKind::TypeParameter);
        let clause = first(&other, SyntaxKind::TypeParameterConstraintsClause);
        assert!(matches!(
            info.remove_type_parameter(parameter),
            Err(ShapeError::ForeignNode { .. })
        ));
        assert!(matches!(
            info.remove_constraint_clause(clause),
            Err(ShapeError::ForeignNode { .. })
        ));
    }

    #[test]
    fn failed_match_cannot_be_edited() {
        let tree = parsed("class C { int f; }");
        let info = GenericInfo::create(first(&tree, SyntaxKind::FieldDeclaration));

        assert!(!info.success());
        assert!(matches!(
            info.remove_all_constraint_clauses(),
            Err(ShapeError::NotInitialized { .. })
        ));
    }
}
