//! Borrowed views over Tree-sitter nodes.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::Range;

use crate::kind::SyntaxKind;
use crate::position::Position;

/// A node of a parsed C# tree together with the text it was parsed from.
///
/// The view is `Copy` and borrows the owning [`ParseResult`](crate::ParseResult),
/// so it can be stored in matcher results freely. Equality is node identity:
/// two views are equal only when they denote the same node of the same tree.
#[derive(Clone, Copy)]
pub struct SyntaxNode<'t> {
    node: tree_sitter::Node<'t>,
    source: &'t str,
}

impl<'t> SyntaxNode<'t> {
    /// Wraps a raw Tree-sitter node.
    ///
    /// `source` must be the text the node's tree was parsed from.
    #[must_use]
    pub const fn new(node: tree_sitter::Node<'t>, source: &'t str) -> Self {
        Self { node, source }
    }

    const fn wrap(&self, node: tree_sitter::Node<'t>) -> Self {
        Self::new(node, self.source)
    }

    /// Returns the underlying Tree-sitter node.
    #[must_use]
    pub const fn ts_node(&self) -> tree_sitter::Node<'t> {
        self.node
    }

    /// Returns the full source text of the tree this node belongs to.
    #[must_use]
    pub const fn source(&self) -> &'t str {
        self.source
    }

    /// Returns the node kind within the closed [`SyntaxKind`] set.
    #[must_use]
    pub fn kind(&self) -> SyntaxKind {
        SyntaxKind::from_raw(self.node.kind())
    }

    /// Returns the grammar's kind name, including anonymous token kinds.
    #[must_use]
    pub fn raw_kind(&self) -> &'static str {
        self.node.kind()
    }

    /// Whether this node has the given kind.
    #[must_use]
    pub fn is(&self, kind: SyntaxKind) -> bool {
        self.kind() == kind
    }

    /// Whether this is a named node rather than an anonymous token.
    #[must_use]
    pub fn is_named(&self) -> bool {
        self.node.is_named()
    }

    /// Whether the parser synthesised this node to recover from an error.
    ///
    /// The grammar wraps some missing tokens in a visible node, as in
    /// `(identifier (MISSING _identifier_token))`. Such a wrapper covers no
    /// text yet carries an error, and counts as missing too.
    #[must_use]
    pub fn is_missing(&self) -> bool {
        self.node.is_missing() || (self.node.byte_range().is_empty() && self.node.has_error())
    }

    /// Whether this is trivia the grammar allows anywhere, such as a comment
    /// or a preprocessor directive.
    #[must_use]
    pub fn is_extra(&self) -> bool {
        self.node.is_extra()
    }

    /// Whether this node or any descendant is an error or missing node.
    #[must_use]
    pub fn has_error(&self) -> bool {
        self.node.has_error()
    }

    /// Returns the source text covered by this node.
    #[must_use]
    pub fn text(&self) -> &'t str {
        self.source.get(self.node.byte_range()).unwrap_or_default()
    }

    /// Returns the byte range of this node.
    #[must_use]
    pub fn byte_range(&self) -> Range<usize> {
        self.node.byte_range()
    }

    /// Returns the one-based start position.
    #[must_use]
    pub fn start_position(&self) -> Position {
        Position::from_point(self.node.start_position())
    }

    /// Returns the parent node.
    #[must_use]
    pub fn parent(&self) -> Option<Self> {
        self.node.parent().map(|parent| self.wrap(parent))
    }

    /// Returns the ancestors of this node, nearest first.
    pub fn ancestors(&self) -> impl Iterator<Item = Self> + use<'t> {
        std::iter::successors(self.parent(), Self::parent)
    }

    /// Returns the named children, skipping comments and other extras.
    #[must_use]
    pub fn children(&self) -> Vec<Self> {
        let mut cursor = self.node.walk();
        self.node
            .named_children(&mut cursor)
            .filter(|child| !child.is_extra())
            .map(|child| self.wrap(child))
            .collect()
    }

    /// Returns every child, including anonymous tokens such as `(` or `+`.
    #[must_use]
    pub fn tokens(&self) -> Vec<Self> {
        let mut cursor = self.node.walk();
        self.node
            .children(&mut cursor)
            .map(|child| self.wrap(child))
            .collect()
    }

    /// Returns the first named child that is not trivia.
    #[must_use]
    pub fn first_child(&self) -> Option<Self> {
        self.children().into_iter().next()
    }

    /// Returns the last named child that is not trivia.
    #[must_use]
    pub fn last_child(&self) -> Option<Self> {
        self.children().into_iter().next_back()
    }

    /// Returns the child stored under a grammar field name.
    #[must_use]
    pub fn child_by_field(&self, field: &str) -> Option<Self> {
        self.node
            .child_by_field_name(field)
            .map(|child| self.wrap(child))
    }

    /// Returns the first named child of the given kind.
    #[must_use]
    pub fn first_child_of_kind(&self, kind: SyntaxKind) -> Option<Self> {
        self.children().into_iter().find(|child| child.is(kind))
    }

    /// Returns all named children of the given kind, in source order.
    #[must_use]
    pub fn children_of_kind(&self, kind: SyntaxKind) -> Vec<Self> {
        self.children()
            .into_iter()
            .filter(|child| child.is(kind))
            .collect()
    }

    /// Returns the first anonymous token child whose text is `token`.
    #[must_use]
    pub fn token(&self, token: &str) -> Option<Self> {
        self.tokens()
            .into_iter()
            .find(|child| !child.is_named() && child.raw_kind() == token)
    }

    /// Returns this node and all of its named descendants in pre-order.
    #[must_use]
    pub fn descendants(&self) -> Vec<Self> {
        let mut out = Vec::new();
        let mut stack = vec![*self];
        while let Some(node) = stack.pop() {
            out.push(node);
            stack.extend(node.children().into_iter().rev());
        }
        out
    }

    /// Returns the first named descendant (or this node) of the given kind.
    #[must_use]
    pub fn first_descendant_of_kind(&self, kind: SyntaxKind) -> Option<Self> {
        self.descendants().into_iter().find(|node| node.is(kind))
    }

    /// Returns the previous sibling, named or not.
    #[must_use]
    pub fn prev_sibling(&self) -> Option<Self> {
        self.node.prev_sibling().map(|sibling| self.wrap(sibling))
    }

    /// Returns the next sibling, named or not.
    #[must_use]
    pub fn next_sibling(&self) -> Option<Self> {
        self.node.next_sibling().map(|sibling| self.wrap(sibling))
    }

    /// Whether `other` lies within this node's subtree (or is this node).
    #[must_use]
    pub fn contains(&self, other: &Self) -> bool {
        *self == *other || other.ancestors().any(|ancestor| ancestor == *self)
    }
}

impl PartialEq for SyntaxNode<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.node == other.node
    }
}

impl Eq for SyntaxNode<'_> {}

impl Hash for SyntaxNode<'_> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.node.id().hash(state);
    }
}

impl fmt::Debug for SyntaxNode<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}@{:?} {:?}",
            self.node.kind(),
            self.node.byte_range(),
            self.text()
        )
    }
}

impl fmt::Display for SyntaxNode<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.text())
    }
}

#[cfg(test)]
mod tests {
    use crate::{SyntaxKind, parse};

    #[test]
    fn views_over_the_same_node_are_equal() {
        let parsed = parse("class C { void M() { } }").expect("parse");
        let root = parsed.root();
        let first = root
            .first_descendant_of_kind(SyntaxKind::MethodDeclaration)
            .expect("method");
        let second = root
            .first_descendant_of_kind(SyntaxKind::MethodDeclaration)
            .expect("method");

        assert_eq!(first, second);
        assert_ne!(first, root);
    }

    #[test]
    fn text_and_position_come_from_source() {
        let parsed = parse("class C {\n    int x;\n}").expect("parse");
        let field = parsed
            .root()
            .first_descendant_of_kind(SyntaxKind::FieldDeclaration)
            .expect("field");

        assert_eq!(field.text(), "int x;");
        assert_eq!(field.start_position().line, 2);
        assert_eq!(field.start_position().column, 5);
    }

    #[test]
    fn tokens_include_anonymous_children() {
        let parsed = parse("class C { int M() => 1 + 2; }").expect("parse");
        let binary = parsed
            .root()
            .first_descendant_of_kind(SyntaxKind::BinaryExpression)
            .expect("binary");

        assert!(binary.token("+").is_some());
        assert_eq!(binary.children().len(), 2);
    }

    #[test]
    fn empty_recovery_wrappers_are_missing() {
        let parsed = parse("class C { void M() { x = ; } }").expect("parse");
        let assignment = parsed
            .root()
            .first_descendant_of_kind(SyntaxKind::AssignmentExpression)
            .expect("assignment");
        let left = assignment.child_by_field("left").expect("left");
        let right = assignment.child_by_field("right").expect("right");

        assert!(right.text().is_empty());
        assert!(right.is_missing());
        assert!(!left.is_missing());
    }

    #[test]
    fn children_skip_comments() {
        let parsed = parse("class C { int M() => (/* why */ x); }").expect("parse");
        let parenthesized = parsed
            .root()
            .first_descendant_of_kind(SyntaxKind::ParenthesizedExpression)
            .expect("parenthesized");

        assert_eq!(parenthesized.children().len(), 1);
        assert_eq!(parenthesized.first_child().map(|n| n.text()), Some("x"));
        assert!(parenthesized.tokens().iter().any(|token| token.is_extra()));
    }

    #[test]
    fn contains_checks_subtree_membership() {
        let parsed = parse("class C { void M() { } } class D { }").expect("parse");
        let root = parsed.root();
        let classes = root.children_of_kind(SyntaxKind::ClassDeclaration);
        let [c, d] = classes.as_slice() else {
            panic!("expected two classes, got {classes:?}");
        };
        let method = c
            .first_descendant_of_kind(SyntaxKind::MethodDeclaration)
            .expect("method");

        assert!(c.contains(&method));
        assert!(!d.contains(&method));
    }
}
