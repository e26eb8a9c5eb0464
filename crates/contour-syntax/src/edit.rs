//! Text-level edits and re-parsing.
//!
//! Trees are immutable, so structural edits are expressed as byte-range
//! replacements over the source text followed by a fresh parse. The rebuilt
//! node is located again through an [`EditAnchor`] so callers can keep
//! inspecting it in the new tree.

use std::ops::Range;

use tracing::debug;

use crate::EDIT_TARGET;
use crate::error::SyntaxError;
use crate::kind::SyntaxKind;
use crate::node::SyntaxNode;
use crate::parser::{ParseResult, Parser};

/// A single replacement of a byte range in source text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextEdit {
    range: Range<usize>,
    replacement: String,
}

impl TextEdit {
    /// Replaces `range` with `replacement`.
    #[must_use]
    pub fn replace(range: Range<usize>, replacement: impl Into<String>) -> Self {
        Self {
            range,
            replacement: replacement.into(),
        }
    }

    /// Inserts `text` at `offset`.
    #[must_use]
    pub fn insert(offset: usize, text: impl Into<String>) -> Self {
        Self::replace(offset..offset, text)
    }

    /// Deletes `range`.
    #[must_use]
    pub fn delete(range: Range<usize>) -> Self {
        Self::replace(range, String::new())
    }

    /// Returns the replaced byte range.
    #[must_use]
    pub fn range(&self) -> Range<usize> {
        self.range.clone()
    }

    /// Returns the replacement text.
    #[must_use]
    pub fn replacement(&self) -> &str {
        &self.replacement
    }
}

/// Applies non-overlapping edits to `source`.
///
/// Edits may be given in any order; they are applied from the end of the
/// source backwards so earlier offsets stay valid.
///
/// # Errors
///
/// Returns [`SyntaxError::InvalidEdit`] when an edit is out of bounds, is
/// not on a UTF-8 boundary, or overlaps another edit.
pub fn apply_edits(source: &str, edits: &[TextEdit]) -> Result<String, SyntaxError> {
    let mut sorted: Vec<&TextEdit> = edits.iter().collect();
    sorted.sort_by(|a, b| {
        b.range
            .start
            .cmp(&a.range.start)
            .then(b.range.end.cmp(&a.range.end))
    });

    let mut result = source.to_owned();
    let mut floor = source.len();

    for edit in sorted {
        let range = edit.range();
        if range.start > range.end || range.end > source.len() {
            return Err(SyntaxError::invalid_edit(range, "range is out of bounds"));
        }
        if !source.is_char_boundary(range.start) || !source.is_char_boundary(range.end) {
            return Err(SyntaxError::invalid_edit(
                range,
                "range is not on a UTF-8 boundary",
            ));
        }
        if range.end > floor {
            return Err(SyntaxError::invalid_edit(range, "edit overlaps another edit"));
        }

        result.replace_range(range.clone(), &edit.replacement);
        floor = range.start;
    }

    Ok(result)
}

/// Locates a node of a given kind by its start offset in a re-parsed tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EditAnchor {
    start: usize,
    kind: SyntaxKind,
}

impl EditAnchor {
    /// Creates an anchor for a node that will start at `start` once the edit
    /// is applied.
    #[must_use]
    pub const fn new(start: usize, kind: SyntaxKind) -> Self {
        Self { start, kind }
    }

    /// Returns the anchored start offset.
    #[must_use]
    pub const fn start(&self) -> usize {
        self.start
    }

    /// Returns the anchored kind.
    #[must_use]
    pub const fn kind(&self) -> SyntaxKind {
        self.kind
    }

    /// Computes where a node starting at `start` in the original source
    /// lands after `edits` are applied.
    #[must_use]
    pub fn shifted(node: SyntaxNode<'_>, edits: &[TextEdit]) -> Self {
        let start = node.byte_range().start;
        let shift = edits
            .iter()
            .filter(|edit| edit.range.end <= start && edit.range.start < start)
            .fold(0_isize, |acc, edit| {
                let removed = isize::try_from(edit.range.len()).unwrap_or(isize::MAX);
                let added = isize::try_from(edit.replacement.len()).unwrap_or(isize::MAX);
                acc.saturating_add(added.saturating_sub(removed))
            });
        Self::new(start.saturating_add_signed(shift), node.kind())
    }
}

/// The product of a structural edit: a fresh tree and the rebuilt node's
/// location within it.
#[derive(Debug)]
pub struct EditedSyntax {
    parsed: ParseResult,
    anchor: EditAnchor,
}

impl EditedSyntax {
    /// Applies `edits` to the source of `node`'s tree, re-parses, and anchors
    /// the result to where `node` now starts.
    ///
    /// # Errors
    ///
    /// Returns an error if the edits are invalid or the parser fails.
    pub fn apply(node: SyntaxNode<'_>, edits: &[TextEdit]) -> Result<Self, SyntaxError> {
        let output = apply_edits(node.source(), edits)?;
        let anchor = EditAnchor::shifted(node, edits);
        debug!(
            target: EDIT_TARGET,
            kind = %node.kind(),
            edits = edits.len(),
            "re-parsing edited source"
        );
        let parsed = Parser::new()?.parse(&output)?;
        Ok(Self { parsed, anchor })
    }

    /// Returns the re-parsed tree.
    #[must_use]
    pub const fn parsed(&self) -> &ParseResult {
        &self.parsed
    }

    /// Returns the edited source text.
    #[must_use]
    pub fn source(&self) -> &str {
        self.parsed.source()
    }

    /// Returns the anchor of the rebuilt node.
    #[must_use]
    pub const fn anchor(&self) -> EditAnchor {
        self.anchor
    }

    /// Locates the rebuilt node in the new tree.
    ///
    /// Returns `None` only if the edit changed the node's kind, which means
    /// the replacement text did not parse as intended.
    #[must_use]
    pub fn node(&self) -> Option<SyntaxNode<'_>> {
        let start = self.anchor.start;
        let mut candidate = self
            .parsed
            .node_at(start..start)
            .filter(|node| node.byte_range().start == start);
        while let Some(node) = candidate {
            if node.is(self.anchor.kind) {
                return Some(node);
            }
            candidate = node
                .parent()
                .filter(|parent| parent.byte_range().start == start);
        }
        None
    }

    /// Consumes the edit and returns the re-parsed tree.
    #[must_use]
    pub fn into_parsed(self) -> ParseResult {
        self.parsed
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;
    use crate::parse;

    #[test]
    fn edits_apply_from_the_end() {
        let output = apply_edits(
            "class C { }",
            &[
                TextEdit::insert(7, "<T>"),
                TextEdit::replace(0..5, "struct"),
            ],
        )
        .expect("apply");

        assert_eq!(output, "struct C<T> { }");
    }

    #[rstest]
    #[case(TextEdit::delete(3..20))]
    #[case(TextEdit::replace(4..2, "x"))]
    fn out_of_bounds_edits_are_rejected(#[case] edit: TextEdit) {
        let err = apply_edits("class C", &[edit]).expect_err("invalid edit");
        assert!(matches!(err, SyntaxError::InvalidEdit { .. }));
    }

    #[test]
    fn overlapping_edits_are_rejected() {
        let err = apply_edits(
            "class C { }",
            &[TextEdit::delete(0..6), TextEdit::delete(4..8)],
        )
        .expect_err("overlap");

        assert!(matches!(err, SyntaxError::InvalidEdit { .. }));
    }

    #[test]
    fn non_utf8_boundaries_are_rejected() {
        let err = apply_edits("\"é\"", &[TextEdit::delete(0..2)]).expect_err("boundary");
        assert!(matches!(err, SyntaxError::InvalidEdit { .. }));
    }

    #[test]
    fn edited_syntax_relocates_the_rebuilt_node() {
        let parsed = parse("class A { } class B { }").expect("parse");
        let classes = parsed.root().children_of_kind(SyntaxKind::ClassDeclaration);
        let [first, second] = classes.as_slice() else {
            panic!("expected two classes, got {classes:?}");
        };
        let name_end = first
            .child_by_field("name")
            .expect("name")
            .byte_range()
            .end;

        let edited = EditedSyntax::apply(*second, &[TextEdit::insert(name_end, "<T>")])
            .expect("edit");

        assert_eq!(edited.source(), "class A<T> { } class B { }");
        let rebuilt = edited.node().expect("rebuilt node");
        assert_eq!(rebuilt.text(), "class B { }");
    }
}
