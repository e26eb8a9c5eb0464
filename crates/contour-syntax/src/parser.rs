//! Tree-sitter parsing wrapper with error recovery.
//!
//! This module loads the C# grammar and exposes parse results that own both
//! the tree and the text it was parsed from, so borrowed [`SyntaxNode`] views
//! can be handed out without copying.

use std::fmt;
use std::ops::Range;

use tracing::trace;

use crate::PARSE_TARGET;
use crate::error::SyntaxError;
use crate::node::SyntaxNode;
use crate::position::Position;

/// Result of parsing C# source code.
///
/// Tree-sitter is error-tolerant, so a parse result may contain both a usable
/// tree and ERROR or MISSING nodes. Matchers treat MISSING nodes as invalid
/// unless asked otherwise.
#[derive(Debug)]
pub struct ParseResult {
    tree: tree_sitter::Tree,
    source: String,
}

impl ParseResult {
    /// Returns the parsed syntax tree.
    #[must_use]
    pub const fn tree(&self) -> &tree_sitter::Tree {
        &self.tree
    }

    /// Returns the source code that was parsed.
    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Returns the `compilation_unit` root as a borrowed view.
    #[must_use]
    pub fn root(&self) -> SyntaxNode<'_> {
        SyntaxNode::new(self.tree.root_node(), &self.source)
    }

    /// Returns the raw Tree-sitter root node.
    #[must_use]
    pub fn root_node(&self) -> tree_sitter::Node<'_> {
        self.tree.root_node()
    }

    /// Returns the smallest node spanning `range`, if any.
    #[must_use]
    pub fn node_at(&self, range: Range<usize>) -> Option<SyntaxNode<'_>> {
        self.tree
            .root_node()
            .descendant_for_byte_range(range.start, range.end)
            .map(|node| SyntaxNode::new(node, &self.source))
    }

    /// Whether recovery produced any ERROR or MISSING nodes.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        self.tree.root_node().has_error()
    }

    /// Lists the ERROR and MISSING nodes in document order.
    #[must_use]
    pub fn errors(&self) -> Vec<SyntaxErrorInfo> {
        if !self.has_errors() {
            return Vec::new();
        }
        let mut found = Vec::new();
        let mut cursor = self.tree.walk();
        loop {
            let node = cursor.node();
            let recovered = node.is_error() || SyntaxNode::new(node, &self.source).is_missing();
            if recovered {
                found.push(SyntaxErrorInfo::new(node, &self.source));
            }
            let descend = !recovered && node.has_error() && cursor.goto_first_child();
            if descend || cursor.goto_next_sibling() {
                continue;
            }
            if !climb_to_next_sibling(&mut cursor) {
                return found;
            }
        }
    }
}

/// Moves up until a following sibling exists, returning `false` at the root.
fn climb_to_next_sibling(cursor: &mut tree_sitter::TreeCursor<'_>) -> bool {
    while cursor.goto_parent() {
        if cursor.goto_next_sibling() {
            return true;
        }
    }
    false
}

/// A node that parser recovery inserted or could not place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxErrorInfo {
    /// Bytes covered by the node; empty for a MISSING node.
    pub byte_range: Range<usize>,
    /// Where the node starts.
    pub position: Position,
    /// The text that could not be parsed, empty for a MISSING node.
    pub text: String,
    /// For a MISSING node, the kind of node the parser expected.
    pub expected: Option<&'static str>,
}

impl SyntaxErrorInfo {
    fn new(node: tree_sitter::Node<'_>, source: &str) -> Self {
        Self {
            byte_range: node.byte_range(),
            position: Position::from_point(node.start_position()),
            text: source.get(node.byte_range()).unwrap_or_default().to_owned(),
            expected: (!node.is_error()).then(|| node.kind()),
        }
    }
}

impl fmt::Display for SyntaxErrorInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.expected {
            Some(kind) => write!(f, "{}: missing {kind}", self.position),
            None => write!(f, "{}: unexpected {:?}", self.position, self.text),
        }
    }
}

/// Tree-sitter parser configured with the C# grammar.
pub struct Parser {
    inner: tree_sitter::Parser,
}

impl Parser {
    /// Creates a new C# parser.
    ///
    /// # Errors
    ///
    /// Returns an error if the grammar ABI is incompatible with the linked
    /// Tree-sitter runtime.
    pub fn new() -> Result<Self, SyntaxError> {
        let mut inner = tree_sitter::Parser::new();
        inner
            .set_language(&tree_sitter_c_sharp::LANGUAGE.into())
            .map_err(|e| SyntaxError::parser_init(e.to_string()))?;
        Ok(Self { inner })
    }

    /// Parses source code and returns the result.
    ///
    /// # Errors
    ///
    /// Returns an error if the parser fails to produce a syntax tree. This
    /// is rare and typically indicates a parser configuration issue.
    pub fn parse(&mut self, source: &str) -> Result<ParseResult, SyntaxError> {
        let tree = self
            .inner
            .parse(source, None)
            .ok_or_else(|| SyntaxError::parse("parsing failed"))?;

        trace!(
            target: PARSE_TARGET,
            bytes = source.len(),
            has_errors = tree.root_node().has_error(),
            "parsed C# source"
        );

        Ok(ParseResult {
            tree,
            source: source.to_owned(),
        })
    }
}

impl fmt::Debug for Parser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Parser").finish_non_exhaustive()
    }
}

/// Parses `source` with a fresh parser.
///
/// # Errors
///
/// Returns an error if the parser cannot be created or produces no tree.
pub fn parse(source: &str) -> Result<ParseResult, SyntaxError> {
    Parser::new()?.parse(source)
}
