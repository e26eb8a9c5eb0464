//! String concatenation chains and their reconstruction as one literal.

use bitflags::bitflags;
use contour_syntax::{BinaryOperator, SyntaxKind, SyntaxNode};
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::error::ShapeError;
use crate::expressions::binary_chain;
use crate::literals::{
    StringLiteralExpressionInfo, StringLiteralStyle, escape_regular, escape_verbatim,
    unescape_verbatim,
};
use crate::options::MatchOptions;
use crate::semantic::SemanticModel;
use crate::support::{SEMANTIC_TARGET, candidate, field_or, operator_text};

const SHAPE: &str = "StringConcatenationExpressionInfo";

bitflags! {
    /// The kinds of operand found in a concatenation.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct StringConcatenationFlags: u8 {
        /// `"text"`
        const REGULAR_LITERAL = 1;
        /// `@"text"`
        const VERBATIM_LITERAL = 1 << 1;
        /// `"""text"""`
        const RAW_LITERAL = 1 << 2;
        /// `$"text"`
        const REGULAR_INTERPOLATED = 1 << 3;
        /// `$@"text"`
        const VERBATIM_INTERPOLATED = 1 << 4;
        /// `$"""text"""`
        const RAW_INTERPOLATED = 1 << 5;
        /// Anything else.
        const NON_STRING = 1 << 6;

        /// Any plain string literal.
        const LITERAL = Self::REGULAR_LITERAL.bits()
            | Self::VERBATIM_LITERAL.bits()
            | Self::RAW_LITERAL.bits();
        /// Any interpolated string.
        const INTERPOLATED = Self::REGULAR_INTERPOLATED.bits()
            | Self::VERBATIM_INTERPOLATED.bits()
            | Self::RAW_INTERPOLATED.bits();
        /// Operands written with backslash escapes.
        const REGULAR = Self::REGULAR_LITERAL.bits() | Self::REGULAR_INTERPOLATED.bits();
        /// Operands written with doubled-quote escapes.
        const VERBATIM = Self::VERBATIM_LITERAL.bits() | Self::VERBATIM_INTERPOLATED.bits();
    }
}

impl StringConcatenationFlags {
    /// Whether some operand is not a plain string literal.
    #[must_use]
    pub const fn contains_non_string_literal(self) -> bool {
        self.intersects(Self::INTERPOLATED.union(Self::NON_STRING))
    }
}

impl Default for StringConcatenationFlags {
    fn default() -> Self {
        Self::empty()
    }
}

/// How an interpolated string is delimited.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum InterpolatedStyle {
    Regular,
    Verbatim,
    Raw,
}

/// An interpolated string operand, split at its delimiters.
#[derive(Debug, Clone, Copy)]
struct InterpolatedParts<'t> {
    node: SyntaxNode<'t>,
    style: InterpolatedStyle,
    /// Byte range of the content between the delimiters.
    content: (usize, usize),
}

impl<'t> InterpolatedParts<'t> {
    fn parse(node: SyntaxNode<'t>) -> Option<Self> {
        if !node.is(SyntaxKind::InterpolatedStringExpression) {
            return None;
        }
        let text = node.text();
        let prefix_len = text.find('"')?;
        let prefix = text.get(..prefix_len)?;
        let quotes = text.get(prefix_len..)?.chars().take_while(|c| *c == '"').count();
        let style = if prefix.contains('@') {
            InterpolatedStyle::Verbatim
        } else if prefix.matches('$').count() > 1 || quotes >= 3 {
            InterpolatedStyle::Raw
        } else {
            InterpolatedStyle::Regular
        };
        let delimiter = if matches!(style, InterpolatedStyle::Raw) {
            quotes
        } else {
            1
        };
        let start = node.byte_range().start + prefix_len + delimiter;
        let end = node.byte_range().end.checked_sub(delimiter)?;
        (start <= end).then_some(Self {
            node,
            style,
            content: (start, end),
        })
    }

    fn content_text(&self) -> &'t str {
        self.node
            .source()
            .get(self.content.0..self.content.1)
            .unwrap_or_default()
    }

    /// Rewrites a verbatim interpolated string's content for a regular
    /// interpolated string, leaving interpolations untouched.
    fn content_as_regular(&self) -> Option<String> {
        let source = self.node.source();
        let mut out = String::new();
        let mut cursor = self.content.0;
        for hole in self.node.children_of_kind(SyntaxKind::Interpolation) {
            let range = hole.byte_range();
            let segment = source.get(cursor..range.start)?;
            out.push_str(&escape_regular(&unescape_verbatim(segment, true)?, true));
            out.push_str(hole.text());
            cursor = range.end;
        }
        let tail = source.get(cursor..self.content.1)?;
        out.push_str(&escape_regular(&unescape_verbatim(tail, true)?, true));
        Some(out)
    }
}

/// One operand of the chain, classified.
#[derive(Debug, Clone, Copy)]
enum Operand<'t> {
    Literal(StringLiteralExpressionInfo<'t>),
    Interpolated(InterpolatedParts<'t>),
    Other(SyntaxNode<'t>),
}

impl<'t> Operand<'t> {
    fn classify(node: SyntaxNode<'t>) -> Self {
        let literal = StringLiteralExpressionInfo::create(node, MatchOptions::default());
        if literal.success() {
            return Self::Literal(literal);
        }
        match InterpolatedParts::parse(node) {
            Some(parts) if !matches!(parts.style, InterpolatedStyle::Raw) => {
                Self::Interpolated(parts)
            }
            Some(_) | None => Self::Other(node),
        }
    }

    fn flag(&self) -> StringConcatenationFlags {
        match self {
            Self::Literal(literal) => match literal.style() {
                StringLiteralStyle::Regular => StringConcatenationFlags::REGULAR_LITERAL,
                StringLiteralStyle::Verbatim => StringConcatenationFlags::VERBATIM_LITERAL,
                StringLiteralStyle::Raw => StringConcatenationFlags::RAW_LITERAL,
            },
            Self::Interpolated(parts) => match parts.style {
                InterpolatedStyle::Regular => StringConcatenationFlags::REGULAR_INTERPOLATED,
                InterpolatedStyle::Verbatim => StringConcatenationFlags::VERBATIM_INTERPOLATED,
                InterpolatedStyle::Raw => StringConcatenationFlags::RAW_INTERPOLATED,
            },
            Self::Other(node) => {
                let raw_interpolated = InterpolatedParts::parse(*node)
                    .is_some_and(|parts| matches!(parts.style, InterpolatedStyle::Raw));
                if raw_interpolated {
                    StringConcatenationFlags::RAW_INTERPOLATED
                } else {
                    StringConcatenationFlags::NON_STRING
                }
            }
        }
    }
}

/// A chain of `+` operators that concatenates strings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StringConcatenationExpressionInfo<'t> {
    binary_expression: Option<SyntaxNode<'t>>,
}

impl<'t> StringConcatenationExpressionInfo<'t> {
    /// Matches a `+` chain whose every `+` the model resolves to built-in
    /// string concatenation.
    ///
    /// # Errors
    ///
    /// Propagates the model's error unchanged.
    pub fn create<M: SemanticModel>(
        node: SyntaxNode<'t>,
        model: &M,
        options: MatchOptions,
        cancellation: &CancellationToken,
    ) -> Result<Self, M::Error> {
        let binary = candidate(node, options);
        if !is_add(binary) {
            return Ok(Self::default());
        }
        let mut current = binary;
        loop {
            let left = field_or(current, "left", |n| n.first_child());
            let right = field_or(current, "right", |n| n.last_child());
            let (Some(left), Some(_)) = (left, right) else {
                return Ok(Self::default());
            };
            let concatenates = model.is_string_concatenation(current, cancellation)?;
            debug!(
                target: SEMANTIC_TARGET,
                position = %current.start_position(),
                concatenates,
                "resolved + operator"
            );
            if !concatenates {
                return Ok(Self::default());
            }
            if !is_add(left) {
                break;
            }
            current = left;
        }
        Ok(Self {
            binary_expression: Some(binary),
        })
    }

    /// The outermost `+` expression.
    #[must_use]
    pub const fn binary_expression(&self) -> Option<SyntaxNode<'t>> {
        self.binary_expression
    }

    /// The operands, left to right.
    #[must_use]
    pub fn expressions(&self) -> Vec<SyntaxNode<'t>> {
        self.binary_expression
            .map(|binary| binary_chain(binary, BinaryOperator::Add))
            .unwrap_or_default()
    }

    /// Classifies the operands. Empty on a failed match.
    #[must_use]
    pub fn analyze(&self) -> StringConcatenationFlags {
        self.operands()
            .iter()
            .fold(StringConcatenationFlags::empty(), |flags, operand| {
                flags | operand.flag()
            })
    }

    fn operands(&self) -> Vec<Operand<'t>> {
        self.expressions().into_iter().map(Operand::classify).collect()
    }

    fn literals(&self) -> Result<Vec<StringLiteralExpressionInfo<'t>>, ShapeError> {
        if !self.success() {
            return Err(ShapeError::not_initialized(SHAPE));
        }
        self.operands()
            .into_iter()
            .map(|operand| match operand {
                Operand::Literal(literal) => Ok(literal),
                Operand::Interpolated(parts) => {
                    Err(ShapeError::contains_non_string_literal(parts.node.text()))
                }
                Operand::Other(node) => Err(ShapeError::contains_non_string_literal(node.text())),
            })
            .collect()
    }

    /// Joins the operands into one string literal.
    ///
    /// The result is a regular literal when any operand is one, and a
    /// verbatim literal otherwise.
    ///
    /// # Errors
    ///
    /// Returns [`ShapeError::NotInitialized`] on a failed match and
    /// [`ShapeError::ContainsNonStringLiteral`] when an operand is not a plain
    /// string literal.
    pub fn to_string_literal(&self) -> Result<String, ShapeError> {
        let literals = self.literals()?;
        let regular = literals.iter().any(StringLiteralExpressionInfo::is_regular);
        let mut out = String::from(if regular { "\"" } else { "@\"" });
        for literal in &literals {
            let same_style = if regular {
                literal.is_regular()
            } else {
                literal.is_verbatim()
            };
            if same_style {
                out.push_str(literal.inner_text());
            } else {
                let value = value_of(literal)?;
                out.push_str(&if regular {
                    escape_regular(&value, false)
                } else {
                    escape_verbatim(&value, false)
                });
            }
        }
        out.push('"');
        Ok(out)
    }

    /// Joins the operands into one verbatim literal, breaking lines where
    /// the operands were split across lines.
    ///
    /// # Errors
    ///
    /// As for [`Self::to_string_literal`].
    pub fn to_multiline_string_literal(&self) -> Result<String, ShapeError> {
        let literals = self.literals()?;
        let mut out = String::from("@\"");
        let mut next_nodes = literals.iter().skip(1).map(|l| l.literal_expression());
        for literal in &literals {
            let value = value_of(literal)?;
            out.push_str(&escape_verbatim(&value, false));
            let next = next_nodes.next().flatten();
            let breaks_line = match (literal.literal_expression(), next) {
                (Some(current), Some(following)) => {
                    following.start_position().line > end_line(current)
                }
                _ => false,
            };
            if breaks_line && !value.ends_with('\n') {
                out.push('\n');
            }
        }
        out.push('"');
        Ok(out)
    }

    /// Rewrites the concatenation as one interpolated string. Non-string
    /// operands become interpolations.
    ///
    /// # Errors
    ///
    /// Returns [`ShapeError::NotInitialized`] on a failed match.
    pub fn to_interpolated_string(&self) -> Result<String, ShapeError> {
        if !self.success() {
            return Err(ShapeError::not_initialized(SHAPE));
        }
        let operands = self.operands();
        let flags = operands
            .iter()
            .fold(StringConcatenationFlags::empty(), |flags, operand| {
                flags | operand.flag()
            });
        let verbatim = flags.intersects(StringConcatenationFlags::VERBATIM)
            && !flags.intersects(StringConcatenationFlags::REGULAR);
        let mut out = String::from(if verbatim { "$@\"" } else { "$\"" });
        for operand in &operands {
            match operand {
                Operand::Literal(literal) => {
                    let same_style = if verbatim {
                        literal.is_verbatim()
                    } else {
                        literal.is_regular()
                    };
                    if same_style {
                        out.push_str(&double_braces(literal.inner_text()));
                    } else {
                        let value = value_of(literal)?;
                        out.push_str(&if verbatim {
                            escape_verbatim(&value, true)
                        } else {
                            escape_regular(&value, true)
                        });
                    }
                }
                Operand::Interpolated(parts) => {
                    let same_style = matches!(
                        (parts.style, verbatim),
                        (InterpolatedStyle::Verbatim, true) | (InterpolatedStyle::Regular, false)
                    );
                    if same_style {
                        out.push_str(parts.content_text());
                    } else {
                        let content = parts.content_as_regular().ok_or_else(|| {
                            ShapeError::contains_non_string_literal(parts.node.text())
                        })?;
                        out.push_str(&content);
                    }
                }
                Operand::Other(node) => {
                    out.push('{');
                    if node.is(SyntaxKind::ConditionalExpression) {
                        out.push('(');
                        out.push_str(node.text());
                        out.push(')');
                    } else {
                        out.push_str(node.text());
                    }
                    out.push('}');
                }
            }
        }
        out.push('"');
        Ok(out)
    }

    /// Whether the match succeeded.
    #[must_use]
    pub const fn success(&self) -> bool {
        self.binary_expression.is_some()
    }
}

fn is_add(node: SyntaxNode<'_>) -> bool {
    node.is(SyntaxKind::BinaryExpression)
        && operator_text(node).and_then(BinaryOperator::from_token) == Some(BinaryOperator::Add)
}

fn value_of(literal: &StringLiteralExpressionInfo<'_>) -> Result<String, ShapeError> {
    literal
        .value_text()
        .ok_or_else(|| ShapeError::contains_non_string_literal(literal.text()))
}

fn end_line(node: SyntaxNode<'_>) -> u32 {
    let newlines = node.text().matches('\n').count();
    node.start_position()
        .line
        .saturating_add(u32::try_from(newlines).unwrap_or(u32::MAX))
}

fn double_braces(text: &str) -> String {
    text.replace('{', "{{").replace('}', "}}")
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;
    use crate::semantic::SyntacticSemanticModel;
    use crate::tests::support::{arrow_body, arrow_expression, parsed};

    fn with_concatenation<R>(
        expression: &str,
        check: impl FnOnce(StringConcatenationExpressionInfo<'_>) -> R,
    ) -> R {
        let tree = parsed(&arrow_body(expression));
        let info = StringConcatenationExpressionInfo::create(
            arrow_expression(&tree),
            &SyntacticSemanticModel,
            MatchOptions::default(),
            &CancellationToken::new(),
        )
        .unwrap_or_else(|never| match never {});
        check(info)
    }

    #[test]
    fn three_literals_flatten_and_join() {
        with_concatenation(r#""a" + "b" + "c""#, |info| {
            let texts: Vec<_> = info.expressions().iter().map(|n| n.text()).collect();
            assert_eq!(texts, [r#""a""#, r#""b""#, r#""c""#]);
            assert_eq!(info.analyze(), StringConcatenationFlags::REGULAR_LITERAL);
            assert_eq!(info.to_string_literal().expect("literal"), r#""abc""#);
        });
    }

    #[rstest]
    #[case(r#"@"a\" + @"""b""""#, r#"@"a\""b""""#)]
    #[case(r#""x\n" + @"C:\d""#, r#""x\nC:\\d""#)]
    #[case(r#"@"q" + """raw "it" here""""#, r#"@"qraw ""it"" here""#)]
    fn literal_styles_are_reconciled(#[case] expression: &str, #[case] expected: &str) {
        with_concatenation(expression, |info| {
            assert_eq!(info.to_string_literal().expect("literal"), expected);
        });
    }

    #[test]
    fn non_literal_operand_prevents_single_literal() {
        with_concatenation(r#""a" + name + "c""#, |info| {
            assert!(info.success());
            assert!(info.analyze().contains_non_string_literal());
            let err = info.to_string_literal().expect_err("non-literal operand");
            assert!(matches!(
                err,
                ShapeError::ContainsNonStringLiteral { ref text } if text == "name"
            ));
        });
    }

    #[rstest]
    #[case(r#""Hello " + name + "!""#, r#"$"Hello {name}!""#)]
    #[case(r#""{a} " + $"{b}" + " c""#, r#"$"{{a}} {b} c""#)]
    #[case(r#"@"dir\" + file"#, r#"$@"dir\{file}""#)]
    #[case(r#""n=" + (flag ? 1 : 2)"#, r#"$"n={(flag ? 1 : 2)}""#)]
    #[case(r#""x" + $@"a""b {y}""#, r#"$"xa\"b {y}""#)]
    fn interpolated_rewrites(#[case] expression: &str, #[case] expected: &str) {
        with_concatenation(expression, |info| {
            assert_eq!(info.to_interpolated_string().expect("interpolated"), expected);
        });
    }

    #[test]
    fn multiline_literal_keeps_line_breaks() {
        let source = "class C { object M() => \"first\" +\n    \"second\\\"\"; }";
        let tree = parsed(source);
        let info = StringConcatenationExpressionInfo::create(
            arrow_expression(&tree),
            &SyntacticSemanticModel,
            MatchOptions::default(),
            &CancellationToken::new(),
        )
        .unwrap_or_else(|never| match never {});

        assert_eq!(
            info.to_multiline_string_literal().expect("multiline"),
            "@\"first\nsecond\"\"\""
        );
    }

    #[rstest]
    #[case("1 + 2")]
    #[case("a - \"b\"")]
    #[case("x")]
    fn numeric_and_other_expressions_do_not_match(#[case] expression: &str) {
        with_concatenation(expression, |info| {
            assert!(!info.success());
            assert!(info.analyze().is_empty());
            assert!(matches!(
                info.to_interpolated_string(),
                Err(ShapeError::NotInitialized { .. })
            ));
        });
    }
}
