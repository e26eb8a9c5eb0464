//! Matchers for hexadecimal integer literals and string literals.

use contour_syntax::{SyntaxKind, SyntaxNode};

use crate::options::MatchOptions;
use crate::support::candidate;

/// The integer-type suffix of a numeric literal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum LiteralSuffix {
    /// No suffix.
    #[default]
    None,
    /// `u` or `U`.
    Unsigned,
    /// `l` or `L`.
    Long,
    /// `ul`, `lu` or any casing thereof.
    UnsignedLong,
}

impl LiteralSuffix {
    fn parse(suffix: &str) -> Option<Self> {
        match suffix.to_ascii_lowercase().as_str() {
            "" => Some(Self::None),
            "u" => Some(Self::Unsigned),
            "l" => Some(Self::Long),
            "ul" | "lu" => Some(Self::UnsignedLong),
            _ => None,
        }
    }
}

/// `0x1F`, `0XFFu`, `0x_FF_FFL` and the like.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HexNumericLiteralExpressionInfo<'t> {
    literal_expression: Option<SyntaxNode<'t>>,
    digits: &'t str,
    suffix: LiteralSuffix,
}

impl<'t> HexNumericLiteralExpressionInfo<'t> {
    /// Matches an integer literal written in hexadecimal.
    #[must_use]
    pub fn create(node: SyntaxNode<'t>, options: MatchOptions) -> Self {
        Self::try_create(candidate(node, options)).unwrap_or_default()
    }

    fn try_create(node: SyntaxNode<'t>) -> Option<Self> {
        if !node.is(SyntaxKind::IntegerLiteral) {
            return None;
        }
        let text = node.text();
        let body = text
            .strip_prefix("0x")
            .or_else(|| text.strip_prefix("0X"))?;
        let digits_end = body
            .find(|c: char| !(c.is_ascii_hexdigit() || c == '_'))
            .unwrap_or(body.len());
        let (digits, suffix_text) = body.split_at(digits_end);
        let suffix = LiteralSuffix::parse(suffix_text)?;
        if !digits.chars().any(|c| c.is_ascii_hexdigit()) {
            return None;
        }
        Some(Self {
            literal_expression: Some(node),
            digits,
            suffix,
        })
    }

    /// The matched literal.
    #[must_use]
    pub const fn literal_expression(&self) -> Option<SyntaxNode<'t>> {
        self.literal_expression
    }

    /// The literal as written.
    #[must_use]
    pub fn text(&self) -> &'t str {
        self.literal_expression.map_or("", |node| node.text())
    }

    /// The hex digits between the `0x` prefix and the suffix, separators
    /// included.
    #[must_use]
    pub const fn digits(&self) -> &'t str {
        self.digits
    }

    /// The type suffix.
    #[must_use]
    pub const fn suffix(&self) -> LiteralSuffix {
        self.suffix
    }

    /// The numeric value, or `None` when it does not fit in 64 bits.
    #[must_use]
    pub fn value(&self) -> Option<u64> {
        if !self.success() {
            return None;
        }
        let digits: String = self.digits.chars().filter(|c| *c != '_').collect();
        u64::from_str_radix(&digits, 16).ok()
    }

    /// Whether the match succeeded.
    #[must_use]
    pub const fn success(&self) -> bool {
        self.literal_expression.is_some()
    }
}

/// How a string literal is written.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum StringLiteralStyle {
    /// `"text"`.
    #[default]
    Regular,
    /// `@"text"`.
    Verbatim,
    /// `"""text"""`.
    Raw,
}

/// A non-interpolated string literal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StringLiteralExpressionInfo<'t> {
    literal_expression: Option<SyntaxNode<'t>>,
    style: StringLiteralStyle,
    inner_text: &'t str,
    is_utf8: bool,
    raw_quotes: usize,
}

impl<'t> StringLiteralExpressionInfo<'t> {
    /// Matches a regular, verbatim or raw string literal, with or without a
    /// `u8` suffix.
    #[must_use]
    pub fn create(node: SyntaxNode<'t>, options: MatchOptions) -> Self {
        Self::try_create(candidate(node, options)).unwrap_or_default()
    }

    fn try_create(node: SyntaxNode<'t>) -> Option<Self> {
        let text = node.text();
        let (unsuffixed, is_utf8) = match text
            .strip_suffix("u8")
            .or_else(|| text.strip_suffix("U8"))
        {
            Some(rest) => (rest, true),
            None => (text, false),
        };
        let (style, inner_text, raw_quotes) = match node.kind() {
            SyntaxKind::StringLiteral => {
                let inner = unsuffixed.strip_prefix('"')?.strip_suffix('"')?;
                (StringLiteralStyle::Regular, inner, 0)
            }
            SyntaxKind::VerbatimStringLiteral => {
                let inner = unsuffixed.strip_prefix("@\"")?.strip_suffix('"')?;
                (StringLiteralStyle::Verbatim, inner, 0)
            }
            SyntaxKind::RawStringLiteral => {
                let quotes = unsuffixed.chars().take_while(|c| *c == '"').count();
                if quotes < 3 || unsuffixed.len() < quotes * 2 {
                    return None;
                }
                let inner = unsuffixed.get(quotes..unsuffixed.len() - quotes)?;
                (StringLiteralStyle::Raw, inner, quotes)
            }
            _ => return None,
        };
        Some(Self {
            literal_expression: Some(node),
            style,
            inner_text,
            is_utf8,
            raw_quotes,
        })
    }

    /// The matched literal.
    #[must_use]
    pub const fn literal_expression(&self) -> Option<SyntaxNode<'t>> {
        self.literal_expression
    }

    /// The literal as written, quotes and prefix included.
    #[must_use]
    pub fn text(&self) -> &'t str {
        self.literal_expression.map_or("", |node| node.text())
    }

    /// The text between the delimiters, escapes left as written.
    #[must_use]
    pub const fn inner_text(&self) -> &'t str {
        self.inner_text
    }

    /// How the literal is written.
    #[must_use]
    pub const fn style(&self) -> StringLiteralStyle {
        self.style
    }

    /// The number of quotes delimiting a raw literal; zero otherwise.
    #[must_use]
    pub const fn raw_quote_count(&self) -> usize {
        self.raw_quotes
    }

    /// `"..."`.
    #[must_use]
    pub const fn is_regular(&self) -> bool {
        self.success() && matches!(self.style, StringLiteralStyle::Regular)
    }

    /// `@"..."`.
    #[must_use]
    pub const fn is_verbatim(&self) -> bool {
        self.success() && matches!(self.style, StringLiteralStyle::Verbatim)
    }

    /// `"""..."""`.
    #[must_use]
    pub const fn is_raw(&self) -> bool {
        self.success() && matches!(self.style, StringLiteralStyle::Raw)
    }

    /// Whether the literal carries a `u8` suffix.
    #[must_use]
    pub const fn is_utf8(&self) -> bool {
        self.is_utf8
    }

    /// The string value with escapes resolved. `None` on a failed match or
    /// a malformed escape sequence.
    #[must_use]
    pub fn value_text(&self) -> Option<String> {
        if !self.success() {
            return None;
        }
        match self.style {
            StringLiteralStyle::Regular => unescape_regular(self.inner_text, false),
            StringLiteralStyle::Verbatim => unescape_verbatim(self.inner_text, false),
            StringLiteralStyle::Raw => raw_value(self.inner_text),
        }
    }

    /// Whether the literal is written with escape sequences (`\n` in a
    /// regular literal, `""` in a verbatim one).
    #[must_use]
    pub fn contains_escape_sequence(&self) -> bool {
        match self.style {
            StringLiteralStyle::Regular => self.inner_text.contains('\\'),
            StringLiteralStyle::Verbatim => self.inner_text.contains("\"\""),
            StringLiteralStyle::Raw => false,
        }
    }

    /// Whether the value contains a line feed.
    #[must_use]
    pub fn contains_linefeed(&self) -> bool {
        match self.style {
            StringLiteralStyle::Regular => self
                .value_text()
                .is_some_and(|value| value.contains('\n')),
            StringLiteralStyle::Verbatim | StringLiteralStyle::Raw => {
                self.inner_text.contains('\n')
            }
        }
    }

    /// Whether the match succeeded.
    #[must_use]
    pub const fn success(&self) -> bool {
        self.literal_expression.is_some()
    }
}

/// Resolves the escapes of a regular literal body. With `interpolated`,
/// doubled braces collapse to one.
pub(crate) fn unescape_regular(inner: &str, interpolated: bool) -> Option<String> {
    let mut units: Vec<u16> = Vec::with_capacity(inner.len());
    let mut chars = inner.chars().peekable();
    while let Some(ch) = chars.next() {
        match ch {
            '\\' => {
                let escaped = chars.next()?;
                let unit = match escaped {
                    '\'' | '"' | '\\' => u16::try_from(u32::from(escaped)).ok()?,
                    '0' => 0,
                    'a' => 0x07,
                    'b' => 0x08,
                    'e' => 0x1B,
                    'f' => 0x0C,
                    'n' => 0x0A,
                    'r' => 0x0D,
                    't' => 0x09,
                    'v' => 0x0B,
                    'x' => {
                        let mut digits = String::new();
                        while digits.len() < 4 {
                            match chars.peek() {
                                Some(c) if c.is_ascii_hexdigit() => {
                                    digits.push(*c);
                                    chars.next();
                                }
                                _ => break,
                            }
                        }
                        u16::from_str_radix(&digits, 16).ok()?
                    }
                    'u' => {
                        let digits = take_hex(&mut chars, 4)?;
                        u16::from_str_radix(&digits, 16).ok()?
                    }
                    'U' => {
                        let digits = take_hex(&mut chars, 8)?;
                        let scalar = char::from_u32(u32::from_str_radix(&digits, 16).ok()?)?;
                        units.extend(scalar.encode_utf16(&mut [0; 2]).iter());
                        continue;
                    }
                    _ => return None,
                };
                units.push(unit);
            }
            '{' | '}' if interpolated => {
                if chars.next() != Some(ch) {
                    return None;
                }
                units.extend(ch.encode_utf16(&mut [0; 2]).iter());
            }
            _ => units.extend(ch.encode_utf16(&mut [0; 2]).iter()),
        }
    }
    String::from_utf16(&units).ok()
}

fn take_hex(chars: &mut impl Iterator<Item = char>, count: usize) -> Option<String> {
    let digits: String = chars.take(count).collect();
    (digits.len() == count && digits.chars().all(|c| c.is_ascii_hexdigit())).then_some(digits)
}

/// Resolves the doubled quotes of a verbatim literal body.
pub(crate) fn unescape_verbatim(inner: &str, interpolated: bool) -> Option<String> {
    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(ch) = chars.next() {
        let doubled = ch == '"' || (interpolated && (ch == '{' || ch == '}'));
        if doubled && chars.next() != Some(ch) {
            return None;
        }
        out.push(ch);
    }
    Some(out)
}

/// Returns the value of a raw literal body.
///
/// A single-line body is taken as is. A multi-line body drops the opening
/// and closing lines and strips the closing line's indentation from every
/// content line.
fn raw_value(inner: &str) -> Option<String> {
    if !inner.contains('\n') {
        return Some(inner.to_owned());
    }
    let (first, rest) = inner.split_once('\n')?;
    if !first.trim().is_empty() {
        return None;
    }
    let (content, indent) = rest.rsplit_once('\n').unwrap_or(("", rest));
    if !indent.chars().all(char::is_whitespace) {
        return None;
    }
    let mut lines = Vec::new();
    for line in content.split('\n') {
        let content_line = line.strip_suffix('\r').unwrap_or(line);
        if content_line.trim().is_empty() {
            lines.push("");
        } else {
            lines.push(content_line.strip_prefix(indent)?);
        }
    }
    Some(lines.join("\n"))
}

/// Escapes a value for use inside a regular literal. With `interpolated`,
/// braces are doubled.
pub(crate) fn escape_regular(value: &str, interpolated: bool) -> String {
    let mut out = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\0' => out.push_str("\\0"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '{' | '}' if interpolated => {
                out.push(ch);
                out.push(ch);
            }
            c if c.is_control() => out.push_str(&format!("\\u{:04X}", u32::from(c))),
            c => out.push(c),
        }
    }
    out
}

/// Escapes a value for use inside a verbatim literal. With `interpolated`,
/// braces are doubled.
pub(crate) fn escape_verbatim(value: &str, interpolated: bool) -> String {
    let mut out = String::with_capacity(value.len());
    for ch in value.chars() {
        let doubled = ch == '"' || (interpolated && (ch == '{' || ch == '}'));
        out.push(ch);
        if doubled {
            out.push(ch);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;
    use crate::tests::support::{arrow_body, arrow_expression, parsed};

    #[rstest]
    #[case("0x1F", Some(("1F", LiteralSuffix::None, Some(31))))]
    #[case("0XFFu", Some(("FF", LiteralSuffix::Unsigned, Some(255))))]
    #[case("0x_FF_FFL", Some(("_FF_FF", LiteralSuffix::Long, Some(0xFFFF))))]
    #[case("0xFFFFFFFFFFFFFFFFUL", Some(("FFFFFFFFFFFFFFFF", LiteralSuffix::UnsignedLong, Some(u64::MAX))))]
    #[case("31", None)]
    #[case("0b101", None)]
    fn hex_literals(
        #[case] literal: &str,
        #[case] expected: Option<(&str, LiteralSuffix, Option<u64>)>,
    ) {
        let tree = parsed(&arrow_body(literal));
        let info =
            HexNumericLiteralExpressionInfo::create(arrow_expression(&tree), MatchOptions::default());

        let actual = info
            .success()
            .then(|| (info.digits(), info.suffix(), info.value()));
        assert_eq!(actual, expected);
    }

    #[rstest]
    #[case(r#""a\tb""#, StringLiteralStyle::Regular, "a\tb", true)]
    #[case(r#""\u0041\x42\U00000043""#, StringLiteralStyle::Regular, "ABC", true)]
    #[case(r#"@"C:\dir ""q""""#, StringLiteralStyle::Verbatim, "C:\\dir \"q\"", true)]
    #[case(r#""""say "hi" now""""#, StringLiteralStyle::Raw, "say \"hi\" now", false)]
    #[case(r#""plain""#, StringLiteralStyle::Regular, "plain", false)]
    fn string_literal_values(
        #[case] literal: &str,
        #[case] style: StringLiteralStyle,
        #[case] value: &str,
        #[case] escaped: bool,
    ) {
        let tree = parsed(&arrow_body(literal));
        let info = StringLiteralExpressionInfo::create(arrow_expression(&tree), MatchOptions::default());

        assert!(info.success(), "{literal} should match");
        assert_eq!(info.style(), style);
        assert_eq!(info.value_text().as_deref(), Some(value));
        assert_eq!(info.contains_escape_sequence(), escaped);
    }

    #[test]
    fn multi_line_raw_literal_strips_indentation() {
        let source = "class C { object M() => \"\"\"\n        first\n          second\n        \"\"\"; }";
        let tree = parsed(source);
        let info = StringLiteralExpressionInfo::create(arrow_expression(&tree), MatchOptions::default());

        assert!(info.is_raw());
        assert_eq!(info.value_text().as_deref(), Some("first\n  second"));
        assert!(info.contains_linefeed());
    }

    #[test]
    fn utf8_suffix_is_recognised() {
        let tree = parsed(&arrow_body(r#""bytes"u8"#));
        let info = StringLiteralExpressionInfo::create(arrow_expression(&tree), MatchOptions::default());

        assert!(info.is_utf8());
        assert_eq!(info.inner_text(), "bytes");
    }

    #[test]
    fn interpolated_string_is_not_a_literal() {
        let tree = parsed(&arrow_body(r#"$"{x}""#));
        let info = StringLiteralExpressionInfo::create(arrow_expression(&tree), MatchOptions::default());
        assert!(!info.success());
        assert_eq!(info.value_text(), None);
    }

    #[rstest]
    #[case(r"\q")]
    #[case(r"\u12")]
    #[case("\\")]
    fn malformed_escapes_are_rejected(#[case] inner: &str) {
        assert_eq!(unescape_regular(inner, false), None);
    }

    #[test]
    fn escaping_round_trips_through_regular_literal() {
        let value = "tab\tquote\" {brace}";
        let escaped = escape_regular(value, true);
        assert_eq!(escaped, "tab\\tquote\\\" {{brace}}");
        assert_eq!(unescape_regular(&escaped, true).as_deref(), Some(value));
    }
}
