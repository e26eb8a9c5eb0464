//! Unit tests for contour-syntax.

use rstest::rstest;

use crate::{BinaryOperator, Parser, SyntaxKind, parse, walk_and_check};

// =============================================================================
// Parser Tests
// =============================================================================

#[rstest]
#[case("class C { }", false)]
#[case("class C {", true)]
#[case("class C { void M() { if (x) { } else { } } }", false)]
#[case("class C { void M() { if (x) { } else } }", true)]
fn parser_detects_errors(#[case] source: &str, #[case] has_errors: bool) {
    let mut parser = Parser::new().expect("parser init");
    let result = parser.parse(source).expect("parse");
    assert_eq!(result.has_errors(), has_errors);
}

#[test]
fn parser_is_reusable() {
    let mut parser = Parser::new().expect("parser init");
    let first = parser.parse("class A { }").expect("parse");
    let second = parser.parse("class B { }").expect("parse");

    assert_eq!(first.source(), "class A { }");
    assert_eq!(second.source(), "class B { }");
}

// =============================================================================
// Tree Shape Tests
// =============================================================================

#[test]
fn if_statement_exposes_condition_and_branches() {
    let parsed = parse("class C { void M() { if (a) b(); else c(); } }").expect("parse");
    let if_statement = parsed
        .root()
        .first_descendant_of_kind(SyntaxKind::IfStatement)
        .expect("if statement");

    let condition = if_statement.child_by_field("condition").expect("condition");
    let alternative = if_statement.child_by_field("alternative").expect("alternative");

    assert_eq!(condition.text(), "a");
    assert_eq!(alternative.kind(), SyntaxKind::ExpressionStatement);
}

#[rstest]
#[case("a + b", BinaryOperator::Add)]
#[case("a ?? b", BinaryOperator::Coalesce)]
#[case("a != b", BinaryOperator::NotEquals)]
fn binary_operator_field_decodes(#[case] expression: &str, #[case] expected: BinaryOperator) {
    let source = format!("class C {{ object M() => {expression}; }}");
    let parsed = parse(&source).expect("parse");
    let binary = parsed
        .root()
        .first_descendant_of_kind(SyntaxKind::BinaryExpression)
        .expect("binary expression");
    let operator = binary.child_by_field("operator").expect("operator");

    assert_eq!(BinaryOperator::from_token(operator.text()), Some(expected));
}

#[test]
fn ancestors_are_nearest_first() {
    let parsed = parse("class C { void M() { return; } }").expect("parse");
    let statement = parsed
        .root()
        .first_descendant_of_kind(SyntaxKind::ReturnStatement)
        .expect("return");

    let kinds: Vec<SyntaxKind> = statement.ancestors().map(|node| node.kind()).collect();
    assert_eq!(kinds.first(), Some(&SyntaxKind::Block));
    assert_eq!(kinds.last(), Some(&SyntaxKind::CompilationUnit));
}

#[test]
fn walk_and_check_sees_through_parentheses() {
    let parsed = parse("class C { bool M() => (((a))); }").expect("parse");
    let outer = parsed
        .root()
        .first_descendant_of_kind(SyntaxKind::ParenthesizedExpression);

    let inner = walk_and_check(outer, true, false).expect("inner");
    assert_eq!(inner.kind(), SyntaxKind::Identifier);

    let kept = walk_and_check(outer, false, false).expect("outer");
    assert_eq!(kept.text(), "(((a)))");
}
