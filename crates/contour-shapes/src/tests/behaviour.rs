//! Behaviour-driven development (BDD) step definitions for contour-shapes.

use std::cell::RefCell;

use contour_syntax::{ParseResult, SyntaxKind};
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};

use super::support::{arrow_body, arrow_expression, first, method_body, parsed};
use crate::{
    CancellationToken, IfStatementCascadeInfo, MatchOptions, NullCheckExpressionInfo,
    NullCheckStyles, SimpleMemberInvocationStatementInfo, StringConcatenationExpressionInfo,
    SyntacticSemanticModel,
};

/// What a matcher reported, reduced to owned values.
#[derive(Debug, Default)]
struct Matched {
    success: bool,
    part: Option<String>,
    checking_null: bool,
    count: usize,
    ends_with_else: bool,
}

/// State shared across BDD steps.
#[derive(Default)]
struct TestWorld {
    /// The parsed source under test.
    parsed: Option<ParseResult>,
    /// What the last matcher reported.
    matched: Option<Matched>,
    /// A literal produced by folding a concatenation.
    literal: Option<String>,
}

#[fixture]
fn world() -> RefCell<TestWorld> {
    RefCell::new(TestWorld::default())
}

/// Strips one pair of surrounding single or double quotes.
fn unquote(s: &str) -> &str {
    ['"', '\'']
        .into_iter()
        .find_map(|quote| s.strip_prefix(quote).and_then(|rest| rest.strip_suffix(quote)))
        .unwrap_or(s)
}

fn matched(world: &RefCell<TestWorld>) -> std::cell::Ref<'_, Matched> {
    std::cell::Ref::map(world.borrow(), |w| {
        w.matched.as_ref().expect("a matcher should have run")
    })
}

#[given("the expression {code}")]
fn given_expression(world: &RefCell<TestWorld>, code: String) {
    world.borrow_mut().parsed = Some(parsed(&arrow_body(unquote(&code))));
}

#[given("the statements {code}")]
fn given_statements(world: &RefCell<TestWorld>, code: String) {
    world.borrow_mut().parsed = Some(parsed(&method_body(unquote(&code))));
}

#[when("the expression is matched as a null check")]
fn when_null_check(world: &RefCell<TestWorld>) {
    let mut w = world.borrow_mut();
    let result = {
        let tree = w.parsed.as_ref().expect("source should be parsed");
        let info = NullCheckExpressionInfo::create_with_model(
            arrow_expression(tree),
            &SyntacticSemanticModel,
            NullCheckStyles::ALL,
            MatchOptions::default(),
            &CancellationToken::new(),
        )
        .unwrap_or_else(|never| match never {});
        Matched {
            success: info.success(),
            part: info.expression().map(|n| n.text().to_owned()),
            checking_null: info.is_checking_null(),
            ..Matched::default()
        }
    };
    w.matched = Some(result);
}

#[when("the first if statement is followed through its else links")]
fn when_cascade(world: &RefCell<TestWorld>) {
    let mut w = world.borrow_mut();
    let result = {
        let tree = w.parsed.as_ref().expect("source should be parsed");
        let info = IfStatementCascadeInfo::create(first(tree, SyntaxKind::IfStatement));
        Matched {
            success: info.success(),
            count: info.len(),
            ends_with_else: info.ends_with_else(),
            ..Matched::default()
        }
    };
    w.matched = Some(result);
}

#[when("the concatenation is folded into one literal")]
fn when_fold(world: &RefCell<TestWorld>) {
    let mut w = world.borrow_mut();
    let literal = {
        let tree = w.parsed.as_ref().expect("source should be parsed");
        let info = StringConcatenationExpressionInfo::create(
            arrow_expression(tree),
            &SyntacticSemanticModel,
            MatchOptions::default(),
            &CancellationToken::new(),
        )
        .unwrap_or_else(|never| match never {});
        info.to_string_literal().expect("all operands are literals")
    };
    w.literal = Some(literal);
}

#[when("the first statement is matched as a member invocation")]
fn when_invocation(world: &RefCell<TestWorld>) {
    let mut w = world.borrow_mut();
    let result = {
        let tree = w.parsed.as_ref().expect("source should be parsed");
        let info = SimpleMemberInvocationStatementInfo::create(
            first(tree, SyntaxKind::ExpressionStatement),
            MatchOptions::default(),
        );
        let invocation = info.invocation();
        Matched {
            success: info.success(),
            part: invocation.name_text().map(str::to_owned),
            count: invocation.arguments().len(),
            ..Matched::default()
        }
    };
    w.matched = Some(result);
}

#[then("it checks {expression} for {outcome}")]
fn then_checks(world: &RefCell<TestWorld>, expression: String, outcome: String) {
    let m = matched(world);
    assert!(m.success, "expected a null check");
    assert_eq!(m.part.as_deref(), Some(unquote(&expression)));
    assert_eq!(m.checking_null, outcome == "null", "outcome {outcome}");
}

#[then("no shape is matched")]
fn then_no_match(world: &RefCell<TestWorld>) {
    assert!(!matched(world).success);
}

#[then("the chain has {count} links")]
fn then_chain_length(world: &RefCell<TestWorld>, count: usize) {
    let m = matched(world);
    assert!(m.success);
    assert_eq!(m.count, count);
}

#[then("the chain ends with an else")]
fn then_ends_with_else(world: &RefCell<TestWorld>) {
    assert!(matched(world).ends_with_else);
}

#[then("the literal is {text}")]
fn then_literal(world: &RefCell<TestWorld>, text: String) {
    let w = world.borrow();
    assert_eq!(w.literal.as_deref(), Some(unquote(&text)));
}

#[then("the invoked member is {name}")]
fn then_member(world: &RefCell<TestWorld>, name: String) {
    let m = matched(world);
    assert!(m.success, "expected a member invocation");
    assert_eq!(m.part.as_deref(), Some(unquote(&name)));
}

#[then("it passes {count} arguments")]
fn then_arguments(world: &RefCell<TestWorld>, count: usize) {
    assert_eq!(matched(world).count, count);
}

#[scenario(
    path = "tests/features/shapes.feature",
    name = "Comparison with null checks for null"
)]
fn comparison_with_null(world: RefCell<TestWorld>) {
    drop(world);
}

#[scenario(
    path = "tests/features/shapes.feature",
    name = "Reversed comparison checks for not null"
)]
fn reversed_comparison(world: RefCell<TestWorld>) {
    drop(world);
}

#[scenario(
    path = "tests/features/shapes.feature",
    name = "Negated is-null pattern checks for not null"
)]
fn negated_is_null(world: RefCell<TestWorld>) {
    drop(world);
}

#[scenario(path = "tests/features/shapes.feature", name = "HasValue checks for not null")]
fn has_value(world: RefCell<TestWorld>) {
    drop(world);
}

#[scenario(
    path = "tests/features/shapes.feature",
    name = "HasValue compared with false checks for null"
)]
fn has_value_compared_with_false(world: RefCell<TestWorld>) {
    drop(world);
}

#[scenario(
    path = "tests/features/shapes.feature",
    name = "Parenthesized null checks are seen through"
)]
fn parenthesized_null_check(world: RefCell<TestWorld>) {
    drop(world);
}

#[scenario(
    path = "tests/features/shapes.feature",
    name = "Other comparisons are not null checks"
)]
fn other_comparisons(world: RefCell<TestWorld>) {
    drop(world);
}

#[scenario(
    path = "tests/features/shapes.feature",
    name = "An if chain is followed to its final else"
)]
fn if_chain(world: RefCell<TestWorld>) {
    drop(world);
}

#[scenario(
    path = "tests/features/shapes.feature",
    name = "Adjacent string literals fold into one"
)]
fn literal_folding(world: RefCell<TestWorld>) {
    drop(world);
}

#[scenario(
    path = "tests/features/shapes.feature",
    name = "A member invocation statement names its parts"
)]
fn member_invocation(world: RefCell<TestWorld>) {
    drop(world);
}

#[scenario(
    path = "tests/features/shapes.feature",
    name = "A member invocation without arguments"
)]
fn member_invocation_without_arguments(world: RefCell<TestWorld>) {
    drop(world);
}
