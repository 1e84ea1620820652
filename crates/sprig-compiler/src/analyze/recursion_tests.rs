use sprig_core::Grammar;
use sprig_core::dsl::*;

use super::validate;
use crate::GrammarError;

#[test]
fn direct_left_recursion() {
    // A := A 'x' | 'y'
    let grammar = Grammar::new("g").with_rule(
        "A",
        choice([seq([sym("A"), string("x")]), string("y")]),
    );

    let err = validate(&grammar).unwrap_err();
    assert_eq!(
        err,
        GrammarError::UnproductiveLeftRecursion {
            cycle: vec!["A".to_string()]
        }
    );
    assert_eq!(err.to_string(), "left recursion: A -> A");
}

#[test]
fn indirect_left_recursion() {
    let grammar = Grammar::new("g")
        .with_rule("expr", choice([sym("call"), pattern("[a-z]+")]))
        .with_rule("call", seq([sym("expr"), string("("), string(")")]));

    assert_eq!(
        validate(&grammar).unwrap_err(),
        GrammarError::UnproductiveLeftRecursion {
            cycle: vec!["expr".to_string(), "call".to_string()]
        }
    );
}

#[test]
fn left_recursion_through_nullable_prefix() {
    let grammar = Grammar::new("g")
        .with_rule("list", seq([optional(string(",")), sym("list"), string("x")]));

    assert!(matches!(
        validate(&grammar),
        Err(GrammarError::UnproductiveLeftRecursion { .. })
    ));
}

#[test]
fn right_recursion_is_fine() {
    let grammar = Grammar::new("g").with_rule(
        "list",
        choice([seq([string("x"), sym("list")]), string("x")]),
    );

    assert!(validate(&grammar).is_ok());
}

#[test]
fn nested_recursion_is_fine() {
    let grammar = Grammar::new("g").with_rule(
        "parens",
        seq([string("("), repeat(sym("parens")), string(")")]),
    );

    assert!(validate(&grammar).is_ok());
}

#[test]
fn recursion_without_escape() {
    // Every alternative needs another `item`, so no finite input matches.
    let grammar = Grammar::new("g")
        .with_rule("root", sym("item"))
        .with_rule("item", seq([string("("), sym("item"), string(")")]));

    let err = validate(&grammar).unwrap_err();
    assert_eq!(
        err,
        GrammarError::InfiniteRecursion {
            cycle: vec!["item".to_string()]
        }
    );
    assert_eq!(
        err.to_string(),
        "infinite recursion: cycle has no escape path: item -> item"
    );
}

#[test]
fn mutual_recursion_without_escape() {
    let grammar = Grammar::new("g")
        .with_rule("a", seq([string("x"), sym("b")]))
        .with_rule("b", seq([string("y"), sym("a")]));

    assert_eq!(
        validate(&grammar).unwrap_err(),
        GrammarError::InfiniteRecursion {
            cycle: vec!["a".to_string(), "b".to_string()]
        }
    );
}
