use super::dsl::*;
use super::*;

#[test]
fn optional_is_choice_with_blank() {
    assert_eq!(
        optional(string("a")),
        Rule::Choice(vec![Rule::String("a".to_string()), Rule::Blank])
    );
}

#[test]
fn repeat_bounds() {
    assert!(matches!(
        repeat(string("a")),
        Rule::Repeat { min: 0, max: None, .. }
    ));
    assert!(matches!(
        repeat1(string("a")),
        Rule::Repeat { min: 1, max: None, .. }
    ));
    assert!(matches!(
        repeat_range(string("a"), 2, Some(3)),
        Rule::Repeat { min: 2, max: Some(3), .. }
    ));
}

#[test]
fn explicit_start_overrides_first_rule() {
    let grammar = Grammar::new("g")
        .with_rule("a", string("a"))
        .with_rule("b", string("b"))
        .with_start("b");

    assert_eq!(grammar.start_rule(), Some("b"));
    assert_eq!(Grammar::new("empty").start_rule(), None);
}

#[test]
fn field_is_transparent() {
    let rule = field("name", field("inner", pattern("[a-z]+")));

    assert!(rule.is_terminal());
    assert!(matches!(rule.unwrap_transparent(), Rule::Pattern { .. }));
    assert_eq!(rule.children().len(), 1);
}

#[test]
fn hidden_rules() {
    let grammar = Grammar::new("g")
        .with_rule("root", sym("_item"))
        .with_rule("_item", string("x"))
        .with_rule("value", string("y"))
        .with_inline(["value"]);

    assert!(grammar.is_hidden("_item"));
    assert!(grammar.is_hidden("value"));
    assert!(!grammar.is_hidden("root"));
}
