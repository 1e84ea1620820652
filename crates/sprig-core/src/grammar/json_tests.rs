use super::*;

#[test]
fn parse_minimal_grammar() {
    let json = r#"{
        "name": "test",
        "rules": {
            "source_file": { "type": "SYMBOL", "name": "expression" },
            "expression": { "type": "STRING", "value": "x" }
        }
    }"#;

    let grammar = Grammar::from_json(json).unwrap();
    assert_eq!(grammar.name, "test");
    assert_eq!(grammar.rules.len(), 2);
    assert_eq!(grammar.start_rule(), Some("source_file"));
}

#[test]
fn missing_extras_default_to_whitespace() {
    let json = r#"{
        "name": "test",
        "rules": { "root": { "type": "STRING", "value": "x" } }
    }"#;

    let grammar = Grammar::from_json(json).unwrap();
    assert_eq!(
        grammar.extras,
        vec![Rule::Pattern {
            value: r"\s".to_string(),
            flags: None
        }]
    );
}

#[test]
fn explicit_empty_extras_are_kept() {
    let json = r#"{
        "name": "test",
        "rules": { "root": { "type": "STRING", "value": "x" } },
        "extras": []
    }"#;

    let grammar = Grammar::from_json(json).unwrap();
    assert!(grammar.extras.is_empty());
}

#[test]
fn repeat_variants_map_to_bounds() {
    let json = r#"{
        "name": "test",
        "rules": {
            "many": { "type": "REPEAT", "content": { "type": "STRING", "value": "a" } },
            "some": { "type": "REPEAT1", "content": { "type": "STRING", "value": "a" } }
        }
    }"#;

    let grammar = Grammar::from_json(json).unwrap();
    assert!(matches!(
        grammar.rules[0].1,
        Rule::Repeat { min: 0, max: None, .. }
    ));
    assert!(matches!(
        grammar.rules[1].1,
        Rule::Repeat { min: 1, max: None, .. }
    ));
}

#[test]
fn precedence_wrappers_are_unwrapped() {
    let json = r#"{
        "name": "test",
        "rules": {
            "expr": {
                "type": "PREC_LEFT",
                "value": 1,
                "content": {
                    "type": "PREC",
                    "value": "call",
                    "content": { "type": "STRING", "value": "x" }
                }
            }
        },
        "precedences": [[{ "type": "STRING", "value": "call" }]],
        "conflicts": [["expr"]]
    }"#;

    let grammar = Grammar::from_json(json).unwrap();
    assert_eq!(grammar.rules[0].1, Rule::String("x".to_string()));
}

#[test]
fn token_and_alias() {
    let json = r#"{
        "name": "test",
        "rules": {
            "root": {
                "type": "SEQ",
                "members": [
                    { "type": "TOKEN", "content": { "type": "STRING", "value": "a" } },
                    { "type": "IMMEDIATE_TOKEN", "content": { "type": "STRING", "value": "b" } },
                    {
                        "type": "ALIAS",
                        "content": { "type": "SYMBOL", "name": "x" },
                        "value": "y",
                        "named": true
                    }
                ]
            },
            "x": { "type": "STRING", "value": "x" }
        }
    }"#;

    let grammar = Grammar::from_json(json).unwrap();
    let Rule::Seq(members) = &grammar.rules[0].1 else {
        panic!("expected SEQ");
    };
    assert!(matches!(members[0], Rule::Token { immediate: false, .. }));
    assert!(matches!(members[1], Rule::Token { immediate: true, .. }));
    assert!(matches!(&members[2], Rule::Alias { value, named: true, .. } if value == "y"));
}

#[test]
fn preserves_rule_order() {
    let json = r#"{
        "name": "test",
        "rules": {
            "program": { "type": "SYMBOL", "name": "statement" },
            "statement": { "type": "SYMBOL", "name": "expression" },
            "expression": { "type": "STRING", "value": "x" }
        }
    }"#;

    let grammar = Grammar::from_json(json).unwrap();

    assert_eq!(grammar.rules[0].0, "program");
    assert_eq!(grammar.rules[1].0, "statement");
    assert_eq!(grammar.rules[2].0, "expression");
}

#[test]
fn loads_kimchi_fixture() {
    let grammar = Grammar::from_json(include_str!("../../../../fixtures/kimchi.json")).unwrap();

    assert_eq!(grammar.name, "kimchi");
    assert_eq!(grammar.start_rule(), Some("source_file"));
    assert!(grammar.is_hidden("_definition"));
    assert!(!grammar.is_hidden("variable_definition"));
    assert!(grammar.get("identifier").is_some_and(Rule::is_terminal));
}

#[test]
fn invalid_json_is_reported() {
    let err = Grammar::from_json("{").unwrap_err();
    assert!(err.to_string().starts_with("JSON parse error"));
}
