use serde_json::json;
use sprig_core::Grammar;
use sprig_core::dsl::*;

use crate::engine::parse;
use crate::test_utils::compile;
use crate::tree::JsonNode;

fn greeting() -> Grammar {
    Grammar::new("greeting")
        .with_rule("greeting", seq([string("hello"), sym("name")]))
        .with_rule("name", pattern("[a-z]+"))
        .with_extras([pattern(r"\s")])
}

#[test]
fn tree_to_json() {
    let program = compile(&greeting());
    let result = parse(&program, "hello world");

    assert_eq!(
        result.tree.to_json(&program, false),
        json!({
            "kind": "greeting",
            "named": true,
            "start": 0,
            "end": 11,
            "children": [
                { "kind": "hello", "named": false, "start": 0, "end": 5, "text": "hello" },
                { "kind": "name", "named": true, "start": 6, "end": 11, "text": "world" }
            ]
        })
    );
}

#[test]
fn trivia_in_json() {
    let program = compile(&greeting());
    let result = parse(&program, "hello world");

    let node = JsonNode::from_tree(&result.tree, &program, true);

    assert_eq!(node.children.len(), 3);
    assert_eq!(node.children[1].kind, r"/\s/");
    assert_eq!(node.children[1].text.as_deref(), Some(" "));
}

#[test]
fn error_nodes_in_json() {
    let program = compile(&greeting());
    let result = parse(&program, "hello");

    let node = JsonNode::from_tree(&result.tree, &program, false);

    let error = &node.children[1];
    assert_eq!(error.kind, "ERROR");
    assert_eq!((error.start, error.end), (5, 5));
    assert!(error.children.is_empty());
    assert_eq!(
        serde_json::to_string(error).unwrap(),
        r#"{"kind":"ERROR","named":true,"start":5,"end":5}"#
    );
}
