//! JSON view of syntax trees.

use rowan::NodeOrToken;
use serde::Serialize;
use sprig_bytecode::Program;

use super::{SyntaxNode, SyntaxToken, SyntaxTree};

/// Serializable tree element. Leaves carry their text, nodes their children.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JsonNode {
    pub kind: String,
    pub named: bool,
    pub start: u32,
    pub end: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<JsonNode>,
}

impl JsonNode {
    /// Convert a tree. Trivia leaves are dropped unless `trivia` is set.
    pub fn from_tree(tree: &SyntaxTree, program: &Program, trivia: bool) -> Self {
        from_node(&tree.root(), program, trivia)
    }
}

impl SyntaxTree {
    pub fn to_json(&self, program: &Program, trivia: bool) -> serde_json::Value {
        serde_json::to_value(JsonNode::from_tree(self, program, trivia))
            .expect("tree JSON is always representable")
    }
}

fn from_node(node: &SyntaxNode, program: &Program, trivia: bool) -> JsonNode {
    let children = node
        .children_with_tokens()
        .filter_map(|child| match child {
            NodeOrToken::Node(n) => Some(from_node(&n, program, trivia)),
            NodeOrToken::Token(t) if trivia || !program.is_trivia(t.kind()) => {
                Some(from_token(&t, program))
            }
            NodeOrToken::Token(_) => None,
        })
        .collect();
    let info = program.kind(node.kind());
    JsonNode {
        kind: info.name.clone(),
        named: info.named,
        start: node.text_range().start().into(),
        end: node.text_range().end().into(),
        text: None,
        children,
    }
}

fn from_token(token: &SyntaxToken, program: &Program) -> JsonNode {
    let info = program.kind(token.kind());
    JsonNode {
        kind: info.name.clone(),
        named: info.named,
        start: token.text_range().start().into(),
        end: token.text_range().end().into(),
        text: Some(token.text().to_string()),
        children: Vec::new(),
    }
}
