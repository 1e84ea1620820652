use rowan::NodeOrToken;
use sprig_bytecode::{KindId, Program};
use sprig_core::Grammar;

use crate::{ParseResult, SyntaxNode, SyntaxTree, TreePrinter};

/// `let x: int = y` style definitions, one per statement.
pub const KIMCHI: &str = include_str!("../../../fixtures/kimchi.json");

pub fn compile(grammar: &Grammar) -> Program {
    sprig_compiler::compile(grammar).expect("test grammar compiles")
}

pub fn kimchi() -> Program {
    compile(&Grammar::from_json(KIMCHI).expect("fixture loads"))
}

pub fn dump(program: &Program, result: &ParseResult) -> String {
    TreePrinter::new(&result.tree, program).dump()
}

pub fn dump_full(program: &Program, result: &ParseResult) -> String {
    TreePrinter::new(&result.tree, program)
        .with_spans(true)
        .with_trivia(true)
        .dump()
}

/// Invariants every parse must hold: the leaves spell out the input, the
/// children of each node tile it, and every `ERROR` node has its error.
pub fn check_tree(tree: &SyntaxTree, text: &str) {
    assert_eq!(tree.text(), text, "tree text differs from input");
    assert_eq!(tree.text_len(), text.len());
    check_node(&tree.root());

    let error_ranges: Vec<_> = tree.error_nodes().map(|n| n.text_range()).collect();
    let reported: Vec<_> = tree.errors().iter().map(|e| e.range).collect();
    assert_eq!(error_ranges, reported, "error nodes and errors disagree");
}

fn check_node(node: &SyntaxNode) {
    let mut offset = node.text_range().start();
    for child in node.children_with_tokens() {
        assert_eq!(child.text_range().start(), offset, "gap before {child:?}");
        offset = child.text_range().end();
        match child {
            NodeOrToken::Node(n) => {
                if n.kind() == KindId::ERROR {
                    check_error_node(&n);
                } else {
                    check_node(&n);
                }
            }
            NodeOrToken::Token(t) => assert_ne!(t.text(), "", "empty leaf {t:?}"),
        }
    }
    assert_eq!(offset, node.text_range().end());
}

fn check_error_node(node: &SyntaxNode) {
    let children: Vec<_> = node.children_with_tokens().collect();
    match children.as_slice() {
        [] => assert!(node.text_range().is_empty()),
        [NodeOrToken::Token(t)] => assert_eq!(t.kind(), KindId::SKIPPED),
        other => panic!("unexpected ERROR contents: {other:?}"),
    }
}
