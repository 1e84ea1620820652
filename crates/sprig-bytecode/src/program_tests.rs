use indoc::indoc;
use sprig_core::Colors;

use crate::{
    KindClass, KindId, KindInfo, Op, OpId, Program, RuleId, RuleInfo, Terminal, TerminalId, dump,
};

fn kind(name: &str, named: bool, class: KindClass) -> KindInfo {
    KindInfo {
        name: name.to_string(),
        named,
        class,
        trivia: false,
    }
}

/// `greeting := "hello" name`, `name := /[a-z]+/`
fn greeting_program() -> Program {
    Program {
        name: "greeting".to_string(),
        kinds: vec![
            kind("ERROR", true, KindClass::Error),
            kind("SKIPPED", true, KindClass::Skipped),
            kind("greeting", true, KindClass::Node),
            kind("name", true, KindClass::Token),
            kind("hello", false, KindClass::Token),
        ],
        rules: vec![
            RuleInfo {
                name: "greeting".to_string(),
                kind: KindId(2),
                body: OpId(2),
                nullable: false,
                hidden: false,
                lexical: false,
            },
            RuleInfo {
                name: "name".to_string(),
                kind: KindId(3),
                body: OpId(3),
                nullable: false,
                hidden: false,
                lexical: true,
            },
        ],
        ops: vec![
            Op::Token {
                terminal: TerminalId(0),
                kind: KindId(4),
                immediate: false,
            },
            Op::Call {
                rule: RuleId(1),
                alias: None,
            },
            Op::Seq(vec![OpId(0), OpId(1)]),
            Op::Token {
                terminal: TerminalId(1),
                kind: KindId(3),
                immediate: false,
            },
        ],
        terminals: vec![
            Terminal::literal("hello"),
            Terminal::pattern("[a-z]+", None).unwrap(),
        ],
        extras: vec![],
        sync: vec![],
        start: RuleId(0),
        fingerprint: 0,
    }
}

#[test]
fn lookups() {
    let program = greeting_program();

    assert_eq!(program.rule_by_name("name"), Some(RuleId(1)));
    assert_eq!(program.rule_by_name("missing"), None);
    assert_eq!(program.start_rule().name, "greeting");
    assert_eq!(program.kind_name(KindId(3)), "name");
    assert_eq!(program.kind_name(KindId(99)), "?");
}

#[test]
fn kind_labels_quote_anonymous_kinds() {
    let program = greeting_program();

    assert_eq!(program.kind_label(KindId(3)), "name");
    assert_eq!(program.kind_label(KindId(4)), r#""hello""#);
}

#[test]
fn dump_program() {
    let program = greeting_program();

    assert_eq!(
        dump(&program, Colors::OFF),
        indoc! {r#"
            [rules]
            R0 greeting = ("hello" name) (start)
            R1 name = name (lexical)

            [kinds]
            K0 ERROR (error)
            K1 SKIPPED (skipped)
            K2 greeting (node)
            K3 name (token)
            K4 "hello" (token)

            [terminals]
            T0 "hello"
            T1 /[a-z]+/
        "#}
    );
}
