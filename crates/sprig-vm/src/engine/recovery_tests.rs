use indoc::indoc;
use sprig_bytecode::Program;
use sprig_compiler::Compiler;
use sprig_core::Grammar;
use sprig_core::dsl::*;

use crate::engine::{Engine, ParseOptions, SyntaxErrorKind, parse};
use crate::test_utils::{check_tree, dump, kimchi};

/// `let x = 1;` statements.
fn assignments(sync: &[&str]) -> Program {
    let grammar = Grammar::new("assign")
        .with_rule("file", repeat(sym("stmt")))
        .with_rule(
            "stmt",
            seq([
                string("let"),
                sym("ident"),
                string("="),
                sym("num"),
                string(";"),
            ]),
        )
        .with_rule("ident", pattern("[a-z]+"))
        .with_rule("num", pattern("[0-9]+"))
        .with_extras([pattern(r"\s")]);
    Compiler::new()
        .sync_tokens(sync.iter().copied())
        .compile(&grammar)
        .expect("grammar compiles")
        .program
}

fn error_strings(program: &Program, text: &str) -> Vec<String> {
    let result = parse(program, text);
    check_tree(&result.tree, text);
    result.tree.errors().iter().map(ToString::to_string).collect()
}

#[test]
fn missing_element_at_end_of_input() {
    let program = kimchi();
    let text = "let x: int =";

    let result = parse(&program, text);

    check_tree(&result.tree, text);
    assert_eq!(
        dump(&program, &result),
        indoc! {r#"
            source_file
              variable_definition
                "let"
                identifier "x"
                ":"
                type
                  identifier "int"
                "="
                ERROR
        "#}
    );
    let errors = result.tree.errors();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].kind, SyntaxErrorKind::Missing);
    assert_eq!(errors[0].to_string(), "12..12: missing identifier");
}

#[test]
fn missing_element_mid_sequence() {
    let program = kimchi();
    let text = "let = y";

    let result = parse(&program, text);

    check_tree(&result.tree, text);
    assert_eq!(
        dump(&program, &result),
        indoc! {r#"
            source_file
              variable_definition
                "let"
                ERROR
                "="
                expression
                  identifier "y"
        "#}
    );
    assert_eq!(error_strings(&program, text), ["4..4: missing identifier"]);
}

#[test]
fn trailing_garbage() {
    let program = kimchi();
    let text = "let x : int = y z";

    let result = parse(&program, text);

    check_tree(&result.tree, text);
    assert_eq!(
        dump(&program, &result),
        indoc! {r#"
            source_file
              variable_definition
                "let"
                identifier "x"
                ":"
                type
                  identifier "int"
                "="
                expression
                  identifier "y"
              ERROR
                SKIPPED "z"
        "#}
    );
    assert_eq!(
        error_strings(&program, text),
        [r#"16..17: unexpected input, expected "let""#]
    );
}

#[test]
fn parsing_resumes_after_error() {
    let program = kimchi();
    let text = "let x: = y\nlet z: int = w";

    let result = parse(&program, text);

    check_tree(&result.tree, text);
    assert_eq!(
        dump(&program, &result),
        indoc! {r#"
            source_file
              variable_definition
                "let"
                identifier "x"
                ":"
                ERROR
                "="
                expression
                  identifier "y"
              variable_definition
                "let"
                identifier "z"
                ":"
                type
                  identifier "int"
                "="
                expression
                  identifier "w"
        "#}
    );
}

#[test]
fn one_error_per_round() {
    let program = kimchi();
    let text = "let x: = y\nlet : int = w";

    assert_eq!(
        error_strings(&program, text),
        ["7..7: missing identifier", "15..15: missing identifier"]
    );
}

#[test]
fn many_independent_errors() {
    let program = kimchi();
    let text = "let a b = c\n".repeat(100);

    let result = parse(&program, &text);

    check_tree(&result.tree, &text);
    assert!(result.halted.is_none());
    let errors = result.tree.errors();
    assert_eq!(errors.len(), 100);
    for (line, error) in errors.iter().enumerate() {
        assert_eq!(error.kind, SyntaxErrorKind::Missing, "{error}");
        assert_eq!(usize::from(error.range.start()), line * 12 + 6);
        assert!(error.range.is_empty());
    }
}

#[test]
fn round_limit_leaves_rest_unparsed() {
    let program = kimchi();
    let text = "let a b = c\n".repeat(10);
    let engine = Engine::new(&program).options(ParseOptions::new().max_recovery_rounds(Some(4)));

    let result = engine.parse(&text);

    check_tree(&result.tree, &text);
    let errors: Vec<_> = result.tree.errors().iter().map(|e| e.range).collect();
    assert_eq!(errors.len(), 4);
    assert!(errors[..3].iter().all(|r| r.is_empty()));
    assert_eq!(usize::from(errors[3].end()), text.len());
}

#[test]
fn skipped_input_before_resync() {
    let program = assignments(&[]);
    let text = "let x = ! let y = 2;";

    let result = parse(&program, text);

    check_tree(&result.tree, text);
    assert_eq!(
        dump(&program, &result),
        indoc! {r#"
            file
              stmt
                "let"
                ident "x"
                "="
                ERROR
                  SKIPPED "! let y ="
                num "2"
                ";"
        "#}
    );
    assert_eq!(
        error_strings(&program, text),
        ["8..17: unexpected input, expected num"]
    );
}

#[test]
fn sync_token_bounds_skipped_input() {
    let program = assignments(&["let"]);
    let text = "let x = ! let y = 2;";

    let result = parse(&program, text);

    check_tree(&result.tree, text);
    assert_eq!(
        dump(&program, &result),
        indoc! {r#"
            file
              stmt
                "let"
                ident "x"
                "="
                ERROR
                  SKIPPED "! "
              stmt
                "let"
                ident "y"
                "="
                num "2"
                ";"
        "#}
    );
    assert_eq!(
        error_strings(&program, text),
        ["8..10: unexpected input, expected num"]
    );
}

#[test]
fn garbage_only() {
    let program = kimchi();
    let text = "???";

    let result = parse(&program, text);

    check_tree(&result.tree, text);
    assert_eq!(
        dump(&program, &result),
        "source_file\n  ERROR\n    SKIPPED \"???\"\n"
    );
    assert_eq!(
        error_strings(&program, text),
        [r#"0..3: unexpected input, expected "let""#]
    );
}

#[test]
fn recovery_can_be_disabled() {
    let program = kimchi();
    let text = "let = y";
    let engine = Engine::new(&program).options(ParseOptions::new().max_recovery_rounds(Some(1)));

    let result = engine.parse(text);

    check_tree(&result.tree, text);
    assert_eq!(
        dump(&program, &result),
        "source_file\n  ERROR\n    SKIPPED \"let = y\"\n"
    );
    assert_eq!(result.tree.errors()[0].to_string(), "0..7: unexpected input");
}

#[test]
fn arbitrary_input_round_trips() {
    let program = kimchi();
    for text in [
        "let",
        "let x",
        "let x:",
        "= = =",
        "let let let",
        "x: int = y",
        "let x: int = y let",
        "let x: int = y\n\n;;;\nlet a: b = c",
        "let é: ü = ß",
        "\u{1F600} let x: int = y",
    ] {
        let result = parse(&program, text);
        check_tree(&result.tree, text);
        assert!(result.halted.is_none(), "{text:?}");
        assert_eq!(result.had_errors, result.tree.has_errors());
    }
}
