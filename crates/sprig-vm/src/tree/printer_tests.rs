use indoc::indoc;
use sprig_core::Colors;

use crate::engine::parse;
use crate::test_utils::kimchi;
use crate::tree::TreePrinter;

#[test]
fn defaults_hide_trivia_and_spans() {
    let program = kimchi();
    let result = parse(&program, "let x: int = y");

    let out = TreePrinter::new(&result.tree, &program).dump();

    assert!(!out.contains('['));
    assert!(!out.contains(r"/\s/"));
}

#[test]
fn spans_without_trivia() {
    let program = kimchi();
    let result = parse(&program, "let x: int =");

    let out = TreePrinter::new(&result.tree, &program)
        .with_spans(true)
        .dump();

    assert_eq!(
        out,
        indoc! {r#"
            source_file [0..12]
              variable_definition [0..12]
                "let" [0..3]
                identifier [4..5] "x"
                ":" [5..6]
                type [7..10]
                  identifier [7..10] "int"
                "=" [11..12]
                ERROR [12..12]
        "#}
    );
}

#[test]
fn trivia_without_spans() {
    let program = kimchi();
    let result = parse(&program, " let x: t = y ");

    let out = TreePrinter::new(&result.tree, &program)
        .with_trivia(true)
        .dump();

    assert_eq!(
        out,
        indoc! {r#"
            source_file
              /\s/ " "
              variable_definition
                "let"
                /\s/ " "
                identifier "x"
                ":"
                /\s/ " "
                type
                  identifier "t"
                /\s/ " "
                "="
                /\s/ " "
                expression
                  identifier "y"
              /\s/ " "
        "#}
    );
}

#[test]
fn skipped_text_is_escaped() {
    let program = kimchi();
    let result = parse(&program, "\"\t");

    let out = TreePrinter::new(&result.tree, &program).dump();

    assert_eq!(out, "source_file\n  ERROR\n    SKIPPED \"\\\"\\t\"\n");
}

#[test]
fn colors() {
    let program = kimchi();
    let result = parse(&program, "let x: t = y ?");

    let out = TreePrinter::new(&result.tree, &program)
        .colors(Colors::ON)
        .dump();

    assert!(out.contains(&format!("{}ERROR{}", Colors::ON.red, Colors::ON.reset)));
    assert!(out.contains(&format!("{}source_file{}", Colors::ON.blue, Colors::ON.reset)));
    assert!(out.contains(&format!("{}\"let\"{}", Colors::ON.green, Colors::ON.reset)));
}

#[test]
fn format_into_writer() {
    let program = kimchi();
    let result = parse(&program, "");
    let mut out = String::from("> ");

    TreePrinter::new(&result.tree, &program)
        .format(&mut out)
        .expect("String write never fails");

    assert_eq!(out, "> source_file\n");
}
