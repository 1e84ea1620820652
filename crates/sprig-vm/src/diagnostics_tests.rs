use crate::diagnostics::DiagnosticsPrinter;
use crate::engine::parse;
use crate::test_utils::kimchi;

#[test]
fn plain_without_source() {
    let program = kimchi();
    let result = parse(&program, "let x: = y\nlet : int = w");

    let out = result.tree.diagnostics().render();

    assert_eq!(
        out,
        "7..7: missing identifier\n15..15: missing identifier"
    );
}

#[test]
fn no_errors_renders_nothing() {
    let program = kimchi();
    let text = "let x: int = y";
    let result = parse(&program, text);

    assert_eq!(result.tree.diagnostics().source(text).render(), "");
    assert_eq!(result.tree.diagnostics().render(), "");
}

#[test]
fn snippet_with_source() {
    let program = kimchi();
    let text = "let x : int = y z";
    let result = parse(&program, text);

    let out = DiagnosticsPrinter::new(result.tree.errors())
        .source(text)
        .path("main.kimchi")
        .render();

    assert!(out.contains(r#"error: unexpected input, expected "let""#), "{out}");
    assert!(out.contains("main.kimchi"), "{out}");
    assert!(out.contains("let x : int = y z"), "{out}");
    assert!(out.contains("skipped"), "{out}");
}

#[test]
fn empty_span_at_end_of_input() {
    let program = kimchi();
    let text = "let x: int =";
    let result = parse(&program, text);

    let out = result.tree.diagnostics().source(text).render();

    assert!(out.contains("error: missing identifier"), "{out}");
    assert!(out.contains(text), "{out}");
}

#[test]
fn colored_output() {
    let program = kimchi();
    let text = "let = y";
    let result = parse(&program, text);

    let out = result
        .tree
        .diagnostics()
        .source(text)
        .colored(true)
        .render();

    assert!(out.contains('\x1b'), "{out}");
}
