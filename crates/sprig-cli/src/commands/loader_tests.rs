use std::fs;
use std::path::{Path, PathBuf};

use sprig_core::Grammar;

use super::loader::*;

const KIMCHI: &str = include_str!("../../../../fixtures/kimchi.json");

fn write(dir: &Path, name: &str, contents: impl AsRef<[u8]>) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, contents).unwrap();
    path
}

fn grammar_input(path: PathBuf) -> GrammarInput {
    GrammarInput {
        path,
        start: None,
        sync: Vec::new(),
    }
}

#[test]
fn loads_json_grammar() {
    let dir = tempfile::tempdir().unwrap();
    let path = write(dir.path(), "kimchi.json", KIMCHI);

    let grammar = load_grammar(&path).unwrap();

    assert_eq!(grammar.name, "kimchi");
    assert_eq!(grammar, Grammar::from_json(KIMCHI).unwrap());
}

#[test]
fn loads_binary_grammar() {
    let dir = tempfile::tempdir().unwrap();
    let grammar = Grammar::from_json(KIMCHI).unwrap();
    let path = write(dir.path(), "kimchi.bin", grammar.to_binary());

    assert_eq!(load_grammar(&path).unwrap(), grammar);
}

#[test]
fn unknown_extension() {
    let dir = tempfile::tempdir().unwrap();
    let path = write(dir.path(), "kimchi.txt", KIMCHI);

    let err = load_grammar(&path).unwrap_err();

    assert!(matches!(err, LoadError::UnknownFormat(_)));
    assert!(err.to_string().contains("unknown grammar format"), "{err}");
}

#[test]
fn missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("absent.json");

    let err = load_grammar(&path).unwrap_err();

    assert!(matches!(err, LoadError::Read { .. }));
    assert!(err.to_string().starts_with("failed to read '"), "{err}");
}

#[test]
fn malformed_json() {
    let dir = tempfile::tempdir().unwrap();
    let path = write(dir.path(), "broken.json", "{ \"name\": ");

    let err = load_grammar(&path).unwrap_err();

    assert!(matches!(err, LoadError::Grammar { .. }));
    assert!(err.to_string().contains("JSON parse error"), "{err}");
}

#[test]
fn compiles_with_start_override() {
    let dir = tempfile::tempdir().unwrap();
    let path = write(dir.path(), "kimchi.json", KIMCHI);
    let input = GrammarInput {
        start: Some("variable_definition".to_owned()),
        ..grammar_input(path)
    };

    let compilation = compile_grammar(&input).unwrap();

    assert_eq!(
        compilation.program.start_rule().name,
        "variable_definition"
    );
}

#[test]
fn undefined_start_rule() {
    let dir = tempfile::tempdir().unwrap();
    let path = write(dir.path(), "kimchi.json", KIMCHI);
    let input = GrammarInput {
        start: Some("nope".to_owned()),
        ..grammar_input(path)
    };

    let err = compile_grammar(&input).unwrap_err();

    assert_eq!(err.to_string(), "start rule `nope` is not defined");
}

#[test]
fn compiles_default_start() {
    let dir = tempfile::tempdir().unwrap();
    let path = write(dir.path(), "kimchi.json", KIMCHI);

    let compilation = compile_grammar(&grammar_input(path)).unwrap();

    assert_eq!(compilation.program.start_rule().name, "source_file");
}

#[test]
fn inline_source_wins() {
    let input = SourceInput {
        path: Some(PathBuf::from("ignored.txt")),
        text: Some("let x: t = y".to_owned()),
    };

    assert_eq!(load_source(&input).unwrap(), "let x: t = y");
    assert_eq!(source_name(&input), None);
}

#[test]
fn source_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = write(dir.path(), "app.kimchi", "let a: b = c\n");
    let input = SourceInput {
        path: Some(path.clone()),
        text: None,
    };

    assert_eq!(load_source(&input).unwrap(), "let a: b = c\n");
    assert_eq!(
        source_name(&input),
        Some(path.to_string_lossy().into_owned())
    );
}

#[test]
fn source_is_required() {
    let input = SourceInput {
        path: None,
        text: None,
    };

    let err = load_source(&input).unwrap_err();

    assert!(matches!(err, LoadError::MissingSource));
}

#[test]
fn stdin_source_name() {
    let input = SourceInput {
        path: Some(PathBuf::from("-")),
        text: None,
    };

    assert_eq!(source_name(&input).as_deref(), Some("<stdin>"));
}
