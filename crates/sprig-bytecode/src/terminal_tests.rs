use crate::{PatternError, Terminal, TerminalMatch};

fn hit(len: usize, examined: usize) -> TerminalMatch {
    TerminalMatch {
        len: Some(len),
        examined,
    }
}

fn miss(examined: usize) -> TerminalMatch {
    TerminalMatch {
        len: None,
        examined,
    }
}

#[test]
fn literal_match_examines_only_its_bytes() {
    let t = Terminal::literal("let");

    assert_eq!(t.match_at("let x", 0), hit(3, 3));
    assert_eq!(t.match_at("x let", 2), hit(3, 5));
}

#[test]
fn literal_mismatch_stops_at_first_difference() {
    let t = Terminal::literal("let");

    assert_eq!(t.match_at("lex", 0), miss(3));
    assert_eq!(t.match_at("x", 0), miss(1));
}

#[test]
fn literal_running_into_end_of_input_examines_eof() {
    let t = Terminal::literal("let");

    assert_eq!(t.match_at("le", 0), miss(3));
    assert_eq!(t.match_at("", 0), miss(1));
}

#[test]
fn empty_literal_is_nullable() {
    let t = Terminal::literal("");

    assert!(t.nullable);
    assert_eq!(t.match_at("abc", 1), hit(0, 1));
}

#[test]
fn pattern_takes_longest_match() {
    let t = Terminal::pattern("[a-z]+", None).unwrap();

    // The match state is only recognised on the byte after the match ends,
    // and the dead state one byte later.
    assert_eq!(t.match_at("abc def", 0), hit(3, 5));
    assert_eq!(t.match_at("abc def", 4), hit(3, 8));
}

#[test]
fn pattern_alternation_is_longest_not_first() {
    let t = Terminal::pattern("a|ab", None).unwrap();

    assert_eq!(t.match_at("abc", 0).len, Some(2));
}

#[test]
fn pattern_failure() {
    let t = Terminal::pattern("[0-9]+", None).unwrap();

    assert_eq!(t.match_at("x1", 0), miss(1));
    assert_eq!(t.match_at("", 0), miss(1));
}

#[test]
fn pattern_is_anchored_at_position() {
    let t = Terminal::pattern("[0-9]+", None).unwrap();

    assert_eq!(t.match_at("a12", 0).len, None);
    assert_eq!(t.match_at("a12", 1).len, Some(2));
}

#[test]
fn nullable_pattern() {
    let t = Terminal::pattern("a*", None).unwrap();

    assert!(t.nullable);
    assert_eq!(t.match_at("bbb", 0).len, Some(0));
    assert!(!Terminal::pattern("a+", None).unwrap().nullable);
}

#[test]
fn case_insensitive_flag() {
    let t = Terminal::pattern("select", Some("i")).unwrap();

    assert_eq!(t.match_at("SeLeCt *", 0).len, Some(6));
}

#[test]
fn unicode_pattern_ends_on_char_boundary() {
    let t = Terminal::pattern(r"\w+", None).unwrap();
    let text = "héllo wörld";

    let m = t.match_at(text, 0);
    assert_eq!(m.len, Some("héllo".len()));
    assert!(text.is_char_boundary(m.len.unwrap()));
}

#[test]
fn invalid_pattern() {
    assert!(matches!(
        Terminal::pattern("(", None),
        Err(PatternError::Syntax(_))
    ));
    assert!(matches!(
        Terminal::pattern("a", Some("x")),
        Err(PatternError::UnknownFlag('x'))
    ));
}

#[test]
fn labels() {
    assert_eq!(Terminal::literal("let").label(), r#""let""#);
    assert_eq!(
        Terminal::pattern("[a-z]+", None).unwrap().label(),
        "/[a-z]+/"
    );
}
