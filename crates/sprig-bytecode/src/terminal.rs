//! Terminal matchers.
//!
//! Every match reports how far into the input it looked (`examined`), not just
//! where the match ended. The incremental reparser relies on that extent to
//! decide which previous results an edit leaves intact.
//!
//! Patterns are compiled to anchored dense DFAs and walked byte by byte, so a
//! match is the longest prefix the pattern accepts, like a lexer's maximal munch.

use regex_automata::dfa::{Automaton, StartKind, dense};
use regex_automata::util::syntax;
use regex_automata::{Anchored, Input, MatchKind};

/// Errors from compiling a pattern terminal.
#[derive(Debug, Clone, thiserror::Error)]
pub enum PatternError {
    #[error("invalid regex: {0}")]
    Syntax(String),

    #[error("failed to build DFA: {0}")]
    Build(String),

    #[error("unsupported regex flag '{0}'")]
    UnknownFlag(char),
}

/// Result of trying a terminal at a position.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TerminalMatch {
    /// Length of the match in bytes, `None` on failure.
    pub len: Option<usize>,
    /// Exclusive end of the bytes inspected. `text.len() + 1` means the end of
    /// input itself influenced the result.
    pub examined: usize,
}

#[derive(Clone, Debug)]
pub enum Matcher {
    Literal(String),
    Pattern(Pattern),
}

#[derive(Clone, Debug)]
pub struct Terminal {
    pub matcher: Matcher,
    /// Can match the empty string.
    pub nullable: bool,
}

impl Terminal {
    pub fn literal(value: impl Into<String>) -> Self {
        let value = value.into();
        Self {
            nullable: value.is_empty(),
            matcher: Matcher::Literal(value),
        }
    }

    pub fn pattern(source: &str, flags: Option<&str>) -> Result<Self, PatternError> {
        let pattern = Pattern::new(source, flags)?;
        Ok(Self {
            nullable: pattern.nullable,
            matcher: Matcher::Pattern(pattern),
        })
    }

    /// Try to match at byte offset `pos` (a char boundary of `text`).
    pub fn match_at(&self, text: &str, pos: usize) -> TerminalMatch {
        match &self.matcher {
            Matcher::Literal(lit) => match_literal(lit, text, pos),
            Matcher::Pattern(p) => p.match_at(text, pos),
        }
    }

    /// Display form: `"let"` or `/[a-z]+/`.
    pub fn label(&self) -> String {
        match &self.matcher {
            Matcher::Literal(lit) => format!("{lit:?}"),
            Matcher::Pattern(p) => format!("/{}/", p.source),
        }
    }
}

fn match_literal(lit: &str, text: &str, pos: usize) -> TerminalMatch {
    let rest = &text.as_bytes()[pos..];
    let common = rest
        .iter()
        .zip(lit.as_bytes())
        .take_while(|(a, b)| a == b)
        .count();

    if common == lit.len() {
        return TerminalMatch {
            len: Some(lit.len()),
            examined: pos + lit.len(),
        };
    }

    let examined = if common == rest.len() {
        text.len() + 1
    } else {
        pos + common + 1
    };
    TerminalMatch {
        len: None,
        examined,
    }
}

/// Anchored regex terminal.
#[derive(Clone, Debug)]
pub struct Pattern {
    source: String,
    dfa: dense::DFA<Vec<u32>>,
    nullable: bool,
}

impl Pattern {
    /// Compile `source`. Supported flags: `i` (case-insensitive), `s` (dot
    /// matches newline), `m` (multi-line anchors). `u`, `v` and `g` are
    /// accepted and ignored.
    pub fn new(source: &str, flags: Option<&str>) -> Result<Self, PatternError> {
        let mut config = syntax::Config::new();
        let mut parser = regex_syntax::ParserBuilder::new();
        for flag in flags.unwrap_or_default().chars() {
            match flag {
                'i' => {
                    config = config.case_insensitive(true);
                    parser.case_insensitive(true);
                }
                's' => {
                    config = config.dot_matches_new_line(true);
                    parser.dot_matches_new_line(true);
                }
                'm' => {
                    config = config.multi_line(true);
                    parser.multi_line(true);
                }
                'u' | 'v' | 'g' => {}
                other => return Err(PatternError::UnknownFlag(other)),
            }
        }

        let hir = parser
            .build()
            .parse(source)
            .map_err(|e| PatternError::Syntax(e.to_string()))?;
        let nullable = hir.properties().minimum_len() == Some(0);

        let dfa = dense::Builder::new()
            .configure(
                dense::Config::new()
                    .start_kind(StartKind::Anchored)
                    .match_kind(MatchKind::All)
                    .minimize(true),
            )
            .syntax(config)
            .build(source)
            .map_err(|e| PatternError::Build(e.to_string()))?;

        Ok(Self {
            source: source.to_string(),
            dfa,
            nullable,
        })
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn match_at(&self, text: &str, pos: usize) -> TerminalMatch {
        let input = Input::new(text)
            .span(pos..text.len())
            .anchored(Anchored::Yes);
        let Ok(mut state) = self.dfa.start_state_forward(&input) else {
            return TerminalMatch {
                len: None,
                examined: pos + 1,
            };
        };

        let bytes = text.as_bytes();
        let mut last_end = None;
        let mut at = pos;
        while at < bytes.len() {
            state = self.dfa.next_state(state, bytes[at]);
            at += 1;
            if self.dfa.is_special_state(state) {
                // Matches are reported one byte late: entering a match state
                // on byte `at - 1` means a match ended before it.
                if self.dfa.is_match_state(state) {
                    last_end = Some(at - 1);
                } else if self.dfa.is_dead_state(state) || self.dfa.is_quit_state(state) {
                    return TerminalMatch {
                        len: last_end.map(|end| end - pos),
                        examined: at,
                    };
                }
            }
        }

        state = self.dfa.next_eoi_state(state);
        if self.dfa.is_match_state(state) {
            last_end = Some(bytes.len());
        }
        TerminalMatch {
            len: last_end.map(|end| end - pos),
            examined: bytes.len() + 1,
        }
    }
}
