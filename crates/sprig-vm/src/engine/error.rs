//! Errors reported by the engine.

use std::fmt;

use rowan::TextRange;

/// Why a parse stopped before the grammar was done with the input.
///
/// A halted parse still returns a complete tree; the input it did not get to
/// is covered by a trailing `ERROR` node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum Halt {
    #[error("parse cancelled")]
    Cancelled,

    /// Too many ops evaluated.
    #[error("execution limit exceeded")]
    ExecFuelExhausted,

    /// Too many nested rule calls.
    #[error("recursion limit exceeded")]
    RecursionLimitExceeded,
}

/// An edit that does not fit the text it is applied to.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EditError {
    #[error("edit {start}..{end} is out of bounds for text of length {len}")]
    OutOfBounds { start: usize, end: usize, len: usize },

    #[error("edit boundary {0} is not on a char boundary")]
    NotCharBoundary(usize),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyntaxErrorKind {
    /// Input was skipped.
    Unexpected,
    /// Nothing was skipped; expected input is absent.
    Missing,
}

/// One `ERROR` node of a tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxError {
    pub range: TextRange,
    pub kind: SyntaxErrorKind,
    /// Labels of the terminals that would have let the parse continue, as in
    /// `"="` or `identifier`.
    pub expected: Vec<String>,
}

impl SyntaxError {
    pub fn message(&self) -> String {
        let expected = join_expected(&self.expected);
        match (self.kind, expected) {
            (SyntaxErrorKind::Unexpected, Some(expected)) => {
                format!("unexpected input, expected {expected}")
            }
            (SyntaxErrorKind::Unexpected, None) => "unexpected input".to_string(),
            (SyntaxErrorKind::Missing, Some(expected)) => format!("missing {expected}"),
            (SyntaxErrorKind::Missing, None) => "missing input".to_string(),
        }
    }
}

impl fmt::Display for SyntaxError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}..{}: {}",
            u32::from(self.range.start()),
            u32::from(self.range.end()),
            self.message()
        )
    }
}

/// `a`, `a or b`, `a, b or c`
fn join_expected(labels: &[String]) -> Option<String> {
    match labels {
        [] => None,
        [one] => Some(one.clone()),
        [init @ .., last] => Some(format!("{} or {last}", init.join(", "))),
    }
}
