//! Builder functions mirroring the `grammar.js` vocabulary.
//!
//! ```
//! use sprig_core::Grammar;
//! use sprig_core::dsl::*;
//!
//! let grammar = Grammar::new("kv")
//!     .with_rule("pair", seq([sym("key"), string("="), sym("value")]))
//!     .with_rule("key", pattern("[a-z]+"))
//!     .with_rule("value", choice([pattern("[0-9]+"), sym("key")]));
//! assert_eq!(grammar.start_rule(), Some("pair"));
//! ```

use super::types::Rule;

pub fn blank() -> Rule {
    Rule::Blank
}

pub fn string(value: impl Into<String>) -> Rule {
    Rule::String(value.into())
}

pub fn pattern(value: impl Into<String>) -> Rule {
    Rule::Pattern {
        value: value.into(),
        flags: None,
    }
}

/// Regex terminal with flags (`"i"` for case-insensitive).
pub fn pattern_with_flags(value: impl Into<String>, flags: impl Into<String>) -> Rule {
    Rule::Pattern {
        value: value.into(),
        flags: Some(flags.into()),
    }
}

pub fn sym(name: impl Into<String>) -> Rule {
    Rule::Symbol(name.into())
}

pub fn seq(members: impl IntoIterator<Item = Rule>) -> Rule {
    Rule::Seq(members.into_iter().collect())
}

pub fn choice(members: impl IntoIterator<Item = Rule>) -> Rule {
    Rule::Choice(members.into_iter().collect())
}

/// Zero or more.
pub fn repeat(content: Rule) -> Rule {
    repeat_range(content, 0, None)
}

/// One or more.
pub fn repeat1(content: Rule) -> Rule {
    repeat_range(content, 1, None)
}

/// `content` or nothing. Same shape tree-sitter emits: `choice(content, blank())`.
pub fn optional(content: Rule) -> Rule {
    Rule::Choice(vec![content, Rule::Blank])
}

pub fn repeat_range(content: Rule, min: u32, max: Option<u32>) -> Rule {
    Rule::Repeat {
        content: Box::new(content),
        min,
        max,
    }
}

pub fn token(content: Rule) -> Rule {
    Rule::Token {
        content: Box::new(content),
        immediate: false,
    }
}

/// Token that must start right where the previous one ended (no extras).
pub fn immediate_token(content: Rule) -> Rule {
    Rule::Token {
        content: Box::new(content),
        immediate: true,
    }
}

pub fn alias(content: Rule, value: impl Into<String>, named: bool) -> Rule {
    Rule::Alias {
        content: Box::new(content),
        value: value.into(),
        named,
    }
}

pub fn field(name: impl Into<String>, content: Rule) -> Rule {
    Rule::Field {
        name: name.into(),
        content: Box::new(content),
    }
}
