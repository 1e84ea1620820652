//! Loading tree-sitter `grammar.json` files.
//!
//! Tree-sitter's grammar.json uses internally-tagged rules (`"type": "SEQ"`).
//! Precedence and reserved-word wrappers carry no meaning for ordered choice,
//! so they are unwrapped on load. `precedences`, `conflicts` and `reserved`
//! are accepted and ignored.

use indexmap::IndexMap;
use serde::Deserialize;

use super::types::{Grammar, Rule};

/// Error while loading a grammar.
#[derive(Debug)]
pub enum LoadError {
    Json(serde_json::Error),
    Binary(postcard::Error),
}

impl std::fmt::Display for LoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Json(e) => write!(f, "JSON parse error: {e}"),
            Self::Binary(e) => write!(f, "binary decode error: {e}"),
        }
    }
}

impl std::error::Error for LoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Json(e) => Some(e),
            Self::Binary(e) => Some(e),
        }
    }
}

impl Grammar {
    /// Parse a grammar from tree-sitter's JSON format.
    ///
    /// A missing `extras` key means whitespace (`/\s/`), as in tree-sitter.
    pub fn from_json(json: &str) -> Result<Self, LoadError> {
        let raw: RawGrammar = serde_json::from_str(json).map_err(LoadError::Json)?;
        Ok(raw.into())
    }
}

#[derive(Debug, Deserialize)]
struct RawGrammar {
    name: String,
    rules: IndexMap<String, RawRule>,
    #[serde(default = "default_extras")]
    extras: Vec<RawRule>,
    #[serde(default)]
    externals: Vec<RawRule>,
    #[serde(default, rename = "inline")]
    inline_rules: Vec<String>,
    #[serde(default)]
    supertypes: Vec<String>,
    #[serde(default)]
    word: Option<String>,
}

fn default_extras() -> Vec<RawRule> {
    vec![RawRule::PATTERN {
        value: r"\s".to_string(),
        flags: None,
    }]
}

impl From<RawGrammar> for Grammar {
    fn from(raw: RawGrammar) -> Self {
        // IndexMap keeps definition order, so the first rule stays the start rule.
        Self {
            name: raw.name,
            start: None,
            rules: raw.rules.into_iter().map(|(k, v)| (k, v.into())).collect(),
            extras: raw.extras.into_iter().map(Into::into).collect(),
            inline: raw.inline_rules,
            supertypes: raw.supertypes,
            word: raw.word,
            externals: raw.externals.into_iter().map(Into::into).collect(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type")]
#[allow(clippy::upper_case_acronyms, non_camel_case_types)]
enum RawRule {
    BLANK,
    STRING {
        value: String,
    },
    PATTERN {
        value: String,
        #[serde(default)]
        flags: Option<String>,
    },
    SYMBOL {
        name: String,
    },
    SEQ {
        members: Vec<RawRule>,
    },
    CHOICE {
        members: Vec<RawRule>,
    },
    REPEAT {
        content: Box<RawRule>,
    },
    REPEAT1 {
        content: Box<RawRule>,
    },
    FIELD {
        name: String,
        content: Box<RawRule>,
    },
    ALIAS {
        content: Box<RawRule>,
        value: String,
        named: bool,
    },
    TOKEN {
        content: Box<RawRule>,
    },
    IMMEDIATE_TOKEN {
        content: Box<RawRule>,
    },
    PREC {
        content: Box<RawRule>,
    },
    PREC_LEFT {
        content: Box<RawRule>,
    },
    PREC_RIGHT {
        content: Box<RawRule>,
    },
    PREC_DYNAMIC {
        content: Box<RawRule>,
    },
    RESERVED {
        content: Box<RawRule>,
    },
}

impl From<RawRule> for Rule {
    fn from(raw: RawRule) -> Self {
        #[allow(clippy::boxed_local)] // Fields are Box<RawRule>, output needs Box<Rule>
        fn conv(content: Box<RawRule>) -> Box<Rule> {
            Box::new(Rule::from(*content))
        }

        match raw {
            RawRule::BLANK => Rule::Blank,
            RawRule::STRING { value } => Rule::String(value),
            RawRule::PATTERN { value, flags } => Rule::Pattern { value, flags },
            RawRule::SYMBOL { name } => Rule::Symbol(name),
            RawRule::SEQ { members } => Rule::Seq(members.into_iter().map(Into::into).collect()),
            RawRule::CHOICE { members } => {
                Rule::Choice(members.into_iter().map(Into::into).collect())
            }
            RawRule::REPEAT { content } => Rule::Repeat {
                content: conv(content),
                min: 0,
                max: None,
            },
            RawRule::REPEAT1 { content } => Rule::Repeat {
                content: conv(content),
                min: 1,
                max: None,
            },
            RawRule::FIELD { name, content } => Rule::Field {
                name,
                content: conv(content),
            },
            RawRule::ALIAS {
                content,
                value,
                named,
            } => Rule::Alias {
                content: conv(content),
                value,
                named,
            },
            RawRule::TOKEN { content } => Rule::Token {
                content: conv(content),
                immediate: false,
            },
            RawRule::IMMEDIATE_TOKEN { content } => Rule::Token {
                content: conv(content),
                immediate: true,
            },
            RawRule::PREC { content }
            | RawRule::PREC_LEFT { content }
            | RawRule::PREC_RIGHT { content }
            | RawRule::PREC_DYNAMIC { content }
            | RawRule::RESERVED { content } => Rule::from(*content),
        }
    }
}
