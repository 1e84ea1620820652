//! Grammar errors and warnings.

/// A grammar that cannot be compiled.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GrammarError {
    #[error("grammar has no rules")]
    EmptyGrammar,

    #[error("start rule `{0}` is not defined")]
    MissingStartRule(String),

    #[error("rule `{0}` is defined more than once")]
    DuplicateRule(String),

    #[error("rule `{rule}` references undefined rule `{name}`")]
    UndefinedRule { rule: String, name: String },

    #[error("rule `{rule}` has an invalid pattern /{pattern}/: {message}")]
    InvalidPattern {
        rule: String,
        pattern: String,
        message: String,
    },

    #[error("rule `{rule}` references `{name}` inside a token; tokens may only contain literals and patterns")]
    SymbolInToken { rule: String, name: String },

    #[error("extra #{index} is not a token or a lexical rule")]
    UnsupportedExtra { index: usize },

    #[error("left recursion: {}", format_cycle(cycle))]
    UnproductiveLeftRecursion { cycle: Vec<String> },

    #[error("infinite recursion: cycle has no escape path: {}", format_cycle(cycle))]
    InfiniteRecursion { cycle: Vec<String> },

    #[error("grammar needs more than {limit} {table}")]
    TooLarge { table: &'static str, limit: usize },
}

/// Non-fatal findings reported beside a successful compilation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GrammarWarning {
    #[error("rule `{0}` is unreachable from the start rule")]
    UnreachableRule(String),

    #[error("rule `{rule}` repeats an expression that can match empty input")]
    NullableRepeat { rule: String },

    #[error("rule `{rule}`: alternative {shadowed} can never match, alternative {by} always wins first")]
    ShadowedAlternative {
        rule: String,
        shadowed: usize,
        by: usize,
    },
}

/// `a -> b -> a`
fn format_cycle(cycle: &[String]) -> String {
    let mut parts: Vec<&str> = cycle.iter().map(String::as_str).collect();
    if let Some(first) = cycle.first() {
        parts.push(first);
    }
    parts.join(" -> ")
}
