//! Grammar type definitions.

use serde::{Deserialize, Serialize};

/// A complete grammar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grammar {
    /// Grammar name (e.g., "kimchi").
    pub name: String,
    /// Explicit start rule. When absent, the first rule is the start rule.
    #[serde(default)]
    pub start: Option<String>,
    /// Production rules, preserving definition order.
    pub rules: Vec<(String, Rule)>,
    /// Trivia skipped before every non-immediate token (whitespace, comments).
    #[serde(default)]
    pub extras: Vec<Rule>,
    /// Rules whose children are spliced into the parent node.
    #[serde(default)]
    pub inline: Vec<String>,
    /// Supertype rules. Treated like `inline` rules.
    #[serde(default)]
    pub supertypes: Vec<String>,
    /// Keyword identifier rule. Kept for interchange only.
    #[serde(default)]
    pub word: Option<String>,
    /// External scanner tokens. Kept for interchange only; references to them
    /// do not resolve.
    #[serde(default)]
    pub externals: Vec<Rule>,
}

/// Combinator expression.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Rule {
    /// Matches the empty string.
    Blank,
    /// Literal terminal.
    String(String),
    /// Regex terminal.
    Pattern {
        value: String,
        #[serde(default)]
        flags: Option<String>,
    },
    /// Reference to another rule by name.
    Symbol(String),
    /// Members must match in order.
    Seq(Vec<Rule>),
    /// Ordered choice: the first member that matches wins.
    Choice(Vec<Rule>),
    /// Greedy repetition, `min..=max` occurrences (`max = None` is unbounded).
    Repeat {
        content: Box<Rule>,
        min: u32,
        max: Option<u32>,
    },
    /// Collapses a lexical sub-grammar into a single terminal.
    Token { content: Box<Rule>, immediate: bool },
    /// Renames the node (or leaf) produced by `content`.
    Alias {
        content: Box<Rule>,
        value: String,
        named: bool,
    },
    /// Named field. Transparent for parsing.
    Field { name: String, content: Box<Rule> },
}

impl Grammar {
    /// Empty grammar with no rules and no extras.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            start: None,
            rules: Vec::new(),
            extras: Vec::new(),
            inline: Vec::new(),
            supertypes: Vec::new(),
            word: None,
            externals: Vec::new(),
        }
    }

    /// Append a rule.
    pub fn with_rule(mut self, name: impl Into<String>, rule: Rule) -> Self {
        self.rules.push((name.into(), rule));
        self
    }

    /// Override the start rule (defaults to the first rule).
    pub fn with_start(mut self, name: impl Into<String>) -> Self {
        self.start = Some(name.into());
        self
    }

    pub fn with_extras(mut self, extras: impl IntoIterator<Item = Rule>) -> Self {
        self.extras = extras.into_iter().collect();
        self
    }

    pub fn with_inline<S: Into<String>>(mut self, names: impl IntoIterator<Item = S>) -> Self {
        self.inline = names.into_iter().map(Into::into).collect();
        self
    }

    /// Name of the start rule: the explicit one, or the first rule.
    pub fn start_rule(&self) -> Option<&str> {
        match &self.start {
            Some(name) => Some(name),
            None => self.rules.first().map(|(name, _)| name.as_str()),
        }
    }

    /// Look up a rule body by name.
    pub fn get(&self, name: &str) -> Option<&Rule> {
        self.rules
            .iter()
            .find(|(rule_name, _)| rule_name == name)
            .map(|(_, rule)| rule)
    }

    /// Whether the rule's children are spliced into its parent.
    ///
    /// True for `_`-prefixed names and for names listed in `inline` or
    /// `supertypes`.
    pub fn is_hidden(&self, name: &str) -> bool {
        name.starts_with('_')
            || self.inline.iter().any(|n| n == name)
            || self.supertypes.iter().any(|n| n == name)
    }
}

impl Rule {
    /// Strip transparent wrappers (`Field`).
    pub fn unwrap_transparent(&self) -> &Rule {
        let mut rule = self;
        while let Rule::Field { content, .. } = rule {
            rule = content;
        }
        rule
    }

    /// Whether the expression is a single terminal (after transparent wrappers).
    pub fn is_terminal(&self) -> bool {
        matches!(
            self.unwrap_transparent(),
            Rule::String(_) | Rule::Pattern { .. } | Rule::Token { .. }
        )
    }

    /// Direct sub-expressions, in order.
    pub fn children(&self) -> &[Rule] {
        match self {
            Rule::Seq(members) | Rule::Choice(members) => members,
            Rule::Repeat { content, .. }
            | Rule::Token { content, .. }
            | Rule::Alias { content, .. }
            | Rule::Field { content, .. } => std::slice::from_ref(&**content),
            Rule::Blank | Rule::String(_) | Rule::Pattern { .. } | Rule::Symbol(_) => &[],
        }
    }
}
