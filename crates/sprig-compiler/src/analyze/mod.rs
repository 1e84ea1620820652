//! Validation passes over the rule graph.
//!
//! Passes run in order and stop at the first error:
//! 1. `symbols` - rule table, start rule, reference resolution, token contents
//! 2. `nullable` - which rules can match empty input (fixed point)
//! 3. `recursion` - left recursion, then recursion without an escape path
//! 4. `lints` - warnings: unreachable rules, nullable repeats, shadowed branches

mod lints;
mod nullable;
mod pattern;
mod recursion;
mod symbols;

#[cfg(test)]
mod recursion_tests;

use indexmap::IndexMap;
use sprig_core::{Grammar, Rule};

use crate::error::{GrammarError, GrammarWarning};

/// Facts about a valid grammar, indexed like `Grammar::rules`.
#[derive(Clone, Debug)]
pub struct Analysis {
    /// Index of the start rule.
    pub start: usize,
    /// Rule name to index.
    pub rule_index: IndexMap<String, usize>,
    pub nullable: Vec<bool>,
    /// Rules whose body is a single terminal. Such rules produce a leaf, not a
    /// node. The start rule is never lexical.
    pub lexical: Vec<bool>,
    pub reachable: Vec<bool>,
    pub warnings: Vec<GrammarWarning>,
}

impl Analysis {
    pub fn rule_id(&self, name: &str) -> Option<usize> {
        self.rule_index.get(name).copied()
    }

    /// Whether an expression can match empty input.
    pub fn expr_nullable(&self, expr: &Rule) -> bool {
        nullable::expr_nullable(expr, &self.rule_index, &self.nullable)
    }
}

/// Validate a grammar using its own start rule.
pub fn validate(grammar: &Grammar) -> Result<Analysis, GrammarError> {
    let start = grammar.start_rule().ok_or(GrammarError::EmptyGrammar)?;
    analyze(grammar, start)
}

/// Validate a grammar with an explicit start rule.
pub fn analyze(grammar: &Grammar, start: &str) -> Result<Analysis, GrammarError> {
    let rule_index = symbols::build_index(grammar)?;
    let start = *rule_index
        .get(start)
        .ok_or_else(|| GrammarError::MissingStartRule(start.to_string()))?;
    symbols::resolve(grammar, &rule_index)?;

    let nullable = nullable::compute(grammar, &rule_index);

    recursion::check_left_recursion(grammar, &rule_index, &nullable)?;
    recursion::check_escape(grammar, &rule_index)?;

    let lexical = grammar
        .rules
        .iter()
        .enumerate()
        .map(|(i, (_, body))| i != start && body.is_terminal())
        .collect();

    let reachable = lints::reachable(grammar, &rule_index, start);
    let mut warnings = Vec::new();
    lints::unreachable_rules(grammar, &reachable, &mut warnings);
    lints::nullable_repeats(grammar, &rule_index, &nullable, &mut warnings);
    lints::shadowed_alternatives(grammar, &rule_index, &nullable, &mut warnings);

    Ok(Analysis {
        start,
        rule_index,
        nullable,
        lexical,
        reachable,
        warnings,
    })
}
