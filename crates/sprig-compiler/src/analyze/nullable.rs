//! Nullability: which rules can match the empty string.
//!
//! Computed as a least fixed point: every rule starts non-nullable and flips
//! once its body is nullable under the current assignment.

use indexmap::IndexMap;
use sprig_core::{Grammar, Rule};

use super::pattern;

pub(super) fn compute(grammar: &Grammar, index: &IndexMap<String, usize>) -> Vec<bool> {
    let mut nullable = vec![false; grammar.rules.len()];
    loop {
        let mut changed = false;
        for (i, (_, body)) in grammar.rules.iter().enumerate() {
            if !nullable[i] && expr_nullable(body, index, &nullable) {
                nullable[i] = true;
                changed = true;
            }
        }
        if !changed {
            return nullable;
        }
    }
}

pub(super) fn expr_nullable(expr: &Rule, index: &IndexMap<String, usize>, nullable: &[bool]) -> bool {
    match expr {
        Rule::Blank => true,
        Rule::String(s) => s.is_empty(),
        Rule::Pattern { value, flags } => pattern::is_nullable(value, flags.as_deref()),
        Rule::Symbol(name) => index.get(name).is_some_and(|&i| nullable[i]),
        Rule::Seq(members) => members.iter().all(|m| expr_nullable(m, index, nullable)),
        Rule::Choice(members) => members.iter().any(|m| expr_nullable(m, index, nullable)),
        Rule::Repeat { content, min, .. } => *min == 0 || expr_nullable(content, index, nullable),
        Rule::Token { content, .. } | Rule::Alias { content, .. } | Rule::Field { content, .. } => {
            expr_nullable(content, index, nullable)
        }
    }
}
