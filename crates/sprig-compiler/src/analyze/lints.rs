//! Non-fatal grammar lints.

use indexmap::IndexMap;
use sprig_core::{Grammar, Rule};

use super::nullable::expr_nullable;
use crate::error::GrammarWarning;

/// Rules reachable from the start rule or from an extra.
pub(super) fn reachable(
    grammar: &Grammar,
    index: &IndexMap<String, usize>,
    start: usize,
) -> Vec<bool> {
    let mut seen = vec![false; grammar.rules.len()];
    let mut queue = vec![start];
    for extra in &grammar.extras {
        push_refs(extra, index, &mut queue);
    }

    while let Some(i) = queue.pop() {
        if std::mem::replace(&mut seen[i], true) {
            continue;
        }
        push_refs(&grammar.rules[i].1, index, &mut queue);
    }
    seen
}

fn push_refs(expr: &Rule, index: &IndexMap<String, usize>, out: &mut Vec<usize>) {
    if let Rule::Symbol(name) = expr {
        out.extend(index.get(name).copied());
    }
    for child in expr.children() {
        push_refs(child, index, out);
    }
}

pub(super) fn unreachable_rules(
    grammar: &Grammar,
    reachable: &[bool],
    warnings: &mut Vec<GrammarWarning>,
) {
    for (i, (name, _)) in grammar.rules.iter().enumerate() {
        if !reachable[i] {
            warnings.push(GrammarWarning::UnreachableRule(name.clone()));
        }
    }
}

/// Repetitions whose body can match empty input. The engine ends such loops
/// after the first empty iteration, so the repetition is likely a mistake.
pub(super) fn nullable_repeats(
    grammar: &Grammar,
    index: &IndexMap<String, usize>,
    nullable: &[bool],
    warnings: &mut Vec<GrammarWarning>,
) {
    for (name, body) in &grammar.rules {
        if has_nullable_repeat(body, index, nullable) {
            warnings.push(GrammarWarning::NullableRepeat { rule: name.clone() });
        }
    }
}

fn has_nullable_repeat(expr: &Rule, index: &IndexMap<String, usize>, nullable: &[bool]) -> bool {
    if let Rule::Repeat { content, .. } = expr
        && expr_nullable(content, index, nullable)
    {
        return true;
    }
    // Token contents compile to one regex, where `*` over `a?` is harmless.
    if matches!(expr, Rule::Token { .. }) {
        return false;
    }
    expr.children()
        .iter()
        .any(|child| has_nullable_repeat(child, index, nullable))
}

/// Choice branches that can never be taken: everything after a nullable
/// branch, and literals that start with an earlier literal branch.
pub(super) fn shadowed_alternatives(
    grammar: &Grammar,
    index: &IndexMap<String, usize>,
    nullable: &[bool],
    warnings: &mut Vec<GrammarWarning>,
) {
    for (name, body) in &grammar.rules {
        visit_choices(body, &mut |members| {
            for (shadowed, by) in shadowed_in(members, index, nullable) {
                warnings.push(GrammarWarning::ShadowedAlternative {
                    rule: name.clone(),
                    shadowed,
                    by,
                });
            }
        });
    }
}

fn visit_choices(expr: &Rule, f: &mut dyn FnMut(&[Rule])) {
    if matches!(expr, Rule::Token { .. }) {
        return;
    }
    if let Rule::Choice(members) = expr {
        f(members);
    }
    for child in expr.children() {
        visit_choices(child, f);
    }
}

fn shadowed_in(
    members: &[Rule],
    index: &IndexMap<String, usize>,
    nullable: &[bool],
) -> Vec<(usize, usize)> {
    let mut found = Vec::new();
    let first_nullable = members
        .iter()
        .position(|m| expr_nullable(m, index, nullable));

    for (k, member) in members.iter().enumerate() {
        // `optional(x)` is `choice(x, blank)`; a trailing blank is idiomatic.
        if matches!(member, Rule::Blank) {
            continue;
        }
        if let Some(j) = first_nullable
            && j < k
        {
            found.push((k, j));
            continue;
        }
        let Rule::String(text) = member.unwrap_transparent() else {
            continue;
        };
        let prefix = members[..k].iter().position(|earlier| {
            matches!(earlier.unwrap_transparent(), Rule::String(p) if text.starts_with(p.as_str()))
        });
        if let Some(j) = prefix {
            found.push((k, j));
        }
    }
    found
}
