//! Rule table construction and reference resolution.

use indexmap::IndexMap;
use sprig_core::{Grammar, Rule};

use super::pattern;
use crate::error::GrammarError;

/// Name used in errors about `extras` entries.
const EXTRAS: &str = "extras";

pub(super) fn build_index(grammar: &Grammar) -> Result<IndexMap<String, usize>, GrammarError> {
    if grammar.rules.is_empty() {
        return Err(GrammarError::EmptyGrammar);
    }

    let mut index = IndexMap::with_capacity(grammar.rules.len());
    for (i, (name, _)) in grammar.rules.iter().enumerate() {
        if index.insert(name.clone(), i).is_some() {
            return Err(GrammarError::DuplicateRule(name.clone()));
        }
    }
    Ok(index)
}

/// Check every reference, pattern and token body, then the extras.
pub(super) fn resolve(
    grammar: &Grammar,
    index: &IndexMap<String, usize>,
) -> Result<(), GrammarError> {
    for (name, body) in &grammar.rules {
        check_expr(name, body, index, false)?;
    }

    for (i, extra) in grammar.extras.iter().enumerate() {
        check_expr(EXTRAS, extra, index, false)?;
        let lexical = match extra.unwrap_transparent() {
            Rule::String(_) | Rule::Pattern { .. } | Rule::Token { .. } => true,
            Rule::Symbol(name) => grammar.get(name).is_some_and(Rule::is_terminal),
            _ => false,
        };
        if !lexical {
            return Err(GrammarError::UnsupportedExtra { index: i });
        }
    }
    Ok(())
}

fn check_expr(
    rule: &str,
    expr: &Rule,
    index: &IndexMap<String, usize>,
    in_token: bool,
) -> Result<(), GrammarError> {
    match expr {
        Rule::Symbol(name) => {
            if !index.contains_key(name) {
                return Err(GrammarError::UndefinedRule {
                    rule: rule.to_string(),
                    name: name.clone(),
                });
            }
            if in_token {
                return Err(GrammarError::SymbolInToken {
                    rule: rule.to_string(),
                    name: name.clone(),
                });
            }
            Ok(())
        }
        Rule::Pattern { value, flags } => pattern::parse(value, flags.as_deref())
            .map(|_| ())
            .map_err(|message| GrammarError::InvalidPattern {
                rule: rule.to_string(),
                pattern: value.clone(),
                message,
            }),
        Rule::Token { content, .. } => check_expr(rule, content, index, true),
        _ => expr
            .children()
            .iter()
            .try_for_each(|child| check_expr(rule, child, index, in_token)),
    }
}
