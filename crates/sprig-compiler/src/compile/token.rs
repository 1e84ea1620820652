//! `token(...)` contents to a single regex.

use sprig_core::Rule;

/// Translate a lexical expression into regex syntax.
///
/// Analysis guarantees token contents contain no rule references.
pub(super) fn to_regex(expr: &Rule) -> String {
    match expr {
        Rule::Blank => String::new(),
        Rule::String(s) => regex_syntax::escape(s),
        Rule::Pattern { value, flags } => {
            let inline: String = flags
                .as_deref()
                .unwrap_or_default()
                .chars()
                .filter(|c| matches!(c, 'i' | 's' | 'm'))
                .collect();
            if inline.is_empty() {
                format!("(?:{value})")
            } else {
                format!("(?{inline}:{value})")
            }
        }
        Rule::Seq(members) => members
            .iter()
            .map(|m| match m {
                // Already a group.
                Rule::Choice(_) => to_regex(m),
                _ => group(&to_regex(m)),
            })
            .collect(),
        Rule::Choice(members) => {
            let branches: Vec<_> = members.iter().map(to_regex).collect();
            group(&branches.join("|"))
        }
        Rule::Repeat { content, min, max } => {
            let inner = group(&to_regex(content));
            match (min, max) {
                (0, None) => format!("{inner}*"),
                (1, None) => format!("{inner}+"),
                (0, Some(1)) => format!("{inner}?"),
                (min, None) => format!("{inner}{{{min},}}"),
                (min, Some(max)) => format!("{inner}{{{min},{max}}}"),
            }
        }
        Rule::Token { content, .. } | Rule::Alias { content, .. } | Rule::Field { content, .. } => {
            to_regex(content)
        }
        Rule::Symbol(name) => unreachable!("reference to `{name}` inside a token"),
    }
}

fn group(regex: &str) -> String {
    format!("(?:{regex})")
}
