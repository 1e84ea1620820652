//! Structural translation of rules into ops.
//!
//! Kinds are assigned in a fixed order: `ERROR`, `SKIPPED`, one kind per rule
//! in definition order, then token and alias kinds in the order lowering
//! meets them. Identical terminals and kinds are interned once.

use indexmap::IndexMap;
use sprig_bytecode::{
    KindClass, KindId, KindInfo, Op, OpId, Program, RuleId, RuleInfo, Terminal, TerminalId,
};
use sprig_core::{Grammar, Rule};

use super::token;
use crate::analyze::Analysis;
use crate::error::GrammarError;

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
enum TerminalKey {
    Literal(String),
    Pattern(String, Option<String>),
}

pub(super) fn lower(
    grammar: &Grammar,
    analysis: &Analysis,
    sync: &[String],
) -> Result<Program, GrammarError> {
    let mut lowering = Lowering::new(grammar, analysis)?;

    for (i, (name, _)) in grammar.rules.iter().enumerate() {
        let class = if analysis.lexical[i] {
            KindClass::Token
        } else {
            KindClass::Node
        };
        let kind = lowering.intern_kind(name, true, class)?;
        lowering.rule_kinds.push(kind);
    }

    let mut rules = Vec::with_capacity(grammar.rules.len());
    for (i, (name, body)) in grammar.rules.iter().enumerate() {
        let kind = lowering.rule_kinds[i];
        let body_op = if analysis.lexical[i] {
            let (terminal, immediate) = lowering.terminal(name, body)?;
            lowering.push(Op::Token {
                terminal,
                kind,
                immediate,
            })
        } else {
            lowering.lower(name, body)?
        };
        rules.push(RuleInfo {
            name: name.clone(),
            kind,
            body: body_op,
            nullable: analysis.nullable[i],
            hidden: grammar.is_hidden(name),
            lexical: analysis.lexical[i],
        });
    }

    let mut extras = Vec::with_capacity(grammar.extras.len());
    for extra in &grammar.extras {
        let pair = match extra.unwrap_transparent() {
            Rule::Symbol(name) => lowering.lexical_rule(name)?,
            other => {
                let (terminal, _) = lowering.terminal("extras", other)?;
                (terminal, lowering.token_kind(other)?)
            }
        };
        lowering.kinds[pair.1.index()].trivia = true;
        extras.push(pair);
    }

    let mut sync_terminals = Vec::with_capacity(sync.len());
    for name in sync {
        let terminal = match analysis.rule_id(name) {
            Some(i) if analysis.lexical[i] => lowering.lexical_rule(name)?.0,
            _ => lowering.literal(name)?,
        };
        sync_terminals.push(terminal);
    }

    let mut hasher = crc32fast::Hasher::new();
    hasher.update(&grammar.to_binary());
    hasher.update(grammar.rules[analysis.start].0.as_bytes());

    Ok(Program {
        name: grammar.name.clone(),
        kinds: lowering.kinds,
        rules,
        ops: lowering.ops,
        terminals: lowering.terminals,
        extras,
        sync: sync_terminals,
        start: RuleId::from_index(analysis.start),
        fingerprint: hasher.finalize(),
    })
}

struct Lowering<'g> {
    grammar: &'g Grammar,
    analysis: &'g Analysis,
    ops: Vec<Op>,
    kinds: Vec<KindInfo>,
    kind_ids: IndexMap<(String, bool, KindClass), KindId>,
    terminals: Vec<Terminal>,
    terminal_ids: IndexMap<TerminalKey, TerminalId>,
    rule_kinds: Vec<KindId>,
}

impl<'g> Lowering<'g> {
    fn new(grammar: &'g Grammar, analysis: &'g Analysis) -> Result<Self, GrammarError> {
        let mut lowering = Self {
            grammar,
            analysis,
            ops: Vec::new(),
            kinds: Vec::new(),
            kind_ids: IndexMap::new(),
            terminals: Vec::new(),
            terminal_ids: IndexMap::new(),
            rule_kinds: Vec::new(),
        };
        let error = lowering.intern_kind("ERROR", true, KindClass::Error)?;
        let skipped = lowering.intern_kind("SKIPPED", true, KindClass::Skipped)?;
        debug_assert_eq!((error, skipped), (KindId::ERROR, KindId::SKIPPED));
        Ok(lowering)
    }

    fn push(&mut self, op: Op) -> OpId {
        self.ops.push(op);
        OpId::from_index(self.ops.len() - 1)
    }

    fn intern_kind(
        &mut self,
        name: &str,
        named: bool,
        class: KindClass,
    ) -> Result<KindId, GrammarError> {
        let key = (name.to_string(), named, class);
        if let Some(&id) = self.kind_ids.get(&key) {
            return Ok(id);
        }
        let id = KindId::try_from_index(self.kinds.len()).ok_or(GrammarError::TooLarge {
            table: "node kinds",
            limit: KindId::LIMIT,
        })?;
        self.kinds.push(KindInfo {
            name: name.to_string(),
            named,
            class,
            trivia: false,
        });
        self.kind_ids.insert(key, id);
        Ok(id)
    }

    fn literal(&mut self, value: &str) -> Result<TerminalId, GrammarError> {
        let key = TerminalKey::Literal(value.to_string());
        if let Some(&id) = self.terminal_ids.get(&key) {
            return Ok(id);
        }
        self.add_terminal(key, Terminal::literal(value))
    }

    fn pattern(
        &mut self,
        rule: &str,
        value: &str,
        flags: Option<&str>,
    ) -> Result<TerminalId, GrammarError> {
        let key = TerminalKey::Pattern(value.to_string(), flags.map(str::to_string));
        if let Some(&id) = self.terminal_ids.get(&key) {
            return Ok(id);
        }
        let terminal =
            Terminal::pattern(value, flags).map_err(|e| GrammarError::InvalidPattern {
                rule: rule.to_string(),
                pattern: value.to_string(),
                message: e.to_string(),
            })?;
        self.add_terminal(key, terminal)
    }

    fn add_terminal(
        &mut self,
        key: TerminalKey,
        terminal: Terminal,
    ) -> Result<TerminalId, GrammarError> {
        let id = TerminalId::try_from_index(self.terminals.len()).ok_or(GrammarError::TooLarge {
            table: "terminals",
            limit: TerminalId::LIMIT,
        })?;
        self.terminals.push(terminal);
        self.terminal_ids.insert(key, id);
        Ok(id)
    }

    /// Terminal matcher for a lexical expression, and whether it is immediate.
    fn terminal(&mut self, rule: &str, expr: &Rule) -> Result<(TerminalId, bool), GrammarError> {
        match expr.unwrap_transparent() {
            Rule::String(s) => Ok((self.literal(s)?, false)),
            Rule::Pattern { value, flags } => Ok((self.pattern(rule, value, flags.as_deref())?, false)),
            Rule::Token { content, immediate } => {
                let terminal = match content.unwrap_transparent() {
                    inner @ (Rule::String(_) | Rule::Pattern { .. }) => self.terminal(rule, inner)?.0,
                    inner => self.pattern(rule, &token::to_regex(inner), None)?,
                };
                Ok((terminal, *immediate))
            }
            other => unreachable!("not a lexical expression: {other:?}"),
        }
    }

    /// Kind of the leaf a lexical expression produces when not renamed.
    fn token_kind(&mut self, expr: &Rule) -> Result<KindId, GrammarError> {
        match expr.unwrap_transparent() {
            Rule::String(s) => self.intern_kind(s, false, KindClass::Token),
            Rule::Pattern { value, .. } => {
                self.intern_kind(&format!("/{value}/"), true, KindClass::Token)
            }
            Rule::Token { content, .. } => match content.unwrap_transparent() {
                inner @ (Rule::String(_) | Rule::Pattern { .. }) => self.token_kind(inner),
                inner => {
                    let regex = token::to_regex(inner);
                    self.intern_kind(&format!("/{regex}/"), true, KindClass::Token)
                }
            },
            other => unreachable!("not a lexical expression: {other:?}"),
        }
    }

    /// Terminal and kind of a lexical rule.
    fn lexical_rule(&mut self, name: &str) -> Result<(TerminalId, KindId), GrammarError> {
        let i = self.resolve(name);
        let (terminal, _) = self.terminal(name, &self.grammar.rules[i].1)?;
        Ok((terminal, self.rule_kinds[i]))
    }

    fn resolve(&self, name: &str) -> usize {
        self.analysis
            .rule_id(name)
            .expect("references are resolved during analysis")
    }

    fn lower(&mut self, rule: &str, expr: &Rule) -> Result<OpId, GrammarError> {
        let op = match expr {
            Rule::Blank => Op::Blank,
            Rule::String(_) | Rule::Pattern { .. } | Rule::Token { .. } => {
                let (terminal, immediate) = self.terminal(rule, expr)?;
                let kind = self.token_kind(expr)?;
                Op::Token {
                    terminal,
                    kind,
                    immediate,
                }
            }
            Rule::Symbol(name) => return self.reference(name, None),
            Rule::Seq(members) => Op::Seq(self.lower_all(rule, members)?),
            Rule::Choice(members) => Op::Choice(self.lower_all(rule, members)?),
            Rule::Repeat { content, min, max } => Op::Repeat {
                body: self.lower(rule, content)?,
                min: *min,
                max: *max,
            },
            Rule::Field { content, .. } => return self.lower(rule, content),
            Rule::Alias {
                content,
                value,
                named,
            } => return self.alias(rule, content, value, *named),
        };
        Ok(self.push(op))
    }

    fn lower_all(&mut self, rule: &str, members: &[Rule]) -> Result<Vec<OpId>, GrammarError> {
        members.iter().map(|m| self.lower(rule, m)).collect()
    }

    fn reference(&mut self, name: &str, alias: Option<(&str, bool)>) -> Result<OpId, GrammarError> {
        let i = self.resolve(name);
        let op = if self.analysis.lexical[i] {
            let (terminal, _) = self.lexical_rule(name)?;
            let immediate = matches!(
                self.grammar.rules[i].1.unwrap_transparent(),
                Rule::Token { immediate: true, .. }
            );
            let kind = match alias {
                Some((value, named)) => self.intern_kind(value, named, KindClass::Token)?,
                None => self.rule_kinds[i],
            };
            Op::Token {
                terminal,
                kind,
                immediate,
            }
        } else {
            let alias = match alias {
                Some((value, named)) => Some(self.intern_kind(value, named, KindClass::Node)?),
                None => None,
            };
            Op::Call {
                rule: RuleId::from_index(i),
                alias,
            }
        };
        Ok(self.push(op))
    }

    fn alias(
        &mut self,
        rule: &str,
        content: &Rule,
        value: &str,
        named: bool,
    ) -> Result<OpId, GrammarError> {
        match content.unwrap_transparent() {
            Rule::Symbol(name) => self.reference(name, Some((value, named))),
            inner if inner.is_terminal() => {
                let (terminal, immediate) = self.terminal(rule, inner)?;
                let kind = self.intern_kind(value, named, KindClass::Token)?;
                Ok(self.push(Op::Token {
                    terminal,
                    kind,
                    immediate,
                }))
            }
            inner => {
                let body = self.lower(rule, inner)?;
                let kind = self.intern_kind(value, named, KindClass::Node)?;
                Ok(self.push(Op::Wrap { body, kind }))
            }
        }
    }
}
