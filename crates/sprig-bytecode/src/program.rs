//! The compiled program.

use super::ids::{KindId, OpId, RuleId, TerminalId};
use super::terminal::Terminal;

/// What a kind is used for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum KindClass {
    /// `ERROR` node.
    Error,
    /// Raw text inside an `ERROR` node.
    Skipped,
    /// Interior node: a visible rule or an alias of a non-terminal expression.
    Node,
    /// Leaf: a literal, a pattern, or a lexical rule.
    Token,
}

#[derive(Clone, Debug)]
pub struct KindInfo {
    pub name: String,
    /// Named kinds print bare (`identifier`), anonymous ones quoted (`"let"`).
    pub named: bool,
    pub class: KindClass,
    /// Produced by extras; hoisted out of node boundaries and hidden by the
    /// tree printer unless trivia is requested.
    pub trivia: bool,
}

#[derive(Clone, Debug)]
pub struct RuleInfo {
    pub name: String,
    /// Kind of the node (or leaf, for lexical rules) this rule produces.
    pub kind: KindId,
    pub body: OpId,
    /// Can match the empty string.
    pub nullable: bool,
    /// Children are spliced into the parent instead of producing a node.
    pub hidden: bool,
    /// The body is a single terminal; calls compile to a token of `kind`.
    pub lexical: bool,
}

/// Executable combinator.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Op {
    /// Always succeeds, consumes nothing.
    Blank,
    /// Match a terminal and emit a leaf of `kind`. Non-immediate tokens skip
    /// extras first.
    Token {
        terminal: TerminalId,
        kind: KindId,
        immediate: bool,
    },
    /// Invoke a rule. `alias` renames the node the rule produces.
    Call { rule: RuleId, alias: Option<KindId> },
    /// Left to right; fails on the first failing member.
    Seq(Vec<OpId>),
    /// Ordered choice; commits to the first member that succeeds.
    Choice(Vec<OpId>),
    /// Greedy repetition, stops at failure, at `max`, or after an iteration
    /// that consumed nothing.
    Repeat {
        body: OpId,
        min: u32,
        max: Option<u32>,
    },
    /// Wrap the children produced by `body` in a node of `kind`.
    Wrap { body: OpId, kind: KindId },
}

/// Executable form of a grammar.
#[derive(Clone, Debug)]
pub struct Program {
    pub name: String,
    pub kinds: Vec<KindInfo>,
    pub rules: Vec<RuleInfo>,
    pub ops: Vec<Op>,
    pub terminals: Vec<Terminal>,
    /// Extras as (terminal, kind) pairs, tried in order.
    pub extras: Vec<(TerminalId, KindId)>,
    /// Terminals at which error recovery stops scanning.
    pub sync: Vec<TerminalId>,
    pub start: RuleId,
    /// Identity of the source grammar. Parse trees remember it so that
    /// incremental reparsing only reuses results from the same program.
    pub fingerprint: u32,
}

impl Program {
    #[inline]
    pub fn op(&self, id: OpId) -> &Op {
        &self.ops[id.index()]
    }

    #[inline]
    pub fn rule(&self, id: RuleId) -> &RuleInfo {
        &self.rules[id.index()]
    }

    #[inline]
    pub fn terminal(&self, id: TerminalId) -> &Terminal {
        &self.terminals[id.index()]
    }

    #[inline]
    pub fn kind(&self, id: KindId) -> &KindInfo {
        &self.kinds[id.index()]
    }

    pub fn kind_name(&self, id: KindId) -> &str {
        self.kinds.get(id.index()).map_or("?", |k| k.name.as_str())
    }

    /// `identifier` for named kinds, `"let"` for anonymous ones.
    pub fn kind_label(&self, id: KindId) -> String {
        match self.kinds.get(id.index()) {
            Some(k) if k.named => k.name.clone(),
            Some(k) => format!("{:?}", k.name),
            None => "?".to_string(),
        }
    }

    pub fn is_trivia(&self, id: KindId) -> bool {
        self.kinds.get(id.index()).is_some_and(|k| k.trivia)
    }

    pub fn rule_by_name(&self, name: &str) -> Option<RuleId> {
        self.rules
            .iter()
            .position(|r| r.name == name)
            .map(RuleId::from_index)
    }

    pub fn start_rule(&self) -> &RuleInfo {
        self.rule(self.start)
    }
}
