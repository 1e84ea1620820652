//! Tracing infrastructure for debugging parses.
//!
//! The tracer is a zero-cost abstraction: with `NoopTracer` every hook is an
//! empty `#[inline(always)]` function and the calls disappear. The engine
//! passes raw ids and offsets; names and text are resolved by the tracer.
//!
//! Tracing-only state (the call depth used for indentation) lives in the
//! tracer, never in the engine.

use std::collections::BTreeSet;
use std::ops::Range;

use sprig_bytecode::{KindId, Program, RuleId};
use sprig_core::Colors;

use super::error::Halt;

/// Verbosity level for trace output.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Verbosity {
    /// Rounds, rule calls and returns, recoveries, halts.
    #[default]
    Default,
    /// (-v): also token attempts and memo hits.
    Verbose,
    /// (-vv): also matched text and backtracking.
    VeryVerbose,
}

/// Hooks called by the engine while it parses.
///
/// - `trace_round` - at the start of each parse round
/// - `trace_call` / `trace_return` - around each evaluated rule call
/// - `trace_memo_hit` - when a rule call is answered from the memo table
/// - `trace_token` - after a terminal match attempt
/// - `trace_backtrack` - when a choice abandons an alternative
/// - `trace_recover` - when recovery emits an `ERROR` node
/// - `trace_halt` - when a limit or cancellation stops the parse
pub trait Tracer {
    fn trace_round(&mut self, round: u32, error_points: &BTreeSet<usize>);

    fn trace_call(&mut self, rule: RuleId, pos: usize);

    /// `end` is `None` when the call failed.
    fn trace_return(&mut self, rule: RuleId, end: Option<usize>);

    fn trace_memo_hit(&mut self, rule: RuleId, pos: usize, end: Option<usize>);

    /// `len` is `None` when the terminal did not match.
    fn trace_token(&mut self, kind: KindId, pos: usize, len: Option<usize>);

    fn trace_backtrack(&mut self, pos: usize);

    fn trace_recover(&mut self, range: Range<usize>);

    fn trace_halt(&mut self, halt: Halt);
}

/// No-op tracer that gets optimized away completely.
pub struct NoopTracer;

impl Tracer for NoopTracer {
    #[inline(always)]
    fn trace_round(&mut self, _round: u32, _error_points: &BTreeSet<usize>) {}

    #[inline(always)]
    fn trace_call(&mut self, _rule: RuleId, _pos: usize) {}

    #[inline(always)]
    fn trace_return(&mut self, _rule: RuleId, _end: Option<usize>) {}

    #[inline(always)]
    fn trace_memo_hit(&mut self, _rule: RuleId, _pos: usize, _end: Option<usize>) {}

    #[inline(always)]
    fn trace_token(&mut self, _kind: KindId, _pos: usize, _len: Option<usize>) {}

    #[inline(always)]
    fn trace_backtrack(&mut self, _pos: usize) {}

    #[inline(always)]
    fn trace_recover(&mut self, _range: Range<usize>) {}

    #[inline(always)]
    fn trace_halt(&mut self, _halt: Halt) {}
}

/// Tracer that collects an indented execution log.
///
/// ```text
/// round 1
/// > source_file @0
///   > variable_definition @0
///   < variable_definition @14
/// < source_file @14
/// ```
pub struct PrintTracer<'s> {
    source: &'s str,
    program: &'s Program,
    verbosity: Verbosity,
    lines: Vec<String>,
    depth: usize,
    colors: Colors,
}

impl<'s> PrintTracer<'s> {
    pub fn new(source: &'s str, program: &'s Program, verbosity: Verbosity, colors: Colors) -> Self {
        Self {
            source,
            program,
            verbosity,
            lines: Vec::new(),
            depth: 0,
            colors,
        }
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// All lines joined, each terminated by a newline.
    pub fn render(&self) -> String {
        let mut out = String::new();
        for line in &self.lines {
            out.push_str(line);
            out.push('\n');
        }
        out
    }

    /// Print all trace lines.
    pub fn print(&self) {
        for line in &self.lines {
            println!("{}", line);
        }
    }

    fn push(&mut self, content: String) {
        let indent = "  ".repeat(self.depth);
        self.lines.push(format!("{indent}{content}"));
    }

    fn rule_name(&self, rule: RuleId) -> String {
        let c = self.colors;
        format!("{}{}{}", c.blue, self.program.rule(rule).name, c.reset)
    }

    fn kind_label(&self, kind: KindId) -> String {
        let c = self.colors;
        let color = if self.program.kind(kind).named {
            c.blue
        } else {
            c.green
        };
        format!("{color}{}{}", self.program.kind_label(kind), c.reset)
    }

    fn pos(&self, pos: usize) -> String {
        let c = self.colors;
        format!("{}@{pos}{}", c.dim, c.reset)
    }
}

impl Tracer for PrintTracer<'_> {
    fn trace_round(&mut self, round: u32, error_points: &BTreeSet<usize>) {
        if !self.lines.is_empty() {
            self.lines.push(String::new());
        }
        self.depth = 0;
        if error_points.is_empty() {
            self.lines.push(format!("round {round}"));
        } else {
            let points: Vec<_> = error_points.iter().map(usize::to_string).collect();
            self.lines
                .push(format!("round {round} (error points: {})", points.join(", ")));
        }
    }

    fn trace_call(&mut self, rule: RuleId, pos: usize) {
        let content = format!("> {} {}", self.rule_name(rule), self.pos(pos));
        self.push(content);
        self.depth += 1;
    }

    fn trace_return(&mut self, rule: RuleId, end: Option<usize>) {
        self.depth = self.depth.saturating_sub(1);
        let content = match end {
            Some(end) => format!("< {} {}", self.rule_name(rule), self.pos(end)),
            None => {
                let c = self.colors;
                format!("{}x{} {}", c.red, c.reset, self.rule_name(rule))
            }
        };
        self.push(content);
    }

    fn trace_memo_hit(&mut self, rule: RuleId, pos: usize, end: Option<usize>) {
        if self.verbosity == Verbosity::Default {
            return;
        }
        let result = match end {
            Some(end) => format!("-> {}", self.pos(end)),
            None => "fail".to_string(),
        };
        let content = format!("= {} {} {result}", self.rule_name(rule), self.pos(pos));
        self.push(content);
    }

    fn trace_token(&mut self, kind: KindId, pos: usize, len: Option<usize>) {
        if self.verbosity == Verbosity::Default {
            return;
        }
        let c = self.colors;
        let content = match len {
            Some(len) if self.verbosity == Verbosity::VeryVerbose => {
                let text = &self.source[pos..pos + len];
                format!("  {} {} {text:?}", self.kind_label(kind), self.pos(pos))
            }
            Some(_) => format!("  {} {}", self.kind_label(kind), self.pos(pos)),
            None => format!("{}!{} {} {}", c.red, c.reset, self.kind_label(kind), self.pos(pos)),
        };
        self.push(content);
    }

    fn trace_backtrack(&mut self, pos: usize) {
        if self.verbosity != Verbosity::VeryVerbose {
            return;
        }
        let content = format!("~ {}", self.pos(pos));
        self.push(content);
    }

    fn trace_recover(&mut self, range: Range<usize>) {
        let c = self.colors;
        let content = format!("{}ERROR{} {}{}..{}{}", c.red, c.reset, c.dim, range.start, range.end, c.reset);
        self.push(content);
    }

    fn trace_halt(&mut self, halt: Halt) {
        let c = self.colors;
        self.lines.push(format!("{}halt:{} {halt}", c.red, c.reset));
    }
}
