//! Recursive-descent evaluation of a program's ops.
//!
//! The parser builds the green tree bottom-up on a flat stack of children.
//! A [`Mark`] (position, stack length, error count) is taken before anything
//! that can fail; failing restores it. Closing a node drains its children off
//! the stack and pushes the node in their place.
//!
//! Every op restores the state it was entered with when it fails, so a
//! choice can try the next alternative from the same point.

use std::collections::BTreeSet;

use rowan::{GreenNode, GreenToken, NodeOrToken, TextRange};
use sprig_bytecode::{KindId, Op, OpId, Program, RuleId, TerminalId};

use super::error::{Halt, SyntaxError, SyntaxErrorKind};
use super::memo::{Far, Green, MemoEntry, MemoTable, Source, Success, text_size};
use super::options::{MemoPolicy, ParseOptions};
use super::trace::Tracer;

#[derive(Clone, Copy, Debug)]
pub(super) struct Mark {
    pub pos: usize,
    pub children: usize,
    pub errors: usize,
}

/// What a finished parse hands back to the engine.
pub(super) struct Outcome {
    pub green: GreenNode,
    pub errors: Vec<SyntaxError>,
    pub halted: Option<Halt>,
    pub memo: MemoTable,
}

pub(super) struct Parser<'a, T: Tracer> {
    pub(super) program: &'a Program,
    pub(super) text: &'a str,
    options: ParseOptions,
    cancel: Option<&'a dyn Fn() -> bool>,
    pub(super) tracer: &'a mut T,

    pub(super) pos: usize,
    pub(super) children: Vec<Green>,
    pub(super) errors: Vec<SyntaxError>,

    /// Furthest failure of the current attempt.
    pub(super) far: Option<Far>,
    /// Furthest failure away from the armed error points. Picks the next
    /// round's error point.
    pub(super) frontier: Option<usize>,
    /// Exclusive end of the text looked at so far.
    pub(super) examined: usize,

    /// Recovery is armed at `error_points`.
    pub(super) recovering: bool,
    pub(super) error_points: BTreeSet<usize>,
    memo: MemoTable,

    fuel: Option<u32>,
    /// Nesting of `eval` calls.
    depth: u32,
    pub(super) halted: Option<Halt>,
}

impl<'a, T: Tracer> Parser<'a, T> {
    pub(super) fn new(
        program: &'a Program,
        text: &'a str,
        options: ParseOptions,
        cancel: Option<&'a dyn Fn() -> bool>,
        tracer: &'a mut T,
        memo: MemoTable,
    ) -> Self {
        Self {
            program,
            text,
            options,
            cancel,
            tracer,
            pos: 0,
            children: Vec::new(),
            errors: Vec::new(),
            far: None,
            frontier: None,
            examined: 0,
            recovering: false,
            error_points: BTreeSet::new(),
            memo,
            fuel: options.exec_fuel,
            depth: 0,
            halted: None,
        }
    }

    /// Parse rounds until the input is consumed, recovery stops making
    /// progress, or the round limit is hit. Then close the root.
    ///
    /// Every round arms a new error point in `0..=len`, so the loop ends
    /// even without a round limit.
    pub(super) fn run(mut self) -> Outcome {
        let mut round = 0;
        let ok = loop {
            round += 1;
            self.tracer.trace_round(round, &self.error_points);
            let ok = self.parse_root();

            let complete = ok && self.pos == self.text.len();
            let out_of_rounds = self
                .options
                .max_recovery_rounds
                .is_some_and(|max| round >= max);
            if complete || self.halted.is_some() || out_of_rounds {
                break ok;
            }

            let mut point = self.frontier.unwrap_or(0);
            if ok {
                point = point.max(self.pos);
            }
            if !self.error_points.insert(point) {
                break ok;
            }
            self.recovering = true;
            self.memo.clear_recovering();
        };
        self.finish(ok)
    }

    fn parse_root(&mut self) -> bool {
        self.pos = 0;
        self.children.clear();
        self.errors.clear();
        self.far = None;
        self.frontier = None;
        self.examined = 0;
        self.depth = 0;

        let ok = self.call_body(self.program.start);
        if ok {
            self.skip_extras();
        }
        ok
    }

    /// Close the root node, covering whatever the start rule left over with a
    /// final `ERROR` node.
    fn finish(mut self, ok: bool) -> Outcome {
        let len = self.text.len();
        if !ok {
            self.children.clear();
            self.errors.clear();
            self.pos = 0;
        }
        if !ok || self.pos < len {
            let start = self.pos;
            let expected = match &self.far {
                Some(far) if far.pos == start && self.halted.is_none() => far.expected.clone(),
                _ => Vec::new(),
            };
            self.emit_error(start, len, &expected);
            self.pos = len;
        }

        let kind = self.program.start_rule().kind;
        let children = std::mem::take(&mut self.children);
        let green = GreenNode::new(raw(kind), children);

        let mut errors = self.errors;
        errors.sort_by_key(|e| e.range.start());

        Outcome {
            green,
            errors,
            halted: self.halted,
            memo: self.memo,
        }
    }

    pub(super) fn mark(&self) -> Mark {
        Mark {
            pos: self.pos,
            children: self.children.len(),
            errors: self.errors.len(),
        }
    }

    pub(super) fn reset(&mut self, mark: Mark) {
        self.pos = mark.pos;
        self.children.truncate(mark.children);
        self.errors.truncate(mark.errors);
    }

    /// Spend one unit of fuel. False once the parse has halted.
    pub(super) fn tick(&mut self) -> bool {
        if self.halted.is_some() {
            return false;
        }
        if self.fuel == Some(0) {
            self.halt(Halt::ExecFuelExhausted);
            return false;
        }
        if let Some(remaining) = &mut self.fuel {
            *remaining -= 1;
        }
        true
    }

    fn halt(&mut self, halt: Halt) {
        if self.halted.is_none() {
            self.halted = Some(halt);
            self.tracer.trace_halt(halt);
        }
    }

    /// Evaluate one op. After a halt every op succeeds without consuming, so
    /// the open nodes close around what was parsed.
    pub(super) fn eval(&mut self, id: OpId) -> bool {
        if !self.tick() {
            return true;
        }
        if self.depth >= self.options.recursion_limit {
            self.halt(Halt::RecursionLimitExceeded);
            return true;
        }
        self.depth += 1;
        let ok = self.step(id);
        self.depth -= 1;
        ok
    }

    fn step(&mut self, id: OpId) -> bool {
        let program = self.program;
        match program.op(id) {
            Op::Blank => true,
            Op::Token {
                terminal,
                kind,
                immediate,
            } => self.token(*terminal, *kind, *immediate),
            Op::Call { rule, alias } => self.call(*rule, *alias),
            Op::Seq(members) => self.seq(members),
            Op::Choice(members) => self.choice(members),
            Op::Repeat { body, min, max } => self.repeat(*body, *min, *max),
            Op::Wrap { body, kind } => {
                let start = self.mark();
                if !self.eval(*body) {
                    return false;
                }
                self.close_node(start.children, *kind);
                true
            }
        }
    }

    fn token(&mut self, terminal: TerminalId, kind: KindId, immediate: bool) -> bool {
        let start = self.mark();
        if !immediate {
            self.skip_extras();
        }
        let pos = self.pos;
        match self.match_terminal(terminal, pos) {
            Some(len) => {
                self.tracer.trace_token(kind, pos, Some(len));
                if len > 0 {
                    self.push_token(kind, pos, pos + len);
                    self.pos = pos + len;
                }
                true
            }
            None => {
                self.tracer.trace_token(kind, pos, None);
                self.expect(pos, kind);
                self.reset(start);
                false
            }
        }
    }

    /// Length of the match at `pos`. Matches must end on a char boundary.
    pub(super) fn match_terminal(&mut self, terminal: TerminalId, pos: usize) -> Option<usize> {
        let m = self.program.terminal(terminal).match_at(self.text, pos);
        self.examined = self.examined.max(m.examined);
        m.len.filter(|len| self.text.is_char_boundary(pos + len))
    }

    /// Consume extras at the cursor as trivia leaves. Adjacent matches of the
    /// same extra merge into one leaf.
    pub(super) fn skip_extras(&mut self) {
        let program = self.program;
        let mut run: Option<(KindId, usize)> = None;
        'scan: loop {
            for &(terminal, kind) in &program.extras {
                let Some(len) = self.match_terminal(terminal, self.pos) else {
                    continue;
                };
                if len == 0 {
                    continue;
                }
                match run {
                    Some((current, _)) if current == kind => {}
                    Some((current, from)) => {
                        self.push_token(current, from, self.pos);
                        run = Some((kind, self.pos));
                    }
                    None => run = Some((kind, self.pos)),
                }
                self.pos += len;
                continue 'scan;
            }
            break;
        }
        if let Some((kind, from)) = run {
            self.push_token(kind, from, self.pos);
        }
    }

    /// Where the cursor would be after skipping extras from `pos`.
    pub(super) fn extras_end(&mut self, pos: usize) -> usize {
        let mark = self.mark();
        self.pos = pos;
        self.skip_extras();
        let end = self.pos;
        self.reset(mark);
        end
    }

    fn push_token(&mut self, kind: KindId, start: usize, end: usize) {
        let token = GreenToken::new(raw(kind), &self.text[start..end]);
        self.children.push(NodeOrToken::Token(token));
    }

    /// Record a failed terminal attempt.
    fn expect(&mut self, pos: usize, kind: KindId) {
        match &mut self.far {
            Some(far) if far.pos > pos => {}
            Some(far) if far.pos == pos => {
                if !far.expected.contains(&kind) {
                    far.expected.push(kind);
                }
            }
            _ => {
                self.far = Some(Far {
                    pos,
                    expected: vec![kind],
                })
            }
        }
        if !self.error_points.contains(&pos) {
            self.frontier = Some(self.frontier.map_or(pos, |f| f.max(pos)));
        }
    }

    fn call(&mut self, rule: RuleId, alias: Option<KindId>) -> bool {
        let start = self.mark();
        if !self.call_body(rule) {
            return false;
        }
        if self.halted.is_some() && self.children.len() == start.children {
            return true;
        }
        let info = self.program.rule(rule);
        if info.hidden && alias.is_none() {
            return true;
        }
        self.close_node(start.children, alias.unwrap_or(info.kind));
        true
    }

    /// Evaluate a rule's body, pushing its children unwrapped. Results are
    /// memoized per (rule, position, mode).
    fn call_body(&mut self, rule: RuleId) -> bool {
        if self.halted.is_some() {
            return true;
        }
        if let Some(cancelled) = self.cancel
            && cancelled()
        {
            self.halt(Halt::Cancelled);
            return true;
        }

        let pos = self.pos;
        if self.options.memo == MemoPolicy::Rules
            && let Some((entry, source)) =
                self.memo
                    .get((rule, pos), self.recovering, &self.error_points)
        {
            let entry = entry.clone();
            self.tracer.trace_memo_hit(rule, pos, entry.end());
            return self.replay(entry, source);
        }

        self.tracer.trace_call(rule, pos);
        let outer_far = self.far.take();
        let outer_frontier = self.frontier.take();
        let outer_examined = std::mem::replace(&mut self.examined, pos);
        let start = self.mark();

        let ok = self.eval(self.program.rule(rule).body);

        let far = self.far.take();
        let frontier = self.frontier.take();
        let examined = self.examined;

        if self.halted.is_none() && self.options.memo == MemoPolicy::Rules {
            let result = ok.then(|| Success {
                end: self.pos,
                elements: self.children[start.children..].to_vec(),
                errors: self.errors[start.errors..].to_vec(),
            });
            let entry = MemoEntry {
                result,
                examined,
                far: far.clone(),
                frontier,
            };
            // A recovering call that saw no error point went exactly the way
            // a strict one would, so later rounds and reparses may reuse it.
            let recovering = self.recovering
                && self.error_points.range(pos..examined.max(pos)).next().is_some();
            self.memo.insert((rule, pos), recovering, entry);
        }

        self.far = Far::merge(outer_far, far);
        self.frontier = outer_frontier.max(frontier);
        self.examined = outer_examined.max(examined);
        self.tracer.trace_return(rule, ok.then_some(self.pos));
        ok
    }

    /// Apply a memoized call as if it had just been evaluated.
    fn replay(&mut self, entry: MemoEntry, source: Source) -> bool {
        let frontier = match source {
            Source::Recovering => entry.frontier,
            Source::Strict => entry
                .far
                .as_ref()
                .map(|f| f.pos)
                .filter(|pos| !self.error_points.contains(pos)),
        };
        self.frontier = self.frontier.max(frontier);
        self.examined = self.examined.max(entry.examined);
        self.far = Far::merge(self.far.take(), entry.far);
        match entry.result {
            Some(success) => {
                self.pos = success.end;
                self.children.extend(success.elements);
                self.errors.extend(success.errors);
                true
            }
            None => false,
        }
    }

    /// Wrap `children[from..]` into a node of `kind`. Leading trivia stays in
    /// the parent.
    pub(super) fn close_node(&mut self, from: usize, kind: KindId) {
        let mut split = from;
        while split < self.children.len() && self.is_trivia(&self.children[split]) {
            split += 1;
        }
        let inner: Vec<Green> = self.children.drain(split..).collect();
        self.children
            .push(NodeOrToken::Node(GreenNode::new(raw(kind), inner)));
    }

    fn is_trivia(&self, element: &Green) -> bool {
        match element {
            NodeOrToken::Token(token) => self.program.is_trivia(KindId(token.kind().0)),
            NodeOrToken::Node(_) => false,
        }
    }

    fn seq(&mut self, members: &[OpId]) -> bool {
        let start = self.mark();
        let mut i = 0;
        while i < members.len() {
            let outer_far = self.far.take();
            let ok = self.eval(members[i]);
            let local = self.far.take();
            self.far = Far::merge(outer_far, local.clone());
            if ok {
                i += 1;
                continue;
            }

            if let Some(local) = local
                && i > 0
                && self.recovering
                && self.error_points.contains(&local.pos)
            {
                match self.recover_seq(members, i, &local.expected) {
                    Some(next) => {
                        i = next;
                        continue;
                    }
                    None => return true,
                }
            }

            self.reset(start);
            return false;
        }
        true
    }

    fn choice(&mut self, members: &[OpId]) -> bool {
        let start = self.mark();
        for &member in members {
            if self.eval(member) {
                return true;
            }
            self.reset(start);
            self.tracer.trace_backtrack(start.pos);
        }
        false
    }

    fn repeat(&mut self, body: OpId, min: u32, max: Option<u32>) -> bool {
        let start = self.mark();
        let mut count = 0;
        while max.is_none_or(|max| count < max) {
            let before = self.mark();
            let outer_far = self.far.take();
            let ok = self.eval(body);
            let local = self.far.take();
            self.far = Far::merge(outer_far, local.clone());

            if ok {
                if self.pos == before.pos {
                    self.reset(before);
                    break;
                }
                count += 1;
                continue;
            }

            if let Some(local) = local
                && (count >= 1 || min == 0)
                && self.recovering
                && self.error_points.contains(&local.pos)
                && self.recover_repeat(body, &local.expected)
            {
                count += 1;
                continue;
            }
            break;
        }

        if count < min {
            self.reset(start);
            return false;
        }
        true
    }

    /// Push an `ERROR` node over `start..end` and record its error.
    pub(super) fn emit_error(&mut self, start: usize, end: usize, expected: &[KindId]) {
        self.tracer.trace_recover(start..end);
        let mut children = Vec::new();
        if end > start {
            let skipped = GreenToken::new(raw(KindId::SKIPPED), &self.text[start..end]);
            children.push(NodeOrToken::Token(skipped));
        }
        self.children
            .push(NodeOrToken::Node(GreenNode::new(raw(KindId::ERROR), children)));

        let kind = if end > start {
            SyntaxErrorKind::Unexpected
        } else {
            SyntaxErrorKind::Missing
        };
        self.errors.push(SyntaxError {
            range: TextRange::new(text_size(start), text_size(end)),
            kind,
            expected: expected
                .iter()
                .map(|&k| self.program.kind_label(k))
                .collect(),
        });
    }
}

fn raw(kind: KindId) -> rowan::SyntaxKind {
    rowan::SyntaxKind(kind.0)
}
