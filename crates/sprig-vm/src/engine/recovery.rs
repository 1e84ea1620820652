//! Resynchronization after a failure at an armed error point.
//!
//! Both strategies skip forward one char at a time from the failure and try,
//! strictly, to match what should have come there. The skipped text becomes
//! an `ERROR` node. Sync terminals and the end of input stop the scan.

use sprig_bytecode::{KindId, OpId};

use super::memo::Green;
use super::parser::Parser;
use super::trace::Tracer;

impl<T: Tracer> Parser<'_, T> {
    /// Element `failed` of `members` could not match. Find the first later
    /// position where one of the remaining elements matches non-empty input
    /// and resume the sequence after it.
    ///
    /// Returns the index of the next element to evaluate, or `None` when the
    /// scan hit a sync terminal or the end of input; the sequence then ends
    /// with the rest of its elements missing.
    pub(super) fn recover_seq(
        &mut self,
        members: &[OpId],
        failed: usize,
        expected: &[KindId],
    ) -> Option<usize> {
        self.skip_extras();
        let from = self.pos;
        let mut at = from;
        loop {
            if !self.tick() {
                return None;
            }
            if let Some((k, elements, end)) = self.attempt(&members[failed..], at) {
                if at > from || k > 0 {
                    self.emit_error(from, at, expected);
                }
                self.children.extend(elements);
                self.pos = end;
                return Some(failed + k + 1);
            }
            if self.stops_scan(at) {
                self.emit_error(from, at, expected);
                self.pos = at;
                return None;
            }
            at = self.next_char(at);
        }
    }

    /// The body of a repetition failed. Skip to the next position where it
    /// matches and count that as the next iteration.
    ///
    /// On a sync terminal or the end of input the repetition just ends; its
    /// parent deals with the rest.
    pub(super) fn recover_repeat(&mut self, body: OpId, expected: &[KindId]) -> bool {
        let start = self.mark();
        self.skip_extras();
        let from = self.pos;
        let mut at = from;
        loop {
            if !self.tick() {
                break;
            }
            if let Some((_, elements, end)) = self.attempt(&[body], at) {
                if at > from {
                    self.emit_error(from, at, expected);
                }
                self.children.extend(elements);
                self.pos = end;
                return true;
            }
            if self.stops_scan(at) {
                break;
            }
            at = self.next_char(at);
        }
        self.reset(start);
        false
    }

    /// Strictly try each of `ops` at `at`. A match counts only if it consumes
    /// more than extras.
    ///
    /// The attempts' failures are not the parse's failures: `far` and
    /// `frontier` are restored afterwards. `examined` keeps growing.
    fn attempt(&mut self, ops: &[OpId], at: usize) -> Option<(usize, Vec<Green>, usize)> {
        let recovering = std::mem::replace(&mut self.recovering, false);
        let far = self.far.clone();
        let frontier = self.frontier;
        let floor = self.extras_end(at);

        let mut found = None;
        for (k, &op) in ops.iter().enumerate() {
            let mark = self.mark();
            self.pos = at;
            if self.eval(op) && self.pos > floor {
                let elements = self.children.split_off(mark.children);
                found = Some((k, elements, self.pos));
                self.reset(mark);
                break;
            }
            self.reset(mark);
        }

        self.recovering = recovering;
        self.far = far;
        self.frontier = frontier;
        found
    }

    fn stops_scan(&mut self, at: usize) -> bool {
        if at >= self.text.len() || self.halted.is_some() {
            return true;
        }
        let program = self.program;
        program
            .sync
            .iter()
            .any(|&terminal| self.match_terminal(terminal, at).is_some_and(|len| len > 0))
    }

    fn next_char(&self, at: usize) -> usize {
        at + self.text[at..].chars().next().map_or(1, char::len_utf8)
    }
}
