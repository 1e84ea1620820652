//! Rule-call results cached during a parse.
//!
//! Entries made in strict mode depend only on the text in
//! `pos..examined`, so they stay valid across recovery rounds and, shifted,
//! across edits. So do calls made while recovering that saw no error point.
//! Other recovering entries also depend on the round's error points and are
//! dropped when those change.

use std::collections::{BTreeSet, HashMap};

use rowan::{GreenNode, GreenToken, NodeOrToken, TextRange, TextSize};
use sprig_bytecode::{KindId, RuleId};

use super::error::SyntaxError;

pub(crate) type Green = NodeOrToken<GreenNode, GreenToken>;

/// (rule, position of the call)
pub(crate) type MemoKey = (RuleId, usize);

pub(crate) type StrictMemo = HashMap<MemoKey, MemoEntry>;

/// Furthest failed terminal attempt and the kinds expected there.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct Far {
    pub pos: usize,
    pub expected: Vec<KindId>,
}

impl Far {
    /// Keep the further of two failures, or the union of both at a tie.
    pub fn merge(a: Option<Far>, b: Option<Far>) -> Option<Far> {
        match (a, b) {
            (None, x) | (x, None) => x,
            (Some(a), Some(b)) if a.pos > b.pos => Some(a),
            (Some(a), Some(b)) if a.pos < b.pos => Some(b),
            (Some(mut a), Some(b)) => {
                for kind in b.expected {
                    if !a.expected.contains(&kind) {
                        a.expected.push(kind);
                    }
                }
                Some(a)
            }
        }
    }
}

#[derive(Clone, Debug)]
pub(crate) struct Success {
    pub end: usize,
    /// Children the rule body produced, before wrapping.
    pub elements: Vec<Green>,
    pub errors: Vec<SyntaxError>,
}

#[derive(Clone, Debug)]
pub(crate) struct MemoEntry {
    /// `None` when the call failed.
    pub result: Option<Success>,
    /// Exclusive end of the text the call looked at.
    pub examined: usize,
    pub far: Option<Far>,
    /// Furthest failure outside the error points of the round that made the
    /// entry. Only meaningful for recovering entries.
    pub frontier: Option<usize>,
}

impl MemoEntry {
    pub fn end(&self) -> Option<usize> {
        self.result.as_ref().map(|s| s.end)
    }

    fn shifted(&self, delta: isize) -> MemoEntry {
        let shift = |p: usize| p.wrapping_add_signed(delta);
        MemoEntry {
            result: self.result.as_ref().map(|s| Success {
                end: shift(s.end),
                elements: s.elements.clone(),
                errors: s
                    .errors
                    .iter()
                    .map(|e| SyntaxError {
                        range: TextRange::new(
                            text_size(shift(e.range.start().into())),
                            text_size(shift(e.range.end().into())),
                        ),
                        ..e.clone()
                    })
                    .collect(),
            }),
            examined: shift(self.examined),
            far: self.far.as_ref().map(|f| Far {
                pos: shift(f.pos),
                expected: f.expected.clone(),
            }),
            frontier: self.frontier.map(shift),
        }
    }
}

pub(crate) fn text_size(offset: usize) -> TextSize {
    TextSize::try_from(offset).expect("text longer than 4 GiB")
}

/// Where a hit came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Source {
    Strict,
    Recovering,
}

#[derive(Clone, Debug, Default)]
pub(crate) struct MemoTable {
    strict: StrictMemo,
    recovering: HashMap<MemoKey, MemoEntry>,
}

impl MemoTable {
    pub fn from_strict(strict: StrictMemo) -> Self {
        Self {
            strict,
            recovering: HashMap::new(),
        }
    }

    /// In recovering mode a strict entry still answers when no error point
    /// lies in the text it examined: nothing there could have triggered
    /// recovery.
    pub fn get(
        &self,
        key: MemoKey,
        recovering: bool,
        error_points: &BTreeSet<usize>,
    ) -> Option<(&MemoEntry, Source)> {
        if !recovering {
            return self.strict.get(&key).map(|e| (e, Source::Strict));
        }
        if let Some(entry) = self.recovering.get(&key) {
            return Some((entry, Source::Recovering));
        }
        let entry = self.strict.get(&key)?;
        let (pos, examined) = (key.1, entry.examined.max(key.1));
        error_points
            .range(pos..examined)
            .next()
            .is_none()
            .then_some((entry, Source::Strict))
    }

    pub fn insert(&mut self, key: MemoKey, recovering: bool, entry: MemoEntry) {
        if recovering {
            self.recovering.insert(key, entry);
        } else {
            self.strict.insert(key, entry);
        }
    }

    pub fn clear_recovering(&mut self) {
        self.recovering.clear();
    }

    pub fn into_strict(self) -> StrictMemo {
        self.strict
    }

    #[cfg(test)]
    pub fn strict_len(&self) -> usize {
        self.strict.len()
    }
}

/// Carry strict entries over an edit of `removed` replaced by `inserted`
/// bytes at `start`.
///
/// Entries that looked only at text before the edit are kept as they are.
/// Entries that start after the removed span are shifted. Everything else
/// may have seen changed text and is dropped.
pub(crate) fn carry_over(
    old: &StrictMemo,
    start: usize,
    removed: usize,
    inserted: usize,
) -> StrictMemo {
    let removed_end = start + removed;
    let delta = inserted as isize - removed as isize;
    old.iter()
        .filter_map(|(&(rule, pos), entry)| {
            if entry.examined <= start {
                Some(((rule, pos), entry.clone()))
            } else if pos > removed_end {
                Some(((rule, pos.wrapping_add_signed(delta)), entry.shifted(delta)))
            } else {
                None
            }
        })
        .collect()
}
