#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Compiled program format for sprig.
//!
//! A [`Program`] is the executable form of a grammar: a kinds table, one op
//! tree per rule, and a table of terminal matchers. Programs are immutable
//! and shared read-only between concurrent parses.

#![allow(clippy::comparison_chain)]

mod dump;
mod ids;
mod program;
mod terminal;

#[cfg(test)]
mod program_tests;
#[cfg(test)]
mod terminal_tests;

pub use dump::dump;
pub use ids::{KindId, OpId, RuleId, TerminalId};
pub use program::{KindClass, KindInfo, Op, Program, RuleInfo};
pub use terminal::{Matcher, Pattern, PatternError, Terminal, TerminalMatch};
