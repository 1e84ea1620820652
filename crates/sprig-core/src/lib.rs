#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Grammar model for sprig.
//!
//! A grammar is a list of named rules, each bound to a combinator expression
//! (sequence, ordered choice, repetition, rule reference, terminal). Grammars
//! can be built in Rust with the [`dsl`] functions, loaded from tree-sitter's
//! `grammar.json`, or round-tripped through a compact binary encoding.

mod colors;
pub mod grammar;

pub use colors::Colors;
pub use grammar::{Grammar, LoadError, Rule, dsl};
