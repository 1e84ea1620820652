//! Parsing engine for sprig.
//!
//! Executes a compiled [`Program`](sprig_bytecode::Program) against text and
//! produces a lossless concrete syntax tree. Parsing never fails: input the
//! grammar cannot explain ends up in `ERROR` nodes, and resource limits or
//! cancellation return a closed, partial tree.

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
#![allow(clippy::comparison_chain)]

mod diagnostics;
pub mod engine;
pub mod tree;

#[cfg(test)]
mod diagnostics_tests;
#[cfg(test)]
mod test_utils;

pub use diagnostics::DiagnosticsPrinter;
pub use engine::{
    Edit, EditError, Engine, Halt, MemoPolicy, NoopTracer, ParseOptions, PrintTracer,
    SyntaxError, SyntaxErrorKind, Tracer, Verbosity, parse, reparse,
};
pub use tree::{
    JsonNode, ParseResult, SprigLang, SyntaxElement, SyntaxNode, SyntaxToken, SyntaxTree,
    TreePrinter,
};
