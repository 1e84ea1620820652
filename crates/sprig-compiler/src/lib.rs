//! Grammar compiler for sprig.
//!
//! - `analyze` - validation passes over the rule graph (symbols, nullability,
//!   left recursion, productivity, lints)
//! - `compile` - lowering of validated grammars into a [`Program`]
//! - `registry` - cache of compiled programs keyed by grammar identity

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod analyze;
pub mod compile;
mod error;
mod registry;


pub use analyze::{Analysis, validate};
pub use compile::{Compilation, Compiler, compile};
pub use error::{GrammarError, GrammarWarning};
pub use registry::Registry;
pub use sprig_bytecode::Program;
