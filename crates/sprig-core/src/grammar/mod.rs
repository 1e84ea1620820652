//! Grammar types.
//!
//! [`Grammar`] and [`Rule`] are plain data: nothing here validates references
//! or executes anything. Validation and lowering live in `sprig-compiler`.

mod binary;
pub mod dsl;
mod json;
mod types;

#[cfg(test)]
mod dsl_tests;
#[cfg(test)]
mod json_tests;

pub use json::LoadError;
pub use types::{Grammar, Rule};
