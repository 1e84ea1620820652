pub mod check;
pub mod dump;
pub mod loader;
pub mod parse;
pub mod trace;

#[cfg(test)]
mod loader_tests;
