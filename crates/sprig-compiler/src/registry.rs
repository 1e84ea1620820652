//! Compiled programs keyed by grammar identity.
//!
//! Compiling is far more expensive than looking up a program, and programs
//! are immutable, so one `Arc<Program>` can serve every parse of a grammar on
//! every thread.

use std::collections::HashMap;
use std::sync::Arc;

use sprig_bytecode::Program;
use sprig_core::Grammar;

use crate::compile::Compiler;
use crate::error::GrammarError;

/// Cache of compiled programs.
///
/// Grammars are identified by their binary encoding: a CRC32 picks the
/// bucket, byte equality confirms the hit.
#[derive(Debug, Default)]
pub struct Registry {
    compiler: Compiler,
    entries: HashMap<u32, Vec<(Vec<u8>, Arc<Program>)>>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Compile misses with `compiler` instead of the default settings.
    pub fn with_compiler(compiler: Compiler) -> Self {
        Self {
            compiler,
            entries: HashMap::new(),
        }
    }

    /// The cached program for `grammar`, compiling it on first use.
    ///
    /// Failed compilations are not cached.
    pub fn get_or_compile(&mut self, grammar: &Grammar) -> Result<Arc<Program>, GrammarError> {
        let bytes = grammar.to_binary();
        let checksum = crc32fast::hash(&bytes);

        if let Some((_, program)) = self
            .entries
            .get(&checksum)
            .and_then(|bucket| bucket.iter().find(|(key, _)| *key == bytes))
        {
            return Ok(Arc::clone(program));
        }

        let program = Arc::new(self.compiler.compile(grammar)?.program);
        self.entries
            .entry(checksum)
            .or_default()
            .push((bytes, Arc::clone(&program)));
        Ok(program)
    }

    #[cfg(test)]
    pub(crate) fn bucket_count(&self) -> usize {
        self.entries.len()
    }

    pub fn contains(&self, grammar: &Grammar) -> bool {
        let bytes = grammar.to_binary();
        self.entries
            .get(&crc32fast::hash(&bytes))
            .is_some_and(|bucket| bucket.iter().any(|(key, _)| *key == bytes))
    }

    /// Drop the program for `grammar`. Outstanding `Arc`s stay valid.
    pub fn remove(&mut self, grammar: &Grammar) -> Option<Arc<Program>> {
        let bytes = grammar.to_binary();
        let checksum = crc32fast::hash(&bytes);
        let bucket = self.entries.get_mut(&checksum)?;
        let position = bucket.iter().position(|(key, _)| *key == bytes)?;
        let (_, program) = bucket.swap_remove(position);
        if bucket.is_empty() {
            self.entries.remove(&checksum);
        }
        Some(program)
    }

    pub fn len(&self) -> usize {
        self.entries.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
