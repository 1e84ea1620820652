//! Lowering validated grammars into executable programs.

mod lower;
mod token;


use sprig_bytecode::Program;
use sprig_core::Grammar;

use crate::analyze;
use crate::error::{GrammarError, GrammarWarning};

/// Result of a successful compilation.
#[derive(Debug)]
pub struct Compilation {
    pub program: Program,
    pub warnings: Vec<GrammarWarning>,
}

/// Compiler configuration.
#[derive(Clone, Debug, Default)]
pub struct Compiler {
    start: Option<String>,
    sync: Vec<String>,
}

impl Compiler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse from this rule instead of the grammar's start rule.
    pub fn start_rule(mut self, name: impl Into<String>) -> Self {
        self.start = Some(name.into());
        self
    }

    /// Tokens at which error recovery stops skipping input.
    ///
    /// Each entry names a lexical rule or is taken as a literal (`";"`, `"}"`).
    pub fn sync_tokens<S: Into<String>>(mut self, tokens: impl IntoIterator<Item = S>) -> Self {
        self.sync = tokens.into_iter().map(Into::into).collect();
        self
    }

    pub fn compile(&self, grammar: &Grammar) -> Result<Compilation, GrammarError> {
        let start = self
            .start
            .as_deref()
            .or(grammar.start_rule())
            .ok_or(GrammarError::EmptyGrammar)?;
        let analysis = analyze::analyze(grammar, start)?;
        let program = lower::lower(grammar, &analysis, &self.sync)?;
        Ok(Compilation {
            program,
            warnings: analysis.warnings,
        })
    }
}

/// Compile with default settings, discarding warnings.
pub fn compile(grammar: &Grammar) -> Result<Program, GrammarError> {
    Compiler::new().compile(grammar).map(|c| c.program)
}
