//! Parsing engine.
//!
//! Evaluates a program's op trees by recursive descent with ordered-choice
//! backtracking (PEG semantics) and builds a rowan green tree.
//!
//! A parse runs in rounds. The first is strict. When it does not consume the
//! whole input, the furthest failure becomes an error point and the input is
//! parsed again with recovery armed at every error point collected so far.
//! Rounds stop once the input is consumed or a round finds no new error
//! point.

mod error;
mod incremental;
mod memo;
mod options;
mod parser;
mod recovery;
mod trace;

#[cfg(test)]
mod recovery_tests;

use std::sync::Arc;

use sprig_bytecode::Program;

pub use error::{EditError, Halt, SyntaxError, SyntaxErrorKind};
pub use incremental::Edit;
pub use options::{MemoPolicy, ParseOptions};
pub use trace::{NoopTracer, PrintTracer, Tracer, Verbosity};

pub(crate) use memo::StrictMemo;

use memo::{MemoTable, carry_over};
use parser::Parser;

use crate::tree::{ParseResult, SyntaxTree};

/// Configured parser for one program.
///
/// ```
/// # use sprig_core::{Grammar, dsl::*};
/// # use sprig_vm::Engine;
/// let grammar = Grammar::new("greeting")
///     .with_rule("greeting", seq([string("hello"), sym("name")]))
///     .with_rule("name", pattern("[a-z]+"))
///     .with_extras([pattern(r"\s")]);
/// let program = sprig_compiler::compile(&grammar).unwrap();
///
/// let result = Engine::new(&program).parse("hello world");
/// assert!(!result.had_errors);
/// assert_eq!(result.tree.text(), "hello world");
/// ```
pub struct Engine<'p> {
    program: &'p Program,
    options: ParseOptions,
    cancel: Option<&'p dyn Fn() -> bool>,
}

impl<'p> Engine<'p> {
    pub fn new(program: &'p Program) -> Self {
        Self {
            program,
            options: ParseOptions::default(),
            cancel: None,
        }
    }

    pub fn options(mut self, options: ParseOptions) -> Self {
        self.options = options;
        self
    }

    /// Consulted before every rule call; returning true stops the parse with
    /// [`Halt::Cancelled`].
    pub fn cancel_when(mut self, cancelled: &'p dyn Fn() -> bool) -> Self {
        self.cancel = Some(cancelled);
        self
    }

    pub fn parse(&self, text: &str) -> ParseResult {
        self.parse_traced(text, &mut NoopTracer)
    }

    pub fn parse_traced<T: Tracer>(&self, text: &str, tracer: &mut T) -> ParseResult {
        self.run(text, MemoTable::default(), tracer)
    }

    /// Parse `tree`'s text with `edit` applied, reusing the results of the
    /// previous parse that the edit cannot have changed.
    ///
    /// The result is the same as parsing the new text from scratch.
    pub fn reparse(&self, tree: &SyntaxTree, edit: &Edit) -> Result<ParseResult, EditError> {
        let text = edit.apply(&tree.text())?;
        let memo = if tree.fingerprint() == self.program.fingerprint {
            MemoTable::from_strict(carry_over(
                tree.memo(),
                edit.start,
                edit.removed_len,
                edit.inserted_len(),
            ))
        } else {
            MemoTable::default()
        };
        Ok(self.run(&text, memo, &mut NoopTracer))
    }

    fn run<T: Tracer>(&self, text: &str, memo: MemoTable, tracer: &mut T) -> ParseResult {
        let parser = Parser::new(self.program, text, self.options, self.cancel, tracer, memo);
        let outcome = parser.run();

        let tree = SyntaxTree::new(
            outcome.green,
            outcome.errors,
            self.program.fingerprint,
            Arc::new(outcome.memo.into_strict()),
        );
        ParseResult {
            had_errors: !tree.errors().is_empty(),
            halted: outcome.halted,
            tree,
        }
    }
}

/// Parse with default options.
pub fn parse(program: &Program, text: &str) -> ParseResult {
    Engine::new(program).parse(text)
}

/// Reparse after an edit with default options.
pub fn reparse(program: &Program, tree: &SyntaxTree, edit: &Edit) -> Result<ParseResult, EditError> {
    Engine::new(program).reparse(tree, edit)
}
