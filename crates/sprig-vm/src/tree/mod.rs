//! Concrete syntax trees.
//!
//! Trees are rowan green trees whose raw kinds are the program's [`KindId`]s.
//! They are lossless: the leaves, trivia and skipped text included, spell
//! out the parsed input exactly.

mod json;
mod printer;

#[cfg(test)]
mod json_tests;
#[cfg(test)]
mod printer_tests;

use std::fmt;
use std::sync::Arc;

use rowan::{GreenNode, Language};
use sprig_bytecode::KindId;

use crate::engine::{Halt, StrictMemo, SyntaxError};

pub use json::JsonNode;
pub use printer::TreePrinter;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SprigLang {}

impl Language for SprigLang {
    type Kind = KindId;

    fn kind_from_raw(raw: rowan::SyntaxKind) -> Self::Kind {
        KindId(raw.0)
    }

    fn kind_to_raw(kind: Self::Kind) -> rowan::SyntaxKind {
        rowan::SyntaxKind(kind.0)
    }
}

/// Type aliases for rowan types parameterized by our language.
pub type SyntaxNode = rowan::SyntaxNode<SprigLang>;
pub type SyntaxToken = rowan::SyntaxToken<SprigLang>;
pub type SyntaxElement = rowan::NodeOrToken<SyntaxNode, SyntaxToken>;

/// A parsed text.
///
/// Keeps the rule results of its parse so that [`Engine::reparse`] can reuse
/// them.
///
/// [`Engine::reparse`]: crate::Engine::reparse
#[derive(Clone)]
pub struct SyntaxTree {
    green: GreenNode,
    errors: Vec<SyntaxError>,
    fingerprint: u32,
    memo: Arc<StrictMemo>,
}

impl SyntaxTree {
    pub(crate) fn new(
        green: GreenNode,
        errors: Vec<SyntaxError>,
        fingerprint: u32,
        memo: Arc<StrictMemo>,
    ) -> Self {
        Self {
            green,
            errors,
            fingerprint,
            memo,
        }
    }

    pub fn root(&self) -> SyntaxNode {
        SyntaxNode::new_root(self.green.clone())
    }

    pub fn green(&self) -> &GreenNode {
        &self.green
    }

    /// The parsed text, rebuilt from the leaves.
    pub fn text(&self) -> String {
        self.root().text().to_string()
    }

    pub fn text_len(&self) -> usize {
        u32::from(self.green.text_len()) as usize
    }

    /// One error per `ERROR` node, in document order.
    pub fn errors(&self) -> &[SyntaxError] {
        &self.errors
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn error_nodes(&self) -> impl Iterator<Item = SyntaxNode> {
        self.root()
            .descendants()
            .filter(|node| node.kind() == KindId::ERROR)
    }

    /// Identity of the program that produced the tree.
    pub fn fingerprint(&self) -> u32 {
        self.fingerprint
    }

    pub(crate) fn memo(&self) -> &StrictMemo {
        &self.memo
    }
}

impl fmt::Debug for SyntaxTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SyntaxTree")
            .field("root", &self.root())
            .field("errors", &self.errors)
            .finish_non_exhaustive()
    }
}

/// Outcome of a parse. Always carries a complete tree.
#[derive(Debug, Clone)]
pub struct ParseResult {
    pub tree: SyntaxTree,
    /// The tree contains at least one `ERROR` node.
    pub had_errors: bool,
    /// Set when a limit or cancellation cut the parse short.
    pub halted: Option<Halt>,
}
