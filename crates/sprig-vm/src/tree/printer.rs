//! Indented text rendering of syntax trees.

use std::fmt::Write;

use rowan::NodeOrToken;
use sprig_bytecode::{KindId, Program};
use sprig_core::Colors;

use super::{SyntaxNode, SyntaxToken, SyntaxTree};

/// Builder for rendering a tree, one element per line:
///
/// ```text
/// source_file
///   variable_definition
///     "let"
///     identifier "x"
/// ```
///
/// Anonymous leaves whose text is their name print bare. Trivia is hidden
/// unless requested.
pub struct TreePrinter<'t> {
    tree: &'t SyntaxTree,
    program: &'t Program,
    spans: bool,
    trivia: bool,
    colors: Colors,
}

impl<'t> TreePrinter<'t> {
    pub fn new(tree: &'t SyntaxTree, program: &'t Program) -> Self {
        Self {
            tree,
            program,
            spans: false,
            trivia: false,
            colors: Colors::OFF,
        }
    }

    pub fn with_spans(mut self, value: bool) -> Self {
        self.spans = value;
        self
    }

    pub fn with_trivia(mut self, value: bool) -> Self {
        self.trivia = value;
        self
    }

    pub fn colors(mut self, colors: Colors) -> Self {
        self.colors = colors;
        self
    }

    pub fn dump(&self) -> String {
        let mut out = String::new();
        self.format(&mut out).expect("String write never fails");
        out
    }

    pub fn format(&self, w: &mut impl Write) -> std::fmt::Result {
        self.format_node(&self.tree.root(), 0, w)
    }

    fn format_node(&self, node: &SyntaxNode, indent: usize, w: &mut impl Write) -> std::fmt::Result {
        let prefix = "  ".repeat(indent);
        let span = self.span_str(node.text_range());
        writeln!(w, "{}{}{}", prefix, self.label(node.kind()), span)?;

        for child in node.children_with_tokens() {
            match child {
                NodeOrToken::Node(n) => self.format_node(&n, indent + 1, w)?,
                NodeOrToken::Token(t) => self.format_token(&t, indent + 1, w)?,
            }
        }
        Ok(())
    }

    fn format_token(&self, token: &SyntaxToken, indent: usize, w: &mut impl Write) -> std::fmt::Result {
        let kind = token.kind();
        if !self.trivia && self.program.is_trivia(kind) {
            return Ok(());
        }
        let prefix = "  ".repeat(indent);
        let span = self.span_str(token.text_range());
        let info = self.program.kind(kind);
        if !info.named && info.name == token.text() {
            return writeln!(w, "{}{}{}", prefix, self.label(kind), span);
        }
        let c = self.colors;
        writeln!(
            w,
            "{}{}{} {}{:?}{}",
            prefix,
            self.label(kind),
            span,
            c.green,
            token.text(),
            c.reset
        )
    }

    fn label(&self, kind: KindId) -> String {
        let c = self.colors;
        let info = self.program.kind(kind);
        let color = if kind == KindId::ERROR {
            c.red
        } else if info.named {
            c.blue
        } else {
            c.green
        };
        format!("{color}{}{}", self.program.kind_label(kind), c.reset)
    }

    fn span_str(&self, range: rowan::TextRange) -> String {
        if !self.spans {
            return String::new();
        }
        let c = self.colors;
        format!(
            " {}[{}..{}]{}",
            c.dim,
            u32::from(range.start()),
            u32::from(range.end()),
            c.reset
        )
    }
}
