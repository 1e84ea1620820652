//! Builder-pattern printer for rendering syntax errors.

use std::fmt::Write;

use annotate_snippets::{AnnotationKind, Group, Level, Renderer, Snippet};
use rowan::TextRange;

use crate::engine::{SyntaxError, SyntaxErrorKind};
use crate::tree::SyntaxTree;

/// Builder for rendering syntax errors, with source snippets when the source
/// text is given and one `start..end: message` line per error otherwise.
pub struct DiagnosticsPrinter<'e, 's> {
    errors: &'e [SyntaxError],
    source: Option<&'s str>,
    path: Option<&'s str>,
    colored: bool,
}

impl<'e, 's> DiagnosticsPrinter<'e, 's> {
    pub fn new(errors: &'e [SyntaxError]) -> Self {
        Self {
            errors,
            source: None,
            path: None,
            colored: false,
        }
    }

    pub fn source(mut self, source: &'s str) -> Self {
        self.source = Some(source);
        self
    }

    pub fn path(mut self, path: &'s str) -> Self {
        self.path = Some(path);
        self
    }

    pub fn colored(mut self, value: bool) -> Self {
        self.colored = value;
        self
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        self.format(&mut out).expect("String write never fails");
        out
    }

    pub fn format(&self, w: &mut impl Write) -> std::fmt::Result {
        let Some(source) = self.source else {
            return self.format_plain(w);
        };

        let renderer = if self.colored {
            Renderer::styled()
        } else {
            Renderer::plain()
        };

        for (i, error) in self.errors.iter().enumerate() {
            let message = error.message();
            let range = adjust_range(error.range, source.len());

            let mut snippet = Snippet::source(source)
                .line_start(1)
                .annotation(AnnotationKind::Primary.span(range).label(label(error)));
            if let Some(p) = self.path {
                snippet = snippet.path(p);
            }

            let report: Vec<Group> = vec![Level::ERROR.primary_title(&message).element(snippet)];

            if i > 0 {
                w.write_char('\n')?;
            }
            write!(w, "{}", renderer.render(&report))?;
        }

        Ok(())
    }

    fn format_plain(&self, w: &mut impl Write) -> std::fmt::Result {
        for (i, error) in self.errors.iter().enumerate() {
            if i > 0 {
                w.write_char('\n')?;
            }
            write!(w, "{}", error)?;
        }
        Ok(())
    }
}

fn label(error: &SyntaxError) -> &'static str {
    match error.kind {
        SyntaxErrorKind::Unexpected => "skipped",
        SyntaxErrorKind::Missing => "expected here",
    }
}

fn adjust_range(range: TextRange, limit: usize) -> std::ops::Range<usize> {
    let start: usize = range.start().into();
    let end: usize = range.end().into();

    if start == end {
        return start..(start + 1).min(limit);
    }

    start..end
}

impl SyntaxTree {
    pub fn diagnostics<'s>(&self) -> DiagnosticsPrinter<'_, 's> {
        DiagnosticsPrinter::new(self.errors())
    }
}
