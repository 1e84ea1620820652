//! Human-readable program dump for debugging and snapshots.
//!
//! ```text
//! [rules]
//! R0 greeting = ("hello" name)
//! R1 name = /[a-z]+/ (lexical)
//!
//! [kinds]
//! K0 ERROR
//! ...
//! ```

use std::fmt::Write as _;

use sprig_core::Colors;

use super::ids::{KindId, OpId, TerminalId};
use super::program::{KindClass, Op, Program};
use super::terminal::Matcher;

/// Render the rules, kinds, terminals, extras and sync sets of a program.
pub fn dump(program: &Program, colors: Colors) -> String {
    let mut out = String::new();
    let c = colors;

    writeln!(out, "[rules]").unwrap();
    for (i, rule) in program.rules.iter().enumerate() {
        let mut flags = Vec::new();
        if i == program.start.index() {
            flags.push("start");
        }
        if rule.hidden {
            flags.push("hidden");
        }
        if rule.lexical {
            flags.push("lexical");
        }
        if rule.nullable {
            flags.push("nullable");
        }
        write!(
            out,
            "{}R{i}{} {}{}{} = {}",
            c.dim,
            c.reset,
            c.blue,
            rule.name,
            c.reset,
            format_op(program, rule.body, c)
        )
        .unwrap();
        if !flags.is_empty() {
            write!(out, " {}({}){}", c.dim, flags.join(", "), c.reset).unwrap();
        }
        out.push('\n');
    }

    writeln!(out, "\n[kinds]").unwrap();
    for (i, kind) in program.kinds.iter().enumerate() {
        let class = match kind.class {
            KindClass::Error => "error",
            KindClass::Skipped => "skipped",
            KindClass::Node => "node",
            KindClass::Token => "token",
        };
        let trivia = if kind.trivia { ", trivia" } else { "" };
        let name = if kind.named {
            format!("{}{}{}", c.blue, kind.name, c.reset)
        } else {
            format!("{}{:?}{}", c.green, kind.name, c.reset)
        };
        writeln!(out, "{}K{i}{} {name} {}({class}{trivia}){}", c.dim, c.reset, c.dim, c.reset)
            .unwrap();
    }

    writeln!(out, "\n[terminals]").unwrap();
    for (i, terminal) in program.terminals.iter().enumerate() {
        let nullable = if terminal.nullable { " (nullable)" } else { "" };
        writeln!(
            out,
            "{}T{i}{} {}{}{}{}{nullable}{}",
            c.dim,
            c.reset,
            c.green,
            terminal.label(),
            c.reset,
            c.dim,
            c.reset
        )
        .unwrap();
    }

    if !program.extras.is_empty() {
        let extras: Vec<_> = program
            .extras
            .iter()
            .map(|(terminal, _)| format!("T{}", terminal.0))
            .collect();
        writeln!(out, "\nextras: {}", extras.join(" ")).unwrap();
    }
    if !program.sync.is_empty() {
        let sync: Vec<_> = program.sync.iter().map(|t| format!("T{}", t.0)).collect();
        writeln!(out, "\nsync: {}", sync.join(" ")).unwrap();
    }

    out
}

/// Render an op tree as a compact expression.
fn format_op(program: &Program, id: OpId, c: Colors) -> String {
    match program.op(id) {
        Op::Blank => "blank".to_string(),
        Op::Token {
            terminal,
            kind,
            immediate,
        } => {
            let text = token_text(program, *terminal, *kind, c);
            if *immediate {
                format!("immediate({text})")
            } else {
                text
            }
        }
        Op::Call { rule, alias } => {
            let name = format!("{}{}{}", c.blue, program.rule(*rule).name, c.reset);
            match alias {
                Some(kind) => format!("alias({name}, {})", kind_text(program, *kind, c)),
                None => name,
            }
        }
        Op::Seq(members) => {
            let parts: Vec<_> = members.iter().map(|m| format_op(program, *m, c)).collect();
            format!("({})", parts.join(" "))
        }
        Op::Choice(members) => {
            let parts: Vec<_> = members.iter().map(|m| format_op(program, *m, c)).collect();
            format!("({})", parts.join(" | "))
        }
        Op::Repeat { body, min, max } => {
            let inner = format_op(program, *body, c);
            match (min, max) {
                (0, None) => format!("{inner}*"),
                (1, None) => format!("{inner}+"),
                (0, Some(1)) => format!("{inner}?"),
                (min, None) => format!("{inner}{{{min},}}"),
                (min, Some(max)) => format!("{inner}{{{min},{max}}}"),
            }
        }
        Op::Wrap { body, kind } => {
            format!(
                "alias({}, {})",
                format_op(program, *body, c),
                kind_text(program, *kind, c)
            )
        }
    }
}

fn token_text(program: &Program, terminal: TerminalId, kind: KindId, c: Colors) -> String {
    let info = program.kind(kind);
    if info.named {
        return format!("{}{}{}", c.blue, info.name, c.reset);
    }
    let label = format!("{}{}{}", c.green, program.terminal(terminal).label(), c.reset);
    match &program.terminal(terminal).matcher {
        Matcher::Literal(lit) if *lit == info.name => label,
        _ => format!("alias({label}, {})", kind_text(program, kind, c)),
    }
}

fn kind_text(program: &Program, kind: KindId, c: Colors) -> String {
    let info = program.kind(kind);
    if info.named {
        format!("{}{}{}", c.blue, info.name, c.reset)
    } else {
        format!("{}{:?}{}", c.green, info.name, c.reset)
    }
}
