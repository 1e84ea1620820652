//! Command builders for the CLI.
//!
//! All commands accept the same flags so a command line can be switched
//! between `parse` and `trace` (or `check`) by changing the verb alone.
//! Flags a command ignores are hidden from its `--help`.

use clap::Command;

use super::args::*;

/// Add hidden source input args (for commands that don't parse text).
fn with_hidden_source_args(cmd: Command) -> Command {
    cmd.arg(source_path_arg().hide(true))
        .arg(source_text_arg().hide(true))
}

/// Add hidden tree output args (for commands that don't print a tree).
fn with_hidden_output_args(cmd: Command) -> Command {
    cmd.arg(json_arg().hide(true))
        .arg(spans_arg().hide(true))
        .arg(trivia_arg().hide(true))
}

/// Add hidden trace args (for commands that don't trace).
fn with_hidden_trace_args(cmd: Command) -> Command {
    cmd.arg(verbose_arg().hide(true))
}

/// Add hidden runtime args (for commands that don't run the engine).
fn with_hidden_runtime_args(cmd: Command) -> Command {
    cmd.arg(fuel_arg().hide(true))
}

/// Build the complete CLI with all subcommands.
pub fn build_cli() -> Command {
    Command::new("sprig")
        .about("PEG parsing with error recovery for tree-sitter style grammars")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(check_command())
        .subcommand(dump_command())
        .subcommand(parse_command())
        .subcommand(trace_command())
}

/// Validate and compile a grammar, reporting errors and lint warnings.
pub fn check_command() -> Command {
    let cmd = Command::new("check")
        .about("Validate a grammar")
        .override_usage(
            "\
  sprig check <GRAMMAR>
  sprig check <GRAMMAR> --start <NAME>",
        )
        .after_help(
            r#"EXAMPLES:
  sprig check grammar.json             # validate and lint
  sprig check grammar.json --strict    # fail on warnings too
  sprig check grammar.bin --start expr # check from another rule"#,
        )
        .arg(grammar_path_arg())
        .arg(start_arg())
        .arg(sync_arg())
        .arg(strict_arg())
        .arg(color_arg());

    with_hidden_runtime_args(with_hidden_trace_args(with_hidden_output_args(
        with_hidden_source_args(cmd),
    )))
}

/// Show the compiled program.
pub fn dump_command() -> Command {
    let cmd = Command::new("dump")
        .about("Show the compiled program")
        .override_usage(
            "\
  sprig dump <GRAMMAR>
  sprig dump <GRAMMAR> --start <NAME> --sync <TOKEN>",
        )
        .after_help(
            r#"EXAMPLES:
  sprig dump grammar.json              # rules, kinds and terminals
  sprig dump grammar.json --sync ';'   # with recovery sync points"#,
        )
        .arg(grammar_path_arg())
        .arg(start_arg())
        .arg(sync_arg())
        .arg(color_arg());

    with_hidden_runtime_args(with_hidden_trace_args(with_hidden_output_args(
        with_hidden_source_args(cmd.arg(strict_arg().hide(true))),
    )))
}

/// Parse text and print the syntax tree.
pub fn parse_command() -> Command {
    let cmd = Command::new("parse")
        .about("Parse source text and print the syntax tree")
        .override_usage(
            "\
  sprig parse <GRAMMAR> <SOURCE>
  sprig parse <GRAMMAR> -s <TEXT>",
        )
        .after_help(
            r#"EXAMPLES:
  sprig parse grammar.json app.txt           # tree
  sprig parse grammar.json app.txt --spans   # with byte ranges
  sprig parse grammar.json -s 'let x = 1'    # inline source
  cat app.txt | sprig parse grammar.json -   # from stdin
  sprig parse grammar.json app.txt --json    # JSON tree

Exits with status 1 when the input has syntax errors."#,
        )
        .arg(grammar_path_arg())
        .arg(source_path_arg())
        .arg(source_text_arg())
        .arg(start_arg())
        .arg(sync_arg())
        .arg(json_arg())
        .arg(spans_arg())
        .arg(trivia_arg())
        .arg(fuel_arg())
        .arg(color_arg());

    with_hidden_trace_args(cmd.arg(strict_arg().hide(true)))
}

/// Trace the engine on text.
pub fn trace_command() -> Command {
    let cmd = Command::new("trace")
        .about("Trace rule calls and recovery rounds while parsing")
        .override_usage(
            "\
  sprig trace <GRAMMAR> <SOURCE>
  sprig trace <GRAMMAR> -s <TEXT>",
        )
        .after_help(
            r#"EXAMPLES:
  sprig trace grammar.json app.txt          # rule calls and rounds
  sprig trace grammar.json app.txt -v       # plus tokens
  sprig trace grammar.json -s 'x' -vv       # plus matched text"#,
        )
        .arg(grammar_path_arg())
        .arg(source_path_arg())
        .arg(source_text_arg())
        .arg(start_arg())
        .arg(sync_arg())
        .arg(verbose_arg())
        .arg(fuel_arg())
        .arg(spans_arg())
        .arg(trivia_arg())
        .arg(color_arg());

    cmd.arg(json_arg().hide(true))
        .arg(strict_arg().hide(true))
}
