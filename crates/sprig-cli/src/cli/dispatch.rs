//! Dispatch logic: extract params from ArgMatches and convert to command args.
//!
//! - `*Params` structs hold the fields a command reads (hidden unified flags
//!   are parsed but not extracted)
//! - `from_matches()` pulls them out of clap's matches
//! - `Into<*Args>` bridges to the command handlers

use std::path::PathBuf;

use clap::ArgMatches;
use sprig_vm::Verbosity;

use super::ColorChoice;
use crate::commands::check::CheckArgs;
use crate::commands::dump::DumpArgs;
use crate::commands::loader::{GrammarInput, SourceInput};
use crate::commands::parse::ParseArgs;
use crate::commands::trace::TraceArgs;

pub struct CheckParams {
    pub grammar_path: PathBuf,
    pub start: Option<String>,
    pub sync: Vec<String>,
    pub strict: bool,
    pub color: ColorChoice,
}

impl CheckParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            grammar_path: grammar_path(m),
            start: m.get_one::<String>("start").cloned(),
            sync: sync_tokens(m),
            strict: m.get_flag("strict"),
            color: parse_color(m),
        }
    }
}

impl From<CheckParams> for CheckArgs {
    fn from(p: CheckParams) -> Self {
        Self {
            grammar: GrammarInput {
                path: p.grammar_path,
                start: p.start,
                sync: p.sync,
            },
            strict: p.strict,
            color: p.color.should_colorize(),
        }
    }
}

pub struct DumpParams {
    pub grammar_path: PathBuf,
    pub start: Option<String>,
    pub sync: Vec<String>,
    pub color: ColorChoice,
}

impl DumpParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            grammar_path: grammar_path(m),
            start: m.get_one::<String>("start").cloned(),
            sync: sync_tokens(m),
            color: parse_color(m),
        }
    }
}

impl From<DumpParams> for DumpArgs {
    fn from(p: DumpParams) -> Self {
        Self {
            grammar: GrammarInput {
                path: p.grammar_path,
                start: p.start,
                sync: p.sync,
            },
            color: p.color.should_colorize(),
        }
    }
}

pub struct ParseParams {
    pub grammar_path: PathBuf,
    pub source_path: Option<PathBuf>,
    pub source_text: Option<String>,
    pub start: Option<String>,
    pub sync: Vec<String>,
    pub json: bool,
    pub spans: bool,
    pub trivia: bool,
    pub fuel: Option<u32>,
    pub color: ColorChoice,
}

impl ParseParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            grammar_path: grammar_path(m),
            source_path: m.get_one::<PathBuf>("source_path").cloned(),
            source_text: m.get_one::<String>("source_text").cloned(),
            start: m.get_one::<String>("start").cloned(),
            sync: sync_tokens(m),
            json: m.get_flag("json"),
            spans: m.get_flag("spans"),
            trivia: m.get_flag("trivia"),
            fuel: fuel(m),
            color: parse_color(m),
        }
    }
}

impl From<ParseParams> for ParseArgs {
    fn from(p: ParseParams) -> Self {
        Self {
            grammar: GrammarInput {
                path: p.grammar_path,
                start: p.start,
                sync: p.sync,
            },
            source: SourceInput {
                path: p.source_path,
                text: p.source_text,
            },
            json: p.json,
            spans: p.spans,
            trivia: p.trivia,
            fuel: p.fuel,
            color: p.color.should_colorize(),
        }
    }
}

pub struct TraceParams {
    pub grammar_path: PathBuf,
    pub source_path: Option<PathBuf>,
    pub source_text: Option<String>,
    pub start: Option<String>,
    pub sync: Vec<String>,
    pub verbose: u8,
    pub fuel: Option<u32>,
    pub spans: bool,
    pub trivia: bool,
    pub color: ColorChoice,
}

impl TraceParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            grammar_path: grammar_path(m),
            source_path: m.get_one::<PathBuf>("source_path").cloned(),
            source_text: m.get_one::<String>("source_text").cloned(),
            start: m.get_one::<String>("start").cloned(),
            sync: sync_tokens(m),
            verbose: m.get_count("verbose"),
            fuel: fuel(m),
            spans: m.get_flag("spans"),
            trivia: m.get_flag("trivia"),
            color: parse_color(m),
        }
    }
}

impl From<TraceParams> for TraceArgs {
    fn from(p: TraceParams) -> Self {
        let verbosity = match p.verbose {
            0 => Verbosity::Default,
            1 => Verbosity::Verbose,
            _ => Verbosity::VeryVerbose,
        };

        Self {
            grammar: GrammarInput {
                path: p.grammar_path,
                start: p.start,
                sync: p.sync,
            },
            source: SourceInput {
                path: p.source_path,
                text: p.source_text,
            },
            verbosity,
            fuel: p.fuel,
            spans: p.spans,
            trivia: p.trivia,
            color: p.color.should_colorize(),
        }
    }
}

fn grammar_path(m: &ArgMatches) -> PathBuf {
    m.get_one::<PathBuf>("grammar_path")
        .cloned()
        .expect("clap enforces the required grammar path")
}

fn sync_tokens(m: &ArgMatches) -> Vec<String> {
    m.get_many::<String>("sync")
        .map(|tokens| tokens.cloned().collect())
        .unwrap_or_default()
}

fn fuel(m: &ArgMatches) -> Option<u32> {
    m.get_one::<u32>("fuel").copied()
}

fn parse_color(m: &ArgMatches) -> ColorChoice {
    match m.get_one::<String>("color").map(|s| s.as_str()) {
        Some("always") => ColorChoice::Always,
        Some("never") => ColorChoice::Never,
        _ => ColorChoice::Auto,
    }
}
