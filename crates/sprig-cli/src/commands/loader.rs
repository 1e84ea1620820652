//! Loading grammars and source text for the commands.

use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use sprig_compiler::{Compilation, Compiler, GrammarError};
use sprig_core::Grammar;

/// Where the grammar comes from and how to compile it.
pub struct GrammarInput {
    pub path: PathBuf,
    pub start: Option<String>,
    pub sync: Vec<String>,
}

/// Source text: inline text wins over a path; `-` reads stdin.
pub struct SourceInput {
    pub path: Option<PathBuf>,
    pub text: Option<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("failed to read '{}': {source}", .path.display())]
    Read { path: PathBuf, source: io::Error },

    #[error("failed to read stdin: {0}")]
    Stdin(io::Error),

    #[error("'{}': unknown grammar format (expected .json or .bin)", .0.display())]
    UnknownFormat(PathBuf),

    #[error("'{}': {source}", .path.display())]
    Grammar {
        path: PathBuf,
        source: sprig_core::LoadError,
    },

    #[error(transparent)]
    Compile(#[from] GrammarError),

    #[error("source is required: use a positional argument, -s/--source, or - for stdin")]
    MissingSource,
}

pub fn load_grammar(path: &Path) -> Result<Grammar, LoadError> {
    let grammar = match path.extension().and_then(|ext| ext.to_str()) {
        Some("json") => Grammar::from_json(&read_file(path)?),
        Some("bin") => {
            let bytes = fs::read(path).map_err(|source| LoadError::Read {
                path: path.to_owned(),
                source,
            })?;
            Grammar::from_binary(&bytes)
        }
        _ => return Err(LoadError::UnknownFormat(path.to_owned())),
    };

    grammar.map_err(|source| LoadError::Grammar {
        path: path.to_owned(),
        source,
    })
}

/// Load and compile, keeping lint warnings.
pub fn compile_grammar(input: &GrammarInput) -> Result<Compilation, LoadError> {
    let grammar = load_grammar(&input.path)?;

    let mut compiler = Compiler::new().sync_tokens(input.sync.iter().cloned());
    if let Some(start) = &input.start {
        compiler = compiler.start_rule(start.clone());
    }

    Ok(compiler.compile(&grammar)?)
}

pub fn load_source(input: &SourceInput) -> Result<String, LoadError> {
    if let Some(text) = &input.text {
        return Ok(text.clone());
    }

    match input.path.as_deref() {
        Some(path) if path.as_os_str() == "-" => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .map_err(LoadError::Stdin)?;
            Ok(buf)
        }
        Some(path) => read_file(path),
        None => Err(LoadError::MissingSource),
    }
}

/// Name shown in diagnostics for the source.
pub fn source_name(input: &SourceInput) -> Option<String> {
    if input.text.is_some() {
        return None;
    }
    match input.path.as_deref() {
        Some(path) if path.as_os_str() == "-" => Some("<stdin>".to_owned()),
        Some(path) => Some(path.to_string_lossy().into_owned()),
        None => None,
    }
}

fn read_file(path: &Path) -> Result<String, LoadError> {
    fs::read_to_string(path).map_err(|source| LoadError::Read {
        path: path.to_owned(),
        source,
    })
}

/// Print the error and exit with status 1.
pub fn fail(err: LoadError) -> ! {
    eprintln!("error: {}", err);
    std::process::exit(1);
}
