//! Parse source text and print the syntax tree.

use sprig_core::Colors;
use sprig_vm::{Engine, ParseOptions, ParseResult, TreePrinter};

use super::loader::{GrammarInput, SourceInput, compile_grammar, fail, load_source, source_name};

pub struct ParseArgs {
    pub grammar: GrammarInput,
    pub source: SourceInput,
    pub json: bool,
    pub spans: bool,
    pub trivia: bool,
    pub fuel: Option<u32>,
    pub color: bool,
}

pub fn run(args: ParseArgs) {
    let compilation = compile_grammar(&args.grammar).unwrap_or_else(|e| fail(e));
    let text = load_source(&args.source).unwrap_or_else(|e| fail(e));
    let program = compilation.program;

    let result = Engine::new(&program)
        .options(ParseOptions::new().exec_fuel(args.fuel))
        .parse(&text);

    if args.json {
        let value = result.tree.to_json(&program, args.trivia);
        match serde_json::to_string_pretty(&value) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                eprintln!("error: {}", e);
                std::process::exit(1);
            }
        }
    } else {
        print!(
            "{}",
            TreePrinter::new(&result.tree, &program)
                .with_spans(args.spans)
                .with_trivia(args.trivia)
                .colors(Colors::new(args.color))
                .dump()
        );
    }

    report(&result, &text, source_name(&args.source).as_deref(), args.color);
}

/// Print diagnostics and halts to stderr, exiting with status 1 on errors.
pub fn report(result: &ParseResult, text: &str, path: Option<&str>, color: bool) {
    if let Some(halt) = result.halted {
        let c = Colors::new(color);
        eprintln!("{}warning{}: parse stopped early: {}", c.red, c.reset, halt);
    }

    if !result.had_errors {
        return;
    }

    let mut printer = result.tree.diagnostics().source(text).colored(color);
    if let Some(path) = path {
        printer = printer.path(path);
    }
    eprintln!("{}", printer.render());
    std::process::exit(1);
}
