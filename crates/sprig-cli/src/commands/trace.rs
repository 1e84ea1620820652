//! Trace rule calls and recovery rounds for debugging grammars.

use sprig_core::Colors;
use sprig_vm::{Engine, ParseOptions, PrintTracer, TreePrinter, Verbosity};

use super::loader::{GrammarInput, SourceInput, compile_grammar, fail, load_source, source_name};
use super::parse::report;

pub struct TraceArgs {
    pub grammar: GrammarInput,
    pub source: SourceInput,
    pub verbosity: Verbosity,
    pub fuel: Option<u32>,
    pub spans: bool,
    pub trivia: bool,
    pub color: bool,
}

pub fn run(args: TraceArgs) {
    let compilation = compile_grammar(&args.grammar).unwrap_or_else(|e| fail(e));
    let text = load_source(&args.source).unwrap_or_else(|e| fail(e));
    let program = compilation.program;
    let colors = Colors::new(args.color);

    let mut tracer = PrintTracer::new(&text, &program, args.verbosity, colors);
    let result = Engine::new(&program)
        .options(ParseOptions::new().exec_fuel(args.fuel))
        .parse_traced(&text, &mut tracer);
    tracer.print();

    println!("{}---{}", colors.dim, colors.reset);
    print!(
        "{}",
        TreePrinter::new(&result.tree, &program)
            .with_spans(args.spans)
            .with_trivia(args.trivia)
            .colors(colors)
            .dump()
    );

    report(&result, &text, source_name(&args.source).as_deref(), args.color);
}
