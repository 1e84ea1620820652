use sprig_core::Colors;

use super::loader::{GrammarInput, compile_grammar, fail};

pub struct CheckArgs {
    pub grammar: GrammarInput,
    pub strict: bool,
    pub color: bool,
}

pub fn run(args: CheckArgs) {
    let compilation = compile_grammar(&args.grammar).unwrap_or_else(|e| fail(e));

    let c = Colors::new(args.color);
    for warning in &compilation.warnings {
        eprintln!("{}warning{}: {}", c.red, c.reset, warning);
    }

    if args.strict && !compilation.warnings.is_empty() {
        std::process::exit(1);
    }

    // Silent on success (like cargo check)
}
