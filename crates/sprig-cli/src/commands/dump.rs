use sprig_core::Colors;

use super::loader::{GrammarInput, compile_grammar, fail};

pub struct DumpArgs {
    pub grammar: GrammarInput,
    pub color: bool,
}

pub fn run(args: DumpArgs) {
    let compilation = compile_grammar(&args.grammar).unwrap_or_else(|e| fail(e));

    print!(
        "{}",
        sprig_bytecode::dump(&compilation.program, Colors::new(args.color))
    );
}
