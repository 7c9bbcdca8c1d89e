use std::path::PathBuf;

use treeshot_backends::ParseOptions;
use treeshot_core::{Printer, Value, canonical_printer};

pub struct AstArgs {
    pub source_path: PathBuf,
    pub backend: String,
    pub tokens: bool,
    pub jsx: bool,
}

pub fn run(args: AstArgs) {
    let Some(backend) = treeshot_backends::from_name(&args.backend) else {
        eprintln!("error: unknown backend '{}'", args.backend);
        eprintln!();
        eprintln!("Run 'treeshot backends' to see available backends.");
        std::process::exit(1);
    };

    let source = match std::fs::read_to_string(&args.source_path) {
        Ok(source) => source,
        Err(e) => {
            eprintln!("error: failed to read {}: {e}", args.source_path.display());
            std::process::exit(1);
        }
    };

    let jsx = args.jsx
        || args
            .source_path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.ends_with('x'));

    let printer = canonical_printer(backend.tags());
    let output = match backend.parse(&source, &ParseOptions::for_fixture(jsx)) {
        Ok(output) => output,
        Err(e) => {
            eprintln!("error: {e}");
            std::process::exit(1);
        }
    };

    print_value(&printer, &output.ast);
    if args.tokens {
        println!();
        print_value(&printer, &Value::from(output.tokens));
    }
}

fn print_value(printer: &Printer, value: &Value) {
    match printer.render(value) {
        Ok(text) => println!("{text}"),
        Err(e) => {
            eprintln!("error: {e}");
            std::process::exit(1);
        }
    }
}
