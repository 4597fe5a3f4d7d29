// Runic: interpreter for a stack-based code-golf language of one-glyph commands

use std::fs;
use std::path::Path;
use std::thread;

use log::LevelFilter;
use simple_logger::SimpleLogger;

use runic::interpreter::constants::RECURSION_STACK_BYTES;
use runic::interpreter::engine::{Interpreter, LogObserver};
use runic::parser::ast;
use runic::parser::lexer::tokenize;
use runic::values::Value;

fn main() {
    let args: Vec<String> = std::env::args().collect();
    let program_name = args.first().map(|s| s.as_str()).unwrap_or("runic");

    let mut trace = false;
    let mut listing = false;
    let mut positional: Vec<String> = Vec::new();
    for arg in &args[1..] {
        match arg.as_str() {
            "--trace" => trace = true,
            "--listing" => listing = true,
            other => positional.push(other.to_string()),
        }
    }

    if positional.is_empty() {
        eprintln!("Error: No input file provided");
        eprintln!();
        eprintln!("Usage: {} <program> [parameters...] [--trace] [--listing]", program_name);
        eprintln!();
        eprintln!("Parameters are integers, words, or Ø for null.");
        eprintln!("  --trace    log every command application");
        eprintln!("  --listing  print the parsed program tree before running");
        std::process::exit(1);
    }

    let source_file = positional.remove(0);
    if !Path::new(&source_file).exists() {
        eprintln!("Error: File '{}' not found", source_file);
        std::process::exit(1);
    }

    let source = match fs::read_to_string(&source_file) {
        Ok(text) => text,
        Err(e) => {
            eprintln!("Error: cannot read '{}': {}", source_file, e);
            std::process::exit(1);
        }
    };

    let level = if trace { LevelFilter::Trace } else { LevelFilter::Warn };
    if let Err(e) = SimpleLogger::new().with_level(level).init() {
        eprintln!("Warning: logger init failed: {}", e);
    }

    // Program files are keyed by their stem for .in/.out lookup.
    let name = Path::new(&source_file)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("f")
        .to_string();

    // Deep recursion is an expected workload; run the interpreter on a
    // thread with a much larger stack than the platform default.
    let worker = thread::Builder::new()
        .name("interpreter".to_string())
        .stack_size(RECURSION_STACK_BYTES)
        .spawn(move || execute(&source, &positional, &name, trace, listing));

    let outcome = match worker {
        Ok(handle) => match handle.join() {
            Ok(outcome) => outcome,
            Err(_) => Err("interpreter thread panicked".to_string()),
        },
        Err(e) => Err(format!("cannot spawn interpreter thread: {}", e)),
    };

    match outcome {
        Ok(result) => {
            if !result.is_empty() {
                println!("{}", result);
            }
        }
        Err(message) => {
            eprintln!("Error: {}", message);
            std::process::exit(1);
        }
    }
}

/// Parse, optionally list, run, and flatten the final stack for display.
fn execute(
    source: &str,
    raw_parameters: &[String],
    name: &str,
    trace: bool,
    listing: bool,
) -> Result<String, String> {
    let interpreter = Interpreter::new();
    if trace {
        interpreter.set_observer(Box::new(LogObserver));
    }

    let tokens = tokenize(source);
    let forest = ast::build(&tokens, interpreter.registry()).map_err(|e| e.to_string())?;

    if listing {
        eprintln!("{}", forest.listing(interpreter.registry()));
    }

    let mut parameters = vec![Value::Text(name.to_string())];
    parameters.extend(raw_parameters.iter().map(|raw| parse_parameter(raw)));

    let stack = interpreter.run(&forest, parameters).map_err(|e| e.to_string())?;
    Ok(render_stack(&stack))
}

/// Interpret a command-line parameter as a program value.
fn parse_parameter(raw: &str) -> Value {
    if raw.is_empty() || raw == "Ø" {
        return Value::Absent;
    }
    match raw.parse::<i64>() {
        Ok(n) => Value::Number(n),
        Err(_) => Value::Text(raw.to_string()),
    }
}

/// Collapse the final stack for display: nulls drop out, a singleton
/// collapses to the bare value.
fn render_stack(stack: &[Value]) -> String {
    let kept: Vec<String> = stack
        .iter()
        .filter(|v| !v.is_absent())
        .map(|v| v.to_string())
        .collect();
    match kept.as_slice() {
        [] => String::new(),
        [single] => single.clone(),
        many => format!("[{}]", many.join(" ")),
    }
}
