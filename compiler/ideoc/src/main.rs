//! Command-line driver: hand-rolled argument dispatch over the five
//! commands of the command surface (§4.10). No argument-parsing crate —
//! every flag here is a manual prefix check, the same way the teacher's
//! own driver reads its own `std::env::args()`.

use std::path::PathBuf;

use ideoc::commands::{compile, parse, run, test_all, tokenize};

fn main() {
    ideoc::tracing_setup::init();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        std::process::exit(1);
    }

    let command = args[1].as_str();
    let mut file: Option<PathBuf> = None;
    let mut machine = false;
    for arg in args.iter().skip(2) {
        if arg == "--json" || arg == "--machine" {
            machine = true;
        } else if file.is_none() {
            file = Some(PathBuf::from(arg));
        }
    }

    match command {
        "help" | "--help" | "-h" => {
            print_usage();
            return;
        }
        "version" | "--version" => {
            println!("ideoc {}", env!("CARGO_PKG_VERSION"));
            return;
        }
        _ => {}
    }

    let Some(file) = file else {
        eprintln!("Usage: ideoc {command} <file> [--json]");
        std::process::exit(1);
    };

    match command {
        "tokenize" => dispatch(tokenize::run(&file), machine),
        "parse" => dispatch(parse::run(&file), machine),
        "compile" => dispatch(compile::run(&file), machine),
        "run" => dispatch(run::run(&file), machine),
        "test" => dispatch(test_all::run(&file), machine),
        other => {
            eprintln!("Unknown command: {other}");
            eprintln!();
            print_usage();
            std::process::exit(1);
        }
    }
}

fn dispatch<T: serde::Serialize + std::fmt::Debug>(envelope: ideo_diagnostic::CommandEnvelope<T>, machine: bool) {
    let ok = envelope.ok;
    if machine {
        println!("{}", envelope.render_machine());
    } else {
        println!("{}", envelope.render_human());
    }
    std::process::exit(i32::from(!ok));
}

fn print_usage() {
    println!("ideoc — compiler driver");
    println!();
    println!("Usage: ideoc <command> <file> [--json]");
    println!();
    println!("Commands:");
    println!("  tokenize <file>   Lex a file and report its tokens");
    println!("  parse <file>      Parse a file and render its canonical form");
    println!("  compile <file>    Compile a file's project and emit every module");
    println!("  run <file>        Compile and arrange a runnable entry point");
    println!("  test <file>       Compile every file under the project's tests/ directory");
    println!("  help              Show this help message");
    println!("  version           Show version information");
    println!();
    println!("Options:");
    println!("  --json            Render the command envelope as a single-line machine record");
    println!();
    println!("Examples:");
    println!("  ideoc compile src/main.ideo");
    println!("  ideoc run src/main.ideo --json");
    println!("  ideoc test src/main.ideo");
}
