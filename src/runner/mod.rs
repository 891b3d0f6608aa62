//! Thin file/REPL runner for the demo binary. The library itself never
//! touches stdio or a logger; this module is the "external collaborator"
//! spec.md keeps outside the core's contract.

use std::io::{self, Write};
use std::sync::atomic::{AtomicBool, Ordering};

use log::{debug, warn};

use crate::environment::Environment;
use crate::evaluator::Evaluator;
use crate::lexer::Lexer;
use crate::parser::Parser;

pub static HAD_PARSE_ERROR: AtomicBool = AtomicBool::new(false);
pub static HAD_RUNTIME_ERROR: AtomicBool = AtomicBool::new(false);

/// Runs a whole script file, exiting with the process codes the original
/// Monkey driver uses: 65 for a parse error, 70 for a runtime error.
pub fn run_file(path: &str) {
    let source = std::fs::read_to_string(path).expect("failed to read script file");
    let env = Environment::new();
    let evaluator = Evaluator::new();
    run(&source, &env, &evaluator);

    if HAD_PARSE_ERROR.load(Ordering::Relaxed) {
        std::process::exit(65);
    }
    if HAD_RUNTIME_ERROR.load(Ordering::Relaxed) {
        std::process::exit(70);
    }
}

/// Line-oriented REPL. Bindings and the evaluator config persist across
/// lines; a failed line only resets the error flags, not the environment.
pub fn run_prompt() {
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let env = Environment::new();
    let evaluator = Evaluator::new();

    loop {
        print!(">> ");
        stdout.flush().unwrap();

        let mut line = String::new();
        let bytes_read = stdin.read_line(&mut line).unwrap();
        if bytes_read == 0 {
            println!();
            break;
        }

        run(&line, &env, &evaluator);
        HAD_PARSE_ERROR.store(false, Ordering::Relaxed);
        HAD_RUNTIME_ERROR.store(false, Ordering::Relaxed);
    }
}

fn run(source: &str, env: &Environment, evaluator: &Evaluator) {
    let lexer = Lexer::new(source);
    let mut parser = Parser::new(lexer);
    let program = parser.parse_program();

    if !parser.errors().is_empty() {
        for err in parser.errors() {
            warn!("parse error: {err}");
            eprintln!("{err}");
        }
        HAD_PARSE_ERROR.store(true, Ordering::Relaxed);
        return;
    }

    let result = evaluator.eval_program(&program, env);
    debug!("evaluated to {}", result.inspect());
    if result.is_error() {
        HAD_RUNTIME_ERROR.store(true, Ordering::Relaxed);
    }
    println!("{}", result.inspect());
}
