use std::env;

use monkey_rs::runner::{run_file, run_prompt};

pub fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    match args.len() {
        1 => run_prompt(),
        2 => run_file(&args[1]),
        _ => {
            eprintln!("usage: monkey-rs [script]");
            std::process::exit(64);
        }
    }
}
