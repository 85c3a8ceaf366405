//! Self-describing program set, used to exercise set dispatch through the
//! bridge.

use std::env;
use std::process;

use argwire_core::{ArgOption, Program, ProgramSet, SetOutcome};

fn greet() -> Program {
    Program::builder("greet", "Greets someone.")
        .usage("toolbox greet --name smith")
        .option(
            ArgOption::flag("--bye")
                .with_summary("Say goodbye at the end.")
                .with_usage("--bye"),
        )
        .option(
            ArgOption::string("--name", "")
                .required()
                .with_summary("Name to greet.")
                .with_usage("--name smith"),
        )
        .build()
}

fn stats() -> Program {
    Program::builder("stats", "Counts lines in text files.")
        .usage("toolbox stats --in data.txt")
        .option(
            ArgOption::file_read_vector("--in")
                .with_extensions([".txt"])
                .with_summary("Files to count.")
                .with_usage("--in data.txt"),
        )
        .option(
            ArgOption::flag("--zero")
                .with_summary("Print empty files too.")
                .with_usage("--zero"),
        )
        .option(ArgOption::thread_count())
        .build()
}

fn run_greet(program: &Program) -> i32 {
    let name = program.string_value("--name").unwrap_or_default();
    if program.flag_value("--bye").unwrap_or(false) {
        println!("Goodbye, {name}.");
    } else {
        println!("Hello, {name}.");
    }
    program.exit_code()
}

fn run_stats(program: &Program) -> i32 {
    let files = program.string_values("--in").unwrap_or(&[]);
    let show_empty = program.flag_value("--zero").unwrap_or(false);
    for path in files {
        match std::fs::read_to_string(path) {
            Ok(text) => {
                let count = text.lines().count();
                if count > 0 || show_empty {
                    println!("{count}\t{path}");
                }
            }
            Err(problem) => {
                eprintln!("Cannot read {path}: {problem}");
                return 1;
            }
        }
    }
    program.exit_code()
}

fn main() {
    let args: Vec<String> = env::args().skip(1).collect();
    let set = ProgramSet::new("toolbox", "Small text utilities.")
        .with_version("toolbox 0.1.0\n")
        .with_program("greet", greet)
        .with_program("stats", stats);
    let code = match set.dispatch(&args) {
        SetOutcome::Program(program) => {
            if program.should_run() {
                match program.name.as_str() {
                    "greet" => run_greet(&program),
                    "stats" => run_stats(&program),
                    _ => program.exit_code(),
                }
            } else {
                program.exit_code()
            }
        }
        SetOutcome::Handled => 0,
        SetOutcome::Failed => 1,
    };
    process::exit(code);
}
