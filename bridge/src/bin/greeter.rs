//! Minimal self-describing program, used to exercise the bridge end to end.

use std::env;
use std::process;

use argwire_core::{ArgOption, Program};

fn build_program() -> Program {
    Program::builder("greeter", "Prints a greeting.")
        .description("Prints a greeting for the given name, optionally saying goodbye instead.")
        .usage("greeter --name smith")
        .version("greeter 0.1.0\n")
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

fn main() {
    let args: Vec<String> = env::args().skip(1).collect();
    let mut program = build_program();
    program.parse(&args);
    if program.should_run() {
        let name = program.string_value("--name").unwrap_or_default();
        if program.flag_value("--bye").unwrap_or(false) {
            println!("Goodbye, {name}.");
        } else {
            println!("Hello, {name}.");
        }
    }
    process::exit(program.exit_code());
}
