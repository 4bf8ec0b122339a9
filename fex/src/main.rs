#[macro_use]
extern crate clap;

use clap::{Arg, ArgGroup};

fn main() {
    env_logger::init();

    let matches = app_from_crate!()
        .arg(
            Arg::with_name("CODE")
                .help("Sets the compiled program file to run")
                .index(1),
        )
        .arg(
            Arg::with_name("INPUT")
                .help("Sets the input schedule file")
                .index(2),
        )
        .arg(
            Arg::with_name("source")
                .short("s")
                .long("source")
                .takes_value(true)
                .value_name("SOURCE")
                .help("Translates and runs a source file directly"),
        )
        .arg(
            Arg::with_name("limit")
                .short("l")
                .long("limit")
                .takes_value(true)
                .value_name("LIMIT")
                .default_value("55000")
                .help("Sets the instruction limit"),
        )
        .group(
            ArgGroup::with_name("program")
                .args(&["CODE", "source"])
                .required(true),
        )
        .get_matches();

    let limit = value_t!(matches.value_of("limit"), u64).unwrap_or_else(|err| err.exit());
    let input = matches.value_of("INPUT");

    let result = match matches.value_of("CODE") {
        Some(code) => fex::run_program_file(code, input, limit),
        None => fex::run_source_file(matches.value_of("source").unwrap(), input, limit),
    };

    match result {
        Ok(outcome) => println!(
            "Output: {}\nInstructions: {}\nTicks: {}",
            outcome.output,
            outcome.instructions,
            outcome.ticks.saturating_sub(1)
        ),
        Err(err) => {
            eprintln!("{}", err);
            std::process::exit(1);
        }
    }
}
