#[macro_use]
extern crate clap;

use clap::Arg;
use std::fs::File;
use std::io::prelude::*;
use std::io::BufReader;
use std::path::{Path, PathBuf};

#[derive(Debug)]
enum IOErrorContext {
    ReadSource,
    WriteTarget,
}

#[derive(Debug)]
enum Error {
    Fasm(fasm::Error),
    Io(std::io::Error, IOErrorContext, PathBuf),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::Io(err, context, path) => writeln!(
                f,
                "{} file \"{}\" failed: {}",
                match context {
                    IOErrorContext::ReadSource => "Reading source",
                    IOErrorContext::WriteTarget => "Writing target",
                },
                path.display(),
                err
            ),
            Error::Fasm(err) => {
                writeln!(f, "Translation failed:")?;
                write!(f, "{}", err)
            }
        }
    }
}

fn main() {
    let matches = app_from_crate!()
        .arg(
            Arg::with_name("SOURCE")
                .help("Sets the source file to translate")
                .required(true)
                .index(1),
        )
        .arg(
            Arg::with_name("TARGET")
                .help("Sets the file to write the compiled program to")
                .required(true)
                .index(2),
        )
        .get_matches();

    let source = matches.value_of("SOURCE").unwrap();
    let target = matches.value_of("TARGET").unwrap();

    if let Err(err) = fasm_main(source, target) {
        eprintln!("{}", err);
        std::process::exit(1);
    }
}

fn fasm_main(source: &str, target: &str) -> Result<(), Error> {
    let source_path = Path::new(source);

    let source_file = File::open(source_path)
        .map_err(|err| Error::Io(err, IOErrorContext::ReadSource, source_path.to_owned()))?;
    let mut buf_reader = BufReader::new(source_file);
    let mut input = String::new();

    buf_reader
        .read_to_string(&mut input)
        .map_err(|err| Error::Io(err, IOErrorContext::ReadSource, source_path.to_owned()))?;

    let program = fasm::translate(&input).map_err(|err| {
        Error::Fasm(match source_path.to_str() {
            Some(path_str) => err.with_path(path_str),
            None => err,
        })
    })?;

    let target_path = PathBuf::from(target);
    fcpu::isa::write_file(&target_path, &program)
        .map_err(|err| Error::Io(err, IOErrorContext::WriteTarget, target_path))?;

    println!(
        "source LoC: {} code instr: {}",
        input.split('\n').count(),
        program.len()
    );
    Ok(())
}
