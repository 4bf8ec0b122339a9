//! Loads a compiled program and an optional input schedule, runs the
//! simulation and reports the outcome. Programs can also be translated from
//! source on the fly.

use fcpu::machine::{self, Fault, Outcome};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

/// Timed input tokens, sorted by tick: `[[10, "A"], [20, "B"]]`.
pub type Schedule = Vec<(u64, char)>;

#[derive(Debug)]
pub enum Error {
    Io(std::io::Error, PathBuf),
    Schedule(serde_json::Error, PathBuf),
    Translate(fasm::Error),
    Machine(Fault),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(err, path) => write!(f, "reading \"{}\" failed: {}", path.display(), err),
            Error::Schedule(err, path) => write!(
                f,
                "parsing input schedule \"{}\" failed: {}",
                path.display(),
                err
            ),
            Error::Translate(err) => {
                writeln!(f, "translation failed:")?;
                write!(f, "{}", err)
            }
            Error::Machine(fault) => write!(f, "machine fault: {}", fault),
        }
    }
}

impl std::error::Error for Error {}

pub fn read_schedule<P: AsRef<Path>>(path: P) -> Result<Schedule, Error> {
    let text = fs::read_to_string(&path)
        .map_err(|err| Error::Io(err, path.as_ref().to_owned()))?;
    serde_json::from_str(&text).map_err(|err| Error::Schedule(err, path.as_ref().to_owned()))
}

fn schedule_from(input: Option<&str>) -> Result<Schedule, Error> {
    match input {
        Some(path) => read_schedule(path),
        None => Ok(Vec::new()),
    }
}

/// Runs a compiled program file.
pub fn run_program_file(code: &str, input: Option<&str>, limit: u64) -> Result<Outcome, Error> {
    let program =
        fcpu::isa::read_file(code).map_err(|err| Error::Io(err, PathBuf::from(code)))?;
    let schedule = schedule_from(input)?;
    machine::simulate(&program, schedule, limit).map_err(Error::Machine)
}

/// Translates a source file and runs it in one step.
pub fn run_source_file(source: &str, input: Option<&str>, limit: u64) -> Result<Outcome, Error> {
    let text =
        fs::read_to_string(source).map_err(|err| Error::Io(err, PathBuf::from(source)))?;
    let program = fasm::translate(&text).map_err(Error::Translate)?;
    let schedule = schedule_from(input)?;
    machine::simulate(&program, schedule, limit).map_err(Error::Machine)
}
