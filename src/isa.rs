//! The instruction set shared by the translator and the machine.
//!
//! A compiled program is a JSON array with one instruction object per line:
//!
//! ```text
//! [{"index": 0, "command": "jmp", "arg": 4},
//!  {"index": 1, "command": "push", "arg": 7},
//!  ...]
//! ```
//!
//! `command` is the lowercase mnemonic; `arg` is omitted when the opcode
//! takes no operand.

use crate::Word;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs::File;
use std::io::prelude::*;
use std::io::BufWriter;
use std::path::Path;

#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Opcode {
    // Stack
    Drop,
    Swap,
    Over,
    Dup,
    // ALU
    Add,
    Sub,
    Div,
    Mod,
    Eq,
    Ls,
    Or,
    // Memory
    Load,
    Store,
    // Literal
    Push,
    // Control
    Jmp,
    Zjmp,
    Call,
    Ret,
    Halt,
    // Return stack
    Pop,
    Rpop,
    // I/O
    Omit,
    Read,
    // Interrupt control
    Di,
    Ei,
}

impl Opcode {
    pub fn mnemonic(self) -> &'static str {
        match self {
            Opcode::Drop => "drop",
            Opcode::Swap => "swap",
            Opcode::Over => "over",
            Opcode::Dup => "dup",
            Opcode::Add => "add",
            Opcode::Sub => "sub",
            Opcode::Div => "div",
            Opcode::Mod => "mod",
            Opcode::Eq => "eq",
            Opcode::Ls => "ls",
            Opcode::Or => "or",
            Opcode::Load => "load",
            Opcode::Store => "store",
            Opcode::Push => "push",
            Opcode::Jmp => "jmp",
            Opcode::Zjmp => "zjmp",
            Opcode::Call => "call",
            Opcode::Ret => "ret",
            Opcode::Halt => "halt",
            Opcode::Pop => "pop",
            Opcode::Rpop => "rpop",
            Opcode::Omit => "omit",
            Opcode::Read => "read",
            Opcode::Di => "di",
            Opcode::Ei => "ei",
        }
    }
}

impl fmt::Display for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.mnemonic())
    }
}

#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct Instruction {
    pub index: usize,
    pub command: Opcode,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub arg: Option<Word>,
}

impl Instruction {
    pub fn new(index: usize, command: Opcode, arg: Option<Word>) -> Instruction {
        Instruction {
            index,
            command,
            arg,
        }
    }
}

pub fn read_file<P: AsRef<Path>>(path: P) -> std::io::Result<Vec<Instruction>> {
    let mut text = String::new();
    File::open(path)?.read_to_string(&mut text)?;
    let program = serde_json::from_str(&text)?;
    Ok(program)
}

pub fn write_file<P: AsRef<Path>>(path: P, program: &[Instruction]) -> std::io::Result<()> {
    let mut lines = Vec::with_capacity(program.len());
    for instruction in program {
        lines.push(serde_json::to_string(instruction)?);
    }
    let mut writer = BufWriter::new(File::create(path)?);
    write!(writer, "[{}]", lines.join(",\n "))?;
    Ok(())
}
