//! Translator for the [fcpu](../fcpu/index.html) stack machine.
//!
//! The main function provided by this crate is [`translate`](fn.translate.html),
//! which accepts a program written in a small Forth-like language and returns
//! the linearized instruction stream in one pass over the source.
//!
//! Tokenizing the language is implemented using [pest]. The main
//! [`Error`](type.Error.html) type used by this crate is just a type alias of
//! `pest::error::Error`, so semantic errors point at the offending word with
//! pest's pretty formatting.
//!
//! # The Language
//!
//! A program is a whitespace-separated sequence of words. Anything that is
//! not in the vocabulary below is either a decimal number literal, pushed
//! onto the data stack, or a reference to a variable or a function.
//!
//!  Word       | Effect
//! ------------|--------------------------------------------------------------
//! `+` `-` `/` `mod` `or` | Arithmetic on the two top cells (`-` computes second minus top)
//! `=`         | 1 if the two top cells are equal, else 0
//! `<`         | 1 if top >= second, else 0 (the historical comparison word)
//! `dup` `drop` `swap` `over` | The usual stack shuffles
//! `!` / `@`   | Store / load through the address on top of the stack
//! `.` / `omit`| Output: prints the char in the second cell, or the top cell as decimal digits when the second holds the numeric marker
//! `read`      | Pushes the character latched by the last input interrupt
//! `if ... [else ...] then` | Conditional; the branch runs when the popped top is nonzero
//! `do ... loop` | Counted loop over `limit start do`; `i` pushes the index
//! `begin ... until` | Loop until the popped top is nonzero
//! `variable NAME [N allot]` | Declares a data cell, optionally N extra cells
//! `: NAME ... ;` | Function definition
//! `:intr NAME ... ;` | The interrupt service routine
//! `di` / `ei` | Disable / enable interrupt delivery
//! `." text"`  | Prints the text through a compiled character loop
//!
//! The emitted program always starts with a jump over the relocated
//! interrupt service routine (the routine body occupies the low addresses so
//! delivery can vector to index 1) and ends with `halt`.
//!
//! [pest]: https://docs.rs/pest/

mod defs;
mod fixup;
mod interrupt;
mod lexer;
mod lower;
mod pairing;
mod parser;
mod term;


use fcpu::isa::Instruction;
use fcpu::Word;
use pest::Span;
use std::collections::HashMap;

pub use parser::Rule;

pub type Error = pest::error::Error<Rule>;

pub type Result<T> = std::result::Result<T, Error>;

fn new_parser_error(span: Span, message: String) -> Error {
    Error::new_from_span(pest::error::ErrorVariant::CustomError { message }, span)
}

/// Mutable translation state threaded through the passes. Every call to
/// [`translate`] starts from a fresh context.
pub(crate) struct Context {
    variables: HashMap<String, Word>,
    functions: HashMap<String, usize>,
    variable_address: Word,
    string_address: Word,
}

impl Context {
    fn new() -> Context {
        Context {
            variables: HashMap::new(),
            functions: HashMap::new(),
            variable_address: defs::VARIABLE_BASE,
            string_address: 0,
        }
    }
}

/// Compiles `input` into the executable instruction stream.
pub fn translate(input: &str) -> Result<Vec<Instruction>> {
    let mut terms = lexer::split_to_terms(input)?;
    let mut context = Context::new();

    pairing::pair_loops(&mut terms)?;
    defs::assign_functions(&mut terms, &mut context)?;
    defs::assign_variables(&mut terms, &mut context)?;
    defs::resolve_names(&mut terms, &context);
    pairing::link_conditionals(&mut terms)?;

    let terms = interrupt::relocate(terms);
    let drafts = lower::lower_terms(&terms, &mut context)?;
    Ok(fixup::fix_addresses(drafts))
}
