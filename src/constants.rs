use super::Word;

pub const DATA_MEMORY_SIZE    : usize = 15_000;
pub const DATA_STACK_SIZE     : usize = 15_000;
pub const RETURN_STACK_SIZE   : usize = 15_000;
pub const PROGRAM_MEMORY_SIZE : usize = 15_000;

// Both pointers start above the bottom cells so that underflow is caught by
// the same bounds check as every other access.
pub const STACK_POINTER_RESET : i64 = 4;

pub const DATA_MEMORY_FILL    : Word = 4747;
pub const DATA_STACK_FILL     : Word = 8877;
pub const RETURN_STACK_FILL   : Word = 9988;

/// In-band output marker: when `NEXT` holds this code point, the output
/// instruction renders `TOS` as decimal digits instead of a character.
/// `DATA_STACK_FILL` is this very code point, so printing a lone value on an
/// otherwise untouched stack yields its decimal form.
pub const NUMERIC_OUTPUT_MARKER : char = '\u{22AD}';

/// Value of the input latch before any token has been delivered.
pub const INPUT_RESET : char = 'h';

/// Program index the machine vectors to on interrupt delivery.
pub const ISR_ENTRY : Word = 1;

pub const DEFAULT_INSTRUCTION_LIMIT : u64 = 55_000;
