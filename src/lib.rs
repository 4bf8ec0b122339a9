pub mod constants;
pub mod isa;
pub mod machine;

/// Machine word. The whole toolchain models values as 64-bit signed
/// integers; arithmetic wraps on overflow.
pub type Word = i64;
