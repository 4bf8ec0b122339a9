use pest_derive::Parser;

#[derive(Parser)]
#[grammar = "forth.pest"]
pub struct ForthParser;
