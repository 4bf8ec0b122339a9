use pest::Span;

/// Grammar tag of a source word. Words that are not in the fixed vocabulary
/// (numeric literals, variable and function references, string contents)
/// carry no kind until a pass resolves them.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum TermKind {
    Di,
    Ei,
    Dup,
    Add,
    Sub,
    Div,
    Mod,
    Omit,
    Swap,
    Drop,
    Over,
    Eq,
    Ls,
    Or,
    Read,
    Variable,
    Allot,
    Store,
    Load,
    If,
    Else,
    Then,
    Def,
    Ret,
    DefIntr,
    Do,
    Loop,
    Begin,
    Until,
    LoopCounter,
    Call,
    StringLiteral,
    Entrypoint,
}

pub fn word_to_kind(word: &str) -> Option<TermKind> {
    match word {
        "di" => Some(TermKind::Di),
        "ei" => Some(TermKind::Ei),
        "dup" => Some(TermKind::Dup),
        "+" => Some(TermKind::Add),
        "-" => Some(TermKind::Sub),
        "/" => Some(TermKind::Div),
        "mod" => Some(TermKind::Mod),
        "omit" => Some(TermKind::Omit),
        "." => Some(TermKind::Omit),
        "read" => Some(TermKind::Read),
        "swap" => Some(TermKind::Swap),
        "drop" => Some(TermKind::Drop),
        "over" => Some(TermKind::Over),
        "=" => Some(TermKind::Eq),
        "<" => Some(TermKind::Ls),
        "or" => Some(TermKind::Or),
        "variable" => Some(TermKind::Variable),
        "allot" => Some(TermKind::Allot),
        "!" => Some(TermKind::Store),
        "@" => Some(TermKind::Load),
        "if" => Some(TermKind::If),
        "else" => Some(TermKind::Else),
        "then" => Some(TermKind::Then),
        ":" => Some(TermKind::Def),
        ";" => Some(TermKind::Ret),
        ":intr" => Some(TermKind::DefIntr),
        "do" => Some(TermKind::Do),
        "loop" => Some(TermKind::Loop),
        "begin" => Some(TermKind::Begin),
        "until" => Some(TermKind::Until),
        "i" => Some(TermKind::LoopCounter),
        _ => None,
    }
}

/// A lexed source word with its per-pass metadata.
///
/// `word_number` doubles as the term's index in the list (the synthetic
/// entrypoint is word 0). `operand` holds a term-indexed target filled in by
/// the semantic passes; `converted` marks a term already consumed by a
/// neighbor, such as the name slot after `:` or `variable`.
#[derive(Clone, Debug)]
pub struct Term<'i> {
    pub word_number: usize,
    pub kind: Option<TermKind>,
    pub text: String,
    pub converted: bool,
    pub operand: Option<usize>,
    pub span: Span<'i>,
}

impl<'i> Term<'i> {
    pub fn new(word_number: usize, kind: Option<TermKind>, text: String, span: Span<'i>) -> Term<'i> {
        Term {
            word_number,
            kind,
            text,
            converted: false,
            operand: None,
            span,
        }
    }

    pub fn entrypoint(input: &'i str) -> Term<'i> {
        Term::new(
            0,
            Some(TermKind::Entrypoint),
            String::new(),
            Span::new(input, 0, 0).unwrap(),
        )
    }
}
