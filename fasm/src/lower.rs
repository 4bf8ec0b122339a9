use crate::new_parser_error;
use crate::term::{Term, TermKind};
use crate::{Context, Result};
use fcpu::isa::Opcode;
use fcpu::Word;

/// An operand that still needs the address fixup pass.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Operand {
    /// Final numeric literal.
    Const(Word),
    /// Term-indexed address, rewritten to an instruction index.
    TermAddr(usize),
    /// Offset from the instruction's own index.
    Relative(i64),
}

/// One emitted opcode before address fixup.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Draft {
    pub opcode: Opcode,
    pub operand: Option<Operand>,
}

impl Draft {
    fn plain(opcode: Opcode) -> Draft {
        Draft {
            opcode,
            operand: None,
        }
    }

    fn to_term(opcode: Opcode, target: usize) -> Draft {
        Draft {
            opcode,
            operand: Some(Operand::TermAddr(target)),
        }
    }

    fn push(value: Word) -> Draft {
        Draft {
            opcode: Opcode::Push,
            operand: Some(Operand::Const(value)),
        }
    }

    fn relative(opcode: Opcode, offset: i64) -> Draft {
        Draft {
            opcode,
            operand: Some(Operand::Relative(offset)),
        }
    }
}

/// Expands every term into its opcode sequence, in term order.
pub fn lower_terms<'i>(terms: &[Term<'i>], context: &mut Context) -> Result<Vec<Vec<Draft>>> {
    terms.iter().map(|term| lower_term(term, context)).collect()
}

fn lower_term<'i>(term: &Term<'i>, context: &mut Context) -> Result<Vec<Draft>> {
    let kind = match term.kind {
        None => return lower_literal(term),
        Some(TermKind::StringLiteral) => return Ok(lower_string(term, context)),
        Some(kind) => kind,
    };

    let drafts = match kind {
        TermKind::Di => vec![Draft::plain(Opcode::Di)],
        TermKind::Ei => vec![Draft::plain(Opcode::Ei)],
        TermKind::Dup => vec![Draft::plain(Opcode::Dup)],
        TermKind::Add => vec![Draft::plain(Opcode::Add)],
        TermKind::Sub => vec![Draft::plain(Opcode::Sub)],
        TermKind::Div => vec![Draft::plain(Opcode::Div)],
        TermKind::Mod => vec![Draft::plain(Opcode::Mod)],
        TermKind::Or => vec![Draft::plain(Opcode::Or)],
        TermKind::Omit => vec![Draft::plain(Opcode::Omit)],
        TermKind::Swap => vec![Draft::plain(Opcode::Swap)],
        TermKind::Drop => vec![Draft::plain(Opcode::Drop)],
        TermKind::Over => vec![Draft::plain(Opcode::Over)],
        TermKind::Eq => vec![Draft::plain(Opcode::Eq)],
        TermKind::Ls => vec![Draft::plain(Opcode::Ls)],
        TermKind::Read => vec![Draft::plain(Opcode::Read)],
        TermKind::Store => vec![Draft::plain(Opcode::Store)],
        TermKind::Load => vec![Draft::plain(Opcode::Load)],
        TermKind::Ret => vec![Draft::plain(Opcode::Ret)],

        TermKind::Variable
        | TermKind::Allot
        | TermKind::Then
        | TermKind::DefIntr
        | TermKind::Begin => Vec::new(),

        // The pairing and definition passes have filled these operands.
        TermKind::If => vec![Draft::to_term(Opcode::Zjmp, term.operand.unwrap())],
        TermKind::Until => vec![Draft::to_term(Opcode::Zjmp, term.operand.unwrap())],
        TermKind::Else => vec![Draft::to_term(Opcode::Jmp, term.operand.unwrap())],
        TermKind::Def => vec![Draft::to_term(Opcode::Jmp, term.operand.unwrap())],
        TermKind::Call => vec![Draft::to_term(Opcode::Call, term.operand.unwrap())],
        TermKind::Entrypoint => vec![Draft::to_term(Opcode::Jmp, term.operand.unwrap())],

        // The loop bookkeeping lives on the return stack; interrupts are
        // masked while it is shuffled.
        TermKind::Do => vec![
            Draft::plain(Opcode::Di),
            Draft::plain(Opcode::Pop),
            Draft::plain(Opcode::Pop),
            Draft::plain(Opcode::Ei),
        ],
        TermKind::Loop => vec![
            Draft::plain(Opcode::Di),
            Draft::plain(Opcode::Rpop),
            Draft::plain(Opcode::Rpop),
            Draft::push(1),
            Draft::plain(Opcode::Add),
            Draft::plain(Opcode::Over),
            Draft::plain(Opcode::Over),
            Draft::plain(Opcode::Ls),
            Draft::to_term(Opcode::Zjmp, term.operand.unwrap()),
            Draft::plain(Opcode::Drop),
            Draft::plain(Opcode::Drop),
            Draft::plain(Opcode::Ei),
        ],
        TermKind::LoopCounter => vec![
            Draft::plain(Opcode::Di),
            Draft::plain(Opcode::Rpop),
            Draft::plain(Opcode::Rpop),
            Draft::plain(Opcode::Over),
            Draft::plain(Opcode::Over),
            Draft::plain(Opcode::Pop),
            Draft::plain(Opcode::Pop),
            Draft::plain(Opcode::Swap),
            Draft::plain(Opcode::Drop),
            Draft::plain(Opcode::Ei),
        ],

        TermKind::StringLiteral => unreachable!(),
    };
    Ok(drafts)
}

fn lower_literal<'i>(term: &Term<'i>) -> Result<Vec<Draft>> {
    if term.converted {
        return Ok(Vec::new());
    }
    let value: Word = term.text.parse().map_err(|_| {
        new_parser_error(
            term.span.clone(),
            format!("unknown word \"{}\"", term.text),
        )
    })?;
    Ok(vec![Draft::push(value)])
}

/// Writes the string into the pool cell by cell (one length header, one cell
/// per character), then emits a loop that walks those cells and prints them.
fn lower_string<'i>(term: &Term<'i>, context: &mut Context) -> Vec<Draft> {
    let start = context.string_address;
    let mut drafts = vec![Draft::plain(Opcode::Pop)];

    drafts.push(Draft::push(term.text.chars().count() as Word));
    drafts.push(Draft::push(context.string_address));
    drafts.push(Draft::plain(Opcode::Store));
    context.string_address += 1;

    for symbol in term.text.chars() {
        drafts.push(Draft::push(symbol as Word));
        drafts.push(Draft::push(context.string_address));
        drafts.push(Draft::plain(Opcode::Store));
        context.string_address += 1;
    }

    drafts.push(Draft::push(start));
    drafts.push(Draft::plain(Opcode::Load));
    drafts.push(Draft::push(start));
    drafts.push(Draft::push(1));
    drafts.push(Draft::plain(Opcode::Add));
    drafts.push(Draft::plain(Opcode::Over));
    drafts.push(Draft::relative(Opcode::Zjmp, 12));
    drafts.push(Draft::plain(Opcode::Dup));
    drafts.push(Draft::plain(Opcode::Load));
    drafts.push(Draft::plain(Opcode::Rpop));
    drafts.push(Draft::plain(Opcode::Dup));
    drafts.push(Draft::plain(Opcode::Pop));
    drafts.push(Draft::plain(Opcode::Omit));
    drafts.push(Draft::plain(Opcode::Swap));
    drafts.push(Draft::push(1));
    drafts.push(Draft::plain(Opcode::Sub));
    drafts.push(Draft::plain(Opcode::Swap));
    drafts.push(Draft::relative(Opcode::Jmp, -14));
    drafts
}
