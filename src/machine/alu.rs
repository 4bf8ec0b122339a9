use super::Fault;
use crate::Word;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum AluOp {
    IncA,
    DecA,
    IncB,
    DecB,
    Add,
    Sub,
    Div,
    Mod,
    Eq,
    Ls,
    Or,
}

/// Pure combinational function of the two source operands.
pub fn evaluate(src_a: Word, src_b: Word, operation: AluOp) -> Result<Word, Fault> {
    let result = match operation {
        AluOp::IncA => src_a.wrapping_add(1),
        AluOp::DecA => src_a.wrapping_sub(1),
        AluOp::IncB => src_b.wrapping_add(1),
        AluOp::DecB => src_b.wrapping_sub(1),
        AluOp::Add => src_a.wrapping_add(src_b),
        AluOp::Sub => src_b.wrapping_sub(src_a),
        AluOp::Div => {
            if src_a == 0 {
                return Err(Fault::DivisionByZero);
            }
            src_b.wrapping_div(src_a)
        }
        AluOp::Mod => {
            if src_a == 0 {
                return Err(Fault::DivisionByZero);
            }
            src_b.wrapping_rem(src_a)
        }
        AluOp::Eq => (src_a == src_b) as Word,
        // The mnemonic is historical; compiled loops rely on a >= b here.
        AluOp::Ls => (src_a >= src_b) as Word,
        AluOp::Or => src_a | src_b,
    };
    Ok(result)
}

pub struct Alu {
    result: Word,
}

impl Alu {
    pub fn new() -> Alu {
        Alu { result: 0 }
    }

    pub fn result(&self) -> Word {
        self.result
    }

    pub fn operate(&mut self, src_a: Word, src_b: Word, operation: AluOp) -> Result<(), Fault> {
        self.result = evaluate(src_a, src_b, operation)?;
        Ok(())
    }
}
