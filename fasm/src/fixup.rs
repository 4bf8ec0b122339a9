use crate::lower::{Draft, Operand};
use fcpu::isa::{Instruction, Opcode};
use fcpu::Word;

/// Flattens the per-term opcode lists into the final program.
///
/// Term-indexed operands are rewritten through the prefix sum of per-term
/// opcode counts; relative operands are anchored at the opcode's own index.
/// A trailing `halt` closes the program.
pub fn fix_addresses(term_drafts: Vec<Vec<Draft>>) -> Vec<Instruction> {
    let mut prefix = Vec::with_capacity(term_drafts.len() + 1);
    prefix.push(0usize);
    for drafts in &term_drafts {
        prefix.push(prefix.last().unwrap() + drafts.len());
    }

    let mut program = Vec::new();
    for drafts in term_drafts {
        for draft in drafts {
            let index = program.len();
            let arg = draft.operand.map(|operand| match operand {
                Operand::Const(value) => value,
                Operand::TermAddr(term_index) => prefix[term_index] as Word,
                Operand::Relative(offset) => index as Word + offset,
            });
            program.push(Instruction::new(index, draft.opcode, arg));
        }
    }
    program.push(Instruction::new(program.len(), Opcode::Halt, None));
    program
}
