use crate::new_parser_error;
use crate::term::{Term, TermKind};
use crate::{Error, Result};

/// Pairs `do`/`loop` and `begin`/`until` terminators with their openers.
/// Each terminator receives its opener's term index as operand.
pub fn pair_loops(terms: &mut [Term]) -> Result<()> {
    pair(terms, TermKind::Do, TermKind::Loop, "unbalanced do ... loop")?;
    pair(
        terms,
        TermKind::Begin,
        TermKind::Until,
        "unbalanced begin ... until",
    )
}

fn pair(terms: &mut [Term], opener: TermKind, closer: TermKind, what: &str) -> Result<()> {
    let mut open = Vec::new();
    for index in 0..terms.len() {
        if terms[index].kind == Some(opener) {
            open.push(index);
        } else if terms[index].kind == Some(closer) {
            let start = open
                .pop()
                .ok_or_else(|| new_parser_error(terms[index].span.clone(), what.to_owned()))?;
            terms[index].operand = Some(start);
        }
    }
    if let Some(&index) = open.first() {
        return Err(new_parser_error(terms[index].span.clone(), what.to_owned()));
    }
    Ok(())
}

/// Wires `if`/`else`/`then` chains. `if` jumps past its branch when the
/// condition is zero; `else` jumps past the alternative.
pub fn link_conditionals(terms: &mut [Term]) -> Result<()> {
    let mut open: Vec<usize> = Vec::new();
    for index in 0..terms.len() {
        match terms[index].kind {
            Some(TermKind::If) | Some(TermKind::Else) => open.push(index),
            Some(TermKind::Then) => {
                let closing = terms[index].word_number + 1;
                let top = open.pop().ok_or_else(|| unbalanced(terms, index))?;
                if terms[top].kind == Some(TermKind::Else) {
                    let branch = open.pop().ok_or_else(|| unbalanced(terms, index))?;
                    if terms[branch].kind != Some(TermKind::If) {
                        return Err(unbalanced(terms, branch));
                    }
                    terms[top].operand = Some(closing);
                    terms[branch].operand = Some(terms[top].word_number + 1);
                } else {
                    terms[top].operand = Some(closing);
                }
            }
            _ => {}
        }
    }
    if let Some(&index) = open.first() {
        return Err(unbalanced(terms, index));
    }
    Ok(())
}

fn unbalanced(terms: &[Term], index: usize) -> Error {
    new_parser_error(
        terms[index].span.clone(),
        "unbalanced if ... else ... then".to_owned(),
    )
}
