use crate::term::{Term, TermKind};

/// Moves the interrupt service routine in front of the main body.
///
/// The relocated order is `[entrypoint, service terms, main terms]`; the
/// entrypoint's operand becomes the first main term so the leading jump
/// skips the routine on normal startup. Every term operand is remapped
/// through the old-index -> new-index table, so targets stay correct no
/// matter where the `:intr` definition sat in the source, and each `;` keeps
/// exactly one spot in the output.
pub fn relocate(terms: Vec<Term>) -> Vec<Term> {
    let total = terms.len();
    let mut entry = None;
    let mut service: Vec<(usize, Term)> = Vec::new();
    let mut main: Vec<(usize, Term)> = Vec::new();
    let mut in_service = false;

    for (old_index, term) in terms.into_iter().enumerate() {
        if old_index == 0 {
            entry = Some(term);
            continue;
        }
        if term.kind == Some(TermKind::DefIntr) {
            in_service = true;
        }
        if term.kind == Some(TermKind::Ret) {
            if in_service {
                service.push((old_index, term));
            } else {
                main.push((old_index, term));
            }
            in_service = false;
            continue;
        }
        if in_service {
            service.push((old_index, term));
        } else {
            main.push((old_index, term));
        }
    }

    let service_len = service.len();
    let mut new_index = vec![0usize; total + 1];
    for (position, (old_index, _)) in service.iter().enumerate() {
        new_index[*old_index] = 1 + position;
    }
    for (position, (old_index, _)) in main.iter().enumerate() {
        new_index[*old_index] = 1 + service_len + position;
    }
    // One-past-the-end targets keep pointing at the halt slot.
    new_index[total] = total;

    let mut relocated = Vec::with_capacity(total);
    relocated.push(entry.unwrap());
    relocated.extend(service.into_iter().map(|(_, term)| term));
    relocated.extend(main.into_iter().map(|(_, term)| term));

    for term in relocated.iter_mut().skip(1) {
        if let Some(target) = term.operand {
            term.operand = Some(new_index[target]);
        }
    }
    relocated[0].operand = Some(service_len + 1);
    relocated
}
