use super::*;
use crate::defs::VARIABLE_BASE;

fn pass_error(input: &str) -> bool {
    let mut terms = split_to_terms(input).unwrap();
    let mut context = Context::new();
    if pairing::pair_loops(&mut terms).is_err() {
        return true;
    }
    if defs::assign_functions(&mut terms, &mut context).is_err() {
        return true;
    }
    if defs::assign_variables(&mut terms, &mut context).is_err() {
        return true;
    }
    defs::resolve_names(&mut terms, &context);
    pairing::link_conditionals(&mut terms).is_err()
}

#[test]
fn do_loop_pairs_operands() {
    let (terms, _) = analyzed("5 0 do i . loop");
    assert_eq!(terms[6].kind, Some(TermKind::Loop));
    assert_eq!(terms[6].operand, Some(3));
}

#[test]
fn begin_until_pairs_operands() {
    let (terms, _) = analyzed("begin 1 until");
    assert_eq!(terms[3].operand, Some(1));
}

#[test]
fn nested_loops_pair_innermost_first() {
    let (terms, _) = analyzed("do do loop loop");
    assert_eq!(terms[3].operand, Some(2));
    assert_eq!(terms[4].operand, Some(1));
}

#[test]
fn unbalanced_loops_rejected() {
    assert!(pass_error("do 1 +"));
    assert!(pass_error("1 loop"));
    assert!(pass_error("begin"));
    assert!(pass_error("until"));
}

#[test]
fn functions_registered() {
    let (terms, context) = analyzed(": f 1 ; f");
    assert_eq!(context.functions["f"], 2);
    assert!(terms[2].converted);
    assert_eq!(terms[1].operand, Some(5));
}

#[test]
fn calls_resolved() {
    let (terms, _) = analyzed(": f 1 ; f");
    assert_eq!(terms[5].kind, Some(TermKind::Call));
    assert_eq!(terms[5].operand, Some(2));
}

#[test]
fn forward_calls_resolved() {
    let (terms, _) = analyzed("f : f 1 ;");
    assert_eq!(terms[1].kind, Some(TermKind::Call));
    assert_eq!(terms[1].operand, Some(3));
}

#[test]
fn bad_function_definitions_rejected() {
    assert!(pass_error(": f 1 ; : f 2 ;"));
    assert!(pass_error(";"));
    assert!(pass_error(": f 1"));
    assert!(pass_error(": f : g ; ;"));
    assert!(pass_error(": dup 1 ;"));
    assert!(pass_error(":"));
}

#[test]
fn variables_allocated_in_order() {
    let (terms, context) = analyzed("variable x variable y");
    assert_eq!(context.variables["x"], VARIABLE_BASE);
    assert_eq!(context.variables["y"], VARIABLE_BASE + 1);
    assert!(terms[2].converted);
    assert!(terms[4].converted);
}

#[test]
fn allot_reserves_extra_cells() {
    let (terms, context) = analyzed("variable buf 10 allot variable z");
    assert_eq!(context.variables["buf"], VARIABLE_BASE);
    assert_eq!(context.variables["z"], VARIABLE_BASE + 11);
    assert!(terms[3].converted);
}

#[test]
fn allot_size_validated() {
    assert!(pass_error("variable b 0 allot"));
    assert!(pass_error("variable b 101 allot"));
    assert!(pass_error("variable b xyz allot"));
}

#[test]
fn bad_variable_names_rejected() {
    assert!(pass_error("variable 1x"));
    assert!(pass_error("variable dup"));
    assert!(pass_error("variable x variable x"));
    assert!(pass_error("variable"));
}

#[test]
fn variable_references_become_addresses() {
    let (terms, _) = analyzed("variable x 5 x !");
    assert_eq!(terms[4].kind, None);
    assert_eq!(terms[4].text, VARIABLE_BASE.to_string());
}

#[test]
fn if_then_wired() {
    let (terms, _) = analyzed("1 if 2 then");
    assert_eq!(terms[2].operand, Some(5));
}

#[test]
fn if_else_then_wired() {
    let (terms, _) = analyzed("1 if 2 else 3 then");
    assert_eq!(terms[2].operand, Some(5));
    assert_eq!(terms[4].operand, Some(7));
}

#[test]
fn unbalanced_conditionals_rejected() {
    assert!(pass_error("1 if 2"));
    assert!(pass_error("then"));
    assert!(pass_error("1 else 2 then"));
    assert!(pass_error("1 if 2 else 3 else 4 then then"));
}

#[test]
fn relocation_moves_service_routine_forward() {
    let terms = relocated("1 2 :intr h read ;");
    let kinds: Vec<_> = terms.iter().map(|t| t.kind).collect();
    assert_eq!(
        kinds,
        vec![
            Some(TermKind::Entrypoint),
            Some(TermKind::DefIntr),
            None,
            Some(TermKind::Read),
            Some(TermKind::Ret),
            None,
            None,
        ]
    );
    assert_eq!(terms[0].operand, Some(5));
}

#[test]
fn relocation_without_routine_is_identity() {
    let terms = relocated("1 2 +");
    assert_eq!(terms[0].operand, Some(1));
    let texts: Vec<_> = terms.iter().map(|t| t.text.as_str()).collect();
    assert_eq!(texts, vec!["", "1", "2", "+"]);
}

#[test]
fn relocation_remaps_operands() {
    let terms = relocated(": f 1 ; f :intr h ;");
    // New order: entry, [:intr h ;], [: f 1 ; call].
    assert_eq!(terms[0].operand, Some(4));
    assert_eq!(terms[4].kind, Some(TermKind::Def));
    assert_eq!(terms[4].operand, Some(8));
    assert_eq!(terms[8].kind, Some(TermKind::Call));
    assert_eq!(terms[8].operand, Some(5));
}

#[test]
fn every_ret_survives_relocation() {
    let source = ": f 1 ; :intr h read ; : g 2 ; f g";
    let before = terms(source)
        .iter()
        .filter(|t| t.kind == Some(TermKind::Ret))
        .count();
    let after = relocated(source)
        .iter()
        .filter(|t| t.kind == Some(TermKind::Ret))
        .count();
    assert_eq!(before, 3);
    assert_eq!(after, 3);
}
