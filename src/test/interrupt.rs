use super::*;

#[test]
fn delivery_at_instruction_boundary() {
    let mut control = machine(&prog![Jmp(0)], vec![(0, 'A')]);
    assert_eq!(control.run(3).unwrap(), StopReason::LimitReached);
    // Delivery saved the interrupted pc and bumped the return pointer.
    assert_eq!(control.data_path().rsp(), 5);
    assert!(!control.status().intr_on);
}

#[test]
fn masked_while_disabled() {
    let mut control = machine(&prog![Di, Jmp(1)], vec![(0, 'A')]);
    assert_eq!(control.run(10).unwrap(), StopReason::LimitReached);
    assert_eq!(control.data_path().rsp(), 4);
}

#[test]
fn token_delivered_at_most_once() {
    // With no service routine re-enabling interrupts, the second token
    // stays pending forever.
    let mut control = machine(&prog![Jmp(0)], vec![(0, 'A'), (0, 'B')]);
    assert_eq!(control.run(20).unwrap(), StopReason::LimitReached);
    assert_eq!(control.data_path().rsp(), 5);
}

#[test]
fn ei_repolls_pending_tokens() {
    let mut control = machine(&prog![Di, Ei, Jmp(2)], vec![(0, 'A')]);
    assert_eq!(control.run(3).unwrap(), StopReason::LimitReached);
    assert_eq!(control.data_path().rsp(), 5);
}

#[test]
fn not_due_tokens_wait() {
    let mut control = machine(&prog![Jmp(0)], vec![(1_000_000, 'A')]);
    assert_eq!(control.run(10).unwrap(), StopReason::LimitReached);
    assert_eq!(control.data_path().rsp(), 4);
    assert!(control.status().intr_on);
}

#[test]
fn vector_points_at_instruction_one() {
    // Routine at 1 reads the delivered token, then halts.
    let program = prog![Jmp(3), Read, Halt, Jmp(3)];
    let mut control = machine(&program, vec![(0, 'A')]);
    assert_eq!(control.run(100).unwrap(), StopReason::Halted);
    assert_eq!(control.data_path().tos(), 'A' as i64);
    assert_eq!(control.instructions(), 3);
}

#[test]
fn ret_resumes_after_interrupted_instruction() {
    let program = prog![Jmp(3), Read, Ret, Push(1), Halt];
    let mut control = machine(&program, vec![(0, 'Z')]);
    assert_eq!(control.run(100).unwrap(), StopReason::Halted);
    // The routine ran, then the main body continued at the next instruction.
    assert_eq!(control.data_path().tos(), 1);
    assert_eq!(control.data_path().next(), 'Z' as i64);
    assert_eq!(control.data_path().rsp(), 4);
}
