use crate::constants;
use crate::machine::{AuxSel, DataPath, Fault, NextSel, PcSel, RetSel, Step, TopSel};

fn small() -> DataPath {
    DataPath::new(8, 8, 8)
}

#[test]
fn reset_state() {
    let dp = small();
    assert_eq!(dp.sp(), constants::STACK_POINTER_RESET);
    assert_eq!(dp.rsp(), constants::STACK_POINTER_RESET);
    assert_eq!(dp.pc(), 0);
    assert_eq!(dp.tos(), constants::DATA_STACK_FILL);
    assert_eq!(dp.next(), constants::DATA_STACK_FILL);
    assert_eq!(dp.memory(0), Some(constants::DATA_MEMORY_FILL));
    assert_eq!(dp.return_stack()[0], constants::RETURN_STACK_FILL);
}

#[test]
fn data_stack_underflow() {
    let mut dp = small();
    for _ in 0..5 {
        dp.latch_sp(Step::Dec);
    }
    assert_eq!(dp.sp(), -1);
    assert_eq!(dp.latch_next(NextSel::Stack), Err(Fault::DataStackUnderflow));
    assert_eq!(dp.data_write(), Err(Fault::DataStackUnderflow));
}

#[test]
fn data_stack_overflow() {
    let mut dp = small();
    for _ in 0..4 {
        dp.latch_sp(Step::Inc);
    }
    assert_eq!(dp.sp(), 8);
    assert_eq!(dp.latch_next(NextSel::Stack), Err(Fault::DataStackOverflow));
    assert_eq!(dp.data_write(), Err(Fault::DataStackOverflow));
}

#[test]
fn return_stack_bounds() {
    let mut dp = small();
    for _ in 0..5 {
        dp.latch_rsp(Step::Dec);
    }
    assert_eq!(dp.latch_aux(AuxSel::Return), Err(Fault::ReturnStackUnderflow));
    assert_eq!(dp.ret_write(RetSel::Pc), Err(Fault::ReturnStackUnderflow));
    for _ in 0..9 {
        dp.latch_rsp(Step::Inc);
    }
    assert_eq!(dp.latch_aux(AuxSel::Return), Err(Fault::ReturnStackOverflow));
    assert_eq!(dp.latch_pc(PcSel::Ret), Err(Fault::ReturnStackOverflow));
}

#[test]
fn memory_bounds() {
    let mut dp = small();
    dp.latch_top(TopSel::Immediate(99)).unwrap();
    assert_eq!(dp.mem_write(), Err(Fault::MemoryOutOfRange(99)));
    assert_eq!(dp.latch_top(TopSel::Mem), Err(Fault::MemoryOutOfRange(99)));
    dp.latch_top(TopSel::Immediate(-1)).unwrap();
    assert_eq!(dp.mem_write(), Err(Fault::MemoryOutOfRange(-1)));
}

#[test]
fn memory_write_stores_next() {
    let mut dp = small();
    dp.latch_top(TopSel::Immediate(3)).unwrap();
    dp.latch_next(NextSel::Top).unwrap();
    dp.mem_write().unwrap();
    assert_eq!(dp.memory(3), Some(3));
    dp.latch_top(TopSel::Mem).unwrap();
    assert_eq!(dp.tos(), 3);
}

#[test]
fn register_transfers() {
    let mut dp = small();
    dp.latch_top(TopSel::Immediate(11)).unwrap();
    dp.latch_next(NextSel::Top).unwrap();
    dp.latch_top(TopSel::Immediate(22)).unwrap();
    dp.latch_aux(AuxSel::Next).unwrap();
    assert_eq!(dp.aux(), 11);
    dp.latch_aux(AuxSel::Top).unwrap();
    assert_eq!(dp.aux(), 22);
    dp.latch_next(NextSel::Aux).unwrap();
    assert_eq!(dp.next(), 22);
    dp.latch_top(TopSel::Aux).unwrap();
    assert_eq!(dp.tos(), 22);
}

#[test]
fn pc_immediate_lands_one_short() {
    let mut dp = small();
    dp.latch_pc(PcSel::Immediate(5)).unwrap();
    assert_eq!(dp.pc(), 4);
    dp.latch_pc(PcSel::Inc).unwrap();
    assert_eq!(dp.pc(), 5);
}
