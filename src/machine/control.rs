use super::datapath::{AuxSel, DataPath, NextSel, PcSel, RetSel, Step, TopSel};
use super::{AluOp, Fault, StopReason};
use crate::constants;
use crate::isa::{Instruction, Opcode};
use crate::Word;
use std::convert::TryFrom;

/// The two bits of the status word.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Status {
    pub intr_on: bool,
    pub intr_req: bool,
}

enum Flow {
    Running,
    Halted,
}

fn alu_operation(command: Opcode) -> Option<AluOp> {
    match command {
        Opcode::Add => Some(AluOp::Add),
        Opcode::Sub => Some(AluOp::Sub),
        Opcode::Div => Some(AluOp::Div),
        Opcode::Mod => Some(AluOp::Mod),
        Opcode::Eq => Some(AluOp::Eq),
        Opcode::Ls => Some(AluOp::Ls),
        Opcode::Or => Some(AluOp::Or),
        _ => None,
    }
}

/// Owns program memory, the status word and the tick counter; decodes each
/// opcode into its micro-sequence and polls the input schedule at
/// instruction boundaries.
pub struct ControlUnit {
    data_path: DataPath,
    program: Vec<Option<Instruction>>,
    ps: Status,
    io: char,
    marker: char,
    input_tokens: Vec<(u64, char)>,
    handled: Vec<bool>,
    out: String,
    ticks: u64,
    instructions: u64,
}

impl ControlUnit {
    pub fn new(
        data_path: DataPath,
        program_memory_size: usize,
        input_tokens: Vec<(u64, char)>,
    ) -> ControlUnit {
        assert!(program_memory_size > 0, "program memory size must be > 0");

        let handled = vec![false; input_tokens.len()];
        ControlUnit {
            data_path,
            program: vec![None; program_memory_size],
            ps: Status {
                intr_on: true,
                intr_req: false,
            },
            io: constants::INPUT_RESET,
            marker: constants::NUMERIC_OUTPUT_MARKER,
            input_tokens,
            handled,
            out: String::new(),
            ticks: 0,
            instructions: 0,
        }
    }

    /// Replaces the in-band numeric output marker (kept configurable for
    /// bytecode that repurposes the default code point).
    pub fn with_marker(mut self, marker: char) -> ControlUnit {
        self.marker = marker;
        self
    }

    pub fn output(&self) -> &str {
        &self.out
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn instructions(&self) -> u64 {
        self.instructions
    }

    pub fn status(&self) -> Status {
        self.ps
    }

    pub fn data_path(&self) -> &DataPath {
        &self.data_path
    }

    /// Overlays the translated instructions onto program memory by index.
    pub fn load(&mut self, program: &[Instruction]) -> Result<(), Fault> {
        for instruction in program {
            if instruction.index >= self.program.len() {
                return Err(Fault::ProgramOutOfRange(instruction.index as i64));
            }
            self.program[instruction.index] = Some(instruction.clone());
        }
        Ok(())
    }

    pub fn run(&mut self, limit: u64) -> Result<StopReason, Fault> {
        while self.instructions < limit {
            self.instructions += 1;
            if let Flow::Halted = self.command_cycle()? {
                return Ok(StopReason::Halted);
            }
        }
        Ok(StopReason::LimitReached)
    }

    fn command_cycle(&mut self) -> Result<Flow, Fault> {
        let cell = self.fetch()?;
        if let Some(instruction) = cell {
            if let Flow::Halted = self.decode_execute(&instruction)? {
                return Ok(Flow::Halted);
            }
        }
        self.poll_interrupts()?;
        self.data_path.latch_pc(PcSel::Inc)?;
        Ok(Flow::Running)
    }

    fn fetch(&self) -> Result<Option<Instruction>, Fault> {
        let pc = self.data_path.pc();
        if pc < 0 || pc as usize >= self.program.len() {
            return Err(Fault::ProgramOutOfRange(pc));
        }
        Ok(self.program[pc as usize].clone())
    }

    /// Runs one tick: all signals in `signals` fire together against the
    /// pre-tick register state.
    fn tick<F>(&mut self, signals: F) -> Result<(), Fault>
    where
        F: FnOnce(&mut DataPath) -> Result<(), Fault>,
    {
        self.ticks += 1;
        signals(&mut self.data_path)?;
        self.trace();
        Ok(())
    }

    fn latch_ps(&mut self, intr_on: bool) -> Result<(), Fault> {
        self.ps.intr_on = intr_on;
        self.poll_interrupts()?;
        self.ps.intr_req = false;
        Ok(())
    }

    /// Scans the schedule for the first pending token that is due; delivery
    /// saves `pc` on the return stack and vectors to the service routine.
    fn poll_interrupts(&mut self) -> Result<(), Fault> {
        if !self.ps.intr_on {
            return Ok(());
        }
        for index in 0..self.input_tokens.len() {
            let (due, token) = self.input_tokens[index];
            if self.handled[index] || due > self.ticks {
                continue;
            }
            self.io = token;
            self.handled[index] = true;
            self.ps.intr_req = true;
            self.ps.intr_on = false;
            self.tick(|dp| dp.ret_write(RetSel::Pc))?;
            self.tick(|dp| {
                dp.latch_pc(PcSel::Immediate(constants::ISR_ENTRY))?;
                dp.latch_rsp(Step::Inc);
                Ok(())
            })?;
            break;
        }
        Ok(())
    }

    fn decode_execute(&mut self, instruction: &Instruction) -> Result<Flow, Fault> {
        let arg = instruction.arg.unwrap_or(0);

        if let Some(operation) = alu_operation(instruction.command) {
            self.tick(|dp| dp.alu_operate(operation))?;
            self.tick(|dp| dp.latch_top(TopSel::Alu))?;
            self.tick(|dp| {
                dp.latch_sp(Step::Dec);
                Ok(())
            })?;
            self.tick(|dp| dp.latch_next(NextSel::Stack))?;
            return Ok(Flow::Running);
        }

        match instruction.command {
            Opcode::Push => {
                self.tick(|dp| dp.data_write())?;
                self.tick(|dp| {
                    dp.latch_sp(Step::Inc);
                    dp.latch_next(NextSel::Top)
                })?;
                self.tick(|dp| dp.latch_top(TopSel::Immediate(arg)))?;
            }
            Opcode::Drop => {
                self.tick(|dp| {
                    dp.latch_top(TopSel::Next)?;
                    dp.latch_sp(Step::Dec);
                    Ok(())
                })?;
                self.tick(|dp| dp.latch_next(NextSel::Stack))?;
            }
            Opcode::Omit => {
                let value = self.data_path.next();
                let symbol = u32::try_from(value)
                    .ok()
                    .and_then(std::char::from_u32)
                    .ok_or(Fault::InvalidOutput(value))?;
                if symbol == self.marker {
                    self.out.push_str(&self.data_path.tos().to_string());
                } else {
                    self.out.push(symbol);
                }
                self.tick(|dp| {
                    dp.latch_top(TopSel::Next)?;
                    dp.latch_sp(Step::Dec);
                    Ok(())
                })?;
                self.tick(|dp| dp.latch_next(NextSel::Stack))?;
                self.tick(|dp| {
                    dp.latch_top(TopSel::Next)?;
                    dp.latch_sp(Step::Dec);
                    Ok(())
                })?;
                self.tick(|dp| dp.latch_next(NextSel::Stack))?;
            }
            Opcode::Read => {
                let input = self.io as Word;
                self.tick(|dp| {
                    dp.latch_top(TopSel::Next)?;
                    dp.latch_sp(Step::Dec);
                    Ok(())
                })?;
                self.tick(|dp| dp.data_write())?;
                self.tick(|dp| {
                    dp.latch_sp(Step::Inc);
                    dp.latch_next(NextSel::Top)
                })?;
                self.tick(|dp| dp.latch_top(TopSel::Immediate(input)))?;
            }
            Opcode::Swap => {
                self.tick(|dp| dp.latch_aux(AuxSel::Top))?;
                self.tick(|dp| dp.latch_top(TopSel::Next))?;
                self.tick(|dp| dp.latch_next(NextSel::Aux))?;
            }
            Opcode::Over => {
                self.tick(|dp| dp.data_write())?;
                self.tick(|dp| {
                    dp.latch_aux(AuxSel::Top)?;
                    dp.latch_sp(Step::Inc);
                    Ok(())
                })?;
                self.tick(|dp| dp.latch_top(TopSel::Next))?;
                self.tick(|dp| dp.latch_next(NextSel::Aux))?;
            }
            Opcode::Dup => {
                self.tick(|dp| dp.data_write())?;
                self.tick(|dp| {
                    dp.latch_next(NextSel::Top)?;
                    dp.latch_sp(Step::Inc);
                    Ok(())
                })?;
            }
            Opcode::Load => {
                self.tick(|dp| dp.latch_top(TopSel::Mem))?;
            }
            Opcode::Store => {
                self.tick(|dp| {
                    dp.mem_write()?;
                    dp.latch_sp(Step::Dec);
                    Ok(())
                })?;
                self.tick(|dp| dp.latch_next(NextSel::Stack))?;
                self.tick(|dp| {
                    dp.latch_top(TopSel::Next)?;
                    dp.latch_sp(Step::Dec);
                    Ok(())
                })?;
                self.tick(|dp| dp.latch_next(NextSel::Stack))?;
            }
            Opcode::Pop => {
                self.tick(|dp| dp.latch_aux(AuxSel::Top))?;
                self.tick(|dp| {
                    dp.latch_top(TopSel::Next)?;
                    dp.latch_sp(Step::Dec);
                    Ok(())
                })?;
                self.tick(|dp| {
                    dp.latch_next(NextSel::Stack)?;
                    dp.ret_write(RetSel::Aux)
                })?;
                self.tick(|dp| {
                    dp.latch_rsp(Step::Inc);
                    Ok(())
                })?;
            }
            Opcode::Rpop => {
                self.tick(|dp| {
                    dp.latch_rsp(Step::Dec);
                    Ok(())
                })?;
                self.tick(|dp| {
                    dp.latch_aux(AuxSel::Return)?;
                    dp.data_write()
                })?;
                self.tick(|dp| {
                    dp.latch_next(NextSel::Top)?;
                    dp.latch_sp(Step::Inc);
                    Ok(())
                })?;
                self.tick(|dp| dp.latch_top(TopSel::Aux))?;
            }
            Opcode::Zjmp => {
                if self.data_path.tos() == 0 {
                    self.tick(|dp| {
                        dp.latch_pc(PcSel::Immediate(arg))?;
                        dp.latch_top(TopSel::Next)?;
                        dp.latch_sp(Step::Dec);
                        Ok(())
                    })?;
                    self.tick(|dp| dp.latch_next(NextSel::Stack))?;
                } else {
                    self.tick(|dp| {
                        dp.latch_top(TopSel::Next)?;
                        dp.latch_sp(Step::Dec);
                        Ok(())
                    })?;
                    self.tick(|dp| dp.latch_next(NextSel::Stack))?;
                }
            }
            Opcode::Jmp => {
                self.tick(|dp| dp.latch_pc(PcSel::Immediate(arg)))?;
            }
            Opcode::Call => {
                self.tick(|dp| dp.ret_write(RetSel::Pc))?;
                self.tick(|dp| {
                    dp.latch_rsp(Step::Inc);
                    dp.latch_pc(PcSel::Immediate(arg))
                })?;
            }
            Opcode::Ret => {
                self.tick(|dp| {
                    dp.latch_rsp(Step::Dec);
                    Ok(())
                })?;
                self.tick(|dp| dp.latch_pc(PcSel::Ret))?;
            }
            Opcode::Di => {
                self.ticks += 1;
                self.latch_ps(false)?;
                self.trace();
            }
            Opcode::Ei => {
                self.ticks += 1;
                self.latch_ps(true)?;
                self.trace();
            }
            Opcode::Halt => return Ok(Flow::Halted),
            Opcode::Add
            | Opcode::Sub
            | Opcode::Div
            | Opcode::Mod
            | Opcode::Eq
            | Opcode::Ls
            | Opcode::Or => unreachable!(),
        }
        Ok(Flow::Running)
    }

    fn trace(&self) {
        log::trace!(
            "tick {:4} | pc {:4} | req {:5} | on {:5} | sp {:4} | rsp {:4} | aux {:8} | tos {:?} | rtos {:?}",
            self.ticks,
            self.data_path.pc(),
            self.ps.intr_req,
            self.ps.intr_on,
            self.data_path.sp(),
            self.data_path.rsp(),
            self.data_path.aux(),
            self.data_path.data_window(),
            self.data_path.return_window(),
        );
    }
}
