//! Main Execution Loop.
//!
//! This module implements the instruction cycle of the CPU. It performs the following:
//! 1. **Fetch:** Reads `mem[PC]`, advances PC, and ORs the low nibble into `O`.
//! 2. **Decode/Dispatch:** Maps the high nibble to an opcode and runs its handler.
//! 3. **Run Control:** Single steps, bounded runs, and observer callbacks.
//! 4. **Observability:** Per-instruction tracing events and statistics.
//!
//! `O` is the only state carried from one instruction to the next: at the start of
//! every fetch it holds exactly what the immediately preceding `PFIX` chain built.

use tracing::{debug, trace, warn};

use super::Cpu;
use super::snapshot::Snapshot;
use crate::common::HaltReason;
use crate::common::constants::{HALT_OPERAND, PREFIX_SHIFT, SIGN_BIT};
use crate::isa::disasm::disassemble;
use crate::isa::instruction::{InstructionBits, Opcode};

/// Result of executing a single instruction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StepOutcome {
    /// Address the instruction was fetched from.
    pub pc: u8,
    /// The fetched instruction byte.
    pub instruction: u8,
    /// The opcode it decoded to, or `None` if dispatch fell back to halting.
    pub decoded_opcode: Option<Opcode>,
}

/// Result of a call to [`Cpu::run`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RunSummary {
    /// Instructions executed by this call.
    pub steps_executed: u64,
    /// Accumulator when the run ended.
    pub final_a: u8,
    /// Halt reason, or `None` if the step limit ended the run first.
    pub halt: Option<HaltReason>,
}

impl RunSummary {
    /// Returns true if the machine halted during or before the run.
    pub const fn halted(&self) -> bool {
        self.halt.is_some()
    }
}

/// Receives the machine state after every executed instruction.
///
/// Any `FnMut(&Snapshot)` closure is an observer.
pub trait StepObserver {
    /// Called once per executed instruction with the post-execution state.
    fn on_step(&mut self, snapshot: &Snapshot);
}

impl<F: FnMut(&Snapshot)> StepObserver for F {
    fn on_step(&mut self, snapshot: &Snapshot) {
        self(snapshot);
    }
}

impl Cpu {
    /// Fetches the instruction at PC.
    ///
    /// Advances PC modulo 256 and ORs the instruction's low nibble into `O`.
    ///
    /// # Returns
    ///
    /// The fetched instruction byte, also kept in `self.inst`.
    pub fn fetch(&mut self) -> u8 {
        let inst = self.mem.read(self.regs.pc);
        self.inst = inst;
        self.regs.advance_pc();
        self.regs.accumulate_operand(inst.operand_nibble());
        inst
    }

    /// Decodes the instruction register and executes it.
    ///
    /// # Returns
    ///
    /// The executed opcode, or `None` if the machine halted on an unknown code.
    pub fn decode_and_execute(&mut self) -> Option<Opcode> {
        self.dispatch(self.inst.opcode_bits())
    }

    /// Executes the handler for a raw opcode code.
    ///
    /// Codes above `0xF` cannot come out of a fetched byte. Handed one anyway,
    /// the machine logs a diagnostic and halts rather than failing.
    ///
    /// # Arguments
    ///
    /// * `code` - Raw opcode value.
    ///
    /// # Returns
    ///
    /// The executed opcode, or `None` if `code` was not recognised.
    pub fn dispatch(&mut self, code: u8) -> Option<Opcode> {
        let Some(op) = Opcode::from_code(code) else {
            self.unknown_opcode(code);
            return None;
        };
        self.execute(op);
        Some(op)
    }

    /// Runs one opcode handler against the current registers and memory.
    fn execute(&mut self, op: Opcode) {
        let mut taken = false;
        match op {
            Opcode::Ldam => self.regs.a = self.mem.read(self.regs.o),
            Opcode::Ldbm => self.regs.b = self.mem.read(self.regs.o),
            Opcode::Stam => self.mem.write(self.regs.o, self.regs.a),
            Opcode::Ldac => self.regs.a = self.regs.o,
            Opcode::Ldbc => self.regs.b = self.regs.o,
            Opcode::Ldap => self.regs.a = self.regs.pc_relative(),
            Opcode::Ldai => self.regs.a = self.mem.read(self.regs.a.wrapping_add(self.regs.o)),
            Opcode::Ldbi => self.regs.b = self.mem.read(self.regs.b.wrapping_add(self.regs.o)),
            Opcode::Stai => self
                .mem
                .write(self.regs.b.wrapping_add(self.regs.o), self.regs.a),
            Opcode::Br => {
                if self.regs.o == HALT_OPERAND {
                    self.stop(HaltReason::Halt { a: self.regs.a });
                } else {
                    self.regs.pc = self.regs.pc_relative();
                    taken = true;
                }
            }
            Opcode::Brz => {
                if self.regs.a == 0 {
                    self.regs.pc = self.regs.pc_relative();
                    taken = true;
                }
            }
            Opcode::Brn => {
                if self.regs.a & SIGN_BIT != 0 {
                    self.regs.pc = self.regs.pc_relative();
                    taken = true;
                }
            }
            Opcode::Brb => {
                self.regs.pc = self.regs.b;
                taken = true;
            }
            Opcode::Add => self.regs.a = self.regs.a.wrapping_add(self.regs.b),
            Opcode::Sub => self.regs.a = self.regs.a.wrapping_sub(self.regs.b),
            Opcode::Pfix => {
                self.regs.o <<= PREFIX_SHIFT;
                self.stats.record(op, false);
                return;
            }
        }
        self.stats.record(op, taken);
        self.regs.clear_operand();
    }

    fn unknown_opcode(&mut self, code: u8) {
        warn!(code, inst = self.inst, pc = self.regs.pc, "unknown opcode");
        self.stats.unknown_opcodes += 1;
        self.stop(HaltReason::UnknownOpcode(code));
    }

    /// Executes one instruction: a fetch followed by decode/execute.
    ///
    /// HALTED is terminal, so stepping a halted machine executes nothing.
    ///
    /// # Returns
    ///
    /// The outcome of the executed instruction, or `None` if the machine had
    /// already halted.
    pub fn step(&mut self) -> Option<StepOutcome> {
        if !self.running {
            return None;
        }
        let pc = self.regs.pc;
        let instruction = self.fetch();
        let decoded_opcode = self.decode_and_execute();
        self.stats.steps += 1;

        if self.trace {
            debug!(pc, inst = instruction, asm = %disassemble(instruction), regs = %self.regs, "step");
        } else {
            trace!(pc, inst = instruction, asm = %disassemble(instruction), regs = %self.regs, "step");
        }

        Some(StepOutcome {
            pc,
            instruction,
            decoded_opcode,
        })
    }

    /// Steps until the machine halts or `step_limit` instructions have run.
    ///
    /// Never sleeps; pacing is the caller's concern. A machine that is already
    /// halted returns immediately with zero steps.
    ///
    /// # Arguments
    ///
    /// * `step_limit` - Maximum number of instructions to execute, or `None` to run until halt.
    pub fn run(&mut self, step_limit: Option<u64>) -> RunSummary {
        self.run_loop(step_limit, |_| {})
    }

    /// Like [`Cpu::run`], calling `observer` with a snapshot after every instruction.
    pub fn run_with_observer<O: StepObserver>(
        &mut self,
        step_limit: Option<u64>,
        observer: &mut O,
    ) -> RunSummary {
        self.run_loop(step_limit, |cpu| observer.on_step(&cpu.snapshot()))
    }

    fn run_loop(&mut self, step_limit: Option<u64>, mut after_step: impl FnMut(&Self)) -> RunSummary {
        let mut steps_executed = 0;
        while step_limit.is_none_or(|limit| steps_executed < limit) {
            if self.step().is_none() {
                break;
            }
            steps_executed += 1;
            after_step(self);
        }
        debug!(steps_executed, halted = !self.running, "run finished");
        RunSummary {
            steps_executed,
            final_a: self.regs.a,
            halt: self.halt_reason(),
        }
    }
}
