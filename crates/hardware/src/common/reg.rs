//! Architectural Register Set.
//!
//! This module provides the `RegisterFile` struct holding the four 8-bit registers
//! of the machine. It provides:
//! 1. **Storage:** Accumulator `A`, secondary/address register `B`, operand register `O`, and `PC`.
//! 2. **Wrapping Arithmetic:** Helpers for PC advance and PC-relative targets modulo 256.
//! 3. **Observability:** A one-line dump for debug tracing.

use std::fmt;

/// The four architectural registers.
///
/// All registers are 8 bits wide; every arithmetic helper wraps modulo 256.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RegisterFile {
    /// Accumulator.
    pub a: u8,
    /// Secondary operand and indirect address register.
    pub b: u8,
    /// Operand register, built up by `PFIX` chains and cleared after every other instruction.
    pub o: u8,
    /// Program counter.
    pub pc: u8,
}

impl RegisterFile {
    /// Creates a register set with every register zeroed.
    pub const fn new() -> Self {
        Self {
            a: 0,
            b: 0,
            o: 0,
            pc: 0,
        }
    }

    /// Advances the program counter by one byte, wrapping from 255 to 0.
    #[inline]
    pub const fn advance_pc(&mut self) {
        self.pc = self.pc.wrapping_add(1);
    }

    /// Returns `PC + O` modulo 256, the target of every PC-relative access.
    #[inline]
    pub const fn pc_relative(&self) -> u8 {
        self.pc.wrapping_add(self.o)
    }

    /// ORs an operand nibble into `O`.
    #[inline]
    pub const fn accumulate_operand(&mut self, nibble: u8) {
        self.o |= nibble;
    }

    /// Clears the operand register at the end of a non-prefix instruction.
    #[inline]
    pub const fn clear_operand(&mut self) {
        self.o = 0;
    }
}

impl fmt::Display for RegisterFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "pc={:#04x} a={:#04x} b={:#04x} o={:#04x}",
            self.pc, self.a, self.b, self.o
        )
    }
}
