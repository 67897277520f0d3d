//! Opcode enumeration and instruction bit extraction.
//!
//! Provides the `Opcode` enum covering the sixteen defined codes and the
//! `InstructionBits` trait for splitting an instruction byte into its fields.

use std::fmt;

use serde::Serialize;

use crate::common::constants::{NIBBLE_MASK, OPCODE_SHIFT};
use crate::isa::opcodes;

/// Trait for extracting instruction fields from an encoded instruction byte.
pub trait InstructionBits {
    /// Extracts the opcode field (bits 7-4) as a raw code in `0..=15`.
    fn opcode_bits(&self) -> u8;

    /// Extracts the operand nibble (bits 3-0) that is ORed into `O` on fetch.
    fn operand_nibble(&self) -> u8;
}

impl InstructionBits for u8 {
    #[inline(always)]
    fn opcode_bits(&self) -> u8 {
        (self >> OPCODE_SHIFT) & NIBBLE_MASK
    }

    #[inline(always)]
    fn operand_nibble(&self) -> u8 {
        self & NIBBLE_MASK
    }
}

/// The sixteen operations of the machine.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Opcode {
    /// `A = mem[O]`
    Ldam,
    /// `B = mem[O]`
    Ldbm,
    /// `mem[O] = A`
    Stam,
    /// `A = O`
    Ldac,
    /// `B = O`
    Ldbc,
    /// `A = PC + O`
    Ldap,
    /// `A = mem[A + O]`
    Ldai,
    /// `B = mem[B + O]`
    Ldbi,
    /// `mem[B + O] = A`
    Stai,
    /// `PC = PC + O`, or halt when `O == 0xFE`
    Br,
    /// `PC = PC + O` if `A == 0`
    Brz,
    /// `PC = PC + O` if `A & 0x80 != 0`
    Brn,
    /// `PC = B`
    Brb,
    /// `A = A + B`
    Add,
    /// `A = A - B`
    Sub,
    /// `O = O << 4`
    Pfix,
}

impl Opcode {
    /// All opcodes in encoding order.
    pub const ALL: [Self; 16] = [
        Self::Ldam,
        Self::Ldbm,
        Self::Stam,
        Self::Ldac,
        Self::Ldbc,
        Self::Ldap,
        Self::Ldai,
        Self::Ldbi,
        Self::Stai,
        Self::Br,
        Self::Brz,
        Self::Brn,
        Self::Brb,
        Self::Add,
        Self::Sub,
        Self::Pfix,
    ];

    /// Maps a raw 4-bit code to its opcode.
    ///
    /// Returns `None` for any value above `0xF`.
    pub const fn from_code(code: u8) -> Option<Self> {
        Some(match code {
            opcodes::LDAM => Self::Ldam,
            opcodes::LDBM => Self::Ldbm,
            opcodes::STAM => Self::Stam,
            opcodes::LDAC => Self::Ldac,
            opcodes::LDBC => Self::Ldbc,
            opcodes::LDAP => Self::Ldap,
            opcodes::LDAI => Self::Ldai,
            opcodes::LDBI => Self::Ldbi,
            opcodes::STAI => Self::Stai,
            opcodes::BR => Self::Br,
            opcodes::BRZ => Self::Brz,
            opcodes::BRN => Self::Brn,
            opcodes::BRB => Self::Brb,
            opcodes::ADD => Self::Add,
            opcodes::SUB => Self::Sub,
            opcodes::PFIX => Self::Pfix,
            _ => return None,
        })
    }

    /// Returns the raw 4-bit code of this opcode.
    pub const fn code(self) -> u8 {
        match self {
            Self::Ldam => opcodes::LDAM,
            Self::Ldbm => opcodes::LDBM,
            Self::Stam => opcodes::STAM,
            Self::Ldac => opcodes::LDAC,
            Self::Ldbc => opcodes::LDBC,
            Self::Ldap => opcodes::LDAP,
            Self::Ldai => opcodes::LDAI,
            Self::Ldbi => opcodes::LDBI,
            Self::Stai => opcodes::STAI,
            Self::Br => opcodes::BR,
            Self::Brz => opcodes::BRZ,
            Self::Brn => opcodes::BRN,
            Self::Brb => opcodes::BRB,
            Self::Add => opcodes::ADD,
            Self::Sub => opcodes::SUB,
            Self::Pfix => opcodes::PFIX,
        }
    }

    /// Returns the assembler mnemonic.
    pub const fn mnemonic(self) -> &'static str {
        match self {
            Self::Ldam => "LDAM",
            Self::Ldbm => "LDBM",
            Self::Stam => "STAM",
            Self::Ldac => "LDAC",
            Self::Ldbc => "LDBC",
            Self::Ldap => "LDAP",
            Self::Ldai => "LDAI",
            Self::Ldbi => "LDBI",
            Self::Stai => "STAI",
            Self::Br => "BR",
            Self::Brz => "BRZ",
            Self::Brn => "BRN",
            Self::Brb => "BRB",
            Self::Add => "ADD",
            Self::Sub => "SUB",
            Self::Pfix => "PFIX",
        }
    }

    /// Encodes this opcode with an operand nibble into an instruction byte.
    ///
    /// Only the low four bits of `nibble` are used.
    pub const fn encode(self, nibble: u8) -> u8 {
        (self.code() << OPCODE_SHIFT) | (nibble & NIBBLE_MASK)
    }

    /// Returns true for the four branch instructions.
    pub const fn is_branch(self) -> bool {
        matches!(self, Self::Br | Self::Brz | Self::Brn | Self::Brb)
    }

    /// Returns true if the instruction consumes the operand register.
    ///
    /// `BRB`, `ADD` and `SUB` ignore `O` (it is still cleared), `PFIX` extends it.
    pub const fn uses_operand(self) -> bool {
        !matches!(self, Self::Brb | Self::Add | Self::Sub | Self::Pfix)
    }
}

impl TryFrom<u8> for Opcode {
    type Error = u8;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        Self::from_code(code).ok_or(code)
    }
}

impl fmt::Display for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.mnemonic())
    }
}
