//! Raw Opcode Values.
//!
//! Defines the 4-bit opcode field (bits 7-4) of every instruction.

/// Load A from memory at `O`.
pub const LDAM: u8 = 0x0;

/// Load B from memory at `O`.
pub const LDBM: u8 = 0x1;

/// Store A to memory at `O`.
pub const STAM: u8 = 0x2;

/// Load A with the constant `O`.
pub const LDAC: u8 = 0x3;

/// Load B with the constant `O`.
pub const LDBC: u8 = 0x4;

/// Load A with the PC-relative address `PC + O`.
pub const LDAP: u8 = 0x5;

/// Load A indirect through `A + O`.
pub const LDAI: u8 = 0x6;

/// Load B indirect through `B + O`.
pub const LDBI: u8 = 0x7;

/// Store A indirect through `B + O`.
pub const STAI: u8 = 0x8;

/// Unconditional PC-relative branch; operand `0xFE` halts.
pub const BR: u8 = 0x9;

/// Branch if A is zero.
pub const BRZ: u8 = 0xA;

/// Branch if A is negative (bit 7 set).
pub const BRN: u8 = 0xB;

/// Branch to the address held in B.
pub const BRB: u8 = 0xC;

/// Add B to A.
pub const ADD: u8 = 0xD;

/// Subtract B from A.
pub const SUB: u8 = 0xE;

/// Operand prefix: shift `O` left by one nibble.
pub const PFIX: u8 = 0xF;
