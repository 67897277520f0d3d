//! Instruction Set Architecture (ISA) Definitions.
//!
//! Every instruction is a single byte: the high nibble selects one of sixteen
//! opcodes and the low nibble is ORed into the operand register `O`. Longer
//! operands are assembled by chains of `PFIX` instructions.

/// Instruction decoding from raw bytes to opcodes and operand nibbles.
pub mod decode;

/// Instruction disassembler for debug tracing and program listings.
pub mod disasm;

/// Opcode enumeration and instruction bit extraction.
pub mod instruction;

/// Raw 4-bit opcode values.
pub mod opcodes;

pub use instruction::{InstructionBits, Opcode};
