//! Global Machine Constants.
//!
//! This module defines the fixed parameters of the 8-bit machine. It includes:
//! 1. **Memory Constants:** Size of the flat address space.
//! 2. **Instruction Constants:** Masks and shifts splitting an instruction byte into opcode and operand nibbles.
//! 3. **Convention Constants:** The operand value that turns `BR` into a halt.

/// Number of addressable memory cells. Addresses wrap modulo this value.
pub const MEMORY_SIZE: usize = 256;

/// Shift that moves the opcode nibble into the low four bits.
pub const OPCODE_SHIFT: u32 = 4;

/// Mask for a single 4-bit field (opcode after shifting, or the operand nibble).
pub const NIBBLE_MASK: u8 = 0x0F;

/// Shift applied to the operand register by `PFIX`.
pub const PREFIX_SHIFT: u32 = 4;

/// Sign bit tested by `BRN`.
pub const SIGN_BIT: u8 = 0x80;

/// Assembled `BR` operand that halts the machine instead of branching.
///
/// This is a convention of the assembled program rather than a distinct opcode:
/// any `PFIX` chain that evaluates to this value also halts.
pub const HALT_OPERAND: u8 = 0xFE;
