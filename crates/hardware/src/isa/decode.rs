//! Instruction Decoder.
//!
//! Splits an 8-bit instruction into its opcode and operand nibble. The opcode
//! field is four bits wide, so every byte decodes; the raw code is still kept so
//! the dispatcher can apply its unknown-opcode policy to injected codes.

use crate::common::constants::{NIBBLE_MASK, OPCODE_SHIFT};
use crate::isa::instruction::Opcode;

/// A decoded instruction byte.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Decoded {
    /// The raw instruction byte.
    pub raw: u8,
    /// The raw opcode field (bits 7-4).
    pub code: u8,
    /// The operand nibble (bits 3-0).
    pub nibble: u8,
    /// The opcode, if `code` names one.
    pub opcode: Option<Opcode>,
}

/// Decodes an instruction byte.
///
/// # Arguments
///
/// * `inst` - The raw instruction byte.
///
/// # Returns
///
/// The decoded fields. For any `u8` input `opcode` is `Some`.
pub const fn decode(inst: u8) -> Decoded {
    let code = (inst >> OPCODE_SHIFT) & NIBBLE_MASK;
    Decoded {
        raw: inst,
        code,
        nibble: inst & NIBBLE_MASK,
        opcode: Opcode::from_code(code),
    }
}

impl Decoded {
    /// Re-encodes the instruction from its opcode and nibble.
    ///
    /// Returns `None` when the code does not name an opcode.
    pub fn encode(&self) -> Option<u8> {
        self.opcode.map(|op| op.encode(self.nibble))
    }
}
