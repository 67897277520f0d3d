//! Instruction Disassembler.
//!
//! Converts instruction bytes into human-readable mnemonics for debug tracing,
//! state rendering, and program listings.
//!
//! # Usage
//!
//! ```
//! use hexcpu_core::isa::disasm::disassemble;
//! assert_eq!(disassemble(0x33), "LDAC 0x3");
//! assert_eq!(disassemble(0xD0), "ADD");
//! ```

use std::fmt;

use crate::common::constants::{HALT_OPERAND, PREFIX_SHIFT};
use crate::isa::decode::decode;
use crate::isa::instruction::Opcode;

/// Disassembles a single instruction byte.
///
/// The operand nibble is printed for every instruction that reads `O` and for
/// `PFIX`. `BRB`, `ADD` and `SUB` print it only when it is non-zero, since the
/// value is discarded.
pub fn disassemble(inst: u8) -> String {
    let d = decode(inst);
    match d.opcode {
        Some(op) if op.uses_operand() || op == Opcode::Pfix || d.nibble != 0 => {
            format!("{} {:#x}", op.mnemonic(), d.nibble)
        }
        Some(op) => op.mnemonic().to_string(),
        None => format!("??? {inst:#04x}"),
    }
}

/// One line of a program listing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ListingLine {
    /// Address of the instruction.
    pub addr: u8,
    /// Raw instruction byte.
    pub raw: u8,
    /// Mnemonic text from [`disassemble`].
    pub text: String,
    /// Fully assembled operand for an instruction that terminates a `PFIX` chain.
    ///
    /// `None` for `PFIX` itself and for unprefixed instructions, whose operand is
    /// already visible in `text`.
    pub operand: Option<u8>,
    /// Absolute target of a PC-relative branch, resolved from the assembled operand.
    pub target: Option<u8>,
    /// Set when the line is a `BR` whose operand is the halt convention.
    pub halts: bool,
}

impl fmt::Display for ListingLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02X}: {:02X}  {:<10}", self.addr, self.raw, self.text)?;
        if self.halts {
            return write!(f, " ; halt");
        }
        match (self.operand, self.target) {
            (_, Some(target)) => write!(f, " ; -> {target:#04x}"),
            (Some(operand), None) => write!(f, " ; O = {operand:#04x}"),
            (None, None) => Ok(()),
        }
    }
}

/// Produces an address-annotated listing of `program`, assumed to start at address 0.
///
/// `PFIX` chains are tracked the same way the engine builds `O`, so the line that
/// ends a chain carries the assembled operand and, for branches, the resolved target.
pub fn disassemble_program(program: &[u8]) -> Vec<ListingLine> {
    let mut lines = Vec::with_capacity(program.len());
    let mut o: u8 = 0;
    let mut prefixed = false;

    for (addr, &raw) in (0..=u8::MAX).zip(program) {
        let d = decode(raw);
        o |= d.nibble;

        let mut line = ListingLine {
            addr,
            raw,
            text: disassemble(raw),
            operand: None,
            target: None,
            halts: false,
        };

        match d.opcode {
            Some(Opcode::Pfix) => {
                o <<= PREFIX_SHIFT;
                prefixed = true;
                lines.push(line);
                continue;
            }
            Some(Opcode::Br) if o == HALT_OPERAND => line.halts = true,
            Some(Opcode::Br | Opcode::Brz | Opcode::Brn) => {
                line.target = Some(addr.wrapping_add(1).wrapping_add(o));
            }
            _ => {}
        }
        if prefixed && d.opcode.is_some_and(Opcode::uses_operand) {
            line.operand = Some(o);
        }

        o = 0;
        prefixed = false;
        lines.push(line);
    }
    lines
}
