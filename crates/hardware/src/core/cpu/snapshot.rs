//! Machine State Snapshots.
//!
//! A `Snapshot` is a plain copy of everything a harness may want to compare
//! against the hardware or render for a human. It holds no reference back into
//! the engine.

use serde::{Serialize, Serializer};

use crate::common::{HaltReason, MEMORY_SIZE};
use crate::isa::decode::decode;
use crate::isa::instruction::Opcode;

/// Point-in-time copy of the machine state.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Snapshot {
    /// Program counter.
    pub pc: u8,
    /// Accumulator.
    pub a: u8,
    /// B register.
    pub b: u8,
    /// Operand register.
    pub o: u8,
    /// Most recently fetched instruction byte.
    pub inst: u8,
    /// Full memory image.
    #[serde(serialize_with = "serialize_mem")]
    pub mem: [u8; MEMORY_SIZE],
    /// False once the machine has halted.
    pub running: bool,
    /// Why the machine halted, if it has.
    pub halt: Option<HaltReason>,
    /// Instructions executed since construction or the last reset.
    pub steps: u64,
}

impl Snapshot {
    /// Decodes the opcode of the most recently fetched instruction.
    pub const fn opcode(&self) -> Option<Opcode> {
        decode(self.inst).opcode
    }

    /// Serializes the snapshot as a JSON object.
    ///
    /// # Errors
    ///
    /// Propagates serializer failures from `serde_json`.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

fn serialize_mem<S: Serializer>(mem: &[u8; MEMORY_SIZE], serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_seq(mem)
}
