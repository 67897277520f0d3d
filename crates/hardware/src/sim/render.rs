//! State Rendering.
//!
//! Pure functions from a [`Snapshot`] to display text. The engine never owns a
//! console; harnesses call these and decide where the text goes.

use std::fmt;

use crate::core::cpu::Snapshot;
use crate::isa::disasm::disassemble;

/// Bytes per line in the memory dump.
const DUMP_ROW: usize = 16;

/// Register table plus memory dump for one snapshot.
#[derive(Debug)]
pub struct StateTable<'a>(pub &'a Snapshot);

impl fmt::Display for StateTable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = self.0;
        let instruction = match s.opcode() {
            Some(_) => format!("{} ({})", s.inst, disassemble(s.inst)),
            None => format!("{} (Unknown)", s.inst),
        };
        let rows = [
            ("PC", s.pc.to_string()),
            ("A Register", s.a.to_string()),
            ("B Register", s.b.to_string()),
            ("O Register", s.o.to_string()),
            ("Instruction", instruction),
        ];
        let width = rows.iter().map(|(_, v)| v.len()).max().unwrap_or(0).max(5);
        let rule = format!("+-------------+-{}-+", "-".repeat(width));

        writeln!(f, "Internal State")?;
        writeln!(f, "{rule}")?;
        writeln!(f, "| {:>11} | {:<width$} |", "Register", "Value")?;
        writeln!(f, "{rule}")?;
        for (name, value) in &rows {
            writeln!(f, "| {name:>11} | {value:<width$} |")?;
        }
        writeln!(f, "{rule}")?;
        if let Some(reason) = s.halt {
            writeln!(f, "Halted: {reason}")?;
        }
        writeln!(f, "Memory:")?;
        write!(f, "{}", MemoryDump(&s.mem))
    }
}

/// Hex dump of a memory image, sixteen bytes per line with an address column.
#[derive(Debug)]
pub struct MemoryDump<'a>(pub &'a [u8]);

impl fmt::Display for MemoryDump<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (row, chunk) in self.0.chunks(DUMP_ROW).enumerate() {
            write!(f, "{:02X}:", row * DUMP_ROW)?;
            for byte in chunk {
                write!(f, " {byte:02X}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Renders the register table and memory dump for `snapshot`.
pub fn state_table(snapshot: &Snapshot) -> String {
    StateTable(snapshot).to_string()
}

/// Renders a hex dump of `mem`.
pub fn memory_dump(mem: &[u8]) -> String {
    MemoryDump(mem).to_string()
}

/// One-line register summary, suitable for per-step logs.
pub fn register_line(snapshot: &Snapshot) -> String {
    format!(
        "pc={:3} a={:3} b={:3} o={:3} inst={:#04x} {}",
        snapshot.pc,
        snapshot.a,
        snapshot.b,
        snapshot.o,
        snapshot.inst,
        disassemble(snapshot.inst)
    )
}
