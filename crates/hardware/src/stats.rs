//! Simulation statistics collection and reporting.
//!
//! This module tracks execution metrics for the simulator. It provides:
//! 1. **Throughput:** Steps executed and host steps per second.
//! 2. **Instruction mix:** Counts by category (load, store, indirect, constant, ALU, prefix) and per opcode.
//! 3. **Branches:** Taken and not-taken counts.
//! 4. **Halts:** Normal halts and unknown-opcode fallbacks.

use std::fmt;
use std::time::Instant;

use crate::isa::instruction::Opcode;

/// Simulation statistics structure tracking execution metrics.
#[derive(Clone, Debug)]
pub struct SimStats {
    start_time: Instant,
    /// Instructions executed.
    pub steps: u64,

    /// Direct memory loads (LDAM, LDBM).
    pub inst_load: u64,
    /// Direct memory stores (STAM).
    pub inst_store: u64,
    /// Indirect memory accesses through `A + O` or `B + O` (LDAI, LDBI, STAI).
    pub inst_indirect: u64,
    /// Constant and address loads (LDAC, LDBC, LDAP).
    pub inst_const: u64,
    /// Arithmetic (ADD, SUB).
    pub inst_alu: u64,
    /// Operand prefixes (PFIX).
    pub inst_prefix: u64,

    /// Branches that changed PC.
    pub branches_taken: u64,
    /// Conditional branches that fell through.
    pub branches_not_taken: u64,

    /// `BR` halts taken.
    pub halts: u64,
    /// Dispatches of an unrecognised opcode.
    pub unknown_opcodes: u64,

    /// Executions per opcode, indexed by opcode code.
    pub per_opcode: [u64; 16],
}

impl Default for SimStats {
    fn default() -> Self {
        Self {
            start_time: Instant::now(),
            steps: 0,
            inst_load: 0,
            inst_store: 0,
            inst_indirect: 0,
            inst_const: 0,
            inst_alu: 0,
            inst_prefix: 0,
            branches_taken: 0,
            branches_not_taken: 0,
            halts: 0,
            unknown_opcodes: 0,
            per_opcode: [0; 16],
        }
    }
}

/// Section names for selective stats output.
///
/// Valid section identifiers: `"summary"`, `"instruction_mix"`, `"branch"`, `"opcodes"`.
/// Pass an empty slice to `write_sections` to write all sections.
pub const STATS_SECTIONS: &[&str] = &["summary", "instruction_mix", "branch", "opcodes"];

impl SimStats {
    /// Records one executed instruction.
    ///
    /// # Arguments
    ///
    /// * `op` - The executed opcode.
    /// * `taken` - For branches, whether PC was redirected.
    pub fn record(&mut self, op: Opcode, taken: bool) {
        self.per_opcode[op.code() as usize] += 1;
        match op {
            Opcode::Ldam | Opcode::Ldbm => self.inst_load += 1,
            Opcode::Stam => self.inst_store += 1,
            Opcode::Ldai | Opcode::Ldbi | Opcode::Stai => self.inst_indirect += 1,
            Opcode::Ldac | Opcode::Ldbc | Opcode::Ldap => self.inst_const += 1,
            Opcode::Add | Opcode::Sub => self.inst_alu += 1,
            Opcode::Pfix => self.inst_prefix += 1,
            Opcode::Br | Opcode::Brz | Opcode::Brn | Opcode::Brb => {
                if taken {
                    self.branches_taken += 1;
                } else if op == Opcode::Br {
                    self.halts += 1;
                } else {
                    self.branches_not_taken += 1;
                }
            }
        }
    }

    /// Host wall-clock seconds since the stats were created.
    pub fn elapsed_secs(&self) -> f64 {
        self.start_time.elapsed().as_secs_f64()
    }

    /// Executed instructions per host second.
    pub fn steps_per_second(&self) -> f64 {
        let secs = self.elapsed_secs();
        if secs > 0.0 {
            self.steps as f64 / secs
        } else {
            0.0
        }
    }

    /// Writes the requested sections to `out`.
    ///
    /// Unknown section names are ignored; an empty slice writes every section.
    ///
    /// # Errors
    ///
    /// Propagates errors from the underlying writer.
    pub fn write_sections(&self, out: &mut impl fmt::Write, sections: &[&str]) -> fmt::Result {
        let want = |s: &str| sections.is_empty() || sections.contains(&s);
        let pct = |n: u64| {
            if self.steps > 0 {
                (n as f64 / self.steps as f64) * 100.0
            } else {
                0.0
            }
        };

        writeln!(out, "==========================================================")?;
        if want("summary") {
            writeln!(out, "SUMMARY")?;
            writeln!(out, "  sim.steps              {}", self.steps)?;
            writeln!(out, "  sim.seconds            {:.4}", self.elapsed_secs())?;
            writeln!(out, "  sim.steps_per_sec      {:.0}", self.steps_per_second())?;
            writeln!(out, "----------------------------------------------------------")?;
        }
        if want("instruction_mix") {
            writeln!(out, "INSTRUCTION MIX")?;
            for (name, n) in [
                ("op.load", self.inst_load),
                ("op.store", self.inst_store),
                ("op.indirect", self.inst_indirect),
                ("op.const", self.inst_const),
                ("op.alu", self.inst_alu),
                ("op.prefix", self.inst_prefix),
            ] {
                writeln!(out, "  {name:<22} {n} ({:.2}%)", pct(n))?;
            }
            writeln!(out, "----------------------------------------------------------")?;
        }
        if want("branch") {
            writeln!(out, "BRANCHES")?;
            writeln!(out, "  br.taken               {}", self.branches_taken)?;
            writeln!(out, "  br.not_taken           {}", self.branches_not_taken)?;
            writeln!(out, "  br.halts               {}", self.halts)?;
            writeln!(out, "  dispatch.unknown       {}", self.unknown_opcodes)?;
            writeln!(out, "----------------------------------------------------------")?;
        }
        if want("opcodes") {
            writeln!(out, "OPCODES")?;
            for op in Opcode::ALL {
                let n = self.per_opcode[op.code() as usize];
                if n > 0 {
                    writeln!(out, "  {:<22} {n}", op.mnemonic())?;
                }
            }
        }
        writeln!(out, "==========================================================")
    }
}

impl fmt::Display for SimStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_sections(f, &[])
    }
}
