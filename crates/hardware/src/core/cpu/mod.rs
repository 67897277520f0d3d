//! CPU Core Definition and Initialization.
//!
//! This module defines the central `Cpu` structure, which owns the entire machine
//! state. It coordinates the following:
//! 1. **State Management:** Registers, instruction register, and the RUNNING/HALTED flag.
//! 2. **Memory:** The 256-byte flat address space, written by the loader and store instructions.
//! 3. **Lifecycle:** Construction, re-arming after a load, and full reset.
//! 4. **Observability:** Snapshots and statistics for external harnesses.

/// Fetch, decode, dispatch, and run/step control.
pub mod execution;

/// Flat 256-byte memory with wrapping addresses.
pub mod memory;

/// Point-in-time copies of the machine state.
pub mod snapshot;

use tracing::info;

use crate::common::{HaltReason, RegisterFile};
use crate::config::Config;
use crate::stats::SimStats;

pub use self::execution::{RunSummary, StepObserver, StepOutcome};
pub use self::memory::Memory;
pub use self::snapshot::Snapshot;

/// Main CPU structure containing all processor state.
///
/// Each instance is fully independent; simulating several machines means owning
/// several `Cpu` values.
#[derive(Clone, Debug)]
pub struct Cpu {
    /// Architectural registers (A, B, O, PC).
    pub regs: RegisterFile,
    /// Main memory.
    pub mem: Memory,
    /// Most recently fetched instruction byte. Diagnostic only.
    pub inst: u8,
    /// Emit a debug-level event for every executed instruction.
    pub trace: bool,
    /// Execution statistics.
    pub stats: SimStats,
    running: bool,
    halt: Option<HaltReason>,
}

impl Default for Cpu {
    fn default() -> Self {
        Self::new()
    }
}

impl Cpu {
    /// Creates a CPU with zeroed registers and memory, in the RUNNING state.
    pub fn new() -> Self {
        Self {
            regs: RegisterFile::new(),
            mem: Memory::new(),
            inst: 0,
            trace: false,
            stats: SimStats::default(),
            running: true,
            halt: None,
        }
    }

    /// Creates a CPU configured from `config`.
    ///
    /// # Arguments
    ///
    /// * `config` - The simulator configuration parameters.
    pub fn with_config(config: &Config) -> Self {
        Self {
            trace: config.general.trace_instructions,
            ..Self::new()
        }
    }

    /// Returns true while the machine has not halted.
    pub const fn is_running(&self) -> bool {
        self.running
    }

    /// Returns why the machine halted, or `None` while it is running.
    pub const fn halt_reason(&self) -> Option<HaltReason> {
        self.halt
    }

    /// Returns the machine to the RUNNING state at address 0 with an empty operand register.
    ///
    /// A, B, and memory are left alone. Called by every program load.
    pub fn rearm(&mut self) {
        self.running = true;
        self.halt = None;
        self.regs.pc = 0;
        self.regs.clear_operand();
    }

    /// Zeroes every register, the instruction register, and the whole of memory, then re-arms.
    ///
    /// Statistics are cleared as well.
    pub fn reset(&mut self) {
        self.regs = RegisterFile::new();
        self.mem.clear();
        self.inst = 0;
        self.stats = SimStats::default();
        self.rearm();
    }

    /// Moves the machine to the HALTED state.
    pub(crate) fn stop(&mut self, reason: HaltReason) {
        info!(%reason, pc = self.regs.pc, "cpu halted");
        self.running = false;
        self.halt = Some(reason);
    }

    /// Captures the current machine state.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            pc: self.regs.pc,
            a: self.regs.a,
            b: self.regs.b,
            o: self.regs.o,
            inst: self.inst,
            mem: *self.mem.cells(),
            running: self.running,
            halt: self.halt,
            steps: self.stats.steps,
        }
    }
}
