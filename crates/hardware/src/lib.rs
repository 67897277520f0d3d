//! Golden-model simulator for an 8-bit prefix-operand accumulator CPU.
//!
//! This crate implements the reference model a hardware implementation is
//! co-verified against:
//! 1. **Loader:** Textual hex programs decoded into the 256-byte memory.
//! 2. **Core:** Registers, memory, and the fetch/decode/execute cycle for all sixteen opcodes.
//! 3. **ISA:** Opcode table, decoding, and disassembly (with `PFIX` chain resolution).
//! 4. **Harness support:** Snapshots, step observers, state rendering, configuration, and statistics.
//!
//! ```
//! use hexcpu_core::Cpu;
//!
//! let mut cpu = Cpu::new();
//! // LDAC 5; LDBC 7; ADD; PFIX 0xF; BR 0xE (operand 0xFE halts)
//! let bytes = cpu.load("35 47 D0 FF 9E").unwrap();
//! assert_eq!(bytes, 5);
//! let summary = cpu.run(Some(100));
//! assert!(summary.halted());
//! assert_eq!(summary.final_a, 12);
//! ```

/// Common types and constants (memory size, registers, errors, halt reasons).
pub mod common;
/// Simulator and harness configuration.
pub mod config;
/// CPU core (registers, memory, execution, snapshots).
pub mod core;
/// Instruction set (opcodes, decode, disassembly).
pub mod isa;
/// Program loader and state rendering.
pub mod sim;
/// Execution statistics collection and reporting.
pub mod stats;

/// Root configuration type; use `Config::default()` or parse from JSON.
pub use crate::config::Config;
/// Main CPU type; owns registers, memory, and statistics.
pub use crate::core::Cpu;
/// Run and step results, and the snapshot handed to observers.
pub use crate::core::cpu::{RunSummary, Snapshot, StepObserver, StepOutcome};
