//! Core processor implementation.
//!
//! This module contains the execution engine: architectural state, memory,
//! the fetch/decode/execute cycle, and the state snapshots exposed to harnesses.

/// CPU core implementation and execution orchestration.
pub mod cpu;

pub use self::cpu::Cpu;
