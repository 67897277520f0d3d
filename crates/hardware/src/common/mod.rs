//! Common types and constants shared by the loader and the execution engine.
//!
//! This module provides the fundamental building blocks used throughout the simulator:
//! 1. **Constants:** Memory size, nibble masks, and the halt operand convention.
//! 2. **Error Handling:** Load errors and halt reasons.
//! 3. **Register Management:** The architectural register set (A, B, O, PC).

/// Common constants used throughout the simulator.
pub mod constants;

/// Error types and halt reasons.
pub mod error;

/// Architectural register set.
pub mod reg;

pub use constants::{HALT_OPERAND, MEMORY_SIZE};
pub use error::{ConfigError, HaltReason, LoadError};
pub use reg::RegisterFile;
