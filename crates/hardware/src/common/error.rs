//! Load errors and halt reasons.
//!
//! This module defines the error handling for the simulator. It provides:
//! 1. **Load Errors:** Failures surfaced synchronously by the program loader.
//! 2. **Configuration Errors:** Failures reading or parsing a JSON configuration.
//! 3. **Halt Reasons:** Why the engine left the RUNNING state. Halts are state, not errors.

use std::fmt;
use std::io;
use std::path::PathBuf;

use serde::Serialize;
use thiserror::Error;

/// Errors raised while decoding a hex program into memory.
///
/// Bytes decoded before the failure remain in memory; loading is not transactional.
#[derive(Debug, Error)]
pub enum LoadError {
    /// A character that is neither an uppercase hex digit nor a space/newline separator.
    #[error("invalid hex character {ch:?} at offset {position}")]
    InvalidCharacter {
        /// The offending character.
        ch: char,
        /// Zero-based offset of the character in the input.
        position: usize,
    },

    /// The decoded program does not fit in memory.
    #[error("program exceeds memory capacity of {capacity} bytes")]
    ProgramTooLarge {
        /// Memory capacity in bytes.
        capacity: usize,
    },

    /// The program file could not be read.
    #[error("could not read program file '{}': {source}", path.display())]
    Io {
        /// Path that was being read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },
}

/// Errors raised while reading a simulator configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("could not read config file '{}': {source}", path.display())]
    Io {
        /// Path that was being read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// The configuration text is not valid JSON for [`Config`](crate::config::Config).
    #[error("invalid configuration: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Reason the engine stopped running.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "detail", rename_all = "snake_case")]
pub enum HaltReason {
    /// `BR` executed with the halt operand; `a` is the accumulator at that point.
    Halt {
        /// Accumulator value when the halt was taken.
        a: u8,
    },

    /// The dispatcher was handed a code outside the sixteen defined opcodes.
    UnknownOpcode(u8),
}

impl fmt::Display for HaltReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Halt { a } => write!(f, "Halt(areg = {a})"),
            Self::UnknownOpcode(code) => write!(f, "UnknownOpcode({code:#x})"),
        }
    }
}
