//! Flat Memory.
//!
//! The machine has a single 256-byte address space. Instruction addresses are
//! `u8`, so every access made by the engine wraps modulo 256 by construction;
//! only the loader indexes with a wider type and can run off the end.

use std::fmt;

use crate::common::{LoadError, MEMORY_SIZE};

/// 256 cells of 8-bit memory.
#[derive(Clone, PartialEq, Eq)]
pub struct Memory {
    cells: [u8; MEMORY_SIZE],
}

impl Default for Memory {
    fn default() -> Self {
        Self::new()
    }
}

impl Memory {
    /// Creates zero-filled memory.
    pub const fn new() -> Self {
        Self {
            cells: [0; MEMORY_SIZE],
        }
    }

    /// Reads the byte at `addr`.
    #[inline]
    pub const fn read(&self, addr: u8) -> u8 {
        self.cells[addr as usize]
    }

    /// Writes `val` to `addr`.
    #[inline]
    pub const fn write(&mut self, addr: u8, val: u8) {
        self.cells[addr as usize] = val;
    }

    /// Stores a loaded program byte at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError::ProgramTooLarge`] when `index` is past the end of memory.
    pub fn load_at(&mut self, index: usize, val: u8) -> Result<(), LoadError> {
        let cell = self.cells.get_mut(index).ok_or(LoadError::ProgramTooLarge {
            capacity: MEMORY_SIZE,
        })?;
        *cell = val;
        Ok(())
    }

    /// Zeroes every cell.
    pub fn clear(&mut self) {
        self.cells.fill(0);
    }

    /// Returns the whole address space.
    pub const fn cells(&self) -> &[u8; MEMORY_SIZE] {
        &self.cells
    }

    /// Returns the whole address space as a slice.
    pub fn as_slice(&self) -> &[u8] {
        &self.cells
    }
}

impl fmt::Debug for Memory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let used = self.cells.iter().rposition(|&b| b != 0).map_or(0, |i| i + 1);
        f.debug_struct("Memory")
            .field("size", &MEMORY_SIZE)
            .field("used", &used)
            .finish()
    }
}
