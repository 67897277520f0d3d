//! Hex Program Loader.
//!
//! This module turns the textual program encoding into memory contents. It performs:
//! 1. **Digit decoding:** Uppercase hex digits `0-9A-F`, two per byte, high nibble first.
//! 2. **Separator skipping:** Spaces and newlines are ignored anywhere, even inside a byte.
//! 3. **Streaming writes:** Bytes land in memory from address 0 as they are decoded, with no rollback.
//!
//! A trailing lone digit at end of input is dropped without error.

use std::fs;
use std::iter::Enumerate;
use std::path::Path;

use tracing::debug;

use crate::common::LoadError;
use crate::core::Cpu;

/// Iterator over the bytes encoded by a stream of hex characters.
///
/// Yields `Err` once on the first invalid character and then stops.
#[derive(Debug)]
pub struct HexBytes<I> {
    chars: Enumerate<I>,
    failed: bool,
}

impl<I: Iterator<Item = char>> HexBytes<I> {
    /// Wraps a character iterator.
    pub fn new(chars: I) -> Self {
        Self {
            chars: chars.enumerate(),
            failed: false,
        }
    }

    /// Returns the next hex digit value, skipping separators.
    fn next_digit(&mut self) -> Option<Result<u8, LoadError>> {
        for (position, ch) in self.chars.by_ref() {
            match ch {
                ' ' | '\n' => {}
                '0'..='9' | 'A'..='F' => return ch.to_digit(16).map(|d| Ok(d as u8)),
                _ => return Some(Err(LoadError::InvalidCharacter { ch, position })),
            }
        }
        None
    }
}

impl<I: Iterator<Item = char>> Iterator for HexBytes<I> {
    type Item = Result<u8, LoadError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        let item = match self.next_digit()? {
            Ok(high) => match self.next_digit() {
                Some(Ok(low)) => Ok((high << 4) | low),
                Some(Err(e)) => Err(e),
                None => {
                    debug!(digit = high, "dropping unpaired trailing hex digit");
                    return None;
                }
            },
            Err(e) => Err(e),
        };
        self.failed = item.is_err();
        Some(item)
    }
}

/// Decodes hex text into bytes without touching any machine.
///
/// # Errors
///
/// Returns [`LoadError::InvalidCharacter`] on the first character that is neither
/// an uppercase hex digit nor a space/newline.
pub fn decode_hex(text: &str) -> Result<Vec<u8>, LoadError> {
    HexBytes::new(text.chars()).collect()
}

/// Streams decoded bytes from `chars` into memory starting at address 0.
///
/// The machine is re-armed first (running, PC = 0, O = 0). Memory past the end of
/// the program is left as it was.
///
/// # Returns
///
/// The number of bytes written.
///
/// # Errors
///
/// Returns [`LoadError::InvalidCharacter`] for a bad character, or
/// [`LoadError::ProgramTooLarge`] for a 257th byte. Bytes decoded before the
/// failure stay in memory.
pub fn load_chars<I: IntoIterator<Item = char>>(cpu: &mut Cpu, chars: I) -> Result<usize, LoadError> {
    cpu.rearm();
    let mut written = 0;
    for byte in HexBytes::new(chars.into_iter()) {
        cpu.mem.load_at(written, byte?)?;
        written += 1;
    }
    debug!(bytes = written, "program loaded");
    Ok(written)
}

/// Loads a program from hex text held in memory.
///
/// # Errors
///
/// See [`load_chars`].
pub fn load_program_from_str(cpu: &mut Cpu, text: &str) -> Result<usize, LoadError> {
    load_chars(cpu, text.chars())
}

/// Loads a program from a raw buffer of hex text.
///
/// Each byte is taken as one character, so non-ASCII input is reported as an
/// invalid character at its byte offset rather than as an encoding error.
///
/// # Errors
///
/// See [`load_chars`].
pub fn load_program_from_bytes(cpu: &mut Cpu, data: &[u8]) -> Result<usize, LoadError> {
    load_chars(cpu, data.iter().map(|&b| char::from(b)))
}

/// Reads a hex program file and loads it.
///
/// # Errors
///
/// Returns [`LoadError::Io`] if the file cannot be read; otherwise see [`load_chars`].
pub fn load_program_from_file(cpu: &mut Cpu, path: impl AsRef<Path>) -> Result<usize, LoadError> {
    let path = path.as_ref();
    let data = fs::read(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    load_program_from_bytes(cpu, &data)
}

impl Cpu {
    /// Loads a hex-encoded program from `source`.
    ///
    /// Shorthand for [`load_program_from_bytes`].
    ///
    /// # Errors
    ///
    /// See [`load_chars`].
    pub fn load(&mut self, source: impl AsRef<[u8]>) -> Result<usize, LoadError> {
        load_program_from_bytes(self, source.as_ref())
    }
}
