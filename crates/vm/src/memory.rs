//! Defines the [`Memory`] type, responsible for representing the memory of an LS-8 machine.
//!
//! # Address space
//!
//! The LS-8 has an 8-bit address bus, giving it exactly 256 bytes of memory. Addresses are
//! represented as [`u8`], which means that every address that can be named is a valid one and
//! no access can ever fall outside of the memory. The only place where a size check is needed
//! is when an image is copied in with [`Memory::load`].
//!
//! The program image is loaded at address `0`. The stack grows downward from the top of the
//! address space and shares the same cells.

use crate::error::Error;

/// The number of cells in the memory of the machine.
pub const MEMORY_SIZE: usize = 256;

/// Represents the memory of the LS-8 virtual machine.
///
/// More information in [module-level documentation](self).
#[derive(Clone, PartialEq, Eq)]
pub struct Memory {
    /// The cells of the memory, indexed by address.
    cells: [u8; MEMORY_SIZE],
}

impl Default for Memory {
    #[inline(always)]
    fn default() -> Self {
        Self::new()
    }
}

impl Memory {
    /// Creates a new zero-initialized [`Memory`].
    pub const fn new() -> Self {
        Self {
            cells: [0; MEMORY_SIZE],
        }
    }

    /// Returns the byte stored at `address`.
    #[inline(always)]
    pub fn read(&self, address: u8) -> u8 {
        self.cells[usize::from(address)]
    }

    /// Stores `value` at `address`.
    #[inline(always)]
    pub fn write(&mut self, address: u8, value: u8) {
        self.cells[usize::from(address)] = value;
    }

    /// Returns the three bytes starting at `address`.
    ///
    /// This is the widest window an instruction can occupy: an OP code followed by two operands.
    /// Addresses past the end of the memory wrap around to `0`.
    #[inline]
    pub fn window(&self, address: u8) -> [u8; 3] {
        [
            self.read(address),
            self.read(address.wrapping_add(1)),
            self.read(address.wrapping_add(2)),
        ]
    }

    /// Copies `image` into the memory, starting at address `0`.
    ///
    /// Cells past the end of the image are left untouched.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::ProgramTooLarge`] if `image` holds more than [`MEMORY_SIZE`] bytes, in
    /// which case the memory is not modified.
    pub fn load(&mut self, image: &[u8]) -> Result<(), Error> {
        if image.len() > MEMORY_SIZE {
            return Err(Error::ProgramTooLarge {
                len: image.len(),
                max: MEMORY_SIZE,
            });
        }

        self.cells[..image.len()].copy_from_slice(image);
        Ok(())
    }

    /// Returns the raw content of the memory.
    #[inline(always)]
    pub fn as_slice(&self) -> &[u8] {
        &self.cells
    }
}

impl std::fmt::Debug for Memory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Trailing zeroes carry no information and would make up most of the output.
        let used = self
            .cells
            .iter()
            .rposition(|&cell| cell != 0)
            .map_or(0, |last| last + 1);

        f.debug_struct("Memory")
            .field("cells", &&self.cells[..used])
            .finish_non_exhaustive()
    }
}
