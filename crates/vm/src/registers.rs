//! Defines the [`Registers`] type, the general purpose register file of the CPU.

use crate::error::Error;

/// The number of general purpose registers.
pub const REGISTER_COUNT: usize = 8;

/// The index of the register used as the **Stack Pointer** by `PUSH` and `POP`.
///
/// Nothing prevents a program from using it as a regular register.
pub const STACK_POINTER: u8 = 7;

/// The eight byte-wide general purpose registers of the CPU.
///
/// Register indices come straight from the program's operands, so every access is checked and
/// an index outside of `0..8` is reported as [`Error::InvalidRegister`].
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Registers {
    slots: [u8; REGISTER_COUNT],
}

impl Registers {
    /// Creates a new register file with every register set to zero.
    pub const fn new() -> Self {
        Self {
            slots: [0; REGISTER_COUNT],
        }
    }

    /// Returns the value of the register at `index`.
    #[inline]
    pub fn get(&self, index: u8) -> Result<u8, Error> {
        self.slots
            .get(usize::from(index))
            .copied()
            .ok_or(Error::InvalidRegister(index))
    }

    /// Sets the value of the register at `index`.
    #[inline]
    pub fn set(&mut self, index: u8, value: u8) -> Result<(), Error> {
        let slot = self
            .slots
            .get_mut(usize::from(index))
            .ok_or(Error::InvalidRegister(index))?;
        *slot = value;
        Ok(())
    }

    /// Returns the current value of the **Stack Pointer**.
    #[inline(always)]
    pub fn stack_pointer(&self) -> u8 {
        self.slots[usize::from(STACK_POINTER)]
    }

    /// Sets the **Stack Pointer**.
    #[inline(always)]
    pub fn set_stack_pointer(&mut self, value: u8) {
        self.slots[usize::from(STACK_POINTER)] = value;
    }

    /// Returns a copy of every register, in index order.
    #[inline(always)]
    pub fn snapshot(&self) -> [u8; REGISTER_COUNT] {
        self.slots
    }
}
