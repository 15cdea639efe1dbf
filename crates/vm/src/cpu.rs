//! Defines the [`Cpu`] type, responsible for describing the state of the CPU.
//!
//! More information in the documentation for [`Cpu`].

use std::cmp::Ordering;

use bitflags::bitflags;

use crate::registers::Registers;

/// The Central Processing Unit (CPU) responsible for executing LS-8 instructions.
///
/// By itself, a [`Cpu`] is not enough to execute a program. In order to do anything useful, it
/// has to be connected to a [`Memory`](crate::memory::Memory), which is what
/// [`Ls8VM`](crate::Ls8VM) does.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Cpu {
    /// The Program Counter of the CPU, pointing to the next instruction to be fetched from
    /// memory.
    ///
    /// Every instruction is responsible for updating it, either by adding its own width or by
    /// overwriting it with a jump target. Arithmetic on it wraps around the 8-bit address space.
    pub pc: u8,
    /// The outcome of the last `CMP` instruction.
    pub flags: Flags,
    /// The general purpose registers.
    pub registers: Registers,
}

impl Cpu {
    /// Creates a new [`Cpu`] with every register, the **Program Counter** and the flags set to
    /// zero.
    pub const fn new() -> Self {
        Self {
            pc: 0,
            flags: Flags::empty(),
            registers: Registers::new(),
        }
    }

    /// Moves the **Program Counter** past an instruction of `width` bytes.
    #[inline(always)]
    pub fn advance(&mut self, width: u8) {
        self.pc = self.pc.wrapping_add(width);
    }
}

bitflags! {
    /// The flags register, written by `CMP` and read by the conditional jumps.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Flags: u8 {
        /// The compared registers were equal.
        const EQUAL = 0b001;
        /// The first register was less than the second.
        const LESS = 0b010;
        /// The first register was greater than the second.
        const GREATER = 0b100;
    }
}

impl Default for Flags {
    #[inline(always)]
    fn default() -> Self {
        Self::empty()
    }
}

impl Flags {
    /// Returns the flags describing the outcome of a comparison.
    ///
    /// Exactly one flag is set in the result.
    #[inline]
    pub const fn from_ordering(ordering: Ordering) -> Self {
        match ordering {
            Ordering::Equal => Self::EQUAL,
            Ordering::Less => Self::LESS,
            Ordering::Greater => Self::GREATER,
        }
    }

    /// Returns whether the last comparison found its operands equal.
    #[inline(always)]
    pub const fn is_equal(self) -> bool {
        self.contains(Self::EQUAL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_match_register_layout() {
        assert_eq!(Flags::EQUAL.bits(), 0b001);
        assert_eq!(Flags::LESS.bits(), 0b010);
        assert_eq!(Flags::GREATER.bits(), 0b100);
    }

    #[test]
    fn ordering_sets_exactly_one_flag() {
        for ordering in [Ordering::Less, Ordering::Equal, Ordering::Greater] {
            assert_eq!(Flags::from_ordering(ordering).bits().count_ones(), 1);
        }
        assert!(Flags::from_ordering(Ordering::Equal).is_equal());
        assert!(!Flags::from_ordering(Ordering::Less).is_equal());
        assert!(!Flags::empty().is_equal());
    }

    #[test]
    fn advance_wraps_around_address_space() {
        let mut cpu = Cpu::new();
        cpu.pc = 254;
        cpu.advance(3);
        assert_eq!(cpu.pc, 1);
    }
}
