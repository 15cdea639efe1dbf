//! Defines the [`Error`] type of the crate.

use std::io;

/// An error that might occur when loading or executing an LS-8 program.
///
/// Every error is terminal for the run: once a step fails, the [`Ls8VM`](crate::Ls8VM) is
/// aborted and will keep reporting the same error.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// The byte referenced by the **Program Counter** is not a known OP code.
    #[error("unknown instruction: {0}")]
    UnknownInstruction(u8),
    /// An OP code that the ALU does not implement was routed to it.
    ///
    /// This is an internal invariant violation rather than a problem with the program.
    #[error("unsupported ALU operation: {0:#010b}")]
    UnsupportedAluOperation(u8),
    /// An operand referenced a register outside of the register file.
    #[error("register index {0} out of bounds")]
    InvalidRegister(u8),
    /// The memory image does not fit in the address space of the machine.
    #[error("program is {len} bytes long, but memory only holds {max} bytes")]
    ProgramTooLarge {
        /// The length of the rejected image.
        len: usize,
        /// The size of the memory.
        max: usize,
    },
    /// A `PRN` instruction failed to write to its output.
    #[error("failed to write output: {0}")]
    Output(io::ErrorKind),
}

impl From<io::Error> for Error {
    #[inline]
    fn from(value: io::Error) -> Self {
        Error::Output(value.kind())
    }
}
