//! Defines the [`Trace`] trait, used to gather information about the execution of an LS-8
//! program within the virtual machine.

use std::fmt::Write;

use crate::error::Error;
use crate::registers::REGISTER_COUNT;

/// A collection of callbacks to be called during the execution of an LS-8 program.
///
/// Every callback has an empty default implementation.
#[allow(unused_variables)]
pub trait Trace {
    /// Called at the start of every cycle, before the instruction at `pc` is decoded.
    ///
    /// `window` holds the OP code followed by both operand bytes.
    fn fetch(&mut self, pc: u8, window: [u8; 3], registers: &[u8; REGISTER_COUNT]) {}

    /// Called once the machine executed a `HLT` instruction.
    ///
    /// `cycles` includes the `HLT` instruction itself.
    fn halt(&mut self, pc: u8, cycles: u64) {}

    /// Called when the instruction at `pc` failed and the machine aborted.
    fn abort(&mut self, pc: u8, error: &Error) {}
}

/// An implementation of [`Trace`] that does nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopTrace;
impl Trace for NoopTrace {}

/// An implementation of [`Trace`] emitting every fetched instruction as a `trace` level record
/// through the [`log`] facade.
///
/// See [`format_fetch`] for the layout of the records.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogTrace;

impl Trace for LogTrace {
    fn fetch(&mut self, pc: u8, window: [u8; 3], registers: &[u8; REGISTER_COUNT]) {
        if log::log_enabled!(log::Level::Trace) {
            log::trace!("{}", format_fetch(pc, window, registers));
        }
    }

    fn halt(&mut self, pc: u8, cycles: u64) {
        log::debug!("halted at {pc:#04x} after {cycles} cycles");
    }

    fn abort(&mut self, pc: u8, error: &Error) {
        log::debug!("aborted at {pc:#04x}: {error}");
    }
}

/// Formats the state of the machine at the start of a cycle as a single line.
///
/// ```
/// # use ls8_vm::trace::format_fetch;
/// let line = format_fetch(0x03, [0x82, 0x01, 0x09], &[8, 0, 0, 0, 0, 0, 0, 0xF4]);
/// assert_eq!(line, "TRACE: 03 | 82 01 09 | 08 00 00 00 00 00 00 F4");
/// ```
pub fn format_fetch(pc: u8, window: [u8; 3], registers: &[u8; REGISTER_COUNT]) -> String {
    let [op, a, b] = window;
    let mut line = format!("TRACE: {pc:02X} | {op:02X} {a:02X} {b:02X} |");

    for register in registers {
        // Writing to a `String` cannot fail.
        let _ = write!(line, " {register:02X}");
    }

    line
}
