//! # LS-8
//!
//! An emulator for the LS-8, a tiny 8-bit CPU.
//!
//! The machine has 256 bytes of memory, eight byte-wide general purpose registers, a program
//! counter, and a flags register. Programs are plain memory images executed from address `0`
//! until a `HLT` instruction is reached.
//!
//! # Instruction set
//!
//! | OP code | Operands | Effect |
//! |---|---|---|
//! | `LDI` | `reg`, `imm` | `reg = imm` |
//! | `PRN` | `reg` | print `reg` in decimal |
//! | `PUSH` | `reg` | `SP -= 1; mem[SP] = reg` |
//! | `POP` | `reg` | `reg = mem[SP]; SP += 1` |
//! | `ADD` | `a`, `b` | `a = a + b` |
//! | `MUL` | `a`, `b` | `a = a * b` |
//! | `CMP` | `a`, `b` | set flags from the comparison of `a` and `b` |
//! | `JMP` | `reg` | `PC = reg` |
//! | `JEQ` | `reg` | `PC = reg` if the last comparison was equal |
//! | `JNE` | `reg` | `PC = reg` if the last comparison was not equal |
//! | `HLT` | | stop the machine |
//!
//! The encoding of OP codes is described in [`instr`].

#![warn(missing_docs, missing_debug_implementations)]
#![deny(unsafe_op_in_unsafe_fn)]

use std::io::Write;

use cpu::Cpu;
use error::Error;
use instr::{Instruction, OpCode};
use memory::Memory;
use trace::Trace;

pub mod alu;
pub mod cpu;
pub mod error;
pub mod instr;
pub mod memory;
pub mod registers;
pub mod trace;


/// The outcome of a single [`Ls8VM::step`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// The instruction was executed and the machine can keep running.
    Continue,
    /// A `HLT` instruction was reached.
    Halted,
}

/// The state of the fetch-decode-execute loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Status {
    /// The machine is ready to execute the instruction referenced by the **Program Counter**.
    Running,
    /// The machine executed a `HLT` instruction.
    Halted,
    /// An instruction failed. The machine will not execute anything else.
    Aborted(Error),
}

/// Contains the full state of an LS-8 virtual machine.
///
/// # Components
///
/// The [`Ls8VM`] is composed of two main components:
///
/// - [`Cpu`]: The central processing unit of the virtual machine, holding the registers, the
///   flags and the program counter.
///
/// - [`Memory`]: The memory associated with the virtual machine. The program and the stack are
///   stored here.
///
/// # Execution
///
/// Each call to [`step`](Ls8VM::step) runs one fetch-decode-execute cycle: the OP code at the
/// program counter and the two bytes following it are read, the OP code is decoded, and the
/// instruction is executed. The instruction is responsible for moving the program counter,
/// either past itself or to a jump target.
///
/// Once the machine halted or aborted, further steps do nothing.
#[derive(Debug, Clone)]
pub struct Ls8VM {
    /// The central processing unit of the virtual machine.
    cpu: Cpu,
    /// The memory associated with the virtual machine.
    memory: Memory,
    /// The state of the execution loop.
    status: Status,
    /// The number of instructions executed so far.
    cycles: u64,
}

impl Default for Ls8VM {
    #[inline(always)]
    fn default() -> Self {
        Self::new()
    }
}

impl Ls8VM {
    /// Creates a new virtual machine with zeroed memory and registers.
    pub const fn new() -> Self {
        Self {
            cpu: Cpu::new(),
            memory: Memory::new(),
            status: Status::Running,
            cycles: 0,
        }
    }

    /// Creates a new virtual machine and loads `image` into its memory at address `0`.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::ProgramTooLarge`] if the image does not fit in memory.
    pub fn with_program(image: &[u8]) -> Result<Self, Error> {
        let mut vm = Self::new();
        vm.memory.load(image)?;
        Ok(vm)
    }

    /// Returns the current state of the [`Cpu`].
    #[inline(always)]
    pub fn cpu(&self) -> &Cpu {
        &self.cpu
    }

    /// Returns the current state of the [`Memory`].
    #[inline(always)]
    pub fn memory(&self) -> &Memory {
        &self.memory
    }

    /// Returns the state of the execution loop.
    #[inline(always)]
    pub fn status(&self) -> &Status {
        &self.status
    }

    /// Returns the number of instructions executed so far, including a final `HLT`.
    #[inline(always)]
    pub fn cycles(&self) -> u64 {
        self.cycles
    }

    /// Advances the virtual machine by a single instruction, writing printed values to `out` and
    /// tracing events using the provided [`Trace`] implementation.
    ///
    /// # Errors
    ///
    /// Any error aborts the machine. The same error is returned by every later call.
    pub fn step<W, T>(&mut self, out: &mut W, trace: &mut T) -> Result<Step, Error>
    where
        W: ?Sized + Write,
        T: ?Sized + Trace,
    {
        match &self.status {
            Status::Running => (),
            Status::Halted => return Ok(Step::Halted),
            Status::Aborted(err) => return Err(err.clone()),
        }

        let pc = self.cpu.pc;
        let window = self.memory.window(pc);
        trace.fetch(pc, window, &self.cpu.registers.snapshot());

        match execute(window, &mut self.cpu, &mut self.memory, out) {
            Ok(step) => {
                self.cycles += 1;
                if step == Step::Halted {
                    self.status = Status::Halted;
                    trace.halt(pc, self.cycles);
                }
                Ok(step)
            }
            Err(err) => {
                self.status = Status::Aborted(err.clone());
                trace.abort(pc, &err);
                Err(err)
            }
        }
    }

    /// Runs the virtual machine until it halts.
    ///
    /// Returns the number of executed instructions.
    ///
    /// # Errors
    ///
    /// Stops at the first instruction that fails, leaving the machine aborted.
    pub fn run<W, T>(&mut self, out: &mut W, trace: &mut T) -> Result<u64, Error>
    where
        W: ?Sized + Write,
        T: ?Sized + Trace,
    {
        while self.step(out, trace)? == Step::Continue {}
        Ok(self.cycles)
    }
}

/// Decodes and executes the instruction held in `window`.
///
/// Every instruction updates the **Program Counter** itself: jumps overwrite it and every other
/// instruction moves it past its own operands.
fn execute<W>(
    window: [u8; 3],
    cpu: &mut Cpu,
    memory: &mut Memory,
    out: &mut W,
) -> Result<Step, Error>
where
    W: ?Sized + Write,
{
    let instr = Instruction::decode(window)?;
    let a = instr.operand_a();

    if instr.op_code.is_alu() {
        alu::execute(instr.op_code, a, instr.operand_b(), cpu)?;
        return Ok(Step::Continue);
    }

    match instr.op_code {
        OpCode::Hlt => return Ok(Step::Halted),
        OpCode::Ldi => cpu.registers.set(a, instr.operand_b())?,
        OpCode::Prn => {
            let value = cpu.registers.get(a)?;
            writeln!(out, "{value}")?;
        }
        OpCode::Push => {
            // Reject a bad register before touching the stack pointer.
            cpu.registers.get(a)?;
            let sp = cpu.registers.stack_pointer().wrapping_sub(1);
            cpu.registers.set_stack_pointer(sp);
            // `PUSH R7` stores the decremented stack pointer.
            let value = cpu.registers.get(a)?;
            memory.write(sp, value);
        }
        OpCode::Pop => {
            let sp = cpu.registers.stack_pointer();
            let value = memory.read(sp);
            cpu.registers.set(a, value)?;
            // `POP R7` leaves the popped value plus one in the stack pointer.
            let sp = cpu.registers.stack_pointer().wrapping_add(1);
            cpu.registers.set_stack_pointer(sp);
        }
        OpCode::Jmp => {
            cpu.pc = cpu.registers.get(a)?;
            return Ok(Step::Continue);
        }
        OpCode::Jeq | OpCode::Jne => {
            let target = cpu.registers.get(a)?;
            if cpu.flags.is_equal() == (instr.op_code == OpCode::Jeq) {
                cpu.pc = target;
                return Ok(Step::Continue);
            }
        }
        // Every op code carrying the ALU bit was dispatched above.
        op @ (OpCode::Add | OpCode::Mul | OpCode::Cmp) => {
            return Err(Error::UnsupportedAluOperation(op.byte()));
        }
    }

    cpu.advance(instr.width());
    Ok(Step::Continue)
}
