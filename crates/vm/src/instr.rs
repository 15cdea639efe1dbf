//! Defines the [`Instruction`] type, responsible for representing a single decoded LS-8
//! instruction along with its operands.
//!
//! # Encoding
//!
//! An OP code is a single byte laid out as `AABCDDDD`:
//!
//! - `AA`: the number of operand bytes following the OP code (`0`, `1` or `2`).
//! - `B`: set if the instruction is handled by the ALU.
//! - `C`: set if the instruction writes the **Program Counter** directly.
//! - `DDDD`: identifies the instruction.

use std::fmt;

use crate::error::Error;

/// Mask selecting the operand count of an OP code.
const ARITY_MASK: u8 = 0b1100_0000;
/// Mask selecting the ALU bit of an OP code.
const ALU_MASK: u8 = 0b0010_0000;
/// Mask selecting the "sets PC" bit of an OP code.
const SETS_PC_MASK: u8 = 0b0001_0000;

/// The OP code of an instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum OpCode {
    /// Stops the machine.
    Hlt = 0b0000_0001,
    /// Loads an immediate value into a register.
    Ldi = 0b1000_0010,
    /// Prints the value of a register.
    Prn = 0b0100_0111,
    /// Pushes the value of a register onto the stack.
    Push = 0b0100_0101,
    /// Pops the top of the stack into a register.
    Pop = 0b0100_0110,
    /// Adds two registers, storing the result in the first one.
    Add = 0b1010_0000,
    /// Multiplies two registers, storing the result in the first one.
    Mul = 0b1010_0010,
    /// Compares two registers, updating the flags.
    Cmp = 0b1010_0111,
    /// Jumps to the address stored in a register.
    Jmp = 0b0101_0100,
    /// Jumps to the address stored in a register if the `EQUAL` flag is set.
    Jeq = 0b0101_0101,
    /// Jumps to the address stored in a register if the `EQUAL` flag is clear.
    Jne = 0b0101_0110,
}

impl OpCode {
    /// Every OP code known to the machine.
    pub const ALL: [OpCode; 11] = [
        OpCode::Hlt,
        OpCode::Ldi,
        OpCode::Prn,
        OpCode::Push,
        OpCode::Pop,
        OpCode::Add,
        OpCode::Mul,
        OpCode::Cmp,
        OpCode::Jmp,
        OpCode::Jeq,
        OpCode::Jne,
    ];

    /// Resolves a raw byte into an [`OpCode`].
    ///
    /// # Errors
    ///
    /// Fails with [`Error::UnknownInstruction`] if the byte does not name an instruction.
    pub const fn from_byte(byte: u8) -> Result<Self, Error> {
        match byte {
            0b0000_0001 => Ok(OpCode::Hlt),
            0b1000_0010 => Ok(OpCode::Ldi),
            0b0100_0111 => Ok(OpCode::Prn),
            0b0100_0101 => Ok(OpCode::Push),
            0b0100_0110 => Ok(OpCode::Pop),
            0b1010_0000 => Ok(OpCode::Add),
            0b1010_0010 => Ok(OpCode::Mul),
            0b1010_0111 => Ok(OpCode::Cmp),
            0b0101_0100 => Ok(OpCode::Jmp),
            0b0101_0101 => Ok(OpCode::Jeq),
            0b0101_0110 => Ok(OpCode::Jne),
            _ => Err(Error::UnknownInstruction(byte)),
        }
    }

    /// Returns the raw byte of the OP code.
    #[inline(always)]
    pub const fn byte(self) -> u8 {
        self as u8
    }

    /// Returns the number of operand bytes following the OP code.
    #[inline(always)]
    pub const fn arity(self) -> u8 {
        (self.byte() & ARITY_MASK) >> 6
    }

    /// Returns the number of bytes the instruction occupies in memory, OP code included.
    #[inline(always)]
    pub const fn width(self) -> u8 {
        1 + self.arity()
    }

    /// Returns whether the instruction is executed by the ALU.
    #[inline(always)]
    pub const fn is_alu(self) -> bool {
        self.byte() & ALU_MASK != 0
    }

    /// Returns whether the instruction may write the **Program Counter** directly.
    #[inline(always)]
    pub const fn sets_pc(self) -> bool {
        self.byte() & SETS_PC_MASK != 0
    }

    /// Returns the assembly mnemonic of the instruction.
    pub const fn mnemonic(self) -> &'static str {
        match self {
            OpCode::Hlt => "HLT",
            OpCode::Ldi => "LDI",
            OpCode::Prn => "PRN",
            OpCode::Push => "PUSH",
            OpCode::Pop => "POP",
            OpCode::Add => "ADD",
            OpCode::Mul => "MUL",
            OpCode::Cmp => "CMP",
            OpCode::Jmp => "JMP",
            OpCode::Jeq => "JEQ",
            OpCode::Jne => "JNE",
        }
    }
}

/// A single decoded LS-8 instruction.
///
/// Both operand bytes following the OP code are always fetched, even when the instruction does
/// not use them. [`Instruction::operands`] only exposes the ones it actually takes.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Instruction {
    /// The OP code of the instruction.
    pub op_code: OpCode,
    /// The two bytes following the OP code in memory.
    raw_operands: [u8; 2],
}

impl Instruction {
    /// Decodes the instruction starting with the first byte of `window`.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::UnknownInstruction`] if the first byte is not a known OP code.
    #[inline]
    pub fn decode(window: [u8; 3]) -> Result<Self, Error> {
        let [op_code, a, b] = window;

        Ok(Self {
            op_code: OpCode::from_byte(op_code)?,
            raw_operands: [a, b],
        })
    }

    /// Returns the operands the instruction takes, as determined by its arity.
    #[inline(always)]
    pub fn operands(&self) -> &[u8] {
        &self.raw_operands[..usize::from(self.op_code.arity())]
    }

    /// Returns the first byte following the OP code.
    #[inline(always)]
    pub fn operand_a(&self) -> u8 {
        self.raw_operands[0]
    }

    /// Returns the second byte following the OP code.
    #[inline(always)]
    pub fn operand_b(&self) -> u8 {
        self.raw_operands[1]
    }

    /// Returns the number of bytes the instruction occupies in memory.
    #[inline(always)]
    pub fn width(&self) -> u8 {
        self.op_code.width()
    }
}

impl fmt::Debug for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Instruction")
            .field("op_code", &self.op_code)
            .field("operands", &self.operands())
            .finish()
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.op_code.mnemonic())?;
        for (i, operand) in self.operands().iter().enumerate() {
            let sep = if i == 0 { " " } else { ", " };
            write!(f, "{sep}{operand}")?;
        }
        Ok(())
    }
}
