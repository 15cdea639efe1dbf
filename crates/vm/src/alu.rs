//! The Arithmetic Logic Unit.
//!
//! Every ALU instruction takes two register indices `a` and `b`, reads both registers, and either
//! writes the result back into `a` or updates the flags. Arithmetic wraps modulo 256.

use crate::cpu::{Cpu, Flags};
use crate::error::Error;
use crate::instr::OpCode;

/// Executes the ALU instruction `op` on registers `a` and `b`, then moves the **Program
/// Counter** past it.
///
/// # Errors
///
/// - [`Error::InvalidRegister`] if `a` or `b` does not name a register.
///
/// - [`Error::UnsupportedAluOperation`] if `op` is not an ALU instruction. The CPU is left
///   untouched in that case.
pub fn execute(op: OpCode, a: u8, b: u8, cpu: &mut Cpu) -> Result<(), Error> {
    let lhs = cpu.registers.get(a)?;
    let rhs = cpu.registers.get(b)?;

    match op {
        OpCode::Add => cpu.registers.set(a, lhs.wrapping_add(rhs))?,
        OpCode::Mul => cpu.registers.set(a, lhs.wrapping_mul(rhs))?,
        OpCode::Cmp => cpu.flags = Flags::from_ordering(lhs.cmp(&rhs)),
        _ => return Err(Error::UnsupportedAluOperation(op.byte())),
    }

    cpu.advance(op.width());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cpu_with(lhs: u8, rhs: u8) -> Cpu {
        let mut cpu = Cpu::new();
        cpu.registers.set(0, lhs).unwrap();
        cpu.registers.set(1, rhs).unwrap();
        cpu
    }

    #[test]
    fn add_wraps_at_eight_bits() {
        for lhs in 0..=u8::MAX {
            for rhs in 0..=u8::MAX {
                let mut cpu = cpu_with(lhs, rhs);
                execute(OpCode::Add, 0, 1, &mut cpu).unwrap();

                let expected = ((u16::from(lhs) + u16::from(rhs)) % 256) as u8;
                assert_eq!(cpu.registers.get(0), Ok(expected), "{lhs} + {rhs}");
                assert_eq!(cpu.registers.get(1), Ok(rhs));
                assert_eq!(cpu.pc, 3);
            }
        }
    }

    #[test]
    fn mul_wraps_at_eight_bits() {
        for lhs in 0..=u8::MAX {
            for rhs in 0..=u8::MAX {
                let mut cpu = cpu_with(lhs, rhs);
                execute(OpCode::Mul, 0, 1, &mut cpu).unwrap();

                let expected = ((u16::from(lhs) * u16::from(rhs)) % 256) as u8;
                assert_eq!(cpu.registers.get(0), Ok(expected), "{lhs} * {rhs}");
                assert_eq!(cpu.pc, 3);
            }
        }
    }

    #[test]
    fn add_register_to_itself() {
        let mut cpu = cpu_with(100, 0);
        execute(OpCode::Add, 0, 0, &mut cpu).unwrap();
        assert_eq!(cpu.registers.get(0), Ok(200));
    }

    #[test]
    fn cmp_sets_a_single_flag() {
        for lhs in 0..=u8::MAX {
            for rhs in 0..=u8::MAX {
                let mut cpu = cpu_with(lhs, rhs);
                execute(OpCode::Cmp, 0, 1, &mut cpu).unwrap();

                let expected = if lhs == rhs {
                    Flags::EQUAL
                } else if lhs < rhs {
                    Flags::LESS
                } else {
                    Flags::GREATER
                };
                assert_eq!(cpu.flags, expected, "cmp {lhs}, {rhs}");
                assert_eq!(cpu.registers.get(0), Ok(lhs));
                assert_eq!(cpu.pc, 3);
            }
        }
    }

    #[test]
    fn cmp_overwrites_previous_flags() {
        let mut cpu = cpu_with(1, 2);
        cpu.flags = Flags::EQUAL;
        execute(OpCode::Cmp, 0, 1, &mut cpu).unwrap();
        assert_eq!(cpu.flags, Flags::LESS);
    }

    #[test]
    fn non_alu_op_codes_are_rejected() {
        for op in [OpCode::Ldi, OpCode::Prn, OpCode::Jmp, OpCode::Hlt] {
            let mut cpu = cpu_with(3, 4);
            assert_eq!(
                execute(op, 0, 1, &mut cpu),
                Err(Error::UnsupportedAluOperation(op.byte()))
            );
            assert_eq!(cpu, cpu_with(3, 4));
        }
    }

    #[test]
    fn invalid_register_is_reported() {
        let mut cpu = Cpu::new();
        assert_eq!(
            execute(OpCode::Add, 0, 9, &mut cpu),
            Err(Error::InvalidRegister(9))
        );
        assert_eq!(cpu.pc, 0);
    }
}
