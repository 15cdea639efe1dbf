//! Runs an LS-8 program.
//!
//! ```text
//! ls8 <program.ls8>
//! ```
//!
//! The process exits with `0` when the program halts, `1` when the machine aborts, and `2` when
//! the program file cannot be found. Set `RUST_LOG=trace` to print the state of the machine
//! before every instruction.

use std::env;
use std::io;
use std::path::Path;
use std::process::ExitCode;

use color_eyre::eyre::Result;
use log::LevelFilter;
use simple_logger::SimpleLogger;

use ls8_vm::error::Error;
use ls8_vm::trace::LogTrace;
use ls8_vm::Ls8VM;

use loader::LoadError;

mod loader;

/// The machine aborted.
const EXIT_ABORTED: u8 = 1;
/// The program could not be found.
const EXIT_NOT_FOUND: u8 = 2;

fn main() -> Result<ExitCode> {
    color_eyre::install()?;
    SimpleLogger::new()
        .with_level(LevelFilter::Warn)
        .env()
        .init()?;

    let mut args = env::args_os();
    let program = args.next().unwrap_or_else(|| "ls8".into());
    let argv0 = Path::new(&program).display();
    let Some(path) = args.next() else {
        eprintln!("usage: {argv0} <program.ls8>");
        return Ok(ExitCode::from(EXIT_NOT_FOUND));
    };
    let path = Path::new(&path);

    let image = match loader::load(path) {
        Ok(image) => image,
        Err(err @ LoadError::NotFound { .. }) => {
            eprintln!("{argv0}: {err}");
            return Ok(ExitCode::from(EXIT_NOT_FOUND));
        }
        Err(err) => return Err(err.into()),
    };

    let mut vm = Ls8VM::with_program(&image)?;
    let mut out = io::stdout().lock();

    match vm.run(&mut out, &mut LogTrace) {
        Ok(cycles) => {
            log::info!("{} halted after {cycles} cycles", path.display());
            Ok(ExitCode::SUCCESS)
        }
        Err(Error::UnknownInstruction(op)) => {
            eprintln!("Unknown instruction: {op}");
            Ok(ExitCode::from(EXIT_ABORTED))
        }
        Err(err) => {
            eprintln!("{argv0}: {err}");
            Ok(ExitCode::from(EXIT_ABORTED))
        }
    }
}

#[cfg(test)]
mod tests {
    use ls8_vm::trace::NoopTrace;

    use super::*;

    fn run_program(source: &str) -> String {
        let image = loader::parse(source).unwrap();
        let mut vm = Ls8VM::with_program(&image).unwrap();
        let mut out = Vec::new();
        vm.run(&mut out, &mut NoopTrace).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn print8() {
        assert_eq!(run_program(include_str!("../../../programs/print8.ls8")), "8\n");
    }

    #[test]
    fn mult() {
        assert_eq!(run_program(include_str!("../../../programs/mult.ls8")), "72\n");
    }

    #[test]
    fn stack() {
        let out = run_program(include_str!("../../../programs/stack.ls8"));
        assert_eq!(out, "3\n2\n1\n");
    }

    #[test]
    fn cmp() {
        let out = run_program(include_str!("../../../programs/cmp.ls8"));
        assert_eq!(out, "1\n4\n5\n");
    }
}
