//! Reads LS-8 programs from disk.
//!
//! A program file holds one byte per line, written as a binary literal. Anything following a `#`
//! is a comment, surrounding whitespace is ignored, and lines left empty are skipped:
//!
//! ```text
//! # print8.ls8
//! 10000010 # LDI R0,8
//! 00000000
//! 00001000
//!
//! 01000111 # PRN R0
//! 00000000
//! 00000001 # HLT
//! ```

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use ls8_vm::memory::MEMORY_SIZE;

/// An error that might occur while loading a program.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// The program file does not exist.
    #[error("{} not found", .path.display())]
    NotFound {
        /// The path that was looked up.
        path: PathBuf,
    },
    /// The program file exists but could not be read.
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        /// The path of the program file.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: io::Error,
    },
    /// A line does not hold an 8-bit binary literal.
    #[error("line {line}: `{text}` is not an 8-bit binary literal")]
    InvalidLiteral {
        /// The line number, starting at 1.
        line: usize,
        /// The offending text, comment and whitespace removed.
        text: String,
    },
    /// The program holds more bytes than the machine has memory.
    #[error("program holds {len} bytes, but memory only holds {max}", max = MEMORY_SIZE)]
    TooLarge {
        /// The number of bytes in the program.
        len: usize,
    },
}

/// Reads the program at `path` into a memory image.
pub fn load(path: &Path) -> Result<Vec<u8>, LoadError> {
    let source = fs::read_to_string(path).map_err(|source| match source.kind() {
        io::ErrorKind::NotFound => LoadError::NotFound {
            path: path.to_path_buf(),
        },
        _ => LoadError::Io {
            path: path.to_path_buf(),
            source,
        },
    })?;

    let image = parse(&source)?;
    log::debug!("loaded {} bytes from {}", image.len(), path.display());
    Ok(image)
}

/// Parses the content of a program file into a memory image.
pub fn parse(source: &str) -> Result<Vec<u8>, LoadError> {
    let mut image = Vec::new();

    for (index, line) in source.lines().enumerate() {
        let text = line.split('#').next().unwrap_or_default().trim();
        if text.is_empty() {
            continue;
        }

        image.push(parse_literal(text).ok_or_else(|| LoadError::InvalidLiteral {
            line: index + 1,
            text: text.to_owned(),
        })?);
    }

    if image.len() > MEMORY_SIZE {
        return Err(LoadError::TooLarge { len: image.len() });
    }

    Ok(image)
}

/// Parses a binary literal of at most eight digits.
fn parse_literal(text: &str) -> Option<u8> {
    // `from_str_radix` would also accept a leading sign.
    if text.len() > 8 || !text.bytes().all(|b| b == b'0' || b == b'1') {
        return None;
    }

    u8::from_str_radix(text, 2).ok()
}
