use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

fn ls8<I, S>(args: I) -> Output
where
    I: IntoIterator<Item = S>,
    S: AsRef<std::ffi::OsStr>,
{
    Command::new(env!("CARGO_BIN_EXE_ls8"))
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("failed to spawn ls8")
}

fn sample(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("../../programs")
        .join(name)
}

/// Writes `source` to a fresh program file and returns its path.
fn program_file(name: &str, source: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!("ls8-cli-{}-{name}.ls8", std::process::id()));
    fs::write(&path, source).expect("failed to write program");
    path
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

#[test]
fn halting_program_exits_zero() {
    let output = ls8([sample("mult.ls8")]);

    assert_eq!(output.status.code(), Some(0), "stderr: {}", stderr(&output));
    assert_eq!(stdout(&output), "72\n");
}

#[test]
fn unknown_instruction_exits_one() {
    let path = program_file(
        "unknown",
        "10000010 # LDI R0,1\n00000000\n00000001\n11111111\n01000111 # PRN R0\n00000000\n",
    );
    let output = ls8([&path]);
    let _ = fs::remove_file(&path);

    assert_eq!(output.status.code(), Some(1));
    assert!(stdout(&output).is_empty());
    assert!(
        stderr(&output).contains("Unknown instruction: 255"),
        "stderr: {}",
        stderr(&output)
    );
}

#[test]
fn invalid_register_exits_one() {
    let path = program_file("register", "10000010 # LDI R8,1\n00001000\n00000001\n00000001\n");
    let output = ls8([&path]);
    let _ = fs::remove_file(&path);

    assert_eq!(output.status.code(), Some(1));
    assert!(
        stderr(&output).contains("register index 8 out of bounds"),
        "stderr: {}",
        stderr(&output)
    );
}

#[test]
fn missing_file_exits_two() {
    let path = std::env::temp_dir().join("ls8-cli-does-not-exist.ls8");
    let _ = fs::remove_file(&path);
    let output = ls8([&path]);

    assert_eq!(output.status.code(), Some(2));
    assert!(stdout(&output).is_empty());
    assert!(
        stderr(&output).contains("not found"),
        "stderr: {}",
        stderr(&output)
    );
}

#[test]
fn missing_argument_exits_two() {
    let output = ls8(std::iter::empty::<&str>());

    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("usage:"), "stderr: {}", stderr(&output));
}

#[cfg(unix)]
#[test]
fn non_utf8_path_is_reported_as_missing() {
    use std::ffi::OsStr;
    use std::os::unix::ffi::OsStrExt;

    let path = std::env::temp_dir().join(OsStr::from_bytes(b"ls8-cli-\xFF.ls8"));
    let _ = fs::remove_file(&path);
    let output = ls8([&path]);

    assert_eq!(output.status.code(), Some(2), "stderr: {}", stderr(&output));
    assert!(stderr(&output).contains("not found"));
}
