//! Batch CLI Tests

use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, Output, Stdio};

use uuid::Uuid;

const LINHA: &str = "34191.09008 01234.567804 01234.567805 1 23450000012345";

fn decode_boletos() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_decode_boletos"));
    cmd.env_remove("RUST_LOG");
    cmd
}

/// Input file removed on drop
struct InputFile(PathBuf);

impl InputFile {
    fn new(contents: &str) -> Self {
        let path = std::env::temp_dir().join(format!("boletos-{}.txt", Uuid::new_v4()));
        std::fs::write(&path, contents).unwrap();
        Self(path)
    }
}

impl Drop for InputFile {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.0);
    }
}

fn run_with_stdin(args: &[&str], stdin: &str) -> Output {
    let mut child = decode_boletos()
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .unwrap();
    // the child may exit on a usage error before reading its input
    let _ = child.stdin.take().unwrap().write_all(stdin.as_bytes());
    child.wait_with_output().unwrap()
}

fn stdout_lines(output: &Output) -> Vec<serde_json::Value> {
    String::from_utf8(output.stdout.clone())
        .unwrap()
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect()
}

#[test]
fn test_file_input_one_json_object_per_line() {
    let input = InputFile::new(&format!("{LINHA}\n\n   \n123\n"));

    let output = decode_boletos()
        .arg("--input")
        .arg(&input.0)
        .output()
        .unwrap();
    assert!(output.status.success());

    let lines = stdout_lines(&output);
    assert_eq!(lines.len(), 2);

    assert_eq!(lines[0]["status"], "decoded");
    assert_eq!(lines[0]["index"], 0);
    assert_eq!(lines[0]["boleto"]["valor"], "123.45");
    assert_eq!(lines[0]["boleto"]["data_vencimento"], "2028-10-29");

    // blank lines are skipped but still count toward the index
    assert_eq!(lines[1]["status"], "rejected");
    assert_eq!(lines[1]["index"], 3);
    assert_eq!(lines[1]["error_code"], "invalid_length");

    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("Decoded: 1"));
    assert!(stderr.contains("Rejected: 1"));
}

#[test]
fn test_stdin_input() {
    let output = run_with_stdin(&[], &format!("{LINHA}\n"));
    assert!(output.status.success());

    let lines = stdout_lines(&output);
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0]["boleto"]["fator_vencimento"], 2345);

    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("Decoded: 1"));
    assert!(stderr.contains("Rejected: 0"));
}

#[test]
fn test_strict_fails_on_rejected_line() {
    let input = format!("{LINHA}\nnot a boleto\n");

    let lenient = run_with_stdin(&[], &input);
    assert!(lenient.status.success());

    let strict = run_with_stdin(&["--strict"], &input);
    assert!(!strict.status.success());
    // output is still written before failing
    assert_eq!(stdout_lines(&strict).len(), 2);
    assert_eq!(stdout_lines(&strict)[1]["error_code"], "no_digits");
}

#[test]
fn test_strict_succeeds_when_all_lines_decode() {
    let input = InputFile::new(&format!("{LINHA}\n{LINHA}\n"));

    let output = decode_boletos()
        .arg("--strict")
        .arg("--input")
        .arg(&input.0)
        .output()
        .unwrap();

    assert!(output.status.success());
    assert_eq!(stdout_lines(&output).len(), 2);
}

#[test]
fn test_bad_arguments_rejected() {
    // misspelled flag
    let output = run_with_stdin(&["--strcit"], "123\n");
    assert!(!output.status.success());
    assert!(output.stdout.is_empty());

    // --input without a path
    let output = run_with_stdin(&["--input"], &format!("{LINHA}\n"));
    assert!(!output.status.success());
    assert!(output.stdout.is_empty());

    // a flag is not taken as the input path
    let output = run_with_stdin(&["--input", "--strict"], &format!("{LINHA}\n"));
    assert!(!output.status.success());
    assert!(output.stdout.is_empty());

    // missing file
    let missing = std::env::temp_dir().join(format!("boletos-{}.txt", Uuid::new_v4()));
    let output = decode_boletos()
        .arg("--input")
        .arg(&missing)
        .output()
        .unwrap();
    assert!(!output.status.success());
    assert!(String::from_utf8(output.stderr).unwrap().contains("opening"));
}
