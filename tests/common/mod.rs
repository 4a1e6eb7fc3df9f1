//! Common test utilities for CLI tests.

use std::path::Path;
use std::process::{Command, Output};

/// A small kernel using every convertible pattern.
#[allow(dead_code)]
pub const KERNEL: &str = "int main(void) {
    double x[VLENGTH];
    double y[VLENGTH];
    y[vALL] = x[vALL] * 2.0;
    double s = __sec_reduce_add(y[vALL]);
    if (x[vALL] > 0.5) {
        y[vALL] = 0.0;
    }
    return 0;
}
";

/// Run the converter binary in `dir` with `args`.
#[allow(dead_code)]
pub fn run_converter(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_cilk-simd"))
        .args(args)
        .current_dir(dir)
        .output()
        .expect("Failed to execute cilk-simd")
}

/// Run the dump comparator binary in `dir` with `args`.
#[allow(dead_code)]
pub fn run_comparator(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_compare-dumps"))
        .args(args)
        .current_dir(dir)
        .output()
        .expect("Failed to execute compare-dumps")
}

#[allow(dead_code)]
pub fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}
