//! End-to-end tests for the `cilk-simd convert` command.

mod common;

use common::{KERNEL, run_converter, stdout};
use std::fs;

#[test]
fn test_convert_writes_output_and_log() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("kernel.c"), KERNEL).unwrap();

    let output = run_converter(
        dir.path(),
        &["convert", "kernel.c", "kernel_omp.c", "--log", "run.log"],
    );
    assert!(output.status.success());
    assert_eq!(stdout(&output), "Converted 3 Cilk Plus constructs\n");

    let converted = fs::read_to_string(dir.path().join("kernel_omp.c")).unwrap();
    assert!(converted.contains("    #pragma omp simd\n    for (int i = 0; i < VLENGTH; i++) {\n        y[i] = x[i] * 2.0;\n    }"));
    assert!(converted.contains("    double s = 0;\n    #pragma omp simd reduction(+:s)\n"));
    assert!(converted.contains("        if (x[i] > 0.5) {\n            y[i] = 0.0;\n        }\n"));
    assert!(!converted.contains("vALL"));
    assert_eq!(
        fs::read_to_string(dir.path().join("run.log")).unwrap(),
        "No warnings\n"
    );
}

#[test]
fn test_default_log_path() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("kernel.c"), KERNEL).unwrap();

    let output = run_converter(dir.path(), &["convert", "kernel.c", "out.c"]);
    assert!(output.status.success());
    assert_eq!(
        fs::read_to_string(dir.path().join("cilk_convert_ts.log")).unwrap(),
        "No warnings\n"
    );
}

#[test]
fn test_diagnostics_do_not_fail_the_run() {
    let dir = tempfile::tempdir().unwrap();
    let source = "void f(double *a, double *b) {\n    double d = __sec_reduce_add(a[vALL] * b[vALL]);\n    a[vALL] = b[vALL];\n}\n";
    fs::write(dir.path().join("in.c"), source).unwrap();

    let output = run_converter(
        dir.path(),
        &["convert", "in.c", "out.c", "--log", "warn.log", "--quiet"],
    );
    assert!(output.status.success());
    assert_eq!(
        stdout(&output),
        "Converted 1 Cilk Plus constructs\nWarnings: 1 (see warn.log)\n"
    );

    let log = fs::read_to_string(dir.path().join("warn.log")).unwrap();
    assert_eq!(log.lines().count(), 1);
    assert!(log.starts_with("WARNING: Unrecognized reduction shape: double d ="));

    let converted = fs::read_to_string(dir.path().join("out.c")).unwrap();
    assert!(converted.contains("    double d = __sec_reduce_add(a[vALL] * b[vALL]);\n"));
    assert!(converted.contains("a[i] = b[i];"));
}

#[test]
fn test_missing_input_fails_without_artifacts() {
    let dir = tempfile::tempdir().unwrap();

    let output = run_converter(
        dir.path(),
        &["convert", "absent.c", "out.c", "--log", "run.log"],
    );
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("absent.c"));
    assert!(!dir.path().join("out.c").exists());
    assert!(!dir.path().join("run.log").exists());
}

#[test]
fn test_length_symbol_option() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("kernel.c"), KERNEL).unwrap();

    let output = run_converter(
        dir.path(),
        &["convert", "kernel.c", "out.c", "--length-symbol", "W", "--index", "j"],
    );
    assert!(output.status.success());
    let converted = fs::read_to_string(dir.path().join("out.c")).unwrap();
    assert!(converted.contains("for (int j = 0; j < W; j++) {\n        y[j] = x[j] * 2.0;"));
}

#[test]
fn test_info_logging_reports_finished_conversion() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("kernel.c"), KERNEL).unwrap();

    let output = std::process::Command::new(env!("CARGO_BIN_EXE_cilk-simd"))
        .args(["convert", "kernel.c", "out.c"])
        .env("RUST_LOG", "info")
        .current_dir(dir.path())
        .output()
        .expect("Failed to execute cilk-simd");
    assert!(output.status.success());
    assert_eq!(stdout(&output), "Converted 3 Cilk Plus constructs\n");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("conversion finished"), "stderr: {stderr}");
}
