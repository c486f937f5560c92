//! Integration tests for CLI argument handling

use std::process::Command;

/// Helper to run the CLI with given args and capture output
fn run_cli(args: &[&str]) -> std::process::Output {
    Command::new(env!("CARGO_BIN_EXE_pokedex"))
        .args(args)
        .output()
        .expect("Failed to execute pokedex")
}

#[test]
fn test_help_flag_exits_successfully() {
    let output = run_cli(&["--help"]);
    assert!(output.status.success(), "Expected --help to exit successfully");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("pokedex"), "Help should mention pokedex");
    assert!(stdout.contains("list"), "Help should mention the list command");
    assert!(stdout.contains("random"), "Help should mention the random command");
    assert!(stdout.contains("show"), "Help should mention the show command");
}

#[test]
fn test_missing_subcommand_fails() {
    let output = run_cli(&[]);
    assert!(!output.status.success(), "Expected missing subcommand to fail");
}

#[test]
fn test_invalid_sort_prints_error_and_exits() {
    let output = run_cli(&["list", "--sort", "speed"]);
    assert!(!output.status.success(), "Expected invalid sort to fail");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("invalid value") && stderr.contains("speed"),
        "Should print error message about invalid sort: {}",
        stderr
    );
}
