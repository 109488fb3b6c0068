use std::process::Command;

#[test]
fn test_cli_help() {
    let output = Command::new(env!("CARGO_BIN_EXE_ledgrid"))
        .arg("--help")
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("LedGrid Simulator"));
}

#[test]
fn test_cli_unknown_demo_fails() {
    let output = Command::new(env!("CARGO_BIN_EXE_ledgrid"))
        .args(["--demo", "pong", "--max-ticks", "1"])
        .output()
        .expect("Failed to execute command");

    assert!(!output.status.success());
}

#[test]
fn test_cli_test_missing_script() {
    let output = Command::new(env!("CARGO_BIN_EXE_ledgrid"))
        .args(["test", "--script", "non_existent_script.yaml"])
        .output()
        .expect("Failed to execute command");

    assert!(!output.status.success());
    assert_eq!(output.status.code(), Some(2)); // EXIT_CONFIG_ERROR
}
