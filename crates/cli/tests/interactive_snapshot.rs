use std::process::Command;
use std::time::{SystemTime, UNIX_EPOCH};

#[test]
fn test_cli_interactive_writes_snapshot() {
    let nonce = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    let snapshot_path =
        std::env::temp_dir().join(format!("ledgrid-interactive-snapshot-{}.json", nonce));
    let _ = std::fs::remove_file(&snapshot_path);

    let output = Command::new(env!("CARGO_BIN_EXE_ledgrid"))
        .args([
            "--demo",
            "trail",
            "--max-ticks",
            "1",
            "--snapshot",
            snapshot_path.to_str().unwrap(),
        ])
        .output()
        .expect("Failed to execute ledgrid");

    assert!(output.status.success());
    assert!(snapshot_path.exists());

    let snapshot_content = std::fs::read_to_string(&snapshot_path).unwrap();
    let snapshot: serde_json::Value = serde_json::from_str(&snapshot_content).unwrap();
    assert_eq!(snapshot["type"], "sim_board");
    assert_eq!(snapshot["ticks"], 1);

    let red = snapshot["matrix"]["red"].as_array().unwrap();
    assert_eq!(red.len(), 16);
    // One tick from the spawn cell: a single trail bit in row 7.
    assert_eq!(red[7], serde_json::json!(128));

    let _ = std::fs::remove_file(&snapshot_path);
}
