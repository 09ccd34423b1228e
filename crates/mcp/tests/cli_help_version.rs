#![forbid(unsafe_code)]

use std::process::Command;

fn temp_dir(test_name: &str) -> std::path::PathBuf {
    let base = std::env::temp_dir();
    let pid = std::process::id();
    let nonce = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis();
    let dir = base.join(format!("qm_mcp_cli_{test_name}_{pid}_{nonce}"));
    std::fs::create_dir_all(&dir).expect("create temp dir");
    dir
}

#[test]
fn cli_help_exits_zero_and_does_not_create_state_dir() {
    let exe = env!("CARGO_BIN_EXE_qm_mcp");
    let dir = temp_dir("help");

    let output = Command::new(exe)
        .arg("--help")
        .current_dir(&dir)
        .output()
        .expect("run qm_mcp --help");

    assert!(
        output.status.success(),
        "expected zero exit (stderr={})",
        String::from_utf8_lossy(&output.stderr)
    );
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("USAGE:"), "help must include USAGE");
    assert!(stdout.contains("QUERYMAP_LOG"), "help must document env vars");
    assert!(
        !dir.join(".querymap").exists(),
        "--help should not create the state dir"
    );
    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn cli_version_exits_zero_and_includes_pkg_version() {
    let exe = env!("CARGO_BIN_EXE_qm_mcp");
    let output = Command::new(exe)
        .arg("--version")
        .output()
        .expect("run qm_mcp --version");
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(
        stdout.contains(env!("CARGO_PKG_VERSION")),
        "version output must include crate version (got={stdout})"
    );
    assert!(
        stdout.contains("build="),
        "version output must include build tag"
    );
}

#[test]
fn cli_rejects_unknown_flags() {
    let exe = env!("CARGO_BIN_EXE_qm_mcp");
    let dir = temp_dir("unknown_flag");
    let output = Command::new(exe)
        .arg("--frobnicate")
        .current_dir(&dir)
        .output()
        .expect("run qm_mcp --frobnicate");
    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("unknown argument: --frobnicate"), "{stderr}");
    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn bad_config_file_fails_startup_with_a_crash_record() {
    let exe = env!("CARGO_BIN_EXE_qm_mcp");
    let dir = temp_dir("bad_config");
    let config = dir.join("querymap.yaml");
    std::fs::write(&config, "default_shape: hexagon\n").expect("write config");
    let state = dir.join("state");

    let output = Command::new(exe)
        .arg("--config")
        .arg(&config)
        .arg("--state-dir")
        .arg(&state)
        .output()
        .expect("run qm_mcp --config");
    assert!(!output.status.success());

    let crash = std::fs::read_to_string(state.join("querymap_last_crash.txt"))
        .expect("crash record");
    assert!(crash.contains("kind=error"), "{crash}");
    let session = std::fs::read_to_string(state.join("querymap_last_session.txt"))
        .expect("session record");
    assert!(session.contains("exit=error"), "{session}");
    let _ = std::fs::remove_dir_all(&dir);
}
