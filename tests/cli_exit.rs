#![cfg(unix)]

use std::process::Command;

/// Run the binary with a throwaway home so config and logs stay out of
/// the real user dirs.
fn spotideck(home: &std::path::Path) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_spotideck"));
    cmd.env("HOME", home)
        .env("XDG_CONFIG_HOME", home.join(".config"))
        .env("XDG_CACHE_HOME", home.join(".cache"))
        .env_remove("CLIENT_ID")
        .env_remove("CLIENT_SECRET")
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_missing_credentials_fail_with_one_report() {
    let home = tempfile::tempdir().unwrap();

    let out = spotideck(home.path()).output().unwrap();

    assert!(!out.status.success());
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert_eq!(stderr.matches("CLIENT_ID").count(), 1, "stderr was:\n{stderr}");
}

#[test]
fn test_generate_config_prints_defaults() {
    let home = tempfile::tempdir().unwrap();

    let out = spotideck(home.path()).arg("--generate-config").output().unwrap();

    assert!(out.status.success());
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("baud_rate = 115200"), "stdout was:\n{stdout}");
}
