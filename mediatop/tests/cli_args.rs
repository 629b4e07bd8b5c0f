//! CLI arg smoke tests for the mediatop binary.

use assert_cmd::Command;

#[test]
fn help_mentions_transport_flags() {
    let output = Command::cargo_bin("mediatop")
        .unwrap()
        .arg("--help")
        .output()
        .expect("run mediatop --help");
    assert!(output.status.success());
    let text = format!(
        "{}{}",
        String::from_utf8_lossy(&output.stdout),
        String::from_utf8_lossy(&output.stderr)
    );
    assert!(
        text.contains("--host") && text.contains("--serial") && text.contains("--profile"),
        "help text missing expected flags\n{text}"
    );
}

#[test]
fn unknown_argument_points_at_help() {
    let output = Command::cargo_bin("mediatop")
        .unwrap()
        .arg("--bogus")
        .output()
        .expect("run mediatop --bogus");
    let text = String::from_utf8_lossy(&output.stderr);
    assert!(text.contains("unknown argument"), "{text}");
}

#[test]
fn no_target_explains_what_to_pass() {
    let output = Command::cargo_bin("mediatop")
        .unwrap()
        .env("XDG_CONFIG_HOME", std::env::temp_dir().join("mediatop-none"))
        .output()
        .expect("run mediatop");
    let text = String::from_utf8_lossy(&output.stderr);
    assert!(text.contains("--host or --serial"), "{text}");
}
