use std::process::Command;

#[test]
fn help_lists_every_subcommand() {
    let output = Command::new(env!("CARGO_BIN_EXE_typw"))
        .arg("--help")
        .output()
        .expect("run typw");

    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let stdout = String::from_utf8_lossy(&output.stdout);
    for subcommand in ["search", "apply", "serve"] {
        assert!(stdout.contains(subcommand), "missing {subcommand}:\n{stdout}");
    }
}

#[test]
fn blank_apply_fails_before_touching_the_network() {
    let output = Command::new(env!("CARGO_BIN_EXE_typw"))
        .args(["apply", "   "])
        .output()
        .expect("run typw");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("must not be blank"), "stderr: {stderr}");
}

#[test]
fn conflicting_output_flags_are_a_usage_error() {
    let output = Command::new(env!("CARGO_BIN_EXE_typw"))
        .args(["search", "--json", "--ndjson", "mono"])
        .output()
        .expect("run typw");

    assert_eq!(output.status.code(), Some(2));
}
