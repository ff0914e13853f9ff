// crates/scenario-harness-gen/tests/cli.rs
// ============================================================================
// Module: Generator CLI Tests
// Description: End-to-end coverage of the scenario-harness-gen binary.
// Purpose: Ensure validate, generate, and check fail closed with clear output.
// Dependencies: scenario-harness-gen, tempfile
// ============================================================================

//! ## Overview
//! Runs the compiled binary against description files in a temporary
//! directory. Logging is switched off so stderr carries only reported errors.

#![allow(
    clippy::use_debug,
    clippy::missing_docs_in_private_items,
    reason = "Test-only assertions and helpers are permitted."
)]

use std::fs;
use std::path::Path;
use std::process::Command;
use std::process::Output;

use scenario_harness_gen::HarnessGenerator;

// ============================================================================
// SECTION: Fixtures
// ============================================================================

const VALID_DESCRIPTION: &str = r#"
package = "greeterpb"
service = "Greeter"

[[methods]]
name = "SayHello"
request_type = "HelloRequest"
response_type = "HelloReply"
"#;

const BROKEN_DESCRIPTION: &str = r#"
package = ""
service = ""

[[methods]]
name = ""
request_type = ""
response_type = "HelloReply"
"#;

fn run_cli(cwd: &Path, args: &[&str]) -> Result<Output, std::io::Error> {
    Command::new(env!("CARGO_BIN_EXE_scenario-harness-gen"))
        .args(args)
        .current_dir(cwd)
        .env("RUST_LOG", "off")
        .output()
}

fn with_command<'a>(command: &'a str, args: &[&'a str]) -> Vec<&'a str> {
    let mut full = vec![command];
    full.extend_from_slice(args);
    full
}

fn stderr_lines(output: &Output) -> Vec<String> {
    String::from_utf8_lossy(&output.stderr).lines().map(str::to_string).collect()
}

// ============================================================================
// SECTION: Validate
// ============================================================================

#[test]
fn validate_reports_every_violation() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;
    fs::write(dir.path().join("broken.toml"), BROKEN_DESCRIPTION)?;

    let output = run_cli(dir.path(), &["validate", "--description", "broken.toml"])?;

    assert!(!output.status.success(), "validate must fail on a broken description");
    assert!(output.stdout.is_empty());
    assert_eq!(
        stderr_lines(&output),
        [
            "package identifier is empty",
            "service name is empty",
            "method #0 has an empty name",
            "method #0 () has an empty request type",
            "4 validation problem(s) in broken.toml",
        ]
    );
    Ok(())
}

#[test]
fn validate_accepts_a_valid_description() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;
    fs::write(dir.path().join("greeter.toml"), VALID_DESCRIPTION)?;

    let output = run_cli(dir.path(), &["validate", "--description", "greeter.toml"])?;

    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    assert!(output.stdout.is_empty());
    assert!(output.stderr.is_empty());
    Ok(())
}

// ============================================================================
// SECTION: Generate and Check
// ============================================================================

#[test]
fn generate_prints_harness_to_stdout() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;
    let description_path = dir.path().join("greeter.toml");
    fs::write(&description_path, VALID_DESCRIPTION)?;

    let output = run_cli(dir.path(), &["generate", "--description", "greeter.toml"])?;

    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    let expected = HarnessGenerator::load(&description_path, None)?.generate()?;
    assert_eq!(String::from_utf8(output.stdout)?, expected);
    Ok(())
}

#[test]
fn check_fails_once_the_harness_drifts() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;
    fs::write(dir.path().join("greeter.toml"), VALID_DESCRIPTION)?;
    let args = ["--description", "greeter.toml", "--out", "gen/greeter_harness_test.go"];

    let generate = run_cli(dir.path(), &with_command("generate", &args))?;
    assert!(generate.status.success(), "stderr: {}", String::from_utf8_lossy(&generate.stderr));
    let check = run_cli(dir.path(), &with_command("check", &args))?;
    assert!(check.status.success(), "stderr: {}", String::from_utf8_lossy(&check.stderr));

    let out_path = dir.path().join("gen").join("greeter_harness_test.go");
    let stale = fs::read_to_string(&out_path)?.replace("SayHello", "SayGoodbye");
    fs::write(&out_path, stale)?;
    let drift = run_cli(dir.path(), &with_command("check", &args))?;

    assert!(!drift.status.success(), "check must fail on a stale harness");
    let lines = stderr_lines(&drift);
    assert!(
        matches!(lines.as_slice(), [line] if line.starts_with("harness drift detected for")),
        "unexpected stderr: {lines:?}"
    );
    Ok(())
}

#[test]
fn unrenderable_description_fails_generate() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;
    fs::write(
        dir.path().join("reserved.toml"),
        VALID_DESCRIPTION.replace("HelloReply", "status"),
    )?;

    let output = run_cli(dir.path(), &["generate", "--description", "reserved.toml"])?;

    assert!(!output.status.success());
    assert!(output.stdout.is_empty(), "no partial harness may be printed");
    assert_eq!(
        stderr_lines(&output),
        ["response type `status` collides with a name declared by the harness"]
    );
    Ok(())
}
