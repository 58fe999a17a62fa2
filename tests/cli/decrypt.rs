//! Tests for the decrypt command.

use crate::support::*;

#[test]
fn test_roundtrip_default_names() {
    let t = Test::with_secrets("dev", SAMPLE_SECRETS);
    assert_roundtrip(&t, "dev", PASSWORD);
}

#[test]
fn test_decrypt_message() {
    let t = Test::with_secrets("prod", SAMPLE_SECRETS);
    assert_success(&t.encrypt("prod", PASSWORD));

    let output = t.decrypt("prod", PASSWORD);
    assert_success(&output);
    assert_stdout_contains(
        &output,
        "Successfully decrypted 'secrets.prod.encrypted' to 'secrets.prod.yml'",
    );
}

#[test]
fn test_decrypt_wrong_password_fails() {
    let t = Test::with_secrets("dev", SHORT_SECRETS);
    assert_success(&t.encrypt("dev", PASSWORD));
    t.remove("secrets.dev.yml");

    let output = t.decrypt("dev", WRONG_PASSWORD);
    assert_failure(&output);
    assert_stderr_contains(&output, "bad padding");
    assert_stderr_contains(&output, "decrypting 'secrets.dev.encrypted'");
}

#[test]
fn test_decrypt_wrong_password_keeps_local_plaintext() {
    let t = Test::with_secrets("dev", SHORT_SECRETS);
    assert_success(&t.encrypt("dev", PASSWORD));
    t.write("secrets.dev.yml", "db_password: edited locally\n");

    assert_failure(&t.decrypt("dev", WRONG_PASSWORD));
    assert_eq!(
        t.read_string("secrets.dev.yml"),
        "db_password: edited locally\n"
    );
    assert!(!t.exists(".secrets.dev.yml.partial"));
}

#[test]
fn test_decrypt_errors_never_echo_password() {
    let t = Test::with_secrets("dev", SHORT_SECRETS);
    assert_success(&t.encrypt("dev", PASSWORD));

    let output = t.decrypt("dev", WRONG_PASSWORD);
    assert_failure(&output);
    assert!(!stderr(&output).contains(WRONG_PASSWORD));
    assert!(!stdout(&output).contains(WRONG_PASSWORD));
}

#[test]
fn test_decrypt_missing_artifact() {
    let t = Test::new();

    let output = t.decrypt("dev", PASSWORD);
    assert_failure(&output);
    assert_stderr_contains(
        &output,
        "Couldn't find the secrets file for this stage: secrets.dev.encrypted",
    );
    assert!(!t.exists("secrets.dev.yml"), "no stream may be opened");
}

#[test]
fn test_decrypt_missing_artifact_does_not_prompt() {
    let t = Test::new();

    // An empty stdin would otherwise fail with a password error.
    let output = t.decrypt_stdin("dev", "");
    assert_failure(&output);
    assert_stderr_contains(&output, "Couldn't find the secrets file");
}

#[test]
fn test_decrypt_truncated_artifact() {
    let t = Test::with_secrets("dev", SAMPLE_SECRETS);
    assert_success(&t.encrypt("dev", PASSWORD));

    let mut artifact = t.read("secrets.dev.encrypted");
    artifact.truncate(artifact.len() - 5);
    t.write("secrets.dev.encrypted", &artifact);

    let output = t.decrypt("dev", PASSWORD);
    assert_failure(&output);
    assert_stderr_contains(&output, "multiple of the block size");
}

#[test]
fn test_decrypt_overwrites_existing_plaintext() {
    let t = Test::with_secrets("dev", SHORT_SECRETS);
    assert_success(&t.encrypt("dev", PASSWORD));
    t.write("secrets.dev.yml", "stale: true\nlonger than the original file\n");

    assert_success(&t.decrypt("dev", PASSWORD));
    assert_eq!(t.read_string("secrets.dev.yml"), SHORT_SECRETS);
}

#[test]
fn test_decrypt_password_from_stdin() {
    let t = Test::with_secrets("dev", SAMPLE_SECRETS);
    assert_success(&t.encrypt("dev", PASSWORD));
    t.remove("secrets.dev.yml");

    let output = t.decrypt_stdin("dev", &format!("{}\r\n", PASSWORD));
    assert_success(&output);
    assert_eq!(t.read_string("secrets.dev.yml"), SAMPLE_SECRETS);
}
