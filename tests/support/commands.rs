//! Command helper methods for Test.

use super::Test;
use assert_cmd::Command;
use std::process::Output;

impl Test {
    /// Create a stagecrypt command running inside the project directory.
    ///
    /// Inherited password and log settings are cleared so the host
    /// environment cannot leak into tests.
    pub fn cmd(&self) -> Command {
        #[allow(deprecated)]
        let mut cmd = Command::cargo_bin("stagecrypt").expect("failed to find stagecrypt binary");
        cmd.env_remove("STAGECRYPT_PASSWORD");
        cmd.env_remove("STAGECRYPT_LOG");
        cmd.env("NO_COLOR", "1");
        cmd.current_dir(self.dir.path());
        cmd
    }

    /// Shortcut for `stagecrypt encrypt --stage <stage> --password <password>`.
    pub fn encrypt(&self, stage: &str, password: &str) -> Output {
        self.cmd()
            .args(["encrypt", "--stage", stage, "--password", password])
            .output()
            .expect("failed to run stagecrypt encrypt")
    }

    /// Shortcut for `stagecrypt decrypt --stage <stage> --password <password>`.
    pub fn decrypt(&self, stage: &str, password: &str) -> Output {
        self.cmd()
            .args(["decrypt", "--stage", stage, "--password", password])
            .output()
            .expect("failed to run stagecrypt decrypt")
    }

    /// Encrypt with the password piped on stdin.
    pub fn encrypt_stdin(&self, stage: &str, stdin: &str) -> Output {
        self.cmd()
            .args(["encrypt", "--stage", stage])
            .write_stdin(stdin)
            .output()
            .expect("failed to run stagecrypt encrypt")
    }

    /// Decrypt with the password piped on stdin.
    pub fn decrypt_stdin(&self, stage: &str, stdin: &str) -> Output {
        self.cmd()
            .args(["decrypt", "--stage", stage])
            .write_stdin(stdin)
            .output()
            .expect("failed to run stagecrypt decrypt")
    }

    /// Shortcut for `stagecrypt check --stage <stage>`.
    pub fn check(&self, stage: &str) -> Output {
        self.cmd()
            .args(["check", "--stage", stage])
            .output()
            .expect("failed to run stagecrypt check")
    }
}
