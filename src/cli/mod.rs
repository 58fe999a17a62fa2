//! Command-line interface.

pub mod check;
pub mod completions;
pub mod decrypt;
pub mod encrypt;
pub mod output;

use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};

use crate::core::secrets::Request;
use crate::error::Result;

/// Stagecrypt - password-based encryption for per-stage secrets files.
#[derive(Parser)]
#[command(
    name = "stagecrypt",
    about = "Encrypt per-stage secrets files so they are safe to commit",
    version,
    after_help = "Password is read from --password, STAGECRYPT_PASSWORD, stdin, or a masked prompt."
)]
pub struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Project directory holding the secrets files
    #[arg(short = 'C', long = "dir", global = true, default_value = ".")]
    pub dir: PathBuf,

    #[command(subcommand)]
    pub command: Command,
}

/// Stage selection shared by every file command.
#[derive(Args, Debug, Clone)]
pub struct StageArgs {
    /// Stage of the secrets file (e.g. dev, prod)
    #[arg(short, long)]
    pub stage: Option<String>,
}

/// Password input shared by encrypt and decrypt.
#[derive(Args, Clone)]
pub struct PasswordArgs {
    /// Password to derive the key from (prompted for when omitted)
    #[arg(short, long, env = "STAGECRYPT_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,
}

/// Top-level commands.
#[derive(Subcommand)]
pub enum Command {
    /// Encrypt a secrets file for a specific stage
    Encrypt {
        #[command(flatten)]
        stage: StageArgs,
        #[command(flatten)]
        password: PasswordArgs,
    },

    /// Decrypt a secrets file for a specific stage
    Decrypt {
        #[command(flatten)]
        stage: StageArgs,
        #[command(flatten)]
        password: PasswordArgs,
    },

    /// Verify the plaintext secrets file for a stage exists
    Check {
        #[command(flatten)]
        stage: StageArgs,
    },

    /// Print a shell completion script to stdout
    Completions {
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

/// Execute a command against the project in `dir`.
pub fn execute(command: Command, dir: &Path) -> Result<()> {
    use Command::*;

    match command {
        Encrypt { stage, password } => encrypt::execute(request(dir, stage, password.password)?),
        Decrypt { stage, password } => decrypt::execute(request(dir, stage, password.password)?),
        Check { stage } => check::execute(request(dir, stage, None)?),
        Completions { shell } => completions::execute(shell),
    }
}

fn request(dir: &Path, stage: StageArgs, password: Option<String>) -> Result<Request> {
    Ok(Request::load(dir)?
        .with_stage(stage.stage)
        .with_password(password))
}
