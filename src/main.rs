//! Stagecrypt - password-based encryption for per-stage secrets files.

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use stagecrypt::cli::output;
use stagecrypt::cli::{execute, Cli};
use stagecrypt::core::constants;
use stagecrypt::error::{Error, InputError, StreamError};

fn main() {
    let cli = Cli::parse();

    // Initialize tracing subscriber with env-filter support
    let filter = EnvFilter::try_from_env(constants::LOG_ENV).unwrap_or_else(|_| {
        if cli.verbose {
            EnvFilter::new("stagecrypt=debug")
        } else {
            EnvFilter::new("stagecrypt=warn")
        }
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .without_time(),
        )
        .init();

    if let Err(e) = execute(cli.command, &cli.dir) {
        let suggestion = match &e {
            Error::NotFound { .. } => {
                Some("check --dir, the stage, and source/entry in .stagecrypt.toml")
            }
            Error::Input(InputError::Unavailable) => {
                Some("pass --password or set STAGECRYPT_PASSWORD")
            }
            Error::Stream {
                source: StreamError::Cipher(_),
                ..
            } => Some("was the artifact encrypted with a different password?"),
            _ => None,
        };

        output::error(&e.to_string());
        if let Some(hint) = suggestion {
            output::hint(hint);
        }
        std::process::exit(1);
    }
}
