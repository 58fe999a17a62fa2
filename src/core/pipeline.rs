//! File-to-file encrypt/decrypt pipeline.
//!
//! One run owns one read handle, one write handle and one cipher context.
//! All three are dropped on every exit path. Output goes to a hidden sibling
//! of the destination, which only replaces the destination once the whole
//! stream is written and synced. A failed run leaves the destination as it
//! was.

use std::fmt;
use std::fs::{self, File};
use std::io::Read;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::core::cipher::{transform_stream, CbcTransform, Direction};
use crate::core::kdf::CipherKeys;
use crate::core::paths::{ResolvedPaths, SecretFile};
use crate::error::{Error, Result, StreamError};

/// A completed transformation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transformed {
    pub direction: Direction,
    /// Logical name of the file read.
    pub from: String,
    /// Logical name of the file written.
    pub to: String,
    /// Bytes written to the destination.
    pub bytes: u64,
}

impl fmt::Display for Transformed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Successfully {} '{}' to '{}'",
            self.direction.past_tense(),
            self.from,
            self.to
        )
    }
}

/// Fail with `Error::NotFound` unless the file `direction` reads exists.
pub fn require_source(direction: Direction, paths: &ResolvedPaths, stage: &str) -> Result<()> {
    let (from, _) = paths.route(direction);
    if from.exists() {
        return Ok(());
    }

    debug!(path = %from.path().display(), "source file missing");
    Err(Error::NotFound {
        stage: stage.to_string(),
        file: from.name().to_string(),
    })
}

/// Derive keys from `password` and stream the source file of `direction`
/// into its destination.
///
/// # Errors
///
/// - `Error::NotFound` if the source file is missing; nothing is opened.
/// - `Error::Stream` carrying the first read, cipher or write failure.
pub fn run(
    direction: Direction,
    paths: &ResolvedPaths,
    stage: &str,
    password: &str,
) -> Result<Transformed> {
    require_source(direction, paths, stage)?;
    let (from, to) = paths.route(direction);

    let keys = CipherKeys::derive(password);
    info!(%direction, from = from.name(), to = to.name(), "starting");

    let fail = |source: StreamError| stream_error(direction, from, to, source);

    let reader = File::open(from.path()).map_err(|e| fail(StreamError::Read(e)))?;
    let staging = staging_path(to);

    let bytes = write_staged(reader, &staging, CbcTransform::new(direction, &keys))
        .and_then(|bytes| {
            fs::rename(&staging, to.path())
                .map(|_| bytes)
                .map_err(StreamError::Write)
        })
        .map_err(|e| {
            if staging.exists() {
                debug!(path = %staging.display(), "discarding partial output");
                let _ = fs::remove_file(&staging);
            }
            fail(e)
        })?;

    info!(%direction, bytes, "done");

    Ok(Transformed {
        direction,
        from: from.name().to_string(),
        to: to.name().to_string(),
        bytes,
    })
}

/// `.<file>.partial` next to `to`, so the final rename never crosses a
/// filesystem.
fn staging_path(to: &SecretFile) -> PathBuf {
    to.dir().join(format!(".{}.partial", to.file_name()))
}

fn write_staged<R: Read>(
    reader: R,
    staging: &Path,
    transform: CbcTransform,
) -> std::result::Result<u64, StreamError> {
    let mut writer = File::create(staging).map_err(StreamError::Write)?;
    let bytes = transform_stream(reader, &mut writer, transform)?;
    writer.sync_all().map_err(StreamError::Write)?;
    Ok(bytes)
}

fn stream_error(
    direction: Direction,
    from: &SecretFile,
    to: &SecretFile,
    source: StreamError,
) -> Error {
    Error::Stream {
        direction,
        from: from.name().to_string(),
        to: to.name().to_string(),
        source,
    }
}
