//! Secrets file path resolution.
//!
//! Turns a stage plus naming overrides into the absolute locations of the
//! plaintext secrets file and its encrypted artifact:
//!
//! ```text
//! <base_dir>/<prefix>/<dir of source>/<file of source>     plaintext
//! <base_dir>/<prefix>/<dir of entry>/<file of entry>       encrypted
//! ```
//!
//! [`Naming::locate`] is pure. [`resolve`] additionally creates both
//! directories so a fresh environment's secrets folder can be written to.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::core::cipher::Direction;
use crate::core::config::SecretsConfig;
use crate::core::constants;
use crate::error::{ConfigError, PathError, Result};

/// Default plaintext name for a stage: `secrets.<stage>.yml`.
pub fn default_source(stage: &str) -> String {
    format!("secrets.{}{}", stage, constants::PLAINTEXT_EXTENSION)
}

/// Artifact name derived from a plaintext name.
///
/// Everything from the first `.yml` on is replaced by `.encrypted`. A name
/// without `.yml` is kept whole and suffixed, so `secrets.json` becomes
/// `secrets.json.encrypted`.
pub fn entry_for(source: &str) -> String {
    let stem = match source.find(constants::PLAINTEXT_EXTENSION) {
        Some(idx) => &source[..idx],
        None => source,
    };
    format!("{}{}", stem, constants::ENCRYPTED_EXTENSION)
}

/// Naming rules for one stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Naming {
    source: String,
    entry: String,
    prefix: PathBuf,
}

impl Naming {
    /// Build the naming for `stage`, applying optional overrides.
    ///
    /// `{stage}` inside an override is replaced with the stage.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::SameFile` if source and entry are identical.
    pub fn new(
        stage: &str,
        prefix: impl Into<PathBuf>,
        source_override: Option<&str>,
        entry_override: Option<&str>,
    ) -> Result<Self> {
        let source = match source_override {
            Some(pattern) => pattern.replace(constants::STAGE_PLACEHOLDER, stage),
            None => default_source(stage),
        };
        let entry = match entry_override {
            Some(pattern) => pattern.replace(constants::STAGE_PLACEHOLDER, stage),
            None => entry_for(&source),
        };

        if source == entry {
            return Err(ConfigError::SameFile(source).into());
        }

        Ok(Self {
            source,
            entry,
            prefix: prefix.into(),
        })
    }

    /// Build the naming for `stage` from a loaded config.
    pub fn from_config(stage: &str, config: &SecretsConfig) -> Result<Self> {
        Self::new(
            stage,
            config.prefix(),
            config.source.as_deref(),
            config.entry.as_deref(),
        )
    }

    /// Logical plaintext name, relative to the prefix.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Logical artifact name, relative to the prefix.
    pub fn entry(&self) -> &str {
        &self.entry
    }

    /// Compute absolute locations under `base_dir` without touching the
    /// filesystem.
    ///
    /// # Errors
    ///
    /// Returns `PathError::WorkingDir` if `base_dir` is relative and the
    /// working directory is unknown, or `ConfigError::InvalidValue` if a
    /// name does not end in a file name.
    pub fn locate(&self, base_dir: &Path) -> Result<ResolvedPaths> {
        let mut root = absolutize(base_dir)?;
        if !self.prefix.as_os_str().is_empty() {
            root.push(&self.prefix);
        }

        let plaintext = SecretFile::split(&root, &self.source, "source")?;
        let encrypted = SecretFile::split(&root, &self.entry, "entry")?;

        if plaintext.path() == encrypted.path() {
            return Err(ConfigError::SameFile(self.source.clone()).into());
        }

        Ok(ResolvedPaths {
            plaintext,
            encrypted,
        })
    }
}

/// One resolved file: its absolute directory, base file name, and the
/// logical name it was configured as.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SecretFile {
    dir: PathBuf,
    file_name: String,
    name: String,
}

impl SecretFile {
    fn split(root: &Path, name: &str, field: &'static str) -> Result<Self> {
        let relative = Path::new(name);
        let file_name = relative
            .file_name()
            .ok_or_else(|| ConfigError::InvalidValue {
                field,
                reason: format!("'{}' does not name a file", name),
            })?
            .to_string_lossy()
            .into_owned();
        let dir = match relative.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => root.join(parent),
            _ => root.to_path_buf(),
        };

        Ok(Self {
            dir,
            file_name,
            name: name.to_string(),
        })
    }

    /// Absolute containing directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Base file name.
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// Name as configured (e.g. `conf/secrets.prod.yml`), used in messages.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Absolute file path.
    pub fn path(&self) -> PathBuf {
        self.dir.join(&self.file_name)
    }

    pub fn exists(&self) -> bool {
        self.path().is_file()
    }
}

/// Absolute plaintext and artifact locations for one stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedPaths {
    pub plaintext: SecretFile,
    pub encrypted: SecretFile,
}

impl ResolvedPaths {
    /// Source and destination for a direction.
    pub fn route(&self, direction: Direction) -> (&SecretFile, &SecretFile) {
        match direction {
            Direction::Encrypt => (&self.plaintext, &self.encrypted),
            Direction::Decrypt => (&self.encrypted, &self.plaintext),
        }
    }

    /// Create both directories if either is missing.
    ///
    /// # Errors
    ///
    /// Returns `PathError::CreateDir` naming the directory that failed.
    pub fn ensure_dirs(&self) -> Result<()> {
        if self.plaintext.dir.is_dir() && self.encrypted.dir.is_dir() {
            return Ok(());
        }

        for dir in [&self.plaintext.dir, &self.encrypted.dir] {
            debug!(dir = %dir.display(), "creating secrets directory");
            fs::create_dir_all(dir).map_err(|source| PathError::CreateDir {
                path: dir.clone(),
                source,
            })?;
        }

        Ok(())
    }
}

/// Resolve both secrets file paths for `stage` and create their directories.
///
/// # Errors
///
/// See [`Naming::new`], [`Naming::locate`] and [`ResolvedPaths::ensure_dirs`].
pub fn resolve(
    stage: &str,
    base_dir: &Path,
    prefix: &Path,
    source_override: Option<&str>,
    entry_override: Option<&str>,
) -> Result<ResolvedPaths> {
    let naming = Naming::new(stage, prefix, source_override, entry_override)?;
    let paths = naming.locate(base_dir)?;
    paths.ensure_dirs()?;

    debug!(
        plaintext = %paths.plaintext.path().display(),
        encrypted = %paths.encrypted.path().display(),
        "resolved secrets paths"
    );

    Ok(paths)
}

fn absolutize(path: &Path) -> Result<PathBuf> {
    if path.is_absolute() {
        return Ok(path.to_path_buf());
    }
    let cwd = std::env::current_dir().map_err(PathError::WorkingDir)?;
    Ok(cwd.join(path))
}
