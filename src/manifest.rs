//! Declarative description of the fixtures a test run expects on disk.
//!
//! A manifest is a TOML document holding an ordered list of `[[entry]]`
//! tables. Order is meaningful: a directory used by a later file entry
//! has to appear before it, because provisioning never derives
//! directories from file paths.
//!
//! ```toml
//! [[entry]]
//! kind = "dir"
//! path = "testFolder"
//!
//! [[entry]]
//! kind = "file"
//! path = "testFolder/file0.txt"
//! contents = "test file"
//!
//! [[entry]]
//! kind = "restricted-file"
//! path = "restrictedFile.txt"
//! contents = "This is a test file with no access permissions."
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

/// One desired filesystem object.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum FixtureEntry {
    /// A directory that must exist after provisioning.
    Dir { path: PathBuf },
    /// A regular file holding exactly `contents`; prior contents are
    /// replaced on every run.
    File { path: PathBuf, contents: String },
    /// A file whose permission bits are stripped once its contents are
    /// written, for exercising permission-denied handling elsewhere.
    RestrictedFile { path: PathBuf, contents: String },
}

impl FixtureEntry {
    /// The entry's path, relative to the base directory.
    pub fn path(&self) -> &Path {
        match self {
            FixtureEntry::Dir { path }
            | FixtureEntry::File { path, .. }
            | FixtureEntry::RestrictedFile { path, .. } => path,
        }
    }
}

/// Ordered list of fixture entries, applied top to bottom.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FixtureSpec {
    #[serde(rename = "entry", default)]
    pub entries: Vec<FixtureEntry>,
}

/// Errors raised while loading a manifest file.
#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("failed to read manifest `{}`: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse manifest `{}`: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("manifest `{}` has no parent directory", .0.display())]
    NoParent(PathBuf),
}

/// A fixture spec loaded from disk together with the base directory its
/// paths resolve against.
///
/// The base directory is the directory containing the manifest file, so
/// provisioning does not depend on the working directory of whichever
/// process invokes it.
#[derive(Debug, Clone)]
pub struct Manifest {
    pub base_dir: PathBuf,
    pub spec: FixtureSpec,
}

impl Manifest {
    /// Read and parse the manifest at `path`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ManifestError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|e| ManifestError::Read {
            path: path.to_path_buf(),
            source: e,
        })?;
        let spec: FixtureSpec = toml::from_str(&text).map_err(|e| ManifestError::Parse {
            path: path.to_path_buf(),
            source: e,
        })?;

        // Canonicalize so a bare "fixtures.toml" argument still anchors
        // to the manifest's own directory, not the process cwd.
        let abs = path.canonicalize().map_err(|e| ManifestError::Read {
            path: path.to_path_buf(),
            source: e,
        })?;
        let base_dir = abs
            .parent()
            .ok_or_else(|| ManifestError::NoParent(abs.clone()))?
            .to_path_buf();

        Ok(Self { base_dir, spec })
    }
}
