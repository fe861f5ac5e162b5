//! Applies a [`FixtureSpec`] to a base directory, and the matching
//! teardown and drift-check passes.

use std::fmt;
use std::path::{Component, Path, PathBuf};

use tracing::{debug, info, warn};
use walkdir::WalkDir;

use crate::fs_op::{self, FsOp, FsOpError, PathKind};
use crate::manifest::{FixtureEntry, FixtureSpec};

/// Errors raised while applying a fixture spec.
#[derive(Debug, thiserror::Error)]
pub enum ProvisionError {
    #[error(transparent)]
    Fs(#[from] FsOpError),

    #[error("fixture path `{}` must be relative to the base directory", .0.display())]
    AbsolutePath(PathBuf),

    #[error("fixture path `{}` would escape the base directory", .0.display())]
    EscapesBase(PathBuf),
}

/// Join an entry path onto the base directory, rejecting shapes that
/// would land outside it. Checked up front so a bad manifest fails
/// before any filesystem work happens.
fn resolve(base_dir: &Path, rel: &Path) -> Result<PathBuf, ProvisionError> {
    if rel.is_absolute() {
        return Err(ProvisionError::AbsolutePath(rel.to_path_buf()));
    }
    for comp in rel.components() {
        match comp {
            Component::ParentDir | Component::Prefix(_) | Component::RootDir => {
                return Err(ProvisionError::EscapesBase(rel.to_path_buf()));
            }
            Component::Normal(_) | Component::CurDir => {}
        }
    }
    Ok(base_dir.join(rel))
}

/// Apply every entry of `spec` under `base_dir`, in order.
///
/// The first failure aborts the run; entries already provisioned stay
/// on disk. Callers should treat any error as a fatal setup failure
/// for the dependent test run.
pub fn provision(base_dir: &Path, spec: &FixtureSpec) -> Result<(), ProvisionError> {
    for entry in &spec.entries {
        let target = resolve(base_dir, entry.path())?;
        match entry {
            FixtureEntry::Dir { .. } => fs_op::ensure_dir(&target)?,
            FixtureEntry::File { contents, .. } => {
                fs_op::write_file(&target, contents.as_bytes())?
            }
            FixtureEntry::RestrictedFile { contents, .. } => {
                fs_op::restrict_file(&target, contents.as_bytes())?
            }
        }
    }
    info!(
        entries = spec.entries.len(),
        base = %base_dir.display(),
        "fixtures provisioned"
    );
    Ok(())
}

/// Remove the fixtures named by `spec`, in reverse order so files go
/// before the directories that hold them.
///
/// Directories that still contain entries the spec does not know about
/// are left in place (with a warning) unless `force` is set, in which
/// case they are removed recursively.
pub fn clean(base_dir: &Path, spec: &FixtureSpec, force: bool) -> Result<(), ProvisionError> {
    for entry in spec.entries.iter().rev() {
        let target = resolve(base_dir, entry.path())?;
        match entry {
            FixtureEntry::Dir { .. } if force => fs_op::remove_path(&target)?,
            FixtureEntry::Dir { .. } => {
                if !fs_op::remove_dir_if_empty(&target)? {
                    warn!(path = %target.display(), "directory not empty, left in place");
                }
            }
            FixtureEntry::File { .. } | FixtureEntry::RestrictedFile { .. } => {
                fs_op::remove_path(&target)?
            }
        }
    }
    info!(base = %base_dir.display(), "fixtures cleaned");
    Ok(())
}

/// One way the on-disk tree can disagree with the spec.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mismatch {
    /// The entry does not exist at all.
    Missing(PathBuf),
    /// Something exists but it is not the kind the spec asks for.
    WrongKind(PathBuf),
    /// A file exists with different contents.
    WrongContents(PathBuf),
    /// A restricted file still carries permission bits.
    NotRestricted(PathBuf),
    /// A path inside a spec-declared directory that no entry accounts for.
    Stray(PathBuf),
}

impl fmt::Display for Mismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mismatch::Missing(p) => write!(f, "missing: {}", p.display()),
            Mismatch::WrongKind(p) => write!(f, "wrong kind: {}", p.display()),
            Mismatch::WrongContents(p) => write!(f, "wrong contents: {}", p.display()),
            Mismatch::NotRestricted(p) => write!(f, "not restricted: {}", p.display()),
            Mismatch::Stray(p) => write!(f, "stray entry: {}", p.display()),
        }
    }
}

/// Result of a [`verify`] pass. An empty mismatch list means the tree
/// matches the spec.
#[derive(Debug, Default)]
pub struct VerifyReport {
    pub mismatches: Vec<Mismatch>,
}

impl VerifyReport {
    pub fn is_clean(&self) -> bool {
        self.mismatches.is_empty()
    }
}

/// Compare the tree under `base_dir` against `spec` without modifying
/// anything.
///
/// Restricted files are checked by their permission bits only; their
/// body is deliberately not read since that is exactly what they are
/// meant to deny. Spec-declared directories are additionally walked to
/// flag entries no part of the spec accounts for.
pub fn verify(base_dir: &Path, spec: &FixtureSpec) -> Result<VerifyReport, ProvisionError> {
    let mut report = VerifyReport::default();
    let mut expected: Vec<PathBuf> = Vec::with_capacity(spec.entries.len());

    for entry in &spec.entries {
        let target = resolve(base_dir, entry.path())?;
        expected.push(target.clone());
        match entry {
            FixtureEntry::Dir { .. } => match PathKind::of(&target) {
                PathKind::Directory => {}
                PathKind::Missing => report.mismatches.push(Mismatch::Missing(target)),
                _ => report.mismatches.push(Mismatch::WrongKind(target)),
            },
            FixtureEntry::File { contents, .. } => match PathKind::of(&target) {
                PathKind::File => {
                    let found = std::fs::read(&target)
                        .map_err(|e| FsOpError::new(FsOp::Inspect, &target, e))?;
                    if found != contents.as_bytes() {
                        report.mismatches.push(Mismatch::WrongContents(target));
                    }
                }
                PathKind::Missing => report.mismatches.push(Mismatch::Missing(target)),
                _ => report.mismatches.push(Mismatch::WrongKind(target)),
            },
            FixtureEntry::RestrictedFile { .. } => match PathKind::of(&target) {
                PathKind::File => {
                    if !fs_op::is_fully_restricted(&target)? {
                        report.mismatches.push(Mismatch::NotRestricted(target));
                    }
                }
                PathKind::Missing => report.mismatches.push(Mismatch::Missing(target)),
                _ => report.mismatches.push(Mismatch::WrongKind(target)),
            },
        }
    }

    for entry in &spec.entries {
        if let FixtureEntry::Dir { .. } = entry {
            let dir = resolve(base_dir, entry.path())?;
            if PathKind::of(&dir) != PathKind::Directory {
                continue;
            }
            for found in WalkDir::new(&dir).min_depth(1).follow_links(false) {
                let found =
                    found.map_err(|e| walkdir_error(&dir, e))?;
                let p = found.path();
                let accounted = expected
                    .iter()
                    .any(|want| want == p || want.starts_with(p));
                if !accounted {
                    debug!(path = %p.display(), "unaccounted entry found");
                    report.mismatches.push(Mismatch::Stray(p.to_path_buf()));
                }
            }
        }
    }

    Ok(report)
}

fn walkdir_error(dir: &Path, e: walkdir::Error) -> ProvisionError {
    let path = e.path().unwrap_or(dir).to_path_buf();
    let source = e
        .into_io_error()
        .unwrap_or_else(|| std::io::Error::other("walk aborted"));
    ProvisionError::Fs(FsOpError::new(FsOp::Inspect, path, source))
}
