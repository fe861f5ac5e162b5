use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// The filesystem operation that was being attempted when an error
/// occurred. Carried inside [`FsOpError`] so callers (and log output)
/// can name the failing step, not just the failing path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FsOp {
    CreateDirectory,
    WriteFile,
    ChangePermissions,
    Remove,
    Inspect,
}

impl std::fmt::Display for FsOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            FsOp::CreateDirectory => "create-directory",
            FsOp::WriteFile => "write-file",
            FsOp::ChangePermissions => "change-permissions",
            FsOp::Remove => "remove",
            FsOp::Inspect => "inspect",
        };
        f.write_str(s)
    }
}

/// Errors produced by the fixture filesystem primitives.
///
/// Every failure carries the offending path and the operation that was
/// attempted, wrapping the underlying `std::io::Error`.
#[derive(Debug, Error)]
#[error("{op} failed for `{}`: {source}", .path.display())]
pub struct FsOpError {
    pub op: FsOp,
    pub path: PathBuf,
    #[source]
    pub source: io::Error,
}

impl FsOpError {
    pub fn new(op: FsOp, path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self {
            op,
            path: path.into(),
            source,
        }
    }
}
