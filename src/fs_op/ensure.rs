use std::fs;
use std::io;
use std::path::Path;

use tracing::debug;

use crate::fs_op::error::{FsOp, FsOpError};
use crate::fs_op::stat::PathKind;

/// Ensure a directory exists at `path`, creating missing parents.
///
/// Calling this again for an existing directory is a silent no-op, so a
/// fixture spec can be applied repeatedly. A path that is already
/// occupied by anything other than a directory is an error rather than
/// being replaced.
pub fn ensure_dir(path: impl AsRef<Path>) -> Result<(), FsOpError> {
    let p = path.as_ref();
    match PathKind::of(p) {
        PathKind::Directory => {
            debug!(path = %p.display(), "directory already present");
            Ok(())
        }
        PathKind::Missing => {
            fs::create_dir_all(p).map_err(|e| FsOpError::new(FsOp::CreateDirectory, p, e))?;
            debug!(path = %p.display(), "directory created");
            Ok(())
        }
        PathKind::File | PathKind::Other => Err(FsOpError::new(
            FsOp::CreateDirectory,
            p,
            io::Error::new(
                io::ErrorKind::AlreadyExists,
                "path exists and is not a directory",
            ),
        )),
    }
}
