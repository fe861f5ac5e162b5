use std::fs;
use std::path::Path;

use tracing::debug;

use crate::fs_op::error::{FsOp, FsOpError};

/// Write `contents` to the file at `path`, creating it if absent and
/// truncating it otherwise. Every call resets the file to exactly the
/// given bytes.
///
/// Parent directories are NOT created here: the directory a fixture
/// file lives in must be provisioned by its own entry (or already
/// exist), so a missing parent surfaces as an error instead of being
/// papered over.
pub fn write_file(path: impl AsRef<Path>, contents: &[u8]) -> Result<(), FsOpError> {
    let p = path.as_ref();
    fs::write(p, contents).map_err(|e| FsOpError::new(FsOp::WriteFile, p, e))?;
    debug!(path = %p.display(), bytes = contents.len(), "file written");
    Ok(())
}
