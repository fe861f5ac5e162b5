use std::fs;
use std::io;
use std::path::Path;

use tracing::debug;

use crate::fs_op::error::{FsOp, FsOpError};
use crate::fs_op::stat::PathKind;

/// Remove a file or directory at `path`.
///
/// Directories are removed recursively. An absent path is treated as
/// success so callers can tear fixtures down without checking for
/// existence first. The filesystem root is refused outright.
pub fn remove_path(path: impl AsRef<Path>) -> Result<(), FsOpError> {
    let p = path.as_ref();
    refuse_root(p)?;

    match PathKind::of(p) {
        PathKind::Missing => Ok(()),
        PathKind::Directory => {
            fs::remove_dir_all(p).map_err(|e| FsOpError::new(FsOp::Remove, p, e))?;
            debug!(path = %p.display(), "directory removed");
            Ok(())
        }
        PathKind::File | PathKind::Other => {
            fs::remove_file(p).map_err(|e| FsOpError::new(FsOp::Remove, p, e))?;
            debug!(path = %p.display(), "file removed");
            Ok(())
        }
    }
}

/// Remove `path` only when it is an empty directory.
///
/// Returns `Ok(true)` when the path is gone afterwards (removed now,
/// or already absent) and `Ok(false)` when the directory was left in
/// place because it still has entries.
pub fn remove_dir_if_empty(path: impl AsRef<Path>) -> Result<bool, FsOpError> {
    let p = path.as_ref();
    refuse_root(p)?;

    if PathKind::of(p) == PathKind::Missing {
        return Ok(true);
    }
    let mut entries = fs::read_dir(p).map_err(|e| FsOpError::new(FsOp::Remove, p, e))?;
    if entries.next().is_some() {
        return Ok(false);
    }
    fs::remove_dir(p).map_err(|e| FsOpError::new(FsOp::Remove, p, e))?;
    debug!(path = %p.display(), "empty directory removed");
    Ok(true)
}

fn refuse_root(p: &Path) -> Result<(), FsOpError> {
    if p.parent().is_none() {
        return Err(FsOpError::new(
            FsOp::Remove,
            p,
            io::Error::new(
                io::ErrorKind::PermissionDenied,
                "refusing to remove a filesystem root",
            ),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn removes_file_and_dir() {
        let td = tempdir().expect("tempdir");
        let dir = td.path().join("sub");
        fs::create_dir(&dir).expect("create dir");
        let f = dir.join("f.txt");
        fs::write(&f, b"x").expect("write file");

        remove_path(&f).expect("remove file");
        assert!(!f.exists());

        remove_path(&dir).expect("remove dir");
        assert!(!dir.exists());
    }

    #[test]
    fn absent_path_is_a_no_op() {
        let td = tempdir().expect("tempdir");
        assert!(remove_path(td.path().join("does_not_exist")).is_ok());
    }

    #[test]
    fn refuses_filesystem_root() {
        let err = remove_path("/").expect_err("root must be refused");
        assert_eq!(err.op, FsOp::Remove);
    }

    #[test]
    fn empty_dir_removal_leaves_populated_dirs_alone() {
        let td = tempdir().expect("tempdir");
        let empty = td.path().join("testEmptyFolder");
        fs::create_dir(&empty).expect("create empty");
        assert!(remove_dir_if_empty(&empty).expect("remove empty"));
        assert!(!empty.exists());

        let full = td.path().join("testFolder");
        fs::create_dir(&full).expect("create full");
        fs::write(full.join("file0.txt"), b"test file").expect("write file");
        assert!(!remove_dir_if_empty(&full).expect("skip non-empty"));
        assert!(full.exists());
    }
}
