use std::path::Path;

use tracing::debug;

use crate::fs_op::error::{FsOp, FsOpError};
use crate::fs_op::stat::PathKind;
use crate::fs_op::write::write_file;

/// Write `contents` to `path`, then strip every permission bit so any
/// later access without elevated privilege fails with permission
/// denied.
///
/// A file left behind by an earlier run has mode 000 and cannot be
/// reopened for writing, so an existing regular file is first restored
/// to owner read/write. Re-running against the same target therefore
/// succeeds instead of failing on the reopen.
pub fn restrict_file(path: impl AsRef<Path>, contents: &[u8]) -> Result<(), FsOpError> {
    let p = path.as_ref();
    if PathKind::of(p) == PathKind::File {
        perms::set_mode(p, 0o600)?;
    }
    write_file(p, contents)?;
    perms::set_mode(p, 0o000)?;
    debug!(path = %p.display(), "file restricted to mode 000");
    Ok(())
}

/// Return `true` when the file at `path` carries no permission bits at
/// all. Used by the verification pass, which must not try to read the
/// file body.
pub fn is_fully_restricted(path: impl AsRef<Path>) -> Result<bool, FsOpError> {
    let p = path.as_ref();
    let meta = std::fs::metadata(p).map_err(|e| FsOpError::new(FsOp::Inspect, p, e))?;
    Ok(perms::is_no_access(&meta))
}

#[cfg(unix)]
mod perms {
    use std::fs;
    use std::os::unix::fs::PermissionsExt;
    use std::path::Path;

    use crate::fs_op::error::{FsOp, FsOpError};

    pub(super) fn set_mode(p: &Path, mode: u32) -> Result<(), FsOpError> {
        fs::set_permissions(p, fs::Permissions::from_mode(mode))
            .map_err(|e| FsOpError::new(FsOp::ChangePermissions, p, e))
    }

    pub(super) fn is_no_access(meta: &fs::Metadata) -> bool {
        meta.permissions().mode() & 0o777 == 0
    }
}

/// Windows has no owner/group/other bits; the closest restriction is
/// the read-only attribute, applied for mode 000 and cleared otherwise.
#[cfg(not(unix))]
mod perms {
    use std::fs;
    use std::path::Path;

    use crate::fs_op::error::{FsOp, FsOpError};

    pub(super) fn set_mode(p: &Path, mode: u32) -> Result<(), FsOpError> {
        let meta = fs::metadata(p).map_err(|e| FsOpError::new(FsOp::ChangePermissions, p, e))?;
        let mut perms = meta.permissions();
        perms.set_readonly(mode == 0o000);
        fs::set_permissions(p, perms).map_err(|e| FsOpError::new(FsOp::ChangePermissions, p, e))
    }

    pub(super) fn is_no_access(meta: &fs::Metadata) -> bool {
        meta.permissions().readonly()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    #[cfg(unix)]
    fn strips_all_permission_bits() {
        use std::os::unix::fs::PermissionsExt;

        let td = tempdir().expect("tempdir");
        let f = td.path().join("restrictedFile.txt");
        restrict_file(&f, b"This is a test file with no access permissions.")
            .expect("restrict");
        let mode = std::fs::metadata(&f)
            .expect("metadata")
            .permissions()
            .mode();
        assert_eq!(mode & 0o777, 0, "expected mode 000, got {:o}", mode);
        assert!(is_fully_restricted(&f).expect("inspect"));
    }

    #[test]
    #[cfg(unix)]
    fn rerun_on_restricted_target_succeeds() {
        let td = tempdir().expect("tempdir");
        let f = td.path().join("restrictedFile.txt");
        restrict_file(&f, b"first run").expect("first restrict");
        restrict_file(&f, b"second run").expect("second restrict");
        assert!(is_fully_restricted(&f).expect("inspect"));
    }

    #[test]
    fn missing_parent_surfaces_as_write_error() {
        let td = tempdir().expect("tempdir");
        let f = td.path().join("noSuchFolder/restrictedFile.txt");
        let err = restrict_file(&f, b"x").expect_err("parent absent");
        assert_eq!(err.op, FsOp::WriteFile);
    }
}
