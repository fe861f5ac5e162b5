use std::path::Path;

/// What currently occupies a filesystem path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathKind {
    /// Nothing exists at the path.
    Missing,
    /// An existing directory.
    Directory,
    /// An existing regular file.
    File,
    /// Something else (socket, FIFO, device, dangling symlink, ...).
    Other,
}

impl PathKind {
    /// Classify `path` with a single set of metadata lookups so the
    /// provisioning code can branch without repeating `exists`/`is_dir`
    /// checks.
    pub fn of<P: AsRef<Path>>(path: P) -> Self {
        let p = path.as_ref();
        if !p.exists() {
            PathKind::Missing
        } else if p.is_dir() {
            PathKind::Directory
        } else if p.is_file() {
            PathKind::File
        } else {
            PathKind::Other
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn classifies_missing_file_and_dir() {
        let td = tempdir().expect("tempdir");
        assert_eq!(PathKind::of(td.path().join("absent")), PathKind::Missing);

        let file = td.path().join("f.txt");
        fs::write(&file, b"x").expect("write file");
        assert_eq!(PathKind::of(&file), PathKind::File);

        let dir = td.path().join("sub");
        fs::create_dir(&dir).expect("create dir");
        assert_eq!(PathKind::of(&dir), PathKind::Directory);
    }
}
