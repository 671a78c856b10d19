//! Reading and writing buffer content to disk.
//!
//! Files are plain UTF-8 text with no header. In atomic mode the text is
//! first written to a hidden sibling file and then renamed over the
//! destination, so a crash mid-write leaves either the old or the new file,
//! never a truncated one. The rename targets the resolved path, so a
//! symlink keeps pointing at the file it named, and the replacement file
//! takes over the permissions of the one it replaces.

use std::io;
use std::path::{Path, PathBuf};

use crate::{CoreError, CoreResult};

/// Loads and stores text files.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Persistence {
    atomic: bool,
}

impl Persistence {
    pub fn new(atomic: bool) -> Self {
        Self { atomic }
    }

    /// Write-then-rename persistence.
    pub fn atomic() -> Self {
        Self::new(true)
    }

    /// Direct overwrite of the destination.
    pub fn in_place() -> Self {
        Self::new(false)
    }

    pub fn is_atomic(&self) -> bool {
        self.atomic
    }

    /// Reads a whole file as text.
    ///
    /// Missing, unreadable or non-UTF-8 files are reported as
    /// [`CoreError::Open`].
    pub fn load(&self, path: &Path) -> CoreResult<String> {
        let text = std::fs::read_to_string(path).map_err(|source| CoreError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::debug!(path = %path.display(), bytes = text.len(), "Loaded file");
        Ok(text)
    }

    /// Writes `text` to `path`, replacing any existing content.
    pub fn store(&self, path: &Path, text: &str) -> CoreResult<()> {
        let result = if self.atomic {
            write_atomic(path, text.as_bytes())
        } else {
            std::fs::write(path, text.as_bytes())
        };

        result.map_err(|source| CoreError::Save {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::debug!(path = %path.display(), bytes = text.len(), atomic = self.atomic, "Stored file");
        Ok(())
    }
}

impl Default for Persistence {
    fn default() -> Self {
        Self::atomic()
    }
}

fn write_atomic(path: &Path, bytes: &[u8]) -> io::Result<()> {
    let target = resolve_target(path)?;
    let permissions = match std::fs::metadata(&target) {
        Ok(metadata) => Some(metadata.permissions()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => None,
        Err(e) => return Err(e),
    };
    let temp_path = temp_path_for(&target)?;

    let result = std::fs::write(&temp_path, bytes)
        .and_then(|()| match permissions {
            Some(permissions) => std::fs::set_permissions(&temp_path, permissions),
            None => Ok(()),
        })
        .and_then(|()| std::fs::rename(&temp_path, &target));

    if result.is_err() {
        let _ = std::fs::remove_file(&temp_path);
    }
    result
}

/// Follows symlinks to the file that actually gets replaced.
///
/// A path that does not exist yet (or a dangling link) is used as given.
fn resolve_target(path: &Path) -> io::Result<PathBuf> {
    match std::fs::canonicalize(path) {
        Ok(resolved) => Ok(resolved),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(path.to_path_buf()),
        Err(e) => Err(e),
    }
}

/// `dir/name.txt` -> `dir/.name.txt.quill-tmp`
fn temp_path_for(path: &Path) -> io::Result<PathBuf> {
    let name = path.file_name().ok_or_else(|| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("{} does not name a file", path.display()),
        )
    })?;
    let mut temp_name = std::ffi::OsString::from(".");
    temp_name.push(name);
    temp_name.push(".quill-tmp");
    Ok(path.with_file_name(temp_name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip_atomic() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a.txt");
        let text = "first line\nsecond line\n\tunicode: héllo ✓";

        let persistence = Persistence::atomic();
        persistence.store(&path, text).unwrap();
        assert_eq!(persistence.load(&path).unwrap(), text);
    }

    #[test]
    fn test_round_trip_in_place() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("b.txt");

        let persistence = Persistence::in_place();
        persistence.store(&path, "").unwrap();
        assert_eq!(persistence.load(&path).unwrap(), "");

        persistence.store(&path, "replaced").unwrap();
        assert_eq!(persistence.load(&path).unwrap(), "replaced");
    }

    #[test]
    fn test_atomic_write_leaves_no_temp_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("c.txt");
        std::fs::write(&path, "old").unwrap();

        Persistence::atomic().store(&path, "new").unwrap();

        let entries: Vec<_> = std::fs::read_dir(dir.path())
            .unwrap()
            .filter_map(|e| e.ok())
            .map(|e| e.file_name())
            .collect();
        assert_eq!(entries, vec![std::ffi::OsString::from("c.txt")]);
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "new");
    }

    #[cfg(unix)]
    #[test]
    fn test_atomic_store_keeps_permissions() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("secret.txt");
        std::fs::write(&path, "old").unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o600)).unwrap();

        Persistence::atomic().store(&path, "new").unwrap();

        let mode = std::fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "new");
    }

    #[cfg(unix)]
    #[test]
    fn test_atomic_store_through_symlink_updates_target() {
        let dir = tempfile::tempdir().unwrap();
        let real = dir.path().join("real.txt");
        let link = dir.path().join("link.txt");
        std::fs::write(&real, "old").unwrap();
        std::os::unix::fs::symlink(&real, &link).unwrap();

        Persistence::atomic().store(&link, "new").unwrap();

        assert_eq!(std::fs::read_to_string(&real).unwrap(), "new");
        let link_type = std::fs::symlink_metadata(&link).unwrap().file_type();
        assert!(link_type.is_symlink());
    }

    #[test]
    fn test_atomic_store_creates_new_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fresh.txt");

        Persistence::atomic().store(&path, "first").unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "first");
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.txt");

        let err = Persistence::default().load(&path).unwrap_err();
        match err {
            CoreError::Open { path: p, source } => {
                assert_eq!(p, path);
                assert_eq!(source.kind(), io::ErrorKind::NotFound);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_load_invalid_utf8() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("binary.bin");
        std::fs::write(&path, [0xff, 0xfe, 0x00]).unwrap();

        let err = Persistence::default().load(&path).unwrap_err();
        assert!(matches!(err, CoreError::Open { ref source, .. } if source.kind() == io::ErrorKind::InvalidData));
    }

    #[test]
    fn test_store_into_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("no-such-dir").join("file.txt");

        for persistence in [Persistence::atomic(), Persistence::in_place()] {
            let err = persistence.store(&path, "text").unwrap_err();
            assert!(matches!(err, CoreError::Save { .. }));
        }
    }

    #[test]
    fn test_store_onto_directory_fails_and_cleans_up() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("folder");
        std::fs::create_dir(&target).unwrap();

        let err = Persistence::atomic().store(&target, "text").unwrap_err();
        assert!(matches!(err, CoreError::Save { .. }));
        assert!(!dir.path().join(".folder.quill-tmp").exists());
    }

    #[test]
    fn test_temp_path_naming() {
        let temp = temp_path_for(Path::new("/tmp/notes.txt")).unwrap();
        assert_eq!(temp, PathBuf::from("/tmp/.notes.txt.quill-tmp"));
        assert!(temp_path_for(Path::new("/")).is_err());
    }
}
