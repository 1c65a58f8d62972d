use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::error::{MixinError, Result};

/// Create `dir` (and parents) unless it already exists as a directory.
///
/// Fails with `NotADirectory` when something other than a directory sits at `dir`.
pub fn ensure_dir(dir: &Path) -> Result<()> {
    if dir.exists() {
        if dir.is_dir() {
            return Ok(());
        }
        return Err(MixinError::NotADirectory {
            path: dir.to_path_buf(),
        });
    }

    fs::create_dir_all(dir).map_err(|source| MixinError::CreateDir {
        path: dir.to_path_buf(),
        source,
    })?;
    debug!(path = %dir.display(), "Created directory");
    Ok(())
}

/// Replace `path` with `content` via a sibling temp file and a rename.
pub fn write_atomic(path: &Path, content: &[u8]) -> io::Result<()> {
    let tmp_path = tmp_path_for(path);

    let result = write_and_sync(&tmp_path, content).and_then(|()| fs::rename(&tmp_path, path));
    if result.is_err()
        && tmp_path.exists()
        && let Err(e) = fs::remove_file(&tmp_path)
    {
        warn!(path = %tmp_path.display(), error = %e, "Failed to remove temp file");
    }
    result
}

fn write_and_sync(path: &Path, content: &[u8]) -> io::Result<()> {
    let mut file = File::create(path)?;
    file.write_all(content)?;
    file.sync_all()
}

fn tmp_path_for(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_ensure_dir_creates_nested() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join("a/b/c");

        ensure_dir(&dir).unwrap();
        assert!(dir.is_dir());

        // Existing directory is fine
        ensure_dir(&dir).unwrap();
    }

    #[test]
    fn test_ensure_dir_rejects_file() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("built");
        fs::write(&file, "not a dir").unwrap();

        let err = ensure_dir(&file).unwrap_err();
        match err {
            MixinError::NotADirectory { path } => assert_eq!(path, file),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_write_atomic_replaces_content() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("demo.yaml");

        write_atomic(&path, b"first: 1\n").unwrap();
        write_atomic(&path, b"second: 2\n").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "second: 2\n");
        assert!(!temp.path().join("demo.yaml.tmp").exists());
    }

    #[test]
    fn test_write_atomic_missing_parent() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("missing/demo.yaml");

        assert!(write_atomic(&path, b"x").is_err());
        assert!(!temp.path().join("missing/demo.yaml.tmp").exists());
    }

    #[test]
    fn test_tmp_path_keeps_extension() {
        let path = Path::new("/out/perses/perses-overview.json");
        assert_eq!(
            tmp_path_for(path),
            PathBuf::from("/out/perses/perses-overview.json.tmp")
        );
    }
}
