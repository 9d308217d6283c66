//! File discovery for finding images directly inside a folder.

use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::config::ProcessingConfig;

use super::resolve::extension_of;

/// Discovers image files in a single directory level.
pub struct FileDiscovery {
    formats: Vec<String>,
}

impl FileDiscovery {
    /// Create a new file discovery instance.
    pub fn new(config: &ProcessingConfig) -> Self {
        Self {
            formats: config
                .supported_formats
                .iter()
                .map(|f| f.to_lowercase())
                .collect(),
        }
    }

    /// Discover supported image files directly inside `dir`.
    ///
    /// Subdirectories are not entered. Symlinks are followed, so a link to a
    /// regular file counts and a link to a directory does not. Paths come
    /// back absolute, in file-system enumeration order. A missing path or a
    /// path that is not a directory yields an empty list.
    pub fn discover(&self, dir: &Path) -> Vec<PathBuf> {
        if !dir.is_dir() {
            tracing::debug!("Not a directory, nothing to discover: {:?}", dir);
            return vec![];
        }

        let root = if dir.is_absolute() {
            dir.to_path_buf()
        } else {
            match std::env::current_dir() {
                Ok(cwd) => cwd.join(dir),
                Err(_) => dir.to_path_buf(),
            }
        };

        let mut files = Vec::new();

        for entry in WalkDir::new(&root)
            .min_depth(1)
            .max_depth(1)
            .follow_links(true)
        {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    tracing::debug!("Skipping unreadable entry: {}", e);
                    continue;
                }
            };
            if entry.file_type().is_file() && self.is_supported(entry.path()) {
                files.push(entry.into_path());
            }
        }

        files
    }

    /// Check if a file has a supported extension.
    ///
    /// Names that are not valid UTF-8 are matched lossily, so only the
    /// extension has to be readable.
    fn is_supported(&self, path: &Path) -> bool {
        path.file_name()
            .map(|name| {
                let ext = extension_of(&name.to_string_lossy());
                self.formats.iter().any(|fmt| *fmt == ext)
            })
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn touch(dir: &Path, name: &str) -> PathBuf {
        let path = dir.join(name);
        std::fs::write(&path, b"not really an image").unwrap();
        path
    }

    #[test]
    fn test_is_supported() {
        let discovery = FileDiscovery::new(&ProcessingConfig::default());

        assert!(discovery.is_supported(Path::new("test.jpg")));
        assert!(discovery.is_supported(Path::new("test.JPG")));
        assert!(discovery.is_supported(Path::new("test.jpeg")));
        assert!(discovery.is_supported(Path::new("test.png")));
        assert!(discovery.is_supported(Path::new("test.bmp")));
        assert!(discovery.is_supported(Path::new("test.gif")));
        assert!(discovery.is_supported(Path::new("test.TIFF")));
        assert!(discovery.is_supported(Path::new("/dir/test.hey.jpeg")));
        assert!(!discovery.is_supported(Path::new("test.webp")));
        assert!(!discovery.is_supported(Path::new("test.txt")));
        assert!(!discovery.is_supported(Path::new("README")));
    }

    #[test]
    fn test_extensionless_name_matching_allow_list() {
        // The whole name stands in for the extension when there is no dot.
        let discovery = FileDiscovery::new(&ProcessingConfig::default());
        assert!(discovery.is_supported(Path::new("/dir/png")));
    }

    #[test]
    fn test_discover_filters_entries() {
        let dir = tempfile::tempdir().unwrap();
        let a = touch(dir.path(), "test1.png");
        let b = touch(dir.path(), "test2.bmp");
        let c = touch(dir.path(), "test_grey.jpg");
        touch(dir.path(), "notes.txt");
        touch(dir.path(), "Makefile");
        std::fs::create_dir(dir.path().join("nested.png")).unwrap();
        touch(&dir.path().join("nested.png"), "inner.png");

        let discovery = FileDiscovery::new(&ProcessingConfig::default());
        let found: HashSet<PathBuf> = discovery.discover(dir.path()).into_iter().collect();

        let expected: HashSet<PathBuf> = [a, b, c].into_iter().collect();
        assert_eq!(found, expected);
    }

    #[test]
    fn test_discover_returns_absolute_paths() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "a.gif");

        let discovery = FileDiscovery::new(&ProcessingConfig::default());
        let found = discovery.discover(dir.path());
        assert_eq!(found.len(), 1);
        assert!(found[0].is_absolute());
    }

    #[test]
    fn test_discover_missing_folder_is_empty() {
        let discovery = FileDiscovery::new(&ProcessingConfig::default());
        assert!(discovery.discover(Path::new("/invalid/folder")).is_empty());
    }

    #[test]
    fn test_discover_file_path_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let file = touch(dir.path(), "a.png");

        let discovery = FileDiscovery::new(&ProcessingConfig::default());
        assert!(discovery.discover(&file).is_empty());
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn test_discover_non_utf8_name() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let dir = tempfile::tempdir().unwrap();
        let name = OsStr::from_bytes(b"caf\xe9.png");
        let path = dir.path().join(name);
        std::fs::write(&path, b"not really an image").unwrap();
        touch(dir.path(), "caf\u{e9}.txt");

        let discovery = FileDiscovery::new(&ProcessingConfig::default());
        assert!(discovery.is_supported(&path));
        assert_eq!(discovery.discover(dir.path()), vec![path]);
    }

    #[cfg(unix)]
    #[test]
    fn test_discover_symlinks() {
        let dir = tempfile::tempdir().unwrap();
        let other = tempfile::tempdir().unwrap();
        let target = touch(other.path(), "real.png");
        std::fs::create_dir(other.path().join("sub.png")).unwrap();

        std::os::unix::fs::symlink(&target, dir.path().join("link.png")).unwrap();
        std::os::unix::fs::symlink(other.path().join("sub.png"), dir.path().join("dirlink.png"))
            .unwrap();

        let discovery = FileDiscovery::new(&ProcessingConfig::default());
        let found = discovery.discover(dir.path());
        assert_eq!(found, vec![dir.path().join("link.png")]);
    }
}
