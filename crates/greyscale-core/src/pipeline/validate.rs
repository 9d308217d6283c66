//! Argument validation before a run.

use std::path::{Path, PathBuf};

use crate::error::ArgumentError;

/// Checked source folder and destination for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunTarget {
    /// Absolute, existing directory holding the images
    pub folder: PathBuf,
    /// Absolute, existing output directory, if redirected
    pub destination: Option<PathBuf>,
}

impl RunTarget {
    /// Validate the folders for a run.
    ///
    /// Checks:
    /// - `folder` is absolute, exists, and is a directory
    /// - `save_to`, if given, is absolute
    ///
    /// A missing destination is created along with its parents. Nothing is
    /// created when the source folder is invalid.
    pub fn check(folder: &Path, save_to: Option<&Path>) -> Result<Self, ArgumentError> {
        if !folder.is_absolute() || !folder.is_dir() {
            return Err(ArgumentError::InvalidFolder(folder.to_path_buf()));
        }

        let destination = match save_to {
            None => None,
            Some(dest) if dest.as_os_str().is_empty() => None,
            Some(dest) => {
                if !dest.is_absolute() {
                    return Err(ArgumentError::RelativeDestination(dest.to_path_buf()));
                }
                if !dest.is_dir() {
                    std::fs::create_dir_all(dest).map_err(|source| {
                        ArgumentError::CreateDestination {
                            path: dest.to_path_buf(),
                            source,
                        }
                    })?;
                    tracing::info!("Created output folder {:?}", dest);
                }
                Some(dest.to_path_buf())
            }
        };

        Ok(Self {
            folder: folder.to_path_buf(),
            destination,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_folder() {
        let dir = tempfile::tempdir().unwrap();
        let target = RunTarget::check(dir.path(), None).unwrap();
        assert_eq!(target.folder, dir.path());
        assert!(target.destination.is_none());
    }

    #[test]
    fn test_invalid_folder() {
        let err = RunTarget::check(Path::new("/invalid/folder"), None).unwrap_err();
        assert!(matches!(err, ArgumentError::InvalidFolder(_)));
    }

    #[test]
    fn test_relative_folder() {
        let err = RunTarget::check(Path::new("."), None).unwrap_err();
        assert!(matches!(err, ArgumentError::InvalidFolder(_)));
    }

    #[test]
    fn test_file_is_not_a_folder() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("a.png");
        std::fs::write(&file, b"x").unwrap();
        let err = RunTarget::check(&file, None).unwrap_err();
        assert!(matches!(err, ArgumentError::InvalidFolder(_)));
    }

    #[test]
    fn test_relative_save_folder() {
        let dir = tempfile::tempdir().unwrap();
        let err = RunTarget::check(dir.path(), Some(Path::new("../fake/"))).unwrap_err();
        assert!(matches!(err, ArgumentError::RelativeDestination(_)));
    }

    #[test]
    fn test_save_folder_creation() {
        let dir = tempfile::tempdir().unwrap();
        let save = dir.path().join("test_folder").join("nested");

        let target = RunTarget::check(dir.path(), Some(&save)).unwrap();
        assert!(save.is_dir());
        assert_eq!(target.destination, Some(save));
    }

    #[test]
    fn test_empty_save_folder_means_none() {
        let dir = tempfile::tempdir().unwrap();
        let target = RunTarget::check(dir.path(), Some(Path::new(""))).unwrap();
        assert!(target.destination.is_none());
    }

    #[test]
    fn test_invalid_folder_creates_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let save = dir.path().join("never");
        let err = RunTarget::check(Path::new("/invalid/folder"), Some(&save)).unwrap_err();
        assert!(matches!(err, ArgumentError::InvalidFolder(_)));
        assert!(!save.exists());
    }

    #[test]
    fn test_save_folder_blocked_by_file() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("out");
        std::fs::write(&blocker, b"x").unwrap();

        let err = RunTarget::check(dir.path(), Some(&blocker)).unwrap_err();
        assert!(matches!(err, ArgumentError::CreateDestination { .. }));
    }
}
