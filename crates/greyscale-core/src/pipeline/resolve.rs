//! Output path resolution for converted images.

use std::ffi::OsStr;
use std::path::{Path, PathBuf};

/// Split a file name on its last `.` into `(name, lowered extension)`.
///
/// Internal dots stay in the name: `"test.hey.png"` gives `("test.hey", "png")`.
/// A name without a dot has no name part and is its own extension.
pub fn split_file_name(file_name: &str) -> (&str, String) {
    match file_name.rfind('.') {
        Some(idx) => (&file_name[..idx], file_name[idx + 1..].to_lowercase()),
        None => ("", file_name.to_lowercase()),
    }
}

/// Lowered extension of a file name, as used for allow-list matching.
pub fn extension_of(file_name: &str) -> String {
    split_file_name(file_name).1
}

/// Compute where the greyscale version of `source` is written.
///
/// With a destination the output lands in it, otherwise next to the source.
/// Base name and extension are preserved (extension lowered). No file-system
/// checks are made.
pub fn resolve_output_path(source: &Path, destination: Option<&Path>) -> PathBuf {
    let parent = source.parent().unwrap_or_else(|| Path::new(""));
    let dir = destination.unwrap_or(parent);

    let Some(raw_name) = source.file_name() else {
        return dir.to_path_buf();
    };
    let Some(file_name) = raw_name.to_str() else {
        return resolve_non_utf8(dir, raw_name);
    };

    if !file_name.contains('.') {
        return dir.join(file_name);
    }

    let (name, extension) = split_file_name(file_name);
    dir.join(format!("{name}.{extension}"))
}

/// Keep the raw name bytes and lower only a readable extension.
fn resolve_non_utf8(dir: &Path, file_name: &OsStr) -> PathBuf {
    let mut output = dir.join(file_name);
    let lowered = Path::new(file_name)
        .extension()
        .and_then(|ext| ext.to_str())
        .filter(|ext| !ext.is_empty())
        .map(str::to_lowercase);
    if let Some(ext) = lowered {
        output.set_extension(ext);
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_file_name() {
        assert_eq!(split_file_name("test1.png"), ("test1", "png".to_string()));
        assert_eq!(
            split_file_name("test.hey.png"),
            ("test.hey", "png".to_string())
        );
        assert_eq!(split_file_name("photo.JPEG"), ("photo", "jpeg".to_string()));
        assert_eq!(split_file_name("README"), ("", "readme".to_string()));
    }

    #[test]
    fn test_resolve_next_to_source() {
        let out = resolve_output_path(Path::new("/photos/test1.png"), None);
        assert_eq!(out, PathBuf::from("/photos/test1.png"));
    }

    #[test]
    fn test_resolve_into_destination() {
        let out = resolve_output_path(
            Path::new("/photos/test.hey.png"),
            Some(Path::new("/grey")),
        );
        assert_eq!(out, PathBuf::from("/grey/test.hey.png"));
    }

    #[test]
    fn test_resolve_lowers_extension() {
        let out = resolve_output_path(Path::new("/photos/IMG_01.JPG"), None);
        assert_eq!(out, PathBuf::from("/photos/IMG_01.jpg"));
    }

    #[test]
    fn test_resolve_extensionless_name() {
        let out = resolve_output_path(Path::new("/photos/png"), Some(Path::new("/grey")));
        assert_eq!(out, PathBuf::from("/grey/png"));
    }

    #[cfg(unix)]
    #[test]
    fn test_resolve_non_utf8_name_keeps_raw_bytes() {
        use std::os::unix::ffi::OsStrExt;

        let source = Path::new("/photos").join(OsStr::from_bytes(b"caf\xe9.JPG"));
        let out = resolve_output_path(&source, Some(Path::new("/grey")));
        assert_eq!(out.as_os_str().as_bytes(), b"/grey/caf\xe9.jpg");

        let source = Path::new("/photos").join(OsStr::from_bytes(b"caf\xe9.png"));
        assert_eq!(resolve_output_path(&source, None), source);
    }

    #[test]
    fn test_resolve_flattens_into_destination() {
        let a = resolve_output_path(Path::new("/one/same.png"), Some(Path::new("/grey")));
        let b = resolve_output_path(Path::new("/two/same.png"), Some(Path::new("/grey")));
        assert_eq!(a, b);
    }
}
