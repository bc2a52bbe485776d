//! File inputs for the batch driver.
//!
//! A [`FileSource`] is anything exposing a name and raw bytes — the driver
//! never touches the filesystem directly, so embedders holding upload bytes
//! in memory (the common case for this pipeline) use [`MemoryFile`], while
//! [`DiskFile`] covers path-backed inputs.
//!
//! Also home to the small name/type helpers: [`extension`] pulls the
//! extension-ish tail of a file name, and [`is_accepted`] checks a MIME type
//! against an accept list.

use std::io;
use std::path::PathBuf;

/// A file-like input: a display name plus readable bytes.
///
/// `Sync` because the batch driver reads files from worker threads.
pub trait FileSource: Sync {
    /// The file's display name (used for format detection and error reports).
    fn name(&self) -> &str;

    /// Read the file's raw bytes.
    fn read(&self) -> io::Result<Vec<u8>>;
}

/// A path-backed file source.
#[derive(Debug, Clone)]
pub struct DiskFile {
    path: PathBuf,
    name: String,
}

impl DiskFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        Self { path, name }
    }
}

impl FileSource for DiskFile {
    fn name(&self) -> &str {
        &self.name
    }

    fn read(&self) -> io::Result<Vec<u8>> {
        std::fs::read(&self.path)
    }
}

/// An in-memory file source.
#[derive(Debug, Clone)]
pub struct MemoryFile {
    name: String,
    bytes: Vec<u8>,
}

impl MemoryFile {
    pub fn new(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            bytes,
        }
    }
}

impl FileSource for MemoryFile {
    fn name(&self) -> &str {
        &self.name
    }

    fn read(&self) -> io::Result<Vec<u8>> {
        Ok(self.bytes.clone())
    }
}

/// MIME types the pipeline accepts by default.
pub const ACCEPTED_TYPES: &str = "image/jpeg,image/jpg,image/png,image/gif";

/// Extract the extension from a file name: the text after the last dot,
/// or the whole name when there is no dot.
pub fn extension(file_name: &str) -> &str {
    match file_name.rfind('.') {
        Some(idx) => &file_name[idx + 1..],
        None => file_name,
    }
}

/// Check a MIME type against a comma-separated accept list
/// (case-insensitive substring match).
pub fn is_accepted(mime: &str, accept: &str) -> bool {
    accept.to_lowercase().contains(&mime.to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn extension_after_last_dot() {
        assert_eq!(extension("photo.jpg"), "jpg");
        assert_eq!(extension("archive.tar.gz"), "gz");
        assert_eq!(extension("IMG_0001.JPEG"), "JPEG");
    }

    #[test]
    fn extension_without_dot_is_whole_name() {
        assert_eq!(extension("README"), "README");
        assert_eq!(extension(""), "");
    }

    #[test]
    fn accepts_listed_types() {
        assert!(is_accepted("image/png", ACCEPTED_TYPES));
        assert!(is_accepted("image/jpeg", ACCEPTED_TYPES));
        assert!(is_accepted("IMAGE/GIF", ACCEPTED_TYPES));
    }

    #[test]
    fn rejects_unlisted_types() {
        assert!(!is_accepted("image/webp", ACCEPTED_TYPES));
        assert!(!is_accepted("application/pdf", ACCEPTED_TYPES));
    }

    #[test]
    fn memory_file_round_trip() {
        let file = MemoryFile::new("photo.png", vec![1, 2, 3]);
        assert_eq!(file.name(), "photo.png");
        assert_eq!(file.read().unwrap(), vec![1, 2, 3]);
    }

    #[test]
    fn disk_file_reads_bytes_and_names_itself() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("upload.jpg");
        fs::write(&path, b"jpeg bytes").unwrap();

        let file = DiskFile::new(&path);
        assert_eq!(file.name(), "upload.jpg");
        assert_eq!(file.read().unwrap(), b"jpeg bytes");
    }

    #[test]
    fn disk_file_missing_path_errors() {
        let file = DiskFile::new("/nonexistent/upload.jpg");
        assert!(file.read().is_err());
    }
}
