//! Filesystem utilities.

use std::fs;
use std::io;
use std::path::Path;

use anyhow::{Context, Result};

/// Ensure a directory exists, creating it if necessary.
pub fn ensure_dir(path: &Path) -> Result<()> {
    if !path.exists() {
        fs::create_dir_all(path)
            .with_context(|| format!("failed to create directory: {}", path.display()))?;
    }
    Ok(())
}

/// Read a file to string, with nice error messages.
pub fn read_to_string(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("failed to read file: {}", path.display()))
}

/// Read a text file, replacing invalid UTF-8 with U+FFFD.
///
/// Build files are mostly ASCII but may carry Latin-1 comments.
pub fn read_lossy(path: &Path) -> io::Result<String> {
    let bytes = fs::read(path)?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Write a string to a file, creating parent directories if needed.
pub fn write_string(path: &Path, contents: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        ensure_dir(parent)?;
    }
    fs::write(path, contents).with_context(|| format!("failed to write file: {}", path.display()))
}

/// Write lines to a file, each terminated by a newline.
pub fn write_lines<I, S>(path: &Path, lines: I) -> Result<()>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut contents = String::new();
    for line in lines {
        contents.push_str(line.as_ref());
        contents.push('\n');
    }
    write_string(path, &contents)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_write_string_creates_parents() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("output/nested/report.txt");

        write_string(&path, "content").unwrap();

        assert_eq!(read_to_string(&path).unwrap(), "content");
    }

    #[test]
    fn test_write_lines() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("lines.txt");

        write_lines(&path, ["a", "b"]).unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "a\nb\n");
    }

    #[test]
    fn test_read_lossy_keeps_valid_text() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("RELEASE");
        fs::write(&path, b"# author: Ren\xe9\nA_VERSION=1.0\n").unwrap();

        let contents = read_lossy(&path).unwrap();

        assert!(contents.contains("Ren\u{FFFD}"));
        assert!(contents.ends_with("A_VERSION=1.0\n"));
    }

    #[test]
    fn test_read_missing_file_has_context() {
        let tmp = TempDir::new().unwrap();
        let err = read_to_string(&tmp.path().join("missing.txt")).unwrap_err();

        assert!(err.to_string().contains("failed to read file"));
    }
}
