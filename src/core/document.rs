//! Documents
//!
//! A markup file's text plus where it came from.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

/// One markup file, immutable once read
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub path: PathBuf,
    /// Path relative to the scanned root, `/`-separated
    pub display_name: String,
    pub content: String,
}

impl Document {
    pub fn new(path: PathBuf, display_name: String, content: String) -> Self {
        Self {
            path,
            display_name,
            content,
        }
    }

    /// Read a file found under `root`
    pub fn read(root: &Path, path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("cannot read {}", path.display()))?;
        Ok(Self::new(
            path.to_path_buf(),
            display_name(root, path),
            content,
        ))
    }

    /// In-memory document, mostly for tests and benchmarks
    pub fn from_text(name: &str, content: impl Into<String>) -> Self {
        Self::new(PathBuf::from(name), name.to_string(), content.into())
    }
}

/// Name used in the report for `path`
pub fn display_name(root: &Path, path: &Path) -> String {
    let relative = path.strip_prefix(root).unwrap_or(path);
    relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_name_is_relative() {
        let root = Path::new("LayoutLedger");
        let path = root.join("UI").join("Main.xml");
        assert_eq!(display_name(root, &path), "UI/Main.xml");
    }

    #[test]
    fn test_display_name_outside_root() {
        assert_eq!(
            display_name(Path::new("a"), Path::new("b/c.xml")),
            "b/c.xml"
        );
    }

    #[test]
    fn test_read() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("Frame.xml");
        std::fs::write(&path, "<Ui/>").expect("write");

        let doc = Document::read(dir.path(), &path).expect("read");
        assert_eq!(doc.display_name, "Frame.xml");
        assert_eq!(doc.content, "<Ui/>");
    }
}
