//! Candidate file discovery.
//!
//! Depth-first walk of the target directory, entries sorted by file name.
//! Directories with the excluded name hold vendored libraries and are never entered.
//! Symlinks are followed; a link loop is a scan failure.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use walkdir::WalkDir;

/// Find all markup files under `root`, in traversal order
pub fn discover(root: &Path, extension: &str, exclude_dir: &str) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    let walker = WalkDir::new(root)
        .follow_links(true)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| {
            !(entry.depth() > 0
                && entry.file_type().is_dir()
                && entry.file_name() == exclude_dir)
        });

    for entry in walker {
        let entry = entry.with_context(|| format!("failed to scan {}", root.display()))?;
        if !entry.file_type().is_file() {
            continue;
        }
        let path = entry.path();
        if path.extension().map(|e| e == extension).unwrap_or(false) {
            files.push(path.to_path_buf());
        }
    }

    log::info!(
        "Found {} candidate file(s) under {}",
        files.len(),
        root.display()
    );
    Ok(files)
}
