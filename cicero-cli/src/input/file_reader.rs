//! File reading utilities

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

/// Reads protocol files as UTF-8 text
pub struct FileReader;

impl FileReader {
    /// Read a file as UTF-8 text
    ///
    /// A leading byte order mark is dropped; some protocol exports carry one.
    pub fn read_text(path: &Path) -> Result<String> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read file: {}", path.display()))?;

        Ok(match content.strip_prefix('\u{feff}') {
            Some(stripped) => stripped.to_string(),
            None => content,
        })
    }
}
