//! This module provides the `ExpressionLoader` struct, responsible for reading batches of
//! expressions from files and strings.

use crate::types::LoadError;
use std::fs;
use std::path::Path;

/// `ExpressionLoader` reads one expression per line.
///
/// Lines are trimmed of their line ending only. Blank lines and lines starting
/// with `#` are skipped.
pub struct ExpressionLoader;

impl ExpressionLoader {
    /// Loads every expression from the file at `path`.
    ///
    /// # Returns
    ///
    /// * `Ok(Vec<String>)` with the expressions in file order.
    /// * `Err(LoadError::Io)` if the file cannot be read.
    pub fn load_file(path: &Path) -> Result<Vec<String>, LoadError> {
        let content = fs::read_to_string(path).map_err(|source| LoadError::Io {
            path: path.display().to_string(),
            source,
        })?;

        Ok(Self::load_from_string(&content))
    }

    /// Splits `content` into expressions.
    pub fn load_from_string(content: &str) -> Vec<String> {
        content
            .lines()
            .filter(|line| {
                let trimmed = line.trim();
                !trimmed.is_empty() && !trimmed.starts_with('#')
            })
            .map(str::to_string)
            .collect()
    }
}
