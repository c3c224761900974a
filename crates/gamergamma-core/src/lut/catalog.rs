//! Listing of the LUT files available for selection.

use std::fs;
use std::path::Path;

/// Sorted file names in `dir`. A missing or unreadable directory is empty.
pub fn list_luts(dir: &Path) -> Vec<String> {
    let Ok(entries) = fs::read_dir(dir) else {
        return Vec::new();
    };

    let mut names: Vec<String> = entries
        .filter_map(Result::ok)
        .filter(|entry| entry.file_type().map(|t| t.is_file()).unwrap_or(false))
        .filter_map(|entry| entry.file_name().into_string().ok())
        .collect();
    names.sort();
    names
}

/// Whether `name` refers to a file inside `dir`.
pub fn lut_exists(dir: &Path, name: &str) -> bool {
    !name.is_empty() && dir.join(name).is_file()
}
