//! File enumeration by extension.
//!
//! Listing is non-recursive: only regular files directly inside the given
//! directory are considered. Matching is an exact, case-sensitive suffix
//! match on the file name.

use std::collections::BTreeSet;
use std::path::Path;

use log::warn;
use walkdir::WalkDir;

use crate::error::LabelscopeError;

/// Set of file names (or stems) found in a directory.
pub type FileNameSet = BTreeSet<String>;

pub const DEFAULT_IMAGE_EXT: &str = ".jpg";
pub const DEFAULT_LABEL_EXT: &str = ".txt";

/// Which extensions identify image and label files.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InventoryOptions {
    /// Image file extension, including the leading dot.
    pub image_ext: String,
    /// Label file extension, including the leading dot.
    pub label_ext: String,
}

impl InventoryOptions {
    /// Builds options, adding a leading dot to either extension if missing.
    pub fn new(image_ext: &str, label_ext: &str) -> Self {
        Self {
            image_ext: normalize_extension(image_ext),
            label_ext: normalize_extension(label_ext),
        }
    }
}

impl Default for InventoryOptions {
    fn default() -> Self {
        Self {
            image_ext: DEFAULT_IMAGE_EXT.to_string(),
            label_ext: DEFAULT_LABEL_EXT.to_string(),
        }
    }
}

/// Normalizes `jpg` and `.jpg` to `.jpg`. An empty extension stays empty.
pub fn normalize_extension(ext: &str) -> String {
    let trimmed = ext.trim();
    if trimmed.is_empty() || trimmed.starts_with('.') {
        trimmed.to_string()
    } else {
        format!(".{trimmed}")
    }
}

/// List the files in `directory` whose names end with `extension`.
///
/// With `strip_extension`, the whole extension is removed from each name,
/// so `img_01.jpg` becomes `img_01`.
pub fn list_files(
    directory: &Path,
    extension: &str,
    strip_extension: bool,
) -> Result<FileNameSet, LabelscopeError> {
    let names = matching_file_names(directory, extension)?;

    Ok(names
        .into_iter()
        .map(|name| {
            if strip_extension {
                name[..name.len() - extension.len()].to_string()
            } else {
                name
            }
        })
        .collect())
}

/// Count the files in `directory` whose names end with `extension`.
pub fn count_files(directory: &Path, extension: &str) -> Result<usize, LabelscopeError> {
    Ok(matching_file_names(directory, extension)?.len())
}

fn matching_file_names(directory: &Path, extension: &str) -> Result<Vec<String>, LabelscopeError> {
    if !directory.is_dir() {
        return Err(LabelscopeError::DirectoryNotFound {
            path: directory.to_path_buf(),
        });
    }

    let mut names = Vec::new();
    for entry in WalkDir::new(directory)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
        .sort_by_file_name()
    {
        let entry = entry.map_err(|source| LabelscopeError::DirectoryWalk {
            path: directory.to_path_buf(),
            source,
        })?;

        if !entry.file_type().is_file() {
            continue;
        }

        let Some(name) = entry.file_name().to_str() else {
            warn!(
                "skipping non UTF-8 file name {}",
                entry.path().display()
            );
            continue;
        };

        if name.ends_with(extension) {
            names.push(name.to_string());
        }
    }

    Ok(names)
}
