//! Dataset layout, file inventory and class manifest.
//!
//! A dataset root is expected to look like:
//!
//! ```text
//! <root>/
//!   data.yaml
//!   train/{images,labels}/
//!   valid/{images,labels}/
//!   test/{images,labels}/
//! ```
//!
//! Label file stems match image file stems.

pub mod inventory;
mod manifest;

pub use inventory::{count_files, list_files, normalize_extension, FileNameSet, InventoryOptions};
pub use manifest::{read_class_manifest, ClassList};

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::error::LabelscopeError;

pub const IMAGES_DIR: &str = "images";
pub const LABELS_DIR: &str = "labels";
pub const MANIFEST_FILE: &str = "data.yaml";

/// One of the three dataset partitions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Split {
    Train,
    Valid,
    Test,
}

impl Split {
    /// All splits, in reporting order.
    pub const ALL: [Split; 3] = [Split::Train, Split::Valid, Split::Test];

    /// Directory name of the split under the dataset root.
    pub fn as_str(&self) -> &'static str {
        match self {
            Split::Train => "train",
            Split::Valid => "valid",
            Split::Test => "test",
        }
    }

    /// Human-readable heading used in text reports.
    pub fn title(&self) -> &'static str {
        match self {
            Split::Train => "Training",
            Split::Valid => "Validation",
            Split::Test => "Testing",
        }
    }
}

impl fmt::Display for Split {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Paths of a dataset rooted at a single directory.
#[derive(Clone, Debug)]
pub struct DatasetLayout {
    root: PathBuf,
}

impl DatasetLayout {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Dataset name, taken from the final component of the root path.
    pub fn name(&self) -> String {
        let from_path = |path: &Path| {
            path.file_name()
                .map(|name| name.to_string_lossy().into_owned())
        };

        from_path(&self.root)
            .or_else(|| {
                fs::canonicalize(&self.root)
                    .ok()
                    .and_then(|path| from_path(&path))
            })
            .unwrap_or_else(|| self.root.display().to_string())
    }

    pub fn manifest_path(&self) -> PathBuf {
        self.root.join(MANIFEST_FILE)
    }

    /// Returns the split directory, failing if it does not exist.
    pub fn split_dir(&self, split: Split) -> Result<PathBuf, LabelscopeError> {
        let path = self.root.join(split.as_str());
        if !path.is_dir() {
            return Err(LabelscopeError::SplitNotFound {
                split: split.to_string(),
                path,
            });
        }
        Ok(path)
    }

    pub fn images_dir(&self, split: Split) -> Result<PathBuf, LabelscopeError> {
        Ok(self.split_dir(split)?.join(IMAGES_DIR))
    }

    pub fn labels_dir(&self, split: Split) -> Result<PathBuf, LabelscopeError> {
        Ok(self.split_dir(split)?.join(LABELS_DIR))
    }

    /// Checks that train, valid and test are all present.
    pub fn ensure_splits(&self) -> Result<(), LabelscopeError> {
        for split in Split::ALL {
            self.split_dir(split)?;
        }
        Ok(())
    }
}

/// Where an image sits inside a dataset, and where its companions live.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ImageLocation {
    /// Dataset root (parent of the split directory).
    pub root: PathBuf,
    /// Split directory holding `images/` and `labels/`.
    pub split_dir: PathBuf,
    /// Label file expected for the image.
    pub label_path: PathBuf,
}

impl ImageLocation {
    pub fn manifest_path(&self) -> PathBuf {
        self.root.join(MANIFEST_FILE)
    }
}

/// Locate an image of the form `<root>/<split>/images/<stem>.<ext>`.
pub fn locate_image(image_path: &Path, label_ext: &str) -> Result<ImageLocation, LabelscopeError> {
    let invalid = |message: &str| LabelscopeError::LayoutInvalid {
        path: image_path.to_path_buf(),
        message: message.to_string(),
    };

    let images_dir = image_path
        .parent()
        .filter(|dir| is_dir_named(dir, IMAGES_DIR))
        .ok_or_else(|| invalid("image must live inside an images/ directory"))?;
    let split_dir = images_dir
        .parent()
        .ok_or_else(|| invalid("images/ directory has no parent split directory"))?;
    let root = split_dir
        .parent()
        .ok_or_else(|| invalid("split directory has no parent dataset root"))?;
    let stem = image_path
        .file_stem()
        .and_then(|stem| stem.to_str())
        .ok_or_else(|| invalid("image file name is not valid UTF-8"))?;

    let label_ext = normalize_extension(label_ext);
    Ok(ImageLocation {
        root: root.to_path_buf(),
        split_dir: split_dir.to_path_buf(),
        label_path: split_dir.join(LABELS_DIR).join(format!("{stem}{label_ext}")),
    })
}

fn is_dir_named(path: &Path, dir_name: &str) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .map(|name| name == dir_name)
        .unwrap_or(false)
}
