//! Validation report types.

use std::fmt;
use std::path::PathBuf;

use serde::Serialize;

use crate::dataset::{FileNameSet, Split};

/// Mismatches between image and label stems in one split.
#[derive(Clone, Debug, Serialize)]
pub struct ValidationReport {
    /// The split checked, when validating a whole dataset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub split: Option<Split>,
    pub images_dir: PathBuf,
    pub labels_dir: PathBuf,
    /// Image stems with no label file.
    pub images_without_label: FileNameSet,
    /// Label stems with no image file.
    pub labels_without_image: FileNameSet,
}

impl ValidationReport {
    /// Returns true if images and labels match one-to-one.
    pub fn is_clean(&self) -> bool {
        self.images_without_label.is_empty() && self.labels_without_image.is_empty()
    }

    /// Number of orphaned files in this split.
    pub fn issue_count(&self) -> usize {
        self.images_without_label.len() + self.labels_without_image.len()
    }

    fn scope(&self) -> String {
        match self.split {
            Some(split) => split.to_string(),
            None => self.images_dir.display().to_string(),
        }
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_clean() {
            return writeln!(f, "  [OK   ] {}: images and labels match", self.scope());
        }

        if !self.images_without_label.is_empty() {
            writeln!(
                f,
                "  [WARN ] {}: label not found for image(s): {}",
                self.scope(),
                join_names(&self.images_without_label)
            )?;
        }
        if !self.labels_without_image.is_empty() {
            writeln!(
                f,
                "  [WARN ] {}: image not found for label(s): {}",
                self.scope(),
                join_names(&self.labels_without_image)
            )?;
        }
        Ok(())
    }
}

/// Validation results for every split of a dataset.
#[derive(Clone, Debug, Default, Serialize)]
pub struct DatasetValidation {
    pub reports: Vec<ValidationReport>,
}

impl DatasetValidation {
    /// Total images without a label, over all splits.
    pub fn images_without_label(&self) -> usize {
        self.reports
            .iter()
            .map(|r| r.images_without_label.len())
            .sum()
    }

    /// Total labels without an image, over all splits.
    pub fn labels_without_image(&self) -> usize {
        self.reports
            .iter()
            .map(|r| r.labels_without_image.len())
            .sum()
    }

    /// Returns true if no split has a mismatch.
    pub fn is_clean(&self) -> bool {
        self.reports.iter().all(ValidationReport::is_clean)
    }
}

impl fmt::Display for DatasetValidation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_clean() {
            return writeln!(f, "Validation passed: no issues found");
        }

        writeln!(
            f,
            "Validation completed with {} image(s) without label and {} label(s) without image:",
            self.images_without_label(),
            self.labels_without_image()
        )?;
        writeln!(f)?;

        for report in &self.reports {
            write!(f, "{}", report)?;
        }

        Ok(())
    }
}

fn join_names(names: &FileNameSet) -> String {
    names.iter().map(String::as_str).collect::<Vec<_>>().join(", ")
}
