//! Image/label consistency checks.
//!
//! Every image in a split should have a label file with the same stem, and
//! every label file should have an image. Mismatches are advisory: they are
//! collected for all splits and reported together.

mod report;

pub use report::{DatasetValidation, ValidationReport};

use std::path::Path;

use log::{info, warn};

use crate::dataset::{list_files, DatasetLayout, InventoryOptions, Split};
use crate::error::LabelscopeError;

/// Options for validation behavior.
#[derive(Clone, Debug, Default)]
pub struct ValidateOptions {
    /// Image and label extensions.
    pub inventory: InventoryOptions,
    /// If true, any mismatch makes the run fail.
    pub strict: bool,
}

/// Compare image and label stems of a single split.
pub fn validate_split(
    images_dir: &Path,
    labels_dir: &Path,
    opts: &InventoryOptions,
) -> Result<ValidationReport, LabelscopeError> {
    let image_stems = list_files(images_dir, &opts.image_ext, true)?;
    let label_stems = list_files(labels_dir, &opts.label_ext, true)?;

    let images_without_label = image_stems.difference(&label_stems).cloned().collect();
    let labels_without_image = label_stems.difference(&image_stems).cloned().collect();

    Ok(ValidationReport {
        split: None,
        images_dir: images_dir.to_path_buf(),
        labels_dir: labels_dir.to_path_buf(),
        images_without_label,
        labels_without_image,
    })
}

/// Validate train, valid and test independently.
///
/// All three split directories must exist; a missing one is reported
/// before any split is checked.
pub fn validate_dataset(
    layout: &DatasetLayout,
    opts: &ValidateOptions,
) -> Result<DatasetValidation, LabelscopeError> {
    layout.ensure_splits()?;

    let mut reports = Vec::with_capacity(Split::ALL.len());
    for split in Split::ALL {
        let images_dir = layout.images_dir(split)?;
        let labels_dir = layout.labels_dir(split)?;

        let mut report = validate_split(&images_dir, &labels_dir, &opts.inventory)?;
        report.split = Some(split);

        if report.is_clean() {
            info!("{}: images and labels match", split);
        } else {
            warn!(
                "{}: {} image(s) without label, {} label(s) without image",
                split,
                report.images_without_label.len(),
                report.labels_without_image.len()
            );
        }

        reports.push(report);
    }

    Ok(DatasetValidation { reports })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn touch_all(dir: &Path, names: &[&str]) {
        fs::create_dir_all(dir).expect("create dir");
        for name in names {
            fs::write(dir.join(name), b"").expect("write file");
        }
    }

    #[test]
    fn reports_images_without_labels() {
        let temp = tempfile::tempdir().expect("create temp dir");
        let images = temp.path().join("images");
        let labels = temp.path().join("labels");
        touch_all(&images, &["a.jpg", "b.jpg", "c.jpg"]);
        touch_all(&labels, &["a.txt", "b.txt"]);

        let report = validate_split(&images, &labels, &InventoryOptions::default())
            .expect("validate split");

        assert_eq!(
            report.images_without_label.iter().collect::<Vec<_>>(),
            vec!["c"]
        );
        assert!(report.labels_without_image.is_empty());
        assert!(!report.is_clean());
    }

    #[test]
    fn reports_labels_without_images() {
        let temp = tempfile::tempdir().expect("create temp dir");
        let images = temp.path().join("images");
        let labels = temp.path().join("labels");
        touch_all(&images, &["a.jpg"]);
        touch_all(&labels, &["a.txt", "orphan.txt"]);

        let report = validate_split(&images, &labels, &InventoryOptions::default())
            .expect("validate split");

        assert!(report.images_without_label.is_empty());
        assert_eq!(
            report.labels_without_image.iter().collect::<Vec<_>>(),
            vec!["orphan"]
        );
    }

    #[test]
    fn other_extensions_are_ignored() {
        let temp = tempfile::tempdir().expect("create temp dir");
        let images = temp.path().join("images");
        let labels = temp.path().join("labels");
        touch_all(&images, &["a.jpg", "b.png"]);
        touch_all(&labels, &["a.txt"]);

        let report = validate_split(&images, &labels, &InventoryOptions::default())
            .expect("validate split");
        assert!(report.is_clean());

        let png = InventoryOptions::new("png", "txt");
        let report = validate_split(&images, &labels, &png).expect("validate split");
        assert_eq!(report.issue_count(), 2);
    }

    #[test]
    fn missing_labels_directory_is_fatal() {
        let temp = tempfile::tempdir().expect("create temp dir");
        let images = temp.path().join("images");
        touch_all(&images, &["a.jpg"]);

        let err = validate_split(&images, &temp.path().join("labels"), &InventoryOptions::default())
            .unwrap_err();
        assert!(matches!(err, LabelscopeError::DirectoryNotFound { .. }));
    }

    #[test]
    fn validate_dataset_requires_all_splits() {
        let temp = tempfile::tempdir().expect("create temp dir");
        touch_all(&temp.path().join("train/images"), &["a.jpg"]);
        touch_all(&temp.path().join("train/labels"), &["a.txt"]);
        touch_all(&temp.path().join("valid/images"), &[]);
        touch_all(&temp.path().join("valid/labels"), &[]);

        let layout = DatasetLayout::new(temp.path());
        let err = validate_dataset(&layout, &ValidateOptions::default()).unwrap_err();
        assert!(matches!(err, LabelscopeError::SplitNotFound { split, .. } if split == "test"));
    }
}
