//! Per-split dataset statistics.
//!
//! Counts images and per-class annotations for every split, then combines
//! the per-split class counts into dataset totals.

mod report;

pub use report::{ClassCount, ClassCountMap, SplitStats, StatsReport};

use std::path::Path;

use log::{debug, info};

use crate::dataset::{count_files, list_files, ClassList, DatasetLayout, InventoryOptions, Split};
use crate::error::LabelscopeError;
use crate::label::parse_label_file;

/// Options for dataset statistics.
#[derive(Clone, Debug)]
pub struct StatsOptions {
    /// Image and label extensions.
    pub inventory: InventoryOptions,
    /// Width of histogram bars (in characters).
    pub bar_width: usize,
}

impl Default for StatsOptions {
    fn default() -> Self {
        Self {
            inventory: InventoryOptions::default(),
            bar_width: 20,
        }
    }
}

/// Compute statistics for all three splits of a dataset.
///
/// `classes` should come from the dataset's manifest, loaded before any
/// split is touched.
pub fn stats_dataset(
    layout: &DatasetLayout,
    classes: &ClassList,
    opts: &StatsOptions,
) -> Result<StatsReport, LabelscopeError> {
    layout.ensure_splits()?;

    let mut splits = Vec::with_capacity(Split::ALL.len());
    for split in Split::ALL {
        let images_dir = layout.images_dir(split)?;
        let labels_dir = layout.labels_dir(split)?;

        let images = count_files(&images_dir, &opts.inventory.image_ext)?;
        let label_files = count_files(&labels_dir, &opts.inventory.label_ext)?;
        let class_counts = count_by_class(&labels_dir, classes, &opts.inventory)?;

        info!(
            "{}: {} image(s), {} label file(s), {} annotation(s)",
            split,
            images,
            label_files,
            class_counts.total()
        );

        splits.push(SplitStats {
            split,
            images,
            label_files,
            class_counts,
        });
    }

    let totals = combine_totals(classes, splits.iter().map(|s| &s.class_counts))?;

    Ok(StatsReport {
        dataset_name: layout.name(),
        classes: classes.names().to_vec(),
        splits,
        totals,
        bar_width: opts.bar_width,
    })
}

/// Count detections per class across every label file in `labels_dir`.
///
/// Every class in `classes` is present in the result, with zero for
/// classes that never occur. Files are parsed one at a time.
pub fn count_by_class(
    labels_dir: &Path,
    classes: &ClassList,
    opts: &InventoryOptions,
) -> Result<ClassCountMap, LabelscopeError> {
    let label_files = list_files(labels_dir, &opts.label_ext, false)?;
    let mut counts = ClassCountMap::zeroed(classes);

    for file_name in &label_files {
        let path = labels_dir.join(file_name);
        let detections = parse_label_file(&path, classes)?;
        debug!("{}: {} detection(s)", path.display(), detections.len());

        for detection in &detections {
            counts.increment_at(detection.class_index);
        }
    }

    Ok(counts)
}

/// Sum per-split class counts into a total, in `classes` order.
///
/// Every input map must hold an entry for every class; a missing entry is
/// an error rather than an implicit zero. Maps laid out like `classes`
/// (as built by [`ClassCountMap::zeroed`]) are summed position by position,
/// so repeated class names keep separate counts.
pub fn combine_totals<'a, I>(classes: &ClassList, maps: I) -> Result<ClassCountMap, LabelscopeError>
where
    I: IntoIterator<Item = &'a ClassCountMap>,
{
    let mut totals = ClassCountMap::zeroed(classes);

    for map in maps {
        if map.is_aligned_with(classes) {
            for (entry, counted) in totals.entries.iter_mut().zip(map.iter()) {
                entry.count += counted.count;
            }
            continue;
        }

        for (entry, class) in totals.entries.iter_mut().zip(classes) {
            let count = map
                .get(class)
                .ok_or_else(|| LabelscopeError::MissingClassKey {
                    class: class.clone(),
                })?;
            entry.count += count;
        }
    }

    Ok(totals)
}

/// `part` as a percentage of `whole`, rounded to two decimals.
///
/// Returns 0 when `whole` is 0.
pub fn percentage(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        return 0.0;
    }
    let raw = part as f64 / whole as f64 * 100.0;
    (raw * 100.0).round() / 100.0
}
