//! Stats report types and terminal formatting.
//!
//! Reports can be rendered as text (Display) or serialized as JSON.

use serde::Serialize;
use std::fmt;

use super::percentage;
use crate::dataset::{ClassList, Split};

/// Occurrence count for a single class.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ClassCount {
    /// The class name.
    pub class: String,
    /// Number of detections with this class.
    pub count: usize,
}

/// Class name to count, iterated in class-list order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ClassCountMap {
    pub(crate) entries: Vec<ClassCount>,
}

impl ClassCountMap {
    /// Creates an empty map.
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Creates a map with a zero entry for every class, in list order.
    pub fn zeroed(classes: &ClassList) -> Self {
        Self {
            entries: classes
                .iter()
                .map(|class| ClassCount {
                    class: class.clone(),
                    count: 0,
                })
                .collect(),
        }
    }

    /// Sets the count for `class`, appending it if not yet present.
    pub fn insert(&mut self, class: impl Into<String>, count: usize) {
        let class = class.into();
        match self.entries.iter_mut().find(|entry| entry.class == class) {
            Some(entry) => entry.count = count,
            None => self.entries.push(ClassCount { class, count }),
        }
    }

    /// Returns the count for `class`, or `None` if the class has no entry.
    pub fn get(&self, class: &str) -> Option<usize> {
        self.entries
            .iter()
            .find(|entry| entry.class == class)
            .map(|entry| entry.count)
    }

    /// Sum of all class counts.
    pub fn total(&self) -> usize {
        self.entries.iter().map(|entry| entry.count).sum()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ClassCount> {
        self.entries.iter()
    }

    /// True if entry `i` is class `i` of `classes`, for every class.
    pub fn is_aligned_with(&self, classes: &ClassList) -> bool {
        self.entries.len() == classes.len()
            && self
                .entries
                .iter()
                .zip(classes)
                .all(|(entry, class)| entry.class == *class)
    }

    // Positions line up with the class list when built with `zeroed`.
    pub(crate) fn increment_at(&mut self, class_index: usize) {
        if let Some(entry) = self.entries.get_mut(class_index) {
            entry.count += 1;
        }
    }
}

/// Counts for a single split.
#[derive(Clone, Debug, Serialize)]
pub struct SplitStats {
    pub split: Split,
    /// Number of image files.
    pub images: usize,
    /// Number of label files.
    pub label_files: usize,
    /// Detections per class.
    pub class_counts: ClassCountMap,
}

/// The result of computing dataset statistics.
#[derive(Clone, Debug, Serialize)]
pub struct StatsReport {
    /// Name of the dataset (root directory name).
    pub dataset_name: String,
    /// Class names from the manifest, in index order.
    pub classes: Vec<String>,
    /// Per-split counts, in train/valid/test order.
    pub splits: Vec<SplitStats>,
    /// Class counts summed over all splits.
    pub totals: ClassCountMap,
    /// Display-only option for histogram rendering width.
    #[serde(skip)]
    pub(crate) bar_width: usize,
}

impl StatsReport {
    /// Total number of images over all splits.
    pub fn total_images(&self) -> usize {
        self.splits.iter().map(|s| s.images).sum()
    }

    /// Stats for one split, if present.
    pub fn split(&self, split: Split) -> Option<&SplitStats> {
        self.splits.iter().find(|s| s.split == split)
    }
}

impl fmt::Display for StatsReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Dataset Name: {}", self.dataset_name)?;
        writeln!(f, "Classes: {}", self.classes.join(", "))?;
        writeln!(f)?;

        self.fmt_images(f)?;

        for split in &self.splits {
            writeln!(f)?;
            fmt_class_counts(
                f,
                &format!("{} Set", split.split.title()),
                &split.class_counts,
                self.bar_width,
            )?;
        }

        writeln!(f)?;
        fmt_class_counts(f, "Total Classes Count", &self.totals, self.bar_width)
    }
}

impl StatsReport {
    fn fmt_images(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let total = self.total_images();

        section_header(f, "Images")?;
        writeln!(f, "│ Total Images:    {:>10}", format_number(total))?;
        for split in &self.splits {
            writeln!(
                f,
                "│ {:<16} {:>10}  {:>6.2}%",
                format!("{} Images:", split.split.title()),
                format_number(split.images),
                percentage(split.images, total)
            )?;
        }
        section_footer(f)
    }
}

fn fmt_class_counts(
    f: &mut fmt::Formatter<'_>,
    title: &str,
    counts: &ClassCountMap,
    bar_width: usize,
) -> fmt::Result {
    let total = counts.total();
    let max_count = counts.iter().map(|c| c.count).max().unwrap_or(0);
    let name_width = counts
        .iter()
        .map(|c| c.class.chars().count())
        .max()
        .unwrap_or(0)
        .max(5);

    section_header(f, title)?;
    writeln!(f, "│ Total Class Count: {}", format_number(total))?;

    if counts.is_empty() {
        writeln!(f, "│ (no classes)")?;
    }

    for entry in counts.iter() {
        writeln!(
            f,
            "│ {:<name_width$}  {:>10}  {:>6.2}%  {}",
            entry.class,
            format_number(entry.count),
            percentage(entry.count, total),
            bar(entry.count, max_count, bar_width),
        )?;
    }

    section_footer(f)
}

fn section_header(f: &mut fmt::Formatter<'_>, title: &str) -> fmt::Result {
    writeln!(
        f,
        "┌─ {} {}",
        title,
        "─".repeat(57usize.saturating_sub(title.chars().count()))
    )
}

fn section_footer(f: &mut fmt::Formatter<'_>) -> fmt::Result {
    writeln!(f, "└{}", "─".repeat(60))
}

/// Proportional bar for a histogram row.
fn bar(count: usize, max_count: usize, width: usize) -> String {
    if max_count == 0 || width == 0 {
        return String::new();
    }
    let filled = ((count as f64 / max_count as f64) * width as f64).round() as usize;
    let filled = if count > 0 { filled.max(1) } else { 0 };
    "█".repeat(filled)
}

/// Format a number with thousands separators.
fn format_number(n: usize) -> String {
    let s = n.to_string();
    let mut result = String::new();
    for (i, c) in s.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.push(',');
        }
        result.push(c);
    }
    result.chars().rev().collect()
}
