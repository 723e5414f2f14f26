//! Normalized bounding-box label files.
//!
//! Each non-blank line holds one detection:
//!
//! ```text
//! <class_index> <center_x> <center_y> <width> <height>
//! ```
//!
//! The four geometric values are fractions of the image width/height. They
//! are carried through as-is, even when they fall outside `[0, 1]`.

use std::fs;
use std::path::Path;

use serde::Serialize;

use crate::dataset::ClassList;
use crate::error::LabelscopeError;

/// One labeled bounding box in normalized image coordinates.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Detection {
    pub class_index: usize,
    pub class_name: String,
    pub center_x: f64,
    pub center_y: f64,
    pub width: f64,
    pub height: f64,
}

/// Read a label file into detections, in line order.
pub fn parse_label_file(path: &Path, classes: &ClassList) -> Result<Vec<Detection>, LabelscopeError> {
    let content = fs::read_to_string(path).map_err(LabelscopeError::Io)?;
    parse_label_str(&content, path, classes)
}

/// Parse label file content. `path` is only used for error reporting.
pub fn parse_label_str(
    content: &str,
    path: &Path,
    classes: &ClassList,
) -> Result<Vec<Detection>, LabelscopeError> {
    let mut detections = Vec::new();
    for (line_idx, line) in content.lines().enumerate() {
        if let Some(detection) = parse_label_line(line, path, line_idx + 1, classes)? {
            detections.push(detection);
        }
    }
    Ok(detections)
}

fn parse_label_line(
    line: &str,
    path: &Path,
    line_num: usize,
    classes: &ClassList,
) -> Result<Option<Detection>, LabelscopeError> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }

    let malformed = |message: String| LabelscopeError::MalformedLabelLine {
        path: path.to_path_buf(),
        line: line_num,
        content: trimmed.to_string(),
        message,
    };

    // Take at most 6 tokens so pathological inputs do not allocate unbounded memory.
    let tokens: Vec<&str> = trimmed.split_whitespace().take(6).collect();
    if tokens.len() != 5 {
        let found = if tokens.len() > 5 {
            "more than 5".to_string()
        } else {
            tokens.len().to_string()
        };
        return Err(malformed(format!("expected 5 fields, found {found}")));
    }

    let raw_index = tokens[0].parse::<i64>().map_err(|_| {
        malformed(format!(
            "invalid class index '{}'; expected an integer",
            tokens[0]
        ))
    })?;

    let class_index = usize::try_from(raw_index)
        .ok()
        .filter(|index| *index < classes.len())
        .ok_or_else(|| LabelscopeError::ClassIndexOutOfRange {
            index: raw_index,
            class_count: classes.len(),
            context: format!("{}:{}: '{}'", path.display(), line_num, trimmed),
        })?;

    let parse_field = |raw: &str, field_name: &str| {
        raw.parse::<f64>().map_err(|_| {
            malformed(format!(
                "invalid {field_name} '{raw}'; expected a number"
            ))
        })
    };

    let center_x = parse_field(tokens[1], "center_x")?;
    let center_y = parse_field(tokens[2], "center_y")?;
    let width = parse_field(tokens[3], "width")?;
    let height = parse_field(tokens[4], "height")?;

    let class_name = classes
        .get(class_index)
        .map(str::to_string)
        .unwrap_or_default();

    Ok(Some(Detection {
        class_index,
        class_name,
        center_x,
        center_y,
        width,
        height,
    }))
}

/// Fuzz-only entrypoint for single-line label parsing.
#[cfg(feature = "fuzzing")]
pub fn fuzz_parse_label_line(input: &str) -> Result<(), LabelscopeError> {
    let classes = ClassList::new(["class_0", "class_1", "class_2"]);
    let _ = parse_label_line(input, Path::new("<fuzz>"), 1, &classes)?;
    Ok(())
}
