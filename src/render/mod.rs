//! Bounding-box overlays for visual inspection.
//!
//! Detections are placed with [`to_pixel_rect`] and drawn onto a
//! [`Canvas`]. Drawing mutates the canvas in place.

mod canvas;
mod palette;
mod transform;

pub use canvas::{Canvas, TEXT_HEIGHT};
pub use palette::{class_color, PALETTE, TEXT_COLOR};
pub use transform::{to_pixel_rect, PixelRect};

use std::path::Path;

use log::{debug, info};

use crate::dataset::ClassList;
use crate::error::LabelscopeError;
use crate::label::{parse_label_file, Detection};

/// Offset of the class-name text from the box's top-left corner.
const TEXT_OFFSET: i64 = 3;

/// Options for overlay rendering.
#[derive(Clone, Debug)]
pub struct RenderOptions {
    /// Draw the class name inside each box.
    pub draw_labels: bool,
    /// Box outline width in pixels.
    pub line_width: u32,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            draw_labels: true,
            line_width: 1,
        }
    }
}

/// Draw every detection onto `canvas`.
///
/// Class indices are checked against `classes` before anything is drawn,
/// so a failing call leaves the canvas untouched.
pub fn render_detections<C: Canvas + ?Sized>(
    canvas: &mut C,
    detections: &[Detection],
    classes: &ClassList,
    opts: &RenderOptions,
) -> Result<(), LabelscopeError> {
    let mut labels = Vec::with_capacity(detections.len());
    for (position, detection) in detections.iter().enumerate() {
        let name = classes.get(detection.class_index).ok_or_else(|| {
            LabelscopeError::ClassIndexOutOfRange {
                index: i64::try_from(detection.class_index).unwrap_or(i64::MAX),
                class_count: classes.len(),
                context: format!("detection {}", position + 1),
            }
        })?;
        labels.push(name);
    }

    let (width, height) = canvas.dimensions();
    for (detection, label) in detections.iter().zip(labels) {
        let rect = to_pixel_rect(detection, width, height);
        debug!("{} at {:?}", label, rect);

        canvas.draw_rect_outline(rect, class_color(detection.class_index), opts.line_width);
        if opts.draw_labels {
            canvas.draw_text(
                rect.x.saturating_add(TEXT_OFFSET),
                rect.y.saturating_add(TEXT_OFFSET),
                label,
                TEXT_COLOR,
            );
        }
    }

    Ok(())
}

/// Annotate the image at `image_path` with the boxes in `label_path` and
/// write the result to `output_path`.
///
/// The output format follows the output file extension. Returns the
/// number of boxes drawn.
pub fn annotate_image(
    image_path: &Path,
    label_path: &Path,
    classes: &ClassList,
    output_path: &Path,
    opts: &RenderOptions,
) -> Result<usize, LabelscopeError> {
    let mut image = image::open(image_path)
        .map_err(|source| LabelscopeError::ImageRead {
            path: image_path.to_path_buf(),
            source,
        })?
        .to_rgb8();

    let detections = parse_label_file(label_path, classes)?;
    render_detections(&mut image, &detections, classes, opts)?;

    image
        .save(output_path)
        .map_err(|source| LabelscopeError::ImageWrite {
            path: output_path.to_path_buf(),
            source,
        })?;

    info!(
        "drew {} box(es) on {} -> {}",
        detections.len(),
        image_path.display(),
        output_path.display()
    );
    Ok(detections.len())
}
