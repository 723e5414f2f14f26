//! Normalized center/size boxes to pixel-space rectangles.

use serde::Serialize;

use crate::label::Detection;

/// Axis-aligned rectangle in pixels, anchored at its top-left corner.
///
/// Coordinates are not clamped to the image and may be negative.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct PixelRect {
    pub x: i64,
    pub y: i64,
    pub width: i64,
    pub height: i64,
}

impl PixelRect {
    pub fn new(x: i64, y: i64, width: i64, height: i64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Right edge (`x + width`), saturating at the `i64` range.
    #[inline]
    pub fn right(&self) -> i64 {
        self.x.saturating_add(self.width)
    }

    /// Bottom edge (`y + height`), saturating at the `i64` range.
    #[inline]
    pub fn bottom(&self) -> i64 {
        self.y.saturating_add(self.height)
    }

    /// Inverse of [`to_pixel_rect`]: normalized `(center_x, center_y, width, height)`.
    ///
    /// The center is taken as `x + floor(width / 2)`, matching the forward
    /// transform, so feeding the result back reproduces this rectangle.
    pub fn to_normalized(&self, image_width: u32, image_height: u32) -> (f64, f64, f64, f64) {
        let (center_x, width) = unproject_axis(self.x, self.width, image_width);
        let (center_y, height) = unproject_axis(self.y, self.height, image_height);
        (center_x, center_y, width, height)
    }
}

/// Place a detection on an image of the given size.
///
/// Center and size are rounded half-to-even to whole pixels, then the
/// top-left corner is `center - floor(size / 2)`. For a 100x100 image, a
/// box centered at 0.5 with size 0.2 lands at (40, 40) with size 20x20.
pub fn to_pixel_rect(detection: &Detection, image_width: u32, image_height: u32) -> PixelRect {
    let (x, width) = project_axis(detection.center_x, detection.width, image_width);
    let (y, height) = project_axis(detection.center_y, detection.height, image_height);
    PixelRect {
        x,
        y,
        width,
        height,
    }
}

// Huge and non-finite inputs saturate through the float-to-int cast (NaN
// becomes 0), so the corner arithmetic saturates too.
fn project_axis(center: f64, extent: f64, image_extent: u32) -> (i64, i64) {
    let scale = f64::from(image_extent);
    let pixel_center = (center * scale).round_ties_even() as i64;
    let pixel_extent = (extent * scale).round_ties_even() as i64;
    (
        pixel_center.saturating_sub(pixel_extent.div_euclid(2)),
        pixel_extent,
    )
}

fn unproject_axis(start: i64, extent: i64, image_extent: u32) -> (f64, f64) {
    if image_extent == 0 {
        return (0.0, 0.0);
    }
    let scale = f64::from(image_extent);
    let pixel_center = start.saturating_add(extent.div_euclid(2));
    (pixel_center as f64 / scale, extent as f64 / scale)
}
