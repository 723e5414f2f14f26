//! Drawing surface used by the renderer.
//!
//! The renderer only needs two primitives: a rectangle outline and a line
//! of text. [`Canvas`] is implemented for [`RgbImage`] on top of
//! `imageproc`'s drawing routines; anything falling outside the image is
//! clipped.

use ab_glyph::FontRef;
use image::{Rgb, RgbImage};
use imageproc::drawing::{draw_hollow_rect_mut, draw_text_mut, text_size};
use imageproc::rect::Rect;
use log::warn;

use super::transform::PixelRect;

/// Pixel height of class-name text.
pub const TEXT_HEIGHT: f32 = 14.0;

const LABEL_FONT: &[u8] = include_bytes!("../../assets/fonts/DejaVuSans.ttf");

/// A surface the renderer can draw boxes and labels onto.
pub trait Canvas {
    /// Width and height in pixels.
    fn dimensions(&self) -> (u32, u32);

    /// Outline from `(x, y)` to `(x + width, y + height)`, both corners
    /// inclusive. Extra line width grows inwards.
    fn draw_rect_outline(&mut self, rect: PixelRect, color: Rgb<u8>, line_width: u32);

    /// Text with its top-left corner at `(x, y)`.
    fn draw_text(&mut self, x: i64, y: i64, text: &str, color: Rgb<u8>);
}

impl Canvas for RgbImage {
    fn dimensions(&self) -> (u32, u32) {
        RgbImage::dimensions(self)
    }

    fn draw_rect_outline(&mut self, rect: PixelRect, color: Rgb<u8>, line_width: u32) {
        let (width, height) = RgbImage::dimensions(self);
        let left = rect.x.min(rect.right());
        let right = rect.x.max(rect.right());
        let top = rect.y.min(rect.bottom());
        let bottom = rect.y.max(rect.bottom());

        for inset in 0..i64::from(line_width.max(1)) {
            let (l, r) = (left.saturating_add(inset), right.saturating_sub(inset));
            let (t, b) = (top.saturating_add(inset), bottom.saturating_sub(inset));
            if l > r || t > b {
                break;
            }

            if let Some(outline) = visible_outline(l, t, r, b, width, height) {
                draw_hollow_rect_mut(self, outline, color);
            }
        }
    }

    fn draw_text(&mut self, x: i64, y: i64, text: &str, color: Rgb<u8>) {
        let font = match FontRef::try_from_slice(LABEL_FONT) {
            Ok(font) => font,
            Err(err) => {
                warn!("label font could not be loaded, skipping text: {err}");
                return;
            }
        };

        let (width, height) = RgbImage::dimensions(self);
        let (text_width, text_height) = text_size(TEXT_HEIGHT, &font, text);
        let visible_x = x < i64::from(width) && x.saturating_add(i64::from(text_width)) > 0;
        let visible_y = y < i64::from(height) && y.saturating_add(i64::from(text_height)) > 0;
        if !visible_x || !visible_y {
            return;
        }

        let (Ok(x), Ok(y)) = (i32::try_from(x), i32::try_from(y)) else {
            return;
        };
        draw_text_mut(self, color, x, y, TEXT_HEIGHT, &font, text);
    }
}

// Edges beyond the image are pulled in to one pixel outside it. The visible
// part of the outline is unchanged and the coordinates fit in an `i32`.
fn visible_outline(
    left: i64,
    top: i64,
    right: i64,
    bottom: i64,
    width: u32,
    height: u32,
) -> Option<Rect> {
    let (width, height) = (i64::from(width), i64::from(height));
    if right < 0 || bottom < 0 || left >= width || top >= height {
        return None;
    }

    let (l, r) = (left.clamp(-1, width), right.clamp(-1, width));
    let (t, b) = (top.clamp(-1, height), bottom.clamp(-1, height));

    let rect = Rect::at(i32::try_from(l).ok()?, i32::try_from(t).ok()?)
        .of_size(u32::try_from(r - l + 1).ok()?, u32::try_from(b - t + 1).ok()?);
    Some(rect)
}
