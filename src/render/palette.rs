//! Box colors by class index.

use image::Rgb;

/// Outline colors, assigned by class index.
pub const PALETTE: [Rgb<u8>; 10] = [
    Rgb([0, 0, 128]),     // navy
    Rgb([255, 255, 0]),   // yellow
    Rgb([255, 0, 0]),     // red
    Rgb([0, 255, 0]),     // lime
    Rgb([255, 255, 255]), // white
    Rgb([255, 165, 0]),   // orange
    Rgb([128, 0, 128]),   // purple
    Rgb([128, 128, 128]), // gray
    Rgb([0, 255, 255]),   // cyan
    Rgb([128, 128, 0]),   // olive
];

/// Color used for class-name text.
pub const TEXT_COLOR: Rgb<u8> = Rgb([0, 0, 0]);

/// Outline color for a class. Indices past the palette wrap around.
pub fn class_color(class_index: usize) -> Rgb<u8> {
    PALETTE[class_index % PALETTE.len()]
}
