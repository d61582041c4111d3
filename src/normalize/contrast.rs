use image::{Rgba, RgbaImage};

/// Contrast stretch pivot.
pub const MIDPOINT: f64 = 128.0;
/// Contrast stretch gain.
pub const CONTRAST: f64 = 1.25;

/// Rec. 709 relative luminance on the 0–255 scale.
pub fn luminance(r: u8, g: u8, b: u8) -> f64 {
    0.2126 * r as f64 + 0.7152 * g as f64 + 0.0722 * b as f64
}

/// Linear stretch around the midpoint, clamped to the channel range.
pub fn stretch_contrast(y: f64) -> f64 {
    ((y - MIDPOINT) * CONTRAST + MIDPOINT).clamp(0.0, 255.0)
}

/// Rewrites every pixel as contrast-stretched gray with full opacity.
pub fn apply_grayscale_contrast(raster: &mut RgbaImage) {
    for pixel in raster.pixels_mut() {
        let [r, g, b, _] = pixel.0;
        let y = stretch_contrast(luminance(r, g, b)).round() as u8;
        *pixel = Rgba([y, y, y, 255]);
    }
}
