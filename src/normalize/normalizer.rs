use image::codecs::png::PngEncoder;
use image::imageops::{self, FilterType};
use image::{ColorType, ImageEncoder, Rgba, RgbaImage};
use tracing::debug;

use crate::error::SubmitError;
use super::contrast::apply_grayscale_contrast;
use super::placement::{placement, Placement, CANVAS_SIZE};

/// Output of the normalizer for one submission.
#[derive(Debug, Clone)]
pub struct Normalized {
    /// 28×28 opaque grayscale raster (R = G = B for every pixel).
    pub raster: RgbaImage,
    /// The same raster encoded as PNG.
    pub png: Vec<u8>,
    pub placement: Placement,
}

const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);

/// Decodes an uploaded image and turns it into an MNIST-style 28×28 digit:
/// scaled to fit 20×20, centered on white, grayscale, contrast-stretched.
pub fn normalize(bytes: &[u8]) -> Result<Normalized, SubmitError> {
    let decoded = image::load_from_memory(bytes)
        .map_err(|e| SubmitError::Decode(e.to_string()))?
        .to_rgba8();

    let (width, height) = decoded.dimensions();
    if width == 0 || height == 0 {
        return Err(SubmitError::Decode(format!("empty image {}x{}", width, height)));
    }

    // Flatten onto white before resampling so transparent texels cannot
    // bleed their (usually black) color into stroke edges.
    let mut source = RgbaImage::from_pixel(width, height, WHITE);
    imageops::overlay(&mut source, &decoded, 0, 0);
    drop(decoded);

    let placement = placement(width, height);
    let scaled = imageops::resize(&source, placement.draw_w, placement.draw_h, FilterType::CatmullRom);
    drop(source);

    let mut raster = RgbaImage::from_pixel(CANVAS_SIZE, CANVAS_SIZE, WHITE);
    imageops::overlay(&mut raster, &scaled, placement.dx.into(), placement.dy.into());
    apply_grayscale_contrast(&mut raster);

    let png = encode_png(&raster)?;
    debug!(width, height, ?placement, png_bytes = png.len(), "normalized digit");

    Ok(Normalized { raster, png, placement })
}

/// Encodes a raster losslessly as PNG.
pub fn encode_png(raster: &RgbaImage) -> Result<Vec<u8>, SubmitError> {
    let mut buf = Vec::new();
    PngEncoder::new(&mut buf)
        .write_image(raster.as_raw(), raster.width(), raster.height(), ColorType::Rgba8)
        .map_err(|e| SubmitError::Encode(e.to_string()))?;
    Ok(buf)
}
