use image::RgbaImage;
use tracing::debug;

use crate::normalize::luminance;
use super::choice::Polarity;

/// Corner samples on a 28×28 raster, inset 1px from each edge.
pub const CORNER_SAMPLES: [(u32, u32); 4] = [(1, 1), (26, 1), (1, 26), (26, 26)];

/// Average luminance above which the background counts as light.
pub const LIGHT_BACKGROUND_THRESHOLD: f64 = 128.0;

/// Guesses the digit polarity from the background brightness at the
/// four corners. Assumes the digit does not reach the corners.
pub fn detect(raster: &RgbaImage) -> Polarity {
    let (w, h) = raster.dimensions();
    let samples: Vec<f64> = CORNER_SAMPLES
        .iter()
        .map(|&(x, y)| {
            let p = raster.get_pixel(x.min(w.saturating_sub(1)), y.min(h.saturating_sub(1)));
            luminance(p[0], p[1], p[2])
        })
        .collect();
    let avg = samples.iter().sum::<f64>() / samples.len() as f64;

    let polarity = if avg > LIGHT_BACKGROUND_THRESHOLD {
        Polarity::DarkOnLight
    } else {
        Polarity::LightOnDark
    };
    debug!(avg, ?polarity, "corner polarity");
    polarity
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    #[test]
    fn white_corners_mean_dark_digit() {
        let raster = RgbaImage::from_pixel(28, 28, Rgba([255, 255, 255, 255]));
        assert_eq!(detect(&raster), Polarity::DarkOnLight);
    }

    #[test]
    fn black_corners_mean_light_digit() {
        let raster = RgbaImage::from_pixel(28, 28, Rgba([0, 0, 0, 255]));
        assert_eq!(detect(&raster), Polarity::LightOnDark);
    }

    #[test]
    fn only_corners_are_sampled() {
        let mut raster = RgbaImage::from_pixel(28, 28, Rgba([255, 255, 255, 255]));
        for &(x, y) in &CORNER_SAMPLES {
            raster.put_pixel(x, y, Rgba([0, 0, 0, 255]));
        }
        assert_eq!(detect(&raster), Polarity::LightOnDark);
    }

    #[test]
    fn just_below_midgray_is_dark() {
        let raster = RgbaImage::from_pixel(28, 28, Rgba([127, 127, 127, 255]));
        assert_eq!(detect(&raster), Polarity::LightOnDark);
    }

    #[test]
    fn two_bright_corners_tip_the_average() {
        let mut raster = RgbaImage::from_pixel(28, 28, Rgba([0, 0, 0, 255]));
        raster.put_pixel(1, 1, Rgba([255, 255, 255, 255]));
        raster.put_pixel(26, 1, Rgba([255, 255, 255, 255]));
        raster.put_pixel(1, 26, Rgba([40, 40, 40, 255]));
        assert_eq!(detect(&raster), Polarity::DarkOnLight);
    }
}
