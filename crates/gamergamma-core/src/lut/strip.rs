//! Image strip 1D LUT reader.
//!
//! The longer image dimension is the sample axis; samples are read along it
//! at cross-coordinate 0. A square image is read down its first column.

use std::path::Path;

use image::RgbImage;

use crate::lut::{LutResult, LutSamples};

/// Whether `path` has an extension the `image` crate decodes.
pub fn is_image_path(path: &Path) -> bool {
    image::ImageFormat::from_path(path).is_ok()
}

/// Extract samples from a decoded strip.
pub fn samples_from_strip(img: &RgbImage) -> LutSamples {
    let (width, height) = img.dimensions();
    let horizontal = width > height;
    let steps = width.max(height);

    let mut samples = LutSamples::default();
    for i in 0..steps {
        let pixel = if horizontal {
            img.get_pixel(i, 0)
        } else {
            img.get_pixel(0, i)
        };
        samples.push(pixel.0.map(|c| f64::from(c) / 255.0));
    }
    samples
}

/// Decode an image file and read it as a strip.
pub fn read_strip(path: &Path) -> LutResult<LutSamples> {
    let img = image::open(path)?.to_rgb8();
    Ok(samples_from_strip(&img))
}
