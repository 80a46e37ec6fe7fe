use crate::error::ShapeError;
use image::{Rgba, RgbImage, RgbaImage};
use ndarray::{Array2, Array3, ArrayView3};

/// Fixed scale between normalized floats and 8-bit samples
pub const SAMPLE_SCALE: f32 = 255.0;

/// Normalized float sample -> 8-bit sample
///
/// Clips before the cast so out-of-range input saturates instead of
/// wrapping; the cast itself truncates.
pub fn quantize(sample: f32) -> u8 {
    (sample * SAMPLE_SCALE).clamp(0.0, SAMPLE_SCALE) as u8
}

/// 8-bit sample -> normalized float sample
pub fn normalize(sample: u8) -> f32 {
    sample as f32 / SAMPLE_SCALE
}

/// Convert a `[height, width, channel]` float image into an 8-bit RGBA
/// buffer with full opacity. Only the R, G and B channels are read.
pub fn image_to_rgba8(image: ArrayView3<f32>) -> Result<RgbaImage, ShapeError> {
    let (height, width, channels) = image.dim();
    if channels < 3 {
        return Err(ShapeError::UnsupportedChannels(channels));
    }

    let too_large = || ShapeError::TooLarge { height, width };
    let w = u32::try_from(width).map_err(|_| too_large())?;
    let h = u32::try_from(height).map_err(|_| too_large())?;

    Ok(RgbaImage::from_fn(w, h, |x, y| {
        let (x, y) = (x as usize, y as usize);
        Rgba([
            quantize(image[[y, x, 0]]),
            quantize(image[[y, x, 1]]),
            quantize(image[[y, x, 2]]),
            u8::MAX,
        ])
    }))
}

/// Convert an 8-bit RGBA image back to a normalized `[height, width, 4]` array
pub fn rgba_to_array(image: &RgbaImage) -> Result<Array3<f32>, ShapeError> {
    samples_to_array(image.as_raw(), image.dimensions(), 4)
}

/// Convert an 8-bit RGB image back to a normalized `[height, width, 3]` array
pub fn rgb_to_array(image: &RgbImage) -> Result<Array3<f32>, ShapeError> {
    samples_to_array(image.as_raw(), image.dimensions(), 3)
}

fn samples_to_array(raw: &[u8], (width, height): (u32, u32), channels: usize) -> Result<Array3<f32>, ShapeError> {
    let samples: Vec<f32> = raw.iter().copied().map(normalize).collect();
    Ok(Array3::from_shape_vec((height as usize, width as usize, channels), samples)?)
}

/// Derive an inverted opacity mask from an RGBA image's alpha channel:
/// opaque (foreground) pixels become 0.0, transparent pixels become 1.0
pub fn alpha_to_mask(image: &RgbaImage) -> Array2<f32> {
    let (width, height) = image.dimensions();
    Array2::from_shape_fn((height as usize, width as usize), |(y, x)| {
        1.0 - normalize(image.get_pixel(x as u32, y as u32)[3])
    })
}
