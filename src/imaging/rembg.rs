//! Background removal: normalized float image batch in, foreground image and
//! inverted opacity mask out, with the matting itself delegated to a
//! [`MattingBackend`].

use super::convert::{alpha_to_mask, image_to_rgba8, rgb_to_array, rgba_to_array};
use crate::core::{ImageBatch, MaskBatch};
use crate::error::ShapeError;
use crate::matting::MattingBackend;
use anyhow::{Context, Result};
use ndarray::Axis;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Size of the all-zero mask returned when matting yields no alpha channel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum FallbackMask {
    /// Fixed grid regardless of the input resolution
    Fixed { width: usize, height: usize },

    /// Same height and width as the input image
    MatchInput,
}

impl Default for FallbackMask {
    fn default() -> Self {
        FallbackMask::Fixed {
            width: 64,
            height: 64,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RemBgOptions {
    /// Ask the matting routine to refine the raw matte edges
    pub post_process_mask: bool,
    pub fallback_mask: FallbackMask,
}

impl Default for RemBgOptions {
    fn default() -> Self {
        Self {
            post_process_mask: true,
            fallback_mask: FallbackMask::default(),
        }
    }
}

/// Remove the background from the first image of `batch`.
///
/// Returns a single-image batch holding the matting result and a
/// single-mask batch where 1.0 marks removed pixels. Images after index 0
/// do not take part.
pub fn remove_background(
    batch: &ImageBatch,
    matting: &dyn MattingBackend,
    options: &RemBgOptions,
) -> Result<(ImageBatch, MaskBatch)> {
    let first = batch.image(0).ok_or(ShapeError::EmptyBatch)?;
    if batch.len() > 1 {
        debug!(ignored = batch.len() - 1, "background removal only reads the first image of the batch");
    }

    let (height, width, _) = first.dim();
    let rgba = image_to_rgba8(first)?;

    let matted = matting
        .remove(rgba, options.post_process_mask)
        .with_context(|| format!("matting backend '{}' failed", matting.name()))?;

    let (image, mask) = if matted.color().has_alpha() {
        let rgba = matted.into_rgba8();
        let mask = MaskBatch::from_array(alpha_to_mask(&rgba).insert_axis(Axis(0)));
        (rgba_to_array(&rgba)?, mask)
    } else {
        let (mask_height, mask_width) = match options.fallback_mask {
            FallbackMask::Fixed { width, height } => (height, width),
            FallbackMask::MatchInput => (height, width),
        };
        debug!(
            backend = matting.name(),
            mask_height, mask_width, "matting result has no alpha channel, returning empty mask"
        );
        (rgb_to_array(&matted.into_rgb8())?, MaskBatch::zeros(1, mask_height, mask_width))
    };
    let image = ImageBatch::from_array(image.insert_axis(Axis(0)))?;

    Ok((image, mask))
}
