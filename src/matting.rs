//! Interface to the external foreground/background matting routine.
//!
//! The routine itself is opaque. It takes an 8-bit RGBA buffer plus a
//! "refine mask" flag and returns an 8-bit image of the same size whose alpha
//! channel separates foreground (255) from background (0).

use anyhow::Result;
use image::{DynamicImage, RgbaImage};

pub trait MattingBackend: Send + Sync {
    /// Short identifier used in logs
    fn name(&self) -> &str;

    /// Run matting on `image`. `post_process_mask` asks the routine to
    /// smooth the raw matte edges before returning.
    ///
    /// A result without an alpha channel means nothing was segmented.
    fn remove(&self, image: RgbaImage, post_process_mask: bool) -> Result<DynamicImage>;
}

/// Adapts a plain function or closure into a [`MattingBackend`]
pub struct FnMatting<F> {
    name: String,
    func: F,
}

impl<F> FnMatting<F>
where
    F: Fn(RgbaImage, bool) -> Result<DynamicImage> + Send + Sync,
{
    pub fn new(name: impl Into<String>, func: F) -> Self {
        Self {
            name: name.into(),
            func,
        }
    }
}

impl<F> MattingBackend for FnMatting<F>
where
    F: Fn(RgbaImage, bool) -> Result<DynamicImage> + Send + Sync,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn remove(&self, image: RgbaImage, post_process_mask: bool) -> Result<DynamicImage> {
        (self.func)(image, post_process_mask)
    }
}

/// Returns its input untouched: every pixel stays fully opaque foreground
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityMatting;

impl MattingBackend for IdentityMatting {
    fn name(&self) -> &str {
        "identity"
    }

    fn remove(&self, image: RgbaImage, _post_process_mask: bool) -> Result<DynamicImage> {
        Ok(DynamicImage::ImageRgba8(image))
    }
}
