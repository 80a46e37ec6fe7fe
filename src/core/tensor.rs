use crate::error::ShapeError;
use ndarray::{Array3, Array4, ArrayView2, ArrayView3, Axis};
use std::sync::Arc;

/// Batch of normalized float images laid out as `[batch, height, width, channel]`
///
/// Channels are R,G,B with an optional trailing alpha, values in `[0.0, 1.0]`.
/// The array is shared, so cloning a batch to hand it to another node is cheap
/// and never copies pixels.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageBatch(Arc<Array4<f32>>);

impl ImageBatch {
    pub fn from_array(array: Array4<f32>) -> Result<Self, ShapeError> {
        let channels = array.dim().3;
        if channels != 3 && channels != 4 {
            return Err(ShapeError::UnsupportedChannels(channels));
        }
        Ok(Self(Arc::new(array)))
    }

    /// Stack single `[height, width, channel]` images into one batch
    pub fn from_images(images: Vec<Array3<f32>>) -> Result<Self, ShapeError> {
        let first = images.first().ok_or(ShapeError::EmptyBatch)?;
        let expected = first.dim();

        for (index, image) in images.iter().enumerate().skip(1) {
            if image.dim() != expected {
                return Err(ShapeError::MismatchedImage {
                    index,
                    expected,
                    found: image.dim(),
                });
            }
        }

        let views: Vec<ArrayView3<f32>> = images.iter().map(|image| image.view()).collect();
        let stacked = ndarray::stack(Axis(0), &views)?;
        Self::from_array(stacked)
    }

    /// Number of images in the batch
    pub fn len(&self) -> usize {
        self.0.dim().0
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn height(&self) -> usize {
        self.0.dim().1
    }

    pub fn width(&self) -> usize {
        self.0.dim().2
    }

    pub fn channels(&self) -> usize {
        self.0.dim().3
    }

    pub fn has_alpha(&self) -> bool {
        self.channels() == 4
    }

    /// View of the image at `index`, if the batch has one
    pub fn image(&self, index: usize) -> Option<ArrayView3<'_, f32>> {
        (index < self.len()).then(|| self.0.index_axis(Axis(0), index))
    }

    pub fn as_array(&self) -> &Array4<f32> {
        &self.0
    }
}

/// Batch of opacity masks laid out as `[batch, height, width]`
///
/// 1.0 marks background (removed) pixels, 0.0 marks foreground (kept) pixels.
#[derive(Debug, Clone, PartialEq)]
pub struct MaskBatch(Arc<Array3<f32>>);

impl MaskBatch {
    pub fn from_array(array: Array3<f32>) -> Self {
        Self(Arc::new(array))
    }

    /// All-zero ("nothing masked") batch of the given size
    pub fn zeros(batch: usize, height: usize, width: usize) -> Self {
        Self::from_array(Array3::zeros((batch, height, width)))
    }

    pub fn len(&self) -> usize {
        self.0.dim().0
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn height(&self) -> usize {
        self.0.dim().1
    }

    pub fn width(&self) -> usize {
        self.0.dim().2
    }

    pub fn mask(&self, index: usize) -> Option<ArrayView2<'_, f32>> {
        (index < self.len()).then(|| self.0.index_axis(Axis(0), index))
    }

    pub fn as_array(&self) -> &Array3<f32> {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_images_stacks_along_batch_axis() {
        let a = Array3::from_elem((2, 3, 3), 0.25f32);
        let b = Array3::from_elem((2, 3, 3), 0.75f32);

        let batch = ImageBatch::from_images(vec![a, b]).unwrap();

        assert_eq!(batch.len(), 2);
        assert_eq!((batch.height(), batch.width(), batch.channels()), (2, 3, 3));
        assert_eq!(batch.image(1).unwrap()[[1, 2, 0]], 0.75);
        assert!(batch.image(2).is_none());
    }

    #[test]
    fn test_from_images_rejects_mismatched_sizes() {
        let a = Array3::<f32>::zeros((4, 4, 3));
        let b = Array3::<f32>::zeros((4, 5, 3));

        let err = ImageBatch::from_images(vec![a, b]).unwrap_err();
        assert_eq!(
            err,
            ShapeError::MismatchedImage {
                index: 1,
                expected: (4, 4, 3),
                found: (4, 5, 3),
            }
        );
    }

    #[test]
    fn test_from_images_rejects_empty_input() {
        assert_eq!(ImageBatch::from_images(Vec::new()).unwrap_err(), ShapeError::EmptyBatch);
    }

    #[test]
    fn test_channel_count_validation() {
        assert!(ImageBatch::from_array(Array4::zeros((1, 2, 2, 4))).unwrap().has_alpha());
        assert_eq!(
            ImageBatch::from_array(Array4::zeros((1, 2, 2, 1))).unwrap_err(),
            ShapeError::UnsupportedChannels(1)
        );
    }

    #[test]
    fn test_mask_zeros() {
        let mask = MaskBatch::zeros(1, 64, 64);
        assert_eq!((mask.len(), mask.height(), mask.width()), (1, 64, 64));
        assert!(mask.as_array().iter().all(|&v| v == 0.0));
    }
}
