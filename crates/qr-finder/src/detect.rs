//! End-to-end helpers working from `image::GrayImage` buffers.

use qr_finder_core::{GrayImage, GrayImageView};

use crate::detector::PositionPatternDetector;
use crate::source::SquareSource;

/// Errors produced by the image-level helpers.
#[derive(thiserror::Error, Debug)]
pub enum DetectError {
    #[error("invalid grayscale image buffer length (expected {expected} bytes, got {got})")]
    InvalidGrayBuffer { expected: usize, got: usize },

    #[error("invalid grayscale image dimensions (width={width}, height={height})")]
    InvalidGrayDimensions { width: u32, height: u32 },
}

/// Convert an `image::GrayImage` into the lightweight view type.
pub fn gray_view(img: &::image::GrayImage) -> GrayImageView<'_> {
    GrayImageView {
        width: img.width() as usize,
        height: img.height() as usize,
        data: img.as_raw(),
    }
}

/// Build an `image::GrayImage` from a raw grayscale buffer.
pub fn gray_image_from_slice(
    width: u32,
    height: u32,
    pixels: &[u8],
) -> Result<::image::GrayImage, DetectError> {
    let w = usize::try_from(width).ok();
    let h = usize::try_from(height).ok();
    let Some((w, h)) = w.zip(h) else {
        return Err(DetectError::InvalidGrayDimensions { width, height });
    };
    let Some(expected) = w.checked_mul(h) else {
        return Err(DetectError::InvalidGrayDimensions { width, height });
    };
    if pixels.len() != expected {
        return Err(DetectError::InvalidGrayBuffer {
            expected,
            got: pixels.len(),
        });
    }
    ::image::GrayImage::from_raw(width, height, pixels.to_vec())
        .ok_or(DetectError::InvalidGrayDimensions { width, height })
}

/// Mean intensity of a gray image, a serviceable global threshold for
/// well-lit frames.
pub fn mean_intensity(img: &GrayImageView<'_>) -> f32 {
    if img.data.is_empty() {
        return 0.0;
    }
    let sum: u64 = img.data.iter().map(|&v| v as u64).sum();
    sum as f32 / img.data.len() as f32
}

/// Threshold a gray image into the 0/1 mask square sources consume: pixels
/// darker than `threshold` are set.
pub fn binarize(img: &GrayImageView<'_>, threshold: u8) -> GrayImage {
    let data = img
        .data
        .iter()
        .map(|&v| u8::from(v < threshold))
        .collect::<Vec<_>>();
    GrayImage {
        width: img.width,
        height: img.height,
        data,
    }
}

/// Run one detection cycle on an `image::GrayImage`, thresholding at the
/// mean intensity to build the binary mask.
#[cfg_attr(
    feature = "tracing",
    tracing::instrument(
        level = "info",
        skip(detector, img),
        fields(width = img.width(), height = img.height())
    )
)]
pub fn process_image<S: SquareSource>(
    detector: &mut PositionPatternDetector<S>,
    img: &::image::GrayImage,
) {
    let gray = gray_view(img);
    let mask = binarize(&gray, mean_intensity(&gray) as u8);
    detector.process(&gray, &mask.view());
}
