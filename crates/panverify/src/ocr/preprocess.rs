//! Image loading and preprocessing ahead of recognition.

use std::path::Path;

use image::GrayImage;
use imageproc::contrast::{ThresholdType, otsu_level, threshold};

use super::OcrError;

/// Decode the file at `path` and convert it to single-channel intensity
pub fn load_grayscale(path: &Path) -> Result<GrayImage, OcrError> {
    let img = image::ImageReader::open(path)
        .map_err(|e| OcrError::Decode(format!("{}: {e}", path.display())))?
        .with_guessed_format()
        .map_err(|e| OcrError::Decode(format!("{}: {e}", path.display())))?
        .decode()
        .map_err(|e| OcrError::Decode(format!("{}: {e}", path.display())))?;

    Ok(img.to_luma8())
}

/// Black-and-white image using Otsu's global threshold
pub fn binarize(gray: &GrayImage) -> GrayImage {
    let level = otsu_level(gray);
    threshold(gray, level, ThresholdType::Binary)
}
