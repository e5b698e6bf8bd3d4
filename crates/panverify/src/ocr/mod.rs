//! OCR pipeline: decode → grayscale → recognize → match.
//!
//! The engine sits behind [`TextRecognizer`]. Everything that can go wrong
//! while reading or recognizing an image is an [`OcrError`], which never
//! leaves [`IdentifierExtractor::extract_identifier`]: it is logged and the
//! caller sees [`Extraction::NotFound`].

mod preprocess;
mod tesseract;

pub use tesseract::TesseractCli;

use std::path::Path;
use std::sync::Arc;

use idcheck_common::{Extraction, find_identifier};
use image::GrayImage;
use thiserror::Error;

/// Failures inside the OCR pipeline
#[derive(Debug, Error)]
pub enum OcrError {
    /// The file is missing or not a decodable image
    #[error("failed to decode image: {0}")]
    Decode(String),

    /// The recognition engine could not be run or returned garbage
    #[error("OCR engine failed: {0}")]
    Engine(String),
}

/// A text recognition engine
pub trait TextRecognizer: Send + Sync {
    /// Engine identifier for logs
    fn name(&self) -> &'static str;

    /// Recognize all text in a grayscale image
    fn recognize(&self, image: &GrayImage) -> Result<String, OcrError>;
}

/// Finds a PAN identifier in an image file
pub struct IdentifierExtractor {
    recognizer: Arc<dyn TextRecognizer>,
    binarize: bool,
}

impl IdentifierExtractor {
    pub fn new(recognizer: Arc<dyn TextRecognizer>, binarize: bool) -> Self {
        Self {
            recognizer,
            binarize,
        }
    }

    /// Run the whole pipeline over `path`.
    ///
    /// Blocking and CPU-heavy; call it from a blocking thread.
    pub fn extract_identifier(&self, path: &Path) -> Extraction {
        let text = match self.recognize_text(path) {
            Ok(text) => text,
            Err(e) => {
                tracing::warn!(
                    path = %path.display(),
                    engine = self.recognizer.name(),
                    error = %e,
                    "Error extracting PAN number"
                );
                return Extraction::NotFound;
            }
        };

        tracing::debug!(ocr_result = %text, "OCR result");

        let extraction = Extraction::from(find_identifier(&text));
        if extraction == Extraction::NotFound {
            tracing::info!(
                path = %path.display(),
                chars = text.len(),
                "No PAN-shaped text in OCR result"
            );
        }
        extraction
    }

    fn recognize_text(&self, path: &Path) -> Result<String, OcrError> {
        let mut gray = preprocess::load_grayscale(path)?;
        if self.binarize {
            gray = preprocess::binarize(&gray);
        }
        self.recognizer.recognize(&gray)
    }
}
