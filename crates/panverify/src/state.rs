//! Application state and shared resources.

use anyhow::{Context, Result};
use std::sync::Arc;

use crate::config::AppConfig;
use crate::ocr::{IdentifierExtractor, TesseractCli, TextRecognizer};
use crate::scratch::ScratchDir;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Application configuration
    pub config: AppConfig,

    /// Scratch directory for uploads
    pub scratch: ScratchDir,

    /// OCR pipeline
    pub extractor: Arc<IdentifierExtractor>,
}

impl AppState {
    /// Create state backed by the configured tesseract binary
    pub fn new(config: AppConfig) -> Result<Self> {
        let recognizer = Arc::new(TesseractCli::new(&config.ocr));
        Self::with_recognizer(config, recognizer)
    }

    /// Create state with an arbitrary recognition engine
    pub fn with_recognizer(config: AppConfig, recognizer: Arc<dyn TextRecognizer>) -> Result<Self> {
        let scratch = ScratchDir::create(&config.scratch_dir)
            .with_context(|| format!("Failed to create scratch directory {}", config.scratch_dir))?;

        let extractor = Arc::new(IdentifierExtractor::new(recognizer, config.ocr.binarize));

        Ok(Self {
            config,
            scratch,
            extractor,
        })
    }
}
