//! Configuration management for PanVerify.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

use idcheck_common::constants::{
    DEFAULT_LISTEN_ADDR, DEFAULT_MAX_UPLOAD_BYTES, DEFAULT_OCR_LANGUAGE,
    DEFAULT_PAGE_SEGMENTATION_MODE, DEFAULT_SCRATCH_DIR, DEFAULT_TESSERACT_CMD,
};

/// Environment variable prefix, e.g. `PANVERIFY__OCR__LANGUAGE=eng`
const ENV_PREFIX: &str = "PANVERIFY";

/// Application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// HTTP listen address
    #[serde(default = "default_listen_addr")]
    pub listen_addr: String,

    /// Directory holding request-scoped scratch images
    #[serde(default = "default_scratch_dir")]
    pub scratch_dir: String,

    /// HTTP serving limits
    #[serde(default)]
    pub server: ServerConfig,

    /// OCR engine configuration
    #[serde(default)]
    pub ocr: OcrConfig,
}

/// HTTP serving configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Maximum accepted request body size
    #[serde(default = "default_max_upload_bytes")]
    pub max_upload_bytes: usize,

    /// Whole-request timeout. Unset means no timeout.
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
}

impl ServerConfig {
    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            max_upload_bytes: default_max_upload_bytes(),
            request_timeout_secs: None,
        }
    }
}

/// Tesseract configuration
#[derive(Debug, Clone, Deserialize)]
pub struct OcrConfig {
    /// Path to the tesseract executable
    #[serde(default = "default_tesseract_cmd")]
    pub tesseract_cmd: String,

    /// Recognition language (`-l`)
    #[serde(default = "default_language")]
    pub language: String,

    /// Page segmentation mode (`--psm`)
    #[serde(default = "default_psm")]
    pub psm: u8,

    /// Apply an Otsu threshold to the grayscale image before recognition
    #[serde(default)]
    pub binarize: bool,
}

impl Default for OcrConfig {
    fn default() -> Self {
        Self {
            tesseract_cmd: default_tesseract_cmd(),
            language: default_language(),
            psm: default_psm(),
            binarize: false,
        }
    }
}

// Default value functions
fn default_listen_addr() -> String { DEFAULT_LISTEN_ADDR.to_string() }
fn default_scratch_dir() -> String { DEFAULT_SCRATCH_DIR.to_string() }
fn default_max_upload_bytes() -> usize { DEFAULT_MAX_UPLOAD_BYTES }
fn default_tesseract_cmd() -> String { DEFAULT_TESSERACT_CMD.to_string() }
fn default_language() -> String { DEFAULT_OCR_LANGUAGE.to_string() }
fn default_psm() -> u8 { DEFAULT_PAGE_SEGMENTATION_MODE }

impl AppConfig {
    /// Load configuration from file and environment, with CLI overrides
    pub fn load(config_path: &str, args: &super::Args) -> Result<Self> {
        let mut builder = config::Config::builder();

        if Path::new(config_path).exists() {
            builder = builder.add_source(config::File::with_name(config_path));
        } else {
            tracing::warn!(path = %config_path, "Config file not found, using defaults");
        }

        let settings = builder
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .context("Failed to load config")?;

        let mut config: AppConfig = settings
            .try_deserialize()
            .context("Failed to parse config")?;

        // Apply CLI overrides
        if let Some(ref listen) = args.listen {
            config.listen_addr = listen.clone();
        }
        if let Some(ref scratch_dir) = args.scratch_dir {
            config.scratch_dir = scratch_dir.clone();
        }
        if let Some(ref tesseract_cmd) = args.tesseract_cmd {
            config.ocr.tesseract_cmd = tesseract_cmd.clone();
        }

        Ok(config)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            listen_addr: default_listen_addr(),
            scratch_dir: default_scratch_dir(),
            server: ServerConfig::default(),
            ocr: OcrConfig::default(),
        }
    }
}
