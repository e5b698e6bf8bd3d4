//! Tesseract driven through its command-line interface.
//!
//! The grayscale image is piped to `tesseract stdin stdout` as PNG, so no
//! second file is written next to the scratch upload.

use std::io::{Cursor, Write};
use std::process::{Command, Stdio};

use image::{GrayImage, ImageFormat};

use super::{OcrError, TextRecognizer};
use crate::config::OcrConfig;

/// Tesseract executable plus the options every run uses
#[derive(Debug, Clone)]
pub struct TesseractCli {
    command: String,
    language: String,
    psm: u8,
}

impl TesseractCli {
    pub fn new(config: &OcrConfig) -> Self {
        Self {
            command: config.tesseract_cmd.clone(),
            language: config.language.clone(),
            psm: config.psm,
        }
    }

    fn args(&self) -> Vec<String> {
        vec![
            "stdin".to_string(),
            "stdout".to_string(),
            "-l".to_string(),
            self.language.clone(),
            "--psm".to_string(),
            self.psm.to_string(),
        ]
    }
}

impl TextRecognizer for TesseractCli {
    fn name(&self) -> &'static str {
        "tesseract"
    }

    fn recognize(&self, image: &GrayImage) -> Result<String, OcrError> {
        let mut png = Vec::new();
        image
            .write_to(&mut Cursor::new(&mut png), ImageFormat::Png)
            .map_err(|e| OcrError::Engine(format!("failed to encode image for tesseract: {e}")))?;

        let mut child = Command::new(&self.command)
            .args(self.args())
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| OcrError::Engine(format!("failed to execute {}: {e}", self.command)))?;

        // Dropping stdin closes the pipe so tesseract sees EOF
        if let Some(mut stdin) = child.stdin.take() {
            if let Err(e) = stdin.write_all(&png) {
                let _ = child.kill();
                let _ = child.wait();
                return Err(OcrError::Engine(format!("failed to send image to tesseract: {e}")));
            }
        }

        let output = child
            .wait_with_output()
            .map_err(|e| OcrError::Engine(format!("failed to wait for tesseract: {e}")))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(OcrError::Engine(format!(
                "tesseract exited with {}: {}",
                output.status,
                stderr.trim()
            )));
        }

        String::from_utf8(output.stdout)
            .map_err(|e| OcrError::Engine(format!("invalid UTF-8 output: {e}")))
    }
}
