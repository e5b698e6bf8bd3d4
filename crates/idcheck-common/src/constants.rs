//! Shared constants for IDCheck components.

/// Default HTTP listen address
pub const DEFAULT_LISTEN_ADDR: &str = "127.0.0.1:8000";

/// Default scratch directory for uploaded images (relative to the working dir)
pub const DEFAULT_SCRATCH_DIR: &str = "temp_images";

/// Default Tesseract executable, resolved through `PATH`
pub const DEFAULT_TESSERACT_CMD: &str = "tesseract";

/// Default Tesseract language
pub const DEFAULT_OCR_LANGUAGE: &str = "eng";

/// Tesseract page segmentation mode: assume a single uniform block of text
pub const DEFAULT_PAGE_SEGMENTATION_MODE: u8 = 6;

/// Default upload size limit (10 MiB)
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Fallback scratch name when the upload carries no usable filename
pub const FALLBACK_UPLOAD_NAME: &str = "upload";

/// PAN identifier shape: 5 letters, 4 digits, 1 letter
pub const PAN_PATTERN: &str = r"[A-Z]{5}[0-9]{4}[A-Z]";

/// Multipart form field names
pub mod fields {
    /// Claimed PAN number (text)
    pub const PAN_NUMBER: &str = "pan_number";

    /// PAN card image (file)
    pub const PAN_CARD_IMAGE: &str = "pan_card_image";
}

/// Fixed user-facing messages
pub mod messages {
    pub const VERIFIED: &str = "PAN number matches successfully.";

    pub const NOT_VERIFIED: &str = "PAN number does not match.";

    pub const EXTRACTION_FAILED: &str = "Could not extract PAN number from the image.";

    pub const INTERNAL_ERROR: &str = "Internal server error";

    pub const REQUEST_TIMED_OUT: &str = "Request timed out";
}
