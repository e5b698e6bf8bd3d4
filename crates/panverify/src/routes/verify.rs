//! PAN verification endpoint.

use axum::{
    Json,
    body::Bytes,
    extract::{
        Multipart, State,
        multipart::{MultipartError, MultipartRejection},
    },
    http::StatusCode,
};
use idcheck_common::constants::fields;
use idcheck_common::{VerificationResponse, Verdict, VerifyError};

use super::ApiError;
use crate::state::AppState;

/// The parsed multipart form
struct VerifyForm {
    pan_number: String,
    image_bytes: Bytes,
    image_name: Option<String>,
}

impl VerifyForm {
    async fn read(multipart: &mut Multipart) -> Result<Self, VerifyError> {
        let mut pan_number = None;
        let mut image = None;

        while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
            let name = field.name().map(str::to_string);
            match name.as_deref() {
                Some(fields::PAN_NUMBER) => {
                    pan_number = Some(field.text().await.map_err(multipart_error)?);
                }
                Some(fields::PAN_CARD_IMAGE) => {
                    let file_name = field.file_name().map(str::to_string);
                    let bytes = field.bytes().await.map_err(multipart_error)?;
                    image = Some((bytes, file_name));
                }
                other => {
                    tracing::debug!(field = ?other, "Ignoring unknown form field");
                }
            }
        }

        let pan_number = pan_number.ok_or_else(|| missing(fields::PAN_NUMBER))?;
        let (image_bytes, image_name) = image.ok_or_else(|| missing(fields::PAN_CARD_IMAGE))?;

        Ok(Self {
            pan_number,
            image_bytes,
            image_name,
        })
    }
}

fn missing(field: &str) -> VerifyError {
    VerifyError::InvalidInput(format!("{field} is required"))
}

fn multipart_error(err: MultipartError) -> VerifyError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        VerifyError::PayloadTooLarge(err.body_text())
    } else {
        VerifyError::InvalidInput(err.body_text())
    }
}

/// Verify a PAN number against the PAN card image
///
/// Returns:
/// - 200: `Verified` or `Not Verified`
/// - 400: no PAN-shaped text could be read from the image
/// - 408: the configured request timeout elapsed (set by the router)
/// - 413: upload too large
/// - 422: missing or malformed form fields
/// - 500: scratch storage failure
///
/// The scratch copy of the image is removed before any response is sent.
pub async fn verify_pan(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<VerificationResponse>, ApiError> {
    let mut multipart = multipart.map_err(|e| VerifyError::InvalidInput(e.body_text()))?;
    let form = VerifyForm::read(&mut multipart).await?;

    let scratch_file = state
        .scratch
        .persist(&form.image_bytes, form.image_name.as_deref())
        .await
        .map_err(|e| VerifyError::Storage(format!("failed to save upload: {e}")))?;

    tracing::info!(
        image_name = ?form.image_name,
        bytes = form.image_bytes.len(),
        "PAN card image saved successfully"
    );

    // Decode + OCR are blocking
    let extractor = state.extractor.clone();
    let path = scratch_file.path().to_path_buf();
    let extraction = tokio::task::spawn_blocking(move || extractor.extract_identifier(&path))
        .await
        .map_err(|e| VerifyError::Internal(format!("OCR task failed: {e}")))?;

    let Some(extracted) = extraction.identifier() else {
        return Err(VerifyError::ExtractionFailed.into());
    };

    tracing::info!(extracted_pan = %extracted, "Extracted PAN number");

    let verdict = Verdict::compare(extracted, &form.pan_number);
    if !verdict.is_verified() {
        tracing::info!(extracted_pan = %extracted, "PAN number does not match");
    }

    // scratch_file is dropped (and deleted) on every return path
    Ok(Json(verdict.into()))
}
