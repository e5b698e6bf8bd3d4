//! Core types shared across IDCheck components.

use serde::{Deserialize, Serialize};

use crate::constants::messages;
use crate::pattern::normalize_identifier;

/// Outcome of running the OCR pipeline over an uploaded image.
///
/// Decode and engine failures are reported as `NotFound`; the cause is only
/// visible in the logs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Extraction {
    /// A PAN-shaped identifier was found in the recognized text
    Found(String),
    /// Nothing usable was recognized
    NotFound,
}

impl Extraction {
    pub fn identifier(&self) -> Option<&str> {
        match self {
            Self::Found(id) => Some(id),
            Self::NotFound => None,
        }
    }
}

impl From<Option<&str>> for Extraction {
    fn from(value: Option<&str>) -> Self {
        match value {
            Some(id) => Self::Found(id.to_string()),
            None => Self::NotFound,
        }
    }
}

/// Result of comparing the extracted identifier with the claimed one
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Verified,
    NotVerified,
}

impl Verdict {
    /// Compare identifiers, ignoring letter case and surrounding whitespace
    pub fn compare(extracted: &str, claimed: &str) -> Self {
        if normalize_identifier(extracted) == normalize_identifier(claimed) {
            Self::Verified
        } else {
            Self::NotVerified
        }
    }

    pub fn is_verified(&self) -> bool {
        matches!(self, Self::Verified)
    }
}

/// Body of a successful `/verify-pan` response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status")]
pub enum VerificationResponse {
    #[serde(rename = "Verified")]
    Verified { message: String },

    #[serde(rename = "Not Verified")]
    NotVerified { reason: String },
}

impl From<Verdict> for VerificationResponse {
    fn from(verdict: Verdict) -> Self {
        match verdict {
            Verdict::Verified => Self::Verified {
                message: messages::VERIFIED.to_string(),
            },
            Verdict::NotVerified => Self::NotVerified {
                reason: messages::NOT_VERIFIED.to_string(),
            },
        }
    }
}

/// Body of every non-200 response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub detail: String,
}

impl ErrorBody {
    pub fn new(detail: impl Into<String>) -> Self {
        Self {
            detail: detail.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_verdict_ignores_case_and_whitespace() {
        assert_eq!(Verdict::compare("ABCDE1234F", " abcde1234f "), Verdict::Verified);
        assert_eq!(Verdict::compare("ABCDE1234F", "ABCDE9999Z"), Verdict::NotVerified);
        assert!(!Verdict::compare("ABCDE1234F", "").is_verified());
    }

    #[test]
    fn test_verified_response_shape() {
        let body = serde_json::to_value(VerificationResponse::from(Verdict::Verified)).unwrap();
        assert_eq!(
            body,
            json!({"status": "Verified", "message": "PAN number matches successfully."})
        );
    }

    #[test]
    fn test_not_verified_response_shape() {
        let body = serde_json::to_value(VerificationResponse::from(Verdict::NotVerified)).unwrap();
        assert_eq!(
            body,
            json!({"status": "Not Verified", "reason": "PAN number does not match."})
        );
    }

    #[test]
    fn test_extraction_from_match() {
        assert_eq!(
            Extraction::from(Some("ABCDE1234F")),
            Extraction::Found("ABCDE1234F".to_string())
        );
        assert_eq!(Extraction::from(None).identifier(), None);
    }
}
