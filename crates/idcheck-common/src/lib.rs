//! # IDCheck Common
//!
//! Shared types and utilities used across IDCheck components.
//!
//! ## Modules
//! - `types` - Verdicts and response bodies
//! - `pattern` - The fixed PAN identifier pattern
//! - `error` - Common error types
//! - `constants` - Shared configuration constants and fixed messages

pub mod constants;
pub mod error;
pub mod pattern;
pub mod types;

pub use error::VerifyError;
pub use pattern::{find_identifier, normalize_identifier};
pub use types::*;
