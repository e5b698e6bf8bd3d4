//! Request-scoped scratch storage for uploaded images.
//!
//! Every upload is written under the scratch directory with a random prefix,
//! so concurrent requests never share a file even when callers send the same
//! filename. The returned [`ScratchFile`] removes the file when dropped.

use std::io;
use std::path::{Path, PathBuf};

use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use idcheck_common::constants::FALLBACK_UPLOAD_NAME;
use rand::Rng;

/// Longest sanitized name kept from the caller's filename
const MAX_NAME_LEN: usize = 64;

/// The process-wide scratch directory
#[derive(Debug, Clone)]
pub struct ScratchDir {
    root: PathBuf,
}

impl ScratchDir {
    /// Create the directory if needed. Calling this on an existing directory is fine.
    pub fn create(root: impl Into<PathBuf>) -> io::Result<Self> {
        let root = root.into();
        std::fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Write `bytes` to a fresh file derived from `suggested_name`
    pub async fn persist(&self, bytes: &[u8], suggested_name: Option<&str>) -> io::Result<ScratchFile> {
        let file_name = format!("{}-{}", unique_token(), sanitize_name(suggested_name));
        let path = self.root.join(file_name);

        // Guard first so a partial write is still cleaned up
        let file = ScratchFile { path };
        tokio::fs::write(&file.path, bytes).await?;

        tracing::debug!(path = %file.path.display(), bytes = bytes.len(), "Scratch image saved");
        Ok(file)
    }
}

/// A scratch file that is deleted when dropped
#[derive(Debug)]
pub struct ScratchFile {
    path: PathBuf,
}

impl ScratchFile {
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Remove the file now. Returns false if it was already gone.
    pub fn remove(&self) -> bool {
        match std::fs::remove_file(&self.path) {
            Ok(()) => {
                tracing::info!(path = %self.path.display(), "Deleted temporary file");
                true
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => false,
            Err(e) => {
                tracing::error!(path = %self.path.display(), error = %e, "Failed to delete temporary file");
                false
            }
        }
    }
}

impl Drop for ScratchFile {
    // Runs on whichever thread drops the guard, including runtime workers.
    // A single unlink is done inline rather than handed to the blocking pool.
    fn drop(&mut self) {
        self.remove();
    }
}

/// 96 random bits, URL-safe
fn unique_token() -> String {
    let mut bytes = [0u8; 12];
    rand::rng().fill(&mut bytes);
    URL_SAFE_NO_PAD.encode(bytes)
}

/// Reduce a caller-supplied filename to a safe single path component
fn sanitize_name(name: Option<&str>) -> String {
    let base = name
        .map(|n| n.rsplit(['/', '\\']).next().unwrap_or(n))
        .unwrap_or_default();

    let cleaned: String = base
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                c
            } else {
                '_'
            }
        })
        .take(MAX_NAME_LEN)
        .collect();

    if cleaned.trim_matches('.').is_empty() {
        FALLBACK_UPLOAD_NAME.to_string()
    } else {
        cleaned
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_name() {
        assert_eq!(sanitize_name(Some("card.png")), "card.png");
        assert_eq!(sanitize_name(Some("../../etc/passwd")), "passwd");
        assert_eq!(sanitize_name(Some("C:\\Users\\me\\pan card.jpg")), "pan_card.jpg");
        assert_eq!(sanitize_name(Some("..")), "upload");
        assert_eq!(sanitize_name(Some("")), "upload");
        assert_eq!(sanitize_name(None), "upload");
        assert_eq!(sanitize_name(Some(&"a".repeat(200))).len(), MAX_NAME_LEN);
    }

    #[test]
    fn test_create_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().join("scratch");

        ScratchDir::create(&root).unwrap();
        ScratchDir::create(&root).unwrap();
        assert!(root.is_dir());
    }

    #[tokio::test]
    async fn test_same_name_gets_distinct_files() {
        let dir = tempfile::tempdir().unwrap();
        let scratch = ScratchDir::create(dir.path()).unwrap();

        let a = scratch.persist(b"first", Some("card.png")).await.unwrap();
        let b = scratch.persist(b"second", Some("card.png")).await.unwrap();

        assert_ne!(a.path(), b.path());
        assert!(a.path().starts_with(dir.path()));
        assert!(a.path().to_string_lossy().ends_with("-card.png"));
        assert_eq!(std::fs::read(a.path()).unwrap(), b"first");
        assert_eq!(std::fs::read(b.path()).unwrap(), b"second");
    }

    #[tokio::test]
    async fn test_drop_removes_file() {
        let dir = tempfile::tempdir().unwrap();
        let scratch = ScratchDir::create(dir.path()).unwrap();

        let file = scratch.persist(b"bytes", Some("card.png")).await.unwrap();
        let path = file.path().to_path_buf();
        assert!(path.exists());

        drop(file);
        assert!(!path.exists());
    }

    #[tokio::test]
    async fn test_remove_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let scratch = ScratchDir::create(dir.path()).unwrap();

        let file = scratch.persist(b"bytes", None).await.unwrap();
        assert!(file.remove());
        assert!(!file.remove());
        // Drop after an explicit remove is a no-op
        drop(file);
    }

    #[tokio::test]
    async fn test_persist_into_missing_dir_fails() {
        let dir = tempfile::tempdir().unwrap();
        let scratch = ScratchDir::create(dir.path().join("gone")).unwrap();
        std::fs::remove_dir(scratch.root()).unwrap();

        assert!(scratch.persist(b"bytes", Some("card.png")).await.is_err());
    }
}
