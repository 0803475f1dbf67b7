use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use sha2::{Digest, Sha256};

#[derive(Debug, thiserror::Error)]
pub enum ArtifactError {
    #[error("{file_type} file not found: {}", .path.display())]
    NotFound { file_type: String, path: PathBuf },
    #[error("IO error: {0}")]
    IoError(#[from] io::Error),
    #[error("Hash mismatch: expected {expected}, got {actual} for {file_type} file")]
    HashMismatch {
        file_type: String,
        expected: String,
        actual: String,
    },
}

/// Locations of the serialized model and tokenizer, with optional SHA-256 digests
/// that the files must match before they are loaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactPaths {
    pub model: PathBuf,
    pub tokenizer: PathBuf,
    pub model_sha256: Option<String>,
    pub tokenizer_sha256: Option<String>,
}

impl ArtifactPaths {
    pub fn new<M: AsRef<Path>, T: AsRef<Path>>(model: M, tokenizer: T) -> Self {
        Self {
            model: model.as_ref().to_path_buf(),
            tokenizer: tokenizer.as_ref().to_path_buf(),
            model_sha256: None,
            tokenizer_sha256: None,
        }
    }

    pub fn with_model_sha256(mut self, digest: impl Into<String>) -> Self {
        self.model_sha256 = Some(digest.into());
        self
    }

    pub fn with_tokenizer_sha256(mut self, digest: impl Into<String>) -> Self {
        self.tokenizer_sha256 = Some(digest.into());
        self
    }

    /// Checks that both files exist and, where a digest is configured, that the
    /// file contents hash to it.
    pub fn verify(&self) -> Result<(), ArtifactError> {
        verify_file(&self.model, self.model_sha256.as_deref(), "model")?;
        verify_file(&self.tokenizer, self.tokenizer_sha256.as_deref(), "tokenizer")?;
        log::info!("Model and tokenizer artifacts verified");
        Ok(())
    }
}

fn verify_file(path: &Path, expected_hash: Option<&str>, file_type: &str) -> Result<(), ArtifactError> {
    if !path.exists() {
        log::error!("{} file not found at {:?}", file_type, path);
        return Err(ArtifactError::NotFound {
            file_type: file_type.to_string(),
            path: path.to_path_buf(),
        });
    }

    let Some(expected) = expected_hash else {
        log::debug!("No digest configured for {} file, skipping hash check", file_type);
        return Ok(());
    };

    let actual = sha256_hex(path)?;
    log::info!("Calculated {} hash: {}", file_type, actual);
    log::info!("Expected {} hash:   {}", file_type, expected);

    if !actual.eq_ignore_ascii_case(expected.trim()) {
        log::error!("{} hash mismatch: expected {}, got {}", file_type, expected, actual);
        return Err(ArtifactError::HashMismatch {
            file_type: file_type.to_string(),
            expected: expected.to_string(),
            actual,
        });
    }
    Ok(())
}

/// Lowercase hex SHA-256 digest of a file's contents.
pub fn sha256_hex(path: &Path) -> Result<String, ArtifactError> {
    let bytes = fs::read(path)?;
    log::debug!("Read {} bytes from {:?}", bytes.len(), path);
    let mut hasher = Sha256::new();
    hasher.update(&bytes);
    Ok(format!("{:x}", hasher.finalize()))
}
