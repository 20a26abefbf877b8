//! Upload validation and storage.

use std::path::{Path, PathBuf};

use axum::body::Bytes;
use thiserror::Error;

use super::filename;

/// Settings for the upload gate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadConfig {
    /// Accepted MIME types, in the order they are listed in errors.
    pub allowed_mime_types: Vec<String>,
    /// Maximum size in bytes of a non-file form field.
    pub max_field_size: usize,
    /// Directory accepted files are written to.
    pub destination_dir: PathBuf,
    /// The single multipart field allowed to carry a file.
    pub field_name: String,
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            allowed_mime_types: vec!["image/jpeg".to_string(), "image/png".to_string()],
            max_field_size: 10_000_000,
            destination_dir: PathBuf::from("uploads"),
            field_name: "image".to_string(),
        }
    }
}

impl UploadConfig {
    /// Default settings writing into `destination_dir`.
    pub fn with_destination(destination_dir: impl Into<PathBuf>) -> Self {
        Self {
            destination_dir: destination_dir.into(),
            ..Self::default()
        }
    }
}

/// A file received in a multipart request, not yet stored.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    /// File name as sent by the client.
    pub original_name: String,
    /// Declared MIME type.
    pub mime_type: String,
    /// File content.
    pub content: Bytes,
}

impl UploadedFile {
    /// Create an uploaded file.
    pub fn new(
        original_name: impl Into<String>,
        mime_type: impl Into<String>,
        content: impl Into<Bytes>,
    ) -> Self {
        Self {
            original_name: original_name.into(),
            mime_type: mime_type.into(),
            content: content.into(),
        }
    }

    /// Size of the content in bytes.
    pub fn size(&self) -> usize {
        self.content.len()
    }
}

/// A file written to the uploads directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredFile {
    /// Generated file name.
    pub name: String,
    /// Directory the file was written to.
    pub directory: PathBuf,
}

impl StoredFile {
    /// Full path of the stored file.
    pub fn path(&self) -> PathBuf {
        self.directory.join(&self.name)
    }
}

/// Reasons an upload is refused.
#[derive(Error, Debug)]
pub enum UploadError {
    /// The file's MIME type is not allowed.
    #[error("Image must be one of the following types {}", .allowed.join(" "))]
    UnsupportedType {
        /// Declared MIME type.
        mime_type: String,
        /// Configured allow list.
        allowed: Vec<String>,
    },

    /// A non-file field exceeded the configured size.
    #[error("Field value too long")]
    FieldTooLong {
        /// Field name.
        field: String,
    },

    /// A file arrived under a field other than the image field, or twice.
    #[error("Unexpected field")]
    UnexpectedField {
        /// Field name.
        field: String,
    },

    /// The multipart body could not be parsed.
    #[error("{0}")]
    Multipart(String),

    /// Writing the file to disk failed.
    #[error("failed to store upload: {0}")]
    Storage(#[from] std::io::Error),
}

impl UploadError {
    /// Whether the client caused the error (400) rather than the server (500).
    pub fn is_client_error(&self) -> bool {
        !matches!(self, UploadError::Storage(_))
    }
}

/// The `type/subtype` of a Content-Type value, lowercased, without parameters.
///
/// `IMAGE/PNG; charset=binary` becomes `image/png`.
pub fn mime_essence(content_type: &str) -> String {
    content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase()
}

/// Validates uploads against an [`UploadConfig`] and writes accepted files.
#[derive(Debug, Clone)]
pub struct UploadGate {
    config: UploadConfig,
}

impl UploadGate {
    /// Create a gate with the given configuration.
    ///
    /// The destination directory is not created here; a missing directory
    /// surfaces as [`UploadError::Storage`] when a file is accepted.
    pub fn new(config: UploadConfig) -> Self {
        Self { config }
    }

    /// The gate's configuration.
    pub fn config(&self) -> &UploadConfig {
        &self.config
    }

    /// The directory accepted files are written to.
    pub fn destination_dir(&self) -> &Path {
        &self.config.destination_dir
    }

    /// Check a declared MIME type against the allow list.
    ///
    /// Case and parameters are ignored; see [`mime_essence`].
    pub fn check_mime_type(&self, mime_type: &str) -> Result<(), UploadError> {
        let essence = mime_essence(mime_type);
        if self.config.allowed_mime_types.iter().any(|m| *m == essence) {
            Ok(())
        } else {
            Err(UploadError::UnsupportedType {
                mime_type: mime_type.to_string(),
                allowed: self.config.allowed_mime_types.clone(),
            })
        }
    }

    /// Check a non-file field's size so far.
    pub fn check_field_size(&self, field: &str, size: usize) -> Result<(), UploadError> {
        if size > self.config.max_field_size {
            return Err(UploadError::FieldTooLong {
                field: field.to_string(),
            });
        }
        Ok(())
    }

    /// Check that a file may arrive under `field`.
    ///
    /// Only the configured field is allowed, and only once per request.
    pub fn check_file_field(&self, field: &str, already_received: bool) -> Result<(), UploadError> {
        if field != self.config.field_name || already_received {
            return Err(UploadError::UnexpectedField {
                field: field.to_string(),
            });
        }
        Ok(())
    }

    /// Validate and store a file.
    ///
    /// Nothing is written unless the MIME type is allowed.
    pub async fn accept(&self, file: UploadedFile) -> Result<StoredFile, UploadError> {
        self.check_mime_type(&file.mime_type)?;

        let stored = StoredFile {
            name: filename::stored_name(&file.original_name),
            directory: self.config.destination_dir.clone(),
        };
        tokio::fs::write(stored.path(), &file.content).await?;

        tracing::info!(
            stored_name = %stored.name,
            original_name = %file.original_name,
            size = file.size(),
            "Stored uploaded image"
        );

        Ok(stored)
    }
}
