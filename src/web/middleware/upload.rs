//! Multipart image intake for record routes.
//!
//! [`ImageUpload`] runs before the handler body: it parses the multipart
//! request, enforces the [`UploadGate`] rules and stores the accepted image.
//! A rejected request never reaches the handler and nothing is written.

use std::collections::HashMap;
use std::sync::Arc;

use axum::{
    async_trait,
    body::Bytes,
    extract::{FromRequest, Multipart, Request},
};

use crate::upload::{mime_essence, StoredFile, UploadError, UploadGate, UploadedFile};
use crate::web::error::ApiError;
use crate::web::handlers::AppState;

/// Content type assumed for file parts that do not declare one.
const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

/// The outcome of a multipart request that passed the upload gate.
#[derive(Debug, Default)]
pub struct ImageUpload {
    /// The stored image, if the request carried one.
    pub stored: Option<StoredFile>,
    /// Text fields, by name. A repeated name keeps the last value.
    pub fields: HashMap<String, String>,
}

impl ImageUpload {
    /// Generated file name of the stored image.
    pub fn stored_name(&self) -> Option<&str> {
        self.stored.as_ref().map(|file| file.name.as_str())
    }

    /// A text field's value.
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }
}

#[async_trait]
impl FromRequest<Arc<AppState>> for ImageUpload {
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &Arc<AppState>) -> Result<Self, Self::Rejection> {
        let multipart = Multipart::from_request(req, state).await.map_err(|e| {
            tracing::debug!("Rejected non-multipart request: {}", e);
            ApiError::bad_request(e.body_text())
        })?;

        receive(&state.upload_gate, multipart)
            .await
            .map_err(ApiError::from)
    }
}

/// Read every part of `multipart` through `gate`.
///
/// The image is held in memory until the whole body has been read and is
/// only written once every other part has passed.
pub async fn receive(gate: &UploadGate, mut multipart: Multipart) -> Result<ImageUpload, UploadError> {
    let mut staged: Option<UploadedFile> = None;
    let mut fields = HashMap::new();

    while let Some(mut field) = multipart.next_field().await.map_err(multipart_error)? {
        let name = field.name().unwrap_or_default().to_string();

        match field.file_name().map(str::to_string) {
            Some(original_name) => {
                gate.check_file_field(&name, staged.is_some())?;
                let mime_type = mime_essence(field.content_type().unwrap_or(DEFAULT_CONTENT_TYPE));
                gate.check_mime_type(&mime_type)?;

                let content = field.bytes().await.map_err(multipart_error)?;
                staged = Some(UploadedFile::new(original_name, mime_type, content));
            }
            None => {
                let mut value: Vec<u8> = Vec::new();
                while let Some(chunk) = field.chunk().await.map_err(multipart_error)? {
                    gate.check_field_size(&name, value.len() + chunk.len())?;
                    value.extend_from_slice(&chunk);
                }
                let value = String::from_utf8(value)
                    .map_err(|_| UploadError::Multipart(format!("Field {name} is not valid UTF-8")))?;
                fields.insert(name, value);
            }
        }
    }

    let stored = match staged {
        Some(file) => Some(gate.accept(file).await?),
        None => None,
    };

    Ok(ImageUpload { stored, fields })
}

fn multipart_error(err: axum::extract::multipart::MultipartError) -> UploadError {
    tracing::debug!("Failed to read multipart body: {}", err);
    UploadError::Multipart(err.body_text())
}
