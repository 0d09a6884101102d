//! Resolving `add_attachment` input into bytes to upload.
//!
//! The file either arrives inline as base64 or is read from the server's
//! own filesystem. Remote transports usually run where the caller's paths
//! mean nothing, so filesystem reads can be disabled per server.

use std::io::ErrorKind;
use std::path::PathBuf;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use thiserror::Error;

use crate::params::AddAttachmentParams;

/// MIME type used when the caller does not supply one.
pub const DEFAULT_MIME_TYPE: &str = "application/octet-stream";

/// File contents ready to upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Upload {
    /// Raw file contents.
    pub bytes: Vec<u8>,
    /// Content type sent with the multipart part.
    pub mime_type: String,
}

/// Reasons an attachment cannot be prepared.
///
/// All variants except [`UploadError::Io`] are the caller's to fix and are
/// reported as tool errors.
#[derive(Debug, Error)]
pub enum UploadError {
    #[error("Either file-path or base64-data must be provided.")]
    MissingSource,

    #[error(
        "file-path is not available on this server because it has no local filesystem access. \
         Send the file contents as base64-data instead, together with filename and optionally mime-type."
    )]
    FilesystemUnavailable,

    #[error("File not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("base64-data is not valid base64: {0}")]
    InvalidBase64(#[from] base64::DecodeError),

    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl UploadError {
    /// Whether the caller can correct this by changing the tool input.
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, UploadError::Io { .. })
    }
}

/// Produce the upload payload. Inline data wins over a file path.
pub async fn resolve(
    params: &AddAttachmentParams,
    allow_file_paths: bool,
) -> Result<Upload, UploadError> {
    let mime_type = params
        .mime_type
        .clone()
        .unwrap_or_else(|| DEFAULT_MIME_TYPE.to_string());

    if let Some(data) = &params.base64_data {
        let bytes = STANDARD.decode(data.trim())?;
        return Ok(Upload { bytes, mime_type });
    }

    let Some(file_path) = &params.file_path else {
        return Err(UploadError::MissingSource);
    };

    if !allow_file_paths {
        return Err(UploadError::FilesystemUnavailable);
    }

    let path = PathBuf::from(file_path);
    match tokio::fs::metadata(&path).await {
        Ok(meta) if meta.is_file() => {}
        Ok(_) => return Err(UploadError::NotFound(path)),
        Err(e) if e.kind() == ErrorKind::NotFound => return Err(UploadError::NotFound(path)),
        Err(source) => return Err(UploadError::Io { path, source }),
    }

    let bytes = tokio::fs::read(&path)
        .await
        .map_err(|source| UploadError::Io {
            path: path.clone(),
            source,
        })?;

    Ok(Upload { bytes, mime_type })
}

/// Markdown that embeds an uploaded attachment in card content.
pub fn markdown_reference(filename: &str) -> String {
    format!("![](@media/{filename})")
}
