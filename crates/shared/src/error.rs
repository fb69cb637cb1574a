use thiserror::Error;

#[derive(Debug, Error)]
pub enum UploadError {
    #[error("{file_name}: unsupported file type {detected}; only JPEG and PNG images are accepted")]
    UnsupportedType { file_name: String, detected: String },
    #[error("{file_name}: could not read file: {reason}")]
    Unreadable { file_name: String, reason: String },
}

impl UploadError {
    pub fn file_name(&self) -> &str {
        match self {
            UploadError::UnsupportedType { file_name, .. }
            | UploadError::Unreadable { file_name, .. } => file_name,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("Error: Invalid measurement data")]
pub struct InvalidMeasurements;
