use std::{
    fmt, fs,
    path::{Path, PathBuf},
};

use crate::error::UploadError;

/// File extensions offered by file dialogs.
pub const ACCEPTED_EXTENSIONS: [&str; 3] = ["jpg", "jpeg", "png"];

/// Advertised upload limit. Not enforced client-side.
pub const UPLOAD_HINT: &str = "PNG, JPG up to 10MB";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImageMime {
    Jpeg,
    Png,
}

impl ImageMime {
    pub fn as_str(self) -> &'static str {
        match self {
            ImageMime::Jpeg => "image/jpeg",
            ImageMime::Png => "image/png",
        }
    }

    pub fn from_mime_str(mime: &str) -> Option<Self> {
        let essence = mime.split(';').next().unwrap_or_default().trim();
        match essence.to_ascii_lowercase().as_str() {
            "image/jpeg" | "image/jpg" | "image/pjpeg" => Some(ImageMime::Jpeg),
            "image/png" => Some(ImageMime::Png),
            _ => None,
        }
    }

    /// Guesses the MIME type from the file name's extension and applies the
    /// allowlist.
    pub fn detect(file_name: &str) -> Result<Self, UploadError> {
        let guessed = mime_guess::from_path(file_name).first_raw();
        guessed
            .and_then(Self::from_mime_str)
            .ok_or_else(|| UploadError::UnsupportedType {
                file_name: file_name.to_string(),
                detected: guessed.unwrap_or("unknown").to_string(),
            })
    }
}

impl fmt::Display for ImageMime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An image accepted into one of the upload slots.
#[derive(Clone, PartialEq, Eq)]
pub struct SelectedImage {
    pub file_name: String,
    pub mime: ImageMime,
    pub bytes: Vec<u8>,
    pub source_path: Option<PathBuf>,
}

impl SelectedImage {
    pub fn from_path(path: &Path) -> Result<Self, UploadError> {
        let file_name = display_file_name(path);
        let mime = ImageMime::detect(&file_name)?;
        let bytes = fs::read(path).map_err(|err| UploadError::Unreadable {
            file_name: file_name.clone(),
            reason: err.to_string(),
        })?;
        if bytes.is_empty() {
            return Err(empty_file(file_name));
        }
        Ok(Self {
            file_name,
            mime,
            bytes,
            source_path: Some(path.to_path_buf()),
        })
    }

    /// Builds a selection from in-memory bytes, e.g. a drop that carried no
    /// path. A MIME type reported by the drop source wins over the extension
    /// guess, but both must pass the allowlist.
    pub fn from_bytes(
        file_name: impl Into<String>,
        reported_mime: Option<&str>,
        bytes: Vec<u8>,
    ) -> Result<Self, UploadError> {
        let file_name = file_name.into();
        let mime = match reported_mime.filter(|mime| !mime.trim().is_empty()) {
            Some(reported) => {
                ImageMime::from_mime_str(reported).ok_or_else(|| UploadError::UnsupportedType {
                    file_name: file_name.clone(),
                    detected: reported.to_string(),
                })?
            }
            None => ImageMime::detect(&file_name)?,
        };
        if bytes.is_empty() {
            return Err(empty_file(file_name));
        }
        Ok(Self {
            file_name,
            mime,
            bytes,
            source_path: None,
        })
    }

    pub fn size_bytes(&self) -> usize {
        self.bytes.len()
    }
}

impl fmt::Debug for SelectedImage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SelectedImage")
            .field("file_name", &self.file_name)
            .field("mime", &self.mime)
            .field("size_bytes", &self.bytes.len())
            .field("source_path", &self.source_path)
            .finish()
    }
}

fn empty_file(file_name: String) -> UploadError {
    UploadError::Unreadable {
        file_name,
        reason: "file is empty".to_string(),
    }
}

fn display_file_name(path: &Path) -> String {
    path.file_name()
        .and_then(|name| name.to_str())
        .map(str::to_string)
        .unwrap_or_else(|| path.display().to_string())
}

#[cfg(test)]
#[path = "tests/upload_tests.rs"]
mod tests;
