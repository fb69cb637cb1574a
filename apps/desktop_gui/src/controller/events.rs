//! UI/backend events and error modeling for desktop GUI controller.

use chrono::{DateTime, Local};
use client_core::BackendStatus;
use shared::protocol::ProcessImagesResponse;

use crate::media::PreviewImage;

pub enum UiEvent {
    Info(String),
    BackendStatusChanged {
        status: BackendStatus,
        checked_at: DateTime<Local>,
    },
    /// Outcome of a manual health check, sent even when the status is
    /// unchanged.
    HealthChecked {
        status: BackendStatus,
        checked_at: DateTime<Local>,
    },
    ProcessSucceeded(ProcessImagesResponse),
    ProcessFailed(UiError),
    ResultImageLoaded {
        result_url: String,
        image: PreviewImage,
        original_bytes: Vec<u8>,
    },
    ResultImageFailed {
        result_url: String,
        reason: String,
    },
    Error(UiError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorCategory {
    Transport,
    Validation,
    Backend,
    Unknown,
}

impl UiErrorCategory {
    pub fn label(self) -> &'static str {
        match self {
            UiErrorCategory::Transport => "Connection",
            UiErrorCategory::Validation => "Upload",
            UiErrorCategory::Backend => "Backend",
            UiErrorCategory::Unknown => "Error",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorContext {
    BackendStartup,
    Upload,
    Submit,
    General,
}

#[derive(Debug, Clone)]
pub struct UiError {
    category: UiErrorCategory,
    context: UiErrorContext,
    message: String,
}

impl UiError {
    pub fn from_message(context: UiErrorContext, message: impl Into<String>) -> Self {
        let message = message.into();
        let message_lower = message.to_ascii_lowercase();
        let category = if context == UiErrorContext::Upload
            || message_lower.contains("unsupported file type")
            || message_lower.contains("please upload")
            || message_lower.contains("invalid file type")
        {
            UiErrorCategory::Validation
        } else if message_lower.contains("timeout")
            || message_lower.contains("too long")
            || message_lower.contains("could not reach")
            || message_lower.contains("connection")
            || message_lower.contains("network")
            || message_lower.contains("unavailable")
            || message_lower.contains("disconnected")
        {
            UiErrorCategory::Transport
        } else if context == UiErrorContext::Submit
            || message_lower.contains("failed to process")
            || message_lower.contains("startup failure")
        {
            UiErrorCategory::Backend
        } else {
            UiErrorCategory::Unknown
        };

        Self {
            category,
            context,
            message,
        }
    }

    pub fn category(&self) -> UiErrorCategory {
        self.category
    }

    pub fn context(&self) -> UiErrorContext {
        self.context
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upload_context_is_always_validation() {
        let err = UiError::from_message(UiErrorContext::Upload, "notes.txt: could not read file");
        assert_eq!(err.category(), UiErrorCategory::Validation);
        assert_eq!(err.context(), UiErrorContext::Upload);
    }

    #[test]
    fn unreachable_backend_is_transport() {
        let err = UiError::from_message(
            UiErrorContext::Submit,
            "Could not reach the backend; check that it is running and retry.",
        );
        assert_eq!(err.category(), UiErrorCategory::Transport);
    }

    #[test]
    fn server_detail_during_submit_is_backend() {
        let err = UiError::from_message(UiErrorContext::Submit, "No person detected in image");
        assert_eq!(err.category(), UiErrorCategory::Backend);
        assert_eq!(err.message(), "No person detected in image");
    }

    #[test]
    fn queue_disconnect_is_transport() {
        let err = UiError::from_message(
            UiErrorContext::General,
            "Backend command processor disconnected; restart the app",
        );
        assert_eq!(err.category(), UiErrorCategory::Transport);
    }

    #[test]
    fn unrelated_messages_are_unknown() {
        let err = UiError::from_message(UiErrorContext::General, "something odd");
        assert_eq!(err.category(), UiErrorCategory::Unknown);
    }
}
