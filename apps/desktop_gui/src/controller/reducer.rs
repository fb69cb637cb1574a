//! Window-independent try-on flow state and its transitions.

use client_core::BackendStatus;
use shared::{domain::ImageSlot, protocol::ProcessImagesResponse, upload::SelectedImage};

use crate::backend_bridge::commands::BackendCommand;

pub const MISSING_IMAGES_MESSAGE: &str = "Please upload both a user photo and a clothing image.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppView {
    Upload,
    Result,
}

#[derive(Debug, Default)]
pub struct TryOnState {
    pub backend_status: BackendStatus,
    user_image: Option<SelectedImage>,
    clothing_image: Option<SelectedImage>,
    processing: bool,
    error: Option<String>,
    result: Option<ProcessImagesResponse>,
}

pub enum Action {
    BackendStatusChanged(BackendStatus),
    ImageSelected {
        slot: ImageSlot,
        image: SelectedImage,
    },
    UploadRejected(String),
    ProcessSucceeded(ProcessImagesResponse),
    ProcessFailed(String),
    DismissError,
    Reset,
}

impl TryOnState {
    pub fn view(&self) -> AppView {
        if self.result.is_some() {
            AppView::Result
        } else {
            AppView::Upload
        }
    }

    pub fn image(&self, slot: ImageSlot) -> Option<&SelectedImage> {
        match slot {
            ImageSlot::User => self.user_image.as_ref(),
            ImageSlot::Clothing => self.clothing_image.as_ref(),
        }
    }

    pub fn is_processing(&self) -> bool {
        self.processing
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn result(&self) -> Option<&ProcessImagesResponse> {
        self.result.as_ref()
    }

    /// Whether `result_url` belongs to the result on screen. Image downloads
    /// that finish after a reset or a newer submission fail this check.
    pub fn is_current_result(&self, result_url: &str) -> bool {
        self.result
            .as_ref()
            .is_some_and(|result| result.result_url == result_url)
    }

    pub fn has_both_images(&self) -> bool {
        self.user_image.is_some() && self.clothing_image.is_some()
    }

    pub fn can_submit(&self) -> bool {
        !self.processing && self.has_both_images() && self.backend_status.is_connected()
    }

    /// Starts a submission and returns the command to queue, or `None` when
    /// nothing may be sent. Missing images also set the inline error.
    pub fn begin_submit(&mut self) -> Option<BackendCommand> {
        let (Some(user_image), Some(clothing_image)) =
            (self.user_image.clone(), self.clothing_image.clone())
        else {
            self.error = Some(MISSING_IMAGES_MESSAGE.to_string());
            return None;
        };
        if self.processing || !self.backend_status.is_connected() {
            return None;
        }

        self.processing = true;
        self.error = None;
        Some(BackendCommand::ProcessImages {
            user_image,
            clothing_image,
        })
    }

    /// Rolls back a submission whose command never reached the worker.
    pub fn abort_submit(&mut self, reason: String) {
        self.processing = false;
        self.error = Some(reason);
    }

    pub fn apply(&mut self, action: Action) {
        match action {
            Action::BackendStatusChanged(status) => {
                self.backend_status = status;
            }
            Action::ImageSelected { slot, image } => {
                match slot {
                    ImageSlot::User => self.user_image = Some(image),
                    ImageSlot::Clothing => self.clothing_image = Some(image),
                }
                if self.error.as_deref() == Some(MISSING_IMAGES_MESSAGE) && self.has_both_images()
                {
                    self.error = None;
                }
            }
            Action::UploadRejected(message) => {
                self.error = Some(message);
            }
            Action::ProcessSucceeded(response) => {
                self.processing = false;
                self.error = None;
                self.result = Some(response);
            }
            Action::ProcessFailed(message) => {
                self.processing = false;
                self.error = Some(message);
            }
            Action::DismissError => {
                self.error = None;
            }
            Action::Reset => {
                self.user_image = None;
                self.clothing_image = None;
                self.result = None;
                self.error = None;
                self.processing = false;
            }
        }
    }
}

#[cfg(test)]
#[path = "tests/reducer_tests.rs"]
mod tests;
