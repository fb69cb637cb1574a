//! Backend commands queued from UI to backend worker.

use shared::upload::SelectedImage;

pub enum BackendCommand {
    CheckHealth,
    ProcessImages {
        user_image: SelectedImage,
        clothing_image: SelectedImage,
    },
    FetchResultImage {
        result_url: String,
    },
}

impl BackendCommand {
    pub fn name(&self) -> &'static str {
        match self {
            BackendCommand::CheckHealth => "check_health",
            BackendCommand::ProcessImages { .. } => "process_images",
            BackendCommand::FetchResultImage { .. } => "fetch_result_image",
        }
    }
}
