use std::{sync::Arc, time::Duration};

use async_trait::async_trait;
use reqwest::{
    multipart::{Form, Part},
    Client,
};
use shared::{
    domain::ImageSlot,
    protocol::{ErrorBody, HealthResponse, ProcessImagesResponse, HEALTH_PATH, PROCESS_IMAGES_PATH},
    upload::SelectedImage,
};
use tracing::{debug, info, warn};
use url::Url;

pub mod config;
pub mod error;
pub mod health;

pub use config::ClientSettings;
pub use error::ClientError;
pub use health::{HealthMonitor, HealthMonitorHandle};

pub type Result<T, E = ClientError> = std::result::Result<T, E>;

/// Liveness of the processing backend as last observed by a health probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BackendStatus {
    #[default]
    Checking,
    Connected,
    Offline,
}

impl BackendStatus {
    pub fn label(self) -> &'static str {
        match self {
            BackendStatus::Checking => "Checking...",
            BackendStatus::Connected => "Connected",
            BackendStatus::Offline => "Offline",
        }
    }

    pub fn is_connected(self) -> bool {
        self == BackendStatus::Connected
    }
}

#[async_trait]
pub trait BackendApi: Send + Sync {
    async fn health(&self) -> Result<HealthResponse>;
    async fn process_images(
        &self,
        user_image: &SelectedImage,
        clothing_image: &SelectedImage,
    ) -> Result<ProcessImagesResponse>;
    async fn fetch_result_image(&self, result_url: &str) -> Result<Vec<u8>>;
}

/// Runs one health probe. Any 2xx answer counts as connected; everything
/// else, including transport failures, is offline.
pub async fn probe(api: &dyn BackendApi) -> BackendStatus {
    match api.health().await {
        Ok(body) => {
            debug!(status = %body.status, "backend health probe succeeded");
            BackendStatus::Connected
        }
        Err(err) => {
            debug!("backend health probe failed: {err}");
            BackendStatus::Offline
        }
    }
}

#[derive(Clone)]
pub struct TryOnClient {
    http: Client,
    base_url: String,
    health_timeout: Duration,
}

impl TryOnClient {
    pub fn new(base_url: &str) -> Result<Self> {
        Ok(Self {
            http: Client::new(),
            base_url: config::normalize_backend_url(base_url)?,
            health_timeout: config::DEFAULT_HEALTH_TIMEOUT,
        })
    }

    pub fn from_settings(settings: &ClientSettings) -> Result<Self> {
        let http = Client::builder()
            .timeout(settings.request_timeout())
            .build()?;
        Ok(Self {
            http,
            base_url: config::normalize_backend_url(&settings.backend_url)?,
            health_timeout: settings.health_timeout(),
        })
    }

    /// Liveness probes give up after `timeout`, independently of the
    /// request timeout used for processing.
    pub fn with_health_timeout(mut self, timeout: Duration) -> Self {
        self.health_timeout = timeout;
        self
    }

    pub fn into_shared(self) -> Arc<dyn BackendApi> {
        Arc::new(self)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Resolves a backend path (or an already absolute URL) against the
    /// configured base. Paths are appended, so a base with a path prefix
    /// keeps it.
    pub fn resolve(&self, path_or_url: &str) -> Result<Url> {
        let raw = if path_or_url.starts_with("http://") || path_or_url.starts_with("https://") {
            path_or_url.to_string()
        } else if path_or_url.starts_with('/') {
            format!("{}{path_or_url}", self.base_url)
        } else {
            format!("{}/{path_or_url}", self.base_url)
        };
        Url::parse(&raw).map_err(|source| ClientError::InvalidUrl { url: raw, source })
    }

    fn image_part(slot: ImageSlot, image: &SelectedImage) -> Result<Part> {
        let part = Part::bytes(image.bytes.clone())
            .file_name(image.file_name.clone())
            .mime_str(image.mime.as_str())?;
        debug!(
            slot = slot.field_name(),
            file_name = %image.file_name,
            size_bytes = image.size_bytes(),
            "prepared multipart image part"
        );
        Ok(part)
    }
}

async fn backend_error(response: reqwest::Response) -> ClientError {
    let status = response.status();
    let body = response.bytes().await.unwrap_or_default();
    let detail = ErrorBody::message_from_body(&body);
    ClientError::Backend {
        status: status.as_u16(),
        detail,
    }
}

#[async_trait]
impl BackendApi for TryOnClient {
    async fn health(&self) -> Result<HealthResponse> {
        let url = self.resolve(HEALTH_PATH)?;
        let response = self
            .http
            .get(url)
            .timeout(self.health_timeout)
            .send()
            .await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::Backend {
                status: status.as_u16(),
                detail: format!("health check returned {status}"),
            });
        }
        Ok(response.json::<HealthResponse>().await.unwrap_or_default())
    }

    async fn process_images(
        &self,
        user_image: &SelectedImage,
        clothing_image: &SelectedImage,
    ) -> Result<ProcessImagesResponse> {
        let url = self.resolve(PROCESS_IMAGES_PATH)?;
        let form = Form::new()
            .part(
                ImageSlot::User.field_name(),
                Self::image_part(ImageSlot::User, user_image)?,
            )
            .part(
                ImageSlot::Clothing.field_name(),
                Self::image_part(ImageSlot::Clothing, clothing_image)?,
            );

        info!(%url, "submitting images for processing");
        let response = self.http.post(url).multipart(form).send().await?;
        if !response.status().is_success() {
            let err = backend_error(response).await;
            warn!("image processing rejected: {err}");
            return Err(err);
        }

        let body = response.bytes().await?;
        let parsed: ProcessImagesResponse = serde_json::from_slice(&body)
            .map_err(|err| ClientError::Decode(format!("process-images payload: {err}")))?;
        info!(
            status = %parsed.status,
            result_url = %parsed.result_url,
            "image processing finished"
        );
        Ok(parsed)
    }

    async fn fetch_result_image(&self, result_url: &str) -> Result<Vec<u8>> {
        let url = self.resolve(result_url)?;
        let response = self.http.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::Backend {
                status: status.as_u16(),
                detail: format!("result image unavailable ({status})"),
            });
        }
        let bytes = response.bytes().await?;
        Ok(bytes.to_vec())
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
