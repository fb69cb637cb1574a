use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

pub const HEALTH_PATH: &str = "/health";
pub const PROCESS_IMAGES_PATH: &str = "/process-images";
pub const USER_IMAGE_FIELD: &str = "user_image";
pub const CLOTHING_IMAGE_FIELD: &str = "clothing_image";

/// Message shown when a failed submission carries no usable `detail`.
pub const DEFAULT_PROCESS_FAILURE: &str = "Failed to process images";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HealthResponse {
    #[serde(default)]
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
}

/// Measurement values as reported by the backend. Missing, null or
/// non-numeric entries decode as `None` so a result image is never lost to a
/// bad measurement; validation happens when the labels are derived.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Measurements {
    #[serde(default, deserialize_with = "lenient_number")]
    pub shoulder_width: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub torso_height: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub chest_width: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub shoulder_to_chest_ratio: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub torso_aspect_ratio: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessImagesResponse {
    pub status: String,
    #[serde(default, deserialize_with = "lenient_measurements")]
    pub measurements: Measurements,
    /// Path relative to the backend base URL, e.g. `/static/result_x.jpg`.
    pub result_url: String,
}

fn lenient_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Value::deserialize(deserializer)?.as_f64())
}

fn lenient_measurements<'de, D>(deserializer: D) -> Result<Measurements, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(raw).unwrap_or_default())
}

/// Error payload returned by the backend on non-2xx responses.
///
/// `detail` is usually a string, but validation failures may carry a list of
/// objects instead, so it is kept as raw JSON.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub detail: Option<Value>,
}

impl ErrorBody {
    pub fn message(&self) -> String {
        match &self.detail {
            Some(Value::String(text)) if !text.trim().is_empty() => text.clone(),
            Some(Value::Null) | None => DEFAULT_PROCESS_FAILURE.to_string(),
            Some(Value::String(_)) => DEFAULT_PROCESS_FAILURE.to_string(),
            Some(other) => other.to_string(),
        }
    }

    /// Extracts the user-facing message from a raw response body.
    pub fn message_from_body(body: &[u8]) -> String {
        serde_json::from_slice::<ErrorBody>(body)
            .map(|parsed| parsed.message())
            .unwrap_or_else(|_| DEFAULT_PROCESS_FAILURE.to_string())
    }
}

#[cfg(test)]
#[path = "tests/protocol_tests.rs"]
mod tests;
