use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

use serde::Deserialize;
use tracing::{debug, warn};
use url::Url;

use crate::error::ClientError;

pub const CONFIG_FILE_NAME: &str = "tryon.toml";
pub const DEFAULT_HEALTH_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientSettings {
    pub backend_url: String,
    pub health_interval_secs: u64,
    pub health_timeout_secs: u64,
    pub request_timeout_secs: u64,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            backend_url: "http://localhost:8000".into(),
            health_interval_secs: 30,
            health_timeout_secs: DEFAULT_HEALTH_TIMEOUT.as_secs(),
            request_timeout_secs: 120,
        }
    }
}

impl ClientSettings {
    pub fn health_interval(&self) -> Duration {
        Duration::from_secs(self.health_interval_secs.max(1))
    }

    /// Never longer than the request timeout.
    pub fn health_timeout(&self) -> Duration {
        Duration::from_secs(self.health_timeout_secs.max(1)).min(self.request_timeout())
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs.max(1))
    }
}

#[derive(Debug, Default, Deserialize)]
struct FileSettings {
    backend_url: Option<String>,
    health_interval_secs: Option<u64>,
    health_timeout_secs: Option<u64>,
    request_timeout_secs: Option<u64>,
}

/// Defaults, then the first config file found, then environment overrides.
pub fn load_settings() -> ClientSettings {
    let candidates = config_file_candidates();
    load_settings_from(&candidates, |name| std::env::var(name).ok())
}

pub fn load_settings_from(
    candidates: &[PathBuf],
    env: impl Fn(&str) -> Option<String>,
) -> ClientSettings {
    let mut settings = ClientSettings::default();

    if let Some((path, raw)) = candidates
        .iter()
        .find_map(|path| fs::read_to_string(path).ok().map(|raw| (path, raw)))
    {
        debug!(path = %path.display(), "loading client settings file");
        apply_file(&mut settings, path, &raw);
    }

    apply_env(&mut settings, env);
    settings
}

fn config_file_candidates() -> Vec<PathBuf> {
    let mut candidates = vec![PathBuf::from(CONFIG_FILE_NAME)];
    if let Some(dir) = dirs::config_dir() {
        candidates.push(dir.join("tryon").join(CONFIG_FILE_NAME));
    }
    candidates
}

fn apply_file(settings: &mut ClientSettings, path: &Path, raw: &str) {
    let file_cfg = match toml::from_str::<FileSettings>(raw) {
        Ok(file_cfg) => file_cfg,
        Err(err) => {
            warn!(path = %path.display(), "ignoring unreadable settings file: {err}");
            return;
        }
    };

    if let Some(v) = file_cfg.backend_url {
        settings.backend_url = v;
    }
    if let Some(v) = file_cfg.health_interval_secs {
        settings.health_interval_secs = v;
    }
    if let Some(v) = file_cfg.health_timeout_secs {
        settings.health_timeout_secs = v;
    }
    if let Some(v) = file_cfg.request_timeout_secs {
        settings.request_timeout_secs = v;
    }
}

fn apply_env(settings: &mut ClientSettings, env: impl Fn(&str) -> Option<String>) {
    if let Some(v) = env("TRYON_BACKEND_URL") {
        settings.backend_url = v;
    }
    if let Some(v) = env("APP__BACKEND_URL") {
        settings.backend_url = v;
    }

    if let Some(v) = env("APP__HEALTH_INTERVAL_SECS") {
        match v.parse::<u64>() {
            Ok(parsed) => settings.health_interval_secs = parsed,
            Err(_) => warn!(value = %v, "APP__HEALTH_INTERVAL_SECS is not a number"),
        }
    }
    if let Some(v) = env("APP__HEALTH_TIMEOUT_SECS") {
        match v.parse::<u64>() {
            Ok(parsed) => settings.health_timeout_secs = parsed,
            Err(_) => warn!(value = %v, "APP__HEALTH_TIMEOUT_SECS is not a number"),
        }
    }
    if let Some(v) = env("APP__REQUEST_TIMEOUT_SECS") {
        match v.parse::<u64>() {
            Ok(parsed) => settings.request_timeout_secs = parsed,
            Err(_) => warn!(value = %v, "APP__REQUEST_TIMEOUT_SECS is not a number"),
        }
    }
}

/// Trims whitespace and trailing slashes, defaulting to `http://` when no
/// scheme is given, and checks that the result parses as a URL.
pub fn normalize_backend_url(raw: &str) -> Result<String, ClientError> {
    let trimmed = raw.trim().trim_end_matches('/');
    let with_scheme = if trimmed.contains("://") {
        trimmed.to_string()
    } else {
        format!("http://{trimmed}")
    };

    let parsed = Url::parse(&with_scheme).map_err(|source| ClientError::InvalidUrl {
        url: raw.to_string(),
        source,
    })?;
    if parsed.host_str().is_none() {
        return Err(ClientError::InvalidUrl {
            url: raw.to_string(),
            source: url::ParseError::EmptyHost,
        });
    }
    Ok(with_scheme)
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
