use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("backend request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("backend returned {status}: {detail}")]
    Backend { status: u16, detail: String },
    #[error("invalid backend response: {0}")]
    Decode(String),
    #[error("invalid backend url '{url}': {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
}

impl ClientError {
    /// Text shown inline to the user for a failed attempt. Backend-provided
    /// details pass through untouched.
    pub fn user_message(&self) -> String {
        match self {
            ClientError::Backend { detail, .. } => detail.clone(),
            ClientError::Transport(err) if err.is_timeout() => {
                "The backend took too long to respond; please try again.".to_string()
            }
            ClientError::Transport(_) => {
                "Could not reach the backend; check that it is running and retry.".to_string()
            }
            ClientError::Decode(_) => "An unexpected error occurred".to_string(),
            ClientError::InvalidUrl { .. } => self.to_string(),
        }
    }

    pub fn is_unreachable(&self) -> bool {
        matches!(self, ClientError::Transport(err) if err.is_connect() || err.is_timeout())
    }
}
