use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The server answered with an error envelope.
    #[error("{status}: {message}")]
    Api { status: u16, message: String },

    #[error("response had no data: {0}")]
    MissingData(String),

    #[error("malformed JSON: {0}")]
    Json(#[from] serde_json::Error),
}

impl ClientError {
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Api { status, .. } => Some(*status),
            ClientError::Http(e) => e.status().map(|s| s.as_u16()),
            ClientError::MissingData(_) | ClientError::Json(_) => None,
        }
    }
}
