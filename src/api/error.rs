use thiserror::Error;

pub type Result<T> = std::result::Result<T, ApiError>;

#[derive(Error, Debug)]
pub enum ApiError {
    /// Connection, timeout, or body read failure
    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The server answered with a non-success status
    #[error("Server rejected request ({status}): {detail}")]
    Rejected { status: u16, detail: String },

    #[error("Unexpected response: {0}")]
    Decode(String),
}

impl ApiError {
    /// Whether repeating the same idempotent request could succeed
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Transport(e) => !e.is_decode() && !e.is_builder(),
            Self::Rejected { status, .. } => *status >= 500,
            Self::Decode(_) => false,
        }
    }

    /// True for a 4xx answer to a mutation (duplicate entry, unknown id, validation)
    pub fn is_rejection(&self) -> bool {
        matches!(self, Self::Rejected { status, .. } if (400..500).contains(status))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_errors_are_rejections_not_retryable() {
        let err = ApiError::Rejected {
            status: 400,
            detail: "Item already exists".to_string(),
        };
        assert!(err.is_rejection());
        assert!(!err.is_retryable());
    }

    #[test]
    fn test_server_errors_are_retryable() {
        let err = ApiError::Rejected {
            status: 503,
            detail: String::new(),
        };
        assert!(!err.is_rejection());
        assert!(err.is_retryable());
        assert!(!ApiError::Decode("bad json".to_string()).is_retryable());
    }
}
