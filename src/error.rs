use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Request to {url} failed with status {status}")]
    Status { status: u16, url: String },

    #[error("Decode error: {0}")]
    Decode(String),

    #[error("Encode error: {0}")]
    Encode(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("{0} is not available")]
    Unavailable(&'static str),
}

impl From<serde_json::Error> for ClientError {
    fn from(err: serde_json::Error) -> Self {
        ClientError::Encode(err.to_string())
    }
}

/// Sink for failures of actions that have no transcript to fall back on
/// (saving a draft, manual saves, refreshing entries, connection tests).
pub trait ErrorReporter {
    fn report(&self, action: &str, err: &ClientError);
}

/// Reporter that only writes to the console log.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogReporter;

impl ErrorReporter for LogReporter {
    fn report(&self, action: &str, err: &ClientError) {
        log::error!("{} failed: {}", action, err);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_error_message_names_url() {
        let err = ClientError::Status {
            status: 502,
            url: "/api/entries/".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Request to /api/entries/ failed with status 502"
        );
    }
}
