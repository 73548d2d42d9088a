use thiserror::Error;

#[derive(Debug, Error)]
pub enum LineRefError {
    #[error("No active editor found")]
    NoActiveEditor,

    #[error("No workspace folder found")]
    NoWorkspace,

    #[error("No meaningful content selected to summarize")]
    EmptySelection,

    #[error("AI summarization is disabled in settings")]
    AiDisabled,

    #[error("Invalid value for setting `{key}`: {value}")]
    InvalidConfig { key: String, value: String },

    #[error("Failed to connect to inference service: {0}")]
    Connection(String),

    #[error("Request timed out after {0} ms")]
    Timeout(u64),

    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Invalid response from model service: {0}")]
    Model(String),

    #[error("Failed to send HTTP request: {0}")]
    Http(String),

    #[error("Failed to read document: {0}")]
    Io(String),

    #[error("Failed to copy to clipboard: {0}")]
    Clipboard(String),
}

impl LineRefError {
    /// Conditions the user caused on purpose, shown as warnings rather than errors.
    #[must_use]
    pub fn is_warning(&self) -> bool {
        matches!(self, LineRefError::EmptySelection | LineRefError::AiDisabled)
    }

    /// True when the service rejected the request because the model is unknown.
    #[must_use]
    pub fn is_model_not_found(&self) -> bool {
        match self {
            LineRefError::Status { status, body } => {
                *status == 404 || body.to_ascii_lowercase().contains("model")
            }
            _ => false,
        }
    }

    pub(crate) fn from_transport(error: &reqwest::Error, timeout_ms: u64) -> Self {
        if error.is_timeout() {
            LineRefError::Timeout(timeout_ms)
        } else if error.is_connect() {
            LineRefError::Connection(error.to_string())
        } else {
            LineRefError::Http(error.to_string())
        }
    }
}

impl From<std::io::Error> for LineRefError {
    fn from(error: std::io::Error) -> Self {
        LineRefError::Io(error.to_string())
    }
}

pub type Result<T> = std::result::Result<T, LineRefError>;
