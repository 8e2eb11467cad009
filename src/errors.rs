use thiserror::Error;

/// Everything that can go wrong while talking to the backend, plus the
/// ambient configuration layer. Chat errors never propagate past the widget
/// boundary: each one settles as an error-styled bot message.
#[derive(Debug, Error)]
pub enum ChatError {
    /// The backend answered with a non-2xx status. The body is opaque
    /// diagnostic text and is surfaced verbatim next to the status code.
    #[error("Server error {status}: {body}")]
    Http { status: u16, body: String },

    /// 2xx response whose JSON body has no usable `answer` field.
    #[error("Invalid response format from server")]
    InvalidResponse,

    /// The request never completed: connection refused, DNS, body read or
    /// JSON decode failure.
    #[error("{0}")]
    Network(#[from] reqwest::Error),

    #[error("configuration error: {0}")]
    Config(String),
}

pub type ChatResult<T> = Result<T, ChatError>;

impl ChatError {
    pub fn config_error(msg: impl Into<String>) -> Self {
        ChatError::Config(msg.into())
    }
}
