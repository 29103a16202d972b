use thiserror::Error;

/// Failure of a single backend request.
///
/// Every variant is surfaced to callers the same way: the operation failed and
/// nothing was retried.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum RequestError {
    #[error("HTTP error! status: {status}")]
    Status { status: u16 },
    #[error("Network error: {0}")]
    Network(String),
    #[error("Invalid response body: {0}")]
    Decode(String),
    #[error("Invalid endpoint: {0}")]
    InvalidEndpoint(String),
}

/// Errors returned by the application actor to its callers.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum AppError {
    #[error("Request failed: {0}")]
    Request(#[from] RequestError),
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
    #[error("Background task failed: {0}")]
    TaskFailed(String),
}

#[derive(Debug, Clone, Error, PartialEq)]
pub enum ConfigError {
    #[error("Invalid API url {url}: {reason}")]
    InvalidApiUrl { url: String, reason: String },
    #[error("Search debounce must be greater than zero")]
    ZeroDebounce,
}

/// A line typed at the prompt that does not parse as a command.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum CommandError {
    #[error("Unknown command: {0}")]
    Unknown(String),
    #[error("Usage: {0}")]
    Usage(&'static str),
}
