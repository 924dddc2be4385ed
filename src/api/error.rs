use thiserror::Error;

/// Any failure talking to the bug or AI service, normalized to a message
/// that can be shown to the user as-is.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// The service could not be reached at all.
    #[error("{message}")]
    Connection { message: String },

    /// The service answered with a non-2xx status.
    #[error("{message}")]
    Status { status: u16, message: String },

    /// A 2xx response whose body did not have the expected shape.
    #[error("{0}")]
    InvalidResponse(String),
}

impl ApiError {
    /// The user-facing message.
    pub fn message(&self) -> &str {
        match self {
            Self::Connection { message } | Self::Status { message, .. } => message,
            Self::InvalidResponse(message) => message,
        }
    }

    /// Whether the service was unreachable, as opposed to answering badly.
    pub fn is_connection(&self) -> bool {
        matches!(self, Self::Connection { .. })
    }

    /// HTTP status, when the service answered.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}
