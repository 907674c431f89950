use thiserror::Error;

/// Every way an interaction can fail on the client side.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClientError {
    /// The request never produced a response body.
    #[error("request to {endpoint} failed: {reason}")]
    Transport { endpoint: String, reason: String },
    /// The response body did not match the expected shape.
    #[error("malformed response from {endpoint}: {reason}")]
    Decode { endpoint: String, reason: String },
    /// The engine refused the request.
    #[error("{0}")]
    Rejected(String),
    /// The host page is missing something or threw.
    #[error("host page error: {0}")]
    Host(String),
}

impl ClientError {
    pub fn transport(endpoint: &str, reason: impl ToString) -> Self {
        Self::Transport {
            endpoint: endpoint.to_string(),
            reason: reason.to_string(),
        }
    }

    pub fn decode(endpoint: &str, reason: impl ToString) -> Self {
        Self::Decode {
            endpoint: endpoint.to_string(),
            reason: reason.to_string(),
        }
    }

    pub fn host(reason: impl ToString) -> Self {
        Self::Host(reason.to_string())
    }

    /// Engine rejections are expected during play; everything else is a fault.
    pub fn is_rejection(&self) -> bool {
        matches!(self, Self::Rejected(_))
    }
}

pub type ClientResult<T> = Result<T, ClientError>;
