use board_core::errors::BoardError;
use thiserror::Error;

pub type ClientResult<T> = Result<T, ClientError>;

/// Why a client request did not produce a response tree.
///
/// The client never retries; the caller decides what to do next.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ClientError {
    /// The backend refused or failed to resolve the operation.
    #[error("{name}: {message}")]
    Rejected { name: String, message: String },

    /// The request never reached the backend, or its answer was unusable.
    #[error("transport failure: {0}")]
    Transport(String),
}

impl ClientError {
    pub fn transport(msg: impl Into<String>) -> Self {
        Self::Transport(msg.into())
    }

    /// Message of a rejection, if this is one.
    pub fn rejection(&self) -> Option<&str> {
        match self {
            Self::Rejected { message, .. } => Some(message),
            Self::Transport(_) => None,
        }
    }
}

impl From<BoardError> for ClientError {
    fn from(err: BoardError) -> Self {
        Self::Rejected {
            name: err.name().to_string(),
            message: err.message,
        }
    }
}
