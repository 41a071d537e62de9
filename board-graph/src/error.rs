use board_core::errors::{BoardError, ErrorKind};
use thiserror::Error;

/// Result type for resolution.
pub type GraphResult<T> = Result<T, GraphError>;

/// Why an operation could not be resolved.
///
/// Any error aborts the whole operation; no partial response tree is returned.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GraphError {
    /// An entity requested by id does not exist.
    #[error("{type_name} not found: {id}")]
    NotFound { type_name: &'static str, id: String },

    /// A write was attempted without an authenticated principal.
    #[error("Unauthorized")]
    Unauthorized,

    /// Any other failure during the tree walk.
    #[error("{0}")]
    Resolution(String),

    /// The schema and the registered resolvers disagree.
    #[error("invalid resolver configuration: {0}")]
    Configuration(String),
}

impl GraphError {
    pub fn not_found(type_name: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            type_name,
            id: id.into(),
        }
    }

    pub fn resolution(msg: impl Into<String>) -> Self {
        Self::Resolution(msg.into())
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Client-facing structured error.
    pub fn to_board_error(&self) -> BoardError {
        match self {
            Self::NotFound { .. } => BoardError::not_found(self.to_string()),
            Self::Unauthorized => BoardError::not_authenticated(self.to_string()),
            Self::Resolution(msg) => BoardError::bad_request(msg.clone()),
            Self::Configuration(_) => BoardError::general_error(self.to_string()),
        }
    }
}

impl From<anyhow::Error> for GraphError {
    fn from(err: anyhow::Error) -> Self {
        match BoardError::from_anyhow(&err) {
            Some(board) => match board.kind {
                ErrorKind::NotAuthenticated => Self::Unauthorized,
                _ => Self::Resolution(board.message.clone()),
            },
            None => Self::Resolution(err.to_string()),
        }
    }
}
