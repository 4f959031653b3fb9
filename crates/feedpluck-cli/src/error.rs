use feedpluck_core::{ApiError, DecodeError, PathParseError, RequestError, RowError};
use thiserror::Error;

/// CLI-level error categories mapped to exit codes.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    InvalidArgument(#[from] RequestError),

    #[error("invalid path: {0}")]
    Path(#[from] PathParseError),

    #[error(transparent)]
    Api(#[from] ApiError),

    #[error("{0}")]
    Decode(#[from] DecodeError),

    #[error("forecast period could not be read: {0}")]
    Row(#[from] RowError),

    #[error("offline fixtures: {0}")]
    Fixture(String),

    #[error(transparent)]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl CliError {
    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::InvalidArgument(_) | Self::Path(_) => 2,
            Self::Api(ApiError::InvalidArgument(_)) => 2,
            Self::Api(ApiError::Network(_)) => 3,
            Self::Api(ApiError::Decode(_)) | Self::Decode(_) | Self::Serialization(_) => 4,
            Self::Api(ApiError::UnexpectedStatus { .. } | ApiError::MissingField { .. }) => 5,
            Self::Row(_) => 5,
            Self::Fixture(_) | Self::Io(_) => 10,
        }
    }
}
