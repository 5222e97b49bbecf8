//! Error taxonomy for the core engine.
//!
//! Per-item results (404, unexpected status, failed verification) are not
//! errors; they are reported as [`crate::summary::ItemOutcome`] values. Only
//! the conditions below escalate to the caller.

use crate::image_dir::ImageId;

#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// Bad arguments (ranges, counts, non-directory paths). Raised before any
    /// network activity.
    #[error("invalid input: {0}")]
    Validation(String),

    /// A `.png` file in the output directory whose stem is not an image ID.
    #[error(
        "invalid file name: {name}. Expected the output directory to only contain \
         names matching the \"<id>.png\" pattern"
    )]
    NamingConvention { name: String },

    /// libcurl failed before a status code was received (DNS, connect, reset, timeout).
    #[error("transport error fetching image {id}: {source}")]
    Transport {
        id: ImageId,
        #[source]
        source: curl::Error,
    },

    /// Local filesystem failure.
    #[error("{context}: {source}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid endpoint: {0}")]
    Endpoint(#[from] url::ParseError),

    #[error("batch task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

impl FetchError {
    pub(crate) fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        FetchError::Io {
            context: context.into(),
            source,
        }
    }

    /// True for network-level failures (the only kind the CLI reports and swallows).
    pub fn is_transport(&self) -> bool {
        matches!(self, FetchError::Transport { .. })
    }
}

pub type Result<T, E = FetchError> = std::result::Result<T, E>;
