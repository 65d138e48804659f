use thiserror::Error;

/// Failures outside the dispatch loop: reading and checking a run
/// configuration. The engine and entities themselves cannot fail.
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid parameter `{name}`: {value} ({reason})")]
    InvalidParameter {
        name: &'static str,
        value: String,
        reason: &'static str,
    },

    #[error("cannot read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed config: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    pub(crate) fn invalid(name: &'static str, value: impl ToString, reason: &'static str) -> Self {
        Self::InvalidParameter {
            name,
            value: value.to_string(),
            reason,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
