use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("unable to read config file {}: {error}", path.display())]
    Read {
        path: PathBuf,
        error: std::io::Error,
    },
    #[error("unable to parse config file {}: {error}", path.display())]
    Parse {
        path: PathBuf,
        error: ron::error::SpannedError,
    },
    #[error("missing config value {key:?}")]
    Missing {
        key: String,
    },
    #[error("invalid config value {key:?}: {message}")]
    Invalid {
        key: String,
        message: String,
    },
}

impl ConfigError {
    #[inline]
    pub fn missing(key: impl Into<String>) -> Self {
        Self::Missing {
            key: key.into(),
        }
    }
}
