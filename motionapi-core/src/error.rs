/// Structured error types for motionapi-core.
///
/// Uses `thiserror` so the server crate can wrap these in its own error
/// types. The binary still reaches for `anyhow` at startup.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Main error type for motionapi-core operations
#[derive(Error, Debug)]
pub enum CoreError {
    /// I/O operation failed
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: io::Error,
    },

    /// A stored document could not be decoded into an entry
    #[error("Document decode error: {source}")]
    Decode {
        #[from]
        source: bson::de::Error,
    },

    /// Config file is not valid TOML for the expected shape
    #[error("Invalid config file {path:?}: {source}")]
    ConfigParse {
        path: PathBuf,
        source: toml::de::Error,
    },

    /// Config file given explicitly but missing
    #[error("Config not found at {path:?}")]
    ConfigNotFound { path: PathBuf },

    /// Configuration error
    #[error("Configuration error: {reason}")]
    Config { reason: String },
}

/// Result type alias for motionapi-core operations
pub type Result<T> = std::result::Result<T, CoreError>;

impl CoreError {
    /// Create a config error
    pub fn config(reason: impl Into<String>) -> Self {
        Self::Config {
            reason: reason.into(),
        }
    }

    /// Create a config parse error
    pub fn config_parse(path: impl Into<PathBuf>, source: toml::de::Error) -> Self {
        Self::ConfigParse {
            path: path.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = CoreError::config("bad bind address");
        assert_eq!(err.to_string(), "Configuration error: bad bind address");

        let err = CoreError::ConfigNotFound {
            path: PathBuf::from("/tmp/motionapi.toml"),
        };
        assert!(err.to_string().contains("/tmp/motionapi.toml"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::PermissionDenied, "denied");
        let err: CoreError = io_err.into();

        assert!(matches!(err, CoreError::Io { .. }));
    }
}
