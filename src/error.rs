//! Error types for rdelta

use thiserror::Error;

/// Result type alias for rdelta operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for rdelta
#[derive(Error, Debug)]
pub enum Error {
    /// Clean end of stream. Both the signature builder and the delta engine
    /// treat this as their normal loop-termination signal, never as a failure.
    #[error("end of stream")]
    EndOfStream,

    /// I/O errors (any read failure other than clean EOF)
    #[error("I/O error: {message}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Configuration errors (invalid window size, bad config file)
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Signature format errors (bad magic, version, truncation)
    #[error("Signature error: {message}")]
    Signature { message: String },
}

impl Error {
    /// Create an I/O error with context
    pub fn io(message: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            message: message.into(),
            source,
        }
    }

    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a signature format error
    pub fn signature(message: impl Into<String>) -> Self {
        Self::Signature {
            message: message.into(),
        }
    }

    /// Check whether this is the clean end-of-stream signal
    pub fn is_end_of_stream(&self) -> bool {
        matches!(self, Error::EndOfStream)
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: err.to_string(),
            source: err,
        }
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Self::Config {
            message: format!("TOML parse error: {}", err),
        }
    }
}
