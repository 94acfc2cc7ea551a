//! Error types

use thiserror::Error;

/// Result type alias using the crate error
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type
///
/// Large error variants are boxed to reduce stack size
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(Box<figment::Error>),

    /// gRPC transport error
    #[error("Transport error: {0}")]
    Transport(Box<tonic::transport::Error>),

    /// Server reflection could not be built
    #[error("Reflection error: {0}")]
    Reflection(String),

    /// Tracing subscriber could not be installed
    #[error("Tracing error: {0}")]
    Tracing(String),

    /// A message did not decode against its own descriptor
    #[error("Descriptor mismatch: {0}")]
    Descriptor(#[from] prost::DecodeError),

    /// JSON encoding failed
    #[error("Encoding error: {0}")]
    Encoding(#[from] serde_json::Error),
}

impl From<figment::Error> for Error {
    fn from(err: figment::Error) -> Self {
        Error::Config(Box::new(err))
    }
}

impl From<tonic::transport::Error> for Error {
    fn from(err: tonic::transport::Error) -> Self {
        Error::Transport(Box::new(err))
    }
}
