//! Error types
//!
//! Every adapter call and configuration step reports failures through
//! [`Error`]. The coordinator logs these and never hands them to the host.

/// Error type for archiver operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Configuration snapshot could not be loaded or parsed
    #[error("configuration error: {0}")]
    Config(String),

    /// Archive client could not be constructed (credentials, endpoint)
    #[error("archive client setup failed: {0}")]
    ArchiveSetup(String),

    /// Archive service call failed
    #[error("archive service error: {0}")]
    Archive(String),

    /// Push target management call failed
    #[error("push target error: {0}")]
    PushTarget(String),
}

impl From<serde::de::value::Error> for Error {
    fn from(e: serde::de::value::Error) -> Self {
        Error::Config(e.to_string())
    }
}

/// Result alias for archiver operations
pub type Result<T> = std::result::Result<T, Error>;
