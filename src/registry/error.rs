//! Registry error types

use super::key::StreamId;

/// Error type for registry operations
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    /// Stream already has an active session
    #[error("stream already has an active session: {0}")]
    AlreadyActive(StreamId),
}
