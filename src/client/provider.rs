//! Client construction
//!
//! Clients are built per handler invocation from the configuration snapshot
//! loaded for that invocation.

use crate::error::Result;

use super::archive::{ArchiveClient, ArchiveSettings};
use super::push_target::{PushApiCredentials, PushTargetClient};

/// Builds service clients for the archiver
///
/// `archive_client` performs credential setup; its errors are setup failures
/// and disable archiving for the invocation. Neither method should perform
/// long-running network work beyond what authentication requires.
pub trait ClientProvider: Send + Sync {
    type Archive: ArchiveClient;
    type PushTarget: PushTargetClient;

    /// Construct an archive client for the configured tenant
    fn archive_client(&self, settings: &ArchiveSettings) -> Result<Self::Archive>;

    /// Construct a push target client
    fn push_target_client(&self, credentials: &PushApiCredentials) -> Result<Self::PushTarget>;
}
