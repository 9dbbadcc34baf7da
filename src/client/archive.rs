//! Archive service contract

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use crate::error::Result;

/// Opaque identifier of a registered archive event
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ResourceId(String);

impl ResourceId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ResourceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Storage bucket together with its region
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bucket {
    pub name: String,
    pub region: String,
}

impl Bucket {
    pub fn new(name: impl Into<String>, region: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            region: region.into(),
        }
    }
}

/// Result of a clip request
///
/// `end` is the archive service's authoritative end of the clip. It is absent
/// when the clip was the last (or an empty) one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClipStatus {
    pub end: Option<DateTime<Utc>>,
}

impl ClipStatus {
    /// Clip that ended at the given instant
    pub fn ended_at(end: DateTime<Utc>) -> Self {
        Self { end: Some(end) }
    }

    /// Clip without a reported end
    pub fn open() -> Self {
        Self { end: None }
    }
}

/// Credentials used to obtain tokens for the archive service
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArchiveCredentials {
    pub auth_domain: Option<String>,
    pub client_id: Option<String>,
    pub client_secret: Option<String>,
    pub audience: Option<String>,
}

/// Everything needed to construct an archive client
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveSettings {
    /// Archive service domain
    pub domain: String,
    /// Archive tenant
    pub client_id: Option<String>,
    pub credentials: ArchiveCredentials,
}

/// Archive service operations
///
/// Each call may fail independently; a failure never invalidates the client.
#[async_trait]
pub trait ArchiveClient: Send + Sync {
    /// Register a live event ingesting from `ingest` and archiving into `archive`
    ///
    /// Returns the event's resource id, or `None` if the service accepted the
    /// request without creating a resource.
    async fn create_event(
        &self,
        ingest: &Bucket,
        archive: &Bucket,
        target_name: &str,
        display_name: &str,
    ) -> Result<Option<ResourceId>>;

    /// Cut a clip of `duration` starting at `start` from the event's recording
    async fn create_clip(
        &self,
        resource: &ResourceId,
        name: &str,
        start: DateTime<Utc>,
        duration: Duration,
    ) -> Result<Option<ClipStatus>>;

    /// Remove the event registration
    async fn delete_event(&self, resource: &ResourceId) -> Result<()>;
}
