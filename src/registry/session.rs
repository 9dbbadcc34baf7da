//! Per-stream session state

use chrono::{DateTime, Utc};

use crate::client::ResourceId;

use super::key::StreamId;

/// One publish-to-unpublish window of a live stream
///
/// Created by the publish handler once the push target is in place and
/// consumed by value by the finalizer. Never mutated in between.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    stream_id: StreamId,
    display_name: String,
    start_time: DateTime<Utc>,
    archive_resource: Option<ResourceId>,
}

impl Session {
    /// Create a session with an explicit start time
    pub fn new(
        stream_id: StreamId,
        display_name: impl Into<String>,
        start_time: DateTime<Utc>,
        archive_resource: Option<ResourceId>,
    ) -> Self {
        Self {
            stream_id,
            display_name: display_name.into(),
            start_time,
            archive_resource,
        }
    }

    /// Create a session starting now
    pub fn started_now(
        stream_id: StreamId,
        display_name: impl Into<String>,
        archive_resource: Option<ResourceId>,
    ) -> Self {
        Self::new(stream_id, display_name, Utc::now(), archive_resource)
    }

    pub fn stream_id(&self) -> &StreamId {
        &self.stream_id
    }

    /// Human-readable stream name
    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    /// When the publish was registered
    pub fn start_time(&self) -> DateTime<Utc> {
        self.start_time
    }

    /// Archive event registered for this session, if any
    pub fn archive_resource(&self) -> Option<&ResourceId> {
        self.archive_resource.as_ref()
    }

    /// Time elapsed since the session started, as seen at `now`
    pub fn age(&self, now: DateTime<Utc>) -> chrono::Duration {
        now - self.start_time
    }
}
