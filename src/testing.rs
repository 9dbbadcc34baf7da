//! Recording service doubles for tests

use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use parking_lot::Mutex;

use crate::archiver::LiveArchiver;
use crate::client::{
    ArchiveClient, ArchiveSettings, Bucket, ClientProvider, ClipStatus, PushApiCredentials,
    PushTargetClient, ResourceId, StreamTargetSpec,
};
use crate::config::{ArchiverConfig, StaticConfig};
use crate::error::{Error, Result};

/// Install a test subscriber honouring `RUST_LOG`
pub(crate) fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// External call observed by the doubles
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Call {
    ArchiveSetup,
    PushSetup,
    CreateEvent {
        ingest: Bucket,
        archive: Bucket,
        target_name: String,
        display_name: String,
    },
    CreateClip {
        resource: ResourceId,
        name: String,
        start: DateTime<Utc>,
        duration: Duration,
    },
    DeleteEvent(ResourceId),
    CreateTarget {
        app: String,
        target: StreamTargetSpec,
    },
    DeleteTarget {
        app: String,
        name: String,
    },
}

impl Call {
    /// Whether the call reached a remote service (setup calls do not)
    pub(crate) fn is_remote(&self) -> bool {
        !matches!(self, Call::ArchiveSetup | Call::PushSetup)
    }
}

/// Scripted reply to `create_event`
#[derive(Debug, Clone)]
pub(crate) enum EventReply {
    Resource(&'static str),
    Nothing,
    Fail,
}

/// Scripted reply to `create_clip`
#[derive(Debug, Clone)]
pub(crate) enum ClipReply {
    Ended(DateTime<Utc>),
    Open,
    Nothing,
    Fail,
}

/// Shared state behind the mock clients
#[derive(Debug)]
pub(crate) struct MockServices {
    calls: Mutex<Vec<Call>>,
    event_reply: Mutex<EventReply>,
    clip_replies: Mutex<VecDeque<ClipReply>>,
    clip_latency: Mutex<Option<Duration>>,
    pub(crate) fail_archive_setup: Mutex<bool>,
    pub(crate) fail_create_target: Mutex<bool>,
    pub(crate) fail_delete_target: Mutex<bool>,
    pub(crate) fail_delete_event: Mutex<bool>,
}

impl Default for MockServices {
    fn default() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            event_reply: Mutex::new(EventReply::Resource("R")),
            clip_replies: Mutex::new(VecDeque::new()),
            clip_latency: Mutex::new(None),
            fail_archive_setup: Mutex::new(false),
            fail_create_target: Mutex::new(false),
            fail_delete_target: Mutex::new(false),
            fail_delete_event: Mutex::new(false),
        }
    }
}

impl MockServices {
    pub(crate) fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub(crate) fn set_event_reply(&self, reply: EventReply) {
        *self.event_reply.lock() = reply;
    }

    /// Queue clip replies; once exhausted `create_clip` returns nothing
    pub(crate) fn script_clips(&self, replies: impl IntoIterator<Item = ClipReply>) {
        self.clip_replies.lock().extend(replies);
    }

    /// Make every `create_clip` take `latency` before replying
    pub(crate) fn slow_clips(&self, latency: Duration) {
        *self.clip_latency.lock() = Some(latency);
    }

    pub(crate) fn calls(&self) -> Vec<Call> {
        self.calls.lock().clone()
    }

    pub(crate) fn remote_calls(&self) -> Vec<Call> {
        self.calls().into_iter().filter(Call::is_remote).collect()
    }

    pub(crate) fn clear_calls(&self) {
        self.calls.lock().clear();
    }

    /// Clip requests in the order they were made
    pub(crate) fn clip_calls(&self) -> Vec<(String, DateTime<Utc>, Duration)> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                Call::CreateClip {
                    name,
                    start,
                    duration,
                    ..
                } => Some((name, start, duration)),
                _ => None,
            })
            .collect()
    }

    fn record(&self, call: Call) {
        self.calls.lock().push(call);
    }
}

/// Provider handing out clients backed by [`MockServices`]
#[derive(Debug, Clone)]
pub(crate) struct MockProvider {
    pub(crate) services: Arc<MockServices>,
}

impl MockProvider {
    pub(crate) fn new(services: &Arc<MockServices>) -> Self {
        Self {
            services: Arc::clone(services),
        }
    }
}

impl ClientProvider for MockProvider {
    type Archive = MockArchive;
    type PushTarget = MockPushTarget;

    fn archive_client(&self, _settings: &ArchiveSettings) -> Result<MockArchive> {
        self.services.record(Call::ArchiveSetup);
        if *self.services.fail_archive_setup.lock() {
            return Err(Error::ArchiveSetup("token request rejected".into()));
        }
        Ok(MockArchive {
            services: Arc::clone(&self.services),
        })
    }

    fn push_target_client(&self, _credentials: &PushApiCredentials) -> Result<MockPushTarget> {
        self.services.record(Call::PushSetup);
        Ok(MockPushTarget {
            services: Arc::clone(&self.services),
        })
    }
}

pub(crate) struct MockArchive {
    services: Arc<MockServices>,
}

#[async_trait]
impl ArchiveClient for MockArchive {
    async fn create_event(
        &self,
        ingest: &Bucket,
        archive: &Bucket,
        target_name: &str,
        display_name: &str,
    ) -> Result<Option<ResourceId>> {
        self.services.record(Call::CreateEvent {
            ingest: ingest.clone(),
            archive: archive.clone(),
            target_name: target_name.to_string(),
            display_name: display_name.to_string(),
        });

        let reply = self.services.event_reply.lock().clone();
        match reply {
            EventReply::Resource(id) => Ok(Some(ResourceId::new(id))),
            EventReply::Nothing => Ok(None),
            EventReply::Fail => Err(Error::Archive("event registration failed".into())),
        }
    }

    async fn create_clip(
        &self,
        resource: &ResourceId,
        name: &str,
        start: DateTime<Utc>,
        duration: Duration,
    ) -> Result<Option<ClipStatus>> {
        self.services.record(Call::CreateClip {
            resource: resource.clone(),
            name: name.to_string(),
            start,
            duration,
        });

        let latency = *self.services.clip_latency.lock();
        if let Some(latency) = latency {
            tokio::time::sleep(latency).await;
        }

        let reply = self.services.clip_replies.lock().pop_front();
        match reply.unwrap_or(ClipReply::Nothing) {
            ClipReply::Ended(end) => Ok(Some(ClipStatus::ended_at(end))),
            ClipReply::Open => Ok(Some(ClipStatus::open())),
            ClipReply::Nothing => Ok(None),
            ClipReply::Fail => Err(Error::Archive("clip request timed out".into())),
        }
    }

    async fn delete_event(&self, resource: &ResourceId) -> Result<()> {
        self.services.record(Call::DeleteEvent(resource.clone()));
        if *self.services.fail_delete_event.lock() {
            return Err(Error::Archive("event deletion failed".into()));
        }
        Ok(())
    }
}

pub(crate) struct MockPushTarget {
    services: Arc<MockServices>,
}

#[async_trait]
impl PushTargetClient for MockPushTarget {
    async fn create_stream_target(&self, app: &str, target: &StreamTargetSpec) -> Result<()> {
        self.services.record(Call::CreateTarget {
            app: app.to_string(),
            target: target.clone(),
        });
        if *self.services.fail_create_target.lock() {
            return Err(Error::PushTarget("push target API unavailable".into()));
        }
        Ok(())
    }

    async fn delete_stream_target(&self, app: &str, name: &str) -> Result<()> {
        self.services.record(Call::DeleteTarget {
            app: app.to_string(),
            name: name.to_string(),
        });
        if *self.services.fail_delete_target.lock() {
            return Err(Error::PushTarget("push target API unavailable".into()));
        }
        Ok(())
    }
}

/// Configuration with archiving enabled
pub(crate) fn archive_config() -> ArchiverConfig {
    plain_config()
        .archive_domain("archive.example.com")
        .archive_client_id("tenant")
        .auth("auth.example.com", "client", "client-secret", "https://archive")
}

/// Configuration without an archive domain
pub(crate) fn plain_config() -> ArchiverConfig {
    ArchiverConfig::default()
        .chunk_duration(Duration::from_secs(3600))
        .buckets("ingest", "archive", "eu-west-1")
        .storage_keys("AKIA", "storage-secret-1234")
        .push_api("admin", "password")
        .push_workspace("/tmp/push", true)
}

pub(crate) type TestArchiver = LiveArchiver<MockProvider, StaticConfig>;

/// Archiver wired to the given doubles and configuration
pub(crate) fn archiver(services: &Arc<MockServices>, config: ArchiverConfig) -> TestArchiver {
    init_tracing();
    LiveArchiver::new(MockProvider::new(services), StaticConfig::new(config))
}
