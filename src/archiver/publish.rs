//! Publish handling
//!
//! On publish the archiver registers an archive event (when archiving is
//! configured), starts a push target into the ingest bucket and records a
//! session. Live delivery never depends on archiving: archive failures only
//! drop the archive registration, they never block the push target.

use crate::client::{mask_secret, ArchiveClient, ClientProvider, PushTargetClient, ResourceId};
use crate::config::{ArchiverConfig, ConfigSource};
use crate::error::Result;
use crate::registry::{Session, StreamId};

use super::{is_reserved, LiveArchiver, TARGET_PREFIX};

/// What a publish did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PublishOutcome {
    /// Stream name carries the push target prefix; nothing was done
    Ignored,
    /// Stream already has a session; nothing was done
    AlreadyActive,
    /// Push target created and session stored
    Registered {
        /// Whether an archive event was registered for the session
        archiving: bool,
    },
    /// Setup failed before a session could be stored
    Failed,
}

impl<P: ClientProvider, C: ConfigSource> LiveArchiver<P, C> {
    /// Handle a stream starting to publish
    ///
    /// Never fails: errors are logged and reflected in the returned outcome.
    pub async fn publish(&self, stream: &StreamId, display_name: &str) -> PublishOutcome {
        tracing::info!(stream = %stream, name = display_name, "Publish started");

        if is_reserved(display_name) {
            tracing::debug!(
                stream = %stream,
                name = display_name,
                prefix = TARGET_PREFIX,
                "Push target output stream, not archiving"
            );
            self.stats.record_ignored();
            return PublishOutcome::Ignored;
        }

        let mut sessions = self.registry.lock().await;

        if sessions.contains(stream) {
            tracing::warn!(
                stream = %stream,
                name = display_name,
                "Stream already has an active session"
            );
            self.stats.record_ignored();
            return PublishOutcome::AlreadyActive;
        }

        let session = match self.start_session(stream, display_name).await {
            Ok(session) => session,
            Err(e) => {
                self.stats.record_publish_failed();
                tracing::error!(
                    stream = %stream,
                    name = display_name,
                    error = %e,
                    "Publish setup failed, stream continues without archiving"
                );
                return PublishOutcome::Failed;
            }
        };

        let archiving = session.archive_resource().is_some();
        let start_time = session.start_time();

        if let Err(e) = sessions.register(session) {
            self.stats.record_publish_failed();
            tracing::error!(stream = %stream, error = %e, "Failed to store session");
            return PublishOutcome::Failed;
        }

        self.stats.record_registered();
        tracing::info!(
            stream = %stream,
            name = display_name,
            archiving = archiving,
            start = %start_time,
            "Session registered"
        );

        PublishOutcome::Registered { archiving }
    }

    /// Register archiving and the push target, returning the new session
    async fn start_session(&self, stream: &StreamId, display_name: &str) -> Result<Session> {
        tracing::debug!(stream = %stream, "Loading configuration");
        let config = self.config.load(&stream.app)?;

        let archive_resource = match self.connect_archive(stream, &config) {
            Some(archive) => self.register_event(&archive, &config, stream, display_name).await,
            None => None,
        };

        let push = self.provider.push_target_client(&config.push_api_credentials())?;
        let target = config.stream_target(display_name);
        push.create_stream_target(&stream.app, &target).await?;

        tracing::info!(
            stream = %stream,
            app = %stream.app,
            target = %target.name,
            bucket = %target.bucket,
            region = %target.region,
            access_key = %target.access_key,
            secret_key = %mask_secret(&target.secret_key),
            "Stream target created"
        );

        Ok(Session::started_now(stream.clone(), display_name, archive_resource))
    }

    /// Register a live archive event for the stream
    ///
    /// A failed registration is logged and yields no resource. The publish
    /// still creates the push target and stores a session without an archive
    /// event, so live delivery does not depend on the archive service.
    async fn register_event(
        &self,
        archive: &P::Archive,
        config: &ArchiverConfig,
        stream: &StreamId,
        display_name: &str,
    ) -> Option<ResourceId> {
        let target_name = format!("{}{}", TARGET_PREFIX, display_name);

        match archive
            .create_event(
                &config.ingest_bucket(),
                &config.archive_bucket(),
                &target_name,
                display_name,
            )
            .await
        {
            Ok(Some(resource)) => {
                tracing::info!(
                    stream = %stream,
                    resource = %resource,
                    target = %target_name,
                    "Archive event registered"
                );
                Some(resource)
            }
            Ok(None) => {
                tracing::warn!(
                    stream = %stream,
                    target = %target_name,
                    "Archive event registration returned no resource"
                );
                None
            }
            Err(e) => {
                self.stats.record_step_failure();
                tracing::error!(stream = %stream, error = %e, "Archive event registration failed");
                None
            }
        }
    }
}
