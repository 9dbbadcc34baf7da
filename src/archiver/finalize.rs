//! Unpublish handling
//!
//! Finalization removes the session first, then works through the teardown
//! steps. Each step is independent: a failing push target deletion does not
//! prevent archiving, and a failing clip run does not prevent the archive
//! event from being deleted.

use chrono::Utc;

use crate::client::{ArchiveClient, ClientProvider, PushTargetClient};
use crate::config::{ArchiverConfig, ConfigSource};
use crate::error::Result;
use crate::registry::{Session, StreamId};

use super::clip::{archive_clips, Clip};
use super::{LiveArchiver, LINEAR_THRESHOLD_HOURS};

/// What finalizing a session did
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FinalizeReport {
    pub stream_id: StreamId,
    pub display_name: String,
    /// Push target was deleted
    pub target_deleted: bool,
    /// Session was too old to clip and was treated as a linear channel
    pub linear: bool,
    /// Clips confirmed by the archive service, in order
    pub clips: Vec<Clip>,
    /// Archive event registration was deleted
    pub event_deleted: bool,
}

impl FinalizeReport {
    fn new(session: &Session) -> Self {
        Self {
            stream_id: session.stream_id().clone(),
            display_name: session.display_name().to_string(),
            target_deleted: false,
            linear: false,
            clips: Vec::new(),
            event_deleted: false,
        }
    }
}

/// Whether a session of the given age is too old to be archived as VOD
pub fn is_linear(age: chrono::Duration) -> bool {
    age > chrono::Duration::hours(LINEAR_THRESHOLD_HOURS)
}

impl<P: ClientProvider, C: ConfigSource> LiveArchiver<P, C> {
    /// Handle a stream that stopped publishing
    ///
    /// Returns `None` when the stream has no session, which covers repeated
    /// unpublish and destroy notifications and publishes that never completed.
    pub async fn unpublish(&self, stream: &StreamId) -> Option<FinalizeReport> {
        let mut sessions = self.registry.lock().await;

        let Some(session) = sessions.remove_and_take(stream) else {
            tracing::debug!(stream = %stream, "No active session, nothing to finalize");
            return None;
        };

        tracing::info!(stream = %stream, name = session.display_name(), "Finalizing session");

        let report = self.finalize(session).await;
        self.stats.record_finalized();
        drop(sessions);

        tracing::info!(
            stream = %stream,
            target_deleted = report.target_deleted,
            linear = report.linear,
            clips = report.clips.len(),
            event_deleted = report.event_deleted,
            "Session finalized"
        );

        Some(report)
    }

    async fn finalize(&self, session: Session) -> FinalizeReport {
        let mut report = FinalizeReport::new(&session);
        let stream = session.stream_id();

        let config = match self.config.load(&stream.app) {
            Ok(config) => config,
            Err(e) => {
                self.stats.record_step_failure();
                tracing::error!(
                    stream = %stream,
                    error = %e,
                    "Failed to load configuration, skipping teardown"
                );
                return report;
            }
        };

        match self.delete_target(&session, &config).await {
            Ok(()) => {
                report.target_deleted = true;
                tracing::info!(
                    stream = %stream,
                    target = session.display_name(),
                    "Stream target deleted"
                );
            }
            Err(e) => {
                self.stats.record_step_failure();
                tracing::error!(stream = %stream, error = %e, "Failed to delete stream target");
            }
        }

        let Some(archive) = self.connect_archive(stream, &config) else {
            return report;
        };

        let Some(resource) = session.archive_resource() else {
            tracing::warn!(
                stream = %stream,
                "No archive event registered for session, nothing to archive"
            );
            return report;
        };

        if is_linear(session.age(Utc::now())) {
            report.linear = true;
            tracing::info!(
                stream = %stream,
                start = %session.start_time(),
                threshold_hours = LINEAR_THRESHOLD_HOURS,
                "Session treated as linear channel, skipping clips"
            );
        } else {
            tracing::info!(stream = %stream, resource = %resource, "Archiving session as clips");

            let run = archive_clips(
                &archive,
                resource,
                session.display_name(),
                session.start_time(),
                config.archive_chunk_duration,
            )
            .await;

            self.stats.record_clips(run.clips.len() as u64);
            if let Some(e) = run.error {
                self.stats.record_step_failure();
                tracing::error!(
                    stream = %stream,
                    clips = run.clips.len(),
                    error = %e,
                    "Clip archiving aborted"
                );
            }
            report.clips = run.clips;
        }

        match archive.delete_event(resource).await {
            Ok(()) => {
                report.event_deleted = true;
                tracing::info!(stream = %stream, resource = %resource, "Archive event deleted");
            }
            Err(e) => {
                self.stats.record_step_failure();
                tracing::error!(
                    stream = %stream,
                    resource = %resource,
                    error = %e,
                    "Failed to delete archive event"
                );
            }
        }

        report
    }

    async fn delete_target(&self, session: &Session, config: &ArchiverConfig) -> Result<()> {
        let push = self.provider.push_target_client(&config.push_api_credentials())?;
        push.delete_stream_target(&session.stream_id().app, session.display_name())
            .await
    }
}
