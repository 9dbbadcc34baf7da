//! Live archive coordinator
//!
//! [`LiveArchiver`] owns the session registry and runs the two handlers:
//! - [`LiveArchiver::publish`] registers an archive event and a push target
//! - [`LiveArchiver::unpublish`] tears them down and cuts the live window into
//!   sequential clips
//!
//! Hosts drive it through the [`StreamLifecycle`] hooks. Nothing in here ever
//! fails the host's stream: every error is logged and the step skipped.

pub mod clip;
pub mod finalize;
pub mod lifecycle;
pub mod publish;

use crate::client::ClientProvider;
use crate::config::{ArchiverConfig, ConfigSource};
use crate::registry::{SessionRegistry, StreamId};
use crate::stats::{ArchiverStats, StatsSnapshot};

pub use clip::{clip_name, Clip};
pub use finalize::FinalizeReport;
pub use lifecycle::StreamLifecycle;
pub use publish::PublishOutcome;

/// Prefix of push target stream names
///
/// The push target re-ingests the stream under this prefix; publishes with
/// the prefix are the archiver's own output and are ignored.
pub const TARGET_PREFIX: &str = "s3-";

/// Sessions older than this are treated as linear channels and not clipped
pub const LINEAR_THRESHOLD_HOURS: i64 = 24;

/// Whether a stream name belongs to the archiver's own push target output
pub fn is_reserved(display_name: &str) -> bool {
    display_name.starts_with(TARGET_PREFIX)
}

/// Coordinates archiving for every stream of a host
pub struct LiveArchiver<P, C> {
    provider: P,
    config: C,
    registry: SessionRegistry,
    stats: ArchiverStats,
}

impl<P: ClientProvider, C: ConfigSource> LiveArchiver<P, C> {
    /// Create an archiver building clients with `provider` and reading
    /// configuration from `config`
    pub fn new(provider: P, config: C) -> Self {
        Self {
            provider,
            config,
            registry: SessionRegistry::new(),
            stats: ArchiverStats::new(),
        }
    }

    /// Get a reference to the session registry
    pub fn registry(&self) -> &SessionRegistry {
        &self.registry
    }

    /// Current activity counters
    pub fn stats(&self) -> StatsSnapshot {
        self.stats.snapshot()
    }

    /// Number of streams with an active session
    ///
    /// Waits for any running handler to finish.
    pub async fn active_sessions(&self) -> usize {
        self.registry.len().await
    }

    /// Build an archive client if the configuration enables archiving
    ///
    /// Setup failures are logged and treated as archiving being unavailable.
    fn connect_archive(&self, stream: &StreamId, config: &ArchiverConfig) -> Option<P::Archive> {
        let Some(settings) = config.archive_settings() else {
            tracing::debug!(stream = %stream, "No archive domain configured, archiving disabled");
            return None;
        };

        match self.provider.archive_client(&settings) {
            Ok(client) => Some(client),
            Err(e) => {
                self.stats.record_step_failure();
                tracing::error!(
                    stream = %stream,
                    domain = %settings.domain,
                    error = %e,
                    "Archive client setup failed, continuing without archiving"
                );
                None
            }
        }
    }
}
