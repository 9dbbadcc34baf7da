//! live-archiver: archive live streams as sequential VOD clips
//!
//! When a stream starts publishing the archiver registers it with an archive
//! service and starts a push target that forwards the live data into object
//! storage. When the stream stops, the push target is removed and the live
//! window is cut into clips (`"<name>: Part 1"`, `"<name>: Part 2"`, ...),
//! each starting where the service reported the previous one ended.
//!
//! The archiver is host-agnostic. The host:
//! - implements [`ArchiveClient`] and [`PushTargetClient`] over its REST clients
//!   and builds them through a [`ClientProvider`]
//! - supplies configuration snapshots through a [`ConfigSource`]
//! - forwards stream notifications to the [`StreamLifecycle`] hooks
//!
//! Archiving is best-effort. No failure inside the archiver is returned to the
//! host or interrupts the live stream.
//!
//! # Example
//!
//! ```no_run
//! use live_archiver::{
//!     ArchiverConfig, ClientProvider, LiveArchiver, StaticConfig, StreamId, StreamLifecycle,
//! };
//!
//! async fn run<P: ClientProvider>(provider: P) -> live_archiver::Result<()> {
//!     let config = ArchiverConfig::from_properties([
//!         ("archiveDomain", "archive.example.com"),
//!         ("ingestBucketName", "live-ingest"),
//!         ("archiveBucketName", "live-archive"),
//!         ("storageRegion", "eu-west-1"),
//!     ])?;
//!     let archiver = LiveArchiver::new(provider, StaticConfig::new(config));
//!
//!     let stream = StreamId::new("live", "42");
//!     archiver.on_publish(&stream, "Evening News").await;
//!     // ... stream runs ...
//!     archiver.on_unpublish(&stream, "Evening News").await;
//!     Ok(())
//! }
//! ```

pub mod archiver;
pub mod client;
pub mod config;
pub mod error;
pub mod registry;
pub mod stats;

#[cfg(test)]
pub(crate) mod testing;

// Re-export main types for convenience
pub use archiver::{
    Clip, FinalizeReport, LiveArchiver, PublishOutcome, StreamLifecycle, TARGET_PREFIX,
};
pub use client::{
    ArchiveClient, ArchiveSettings, Bucket, ClientProvider, ClipStatus, PushApiCredentials,
    PushTargetClient, ResourceId, StreamTargetSpec,
};
pub use config::{ArchiverConfig, ConfigSource, StaticConfig};
pub use error::{Error, Result};
pub use registry::{Session, SessionRegistry, StreamId};
pub use stats::StatsSnapshot;
