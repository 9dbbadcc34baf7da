//! External service clients
//!
//! The archiver drives two services it does not implement:
//! - an archive service that registers live events and cuts VOD clips
//! - a push target API that forwards live stream data into object storage
//!
//! Hosts implement [`ArchiveClient`] and [`PushTargetClient`] over their REST
//! wire clients and hand the archiver a [`ClientProvider`] that builds them.

pub mod archive;
pub mod provider;
pub mod push_target;

pub use archive::{
    ArchiveClient, ArchiveCredentials, ArchiveSettings, Bucket, ClipStatus, ResourceId,
};
pub use provider::ClientProvider;
pub use push_target::{mask_secret, PushApiCredentials, PushTargetClient, StreamTargetSpec};
