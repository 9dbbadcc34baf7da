//! Session registry
//!
//! Tracks which streams are currently publishing and what was registered for
//! them, from publish until unpublish.
//!
//! # Concurrency
//!
//! ```text
//!                 LiveArchiver
//!         ┌──────────────────────────┐
//!         │ SessionRegistry          │
//!         │   Mutex<HashMap<         │
//!         │     StreamId, Session>>  │
//!         └────────────┬─────────────┘
//!                      │ lock() held for the whole handler body
//!          ┌───────────┴───────────┐
//!          ▼                       ▼
//!     publish(s1)            unpublish(s2)
//!     create_event           remove_and_take
//!     create_stream_target   delete_stream_target
//!     register               create_clip ... delete_event
//! ```
//!
//! Handlers hold the [`RegistryGuard`] across every network call they make, so
//! publish and unpublish processing is serialized across all streams of one
//! archiver. A stream can never be registered twice or finalized twice.

pub mod error;
pub mod key;
pub mod session;
pub mod store;

pub use error::RegistryError;
pub use key::StreamId;
pub use session::Session;
pub use store::{RegistryGuard, SessionRegistry};
