//! Host lifecycle hooks
//!
//! Host adapters translate their stream notifications into these calls.
//! Every hook has a no-op default so observers only implement what they need.

use async_trait::async_trait;

use crate::client::ClientProvider;
use crate::config::ConfigSource;
use crate::registry::StreamId;

use super::LiveArchiver;

/// Observer of stream lifecycle events
///
/// # Example
///
/// ```no_run
/// use live_archiver::{StreamId, StreamLifecycle};
///
/// async fn on_host_event(observer: &dyn StreamLifecycle, app: &str, id: &str, name: &str) {
///     let stream = StreamId::new(app, id);
///     observer.on_publish(&stream, name).await;
/// }
/// ```
#[async_trait]
pub trait StreamLifecycle: Send + Sync {
    /// A stream object was created by the host
    async fn on_stream_create(&self, _stream: &StreamId) {}

    /// A stream object was destroyed by the host
    async fn on_stream_destroy(&self, _stream: &StreamId) {}

    /// A stream started publishing under `name`
    async fn on_publish(&self, _stream: &StreamId, _name: &str) {}

    /// A stream stopped publishing
    async fn on_unpublish(&self, _stream: &StreamId, _name: &str) {}
}

#[async_trait]
impl<P: ClientProvider, C: ConfigSource> StreamLifecycle for LiveArchiver<P, C> {
    async fn on_stream_create(&self, stream: &StreamId) {
        tracing::debug!(stream = %stream, "Observing stream");
    }

    async fn on_stream_destroy(&self, stream: &StreamId) {
        tracing::debug!(stream = %stream, "Stream destroyed");
        self.unpublish(stream).await;
    }

    async fn on_publish(&self, stream: &StreamId, name: &str) {
        self.publish(stream, name).await;
    }

    async fn on_unpublish(&self, stream: &StreamId, name: &str) {
        tracing::info!(stream = %stream, name = name, "Unpublish received");
        self.unpublish(stream).await;
    }
}
