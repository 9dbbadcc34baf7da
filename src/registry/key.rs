//! Stream identity

/// Unique identifier for a live stream (host application + stream id)
///
/// The id is whatever the host uses to tell concurrent streams apart; it is
/// unrelated to the stream's display name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StreamId {
    /// Application name (e.g., "live")
    pub app: String,
    /// Host-assigned stream identity
    pub id: String,
}

impl StreamId {
    /// Create a new stream id
    pub fn new(app: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            app: app.into(),
            id: id.into(),
        }
    }
}

impl std::fmt::Display for StreamId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.app, self.id)
    }
}
