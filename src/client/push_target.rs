//! Push target contract

use async_trait::async_trait;

use crate::error::Result;

/// Credentials for the push target management API
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PushApiCredentials {
    pub username: String,
    pub password: String,
}

/// Destination a live stream is continuously forwarded to
#[derive(Clone, PartialEq, Eq)]
pub struct StreamTargetSpec {
    /// Stream name the target forwards
    pub name: String,
    pub bucket: String,
    pub region: String,
    pub access_key: String,
    pub secret_key: String,
    /// Local directory the push target stages data in
    pub working_directory: String,
    /// Whether staged local files are cleaned up
    pub local_housekeeping: bool,
}

// Hand-written so the secret key never ends up in logs.
impl std::fmt::Debug for StreamTargetSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StreamTargetSpec")
            .field("name", &self.name)
            .field("bucket", &self.bucket)
            .field("region", &self.region)
            .field("access_key", &self.access_key)
            .field("secret_key", &mask_secret(&self.secret_key))
            .field("working_directory", &self.working_directory)
            .field("local_housekeeping", &self.local_housekeeping)
            .finish()
    }
}

/// Mask a secret for logging, keeping at most its last four characters
///
/// Secrets of four characters or fewer are masked entirely.
pub fn mask_secret(secret: &str) -> String {
    let count = secret.chars().count();
    if count <= 4 {
        return "XXXXXXXXXX".to_string();
    }
    let tail: String = secret.chars().skip(count - 4).collect();
    format!("XXXXXXXXXX{}", tail)
}

/// Push target management operations
#[async_trait]
pub trait PushTargetClient: Send + Sync {
    /// Start forwarding the stream described by `target` within `app`
    async fn create_stream_target(&self, app: &str, target: &StreamTargetSpec) -> Result<()>;

    /// Stop forwarding `name` within `app`
    async fn delete_stream_target(&self, app: &str, name: &str) -> Result<()>;
}
