//! Archiver configuration
//!
//! The host hands the archiver a flat key/value snapshot (application
//! properties). [`ArchiverConfig::from_properties`] parses it, and a
//! [`ConfigSource`] produces a fresh snapshot for every handler invocation.

use std::time::Duration;

use parking_lot::RwLock;
use serde::de::{self, value::MapDeserializer, Deserializer};
use serde::Deserialize;

use crate::client::{
    ArchiveCredentials, ArchiveSettings, Bucket, PushApiCredentials, StreamTargetSpec,
};
use crate::error::Result;

/// Default requested clip length
pub const DEFAULT_CHUNK_DURATION: Duration = Duration::from_secs(60 * 60);

/// Configuration snapshot consumed by the publish and unpublish handlers
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ArchiverConfig {
    /// Archive service domain. Archiving is disabled when absent.
    #[serde(deserialize_with = "non_empty")]
    pub archive_domain: Option<String>,

    /// Archive tenant identifier
    #[serde(deserialize_with = "non_empty")]
    pub archive_client_id: Option<String>,

    /// Token issuer domain for the archive service
    #[serde(deserialize_with = "non_empty")]
    pub auth_domain: Option<String>,

    #[serde(deserialize_with = "non_empty")]
    pub auth_client_id: Option<String>,

    #[serde(deserialize_with = "non_empty")]
    pub auth_client_secret: Option<String>,

    #[serde(deserialize_with = "non_empty")]
    pub auth_audience: Option<String>,

    /// Requested length of each archived clip
    #[serde(deserialize_with = "seconds")]
    pub archive_chunk_duration: Duration,

    /// Bucket the push target writes live segments into
    pub ingest_bucket_name: String,

    /// Bucket archived clips end up in
    pub archive_bucket_name: String,

    pub storage_region: String,
    pub storage_access_key: String,
    pub storage_secret_key: String,

    /// Credentials for the push target management API
    pub push_api_username: String,
    pub push_api_password: String,

    /// Local working directory used by the push target
    pub push_working_directory: String,

    /// Whether the push target cleans up its local files
    #[serde(deserialize_with = "flag")]
    pub push_local_housekeeping: bool,
}

impl Default for ArchiverConfig {
    fn default() -> Self {
        Self {
            archive_domain: None,
            archive_client_id: None,
            auth_domain: None,
            auth_client_id: None,
            auth_client_secret: None,
            auth_audience: None,
            archive_chunk_duration: DEFAULT_CHUNK_DURATION,
            ingest_bucket_name: String::new(),
            archive_bucket_name: String::new(),
            storage_region: String::new(),
            storage_access_key: String::new(),
            storage_secret_key: String::new(),
            push_api_username: String::new(),
            push_api_password: String::new(),
            push_working_directory: String::new(),
            push_local_housekeeping: true,
        }
    }
}

impl ArchiverConfig {
    /// Parse a configuration snapshot from key/value properties
    ///
    /// Keys are camelCase (`archiveDomain`, `ingestBucketName`, ...). Missing
    /// keys take their defaults, unknown keys are ignored and blank values
    /// count as absent for optional settings.
    pub fn from_properties<I, K, V>(props: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let entries = props.into_iter().map(|(k, v)| (k.into(), v.into()));
        let deserializer = MapDeserializer::<_, de::value::Error>::new(entries);
        Ok(Self::deserialize(deserializer)?)
    }

    /// Whether an archive domain is configured
    pub fn archiving_enabled(&self) -> bool {
        self.archive_domain.is_some()
    }

    /// Settings needed to construct an archive client, if archiving is enabled
    pub fn archive_settings(&self) -> Option<ArchiveSettings> {
        let domain = self.archive_domain.clone()?;

        Some(ArchiveSettings {
            domain,
            client_id: self.archive_client_id.clone(),
            credentials: ArchiveCredentials {
                auth_domain: self.auth_domain.clone(),
                client_id: self.auth_client_id.clone(),
                client_secret: self.auth_client_secret.clone(),
                audience: self.auth_audience.clone(),
            },
        })
    }

    /// Bucket receiving live segments
    pub fn ingest_bucket(&self) -> Bucket {
        Bucket::new(&self.ingest_bucket_name, &self.storage_region)
    }

    /// Bucket receiving archived clips
    pub fn archive_bucket(&self) -> Bucket {
        Bucket::new(&self.archive_bucket_name, &self.storage_region)
    }

    /// Credentials for the push target management API
    pub fn push_api_credentials(&self) -> PushApiCredentials {
        PushApiCredentials {
            username: self.push_api_username.clone(),
            password: self.push_api_password.clone(),
        }
    }

    /// Push target writing the named stream into the ingest bucket
    pub fn stream_target(&self, name: &str) -> StreamTargetSpec {
        StreamTargetSpec {
            name: name.to_string(),
            bucket: self.ingest_bucket_name.clone(),
            region: self.storage_region.clone(),
            access_key: self.storage_access_key.clone(),
            secret_key: self.storage_secret_key.clone(),
            working_directory: self.push_working_directory.clone(),
            local_housekeeping: self.push_local_housekeeping,
        }
    }

    /// Set the archive domain (enables archiving)
    pub fn archive_domain(mut self, domain: impl Into<String>) -> Self {
        self.archive_domain = Some(domain.into());
        self
    }

    /// Set the archive tenant
    pub fn archive_client_id(mut self, client_id: impl Into<String>) -> Self {
        self.archive_client_id = Some(client_id.into());
        self
    }

    /// Set the archive service credentials
    pub fn auth(
        mut self,
        domain: impl Into<String>,
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
        audience: impl Into<String>,
    ) -> Self {
        self.auth_domain = Some(domain.into());
        self.auth_client_id = Some(client_id.into());
        self.auth_client_secret = Some(client_secret.into());
        self.auth_audience = Some(audience.into());
        self
    }

    /// Set the requested clip length
    pub fn chunk_duration(mut self, duration: Duration) -> Self {
        self.archive_chunk_duration = duration;
        self
    }

    /// Set ingest and archive buckets and their region
    pub fn buckets(
        mut self,
        ingest: impl Into<String>,
        archive: impl Into<String>,
        region: impl Into<String>,
    ) -> Self {
        self.ingest_bucket_name = ingest.into();
        self.archive_bucket_name = archive.into();
        self.storage_region = region.into();
        self
    }

    /// Set storage access keys used by the push target
    pub fn storage_keys(
        mut self,
        access_key: impl Into<String>,
        secret_key: impl Into<String>,
    ) -> Self {
        self.storage_access_key = access_key.into();
        self.storage_secret_key = secret_key.into();
        self
    }

    /// Set push target API credentials
    pub fn push_api(mut self, username: impl Into<String>, password: impl Into<String>) -> Self {
        self.push_api_username = username.into();
        self.push_api_password = password.into();
        self
    }

    /// Set push target working directory and housekeeping flag
    pub fn push_workspace(
        mut self,
        working_directory: impl Into<String>,
        housekeeping: bool,
    ) -> Self {
        self.push_working_directory = working_directory.into();
        self.push_local_housekeeping = housekeeping;
        self
    }
}

fn non_empty<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = String::deserialize(deserializer)?;
    let value = value.trim();
    Ok((!value.is_empty()).then(|| value.to_string()))
}

fn seconds<'de, D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Duration, D::Error> {
    let value = String::deserialize(deserializer)?;
    value
        .trim()
        .parse::<u64>()
        .map(Duration::from_secs)
        .map_err(|e| de::Error::custom(format!("invalid duration {:?}: {}", value, e)))
}

fn flag<'de, D: Deserializer<'de>>(deserializer: D) -> std::result::Result<bool, D::Error> {
    let value = String::deserialize(deserializer)?;
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "yes" | "1" => Ok(true),
        "false" | "no" | "0" => Ok(false),
        _ => Err(de::Error::custom(format!("invalid flag {:?}", value))),
    }
}

/// Source of configuration snapshots
///
/// Called once at the start of every publish and unpublish. `app` is the host
/// application the stream belongs to.
pub trait ConfigSource: Send + Sync {
    fn load(&self, app: &str) -> Result<ArchiverConfig>;
}

impl<F> ConfigSource for F
where
    F: Fn(&str) -> Result<ArchiverConfig> + Send + Sync,
{
    fn load(&self, app: &str) -> Result<ArchiverConfig> {
        self(app)
    }
}

/// Config source returning the same snapshot for every application
///
/// The snapshot can be swapped at runtime; handlers already running keep the
/// copy they loaded.
#[derive(Debug, Default)]
pub struct StaticConfig {
    config: RwLock<ArchiverConfig>,
}

impl StaticConfig {
    pub fn new(config: ArchiverConfig) -> Self {
        Self {
            config: RwLock::new(config),
        }
    }

    /// Replace the snapshot returned by subsequent loads
    pub fn replace(&self, config: ArchiverConfig) {
        *self.config.write() = config;
    }
}

impl ConfigSource for StaticConfig {
    fn load(&self, _app: &str) -> Result<ArchiverConfig> {
        Ok(self.config.read().clone())
    }
}
