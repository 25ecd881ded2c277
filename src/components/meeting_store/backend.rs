use crate::error::{storage_error, MaestroResult};
use async_trait::async_trait;
use redis::{AsyncCommands, Client as RedisClient};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::sync::RwLock;
use tracing::{debug, info};

/// Raw key-value slot holding the serialized meeting collection
#[async_trait]
pub trait MeetingStorage: Send + Sync + 'static {
    /// Short name of the backend for logging
    fn name(&self) -> &'static str;

    /// Read the stored blob, `None` when nothing has been stored yet
    async fn read(&self) -> MaestroResult<Option<String>>;

    /// Replace the stored blob
    async fn write(&self, blob: &str) -> MaestroResult<()>;
}

/// JSON file backend
#[derive(Debug, Clone)]
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    /// Create a file backend writing to the given path
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| "meetings.json".into());
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

#[async_trait]
impl MeetingStorage for FileStorage {
    fn name(&self) -> &'static str {
        "file"
    }

    async fn read(&self) -> MaestroResult<Option<String>> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(storage_error(&format!(
                "Failed to read {}: {}",
                self.path.display(),
                e
            ))),
        }
    }

    async fn write(&self, blob: &str) -> MaestroResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }

        // Write next to the target and rename so readers never see a partial file
        let temp_path = self.temp_path();
        tokio::fs::write(&temp_path, blob).await?;
        tokio::fs::rename(&temp_path, &self.path).await?;

        debug!("Wrote {} bytes to {}", blob.len(), self.path.display());
        Ok(())
    }
}

/// Redis backend keeping the whole collection under a single key
pub struct RedisStorage {
    client: RedisClient,
    key: String,
}

impl RedisStorage {
    /// Create a Redis backend for the given URL and key
    pub fn new(redis_url: &str, key: impl Into<String>) -> MaestroResult<Self> {
        info!("Connecting to Redis at {}", redis_url);

        let client = RedisClient::open(redis_url)
            .map_err(|e| storage_error(&format!("Failed to create Redis client: {}", e)))?;

        Ok(Self {
            client,
            key: key.into(),
        })
    }

    /// Get a Redis connection from the client
    async fn get_connection(&self) -> MaestroResult<redis::aio::MultiplexedConnection> {
        self.client
            .get_multiplexed_async_connection()
            .await
            .map_err(|e| storage_error(&format!("Failed to connect to Redis: {}", e)))
    }
}

#[async_trait]
impl MeetingStorage for RedisStorage {
    fn name(&self) -> &'static str {
        "redis"
    }

    async fn read(&self) -> MaestroResult<Option<String>> {
        let mut conn = self.get_connection().await?;

        let blob: Option<String> = conn
            .get(&self.key)
            .await
            .map_err(|e| storage_error(&format!("Redis GET error: {}", e)))?;

        Ok(blob)
    }

    async fn write(&self, blob: &str) -> MaestroResult<()> {
        let mut conn = self.get_connection().await?;

        conn.set::<_, _, ()>(&self.key, blob)
            .await
            .map_err(|e| storage_error(&format!("Redis SET error: {}", e)))?;

        Ok(())
    }
}

/// In-memory backend (for testing and throwaway runs)
#[derive(Debug, Default)]
pub struct MemoryStorage {
    blob: RwLock<Option<String>>,
}

impl MemoryStorage {
    /// Create an empty in-memory backend
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an in-memory backend pre-filled with a raw blob
    pub fn with_blob(blob: impl Into<String>) -> Self {
        Self {
            blob: RwLock::new(Some(blob.into())),
        }
    }

    /// Current raw blob
    pub async fn blob(&self) -> Option<String> {
        self.blob.read().await.clone()
    }
}

#[async_trait]
impl MeetingStorage for MemoryStorage {
    fn name(&self) -> &'static str {
        "memory"
    }

    async fn read(&self) -> MaestroResult<Option<String>> {
        Ok(self.blob.read().await.clone())
    }

    async fn write(&self, blob: &str) -> MaestroResult<()> {
        *self.blob.write().await = Some(blob.to_string());
        Ok(())
    }
}
