mod actor;
pub mod backend;
mod handle;
pub mod models;
mod store;

pub use backend::{FileStorage, MeetingStorage, MemoryStorage, RedisStorage};
pub use handle::MeetingStoreHandle;
pub use models::{Meeting, MeetingCollection};
pub use store::MeetingStore;

use crate::config::{Config, StoreBackend};
use crate::error::MaestroResult;
use std::sync::Arc;
use tracing::info;

/// Build the storage backend selected by the configuration
pub fn storage_from_config(config: &Config) -> MaestroResult<Arc<dyn MeetingStorage>> {
    let storage: Arc<dyn MeetingStorage> = match config.store_backend {
        StoreBackend::File => {
            info!("Storing meetings in {}", config.store_path.display());
            Arc::new(FileStorage::new(config.store_path.clone()))
        }
        StoreBackend::Redis => Arc::new(RedisStorage::new(
            &config.redis_url,
            config.storage_key.clone(),
        )?),
        StoreBackend::Memory => {
            info!("Storing meetings in memory, nothing survives a restart");
            Arc::new(MemoryStorage::new())
        }
    };
    Ok(storage)
}
