pub mod config;
pub mod error;
pub mod logging;
pub mod model;
pub mod seed;
pub mod storage;

pub use config::{ClubConfig, CoreConfig, LoggingConfig, StorageBackendKind, StorageConfig};
pub use error::{format_error_chain, CoreError, CoreResult};
pub use logging::init_logging;
pub use storage::{
    open_store, DefaultTable, FileStore, KeyValueStore, MemoryStore, Storage, StorageKey,
};
