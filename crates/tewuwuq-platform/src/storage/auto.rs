//! Storage backend selection.
//!
//! Priority: localStorage → Memory (fallback)

use std::rc::Rc;
use tewuwuq_core::ports::StoragePort;
use tewuwuq_types::config::StorageBackendType;
use super::{LocalStorage, MemoryStorage};

/// Open the best available storage backend.
/// Never fails: a blocked `localStorage` degrades to memory.
pub fn auto_detect_storage() -> Rc<dyn StoragePort> {
    match LocalStorage::open() {
        Ok(local) => {
            log::info!("Storage backend: localStorage");
            Rc::new(local)
        }
        Err(e) => {
            log::warn!("localStorage unavailable ({}), falling back to memory", e);
            Rc::new(MemoryStorage::new())
        }
    }
}

/// Open the backend named in the configuration.
pub fn open_storage(backend: &StorageBackendType) -> Rc<dyn StoragePort> {
    match backend {
        StorageBackendType::Auto | StorageBackendType::LocalStorage => auto_detect_storage(),
        StorageBackendType::Memory => {
            log::info!("Storage backend: memory");
            Rc::new(MemoryStorage::new())
        }
    }
}
