use std::sync::Arc;

use log::Logger;

use crate::config::StorageMode;
use crate::store::Store;

/// Everything a handler needs, cloned into each route.
#[derive(Clone)]
pub struct Environment {
    pub logger: Arc<Logger>,
    pub store: Arc<dyn Store + Send + Sync>,
    pub config: Config,
}

impl Environment {
    pub fn new(logger: Arc<Logger>, store: Arc<dyn Store + Send + Sync>, config: Config) -> Self {
        Self {
            logger,
            store,
            config,
        }
    }
}

#[derive(Clone, Copy, Debug)]
pub struct Config {
    pub(crate) mode: StorageMode,
}

impl Config {
    pub fn new(mode: StorageMode) -> Self {
        Self { mode }
    }
}
