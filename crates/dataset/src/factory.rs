use std::sync::Arc;

use quarry_common::Result;
use quarry_engine::BackendRegistry;
use quarry_pool::ConnectionPool;

use crate::table::{DatasetConfig, TableDataset};

/// Builds datasets that share one [`ConnectionPool`].
#[derive(Debug, Clone, Default)]
pub struct DatasetFactory {
    pool: Arc<ConnectionPool>,
}

impl DatasetFactory {
    pub fn new(pool: Arc<ConnectionPool>) -> Self {
        Self { pool }
    }

    pub fn with_registry(registry: BackendRegistry) -> Self {
        Self::new(Arc::new(ConnectionPool::new(registry)))
    }

    pub fn pool(&self) -> &Arc<ConnectionPool> {
        &self.pool
    }

    pub fn table_dataset(&self, config: DatasetConfig) -> Result<TableDataset> {
        TableDataset::new(config, Arc::clone(&self.pool))
    }
}
