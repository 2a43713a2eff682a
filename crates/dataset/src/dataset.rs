use async_trait::async_trait;
use quarry_common::{Options, Result};

/// A named, catalog-configured unit of data a pipeline node can read.
#[async_trait]
pub trait Dataset: Send + Sync {
    type Output: Send;

    async fn load(&self) -> Result<Self::Output>;

    /// The dataset's configuration, for logs and diagnostics.
    fn describe(&self) -> Options;
}

/// The write capability. Read-only datasets simply do not implement it.
#[async_trait]
pub trait SaveDataset: Dataset {
    type Input: Send;

    async fn save(&self, data: Self::Input) -> Result<()>;
}
