pub mod journal;

pub use journal::JournalStore;

use async_trait::async_trait;
use thiserror::Error;

use crate::models::{PostSession, PreSession, Trade};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("journal file error: {0}")]
    Io(#[from] std::io::Error),
    #[error("journal encoding error: {0}")]
    Encoding(#[from] serde_json::Error),
}

/// The persistence contract the linking resolver runs against. The rest of
/// the engine is pure and never touches it.
#[async_trait]
pub trait RecordStore: Send + Sync {
    async fn list_trades(&self) -> Result<Vec<Trade>, StoreError>;
    async fn get_trade(&self, id: &str) -> Result<Option<Trade>, StoreError>;
    /// Upsert; returns the record id, assigning one if the record has none.
    async fn save_trade(&self, trade: &Trade) -> Result<String, StoreError>;
    async fn delete_trade(&self, id: &str) -> Result<(), StoreError>;

    async fn list_presessions(&self) -> Result<Vec<PreSession>, StoreError>;
    async fn get_presession(&self, id: &str) -> Result<Option<PreSession>, StoreError>;
    async fn save_presession(&self, presession: &PreSession) -> Result<String, StoreError>;
    async fn delete_presession(&self, id: &str) -> Result<(), StoreError>;

    async fn list_postsessions(&self) -> Result<Vec<PostSession>, StoreError>;
    async fn save_postsession(&self, postsession: &PostSession) -> Result<String, StoreError>;
}
