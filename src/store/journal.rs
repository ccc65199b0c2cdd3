use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tokio::sync::RwLock;
use tracing::warn;

use crate::models::{PostSession, PreSession, Trade};
use crate::store::{RecordStore, StoreError};

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
struct JournalData {
    #[serde(default)]
    trades: Vec<Trade>,
    #[serde(default)]
    pre_sessions: Vec<PreSession>,
    #[serde(default)]
    post_sessions: Vec<PostSession>,
    #[serde(default)]
    next_id: u64,
}

/// JSON-file-backed record store. The whole journal lives in one document;
/// every mutation rewrites it. Reads are served from memory.
pub struct JournalStore {
    data: RwLock<JournalData>,
    path: Option<PathBuf>,
}

impl JournalStore {
    /// Open a journal file, starting empty if it is missing or unreadable.
    pub fn open(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref().to_path_buf();
        let data = match fs::read_to_string(&path) {
            Ok(content) => match serde_json::from_str::<JournalData>(&content) {
                Ok(data) => data,
                Err(err) => {
                    warn!("journal file {} unreadable, starting empty: {}", path.display(), err);
                    JournalData::default()
                }
            },
            Err(_) => JournalData::default(),
        };
        Self {
            data: RwLock::new(data),
            path: Some(path),
        }
    }

    /// In-memory store with no backing file, for tests.
    pub fn new_fresh() -> Self {
        Self {
            data: RwLock::new(JournalData::default()),
            path: None,
        }
    }

    fn persist(&self, data: &JournalData) -> Result<(), StoreError> {
        let path = match &self.path {
            Some(p) => p,
            None => return Ok(()),
        };
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(data)?;
        fs::write(path, json)?;
        Ok(())
    }

    fn assign_id(data: &mut JournalData, prefix: &str) -> String {
        data.next_id += 1;
        format!("{}-{}", prefix, data.next_id)
    }
}

#[async_trait]
impl RecordStore for JournalStore {
    async fn list_trades(&self) -> Result<Vec<Trade>, StoreError> {
        Ok(self.data.read().await.trades.clone())
    }

    async fn get_trade(&self, id: &str) -> Result<Option<Trade>, StoreError> {
        let data = self.data.read().await;
        Ok(data.trades.iter().find(|t| t.id == id).cloned())
    }

    async fn save_trade(&self, trade: &Trade) -> Result<String, StoreError> {
        let mut data = self.data.write().await;
        let mut trade = trade.clone();
        if trade.id.is_empty() {
            trade.id = Self::assign_id(&mut data, "trade");
        }
        let id = trade.id.clone();
        match data.trades.iter_mut().find(|t| t.id == id) {
            Some(slot) => *slot = trade,
            None => data.trades.push(trade),
        }
        self.persist(&data)?;
        Ok(id)
    }

    async fn delete_trade(&self, id: &str) -> Result<(), StoreError> {
        let mut data = self.data.write().await;
        data.trades.retain(|t| t.id != id);
        self.persist(&data)
    }

    async fn list_presessions(&self) -> Result<Vec<PreSession>, StoreError> {
        Ok(self.data.read().await.pre_sessions.clone())
    }

    async fn get_presession(&self, id: &str) -> Result<Option<PreSession>, StoreError> {
        let data = self.data.read().await;
        Ok(data.pre_sessions.iter().find(|p| p.id == id).cloned())
    }

    async fn save_presession(&self, presession: &PreSession) -> Result<String, StoreError> {
        let mut data = self.data.write().await;
        let mut presession = presession.clone();
        if presession.id.is_empty() {
            presession.id = Self::assign_id(&mut data, "presession");
        }
        let id = presession.id.clone();
        match data.pre_sessions.iter_mut().find(|p| p.id == id) {
            Some(slot) => *slot = presession,
            None => data.pre_sessions.push(presession),
        }
        self.persist(&data)?;
        Ok(id)
    }

    async fn delete_presession(&self, id: &str) -> Result<(), StoreError> {
        let mut data = self.data.write().await;
        data.pre_sessions.retain(|p| p.id != id);
        self.persist(&data)
    }

    async fn list_postsessions(&self) -> Result<Vec<PostSession>, StoreError> {
        Ok(self.data.read().await.post_sessions.clone())
    }

    async fn save_postsession(&self, postsession: &PostSession) -> Result<String, StoreError> {
        let mut data = self.data.write().await;
        let mut postsession = postsession.clone();
        if postsession.id.is_empty() {
            postsession.id = Self::assign_id(&mut data, "postsession");
        }
        let id = postsession.id.clone();
        match data.post_sessions.iter_mut().find(|p| p.id == id) {
            Some(slot) => *slot = postsession,
            None => data.post_sessions.push(postsession),
        }
        self.persist(&data)?;
        Ok(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::decided_trade;
    use crate::models::TradeResult;

    fn temp_journal(tag: &str) -> PathBuf {
        std::env::temp_dir()
            .join(format!("journal_engine_test_{}_{}", tag, std::process::id()))
            .join("journal.json")
    }

    #[tokio::test]
    async fn save_assigns_ids_to_new_records() {
        let store = JournalStore::new_fresh();
        let mut trade = decided_trade(TradeResult::Win, 1.0);
        trade.id.clear();
        let id = store.save_trade(&trade).await.unwrap();
        assert!(!id.is_empty());
        assert!(store.get_trade(&id).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn save_is_an_upsert() {
        let store = JournalStore::new_fresh();
        let mut trade = decided_trade(TradeResult::Win, 1.0);
        trade.id = "t1".to_string();
        store.save_trade(&trade).await.unwrap();

        trade.pair = "GBPUSD".to_string();
        store.save_trade(&trade).await.unwrap();

        let trades = store.list_trades().await.unwrap();
        assert_eq!(trades.len(), 1);
        assert_eq!(trades[0].pair, "GBPUSD");
    }

    #[tokio::test]
    async fn round_trips_through_the_file() {
        let path = temp_journal("roundtrip");
        let _ = fs::remove_file(&path);

        let store = JournalStore::open(&path);
        let mut trade = decided_trade(TradeResult::Win, 2.0);
        trade.id = "t1".to_string();
        store.save_trade(&trade).await.unwrap();

        let reopened = JournalStore::open(&path);
        let trades = reopened.list_trades().await.unwrap();
        assert_eq!(trades.len(), 1);
        assert_eq!(trades[0].id, "t1");
        assert_eq!(trades[0].rr.value(), 2.0);
    }

    #[tokio::test]
    async fn corrupt_file_starts_empty() {
        let path = temp_journal("corrupt");
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "{ not json").unwrap();

        let store = JournalStore::open(&path);
        assert!(store.list_trades().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn delete_removes_the_record() {
        let store = JournalStore::new_fresh();
        let mut trade = decided_trade(TradeResult::Win, 1.0);
        trade.id = "t1".to_string();
        store.save_trade(&trade).await.unwrap();
        store.delete_trade("t1").await.unwrap();
        assert!(store.get_trade("t1").await.unwrap().is_none());
    }
}
