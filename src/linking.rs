use chrono::NaiveDate;
use std::sync::Arc;
use tracing::{debug, warn};

use crate::models::{default_mindset, default_zones, Execution, PreSession, Trade};
use crate::store::{RecordStore, StoreError};

/// Context a caller supplies for a plan that does not exist yet. The UI may
/// hand out a plan id before the plan itself is saved; linking must not
/// force a save order on it.
#[derive(Debug, Clone, Default)]
pub struct PresessionSeed {
    pub date: Option<NaiveDate>,
    pub pair: String,
    pub execution: Option<Execution>,
}

impl PresessionSeed {
    fn build(&self, id: &str) -> PreSession {
        PreSession {
            id: id.to_string(),
            date: self.date,
            pair: self.pair.clone(),
            narrative: None,
            execution: self.execution,
            outcome: None,
            linked_trades: Vec::new(),
            parent_session_id: None,
            mindset: default_mindset(),
            zones: default_zones(),
        }
    }
}

/// Keeps a plan's `linked_trades` list and each trade's back-reference in
/// agreement, and mediates attach/detach.
///
/// The trade-side back-reference is canonical; the plan's list is a cache
/// that `resolve_linked_trades` repairs on read.
pub struct LinkResolver {
    store: Arc<dyn RecordStore>,
}

impl LinkResolver {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }

    /// Attach a trade to a plan. Idempotent: linking an already-linked trade
    /// changes nothing. A missing plan is created from the seed first.
    ///
    /// The plan's list is written before the trade's back-reference, so an
    /// interrupted call leaves exactly the state the read-path repair
    /// reconstructs from.
    pub async fn link(
        &self,
        trade: &Trade,
        presession_id: &str,
        seed: &PresessionSeed,
    ) -> Result<(), StoreError> {
        let mut presession = match self.store.get_presession(presession_id).await? {
            Some(p) => p,
            None => {
                debug!("pre-session {} not saved yet, creating placeholder", presession_id);
                seed.build(presession_id)
            }
        };

        if !presession.linked_trades.iter().any(|id| id == &trade.id) {
            presession.linked_trades.push(trade.id.clone());
        }
        self.store.save_presession(&presession).await?;

        let mut trade = trade.clone();
        trade.presession_id = Some(presession_id.to_string());
        self.store.save_trade(&trade).await?;
        Ok(())
    }

    /// Detach a trade from its plan. A trade that was never linked, or whose
    /// plan is gone, is already detached: no-op.
    pub async fn unlink(&self, trade_id: &str) -> Result<(), StoreError> {
        let mut trade = match self.store.get_trade(trade_id).await? {
            Some(t) => t,
            None => return Ok(()),
        };
        let presession_id = match trade.presession_id.take() {
            Some(id) => id,
            None => return Ok(()),
        };

        if let Some(mut presession) = self.store.get_presession(&presession_id).await? {
            if presession.linked_trades.iter().any(|id| id == trade_id) {
                presession.linked_trades.retain(|id| id != trade_id);
                self.store.save_presession(&presession).await?;
            }
        }

        self.store.save_trade(&trade).await?;
        Ok(())
    }

    /// Full trade records for a plan. Back-references are the primary
    /// source; the plan's own id list is the fallback, with dangling ids
    /// dropped and back-references re-established on the survivors so the
    /// next lookup takes the primary path.
    pub async fn resolve_linked_trades(
        &self,
        presession_id: &str,
    ) -> Result<Vec<Trade>, StoreError> {
        let by_backref: Vec<Trade> = self
            .store
            .list_trades()
            .await?
            .into_iter()
            .filter(|t| t.presession_id.as_deref() == Some(presession_id))
            .collect();
        if !by_backref.is_empty() {
            return Ok(by_backref);
        }

        let presession = match self.store.get_presession(presession_id).await? {
            Some(p) => p,
            None => return Ok(Vec::new()),
        };

        let mut resolved: Vec<Trade> = Vec::new();
        for trade_id in &presession.linked_trades {
            if resolved.iter().any(|t| &t.id == trade_id) {
                continue;
            }
            let mut trade = match self.store.get_trade(trade_id).await? {
                Some(t) => t,
                None => {
                    debug!("dropping stale linked trade id {}", trade_id);
                    continue;
                }
            };
            if trade.presession_id.as_deref() != Some(presession_id) {
                trade.presession_id = Some(presession_id.to_string());
                // Repair is best-effort; the read itself still succeeds.
                if let Err(err) = self.store.save_trade(&trade).await {
                    warn!("could not repair back-reference on {}: {}", trade.id, err);
                }
            }
            resolved.push(trade);
        }

        Ok(resolved)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TradeResult;
    use crate::store::JournalStore;
    use crate::test_helpers::decided_trade;

    fn resolver() -> LinkResolver {
        LinkResolver::new(Arc::new(JournalStore::new_fresh()))
    }

    fn saved_trade(id: &str) -> Trade {
        let mut trade = decided_trade(TradeResult::Win, 1.0);
        trade.id = id.to_string();
        trade
    }

    #[tokio::test]
    async fn link_is_idempotent() {
        let resolver = resolver();
        let trade = saved_trade("t1");
        let seed = PresessionSeed::default();

        resolver.link(&trade, "p1", &seed).await.unwrap();
        resolver.link(&trade, "p1", &seed).await.unwrap();

        let linked = resolver.resolve_linked_trades("p1").await.unwrap();
        assert_eq!(linked.len(), 1);
        assert_eq!(linked[0].id, "t1");

        let plan = resolver.store.get_presession("p1").await.unwrap().unwrap();
        assert_eq!(plan.linked_trades, vec!["t1"]);
    }

    #[tokio::test]
    async fn link_lazily_creates_the_plan() {
        let resolver = resolver();
        let seed = PresessionSeed {
            pair: "EURUSD".to_string(),
            execution: Some(Execution::Win),
            ..Default::default()
        };
        resolver.link(&saved_trade("t1"), "p9", &seed).await.unwrap();

        let plan = resolver.store.get_presession("p9").await.unwrap().unwrap();
        assert_eq!(plan.pair, "EURUSD");
        assert_eq!(plan.execution, Some(Execution::Win));
        assert_eq!(plan.narrative, None);
        assert!(!plan.mindset.is_empty());
        assert!(plan.mindset.iter().all(|item| !item.checked));
    }

    #[tokio::test]
    async fn unlink_clears_both_sides() {
        let resolver = resolver();
        let trade = saved_trade("t1");
        resolver.link(&trade, "p1", &PresessionSeed::default()).await.unwrap();

        resolver.unlink("t1").await.unwrap();

        let plan = resolver.store.get_presession("p1").await.unwrap().unwrap();
        assert!(plan.linked_trades.is_empty());
        let trade = resolver.store.get_trade("t1").await.unwrap().unwrap();
        assert_eq!(trade.presession_id, None);
        assert!(resolver.resolve_linked_trades("p1").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn unlink_of_unknown_trade_is_a_no_op() {
        let resolver = resolver();
        resolver.unlink("ghost").await.unwrap();
        assert!(resolver.store.list_trades().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn fallback_resolution_repairs_back_references() {
        let resolver = resolver();
        // Plan knows about two trades; neither carries a back-reference and
        // one no longer exists.
        resolver.store.save_trade(&saved_trade("t1")).await.unwrap();
        let plan = PreSession {
            id: "p1".to_string(),
            linked_trades: vec!["t1".to_string(), "deleted".to_string()],
            ..Default::default()
        };
        resolver.store.save_presession(&plan).await.unwrap();

        let linked = resolver.resolve_linked_trades("p1").await.unwrap();
        assert_eq!(linked.len(), 1);
        assert_eq!(linked[0].presession_id.as_deref(), Some("p1"));

        // Repaired: the next call takes the primary path.
        let trade = resolver.store.get_trade("t1").await.unwrap().unwrap();
        assert_eq!(trade.presession_id.as_deref(), Some("p1"));
    }

    #[tokio::test]
    async fn resolution_for_unknown_plan_is_empty() {
        let resolver = resolver();
        assert!(resolver.resolve_linked_trades("nope").await.unwrap().is_empty());
    }
}
