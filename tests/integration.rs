mod common;

use std::collections::HashSet;
use std::sync::Arc;

use journal_engine::analytics::calculate_stats;
use journal_engine::hierarchy::display_order;
use journal_engine::linking::{LinkResolver, PresessionSeed};
use journal_engine::models::{Execution, Narrative, PreSession, TradeResult};
use journal_engine::report::JournalReport;
use journal_engine::store::{JournalStore, RecordStore};

use common::{make_subtrade, make_trade};

/// The whole pipeline against one in-memory store: seed records, attach
/// trades to a plan that does not exist yet, repair a half-linked plan,
/// aggregate the journal, and flatten the subtrade table.
#[tokio::test]
async fn full_pipeline_over_one_store() {
    let store = Arc::new(JournalStore::new_fresh());
    let resolver = LinkResolver::new(store.clone());

    // 1. Journal a week of trades.
    let trades = vec![
        make_trade("t1", "EURUSD", "2024-01-15", TradeResult::Win, 2.0),
        make_trade("t2", "EURUSD", "2024-01-16", TradeResult::Win, 1.0),
        make_trade("t3", "EURUSD", "2024-01-17", TradeResult::Loss, 0.0),
        make_trade("t4", "GBPUSD", "2024-01-17", TradeResult::Missed, 3.0),
    ];
    for trade in &trades {
        store.save_trade(trade).await.unwrap();
    }

    // 2. Attach two trades to a plan the UI has not saved yet — the first
    //    link materializes it. Linking twice stays idempotent.
    let seed = PresessionSeed {
        date: "2024-01-15".parse().ok(),
        pair: "EURUSD".to_string(),
        execution: Some(Execution::Win),
    };
    resolver.link(&trades[0], "plan-1", &seed).await.unwrap();
    resolver.link(&trades[0], "plan-1", &seed).await.unwrap();
    resolver.link(&trades[1], "plan-1", &seed).await.unwrap();

    let linked = resolver.resolve_linked_trades("plan-1").await.unwrap();
    let mut ids: Vec<&str> = linked.iter().map(|t| t.id.as_str()).collect();
    ids.sort();
    assert_eq!(ids, vec!["t1", "t2"]);

    // 3. Detach one side and confirm both sides agree again.
    resolver.unlink("t2").await.unwrap();
    let linked = resolver.resolve_linked_trades("plan-1").await.unwrap();
    assert_eq!(linked.len(), 1);
    assert_eq!(linked[0].id, "t1");

    // 4. A plan whose id list survived while the back-references were lost
    //    is repaired on read.
    let stale = PreSession {
        id: "plan-2".to_string(),
        narrative: Some(Narrative::Bearish),
        outcome: Some(Narrative::Bearish),
        linked_trades: vec!["t3".to_string(), "gone".to_string()],
        ..Default::default()
    };
    store.save_presession(&stale).await.unwrap();
    let repaired = resolver.resolve_linked_trades("plan-2").await.unwrap();
    assert_eq!(repaired.len(), 1);
    assert_eq!(repaired[0].presession_id.as_deref(), Some("plan-2"));

    // 5. Aggregate the journal as the dashboard would.
    let all_trades = store.list_trades().await.unwrap();
    let all_plans = store.list_presessions().await.unwrap();
    let stats = calculate_stats(&all_trades, &all_plans);
    assert_eq!(stats.total_trades, 4);
    assert_eq!(stats.win_rate, 66.67);
    assert_eq!(stats.gained_rr, 3.0);
    assert_eq!(stats.potential_rr, 6.0);
    // plan-1 has no outcome; plan-2 called the market correctly.
    assert_eq!(stats.narrative_accuracy, 100.0);

    let report = JournalReport::build(&all_trades, &all_plans);
    assert_eq!(report.stats, stats);

    // 6. Subtrade table ordering.
    let mut table = all_trades.clone();
    table.push(make_subtrade("t1a", "t1", "2024-01-15"));
    table.push(make_subtrade("t1b", "t1", "2024-01-16"));

    let collapsed = display_order(&table, |a, b| a.date.cmp(&b.date), &HashSet::new());
    assert!(collapsed.iter().all(|t| t.parent_trade_id.is_none()));

    let expanded: HashSet<String> = ["t1".to_string()].into_iter().collect();
    let open = display_order(&table, |a, b| a.date.cmp(&b.date), &expanded);
    let ids: Vec<&str> = open.iter().map(|t| t.id.as_str()).collect();
    assert_eq!(ids, vec!["t1", "t1a", "t1b", "t2", "t3", "t4"]);
}

/// Linking survives a restart when the store is file-backed.
#[tokio::test]
async fn links_round_trip_through_the_journal_file() {
    let path = std::env::temp_dir()
        .join(format!("journal_engine_integ_{}", std::process::id()))
        .join("journal.json");
    let _ = std::fs::remove_file(&path);

    {
        let store = Arc::new(JournalStore::open(&path));
        let resolver = LinkResolver::new(store);
        let trade = make_trade("t1", "EURUSD", "2024-01-15", TradeResult::Win, 2.0);
        resolver
            .link(&trade, "plan-1", &PresessionSeed::default())
            .await
            .unwrap();
    }

    let store = Arc::new(JournalStore::open(&path));
    let resolver = LinkResolver::new(store);
    let linked = resolver.resolve_linked_trades("plan-1").await.unwrap();
    assert_eq!(linked.len(), 1);
    assert_eq!(linked[0].id, "t1");
}
