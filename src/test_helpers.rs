use chrono::NaiveDate;

use crate::models::{Direction, Narrative, PreSession, Session, Trade, TradeResult};

/// A decided trade with sensible defaults: Monday 2024-01-15, long, London.
pub fn decided_trade(result: TradeResult, rr: f64) -> Trade {
    Trade {
        id: "trade-1".to_string(),
        date: NaiveDate::from_ymd_opt(2024, 1, 15),
        direction: Some(Direction::Long),
        session: Some(Session::London),
        result: Some(result),
        rr: rr.into(),
        ..Default::default()
    }
}

pub fn trade_on_pair(pair: &str, result: TradeResult, rr: f64) -> Trade {
    Trade {
        pair: pair.to_string(),
        ..decided_trade(result, rr)
    }
}

pub fn parent_trade(id: &str, date: &str) -> Trade {
    Trade {
        id: id.to_string(),
        date: date.parse().ok(),
        ..decided_trade(TradeResult::Win, 1.0)
    }
}

pub fn child_trade(id: &str, parent_id: &str, date: &str) -> Trade {
    Trade {
        parent_trade_id: Some(parent_id.to_string()),
        ..parent_trade(id, date)
    }
}

pub fn plan_with_outcome(narrative: Narrative, outcome: Option<Narrative>) -> PreSession {
    PreSession {
        id: "plan-1".to_string(),
        date: NaiveDate::from_ymd_opt(2024, 1, 15),
        pair: "EURUSD".to_string(),
        narrative: Some(narrative),
        outcome,
        ..Default::default()
    }
}
