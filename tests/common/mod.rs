use chrono::NaiveDate;

use journal_engine::models::{Direction, Session, Trade, TradeResult};

/// A decided trade on the given pair and date.
pub fn make_trade(id: &str, pair: &str, date: &str, result: TradeResult, rr: f64) -> Trade {
    Trade {
        id: id.to_string(),
        pair: pair.to_string(),
        date: date.parse::<NaiveDate>().ok(),
        direction: Some(Direction::Long),
        session: Some(Session::London),
        result: Some(result),
        rr: rr.into(),
        ..Default::default()
    }
}

pub fn make_subtrade(id: &str, parent_id: &str, date: &str) -> Trade {
    Trade {
        parent_trade_id: Some(parent_id.to_string()),
        ..make_trade(id, "EURUSD", date, TradeResult::Win, 1.0)
    }
}
