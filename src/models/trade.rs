use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::models::parse::{lenient_option, RawNumber};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TradeResult {
    Win,
    Loss,
    Breakeven,
    Missed,
}

impl fmt::Display for TradeResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TradeResult::Win => write!(f, "Win"),
            TradeResult::Loss => write!(f, "Loss"),
            TradeResult::Breakeven => write!(f, "Breakeven"),
            TradeResult::Missed => write!(f, "Missed"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Long,
    Short,
}

impl Direction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Long => "Long",
            Direction::Short => "Short",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Session {
    Asia,
    Frankfurt,
    London,
    #[serde(rename = "New York")]
    NewYork,
}

impl Session {
    pub fn as_str(&self) -> &'static str {
        match self {
            Session::Asia => "Asia",
            Session::Frankfurt => "Frankfurt",
            Session::London => "London",
            Session::NewYork => "New York",
        }
    }
}

impl fmt::Display for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One executed or missed trading decision, as journaled.
///
/// A trade with a populated `parent_trade_id` is a subtrade: an ordinary
/// record that shares the parent's analysis context. Nesting stops at one
/// level — a subtrade is never itself a parent.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Trade {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub date: Option<NaiveDate>,
    #[serde(default)]
    pub pair: String,
    #[serde(default, deserialize_with = "lenient_option")]
    pub direction: Option<Direction>,
    #[serde(default, deserialize_with = "lenient_option")]
    pub session: Option<Session>,
    #[serde(default)]
    pub position_type: String,

    /// Absent until the trade is decided.
    #[serde(default, deserialize_with = "lenient_option")]
    pub result: Option<TradeResult>,

    #[serde(default)]
    pub risk: RawNumber,
    #[serde(default)]
    pub rr: RawNumber,
    #[serde(default)]
    pub profit_loss: RawNumber,
    #[serde(default)]
    pub gained_points: RawNumber,

    #[serde(default)]
    pub following_plan: bool,
    #[serde(default)]
    pub best_trade: bool,

    #[serde(default)]
    pub parent_trade_id: Option<String>,
    /// Back-reference to the pre-session plan this trade was taken against.
    /// Authoritative over the plan's own `linked_trades` list.
    #[serde(default)]
    pub presession_id: Option<String>,

    // Execution attributes for the analytics breakdowns.
    #[serde(default)]
    pub entry_model: String,
    #[serde(default)]
    pub entry_timeframe: String,
    #[serde(default)]
    pub fta: String,
    #[serde(default)]
    pub sl_position: String,
    #[serde(default)]
    pub volume_confirmation: String,
    #[serde(default)]
    pub point_a: String,
    #[serde(default)]
    pub trigger: String,
}

impl Trade {
    /// English long day name ("Monday", ...), stable across locales.
    pub fn weekday(&self) -> Option<String> {
        self.date.map(|d| d.format("%A").to_string())
    }

    pub fn is_decided(&self) -> bool {
        self.result.is_some()
    }

    pub fn is_subtrade(&self) -> bool {
        self.parent_trade_id.is_some()
    }
}
