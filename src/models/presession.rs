use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::models::parse::{lenient_id_list, lenient_option};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Narrative {
    Bullish,
    Bearish,
    Neutral,
    #[serde(rename = "Day off")]
    DayOff,
}

impl fmt::Display for Narrative {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Narrative::Bullish => write!(f, "Bullish"),
            Narrative::Bearish => write!(f, "Bearish"),
            Narrative::Neutral => write!(f, "Neutral"),
            Narrative::DayOff => write!(f, "Day off"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Execution {
    #[serde(rename = "Day off")]
    DayOff,
    #[serde(rename = "No Trades")]
    NoTrades,
    Skipped,
    Missed,
    #[serde(rename = "BE")]
    Breakeven,
    Loss,
    Win,
}

impl fmt::Display for Execution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Execution::DayOff => write!(f, "Day off"),
            Execution::NoTrades => write!(f, "No Trades"),
            Execution::Skipped => write!(f, "Skipped"),
            Execution::Missed => write!(f, "Missed"),
            Execution::Breakeven => write!(f, "BE"),
            Execution::Loss => write!(f, "Loss"),
            Execution::Win => write!(f, "Win"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ChecklistItem {
    pub label: String,
    #[serde(default)]
    pub checked: bool,
}

impl ChecklistItem {
    pub fn unchecked(label: &str) -> Self {
        Self {
            label: label.to_string(),
            checked: false,
        }
    }
}

/// A plan authored before trading.
///
/// `linked_trades` is a denormalized cache of the trades taken against this
/// plan; each trade's own `presession_id` back-reference wins on divergence.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct PreSession {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub date: Option<NaiveDate>,
    #[serde(default)]
    pub pair: String,
    #[serde(default, deserialize_with = "lenient_option")]
    pub narrative: Option<Narrative>,
    #[serde(default, deserialize_with = "lenient_option")]
    pub execution: Option<Execution>,
    #[serde(default, deserialize_with = "lenient_option")]
    pub outcome: Option<Narrative>,
    #[serde(default, deserialize_with = "lenient_id_list")]
    pub linked_trades: Vec<String>,
    /// A subsession shares the parent's narrative at creation time but is
    /// otherwise independent.
    #[serde(default)]
    pub parent_session_id: Option<String>,
    #[serde(default)]
    pub mindset: Vec<ChecklistItem>,
    #[serde(default)]
    pub zones: Vec<ChecklistItem>,
}

pub fn default_mindset() -> Vec<ChecklistItem> {
    ["Slept well", "Clear head", "No revenge trading", "Accept the risk"]
        .iter()
        .map(|label| ChecklistItem::unchecked(label))
        .collect()
}

pub fn default_zones() -> Vec<ChecklistItem> {
    ["Weekly zone marked", "Daily zone marked", "Session liquidity marked"]
        .iter()
        .map(|label| ChecklistItem::unchecked(label))
        .collect()
}

impl PreSession {
    /// Whether the market went where the plan said it would.
    pub fn plan_outcome(&self) -> bool {
        match (self.outcome, self.narrative) {
            (Some(outcome), Some(narrative)) => outcome == narrative,
            _ => false,
        }
    }

    pub fn is_subsession(&self) -> bool {
        self.parent_session_id.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plan_outcome_requires_matching_narrative() {
        let mut plan = PreSession {
            narrative: Some(Narrative::Bullish),
            outcome: Some(Narrative::Bullish),
            ..Default::default()
        };
        assert!(plan.plan_outcome());

        plan.outcome = Some(Narrative::Bearish);
        assert!(!plan.plan_outcome());

        plan.outcome = None;
        assert!(!plan.plan_outcome());
    }

    #[test]
    fn linked_trades_tolerates_string_encoding() {
        let plan: PreSession = serde_json::from_str(
            r#"{"id":"p1","linked_trades":"[\"t1\",\"t2\"]"}"#,
        )
        .unwrap();
        assert_eq!(plan.linked_trades, vec!["t1", "t2"]);
    }

    #[test]
    fn malformed_linked_trades_is_empty() {
        let plan: PreSession =
            serde_json::from_str(r#"{"id":"p1","linked_trades":"oops"}"#).unwrap();
        assert!(plan.linked_trades.is_empty());
    }

    #[test]
    fn day_off_wire_names() {
        let plan: PreSession = serde_json::from_str(
            r#"{"id":"p1","narrative":"Day off","execution":"No Trades"}"#,
        )
        .unwrap();
        assert_eq!(plan.narrative, Some(Narrative::DayOff));
        assert_eq!(plan.execution, Some(Execution::NoTrades));
    }
}
