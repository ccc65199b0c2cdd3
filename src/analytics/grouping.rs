use serde::Serialize;
use std::collections::HashMap;

use crate::models::{Trade, TradeResult};

/// Groups below this sample count never win a best-of selection. A single
/// lucky trade should not crown a "best pair".
pub const MIN_GROUP_SAMPLE: usize = 3;

pub const UNKNOWN_KEY: &str = "Unknown";
pub const NO_BEST: &str = "N/A";

/// Dimensions the execution/analytics views break trades down by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TradeAttribute {
    Pair,
    Direction,
    Session,
    PositionType,
    EntryModel,
    EntryTimeframe,
    Fta,
    SlPosition,
    VolumeConfirmation,
    PointA,
    Trigger,
}

pub const ALL_ATTRIBUTES: &[TradeAttribute] = &[
    TradeAttribute::Pair,
    TradeAttribute::Direction,
    TradeAttribute::Session,
    TradeAttribute::PositionType,
    TradeAttribute::EntryModel,
    TradeAttribute::EntryTimeframe,
    TradeAttribute::Fta,
    TradeAttribute::SlPosition,
    TradeAttribute::VolumeConfirmation,
    TradeAttribute::PointA,
    TradeAttribute::Trigger,
];

impl TradeAttribute {
    pub fn as_str(&self) -> &'static str {
        match self {
            TradeAttribute::Pair => "pair",
            TradeAttribute::Direction => "direction",
            TradeAttribute::Session => "session",
            TradeAttribute::PositionType => "position type",
            TradeAttribute::EntryModel => "entry model",
            TradeAttribute::EntryTimeframe => "entry timeframe",
            TradeAttribute::Fta => "FTA",
            TradeAttribute::SlPosition => "SL position",
            TradeAttribute::VolumeConfirmation => "volume confirmation",
            TradeAttribute::PointA => "point A",
            TradeAttribute::Trigger => "trigger",
        }
    }

    /// Grouping key for one trade. Empty fields land under "Unknown".
    pub fn extract(&self, trade: &Trade) -> String {
        let raw = match self {
            TradeAttribute::Pair => trade.pair.clone(),
            TradeAttribute::Direction => trade
                .direction
                .map(|d| d.as_str().to_string())
                .unwrap_or_default(),
            TradeAttribute::Session => trade
                .session
                .map(|s| s.as_str().to_string())
                .unwrap_or_default(),
            TradeAttribute::PositionType => trade.position_type.clone(),
            TradeAttribute::EntryModel => trade.entry_model.clone(),
            TradeAttribute::EntryTimeframe => trade.entry_timeframe.clone(),
            TradeAttribute::Fta => trade.fta.clone(),
            TradeAttribute::SlPosition => trade.sl_position.clone(),
            TradeAttribute::VolumeConfirmation => trade.volume_confirmation.clone(),
            TradeAttribute::PointA => trade.point_a.clone(),
            TradeAttribute::Trigger => trade.trigger.clone(),
        };
        if raw.is_empty() {
            UNKNOWN_KEY.to_string()
        } else {
            raw
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct GroupStats {
    pub key: String,
    pub total: usize,
    pub wins: usize,
    pub losses: usize,
    pub breakevens: usize,
    pub missed: usize,
    /// Win ÷ (Win + Loss) × 100 — the bar shown next to each group.
    pub win_rate: f64,
    /// Σ rr over winning trades in the group.
    pub gained_rr: f64,
}

impl GroupStats {
    fn new(key: String) -> Self {
        Self {
            key,
            total: 0,
            wins: 0,
            losses: 0,
            breakevens: 0,
            missed: 0,
            win_rate: 0.0,
            gained_rr: 0.0,
        }
    }

    /// Wins over all decided outcomes, including breakeven and missed.
    /// This is the share best-of selection ranks by; `win_rate` is not.
    fn win_share(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.wins as f64 / self.total as f64 * 100.0
        }
    }
}

/// Partition decided trades into groups, first-encounter key order.
///
/// Group order is deterministic so best-of ties resolve the same way on
/// every call with the same input.
pub fn group_by<F>(trades: &[Trade], key_of: F) -> Vec<GroupStats>
where
    F: Fn(&Trade) -> String,
{
    let mut groups: Vec<GroupStats> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for trade in trades {
        let result = match trade.result {
            Some(r) => r,
            None => continue,
        };

        let key = key_of(trade);
        let slot = *index.entry(key.clone()).or_insert_with(|| {
            groups.push(GroupStats::new(key));
            groups.len() - 1
        });

        let group = &mut groups[slot];
        group.total += 1;
        match result {
            TradeResult::Win => {
                group.wins += 1;
                group.gained_rr += trade.rr.value();
            }
            TradeResult::Loss => group.losses += 1,
            TradeResult::Breakeven => group.breakevens += 1,
            TradeResult::Missed => group.missed += 1,
        }
    }

    for group in &mut groups {
        let decided = group.wins + group.losses;
        if decided > 0 {
            group.win_rate = group.wins as f64 / decided as f64 * 100.0;
        }
    }

    groups
}

/// Per-attribute breakdown for the analytics views. Every group is
/// reported; the minimum-sample rule applies only to best-of selection.
pub fn analyze_attribute(trades: &[Trade], attribute: TradeAttribute) -> Vec<GroupStats> {
    group_by(trades, |t| attribute.extract(t))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RankMetric {
    /// wins / total × 100 — sessions and weekdays.
    WinShare,
    /// Σ rr over wins — pairs, which are ranked by profitability.
    GainedRr,
}

/// The winning group key under the minimum-sample rule, or "N/A".
pub fn best_group<F>(trades: &[Trade], key_of: F, metric: RankMetric) -> String
where
    F: Fn(&Trade) -> String,
{
    let groups = group_by(trades, key_of);

    let mut best: Option<(&GroupStats, f64)> = None;
    for group in groups.iter().filter(|g| g.total >= MIN_GROUP_SAMPLE) {
        let score = match metric {
            RankMetric::WinShare => group.win_share(),
            RankMetric::GainedRr => group.gained_rr,
        };
        // Strict comparison keeps the earliest-encountered key on ties.
        match best {
            Some((_, top)) if score <= top => {}
            _ => best = Some((group, score)),
        }
    }

    best.map(|(g, _)| g.key.clone())
        .unwrap_or_else(|| NO_BEST.to_string())
}
