use serde::Serialize;

use crate::analytics::grouping::{best_group, RankMetric, TradeAttribute, UNKNOWN_KEY};
use crate::models::{Direction, PreSession, Trade, TradeResult};

/// The aggregate behind the dashboard and statistics views. Derived, never
/// persisted. All percentages are 0–100.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Stats {
    pub total_trades: usize,
    /// Win ÷ (Win + Loss) × 100. Breakeven and missed trades do not count.
    pub win_rate: f64,
    /// The four outcome shares each divide by `total_trades` and sum to 100.
    pub win_distribution: f64,
    pub loss_distribution: f64,
    pub breakeven_distribution: f64,
    pub missed_distribution: f64,
    pub long_win_rate: f64,
    pub short_win_rate: f64,
    pub gained_rr: f64,
    /// `gained_rr` plus the RR left on the table by missed trades.
    pub potential_rr: f64,
    pub average_rr: f64,
    pub total_revenue: f64,
    pub following_plan_percentage: f64,
    /// Share of opportunities actually executed: 100 − missed%.
    pub execution_coefficient: f64,
    /// Share of decided pre-session calls where the market agreed.
    pub narrative_accuracy: f64,
    pub best_pair: String,
    pub best_session: String,
    pub best_weekday: String,
}

impl Default for Stats {
    fn default() -> Self {
        Self {
            total_trades: 0,
            win_rate: 0.0,
            win_distribution: 0.0,
            loss_distribution: 0.0,
            breakeven_distribution: 0.0,
            missed_distribution: 0.0,
            long_win_rate: 0.0,
            short_win_rate: 0.0,
            gained_rr: 0.0,
            potential_rr: 0.0,
            average_rr: 0.0,
            total_revenue: 0.0,
            following_plan_percentage: 0.0,
            execution_coefficient: 0.0,
            narrative_accuracy: 0.0,
            best_pair: "N/A".to_string(),
            best_session: "N/A".to_string(),
            best_weekday: "N/A".to_string(),
        }
    }
}

/// Fold a journal's trades and plans into the `Stats` aggregate.
///
/// Pure and order-independent; malformed numeric fields count as zero and
/// never abort the fold. Undecided trades (no result yet) are excluded from
/// every figure.
pub fn calculate_stats(trades: &[Trade], presessions: &[PreSession]) -> Stats {
    let decided: Vec<&Trade> = trades.iter().filter(|t| t.result.is_some()).collect();
    let total = decided.len();

    let mut stats = Stats {
        narrative_accuracy: narrative_accuracy(presessions),
        ..Default::default()
    };
    if total == 0 {
        return stats;
    }

    let count = |result: TradeResult| decided.iter().filter(|t| t.result == Some(result)).count();
    let wins = count(TradeResult::Win);
    let losses = count(TradeResult::Loss);
    let breakevens = count(TradeResult::Breakeven);
    let missed = count(TradeResult::Missed);

    stats.total_trades = total;
    stats.win_rate = pct(wins, wins + losses);
    stats.win_distribution = pct(wins, total);
    stats.loss_distribution = pct(losses, total);
    stats.breakeven_distribution = pct(breakevens, total);
    stats.missed_distribution = pct(missed, total);
    stats.long_win_rate = directional_win_rate(&decided, Direction::Long);
    stats.short_win_rate = directional_win_rate(&decided, Direction::Short);

    let gained_rr: f64 = decided
        .iter()
        .filter(|t| t.result == Some(TradeResult::Win))
        .map(|t| t.rr.value())
        .sum();
    let missed_rr: f64 = decided
        .iter()
        .filter(|t| t.result == Some(TradeResult::Missed))
        .map(|t| t.rr.value())
        .sum();

    stats.gained_rr = round2(gained_rr);
    stats.potential_rr = round2(gained_rr + missed_rr);
    stats.average_rr = if wins > 0 {
        round2(gained_rr / wins as f64)
    } else {
        0.0
    };
    stats.total_revenue = round2(decided.iter().map(|t| t.profit_loss.value()).sum());

    let on_plan = decided.iter().filter(|t| t.following_plan).count();
    stats.following_plan_percentage = pct(on_plan, total);
    stats.execution_coefficient = round2(100.0 - stats.missed_distribution);

    stats.best_pair = best_group(
        trades,
        |t| TradeAttribute::Pair.extract(t),
        RankMetric::GainedRr,
    );
    stats.best_session = best_group(
        trades,
        |t| TradeAttribute::Session.extract(t),
        RankMetric::WinShare,
    );
    stats.best_weekday = best_group(
        trades,
        |t| t.weekday().unwrap_or_else(|| UNKNOWN_KEY.to_string()),
        RankMetric::WinShare,
    );

    stats
}

fn directional_win_rate(decided: &[&Trade], direction: Direction) -> f64 {
    let wins = decided
        .iter()
        .filter(|t| t.direction == Some(direction) && t.result == Some(TradeResult::Win))
        .count();
    let losses = decided
        .iter()
        .filter(|t| t.direction == Some(direction) && t.result == Some(TradeResult::Loss))
        .count();
    pct(wins, wins + losses)
}

fn narrative_accuracy(presessions: &[PreSession]) -> f64 {
    let scored: Vec<&PreSession> = presessions.iter().filter(|p| p.outcome.is_some()).collect();
    let accurate = scored.iter().filter(|p| p.plan_outcome()).count();
    pct(accurate, scored.len())
}

fn pct(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        0.0
    } else {
        round2(part as f64 / whole as f64 * 100.0)
    }
}

fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}
