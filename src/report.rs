use crate::analytics::{analyze_attribute, calculate_stats, GroupStats, Stats, ALL_ATTRIBUTES};
use crate::models::{PreSession, Trade};

/// Terminal rendition of the dashboard: the headline aggregate plus the
/// per-attribute breakdown tables.
#[derive(Debug, Clone)]
pub struct JournalReport {
    pub stats: Stats,
    pub attributes: Vec<(&'static str, Vec<GroupStats>)>,
}

impl JournalReport {
    pub fn build(trades: &[Trade], presessions: &[PreSession]) -> Self {
        let stats = calculate_stats(trades, presessions);
        let attributes = ALL_ATTRIBUTES
            .iter()
            .map(|attr| (attr.as_str(), analyze_attribute(trades, *attr)))
            .filter(|(_, groups)| !groups.is_empty())
            .collect();
        Self { stats, attributes }
    }

    pub fn print_summary(&self) {
        let s = &self.stats;

        println!("\n{}", "=".repeat(70));
        println!("  TRADING JOURNAL REPORT");
        println!("{}", "=".repeat(70));
        println!();
        println!("  OVERVIEW");
        println!("  ───────────────────────────────────");
        println!("  Trades:      {}", s.total_trades);
        println!("  Win Rate:    {:.2}%", s.win_rate);
        println!(
            "  Outcomes:    W {:.1}% | L {:.1}% | BE {:.1}% | Missed {:.1}%",
            s.win_distribution, s.loss_distribution, s.breakeven_distribution,
            s.missed_distribution
        );
        println!(
            "  Long/Short:  {:.1}% / {:.1}%",
            s.long_win_rate, s.short_win_rate
        );
        println!();
        println!("  RISK / REWARD");
        println!("  ───────────────────────────────────");
        println!("  Gained RR:    {:.2}", s.gained_rr);
        println!("  Potential RR: {:.2}", s.potential_rr);
        println!("  Average RR:   {:.2}", s.average_rr);
        println!("  Revenue:      {:+.2}%", s.total_revenue);
        println!();
        println!("  DISCIPLINE");
        println!("  ───────────────────────────────────");
        println!("  Following Plan:     {:.1}%", s.following_plan_percentage);
        println!("  Execution Coeff.:   {:.1}%", s.execution_coefficient);
        println!("  Narrative Accuracy: {:.1}%", s.narrative_accuracy);
        println!();
        println!("  BEST OF");
        println!("  ───────────────────────────────────");
        println!("  Pair:    {}", s.best_pair);
        println!("  Session: {}", s.best_session);
        println!("  Weekday: {}", s.best_weekday);

        for (label, groups) in &self.attributes {
            println!();
            println!("  BY {}", label.to_uppercase());
            println!("  ───────────────────────────────────");
            for g in groups {
                println!(
                    "  {:>16}: {} trades | WR {:.0}% | W/L/BE/M {}/{}/{}/{} | RR {:+.2}",
                    g.key, g.total, g.win_rate, g.wins, g.losses, g.breakevens, g.missed,
                    g.gained_rr
                );
            }
        }

        println!("{}", "=".repeat(70));
    }
}
