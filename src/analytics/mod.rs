pub mod grouping;
pub mod stats;

pub use grouping::{
    analyze_attribute, best_group, group_by, GroupStats, RankMetric, TradeAttribute,
    ALL_ATTRIBUTES, MIN_GROUP_SAMPLE,
};
pub use stats::{calculate_stats, Stats};
