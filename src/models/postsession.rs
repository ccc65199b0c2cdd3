use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A reflection authored after trading. Not aggregated by the metrics
/// engine; it exists as a linkage target for session reviews.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct PostSession {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub date: Option<NaiveDate>,
    #[serde(default)]
    pub pair: String,
    #[serde(default)]
    pub review: String,
}
