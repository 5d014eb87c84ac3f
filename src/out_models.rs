use serde::{Deserialize, Serialize};

/// One ranked issue as served over the wire.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankedIssue {
    pub title: String,
    pub count: usize,
    pub total_upvotes: u64,
    /// Distinct origin channels, in order of first occurrence within the group.
    pub sources: Vec<String>,
    /// Rounded to 2 decimal places.
    pub urgency_score: f64,
    pub latest_timestamp: i64,
}
