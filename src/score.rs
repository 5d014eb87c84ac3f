use crate::models::RawFeedbackItem;

const MS_PER_DAY: f64 = 86_400_000.0;

/// Weighted combination of recency, frequency and severity. Frequency and
/// severity are unbounded and dominate for large or heavily-upvoted groups;
/// that weighting is intentional.
const W_RECENCY: f64 = 0.3;
const W_FREQUENCY: f64 = 0.3;
const W_SEVERITY: f64 = 0.4;

/// 100 for a group whose newest item is `now_ms`, minus 10 per day of age,
/// floored at 0.
pub fn recency(items: &[&RawFeedbackItem], now_ms: i64) -> f64 {
    let latest = latest_timestamp(items);
    let days_old = (now_ms - latest) as f64 / MS_PER_DAY;
    (100.0 - days_old * 10.0).max(0.0)
}

pub fn frequency(items: &[&RawFeedbackItem]) -> usize {
    items.len()
}

pub fn severity(items: &[&RawFeedbackItem]) -> u64 {
    items.iter().map(|i| u64::from(i.upvotes)).sum()
}

pub fn urgency(items: &[&RawFeedbackItem], now_ms: i64) -> f64 {
    let score = W_RECENCY * recency(items, now_ms)
        + W_FREQUENCY * frequency(items) as f64
        + W_SEVERITY * severity(items) as f64;
    round2(score)
}

pub fn latest_timestamp(items: &[&RawFeedbackItem]) -> i64 {
    items.iter().map(|i| i.timestamp).max().unwrap_or_default()
}

pub fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}
