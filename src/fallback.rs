use std::collections::HashMap;
use tracing::info;
use unicode_normalization::UnicodeNormalization;

use crate::models::{IssueGroup, RawFeedbackItem};

/// Ordered keyword rules; the first rule with a matching substring wins.
/// Substring matching is deliberate ("pric" covers price/pricing).
const KEYWORD_RULES: &[(&[&str], &str)] = &[
    (&["deploy", "timeout", "hanging"], "Deployment Issues"),
    (&["d1", "database", "queries", "migration"], "D1 Database Issues"),
    (
        &["dashboard", "ui", "loading", "freezing"],
        "Dashboard Performance",
    ),
    (&["ai", "rate limit", "throttl"], "Workers AI Rate Limits"),
    (&["doc", "example"], "Documentation Issues"),
    (&["bill", "pric", "cost"], "Billing & Pricing"),
    (&["r2", "upload"], "R2 Upload Issues"),
    (&["domain"], "Custom Domain Issues"),
];

fn canonical_group_key(lower_title: &str) -> Option<&'static str> {
    for (keywords, group) in KEYWORD_RULES {
        if keywords.iter().any(|kw| lower_title.contains(kw)) {
            return Some(group);
        }
    }
    None
}

/// Deterministic keyword-based grouping. Total: every item lands in exactly
/// one group, and same input order yields the same groups in the same
/// first-seen order. This is the availability floor when the classifier is
/// down or returns garbage.
pub fn fallback_grouping(items: &[RawFeedbackItem]) -> Vec<IssueGroup<'_>> {
    let mut groups: Vec<IssueGroup> = Vec::new();
    let mut slot_of: HashMap<String, usize> = HashMap::new();

    for item in items {
        let lower = item.title.nfc().collect::<String>().to_lowercase();
        let key = canonical_group_key(&lower)
            .map(str::to_string)
            .unwrap_or_else(|| item.title.clone());

        let slot = match slot_of.get(&key) {
            Some(&i) => i,
            None => {
                let i = groups.len();
                groups.push(IssueGroup {
                    title: key.clone(),
                    items: Vec::new(),
                });
                slot_of.insert(key, i);
                i
            }
        };
        groups[slot].items.push(item);
    }

    info!(
        "Fallback grouping - items={}, groups={}",
        items.len(),
        groups.len()
    );
    groups
}
