//! Deduplication orchestrator: one classifier attempt per batch, falling
//! back to deterministic keyword grouping on any failure. Never errors —
//! classification outages degrade grouping quality, not correctness.

use tracing::{debug, warn};

use crate::classifier::Classifier;
use crate::fallback::fallback_grouping;
use crate::models::{IssueGroup, RawFeedbackItem};
use crate::parse::{parse_grouping, ProposedGroup};
use crate::prompts::{user_grouping, GROUPING_MAX_TOKENS, GROUPING_SYSTEM};

/// Group the batch via the classifier, or via the fallback grouper when the
/// call or its output is unusable. Single attempt, no retries.
pub async fn dedupe<'a>(
    items: &'a [RawFeedbackItem],
    classifier: &dyn Classifier,
) -> Vec<IssueGroup<'a>> {
    let prompt = user_grouping(items);

    let raw = match classifier
        .classify(GROUPING_SYSTEM, &prompt, GROUPING_MAX_TOKENS)
        .await
    {
        Ok(raw) => raw,
        Err(err) => {
            warn!("Classifier call failed - {}, using fallback grouping", err);
            return fallback_grouping(items);
        }
    };

    match parse_grouping(&raw) {
        Ok(proposed) => {
            debug!(
                "Classifier grouped {} items into {} groups",
                items.len(),
                proposed.len()
            );
            resolve_groups(items, proposed)
        }
        Err(err) => {
            warn!(
                "Classifier response unusable - {}, using fallback grouping",
                err
            );
            fallback_grouping(items)
        }
    }
}

/// Resolve proposed indices against the batch. Out-of-range indices
/// (including negative ones) are dropped, never fabricated; a group left
/// with no members is discarded.
fn resolve_groups(items: &[RawFeedbackItem], proposed: Vec<ProposedGroup>) -> Vec<IssueGroup<'_>> {
    proposed
        .into_iter()
        .filter_map(|group| {
            let members: Vec<&RawFeedbackItem> = group
                .indices
                .iter()
                .filter_map(|&idx| usize::try_from(idx).ok().and_then(|i| items.get(i)))
                .collect();

            let dropped = group.indices.len() - members.len();
            if dropped > 0 {
                debug!(
                    "Dropped {} out-of-range indices - group={}",
                    dropped, group.title
                );
            }
            if members.is_empty() {
                debug!("Discarding empty group - group={}", group.title);
                None
            } else {
                Some(IssueGroup {
                    title: group.title,
                    items: members,
                })
            }
        })
        .collect()
}
