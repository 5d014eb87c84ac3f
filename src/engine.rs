use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info};

use crate::classifier::Classifier;
use crate::dedupe::dedupe;
use crate::out_models::RankedIssue;
use crate::rank::rank;
use crate::store::{FeedbackStore, StoreError};

/// Ties the collaborators together: one store read, at most one classifier
/// call, then ranking. Stateless across requests.
pub struct TriageEngine {
    store: Arc<dyn FeedbackStore>,
    classifier: Arc<dyn Classifier>,
}

impl TriageEngine {
    pub fn new(store: Arc<dyn FeedbackStore>, classifier: Arc<dyn Classifier>) -> Self {
        Self { store, classifier }
    }

    /// Rank against the wall clock. Only store-read failures propagate;
    /// classification failures degrade to fallback grouping inside `dedupe`.
    pub async fn ranked_issues(&self) -> Result<Vec<RankedIssue>, StoreError> {
        self.ranked_issues_at(Utc::now().timestamp_millis()).await
    }

    /// Rank against an injected clock; the seam tests use.
    pub async fn ranked_issues_at(&self, now_ms: i64) -> Result<Vec<RankedIssue>, StoreError> {
        let start = std::time::Instant::now();
        let items = self.store.read_all().await?;

        // No feedback at all: a valid empty result, and no classifier call.
        if items.is_empty() {
            debug!("Feedback store empty - skipping classification");
            return Ok(Vec::new());
        }

        let groups = dedupe(&items, self.classifier.as_ref()).await;
        let ranked = rank(&groups, now_ms);

        info!(
            "Ranking completed - duration={:.2}s, items={}, issues={}",
            start.elapsed().as_secs_f32(),
            items.len(),
            ranked.len()
        );
        Ok(ranked)
    }
}
