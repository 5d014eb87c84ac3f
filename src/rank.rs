use crate::models::IssueGroup;
use crate::out_models::RankedIssue;
use crate::score;

/// Map groups through the scorer and sort by urgency, highest first. The
/// sort is stable: equal scores keep their group-construction order.
pub fn rank(groups: &[IssueGroup<'_>], now_ms: i64) -> Vec<RankedIssue> {
    let mut ranked: Vec<RankedIssue> = groups.iter().map(|g| to_ranked(g, now_ms)).collect();
    ranked.sort_by(|a, b| b.urgency_score.total_cmp(&a.urgency_score));
    ranked
}

fn to_ranked(group: &IssueGroup<'_>, now_ms: i64) -> RankedIssue {
    let mut sources: Vec<String> = Vec::new();
    for item in &group.items {
        if !sources.iter().any(|s| s == &item.source) {
            sources.push(item.source.clone());
        }
    }

    RankedIssue {
        title: group.title.clone(),
        count: score::frequency(&group.items),
        total_upvotes: score::severity(&group.items),
        sources,
        urgency_score: score::urgency(&group.items, now_ms),
        latest_timestamp: score::latest_timestamp(&group.items),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RawFeedbackItem;

    const DAY_MS: i64 = 86_400_000;

    fn item(id: i64, source: &str, upvotes: u32, timestamp: i64) -> RawFeedbackItem {
        RawFeedbackItem {
            id,
            title: format!("item {id}"),
            source: source.into(),
            upvotes,
            timestamp,
        }
    }

    #[test]
    fn output_is_sorted_by_urgency_descending() {
        let quiet = item(1, "forum", 0, 0);
        let loud = item(2, "discord", 50, 0);
        let groups = vec![
            IssueGroup {
                title: "quiet".into(),
                items: vec![&quiet],
            },
            IssueGroup {
                title: "loud".into(),
                items: vec![&loud],
            },
        ];
        let ranked = rank(&groups, 0);
        assert_eq!(ranked[0].title, "loud");
        assert!(ranked[0].urgency_score > ranked[1].urgency_score);
    }

    #[test]
    fn ties_keep_group_construction_order() {
        let a = item(1, "forum", 2, 0);
        let b = item(2, "forum", 2, 0);
        let c = item(3, "forum", 2, 0);
        let groups = vec![
            IssueGroup {
                title: "first".into(),
                items: vec![&a],
            },
            IssueGroup {
                title: "second".into(),
                items: vec![&b],
            },
            IssueGroup {
                title: "third".into(),
                items: vec![&c],
            },
        ];
        let ranked = rank(&groups, 0);
        let titles: Vec<&str> = ranked.iter().map(|r| r.title.as_str()).collect();
        assert_eq!(titles, vec!["first", "second", "third"]);
    }

    #[test]
    fn aggregates_count_upvotes_sources_and_latest_timestamp() {
        let a = item(1, "discord", 5, 100);
        let b = item(2, "forum", 3, 100 - DAY_MS);
        let c = item(3, "discord", 0, 40);
        let groups = vec![IssueGroup {
            title: "Database problems".into(),
            items: vec![&a, &b, &c],
        }];
        let ranked = rank(&groups, 100);

        assert_eq!(ranked.len(), 1);
        let issue = &ranked[0];
        assert_eq!(issue.count, 3);
        assert_eq!(issue.total_upvotes, 8);
        assert_eq!(issue.sources, vec!["discord", "forum"]);
        assert_eq!(issue.latest_timestamp, 100);
        // recency 100, frequency 3, severity 8 -> 0.3*100 + 0.3*3 + 0.4*8
        assert_eq!(issue.urgency_score, 34.1);
    }

    #[test]
    fn empty_group_list_ranks_to_empty() {
        assert!(rank(&[], 0).is_empty());
    }
}
