use crate::models::RawFeedbackItem;

/// Generation budget for one grouping call.
pub const GROUPING_MAX_TOKENS: u32 = 2048;

pub const GROUPING_SYSTEM: &str = "You are a JSON API. Return ONLY the JSON object. \
No explanations, no markdown, no extra text before or after.";

/// User prompt enumerating the batch as `index. [source] title` lines.
/// Indices in the reply must refer to positions in this enumeration.
pub fn user_grouping(items: &[RawFeedbackItem]) -> String {
    let feedback_list = items
        .iter()
        .enumerate()
        .map(|(idx, item)| format!("{}. [{}] {}", idx, item.source, item.title))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        r#"Group the feedback into issue categories based on meaning.

FEEDBACK:
{list}

Rules:
- Create as many groups as needed to cover all issues
- Each group must represent one distinct issue
- Similar feedback having common words must be in the same group
- Indices refer to positions in FEEDBACK without duplicate and ignorance.

Return ONLY valid JSON in this format:
{{"groups":[{{"title":"Issue name","indices":[0,2]}}]}}"#,
        list = feedback_list
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompt_enumerates_items_with_source_tags() {
        let items = vec![
            RawFeedbackItem {
                id: 7,
                title: "DB queries slow".into(),
                source: "discord".into(),
                upvotes: 5,
                timestamp: 0,
            },
            RawFeedbackItem {
                id: 9,
                title: "Migration failing".into(),
                source: "forum".into(),
                upvotes: 3,
                timestamp: 0,
            },
        ];
        let prompt = user_grouping(&items);
        assert!(prompt.contains("0. [discord] DB queries slow"));
        assert!(prompt.contains("1. [forum] Migration failing"));
        assert!(prompt.contains(r#"{"groups":[{"title":"Issue name","indices":[0,2]}]}"#));
    }
}
