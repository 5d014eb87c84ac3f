use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawFeedbackItem {
    pub id: i64,
    pub title: String,
    pub source: String, // origin channel tag, e.g. "discord", "forum"
    pub upvotes: u32,
    pub timestamp: i64, // epoch milliseconds
}

/// Insert shape for seeding the store; the id is assigned by the database.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewFeedbackItem {
    pub title: String,
    pub source: String,
    pub upvotes: u32,
    pub timestamp: i64,
}

/// A cluster of feedback items judged to describe the same underlying
/// problem. Items are borrowed from the request's input batch.
#[derive(Debug, Clone)]
pub struct IssueGroup<'a> {
    pub title: String,
    pub items: Vec<&'a RawFeedbackItem>,
}
