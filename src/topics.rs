use std::collections::BTreeSet;

use crate::api::IdeaDetail;

/// Closed vocabulary of topic tags the API attaches to ideas. Tags outside
/// this set are ignored during extraction.
pub const ALL_TOPICS: [&str; 22] = [
    "animals",
    "art",
    "bikes",
    "culture",
    "economy",
    "education",
    "equity",
    "food",
    "government",
    "green",
    "health",
    "kids",
    "public-space",
    "recreation",
    "safety",
    "shopping",
    "streets",
    "tech",
    "transit",
    "trees-gardens",
    "urban-design",
    "wayfinding",
];

pub fn is_topic(tag: &str) -> bool {
    ALL_TOPICS.contains(&tag)
}

/// One idea after extraction: its id, the vocabulary topics it carries, and
/// its support count (0 when the API omitted the field).
#[derive(Debug, Clone)]
pub struct Idea {
    pub id: String,
    pub topics: BTreeSet<String>,
    pub support_count: u64,
}

impl Idea {
    pub fn from_detail(detail: IdeaDetail) -> Self {
        Self {
            topics: extract_topics(&detail.topics),
            support_count: detail.support_count.unwrap_or(0),
            id: detail.id,
        }
    }
}

/// Intersect a decoded tag list with the fixed vocabulary.
pub fn extract_topics(tags: &[String]) -> BTreeSet<String> {
    tags.iter().filter(|t| is_topic(t)).cloned().collect()
}
