//! Tag parsing and merging for media records.
//!
//! Tags are an order-irrelevant set of strings, but we keep first-occurrence
//! order when deduplicating so responses stay stable for clients.

/// Parse a user-supplied tag field into a clean list.
///
/// Accepts either a comma-separated string (`"trip, food"`) or a JSON string
/// array (`'["trip","food"]'`, as sent by some form clients). Entries are
/// trimmed and empties dropped.
pub fn parse_tags(raw: &str) -> Vec<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Vec::new();
    }

    if trimmed.starts_with('[') {
        if let Ok(list) = serde_json::from_str::<Vec<String>>(trimmed) {
            return dedup_tags(list.into_iter().map(|t| t.trim().to_string()));
        }
    }

    dedup_tags(trimmed.split(',').map(|t| t.trim().to_string()))
}

/// Union `suggested` into `user` tags, deduplicated, user tags first.
pub fn merge_tags(user: Vec<String>, suggested: &[String]) -> Vec<String> {
    dedup_tags(user.into_iter().chain(suggested.iter().cloned()))
}

fn dedup_tags(tags: impl Iterator<Item = String>) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for tag in tags {
        if !tag.is_empty() && !out.contains(&tag) {
            out.push(tag);
        }
    }
    out
}
