//! Response types for the Google Custom Search JSON API.

use serde::Deserialize;

/// Custom search response; only the fields the lookup reads.
#[derive(Debug, Default, Deserialize)]
pub struct SearchResponse {
    /// Search hits. Absent when nothing matched.
    pub items: Option<Vec<SearchItem>>,
}

impl SearchResponse {
    /// Link of the first hit, if any.
    #[must_use]
    pub fn first_link(&self) -> Option<&str> {
        self.items
            .as_deref()
            .and_then(<[SearchItem]>::first)
            .map(|item| item.link.as_str())
            .filter(|link| !link.is_empty())
    }
}

/// One search hit.
#[derive(Debug, Deserialize)]
pub struct SearchItem {
    /// Direct URL of the image.
    pub link: String,
}
