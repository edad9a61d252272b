//! Page Envelope
//!
//! Spring Data wraps paged listings in a page object. Only the fields the
//! client actually consumes are modeled here.

use serde::{Deserialize, Serialize};

/// One page of a paged listing
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    /// Items on this page
    pub content: Vec<T>,
    /// Total number of items across all pages
    pub total_elements: i64,
    /// Total number of pages
    pub total_pages: i64,
    /// Requested page size
    pub size: i64,
    /// Zero-based index of this page
    pub number: i64,
    /// Whether this is the first page
    pub first: bool,
    /// Whether this is the last page
    pub last: bool,
}

impl<T> Page<T> {
    /// Whether the page carries no items
    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_spring_page() {
        let json = r#"{
            "content": ["a", "b"],
            "totalElements": 5,
            "totalPages": 3,
            "size": 2,
            "number": 0,
            "first": true,
            "last": false
        }"#;

        let page: Page<String> = serde_json::from_str(json).unwrap();
        assert_eq!(page.content, vec!["a", "b"]);
        assert_eq!(page.total_elements, 5);
        assert_eq!(page.total_pages, 3);
        assert!(page.first);
        assert!(!page.last);
        assert!(!page.is_empty());
    }
}
