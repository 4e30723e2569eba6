//! Category menu and sidebar category trees.

use bazaar_core::NavItemId;
use serde::Deserialize;

/// An entry in the store navigation menu.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NavItem {
    pub id: NavItemId,
    /// Message key for the label.
    pub label_key: String,
    pub href: String,
    /// Page type the entry leads to; used to highlight the active entry.
    pub page_type: String,
}

/// A node in a page type's sidebar category tree.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Category {
    pub title: String,
    pub slug: String,
    #[serde(default)]
    pub children: Vec<Self>,
}

impl Category {
    /// Whether `slug` is this category or one of its descendants.
    #[must_use]
    pub fn contains_slug(&self, slug: &str) -> bool {
        self.slug == slug || self.children.iter().any(|c| c.contains_slug(slug))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_contains_slug_searches_descendants() {
        let tree: Category = serde_json::from_str(
            r#"{
                "title": "Fruits & Vegetables",
                "slug": "fruits-and-vegetables",
                "children": [
                    {"title": "Fruits", "slug": "fruits"},
                    {"title": "Vegetables", "slug": "vegetables"}
                ]
            }"#,
        )
        .unwrap();
        assert!(tree.contains_slug("fruits-and-vegetables"));
        assert!(tree.contains_slug("vegetables"));
        assert!(!tree.contains_slug("meat"));
    }
}
