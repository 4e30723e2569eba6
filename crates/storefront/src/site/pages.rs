//! Page registry: page type -> page descriptor.

use std::collections::HashMap;

use serde::Deserialize;

/// Metadata for one category landing page.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PageDescriptor {
    pub page_title: String,
    pub page_description: String,
    pub banner_image_url: String,
    /// Message key for the banner headline.
    pub banner_title_id: String,
    /// Message key for the banner sub-heading.
    pub banner_description_id: String,
}

/// Lookup table of page descriptors keyed by page type.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(transparent)]
pub struct PageRegistry {
    pages: HashMap<String, PageDescriptor>,
}

impl PageRegistry {
    /// Resolve a page type. Lookups are exact; `Grocery` is not `grocery`.
    #[must_use]
    pub fn get(&self, page_type: &str) -> Option<&PageDescriptor> {
        self.pages.get(page_type)
    }

    #[must_use]
    pub fn contains(&self, page_type: &str) -> bool {
        self.pages.contains_key(page_type)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.pages.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }
}
