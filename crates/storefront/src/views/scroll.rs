//! Scroll realignment for search and category filters.
//!
//! When a visitor searches or picks a category, the product grid should be
//! brought under the fixed header. [`ScrollEffect`] decides *when* that
//! happens: once on mount and once per distinct change of the `(text,
//! category)` pair. [`ScrollRequest`] describes *what* happens; the template
//! turns it into data attributes on the grid anchor, and
//! `static/js/scroll-realign.js` performs the scroll after the anchor is in
//! the document.

use serde::{Deserialize, Serialize};

/// DOM id of the element placed directly above the product grid.
pub const PRODUCTS_ANCHOR_ID: &str = "products-anchor";

/// Vertical offset applied after aligning the anchor, in pixels.
///
/// Negative values leave room above the anchor for the fixed header.
pub const SCROLL_OFFSET_PX: i32 = -110;

/// The query parameters the effect depends on.
///
/// Blank values are normalized to `None` so `?text=` and no `text` at all
/// are the same dependency value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchParams {
    pub text: Option<String>,
    pub category: Option<String>,
}

impl SearchParams {
    #[must_use]
    pub fn new(text: Option<&str>, category: Option<&str>) -> Self {
        fn normalize(value: Option<&str>) -> Option<String> {
            value
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(str::to_string)
        }
        Self {
            text: normalize(text),
            category: normalize(category),
        }
    }

    /// Whether a search or category filter is in effect.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.text.is_some() || self.category.is_some()
    }
}

/// An instruction to bring the product grid into view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScrollRequest {
    pub anchor_id: &'static str,
    pub offset_px: i32,
}

impl ScrollRequest {
    /// Scroll request for the given parameters, if any filter is active.
    ///
    /// With no search or category there is nothing to align to, so the page
    /// stays where the visitor left it.
    #[must_use]
    pub const fn for_params(params: &SearchParams) -> Option<Self> {
        if params.is_active() {
            Some(Self {
                anchor_id: PRODUCTS_ANCHOR_ID,
                offset_px: SCROLL_OFFSET_PX,
            })
        } else {
            None
        }
    }
}

/// Dependency-tracking effect keyed on [`SearchParams`].
///
/// A default value is unmounted: the first observation always fires.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScrollEffect {
    last: Option<SearchParams>,
    runs: u64,
}

impl ScrollEffect {
    /// Record the current dependencies. Returns `true` if the effect fires,
    /// i.e. this is the first observation or the dependencies changed.
    pub fn observe(&mut self, params: &SearchParams) -> bool {
        if self.last.as_ref() == Some(params) {
            return false;
        }
        self.last = Some(params.clone());
        self.runs = self.runs.saturating_add(1);
        true
    }

    /// Observe `params` and produce a scroll request if the effect fired
    /// with an active filter.
    pub fn run(&mut self, params: &SearchParams) -> Option<ScrollRequest> {
        if self.observe(params) {
            ScrollRequest::for_params(params)
        } else {
            None
        }
    }

    /// How many times the effect has fired.
    #[must_use]
    pub const fn runs(&self) -> u64 {
        self.runs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fires_on_mount_even_without_filters() {
        let mut effect = ScrollEffect::default();
        assert!(effect.observe(&SearchParams::default()));
        assert_eq!(effect.runs(), 1);
    }

    #[test]
    fn test_fires_once_per_distinct_change() {
        let mut effect = ScrollEffect::default();
        let sequence = [
            SearchParams::new(None, None),
            SearchParams::new(Some("apple"), None),
            SearchParams::new(Some("apple"), None),
            SearchParams::new(Some("apple"), Some("fruits")),
            SearchParams::new(Some("apple"), Some("fruits")),
            SearchParams::new(None, Some("fruits")),
            SearchParams::new(None, None),
        ];
        let fired: Vec<bool> = sequence.iter().map(|p| effect.observe(p)).collect();
        assert_eq!(fired, [true, true, false, true, false, true, true]);
        assert_eq!(effect.runs(), 5);
    }

    #[test]
    fn test_blank_values_do_not_count_as_changes() {
        let mut effect = ScrollEffect::default();
        assert!(effect.observe(&SearchParams::new(None, None)));
        assert!(!effect.observe(&SearchParams::new(Some("  "), Some(""))));
    }

    #[test]
    fn test_scroll_requested_only_with_active_filter() {
        let mut effect = ScrollEffect::default();
        assert_eq!(effect.run(&SearchParams::default()), None);

        let request = effect.run(&SearchParams::new(None, Some("dairy"))).unwrap_or_else(|| {
            panic!("category change should request a scroll");
        });
        assert_eq!(request.anchor_id, PRODUCTS_ANCHOR_ID);
        assert_eq!(request.offset_px, -110);

        // Same dependencies again: effect does not fire, nothing to do.
        assert_eq!(effect.run(&SearchParams::new(None, Some("dairy"))), None);
    }
}
