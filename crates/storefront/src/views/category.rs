//! Category page view model.
//!
//! [`CategoryPageView::resolve`] turns a page type into everything the
//! category template needs, or `None` when the page type is not registered.
//! The product grid and cart popup are built separately because they depend
//! on the catalog and the visitor's cart.

use bazaar_core::DeviceType;

use crate::site::{Category, SiteContent};
use crate::views::scroll::{PRODUCTS_ANCHOR_ID, ScrollRequest, SearchParams};

/// SEO metadata for the document head.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeoView {
    pub title: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BannerView {
    pub image_url: String,
    pub title: String,
    pub description: String,
}

/// A store navigation entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavLinkView {
    pub label: String,
    pub href: String,
    pub active: bool,
}

/// A sidebar category, flattened from the tree with its depth.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SidebarEntryView {
    pub title: String,
    pub slug: String,
    pub href: String,
    pub depth: usize,
    /// This is the selected category.
    pub active: bool,
    /// The selected category is this one or below it.
    pub expanded: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlideView {
    pub image_url: String,
    pub alt: String,
    pub link: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryLabels {
    pub categories: String,
    pub all_categories: String,
    pub search: String,
    pub search_placeholder: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CarouselView {
    pub slides: Vec<SlideView>,
    pub per_view: usize,
}

/// Everything the category template renders apart from the grid and popup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryPageView {
    pub page_type: String,
    pub device: DeviceType,
    pub seo: SeoView,
    pub banner: BannerView,
    pub nav: Vec<NavLinkView>,
    pub sidebar: Vec<SidebarEntryView>,
    pub labels: CategoryLabels,
    pub carousel: CarouselView,
    pub search: SearchParams,
    pub anchor_id: &'static str,
    pub scroll: Option<ScrollRequest>,
}

impl CategoryPageView {
    /// Resolve `page_type` against the page registry.
    ///
    /// Returns `None` for unregistered page types; callers render nothing.
    #[must_use]
    pub fn resolve(site: &SiteContent, page_type: &str, device: DeviceType) -> Option<Self> {
        let descriptor = site.pages().get(page_type)?;
        let messages = site.messages();

        let nav = site
            .navigation()
            .iter()
            .map(|item| NavLinkView {
                label: messages.get(&item.label_key).to_string(),
                href: item.href.clone(),
                active: item.page_type == page_type,
            })
            .collect();

        let carousel = CarouselView {
            slides: site
                .offers()
                .iter()
                .map(|offer| SlideView {
                    image_url: offer.image_url.clone(),
                    alt: offer.alt.clone(),
                    link: offer.link.clone(),
                })
                .collect(),
            per_view: device.carousel_slides_per_view(),
        };

        let mut view = Self {
            page_type: page_type.to_string(),
            device,
            seo: SeoView {
                title: descriptor.page_title.clone(),
                description: descriptor.page_description.clone(),
            },
            banner: BannerView {
                image_url: descriptor.banner_image_url.clone(),
                title: messages.get(&descriptor.banner_title_id).to_string(),
                description: messages.get(&descriptor.banner_description_id).to_string(),
            },
            nav,
            sidebar: Vec::new(),
            labels: CategoryLabels {
                categories: messages.get_or("categoryMenu", "Categories").to_string(),
                all_categories: messages.get_or("allCategories", "All").to_string(),
                search: messages.get_or("search", "Search").to_string(),
                search_placeholder: messages
                    .get_or("searchPlaceholder", "Search your products from here")
                    .to_string(),
            },
            carousel,
            search: SearchParams::default(),
            anchor_id: PRODUCTS_ANCHOR_ID,
            scroll: None,
        };
        view.sidebar = flatten_categories(site.categories(page_type), &view.page_type, &view.search);
        Some(view)
    }

    /// Apply the current search parameters.
    ///
    /// Updates the sidebar's active entry and the category links, which keep
    /// the search text.
    #[must_use]
    pub fn with_search(mut self, site: &SiteContent, search: SearchParams) -> Self {
        self.sidebar = flatten_categories(site.categories(&self.page_type), &self.page_type, &search);
        self.search = search;
        self
    }

    #[must_use]
    pub const fn with_scroll(mut self, scroll: Option<ScrollRequest>) -> Self {
        self.scroll = scroll;
        self
    }

    /// The mobile navigation block is always rendered but only shown on
    /// phones, so the page holds exactly one navigation block.
    #[must_use]
    pub const fn mobile_block_hidden(&self) -> bool {
        !self.device.is_mobile()
    }

    // Template helpers

    #[must_use]
    pub fn search_text(&self) -> &str {
        self.search.text.as_deref().unwrap_or_default()
    }

    #[must_use]
    pub fn search_category(&self) -> &str {
        self.search.category.as_deref().unwrap_or_default()
    }

    /// Link that clears the category filter.
    #[must_use]
    pub fn all_categories_href(&self) -> String {
        category_href(&self.page_type, &self.search, None)
    }
}

fn flatten_categories(
    tree: &[Category],
    page_type: &str,
    search: &SearchParams,
) -> Vec<SidebarEntryView> {
    fn walk(
        nodes: &[Category],
        depth: usize,
        page_type: &str,
        search: &SearchParams,
        out: &mut Vec<SidebarEntryView>,
    ) {
        let selected = search.category.as_deref();
        for node in nodes {
            out.push(SidebarEntryView {
                title: node.title.clone(),
                slug: node.slug.clone(),
                href: category_href(page_type, search, Some(&node.slug)),
                depth,
                active: selected == Some(node.slug.as_str()),
                expanded: selected.is_some_and(|slug| node.contains_slug(slug)),
            });
            walk(&node.children, depth + 1, page_type, search, out);
        }
    }

    let mut out = Vec::new();
    walk(tree, 0, page_type, search, &mut out);
    out
}

/// Category page URL with `category` selected and the search text kept.
fn category_href(page_type: &str, search: &SearchParams, category: Option<&str>) -> String {
    let mut query = Vec::new();
    if let Some(text) = &search.text {
        query.push(format!("text={}", urlencoding::encode(text)));
    }
    if let Some(category) = category {
        query.push(format!("category={}", urlencoding::encode(category)));
    }
    if query.is_empty() {
        format!("/{page_type}")
    } else {
        format!("/{page_type}?{}", query.join("&"))
    }
}
