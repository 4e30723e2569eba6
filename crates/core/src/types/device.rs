//! Device classification used to branch layout decisions.

use serde::{Deserialize, Serialize};

/// The class of device a page is rendered for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum DeviceType {
    Mobile,
    Tablet,
    #[default]
    Desktop,
}

impl DeviceType {
    /// Classify a `User-Agent` header value.
    ///
    /// Tablets are checked first because most tablet agents also carry a
    /// mobile token. Missing or unrecognized agents are treated as desktop.
    #[must_use]
    pub fn from_user_agent(user_agent: Option<&str>) -> Self {
        let Some(ua) = user_agent else {
            return Self::Desktop;
        };
        let ua = ua.to_ascii_lowercase();

        let is_tablet = ua.contains("ipad")
            || ua.contains("tablet")
            || ua.contains("kindle")
            || ua.contains("silk/")
            || (ua.contains("android") && !ua.contains("mobile"));
        if is_tablet {
            return Self::Tablet;
        }

        let is_mobile = ua.contains("mobi")
            || ua.contains("iphone")
            || ua.contains("ipod")
            || ua.contains("windows phone")
            || ua.contains("blackberry");
        if is_mobile {
            return Self::Mobile;
        }

        Self::Desktop
    }

    /// Lowercase name, used for CSS hooks.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Mobile => "mobile",
            Self::Tablet => "tablet",
            Self::Desktop => "desktop",
        }
    }

    #[must_use]
    pub const fn is_mobile(&self) -> bool {
        matches!(self, Self::Mobile)
    }

    /// Number of carousel slides visible at once.
    #[must_use]
    pub const fn carousel_slides_per_view(&self) -> usize {
        match self {
            Self::Mobile => 1,
            Self::Tablet => 2,
            Self::Desktop => 3,
        }
    }

    /// Number of product grid columns.
    #[must_use]
    pub const fn product_grid_columns(&self) -> usize {
        match self {
            Self::Mobile => 2,
            Self::Tablet => 3,
            Self::Desktop => 4,
        }
    }
}
