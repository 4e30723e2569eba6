//! Promotional offers shown in the carousel.

use bazaar_core::OfferId;
use serde::Deserialize;

/// One carousel slide.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Offer {
    pub id: OfferId,
    pub image_url: String,
    pub alt: String,
    /// Where clicking the slide goes. Slides without a link are not clickable.
    #[serde(default)]
    pub link: Option<String>,
}
