//! Listing extraction from rendered search-results pages.
//!
//! One generic extractor walks listing containers and applies a per-platform
//! locator table ([`PlatformSpec`]); the platforms differ only in data, never
//! in control flow. Tables live in [`platforms`] and can be retuned without
//! touching extraction or orchestration logic.

mod platforms;

use std::time::Duration;

use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};

use cartscan_core::{Platform, PlatformOffer, RawProduct};

use crate::error::ScraperError;
use crate::normalize::{clean_text, extract_price};
use crate::session::{ElementHandle, RenderSession};

pub use platforms::platform_specs;

/// How to find one field inside a listing container.
#[derive(Debug, Clone, Copy)]
pub enum Locator {
    /// Standard CSS selector, scoped to the container.
    Css(&'static str),
    /// First descendant whose `style` attribute contains the fragment.
    /// Needed where the markup carries no stable classes or test ids and
    /// fields are only distinguishable by inline styling.
    StyleContains(&'static str),
}

/// A field locator plus the attribute to read; `None` reads text content.
#[derive(Debug, Clone, Copy)]
pub struct FieldRule {
    pub locator: Locator,
    pub attr: Option<&'static str>,
}

impl FieldRule {
    const fn text(locator: Locator) -> Self {
        Self {
            locator,
            attr: None,
        }
    }

    const fn attr(locator: Locator, attr: &'static str) -> Self {
        Self {
            locator,
            attr: Some(attr),
        }
    }
}

/// Per-field locator table for one platform's listing containers.
#[derive(Debug, Clone, Copy)]
pub struct FieldLocators {
    pub name: FieldRule,
    pub image: FieldRule,
    pub quantity: FieldRule,
    pub discounted_price: FieldRule,
    pub original_price: Option<FieldRule>,
    pub delivery_time: Option<FieldRule>,
}

/// Everything platform-specific about extraction, as data.
#[derive(Debug, Clone, Copy)]
pub struct PlatformSpec {
    pub platform: Platform,
    /// Static icon URL emitted on every offer from this platform.
    pub icon_url: &'static str,
    /// Search URL template; `{query}` is replaced with the percent-encoded
    /// search term.
    pub search_url_template: &'static str,
    /// Selector for one product card's root element.
    pub container: &'static str,
    pub fields: FieldLocators,
}

impl PlatformSpec {
    /// Builds the platform search URL for `query`.
    #[must_use]
    pub fn search_url(&self, query: &str) -> String {
        let encoded = utf8_percent_encode(query, NON_ALPHANUMERIC).to_string();
        self.search_url_template.replace("{query}", &encoded)
    }
}

/// Extracts all parseable listings for `query` from one platform.
///
/// Failure handling is deliberately layered: a timeout waiting for listing
/// containers or a navigation failure yields an empty vec (the platform
/// contributes nothing to the request), and a single container that cannot
/// be read is skipped without aborting its siblings. Markup is externally
/// controlled; one malformed node must not zero out a platform.
pub async fn extract(
    session: &dyn RenderSession,
    spec: &PlatformSpec,
    query: &str,
    listing_wait: Duration,
) -> Vec<RawProduct> {
    let url = spec.search_url(query);

    if let Err(e) = session.navigate(&url).await {
        tracing::warn!(platform = %spec.platform, error = %e, "navigation failed");
        return Vec::new();
    }

    match session.wait_for(spec.container, listing_wait).await {
        Ok(true) => {}
        Ok(false) => {
            tracing::info!(
                platform = %spec.platform,
                selector = spec.container,
                "no listing containers appeared within the wait bound"
            );
            return Vec::new();
        }
        Err(e) => {
            tracing::warn!(platform = %spec.platform, error = %e, "wait for listings failed");
            return Vec::new();
        }
    }

    let containers = match session.find_all(spec.container).await {
        Ok(containers) => containers,
        Err(e) => {
            tracing::warn!(platform = %spec.platform, error = %e, "listing enumeration failed");
            return Vec::new();
        }
    };

    let mut products = Vec::new();
    for container in &containers {
        match extract_listing(container.as_ref(), spec, &url).await {
            Ok(Some(product)) => products.push(product),
            // Unparseable card (no name): not a product, silently discarded.
            Ok(None) => {}
            Err(e) => {
                tracing::debug!(platform = %spec.platform, error = %e, "skipping unreadable listing");
            }
        }
    }

    tracing::info!(
        platform = %spec.platform,
        containers = containers.len(),
        products = products.len(),
        "extraction complete"
    );
    products
}

/// Reads one listing container into a [`RawProduct`].
///
/// Returns `Ok(None)` when the container has no product name — such cards
/// (ads, section headers) must not appear in output. Locator errors bubble up
/// so the caller can skip just this container.
async fn extract_listing(
    container: &dyn ElementHandle,
    spec: &PlatformSpec,
    search_url: &str,
) -> Result<Option<RawProduct>, ScraperError> {
    let name = clean_text(&field_value(container, &spec.fields.name).await?);
    if name.is_empty() {
        return Ok(None);
    }

    let image_url = field_value(container, &spec.fields.image).await?;
    let quantity = clean_text(&field_value(container, &spec.fields.quantity).await?);
    let discounted_price = extract_price(&field_value(container, &spec.fields.discounted_price).await?);

    let original_price = match &spec.fields.original_price {
        Some(rule) => {
            let raw = field_value(container, rule).await?;
            if raw.trim().is_empty() {
                String::new()
            } else {
                extract_price(&raw)
            }
        }
        None => String::new(),
    };

    let delivery_time = match &spec.fields.delivery_time {
        Some(rule) => clean_text(&field_value(container, rule).await?),
        None => String::new(),
    };

    let offer = PlatformOffer {
        platform_image: spec.icon_url.to_string(),
        platform_name: spec.platform.display_name().to_string(),
        navigation_url: search_url.to_string(),
        original_price,
        discounted_price,
        quantity,
        delivery_time,
        stock_status: "In Stock".to_string(),
    };

    Ok(Some(RawProduct::new(name, image_url, offer)))
}

/// Resolves one field rule against a container. A field that simply is not
/// present resolves to an empty string; only transport-level locator failures
/// are errors.
async fn field_value(
    container: &dyn ElementHandle,
    rule: &FieldRule,
) -> Result<String, ScraperError> {
    let element = match rule.locator {
        Locator::Css(selector) => container.find(selector).await?,
        Locator::StyleContains(fragment) => find_by_style(container, fragment).await?,
    };

    let Some(element) = element else {
        return Ok(String::new());
    };

    let value = match rule.attr {
        Some(attr) => element.attr(attr).await?,
        None => element.text().await?,
    };
    Ok(value.unwrap_or_default())
}

/// First descendant whose inline `style` attribute contains `fragment`.
async fn find_by_style(
    container: &dyn ElementHandle,
    fragment: &str,
) -> Result<Option<Box<dyn ElementHandle>>, ScraperError> {
    for candidate in container.find_all("[style]").await? {
        if let Some(style) = candidate.attr("style").await? {
            if style.contains(fragment) {
                return Ok(Some(candidate));
            }
        }
    }
    Ok(None)
}
