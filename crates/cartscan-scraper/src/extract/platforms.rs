//! Locator tables for the supported storefronts.
//!
//! These selectors are coupled to externally controlled markup and are the
//! first thing to retune when a storefront ships a redesign. Keep everything
//! platform-specific here; `extract` itself is platform-agnostic.

use cartscan_core::Platform;

use super::{FieldLocators, FieldRule, Locator, PlatformSpec};

/// Blinkit renders product cards with Tailwind utility classes; the
/// strikethrough price carries no class at all and is only identifiable by
/// its inline text-decoration style.
const BLINKIT: PlatformSpec = PlatformSpec {
    platform: Platform::Blinkit,
    icon_url: "https://blinkit.com/favicon.ico",
    search_url_template: "https://blinkit.com/s/?q={query}",
    container: "div[data-test-id=\"plp-product\"]",
    fields: FieldLocators {
        name: FieldRule::text(Locator::Css(
            "div.tw-text-300.tw-font-semibold.tw-line-clamp-2",
        )),
        image: FieldRule::attr(Locator::Css("img"), "src"),
        quantity: FieldRule::text(Locator::Css(
            "div.tw-text-200.tw-font-medium.tw-line-clamp-1",
        )),
        discounted_price: FieldRule::text(Locator::Css("div.tw-text-200.tw-font-semibold")),
        original_price: Some(FieldRule::text(Locator::StyleContains(
            "text-decoration-line: line-through",
        ))),
        delivery_time: Some(FieldRule::text(Locator::Css(
            "div.tw-text-050.tw-font-bold.tw-uppercase",
        ))),
    },
};

const ZEPTO: PlatformSpec = PlatformSpec {
    platform: Platform::Zepto,
    icon_url: "https://www.zeptonow.com/favicon.png",
    search_url_template: "https://www.zeptonow.com/search?query={query}",
    container: "a[data-testid=\"product-card\"]",
    fields: FieldLocators {
        name: FieldRule::text(Locator::Css("[data-testid=\"product-card-name\"]")),
        image: FieldRule::attr(Locator::Css("[data-testid=\"product-card-image\"]"), "src"),
        quantity: FieldRule::text(Locator::Css("[data-testid=\"product-card-quantity\"]")),
        discounted_price: FieldRule::text(Locator::Css("[data-testid=\"product-card-price\"]")),
        original_price: Some(FieldRule::text(Locator::Css("p[class*=\"line-through\"]"))),
        // Zepto shows a storewide ETA in the header, not per card.
        delivery_time: None,
    },
};

const SWIGGY_INSTAMART: PlatformSpec = PlatformSpec {
    platform: Platform::SwiggyInstamart,
    icon_url: "https://media-assets.swiggy.com/portal/testing/seo-home/icon-instamart.png",
    search_url_template: "https://www.swiggy.com/instamart/search?custom_back=true&query={query}",
    container: "div[data-testid=\"ItemWidgetContainer\"]",
    fields: FieldLocators {
        name: FieldRule::text(Locator::Css("div.novMV")),
        image: FieldRule::attr(Locator::Css("img.sc-dcJsrY"), "src"),
        quantity: FieldRule::text(Locator::Css("div.entQHA")),
        discounted_price: FieldRule::text(Locator::Css("div[data-testid=\"item-offer-price\"]")),
        original_price: Some(FieldRule::text(Locator::Css(
            "div[data-testid=\"item-mrp-price\"]",
        ))),
        delivery_time: Some(FieldRule::text(Locator::Css(
            "div[data-testid=\"item-eta\"]",
        ))),
    },
};

static SPECS: [PlatformSpec; 3] = [BLINKIT, ZEPTO, SWIGGY_INSTAMART];

/// All supported platforms, in the fixed order extractor output is
/// concatenated in.
#[must_use]
pub fn platform_specs() -> &'static [PlatformSpec; 3] {
    &SPECS
}
