use serde::{Deserialize, Serialize};

/// A storefront the pipeline extracts listings from. The set is fixed; the
/// variant order here is also the order extractor output is concatenated in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Platform {
    Blinkit,
    Zepto,
    SwiggyInstamart,
}

impl Platform {
    /// Display name used in the `platform_name` field of API responses.
    #[must_use]
    pub fn display_name(self) -> &'static str {
        match self {
            Platform::Blinkit => "Blinkit",
            Platform::Zepto => "Zepto",
            Platform::SwiggyInstamart => "Swiggy Instamart",
        }
    }
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}

/// One platform's offer for a product, as shown on its search-results page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlatformOffer {
    /// Static per-platform icon URL, for rendering a source badge.
    pub platform_image: String,
    /// Display name of the source platform, e.g. `"Swiggy Instamart"`.
    pub platform_name: String,
    /// The search URL the listing was extracted from, not a per-product
    /// deep link.
    pub navigation_url: String,
    /// Canonical currency string for the strikethrough price, or empty when
    /// the listing shows no original price.
    pub original_price: String,
    /// Canonical currency string for the primary displayed price. May carry
    /// non-canonical text when price extraction degraded (callers tolerate).
    pub discounted_price: String,
    /// Pack size / unit description, free text (e.g. `"500 ml"`).
    pub quantity: String,
    /// Platform-reported delivery estimate, free text. Empty when the
    /// platform shows none.
    pub delivery_time: String,
    /// Always `"In Stock"`: no locator currently detects out-of-stock
    /// listings. Known gap.
    pub stock_status: String,
}

/// A single-platform extracted record, pre-merge.
///
/// `platforms` holds exactly one offer at extraction time; the single-element
/// list keeps raw and merged responses shape-compatible.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawProduct {
    pub product_name: String,
    /// First whitespace-delimited token of `product_name`.
    pub brand: String,
    /// May be empty when the listing image could not be located.
    pub image_url: String,
    pub platforms: Vec<PlatformOffer>,
}

impl RawProduct {
    /// Builds a raw product from an extracted name, image and offer,
    /// deriving `brand` from the name.
    #[must_use]
    pub fn new(product_name: String, image_url: String, offer: PlatformOffer) -> Self {
        let brand = product_name
            .split_whitespace()
            .next()
            .unwrap_or_default()
            .to_string();
        Self {
            product_name,
            brand,
            image_url,
            platforms: vec![offer],
        }
    }
}

/// A cross-platform record grouping every offer whose lowercased product
/// name matches. Constructed once per request by the merge engine and
/// immutable once returned.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MergedProduct {
    /// Identity-preserving casing from the first-seen raw product.
    pub product_name: String,
    pub brand: String,
    pub image_url: String,
    /// One entry per contributing raw product, in platform-processing order.
    pub platforms: Vec<PlatformOffer>,
}

impl From<RawProduct> for MergedProduct {
    fn from(raw: RawProduct) -> Self {
        Self {
            product_name: raw.product_name,
            brand: raw.brand,
            image_url: raw.image_url,
            platforms: raw.platforms,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_offer(platform: Platform) -> PlatformOffer {
        PlatformOffer {
            platform_image: "https://example.com/icon.png".to_string(),
            platform_name: platform.display_name().to_string(),
            navigation_url: "https://example.com/search?q=milk".to_string(),
            original_price: String::new(),
            discounted_price: "₹30".to_string(),
            quantity: "500 ml".to_string(),
            delivery_time: "8 mins".to_string(),
            stock_status: "In Stock".to_string(),
        }
    }

    #[test]
    fn platform_display_names() {
        assert_eq!(Platform::Blinkit.display_name(), "Blinkit");
        assert_eq!(Platform::Zepto.display_name(), "Zepto");
        assert_eq!(Platform::SwiggyInstamart.display_name(), "Swiggy Instamart");
    }

    #[test]
    fn raw_product_derives_brand_from_first_token() {
        let raw = RawProduct::new(
            "Amul Taaza Milk 1L".to_string(),
            String::new(),
            make_offer(Platform::Zepto),
        );
        assert_eq!(raw.brand, "Amul");
    }

    #[test]
    fn raw_product_brand_empty_for_empty_name() {
        let raw = RawProduct::new(String::new(), String::new(), make_offer(Platform::Blinkit));
        assert_eq!(raw.brand, "");
    }

    #[test]
    fn raw_product_carries_exactly_one_offer() {
        let raw = RawProduct::new(
            "Amul Milk".to_string(),
            String::new(),
            make_offer(Platform::Blinkit),
        );
        assert_eq!(raw.platforms.len(), 1);
    }

    #[test]
    fn merged_product_from_raw_preserves_fields() {
        let raw = RawProduct::new(
            "Amul Milk".to_string(),
            "https://cdn.example.com/milk.jpg".to_string(),
            make_offer(Platform::SwiggyInstamart),
        );
        let merged = MergedProduct::from(raw);
        assert_eq!(merged.product_name, "Amul Milk");
        assert_eq!(merged.brand, "Amul");
        assert_eq!(merged.image_url, "https://cdn.example.com/milk.jpg");
        assert_eq!(merged.platforms.len(), 1);
    }

    #[test]
    fn serde_shape_uses_api_field_names() {
        let raw = RawProduct::new(
            "Amul Milk".to_string(),
            String::new(),
            make_offer(Platform::Zepto),
        );
        let json = serde_json::to_value(&raw).expect("serialization failed");
        assert!(json.get("product_name").is_some());
        assert!(json.get("brand").is_some());
        assert!(json.get("image_url").is_some());
        let offer = &json["platforms"][0];
        assert_eq!(offer["platform_name"], "Zepto");
        assert_eq!(offer["stock_status"], "In Stock");
        assert!(offer.get("navigation_url").is_some());
        assert!(offer.get("discounted_price").is_some());
    }
}
