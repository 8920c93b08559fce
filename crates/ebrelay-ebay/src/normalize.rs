//! Normalization from raw eBay listing shapes to [`CanonicalItem`].
//!
//! The two upstream APIs are structurally incompatible, so records are tagged
//! with their origin ([`UpstreamRecord`]) and each tag has its own mapping.
//! Both mappings are total: a missing field becomes `None`, never an error.

use ebrelay_core::{CanonicalItem, FREE_SHIPPING_LABEL, SHIPPING_LABEL};

use crate::types::{BrowseAmount, FindingAmount, FindingItem, ItemSummary};

/// Legacy shipping cost that means "free". Compared as a string, exactly as
/// the Finding API prints it.
const FREE_SHIPPING_VALUE: &str = "0.0";

/// A listing tagged with the API that produced it.
#[derive(Debug, Clone)]
pub enum UpstreamRecord {
    Legacy(FindingItem),
    Modern(ItemSummary),
}

/// Maps one upstream record to the canonical item shape.
#[must_use]
pub fn normalize(record: UpstreamRecord) -> CanonicalItem {
    match record {
        UpstreamRecord::Legacy(item) => normalize_legacy(item),
        UpstreamRecord::Modern(item) => normalize_modern(item),
    }
}

/// Finding API: every field is a single-element array.
#[must_use]
pub fn normalize_legacy(item: FindingItem) -> CanonicalItem {
    let title = first_text(item.title);
    let image = first_text(item.gallery_url).or_else(|| first_text(item.picture_url_large));

    let price = item
        .selling_status
        .into_iter()
        .next()
        .and_then(|status| status.current_price.into_iter().next())
        .and_then(|amount| format_finding_amount(&amount));

    let shipping = item
        .shipping_info
        .into_iter()
        .next()
        .and_then(|info| info.shipping_service_cost.into_iter().next())
        .and_then(|cost| legacy_shipping_label(&cost));

    CanonicalItem {
        alt: title.clone(),
        title,
        url: first_text(item.view_item_url),
        image,
        price,
        shipping,
    }
}

/// Browse API: plain optional fields.
#[must_use]
pub fn normalize_modern(item: ItemSummary) -> CanonicalItem {
    let title = non_empty(item.title);
    let image = item
        .image
        .and_then(|image| non_empty(image.image_url))
        .or_else(|| {
            item.thumbnail_images
                .into_iter()
                .next()
                .and_then(|thumb| non_empty(thumb.image_url))
        });

    let price = item.price.as_ref().and_then(format_browse_amount);

    // Zero-cost shipping is NOT mapped to the free-shipping label here, unlike
    // the legacy branch. Suspect, but it is what the modern endpoint has always
    // returned to callers.
    let shipping = item
        .shipping_options
        .into_iter()
        .next()
        .and_then(|option| option.shipping_cost)
        .as_ref()
        .and_then(format_browse_amount);

    CanonicalItem {
        alt: title.clone(),
        title,
        url: non_empty(item.item_web_url),
        image,
        price,
        shipping,
    }
}

fn legacy_shipping_label(cost: &FindingAmount) -> Option<String> {
    let value = cost.value.as_deref().filter(|v| !v.is_empty())?;
    if value == FREE_SHIPPING_VALUE {
        return Some(FREE_SHIPPING_LABEL.to_string());
    }
    Some(format!(
        "{SHIPPING_LABEL}: {}",
        format_amount(value, cost.currency_id.as_deref())
    ))
}

fn format_finding_amount(amount: &FindingAmount) -> Option<String> {
    let value = amount.value.as_deref().filter(|v| !v.is_empty())?;
    Some(format_amount(value, amount.currency_id.as_deref()))
}

fn format_browse_amount(amount: &BrowseAmount) -> Option<String> {
    let value = amount.value.as_deref().filter(|v| !v.is_empty())?;
    Some(format_amount(value, amount.currency.as_deref()))
}

/// `"<value> <currency>"`, or just the value when the currency is unknown.
fn format_amount(value: &str, currency: Option<&str>) -> String {
    match currency.filter(|c| !c.is_empty()) {
        Some(currency) => format!("{value} {currency}"),
        None => value.to_string(),
    }
}

fn first_text(values: Vec<String>) -> Option<String> {
    non_empty(values.into_iter().next())
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.is_empty())
}

#[cfg(test)]
#[path = "normalize_test.rs"]
mod tests;
