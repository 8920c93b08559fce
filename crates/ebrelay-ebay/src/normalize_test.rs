use serde_json::json;

use super::*;

fn legacy(value: serde_json::Value) -> FindingItem {
    serde_json::from_value(value).expect("valid legacy item fixture")
}

fn modern(value: serde_json::Value) -> ItemSummary {
    serde_json::from_value(value).expect("valid modern item fixture")
}

fn full_legacy_item() -> FindingItem {
    legacy(json!({
        "itemId": ["115678901234"],
        "title": ["Cabela's Big Game Hunter 2013 Wii U"],
        "viewItemURL": ["https://www.ebay.fr/itm/115678901234"],
        "galleryURL": ["https://i.ebayimg.com/thumbs/images/g/abc/s-l140.jpg"],
        "pictureURLLarge": ["https://i.ebayimg.com/images/g/abc/s-l400.jpg"],
        "sellingStatus": [{
            "currentPrice": [{"@currencyId": "EUR", "__value__": "24.9"}],
            "sellingState": ["Active"]
        }],
        "shippingInfo": [{
            "shippingServiceCost": [{"@currencyId": "EUR", "__value__": "4.5"}],
            "shippingType": ["Flat"]
        }]
    }))
}

// -----------------------------------------------------------------------
// legacy
// -----------------------------------------------------------------------

#[test]
fn legacy_maps_all_fields() {
    let item = normalize(UpstreamRecord::Legacy(full_legacy_item()));
    assert_eq!(
        item.title.as_deref(),
        Some("Cabela's Big Game Hunter 2013 Wii U")
    );
    assert_eq!(item.alt, item.title);
    assert_eq!(
        item.url.as_deref(),
        Some("https://www.ebay.fr/itm/115678901234")
    );
    assert_eq!(
        item.image.as_deref(),
        Some("https://i.ebayimg.com/thumbs/images/g/abc/s-l140.jpg")
    );
    assert_eq!(item.price.as_deref(), Some("24.9 EUR"));
    assert_eq!(item.shipping.as_deref(), Some("Livraison: 4.5 EUR"));
}

#[test]
fn legacy_image_falls_back_to_large_picture() {
    let mut raw = full_legacy_item();
    raw.gallery_url.clear();
    let item = normalize_legacy(raw);
    assert_eq!(
        item.image.as_deref(),
        Some("https://i.ebayimg.com/images/g/abc/s-l400.jpg")
    );
}

#[test]
fn legacy_empty_gallery_string_falls_back_too() {
    let mut raw = full_legacy_item();
    raw.gallery_url = vec![String::new()];
    let item = normalize_legacy(raw);
    assert_eq!(
        item.image.as_deref(),
        Some("https://i.ebayimg.com/images/g/abc/s-l400.jpg")
    );
}

#[test]
fn legacy_missing_price_structure_is_null() {
    for raw in [
        json!({"title": ["x"]}),
        json!({"sellingStatus": []}),
        json!({"sellingStatus": [{}]}),
        json!({"sellingStatus": [{"currentPrice": []}]}),
        json!({"sellingStatus": [{"currentPrice": [{"@currencyId": "EUR"}]}]}),
        json!({"sellingStatus": [{"currentPrice": [{"@currencyId": "EUR", "__value__": ""}]}]}),
    ] {
        let item = normalize_legacy(legacy(raw.clone()));
        assert!(item.price.is_none(), "price should be null for {raw}");
    }
}

#[test]
fn legacy_zero_shipping_is_free_label() {
    let raw = legacy(json!({
        "shippingInfo": [{"shippingServiceCost": [{"@currencyId": "EUR", "__value__": "0.0"}]}]
    }));
    assert_eq!(
        normalize_legacy(raw).shipping.as_deref(),
        Some("Livraison gratuite")
    );
}

#[test]
fn legacy_other_zero_spellings_are_not_free() {
    // Only the literal "0.0" is treated as free.
    let raw = legacy(json!({
        "shippingInfo": [{"shippingServiceCost": [{"@currencyId": "EUR", "__value__": "0.00"}]}]
    }));
    assert_eq!(
        normalize_legacy(raw).shipping.as_deref(),
        Some("Livraison: 0.00 EUR")
    );
}

#[test]
fn legacy_shipping_absent_is_null() {
    for raw in [
        json!({}),
        json!({"shippingInfo": [{"shippingType": ["Calculated"]}]}),
        json!({"shippingInfo": [{"shippingServiceCost": [{"@currencyId": "EUR"}]}]}),
    ] {
        assert!(
            normalize_legacy(legacy(raw.clone())).shipping.is_none(),
            "shipping should be null for {raw}"
        );
    }
}

#[test]
fn legacy_missing_currency_keeps_amount_only() {
    let raw = legacy(json!({
        "sellingStatus": [{"currentPrice": [{"__value__": "12.0"}]}]
    }));
    assert_eq!(normalize_legacy(raw).price.as_deref(), Some("12.0"));
}

#[test]
fn legacy_empty_record_is_all_null() {
    assert_eq!(
        normalize_legacy(FindingItem::default()),
        CanonicalItem::default()
    );
}

// -----------------------------------------------------------------------
// modern
// -----------------------------------------------------------------------

#[test]
fn modern_maps_all_fields() {
    let raw = modern(json!({
        "itemId": "v1|115678901234|0",
        "title": "DJI Mini 2 drone",
        "itemWebUrl": "https://www.ebay.fr/itm/115678901234",
        "image": {"imageUrl": "https://i.ebayimg.com/images/g/xyz/s-l225.jpg"},
        "price": {"value": "249.00", "currency": "EUR"},
        "shippingOptions": [{
            "shippingCostType": "FIXED",
            "shippingCost": {"value": "6.90", "currency": "EUR"}
        }]
    }));
    let item = normalize(UpstreamRecord::Modern(raw));
    assert_eq!(item.title.as_deref(), Some("DJI Mini 2 drone"));
    assert_eq!(item.alt.as_deref(), Some("DJI Mini 2 drone"));
    assert_eq!(
        item.url.as_deref(),
        Some("https://www.ebay.fr/itm/115678901234")
    );
    assert_eq!(
        item.image.as_deref(),
        Some("https://i.ebayimg.com/images/g/xyz/s-l225.jpg")
    );
    assert_eq!(item.price.as_deref(), Some("249.00 EUR"));
    assert_eq!(item.shipping.as_deref(), Some("6.90 EUR"));
}

#[test]
fn modern_image_falls_back_to_first_thumbnail() {
    let raw = modern(json!({
        "thumbnailImages": [
            {"imageUrl": "https://i.ebayimg.com/thumb-1.jpg"},
            {"imageUrl": "https://i.ebayimg.com/thumb-2.jpg"}
        ]
    }));
    assert_eq!(
        normalize_modern(raw).image.as_deref(),
        Some("https://i.ebayimg.com/thumb-1.jpg")
    );
}

#[test]
fn modern_zero_shipping_is_not_special_cased() {
    let raw = modern(json!({
        "shippingOptions": [{"shippingCost": {"value": "0", "currency": "EUR"}}]
    }));
    assert_eq!(normalize_modern(raw).shipping.as_deref(), Some("0 EUR"));

    let raw = modern(json!({
        "shippingOptions": [{"shippingCost": {"value": "0.00", "currency": "EUR"}}]
    }));
    assert_eq!(normalize_modern(raw).shipping.as_deref(), Some("0.00 EUR"));
}

#[test]
fn modern_missing_optionals_are_null() {
    let raw = modern(json!({
        "title": "Lot de jeux",
        "shippingOptions": [{"shippingCostType": "CALCULATED"}]
    }));
    let item = normalize_modern(raw);
    assert_eq!(item.title.as_deref(), Some("Lot de jeux"));
    assert!(item.url.is_none());
    assert!(item.image.is_none());
    assert!(item.price.is_none());
    assert!(item.shipping.is_none());
}

#[test]
fn modern_empty_record_is_all_null() {
    assert_eq!(
        normalize_modern(ItemSummary::default()),
        CanonicalItem::default()
    );
}
