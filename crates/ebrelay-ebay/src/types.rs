//! eBay API response types.
//!
//! ## Finding API (legacy, `findItemsByKeywords` with `RESPONSE-DATA-FORMAT=JSON`)
//!
//! Every field, scalar or object, arrives wrapped in a single-element array:
//! `"title": ["Wii U console"]`, `"sellingStatus": [{"currentPrice": [...]}]`.
//! This is an artifact of the XML-to-JSON conversion on eBay's side. Monetary
//! amounts are objects of the form `{"@currencyId": "EUR", "__value__": "12.5"}`
//! with the value as a decimal string.
//!
//! ### Acknowledgement
//! Failures still come back with HTTP 200 and `"ack": ["Failure"]` plus an
//! `errorMessage` tree, so the status code alone is not enough.
//!
//! ## Browse API (modern, `item_summary/search`)
//!
//! Plain camelCase JSON with optional scalars and objects. Amounts are
//! `{"value": "12.50", "currency": "EUR"}`. `itemSummaries` is omitted entirely
//! when nothing matches.
//!
//! ## Leniency
//!
//! Listing fields are decoded one by one and never fail the response:
//! - arrays: a missing key or `null` becomes an empty `Vec`, elements of the
//!   wrong type are dropped, and a bare value is read as a one-element array;
//! - optional fields: a value of the wrong type becomes `None`.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

fn lenient_vec<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let elements = match Value::deserialize(deserializer)? {
        Value::Null => Vec::new(),
        Value::Array(elements) => elements,
        other => vec![other],
    };
    Ok(elements
        .into_iter()
        .filter_map(|element| serde_json::from_value(element).ok())
        .collect())
}

fn lenient_option<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    Ok(serde_json::from_value(Value::deserialize(deserializer)?).ok())
}

// ---------------------------------------------------------------------------
// Finding API
// ---------------------------------------------------------------------------

/// Top-level body of a `findItemsByKeywords` call.
#[derive(Debug, Default, Deserialize)]
pub struct FindingResponse {
    #[serde(
        rename = "findItemsByKeywordsResponse",
        default,
        deserialize_with = "lenient_vec"
    )]
    pub find_items_by_keywords_response: Vec<FindItemsByKeywordsResponse>,
}

impl FindingResponse {
    /// Items of the first search result, or an empty list when any wrapper
    /// level is missing.
    #[must_use]
    pub fn into_items(self) -> Vec<FindingItem> {
        self.find_items_by_keywords_response
            .into_iter()
            .next()
            .and_then(|response| response.search_result.into_iter().next())
            .map(|result| result.item)
            .unwrap_or_default()
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FindItemsByKeywordsResponse {
    #[serde(default, deserialize_with = "lenient_vec")]
    pub ack: Vec<String>,
    #[serde(default, deserialize_with = "lenient_vec")]
    pub search_result: Vec<FindingSearchResult>,
}

#[derive(Debug, Default, Deserialize)]
pub struct FindingSearchResult {
    #[serde(default, deserialize_with = "lenient_vec")]
    pub item: Vec<FindingItem>,
}

/// One listing in the legacy shape.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FindingItem {
    #[serde(default, deserialize_with = "lenient_vec")]
    pub title: Vec<String>,
    #[serde(rename = "viewItemURL", default, deserialize_with = "lenient_vec")]
    pub view_item_url: Vec<String>,
    #[serde(rename = "galleryURL", default, deserialize_with = "lenient_vec")]
    pub gallery_url: Vec<String>,
    #[serde(rename = "pictureURLLarge", default, deserialize_with = "lenient_vec")]
    pub picture_url_large: Vec<String>,
    #[serde(default, deserialize_with = "lenient_vec")]
    pub selling_status: Vec<SellingStatus>,
    #[serde(default, deserialize_with = "lenient_vec")]
    pub shipping_info: Vec<ShippingInfo>,
}

#[derive(Debug, Default, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SellingStatus {
    #[serde(default, deserialize_with = "lenient_vec")]
    pub current_price: Vec<FindingAmount>,
}

#[derive(Debug, Default, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShippingInfo {
    #[serde(default, deserialize_with = "lenient_vec")]
    pub shipping_service_cost: Vec<FindingAmount>,
}

/// `{"@currencyId": "EUR", "__value__": "12.5"}`.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct FindingAmount {
    #[serde(rename = "__value__", default, deserialize_with = "lenient_option")]
    pub value: Option<String>,
    #[serde(rename = "@currencyId", default, deserialize_with = "lenient_option")]
    pub currency_id: Option<String>,
}

// ---------------------------------------------------------------------------
// Browse API
// ---------------------------------------------------------------------------

/// Top-level body of `GET /buy/browse/v1/item_summary/search`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BrowseSearchResponse {
    #[serde(default, deserialize_with = "lenient_option")]
    pub total: Option<u64>,
    #[serde(default, deserialize_with = "lenient_vec")]
    pub item_summaries: Vec<ItemSummary>,
}

/// One listing in the modern shape.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemSummary {
    #[serde(default, deserialize_with = "lenient_option")]
    pub item_id: Option<String>,
    #[serde(default, deserialize_with = "lenient_option")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "lenient_option")]
    pub item_web_url: Option<String>,
    #[serde(default, deserialize_with = "lenient_option")]
    pub image: Option<BrowseImage>,
    #[serde(default, deserialize_with = "lenient_vec")]
    pub thumbnail_images: Vec<BrowseImage>,
    #[serde(default, deserialize_with = "lenient_option")]
    pub price: Option<BrowseAmount>,
    #[serde(default, deserialize_with = "lenient_vec")]
    pub shipping_options: Vec<ShippingOption>,
}

#[derive(Debug, Default, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BrowseImage {
    #[serde(default, deserialize_with = "lenient_option")]
    pub image_url: Option<String>,
}

/// `{"value": "12.50", "currency": "EUR"}`.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct BrowseAmount {
    #[serde(default, deserialize_with = "lenient_option")]
    pub value: Option<String>,
    #[serde(default, deserialize_with = "lenient_option")]
    pub currency: Option<String>,
}

#[derive(Debug, Default, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShippingOption {
    #[serde(default, deserialize_with = "lenient_option")]
    pub shipping_cost: Option<BrowseAmount>,
    #[serde(default, deserialize_with = "lenient_option")]
    pub shipping_cost_type: Option<String>,
}

// ---------------------------------------------------------------------------
// OAuth
// ---------------------------------------------------------------------------

/// Client-credentials grant response from `/identity/v1/oauth2/token`.
#[derive(Debug, Deserialize)]
pub struct TokenResponse {
    #[serde(default)]
    pub access_token: Option<String>,
    /// Lifetime in seconds; eBay sends 7200 for application tokens.
    #[serde(default)]
    pub expires_in: Option<u64>,
    #[serde(default)]
    pub token_type: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finding_response_unwraps_nested_arrays() {
        let body = serde_json::json!({
            "findItemsByKeywordsResponse": [{
                "ack": ["Success"],
                "searchResult": [{
                    "@count": "1",
                    "item": [{
                        "title": ["Cabela's Big Game Hunter 2013"],
                        "viewItemURL": ["https://www.ebay.fr/itm/1"],
                        "sellingStatus": [{
                            "currentPrice": [{"@currencyId": "EUR", "__value__": "19.99"}]
                        }]
                    }]
                }]
            }]
        });
        let parsed: FindingResponse = serde_json::from_value(body).expect("parse");
        let items = parsed.into_items();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].title, vec!["Cabela's Big Game Hunter 2013"]);
        assert_eq!(
            items[0].selling_status[0].current_price[0].value.as_deref(),
            Some("19.99")
        );
    }

    #[test]
    fn finding_response_without_search_result_has_no_items() {
        let body = serde_json::json!({
            "findItemsByKeywordsResponse": [{"ack": ["Success"], "searchResult": [{"@count": "0"}]}]
        });
        let parsed: FindingResponse = serde_json::from_value(body).expect("parse");
        assert!(parsed.into_items().is_empty());

        let parsed: FindingResponse = serde_json::from_value(serde_json::json!({})).expect("parse");
        assert!(parsed.into_items().is_empty());
    }

    #[test]
    fn explicit_nulls_decode_as_empty() {
        let body = serde_json::json!({
            "title": null,
            "galleryURL": null,
            "shippingInfo": [{"shippingServiceCost": null}]
        });
        let item: FindingItem = serde_json::from_value(body).expect("parse");
        assert!(item.title.is_empty());
        assert!(item.gallery_url.is_empty());
        assert!(item.shipping_info[0].shipping_service_cost.is_empty());
    }

    #[test]
    fn browse_response_without_summaries_is_empty() {
        let parsed: BrowseSearchResponse =
            serde_json::from_value(serde_json::json!({"total": 0, "limit": 20})).expect("parse");
        assert_eq!(parsed.total, Some(0));
        assert!(parsed.item_summaries.is_empty());
    }

    #[test]
    fn token_response_tolerates_missing_lifetime() {
        let parsed: TokenResponse =
            serde_json::from_value(serde_json::json!({"access_token": "v^1.1#abc"})).expect("parse");
        assert_eq!(parsed.access_token.as_deref(), Some("v^1.1#abc"));
        assert!(parsed.expires_in.is_none());
    }

    #[test]
    fn finding_item_with_wrong_field_types_keeps_the_rest() {
        let body = serde_json::json!({
            "findItemsByKeywordsResponse": [{
                "searchResult": [{
                    "item": [
                        {
                            "title": [{"unexpected": true}],
                            "viewItemURL": "https://www.ebay.fr/itm/1",
                            "sellingStatus": [{"currentPrice": [{"@currencyId": 978, "__value__": "5.0"}]}],
                            "shippingInfo": "n/a"
                        },
                        "not an item",
                        {"title": ["Second"]}
                    ]
                }]
            }]
        });
        let parsed: FindingResponse = serde_json::from_value(body).expect("lenient parse");
        let items = parsed.into_items();
        assert_eq!(items.len(), 2);
        assert!(items[0].title.is_empty());
        assert_eq!(items[0].view_item_url, vec!["https://www.ebay.fr/itm/1"]);
        let price = &items[0].selling_status[0].current_price[0];
        assert_eq!(price.value.as_deref(), Some("5.0"));
        assert!(price.currency_id.is_none());
        assert!(items[0].shipping_info.is_empty());
        assert_eq!(items[1].title, vec!["Second"]);
    }

    #[test]
    fn item_summary_with_wrong_field_types_keeps_the_rest() {
        let body = serde_json::json!({
            "total": "many",
            "itemSummaries": [{
                "title": 42,
                "itemWebUrl": "https://www.ebay.fr/itm/2",
                "image": "https://i.ebayimg.com/flat.jpg",
                "price": {"value": 12.5, "currency": "EUR"},
                "shippingOptions": [{"shippingCost": {"value": "0.00", "currency": "EUR"}}]
            }]
        });
        let parsed: BrowseSearchResponse = serde_json::from_value(body).expect("lenient parse");
        assert!(parsed.total.is_none());
        let item = &parsed.item_summaries[0];
        assert!(item.title.is_none());
        assert!(item.image.is_none());
        assert_eq!(item.item_web_url.as_deref(), Some("https://www.ebay.fr/itm/2"));
        let price = item.price.as_ref().expect("price object kept");
        assert!(price.value.is_none());
        assert_eq!(price.currency.as_deref(), Some("EUR"));
        assert_eq!(
            item.shipping_options[0]
                .shipping_cost
                .as_ref()
                .and_then(|c| c.value.as_deref()),
            Some("0.00")
        );
    }
}
