//! Static listings served when no eBay credentials are configured.

use crate::item::{CanonicalItem, SearchEnvelope, SearchPath, FREE_SHIPPING_LABEL};

const DEMO_URL: &str = "https://www.ebay.fr";

/// Builds the demo envelope. The items never depend on `query`; it is only
/// echoed back in the `note`.
#[must_use]
pub fn demo_envelope(query: &str) -> SearchEnvelope {
    let items = vec![
        demo_item(
            "[DEMO] Cabela's Big Game Hunter 2013 - Nintendo Wii U",
            "https://via.placeholder.com/300x300.png?text=Cabela+Wii+U",
            "Cabela's Big Game Hunter 2013",
            "25,00 EUR",
            FREE_SHIPPING_LABEL,
        ),
        demo_item(
            "[DEMO] Cabela's Dangerous Hunts 2013 Wii U Complet",
            "https://via.placeholder.com/300x300.png?text=Cabela+Complete",
            "Cabela's Dangerous Hunts",
            "30,00 EUR",
            "Livraison: 4,50 EUR",
        ),
        demo_item(
            "[DEMO] Nintendo Wii U - Cabela's Bundle avec fusil",
            "https://via.placeholder.com/300x300.png?text=Bundle",
            "Cabela Bundle",
            "89,99 EUR",
            FREE_SHIPPING_LABEL,
        ),
    ];

    SearchEnvelope::found(items, SearchPath::Demo.source_label(false))
        .with_note(format!("Recherche pour: \"{query}\""))
}

fn demo_item(title: &str, image: &str, alt: &str, price: &str, shipping: &str) -> CanonicalItem {
    CanonicalItem {
        title: Some(title.to_string()),
        url: Some(DEMO_URL.to_string()),
        image: Some(image.to_string()),
        alt: Some(alt.to_string()),
        price: Some(price.to_string()),
        shipping: Some(shipping.to_string()),
    }
}
