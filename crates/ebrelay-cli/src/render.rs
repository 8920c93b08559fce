//! Plain-text rendering of search results.

use std::fmt::Write as _;

use ebrelay_core::{CanonicalItem, SearchEnvelope, SHIPPING_LABEL};

const LINK_FALLBACK: &str = "Voir l'article";
const TITLE_FALLBACK: &str = "Titre indisponible";
const EMPTY_RESULT: &str = "Aucun résultat.";
const GENERIC_ERROR: &str = "API returned an error";

pub(crate) fn render_envelope(envelope: &SearchEnvelope) -> String {
    if !envelope.success {
        let error = envelope.error.as_deref().unwrap_or(GENERIC_ERROR);
        return format!("Erreur: {error}\n");
    }
    if envelope.items.is_empty() {
        return format!("{EMPTY_RESULT}\n");
    }

    let mut out = String::new();
    if let Some(source) = &envelope.source {
        let _ = writeln!(out, "{} résultat(s) ({source})", envelope.count);
    }
    if let Some(note) = &envelope.note {
        let _ = writeln!(out, "{note}");
    }
    for item in &envelope.items {
        out.push('\n');
        out.push_str(&render_card(item));
    }
    out
}

pub(crate) fn render_card(item: &CanonicalItem) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", heading(item));
    if let Some(url) = &item.url {
        let _ = writeln!(out, "  {url}");
    }
    if let Some(image) = &item.image {
        let alt = item.alt.as_deref().unwrap_or_default();
        let _ = writeln!(out, "  Image: {image} [{alt}]");
    }
    let _ = writeln!(out, "  {}", item.price.as_deref().unwrap_or_default());
    if let Some(shipping) = &item.shipping {
        let _ = writeln!(out, "  {}", shipping_line(shipping));
    }
    out
}

fn heading(item: &CanonicalItem) -> &str {
    match (&item.title, &item.url) {
        (Some(title), _) => title.as_str(),
        (None, Some(_)) => LINK_FALLBACK,
        (None, None) => TITLE_FALLBACK,
    }
}

/// Normalized shipping values may already carry the label
/// (`"Livraison gratuite"`, `"Livraison: 4.5 EUR"`).
fn shipping_line(shipping: &str) -> String {
    if shipping.starts_with(SHIPPING_LABEL) {
        shipping.to_owned()
    } else {
        format!("{SHIPPING_LABEL}: {shipping}")
    }
}

#[cfg(test)]
mod tests {
    use ebrelay_core::demo_envelope;

    use super::*;

    fn item(title: Option<&str>, url: Option<&str>) -> CanonicalItem {
        CanonicalItem {
            title: title.map(str::to_owned),
            url: url.map(str::to_owned),
            ..CanonicalItem::default()
        }
    }

    #[test]
    fn heading_falls_back_by_available_fields() {
        assert_eq!(heading(&item(Some("Drone"), None)), "Drone");
        assert_eq!(heading(&item(None, Some("https://www.ebay.fr/itm/1"))), "Voir l'article");
        assert_eq!(heading(&item(None, None)), "Titre indisponible");
    }

    #[test]
    fn shipping_is_not_double_prefixed() {
        assert_eq!(shipping_line("Livraison gratuite"), "Livraison gratuite");
        assert_eq!(shipping_line("Livraison: 4.5 EUR"), "Livraison: 4.5 EUR");
        assert_eq!(shipping_line("0.00 EUR"), "Livraison: 0.00 EUR");
    }

    #[test]
    fn card_lists_fields_and_skips_missing_shipping() {
        let card = render_card(&CanonicalItem {
            title: Some("Drone DJI".to_owned()),
            url: Some("https://www.ebay.fr/itm/2".to_owned()),
            image: Some("https://i.ebayimg.com/2.jpg".to_owned()),
            alt: Some("Drone DJI".to_owned()),
            price: Some("250.00 EUR".to_owned()),
            shipping: None,
        });
        assert_eq!(
            card,
            "Drone DJI\n  https://www.ebay.fr/itm/2\n  Image: https://i.ebayimg.com/2.jpg [Drone DJI]\n  250.00 EUR\n"
        );
    }

    #[test]
    fn card_with_nothing_but_a_title_fallback() {
        let card = render_card(&CanonicalItem::default());
        assert_eq!(card, "Titre indisponible\n  \n");
    }

    #[test]
    fn failure_envelope_prints_error() {
        let envelope = SearchEnvelope::failure("Missing EBAY_APP_ID or EBAY_CLIENT_SECRET", None);
        assert_eq!(
            render_envelope(&envelope),
            "Erreur: Missing EBAY_APP_ID or EBAY_CLIENT_SECRET\n"
        );
    }

    #[test]
    fn empty_envelope_prints_no_results() {
        let envelope = SearchEnvelope::found(Vec::new(), "Browse API Production");
        assert_eq!(render_envelope(&envelope), "Aucun résultat.\n");
    }

    #[test]
    fn demo_envelope_renders_three_cards() {
        let out = render_envelope(&demo_envelope("drone"));
        assert!(out.starts_with("3 résultat(s) (Demo Mode"));
        assert!(out.contains("Recherche pour: \"drone\""));
        assert_eq!(out.matches("[DEMO]").count(), 3);
        assert_eq!(out.matches("Livraison gratuite").count(), 2);
        assert!(out.contains("  Livraison: 4,50 EUR\n"));
        assert!(!out.contains("Livraison: Livraison"));
    }
}
