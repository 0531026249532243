//! Page-level settings read once at boot from the server-rendered markup.

use serde::de::DeserializeOwned;
use shared::{CurrencyStyle, RefreshStrategy};
use web_sys::{Document, Element};

use crate::services::dom;

/// Everything the widgets need to know about the page they run on
#[derive(Debug, Clone, PartialEq)]
pub struct PageConfig {
    /// From `#itemId`; absent on pages that are not about a single item
    pub item_id: Option<u64>,
    /// From `data-daily-rate` on `#total-price`, or its text
    pub daily_rate: f64,
    /// From `data-currency` on `<body>`
    pub currency: CurrencyStyle,
    /// From `data-refresh` on `.availability-container`
    pub refresh: RefreshStrategy,
    /// From `data-api-base` on `<body>`; empty means same origin
    pub api_base: String,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            item_id: None,
            daily_rate: 0.0,
            currency: CurrencyStyle::default(),
            refresh: RefreshStrategy::default(),
            api_base: String::new(),
        }
    }
}

impl PageConfig {
    pub fn from_document(document: &Document) -> Self {
        let body = document.body();
        let body = body.as_deref();

        let currency = body
            .and_then(|b| data_enum::<CurrencyStyle>(b, "data-currency"))
            .unwrap_or_default();
        let api_base = body
            .and_then(|b| b.get_attribute("data-api-base"))
            .unwrap_or_default();
        let refresh = document
            .query_selector(".availability-container")
            .ok()
            .flatten()
            .and_then(|container| data_enum::<RefreshStrategy>(&container, "data-refresh"))
            .unwrap_or_default();

        let config = Self {
            item_id: read_item_id(document),
            daily_rate: read_daily_rate(document, currency),
            currency,
            refresh,
            api_base,
        };
        tracing::debug!("Page config: {:?}", config);
        config
    }
}

/// Parse a lowercase data attribute into one of the serde-tagged enums
fn data_enum<T: DeserializeOwned>(element: &Element, attribute: &str) -> Option<T> {
    let raw = element.get_attribute(attribute)?;
    match serde_json::from_value(serde_json::Value::String(raw.trim().to_lowercase())) {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::warn!("Ignoring {}='{}': {}", attribute, raw, e);
            None
        }
    }
}

fn read_item_id(document: &Document) -> Option<u64> {
    let element = document.get_element_by_id("itemId")?;
    let raw = dom::value_of(&element)
        .filter(|value| !value.trim().is_empty())
        .or_else(|| element.text_content())?;
    match raw.trim().parse::<u64>() {
        Ok(id) => Some(id),
        Err(_) => {
            tracing::warn!("#itemId holds '{}', which is not an item id", raw);
            None
        }
    }
}

fn read_daily_rate(document: &Document, currency: CurrencyStyle) -> f64 {
    let Some(element) = document.get_element_by_id("total-price") else {
        return 0.0;
    };
    element
        .get_attribute("data-daily-rate")
        .and_then(|rate| rate.trim().parse::<f64>().ok())
        .filter(|rate| rate.is_finite() && *rate >= 0.0)
        .or_else(|| element.text_content().and_then(|text| currency.parse(&text)))
        .unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_data_enum_parsing() {
        let document = dom::document().unwrap();
        let element = document.create_element("div").unwrap();

        element.set_attribute("data-currency", "USD").unwrap();
        assert_eq!(data_enum::<CurrencyStyle>(&element, "data-currency"), Some(CurrencyStyle::Usd));

        element.set_attribute("data-currency", "yen").unwrap();
        assert_eq!(data_enum::<CurrencyStyle>(&element, "data-currency"), None);

        element.set_attribute("data-refresh", "reload").unwrap();
        assert_eq!(data_enum::<RefreshStrategy>(&element, "data-refresh"), Some(RefreshStrategy::Reload));
    }

    #[wasm_bindgen_test]
    fn test_reads_item_and_rate_from_page() {
        let document = dom::document().unwrap();
        let body = document.body().unwrap();

        let item = document.create_element("input").unwrap();
        item.set_id("itemId");
        item.set_attribute("value", "42").unwrap();
        body.append_child(&item).unwrap();

        let price = document.create_element("span").unwrap();
        price.set_id("total-price");
        price.set_text_content(Some("₱100.00"));
        body.append_child(&price).unwrap();

        let config = PageConfig::from_document(&document);
        assert_eq!(config.item_id, Some(42));
        assert_eq!(config.daily_rate, 100.0);
        assert_eq!(config.currency, CurrencyStyle::Peso);

        item.remove();
        price.remove();
    }

    #[wasm_bindgen_test]
    fn test_non_finite_daily_rate_falls_back_to_text() {
        let document = dom::document().unwrap();
        let price = document.create_element("span").unwrap();
        price.set_id("total-price");
        price.set_text_content(Some("₱250.00"));
        document.body().unwrap().append_child(&price).unwrap();

        for bad in ["NaN", "inf", "-infinity", "-5"] {
            price.set_attribute("data-daily-rate", bad).unwrap();
            assert_eq!(read_daily_rate(&document, CurrencyStyle::Peso), 250.0, "rate {}", bad);
        }

        price.set_text_content(Some(""));
        price.set_attribute("data-daily-rate", "NaN").unwrap();
        assert_eq!(read_daily_rate(&document, CurrencyStyle::Peso), 0.0);

        price.remove();
    }
}
