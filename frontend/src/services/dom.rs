//! Small typed helpers over the server-rendered page.

use anyhow::{anyhow, Context};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, HtmlElement, NodeList};

const LOADING_MARKUP: &str = r#"<span class="spinner-border spinner-border-sm" role="status"></span> Loading..."#;
const ORIGINAL_TEXT_ATTR: &str = "data-original-text";

pub fn document() -> anyhow::Result<Document> {
    web_sys::window()
        .and_then(|window| window.document())
        .ok_or_else(|| anyhow!("no document available"))
}

/// Look up an element by id and cast it, `None` if absent or of another type
pub fn by_id<T: JsCast>(document: &Document, id: &str) -> Option<T> {
    document.get_element_by_id(id)?.dyn_into::<T>().ok()
}

pub fn require_by_id<T: JsCast>(document: &Document, id: &str) -> anyhow::Result<T> {
    by_id(document, id).with_context(|| format!("page is missing required element #{}", id))
}

fn collect(list: Result<NodeList, JsValue>) -> Vec<Element> {
    let Ok(list) = list else {
        return Vec::new();
    };
    (0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

pub fn query_all(document: &Document, selector: &str) -> Vec<Element> {
    collect(document.query_selector_all(selector))
}

pub fn query_all_in(root: &Element, selector: &str) -> Vec<Element> {
    collect(root.query_selector_all(selector))
}

/// Current `value` of a form control of any kind
pub fn value_of(element: &Element) -> Option<String> {
    js_sys::Reflect::get(element, &JsValue::from_str("value"))
        .ok()?
        .as_string()
}

pub fn set_visible(element: &HtmlElement, visible: bool) {
    let display = if visible { "block" } else { "none" };
    if let Err(e) = element.style().set_property("display", display) {
        tracing::warn!("Could not toggle #{}: {:?}", element.id(), e);
    }
}

pub fn set_disabled(element: &Element, disabled: bool) {
    let result = if disabled {
        element.set_attribute("disabled", "")
    } else {
        element.remove_attribute("disabled")
    };
    if let Err(e) = result {
        tracing::warn!("Could not toggle disabled on #{}: {:?}", element.id(), e);
    }
}

/// Swap a button into or out of its loading state.
///
/// The original label is kept in `data-original-text` while loading.
pub fn set_loading(button: &Element, loading: bool) {
    if loading {
        set_disabled(button, true);
        let _ = button.set_attribute(ORIGINAL_TEXT_ATTR, &button.inner_html());
        button.set_inner_html(LOADING_MARKUP);
    } else {
        set_disabled(button, false);
        if let Some(original) = button.get_attribute(ORIGINAL_TEXT_ATTR) {
            button.set_inner_html(&original);
        }
    }
}
