//! Site-wide behaviour every page gets, independent of the booking widgets.

use std::cell::RefCell;
use std::rc::Rc;

use gloo::events::{EventListener, EventListenerOptions};
use gloo::file::callbacks::{read_as_data_url, FileReader};
use gloo::file::File;
use gloo::timers::callback::Timeout;
use shared::forms::{is_blank, shows_gcash_instructions, INVALID_FIELD_BORDER, REQUIRED_FIELDS_MESSAGE};
use shared::toast::TOAST_VISIBLE_MS;
use shared::ToastKind;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, HtmlElement, HtmlFormElement, HtmlImageElement, HtmlInputElement};

use crate::services::dom;
use crate::services::toast::notify;

pub const FALLBACK_IMAGE: &str = "/static/images/default-item.jpg";

const ALERT_DISMISS_MS: u32 = 5000;
const IMAGE_INPUTS: &str = r#"input[type="file"][accept="image/*"]"#;

pub fn install(document: &Document) {
    dismiss_alerts(document);
    dismiss_flash_toasts(document);
    bind_required_fields(document);
    bind_payment_toggle(document);
    bind_image_fallback(document);
    bind_image_previews(document);
}

/// Flash alerts rendered by the server close after five seconds
fn dismiss_alerts(document: &Document) {
    for alert in dom::query_all(document, ".alert") {
        Timeout::new(ALERT_DISMISS_MS, move || alert.remove()).forget();
    }
}

/// Toasts the server rendered already shown lose `show` after five seconds
fn dismiss_flash_toasts(document: &Document) {
    for toast in dom::query_all(document, ".toast.show") {
        Timeout::new(TOAST_VISIBLE_MS, move || {
            let _ = toast.class_list().remove_1("show");
        })
        .forget();
    }
}

/// Outline blank required fields and stop the submit
fn bind_required_fields(document: &Document) {
    for form in dom::query_all(document, "form") {
        let target = form.clone();
        EventListener::new_with_options(&target, "submit", EventListenerOptions::enable_prevent_default(), move |event| {
            if form.class_list().contains("needs-validation") {
                let valid = form
                    .dyn_ref::<HtmlFormElement>()
                    .map_or(true, |f| f.check_validity());
                if !valid {
                    event.prevent_default();
                    event.stop_propagation();
                }
                let _ = form.class_list().add_1("was-validated");
            }

            if !highlight_blank_fields(&form) {
                event.prevent_default();
                notify(REQUIRED_FIELDS_MESSAGE, ToastKind::Error);
            }
        })
        .forget();
    }
}

/// Returns whether every required field in `form` has a value
fn highlight_blank_fields(form: &Element) -> bool {
    let mut valid = true;
    for field in dom::query_all_in(form, "[required]") {
        let Some(field) = field.dyn_ref::<HtmlElement>() else {
            continue;
        };
        let blank = dom::value_of(field).map_or(true, |value| is_blank(&value));
        let style = field.style();
        let result = if blank {
            valid = false;
            style.set_property("border-color", INVALID_FIELD_BORDER)
        } else {
            style.remove_property("border-color").map(|_| ())
        };
        if let Err(e) = result {
            tracing::warn!("Could not style field {}: {:?}", field.id(), e);
        }
    }
    valid
}

fn bind_payment_toggle(document: &Document) {
    let Some(instructions) = dom::by_id::<HtmlElement>(document, "gcashInstructions") else {
        return;
    };
    for method in dom::query_all(document, r#"input[name="payment_method"]"#) {
        let instructions = instructions.clone();
        let target = method.clone();
        EventListener::new(&target, "change", move |_| {
            let value = dom::value_of(&method).unwrap_or_default();
            dom::set_visible(&instructions, shows_gcash_instructions(&value));
        })
        .forget();
    }
}

fn bind_image_fallback(document: &Document) {
    for image in dom::query_all(document, "img") {
        let Ok(image) = image.dyn_into::<HtmlImageElement>() else {
            continue;
        };
        let target = image.clone();
        EventListener::new(&target, "error", move |_| {
            if !image.src().ends_with(FALLBACK_IMAGE) {
                tracing::debug!("Image {} failed to load, using fallback", image.src());
                image.set_src(FALLBACK_IMAGE);
            }
        })
        .forget();
    }
}

/// Show a thumbnail of the picked image next to each image file input
fn bind_image_previews(document: &Document) {
    for input in dom::query_all(document, IMAGE_INPUTS) {
        let Ok(input) = input.dyn_into::<HtmlInputElement>() else {
            continue;
        };
        // Dropping the reader aborts the read
        let pending: Rc<RefCell<Option<FileReader>>> = Rc::default();
        let target = input.clone();
        EventListener::new(&target, "change", move |_| {
            let Some(file) = input.files().and_then(|files| files.get(0)) else {
                return;
            };
            let file = File::from(file);
            let name = file.name();
            let input = input.clone();
            let reader = read_as_data_url(&file, move |result| match result {
                Ok(data_url) => {
                    if let Err(e) = show_image_preview(&input, &data_url) {
                        tracing::warn!("Could not preview {}: {:?}", name, e);
                    }
                }
                Err(e) => tracing::warn!("Could not read {}: {}", name, e),
            });
            *pending.borrow_mut() = Some(reader);
        })
        .forget();
    }
}

/// Put `src` in the input's `.image-preview` sibling, creating it on first use
fn show_image_preview(input: &Element, src: &str) -> Result<Element, JsValue> {
    let document = input
        .owner_document()
        .ok_or_else(|| JsValue::from_str("file input is not in a document"))?;
    let parent = input
        .parent_element()
        .ok_or_else(|| JsValue::from_str("file input has no parent"))?;

    let preview = match parent.query_selector(".image-preview")? {
        Some(preview) => preview,
        None => {
            let preview = document.create_element("div")?;
            preview.set_class_name("image-preview mt-2");
            parent.append_child(&preview)?;
            preview
        }
    };

    let image = document.create_element("img")?;
    image.set_class_name("img-thumbnail");
    image.set_attribute("src", src)?;
    image.set_attribute("style", "max-height: 200px;")?;
    preview.set_inner_html("");
    preview.append_child(&image)?;
    Ok(preview)
}

#[cfg(test)]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_highlight_blank_fields() {
        let document = dom::document().unwrap();
        let form = document.create_element("form").unwrap();
        form.set_inner_html(
            r#"<input id="rq-name" required value="Drill">
               <input id="rq-location" required value="   ">
               <textarea id="rq-notes"></textarea>"#,
        );
        document.body().unwrap().append_child(&form).unwrap();

        assert!(!highlight_blank_fields(&form));
        let location: HtmlElement = dom::by_id(&document, "rq-location").unwrap();
        let name: HtmlElement = dom::by_id(&document, "rq-name").unwrap();
        assert_eq!(location.style().get_property_value("border-color").unwrap(), INVALID_FIELD_BORDER);
        assert_eq!(name.style().get_property_value("border-color").unwrap(), "");

        form.remove();
    }

    #[wasm_bindgen_test]
    async fn test_server_toasts_lose_show_after_five_seconds() {
        let document = dom::document().unwrap();
        let toast = document.create_element("div").unwrap();
        toast.set_class_name("toast toast-success show");
        document.body().unwrap().append_child(&toast).unwrap();

        dismiss_flash_toasts(&document);
        gloo::timers::future::TimeoutFuture::new(TOAST_VISIBLE_MS - 500).await;
        assert!(toast.class_list().contains("show"));

        gloo::timers::future::TimeoutFuture::new(600).await;
        assert!(!toast.class_list().contains("show"));
        assert!(toast.class_list().contains("toast"));

        toast.remove();
    }

    #[wasm_bindgen_test]
    fn test_image_preview_created_then_replaced() {
        let document = dom::document().unwrap();
        let field = document.create_element("div").unwrap();
        field.set_inner_html(r#"<input id="photo-input" type="file" accept="image/*">"#);
        document.body().unwrap().append_child(&field).unwrap();
        let input = document.get_element_by_id("photo-input").unwrap();

        show_image_preview(&input, "data:image/png;base64,AAAA").unwrap();
        let preview = show_image_preview(&input, "data:image/png;base64,BBBB").unwrap();

        assert_eq!(field.query_selector_all(".image-preview").unwrap().length(), 1);
        assert!(preview.class_list().contains("mt-2"));
        let images = preview.query_selector_all("img.img-thumbnail").unwrap();
        assert_eq!(images.length(), 1);
        let image: Element = images.item(0).unwrap().dyn_into().unwrap();
        assert_eq!(image.get_attribute("src").as_deref(), Some("data:image/png;base64,BBBB"));

        field.remove();
    }
}
