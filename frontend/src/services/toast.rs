use gloo::timers::callback::Timeout;
use shared::{Notifier, ToastKind, ToastLifecycle};
use wasm_bindgen::JsValue;
use web_sys::Element;

/// Toasts appended to `<body>`
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct DomNotifier;

impl Notifier for DomNotifier {
    fn notify(&self, message: &str, kind: ToastKind) {
        notify(message, kind);
    }
}

/// Show a toast that fades after five seconds and is removed shortly after.
///
/// Toasts stack; nothing is deduplicated.
pub fn notify(message: &str, kind: ToastKind) {
    match show_toast(message, kind) {
        Ok(toast) => schedule_dismissal(toast, ToastLifecycle::default()),
        Err(e) => tracing::error!("Could not show {} toast '{}': {:?}", kind.as_str(), message, e),
    }
}

fn show_toast(message: &str, kind: ToastKind) -> Result<Element, JsValue> {
    let document = web_sys::window()
        .and_then(|window| window.document())
        .ok_or_else(|| JsValue::from_str("no document"))?;
    let body = document.body().ok_or_else(|| JsValue::from_str("no body"))?;

    let toast = document.create_element("div")?;
    toast.set_class_name(&kind.class_name());
    toast.set_text_content(Some(message));
    body.append_child(&toast)?;
    Ok(toast)
}

fn schedule_dismissal(toast: Element, lifecycle: ToastLifecycle) {
    Timeout::new(lifecycle.visible_ms, move || {
        let _ = toast.class_list().remove_1("show");
        Timeout::new(lifecycle.fade_ms, move || toast.remove()).forget();
    })
    .forget();
}
