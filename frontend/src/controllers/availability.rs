use anyhow::Context;
use chrono::NaiveDate;
use gloo::events::{EventListener, EventListenerOptions};
use shared::{parse_iso_date, AvailabilityAction, AvailabilityStore, ChangeOutcome, MonthCursor, SelectionState};
use wasm_bindgen_futures::spawn_local;
use web_sys::{Document, Element};
use yew::Callback;

use crate::components::availability_manager::{AvailabilityManager, AvailabilityManagerProps};
use crate::components::calendar_preview::{CalendarPreview, CalendarPreviewProps};
use crate::services::availability::ItemAvailability;
use crate::services::date_utils::{month_from_url, navigate_to_month};
use crate::services::dom;

const MANAGER_HOST: &str = ".availability-container";
const UNBLOCK_BUTTONS: &str = ".unblock-btn[data-date]";

/// Render the month preview into `#calendarPreview`, if the page has one.
///
/// Paging through months is a full navigation via the query string.
pub fn mount_calendar_preview(document: &Document, store: &AvailabilityStore, today: NaiveDate) -> bool {
    let Some(host) = dom::by_id::<Element>(document, "calendarPreview") else {
        return false;
    };
    host.set_inner_html("");

    let on_navigate = Callback::from(|cursor: MonthCursor| {
        if let Err(e) = navigate_to_month(cursor) {
            tracing::error!("Could not navigate to {}: {:?}", cursor.title(), e);
        }
    });

    yew::Renderer::<CalendarPreview>::with_root_and_props(
        host,
        CalendarPreviewProps {
            cursor: month_from_url(today),
            store: store.clone(),
            today,
            on_navigate,
        },
    )
    .render();
    true
}

/// Render the owner's availability manager into `.availability-container`
pub fn mount_availability_manager(
    document: &Document,
    item: Option<&ItemAvailability>,
    today: NaiveDate,
) -> anyhow::Result<bool> {
    let Some(host) = manager_host(document) else {
        return Ok(false);
    };
    let item = item.context("availability container present but #itemId is missing")?;
    host.set_inner_html("");

    yew::Renderer::<AvailabilityManager>::with_root_and_props(
        host,
        AvailabilityManagerProps {
            item: item.clone(),
            today,
        },
    )
    .render();
    tracing::info!("Availability manager mounted for item {} ({:?} after changes)", item.item_id, item.refresh);
    Ok(true)
}

/// Wire unblock buttons the server rendered outside the manager, e.g. in a
/// table of blocked dates. Returns how many were bound.
pub fn bind_unblock_buttons(document: &Document, item: &ItemAvailability) -> usize {
    let host = manager_host(document);
    let mut bound = 0;

    for button in dom::query_all(document, UNBLOCK_BUTTONS) {
        if host.as_ref().is_some_and(|host| host.contains(Some(&button))) {
            continue;
        }
        let raw = button.get_attribute("data-date").unwrap_or_default();
        let date = match parse_iso_date(&raw) {
            Ok(date) => date,
            Err(e) => {
                tracing::warn!("Skipping unblock button: {}", e);
                continue;
            }
        };

        let item = item.clone();
        let target = button.clone();
        EventListener::new_with_options(&target, "click", EventListenerOptions::enable_prevent_default(), move |event| {
            event.prevent_default();
            if item.store.is_busy() {
                return;
            }
            let item = item.clone();
            let button = button.clone();
            dom::set_loading(&button, true);

            spawn_local(async move {
                let outcome = item.change(AvailabilityAction::Unblock, SelectionState::single(date)).await;
                dom::set_loading(&button, false);
                if outcome == ChangeOutcome::Applied {
                    remove_row(&button);
                }
            });
        })
        .forget();
        bound += 1;
    }

    if bound > 0 {
        tracing::debug!("Bound {} unblock buttons outside the manager", bound);
    }
    bound
}

fn manager_host(document: &Document) -> Option<Element> {
    document.query_selector(MANAGER_HOST).ok().flatten()
}

/// Drop the table row or list item holding an unblocked date
fn remove_row(button: &Element) {
    match button.closest("tr, li") {
        Ok(Some(row)) => row.remove(),
        _ => button.remove(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::RefreshStrategy;
    use wasm_bindgen::JsCast;
    use wasm_bindgen_test::*;
    use web_sys::HtmlElement;

    use crate::services::api::ApiClient;

    wasm_bindgen_test_configure!(run_in_browser);

    fn item() -> ItemAvailability {
        ItemAvailability {
            item_id: 42,
            api: ApiClient::with_base_url("http://127.0.0.1:9".to_string()),
            store: AvailabilityStore::new(),
            refresh: RefreshStrategy::Refetch,
        }
    }

    #[wasm_bindgen_test]
    fn test_binds_only_standalone_unblock_buttons() {
        let document = dom::document().unwrap();
        let page = document.create_element("div").unwrap();
        page.set_inner_html(
            r#"<table><tr><td>March 5, 2030</td>
                 <td><button class="unblock-btn" data-date="2030-03-05" id="ub-standalone">Unblock</button></td></tr>
                 <tr><td><button class="unblock-btn" data-date="not-a-date">Unblock</button></td></tr></table>
               <div class="availability-container">
                 <button class="unblock-btn" data-date="2030-03-06">Unblock</button>
               </div>"#,
        );
        document.body().unwrap().append_child(&page).unwrap();

        assert_eq!(bind_unblock_buttons(&document, &item()), 1);

        page.remove();
    }

    #[wasm_bindgen_test]
    fn test_unblock_button_waits_for_request_slot() {
        let document = dom::document().unwrap();
        let page = document.create_element("div").unwrap();
        page.set_inner_html(r#"<button class="unblock-btn" data-date="2030-03-05" id="ub-busy">Unblock</button>"#);
        document.body().unwrap().append_child(&page).unwrap();

        let item = item();
        assert_eq!(bind_unblock_buttons(&document, &item), 1);
        let _slot = item.store.begin_request().unwrap();

        let button: HtmlElement = document.get_element_by_id("ub-busy").unwrap().dyn_into().unwrap();
        button.click();
        assert!(!button.has_attribute("disabled"));
        assert_eq!(button.inner_html(), "Unblock");

        page.remove();
    }

    #[wasm_bindgen_test]
    fn test_manager_requires_item() {
        let document = dom::document().unwrap();
        let host = document.create_element("div").unwrap();
        host.set_class_name("availability-container");
        document.body().unwrap().append_child(&host).unwrap();

        let err = mount_availability_manager(&document, None, NaiveDate::from_ymd_opt(2030, 1, 1).unwrap())
            .unwrap_err();
        assert!(err.to_string().contains("#itemId"));

        host.remove();
    }
}
