use shared::AvailabilityStore;
use wasm_bindgen_futures::spawn_local;

mod components;
mod config;
mod controllers;
mod hooks;
mod services;

use config::PageConfig;
use controllers::availability::{bind_unblock_buttons, mount_availability_manager, mount_calendar_preview};
use controllers::booking::BookingController;
use controllers::enhancements;
use services::api::ApiClient;
use services::availability::ItemAvailability;
use services::{date_utils, dom};

/// Anchors whose widgets render an item's availability
const AVAILABILITY_ANCHORS: &str = "#start_date, #calendarPreview, .availability-container, .unblock-btn[data-date]";

fn main() {
    services::logging::init();

    let document = match dom::document() {
        Ok(document) => document,
        Err(e) => {
            tracing::error!("Nothing to attach to: {:#}", e);
            return;
        }
    };

    enhancements::install(&document);

    let config = PageConfig::from_document(&document);
    let today = date_utils::today();

    if dom::query_all(&document, AVAILABILITY_ANCHORS).is_empty() {
        return;
    }

    let api = ApiClient::with_base_url(config.api_base.clone());
    let store = AvailabilityStore::new();
    let item = config.item_id.map(|item_id| ItemAvailability {
        item_id,
        api,
        store: store.clone(),
        refresh: config.refresh,
    });

    // One fetch feeds every widget; a failed fetch leaves every date open
    spawn_local(async move {
        match &item {
            Some(item) => {
                let _slot = store.begin_request();
                store.refresh(&item.api, item.item_id).await;
            }
            None => tracing::warn!("No #itemId on page, treating every date as available"),
        }

        mount_calendar_preview(&document, &store, today);
        if let Err(e) = BookingController::mount(&document, &config, &store, today) {
            tracing::error!("Booking form not wired: {:#}", e);
        }
        if let Err(e) = mount_availability_manager(&document, item.as_ref(), today) {
            tracing::error!("Availability manager not mounted: {:#}", e);
        }
        if let Some(item) = &item {
            bind_unblock_buttons(&document, item);
        }
    });
}
