use gloo::timers::future::TimeoutFuture;
use shared::{
    apply_change, AvailabilityAction, AvailabilityStore, ChangeOutcome, RefreshStrategy, SelectionState,
    REFRESH_DELAY_MS,
};

use crate::services::api::ApiClient;
use crate::services::date_utils::reload_page;
use crate::services::toast::DomNotifier;

/// Everything needed to change one item's availability and show the result
#[derive(Clone, Debug, PartialEq)]
pub struct ItemAvailability {
    pub item_id: u64,
    pub api: ApiClient,
    pub store: AvailabilityStore,
    pub refresh: RefreshStrategy,
}

impl ItemAvailability {
    /// Send one block/unblock request, then refresh every view.
    ///
    /// Holds the page's request slot until the refresh has landed; a change
    /// started while another is in flight is skipped.
    pub async fn change(&self, action: AvailabilityAction, dates: SelectionState) -> ChangeOutcome {
        let Some(_slot) = self.store.begin_request() else {
            tracing::debug!("Ignoring {:?}, another request is in flight", action);
            return ChangeOutcome::Skipped;
        };

        let outcome = apply_change(&self.api, &DomNotifier, self.item_id, &action, &dates).await;
        let Some(strategy) = outcome.refresh_after(self.refresh) else {
            return outcome;
        };

        TimeoutFuture::new(REFRESH_DELAY_MS).await;
        match strategy {
            RefreshStrategy::Refetch => self.store.refresh(&self.api, self.item_id).await,
            RefreshStrategy::Reload => {
                if let Err(e) = reload_page() {
                    tracing::error!("Page reload failed: {:?}", e);
                }
            }
        }
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    async fn test_change_skipped_while_slot_taken() {
        let item = ItemAvailability {
            item_id: 42,
            api: ApiClient::with_base_url("http://127.0.0.1:9".to_string()),
            store: AvailabilityStore::new(),
            refresh: RefreshStrategy::Refetch,
        };
        let _slot = item.store.begin_request().unwrap();

        let date = NaiveDate::from_ymd_opt(2030, 3, 5).unwrap();
        let outcome = item.change(AvailabilityAction::Unblock, SelectionState::single(date)).await;

        assert_eq!(outcome, ChangeOutcome::Skipped);
        assert!(item.store.is_busy());
    }
}
