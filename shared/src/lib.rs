use serde::{Deserialize, Serialize};

pub mod availability;
pub mod booking;
pub mod calendar;
pub mod dates;
pub mod forms;
pub mod manager;
pub mod money;
pub mod selection;
pub mod store;
pub mod toast;

pub use availability::BlockedDates;
pub use booking::{is_selectable, validate_dates, DateRange, DateRangeError, RangeSelection, RentalQuote};
pub use calendar::{render_month, CalendarCell, DayStatus, MonthCursor, MonthGrid};
pub use dates::{
    exclusive_days, format_date_for_display, format_iso_date, inclusive_days, parse_iso_date,
    DateParseError, DayCountPolicy,
};
pub use manager::{
    apply_change, load_blocked_dates, ApiError, AvailabilityAction, AvailabilityBackend, ChangeOutcome,
    RefreshStrategy, REFRESH_DELAY_MS,
};
pub use money::CurrencyStyle;
pub use selection::SelectionState;
pub use store::{AvailabilityStore, RequestGuard, SubscriberId};
pub use toast::{Notifier, ToastKind, ToastLifecycle, ToastPhase};

/// Blocked days for one item, from `GET /item/{id}/availability`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AvailabilityResponse {
    /// ISO `YYYY-MM-DD` strings
    #[serde(default)]
    pub blocked_dates: Vec<String>,
}

/// Body of `POST /block-date/{id}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlockDatesRequest {
    pub dates: Vec<String>,
    /// Free-text note from the owner, omitted when blank
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

/// Body of `POST /unblock-date/{id}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnblockDatesRequest {
    pub dates: Vec<String>,
}

/// Reply to a block or unblock request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AvailabilityChangeResponse {
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
}

pub fn availability_path(item_id: u64) -> String {
    format!("/item/{}/availability", item_id)
}

pub fn block_dates_path(item_id: u64) -> String {
    format!("/block-date/{}", item_id)
}

pub fn unblock_dates_path(item_id: u64) -> String {
    format!("/unblock-date/{}", item_id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_paths() {
        assert_eq!(availability_path(42), "/item/42/availability");
        assert_eq!(block_dates_path(42), "/block-date/42");
        assert_eq!(unblock_dates_path(42), "/unblock-date/42");
    }

    #[test]
    fn test_block_request_body() {
        let request = BlockDatesRequest {
            dates: vec!["2024-03-05".to_string()],
            reason: Some("Maintenance".to_string()),
        };
        assert_eq!(
            serde_json::to_string(&request).unwrap(),
            r#"{"dates":["2024-03-05"],"reason":"Maintenance"}"#
        );

        let request = BlockDatesRequest { dates: vec![], reason: None };
        assert_eq!(serde_json::to_string(&request).unwrap(), r#"{"dates":[]}"#);
    }

    #[test]
    fn test_change_response_without_message() {
        let response: AvailabilityChangeResponse = serde_json::from_str(r#"{"success": true}"#).unwrap();
        assert!(response.success);
        assert_eq!(response.message, None);

        let response: AvailabilityChangeResponse =
            serde_json::from_str(r#"{"success": false, "message": "Already booked"}"#).unwrap();
        assert!(!response.success);
        assert_eq!(response.message.as_deref(), Some("Already booked"));
    }

    #[test]
    fn test_change_response_requires_success_flag() {
        assert!(serde_json::from_str::<AvailabilityChangeResponse>(r#"{"message": "hi"}"#).is_err());
    }
}
