//! Owner-side availability changes and the transport seam they run over.
//!
//! The browser implements [`AvailabilityBackend`] with real HTTP calls; tests
//! plug in an in-memory server. Each flow awaits at most one request at a
//! time and reports what the page should do next as a [`ChangeOutcome`].

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::availability::BlockedDates;
use crate::selection::SelectionState;
use crate::toast::{Notifier, ToastKind};
use crate::{AvailabilityChangeResponse, AvailabilityResponse, BlockDatesRequest, UnblockDatesRequest};

/// Delay between a successful change and refreshing availability
pub const REFRESH_DELAY_MS: u32 = 1000;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    #[error("Network error: {0}")]
    Network(String),
    #[error("Server error {status}: {body}")]
    Status { status: u16, body: String },
    #[error("Malformed response: {0}")]
    Decode(String),
}

#[async_trait(?Send)]
pub trait AvailabilityBackend {
    async fn fetch_availability(&self, item_id: u64) -> Result<AvailabilityResponse, ApiError>;

    async fn block_dates(
        &self,
        item_id: u64,
        request: &BlockDatesRequest,
    ) -> Result<AvailabilityChangeResponse, ApiError>;

    async fn unblock_dates(
        &self,
        item_id: u64,
        request: &UnblockDatesRequest,
    ) -> Result<AvailabilityChangeResponse, ApiError>;
}

/// Fetch the blocked set, treating any failure as "nothing blocked"
pub async fn load_blocked_dates<B>(backend: &B, item_id: u64) -> BlockedDates
where
    B: AvailabilityBackend + ?Sized,
{
    match backend.fetch_availability(item_id).await {
        Ok(response) => {
            let blocked = BlockedDates::from(response);
            tracing::info!("Loaded {} blocked dates for item {}", blocked.len(), item_id);
            blocked
        }
        Err(e) => {
            tracing::warn!("Availability fetch for item {} failed, continuing with none blocked: {}", item_id, e);
            BlockedDates::new()
        }
    }
}

/// How the manager reflects server state after a successful change
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RefreshStrategy {
    /// Re-fetch availability and re-render in place
    #[default]
    Refetch,
    /// Reload the whole page
    Reload,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AvailabilityAction {
    Block { reason: Option<String> },
    Unblock,
}

impl AvailabilityAction {
    fn progress_message(&self) -> &'static str {
        match self {
            AvailabilityAction::Block { .. } => "Blocking dates...",
            AvailabilityAction::Unblock => "Unblocking dates...",
        }
    }

    fn success_message(&self) -> &'static str {
        match self {
            AvailabilityAction::Block { .. } => "Dates blocked successfully.",
            AvailabilityAction::Unblock => "Dates unblocked successfully.",
        }
    }

    fn failure_message(&self) -> &'static str {
        match self {
            AvailabilityAction::Block { .. } => "Failed to block dates.",
            AvailabilityAction::Unblock => "Failed to unblock dates.",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeOutcome {
    /// Server accepted the change; refresh after [`REFRESH_DELAY_MS`]
    Applied,
    /// Server refused or could not be reached; leave the page as is
    Rejected,
    /// Nothing was selected, no request was made
    Skipped,
}

impl ChangeOutcome {
    /// The refresh to run once the change settles; only applied changes refresh
    pub fn refresh_after(self, strategy: RefreshStrategy) -> Option<RefreshStrategy> {
        (self == ChangeOutcome::Applied).then_some(strategy)
    }
}

/// Send a block or unblock request for `dates` and report the result
/// through `notifier`.
pub async fn apply_change<B, N>(
    backend: &B,
    notifier: &N,
    item_id: u64,
    action: &AvailabilityAction,
    dates: &SelectionState,
) -> ChangeOutcome
where
    B: AvailabilityBackend + ?Sized,
    N: Notifier + ?Sized,
{
    if dates.is_empty() {
        notifier.notify("Please select at least one date.", ToastKind::Error);
        return ChangeOutcome::Skipped;
    }

    notifier.notify(action.progress_message(), ToastKind::Info);

    let result = match action {
        AvailabilityAction::Block { reason } => {
            let request = BlockDatesRequest {
                dates: dates.iso_dates(),
                reason: reason.clone().filter(|r| !r.trim().is_empty()),
            };
            backend.block_dates(item_id, &request).await
        }
        AvailabilityAction::Unblock => {
            let request = UnblockDatesRequest { dates: dates.iso_dates() };
            backend.unblock_dates(item_id, &request).await
        }
    };

    match result {
        Ok(response) if response.success => {
            tracing::info!("{:?} of {} dates applied for item {}", action, dates.len(), item_id);
            let message = response.message.as_deref().unwrap_or(action.success_message());
            notifier.notify(message, ToastKind::Success);
            ChangeOutcome::Applied
        }
        Ok(response) => {
            tracing::warn!("{:?} refused for item {}: {:?}", action, item_id, response.message);
            let message = response.message.as_deref().unwrap_or(action.failure_message());
            notifier.notify(message, ToastKind::Error);
            ChangeOutcome::Rejected
        }
        Err(e) => {
            tracing::error!("{:?} failed for item {}: {}", action, item_id, e);
            notifier.notify(&format!("{} {}", action.failure_message(), e), ToastKind::Error);
            ChangeOutcome::Rejected
        }
    }
}
