//! Rental form controller: date range, live quote and submit gating.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use anyhow::anyhow;
use chrono::NaiveDate;
use gloo::events::{EventListener, EventListenerOptions};
use shared::{
    format_iso_date, parse_iso_date, validate_dates, AvailabilityStore, BlockedDates, CurrencyStyle, DateRange,
    DateRangeError, RangeSelection, RentalQuote,
};
use web_sys::{Document, Element, HtmlElement, HtmlFormElement, HtmlInputElement};
use yew::Callback;

use crate::components::range_picker::{RangePicker, RangePickerProps};
use crate::config::PageConfig;
use crate::services::dom;

/// Per-page state of the booking form.
///
/// Built once the blocked dates are known and kept alive by the picker
/// callback and the submit listener. Follows every set the store publishes.
pub struct BookingController {
    store: AvailabilityStore,
    blocked: RefCell<Rc<BlockedDates>>,
    daily_rate: f64,
    currency: CurrencyStyle,
    selection: Cell<RangeSelection>,
    start_input: HtmlInputElement,
    end_input: HtmlInputElement,
    days_count: Option<Element>,
    total_price: Option<Element>,
    date_error: Option<HtmlElement>,
    submit_btn: Option<Element>,
}

impl BookingController {
    /// Wire up the booking form, or return `None` when the page has none
    pub fn mount(
        document: &Document,
        config: &PageConfig,
        store: &AvailabilityStore,
        today: NaiveDate,
    ) -> anyhow::Result<Option<Rc<Self>>> {
        let Some(start_input) = dom::by_id::<HtmlInputElement>(document, "start_date") else {
            return Ok(None);
        };
        let end_input = dom::require_by_id::<HtmlInputElement>(document, "end_date")?;

        let controller = Rc::new(Self {
            store: store.clone(),
            blocked: RefCell::new(store.current()),
            daily_rate: config.daily_rate,
            currency: config.currency,
            selection: Cell::new(RangeSelection::Idle),
            start_input,
            end_input,
            days_count: dom::by_id(document, "days-count"),
            total_price: dom::by_id(document, "total-price"),
            date_error: dom::by_id(document, "dateError"),
            submit_btn: dom::by_id(document, "submitBtn"),
        });

        let initial = controller.prefilled_selection(today);
        controller.prepare_inputs(today);
        controller.mount_picker(document, today, initial)?;
        controller.bind_submit(document);
        controller.follow_store();
        controller.on_selection(initial);

        tracing::info!(
            "Booking form ready: rate {} with {} blocked dates",
            controller.currency.format(controller.daily_rate),
            controller.blocked.borrow().len()
        );
        Ok(Some(controller))
    }

    /// Selection carried over from values the server rendered into the inputs
    fn prefilled_selection(&self, today: NaiveDate) -> RangeSelection {
        let start = parse_iso_date(&self.start_input.value()).ok().filter(|d| *d >= today);
        let end = parse_iso_date(&self.end_input.value()).ok();
        match (start, end) {
            (Some(start), Some(end)) => RangeSelection::Idle.select_start(start).select_end(end),
            (Some(start), None) => RangeSelection::Idle.select_start(start),
            _ => RangeSelection::Idle,
        }
    }

    /// The pickers replace direct typing; the inputs only carry form values
    fn prepare_inputs(&self, today: NaiveDate) {
        let min = format_iso_date(today);
        for input in [&self.start_input, &self.end_input] {
            input.set_min(&min);
            input.set_read_only(true);
            dom::set_visible(input, false);
        }
    }

    fn mount_picker(self: &Rc<Self>, document: &Document, today: NaiveDate, initial: RangeSelection) -> anyhow::Result<()> {
        let host = document
            .create_element("div")
            .map_err(|e| anyhow!("could not create picker host: {:?}", e))?;
        host.set_class_name("range-picker-host");
        self.end_input
            .insert_adjacent_element("afterend", &host)
            .map_err(|e| anyhow!("could not place date pickers: {:?}", e))?;

        let on_change = {
            let controller = Rc::clone(self);
            Callback::from(move |selection: RangeSelection| controller.on_selection(selection))
        };
        yew::Renderer::<RangePicker>::with_root_and_props(
            host,
            RangePickerProps {
                store: self.store.clone(),
                today,
                initial,
                on_change,
            },
        )
        .render();
        Ok(())
    }

    fn bind_submit(self: &Rc<Self>, document: &Document) {
        let form = dom::by_id::<HtmlFormElement>(document, "rentalForm").or_else(|| self.start_input.form());
        let Some(form) = form else {
            tracing::warn!("No rental form found; submission is not gated");
            return;
        };

        let controller = Rc::clone(self);
        EventListener::new_with_options(&form, "submit", EventListenerOptions::enable_prevent_default(), move |event| {
            match controller.validate_for_submit() {
                Err(e) => {
                    tracing::warn!("Blocked rental submission: {}", e);
                    event.prevent_default();
                    controller.render_error(Some(&e));
                }
                Ok(_) if event.default_prevented() => {}
                Ok(_) => {
                    if let Some(button) = &controller.submit_btn {
                        dom::set_loading(button, true);
                    }
                }
            }
        })
        .forget();
    }

    fn follow_store(self: &Rc<Self>) {
        let controller = Rc::downgrade(self);
        self.store.subscribe(move |blocked| {
            if let Some(controller) = controller.upgrade() {
                controller.on_blocked_dates(Rc::clone(blocked));
            }
        });
    }

    /// Re-check the current selection against a freshly published set
    pub fn on_blocked_dates(&self, blocked: Rc<BlockedDates>) {
        *self.blocked.borrow_mut() = blocked;
        self.on_selection(self.selection.get());
    }

    /// Apply a picker transition to the form, the quote and the error banner
    pub fn on_selection(&self, selection: RangeSelection) {
        self.selection.set(selection);

        let start = selection.start().map(format_iso_date).unwrap_or_default();
        let end = selection.end().map(format_iso_date).unwrap_or_default();
        self.start_input.set_value(&start);
        self.end_input.set_value(&end);
        if let Some(min) = selection.end_min_bound() {
            self.end_input.set_min(&format_iso_date(min));
        }

        self.refresh_quote(selection);
        if selection.is_complete() {
            let error = selection.validate(&self.blocked.borrow()).err();
            self.render_error(error.as_ref());
        } else {
            self.render_error(None);
        }
    }

    fn refresh_quote(&self, selection: RangeSelection) {
        let quote = match (selection.start(), selection.end()) {
            (Some(start), Some(end)) => RentalQuote::new(start, end, self.daily_rate),
            _ => RentalQuote { days: 0, total: 0.0 },
        };
        if let Some(days_count) = &self.days_count {
            days_count.set_text_content(Some(&quote.days_label()));
        }
        if let Some(total_price) = &self.total_price {
            total_price.set_text_content(Some(&self.currency.format(quote.total)));
        }
    }

    /// Re-check the dates actually in the form, which is what gets posted
    pub fn validate_for_submit(&self) -> Result<DateRange, DateRangeError> {
        let start = parse_iso_date(&self.start_input.value());
        let end = parse_iso_date(&self.end_input.value());
        match (start, end) {
            (Ok(start), Ok(end)) => validate_dates(start, end, &self.blocked.borrow()),
            _ => Err(DateRangeError::MissingDates),
        }
    }

    fn render_error(&self, error: Option<&DateRangeError>) {
        if let Some(banner) = &self.date_error {
            match error {
                Some(e) => {
                    banner.set_text_content(Some(&e.to_string()));
                    dom::set_visible(banner, true);
                }
                None => dom::set_visible(banner, false),
            }
        }
        if let Some(button) = &self.submit_btn {
            dom::set_disabled(button, error.is_some());
        }
    }
}
