use std::rc::Rc;

use chrono::NaiveDate;
use shared::{format_date_for_display, is_selectable, render_month, BlockedDates, CalendarCell, MonthCursor};
use wasm_bindgen::JsCast;
use web_sys::{window, Element};
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct DatePickerProps {
    /// Currently chosen date, if any
    pub selected: Option<NaiveDate>,
    /// Callback when a selectable date is clicked
    pub on_date_change: Callback<NaiveDate>,
    pub today: NaiveDate,
    pub blocked: Rc<BlockedDates>,
    /// Earliest selectable date in addition to `today`
    #[prop_or_default]
    pub min: Option<NaiveDate>,
    #[prop_or_default]
    pub disabled: bool,
    /// Rendered above the button when set
    #[prop_or_default]
    pub label: Option<AttrValue>,
    #[prop_or(AttrValue::Static("Select a date"))]
    pub placeholder: AttrValue,
}

const WEEKDAYS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

/// Dropdown picker for a single day; blocked, past and too-early days are disabled
#[function_component(DatePicker)]
pub fn date_picker(props: &DatePickerProps) -> Html {
    let show_calendar = use_state(|| false);
    let calendar_ref = use_node_ref();

    let display_text = match props.selected {
        Some(date) => format_date_for_display(date),
        None => props.placeholder.to_string(),
    };

    // Open on the selected month, else the first month the picker allows
    let cursor = {
        let initial = props.selected.or(props.min).unwrap_or(props.today);
        use_state(move || MonthCursor::containing(initial))
    };

    // Follow the lower bound when it moves past the visible month
    {
        let cursor = cursor.clone();
        use_effect_with(props.min, move |min| {
            if let Some(min) = *min {
                let min_month = MonthCursor::containing(min);
                if *cursor < min_month {
                    cursor.set(min_month);
                }
            }
        });
    }

    let toggle_calendar = {
        let show_calendar = show_calendar.clone();
        Callback::from(move |_: MouseEvent| {
            show_calendar.set(!*show_calendar);
        })
    };

    let on_date_select = {
        let on_date_change = props.on_date_change.clone();
        let show_calendar = show_calendar.clone();
        Callback::from(move |date: NaiveDate| {
            on_date_change.emit(date);
            show_calendar.set(false);
        })
    };

    // A click anywhere outside the dropdown closes it
    {
        let show_calendar = show_calendar.clone();
        let calendar_ref = calendar_ref.clone();
        use_effect_with(*show_calendar, move |is_open| {
            let listener = match (*is_open, window()) {
                (true, Some(window)) => Some(gloo::events::EventListener::new(&window, "click", move |e| {
                    let Some(element) = e.target().and_then(|t| t.dyn_into::<Element>().ok()) else {
                        return;
                    };
                    if let Some(calendar_element) = calendar_ref.cast::<Element>() {
                        if !calendar_element.contains(Some(&element)) {
                            show_calendar.set(false);
                        }
                    }
                })),
                _ => None,
            };
            move || drop(listener)
        });
    }

    let prev_month = {
        let cursor = cursor.clone();
        Callback::from(move |_: MouseEvent| cursor.set(cursor.previous()))
    };

    let next_month = {
        let cursor = cursor.clone();
        Callback::from(move |_: MouseEvent| cursor.set(cursor.next()))
    };

    let grid = render_month(*cursor, &props.blocked, props.today);

    html! {
        <div class="date-picker" ref={calendar_ref.clone()}>
            {if let Some(label) = &props.label {
                html! { <label class="date-picker-label">{label.clone()}</label> }
            } else { html! {} }}

            <div class="date-picker-input">
                <button
                    type="button"
                    class="date-display-button"
                    onclick={toggle_calendar}
                    disabled={props.disabled}
                >
                    <span class="date-text">{display_text}</span>
                    <span class="calendar-icon">{"📅"}</span>
                </button>

                {if *show_calendar && !props.disabled {
                    html! {
                        <div class="calendar-dropdown">
                            <div class="calendar-header">
                                <button type="button" class="nav-button" onclick={prev_month}>{"‹"}</button>
                                <span class="month-year">{cursor.title()}</span>
                                <button type="button" class="nav-button" onclick={next_month}>{"›"}</button>
                            </div>

                            <div class="calendar-grid">
                                <div class="weekday-header">
                                    {for WEEKDAYS.iter().map(|day| html! { <span>{*day}</span> })}
                                </div>

                                <div class="calendar-days">
                                    {for grid.cells.iter().map(|cell| match *cell {
                                        CalendarCell::Blank => html! { <span class="calendar-day empty"></span> },
                                        CalendarCell::Day { date, status } => {
                                            let selectable = is_selectable(date, props.today, &props.blocked, props.min);
                                            let is_selected = props.selected == Some(date);
                                            let on_date_select = on_date_select.clone();

                                            html! {
                                                <button
                                                    type="button"
                                                    class={classes!(
                                                        "calendar-day",
                                                        status.css_class(),
                                                        selectable.then_some("valid"),
                                                        (!selectable).then_some("invalid"),
                                                        is_selected.then_some("selected"),
                                                    )}
                                                    data-date={shared::format_iso_date(date)}
                                                    disabled={!selectable}
                                                    onclick={Callback::from(move |_: MouseEvent| on_date_select.emit(date))}
                                                >
                                                    {date.format("%-d").to_string()}
                                                </button>
                                            }
                                        }
                                    })}
                                </div>
                            </div>
                        </div>
                    }
                } else { html! {} }}
            </div>
        </div>
    }
}
