use chrono::NaiveDate;
use shared::{format_date_for_display, render_month, AvailabilityStore, CalendarCell, MonthCursor};
use yew::prelude::*;

use crate::hooks::use_blocked_dates::use_blocked_dates;

#[derive(Properties, PartialEq)]
pub struct CalendarPreviewProps {
    pub cursor: MonthCursor,
    pub store: AvailabilityStore,
    pub today: NaiveDate,
    /// Called with the month to show when the renter pages through months
    pub on_navigate: Callback<MonthCursor>,
}

/// Read-only month view marking which days can still be booked
#[function_component(CalendarPreview)]
pub fn calendar_preview(props: &CalendarPreviewProps) -> Html {
    let blocked = use_blocked_dates(&props.store);
    let grid = render_month(props.cursor, &blocked, props.today);

    let on_previous = {
        let on_navigate = props.on_navigate.clone();
        let target = props.cursor.previous();
        Callback::from(move |_: MouseEvent| on_navigate.emit(target))
    };

    let on_next = {
        let on_navigate = props.on_navigate.clone();
        let target = props.cursor.next();
        Callback::from(move |_: MouseEvent| on_navigate.emit(target))
    };

    html! {
        <div class="calendar-preview">
            <div class="calendar-header">
                <button type="button" class="nav-button" title="Previous Month" onclick={on_previous}>{"‹"}</button>
                <span class="month-year">{props.cursor.title()}</span>
                <button type="button" class="nav-button" title="Next Month" onclick={on_next}>{"›"}</button>
            </div>

            <div class="calendar-grid">
                <div class="weekday-header">
                    {for ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"].iter().map(|day| html! { <span>{*day}</span> })}
                </div>
                <div class="calendar-days">
                    {for grid.cells.iter().map(|cell| {
                        let class = cell.css_class();
                        match cell {
                            CalendarCell::Blank => html! { <div {class}></div> },
                            CalendarCell::Day { date, .. } => html! {
                                <div {class} title={format_date_for_display(*date)}>
                                    {date.format("%-d").to_string()}
                                </div>
                            },
                        }
                    })}
                </div>
            </div>

            <div class="calendar-legend">
                <span class="legend-item available">{"Available"}</span>
                <span class="legend-item unavailable">{"Unavailable"}</span>
                <span class="legend-item today">{"Today"}</span>
            </div>
        </div>
    }
}
