use std::rc::Rc;

use chrono::NaiveDate;
use shared::{render_month, BlockedDates, CalendarCell, MonthCursor, SelectionState};
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct MultiDatePickerProps {
    pub cursor: MonthCursor,
    pub blocked: Rc<BlockedDates>,
    pub selection: SelectionState,
    pub today: NaiveDate,
    pub on_toggle: Callback<NaiveDate>,
    pub on_navigate: Callback<MonthCursor>,
}

/// Inline month grid where the owner ticks any number of future days.
///
/// Blocked days stay selectable so they can be unblocked.
#[function_component(MultiDatePicker)]
pub fn multi_date_picker(props: &MultiDatePickerProps) -> Html {
    let grid = render_month(props.cursor, &props.blocked, props.today);

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
        <div id="datePicker" class="multi-date-picker">
            <div class="calendar-header">
                <button type="button" class="nav-button" onclick={on_previous}>{"‹"}</button>
                <span class="month-year">{props.cursor.title()}</span>
                <button type="button" class="nav-button" onclick={on_next}>{"›"}</button>
            </div>
            <div class="calendar-days">
                {for grid.cells.iter().map(|cell| match *cell {
                    CalendarCell::Blank => html! { <span class="calendar-day empty"></span> },
                    CalendarCell::Day { date, .. } => {
                        let is_past = date < props.today;
                        let on_toggle = props.on_toggle.clone();
                        html! {
                            <button
                                type="button"
                                class={classes!(
                                    "calendar-day",
                                    props.blocked.contains(date).then_some("blocked"),
                                    props.selection.contains(date).then_some("selected"),
                                    is_past.then_some("past"),
                                )}
                                data-date={shared::format_iso_date(date)}
                                disabled={is_past}
                                onclick={Callback::from(move |_: MouseEvent| on_toggle.emit(date))}
                            >
                                {date.format("%-d").to_string()}
                            </button>
                        }
                    }
                })}
            </div>
        </div>
    }
}
