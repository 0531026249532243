use chrono::NaiveDate;
use shared::{AvailabilityStore, RangeSelection};
use yew::prelude::*;

use crate::components::date_picker::DatePicker;
use crate::hooks::use_blocked_dates::use_blocked_dates;

#[derive(Properties, PartialEq)]
pub struct RangePickerProps {
    pub store: AvailabilityStore,
    pub today: NaiveDate,
    /// Selection to start from, e.g. dates the server echoed back
    #[prop_or_default]
    pub initial: RangeSelection,
    /// Fired after every transition with the new selection
    pub on_change: Callback<RangeSelection>,
}

/// Start and end pickers driving a single [`RangeSelection`]
#[function_component(RangePicker)]
pub fn range_picker(props: &RangePickerProps) -> Html {
    let blocked = use_blocked_dates(&props.store);
    let selection = {
        let initial = props.initial;
        use_state(move || initial)
    };

    let on_start = {
        let selection = selection.clone();
        let on_change = props.on_change.clone();
        Callback::from(move |date: NaiveDate| {
            let next = selection.select_start(date);
            selection.set(next);
            on_change.emit(next);
        })
    };

    let on_end = {
        let selection = selection.clone();
        let on_change = props.on_change.clone();
        Callback::from(move |date: NaiveDate| {
            let next = selection.select_end(date);
            selection.set(next);
            on_change.emit(next);
        })
    };

    html! {
        <div class="range-picker">
            <DatePicker
                label={AttrValue::Static("Start date")}
                placeholder={AttrValue::Static("Choose start")}
                selected={selection.start()}
                on_date_change={on_start}
                today={props.today}
                blocked={blocked.clone()}
            />
            <DatePicker
                label={AttrValue::Static("End date")}
                placeholder={AttrValue::Static("Choose end")}
                selected={selection.end()}
                on_date_change={on_end}
                today={props.today}
                blocked={blocked.clone()}
                min={selection.end_min_bound()}
                disabled={selection.start().is_none()}
            />
        </div>
    }
}
