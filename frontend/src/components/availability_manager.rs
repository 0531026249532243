use chrono::NaiveDate;
use shared::{
    format_date_for_display, format_iso_date, AvailabilityAction, ChangeOutcome, MonthCursor, SelectionState,
};
use wasm_bindgen_futures::spawn_local;
use web_sys::HtmlInputElement;
use yew::prelude::*;

use crate::components::multi_date_picker::MultiDatePicker;
use crate::hooks::use_blocked_dates::use_blocked_dates;
use crate::services::availability::ItemAvailability;

#[derive(Properties, PartialEq)]
pub struct AvailabilityManagerProps {
    pub item: ItemAvailability,
    pub today: NaiveDate,
}

/// Owner widget for blocking and unblocking an item's dates
#[function_component(AvailabilityManager)]
pub fn availability_manager(props: &AvailabilityManagerProps) -> Html {
    let blocked = use_blocked_dates(&props.item.store);
    let selection = use_state(SelectionState::new);
    let cursor = {
        let today = props.today;
        use_state(move || MonthCursor::containing(today))
    };
    let busy = use_state(|| false);
    let reason = use_state(String::new);

    // A click while busy is ignored
    let run_change = {
        let selection = selection.clone();
        let busy = busy.clone();
        let item = props.item.clone();

        Callback::from(move |(action, dates): (AvailabilityAction, SelectionState)| {
            if *busy {
                return;
            }
            busy.set(true);

            let selection = selection.clone();
            let busy = busy.clone();
            let item = item.clone();

            spawn_local(async move {
                let outcome = item.change(action, dates).await;
                if outcome == ChangeOutcome::Applied {
                    selection.set(SelectionState::new());
                }
                busy.set(false);
            });
        })
    };

    let on_toggle = {
        let selection = selection.clone();
        Callback::from(move |date: NaiveDate| {
            let mut next = (*selection).clone();
            next.toggle(date);
            selection.set(next);
        })
    };

    // Selection does not carry across months
    let on_navigate = {
        let cursor = cursor.clone();
        let selection = selection.clone();
        Callback::from(move |target: MonthCursor| {
            cursor.set(target);
            selection.set(SelectionState::new());
        })
    };

    let on_reason_input = {
        let reason = reason.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            reason.set(input.value());
        })
    };

    let on_block = {
        let run_change = run_change.clone();
        let selection = selection.clone();
        let reason = reason.clone();
        Callback::from(move |_: MouseEvent| {
            let action = AvailabilityAction::Block { reason: Some((*reason).clone()) };
            run_change.emit((action, (*selection).clone()));
        })
    };

    let on_unblock = {
        let run_change = run_change.clone();
        let selection = selection.clone();
        Callback::from(move |_: MouseEvent| {
            run_change.emit((AvailabilityAction::Unblock, (*selection).clone()));
        })
    };

    let upcoming: Vec<NaiveDate> = blocked.iter().filter(|date| *date >= props.today).collect();
    let button_label = |idle: &'static str| -> Html {
        if *busy {
            html! { <><span class="spinner-border spinner-border-sm" role="status"></span>{" Loading..."}</> }
        } else {
            html! { <>{idle}</> }
        }
    };

    html! {
        <div class="availability-manager">
            <MultiDatePicker
                cursor={*cursor}
                blocked={blocked.clone()}
                selection={(*selection).clone()}
                today={props.today}
                on_toggle={on_toggle}
                on_navigate={on_navigate}
            />

            <div class="availability-actions">
                <span class="selection-count">{format!("{} selected", selection.len())}</span>
                <input
                    id="blockReason"
                    type="text"
                    placeholder="Reason (optional)"
                    value={(*reason).clone()}
                    oninput={on_reason_input}
                />
                <button id="blockDateBtn" type="button" class="btn btn-danger" disabled={*busy} onclick={on_block}>
                    {button_label("Block Selected Dates")}
                </button>
                <button id="unblockDateBtn" type="button" class="btn btn-success" disabled={*busy} onclick={on_unblock}>
                    {button_label("Unblock Selected Dates")}
                </button>
            </div>

            <div class="blocked-dates-list">
                <h4>{"Blocked dates"}</h4>
                {if upcoming.is_empty() {
                    html! { <p class="text-muted">{"No upcoming blocked dates."}</p> }
                } else {
                    html! {
                        <ul>
                            {for upcoming.iter().map(|date| {
                                let date = *date;
                                let run_change = run_change.clone();
                                let onclick = Callback::from(move |_: MouseEvent| {
                                    run_change.emit((AvailabilityAction::Unblock, SelectionState::single(date)));
                                });
                                html! {
                                    <li key={format_iso_date(date)}>
                                        <span>{format_date_for_display(date)}</span>
                                        <button
                                            type="button"
                                            class="unblock-btn btn btn-sm btn-outline-success"
                                            data-date={format_iso_date(date)}
                                            disabled={*busy}
                                            {onclick}
                                        >
                                            {"Unblock"}
                                        </button>
                                    </li>
                                }
                            })}
                        </ul>
                    }
                }}
            </div>
        </div>
    }
}
