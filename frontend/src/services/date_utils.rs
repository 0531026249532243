use chrono::NaiveDate;
use shared::MonthCursor;
use wasm_bindgen::JsValue;
use web_sys::UrlSearchParams;

/// Today's date in the browser's local time zone
pub fn today() -> NaiveDate {
    use js_sys::Date;
    let now = Date::new_0();
    let year = now.get_full_year() as i32;
    let month = now.get_month() + 1; // JavaScript months are 0-indexed
    let day = now.get_date();

    NaiveDate::from_ymd_opt(year, month, day).unwrap_or_default()
}

fn current_search_params() -> Option<UrlSearchParams> {
    let search = web_sys::window()?.location().search().ok()?;
    UrlSearchParams::new_with_str(&search).ok()
}

/// Month selected by the `month`/`year` query parameters of the current URL
pub fn month_from_url(today: NaiveDate) -> MonthCursor {
    let params = current_search_params();
    let month = params.as_ref().and_then(|p| p.get("month"));
    let year = params.as_ref().and_then(|p| p.get("year"));
    MonthCursor::from_query(month.as_deref(), year.as_deref(), today)
}

/// Write `month`/`year` into the query string, keeping other parameters,
/// and navigate there.
pub fn navigate_to_month(cursor: MonthCursor) -> Result<(), JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let params = match current_search_params() {
        Some(params) => params,
        None => UrlSearchParams::new()?,
    };
    params.set("month", &cursor.month().to_string());
    params.set("year", &cursor.year().to_string());

    let search: String = params.to_string().into();
    tracing::debug!("Navigating calendar to {}", cursor.title());
    window.location().set_search(&search)
}

pub fn reload_page() -> Result<(), JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    window.location().reload()
}
