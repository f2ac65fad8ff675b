//! Local wall-clock readings. The browser has no timezone database, so on WASM
//! these come from `js_sys::Date`.

#[cfg(target_arch = "wasm32")]
pub fn current_time() -> String {
    let date = js_sys::Date::new_0();
    let h = date.get_hours();
    let m = date.get_minutes();
    let s = date.get_seconds();
    format!("{h:02}:{m:02}:{s:02}")
}

#[cfg(not(target_arch = "wasm32"))]
pub fn current_time() -> String {
    chrono::Local::now().format("%H:%M:%S").to_string()
}

/// Current calendar year, for the footer.
#[cfg(target_arch = "wasm32")]
pub fn current_year() -> i32 {
    js_sys::Date::new_0().get_full_year() as i32
}

#[cfg(not(target_arch = "wasm32"))]
pub fn current_year() -> i32 {
    use chrono::Datelike;
    chrono::Local::now().year()
}

/// Today's date in local time.
#[cfg(target_arch = "wasm32")]
pub fn today() -> chrono::NaiveDate {
    let date = js_sys::Date::new_0();
    chrono::NaiveDate::from_ymd_opt(
        date.get_full_year() as i32,
        date.get_month() + 1,
        date.get_date(),
    )
    .unwrap_or_default()
}

#[cfg(not(target_arch = "wasm32"))]
pub fn today() -> chrono::NaiveDate {
    chrono::Local::now().date_naive()
}
