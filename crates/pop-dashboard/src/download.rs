//! Report downloads
//!
//! Rendered report documents leave the app as plain-text files through a
//! Blob object URL and a synthetic anchor click. Timestamps come from the
//! browser clock.

use gloo_file::{Blob, ObjectUrl};
use wasm_bindgen::JsCast;

/// Saves `contents` as a downloadable file named `filename`.
pub fn save_text_file(filename: &str, contents: &str) {
    let blob = Blob::new(contents);
    let url = ObjectUrl::from(blob);

    let Some(document) = web_sys::window().and_then(|w| w.document()) else {
        return;
    };
    let Ok(element) = document.create_element("a") else {
        return;
    };
    let Ok(anchor) = element.dyn_into::<web_sys::HtmlAnchorElement>() else {
        return;
    };
    anchor.set_href(&url);
    anchor.set_download(filename);
    anchor.click();

    // The URL must outlive the click; the browser revokes it with the page.
    std::mem::forget(url);
}

/// `aaaa-mm-dd` stamp for report file names.
pub fn date_stamp() -> String {
    let iso = String::from(js_sys::Date::new_0().to_iso_string());
    iso.split('T').next().unwrap_or_default().to_string()
}

/// `dd/mm/aaaa às hh:mm` header line for generated reports.
pub fn generated_at_label() -> String {
    let now = js_sys::Date::new_0();
    format!(
        "{:02}/{:02}/{} às {:02}:{:02}",
        now.get_date(),
        now.get_month() + 1,
        now.get_full_year(),
        now.get_hours(),
        now.get_minutes()
    )
}

/// `dd/mm/aaaa` for today, the creation date sent with new productions.
pub fn today_br() -> String {
    let now = js_sys::Date::new_0();
    format!(
        "{:02}/{:02}/{}",
        now.get_date(),
        now.get_month() + 1,
        now.get_full_year()
    )
}
