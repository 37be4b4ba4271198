//! Platform glue: task spawning, timers, viewport queries and window listeners.
//!
//! Everything browser-specific sits behind `cfg(target_arch = "wasm32")`; the
//! native versions are either real (timers) or sensible fallbacks.

use std::future::Future;
use std::time::Duration;

/// Width assumed when no window can be queried (desktop webview before mount).
pub const FALLBACK_VIEWPORT_WIDTH: f64 = 1280.0;

/// Spawn a detached local future. On wasm this also works from raw window
/// listeners, which run outside any Dioxus scope.
#[cfg(target_arch = "wasm32")]
pub fn spawn_future(fut: impl Future<Output = ()> + 'static) {
    wasm_bindgen_futures::spawn_local(fut);
}

/// Spawn a UI-bound future on the Dioxus scheduler.
#[cfg(not(target_arch = "wasm32"))]
pub fn spawn_future(fut: impl Future<Output = ()> + 'static) {
    dioxus::prelude::spawn(fut);
}

#[cfg(target_arch = "wasm32")]
pub async fn sleep(duration: Duration) {
    let ms = duration.as_millis().min(u32::MAX as u128) as u32;
    gloo_timers::future::TimeoutFuture::new(ms).await;
}

#[cfg(not(target_arch = "wasm32"))]
pub async fn sleep(duration: Duration) {
    tokio::time::sleep(duration).await;
}

#[cfg(target_arch = "wasm32")]
pub fn viewport_width() -> f64 {
    web_sys::window()
        .and_then(|w| w.inner_width().ok())
        .and_then(|v| v.as_f64())
        .unwrap_or(FALLBACK_VIEWPORT_WIDTH)
}

#[cfg(not(target_arch = "wasm32"))]
pub fn viewport_width() -> f64 {
    FALLBACK_VIEWPORT_WIDTH
}

/// Register a window-level listener for the lifetime of the page.
#[cfg(target_arch = "wasm32")]
pub fn on_window_event(event: &str, mut handler: impl FnMut() + 'static) {
    use wasm_bindgen::{closure::Closure, JsCast};

    let Some(window) = web_sys::window() else {
        return;
    };
    let closure = Closure::<dyn FnMut()>::new(move || handler());
    if window
        .add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())
        .is_ok()
    {
        // The page owns the listener from here on.
        closure.forget();
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub fn on_window_event(_event: &str, _handler: impl FnMut() + 'static) {}

#[cfg(target_arch = "wasm32")]
pub fn scroll_y() -> f64 {
    web_sys::window()
        .and_then(|w| w.scroll_y().ok())
        .unwrap_or(0.0)
}

#[cfg(not(target_arch = "wasm32"))]
pub fn scroll_y() -> f64 {
    0.0
}

/// Offset-top and height of the element with `id`, if it is mounted.
#[cfg(target_arch = "wasm32")]
pub fn element_bounds(id: &str) -> Option<(f64, f64)> {
    use wasm_bindgen::JsCast;

    let element = web_sys::window()?
        .document()?
        .get_element_by_id(id)?
        .dyn_into::<web_sys::HtmlElement>()
        .ok()?;
    Some((element.offset_top() as f64, element.client_height() as f64))
}

#[cfg(not(target_arch = "wasm32"))]
pub fn element_bounds(_id: &str) -> Option<(f64, f64)> {
    None
}

#[cfg(target_arch = "wasm32")]
pub fn element_exists(selector: &str) -> bool {
    web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.query_selector(selector).ok().flatten())
        .is_some()
}

/// Mirrors the scroll-lock count onto `<body>` so the page itself stops scrolling.
#[cfg(target_arch = "wasm32")]
pub fn set_body_scroll_locked(locked: bool) {
    let Some(body) = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.body())
    else {
        return;
    };
    let value = if locked { "hidden" } else { "auto" };
    body.style().set_property("overflow", value).ok();
}

#[cfg(not(target_arch = "wasm32"))]
pub fn set_body_scroll_locked(_locked: bool) {}

/// Wall-clock time used for export filenames and footers.
pub fn wall_clock() -> time::OffsetDateTime {
    time::OffsetDateTime::now_utc()
}
