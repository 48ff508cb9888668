//! Live viewport queries against the browser window.

/// Fallback width reported when no browser window is reachable.
pub const FALLBACK_VIEWPORT_WIDTH: i32 = 1024;
/// Fallback height reported when no browser window is reachable.
pub const FALLBACK_VIEWPORT_HEIGHT: i32 = 768;

/// Reads `window.innerWidth` / `window.innerHeight` at call time.
///
/// Values are never cached; callers query again for every interaction. Native targets get the
/// fallback dimensions.
pub fn viewport_metrics() -> (i32, i32) {
    #[cfg(target_arch = "wasm32")]
    {
        if let Some(window) = web_sys::window() {
            return (
                dimension(window.inner_width(), FALLBACK_VIEWPORT_WIDTH),
                dimension(window.inner_height(), FALLBACK_VIEWPORT_HEIGHT),
            );
        }
    }

    (FALLBACK_VIEWPORT_WIDTH, FALLBACK_VIEWPORT_HEIGHT)
}

#[cfg(target_arch = "wasm32")]
fn dimension(
    value: Result<wasm_bindgen::JsValue, wasm_bindgen::JsValue>,
    fallback: i32,
) -> i32 {
    value
        .ok()
        .and_then(|value| value.as_f64())
        .map(|value| value as i32)
        .unwrap_or(fallback)
}
