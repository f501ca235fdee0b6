//! Frame and delay timing for the sampling loop and toast expiry.
//!
//! On the web the frame tick follows `requestAnimationFrame`, so the loop runs
//! at the display refresh rate. Native builds approximate a 60 Hz display.

/// Nominal frame period used where no display refresh signal exists.
pub const NATIVE_FRAME_MS: u64 = 16;

#[cfg(target_arch = "wasm32")]
pub async fn sleep_ms(ms: u64) {
    gloo_timers::future::TimeoutFuture::new(ms.min(u32::MAX as u64) as u32).await;
}

#[cfg(not(target_arch = "wasm32"))]
pub async fn sleep_ms(ms: u64) {
    tokio::time::sleep(std::time::Duration::from_millis(ms)).await;
}

/// Resolve on the next display refresh.
#[cfg(target_arch = "wasm32")]
pub async fn next_frame() {
    let Some(window) = web_sys::window() else {
        sleep_ms(NATIVE_FRAME_MS).await;
        return;
    };

    let promise = js_sys::Promise::new(&mut |resolve, _reject| {
        if window.request_animation_frame(&resolve).is_err() {
            let _ = resolve.call0(&wasm_bindgen::JsValue::UNDEFINED);
        }
    });
    let _ = wasm_bindgen_futures::JsFuture::from(promise).await;
}

/// Resolve after one nominal frame period.
#[cfg(not(target_arch = "wasm32"))]
pub async fn next_frame() {
    sleep_ms(NATIVE_FRAME_MS).await;
}
