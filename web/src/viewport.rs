use dioxus::prelude::*;
use gloo_events::EventListener;
use hero_core::ViewportMetrics;
use std::rc::Rc;
use web_sys::wasm_bindgen::JsValue;

/// Size used when there is no browser window to ask
const FALLBACK: ViewportMetrics = ViewportMetrics::new(1440, 900);

/// Window events after which the size is read again
const VIEWPORT_EVENTS: [&str; 2] = ["resize", "orientationchange"];

/// Current window size, updated on every resize or orientation change.
pub fn use_viewport_size() -> Signal<ViewportMetrics> {
    let size = use_signal(current_size);
    use_hook(move || {
        let listeners: Vec<EventListener> = web_sys::window()
            .map(|window| {
                VIEWPORT_EVENTS
                    .iter()
                    .map(|event| {
                        let mut size = size;
                        EventListener::new(&window, *event, move |_| {
                            size.set(current_size());
                        })
                    })
                    .collect()
            })
            .unwrap_or_default();
        Rc::new(listeners)
    });
    size
}

fn current_size() -> ViewportMetrics {
    let Some(window) = web_sys::window() else {
        return FALLBACK;
    };
    ViewportMetrics::new(
        dimension(window.inner_width(), FALLBACK.width),
        dimension(window.inner_height(), FALLBACK.height),
    )
}

fn dimension(value: Result<JsValue, JsValue>, fallback: u32) -> u32 {
    value
        .ok()
        .and_then(|v| v.as_f64())
        .map_or(fallback, |v| v.max(0.0) as u32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tracks_resize_and_orientation() {
        assert_eq!(VIEWPORT_EVENTS, ["resize", "orientationchange"]);
    }
}
