use std::time::Duration;

/// Wall-clock time since the component started animating.
///
/// In the browser this reads `performance.now()`, the clock animation frame
/// timestamps are taken from; elsewhere it is an [`std::time::Instant`].
#[derive(Debug, Clone, Copy)]
pub struct FrameClock {
    #[cfg(target_arch = "wasm32")]
    origin_ms: f64,
    #[cfg(not(target_arch = "wasm32"))]
    origin: std::time::Instant,
}

impl FrameClock {
    #[cfg(target_arch = "wasm32")]
    pub fn start() -> Self {
        Self {
            origin_ms: now_ms(),
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn start() -> Self {
        Self {
            origin: std::time::Instant::now(),
        }
    }

    #[cfg(target_arch = "wasm32")]
    pub fn elapsed(&self) -> Duration {
        Duration::from_secs_f64(((now_ms() - self.origin_ms) / 1000.0).max(0.0))
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn elapsed(&self) -> Duration {
        self.origin.elapsed()
    }
}

#[cfg(target_arch = "wasm32")]
fn now_ms() -> f64 {
    web_sys::window()
        .and_then(|window| window.performance())
        .map_or(0.0, |performance| performance.now())
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    use super::*;

    #[test]
    fn test_elapsed_is_monotonic() {
        let clock = FrameClock::start();
        let first = clock.elapsed();
        std::thread::sleep(Duration::from_millis(5));
        let second = clock.elapsed();
        assert!(second >= first + Duration::from_millis(5));
    }
}
