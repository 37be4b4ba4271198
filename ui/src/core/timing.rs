//! Monotonic timestamps for notification lifetimes and debounce windows.

use std::cell::Cell;
use std::time::Duration;

/// Milliseconds since an arbitrary per-process origin.
#[derive(Debug, Default, Clone, Copy, PartialEq, PartialOrd)]
pub struct InstantStamp(pub f64);

impl InstantStamp {
    pub fn zero() -> Self {
        Self(0.0)
    }

    pub fn from_millis(ms: f64) -> Self {
        Self(ms)
    }

    pub fn as_millis(self) -> f64 {
        self.0
    }

    /// Saturates at zero when `earlier` is actually later.
    pub fn since(self, earlier: InstantStamp) -> Duration {
        Duration::from_secs_f64(((self.0 - earlier.0) / 1000.0).max(0.0))
    }

    pub fn after(self, delta: Duration) -> Self {
        Self(self.0 + delta.as_secs_f64() * 1000.0)
    }
}

/// Trailing-edge debounce: each `arm` supersedes every earlier ticket, so only
/// the last event of a burst acts once its delay has elapsed.
#[derive(Debug, Default)]
pub struct Debounce {
    generation: Cell<u64>,
}

impl Debounce {
    pub fn arm(&self) -> u64 {
        let ticket = self.generation.get() + 1;
        self.generation.set(ticket);
        ticket
    }

    pub fn is_current(&self, ticket: u64) -> bool {
        self.generation.get() == ticket
    }
}

#[cfg(target_arch = "wasm32")]
pub fn now() -> InstantStamp {
    let ms = web_sys::window()
        .and_then(|w| w.performance())
        .map(|p| p.now())
        .unwrap_or_else(js_sys::Date::now);
    InstantStamp(ms)
}

#[cfg(not(target_arch = "wasm32"))]
pub fn now() -> InstantStamp {
    use once_cell::sync::Lazy;
    use std::time::Instant;

    static ORIGIN: Lazy<Instant> = Lazy::new(Instant::now);
    InstantStamp(ORIGIN.elapsed().as_secs_f64() * 1000.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn since_saturates() {
        let a = InstantStamp::from_millis(500.0);
        let b = InstantStamp::from_millis(200.0);
        assert_eq!(a.since(b), Duration::from_millis(300));
        assert_eq!(b.since(a), Duration::ZERO);
    }

    #[test]
    fn only_the_last_armed_ticket_fires() {
        let debounce = Debounce::default();
        let first = debounce.arm();
        let second = debounce.arm();
        assert!(!debounce.is_current(first));
        assert!(debounce.is_current(second));
        let third = debounce.arm();
        assert!(!debounce.is_current(second));
        assert!(debounce.is_current(third));
    }

    #[test]
    fn after_advances_by_duration() {
        let t = InstantStamp::zero().after(Duration::from_secs(5));
        assert_eq!(t.as_millis(), 5000.0);
    }
}
