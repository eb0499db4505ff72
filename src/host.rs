use std::time::Duration;

use crate::{
    core::{Rgba, Viewport},
    error::SplashResult,
};

/// Name of the host style variable carrying the brand color.
pub const BRAND_RED_VAR: &str = "--mo-red";

/// Literal fallback when the host does not define the style variable.
pub const BRAND_RED_FALLBACK: &str = "#ff3b3b";

/// The host page environment the splash runs inside. The document-level
/// preloading flag is explicit injected state rather than an ambient global,
/// and removal scheduling is delegated so teardown stays testable.
pub trait Host {
    fn viewport(&self) -> Viewport;

    /// Read a page-level style variable, if defined.
    fn style_var(&self, name: &str) -> Option<String>;

    /// Toggle the "preloading active" flag host styling keys off (for
    /// example to suppress scrolling).
    fn set_preloading(&mut self, on: bool);

    /// Mark the container as finished so host styling can fade it out.
    fn mark_done(&mut self);

    fn container_present(&self) -> bool;

    /// Remove the container after `delay`, leaving time for the fade.
    fn schedule_removal(&mut self, delay: Duration);
}

/// Resolve the brand red from the host, falling back to the literal default
/// when the variable is unset or unparsable.
pub fn brand_red(host: &impl Host) -> Rgba {
    let fallback = || {
        // The fallback literal is a valid hex color.
        Rgba::from_hex(BRAND_RED_FALLBACK).unwrap_or(Rgba::opaque(0xff, 0x3b, 0x3b))
    };
    match host.style_var(BRAND_RED_VAR) {
        Some(value) => Rgba::from_hex(&value).unwrap_or_else(|_| fallback()),
        None => fallback(),
    }
}

/// In-memory [`Host`] recording every state transition. The reference
/// implementation for tests and headless embedders.
#[derive(Clone, Debug)]
pub struct MemoryHost {
    pub viewport: Viewport,
    pub style_vars: Vec<(String, String)>,
    pub preloading: bool,
    pub done_marked: bool,
    pub container_present: bool,
    pub removal_delays: Vec<Duration>,
}

impl MemoryHost {
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            style_vars: Vec::new(),
            preloading: false,
            done_marked: false,
            container_present: true,
            removal_delays: Vec::new(),
        }
    }

    pub fn with_style_var(mut self, name: &str, value: &str) -> Self {
        self.style_vars.push((name.to_string(), value.to_string()));
        self
    }
}

impl Host for MemoryHost {
    fn viewport(&self) -> Viewport {
        self.viewport
    }

    fn style_var(&self, name: &str) -> Option<String> {
        self.style_vars
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.clone())
    }

    fn set_preloading(&mut self, on: bool) {
        self.preloading = on;
    }

    fn mark_done(&mut self) {
        self.done_marked = true;
    }

    fn container_present(&self) -> bool {
        self.container_present
    }

    fn schedule_removal(&mut self, delay: Duration) {
        self.removal_delays.push(delay);
        self.container_present = false;
    }
}

/// Hide and remove the splash container and restore normal page state.
/// Safe to invoke repeatedly: once the container is gone this is a no-op.
pub fn teardown(host: &mut impl Host, fade: Duration) -> SplashResult<bool> {
    if !host.container_present() {
        return Ok(false);
    }
    host.mark_done();
    host.set_preloading(false);
    host.schedule_removal(fade);
    tracing::debug!(fade_ms = fade.as_millis() as u64, "splash torn down");
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn host() -> MemoryHost {
        MemoryHost::new(Viewport::new(1280.0, 720.0).unwrap())
    }

    #[test]
    fn brand_red_prefers_the_style_var() {
        let h = host().with_style_var(BRAND_RED_VAR, "#aa0011");
        let c = brand_red(&h);
        assert_eq!((c.r, c.g, c.b), (0xaa, 0x00, 0x11));
    }

    #[test]
    fn brand_red_falls_back_when_missing_or_invalid() {
        let c = brand_red(&host());
        assert_eq!((c.r, c.g, c.b), (0xff, 0x3b, 0x3b));

        let h = host().with_style_var(BRAND_RED_VAR, "garbage");
        let c = brand_red(&h);
        assert_eq!((c.r, c.g, c.b), (0xff, 0x3b, 0x3b));
    }

    #[test]
    fn brand_red_falls_back_on_non_ascii_style_var() {
        let h = host().with_style_var(BRAND_RED_VAR, "€abc");
        let c = brand_red(&h);
        assert_eq!((c.r, c.g, c.b), (0xff, 0x3b, 0x3b));
    }

    #[test]
    fn teardown_clears_state_and_removes_container() {
        let mut h = host();
        h.preloading = true;
        let ran = teardown(&mut h, Duration::from_millis(600)).unwrap();
        assert!(ran);
        assert!(h.done_marked);
        assert!(!h.preloading);
        assert!(!h.container_present);
        assert_eq!(h.removal_delays, [Duration::from_millis(600)]);
    }

    #[test]
    fn teardown_is_idempotent() {
        let mut h = host();
        assert!(teardown(&mut h, Duration::from_millis(600)).unwrap());
        assert!(!teardown(&mut h, Duration::from_millis(600)).unwrap());
        assert_eq!(h.removal_delays.len(), 1);
    }
}
