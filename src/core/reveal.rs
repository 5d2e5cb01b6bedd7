//! Scroll-reveal bookkeeping.
//!
//! Sections fade in the first time they enter the viewport and never hide
//! again; their cards follow in a stagger. The tracker records reveal times
//! and answers per-frame progress queries. Rendering decides how progress
//! maps to opacity and rise, this module only keeps the clock.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use egui::Rect;

/// A section counts as seen once this share of it is inside the viewport
pub const REVEAL_RATIO: f32 = 0.1;

/// The viewport's bottom edge is pulled up by this much for the visibility
/// test, so reveals start a little after a section peeks in
pub const BOTTOM_MARGIN: f32 = 50.0;

/// Section entrance: fade duration and rise distance
pub const SECTION_FADE: Duration = Duration::from_millis(800);
pub const SECTION_RISE: f32 = 30.0;

/// Card entrance within a revealed section
pub const CARD_FADE: Duration = Duration::from_millis(600);
pub const CARD_RISE: f32 = 20.0;
pub const CARD_STAGGER: Duration = Duration::from_millis(100);

/// Hero entrance on first frame
pub const HERO_FADE: Duration = Duration::from_millis(1000);
pub const HERO_RISE: f32 = 30.0;

/// Reveal clocks for everything that animates in on first sight.
#[derive(Debug, Default)]
pub struct RevealTracker {
    revealed: HashMap<String, Instant>,
}

impl RevealTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Check `rect` against the (margin-shrunk) viewport and start the
    /// reveal clock for `id` on first sufficient visibility. Revealed ids
    /// stay revealed no matter where they scroll afterwards.
    pub fn observe(&mut self, id: &str, rect: Rect, viewport: Rect, now: Instant) {
        if self.revealed.contains_key(id) {
            return;
        }
        if visible_ratio(rect, observation_viewport(viewport)) >= REVEAL_RATIO {
            self.revealed.insert(id.to_owned(), now);
        }
    }

    pub fn is_revealed(&self, id: &str) -> bool {
        self.revealed.contains_key(id)
    }

    /// Forget everything. For document replacement.
    pub fn reset(&mut self) {
        self.revealed.clear();
    }

    /// Section entrance progress in 0..=1. Zero until revealed.
    pub fn section_progress(&self, id: &str, now: Instant) -> f32 {
        self.progress_since(id, Duration::ZERO, SECTION_FADE, now)
    }

    /// Card entrance progress in 0..=1. Cards within a section start
    /// CARD_STAGGER apart, in layout order.
    pub fn card_progress(&self, section_id: &str, card_index: usize, now: Instant) -> f32 {
        self.progress_since(section_id, CARD_STAGGER * card_index as u32, CARD_FADE, now)
    }

    /// Hero entrance progress in 0..=1.
    pub fn hero_progress(&self, id: &str, now: Instant) -> f32 {
        self.progress_since(id, Duration::ZERO, HERO_FADE, now)
    }

    /// True while any reveal animation still has frames to paint. The
    /// longest possible tail after a reveal is the card stagger total, so
    /// callers cap the count they pass.
    pub fn any_animating(&self, now: Instant, max_cards: usize) -> bool {
        let tail = SECTION_FADE.max(CARD_FADE + CARD_STAGGER * max_cards as u32).max(HERO_FADE);
        self.revealed.values().any(|start| now < *start + tail)
    }

    fn progress_since(&self, id: &str, delay: Duration, fade: Duration, now: Instant) -> f32 {
        let Some(start) = self.revealed.get(id) else {
            return 0.0;
        };
        let elapsed = now.saturating_duration_since(*start + delay);
        (elapsed.as_secs_f32() / fade.as_secs_f32()).clamp(0.0, 1.0)
    }
}

/// Viewport used for reveal checks: the real one with its bottom pulled up.
fn observation_viewport(viewport: Rect) -> Rect {
    Rect::from_min_max(
        viewport.min,
        egui::pos2(viewport.max.x, viewport.max.y - BOTTOM_MARGIN),
    )
}

/// Vertical share of `rect` inside `viewport`. Degenerate rects count as
/// fully visible.
fn visible_ratio(rect: Rect, viewport: Rect) -> f32 {
    if rect.height() <= 0.0 {
        return 1.0;
    }
    let top = rect.top().max(viewport.top());
    let bottom = rect.bottom().min(viewport.bottom());
    ((bottom - top).max(0.0)) / rect.height()
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::pos2;

    fn rect(top: f32, bottom: f32) -> Rect {
        Rect::from_min_max(pos2(0.0, top), pos2(1000.0, bottom))
    }

    fn viewport() -> Rect {
        rect(0.0, 800.0)
    }

    fn at(t0: Instant, ms: u64) -> Instant {
        t0 + Duration::from_millis(ms)
    }

    #[test]
    fn test_visible_ratio() {
        let vp = rect(0.0, 800.0);
        assert_eq!(visible_ratio(rect(0.0, 400.0), vp), 1.0);
        assert_eq!(visible_ratio(rect(600.0, 1000.0), vp), 0.5);
        assert_eq!(visible_ratio(rect(900.0, 1300.0), vp), 0.0);
        assert_eq!(visible_ratio(rect(-200.0, 200.0), vp), 0.5);
    }

    #[test]
    fn test_reveal_waits_for_ratio() {
        let t0 = Instant::now();
        let mut tracker = RevealTracker::new();

        // 5% visible against the margin-shrunk viewport: not yet
        tracker.observe("a", rect(730.0, 1130.0), viewport(), t0);
        assert!(!tracker.is_revealed("a"));

        // 10% visible (40 of 400 above the 750 cutoff)
        tracker.observe("a", rect(710.0, 1110.0), viewport(), t0);
        assert!(tracker.is_revealed("a"));
    }

    #[test]
    fn test_bottom_margin_shrinks_viewport() {
        let t0 = Instant::now();
        let mut tracker = RevealTracker::new();

        // 60 of 600 px visible below 800 would be exactly 10%, but the
        // cutoff sits at 750, leaving only 10px
        tracker.observe("a", rect(740.0, 1340.0), viewport(), t0);
        assert!(!tracker.is_revealed("a"));

        tracker.observe("a", rect(690.0, 1290.0), viewport(), t0);
        assert!(tracker.is_revealed("a"));
    }

    #[test]
    fn test_reveal_is_permanent() {
        let t0 = Instant::now();
        let mut tracker = RevealTracker::new();
        tracker.observe("a", rect(0.0, 400.0), viewport(), t0);

        // Scrolled far away later: still revealed, clock unchanged
        tracker.observe("a", rect(-5000.0, -4600.0), viewport(), at(t0, 5000));
        assert!(tracker.is_revealed("a"));
        assert_eq!(tracker.section_progress("a", at(t0, 800)), 1.0);
    }

    #[test]
    fn test_section_progress_ramp() {
        let t0 = Instant::now();
        let mut tracker = RevealTracker::new();
        assert_eq!(tracker.section_progress("a", t0), 0.0);

        tracker.observe("a", rect(0.0, 400.0), viewport(), t0);
        assert_eq!(tracker.section_progress("a", t0), 0.0);
        assert!((tracker.section_progress("a", at(t0, 400)) - 0.5).abs() < 1e-6);
        assert_eq!(tracker.section_progress("a", at(t0, 800)), 1.0);
        assert_eq!(tracker.section_progress("a", at(t0, 9000)), 1.0);
    }

    #[test]
    fn test_card_stagger() {
        let t0 = Instant::now();
        let mut tracker = RevealTracker::new();
        tracker.observe("a", rect(0.0, 400.0), viewport(), t0);

        // Card 0 ramps immediately, card 2 waits 200ms
        assert!(tracker.card_progress("a", 0, at(t0, 300)) > 0.0);
        assert_eq!(tracker.card_progress("a", 2, at(t0, 200)), 0.0);
        assert!((tracker.card_progress("a", 2, at(t0, 500)) - 0.5).abs() < 1e-6);
        assert_eq!(tracker.card_progress("a", 2, at(t0, 800)), 1.0);
    }

    #[test]
    fn test_reset() {
        let t0 = Instant::now();
        let mut tracker = RevealTracker::new();
        tracker.observe("a", rect(0.0, 400.0), viewport(), t0);
        tracker.reset();
        assert!(!tracker.is_revealed("a"));
        assert_eq!(tracker.section_progress("a", at(t0, 400)), 0.0);
    }

    #[test]
    fn test_any_animating() {
        let t0 = Instant::now();
        let mut tracker = RevealTracker::new();
        assert!(!tracker.any_animating(t0, 4));

        tracker.observe("a", rect(0.0, 400.0), viewport(), t0);
        assert!(tracker.any_animating(at(t0, 500), 4));
        // 600 + 4 * 100 = 1000ms tail
        assert!(tracker.any_animating(at(t0, 999), 4));
        assert!(!tracker.any_animating(at(t0, 1001), 4));
    }
}
