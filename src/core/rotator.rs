//! Slideshow rotation state: current slide plus an auto-advance deadline.
//!
//! A rotator owns no images. It is pure index arithmetic over `len` slides
//! and a single `deadline` for the next automatic advance. The frame loop
//! calls tick() with the current time; past-deadline rotators step forward
//! and reschedule. Manual navigation restarts the countdown so a click is
//! never followed by an immediate auto-advance.

use std::time::{Duration, Instant};

/// Default delay between automatic slide advances
pub const DEFAULT_PERIOD: Duration = Duration::from_millis(3000);

/// Cyclic slide counter with an optional auto-advance deadline.
#[derive(Debug, Clone)]
pub struct Rotator {
    len: usize,
    current: usize,
    period: Duration,
    deadline: Option<Instant>,
}

impl Rotator {
    pub fn new(len: usize, period: Duration) -> Self {
        Self {
            len,
            current: 0,
            period,
            deadline: None,
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn current(&self) -> usize {
        self.current
    }

    pub fn is_running(&self) -> bool {
        self.deadline.is_some()
    }

    /// Jump to slide `index`, wrapping modulo len. Negative indices wrap
    /// backwards (-1 is the last slide). No-op when empty.
    pub fn show(&mut self, index: i64) {
        if self.len == 0 {
            return;
        }
        self.current = (index.rem_euclid(self.len as i64)) as usize;
    }

    /// Advance one slide, wrapping to 0 past the end.
    pub fn next(&mut self) {
        self.show(self.current as i64 + 1);
    }

    /// Step back one slide, wrapping to the end before 0.
    pub fn previous(&mut self) {
        self.show(self.current as i64 - 1);
    }

    /// Arm the auto-advance countdown. Overwrites any armed deadline, so
    /// repeated starts never stack and the countdown always measures a full
    /// period from `now`. No-op when empty.
    pub fn start(&mut self, now: Instant) {
        if self.len == 0 {
            return;
        }
        self.deadline = Some(now + self.period);
    }

    /// Restart the countdown after manual navigation. Cancel-then-restart:
    /// the next auto-advance lands a full period after the interaction, even
    /// when hover had the rotator paused.
    pub fn reset(&mut self, now: Instant) {
        self.start(now);
    }

    /// Suspend auto-advance, keeping the current slide.
    pub fn pause(&mut self) {
        self.deadline = None;
    }

    /// Resume auto-advance with a fresh full period.
    pub fn resume(&mut self, now: Instant) {
        self.start(now);
    }

    /// Advance past-deadline rotation. Returns true when a slide change
    /// happened; the next deadline is measured from `now`, not from the
    /// missed deadline, so a long stall produces one step, not a burst.
    pub fn tick(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.next();
                self.deadline = Some(now + self.period);
                true
            }
            _ => false,
        }
    }

    /// Time remaining until the armed deadline, if any.
    pub fn until_deadline(&self, now: Instant) -> Option<Duration> {
        self.deadline.map(|d| d.saturating_duration_since(now))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(t0: Instant, ms: u64) -> Instant {
        t0 + Duration::from_millis(ms)
    }

    #[test]
    fn test_show_wraps_modulo_len() {
        let mut r = Rotator::new(3, DEFAULT_PERIOD);
        r.show(4);
        assert_eq!(r.current(), 1);
        r.show(-1);
        assert_eq!(r.current(), 2);
        r.show(-4);
        assert_eq!(r.current(), 2);
    }

    #[test]
    fn test_next_previous_wrap() {
        let mut r = Rotator::new(3, DEFAULT_PERIOD);
        r.previous();
        assert_eq!(r.current(), 2);
        r.next();
        assert_eq!(r.current(), 0);
        r.next();
        r.next();
        r.next();
        assert_eq!(r.current(), 0);
    }

    #[test]
    fn test_empty_rotator_never_panics() {
        let mut r = Rotator::new(0, DEFAULT_PERIOD);
        r.show(5);
        r.next();
        r.previous();
        r.start(Instant::now());
        assert_eq!(r.current(), 0);
        assert!(!r.is_running());
        assert!(!r.tick(Instant::now()));
    }

    #[test]
    fn test_single_slide_keeps_rotating_in_place() {
        let t0 = Instant::now();
        let mut r = Rotator::new(1, DEFAULT_PERIOD);
        r.start(t0);
        assert!(r.is_running());
        assert!(r.tick(at(t0, 3000)));
        assert_eq!(r.current(), 0);
    }

    #[test]
    fn test_tick_advances_at_deadline() {
        let t0 = Instant::now();
        let mut r = Rotator::new(3, DEFAULT_PERIOD);
        r.start(t0);

        assert!(!r.tick(at(t0, 2999)));
        assert_eq!(r.current(), 0);

        assert!(r.tick(at(t0, 3000)));
        assert_eq!(r.current(), 1);

        // Next deadline measured from the tick that fired
        assert!(!r.tick(at(t0, 5999)));
        assert!(r.tick(at(t0, 6000)));
        assert_eq!(r.current(), 2);
    }

    #[test]
    fn test_tick_wraps_past_end() {
        let t0 = Instant::now();
        let mut r = Rotator::new(2, DEFAULT_PERIOD);
        r.start(t0);
        assert!(r.tick(at(t0, 3000)));
        assert!(r.tick(at(t0, 6000)));
        assert_eq!(r.current(), 0);
    }

    #[test]
    fn test_stall_produces_single_step() {
        let t0 = Instant::now();
        let mut r = Rotator::new(5, DEFAULT_PERIOD);
        r.start(t0);

        // 10s stall: one advance, deadline rearmed from now
        assert!(r.tick(at(t0, 10_000)));
        assert_eq!(r.current(), 1);
        assert!(!r.tick(at(t0, 12_999)));
        assert!(r.tick(at(t0, 13_000)));
        assert_eq!(r.current(), 2);
    }

    #[test]
    fn test_double_start_does_not_stack() {
        let t0 = Instant::now();
        let mut r = Rotator::new(3, DEFAULT_PERIOD);
        r.start(t0);
        r.start(at(t0, 1000));

        // Only the later deadline exists
        assert!(!r.tick(at(t0, 3000)));
        assert!(r.tick(at(t0, 4000)));
        assert_eq!(r.current(), 1);
    }

    #[test]
    fn test_reset_defers_next_advance() {
        let t0 = Instant::now();
        let mut r = Rotator::new(3, DEFAULT_PERIOD);
        r.start(t0);

        // Manual click at t=500 restarts the countdown
        r.next();
        r.reset(at(t0, 500));
        assert_eq!(r.current(), 1);

        assert!(!r.tick(at(t0, 3000)));
        assert!(r.tick(at(t0, 3500)));
        assert_eq!(r.current(), 2);
    }

    #[test]
    fn test_reset_arms_a_paused_rotator() {
        let t0 = Instant::now();
        let mut r = Rotator::new(3, DEFAULT_PERIOD);
        r.pause();
        r.reset(t0);
        assert!(r.is_running());
        assert!(!r.tick(at(t0, 2999)));
        assert!(r.tick(at(t0, 3000)));
    }

    #[test]
    fn test_pause_resume_keeps_index() {
        let t0 = Instant::now();
        let mut r = Rotator::new(4, DEFAULT_PERIOD);
        r.start(t0);
        assert!(r.tick(at(t0, 3000)));
        assert_eq!(r.current(), 1);

        r.pause();
        assert!(!r.tick(at(t0, 60_000)));
        assert_eq!(r.current(), 1);

        r.resume(at(t0, 60_000));
        assert!(!r.tick(at(t0, 62_999)));
        assert!(r.tick(at(t0, 63_000)));
        assert_eq!(r.current(), 2);
    }

    #[test]
    fn test_until_deadline() {
        let t0 = Instant::now();
        let mut r = Rotator::new(2, DEFAULT_PERIOD);
        assert_eq!(r.until_deadline(t0), None);

        r.start(t0);
        assert_eq!(r.until_deadline(at(t0, 1000)), Some(Duration::from_millis(2000)));
        // Past deadline saturates to zero
        assert_eq!(r.until_deadline(at(t0, 5000)), Some(Duration::ZERO));
    }

    #[test]
    fn test_custom_period() {
        let t0 = Instant::now();
        let mut r = Rotator::new(2, Duration::from_millis(500));
        r.start(t0);
        assert!(r.tick(at(t0, 500)));
        assert_eq!(r.current(), 1);
    }
}
